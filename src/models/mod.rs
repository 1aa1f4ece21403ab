pub mod activity;
pub mod adjustment;
pub mod schedule;
pub mod settings;
