pub mod adherence_evaluator;
pub mod adjustment_service;
pub mod availability_generator;
pub mod constraint_scheduler;
pub mod recommendation_engine;
pub mod schedule_optimizer;
pub mod schedule_utils;
pub mod settings_service;
pub mod slot_scorer;
pub mod time_slot_catalog;
