pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, AppResult};
pub use models::activity::{ActivityType, TimeSlot};
pub use models::schedule::{
    Conflict, ConflictReason, OptimizationRequest, ScheduleConstraint, ScheduleOptimization,
    ScheduledActivity, UserPreferences,
};
pub use models::settings::OptimizerSettings;
pub use services::schedule_optimizer::ScheduleOptimizer;
