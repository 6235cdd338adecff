//! Core workout log for FitTrack.
//! Persistence and plot preparation; presentation layers sit on top.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;

pub use config::{InputMode, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::workout::{
    AggregatePoint, ExerciseType, NewWorkout, NumericValue, WorkoutId, WorkoutRecord,
    WorkoutValidationError,
};
pub use report::scatter::{
    build_scatter, category_color, normalize_reps, CategoryColor, ColorScheme, PointColor,
    ReportError, ScatterPoint, ScatterSeries,
};
pub use repo::workout_repo::{RepoError, RepoResult, SqliteWorkoutRepository, WorkoutRepository};
pub use service::workout_store::{StoreError, StoreResult, WorkoutStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
