//! Workout store use-case service.
//!
//! # Responsibility
//! - Own the SQLite connection for one workout log file.
//! - Expose `add`/`list`/`delete`/`aggregate` plus the scatter report.
//! - Fold layer errors into one caller-facing taxonomy.
//!
//! # Invariants
//! - One store instance per database file; access is single-threaded.
//! - Every operation is one atomic statement; failures leave rows unchanged.
//! - Errors are always returned, never swallowed.
//! - Logs carry ids and counts only, never workout content.

use crate::config::StoreConfig;
use crate::db::{open_db_in_memory_with_timeout, open_db_with_timeout, DbError};
use crate::model::workout::{
    AggregatePoint, NewWorkout, WorkoutId, WorkoutRecord, WorkoutValidationError,
};
use crate::report::scatter::{build_scatter, ColorScheme, ReportError, ScatterSeries};
use crate::repo::workout_repo::{RepoError, SqliteWorkoutRepository, WorkoutRepository};
use log::{debug, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// The database file cannot be opened, created or bootstrapped.
    StorageUnavailable(DbError),
    /// Aggregate or report requested with zero records.
    EmptyDataSet,
    /// All records share one rep count; normalization is undefined.
    DegenerateRange { reps: f64 },
    /// Non-numeric `reps`/`weight`, rejected at `add` (strict mode) or met
    /// while building a plot.
    InvalidNumericInput { field: &'static str, value: String },
    /// Strict mode only.
    InvalidDate(String),
    Repo(RepoError),
}

impl StoreError {
    /// Stable, content-free identifier for logs and host-side branching.
    pub fn code(&self) -> &'static str {
        match self {
            Self::StorageUnavailable(_) => "storage_unavailable",
            Self::EmptyDataSet => "empty_data_set",
            Self::DegenerateRange { .. } => "degenerate_range",
            Self::InvalidNumericInput { .. } => "invalid_numeric_input",
            Self::InvalidDate(_) => "invalid_date",
            Self::Repo(_) => "repo_error",
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageUnavailable(err) => write!(f, "workout storage unavailable: {err}"),
            Self::EmptyDataSet => write!(f, "no workouts recorded yet"),
            Self::DegenerateRange { reps } => {
                write!(f, "all workouts have {reps} reps; cannot normalize")
            }
            Self::InvalidNumericInput { field, value } => {
                write!(f, "{field} must be numeric, got `{value}`")
            }
            Self::InvalidDate(date) => write!(f, "date must be YYYY-MM-DD, got `{date}`"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageUnavailable(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => err.into(),
            other => Self::Repo(other),
        }
    }
}

impl From<WorkoutValidationError> for StoreError {
    fn from(value: WorkoutValidationError) -> Self {
        match value {
            WorkoutValidationError::NonNumeric { field, value } => {
                Self::InvalidNumericInput { field, value }
            }
            WorkoutValidationError::MalformedDate(date) => Self::InvalidDate(date),
        }
    }
}

impl From<ReportError> for StoreError {
    fn from(value: ReportError) -> Self {
        match value {
            ReportError::EmptyDataSet => Self::EmptyDataSet,
            ReportError::DegenerateRange { reps } => Self::DegenerateRange { reps },
            ReportError::NonNumeric { field, value } => Self::InvalidNumericInput { field, value },
        }
    }
}

/// Owned handle to one workout log database.
///
/// Dropping the store closes the connection; use [`WorkoutStore::close`] to
/// observe close errors.
pub struct WorkoutStore {
    conn: Connection,
    config: StoreConfig,
}

impl WorkoutStore {
    /// Opens or creates the store at `path` with default configuration.
    pub fn initialize(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::initialize_with_config(path, StoreConfig::default())
    }

    /// Opens or creates the store at `path`.
    ///
    /// # Errors
    /// - `StorageUnavailable` when the file cannot be opened or the schema
    ///   cannot be created/migrated.
    pub fn initialize_with_config(
        path: impl AsRef<Path>,
        config: StoreConfig,
    ) -> StoreResult<Self> {
        let conn = open_db_with_timeout(path, config.busy_timeout())
            .map_err(StoreError::StorageUnavailable)?;
        info!(
            "event=store_init module=store status=ok mode=file input_mode={:?}",
            config.input_mode
        );
        Ok(Self { conn, config })
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory(config: StoreConfig) -> StoreResult<Self> {
        let conn = open_db_in_memory_with_timeout(config.busy_timeout())
            .map_err(StoreError::StorageUnavailable)?;
        info!(
            "event=store_init module=store status=ok mode=memory input_mode={:?}",
            config.input_mode
        );
        Ok(Self { conn, config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Inserts a record and returns its new id.
    pub fn add(&self, workout: &NewWorkout) -> StoreResult<WorkoutId> {
        match self.repo().create_workout(workout) {
            Ok(id) => {
                info!("event=workout_add module=store status=ok id={id}");
                Ok(id)
            }
            Err(err) => {
                let err = StoreError::from(err);
                warn!(
                    "event=workout_add module=store status=error error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// All records, newest date first; equal dates keep insertion order.
    pub fn list(&self) -> StoreResult<Vec<WorkoutRecord>> {
        let workouts = self.repo().list_workouts()?;
        debug!(
            "event=workout_list module=store status=ok count={}",
            workouts.len()
        );
        Ok(workouts)
    }

    /// Single record lookup.
    pub fn get(&self, id: WorkoutId) -> StoreResult<Option<WorkoutRecord>> {
        Ok(self.repo().get_workout(id)?)
    }

    /// Removes the record with `id`. Unknown ids are a no-op.
    pub fn delete(&self, id: WorkoutId) -> StoreResult<()> {
        let removed = self.repo().delete_workout(id)?;
        info!("event=workout_delete module=store status=ok id={id} removed={removed}");
        Ok(())
    }

    /// Plot projection ordered by reps ascending.
    ///
    /// # Errors
    /// - `EmptyDataSet` when no records exist.
    pub fn aggregate(&self) -> StoreResult<Vec<AggregatePoint>> {
        let points = self.repo().aggregate_workouts()?;
        if points.is_empty() {
            return Err(StoreError::EmptyDataSet);
        }
        debug!(
            "event=workout_aggregate module=store status=ok count={}",
            points.len()
        );
        Ok(points)
    }

    /// Aggregate view rendered into a coloured scatter series.
    pub fn scatter_series(&self, scheme: ColorScheme) -> StoreResult<ScatterSeries> {
        let points = self.aggregate()?;
        Ok(build_scatter(&points, scheme)?)
    }

    /// Closes the underlying connection.
    pub fn close(self) -> StoreResult<()> {
        self.conn
            .close()
            .map_err(|(_, err)| StoreError::Repo(RepoError::from(err)))?;
        info!("event=store_close module=store status=ok");
        Ok(())
    }

    fn repo(&self) -> SqliteWorkoutRepository<'_> {
        SqliteWorkoutRepository::with_input_mode(&self.conn, self.config.input_mode)
    }
}
