//! Workout repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/list/delete/aggregate APIs over the `fitness` table.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Strict-mode write paths call `NewWorkout::validate()` before SQL runs.
//! - Non-finite numbers are refused on write in every input mode.
//! - NULL cells decode to empty values; other undecodable state is rejected.
//! - Equal sort keys fall back to insertion order (`id ASC`).

use crate::config::InputMode;
use crate::db::DbError;
use crate::model::workout::{
    AggregatePoint, ExerciseType, NewWorkout, NumericValue, WorkoutId, WorkoutRecord,
    WorkoutValidationError,
};
use rusqlite::types::{Value, ValueRef};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const WORKOUT_SELECT_SQL: &str = "SELECT
    id,
    date,
    reps,
    weight,
    exercise_type
FROM fitness";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for workout persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(WorkoutValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted workout data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<WorkoutValidationError> for RepoError {
    fn from(value: WorkoutValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the workout log.
pub trait WorkoutRepository {
    fn create_workout(&self, workout: &NewWorkout) -> RepoResult<WorkoutId>;
    fn get_workout(&self, id: WorkoutId) -> RepoResult<Option<WorkoutRecord>>;
    /// All rows, `date` descending.
    fn list_workouts(&self) -> RepoResult<Vec<WorkoutRecord>>;
    /// Returns whether a row was removed. Unknown ids are not an error.
    fn delete_workout(&self, id: WorkoutId) -> RepoResult<bool>;
    /// All rows projected to plot points, `reps` ascending.
    fn aggregate_workouts(&self) -> RepoResult<Vec<AggregatePoint>>;
}

/// SQLite-backed workout repository.
pub struct SqliteWorkoutRepository<'conn> {
    conn: &'conn Connection,
    input_mode: InputMode,
}

impl<'conn> SqliteWorkoutRepository<'conn> {
    /// Repository in legacy input mode.
    pub fn new(conn: &'conn Connection) -> Self {
        Self::with_input_mode(conn, InputMode::Legacy)
    }

    pub fn with_input_mode(conn: &'conn Connection, input_mode: InputMode) -> Self {
        Self { conn, input_mode }
    }
}

impl WorkoutRepository for SqliteWorkoutRepository<'_> {
    fn create_workout(&self, workout: &NewWorkout) -> RepoResult<WorkoutId> {
        match self.input_mode {
            InputMode::Strict => workout.validate()?,
            InputMode::Legacy => workout.ensure_finite()?,
        }

        self.conn.execute(
            "INSERT INTO fitness (date, reps, weight, exercise_type)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                workout.date.as_str(),
                numeric_to_db(&workout.reps),
                numeric_to_db(&workout.weight),
                workout.exercise_type.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_workout(&self, id: WorkoutId) -> RepoResult<Option<WorkoutRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORKOUT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_workout_row(row)?));
        }

        Ok(None)
    }

    fn list_workouts(&self) -> RepoResult<Vec<WorkoutRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{WORKOUT_SELECT_SQL} ORDER BY date DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut workouts = Vec::new();

        while let Some(row) = rows.next()? {
            workouts.push(parse_workout_row(row)?);
        }

        Ok(workouts)
    }

    fn delete_workout(&self, id: WorkoutId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM fitness WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }

    fn aggregate_workouts(&self) -> RepoResult<Vec<AggregatePoint>> {
        let mut stmt = self.conn.prepare(
            "SELECT weight, reps, exercise_type
             FROM fitness
             ORDER BY reps ASC, id ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut points = Vec::new();

        while let Some(row) = rows.next()? {
            points.push(AggregatePoint {
                weight: parse_numeric(row, "weight")?,
                reps: parse_numeric(row, "reps")?,
                exercise_type: parse_exercise_type(row)?,
            });
        }

        Ok(points)
    }
}

fn parse_workout_row(row: &Row<'_>) -> RepoResult<WorkoutRecord> {
    let date = match row.get_ref("date")? {
        ValueRef::Text(bytes) => text_column(bytes, "date")?,
        ValueRef::Null => String::new(),
        other => {
            return Err(RepoError::InvalidData(format!(
                "expected text in fitness.date, got {:?}",
                other.data_type()
            )));
        }
    };

    Ok(WorkoutRecord {
        id: row.get("id")?,
        date,
        reps: parse_numeric(row, "reps")?,
        weight: parse_numeric(row, "weight")?,
        exercise_type: parse_exercise_type(row)?,
    })
}

fn parse_numeric(row: &Row<'_>, column: &str) -> RepoResult<NumericValue> {
    match row.get_ref(column)? {
        ValueRef::Real(value) => Ok(NumericValue::Number(value)),
        ValueRef::Integer(value) => Ok(NumericValue::Number(value as f64)),
        ValueRef::Text(bytes) => Ok(NumericValue::Text(text_column(bytes, column)?)),
        ValueRef::Null => Ok(NumericValue::Missing),
        other => Err(RepoError::InvalidData(format!(
            "expected number or text in fitness.{column}, got {:?}",
            other.data_type()
        ))),
    }
}

fn parse_exercise_type(row: &Row<'_>) -> RepoResult<ExerciseType> {
    match row.get_ref("exercise_type")? {
        ValueRef::Text(bytes) => Ok(ExerciseType::parse(&text_column(bytes, "exercise_type")?)),
        ValueRef::Null => Ok(ExerciseType::Custom(String::new())),
        other => Err(RepoError::InvalidData(format!(
            "expected text in fitness.exercise_type, got {:?}",
            other.data_type()
        ))),
    }
}

fn text_column(bytes: &[u8], column: &str) -> RepoResult<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|_| RepoError::InvalidData(format!("non UTF-8 text in fitness.{column}")))
}

fn numeric_to_db(value: &NumericValue) -> Value {
    match value {
        NumericValue::Number(number) => Value::Real(*number),
        NumericValue::Text(text) => Value::Text(text.clone()),
        NumericValue::Missing => Value::Null,
    }
}
