//! Workout record model.
//!
//! # Responsibility
//! - Define the `fitness` row shape and its insert request.
//! - Parse free-text form input without losing what the user typed.
//! - Provide strict-mode validation for callers that want it.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes.
//! - No sign or range invariant exists for `reps` or `weight`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier (SQLite `AUTOINCREMENT` rowid).
pub type WorkoutId = i64;

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").expect("valid date regex")
});

/// Numeric column value as it was submitted or persisted.
///
/// `Text` keeps non-numeric input verbatim. `Missing` is a NULL cell, which
/// only appears in files edited outside the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericValue {
    Number(f64),
    Text(String),
    Missing,
}

impl NumericValue {
    /// Parses form text, keeping the raw string when it is not a number.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Number(value),
            _ => Self::Text(text.to_string()),
        }
    }

    /// Returns the numeric value, or `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) | Self::Missing => None,
        }
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl Display for NumericValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Missing => Ok(()),
        }
    }
}

/// Exercise category.
///
/// Persisted as its label; labels outside the fixed set are kept as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExerciseType {
    BenchPress,
    Squat,
    Deadlift,
    Other,
    Custom(String),
}

impl ExerciseType {
    /// Fixed choices offered by the entry form.
    pub const CHOICES: [ExerciseType; 4] = [
        ExerciseType::BenchPress,
        ExerciseType::Squat,
        ExerciseType::Deadlift,
        ExerciseType::Other,
    ];

    /// Parses a label. `Bench Press` is accepted as the form spelling.
    pub fn parse(label: &str) -> Self {
        match label {
            "BenchPress" | "Bench Press" => Self::BenchPress,
            "Squat" => Self::Squat,
            "Deadlift" => Self::Deadlift,
            "Other" => Self::Other,
            other => Self::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::BenchPress => "BenchPress",
            Self::Squat => "Squat",
            Self::Deadlift => "Deadlift",
            Self::Other => "Other",
            Self::Custom(label) => label.as_str(),
        }
    }
}

impl Display for ExerciseType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ExerciseType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ExerciseType> for String {
    fn from(value: ExerciseType) -> Self {
        match value {
            ExerciseType::Custom(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

/// One persisted `fitness` row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: WorkoutId,
    /// ISO 8601 calendar date, e.g. `2024-01-15`.
    pub date: String,
    pub reps: NumericValue,
    /// Pounds.
    pub weight: NumericValue,
    pub exercise_type: ExerciseType,
}

/// Plot projection of one row: `(weight, reps, exercise_type)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub weight: NumericValue,
    pub reps: NumericValue,
    pub exercise_type: ExerciseType,
}

/// Insert request for a new workout row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkout {
    pub date: String,
    pub reps: NumericValue,
    pub weight: NumericValue,
    pub exercise_type: ExerciseType,
}

impl NewWorkout {
    pub fn new(
        date: impl Into<String>,
        reps: impl Into<NumericValue>,
        weight: impl Into<NumericValue>,
        exercise_type: ExerciseType,
    ) -> Self {
        Self {
            date: date.into(),
            reps: reps.into(),
            weight: weight.into(),
            exercise_type,
        }
    }

    /// Builds a request from raw entry-form text fields.
    pub fn from_form(date: &str, reps: &str, weight: &str, exercise_type: &str) -> Self {
        Self {
            date: date.trim().to_string(),
            reps: NumericValue::parse(reps),
            weight: NumericValue::parse(weight),
            exercise_type: ExerciseType::parse(exercise_type.trim()),
        }
    }

    /// Strict-mode checks: finite numeric `reps`/`weight` and a `YYYY-MM-DD`
    /// date.
    pub fn validate(&self) -> Result<(), WorkoutValidationError> {
        if !ISO_DATE.is_match(&self.date) {
            return Err(WorkoutValidationError::MalformedDate(self.date.clone()));
        }
        for (field, value) in [("reps", &self.reps), ("weight", &self.weight)] {
            if !matches!(value, NumericValue::Number(number) if number.is_finite()) {
                return Err(WorkoutValidationError::NonNumeric {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Check applied in every input mode: SQLite stores NaN as NULL and
    /// infinities cannot be plotted, so non-finite numbers never reach a row.
    pub fn ensure_finite(&self) -> Result<(), WorkoutValidationError> {
        for (field, value) in [("reps", &self.reps), ("weight", &self.weight)] {
            if let NumericValue::Number(number) = value {
                if !number.is_finite() {
                    return Err(WorkoutValidationError::NonNumeric {
                        field,
                        value: number.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkoutValidationError {
    NonNumeric { field: &'static str, value: String },
    MalformedDate(String),
}

impl Display for WorkoutValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonNumeric { field, value } => {
                write!(f, "{field} must be numeric, got `{value}`")
            }
            Self::MalformedDate(date) => write!(f, "date must be YYYY-MM-DD, got `{date}`"),
        }
    }
}

impl Error for WorkoutValidationError {}
