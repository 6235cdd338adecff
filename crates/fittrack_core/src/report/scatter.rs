//! Reps-vs-weight scatter series.
//!
//! # Responsibility
//! - Turn aggregate points into render-ready, coloured scatter points.
//! - Report empty and degenerate inputs as errors instead of NaN colours.
//!
//! # Invariants
//! - Output point order equals input order (reps ascending from the store).
//! - Normalized values lie in `[0, 1]`.

use crate::model::workout::{AggregatePoint, ExerciseType, NumericValue};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const SCATTER_TITLE: &str = "Weight Lifted vs. Reps Completed";
pub const SCATTER_X_LABEL: &str = "Weight";
pub const SCATTER_Y_LABEL: &str = "Reps";

pub type ReportResult<T> = Result<T, ReportError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// No rows to plot.
    EmptyDataSet,
    /// Every row has the same rep count; normalization would divide by zero.
    DegenerateRange { reps: f64 },
    /// A persisted value cannot be plotted as a number.
    NonNumeric { field: &'static str, value: String },
}

impl Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDataSet => write!(f, "no workouts recorded yet"),
            Self::DegenerateRange { reps } => {
                write!(f, "all workouts have {reps} reps; cannot normalize")
            }
            Self::NonNumeric { field, value } => {
                write!(f, "{field} value `{value}` is not numeric")
            }
        }
    }
}

impl Error for ReportError {}

/// Point colouring strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Continuous scale driven by normalized reps.
    #[default]
    NormalizedReps,
    /// Fixed colour per exercise category.
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryColor {
    Red,
    Blue,
    Yellow,
    Green,
}

impl CategoryColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Green => "green",
        }
    }
}

/// Fixed category colour map. Custom labels share the `Other` colour.
pub fn category_color(exercise_type: &ExerciseType) -> CategoryColor {
    match exercise_type {
        ExerciseType::BenchPress => CategoryColor::Red,
        ExerciseType::Squat => CategoryColor::Blue,
        ExerciseType::Deadlift => CategoryColor::Yellow,
        ExerciseType::Other | ExerciseType::Custom(_) => CategoryColor::Green,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointColor {
    /// Position on a continuous colour map, `0.0..=1.0`.
    Scale(f64),
    Category(CategoryColor),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub weight: f64,
    pub reps: f64,
    pub exercise_type: ExerciseType,
    pub color: PointColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub scheme: ColorScheme,
    pub points: Vec<ScatterPoint>,
}

/// Linearly rescales rep counts into `[0, 1]`.
///
/// # Errors
/// - `EmptyDataSet` for an empty slice.
/// - `DegenerateRange` when min equals max (this includes a single value).
/// - `NonNumeric` for NaN or infinite counts.
pub fn normalize_reps(reps: &[f64]) -> ReportResult<Vec<f64>> {
    let Some(&first) = reps.first() else {
        return Err(ReportError::EmptyDataSet);
    };
    if let Some(bad) = reps.iter().find(|r| !r.is_finite()) {
        return Err(ReportError::NonNumeric {
            field: "reps",
            value: bad.to_string(),
        });
    }

    let (min_reps, max_reps) = reps
        .iter()
        .fold((first, first), |(lo, hi), &r| (lo.min(r), hi.max(r)));

    let span = max_reps - min_reps;
    if span == 0.0 {
        return Err(ReportError::DegenerateRange { reps: min_reps });
    }

    Ok(reps.iter().map(|r| (r - min_reps) / span).collect())
}

/// Builds a scatter series from aggregate points in the requested scheme.
///
/// # Errors
/// - `EmptyDataSet` when `points` is empty.
/// - `NonNumeric` when any weight or reps value is text, NULL or non-finite.
/// - `DegenerateRange` for `NormalizedReps` when all reps are equal.
pub fn build_scatter(
    points: &[AggregatePoint],
    scheme: ColorScheme,
) -> ReportResult<ScatterSeries> {
    if points.is_empty() {
        return Err(ReportError::EmptyDataSet);
    }

    let mut weights = Vec::with_capacity(points.len());
    let mut reps = Vec::with_capacity(points.len());
    for point in points {
        weights.push(numeric(&point.weight, "weight")?);
        reps.push(numeric(&point.reps, "reps")?);
    }

    let colors: Vec<PointColor> = match scheme {
        ColorScheme::NormalizedReps => normalize_reps(&reps)?
            .into_iter()
            .map(PointColor::Scale)
            .collect(),
        ColorScheme::Category => points
            .iter()
            .map(|point| PointColor::Category(category_color(&point.exercise_type)))
            .collect(),
    };

    let scatter_points = points
        .iter()
        .zip(weights)
        .zip(reps)
        .zip(colors)
        .map(|(((point, weight), reps), color)| ScatterPoint {
            weight,
            reps,
            exercise_type: point.exercise_type.clone(),
            color,
        })
        .collect();

    Ok(ScatterSeries {
        title: SCATTER_TITLE.to_string(),
        x_label: SCATTER_X_LABEL.to_string(),
        y_label: SCATTER_Y_LABEL.to_string(),
        scheme,
        points: scatter_points,
    })
}

// SQLite REAL affinity turns overflowing text such as `1e400` into infinity.
fn numeric(value: &NumericValue, field: &'static str) -> ReportResult<f64> {
    value
        .as_f64()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ReportError::NonNumeric {
            field,
            value: value.to_string(),
        })
}
