//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `fittrack_core` linkage.
//! - With a database path argument, print the workout table and plot series.
//! - With a log directory argument, write core log events there.
//!
//! Usage: `fittrack_cli [DB_PATH [LOG_DIR]]`

use fittrack_core::{
    default_log_level, init_logging, ColorScheme, PointColor, StoreError, WorkoutStore,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("fittrack_core ping={}", fittrack_core::ping());
    println!("fittrack_core version={}", fittrack_core::core_version());

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        return ExitCode::SUCCESS;
    };

    if let Some(log_dir) = args.next() {
        let log_dir = absolute_dir(Path::new(&log_dir));
        if let Err(err) = init_logging(default_log_level().as_str(), &log_dir.to_string_lossy()) {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    }

    match report(&path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn report(path: &str) -> Result<(), StoreError> {
    let store = WorkoutStore::initialize(path)?;

    println!("{:>5}  {:<10}  {:>8}  {:>8}  Exercise Type", "Id", "Date", "Reps", "Weight");
    for workout in store.list()? {
        println!(
            "{:>5}  {:<10}  {:>8}  {:>8}  {}",
            workout.id,
            workout.date,
            workout.reps.to_string(),
            workout.weight.to_string(),
            workout.exercise_type
        );
    }

    match store.scatter_series(ColorScheme::NormalizedReps) {
        Ok(series) => {
            println!("{} ({} / {})", series.title, series.x_label, series.y_label);
            for point in &series.points {
                let shade = match point.color {
                    PointColor::Scale(value) => format!("{value:.3}"),
                    PointColor::Category(color) => color.as_str().to_string(),
                };
                println!(
                    "  weight={} reps={} exercise={} color={}",
                    point.weight, point.reps, point.exercise_type, shade
                );
            }
        }
        // Nothing to plot is not a failure of the listing itself.
        Err(err @ (StoreError::EmptyDataSet | StoreError::DegenerateRange { .. })) => {
            println!("plot unavailable: {err}");
        }
        Err(err) => return Err(err),
    }

    store.close()
}

// `init_logging` only accepts absolute directories.
fn absolute_dir(dir: &Path) -> PathBuf {
    if dir.is_absolute() {
        return dir.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(dir))
        .unwrap_or_else(|_| dir.to_path_buf())
}
