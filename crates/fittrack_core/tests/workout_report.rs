use fittrack_core::{
    CategoryColor, ColorScheme, ExerciseType, NewWorkout, NumericValue, PointColor, StoreConfig,
    StoreError, WorkoutStore,
};

fn store() -> WorkoutStore {
    WorkoutStore::open_in_memory(StoreConfig::default()).unwrap()
}

fn two_workout_store() -> WorkoutStore {
    let store = store();
    store
        .add(&NewWorkout::new("2024-01-01", 10.0, 135.0, ExerciseType::Squat))
        .unwrap();
    store
        .add(&NewWorkout::new("2024-01-02", 8.0, 185.0, ExerciseType::BenchPress))
        .unwrap();
    store
}

#[test]
fn list_puts_later_date_first() {
    let store = two_workout_store();
    let listed = store.list().unwrap();

    assert_eq!(listed[0].exercise_type, ExerciseType::BenchPress);
    assert_eq!(listed[1].exercise_type, ExerciseType::Squat);
}

#[test]
fn aggregate_orders_by_reps_ascending() {
    let store = two_workout_store();
    let points = store.aggregate().unwrap();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0].exercise_type, ExerciseType::BenchPress);
    assert_eq!(points[0].reps, NumericValue::Number(8.0));
    assert_eq!(points[0].weight, NumericValue::Number(185.0));
    assert_eq!(points[1].exercise_type, ExerciseType::Squat);
    assert_eq!(points[1].reps, NumericValue::Number(10.0));
}

#[test]
fn aggregate_ties_keep_insertion_order() {
    let store = store();
    for (weight, kind) in [
        (100.0, ExerciseType::Deadlift),
        (90.0, ExerciseType::Squat),
        (80.0, ExerciseType::Other),
    ] {
        store
            .add(&NewWorkout::new("2024-01-01", 5.0, weight, kind))
            .unwrap();
    }
    store
        .add(&NewWorkout::new("2024-01-01", 3.0, 70.0, ExerciseType::BenchPress))
        .unwrap();

    let weights: Vec<_> = store
        .aggregate()
        .unwrap()
        .into_iter()
        .map(|p| p.weight)
        .collect();
    assert_eq!(
        weights,
        vec![
            NumericValue::Number(70.0),
            NumericValue::Number(100.0),
            NumericValue::Number(90.0),
            NumericValue::Number(80.0),
        ]
    );
}

#[test]
fn normalized_scatter_spans_unit_interval() {
    let store = two_workout_store();
    let series = store.scatter_series(ColorScheme::NormalizedReps).unwrap();

    assert_eq!(series.title, "Weight Lifted vs. Reps Completed");
    assert_eq!(series.points[0].reps, 8.0);
    assert_eq!(series.points[0].color, PointColor::Scale(0.0));
    assert_eq!(series.points[1].reps, 10.0);
    assert_eq!(series.points[1].color, PointColor::Scale(1.0));
}

#[test]
fn category_scatter_uses_fixed_colors() {
    let store = two_workout_store();
    let series = store.scatter_series(ColorScheme::Category).unwrap();

    assert_eq!(
        series.points[0].color,
        PointColor::Category(CategoryColor::Red)
    );
    assert_eq!(
        series.points[1].color,
        PointColor::Category(CategoryColor::Blue)
    );
}

#[test]
fn empty_store_reports_empty_data_set() {
    let store = store();

    assert!(matches!(store.aggregate(), Err(StoreError::EmptyDataSet)));
    assert!(matches!(
        store.scatter_series(ColorScheme::NormalizedReps),
        Err(StoreError::EmptyDataSet)
    ));
}

#[test]
fn equal_reps_report_degenerate_range() {
    let store = store();
    for weight in [95.0, 135.0, 185.0] {
        store
            .add(&NewWorkout::new("2024-01-01", 5.0, weight, ExerciseType::Squat))
            .unwrap();
    }

    let err = store
        .scatter_series(ColorScheme::NormalizedReps)
        .unwrap_err();
    assert!(matches!(err, StoreError::DegenerateRange { reps } if reps == 5.0));
}

#[test]
fn garbage_reps_fail_the_plot_not_the_listing() {
    let store = store();
    store
        .add(&NewWorkout::from_form("2024-01-01", "ten", "135", "Squat"))
        .unwrap();
    store
        .add(&NewWorkout::from_form("2024-01-02", "8", "185", "Deadlift"))
        .unwrap();

    assert_eq!(store.list().unwrap().len(), 2);
    let err = store.scatter_series(ColorScheme::Category).unwrap_err();
    assert!(matches!(
        err,
        StoreError::InvalidNumericInput { field: "reps", ref value } if value == "ten"
    ));
}

#[test]
fn overflowing_form_text_is_kept_out_of_the_plot() {
    let store = store();
    let id = store
        .add(&NewWorkout::from_form("2024-01-01", "1e400", "100", "Squat"))
        .unwrap();
    store
        .add(&NewWorkout::from_form("2024-01-02", "8", "185", "Deadlift"))
        .unwrap();

    let stored = store.get(id).unwrap().unwrap();
    assert!(stored.reps.as_f64().is_some_and(f64::is_infinite));

    for scheme in [ColorScheme::NormalizedReps, ColorScheme::Category] {
        let err = store.scatter_series(scheme).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidNumericInput { field: "reps", ref value } if value == "inf"
        ));
    }
}
