use fittrack_core::{
    init_logging, logging_status, ExerciseType, LogLevel, NewWorkout, StoreConfig, WorkoutStore,
};
use std::fs;

#[test]
fn store_events_reach_the_log_file_without_workout_content() {
    let dir = tempfile::tempdir().unwrap();
    init_logging("info", dir.path().to_str().unwrap()).unwrap();
    assert_eq!(logging_status().unwrap().0, LogLevel::Info);

    let store = WorkoutStore::open_in_memory(StoreConfig::default()).unwrap();
    let id = store
        .add(&NewWorkout::new("2024-01-15", 8.0, 185.0, ExerciseType::Deadlift))
        .unwrap();
    store.delete(id).unwrap();
    log::logger().flush();

    let mut contents = String::new();
    for entry in fs::read_dir(dir.path()).unwrap() {
        contents.push_str(&fs::read_to_string(entry.unwrap().path()).unwrap());
    }

    assert!(contents.contains("event=db_open"));
    assert!(contents.contains(&format!("event=workout_add module=store status=ok id={id}")));
    assert!(contents.contains("event=workout_delete"));
    assert!(!contents.contains("2024-01-15"));
    assert!(!contents.contains("Deadlift"));
}
