use fittrack_core::db::migrations::latest_version;
use fittrack_core::db::{
    open_db, open_db_in_memory, open_db_in_memory_with_timeout, open_db_with_timeout, DbError,
    DEFAULT_BUSY_TIMEOUT,
};
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "fitness");
}

#[test]
fn busy_timeout_is_applied_once_per_open() {
    let conn = open_db_in_memory_with_timeout(Duration::from_millis(250)).unwrap();
    assert_eq!(busy_timeout_ms(&conn), 250);
    assert_eq!(schema_version(&conn), latest_version());

    let conn = open_db_in_memory().unwrap();
    assert_eq!(
        busy_timeout_ms(&conn),
        DEFAULT_BUSY_TIMEOUT.as_millis() as i64
    );

    let dir = tempfile::tempdir().unwrap();
    let conn = open_db_with_timeout(dir.path().join("fitness.db"), Duration::from_millis(40))
        .unwrap();
    assert_eq!(busy_timeout_ms(&conn), 40);
}

#[test]
fn fitness_table_has_expected_columns() {
    let conn = open_db_in_memory().unwrap();
    let mut stmt = conn.prepare("PRAGMA table_info(fitness);").unwrap();
    let columns: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(1)?, row.get(2)?)))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(
        columns,
        vec![
            ("id".to_string(), "INTEGER".to_string()),
            ("date".to_string(), "TEXT".to_string()),
            ("reps".to_string(), "REAL".to_string()),
            ("weight".to_string(), "REAL".to_string()),
            ("exercise_type".to_string(), "TEXT".to_string()),
        ]
    );
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitness.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "fitness");
}

#[test]
fn legacy_database_without_version_keeps_its_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fitness.db");

    let legacy = Connection::open(&path).unwrap();
    legacy
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS fitness (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT,
                reps REAL,
                weight REAL,
                exercise_type TEXT
            );
            INSERT INTO fitness (date, reps, weight, exercise_type)
            VALUES ('2023-12-31', '12', '95', 'Squat');",
        )
        .unwrap();
    drop(legacy);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM fitness;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn busy_timeout_ms(conn: &Connection) -> i64 {
    conn.query_row("PRAGMA busy_timeout;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
