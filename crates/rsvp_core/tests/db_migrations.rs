use rsvp_core::db::migrations::{latest_version, schema_version};
use rsvp_core::db::schema::{RSVPS_ORDER_INDEX, RSVPS_TABLE};
use rsvp_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, ErrorCode};

const INSERT_SQL: &str = "INSERT INTO rsvps (
    id,
    full_name,
    attending_events,
    guest_status,
    plus_one_name,
    created_at
) VALUES (?1, ?2, 'reception', ?3, ?4, '2026-03-01T10:00:00.000Z');";

fn insert_row(
    conn: &Connection,
    id: &str,
    full_name: &str,
    status: &str,
    plus_one: Option<&str>,
) -> rusqlite::Result<usize> {
    conn.execute(INSERT_SQL, params![id, full_name, status, plus_one])
}

fn assert_constraint_violation(result: rusqlite::Result<usize>, case: &str) {
    match result {
        Err(rusqlite::Error::SqliteFailure(inner, _)) => {
            assert_eq!(inner.code, ErrorCode::ConstraintViolation, "{case}");
        }
        other => panic!("{case}: expected constraint violation, got {other:?}"),
    }
}

#[test]
fn fresh_database_is_migrated_to_latest_version() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(count_objects(&conn, "table", RSVPS_TABLE), 1);
}

#[test]
fn listing_order_is_backed_by_created_at_index() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(count_objects(&conn, "index", RSVPS_ORDER_INDEX), 1);
    let columns: Vec<String> = conn
        .prepare(&format!("PRAGMA index_info({RSVPS_ORDER_INDEX});"))
        .unwrap()
        .query_map([], |row| row.get("name"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec!["created_at", "seq"]);
}

#[test]
fn guest_status_checks_reject_inconsistent_rows() {
    let conn = open_db_in_memory().unwrap();

    assert_constraint_violation(
        insert_row(&conn, "a", "Asha", "solo", Some("Ravi")),
        "solo row with a plus-one name",
    );
    assert_constraint_violation(
        insert_row(&conn, "b", "Asha", "plus_one", None),
        "plus_one row without a name",
    );
    assert_constraint_violation(
        insert_row(&conn, "c", "Asha", "plus_one", Some("   ")),
        "plus_one row with a blank name",
    );
    assert_constraint_violation(
        insert_row(&conn, "d", "Asha", "Solo", None),
        "guest status outside the enumeration",
    );

    insert_row(&conn, "e", "Asha", "plus_one", Some("Ravi")).unwrap();
}

#[test]
fn blank_full_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();

    assert_constraint_violation(
        insert_row(&conn, "a", "  ", "solo", None),
        "blank full name",
    );
}

#[test]
fn rsvp_ids_are_unique() {
    let conn = open_db_in_memory().unwrap();
    insert_row(&conn, "same-id", "Asha", "solo", None).unwrap();

    assert_constraint_violation(
        insert_row(&conn, "same-id", "Ravi", "solo", None),
        "duplicate id",
    );
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM rsvps;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn reopening_keeps_existing_rsvps() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wedding_rsvp.sqlite3");

    let conn = open_db(&path).unwrap();
    insert_row(&conn, "kept", "Asha", "solo", None).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    let name: String = conn
        .query_row("SELECT full_name FROM rsvps;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(name, "Asha");
}

#[test]
fn file_from_newer_binary_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
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

#[test]
fn migrated_file_with_drifted_table_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drifted.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE rsvps (id TEXT NOT NULL UNIQUE);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::MissingRequiredColumn { table, column } => {
            assert_eq!(table, "rsvps");
            assert_eq!(column, "seq");
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn count_objects(conn: &Connection, kind: &str, name: &str) -> i64 {
    conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2;",
        [kind, name],
        |row| row.get(0),
    )
    .unwrap()
}
