//! Schema store and executor integration tests.

use dbchat::{ConnectionFactory, ExecutionResult, SchemaStore, SqlExecutor, SqlValue};

fn setup() -> (tempfile::TempDir, SchemaStore, SqlExecutor) {
    let dir = tempfile::tempdir().unwrap();
    let factory = ConnectionFactory::new(dir.path().join("test.db"));
    let store = SchemaStore::new(factory.clone());
    store.ensure_initialized().unwrap();
    (dir, store, SqlExecutor::new(factory))
}

#[test]
fn init_is_idempotent_across_calls() {
    let (_dir, store, executor) = setup();
    for _ in 0..4 {
        store.ensure_initialized().unwrap();
    }
    match executor.execute("SELECT COUNT(*) FROM employees") {
        ExecutionResult::Table { rows, .. } => {
            assert_eq!(rows[0][0], SqlValue::Integer(5));
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn seed_data_matches_expected_rows() {
    let (_dir, _store, executor) = setup();
    match executor.execute("SELECT name FROM employees") {
        ExecutionResult::Table { rows, .. } => {
            let names: Vec<String> = rows
                .iter()
                .map(|r| match &r[0] {
                    SqlValue::Text(s) => s.clone(),
                    other => panic!("expected text, got {:?}", other),
                })
                .collect();
            assert_eq!(
                names,
                vec![
                    "John Smith",
                    "Emily Johnson",
                    "Michael Wong",
                    "Sarah Davis",
                    "Robert Taylor"
                ]
            );
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn update_then_select_round_trip() {
    let (_dir, _store, executor) = setup();

    let update = executor.execute("UPDATE employees SET salary = 90000 WHERE id = 1");
    assert_eq!(update, ExecutionResult::RowsAffected(1));

    match executor.execute("SELECT salary FROM employees WHERE id = 1") {
        ExecutionResult::Table { rows, .. } => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0][0], SqlValue::Real(90000.0));
        }
        other => panic!("expected table, got {:?}", other),
    }
}

#[test]
fn missing_table_query_stays_a_message() {
    let (_dir, _store, executor) = setup();
    match executor.execute("SELECT * FROM nonexistent_table") {
        ExecutionResult::Message(text) => {
            assert!(text.contains("Error executing query"), "{}", text)
        }
        other => panic!("expected message, got {:?}", other),
    }
}

#[test]
fn created_tables_show_up_in_catalog() {
    let (_dir, store, executor) = setup();
    executor.execute("CREATE TABLE projects (id INTEGER PRIMARY KEY, name TEXT)");
    let tables = store.list_tables().unwrap();
    assert_eq!(tables, vec!["employees".to_string(), "projects".to_string()]);
}
