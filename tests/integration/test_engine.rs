//! End-to-end query engine tests with a mock translator.

use std::sync::Arc;

use dbchat::{
    ConnectionFactory, ExecutionResult, MockTranslator, QueryEngine, SqlTranslator, SqlValue,
    TranslationMode, UNRECOGNIZED_MESSAGE,
};

fn engine() -> (tempfile::TempDir, QueryEngine) {
    let dir = tempfile::tempdir().unwrap();
    let engine = QueryEngine::new(ConnectionFactory::new(dir.path().join("test.db")));
    engine.schema_store().ensure_initialized().unwrap();
    (dir, engine)
}

fn expect_table(result: ExecutionResult) -> (Vec<String>, Vec<Vec<SqlValue>>) {
    match result {
        ExecutionResult::Table { columns, rows } => (columns, rows),
        other => panic!("expected table, got {:?}", other),
    }
}

fn expect_message(result: ExecutionResult) -> String {
    match result {
        ExecutionResult::Message(text) => text,
        other => panic!("expected message, got {:?}", other),
    }
}

// ============================================================================
// Fast path (rule resolver)
// ============================================================================

#[tokio::test]
async fn show_all_employees_returns_five_rows() {
    let (_dir, engine) = engine();
    let (columns, rows) = expect_table(engine.ask("show all employees").await);
    assert_eq!(columns, vec!["id", "name", "title", "department", "salary"]);
    assert_eq!(rows.len(), 5);
}

#[tokio::test]
async fn highest_salary_is_emily_johnson() {
    let (_dir, engine) = engine();
    let (columns, rows) =
        expect_table(engine.ask("find the employee with the highest salary").await);
    assert_eq!(rows.len(), 1);
    let name_idx = columns.iter().position(|c| c == "name").unwrap();
    assert_eq!(rows[0][name_idx], SqlValue::Text("Emily Johnson".to_string()));
}

#[tokio::test]
async fn average_salary_over_seed_data() {
    let (_dir, engine) = engine();
    let (columns, rows) = expect_table(engine.ask("show the average salary").await);
    assert_eq!(columns, vec!["average_salary"]);
    assert_eq!(rows[0][0], SqlValue::Real(85400.0));
}

#[tokio::test]
async fn department_counts_cover_all_departments() {
    let (_dir, engine) = engine();
    let (columns, rows) =
        expect_table(engine.ask("show the count per department").await);
    assert_eq!(columns, vec!["department", "employee_count"]);
    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert_eq!(row[1], SqlValue::Integer(1));
    }
}

#[tokio::test]
async fn engineering_filter() {
    let (_dir, engine) = engine();
    let (columns, rows) = expect_table(engine.ask("list the engineers").await);
    let dept_idx = columns.iter().position(|c| c == "department").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][dept_idx], SqlValue::Text("Engineering".to_string()));
}

#[tokio::test]
async fn show_tables_lists_employees() {
    let (_dir, engine) = engine();
    let (columns, rows) = expect_table(engine.ask("show tables").await);
    assert_eq!(columns, vec!["name"]);
    assert_eq!(rows, vec![vec![SqlValue::Text("employees".to_string())]]);
}

#[tokio::test]
async fn schema_for_employees_describes_columns() {
    let (_dir, engine) = engine();
    let (columns, rows) = expect_table(engine.ask("schema for employees").await);
    assert_eq!(columns, vec!["column", "type"]);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0][0], SqlValue::Text("id".to_string()));
}

#[tokio::test]
async fn schema_for_missing_table_is_a_message() {
    let (_dir, engine) = engine();
    let text = expect_message(engine.ask("schema for missing_table").await);
    assert_eq!(text, "Table 'missing_table' does not exist.");
}

#[tokio::test]
async fn unmatched_without_translator_gets_fixed_message() {
    let (_dir, engine) = engine();
    let text = expect_message(
        engine
            .ask("some random text that doesn't make sense")
            .await,
    );
    assert_eq!(text, UNRECOGNIZED_MESSAGE);
}

// ============================================================================
// Fallback path (mock translator)
// ============================================================================

#[tokio::test]
async fn translator_select_is_executed() {
    let (_dir, engine) = engine();
    let engine = engine.with_translator(Arc::new(MockTranslator::replying(
        "SELECT name FROM employees WHERE id = 2",
    )) as Arc<dyn SqlTranslator>);

    let (_, rows) = expect_table(engine.ask("nonsense the rules cannot match").await);
    assert_eq!(rows, vec![vec![SqlValue::Text("Emily Johnson".to_string())]]);
}

#[tokio::test]
async fn translator_update_is_rejected() {
    let (_dir, engine) = engine();
    let engine = engine.with_translator(Arc::new(MockTranslator::replying(
        "UPDATE employees SET salary=0",
    )) as Arc<dyn SqlTranslator>);

    let text = expect_message(engine.ask("zero out the salaries").await);
    assert_eq!(text, "Only SELECT queries are allowed.");
}

#[tokio::test]
async fn translator_stacked_statements_are_rejected() {
    let (_dir, engine) = engine();
    let engine = engine.with_translator(Arc::new(MockTranslator::replying(
        "SELECT * FROM employees; DROP TABLE employees",
    )) as Arc<dyn SqlTranslator>);

    let text = expect_message(engine.ask("nonsense the rules cannot match").await);
    assert_eq!(text, "Only single SELECT statements are allowed.");

    // The guard kept the drop from reaching the executor
    let (_, rows) = expect_table(engine.run_sql("SELECT * FROM employees"));
    assert_eq!(rows.len(), 5);
}

#[tokio::test]
async fn provider_failure_becomes_a_message() {
    let (_dir, engine) = engine();
    let engine = engine.with_translator(
        Arc::new(MockTranslator::failing("connection refused")) as Arc<dyn SqlTranslator>,
    );

    let text = expect_message(engine.ask("nonsense the rules cannot match").await);
    assert_eq!(text, "Error processing input: API error: connection refused");
}

#[tokio::test]
async fn provider_timeout_is_treated_as_failure() {
    let (_dir, engine) = engine();
    let engine = engine
        .with_translator(Arc::new(MockTranslator::timing_out()) as Arc<dyn SqlTranslator>);

    let text = expect_message(engine.ask("nonsense the rules cannot match").await);
    assert_eq!(text, "Error processing input: Request timed out");
}

#[tokio::test]
async fn empty_translator_result_reports_no_results() {
    let (_dir, engine) = engine();
    let engine = engine.with_translator(Arc::new(MockTranslator::replying(
        "SELECT * FROM employees WHERE id = 99",
    )) as Arc<dyn SqlTranslator>);

    let text = expect_message(engine.ask("nonsense the rules cannot match").await);
    assert_eq!(text, "No results found.");
}

// ============================================================================
// Mode selection
// ============================================================================

#[tokio::test]
async fn rules_first_never_calls_translator_on_a_match() {
    let (_dir, engine) = engine();
    let mock = Arc::new(MockTranslator::replying("SELECT 1"));
    let engine = engine
        .with_translator(mock.clone() as Arc<dyn SqlTranslator>)
        .with_mode(TranslationMode::RulesFirst);

    expect_table(engine.ask("show all employees").await);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn agent_mode_bypasses_the_resolver() {
    let (_dir, engine) = engine();
    let mock = Arc::new(MockTranslator::replying("SELECT name FROM employees WHERE id = 1"));
    let engine = engine
        .with_translator(mock.clone() as Arc<dyn SqlTranslator>)
        .with_mode(TranslationMode::Agent);

    // This question would match a rule, but agent mode skips the resolver
    let (_, rows) = expect_table(engine.ask("show all employees").await);
    assert_eq!(rows, vec![vec![SqlValue::Text("John Smith".to_string())]]);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn agent_mode_without_translator_falls_back_to_rules() {
    let (_dir, engine) = engine();
    let engine = engine.with_mode(TranslationMode::Agent);
    let (_, rows) = expect_table(engine.ask("show all employees").await);
    assert_eq!(rows.len(), 5);
}

// ============================================================================
// Direct SQL mode
// ============================================================================

#[tokio::test]
async fn direct_sql_mode_allows_writes() {
    let (_dir, engine) = engine();
    let result = engine.run_sql("UPDATE employees SET salary = 100000 WHERE id = 3");
    assert_eq!(result, ExecutionResult::RowsAffected(1));

    let (_, rows) = expect_table(engine.run_sql("SELECT salary FROM employees WHERE id = 3"));
    assert_eq!(rows[0][0], SqlValue::Real(100000.0));
}
