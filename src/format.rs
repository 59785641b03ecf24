//! Result formatting.
//!
//! A presentation adapter only: renders an `ExecutionResult` as
//! displayable text. No execution, no validation, pure function of its
//! input.

use crate::query::types::{ExecutionResult, SqlValue};

/// Render an execution result for display.
pub fn render(result: &ExecutionResult) -> String {
    match result {
        ExecutionResult::Message(text) => text.clone(),
        ExecutionResult::RowsAffected(count) => {
            format!("Query executed successfully. {} rows affected.", count)
        }
        ExecutionResult::Table { columns, rows } => render_table(columns, rows),
    }
}

fn render_table(columns: &[String], rows: &[Vec<SqlValue>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.len()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        out.push_str(&format!("{:<width$}", column, width = widths[i]));
    }
    out.push('\n');
    out.push_str(&"-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

    for row in &cells {
        out.push('\n');
        for (i, cell) in row.iter().enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            out.push_str(&format!("{:<width$}", cell, width = widths[i]));
        }
    }

    out
}
