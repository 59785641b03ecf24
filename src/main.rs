//! dbchat CLI entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dbchat::{
    render, ApiSqlTranslator, Config, ConnectionFactory, ExecutionResult, QueryEngine,
    SqlTranslator, TranslationMode,
};

/// dbchat: ask questions about a SQLite database in natural language or SQL
#[derive(Parser, Debug)]
#[command(name = "dbchat")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Override the database file path
    #[arg(short, long, global = true)]
    database: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask a natural language question about the data
    Ask {
        /// Question text
        question: String,
        /// Force translation mode (rules-first or agent)
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Execute a raw SQL statement (no SELECT-only restriction)
    Sql {
        /// SQL statement
        statement: String,
    },
    /// List all tables
    Tables,
    /// Show a table's columns
    Schema {
        /// Table name (defaults to employees)
        table: Option<String>,
    },
    /// Insert an employee record
    Insert {
        /// Name of the employee
        name: String,
        /// Job title of the employee
        title: String,
        /// Department of the employee
        department: String,
        /// Salary of the employee
        salary: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = if let Some(path) = &args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };
    if let Some(database) = args.database {
        config.database.path = database;
    }

    let factory = ConnectionFactory::new(&config.database.path);
    let engine = QueryEngine::new(factory);

    // A broken schema is the one fatal outcome; everything after this
    // point converges to a displayable result.
    engine.schema_store().ensure_initialized()?;

    match args.command {
        Command::Ask { question, mode } => {
            let mode = match mode.as_deref() {
                Some("agent") => TranslationMode::Agent,
                Some(_) => TranslationMode::RulesFirst,
                None => config.query.mode,
            };
            let engine = match ApiSqlTranslator::from_config(&config.llm) {
                Ok(translator) => {
                    engine.with_translator(Arc::new(translator) as Arc<dyn SqlTranslator>)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "No translator available; fixed intents only");
                    engine
                }
            };
            let result = engine.with_mode(mode).ask(&question).await;
            print_result(&result, args.json);
        }
        Command::Sql { statement } => {
            let result = engine.run_sql(&statement);
            print_result(&result, args.json);
        }
        Command::Tables => {
            let result = engine.list_tables();
            print_result(&result, args.json);
        }
        Command::Schema { table } => {
            let table = table.as_deref().unwrap_or("employees");
            let result = engine.describe_table(table);
            print_result(&result, args.json);
        }
        Command::Insert {
            name,
            title,
            department,
            salary,
        } => {
            match engine
                .schema_store()
                .insert_employee(&name, &title, &department, salary)
            {
                Ok(()) => println!(
                    "Record inserted: {}, {}, {}, {}",
                    name, title, department, salary
                ),
                Err(e) => println!("Error inserting record: {}", e),
            }
        }
    }

    Ok(())
}

fn print_result(result: &ExecutionResult, json: bool) {
    if json {
        println!("{}", serde_json::to_string_pretty(result).unwrap());
    } else {
        println!("{}", render(result));
    }
}
