//! sqlast CLI - translate JSON-encoded SQL ASTs to dialect SQL
//!
//! Usage:
//!   sqlast translate <file.json> [--dialect <dialect>] [--output sql|json] [--verbose]
//!   sqlast dialects
//!
//! Examples:
//!   sqlast translate query.json --dialect sybase
//!   sqlast translate query.json --dialect tsql --output json

use clap::{Parser, Subcommand, ValueEnum};
use sqlast::config::Settings;
use sqlast::sql::{Dialect, SqlDialect, Statement};
use sqlast::translation;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "sqlast")]
#[command(about = "sqlast - translate a SQL AST into dialect-correct SQL")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a JSON-encoded statement to SQL
    Translate {
        /// Path to the statement JSON file
        file: PathBuf,

        /// SQL dialect to generate (defaults to the configured dialect)
        #[arg(short, long)]
        dialect: Option<DialectArg>,

        /// Output format
        #[arg(short, long, default_value = "sql")]
        output: OutputFormat,
    },

    /// Print the capability matrix of every dialect
    Dialects,
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Ansi,
    Sybase,
    Tsql,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Ansi => Dialect::Ansi,
            DialectArg::Sybase => Dialect::Sybase,
            DialectArg::Tsql => Dialect::TSql,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Output SQL only
    Sql,
    /// Output the full translation (SQL, row limit, parameters) as JSON
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }

    match cli.command {
        Commands::Translate {
            file,
            dialect,
            output,
        } => cmd_translate(file, dialect, output),
        Commands::Dialects => cmd_dialects(),
    }
}

fn cmd_translate(file: PathBuf, dialect: Option<DialectArg>, output: OutputFormat) -> ExitCode {
    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let source = match fs::read_to_string(&file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let statement: Statement = match serde_json::from_str(&source) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error parsing statement in '{}': {}", file.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let options = settings.to_options(dialect.map(Dialect::from));
    debug!(dialect = %options.dialect, file = %file.display(), "translating");

    let translated = match translation::translate(&statement, &options) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Translation error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        OutputFormat::Sql => {
            println!("{}", translated.sql);
            if let Some(limit) = &translated.row_limit {
                eprintln!("-- row limit applied by the caller: {:?}", limit);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&translated) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing translation: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

fn cmd_dialects() -> ExitCode {
    let capabilities: [(&str, fn(&Dialect) -> bool); 14] = [
        ("row values", |d| d.supports_row_value_constructor_syntax()),
        ("row values in IN", |d| d.supports_row_value_constructor_syntax_in_in_list()),
        ("row values in ANY/ALL", |d| {
            d.supports_row_value_constructor_syntax_in_quantified_predicates()
        }),
        ("OFFSET/FETCH", |d| d.supports_offset_fetch()),
        ("TOP", |d| d.supports_top_clause()),
        ("caller row limit", |d| d.needs_rows_to_skip() || d.needs_max_rows()),
        ("INTERSECT", |d| d.supports_intersect()),
        ("IS DISTINCT FROM", |d| d.supports_distinct_from_predicate()),
        ("NULLS FIRST/LAST", |d| d.supports_nulls_ordering()),
        ("ROLLUP/CUBE", |d| d.supports_summarization()),
        ("SEARCH", |d| d.supports_search_clause()),
        ("CYCLE", |d| d.supports_cycle_clause()),
        ("multi-row VALUES", |d| d.supports_multi_row_values()),
        ("FOR UPDATE", |d| d.supports_for_update()),
    ];

    print!("{:<24}", "");
    for dialect in Dialect::ALL {
        print!("{:<8}", dialect.to_string());
    }
    println!();
    for (name, supported) in capabilities {
        print!("{:<24}", name);
        for dialect in Dialect::ALL {
            print!("{:<8}", if supported(&dialect) { "yes" } else { "no" });
        }
        println!();
    }

    ExitCode::SUCCESS
}
