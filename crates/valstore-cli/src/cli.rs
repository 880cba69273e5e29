//! valstore CLI - resolve direct-or-indirect values from the command line
//!
//! Usage:
//!   valstore resolve store.yaml --graph objects.yaml
//!   valstore resolve port.yaml --graph objects.yaml --kind int-or-text --format json
//!   valstore check store.yaml

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use valstore_core::loader::from_file;
use valstore_core::{
    IntOrTextStore, ObjectGraphResolver, ResolverContext, TextStore, TypedValue, Value, ValueStore,
};

/// valstore - Resolve configuration values given directly or by reference
#[derive(Parser, Debug)]
#[command(name = "valstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve a store against an object graph
    Resolve {
        /// Store file ({direct, indirect})
        #[arg(required = true)]
        store: PathBuf,

        /// Object graph file (kind -> namespace -> name -> object)
        #[arg(short, long)]
        graph: PathBuf,

        /// Store kind: text, int-or-text
        #[arg(short, long, default_value = "text")]
        kind: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Give up after this many milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Parse a store file and report how it is configured
    Check {
        /// Store file to check
        #[arg(required = true)]
        store: PathBuf,

        /// Store kind: text, int-or-text
        #[arg(short, long, default_value = "text")]
        kind: String,
    },
}

/// Run the CLI with the process arguments
pub fn run() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve {
            store,
            graph,
            kind,
            format,
            timeout_ms,
        } => cmd_resolve(&store, &graph, &kind, &format, timeout_ms),

        Commands::Check { store, kind } => cmd_check(&store, &kind),
    }
}

fn load_store(path: &Path, kind: &str) -> Result<ValueStore, String> {
    let store = match kind {
        "text" => from_file::<TextStore>(path).map(ValueStore::from),
        "int-or-text" => from_file::<IntOrTextStore>(path).map(ValueStore::from),
        other => {
            return Err(format!(
                "Unsupported store kind: {}. Use text or int-or-text.",
                other
            ))
        }
    };
    store.map_err(|e| format!("Failed to load {}: {}", path.display(), e))
}

fn load_graph(path: &Path) -> Result<ObjectGraphResolver, String> {
    from_file::<Value>(path)
        .map(ObjectGraphResolver::new)
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))
}

/// Render a resolution result; `None` is the unset state
fn render(value: Option<&TypedValue>, format: &str) -> String {
    match format {
        "json" => {
            let json = match value {
                Some(v) => serde_json::json!({
                    "set": true,
                    "zero": v.is_zero(),
                    "value": v.interface(),
                }),
                None => serde_json::json!({ "set": false, "value": null }),
            };
            serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string())
        }
        _ => match value {
            Some(v) => v.to_string(),
            None => "<unset>".to_string(),
        },
    }
}

fn cmd_resolve(
    store_path: &Path,
    graph_path: &Path,
    kind: &str,
    format: &str,
    timeout_ms: Option<u64>,
) -> ExitCode {
    let store = match load_store(store_path, kind) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e.red());
            return ExitCode::from(2);
        }
    };

    // Direct values never touch the graph, so only load it when needed
    let resolver = if store.has_direct() {
        ObjectGraphResolver::new(Value::Null)
    } else {
        match load_graph(graph_path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("{}", e.red());
                return ExitCode::from(2);
            }
        }
    };

    let mut ctx = ResolverContext::new(store_path.display().to_string());
    if let Some(ms) = timeout_ms {
        ctx = ctx.with_timeout(Duration::from_millis(ms));
    }

    match store.resolve(&resolver, &ctx) {
        Ok(value) => {
            println!("{}", render(value.as_ref(), format));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} Resolution failed\n", "✗".red());
            eprintln!("{}", e);
            ExitCode::from(1)
        }
    }
}

fn describe(store: &ValueStore) -> &'static str {
    match (store.has_direct(), store.has_indirect()) {
        (true, true) => "direct (indirect ignored)",
        (true, false) => "direct",
        (false, true) => "indirect",
        (false, false) => "empty",
    }
}

fn cmd_check(store_path: &Path, kind: &str) -> ExitCode {
    match load_store(store_path, kind) {
        Ok(store) => {
            println!(
                "{} {}: {}",
                "✓".green(),
                store_path.display(),
                describe(&store)
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            ExitCode::from(1)
        }
    }
}
