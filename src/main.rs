//! tabula CLI - workflow runner for tabular data pipelines

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::fs;

use tabula::error::{FixSuggestion, TabulaError};
use tabula::runner::{NodeStatus, Runner};
use tabula::workflow::Workflow;

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "tabula - YAML-driven workflow runner for tabular data pipelines")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow file
    Run {
        /// Path to the workflow YAML file
        file: String,
    },

    /// Validate a workflow file: static checks, no execution
    Validate {
        /// Path to the workflow YAML file
        file: String,
    },

    /// Serve the HTTP endpoint
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { file } => run_workflow(&file),
        Commands::Validate { file } => validate_workflow(&file),
        Commands::Serve { port } => serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn run_workflow(file: &str) -> Result<(), TabulaError> {
    let yaml = fs::read_to_string(file)?;
    let report = Runner::new().run_str(&yaml)?;

    for outcome in &report.outcomes {
        let label = format!("[{}] {} ({})", outcome.task_number, outcome.node, outcome.function);
        match &outcome.status {
            NodeStatus::Completed => {
                let stored = outcome
                    .stored_as
                    .as_deref()
                    .map(|v| format!(" -> {v}"))
                    .unwrap_or_default();
                println!("{} {}{}", "✓".green(), label, stored);
            }
            NodeStatus::Skipped { reason } => {
                println!("{} {}: {}", "→".yellow(), label, reason);
            }
            NodeStatus::TypeError { detail } => {
                println!("{} {}: {}", "✗".red(), label, detail);
            }
            NodeStatus::Failed { error } => {
                println!("{} {}: {}", "✗".red(), label, error);
            }
        }
    }

    println!(
        "{} {} completed, {} skipped, {} failed",
        "Done:".cyan().bold(),
        report.completed,
        report.skipped,
        report.type_errors + report.failed,
    );
    Ok(())
}

fn validate_workflow(file: &str) -> Result<(), TabulaError> {
    let yaml = fs::read_to_string(file)?;
    let workflow = Workflow::parse(&yaml)?;

    println!("{} Workflow '{}' is valid", "✓".green(), file);
    println!("  Nodes: {}", workflow.len());

    for (name, node) in &workflow.nodes {
        if !tabula::Registry::contains(&node.function) {
            println!(
                "  {} node '{}' names unknown operation '{}'",
                "Warning:".yellow(),
                name,
                node.function
            );
        }
    }
    for (node, dep) in workflow.unknown_dependencies() {
        println!(
            "  {} node '{}' depends on unknown node '{}'",
            "Warning:".yellow(),
            node,
            dep
        );
    }

    Ok(())
}

async fn serve(port: u16) -> Result<(), TabulaError> {
    tabula::server::serve(port).await.map_err(TabulaError::Io)
}
