//! Thin CLI front end over the core crates.
//!
//! Every subcommand follows the same shape: parse a source file into a
//! [`truss_core::model::Context`], hand it to one artifact-specific
//! renderer, and write the result under `dir/gen/` next to the source.
//! All the real work lives in `truss-parse`, `truss-codegen`, and
//! `truss-openapi`; this binary only wires flags to calls.

mod commands;
mod remediation;

use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "truss", version, about = "Contract-driven HTTP/JSON gateway and client generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the HTTP gateway for a source file's services.
    Gateway {
        /// Path to the source file declaring the services.
        path: std::path::PathBuf,
        /// Use a custom template instead of the built-in one.
        #[arg(long)]
        template: Option<std::path::PathBuf>,
    },
    /// Generate a typed client proxy for a target language.
    Client {
        /// Path to the source file declaring the services.
        path: std::path::PathBuf,
        /// Target language: rust, ts, or python.
        #[arg(long, default_value = "rust")]
        lang: String,
        #[arg(long)]
        template: Option<std::path::PathBuf>,
    },
    /// Generate an OpenAPI 3 document describing the services.
    Docs {
        path: std::path::PathBuf,
        #[arg(long)]
        template: Option<std::path::PathBuf>,
    },
    /// Generate an in-memory mock implementation for caller-side tests.
    Mock {
        path: std::path::PathBuf,
        #[arg(long)]
        template: Option<std::path::PathBuf>,
    },
    /// Scaffold a new service skeleton.
    New {
        /// Name of the new service (e.g. `PricingService`).
        name: String,
        /// Directory to scaffold into (defaults to `./<snake_case name>`).
        #[arg(long)]
        dir: Option<std::path::PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init()
        .ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Gateway { path, template } => commands::gateway::run(&path, template.as_deref()),
        Commands::Client { path, lang, template } => commands::client::run(&path, &lang, template.as_deref()),
        Commands::Docs { path, template } => commands::docs::run(&path, template.as_deref()),
        Commands::Mock { path, template } => commands::mock::run(&path, template.as_deref()),
        Commands::New { name, dir } => commands::new::run(&name, dir.as_deref()),
    };

    match result {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            for hint in remediation::hints(&err) {
                eprintln!("  - {hint}");
            }
            ExitCode::FAILURE
        }
    }
}
