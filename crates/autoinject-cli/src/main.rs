// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! AutoInject contract checker command-line interface.
//!
//! Reads pre-parsed source files (JSON syntax trees plus the symbols they
//! reference), reports contract diagnostics, and applies code fixes.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

mod commands;
mod diagnostic;
mod input;

use commands::OutputFormat;

/// Check classes against the AutoInject lifecycle contract
#[derive(Debug, Parser)]
#[command(name = "autoinject")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON file overriding the contract's attribute, interface and method names
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report contract diagnostics
    Check {
        /// Input files (JSON documents)
        #[arg(required = true)]
        files: Vec<Utf8PathBuf>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// List the code fixes offered for each diagnostic
    Fixes {
        /// Input files (JSON documents)
        #[arg(required = true)]
        files: Vec<Utf8PathBuf>,
    },

    /// Apply one kind of fix to every diagnostic it handles
    Fix {
        /// Input file (JSON document)
        file: Utf8PathBuf,

        /// Equivalence key of the fix to apply
        #[arg(long)]
        key: String,

        /// Output format: text (rendered source) or json (syntax tree)
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective contract configuration as JSON
    Config,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let default_directive = directive_for_verbosity(cli.verbose);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let result = match cli.command {
        Command::Check { files, format } => commands::check::run(&files, format, &config),
        Command::Fixes { files } => commands::fix::list(&files, &config),
        Command::Fix { file, key, format } => commands::fix::apply(&file, &key, format, &config),
        Command::Config => commands::print_config(&config),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Targets are Rust module paths, so `autoinject` alone would not match
    // `autoinject_core`.
    match v {
        0 => "autoinject=warn,autoinject_core=warn",
        1 => "autoinject=debug,autoinject_core=debug",
        _ => "autoinject=trace,autoinject_core=trace",
    }
}
