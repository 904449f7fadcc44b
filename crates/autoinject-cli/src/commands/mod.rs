// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Subcommand implementations.

pub mod check;
pub mod fix;

use std::sync::Arc;

use autoinject_core::analyzers::{all_analyzers, analyze_document};
use autoinject_core::config::AutoInjectConfig;
use autoinject_core::diagnostics::Diagnostic;
use autoinject_core::host::CancellationToken;
use autoinject_core::semantics::SymbolTable;
use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::input::{SourceFile, symbol_table};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text (default).
    #[default]
    Text,
    /// Machine-readable JSON.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown format '{other}': expected 'text' or 'json'"
            )),
        }
    }
}

/// Loads every input file, failing on the first unreadable one.
pub(crate) fn load_all(files: &[Utf8PathBuf]) -> Result<(Vec<SourceFile>, SymbolTable)> {
    let inputs = files
        .iter()
        .map(|file| SourceFile::load(file))
        .collect::<Result<Vec<_>>>()?;
    let symbols = symbol_table(&inputs);
    Ok((inputs, symbols))
}

/// Loads the contract configuration, falling back to the defaults.
pub fn load_config(path: Option<&Utf8Path>) -> Result<Arc<AutoInjectConfig>> {
    let Some(path) = path else {
        return Ok(Arc::new(AutoInjectConfig::default()));
    };
    let text = std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read config '{path}'"))?;
    let config: AutoInjectConfig = serde_json::from_str(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("Invalid config '{path}'"))?;
    tracing::debug!(%path, "loaded config");
    Ok(Arc::new(config))
}

pub fn print_config(config: &AutoInjectConfig) -> Result<()> {
    let json = serde_json::to_string_pretty(config).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

/// Runs every analyzer over `file`, resolving types through `symbols`.
pub(crate) fn analyze(
    file: &SourceFile,
    symbols: &SymbolTable,
    config: &Arc<AutoInjectConfig>,
) -> Vec<Diagnostic> {
    let document = file.document();
    let diagnostics = analyze_document(
        &document,
        symbols,
        &all_analyzers(config),
        &CancellationToken::new(),
    );
    tracing::debug!(path = %file.path, count = diagnostics.len(), "analyzed");
    diagnostics
}
