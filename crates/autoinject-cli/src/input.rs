// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Input documents.
//!
//! Parsing C# is the host's job; this tool consumes its output. Each input
//! file is a JSON object:
//!
//! ```json
//! {
//!   "path": "Game/Player.cs",
//!   "source": "…original text, optional…",
//!   "root": { "types": [ … ] },
//!   "symbols": [ { "name": "IProvide", "kind": "interface", "arity": 1 } ]
//! }
//! ```
//!
//! `root` may be omitted for files the host failed to parse. `symbols`
//! lists types referenced but not declared in `root`. When several files
//! are checked together they share one symbol table.

use autoinject_core::host::Document;
use autoinject_core::semantics::{ExternalType, SymbolTable};
use autoinject_core::syntax::CompilationUnit;
use camino::{Utf8Path, Utf8PathBuf};
use miette::{IntoDiagnostic, Result, WrapErr};
use serde::Deserialize;

/// One pre-parsed source file.
#[derive(Debug, Deserialize)]
pub struct SourceFile {
    /// Original source path, used in reports.
    pub path: Utf8PathBuf,
    /// Original source text, when available, for annotated reports.
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub root: Option<CompilationUnit>,
    #[serde(default)]
    pub symbols: Vec<ExternalType>,
}

impl SourceFile {
    /// Reads and deserializes `file`.
    pub fn load(file: &Utf8Path) -> Result<Self> {
        let text = std::fs::read_to_string(file)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read '{file}'"))?;
        Self::parse(&text).wrap_err_with(|| format!("Invalid input document '{file}'"))
    }

    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).into_diagnostic()
    }

    /// The document the analyzers see.
    pub fn document(&self) -> Document {
        match &self.root {
            Some(root) => Document::new(self.path.as_str(), root.clone()),
            None => Document::without_root(self.path.as_str()),
        }
    }

    /// Declared types plus the external symbols of this file alone.
    pub fn symbols(&self) -> SymbolTable {
        symbol_table(std::slice::from_ref(self))
    }
}

/// One table over every input, so `partial` parts and base types declared
/// in other files resolve. Declarations of the same type merge.
pub fn symbol_table(files: &[SourceFile]) -> SymbolTable {
    let mut table = SymbolTable::new();
    for file in files {
        if let Some(root) = &file.root {
            table.add_unit(root);
        }
        for symbol in &file.symbols {
            table.add_external(symbol.clone());
        }
    }
    table
}
