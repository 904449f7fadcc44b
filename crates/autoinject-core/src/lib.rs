// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! AutoInject contract analyzers and code fixes.
//!
//! This crate checks C# classes that opt into the AutoInject dependency
//! injection library against its lifecycle contract:
//! - Syntax tree model, construction, traversal and printing (`syntax`)
//! - Semantic queries over implemented interfaces (`semantics`)
//! - Analyzers reporting contract violations (`analyzers`)
//! - Code fixes that repair them (`fixes`)
//!
//! The host owns parsing and the editor surface; it hands in immutable
//! [`host::Document`]s and gets diagnostics or rewritten documents back.

pub mod analyzers;
pub mod config;
pub mod diagnostics;
pub mod editor;
pub mod fixes;
pub mod host;
pub mod query;
pub mod semantics;
pub mod syntax;

#[cfg(test)]
pub(crate) mod test_support;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::analyzers::{Analyzer, all_analyzers, analyze_document};
    pub use crate::config::AutoInjectConfig;
    pub use crate::diagnostics::{Diagnostic, Severity};
    pub use crate::fixes::{CodeAction, CodeFixProvider, all_fix_providers, code_actions_for, fix_all};
    pub use crate::host::{CancellationToken, Cancelled, Document};
    pub use crate::semantics::{SemanticModel, SymbolTable};
    pub use crate::syntax::{CompilationUnit, Span, TypeDeclaration};
}
