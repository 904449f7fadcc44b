// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Contract diagnostics rendered with miette.
//!
//! When the input carries the original source text, diagnostics are shown
//! as annotated snippets pointing at the offending attribute or method.
//! Without source, a one-line `path:start..end` form is used instead.

use std::fmt;

use autoinject_core::diagnostics::{Diagnostic as CoreDiagnostic, Severity};
use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode, SourceSpan};

/// A contract diagnostic with source context.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ContractDiagnostic {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub src: NamedSource<String>,
    pub span: SourceSpan,
    pub label: String,
}

impl ContractDiagnostic {
    pub fn from_core_diagnostic(diagnostic: &CoreDiagnostic, source_path: &str, source: &str) -> Self {
        let label = match diagnostic.severity {
            Severity::Error => "required here",
            Severity::Warning | Severity::Info => "reported here",
        };
        Self {
            id: diagnostic.id.to_string(),
            severity: diagnostic.severity,
            message: diagnostic.message.to_string(),
            src: NamedSource::new(source_path, source.to_string()),
            span: diagnostic.span.into(),
            label: label.to_string(),
        }
    }
}

impl Diagnostic for ContractDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.id))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(self.severity.into())
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(LabeledSpan::new_with_span(
            Some(self.label.clone()),
            self.span,
        ))))
    }
}

/// `path:start..end: severity[id]: message`
pub fn plain_line(diagnostic: &CoreDiagnostic, source_path: &str) -> String {
    format!(
        "{source_path}:{}..{}: {}[{}]: {}",
        diagnostic.span.start(),
        diagnostic.span.end(),
        diagnostic.severity,
        diagnostic.id,
        diagnostic.message
    )
}
