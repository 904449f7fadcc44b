// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Analyzers for the AutoInject class contract.
//!
//! Each analyzer looks at one class declaration at a time and reports at
//! most one diagnostic for it. The driver, [`analyze_document`], hands every
//! class in a document (nested classes included) to every analyzer, in
//! parallel.
//!
//! # Adding a New Analyzer
//!
//! 1. Create `crates/autoinject-core/src/analyzers/<your_check>.rs`.
//! 2. Add a descriptor with a fresh id to [`crate::diagnostics`].
//! 3. Declare `pub struct YourAnalyzer` implementing [`Analyzer`].
//! 4. Add `mod your_check;` below and push the analyzer in [`all_analyzers`].

mod notification_override;
mod notify_call;
mod provide_call;

use std::sync::Arc;

use rayon::prelude::*;

pub use self::notification_override::NotificationOverrideAnalyzer;
pub use self::notify_call::NotifyCallAnalyzer;
pub use self::provide_call::ProvideCallAnalyzer;
use crate::config::AutoInjectConfig;
use crate::diagnostics::{Diagnostic, DiagnosticDescriptor};
use crate::host::{CancellationToken, Cancelled, Document};
use crate::semantics::SemanticModel;
use crate::syntax::TypeDeclaration;
use crate::syntax::walker::class_declarations;

/// What an analyzer may consult besides the class itself.
#[derive(Clone, Copy)]
pub struct AnalysisContext<'a> {
    pub semantic: &'a dyn SemanticModel,
    pub cancel: &'a CancellationToken,
}

/// A single contract check over class declarations.
///
/// Implementors hold only immutable configuration, so one instance is
/// shared across threads.
pub trait Analyzer: Send + Sync {
    /// The descriptor of the diagnostic this analyzer reports.
    fn descriptor(&self) -> &'static DiagnosticDescriptor;

    /// Inspects `class` and pushes any diagnostics into `diagnostics`.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `context.cancel` is observed cancelled.
    fn analyze_class(
        &self,
        class: &TypeDeclaration,
        context: AnalysisContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), Cancelled>;
}

/// Constructs the ordered list of all analyzers.
#[must_use]
pub fn all_analyzers(config: &Arc<AutoInjectConfig>) -> Vec<Box<dyn Analyzer>> {
    vec![
        Box::new(NotificationOverrideAnalyzer::new(Arc::clone(config))),
        Box::new(ProvideCallAnalyzer::new(Arc::clone(config))),
        Box::new(NotifyCallAnalyzer::new(Arc::clone(config))),
    ]
}

/// Runs `analyzers` over every class declaration in `document`.
///
/// Diagnostics come back sorted by span start, then id. A document without
/// a syntax root, or a run that observes cancellation, yields nothing.
#[must_use]
pub fn analyze_document(
    document: &Document,
    semantic: &dyn SemanticModel,
    analyzers: &[Box<dyn Analyzer>],
    cancel: &CancellationToken,
) -> Vec<Diagnostic> {
    let root = match document.syntax_root(cancel) {
        Ok(Some(root)) => root,
        Ok(None) => {
            tracing::debug!(document = %document.id, "no syntax root, skipping analysis");
            return Vec::new();
        }
        Err(Cancelled) => return Vec::new(),
    };

    let classes = class_declarations(&root);
    let context = AnalysisContext { semantic, cancel };
    let per_class: Result<Vec<Vec<Diagnostic>>, Cancelled> = classes
        .par_iter()
        .map(|class| analyze_class(class, analyzers, context))
        .collect();

    let mut diagnostics: Vec<Diagnostic> = match per_class {
        Ok(per_class) => per_class.into_iter().flatten().collect(),
        Err(Cancelled) => {
            tracing::debug!(document = %document.id, "analysis cancelled");
            return Vec::new();
        }
    };
    diagnostics.sort_by(|a, b| {
        a.span
            .start()
            .cmp(&b.span.start())
            .then_with(|| a.id.cmp(&b.id))
    });
    tracing::debug!(
        document = %document.id,
        classes = classes.len(),
        diagnostics = diagnostics.len(),
        "analyzed document"
    );
    diagnostics
}

/// Runs every analyzer over one class.
///
/// # Errors
///
/// Returns [`Cancelled`] if cancellation is observed.
pub fn analyze_class(
    class: &TypeDeclaration,
    analyzers: &[Box<dyn Analyzer>],
    context: AnalysisContext<'_>,
) -> Result<Vec<Diagnostic>, Cancelled> {
    let mut diagnostics = Vec::new();
    for analyzer in analyzers {
        context.cancel.check()?;
        analyzer.analyze_class(class, context, &mut diagnostics)?;
    }
    Ok(diagnostics)
}
