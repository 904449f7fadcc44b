// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Analyzer: a provider class must call `this.Provide()` somewhere.
//!
//! Dependents block until their providers announce readiness, so a provider
//! that never calls `Provide` leaves the tree waiting forever.

use std::sync::Arc;

use super::{AnalysisContext, Analyzer};
use crate::config::AutoInjectConfig;
use crate::diagnostics::{Diagnostic, DiagnosticDescriptor, PROVIDE_CALL_MISSING};
use crate::host::Cancelled;
use crate::query::{contains_self_call_cancellable, find_qualifying_attribute};
use crate::syntax::TypeDeclaration;

/// Reports `AUTO_INJECT_002` for AutoInject classes that implement
/// `IProvide<T>` (directly or transitively) without calling `Provide`.
pub struct ProvideCallAnalyzer {
    config: Arc<AutoInjectConfig>,
}

impl ProvideCallAnalyzer {
    #[must_use]
    pub fn new(config: Arc<AutoInjectConfig>) -> Self {
        Self { config }
    }
}

impl Analyzer for ProvideCallAnalyzer {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &PROVIDE_CALL_MISSING
    }

    fn analyze_class(
        &self,
        class: &TypeDeclaration,
        context: AnalysisContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), Cancelled> {
        let Some(interfaces) = context.semantic.all_interfaces(class, context.cancel)? else {
            tracing::trace!(class = %class.name(), "no symbol, skipping provide check");
            return Ok(());
        };
        let is_provider = interfaces
            .iter()
            .any(|interface| interface.is_generic() && interface.name == self.config.provider_interface);
        if !is_provider {
            return Ok(());
        }
        let Some(attribute) = find_qualifying_attribute(class, &self.config) else {
            return Ok(());
        };
        if contains_self_call_cancellable(class, &self.config.provide_method, context.cancel)? {
            return Ok(());
        }
        diagnostics.push(PROVIDE_CALL_MISSING.create(attribute.span, class.name()));
        Ok(())
    }
}
