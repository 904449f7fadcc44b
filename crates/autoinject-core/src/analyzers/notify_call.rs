// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Analyzer: the `_Notification` override must forward to `this.Notify`.

use std::sync::Arc;

use super::{AnalysisContext, Analyzer};
use crate::config::AutoInjectConfig;
use crate::diagnostics::{Diagnostic, DiagnosticDescriptor, NOTIFY_CALL_MISSING};
use crate::host::Cancelled;
use crate::query::{contains_self_call_cancellable, find_override, find_qualifying_attribute};
use crate::syntax::TypeDeclaration;

/// Reports `AUTO_INJECT_003` at the identifier of a `_Notification` override
/// that never calls `this.Notify(...)`.
///
/// Classes with no override at all are left to
/// [`NotificationOverrideAnalyzer`](super::NotificationOverrideAnalyzer).
pub struct NotifyCallAnalyzer {
    config: Arc<AutoInjectConfig>,
}

impl NotifyCallAnalyzer {
    #[must_use]
    pub fn new(config: Arc<AutoInjectConfig>) -> Self {
        Self { config }
    }
}

impl Analyzer for NotifyCallAnalyzer {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &NOTIFY_CALL_MISSING
    }

    fn analyze_class(
        &self,
        class: &TypeDeclaration,
        context: AnalysisContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), Cancelled> {
        if find_qualifying_attribute(class, &self.config).is_none() {
            return Ok(());
        }
        let Some(hook) = find_override(class, &self.config.notification_method) else {
            return Ok(());
        };
        if contains_self_call_cancellable(hook, &self.config.notify_method, context.cancel)? {
            return Ok(());
        }
        diagnostics.push(NOTIFY_CALL_MISSING.create(hook.identifier.span, class.name()));
        Ok(())
    }
}
