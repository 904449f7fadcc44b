// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Analyzer: an AutoInject class must override the notification hook.
//!
//! The engine delivers lifecycle events through `_Notification`; AutoInject
//! only sees them if the class forwards them.
//!
//! ```text
//! // Bad: no override
//! [Meta(typeof(IAutoNode))]
//! public partial class Player : Node { }
//!
//! // Good
//! [Meta(typeof(IAutoNode))]
//! public partial class Player : Node
//! {
//!     public override void _Notification(int what) => this.Notify(what);
//! }
//! ```

use std::sync::Arc;

use super::{AnalysisContext, Analyzer};
use crate::config::AutoInjectConfig;
use crate::diagnostics::{Diagnostic, DiagnosticDescriptor, NOTIFICATION_OVERRIDE_MISSING};
use crate::host::Cancelled;
use crate::query::{find_override, find_qualifying_attribute};
use crate::syntax::TypeDeclaration;

/// Reports `AUTO_INJECT_001` at the meta attribute of a class that lacks a
/// `_Notification` override.
pub struct NotificationOverrideAnalyzer {
    config: Arc<AutoInjectConfig>,
}

impl NotificationOverrideAnalyzer {
    #[must_use]
    pub fn new(config: Arc<AutoInjectConfig>) -> Self {
        Self { config }
    }
}

impl Analyzer for NotificationOverrideAnalyzer {
    fn descriptor(&self) -> &'static DiagnosticDescriptor {
        &NOTIFICATION_OVERRIDE_MISSING
    }

    fn analyze_class(
        &self,
        class: &TypeDeclaration,
        context: AnalysisContext<'_>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), Cancelled> {
        context.cancel.check()?;
        let Some(attribute) = find_qualifying_attribute(class, &self.config) else {
            return Ok(());
        };
        if find_override(class, &self.config.notification_method).is_some() {
            tracing::trace!(class = %class.name(), "notification override present");
            return Ok(());
        }
        diagnostics.push(NOTIFICATION_OVERRIDE_MISSING.create(attribute.span, class.name()));
        Ok(())
    }
}
