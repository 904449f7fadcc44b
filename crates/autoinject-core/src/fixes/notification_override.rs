// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fix for `AUTO_INJECT_001`: add the `_Notification` override.

use std::sync::Arc;

use super::{CodeAction, CodeFixProvider, enclosing_type, rewrite_enclosing_type};
use crate::config::AutoInjectConfig;
use crate::diagnostics::{Diagnostic, NOTIFICATION_OVERRIDE_MISSING};
use crate::editor::insert_member;
use crate::host::{CancellationToken, Cancelled, Document};
use crate::syntax::factory::{identifier, int, this_call, void};
use crate::syntax::{
    ArrowBody, MethodBody, MethodDeclaration, Modifier, Parameter, SyntaxAnnotation,
};

pub const EQUIVALENCE_KEY: &str = "AutoInjectNotificationOverrideFix";

/// Inserts `public override void _Notification(int what) => this.Notify(what);`
/// as the first member of the flagged class.
pub struct NotificationOverrideFix {
    config: Arc<AutoInjectConfig>,
}

impl NotificationOverrideFix {
    #[must_use]
    pub fn new(config: Arc<AutoInjectConfig>) -> Self {
        Self { config }
    }
}

/// Builds the forwarding override.
fn notification_override(config: &AutoInjectConfig) -> MethodDeclaration {
    let parameter = &config.notification_parameter;
    let forward = ArrowBody::new(this_call(
        config.notify_method.clone(),
        vec![identifier(parameter.clone())],
    ))
    .with_annotation(SyntaxAnnotation::Formatter)
    .with_annotation(SyntaxAnnotation::Simplifier);
    MethodDeclaration::new(void(), config.notification_method.clone())
        .with_modifiers([Modifier::Public, Modifier::Override])
        .with_parameters(vec![Parameter::new(int(), parameter.clone())])
        .with_body(MethodBody::Expression(forward))
}

impl CodeFixProvider for NotificationOverrideFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        const IDS: &[&str] = &[NOTIFICATION_OVERRIDE_MISSING.id];
        IDS
    }

    fn register_fixes(
        &self,
        document: &Document,
        diagnostic: &Diagnostic,
        cancel: &CancellationToken,
    ) -> Result<Vec<CodeAction>, Cancelled> {
        let offset = diagnostic.span.start();
        if enclosing_type(document, offset, cancel)?.is_none() {
            return Ok(Vec::new());
        }
        let config = Arc::clone(&self.config);
        let title = format!(
            "Add \"public override void {}(int {}) => this.{}({});\" method",
            config.notification_method,
            config.notification_parameter,
            config.notify_method,
            config.notification_parameter,
        );
        let action = CodeAction::new(title, EQUIVALENCE_KEY, move |document, cancel| {
            rewrite_enclosing_type(document, offset, cancel, |ty| {
                Some(insert_member(ty, 0, notification_override(&config)))
            })
        });
        Ok(vec![action])
    }
}
