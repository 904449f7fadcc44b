// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fix for `AUTO_INJECT_002`: call `this.Provide()` from a lifecycle method.
//!
//! Three methods are sensible homes for the call: `Setup()`, `OnReady()` and
//! the engine's `_Ready()` override. One action is offered for each. If the
//! class already has the method, the action appends the call; otherwise it
//! creates the method.

use std::sync::Arc;

use ecow::{EcoString, eco_format};

use super::{CodeAction, CodeFixProvider, enclosing_type, rewrite_enclosing_type, type_at};
use crate::config::AutoInjectConfig;
use crate::diagnostics::{Diagnostic, PROVIDE_CALL_MISSING};
use crate::editor::{add_member, append_self_call, create_method, replace_member};
use crate::host::{CancellationToken, Cancelled, Document};
use crate::query::find_method;
use crate::syntax::{MethodDeclaration, Modifier, TypeDeclaration};

const KEY_PREFIX: &str = "AutoInjectProvideFix";

/// A method that may host the `Provide` call.
#[derive(Debug, Clone)]
struct Candidate {
    name: EcoString,
    /// Required on an existing method, and given to a created one.
    modifiers: &'static [Modifier],
}

impl Candidate {
    fn matches(&self, method: &MethodDeclaration) -> bool {
        method.name() == self.name.as_str()
            && self
                .modifiers
                .iter()
                .all(|modifier| method.has_modifier(*modifier))
    }

    fn find<'a>(&self, ty: &'a TypeDeclaration) -> Option<(usize, &'a MethodDeclaration)> {
        find_method(ty, |method| self.matches(method))
    }
}

/// Equivalence key for adding the call to, or creating, `method`.
#[must_use]
pub fn equivalence_key(method: &str, exists: bool) -> EcoString {
    let operation = if exists { "AddCallTo" } else { "CreateNew" };
    eco_format!("{KEY_PREFIX}_{operation}_{method}")
}

/// Offers to append `this.Provide();` to `Setup()`, `OnReady()` or
/// `_Ready()`, creating the method when it does not exist.
pub struct ProvideCallFix {
    config: Arc<AutoInjectConfig>,
}

impl ProvideCallFix {
    #[must_use]
    pub fn new(config: Arc<AutoInjectConfig>) -> Self {
        Self { config }
    }

    fn candidates(&self) -> [Candidate; 3] {
        [
            Candidate {
                name: self.config.setup_method.clone(),
                modifiers: &[Modifier::Public],
            },
            Candidate {
                name: self.config.on_ready_method.clone(),
                modifiers: &[Modifier::Public],
            },
            Candidate {
                name: self.config.ready_method.clone(),
                modifiers: &[Modifier::Public, Modifier::Override],
            },
        ]
    }

    fn add_call_action(&self, candidate: Candidate, offset: u32) -> CodeAction {
        let title = format!(
            "Add \"this.{}();\" to existing \"{}()\" method",
            self.config.provide_method, candidate.name
        );
        let key = equivalence_key(&candidate.name, true);
        let config = Arc::clone(&self.config);
        CodeAction::new(title, key, move |document, cancel| {
            rewrite_enclosing_type(document, offset, cancel, |ty| {
                let Some((index, method)) = candidate.find(ty) else {
                    tracing::debug!(method = %candidate.name, "target method vanished");
                    return None;
                };
                replace_member(ty, index, append_self_call(method, &config.provide_method))
            })
        })
    }

    fn create_method_action(&self, candidate: Candidate, offset: u32) -> CodeAction {
        let title = format!(
            "Create \"{}()\" method that calls \"this.{}()\"",
            candidate.name, self.config.provide_method
        );
        let key = equivalence_key(&candidate.name, false);
        let config = Arc::clone(&self.config);
        CodeAction::new(title, key, move |document, cancel| {
            rewrite_enclosing_type(document, offset, cancel, |ty| {
                match create_method(
                    candidate.name.clone(),
                    candidate.modifiers,
                    Vec::new(),
                    &config.provide_body,
                ) {
                    Ok(method) => Some(add_member(ty, method)),
                    Err(error) => {
                        tracing::warn!(method = %candidate.name, %error, "invalid method body template");
                        None
                    }
                }
            })
        })
    }
}

impl CodeFixProvider for ProvideCallFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        const IDS: &[&str] = &[PROVIDE_CALL_MISSING.id];
        IDS
    }

    fn register_fixes(
        &self,
        document: &Document,
        diagnostic: &Diagnostic,
        cancel: &CancellationToken,
    ) -> Result<Vec<CodeAction>, Cancelled> {
        let offset = diagnostic.span.start();
        let Some((root, path)) = enclosing_type(document, offset, cancel)? else {
            return Ok(Vec::new());
        };
        let Some(ty) = type_at(&root, &path) else {
            return Ok(Vec::new());
        };
        let actions = self
            .candidates()
            .into_iter()
            .map(|candidate| {
                if candidate.find(ty).is_some() {
                    self.add_call_action(candidate, offset)
                } else {
                    self.create_method_action(candidate, offset)
                }
            })
            .collect();
        Ok(actions)
    }
}
