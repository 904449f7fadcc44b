// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Code fixes for the AutoInject diagnostics.
//!
//! A [`CodeFixProvider`] turns a diagnostic into zero or more
//! [`CodeAction`]s. An action is a deferred edit: nothing happens until the
//! host calls [`CodeAction::apply`], and at that point the action re-resolves
//! its target against the document it is handed. Diagnostics carry only a
//! position, so fixes stay valid after unrelated edits and can be applied one
//! after another by [`fix_all`].
//!
//! Every edit returns a new [`Document`]; the input is never mutated.

mod notification_override;
mod notify_call;
mod provide_call;

use std::fmt;
use std::sync::Arc;

use ecow::EcoString;

pub use self::notification_override::NotificationOverrideFix;
pub use self::notify_call::NotifyCallFix;
pub use self::provide_call::ProvideCallFix;
use crate::config::AutoInjectConfig;
use crate::diagnostics::Diagnostic;
use crate::host::{CancellationToken, Cancelled, Document};
use crate::syntax::{CompilationUnit, Member, TypeDeclaration};

type ApplyFn = dyn Fn(&Document, &CancellationToken) -> Result<Document, Cancelled> + Send + Sync;

/// A named, deferred edit of a document.
#[derive(Clone)]
pub struct CodeAction {
    /// Human-readable description shown to the user.
    pub title: EcoString,
    /// Stable key identifying this kind of fix across diagnostics, used to
    /// deduplicate and batch.
    pub equivalence_key: EcoString,
    apply: Arc<ApplyFn>,
}

impl CodeAction {
    pub fn new(
        title: impl Into<EcoString>,
        equivalence_key: impl Into<EcoString>,
        apply: impl Fn(&Document, &CancellationToken) -> Result<Document, Cancelled>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            equivalence_key: equivalence_key.into(),
            apply: Arc::new(apply),
        }
    }

    /// Applies the edit to `document`.
    ///
    /// Returns `document` unchanged if cancellation is observed or the
    /// target can no longer be found.
    #[must_use]
    pub fn apply(&self, document: &Document, cancel: &CancellationToken) -> Document {
        match self.try_apply(document, cancel) {
            Ok(edited) => edited,
            Err(Cancelled) => {
                tracing::debug!(key = %self.equivalence_key, "code action cancelled");
                document.clone()
            }
        }
    }

    /// Like [`apply`](Self::apply), but reports cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancel` is observed cancelled.
    pub fn try_apply(
        &self,
        document: &Document,
        cancel: &CancellationToken,
    ) -> Result<Document, Cancelled> {
        (self.apply)(document, cancel)
    }
}

impl fmt::Debug for CodeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeAction")
            .field("title", &self.title)
            .field("equivalence_key", &self.equivalence_key)
            .finish_non_exhaustive()
    }
}

/// Offers code actions for diagnostics with particular ids.
pub trait CodeFixProvider: Send + Sync {
    /// Diagnostic ids this provider can fix.
    fn fixable_ids(&self) -> &'static [&'static str];

    /// Computes the actions available for `diagnostic` in `document`.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancel` is observed cancelled.
    fn register_fixes(
        &self,
        document: &Document,
        diagnostic: &Diagnostic,
        cancel: &CancellationToken,
    ) -> Result<Vec<CodeAction>, Cancelled>;

    /// Returns `true` if this provider handles `diagnostic`.
    fn can_fix(&self, diagnostic: &Diagnostic) -> bool {
        self.fixable_ids().contains(&diagnostic.id.as_str())
    }
}

/// Constructs every fix provider.
#[must_use]
pub fn all_fix_providers(config: &Arc<AutoInjectConfig>) -> Vec<Box<dyn CodeFixProvider>> {
    vec![
        Box::new(NotificationOverrideFix::new(Arc::clone(config))),
        Box::new(ProvideCallFix::new(Arc::clone(config))),
        Box::new(NotifyCallFix::new(Arc::clone(config))),
    ]
}

/// Collects the actions every applicable provider offers for `diagnostic`.
///
/// Cancellation yields no actions.
#[must_use]
pub fn code_actions_for(
    document: &Document,
    diagnostic: &Diagnostic,
    providers: &[Box<dyn CodeFixProvider>],
    cancel: &CancellationToken,
) -> Vec<CodeAction> {
    let mut actions = Vec::new();
    for provider in providers.iter().filter(|p| p.can_fix(diagnostic)) {
        match provider.register_fixes(document, diagnostic, cancel) {
            Ok(offered) => actions.extend(offered),
            Err(Cancelled) => return Vec::new(),
        }
    }
    actions
}

/// Applies the action with `equivalence_key` for every diagnostic in turn.
///
/// Each step registers fixes against the document produced by the previous
/// step, so targets are re-resolved by position every time. Diagnostics the
/// provider does not handle, or for which no action carries the key, are
/// skipped. Cancellation at any point returns `document` unchanged.
#[must_use]
pub fn fix_all(
    document: &Document,
    diagnostics: &[Diagnostic],
    provider: &dyn CodeFixProvider,
    equivalence_key: &str,
    cancel: &CancellationToken,
) -> Document {
    match try_fix_all(document, diagnostics, provider, equivalence_key, cancel) {
        Ok(fixed) => fixed,
        Err(Cancelled) => {
            tracing::debug!(document = %document.id, "fix all cancelled");
            document.clone()
        }
    }
}

fn try_fix_all(
    document: &Document,
    diagnostics: &[Diagnostic],
    provider: &dyn CodeFixProvider,
    equivalence_key: &str,
    cancel: &CancellationToken,
) -> Result<Document, Cancelled> {
    let mut current = document.clone();
    let mut applied = 0usize;
    for diagnostic in diagnostics.iter().filter(|d| provider.can_fix(d)) {
        cancel.check()?;
        let actions = provider.register_fixes(&current, diagnostic, cancel)?;
        let Some(action) = actions.iter().find(|a| a.equivalence_key == equivalence_key) else {
            continue;
        };
        current = action.try_apply(&current, cancel)?;
        applied += 1;
    }
    tracing::debug!(document = %document.id, key = equivalence_key, applied, "fix all");
    Ok(current)
}

// ── Locating types by position ────────────────────────────────────────────────

/// Member indices leading from a compilation unit to a type declaration.
///
/// The first index selects a top-level type; each further index selects a
/// nested type among the members of the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypePath(Vec<usize>);

impl TypePath {
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// Finds the innermost type declaration whose span contains `offset`.
///
/// Synthesized declarations have empty spans and are never found.
#[must_use]
pub fn locate_type(root: &CompilationUnit, offset: u32) -> Option<TypePath> {
    let (index, mut ty) = root
        .types
        .iter()
        .enumerate()
        .find(|(_, ty)| ty.span.contains_offset(offset))?;
    let mut path = vec![index];
    while let Some((index, nested)) = ty.members.iter().enumerate().find_map(|(index, member)| {
        member
            .as_type()
            .filter(|nested| nested.span.contains_offset(offset))
            .map(|nested| (index, nested))
    }) {
        path.push(index);
        ty = nested;
    }
    Some(TypePath(path))
}

/// Returns the type declaration at `path`.
#[must_use]
pub fn type_at<'a>(root: &'a CompilationUnit, path: &TypePath) -> Option<&'a TypeDeclaration> {
    let (first, rest) = path.0.split_first()?;
    let mut ty = root.types.get(*first)?;
    for index in rest {
        ty = ty.members.get(*index)?.as_type()?;
    }
    Some(ty)
}

/// Returns a copy of `root` with the type at `path` replaced by
/// `replacement`, or `None` if `path` does not lead to a type.
#[must_use]
pub fn replace_type(
    root: &CompilationUnit,
    path: &TypePath,
    replacement: TypeDeclaration,
) -> Option<CompilationUnit> {
    let mut root = root.clone();
    let (first, rest) = path.0.split_first()?;
    let mut ty = root.types.get_mut(*first)?;
    for index in rest {
        ty = match ty.members.get_mut(*index)? {
            Member::Type(nested) => nested,
            _ => return None,
        };
    }
    *ty = replacement;
    Some(root)
}

/// Re-locates the type enclosing `offset` in `document` and replaces it
/// with the result of `edit`.
///
/// The document comes back unchanged when it has no root, no type encloses
/// `offset`, or `edit` returns `None`.
pub(crate) fn rewrite_enclosing_type(
    document: &Document,
    offset: u32,
    cancel: &CancellationToken,
    edit: impl FnOnce(&TypeDeclaration) -> Option<TypeDeclaration>,
) -> Result<Document, Cancelled> {
    let Some(root) = document.syntax_root(cancel)? else {
        tracing::debug!(document = %document.id, "no syntax root, leaving document unchanged");
        return Ok(document.clone());
    };
    let Some(path) = locate_type(&root, offset) else {
        tracing::debug!(document = %document.id, offset, "no type encloses offset");
        return Ok(document.clone());
    };
    let Some(ty) = type_at(&root, &path) else {
        return Ok(document.clone());
    };
    cancel.check()?;
    let Some(edited) = edit(ty) else {
        return Ok(document.clone());
    };
    match replace_type(&root, &path, edited) {
        Some(unit) => Ok(document.with_syntax_root(unit)),
        None => Ok(document.clone()),
    }
}

/// Re-locates the type enclosing `offset` for registration.
pub(crate) fn enclosing_type(
    document: &Document,
    offset: u32,
    cancel: &CancellationToken,
) -> Result<Option<(Arc<CompilationUnit>, TypePath)>, Cancelled> {
    let Some(root) = document.syntax_root(cancel)? else {
        return Ok(None);
    };
    Ok(locate_type(&root, offset).map(|path| (root, path)))
}
