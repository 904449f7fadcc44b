// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! What the host hands in: documents and cancellation.
//!
//! A [`Document`] is an immutable snapshot. Fixes never change one in
//! place; they return a new document sharing everything they did not touch.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ecow::EcoString;

use crate::syntax::CompilationUnit;

/// Returned when an operation observed a cancelled [`CancellationToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation was cancelled")]
pub struct Cancelled;

/// Cooperative cancellation flag shared between the host and the work it
/// started. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// A token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation of every operation holding a clone of this
    /// token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Returns `Err(Cancelled)` once cancellation has been requested.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// One source document as seen by the analyzers.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Host identifier, usually the file path.
    pub id: EcoString,
    root: Option<Arc<CompilationUnit>>,
}

impl Document {
    #[must_use]
    pub fn new(id: impl Into<EcoString>, root: CompilationUnit) -> Self {
        Self {
            id: id.into(),
            root: Some(Arc::new(root)),
        }
    }

    /// A document the host could not produce a tree for.
    #[must_use]
    pub fn without_root(id: impl Into<EcoString>) -> Self {
        Self {
            id: id.into(),
            root: None,
        }
    }

    /// Returns the syntax root, if the host has one.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if `cancel` has been cancelled.
    pub fn syntax_root(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Arc<CompilationUnit>>, Cancelled> {
        cancel.check()?;
        Ok(self.root.clone())
    }

    /// Returns a document with the same id and `root` as its tree.
    #[must_use]
    pub fn with_syntax_root(&self, root: CompilationUnit) -> Self {
        Self {
            id: self.id.clone(),
            root: Some(Arc::new(root)),
        }
    }

    /// Returns `true` if both documents share the same root allocation.
    #[must_use]
    pub fn shares_root_with(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}
