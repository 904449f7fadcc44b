// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The syntax layer: tree shape, construction, traversal and printing.
//!
//! Trees come from the host already parsed. This layer never reads source
//! files; the only text it parses is the fixed statement templates used
//! when a fix synthesizes a method body.

pub mod factory;
pub mod printer;
pub mod span;
pub mod template;
pub mod tree;
pub mod walker;

pub use span::Span;
pub use tree::*;
pub use walker::Walk;
