// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Diagnostic descriptors and the diagnostics analyzers report.
//!
//! A [`Diagnostic`] is a plain record: id, severity, span and message. It
//! holds no reference into the tree it was computed from, so it stays valid
//! (as a position) after the host re-parses, and fixers re-locate their
//! target from [`Diagnostic::span`].

use ecow::EcoString;
use serde::{Deserialize, Serialize};

use crate::syntax::Span;

/// How serious a diagnostic is. Fixed per descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        })
    }
}

impl From<Severity> for miette::Severity {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => Self::Error,
            Severity::Warning => Self::Warning,
            Severity::Info => Self::Advice,
        }
    }
}

/// Static description of one kind of diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticDescriptor {
    /// Stable identifier; fix providers register against it.
    pub id: &'static str,
    pub title: &'static str,
    /// Message template; `{0}` is replaced by the class name.
    pub message_format: &'static str,
    pub category: &'static str,
    pub severity: Severity,
}

impl DiagnosticDescriptor {
    /// Creates a diagnostic for `class_name` anchored at `span`.
    #[must_use]
    pub fn create(&self, span: Span, class_name: &str) -> Diagnostic {
        Diagnostic {
            id: self.id.into(),
            severity: self.severity,
            span,
            message: self.message_format.replace("{0}", class_name).into(),
            class_name: class_name.into(),
        }
    }
}

/// A class opts into AutoInject but does not override `_Notification`.
pub const NOTIFICATION_OVERRIDE_MISSING: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "AUTO_INJECT_001",
    title: "Missing AutoInject notification override",
    message_format: "Missing \"public override void _Notification(int what) => this.Notify(what);\" \
                     method override in AutoInject class implementation \"{0}\"",
    category: "Usage",
    severity: Severity::Error,
};

/// A class provides values (`IProvide<T>`) but never calls `this.Provide()`.
pub const PROVIDE_CALL_MISSING: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "AUTO_INJECT_002",
    title: "Missing \"this.Provide()\" call",
    message_format: "Missing \"this.Provide()\" call in provider class \"{0}\"",
    category: "Usage",
    severity: Severity::Error,
};

/// A class overrides `_Notification` but does not forward to `this.Notify`.
pub const NOTIFY_CALL_MISSING: DiagnosticDescriptor = DiagnosticDescriptor {
    id: "AUTO_INJECT_003",
    title: "Missing \"this.Notify(what)\" call",
    message_format: "Missing \"this.Notify(what);\" call in \"_Notification\" override of \
                     AutoInject class implementation \"{0}\"",
    category: "Usage",
    severity: Severity::Warning,
};

/// Every descriptor this crate can report, in id order.
pub static ALL_DESCRIPTORS: [DiagnosticDescriptor; 3] = [
    NOTIFICATION_OVERRIDE_MISSING,
    PROVIDE_CALL_MISSING,
    NOTIFY_CALL_MISSING,
];

/// A reported violation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The descriptor id, e.g. `AUTO_INJECT_001`.
    pub id: EcoString,
    pub severity: Severity,
    pub span: Span,
    pub message: EcoString,
    /// Name of the offending class, as substituted into the message.
    pub class_name: EcoString,
}

impl Diagnostic {
    /// Returns the descriptor this diagnostic was created from, if it is one
    /// of ours.
    #[must_use]
    pub fn descriptor(&self) -> Option<&'static DiagnosticDescriptor> {
        ALL_DESCRIPTORS.iter().find(|d| self.id == d.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_formats_class_name_into_message() {
        let diagnostic = PROVIDE_CALL_MISSING.create(Span::new(3, 27), "Provider");
        assert_eq!(diagnostic.id, "AUTO_INJECT_002");
        assert_eq!(diagnostic.severity, Severity::Error);
        assert_eq!(diagnostic.span, Span::new(3, 27));
        assert_eq!(
            diagnostic.message,
            "Missing \"this.Provide()\" call in provider class \"Provider\""
        );
        assert_eq!(diagnostic.class_name, "Provider");
    }

    #[test]
    fn ids_are_unique_and_resolve_back() {
        for descriptor in &ALL_DESCRIPTORS {
            let diagnostic = descriptor.create(Span::default(), "Foo");
            assert_eq!(diagnostic.descriptor(), Some(descriptor));
        }
    }

    #[test]
    fn multiline_message_has_single_spaces() {
        let diagnostic = NOTIFICATION_OVERRIDE_MISSING.create(Span::default(), "Foo");
        assert!(!diagnostic.message.contains("  "), "{}", diagnostic.message);
        assert!(diagnostic.message.ends_with("\"Foo\""));
    }
}
