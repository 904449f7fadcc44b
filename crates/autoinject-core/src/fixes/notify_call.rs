// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fix for `AUTO_INJECT_003`: forward the notification to `this.Notify`.

use std::sync::Arc;

use ecow::EcoString;

use super::{CodeAction, CodeFixProvider, enclosing_type, rewrite_enclosing_type, type_at};
use crate::config::AutoInjectConfig;
use crate::diagnostics::{Diagnostic, NOTIFY_CALL_MISSING};
use crate::editor::{append_statement, replace_member};
use crate::host::{CancellationToken, Cancelled, Document};
use crate::query::{find_override, find_override_index, first_int_parameter};
use crate::syntax::factory::{identifier, this_call};
use crate::syntax::{ExpressionStatement, SyntaxAnnotation};

pub const EQUIVALENCE_KEY: &str = "AutoInjectNotifyMissingFix";

/// Appends `this.Notify(<parameter>);` to the existing `_Notification`
/// override, using whatever name its `int` parameter has.
pub struct NotifyCallFix {
    config: Arc<AutoInjectConfig>,
}

impl NotifyCallFix {
    #[must_use]
    pub fn new(config: Arc<AutoInjectConfig>) -> Self {
        Self { config }
    }
}

impl CodeFixProvider for NotifyCallFix {
    fn fixable_ids(&self) -> &'static [&'static str] {
        const IDS: &[&str] = &[NOTIFY_CALL_MISSING.id];
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
        let Some(hook) = find_override(ty, &self.config.notification_method) else {
            tracing::debug!(class = %ty.name(), "no notification override to amend");
            return Ok(Vec::new());
        };
        let Some(parameter) = first_int_parameter(hook) else {
            tracing::debug!(class = %ty.name(), "notification override has no int parameter");
            return Ok(Vec::new());
        };
        let parameter: EcoString = parameter.name().into();

        let title = format!(
            "Add \"this.{}({parameter});\" to existing \"{}\" override",
            self.config.notify_method, self.config.notification_method,
        );
        let config = Arc::clone(&self.config);
        let action = CodeAction::new(title, EQUIVALENCE_KEY, move |document, cancel| {
            rewrite_enclosing_type(document, offset, cancel, |ty| {
                let index = find_override_index(ty, &config.notification_method)?;
                let hook = ty.members[index].as_method()?;
                let call = ExpressionStatement::new(this_call(
                    config.notify_method.clone(),
                    vec![identifier(parameter.clone())],
                ))
                .with_annotation(SyntaxAnnotation::Formatter);
                replace_member(ty, index, append_statement(hook, call.into()))
            })
        });
        Ok(vec![action])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::{int, void};
    use crate::syntax::printer::print_member;
    use crate::syntax::{
        ArrowBody, Block, CompilationUnit, MethodBody, MethodDeclaration, Modifier, Parameter, Span,
        Terminator, Trivia, TypeSyntax,
    };
    use crate::test_support::{meta_class, public_method};

    fn hook(parameters: Vec<Parameter>, body: MethodBody) -> MethodDeclaration {
        MethodDeclaration::new(void(), "_Notification")
            .with_modifiers([Modifier::Public, Modifier::Override])
            .with_parameters(parameters)
            .with_body(body)
            .with_identifier_span(Span::new(121, 134))
    }

    fn document_with(method: MethodDeclaration) -> Document {
        let class = meta_class("Player", 0).with_member(method);
        Document::new("Player.cs", CompilationUnit::new(vec![class], Span::new(0, 400)))
    }

    fn actions(document: &Document) -> Vec<CodeAction> {
        let fix = NotifyCallFix::new(Arc::new(AutoInjectConfig::default()));
        let diagnostic = NOTIFY_CALL_MISSING.create(Span::new(121, 134), "Player");
        fix.register_fixes(document, &diagnostic, &CancellationToken::new())
            .unwrap()
    }

    fn fixed_hook(document: &Document) -> String {
        let cancel = CancellationToken::new();
        let offered = actions(document);
        assert_eq!(offered.len(), 1);
        let fixed = offered[0].apply(document, &cancel);
        let root = fixed.syntax_root(&cancel).unwrap().unwrap();
        print_member(&root.types[0].members[0])
    }

    #[test]
    fn uses_the_actual_parameter_name() {
        let document = document_with(hook(
            vec![Parameter::new(int(), "code")],
            MethodBody::Block(Block::new(vec![])),
        ));
        let offered = actions(&document);
        assert_eq!(offered[0].equivalence_key, "AutoInjectNotifyMissingFix");
        assert_eq!(
            offered[0].title,
            "Add \"this.Notify(code);\" to existing \"_Notification\" override"
        );
        insta::assert_snapshot!(fixed_hook(&document), @r"
        public override void _Notification(int code)
        {
            this.Notify(code);
        }
        ");
    }

    #[test]
    fn expression_body_keeps_its_trailing_comment() {
        let mut arrow = ArrowBody::new(this_call("Log", vec![identifier("what")]));
        arrow.terminator = Terminator::synthetic().with_trailing_trivia(vec![
            Trivia::Whitespace(" ".into()),
            Trivia::LineComment(" trace".into()),
        ]);
        let document = document_with(hook(
            vec![Parameter::new(int(), "what")],
            MethodBody::Expression(arrow),
        ));
        insta::assert_snapshot!(fixed_hook(&document), @r"
        public override void _Notification(int what)
        {
            this.Log(what); // trace
            this.Notify(what);
        }
        ");
    }

    #[test]
    fn absent_body_becomes_a_block() {
        let document = document_with(hook(
            vec![Parameter::new(int(), "what")],
            MethodBody::Absent(Terminator::synthetic()),
        ));
        assert_eq!(
            fixed_hook(&document),
            "public override void _Notification(int what)\n{\n    this.Notify(what);\n}"
        );
    }

    #[test]
    fn no_int_parameter_offers_nothing() {
        let document = document_with(hook(
            vec![Parameter::new(TypeSyntax::named("long"), "what")],
            MethodBody::Absent(Terminator::synthetic()),
        ));
        assert!(actions(&document).is_empty());
    }

    #[test]
    fn no_override_offers_nothing() {
        let document = document_with(public_method("Setup", vec![]));
        assert!(actions(&document).is_empty());
    }

    #[test]
    fn vanished_override_leaves_document_unchanged() {
        let document = document_with(hook(
            vec![Parameter::new(int(), "what")],
            MethodBody::Absent(Terminator::synthetic()),
        ));
        let offered = actions(&document);
        let stripped = document_with(public_method("Setup", vec![]));
        let result = offered[0].apply(&stripped, &CancellationToken::new());
        assert!(result.shares_root_with(&stripped));
    }
}
