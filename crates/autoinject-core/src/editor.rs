// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Non-destructive edits of method bodies and member lists.
//!
//! Every function takes the node to edit by reference and returns an edited
//! copy. Results carry [`SyntaxAnnotation::Formatter`] so the host re-formats
//! them.

use ecow::EcoString;

use crate::syntax::factory::this_call;
use crate::syntax::template::{TemplateError, parse_statement};
use crate::syntax::{
    Block, ExpressionStatement, Member, MethodBody, MethodDeclaration, Modifier, Parameter,
    Statement, SyntaxAnnotation, TypeDeclaration, factory,
};

/// Returns `method` with `statement` appended to its body.
///
/// - A block body gets `statement` as its new last statement.
/// - An expression body `=> expr;` becomes `{ expr; statement }`. Trivia
///   trailing the old `;` (a comment, say) moves to the `;` of `expr;`.
/// - An absent body becomes `{ statement }`.
#[must_use]
pub fn append_statement(method: &MethodDeclaration, statement: Statement) -> MethodDeclaration {
    let block = match &method.body {
        MethodBody::Block(block) => {
            let mut block = block.clone();
            block.statements.push(statement);
            block
        }
        MethodBody::Expression(arrow) => {
            let mut converted = ExpressionStatement::new(arrow.expression.clone());
            if !arrow.terminator.missing && !arrow.terminator.trailing_trivia.is_empty() {
                converted.terminator.trailing_trivia = arrow.terminator.trailing_trivia.clone();
            }
            Block::new(vec![converted.into(), statement])
        }
        MethodBody::Absent(_) => Block::new(vec![statement]),
    };
    method
        .clone()
        .with_body(MethodBody::Block(block))
        .with_annotation(SyntaxAnnotation::Formatter)
}

/// Returns `method` with `this.<name>();` appended to its body.
#[must_use]
pub fn append_self_call(method: &MethodDeclaration, name: &str) -> MethodDeclaration {
    let call = ExpressionStatement::new(this_call(name, vec![]))
        .with_annotation(SyntaxAnnotation::Formatter);
    append_statement(method, call.into())
}

/// Builds `modifiers void name(parameters) { body }` where the body is the
/// single statement parsed from `body_template`.
///
/// # Errors
///
/// Returns a [`TemplateError`] if `body_template` is not a supported
/// statement.
pub fn create_method(
    name: impl Into<EcoString>,
    modifiers: &[Modifier],
    parameters: Vec<Parameter>,
    body_template: &str,
) -> Result<MethodDeclaration, TemplateError> {
    let statement = match parse_statement(body_template)? {
        Statement::Expression(statement) => Statement::Expression(
            statement
                .with_annotation(SyntaxAnnotation::Formatter)
                .with_annotation(SyntaxAnnotation::Simplifier),
        ),
        other => other,
    };
    Ok(MethodDeclaration::new(factory::void(), name)
        .with_modifiers(modifiers.iter().copied())
        .with_parameters(parameters)
        .with_body(MethodBody::Block(Block::new(vec![statement]))))
}

/// Returns `ty` with `member` inserted at `index` (clamped to the end).
#[must_use]
pub fn insert_member(ty: &TypeDeclaration, index: usize, member: impl Into<Member>) -> TypeDeclaration {
    let mut ty = ty.clone();
    let index = index.min(ty.members.len());
    ty.members.insert(index, member.into());
    ty
}

/// Returns `ty` with `member` appended as its last member.
#[must_use]
pub fn add_member(ty: &TypeDeclaration, member: impl Into<Member>) -> TypeDeclaration {
    insert_member(ty, ty.members.len(), member)
}

/// Returns `ty` with the member at `index` replaced, or `None` if there is
/// no such member.
#[must_use]
pub fn replace_member(
    ty: &TypeDeclaration,
    index: usize,
    member: impl Into<Member>,
) -> Option<TypeDeclaration> {
    let mut ty = ty.clone();
    let slot = ty.members.get_mut(index)?;
    *slot = member.into();
    Some(ty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::{expression_statement, identifier, int, void};
    use crate::syntax::printer::print_member;
    use crate::syntax::{ArrowBody, Expression, Span, Terminator, Trivia};

    fn notify_what() -> Expression {
        this_call("Notify", vec![identifier("what")])
    }

    fn notification(body: MethodBody) -> MethodDeclaration {
        MethodDeclaration::new(void(), "_Notification")
            .with_modifiers([Modifier::Public, Modifier::Override])
            .with_parameters(vec![Parameter::new(int(), "what")])
            .with_body(body)
    }

    fn statements(method: &MethodDeclaration) -> &[Statement] {
        match &method.body {
            MethodBody::Block(block) => &block.statements,
            other => panic!("expected block body, got {other:?}"),
        }
    }

    #[test]
    fn block_body_gets_statement_appended() {
        let method = notification(MethodBody::Block(Block::new(vec![expression_statement(
            this_call("Log", vec![]),
        )])));
        let edited = append_statement(&method, expression_statement(notify_what()));
        assert_eq!(statements(&edited).len(), 2);
        assert!(edited.annotations.contains(&SyntaxAnnotation::Formatter));
        // The original is untouched.
        assert_eq!(statements(&method).len(), 1);
    }

    #[test]
    fn expression_body_becomes_block_and_keeps_trailing_comment() {
        let mut arrow = ArrowBody::new(this_call("Log", vec![]));
        arrow.terminator = Terminator::synthetic()
            .with_trailing_trivia(vec![Trivia::Whitespace(" ".into()), Trivia::LineComment(" log it".into())]);
        let method = notification(MethodBody::Expression(arrow));
        let edited = append_self_call(&method, "Notify");
        let body = statements(&edited);
        assert_eq!(body.len(), 2);
        assert_eq!(
            body[0].terminator().map(|t| t.trailing_trivia.clone()),
            Some(vec![Trivia::Whitespace(" ".into()), Trivia::LineComment(" log it".into())])
        );
        insta::assert_snapshot!(print_member(&edited.into()), @r"
        public override void _Notification(int what)
        {
            this.Log(); // log it
            this.Notify();
        }
        ");
    }

    #[test]
    fn missing_terminator_trivia_is_not_carried_over() {
        let mut arrow = ArrowBody::new(this_call("Log", vec![]));
        arrow.terminator = Terminator {
            span: Span::default(),
            missing: true,
            trailing_trivia: vec![Trivia::LineComment(" stray".into())],
        };
        let edited = append_self_call(&notification(MethodBody::Expression(arrow)), "Notify");
        assert!(statements(&edited)[0].terminator().unwrap().trailing_trivia.is_empty());
    }

    #[test]
    fn absent_body_becomes_single_statement_block() {
        let method = notification(MethodBody::Absent(Terminator::synthetic()));
        let edited = append_statement(&method, expression_statement(notify_what()));
        assert_eq!(statements(&edited), [expression_statement(notify_what())]);
    }

    #[test]
    fn create_method_parses_template_and_annotates_it() {
        let method = create_method("Setup", &[Modifier::Public], vec![], "this.Provide();").unwrap();
        assert_eq!(print_member(&method.clone().into()), "public void Setup()\n{\n    this.Provide();\n}");
        let Statement::Expression(statement) = &statements(&method)[0] else {
            panic!("expected expression statement");
        };
        assert!(statement.annotations.contains(&SyntaxAnnotation::Formatter));
        assert!(statement.annotations.contains(&SyntaxAnnotation::Simplifier));
    }

    #[test]
    fn create_method_reports_bad_template() {
        assert!(create_method("Setup", &[Modifier::Public], vec![], "this.Provide()").is_err());
    }

    #[test]
    fn member_list_edits() {
        let ty = TypeDeclaration::class("Foo").with_member(MethodDeclaration::new(void(), "A"));
        let ty = insert_member(&ty, 0, MethodDeclaration::new(void(), "First"));
        let ty = add_member(&ty, MethodDeclaration::new(void(), "Last"));
        let names: Vec<_> = ty.methods().map(|(_, m)| m.name().to_string()).collect();
        assert_eq!(names, ["First", "A", "Last"]);
        let ty = replace_member(&ty, 1, MethodDeclaration::new(void(), "B")).unwrap();
        assert_eq!(ty.members[1].as_method().map(MethodDeclaration::name), Some("B"));
        assert!(replace_member(&ty, 9, MethodDeclaration::new(void(), "C")).is_none());
    }
}
