// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Constructors for synthesized syntax.
//!
//! Unless a span is passed in, everything built here has an empty span: it
//! does not exist in the source text until the host prints and re-parses the
//! edited tree.

use ecow::EcoString;

use super::Span;
use super::tree::{
    Attribute, AttributeArgument, AttributeList, Expression, ExpressionStatement, Identifier,
    PredefinedType, Statement, TypeSyntax,
};

/// `name`
#[must_use]
pub fn identifier(name: impl Into<EcoString>) -> Expression {
    Expression::Identifier(Identifier::synthetic(name))
}

/// `this`
#[must_use]
pub fn this() -> Expression {
    Expression::This(Span::default())
}

/// `target.name`
#[must_use]
pub fn member_access(target: Expression, name: impl Into<EcoString>) -> Expression {
    Expression::MemberAccess {
        target: Box::new(target),
        name: Identifier::synthetic(name),
        type_arguments: Vec::new(),
        span: Span::default(),
    }
}

/// `callee(arguments)`
#[must_use]
pub fn invocation(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::Invocation {
        callee: Box::new(callee),
        arguments,
        span: Span::default(),
    }
}

/// `this.name(arguments)`
#[must_use]
pub fn this_call(name: impl Into<EcoString>, arguments: Vec<Expression>) -> Expression {
    invocation(member_access(this(), name), arguments)
}

/// `expression;`
#[must_use]
pub fn expression_statement(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement::new(expression))
}

/// `typeof(ty)`
#[must_use]
pub fn type_of(ty: TypeSyntax) -> Expression {
    Expression::TypeOf {
        ty,
        span: Span::default(),
    }
}

/// `void`
#[must_use]
pub const fn void() -> TypeSyntax {
    TypeSyntax::Predefined(PredefinedType::Void)
}

/// `int`
#[must_use]
pub const fn int() -> TypeSyntax {
    TypeSyntax::Predefined(PredefinedType::Int)
}

/// `[name(typeof(marker))]` placed at `span`, with the attribute itself
/// covering the same range minus the brackets.
#[must_use]
pub fn meta_attribute_list(name: &str, marker: &str, span: Span) -> AttributeList {
    let inner = Span::new(span.start() + 1, span.end().saturating_sub(1).max(span.start() + 1));
    AttributeList::new(
        vec![Attribute::new(
            name,
            Some(vec![AttributeArgument::positional(type_of(TypeSyntax::named(
                marker,
            )))]),
            inner,
        )],
        span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn this_call_builds_member_access_on_this() {
        let call = this_call("Provide", vec![]);
        let Expression::Invocation { callee, arguments, .. } = call else {
            panic!("expected invocation");
        };
        assert!(arguments.is_empty());
        let Expression::MemberAccess { target, name, .. } = *callee else {
            panic!("expected member access");
        };
        assert_eq!(name.name, "Provide");
        assert!(matches!(*target, Expression::This(_)));
    }

    #[test]
    fn meta_attribute_list_nests_attribute_inside_brackets() {
        let list = meta_attribute_list("Meta", "IAutoNode", Span::new(10, 34));
        assert_eq!(list.span, Span::new(10, 34));
        assert_eq!(list.attributes[0].span, Span::new(11, 33));
        assert!(list.span.contains(list.attributes[0].span));
    }
}
