// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Tree builders shared by unit tests.
//!
//! Spans are laid out as if each class were written at `start` in a file:
//! the attribute list comes first, and the class span covers everything
//! up to `start + 400`.

use crate::syntax::factory::{identifier, int, meta_attribute_list, this_call, void};
use crate::syntax::{
    ArrowBody, Block, MethodBody, MethodDeclaration, Modifier, Parameter, Span, Statement,
    TypeDeclaration, TypeSyntax,
};

/// `[Meta(typeof(IAutoNode))] public partial class <name> : Node { }`
pub(crate) fn meta_class(name: &str, start: u32) -> TypeDeclaration {
    TypeDeclaration::class(name)
        .with_modifiers([Modifier::Public, Modifier::Partial])
        .with_attribute_list(meta_attribute_list("Meta", "IAutoNode", Span::new(start, start + 25)))
        .with_identifier_span(Span::new(start + 48, start + 51))
        .with_base(TypeSyntax::named("Node"))
        .with_span(Span::new(start, start + 400))
}

/// [`meta_class`] that also implements `IProvide<int>`.
pub(crate) fn provider_class(name: &str, start: u32) -> TypeDeclaration {
    meta_class(name, start).with_base(TypeSyntax::generic("IProvide", vec![int()]))
}

/// `public override void _Notification(int <parameter>) => this.Notify(<parameter>);`
pub(crate) fn notification_override(parameter: &str, start: u32) -> MethodDeclaration {
    MethodDeclaration::new(void(), "_Notification")
        .with_modifiers([Modifier::Public, Modifier::Override])
        .with_parameters(vec![Parameter::new(int(), parameter)])
        .with_body(MethodBody::Expression(ArrowBody::new(this_call(
            "Notify",
            vec![identifier(parameter)],
        ))))
        .with_identifier_span(Span::new(start + 21, start + 34))
        .with_span(Span::new(start, start + 70))
}

/// `public void <name>() { <statements> }`
pub(crate) fn public_method(name: &str, statements: Vec<Statement>) -> MethodDeclaration {
    MethodDeclaration::new(void(), name)
        .with_modifiers([Modifier::Public])
        .with_body(MethodBody::Block(Block::new(statements)))
}
