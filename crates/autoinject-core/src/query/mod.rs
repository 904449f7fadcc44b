// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Read-only pattern queries shared by analyzers and fixers.
//!
//! Every query answers "not found" with `None` or `false`; none of them
//! fail.


use std::ops::ControlFlow;

use crate::config::AutoInjectConfig;
use crate::host::{CancellationToken, Cancelled};
use crate::syntax::{
    Attribute, Expression, MethodDeclaration, Modifier, Parameter, PredefinedType,
    TypeDeclaration, TypeSyntax, Walk,
};

/// Returns the attribute that opts `class` into AutoInject.
///
/// That is the first attribute, across all attribute lists, named after the
/// meta attribute, written with an argument list, and with some argument of
/// the form `typeof(Marker)` where `Marker` is a plain identifier naming one
/// of the configured marker interfaces.
#[must_use]
pub fn find_qualifying_attribute<'a>(
    class: &'a TypeDeclaration,
    config: &AutoInjectConfig,
) -> Option<&'a Attribute> {
    class.attributes().find(|attribute| {
        let Some(arguments) = &attribute.arguments else {
            return false;
        };
        config.is_meta_attribute_name(&attribute.name)
            && arguments.iter().any(|argument| match &argument.expression {
                Expression::TypeOf {
                    ty: TypeSyntax::Named(marker),
                    ..
                } => config.is_marker_interface(&marker.name),
                _ => false,
            })
    })
}

/// Returns the first direct member method named `name` that takes exactly
/// one parameter and is marked `override`.
#[must_use]
pub fn find_override<'a>(ty: &'a TypeDeclaration, name: &str) -> Option<&'a MethodDeclaration> {
    find_override_index(ty, name).and_then(|index| ty.members[index].as_method())
}

/// Like [`find_override`], but returns the member index.
#[must_use]
pub fn find_override_index(ty: &TypeDeclaration, name: &str) -> Option<usize> {
    ty.methods()
        .find(|(_, method)| {
            method.parameters.len() == 1
                && method.name() == name
                && method.has_modifier(Modifier::Override)
        })
        .map(|(index, _)| index)
}

/// Returns the first direct member method satisfying `predicate`, with its
/// member index.
pub fn find_method<'a>(
    ty: &'a TypeDeclaration,
    mut predicate: impl FnMut(&MethodDeclaration) -> bool,
) -> Option<(usize, &'a MethodDeclaration)> {
    ty.methods().find(|(_, method)| predicate(method))
}

/// Returns the first parameter of `method` declared as `int`.
#[must_use]
pub fn first_int_parameter(method: &MethodDeclaration) -> Option<&Parameter> {
    method
        .parameters
        .iter()
        .find(|parameter| parameter.ty.is_predefined(PredefinedType::Int))
}

/// Returns `true` if `expression` is a call `this.name(...)`, with or
/// without type arguments.
#[must_use]
pub fn is_self_call(expression: &Expression, name: &str) -> bool {
    let Expression::Invocation { callee, .. } = expression else {
        return false;
    };
    matches!(
        &**callee,
        Expression::MemberAccess { target, name: member, .. }
            if matches!(**target, Expression::This(_)) && member.name == name
    )
}

/// Returns `true` if any expression below `node` is a call `this.name(...)`.
///
/// Looks everywhere: lambdas, branches, loops, field initializers,
/// property accessors and nested types.
#[must_use]
pub fn contains_self_call(node: &impl Walk, name: &str) -> bool {
    node.walk(&mut |expression: &Expression| {
        if is_self_call(expression, name) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    })
    .is_break()
}

/// [`contains_self_call`] that stops as soon as `cancel` is cancelled.
///
/// # Errors
///
/// Returns [`Cancelled`] if cancellation is observed before a call is found.
pub fn contains_self_call_cancellable(
    node: &impl Walk,
    name: &str,
    cancel: &CancellationToken,
) -> Result<bool, Cancelled> {
    let outcome = node.walk(&mut |expression: &Expression| {
        if cancel.is_cancelled() {
            ControlFlow::Break(Err(Cancelled))
        } else if is_self_call(expression, name) {
            ControlFlow::Break(Ok(()))
        } else {
            ControlFlow::Continue(())
        }
    });
    match outcome {
        ControlFlow::Break(Ok(())) => Ok(true),
        ControlFlow::Break(Err(cancelled)) => Err(cancelled),
        ControlFlow::Continue(()) => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::{
        expression_statement, identifier, int, member_access, meta_attribute_list, this,
        this_call, type_of, void,
    };
    use crate::syntax::{
        AttributeArgument, AttributeList, Block, FieldDeclaration, Identifier, MethodBody, Span,
        Terminator,
    };

    fn config() -> AutoInjectConfig {
        AutoInjectConfig::default()
    }

    fn method_with_body(name: &str, statements: Vec<crate::syntax::Statement>) -> MethodDeclaration {
        MethodDeclaration::new(void(), name)
            .with_modifiers([Modifier::Public])
            .with_body(MethodBody::Block(Block::new(statements)))
    }

    fn notification(modifiers: Vec<Modifier>, parameters: Vec<Parameter>) -> MethodDeclaration {
        MethodDeclaration::new(void(), "_Notification")
            .with_modifiers(modifiers)
            .with_parameters(parameters)
    }

    #[test]
    fn qualifying_attribute_found_for_marker() {
        let class = TypeDeclaration::class("Foo").with_attribute_list(meta_attribute_list(
            "Meta",
            "IAutoNode",
            Span::new(0, 24),
        ));
        let attribute = find_qualifying_attribute(&class, &config()).expect("qualifies");
        assert_eq!(attribute.span, Span::new(1, 23));
    }

    #[test]
    fn qualifying_attribute_requires_known_marker() {
        let class = TypeDeclaration::class("Foo").with_attribute_list(meta_attribute_list(
            "Meta",
            "IUnrelated",
            Span::new(0, 25),
        ));
        assert!(find_qualifying_attribute(&class, &config()).is_none());
    }

    #[test]
    fn qualifying_attribute_requires_argument_list() {
        let class = TypeDeclaration::class("Foo").with_attribute_list(AttributeList::new(
            vec![Attribute::new("Meta", None, Span::new(1, 5))],
            Span::new(0, 6),
        ));
        assert!(find_qualifying_attribute(&class, &config()).is_none());
    }

    #[test]
    fn qualifying_attribute_rejects_other_names_and_generic_markers() {
        let wrong_name = TypeDeclaration::class("Foo").with_attribute_list(meta_attribute_list(
            "Tool",
            "IAutoNode",
            Span::new(0, 24),
        ));
        assert!(find_qualifying_attribute(&wrong_name, &config()).is_none());

        let generic_marker = TypeDeclaration::class("Foo").with_attribute_list(AttributeList::new(
            vec![Attribute::new(
                "Meta",
                Some(vec![AttributeArgument::positional(type_of(TypeSyntax::generic(
                    "IAutoNode",
                    vec![int()],
                )))]),
                Span::new(1, 30),
            )],
            Span::new(0, 31),
        ));
        assert!(find_qualifying_attribute(&generic_marker, &config()).is_none());
    }

    #[test]
    fn qualifying_attribute_scans_every_list_and_argument() {
        let class = TypeDeclaration::class("Foo")
            .with_attribute_list(AttributeList::new(
                vec![Attribute::new("Tool", None, Span::new(1, 5))],
                Span::new(0, 6),
            ))
            .with_attribute_list(AttributeList::new(
                vec![Attribute::new(
                    "MetaAttribute",
                    Some(vec![
                        AttributeArgument::positional(type_of(TypeSyntax::named("IOther"))),
                        AttributeArgument::positional(type_of(TypeSyntax::named("IAutoOn"))),
                    ]),
                    Span::new(8, 60),
                )],
                Span::new(7, 61),
            ));
        let attribute = find_qualifying_attribute(&class, &config()).expect("second list");
        assert_eq!(attribute.name, "MetaAttribute");
    }

    #[test]
    fn override_requires_modifier_name_and_single_parameter() {
        let what = || Parameter::new(int(), "what");
        let class = TypeDeclaration::class("Foo")
            .with_member(notification(vec![Modifier::Public], vec![what()]))
            .with_member(notification(vec![Modifier::Override], vec![what(), what()]))
            .with_member(notification(vec![Modifier::Public, Modifier::Override], vec![what()]));
        assert_eq!(find_override_index(&class, "_Notification"), Some(2));
        assert!(find_override(&class, "_Ready").is_none());
    }

    #[test]
    fn override_returns_first_in_declaration_order() {
        let class = TypeDeclaration::class("Foo")
            .with_member(
                notification(vec![Modifier::Override], vec![Parameter::new(int(), "first")]),
            )
            .with_member(
                notification(vec![Modifier::Override], vec![Parameter::new(int(), "second")]),
            );
        let method = find_override(&class, "_Notification").expect("override");
        assert_eq!(method.parameters[0].name(), "first");
    }

    #[test]
    fn first_int_parameter_skips_other_types() {
        let method = notification(
            vec![Modifier::Override],
            vec![Parameter::new(TypeSyntax::named("long"), "code")],
        );
        assert!(first_int_parameter(&method).is_none());
        let method = method.with_parameters(vec![
            Parameter::new(TypeSyntax::named("Node"), "node"),
            Parameter::new(int(), "code"),
        ]);
        assert_eq!(first_int_parameter(&method).map(Parameter::name), Some("code"));
    }

    #[test]
    fn self_call_matches_this_receiver_only() {
        assert!(is_self_call(&this_call("Provide", vec![]), "Provide"));
        assert!(!is_self_call(&this_call("Provider", vec![]), "Provide"));
        let other = crate::syntax::factory::invocation(
            member_access(identifier("other"), "Provide"),
            vec![],
        );
        assert!(!is_self_call(&other, "Provide"));
        // A method group reference is not a call.
        assert!(!is_self_call(&member_access(this(), "Provide"), "Provide"));
    }

    #[test]
    fn self_call_with_type_arguments() {
        let call = Expression::Invocation {
            callee: Box::new(Expression::MemberAccess {
                target: Box::new(this()),
                name: Identifier::synthetic("Provide"),
                type_arguments: vec![int()],
                span: Span::default(),
            }),
            arguments: vec![],
            span: Span::default(),
        };
        assert!(is_self_call(&call, "Provide"));
    }

    #[test]
    fn contains_self_call_searches_field_initializers() {
        let class = TypeDeclaration::class("Foo").with_member(FieldDeclaration {
            modifiers: vec![Modifier::Private],
            ty: TypeSyntax::named("Action"),
            identifier: Identifier::synthetic("callback"),
            initializer: Some(Expression::Lambda {
                parameters: vec![],
                body: crate::syntax::LambdaBody::Expression(Box::new(this_call("Provide", vec![]))),
                span: Span::default(),
            }),
            terminator: Terminator::synthetic(),
            span: Span::default(),
        });
        assert!(contains_self_call(&class, "Provide"));
        assert!(!contains_self_call(&class, "Notify"));
    }

    #[test]
    fn contains_self_call_searches_nested_types() {
        let inner = TypeDeclaration::class("Inner")
            .with_member(method_with_body("Setup", vec![expression_statement(this_call("Provide", vec![]))]));
        let outer = TypeDeclaration::class("Outer").with_member(inner);
        assert!(contains_self_call(&outer, "Provide"));
    }

    #[test]
    fn cancellable_search_reports_cancellation() {
        let method = method_with_body("Setup", vec![expression_statement(this_call("Provide", vec![]))]);
        let cancel = CancellationToken::new();
        assert_eq!(contains_self_call_cancellable(&method, "Provide", &cancel), Ok(true));
        assert_eq!(contains_self_call_cancellable(&method, "Notify", &cancel), Ok(false));
        cancel.cancel();
        assert_eq!(
            contains_self_call_cancellable(&method, "Provide", &cancel),
            Err(Cancelled)
        );
    }

    #[test]
    fn find_method_reports_index() {
        let class = TypeDeclaration::class("Foo")
            .with_member(method_with_body("A", vec![]))
            .with_member(method_with_body("Setup", vec![]));
        let (index, method) =
            find_method(&class, |m| m.name() == "Setup" && m.has_modifier(Modifier::Public))
                .expect("Setup");
        assert_eq!(index, 1);
        assert_eq!(method.name(), "Setup");
    }
}
