// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Shared syntax walker for queries and analyzers.
//!
//! Provides a pre-order walk over every expression reachable from a node,
//! with early exit: the visitor returns [`ControlFlow::Break`] to stop the
//! walk, which is how "found it" and "cancelled" both short-circuit.
//!
//! - [`Walk`]: implemented by every node kind that can contain expressions.
//! - [`walk_expression`]: the recursive expression walk.
//! - [`class_declarations`]: every `class` in a compilation unit, nested
//!   classes included, in source order.
//!
//! Every variant of every node enum is matched exhaustively, so adding a node
//! kind fails to compile until the walker learns about it.

use std::ops::ControlFlow;

use super::tree::{
    Accessor, AttributeList, Block, CompilationUnit, Expression, LambdaBody, Member,
    MethodBody, MethodDeclaration, Parameter, PropertyBody, Statement, TypeDeclaration,
};

/// A node whose descendant expressions can be walked.
pub trait Walk {
    /// Calls `f` on every descendant expression in pre-order until `f`
    /// breaks.
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>;
}

impl Walk for CompilationUnit {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        for ty in &self.types {
            ty.walk(f)?;
        }
        ControlFlow::Continue(())
    }
}

impl Walk for TypeDeclaration {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        walk_attribute_lists(&self.attribute_lists, f)?;
        for member in &self.members {
            member.walk(f)?;
        }
        ControlFlow::Continue(())
    }
}

impl Walk for Member {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        match self {
            Member::Method(method) => method.walk(f),
            Member::Constructor(constructor) => {
                walk_parameters(&constructor.parameters, f)?;
                constructor.body.walk(f)
            }
            Member::Field(field) => match &field.initializer {
                Some(initializer) => walk_expression(initializer, f),
                None => ControlFlow::Continue(()),
            },
            Member::Property(property) => {
                match &property.body {
                    PropertyBody::Accessors(accessors) => {
                        for accessor in accessors {
                            accessor.walk(f)?;
                        }
                    }
                    PropertyBody::Expression(arrow) => walk_expression(&arrow.expression, f)?,
                }
                match &property.initializer {
                    Some(initializer) => walk_expression(initializer, f),
                    None => ControlFlow::Continue(()),
                }
            }
            Member::Type(ty) => ty.walk(f),
        }
    }
}

impl Walk for MethodDeclaration {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        walk_attribute_lists(&self.attribute_lists, f)?;
        walk_parameters(&self.parameters, f)?;
        self.body.walk(f)
    }
}

impl Walk for Accessor {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        self.body.walk(f)
    }
}

impl Walk for MethodBody {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        match self {
            MethodBody::Block(block) => block.walk(f),
            MethodBody::Expression(arrow) => walk_expression(&arrow.expression, f),
            MethodBody::Absent(_) => ControlFlow::Continue(()),
        }
    }
}

impl Walk for Block {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        for statement in &self.statements {
            statement.walk(f)?;
        }
        ControlFlow::Continue(())
    }
}

impl Walk for Statement {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        match self {
            Statement::Expression(statement) => walk_expression(&statement.expression, f),
            Statement::LocalDeclaration { initializer, .. } => match initializer {
                Some(initializer) => walk_expression(initializer, f),
                None => ControlFlow::Continue(()),
            },
            Statement::Return { value, .. } => match value {
                Some(value) => walk_expression(value, f),
                None => ControlFlow::Continue(()),
            },
            Statement::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                walk_expression(condition, f)?;
                then_branch.walk(f)?;
                match else_branch {
                    Some(otherwise) => otherwise.walk(f),
                    None => ControlFlow::Continue(()),
                }
            }
            Statement::While {
                condition, body, ..
            } => {
                walk_expression(condition, f)?;
                body.walk(f)
            }
            Statement::ForEach {
                collection, body, ..
            } => {
                walk_expression(collection, f)?;
                body.walk(f)
            }
            Statement::Block(block) => block.walk(f),
            Statement::Empty(_) => ControlFlow::Continue(()),
        }
    }
}

impl Walk for Expression {
    fn walk<B, F>(&self, f: &mut F) -> ControlFlow<B>
    where
        F: FnMut(&Expression) -> ControlFlow<B>,
    {
        walk_expression(self, f)
    }
}

fn walk_attribute_lists<B, F>(lists: &[AttributeList], f: &mut F) -> ControlFlow<B>
where
    F: FnMut(&Expression) -> ControlFlow<B>,
{
    for attribute in lists.iter().flat_map(|list| list.attributes.iter()) {
        for argument in attribute.arguments.iter().flatten() {
            walk_expression(&argument.expression, f)?;
        }
    }
    ControlFlow::Continue(())
}

fn walk_parameters<B, F>(parameters: &[Parameter], f: &mut F) -> ControlFlow<B>
where
    F: FnMut(&Expression) -> ControlFlow<B>,
{
    for default in parameters.iter().filter_map(|p| p.default.as_ref()) {
        walk_expression(default, f)?;
    }
    ControlFlow::Continue(())
}

/// Recursively walks an expression tree in pre-order, calling `f` on every
/// node before its children. Stops as soon as `f` breaks.
pub fn walk_expression<B, F>(expr: &Expression, f: &mut F) -> ControlFlow<B>
where
    F: FnMut(&Expression) -> ControlFlow<B>,
{
    f(expr)?;
    match expr {
        Expression::MemberAccess { target, .. } => walk_expression(target, f),
        Expression::Invocation {
            callee, arguments, ..
        } => {
            walk_expression(callee, f)?;
            for argument in arguments {
                walk_expression(argument, f)?;
            }
            ControlFlow::Continue(())
        }
        Expression::ObjectCreation { arguments, .. } => {
            for argument in arguments {
                walk_expression(argument, f)?;
            }
            ControlFlow::Continue(())
        }
        Expression::Lambda { body, .. } => match body {
            LambdaBody::Expression(expression) => walk_expression(expression, f),
            LambdaBody::Block(block) => block.walk(f),
        },
        Expression::Assignment { target, value, .. } => {
            walk_expression(target, f)?;
            walk_expression(value, f)
        }
        Expression::Binary { left, right, .. } => {
            walk_expression(left, f)?;
            walk_expression(right, f)
        }
        Expression::Conditional {
            condition,
            when_true,
            when_false,
            ..
        } => {
            walk_expression(condition, f)?;
            walk_expression(when_true, f)?;
            walk_expression(when_false, f)
        }
        Expression::Parenthesized { expression, .. } | Expression::Await { expression, .. } => {
            walk_expression(expression, f)
        }
        // Leaf nodes.
        Expression::Identifier(_)
        | Expression::Literal(..)
        | Expression::This(_)
        | Expression::Base(_)
        | Expression::TypeOf { .. } => ControlFlow::Continue(()),
    }
}

/// Returns every `class` declaration in `unit`, nested classes included,
/// in source (pre-order) order.
#[must_use]
pub fn class_declarations(unit: &CompilationUnit) -> Vec<&TypeDeclaration> {
    fn collect<'a>(ty: &'a TypeDeclaration, out: &mut Vec<&'a TypeDeclaration>) {
        if ty.is_class() {
            out.push(ty);
        }
        for nested in ty.nested_types() {
            collect(nested, out);
        }
    }

    let mut out = Vec::new();
    for ty in &unit.types {
        collect(ty, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::factory::{expression_statement, identifier, this_call};
    use crate::syntax::tree::{ExpressionStatement, TypeKind};

    fn count(node: &impl Walk) -> usize {
        let mut n = 0;
        let _ = node.walk(&mut |_: &Expression| -> ControlFlow<()> {
            n += 1;
            ControlFlow::Continue(())
        });
        n
    }

    #[test]
    fn walk_visits_callee_and_arguments() {
        // this.Notify(what) → Invocation, MemberAccess, This, Identifier
        let expr = this_call("Notify", vec![identifier("what")]);
        assert_eq!(count(&expr), 4);
    }

    #[test]
    fn walk_stops_on_break() {
        let block = Block::new(vec![
            expression_statement(this_call("A", vec![])),
            expression_statement(this_call("B", vec![])),
        ]);
        let mut seen = 0;
        let result = block.walk(&mut |_: &Expression| {
            seen += 1;
            ControlFlow::Break(())
        });
        assert_eq!(result, ControlFlow::Break(()));
        assert_eq!(seen, 1);
    }

    #[test]
    fn walk_enters_lambda_blocks() {
        let lambda = Expression::Lambda {
            parameters: vec![],
            body: LambdaBody::Block(Block::new(vec![Statement::Expression(
                ExpressionStatement::new(this_call("Provide", vec![])),
            )])),
            span: crate::syntax::Span::default(),
        };
        // Lambda, Invocation, MemberAccess, This
        assert_eq!(count(&lambda), 4);
    }

    #[test]
    fn class_declarations_include_nested_classes_only() {
        let inner = TypeDeclaration::class("Inner");
        let record = TypeDeclaration::new(TypeKind::Record, "Data");
        let outer = TypeDeclaration::class("Outer")
            .with_member(inner)
            .with_member(record);
        let unit = CompilationUnit::new(vec![outer], crate::syntax::Span::default());
        let names: Vec<_> = class_declarations(&unit).iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["Outer", "Inner"]);
    }
}
