// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Renders syntax trees back to C# source text.
//!
//! The printer re-formats everything it prints (Allman braces, four-space
//! indentation, one blank line between members), so nodes carrying a
//! [`SyntaxAnnotation::Formatter`](super::tree::SyntaxAnnotation) come out
//! formatted the same as everything else. Comments survive: leading trivia
//! prints on its own lines and trailing trivia stays after its `;`.
//!
//! ```
//! use autoinject_core::syntax::factory::{expression_statement, this_call};
//! use autoinject_core::syntax::printer::print_statement;
//!
//! let statement = expression_statement(this_call("Provide", vec![]));
//! assert_eq!(print_statement(&statement), "this.Provide();");
//! ```

pub mod document;

use ecow::{EcoString, eco_format};

use self::document::{Document, INDENT, break_, concat, group, join, line, nest, nil};
use super::tree::{
    Accessor, AttributeList, Block, CompilationUnit, ConstructorDeclaration, Expression,
    FieldDeclaration, Identifier, LambdaBody, Literal, Member, MethodBody, MethodDeclaration,
    Modifier, Parameter, PropertyBody, PropertyDeclaration, Statement, Terminator, Trivia,
    TypeDeclaration, TypeSyntax,
};
use crate::docvec;

/// Renders a whole compilation unit, ending with a newline.
#[must_use]
pub fn print_unit(unit: &CompilationUnit) -> String {
    let mut sections = Vec::new();
    if !unit.usings.is_empty() {
        sections.push(join(
            unit.usings.iter().map(|using| docvec!["using ", using, ";"]),
            &line(),
        ));
    }
    if let Some(namespace) = &unit.namespace {
        sections.push(docvec!["namespace ", namespace, ";"]);
    }
    sections.extend(unit.types.iter().map(type_declaration));
    let mut text = join(sections, &docvec![line(), line()]).to_pretty_string();
    text.push('\n');
    text
}

/// Renders one type declaration.
#[must_use]
pub fn print_type(ty: &TypeDeclaration) -> String {
    type_declaration(ty).to_pretty_string()
}

/// Renders one member declaration.
#[must_use]
pub fn print_member(member: &Member) -> String {
    member_doc(member).to_pretty_string()
}

#[must_use]
pub fn print_statement(statement: &Statement) -> String {
    statement_doc(statement).to_pretty_string()
}

#[must_use]
pub fn print_expression(expression: &Expression) -> String {
    expression_doc(expression).to_pretty_string()
}

#[must_use]
pub fn print_type_syntax(ty: &TypeSyntax) -> String {
    type_syntax(ty).to_pretty_string()
}

// ── Declarations ──────────────────────────────────────────────────────────────

fn type_declaration(ty: &TypeDeclaration) -> Document<'_> {
    let mut header = vec![modifiers(&ty.modifiers), ty.kind.keyword().into_doc()];
    header.push(docvec![" ", &ty.identifier.name]);
    header.push(type_parameters(&ty.type_parameters));
    if !ty.base_list.is_empty() {
        header.push(docvec![
            " : ",
            join(ty.base_list.iter().map(type_syntax), &Document::Str(", "))
        ]);
    }
    let members = join(ty.members.iter().map(member_doc), &docvec![line(), line()]);
    docvec![
        leading_trivia(&ty.leading_trivia),
        attribute_lists(&ty.attribute_lists),
        concat(header),
        braced(members, ty.members.is_empty()),
    ]
}

fn member_doc(member: &Member) -> Document<'_> {
    match member {
        Member::Method(method) => method_doc(method),
        Member::Constructor(constructor) => constructor_doc(constructor),
        Member::Field(field) => field_doc(field),
        Member::Property(property) => property_doc(property),
        Member::Type(ty) => type_declaration(ty),
    }
}

fn method_doc(method: &MethodDeclaration) -> Document<'_> {
    docvec![
        leading_trivia(&method.leading_trivia),
        attribute_lists(&method.attribute_lists),
        modifiers(&method.modifiers),
        type_syntax(&method.return_type),
        " ",
        &method.identifier.name,
        type_parameters(&method.type_parameters),
        parameters(&method.parameters),
        method_body(&method.body),
    ]
}

fn constructor_doc(constructor: &ConstructorDeclaration) -> Document<'_> {
    docvec![
        modifiers(&constructor.modifiers),
        &constructor.identifier.name,
        parameters(&constructor.parameters),
        method_body(&constructor.body),
    ]
}

fn field_doc(field: &FieldDeclaration) -> Document<'_> {
    docvec![
        modifiers(&field.modifiers),
        type_syntax(&field.ty),
        " ",
        &field.identifier.name,
        initializer(field.initializer.as_ref()),
        terminator(&field.terminator),
    ]
}

fn property_doc(property: &PropertyDeclaration) -> Document<'_> {
    let body = match &property.body {
        PropertyBody::Expression(arrow) => docvec![
            " => ",
            expression_doc(&arrow.expression),
            terminator(&arrow.terminator),
        ],
        PropertyBody::Accessors(accessors) => {
            let auto = accessors
                .iter()
                .all(|accessor| matches!(accessor.body, MethodBody::Absent(_)));
            let accessors_doc = if auto {
                docvec![
                    " { ",
                    join(accessors.iter().map(accessor_doc), &Document::Str(" ")),
                    " }",
                ]
            } else {
                braced(
                    join(accessors.iter().map(accessor_doc), &line()),
                    accessors.is_empty(),
                )
            };
            match &property.initializer {
                Some(value) => docvec![accessors_doc, " = ", expression_doc(value), ";"],
                None => accessors_doc,
            }
        }
    };
    docvec![
        modifiers(&property.modifiers),
        type_syntax(&property.ty),
        " ",
        &property.identifier.name,
        body,
    ]
}

fn accessor_doc(accessor: &Accessor) -> Document<'_> {
    docvec![
        modifiers(&accessor.modifiers),
        accessor.kind.keyword(),
        method_body(&accessor.body),
    ]
}

fn method_body(body: &MethodBody) -> Document<'_> {
    match body {
        MethodBody::Block(block) => braced(statements(block), block.statements.is_empty()),
        MethodBody::Expression(arrow) => docvec![
            " => ",
            expression_doc(&arrow.expression),
            terminator(&arrow.terminator),
        ],
        MethodBody::Absent(semicolon) => terminator(semicolon),
    }
}

fn attribute_lists(lists: &[AttributeList]) -> Document<'_> {
    concat(lists.iter().map(|list| {
        let attributes = list.attributes.iter().map(|attribute| {
            let arguments = match &attribute.arguments {
                None => nil(),
                Some(arguments) => docvec![
                    "(",
                    join(
                        arguments.iter().map(|argument| match &argument.name {
                            Some(name) => {
                                docvec![&name.name, " = ", expression_doc(&argument.expression)]
                            }
                            None => expression_doc(&argument.expression),
                        }),
                        &Document::Str(", "),
                    ),
                    ")",
                ],
            };
            docvec![&attribute.name, arguments]
        });
        docvec!["[", join(attributes, &Document::Str(", ")), "]", line()]
    }))
}

fn modifiers(modifiers: &[Modifier]) -> Document<'static> {
    concat(
        modifiers
            .iter()
            .map(|modifier| docvec![modifier.as_str(), " "]),
    )
}

fn type_parameters(names: &[Identifier]) -> Document<'_> {
    if names.is_empty() {
        return nil();
    }
    docvec![
        "<",
        join(
            names.iter().map(|name| Document::Str(&name.name)),
            &Document::Str(", ")
        ),
        ">",
    ]
}

fn parameters(parameters: &[Parameter]) -> Document<'_> {
    let parameters = parameters.iter().map(|parameter| {
        docvec![
            type_syntax(&parameter.ty),
            " ",
            &parameter.identifier.name,
            initializer(parameter.default.as_ref()),
        ]
    });
    docvec!["(", join(parameters, &Document::Str(", ")), ")"]
}

fn initializer(value: Option<&Expression>) -> Document<'_> {
    match value {
        Some(value) => docvec![" = ", expression_doc(value)],
        None => nil(),
    }
}

// ── Statements ────────────────────────────────────────────────────────────────

fn statements(block: &Block) -> Document<'_> {
    join(block.statements.iter().map(statement_doc), &line())
}

/// `{ ... }` on its own lines, the body indented.
fn braced(body: Document<'_>, empty: bool) -> Document<'_> {
    if empty {
        return docvec![line(), "{", line(), "}"];
    }
    docvec![line(), "{", nest(INDENT, docvec![line(), body]), line(), "}"]
}

fn statement_doc(statement: &Statement) -> Document<'_> {
    match statement {
        Statement::Expression(statement) => docvec![
            expression_doc(&statement.expression),
            terminator(&statement.terminator),
        ],
        Statement::LocalDeclaration {
            ty,
            identifier,
            initializer: value,
            terminator: semicolon,
            ..
        } => docvec![
            type_syntax(ty),
            " ",
            &identifier.name,
            initializer(value.as_ref()),
            terminator(semicolon),
        ],
        Statement::Return {
            value,
            terminator: semicolon,
            ..
        } => match value {
            Some(value) => docvec!["return ", expression_doc(value), terminator(semicolon)],
            None => docvec!["return", terminator(semicolon)],
        },
        Statement::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            let mut doc = docvec!["if (", expression_doc(condition), ")", branch(then_branch)];
            if let Some(otherwise) = else_branch {
                doc = match &**otherwise {
                    nested @ Statement::If { .. } => {
                        docvec![doc, line(), "else ", statement_doc(nested)]
                    }
                    otherwise => docvec![doc, line(), "else", branch(otherwise)],
                };
            }
            doc
        }
        Statement::While {
            condition, body, ..
        } => docvec!["while (", expression_doc(condition), ")", branch(body)],
        Statement::ForEach {
            ty,
            identifier,
            collection,
            body,
            ..
        } => docvec![
            "foreach (",
            type_syntax(ty),
            " ",
            &identifier.name,
            " in ",
            expression_doc(collection),
            ")",
            branch(body),
        ],
        Statement::Block(block) => {
            docvec!["{", nest(INDENT, docvec![line(), statements(block)]), line(), "}"]
        }
        Statement::Empty(semicolon) => terminator(semicolon),
    }
}

/// The body of `if`/`while`/`foreach`: blocks go on their own lines, single
/// statements are indented below the header.
fn branch(statement: &Statement) -> Document<'_> {
    match statement {
        Statement::Block(block) => braced(statements(block), block.statements.is_empty()),
        other => nest(INDENT, docvec![line(), statement_doc(other)]),
    }
}

/// A `;` followed by its trailing comments. A missing terminator prints as
/// nothing.
fn terminator(terminator: &Terminator) -> Document<'_> {
    let semicolon = if terminator.missing { nil() } else { ";".into_doc() };
    docvec![semicolon, trailing_trivia(&terminator.trailing_trivia)]
}

fn trailing_trivia(trivia: &[Trivia]) -> Document<'_> {
    concat(
        trivia
            .iter()
            .filter(|piece| piece.is_comment())
            .map(|comment| docvec![" ", comment_doc(comment)]),
    )
}

fn leading_trivia(trivia: &[Trivia]) -> Document<'_> {
    concat(
        trivia
            .iter()
            .filter(|piece| piece.is_comment())
            .map(|comment| docvec![comment_doc(comment), line()]),
    )
}

fn comment_doc(comment: &Trivia) -> Document<'_> {
    match comment {
        Trivia::LineComment(text) => docvec!["//", text],
        Trivia::BlockComment(text) => docvec!["/*", text, "*/"],
        Trivia::DocComment(text) => docvec!["///", text],
        Trivia::Whitespace(_) | Trivia::EndOfLine => nil(),
    }
}

// ── Expressions ───────────────────────────────────────────────────────────────

fn expression_doc(expression: &Expression) -> Document<'_> {
    match expression {
        Expression::Identifier(identifier) => Document::Str(&identifier.name),
        Expression::Literal(literal, _) => literal_doc(literal),
        Expression::This(_) => "this".into_doc(),
        Expression::Base(_) => "base".into_doc(),
        Expression::MemberAccess {
            target,
            name,
            type_arguments,
            ..
        } => docvec![
            expression_doc(target),
            ".",
            &name.name,
            type_arguments_doc(type_arguments),
        ],
        Expression::Invocation {
            callee, arguments, ..
        } => docvec![expression_doc(callee), arguments_doc(arguments)],
        Expression::TypeOf { ty, .. } => docvec!["typeof(", type_syntax(ty), ")"],
        Expression::Lambda {
            parameters, body, ..
        } => {
            let parameters = match parameters.as_slice() {
                [single] => Document::Str(&single.name),
                many => docvec![
                    "(",
                    join(
                        many.iter().map(|p| Document::Str(&p.name)),
                        &Document::Str(", ")
                    ),
                    ")",
                ],
            };
            let body = match body {
                LambdaBody::Expression(expression) => expression_doc(expression),
                LambdaBody::Block(block) => docvec![
                    "{",
                    nest(INDENT, docvec![line(), statements(block)]),
                    line(),
                    "}",
                ],
            };
            docvec![parameters, " => ", body]
        }
        Expression::Assignment {
            target,
            operator,
            value,
            ..
        } => docvec![
            expression_doc(target),
            " ",
            operator.as_str(),
            " ",
            expression_doc(value),
        ],
        Expression::Binary {
            left,
            operator,
            right,
            ..
        } => docvec![
            expression_doc(left),
            " ",
            operator,
            " ",
            expression_doc(right),
        ],
        Expression::ObjectCreation { ty, arguments, .. } => {
            docvec!["new ", type_syntax(ty), arguments_doc(arguments)]
        }
        Expression::Conditional {
            condition,
            when_true,
            when_false,
            ..
        } => docvec![
            expression_doc(condition),
            " ? ",
            expression_doc(when_true),
            " : ",
            expression_doc(when_false),
        ],
        Expression::Parenthesized { expression, .. } => {
            docvec!["(", expression_doc(expression), ")"]
        }
        Expression::Await { expression, .. } => docvec!["await ", expression_doc(expression)],
    }
}

/// `(a, b)`, wrapped one per line when the call does not fit.
fn arguments_doc(arguments: &[Expression]) -> Document<'_> {
    if arguments.is_empty() {
        return "()".into_doc();
    }
    group(docvec![
        "(",
        nest(
            INDENT,
            docvec![
                break_("", ""),
                join(arguments.iter().map(expression_doc), &break_(",", ", ")),
            ]
        ),
        break_("", ""),
        ")",
    ])
}

fn literal_doc(literal: &Literal) -> Document<'_> {
    match literal {
        Literal::Integer(value) => Document::String(eco_format!("{value}")),
        Literal::Float(text) => Document::Str(text),
        Literal::String(text) => Document::String(eco_format!("\"{}\"", escape(text, '"'))),
        Literal::Char(c) => {
            let mut buffer = [0; 4];
            Document::String(eco_format!("'{}'", escape(c.encode_utf8(&mut buffer), '\'')))
        }
        Literal::Boolean(true) => "true".into_doc(),
        Literal::Boolean(false) => "false".into_doc(),
        Literal::Null => "null".into_doc(),
    }
}

fn escape(text: &str, quote: char) -> EcoString {
    let mut escaped = EcoString::new();
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\0' => escaped.push_str("\\0"),
            c if c == quote => {
                escaped.push('\\');
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

fn type_syntax(ty: &TypeSyntax) -> Document<'_> {
    match ty {
        TypeSyntax::Predefined(predefined) => predefined.keyword().into_doc(),
        TypeSyntax::Named(name) => Document::Str(&name.name),
        TypeSyntax::Generic { name, arguments } => {
            docvec![&name.name, type_arguments_doc(arguments)]
        }
        TypeSyntax::Qualified { left, right } => {
            docvec![type_syntax(left), ".", type_syntax(right)]
        }
        TypeSyntax::Array(element) => docvec![type_syntax(element), "[]"],
        TypeSyntax::Nullable(inner) => docvec![type_syntax(inner), "?"],
    }
}

fn type_arguments_doc(arguments: &[TypeSyntax]) -> Document<'_> {
    if arguments.is_empty() {
        return nil();
    }
    docvec![
        "<",
        join(arguments.iter().map(type_syntax), &Document::Str(", ")),
        ">",
    ]
}

trait IntoDoc<'a> {
    fn into_doc(self) -> Document<'a>;
}

impl<'a> IntoDoc<'a> for &'a str {
    fn into_doc(self) -> Document<'a> {
        Document::Str(self)
    }
}
