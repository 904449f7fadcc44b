// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Syntax tree definitions for C#-shaped source declarations.
//!
//! The host parses source files and hands the analyzers a [`CompilationUnit`].
//! This module only describes the shape of that tree; it never parses files.
//!
//! # Design Philosophy
//!
//! - **Closed variants** - Declarations, statements, expressions and types are
//!   enums, so every traversal and every edit is an exhaustive `match`.
//! - **All nodes have spans** - Diagnostics point at spans, and fixers find
//!   their targets again by position.
//! - **Trivia on terminators** - Comments that trail a `;` stay attached to it,
//!   so edits that move a statement keep its comment.
//! - **Immutable by convention** - Edits clone the path to a node and return a
//!   new tree; a tree handed out by the host is never changed.
//!
//! # Example
//!
//! ```ignore
//! // Source: [Meta(typeof(IAutoNode))] public partial class Foo : Node { }
//! TypeDeclaration {
//!     kind: TypeKind::Class,
//!     attribute_lists: vec![AttributeList { attributes: vec![Attribute {
//!         name: "Meta".into(),
//!         arguments: Some(vec![AttributeArgument {
//!             expression: Expression::TypeOf { ty: TypeSyntax::named("IAutoNode"), .. },
//!             ..
//!         }]),
//!         ..
//!     }], .. }],
//!     modifiers: vec![Modifier::Public, Modifier::Partial],
//!     identifier: Identifier { name: "Foo".into(), .. },
//!     base_list: vec![TypeSyntax::named("Node")],
//!     members: vec![],
//!     ..
//! }
//! ```

use ecow::EcoString;
use serde::{Deserialize, Serialize};

use super::Span;

// ── Trivia and annotations ────────────────────────────────────────────────────

/// Non-semantic source content attached to a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trivia {
    /// Spaces and tabs.
    Whitespace(EcoString),
    /// A line break.
    EndOfLine,
    /// A line comment; the text excludes the leading `//`.
    LineComment(EcoString),
    /// A block comment; the text excludes `/*` and `*/`.
    BlockComment(EcoString),
    /// A doc comment; the text excludes the leading `///`.
    DocComment(EcoString),
}

impl Trivia {
    /// Returns `true` for the comment variants.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(
            self,
            Self::LineComment(_) | Self::BlockComment(_) | Self::DocComment(_)
        )
    }
}

/// A marker asking the host to post-process a synthesized node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxAnnotation {
    /// Re-run the host's formatter over this node.
    Formatter,
    /// Let the host simplify names inside this node.
    Simplifier,
}

/// Adds `annotation` to `annotations` unless it is already present.
pub(crate) fn annotate(annotations: &mut Vec<SyntaxAnnotation>, annotation: SyntaxAnnotation) {
    if !annotations.contains(&annotation) {
        annotations.push(annotation);
    }
}

/// A name together with its location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    /// The identifier text.
    pub name: EcoString,
    /// Source location of the identifier.
    #[serde(default)]
    pub span: Span,
}

impl Identifier {
    /// Creates an identifier at the given location.
    #[must_use]
    pub fn new(name: impl Into<EcoString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Creates an identifier with no source location.
    #[must_use]
    pub fn synthetic(name: impl Into<EcoString>) -> Self {
        Self::new(name, Span::default())
    }
}

// ── Declarations ──────────────────────────────────────────────────────────────

/// The root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// `using` directives, as written.
    #[serde(default)]
    pub usings: Vec<EcoString>,
    /// File-scoped or block namespace, if any.
    #[serde(default)]
    pub namespace: Option<EcoString>,
    /// Top-level type declarations in source order.
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    /// Source location spanning the entire file.
    #[serde(default)]
    pub span: Span,
}

impl CompilationUnit {
    /// Creates a compilation unit holding `types`.
    #[must_use]
    pub fn new(types: Vec<TypeDeclaration>, span: Span) -> Self {
        Self {
            usings: Vec::new(),
            namespace: None,
            types,
            span,
        }
    }
}

/// The flavour of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Record,
    Interface,
}

impl TypeKind {
    /// Returns the declaring keyword.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Record => "record",
            Self::Interface => "interface",
        }
    }
}

/// A class, struct, record or interface declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    /// Attribute lists in source order (`[A, B] [C]` is two lists).
    #[serde(default)]
    pub attribute_lists: Vec<AttributeList>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub identifier: Identifier,
    #[serde(default)]
    pub type_parameters: Vec<Identifier>,
    /// Base class and implemented interfaces, as written.
    #[serde(default)]
    pub base_list: Vec<TypeSyntax>,
    /// Members in declaration order.
    #[serde(default)]
    pub members: Vec<Member>,
    /// Comments preceding the declaration.
    #[serde(default)]
    pub leading_trivia: Vec<Trivia>,
    /// Covers the attribute lists through the closing brace.
    #[serde(default)]
    pub span: Span,
}

impl TypeDeclaration {
    /// Creates an empty type declaration with no source location.
    #[must_use]
    pub fn new(kind: TypeKind, name: impl Into<EcoString>) -> Self {
        Self {
            kind,
            attribute_lists: Vec::new(),
            modifiers: Vec::new(),
            identifier: Identifier::synthetic(name),
            type_parameters: Vec::new(),
            base_list: Vec::new(),
            members: Vec::new(),
            leading_trivia: Vec::new(),
            span: Span::default(),
        }
    }

    /// Creates an empty class declaration.
    #[must_use]
    pub fn class(name: impl Into<EcoString>) -> Self {
        Self::new(TypeKind::Class, name)
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_identifier_span(mut self, span: Span) -> Self {
        self.identifier.span = span;
        self
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_attribute_list(mut self, list: AttributeList) -> Self {
        self.attribute_lists.push(list);
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: TypeSyntax) -> Self {
        self.base_list.push(base);
        self
    }

    /// Appends `member` after the existing members.
    #[must_use]
    pub fn with_member(mut self, member: impl Into<Member>) -> Self {
        self.members.push(member.into());
        self
    }

    /// Replaces the whole member list.
    #[must_use]
    pub fn with_members(mut self, members: Vec<Member>) -> Self {
        self.members = members;
        self
    }

    /// Returns `true` for `class` declarations.
    #[must_use]
    pub const fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class)
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.identifier.name
    }

    /// Iterates every attribute of every attribute list, in source order.
    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attribute_lists
            .iter()
            .flat_map(|list| list.attributes.iter())
    }

    /// Iterates the method members together with their member index.
    pub fn methods(&self) -> impl Iterator<Item = (usize, &MethodDeclaration)> {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(index, member)| member.as_method().map(|method| (index, method)))
    }

    /// Iterates nested type declarations.
    pub fn nested_types(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.members.iter().filter_map(Member::as_type)
    }
}

/// One bracketed attribute list: `[Meta(typeof(IAutoNode)), Tool]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeList {
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub span: Span,
}

impl AttributeList {
    #[must_use]
    pub fn new(attributes: Vec<Attribute>, span: Span) -> Self {
        Self { attributes, span }
    }
}

/// A single attribute application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute name as written, possibly qualified (`Chickensoft.Meta`).
    pub name: EcoString,
    /// `None` when written without parentheses (`[Tool]`).
    #[serde(default)]
    pub arguments: Option<Vec<AttributeArgument>>,
    #[serde(default)]
    pub span: Span,
}

impl Attribute {
    #[must_use]
    pub fn new(name: impl Into<EcoString>, arguments: Option<Vec<AttributeArgument>>, span: Span) -> Self {
        Self {
            name: name.into(),
            arguments,
            span,
        }
    }
}

/// An attribute argument, optionally named (`Name = "x"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeArgument {
    #[serde(default)]
    pub name: Option<Identifier>,
    pub expression: Expression,
}

impl AttributeArgument {
    /// Creates a positional argument.
    #[must_use]
    pub fn positional(expression: Expression) -> Self {
        Self {
            name: None,
            expression,
        }
    }
}

/// A declaration modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Abstract,
    Virtual,
    Override,
    Sealed,
    Partial,
    Async,
    Readonly,
    New,
    Extern,
}

impl Modifier {
    /// Returns the keyword text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Static => "static",
            Self::Abstract => "abstract",
            Self::Virtual => "virtual",
            Self::Override => "override",
            Self::Sealed => "sealed",
            Self::Partial => "partial",
            Self::Async => "async",
            Self::Readonly => "readonly",
            Self::New => "new",
            Self::Extern => "extern",
        }
    }
}

impl std::fmt::Display for Modifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A member of a type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Method(MethodDeclaration),
    Constructor(ConstructorDeclaration),
    Field(FieldDeclaration),
    Property(PropertyDeclaration),
    Type(TypeDeclaration),
}

impl Member {
    /// Returns the span of this member.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Method(m) => m.span,
            Self::Constructor(c) => c.span,
            Self::Field(f) => f.span,
            Self::Property(p) => p.span,
            Self::Type(t) => t.span,
        }
    }

    #[must_use]
    pub const fn as_method(&self) -> Option<&MethodDeclaration> {
        match self {
            Self::Method(method) => Some(method),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_type(&self) -> Option<&TypeDeclaration> {
        match self {
            Self::Type(ty) => Some(ty),
            _ => None,
        }
    }
}

impl From<MethodDeclaration> for Member {
    fn from(method: MethodDeclaration) -> Self {
        Self::Method(method)
    }
}

impl From<TypeDeclaration> for Member {
    fn from(ty: TypeDeclaration) -> Self {
        Self::Type(ty)
    }
}

impl From<FieldDeclaration> for Member {
    fn from(field: FieldDeclaration) -> Self {
        Self::Field(field)
    }
}

impl From<PropertyDeclaration> for Member {
    fn from(property: PropertyDeclaration) -> Self {
        Self::Property(property)
    }
}

impl From<ConstructorDeclaration> for Member {
    fn from(constructor: ConstructorDeclaration) -> Self {
        Self::Constructor(constructor)
    }
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    #[serde(default)]
    pub attribute_lists: Vec<AttributeList>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub return_type: TypeSyntax,
    pub identifier: Identifier,
    #[serde(default)]
    pub type_parameters: Vec<Identifier>,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub body: MethodBody,
    /// Post-processing requests for the host.
    #[serde(default)]
    pub annotations: Vec<SyntaxAnnotation>,
    #[serde(default)]
    pub leading_trivia: Vec<Trivia>,
    #[serde(default)]
    pub span: Span,
}

impl MethodDeclaration {
    /// Creates a parameterless method with an absent body and no location.
    #[must_use]
    pub fn new(return_type: TypeSyntax, name: impl Into<EcoString>) -> Self {
        Self {
            attribute_lists: Vec::new(),
            modifiers: Vec::new(),
            return_type,
            identifier: Identifier::synthetic(name),
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            body: MethodBody::Absent(Terminator::synthetic()),
            annotations: Vec::new(),
            leading_trivia: Vec::new(),
            span: Span::default(),
        }
    }

    #[must_use]
    pub fn with_modifiers(mut self, modifiers: impl IntoIterator<Item = Modifier>) -> Self {
        self.modifiers = modifiers.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: MethodBody) -> Self {
        self.body = body;
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    #[must_use]
    pub fn with_identifier_span(mut self, span: Span) -> Self {
        self.identifier.span = span;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: SyntaxAnnotation) -> Self {
        annotate(&mut self.annotations, annotation);
        self
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.identifier.name
    }

    /// Returns `true` if `modifier` appears in the modifier list.
    #[must_use]
    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub ty: TypeSyntax,
    pub identifier: Identifier,
    #[serde(default)]
    pub default: Option<Expression>,
    #[serde(default)]
    pub span: Span,
}

impl Parameter {
    /// Creates a parameter with no default value and no location.
    #[must_use]
    pub fn new(ty: TypeSyntax, name: impl Into<EcoString>) -> Self {
        Self {
            ty,
            identifier: Identifier::synthetic(name),
            default: None,
            span: Span::default(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.identifier.name
    }
}

/// The body of a method, constructor or accessor.
///
/// Exactly one shape holds at a time; editors must go through a `match`
/// to change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodBody {
    /// `{ statements }`
    Block(Block),
    /// `=> expression;`
    Expression(ArrowBody),
    /// A declaration with no body: `abstract void Foo();`
    Absent(Terminator),
}

/// An expression body together with its terminating `;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrowBody {
    pub expression: Expression,
    pub terminator: Terminator,
    #[serde(default)]
    pub annotations: Vec<SyntaxAnnotation>,
}

impl ArrowBody {
    #[must_use]
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            terminator: Terminator::synthetic(),
            annotations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: SyntaxAnnotation) -> Self {
        annotate(&mut self.annotations, annotation);
        self
    }
}

/// A `;` token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Terminator {
    #[serde(default)]
    pub span: Span,
    /// Set when the parser recovered from a missing `;`.
    #[serde(default)]
    pub missing: bool,
    /// Comments and line breaks after the `;`.
    #[serde(default)]
    pub trailing_trivia: Vec<Trivia>,
}

impl Terminator {
    /// A present terminator with no location and no trivia.
    #[must_use]
    pub fn synthetic() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trailing_trivia(mut self, trivia: Vec<Trivia>) -> Self {
        self.trailing_trivia = trivia;
        self
    }
}

/// A constructor declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub identifier: Identifier,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    pub body: MethodBody,
    #[serde(default)]
    pub span: Span,
}

/// A field declaration with a single declarator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub ty: TypeSyntax,
    pub identifier: Identifier,
    #[serde(default)]
    pub initializer: Option<Expression>,
    #[serde(default)]
    pub terminator: Terminator,
    #[serde(default)]
    pub span: Span,
}

/// A property declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDeclaration {
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub ty: TypeSyntax,
    pub identifier: Identifier,
    pub body: PropertyBody,
    #[serde(default)]
    pub initializer: Option<Expression>,
    #[serde(default)]
    pub span: Span,
}

/// Accessor list or expression body of a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyBody {
    Accessors(Vec<Accessor>),
    Expression(ArrowBody),
}

/// A `get`, `set` or `init` accessor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accessor {
    pub kind: AccessorKind,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    pub body: MethodBody,
    #[serde(default)]
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

impl AccessorKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Init => "init",
        }
    }
}

// ── Statements ────────────────────────────────────────────────────────────────

/// A `{ ... }` statement block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Statement>,
    #[serde(default)]
    pub span: Span,
}

impl Block {
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            statements,
            span: Span::default(),
        }
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// `expression;`
    Expression(ExpressionStatement),

    /// `Type name = initializer;`
    LocalDeclaration {
        ty: TypeSyntax,
        identifier: Identifier,
        #[serde(default)]
        initializer: Option<Expression>,
        #[serde(default)]
        terminator: Terminator,
        #[serde(default)]
        span: Span,
    },

    /// `return value;`
    Return {
        #[serde(default)]
        value: Option<Expression>,
        #[serde(default)]
        terminator: Terminator,
        #[serde(default)]
        span: Span,
    },

    /// `if (condition) then else otherwise`
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        #[serde(default)]
        else_branch: Option<Box<Statement>>,
        #[serde(default)]
        span: Span,
    },

    /// `while (condition) body`
    While {
        condition: Expression,
        body: Box<Statement>,
        #[serde(default)]
        span: Span,
    },

    /// `foreach (Type name in collection) body`
    ForEach {
        ty: TypeSyntax,
        identifier: Identifier,
        collection: Expression,
        body: Box<Statement>,
        #[serde(default)]
        span: Span,
    },

    /// A nested block.
    Block(Block),

    /// A lone `;`.
    Empty(Terminator),
}

impl Statement {
    /// Returns the span of this statement.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Expression(statement) => statement.span,
            Self::LocalDeclaration { span, .. }
            | Self::Return { span, .. }
            | Self::If { span, .. }
            | Self::While { span, .. }
            | Self::ForEach { span, .. } => *span,
            Self::Block(block) => block.span,
            Self::Empty(terminator) => terminator.span,
        }
    }

    /// Returns the terminating `;` if this statement kind has one.
    #[must_use]
    pub const fn terminator(&self) -> Option<&Terminator> {
        match self {
            Self::Expression(ExpressionStatement { terminator, .. })
            | Self::LocalDeclaration { terminator, .. }
            | Self::Return { terminator, .. }
            | Self::Empty(terminator) => Some(terminator),
            Self::If { .. } | Self::While { .. } | Self::ForEach { .. } | Self::Block(_) => None,
        }
    }
}

impl From<ExpressionStatement> for Statement {
    fn from(statement: ExpressionStatement) -> Self {
        Self::Expression(statement)
    }
}

/// An expression evaluated for its side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
    #[serde(default)]
    pub terminator: Terminator,
    #[serde(default)]
    pub annotations: Vec<SyntaxAnnotation>,
    #[serde(default)]
    pub span: Span,
}

impl ExpressionStatement {
    /// Wraps `expression` with a fresh `;`.
    #[must_use]
    pub fn new(expression: Expression) -> Self {
        Self {
            expression,
            terminator: Terminator::synthetic(),
            annotations: Vec::new(),
            span: Span::default(),
        }
    }

    #[must_use]
    pub fn with_terminator(mut self, terminator: Terminator) -> Self {
        self.terminator = terminator;
        self
    }

    #[must_use]
    pub fn with_annotation(mut self, annotation: SyntaxAnnotation) -> Self {
        annotate(&mut self.annotations, annotation);
        self
    }
}

// ── Expressions ───────────────────────────────────────────────────────────────

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    /// A simple name: `what`, `Node`.
    Identifier(Identifier),

    /// A literal value.
    Literal(Literal, Span),

    /// The implicit receiver `this`.
    This(Span),

    /// The base-class receiver `base`.
    Base(Span),

    /// `target.name` or `target.name<T>`.
    MemberAccess {
        target: Box<Expression>,
        name: Identifier,
        #[serde(default)]
        type_arguments: Vec<TypeSyntax>,
        #[serde(default)]
        span: Span,
    },

    /// `callee(arguments)`
    Invocation {
        callee: Box<Expression>,
        #[serde(default)]
        arguments: Vec<Expression>,
        #[serde(default)]
        span: Span,
    },

    /// `typeof(Type)`
    TypeOf {
        ty: TypeSyntax,
        #[serde(default)]
        span: Span,
    },

    /// `(a, b) => body`
    Lambda {
        #[serde(default)]
        parameters: Vec<Identifier>,
        body: LambdaBody,
        #[serde(default)]
        span: Span,
    },

    /// `target = value`, `target += value`, `target -= value`
    Assignment {
        target: Box<Expression>,
        operator: AssignmentOperator,
        value: Box<Expression>,
        #[serde(default)]
        span: Span,
    },

    /// `left op right`
    Binary {
        left: Box<Expression>,
        operator: EcoString,
        right: Box<Expression>,
        #[serde(default)]
        span: Span,
    },

    /// `new Type(arguments)`
    ObjectCreation {
        ty: TypeSyntax,
        #[serde(default)]
        arguments: Vec<Expression>,
        #[serde(default)]
        span: Span,
    },

    /// `condition ? when_true : when_false`
    Conditional {
        condition: Box<Expression>,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
        #[serde(default)]
        span: Span,
    },

    /// `(expression)`
    Parenthesized {
        expression: Box<Expression>,
        #[serde(default)]
        span: Span,
    },

    /// `await expression`
    Await {
        expression: Box<Expression>,
        #[serde(default)]
        span: Span,
    },
}

impl Expression {
    /// Returns the span of this expression.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Identifier(id) => id.span,
            Self::Literal(_, span) | Self::This(span) | Self::Base(span) => *span,
            Self::MemberAccess { span, .. }
            | Self::Invocation { span, .. }
            | Self::TypeOf { span, .. }
            | Self::Lambda { span, .. }
            | Self::Assignment { span, .. }
            | Self::Binary { span, .. }
            | Self::ObjectCreation { span, .. }
            | Self::Conditional { span, .. }
            | Self::Parenthesized { span, .. }
            | Self::Await { span, .. } => *span,
        }
    }
}

/// The body of a lambda.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LambdaBody {
    Expression(Box<Expression>),
    Block(Block),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentOperator {
    Assign,
    AddAssign,
    SubtractAssign,
}

impl AssignmentOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::AddAssign => "+=",
            Self::SubtractAssign => "-=",
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Integer(i64),
    /// Floating-point literals keep their source text.
    Float(EcoString),
    String(EcoString),
    Char(char),
    Boolean(bool),
    Null,
}

// ── Types ─────────────────────────────────────────────────────────────────────

/// A type reference as written in source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeSyntax {
    /// A keyword type: `int`, `void`, ...
    Predefined(PredefinedType),
    /// A simple name: `Node`.
    Named(Identifier),
    /// A generic name: `IProvide<int>`.
    Generic {
        name: Identifier,
        arguments: Vec<TypeSyntax>,
    },
    /// A dotted name: `Godot.Node`.
    Qualified {
        left: Box<TypeSyntax>,
        right: Box<TypeSyntax>,
    },
    /// `T[]`
    Array(Box<TypeSyntax>),
    /// `T?`
    Nullable(Box<TypeSyntax>),
}

impl TypeSyntax {
    /// A simple named type with no location.
    #[must_use]
    pub fn named(name: impl Into<EcoString>) -> Self {
        Self::Named(Identifier::synthetic(name))
    }

    /// A generic type with no location.
    #[must_use]
    pub fn generic(name: impl Into<EcoString>, arguments: Vec<TypeSyntax>) -> Self {
        Self::Generic {
            name: Identifier::synthetic(name),
            arguments,
        }
    }

    /// Returns the rightmost simple name (`Node` for `Godot.Node`,
    /// `IProvide` for `IProvide<int>`). Keyword, array and nullable types
    /// have none.
    #[must_use]
    pub fn simple_name(&self) -> Option<&str> {
        match self {
            Self::Named(id) | Self::Generic { name: id, .. } => Some(&id.name),
            Self::Qualified { right, .. } => right.simple_name(),
            Self::Predefined(_) | Self::Array(_) | Self::Nullable(_) => None,
        }
    }

    /// Returns the number of generic type arguments on the rightmost name.
    #[must_use]
    pub fn arity(&self) -> usize {
        match self {
            Self::Generic { arguments, .. } => arguments.len(),
            Self::Qualified { right, .. } => right.arity(),
            Self::Predefined(_) | Self::Named(_) | Self::Array(_) | Self::Nullable(_) => 0,
        }
    }

    /// Returns `true` if this is the keyword type `predefined`.
    #[must_use]
    pub fn is_predefined(&self, predefined: PredefinedType) -> bool {
        matches!(self, Self::Predefined(p) if *p == predefined)
    }
}

/// Keyword types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredefinedType {
    Void,
    Bool,
    Byte,
    Char,
    Int,
    Long,
    Float,
    Double,
    String,
    Object,
}

impl PredefinedType {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Object => "object",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_walks_qualified_and_generic_names() {
        let qualified = TypeSyntax::Qualified {
            left: Box::new(TypeSyntax::named("Chickensoft")),
            right: Box::new(TypeSyntax::generic(
                "IProvide",
                vec![TypeSyntax::Predefined(PredefinedType::Int)],
            )),
        };
        assert_eq!(qualified.simple_name(), Some("IProvide"));
        assert_eq!(qualified.arity(), 1);
        assert_eq!(TypeSyntax::Predefined(PredefinedType::Int).simple_name(), None);
    }

    #[test]
    fn methods_reports_member_indices() {
        let ty = TypeDeclaration::class("Foo")
            .with_member(FieldDeclaration {
                modifiers: vec![Modifier::Private],
                ty: TypeSyntax::Predefined(PredefinedType::Int),
                identifier: Identifier::synthetic("count"),
                initializer: None,
                terminator: Terminator::synthetic(),
                span: Span::default(),
            })
            .with_member(MethodDeclaration::new(
                TypeSyntax::Predefined(PredefinedType::Void),
                "Setup",
            ));
        let methods: Vec<_> = ty.methods().map(|(i, m)| (i, m.name().to_string())).collect();
        assert_eq!(methods, vec![(1, "Setup".to_string())]);
    }

    #[test]
    fn annotations_are_not_duplicated() {
        let method = MethodDeclaration::new(TypeSyntax::Predefined(PredefinedType::Void), "A")
            .with_annotation(SyntaxAnnotation::Formatter)
            .with_annotation(SyntaxAnnotation::Formatter);
        assert_eq!(method.annotations, vec![SyntaxAnnotation::Formatter]);
    }

    #[test]
    fn statement_terminator_only_for_semicolon_statements() {
        let stmt = Statement::Block(Block::default());
        assert!(stmt.terminator().is_none());
        let stmt = Statement::Return {
            value: None,
            terminator: Terminator::synthetic(),
            span: Span::default(),
        };
        assert!(stmt.terminator().is_some());
    }

    #[test]
    fn tree_deserializes_with_defaults() {
        let json = r#"{
            "kind": "class",
            "identifier": { "name": "Foo" },
            "members": [
                { "method": {
                    "return_type": { "predefined": "void" },
                    "identifier": { "name": "Setup" },
                    "modifiers": ["public"],
                    "body": { "block": { "statements": [] } }
                } }
            ]
        }"#;
        let ty: TypeDeclaration = serde_json::from_str(json).expect("valid type JSON");
        assert_eq!(ty.name(), "Foo");
        let (_, setup) = ty.methods().next().expect("one method");
        assert!(setup.has_modifier(Modifier::Public));
        assert!(matches!(setup.body, MethodBody::Block(_)));
    }
}
