// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Parser for single-statement source templates.
//!
//! Fixes synthesize some bodies from fixed template text such as
//! `this.Provide();`. This is not a C# parser: it understands exactly the
//! statement shapes templates use, which is one expression statement built
//! from names, literals, `this`/`base`, member access, calls, `new`,
//! `typeof`, parentheses and simple assignment, optionally followed by a
//! line comment.
//!
//! ```
//! use autoinject_core::syntax::template::parse_statement;
//!
//! let statement = parse_statement("this.Provide();").unwrap();
//! assert!(statement.terminator().is_some());
//! ```

use std::iter::Peekable;
use std::str::CharIndices;

use ecow::EcoString;

use super::Span;
use super::tree::{
    AssignmentOperator, Expression, ExpressionStatement, Identifier, Literal, PredefinedType,
    Statement, Terminator, Trivia, TypeSyntax,
};

/// A failure to parse a statement template.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum TemplateError {
    #[error("unexpected character `{found}` in statement template")]
    #[diagnostic(code(autoinject::template::character))]
    UnexpectedCharacter {
        found: char,
        #[label("not valid here")]
        span: Span,
    },

    #[error("unterminated string literal in statement template")]
    #[diagnostic(code(autoinject::template::string))]
    UnterminatedString {
        #[label("string starts here")]
        span: Span,
    },

    #[error("expected {expected} in statement template, found `{found}`")]
    #[diagnostic(code(autoinject::template::token))]
    UnexpectedToken {
        expected: &'static str,
        found: EcoString,
        #[label("unexpected")]
        span: Span,
    },

    #[error("statement template ended early, expected {expected}")]
    #[diagnostic(code(autoinject::template::eof))]
    UnexpectedEnd { expected: &'static str },

    #[error("statement template has trailing input after the first statement")]
    #[diagnostic(code(autoinject::template::trailing))]
    TrailingInput {
        #[label("extra input")]
        span: Span,
    },
}

// ── Lexer ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Identifier(EcoString),
    Integer(i64),
    Float(EcoString),
    String(EcoString),
    Char(char),
    Punct(&'static str),
    LineComment(EcoString),
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(s) | Self::Float(s) => write!(f, "{s}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Punct(p) => f.write_str(p),
            Self::LineComment(s) => write!(f, "//{s}"),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    kind: TokenKind,
    span: Span,
}

struct Lexer<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn position(&mut self) -> usize {
        self.chars.peek().map_or(self.source.len(), |&(pos, _)| pos)
    }

    fn span_from(&mut self, start: usize) -> Span {
        let end = self.position();
        Span::from(start..end)
    }

    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.chars.peek().is_some_and(|&(_, c)| predicate(c)) {
            self.chars.next();
        }
    }

    fn tokens(mut self) -> Result<Vec<Token>, TemplateError> {
        let mut tokens = Vec::new();
        while let Some(&(start, c)) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }
            let kind = match c {
                c if c.is_alphabetic() || c == '_' || c == '@' => {
                    self.chars.next();
                    self.advance_while(|c| c.is_alphanumeric() || c == '_');
                    let end = self.position();
                    let text = &self.source[start..end];
                    TokenKind::Identifier(text.trim_start_matches('@').into())
                }
                c if c.is_ascii_digit() => self.number(start),
                '"' => self.string(start)?,
                '\'' => self.character(start)?,
                '/' if self.source[start..].starts_with("//") => {
                    self.advance_while(|c| c != '\n');
                    let end = self.position();
                    TokenKind::LineComment(self.source[start + 2..end].into())
                }
                '+' | '-' if self.source[start + 1..].starts_with('=') => {
                    self.chars.next();
                    self.chars.next();
                    TokenKind::Punct(if c == '+' { "+=" } else { "-=" })
                }
                '.' | ',' | ';' | '(' | ')' | '<' | '>' | '=' | '?' | '[' | ']' => {
                    self.chars.next();
                    TokenKind::Punct(punct_str(c))
                }
                other => {
                    self.chars.next();
                    return Err(TemplateError::UnexpectedCharacter {
                        found: other,
                        span: self.span_from(start),
                    });
                }
            };
            let span = self.span_from(start);
            tokens.push(Token { kind, span });
        }
        Ok(tokens)
    }

    fn number(&mut self, start: usize) -> TokenKind {
        self.advance_while(|c| c.is_ascii_digit());
        let mut is_float = false;
        if let Some(&(dot, '.')) = self.chars.peek() {
            if self.source[dot + 1..].starts_with(|c: char| c.is_ascii_digit()) {
                is_float = true;
                self.chars.next();
                self.advance_while(|c| c.is_ascii_digit());
            }
        }
        self.advance_while(|c| matches!(c, 'f' | 'F' | 'd' | 'D' | 'm' | 'M'));
        let end = self.position();
        let text = &self.source[start..end];
        if is_float || text.ends_with(['f', 'F', 'd', 'D', 'm', 'M']) {
            return TokenKind::Float(text.into());
        }
        // Digits only at this point; out-of-range values keep their text.
        text.parse()
            .map_or_else(|_| TokenKind::Float(text.into()), TokenKind::Integer)
    }

    fn string(&mut self, start: usize) -> Result<TokenKind, TemplateError> {
        self.chars.next();
        let mut value = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(TokenKind::String(value.into())),
                Some((_, '\\')) => {
                    if let Some((_, escaped)) = self.chars.next() {
                        value.push(unescape(escaped));
                    }
                }
                Some((_, c)) => value.push(c),
                None => {
                    return Err(TemplateError::UnterminatedString {
                        span: self.span_from(start),
                    });
                }
            }
        }
    }

    fn character(&mut self, start: usize) -> Result<TokenKind, TemplateError> {
        self.chars.next();
        let value = match self.chars.next() {
            Some((_, '\\')) => self.chars.next().map(|(_, c)| unescape(c)),
            other => other.map(|(_, c)| c),
        };
        match (value, self.chars.next()) {
            (Some(c), Some((_, '\''))) => Ok(TokenKind::Char(c)),
            _ => Err(TemplateError::UnterminatedString {
                span: self.span_from(start),
            }),
        }
    }
}

const fn punct_str(c: char) -> &'static str {
    match c {
        '.' => ".",
        ',' => ",",
        ';' => ";",
        '(' => "(",
        ')' => ")",
        '<' => "<",
        '>' => ">",
        '=' => "=",
        '?' => "?",
        '[' => "[",
        _ => "]",
    }
}

const fn unescape(c: char) -> char {
    match c {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,
    }
}

// ── Parser ────────────────────────────────────────────────────────────────────

/// Parses one expression statement from `source`.
///
/// Spans in the result are offsets into `source`; callers that splice the
/// statement into a host tree treat it as synthesized.
///
/// # Errors
///
/// Returns a [`TemplateError`] when `source` is not exactly one supported
/// statement.
pub fn parse_statement(source: &str) -> Result<Statement, TemplateError> {
    let tokens = Lexer::new(source).tokens()?;
    let mut parser = Parser { tokens, pos: 0 };
    let statement = parser.statement()?;
    match parser.peek() {
        None => Ok(statement),
        Some(token) => Err(TemplateError::TrailingInput { span: token.span }),
    }
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_is(&self, punct: &str) -> bool {
        matches!(self.peek(), Some(Token { kind: TokenKind::Punct(p), .. }) if *p == punct)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, punct: &'static str) -> Result<Span, TemplateError> {
        match self.bump() {
            Some(Token {
                kind: TokenKind::Punct(p),
                span,
            }) if p == punct => Ok(span),
            Some(token) => Err(unexpected(punct, &token)),
            None => Err(TemplateError::UnexpectedEnd { expected: punct }),
        }
    }

    fn identifier(&mut self, expected: &'static str) -> Result<Identifier, TemplateError> {
        match self.bump() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                span,
            }) => Ok(Identifier::new(name, span)),
            Some(token) => Err(unexpected(expected, &token)),
            None => Err(TemplateError::UnexpectedEnd { expected }),
        }
    }

    fn statement(&mut self) -> Result<Statement, TemplateError> {
        let expression = self.expression()?;
        let semicolon = self.expect(";")?;
        let mut terminator = Terminator {
            span: semicolon,
            missing: false,
            trailing_trivia: Vec::new(),
        };
        if let Some(Token {
            kind: TokenKind::LineComment(text),
            ..
        }) = self.peek().cloned()
        {
            self.pos += 1;
            terminator.trailing_trivia = vec![
                Trivia::Whitespace(" ".into()),
                Trivia::LineComment(text),
            ];
        }
        let span = expression.span().merge(semicolon);
        Ok(Statement::Expression(ExpressionStatement {
            expression,
            terminator,
            annotations: Vec::new(),
            span,
        }))
    }

    fn expression(&mut self) -> Result<Expression, TemplateError> {
        let target = self.postfix()?;
        let operator = match self.peek() {
            Some(Token {
                kind: TokenKind::Punct("="),
                ..
            }) => AssignmentOperator::Assign,
            Some(Token {
                kind: TokenKind::Punct("+="),
                ..
            }) => AssignmentOperator::AddAssign,
            Some(Token {
                kind: TokenKind::Punct("-="),
                ..
            }) => AssignmentOperator::SubtractAssign,
            _ => return Ok(target),
        };
        self.pos += 1;
        let value = self.expression()?;
        let span = target.span().merge(value.span());
        Ok(Expression::Assignment {
            target: Box::new(target),
            operator,
            value: Box::new(value),
            span,
        })
    }

    fn postfix(&mut self) -> Result<Expression, TemplateError> {
        let mut expr = self.primary()?;
        loop {
            if self.peek_is(".") {
                self.pos += 1;
                let name = self.identifier("member name")?;
                let type_arguments = if self.peek_is("<") {
                    self.type_arguments()?
                } else {
                    Vec::new()
                };
                let span = expr.span().merge(name.span);
                expr = Expression::MemberAccess {
                    target: Box::new(expr),
                    name,
                    type_arguments,
                    span,
                };
            } else if self.peek_is("(") {
                let (arguments, close) = self.arguments()?;
                let span = expr.span().merge(close);
                expr = Expression::Invocation {
                    callee: Box::new(expr),
                    arguments,
                    span,
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn arguments(&mut self) -> Result<(Vec<Expression>, Span), TemplateError> {
        self.expect("(")?;
        let mut arguments = Vec::new();
        if !self.peek_is(")") {
            loop {
                arguments.push(self.expression()?);
                if self.peek_is(",") {
                    self.pos += 1;
                } else {
                    break;
                }
            }
        }
        let close = self.expect(")")?;
        Ok((arguments, close))
    }

    fn primary(&mut self) -> Result<Expression, TemplateError> {
        let Some(token) = self.bump() else {
            return Err(TemplateError::UnexpectedEnd {
                expected: "expression",
            });
        };
        let span = token.span;
        match token.kind {
            TokenKind::Identifier(name) => match name.as_str() {
                "this" => Ok(Expression::This(span)),
                "base" => Ok(Expression::Base(span)),
                "true" => Ok(Expression::Literal(Literal::Boolean(true), span)),
                "false" => Ok(Expression::Literal(Literal::Boolean(false), span)),
                "null" => Ok(Expression::Literal(Literal::Null, span)),
                "new" => {
                    let ty = self.type_syntax()?;
                    let (arguments, close) = self.arguments()?;
                    Ok(Expression::ObjectCreation {
                        ty,
                        arguments,
                        span: span.merge(close),
                    })
                }
                "typeof" => {
                    self.expect("(")?;
                    let ty = self.type_syntax()?;
                    let close = self.expect(")")?;
                    Ok(Expression::TypeOf {
                        ty,
                        span: span.merge(close),
                    })
                }
                _ => Ok(Expression::Identifier(Identifier::new(name, span))),
            },
            TokenKind::Integer(value) => Ok(Expression::Literal(Literal::Integer(value), span)),
            TokenKind::Float(text) => Ok(Expression::Literal(Literal::Float(text), span)),
            TokenKind::String(value) => Ok(Expression::Literal(Literal::String(value), span)),
            TokenKind::Char(value) => Ok(Expression::Literal(Literal::Char(value), span)),
            TokenKind::Punct("(") => {
                let expression = self.expression()?;
                let close = self.expect(")")?;
                Ok(Expression::Parenthesized {
                    expression: Box::new(expression),
                    span: span.merge(close),
                })
            }
            _ => Err(unexpected("expression", &token)),
        }
    }

    fn type_syntax(&mut self) -> Result<TypeSyntax, TemplateError> {
        let name = self.identifier("type name")?;
        let mut ty = if let Some(predefined) = predefined(&name.name) {
            TypeSyntax::Predefined(predefined)
        } else if self.peek_is("<") {
            TypeSyntax::Generic {
                name,
                arguments: self.type_arguments()?,
            }
        } else {
            TypeSyntax::Named(name)
        };
        while self.peek_is(".") {
            self.pos += 1;
            let right_name = self.identifier("type name")?;
            let right = if self.peek_is("<") {
                TypeSyntax::Generic {
                    name: right_name,
                    arguments: self.type_arguments()?,
                }
            } else {
                TypeSyntax::Named(right_name)
            };
            ty = TypeSyntax::Qualified {
                left: Box::new(ty),
                right: Box::new(right),
            };
        }
        if self.peek_is("?") {
            self.pos += 1;
            ty = TypeSyntax::Nullable(Box::new(ty));
        }
        if self.peek_is("[") {
            self.pos += 1;
            self.expect("]")?;
            ty = TypeSyntax::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn type_arguments(&mut self) -> Result<Vec<TypeSyntax>, TemplateError> {
        self.expect("<")?;
        let mut arguments = vec![self.type_syntax()?];
        while self.peek_is(",") {
            self.pos += 1;
            arguments.push(self.type_syntax()?);
        }
        self.expect(">")?;
        Ok(arguments)
    }
}

fn unexpected(expected: &'static str, token: &Token) -> TemplateError {
    TemplateError::UnexpectedToken {
        expected,
        found: token.kind.to_string().into(),
        span: token.span,
    }
}

fn predefined(name: &str) -> Option<PredefinedType> {
    Some(match name {
        "void" => PredefinedType::Void,
        "bool" => PredefinedType::Bool,
        "byte" => PredefinedType::Byte,
        "char" => PredefinedType::Char,
        "int" => PredefinedType::Int,
        "long" => PredefinedType::Long,
        "float" => PredefinedType::Float,
        "double" => PredefinedType::Double,
        "string" => PredefinedType::String,
        "object" => PredefinedType::Object,
        _ => return None,
    })
}
