// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Wadler-Lindig document tree used by the source printer.
//!
//! Printer functions return `Document` values instead of writing into a
//! buffer, so indentation and line fitting are decided once, in the final
//! render.
//!
//! # Example
//!
//! ```
//! use autoinject_core::docvec;
//! use autoinject_core::syntax::printer::document::{line, nest};
//!
//! let doc = docvec!["{", nest(4, docvec![line(), "this.Provide();"]), line(), "}"];
//! assert_eq!(doc.to_pretty_string(), "{\n    this.Provide();\n}");
//! ```

use ecow::EcoString;

/// Indentation width of printed source.
pub const INDENT: isize = 4;

/// Column limit used when deciding whether a group fits flat.
pub const LINE_WIDTH: isize = 100;

/// A pretty-printable document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document<'a> {
    /// A borrowed string.
    Str(&'a str),
    /// An owned string.
    String(EcoString),
    /// A mandatory newline followed by current indentation.
    Line,
    /// Increase indentation for nested content.
    Nest(isize, Box<Document<'a>>),
    /// A sequence of documents.
    Vec(Vec<Document<'a>>),
    /// Rendered flat when it fits in the remaining width, broken otherwise.
    Group(Box<Document<'a>>),
    /// Rendered as `unbroken` when flat, `broken` then a newline otherwise.
    Break { broken: &'a str, unbroken: &'a str },
    /// Empty document.
    Nil,
}

/// Coerce a value into a `Document`.
pub trait Documentable<'a> {
    fn to_doc(self) -> Document<'a>;
}

impl<'a> Documentable<'a> for &'a str {
    fn to_doc(self) -> Document<'a> {
        Document::Str(self)
    }
}

impl<'a> Documentable<'a> for String {
    fn to_doc(self) -> Document<'a> {
        Document::String(self.into())
    }
}

impl<'a> Documentable<'a> for EcoString {
    fn to_doc(self) -> Document<'a> {
        Document::String(self)
    }
}

impl<'a> Documentable<'a> for &'a EcoString {
    fn to_doc(self) -> Document<'a> {
        Document::Str(self.as_str())
    }
}

impl<'a> Documentable<'a> for Document<'a> {
    fn to_doc(self) -> Document<'a> {
        self
    }
}

impl<'a> Documentable<'a> for Vec<Document<'a>> {
    fn to_doc(self) -> Document<'a> {
        Document::Vec(self)
    }
}

/// Concatenates documents; each element goes through [`Documentable`].
///
/// ```
/// use autoinject_core::docvec;
///
/// let doc = docvec!["public", " ", "void"];
/// assert_eq!(doc.to_pretty_string(), "public void");
/// ```
#[macro_export]
macro_rules! docvec {
    () => {
        $crate::syntax::printer::document::Document::Vec(Vec::new())
    };

    ($first:expr $(,)?) => {
        $crate::syntax::printer::document::Document::Vec(
            vec![$crate::syntax::printer::document::Documentable::to_doc($first)]
        )
    };

    ($first:expr, $($rest:expr),+ $(,)?) => {
        match $crate::syntax::printer::document::Documentable::to_doc($first) {
            $crate::syntax::printer::document::Document::Vec(mut vec) => {
                $(
                    vec.push($crate::syntax::printer::document::Documentable::to_doc($rest));
                )*
                $crate::syntax::printer::document::Document::Vec(vec)
            },
            first => {
                $crate::syntax::printer::document::Document::Vec(
                    vec![first, $($crate::syntax::printer::document::Documentable::to_doc($rest)),+]
                )
            }
        }
    };
}

#[must_use]
pub fn line() -> Document<'static> {
    Document::Line
}

#[must_use]
pub fn nil() -> Document<'static> {
    Document::Nil
}

#[must_use]
pub fn nest(indent: isize, doc: Document<'_>) -> Document<'_> {
    Document::Nest(indent, Box::new(doc))
}

#[must_use]
pub fn group(doc: Document<'_>) -> Document<'_> {
    Document::Group(Box::new(doc))
}

#[must_use]
pub fn break_<'a>(broken: &'a str, unbroken: &'a str) -> Document<'a> {
    Document::Break { broken, unbroken }
}

/// Joins documents with a separator between each pair.
#[must_use]
pub fn join<'a>(
    docs: impl IntoIterator<Item = Document<'a>>,
    separator: &Document<'a>,
) -> Document<'a> {
    let mut result = Vec::new();
    for doc in docs {
        if !result.is_empty() {
            result.push(separator.clone());
        }
        result.push(doc);
    }
    if result.is_empty() {
        Document::Nil
    } else {
        Document::Vec(result)
    }
}

#[must_use]
pub fn concat<'a>(docs: impl IntoIterator<Item = Document<'a>>) -> Document<'a> {
    Document::Vec(docs.into_iter().collect())
}

// --- Rendering ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

struct Renderer {
    output: String,
    column: isize,
}

impl Document<'_> {
    /// Renders the document to a string.
    ///
    /// Outside any group, breaks are taken. A group renders flat when its
    /// flat width fits before [`LINE_WIDTH`] and it contains no hard line.
    #[must_use]
    pub fn to_pretty_string(&self) -> String {
        let mut renderer = Renderer {
            output: String::new(),
            column: 0,
        };
        renderer.render(self, 0, Mode::Break);
        renderer.output
    }

    /// Width of this document rendered flat, or `None` if it holds a
    /// [`Document::Line`] and cannot be flat.
    fn flat_width(&self) -> Option<isize> {
        match self {
            Document::Str(s) => Some(text_width(s)),
            Document::String(s) => Some(text_width(s)),
            Document::Nil => Some(0),
            Document::Line => None,
            Document::Nest(_, doc) | Document::Group(doc) => doc.flat_width(),
            Document::Vec(docs) => docs.iter().map(Document::flat_width).sum(),
            Document::Break { unbroken, .. } => Some(text_width(unbroken)),
        }
    }
}

impl Renderer {
    fn render(&mut self, doc: &Document<'_>, indent: isize, mode: Mode) {
        match doc {
            Document::Str(s) => self.push(s),
            Document::String(s) => self.push(s),
            Document::Nil => {}
            Document::Line => self.newline(indent),
            Document::Nest(extra, doc) => self.render(doc, indent + extra, mode),
            Document::Vec(docs) => {
                for doc in docs {
                    self.render(doc, indent, mode);
                }
            }
            Document::Group(doc) => {
                let fits = doc
                    .flat_width()
                    .is_some_and(|width| self.column + width <= LINE_WIDTH);
                self.render(doc, indent, if fits { Mode::Flat } else { Mode::Break });
            }
            Document::Break { broken, unbroken } => match mode {
                Mode::Break => {
                    self.push(broken);
                    self.newline(indent);
                }
                Mode::Flat => self.push(unbroken),
            },
        }
    }

    fn push(&mut self, text: &str) {
        self.output.push_str(text);
        self.column += text_width(text);
    }

    fn newline(&mut self, indent: isize) {
        // No trailing whitespace on blank lines.
        while self.output.ends_with(' ') {
            self.output.pop();
        }
        self.output.push('\n');
        for _ in 0..indent {
            self.output.push(' ');
        }
        self.column = indent;
    }
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "printed lines are far shorter than isize::MAX"
)]
fn text_width(text: &str) -> isize {
    text.chars().count() as isize
}
