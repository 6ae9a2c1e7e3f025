// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexeme types produced by the Web IDL lexer.
//!
//! A [`Lexeme`] is a classified substring of the source: its [`LexKind`], the
//! exact text it was cut from, and its byte [`Span`]. Whitespace and comments
//! are lexemes like any other — the lexer drops nothing, so concatenating the
//! `text` of every lexeme reproduces the input byte-for-byte. The parser
//! relies on that to attach surrounding trivia to AST nodes and to count
//! lines.
//!
//! When the parser drains a whitespace/comment run it can be re-classified
//! into finer [`TriviaLexeme`]s (see
//! [`refine_trivia`](super::lexer::refine_trivia)) for consumers that need to
//! distinguish plain whitespace from line and block comments.

use ecow::EcoString;
use serde::{Deserialize, Serialize};

use super::Span;

/// The classification of a lexeme.
///
/// The serialized names (`"float"`, `"integer"`, …) are part of the stable
/// output shape: they appear in [`ParseError::tokens`](super::ParseError) and
/// wherever a raw lexeme is embedded in the AST (e.g. the `partial` marker).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexKind {
    /// A floating point literal: `3.14`, `-.5`, `2e10`
    Float,
    /// An integer literal: `42`, `-17`, `0xBEEF`, `0755`
    Integer,
    /// An identifier: `DOMString`, `_interface`, `x-y`
    Identifier,
    /// A double-quoted string literal, quotes included: `"utf-8"`
    String,
    /// A maximal run of spaces, tabs, carriage returns, and newlines
    Whitespace,
    /// A run of `//…` and `/*…*/` comments, possibly separated by whitespace
    Comment,
    /// Any single character matched by no other family: `{`, `;`, `?`, …
    Other,
}

impl LexKind {
    /// Returns `true` for whitespace and comment lexemes.
    #[must_use]
    pub const fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Comment)
    }
}

/// A classified substring of the source.
///
/// Lexemes are cheap to clone ([`EcoString`] text) which the parser exploits
/// when it speculatively consumes tokens and rolls back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexeme {
    #[serde(rename = "type")]
    kind: LexKind,
    #[serde(rename = "value")]
    text: EcoString,
    #[serde(skip, default)]
    span: Span,
}

impl Lexeme {
    /// Creates a new lexeme.
    #[must_use]
    pub fn new(kind: LexKind, text: impl Into<EcoString>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    /// Returns the kind of this lexeme.
    #[must_use]
    pub fn kind(&self) -> LexKind {
        self.kind
    }

    /// Returns the matched text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the lexeme and returns its text.
    #[must_use]
    pub fn into_text(self) -> EcoString {
        self.text
    }

    /// Returns the source span of this lexeme.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Strips a single leading underscore from an identifier.
    ///
    /// Web IDL uses `_name` to escape identifiers that collide with
    /// keywords; the escape is shed the moment the token is consumed, so
    /// `_interface` reaches the AST as plain `interface`.
    pub(crate) fn shed_escape(&mut self) {
        if self.kind == LexKind::Identifier {
            if let Some(rest) = self.text.strip_prefix('_') {
                self.text = rest.into();
            }
        }
    }
}

/// Fine-grained classification of a whitespace/comment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    /// A run of blank characters.
    Ws,
    /// A `//` comment (content without the slashes or line break).
    LineComment,
    /// A `/* */` comment (content without the delimiters).
    MultilineComment,
}

/// A refined trivia lexeme, as produced by
/// [`refine_trivia`](super::lexer::refine_trivia).
///
/// The `pea` flag marks trivia collected just before a member or argument
/// ("post extended attribute"), which formatting tools treat differently from
/// trivia between definitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaLexeme {
    /// What this piece of trivia is.
    pub kind: TriviaKind,
    /// Whether it was collected just before a member or argument.
    pub pea: bool,
    /// The content (whitespace run, or comment text without delimiters).
    pub text: EcoString,
}

impl TriviaLexeme {
    /// Renders the refined tag: `ws`, `line-comment`, `multiline-comment`,
    /// suffixed with `-pea` for member/argument-leading trivia.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match (self.kind, self.pea) {
            (TriviaKind::Ws, false) => "ws",
            (TriviaKind::Ws, true) => "ws-pea",
            (TriviaKind::LineComment, false) => "line-comment",
            (TriviaKind::LineComment, true) => "line-comment-pea",
            (TriviaKind::MultilineComment, false) => "multiline-comment",
            (TriviaKind::MultilineComment, true) => "multiline-comment-pea",
        }
    }
}
