// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The parse error type.
//!
//! Parsing is all-or-nothing: the first error aborts the parse and surfaces
//! as a single [`ParseError`]. The error carries everything a host needs to
//! report the failure — the contextual message, the line the parser had
//! reached, and a snapshot of the next few unconsumed lexemes — and
//! integrates with [`miette`] for labeled diagnostics.

use ecow::EcoString;
use miette::Diagnostic;
use thiserror::Error;

use super::{Lexeme, Span};

/// How many unconsumed lexemes an error snapshots for context.
pub(super) const ERROR_CONTEXT_LEXEMES: usize = 5;

/// A fatal parse (or lex) failure.
///
/// The `message` is the human-visible contract: when a definition was already
/// open it is prefixed with that definition's kind and name, e.g.
///
/// ```text
/// Got an error during or right after parsing `partial interface Foo`: Missing semicolon after interface
/// ```
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic()]
pub struct ParseError {
    /// The full error text, including the `current definition` prefix.
    pub message: String,
    /// The line the parser had reached. Lines advance only when whitespace
    /// is drained, so inside a dense token run this is the line of the
    /// previous whitespace boundary.
    pub line: u32,
    /// Concatenated text of up to five unconsumed lexemes.
    pub input: EcoString,
    /// The same unconsumed lexemes, as records.
    pub tokens: Vec<Lexeme>,
    /// Where the next unconsumed lexeme sits in the source.
    #[label("problem is around here")]
    pub span: Span,
}

impl ParseError {
    /// Builds an error from the raw cause and a snapshot of the unconsumed
    /// tail of the token stream.
    #[must_use]
    pub(super) fn with_context(
        cause: &str,
        current: Option<&str>,
        line: u32,
        unconsumed: &[Lexeme],
    ) -> Self {
        let tokens: Vec<Lexeme> = unconsumed
            .iter()
            .take(ERROR_CONTEXT_LEXEMES)
            .cloned()
            .collect();
        let mut input = EcoString::new();
        for lexeme in &tokens {
            input.push_str(lexeme.text());
        }
        let span = tokens
            .first()
            .map_or_else(Span::default, super::Lexeme::span);
        let message = match current {
            Some(current) => {
                format!("Got an error during or right after parsing `{current}`: {cause}")
            }
            None => cause.to_owned(),
        };
        Self {
            message,
            line,
            input,
            tokens,
            span,
        }
    }

    /// The internal lexer error: no pattern family matched and the cursor
    /// did not advance.
    #[must_use]
    pub(super) fn token_stream_stalled(line: u32, at: Span) -> Self {
        Self {
            message: "Token stream not progressing".to_owned(),
            line,
            input: EcoString::new(),
            tokens: Vec::new(),
            span: at,
        }
    }
}
