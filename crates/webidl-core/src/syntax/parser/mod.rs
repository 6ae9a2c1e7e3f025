// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Recursive descent parser for Web IDL.
//!
//! The parser consumes the lexeme stream produced by
//! [`lex`](super::lexer::lex) directly — whitespace and comment lexemes
//! included — and builds the definition list. It is a hand-written machine
//! with bounded lookahead (usually one lexeme, up to three for variadic
//! `...` detection) and local backtracking.
//!
//! # Design Philosophy
//!
//! - **First error aborts** — there is no recovery and no diagnostic
//!   accumulation; every production propagates [`ParseError`] with `?`.
//! - **Ordered dispatch** — top-level and member productions try candidates
//!   in a fixed order; each reads its distinguishing keyword first, so the
//!   first match commits.
//! - **Checkpoint backtracking** — speculative productions (`A implements
//!   B`, attribute vs. operation, `readonly maplike`) save the cursor and
//!   line counter and restore both on failure. Lexemes are never mutated in
//!   place, so restoring the cursor is equivalent to pushing consumed
//!   tokens back onto the stream.
//! - **Explicit whitespace** — `consume` never skips trivia; productions
//!   drain it with [`Parser::all_ws`], which is also where line counting
//!   and trivia capture happen.
//!
//! # Usage
//!
//! ```
//! use webidl_core::{parse, ast::Definition};
//!
//! let defs = parse("interface Foo : Bar { attribute DOMString baz; };").unwrap();
//! assert_eq!(defs.len(), 1);
//! assert!(matches!(defs[0], Definition::Interface(_)));
//! ```

use std::collections::HashMap;

use ecow::EcoString;

use crate::ast::Definition;
use crate::syntax::{lex, LexKind, Lexeme, ParseError};

mod args;
mod definitions;
mod members;
mod types;


/// Options accepted by [`parse_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Attach whitespace/comment trivia to containers, members, and
    /// arguments so formatting-preserving consumers can round-trip source.
    pub ws: bool,
    /// Permit `typedef` inside interface bodies.
    pub allow_nested_typedefs: bool,
}

/// Parses a Web IDL source string with default options.
///
/// Returns the list of top-level definitions, or the first error
/// encountered. See [`ParseError`] for what an error carries.
pub fn parse(source: &str) -> Result<Vec<Definition>, ParseError> {
    parse_with_options(source, ParseOptions::default())
}

/// Parses a Web IDL source string.
pub fn parse_with_options(
    source: &str,
    options: ParseOptions,
) -> Result<Vec<Definition>, ParseError> {
    let tokens = lex(source)?;
    Parser::new(tokens, options).definitions()
}

/// The definition currently being parsed, used to prefix error messages.
pub(super) struct CurrentDefinition {
    pub(super) partial: bool,
    pub(super) kind: &'static str,
    pub(super) name: EcoString,
}

impl std::fmt::Display for CurrentDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.partial {
            write!(f, "partial ")?;
        }
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// A saved parser position for backtracking.
#[derive(Debug, Clone, Copy)]
pub(super) struct Checkpoint {
    pos: usize,
    line: u32,
}

/// The parser state: the lexeme stream, a cursor, and the bookkeeping a
/// single parse call owns (line counter, name registry, current-definition
/// pointer).
pub(super) struct Parser {
    tokens: Vec<Lexeme>,
    pos: usize,
    line: u32,
    options: ParseOptions,
    registry: HashMap<EcoString, &'static str>,
    current: Option<CurrentDefinition>,
}

impl Parser {
    /// Creates a parser over a lexeme stream.
    pub(super) fn new(tokens: Vec<Lexeme>, options: ParseOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            line: 1,
            options,
            registry: HashMap::new(),
            current: None,
        }
    }

    // ========================================================================
    // Token Management
    // ========================================================================

    pub(super) fn options(&self) -> ParseOptions {
        self.options
    }

    /// Saves the cursor and line counter for later rollback.
    pub(super) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
        }
    }

    /// Rolls back to a checkpoint, returning consumed lexemes (and counted
    /// lines) to the stream.
    pub(super) fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
    }

    /// Consumes the next lexeme if it has the given kind.
    ///
    /// Consumed identifiers are returned with a single leading underscore
    /// stripped, so `_interface` reaches the caller as the identifier
    /// `interface`. The stream itself is never mutated.
    pub(super) fn consume(&mut self, kind: LexKind) -> Option<Lexeme> {
        let token = self.tokens.get(self.pos)?;
        if token.kind() != kind {
            return None;
        }
        let mut token = token.clone();
        self.pos += 1;
        token.shed_escape();
        Some(token)
    }

    /// Consumes the next lexeme if it has the given kind and exact raw
    /// text. The comparison happens before underscore stripping, so an
    /// escaped `_interface` never matches the keyword `interface`.
    pub(super) fn consume_exact(&mut self, kind: LexKind, text: &str) -> Option<Lexeme> {
        let token = self.tokens.get(self.pos)?;
        if token.kind() != kind || token.text() != text {
            return None;
        }
        let mut token = token.clone();
        self.pos += 1;
        token.shed_escape();
        Some(token)
    }

    /// Consumes the next identifier, unescaped.
    pub(super) fn consume_id(&mut self) -> Option<Lexeme> {
        self.consume(LexKind::Identifier)
    }

    /// Consumes the given keyword (an identifier with exactly this text).
    pub(super) fn consume_keyword(&mut self, keyword: &str) -> Option<Lexeme> {
        self.consume_exact(LexKind::Identifier, keyword)
    }

    /// Consumes the given punctuation (an `Other` lexeme with this text).
    pub(super) fn consume_other(&mut self, text: &str) -> Option<Lexeme> {
        self.consume_exact(LexKind::Other, text)
    }

    /// Consumes three consecutive `.` lexemes, the variadic marker.
    pub(super) fn consume_variadic_dots(&mut self) -> bool {
        let dots = self.tokens[self.pos..]
            .iter()
            .take(3)
            .filter(|t| t.kind() == LexKind::Other && t.text() == ".")
            .count();
        if dots == 3 {
            self.pos += 3;
            true
        } else {
            false
        }
    }

    /// Drains whitespace and comment lexemes at the head of the stream,
    /// counting lines, and returns the drained text.
    pub(super) fn all_ws(&mut self) -> EcoString {
        let mut text = EcoString::new();
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind().is_trivia() {
                break;
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "a lexeme holds far fewer newlines than u32::MAX"
            )]
            {
                self.line += token.text().matches('\n').count() as u32;
            }
            text.push_str(token.text());
            self.pos += 1;
        }
        text
    }

    /// Wraps drained trivia for storage: `Some` only in `ws` mode.
    pub(super) fn keep_trivia(&self, text: EcoString) -> Option<EcoString> {
        self.options.ws.then_some(text)
    }

    // ========================================================================
    // Errors, registry, and context
    // ========================================================================

    /// Builds a [`ParseError`] at the current position.
    pub(super) fn error(&self, cause: impl AsRef<str>) -> ParseError {
        ParseError::with_context(
            cause.as_ref(),
            self.current.as_ref().map(|c| c.to_string()).as_deref(),
            self.line,
            &self.tokens[self.pos..],
        )
    }

    /// Records a non-partial top-level definition name, failing on
    /// redefinition.
    pub(super) fn register_name(
        &mut self,
        name: &EcoString,
        kind: &'static str,
    ) -> Result<(), ParseError> {
        if let Some(&existing) = self.registry.get(name) {
            return Err(self.error(format!(
                "The name \"{name}\" of type \"{existing}\" is already seen"
            )));
        }
        self.registry.insert(name.clone(), kind);
        Ok(())
    }

    /// Marks the definition now being parsed for error-message context.
    pub(super) fn set_current(&mut self, kind: &'static str, name: &EcoString, partial: bool) {
        self.current = Some(CurrentDefinition {
            partial,
            kind,
            name: name.clone(),
        });
    }

    // ========================================================================
    // Top-level loop
    // ========================================================================

    /// Parses the whole stream into a definition list.
    pub(super) fn definitions(&mut self) -> Result<Vec<Definition>, ParseError> {
        let mut definitions = Vec::new();
        loop {
            self.all_ws();
            let ext_attrs = self.extended_attrs()?;
            let Some(mut definition) = self.definition()? else {
                if !ext_attrs.is_empty() {
                    return Err(self.error("Stray extended attributes"));
                }
                break;
            };
            definition.set_ext_attrs(ext_attrs);
            definitions.push(definition);
        }
        self.all_ws();
        if self.pos < self.tokens.len() {
            return Err(self.error("Unrecognised tokens"));
        }
        Ok(definitions)
    }

    /// Tries each top-level production in order; the first whose keyword
    /// matches commits.
    fn definition(&mut self) -> Result<Option<Definition>, ParseError> {
        if let Some(d) = self.callback()? {
            return Ok(Some(d));
        }
        if let Some(d) = self.interface(None)? {
            return Ok(Some(d));
        }
        if let Some(d) = self.partial()? {
            return Ok(Some(d));
        }
        if let Some(d) = self.dictionary(None)? {
            return Ok(Some(d));
        }
        if let Some(d) = self.enum_()? {
            return Ok(Some(d));
        }
        if let Some(d) = self.typedef_()? {
            return Ok(Some(Definition::Typedef(d)));
        }
        if let Some(d) = self.implements_()? {
            return Ok(Some(d));
        }
        if let Some(d) = self.includes_()? {
            return Ok(Some(d));
        }
        if let Some(d) = self.namespace(None)? {
            return Ok(Some(d));
        }
        Ok(None)
    }
}
