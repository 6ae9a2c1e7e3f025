// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The Web IDL front end: lexer, parser, and their shared types.
//!
//! # Lexical Analysis
//!
//! [`lex`] converts source text into a stream of [`Lexeme`]s. Nothing is
//! dropped — whitespace and comments come through as lexemes of their own —
//! so the stream is a lossless segmentation of the input.
//!
//! ```
//! use webidl_core::{lex, LexKind};
//!
//! let lexemes = lex("typedef long Int;").unwrap();
//! let rebuilt: String = lexemes.iter().map(|l| l.text().to_owned()).collect();
//! assert_eq!(rebuilt, "typedef long Int;");
//! ```
//!
//! # Parsing
//!
//! [`parse`] (or [`parse_with_options`]) runs the recursive descent parser
//! over the lexeme stream and returns the top-level
//! [`Definition`](crate::ast::Definition) list. The parse is
//! all-or-nothing: the first error aborts and surfaces as a [`ParseError`]
//! carrying the line, a snapshot of the unconsumed lexemes, and a
//! miette-labeled span.
//!
//! # Trivia
//!
//! With [`ParseOptions::ws`] set, containers record the whitespace around
//! their syntactic anchors and members keep their leading trivia, enabling
//! formatting round-trips. [`refine_trivia`] classifies any drained trivia
//! text into `ws` / `line-comment` / `multiline-comment` pieces.

mod error;
mod lexer;
mod parser;
mod span;
mod token;


pub use error::ParseError;
pub use lexer::{lex, refine_trivia};
pub use parser::{parse, parse_with_options, ParseOptions};
pub use span::Span;
pub use token::{LexKind, Lexeme, TriviaKind, TriviaLexeme};
