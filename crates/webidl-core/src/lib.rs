// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! A lexer and recursive-descent parser for Web IDL.
//!
//! Web IDL is the interface description language used to declare the shape
//! of host-exposed APIs: interfaces, mixins, dictionaries, namespaces,
//! callbacks, enums, typedefs, and the relations between them. This crate
//! turns a source string into a tree of definition records that validators,
//! binding generators, and documentation tools can consume.
//!
//! The pipeline is two stages composed linearly — bytes → lexemes → AST —
//! with no state outside a single [`parse`] call, so independent parses can
//! run on as many threads as you like.
//!
//! # Example
//!
//! ```
//! use webidl_core::{parse, ast::Definition};
//!
//! let defs = parse(
//!     "enum Mode { \"open\", \"closed\" };
//!      interface Door { attribute Mode mode; };",
//! )
//! .unwrap();
//!
//! assert_eq!(defs.len(), 2);
//! let Definition::Enum(modes) = &defs[0] else { panic!() };
//! assert_eq!(modes.values, vec!["open", "closed"]);
//! ```
//!
//! Errors are structured and contextual:
//!
//! ```
//! use webidl_core::parse;
//!
//! let err = parse("interface A {}; interface A {};").unwrap_err();
//! assert!(err.message.contains("The name \"A\" of type \"interface\" is already seen"));
//! ```
//!
//! The parser accepts a pragmatic subset of the official grammar: extended
//! attributes are limited to the forms that occur in practice, and a small
//! set of semantic checks (duplicate top-level names, generic arity,
//! nullable restrictions, required/default conflicts, record key types) is
//! enforced during the parse. It is not a full validator: cross-definition
//! references, extended-attribute legality, and type compatibility are left
//! to downstream tools.

pub mod ast;
pub mod syntax;

pub use syntax::{
    lex, parse, parse_with_options, refine_trivia, LexKind, Lexeme, ParseError, ParseOptions,
    Span, TriviaKind, TriviaLexeme,
};
