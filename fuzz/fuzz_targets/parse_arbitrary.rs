// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for parser crash safety testing.
//!
//! This target feeds arbitrary byte sequences to the parser and asserts
//! that it never panics. The parser must handle all input gracefully,
//! producing either a definition list or a structured `ParseError`.
//!
//! Invalid UTF-8 bytes are converted via lossy conversion (U+FFFD
//! replacement) so the lexer still gets exercised with unusual character
//! sequences; the replacement character is just another `Other` lexeme.
//!
//! # Success Criteria
//!
//! - No panic on any input
//! - Every `Ok` lexing is lossless (concatenated texts == input)
//! - Both trivia modes accept and reject the same inputs

#![no_main]

use libfuzzer_sys::fuzz_target;
use webidl_core::{lex, parse, parse_with_options, ParseOptions};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    if let Ok(lexemes) = lex(&source) {
        let rebuilt: String = lexemes.iter().map(|l| l.text().to_owned()).collect();
        assert_eq!(rebuilt, source, "lexer dropped or reordered bytes");
    }

    let plain = parse(&source);
    let with_ws = parse_with_options(
        &source,
        ParseOptions {
            ws: true,
            allow_nested_typedefs: true,
        },
    );
    assert_eq!(
        plain.is_ok(),
        with_ws.is_ok(),
        "options changed acceptance"
    );
});
