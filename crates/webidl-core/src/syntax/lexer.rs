// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Lexical analysis for Web IDL source text.
//!
//! [`lex`] segments a source string into [`Lexeme`]s. The lexer is
//! hand-written: at each cursor position it picks a pattern family from the
//! lookahead character and runs anchored scanners against the remaining
//! text, committing to the first that matches.
//!
//! # Design Principles
//!
//! - **Lossless**: whitespace and comments are emitted as ordinary lexemes;
//!   concatenating every lexeme's text reproduces the input exactly.
//! - **Ordered fallback**: at `-`, a digit, or `.` the float scanner runs
//!   before the integer scanner, and a character no family claims becomes a
//!   single `Other` lexeme. The float pattern requires a decimal point or an
//!   exponent, so it never steals the sign and digits of an integer.
//! - **Coarse comments**: a run of adjacent `//…` and `/*…*/` comments
//!   (whitespace between them included) is one `Comment` lexeme; callers that
//!   need finer structure re-lex it with [`refine_trivia`].
//!
//! # Example
//!
//! ```
//! use webidl_core::{lex, LexKind};
//!
//! let lexemes = lex("interface Foo {};").unwrap();
//! assert_eq!(lexemes[0].kind(), LexKind::Identifier);
//! assert_eq!(lexemes[0].text(), "interface");
//! ```

use ecow::EcoString;

use super::{LexKind, Lexeme, ParseError, Span, TriviaKind, TriviaLexeme};

/// Tokenises a source string.
///
/// Never reorders or drops bytes. The only failure is the internal
/// `Token stream not progressing` error, raised if a scanner claims a match
/// of zero length; every pattern family below consumes at least one
/// character, so well-behaved scanners make it unreachable.
pub fn lex(source: &str) -> Result<Vec<Lexeme>, ParseError> {
    let mut lexemes = Vec::new();
    let mut pos = 0;
    let mut line = 1u32;
    while pos < source.len() {
        let rest = &source[pos..];
        let Some(first) = rest.chars().next() else {
            break;
        };
        let (kind, len) = match first {
            '-' | '.' | '0'..='9' => {
                if let Some(len) = scan_float(rest) {
                    (LexKind::Float, len)
                } else if let Some(len) = scan_integer(rest) {
                    (LexKind::Integer, len)
                } else {
                    (LexKind::Other, first.len_utf8())
                }
            }
            'A'..='Z' | 'a'..='z' | '_' => (LexKind::Identifier, scan_identifier(rest)),
            '"' => match scan_string(rest) {
                Some(len) => (LexKind::String, len),
                None => (LexKind::Other, 1),
            },
            ' ' | '\t' | '\n' | '\r' => (LexKind::Whitespace, scan_whitespace(rest)),
            '/' => match scan_comment_run(rest) {
                Some(len) => (LexKind::Comment, len),
                None => (LexKind::Other, 1),
            },
            _ => (LexKind::Other, first.len_utf8()),
        };
        if len == 0 {
            return Err(ParseError::token_stream_stalled(
                line,
                Span::from(pos..pos),
            ));
        }
        let text = &rest[..len];
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a lexeme holds far fewer newlines than u32::MAX"
        )]
        {
            line += text.matches('\n').count() as u32;
        }
        lexemes.push(Lexeme::new(kind, text, Span::from(pos..pos + len)));
        pos += len;
    }
    Ok(lexemes)
}

/// Counts leading ASCII characters satisfying `pred`.
fn run_len(s: &str, pred: impl Fn(u8) -> bool) -> usize {
    s.bytes().take_while(|&b| pred(b)).count()
}

/// `-?(([0-9]+\.[0-9]*|[0-9]*\.[0-9]+)([Ee][-+]?[0-9]+)?|[0-9]+[Ee][-+]?[0-9]+)`
///
/// Either a decimal point or an explicit exponent is required; a bare
/// integer never matches, which is what keeps the float/integer fallback
/// unambiguous.
fn scan_float(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let start = usize::from(bytes.first() == Some(&b'-'));
    let int_digits = run_len(&s[start..], |b| b.is_ascii_digit());
    let mut at = start + int_digits;
    if bytes.get(at) == Some(&b'.') {
        let frac_digits = run_len(&s[at + 1..], |b| b.is_ascii_digit());
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }
        at += 1 + frac_digits;
        if let Some(exp) = scan_exponent(&s[at..]) {
            at += exp;
        }
        return Some(at);
    }
    if int_digits > 0 {
        if let Some(exp) = scan_exponent(&s[at..]) {
            return Some(at + exp);
        }
    }
    None
}

/// `[Ee][-+]?[0-9]+`
fn scan_exponent(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return None;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = run_len(&s[1 + sign..], |b| b.is_ascii_digit());
    (digits > 0).then_some(1 + sign + digits)
}

/// `-?(0([Xx][0-9A-Fa-f]+|[0-7]*)|[1-9][0-9]*)`
fn scan_integer(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let start = usize::from(bytes.first() == Some(&b'-'));
    match bytes.get(start)? {
        b'0' => {
            let after_zero = start + 1;
            if matches!(bytes.get(after_zero), Some(b'X' | b'x')) {
                let hex = run_len(&s[after_zero + 1..], |b| b.is_ascii_hexdigit());
                if hex > 0 {
                    return Some(after_zero + 1 + hex);
                }
                // "0x" with no digits: the hex alternative fails but the
                // octal one matches zero digits, so the match is just "0".
                return Some(after_zero);
            }
            let octal = run_len(&s[after_zero..], |b| (b'0'..=b'7').contains(&b));
            Some(after_zero + octal)
        }
        b'1'..=b'9' => {
            let digits = run_len(&s[start..], |b| b.is_ascii_digit());
            Some(start + digits)
        }
        _ => None,
    }
}

/// `[A-Za-z_][0-9A-Za-z_-]*` (first character already verified by dispatch).
fn scan_identifier(s: &str) -> usize {
    1 + run_len(&s[1..], |b| {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
    })
}

/// `"[^"]*"` — no escapes in Web IDL strings.
fn scan_string(s: &str) -> Option<usize> {
    s[1..].find('"').map(|close| close + 2)
}

/// `[\t\n\r ]+` (first character already verified by dispatch).
fn scan_whitespace(s: &str) -> usize {
    run_len(s, |b| matches!(b, b'\t' | b'\n' | b'\r' | b' '))
}

/// One or more consecutive comments, possibly separated by whitespace.
///
/// Whitespace after the final comment of the run is left for the next
/// lexeme. An unterminated `/*` fails the whole family so the `/` falls
/// back to `Other`.
fn scan_comment_run(s: &str) -> Option<usize> {
    let mut len = scan_comment(s)?;
    loop {
        let gap = scan_whitespace(&s[len..]);
        match scan_comment(&s[len + gap..]) {
            Some(comment) => len += gap + comment,
            None => return Some(len),
        }
    }
}

/// A single `//…` (line break excluded) or terminated `/*…*/` comment.
fn scan_comment(s: &str) -> Option<usize> {
    if s.starts_with("//") {
        Some(s.find('\n').unwrap_or(s.len()))
    } else if s.starts_with("/*") {
        s[2..].find("*/").map(|close| 2 + close + 2)
    } else {
        None
    }
}

/// Re-lexes a drained whitespace/comment run into refined trivia lexemes.
///
/// The coarse `Whitespace` and `Comment` lexemes the parser drains are split
/// into `ws`, `line-comment`, and `multiline-comment` pieces; comment pieces
/// carry their content without delimiters. Set `pea` for trivia collected
/// just before a member or argument so [`TriviaLexeme::tag`] renders the
/// `-pea` suffix.
#[must_use]
pub fn refine_trivia(text: &str, pea: bool) -> Vec<TriviaLexeme> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let ws = scan_whitespace(rest);
        if ws > 0 {
            pieces.push(TriviaLexeme {
                kind: TriviaKind::Ws,
                pea,
                text: EcoString::from(&rest[..ws]),
            });
            rest = &rest[ws..];
        } else if rest.starts_with("//") {
            let content_end = rest.find('\n').unwrap_or(rest.len());
            let consumed = if rest[content_end..].starts_with('\n') {
                content_end + 1
            } else {
                content_end
            };
            pieces.push(TriviaLexeme {
                kind: TriviaKind::LineComment,
                pea,
                text: EcoString::from(rest[2..content_end].trim_end_matches('\r')),
            });
            rest = &rest[consumed..];
        } else if rest.starts_with("/*") {
            let Some(close) = rest[2..].find("*/") else {
                break;
            };
            pieces.push(TriviaLexeme {
                kind: TriviaKind::MultilineComment,
                pea,
                text: EcoString::from(&rest[2..2 + close]),
            });
            rest = &rest[2 + close + 2..];
        } else {
            // Not trivia text; stop rather than mis-classify.
            break;
        }
    }
    pieces
}
