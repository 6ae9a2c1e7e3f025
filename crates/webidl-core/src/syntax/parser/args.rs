// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Argument lists, default/constant values, and extended attributes.
//!
//! These three small grammars are shared by most productions: operations
//! and callbacks take argument lists, dictionary fields and optional
//! arguments take defaults, and nearly every node can be preceded by a
//! `[…]` extended-attribute block. The accepted extended-attribute syntax
//! is the pragmatic subset — `Name`, `Name=RHS`, `Name(args)`, and
//! combinations — rather than the full grammar.

use ecow::EcoString;

use crate::ast::{Argument, DefaultValue, ExtAttrRhs, ExtendedAttribute};
use crate::syntax::{LexKind, ParseError};

use super::Parser;

/// Strips the surrounding quotes from a string lexeme's text.
fn unquote(text: &str) -> EcoString {
    text.trim_matches('"').into()
}

impl Parser {
    /// `argument ( , argument )*`, empty allowed. A comma with no argument
    /// after it is fatal.
    pub(super) fn argument_list(&mut self) -> Result<Vec<Argument>, ParseError> {
        let mut arguments = Vec::new();
        let Some(first) = self.argument()? else {
            return Ok(arguments);
        };
        arguments.push(first);
        loop {
            self.all_ws();
            if self.consume_other(",").is_none() {
                return Ok(arguments);
            }
            self.all_ws();
            let Some(argument) = self.argument()? else {
                return Err(self.error("Trailing comma in arguments list"));
            };
            arguments.push(argument);
        }
    }

    /// One argument: extended attributes, optional `optional`, type,
    /// optional `...`, name, optional default (only when `optional`).
    ///
    /// Rolls back completely when no type follows, so an empty argument
    /// list (or the closing parenthesis) is not an error here.
    fn argument(&mut self) -> Result<Option<Argument>, ParseError> {
        let start = self.checkpoint();
        let ext_attrs = self.extended_attrs()?;
        let trivia = self.all_ws();
        let optional = self.consume_keyword("optional").is_some();
        if optional {
            self.all_ws();
        }
        let Some(idl_type) = self.type_(Some("argument-type"))? else {
            self.restore(start);
            return Ok(None);
        };
        let mut variadic = false;
        if !optional {
            self.all_ws();
            variadic = self.consume_variadic_dots();
        }
        self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name in argument"));
        };
        let default = if optional {
            self.default_assignment()?
        } else {
            None
        };
        Ok(Some(Argument {
            name: name.into_text(),
            idl_type,
            optional,
            variadic,
            default,
            ext_attrs,
            trivia: self.keep_trivia(trivia),
        }))
    }

    /// `= value` if present. Values are constants, strings (unquoted in the
    /// AST), or the empty sequence `[]`.
    pub(super) fn default_assignment(&mut self) -> Result<Option<DefaultValue>, ParseError> {
        self.all_ws();
        if self.consume_other("=").is_none() {
            return Ok(None);
        }
        self.all_ws();
        if let Some(value) = self.const_value() {
            return Ok(Some(value));
        }
        if let Some(string) = self.consume(LexKind::String) {
            return Ok(Some(DefaultValue::String {
                value: unquote(string.text()),
            }));
        }
        if self.consume_other("[").is_some() {
            if self.consume_other("]").is_none() {
                return Err(self.error("Default sequence value must be empty"));
            }
            return Ok(Some(DefaultValue::Sequence { value: Vec::new() }));
        }
        Err(self.error("No value for default"))
    }

    /// A constant value: `true`, `false`, `null`, `Infinity`, `-Infinity`,
    /// `NaN`, or a numeric literal. The numeric literals already carry
    /// their sign from the lexer; only `Infinity` needs the explicit `-`
    /// lookahead, which rolls back when `Infinity` does not follow.
    pub(super) fn const_value(&mut self) -> Option<DefaultValue> {
        if self.consume_keyword("true").is_some() {
            return Some(DefaultValue::Boolean { value: true });
        }
        if self.consume_keyword("false").is_some() {
            return Some(DefaultValue::Boolean { value: false });
        }
        if self.consume_keyword("null").is_some() {
            return Some(DefaultValue::Null);
        }
        if self.consume_keyword("Infinity").is_some() {
            return Some(DefaultValue::Infinity { negative: false });
        }
        if self.consume_keyword("NaN").is_some() {
            return Some(DefaultValue::NaN);
        }
        if let Some(number) = self
            .consume(LexKind::Float)
            .or_else(|| self.consume(LexKind::Integer))
        {
            return Some(DefaultValue::Number {
                value: number.into_text(),
            });
        }
        let start = self.checkpoint();
        if self.consume_other("-").is_some() {
            if self.consume_keyword("Infinity").is_some() {
                return Some(DefaultValue::Infinity { negative: true });
            }
            self.restore(start);
        }
        None
    }

    /// `[ EA ( , EA )* ]`, or nothing. Returns an empty list when no `[`
    /// follows.
    pub(super) fn extended_attrs(&mut self) -> Result<Vec<ExtendedAttribute>, ParseError> {
        self.all_ws();
        let mut attrs = Vec::new();
        if self.consume_other("[").is_none() {
            return Ok(attrs);
        }
        loop {
            let Some(attr) = self.extended_attr()? else {
                return Err(self.error("Extended attribute with no content"));
            };
            attrs.push(attr);
            self.all_ws();
            if self.consume_other(",").is_none() {
                break;
            }
        }
        if self.consume_other("]").is_none() {
            return Err(self.error("No end of extended attribute"));
        }
        Ok(attrs)
    }

    /// `NAME ( = RHS )? ( \( args \) )?`
    fn extended_attr(&mut self) -> Result<Option<ExtendedAttribute>, ParseError> {
        self.all_ws();
        let Some(name) = self.consume_id() else {
            return Ok(None);
        };
        self.all_ws();
        let mut rhs = None;
        if self.consume_other("=").is_some() {
            self.all_ws();
            rhs = Some(self.ext_attr_rhs()?);
            self.all_ws();
        }
        let mut arguments = None;
        if self.consume_other("(").is_some() {
            let args = self.argument_list()?;
            self.all_ws();
            if self.consume_other(")").is_none() {
                return Err(self.error("Unclosed argument list in extended attribute"));
            }
            arguments = Some(args);
        }
        Ok(Some(ExtendedAttribute {
            name: name.into_text(),
            arguments,
            rhs,
        }))
    }

    /// The right-hand side of `NAME = …`: a single identifier, float,
    /// integer, or string lexeme, or a parenthesized identifier list.
    fn ext_attr_rhs(&mut self) -> Result<ExtAttrRhs, ParseError> {
        if let Some(id) = self.consume_id() {
            return Ok(ExtAttrRhs::Identifier {
                value: id.into_text(),
            });
        }
        if let Some(float) = self.consume(LexKind::Float) {
            return Ok(ExtAttrRhs::Float {
                value: float.into_text(),
            });
        }
        if let Some(integer) = self.consume(LexKind::Integer) {
            return Ok(ExtAttrRhs::Integer {
                value: integer.into_text(),
            });
        }
        if let Some(string) = self.consume(LexKind::String) {
            return Ok(ExtAttrRhs::String {
                value: string.into_text(),
            });
        }
        if self.consume_other("(").is_some() {
            let mut identifiers = Vec::new();
            loop {
                self.all_ws();
                let Some(id) = self.consume_id() else {
                    return Err(self.error("No identifier in identifier-list"));
                };
                identifiers.push(id.into_text());
                self.all_ws();
                if self.consume_other(",").is_none() {
                    break;
                }
            }
            if self.consume_other(")").is_none() {
                return Err(self.error("Unterminated identifier-list"));
            }
            return Ok(ExtAttrRhs::IdentifierList { value: identifiers });
        }
        Err(self.error("No right hand side to extended attribute assignment"))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{Definition, ExtAttrRhs, Member};
    use crate::syntax::parse;

    /// Parses a single interface with one operation and returns it.
    fn parse_operation(member: &str) -> crate::ast::Operation {
        let source = format!("interface I {{ {member} }};");
        let defs = parse(&source).unwrap();
        let Definition::Interface(iface) = defs.into_iter().next().unwrap() else {
            panic!("expected interface");
        };
        match iface.members.into_iter().next().unwrap() {
            Member::Operation(op) => op,
            other => panic!("expected operation, got {other:?}"),
        }
    }

    fn parse_first_ext_attrs(source: &str) -> Vec<crate::ast::ExtendedAttribute> {
        let defs = parse(source).unwrap();
        match defs.into_iter().next().unwrap() {
            Definition::Interface(iface) => iface.ext_attrs,
            other => panic!("expected interface, got {other:?}"),
        }
    }

    #[test]
    fn empty_argument_list() {
        let op = parse_operation("void f();");
        assert!(op.arguments.is_empty());
    }

    #[test]
    fn arguments_with_flags() {
        let op = parse_operation("void f(long a, optional DOMString b = \"x\", long... rest);");
        assert_eq!(op.arguments.len(), 3);
        assert!(!op.arguments[0].optional);
        assert!(op.arguments[1].optional);
        assert_eq!(
            op.arguments[1].default,
            Some(crate::ast::DefaultValue::String { value: "x".into() })
        );
        assert!(op.arguments[2].variadic);
        assert_eq!(op.arguments[2].name, "rest");
    }

    #[test]
    fn variadic_excludes_optional() {
        // `optional long... x` never checks for dots, so the dots trip the
        // name parse instead.
        let source = "interface I { void f(optional long... x); };";
        let err = parse(source).expect_err("expected error");
        assert!(err.message.contains("No name in argument"), "got: {}", err.message);
    }

    #[test]
    fn trailing_comma_is_fatal() {
        let source = "interface I { void f(long a,); };";
        let err = parse(source).expect_err("expected error");
        assert!(
            err.message.contains("Trailing comma in arguments list"),
            "got: {}",
            err.message
        );
    }

    #[test]
    fn argument_extended_attributes() {
        let op = parse_operation("void f([EnforceRange] long a);");
        assert_eq!(op.arguments[0].ext_attrs.len(), 1);
        assert_eq!(op.arguments[0].ext_attrs[0].name, "EnforceRange");
    }

    #[test]
    fn default_values() {
        let op = parse_operation(
            "void f(optional long a = -1, optional double b = 1.5, optional boolean c = true, \
             optional DOMString d = null, optional double e = -Infinity, optional double g = NaN, \
             optional sequence<long> h = []);",
        );
        use crate::ast::DefaultValue as D;
        let defaults: Vec<_> = op.arguments.iter().map(|a| a.default.clone().unwrap()).collect();
        assert_eq!(defaults[0], D::Number { value: "-1".into() });
        assert_eq!(defaults[1], D::Number { value: "1.5".into() });
        assert_eq!(defaults[2], D::Boolean { value: true });
        assert_eq!(defaults[3], D::Null);
        assert_eq!(defaults[4], D::Infinity { negative: true });
        assert_eq!(defaults[5], D::NaN);
        assert_eq!(defaults[6], D::Sequence { value: vec![] });
    }

    #[test]
    fn default_sequence_must_be_empty() {
        let err = parse("interface I { void f(optional sequence<long> h = [1]); };")
            .expect_err("expected error");
        assert!(
            err.message.contains("Default sequence value must be empty"),
            "got: {}",
            err.message
        );
    }

    #[test]
    fn bare_minus_is_not_a_default() {
        let err =
            parse("interface I { void f(optional long a = - 5); };").expect_err("expected error");
        // `- 5` is not `-Infinity`, and the lexer only folds the sign into
        // an adjacent literal, so the default is missing.
        assert!(err.message.contains("No value for default"), "got: {}", err.message);
    }

    #[test]
    fn ext_attr_forms() {
        let attrs = parse_first_ext_attrs(
            "[NoInterfaceObject, Exposed=(Window, Worker), NamedConstructor=Audio(DOMString src), \
             Version=1.5] interface I {};",
        );
        assert_eq!(attrs.len(), 4);

        assert_eq!(attrs[0].name, "NoInterfaceObject");
        assert!(attrs[0].arguments.is_none());
        assert!(attrs[0].rhs.is_none());

        assert_eq!(
            attrs[1].rhs,
            Some(ExtAttrRhs::IdentifierList {
                value: vec!["Window".into(), "Worker".into()]
            })
        );

        assert_eq!(
            attrs[2].rhs,
            Some(ExtAttrRhs::Identifier { value: "Audio".into() })
        );
        let ctor_args = attrs[2].arguments.as_ref().unwrap();
        assert_eq!(ctor_args.len(), 1);
        assert_eq!(ctor_args[0].name, "src");

        assert_eq!(attrs[3].rhs, Some(ExtAttrRhs::Float { value: "1.5".into() }));
    }

    #[test]
    fn ext_attr_string_rhs_keeps_quotes() {
        let attrs = parse_first_ext_attrs("[Profile=\"fast\"] interface I {};");
        assert_eq!(
            attrs[0].rhs,
            Some(ExtAttrRhs::String { value: "\"fast\"".into() })
        );
    }

    #[test]
    fn ext_attr_errors() {
        let err = parse("[] interface I {};").expect_err("expected error");
        assert_eq!(err.message, "Extended attribute with no content");

        let err = parse("[A interface I {};").expect_err("expected error");
        assert_eq!(err.message, "No end of extended attribute");

        let err = parse("[A=] interface I {};").expect_err("expected error");
        assert_eq!(err.message, "No right hand side to extended attribute assignment");

        let err = parse("[A=(1)] interface I {};").expect_err("expected error");
        assert_eq!(err.message, "No identifier in identifier-list");

        let err = parse("[A=(B C)] interface I {};").expect_err("expected error");
        assert_eq!(err.message, "Unterminated identifier-list");

        let err = parse("[A(long x] interface I {};").expect_err("expected error");
        assert_eq!(err.message, "Unclosed argument list in extended attribute");
    }
}
