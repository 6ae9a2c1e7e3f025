// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! The type grammar: primitive types, named and generic types, unions, and
//! the nullable suffix.
//!
//! A type is `single_type | union_type`. A single type starts as a
//! primitive (`unsigned long long`, `unrestricted double`, `boolean`, …) or
//! an identifier; an identifier followed by `<` opens a generic, whose
//! inner types are parsed recursively. Arity and shape constraints for
//! `sequence`, `record`, and `Promise` are enforced here; any other generic
//! name is accepted structurally.

use ecow::EcoString;

use crate::ast::{IdlType, ReturnType};
use crate::syntax::ParseError;

use super::Parser;

/// Keys accepted for `record<K, V>`.
const RECORD_KEY_TYPES: [&str; 3] = ["DOMString", "USVString", "ByteString"];

impl Parser {
    /// `type` = `single_type | union_type`, with the given syntactic role.
    pub(super) fn type_(
        &mut self,
        role: Option<&'static str>,
    ) -> Result<Option<IdlType>, ParseError> {
        if let Some(ty) = self.single_type(role)? {
            return Ok(Some(ty));
        }
        self.union_type(role)
    }

    /// A type with an optional leading extended-attribute block attached to
    /// the resulting descriptor.
    pub(super) fn type_with_extended_attributes(
        &mut self,
        role: Option<&'static str>,
    ) -> Result<Option<IdlType>, ParseError> {
        let ext_attrs = self.extended_attrs()?;
        let Some(mut ty) = self.type_(role)? else {
            return Ok(None);
        };
        ty.ext_attrs = ext_attrs;
        Ok(Some(ty))
    }

    /// A primitive or (possibly generic) named type, with its suffix.
    fn single_type(&mut self, role: Option<&'static str>) -> Result<Option<IdlType>, ParseError> {
        let mut ty = if let Some(primitive) = self.primitive_type()? {
            IdlType::named(role, primitive)
        } else {
            let Some(name) = self.consume_id() else {
                return Ok(None);
            };
            let name = name.into_text();
            self.all_ws();
            if self.consume_other("<").is_some() {
                let inner = self.generic_arguments(&name)?;
                IdlType::generic(role, name, inner)
            } else {
                IdlType::named(role, name)
            }
        };
        self.type_suffix(&mut ty)?;
        if ty.nullable && ty.name() == Some("any") {
            return Err(self.error("Type any cannot be made nullable"));
        }
        Ok(Some(ty))
    }

    /// The comma-separated inner types of `name<…>`, with the per-generic
    /// constraints applied. The `<` has already been consumed; this
    /// consumes through the closing `>`.
    fn generic_arguments(&mut self, name: &str) -> Result<Vec<IdlType>, ParseError> {
        let mut inner = Vec::new();
        loop {
            self.all_ws();
            let Some(ty) = self.type_with_extended_attributes(None)? else {
                return Err(self.error(format!("Error parsing generic type {name}")));
            };
            inner.push(ty);
            self.all_ws();
            if self.consume_other(",").is_none() {
                break;
            }
        }
        if name == "sequence" && inner.len() != 1 {
            return Err(self.error("A sequence must have exactly one subtype"));
        }
        if name == "record" {
            if inner.len() != 2 {
                return Err(self.error("A record must have exactly two subtypes"));
            }
            let key = &inner[0];
            if !key.ext_attrs.is_empty() {
                return Err(self.error("Record key cannot have extended attributes"));
            }
            if !key.name().is_some_and(|n| RECORD_KEY_TYPES.contains(&n)) {
                return Err(self.error("Record key must be DOMString, USVString, or ByteString"));
            }
        }
        if name == "Promise" && !inner[0].ext_attrs.is_empty() {
            return Err(self.error("Promise type cannot have extended attributes"));
        }
        if self.consume_other(">").is_none() {
            return Err(self.error(format!("Unterminated generic type {name}")));
        }
        Ok(inner)
    }

    /// `( T ( or T )+ )` with at least two members.
    fn union_type(&mut self, role: Option<&'static str>) -> Result<Option<IdlType>, ParseError> {
        self.all_ws();
        if self.consume_other("(").is_none() {
            return Ok(None);
        }
        let mut members = Vec::new();
        let Some(first) = self.type_with_extended_attributes(None)? else {
            return Err(self.error("Union type with no content"));
        };
        members.push(first);
        loop {
            self.all_ws();
            if self.consume_keyword("or").is_none() {
                break;
            }
            let Some(ty) = self.type_with_extended_attributes(None)? else {
                return Err(self.error("No type after 'or' in union type"));
            };
            members.push(ty);
        }
        if members.len() < 2 {
            return Err(self.error("At least two types are expected in a union type"));
        }
        if self.consume_other(")").is_none() {
            return Err(self.error("Unterminated union type"));
        }
        let mut ty = IdlType::union(role, members);
        self.type_suffix(&mut ty)?;
        Ok(Some(ty))
    }

    /// Consumes at most one `?`; a second is fatal.
    fn type_suffix(&mut self, ty: &mut IdlType) -> Result<(), ParseError> {
        loop {
            self.all_ws();
            if self.consume_other("?").is_some() {
                if ty.nullable {
                    return Err(self.error("Can't nullable more than once"));
                }
                ty.nullable = true;
            } else {
                return Ok(());
            }
        }
    }

    /// `integer_type | float_type | boolean | byte | octet`, canonicalized
    /// with single spaces.
    pub(super) fn primitive_type(&mut self) -> Result<Option<EcoString>, ParseError> {
        if let Some(ty) = self.integer_type()? {
            return Ok(Some(ty));
        }
        if let Some(ty) = self.float_type()? {
            return Ok(Some(ty));
        }
        self.all_ws();
        for keyword in ["boolean", "byte", "octet"] {
            if self.consume_keyword(keyword).is_some() {
                return Ok(Some(EcoString::from(keyword)));
            }
        }
        Ok(None)
    }

    /// `unsigned? (short | long long?)`. A bare `unsigned` commits and
    /// fails.
    fn integer_type(&mut self) -> Result<Option<EcoString>, ParseError> {
        let mut ty = EcoString::new();
        self.all_ws();
        if self.consume_keyword("unsigned").is_some() {
            ty.push_str("unsigned ");
            self.all_ws();
        }
        if self.consume_keyword("short").is_some() {
            ty.push_str("short");
            return Ok(Some(ty));
        }
        if self.consume_keyword("long").is_some() {
            ty.push_str("long");
            self.all_ws();
            if self.consume_keyword("long").is_some() {
                ty.push_str(" long");
            }
            return Ok(Some(ty));
        }
        if !ty.is_empty() {
            return Err(self.error("Failed to parse integer type"));
        }
        Ok(None)
    }

    /// `unrestricted? (float | double)`. A bare `unrestricted` commits and
    /// fails.
    fn float_type(&mut self) -> Result<Option<EcoString>, ParseError> {
        let mut ty = EcoString::new();
        self.all_ws();
        if self.consume_keyword("unrestricted").is_some() {
            ty.push_str("unrestricted ");
            self.all_ws();
        }
        if self.consume_keyword("float").is_some() {
            ty.push_str("float");
            return Ok(Some(ty));
        }
        if self.consume_keyword("double").is_some() {
            ty.push_str("double");
            return Ok(Some(ty));
        }
        if !ty.is_empty() {
            return Err(self.error("Failed to parse float type"));
        }
        Ok(None)
    }

    /// `type("return-type")` or the `void` keyword. `void` is claimed
    /// before the type grammar can swallow it as a type name.
    pub(super) fn try_return_type(&mut self) -> Result<Option<ReturnType>, ParseError> {
        self.all_ws();
        if self.consume_keyword("void").is_some() {
            return Ok(Some(ReturnType::void()));
        }
        if let Some(ty) = self.type_(Some("return-type"))? {
            return Ok(Some(ReturnType::Type(Box::new(ty))));
        }
        Ok(None)
    }

    /// Like [`Parser::try_return_type`], but a missing return type is fatal.
    pub(super) fn return_type(&mut self) -> Result<ReturnType, ParseError> {
        match self.try_return_type()? {
            Some(ty) => Ok(ty),
            None => Err(self.error("No return type")),
        }
    }
}


#[cfg(test)]
mod tests {
    use crate::ast::{Definition, IdlTypeValue, Member};
    use crate::syntax::parse;

    /// Parses `typedef <ty> T;` and returns the typedef's type descriptor.
    fn parse_type(ty: &str) -> crate::ast::IdlType {
        let source = format!("typedef {ty} T;");
        let defs = parse(&source).unwrap();
        match defs.into_iter().next().unwrap() {
            Definition::Typedef(td) => td.idl_type,
            other => panic!("expected a typedef, got {other:?}"),
        }
    }

    fn parse_type_err(ty: &str) -> String {
        let source = format!("typedef {ty} T;");
        parse(&source).expect_err("expected a parse error").message
    }

    #[test]
    fn primitive_types_are_canonicalized() {
        assert_eq!(parse_type("unsigned long long").name(), Some("unsigned long long"));
        assert_eq!(parse_type("long\n long").name(), Some("long long"));
        assert_eq!(parse_type("unsigned  short").name(), Some("unsigned short"));
        assert_eq!(parse_type("unrestricted double").name(), Some("unrestricted double"));
        assert_eq!(parse_type("octet").name(), Some("octet"));
    }

    #[test]
    fn bare_unsigned_or_unrestricted_is_fatal() {
        assert_eq!(parse_type_err("unsigned DOMString"), "Failed to parse integer type");
        assert_eq!(parse_type_err("unrestricted long"), "Failed to parse float type");
    }

    #[test]
    fn sequence_requires_exactly_one_subtype() {
        let ty = parse_type("sequence<DOMString>");
        assert!(ty.sequence);
        assert_eq!(ty.generic.as_deref(), Some("sequence"));
        assert_eq!(
            parse_type_err("sequence<long, long>"),
            "A sequence must have exactly one subtype"
        );
    }

    #[test]
    fn record_requires_two_subtypes_and_a_string_key() {
        let ty = parse_type("record<DOMString, long>");
        assert_eq!(ty.generic.as_deref(), Some("record"));
        assert!(!ty.sequence);
        assert_eq!(
            parse_type_err("record<DOMString>"),
            "A record must have exactly two subtypes"
        );
        assert_eq!(
            parse_type_err("record<long, long>"),
            "Record key must be DOMString, USVString, or ByteString"
        );
        assert_eq!(
            parse_type_err("record<[XAttr] ByteString, long>"),
            "Record key cannot have extended attributes"
        );
    }

    #[test]
    fn promise_inner_type_must_be_bare() {
        let ty = parse_type("Promise<void>");
        assert_eq!(ty.generic.as_deref(), Some("Promise"));
        assert_eq!(
            parse_type_err("Promise<[XAttr] long>"),
            "Promise type cannot have extended attributes"
        );
    }

    #[test]
    fn unknown_generics_are_accepted_structurally() {
        let ty = parse_type("FrozenArray<Point>");
        assert_eq!(ty.generic.as_deref(), Some("FrozenArray"));
        assert!(!ty.sequence);
        match &ty.idl_type {
            IdlTypeValue::Types(inner) => {
                assert_eq!(inner.len(), 1);
                assert_eq!(inner[0].name(), Some("Point"));
                assert_eq!(inner[0].role, None);
            }
            other => panic!("expected inner types, got {other:?}"),
        }
    }

    #[test]
    fn generic_missing_close_angle_is_fatal() {
        assert_eq!(
            parse_type_err("sequence<long"),
            "Unterminated generic type sequence"
        );
    }

    #[test]
    fn nested_generics() {
        let ty = parse_type("sequence<sequence<DOMString>>");
        let IdlTypeValue::Types(inner) = &ty.idl_type else {
            panic!("expected inner types");
        };
        assert!(inner[0].sequence);
    }

    #[test]
    fn nullable_suffix() {
        let ty = parse_type("DOMString?");
        assert!(ty.nullable);
        assert_eq!(parse_type_err("long??"), "Can't nullable more than once");
    }

    #[test]
    fn nullable_any_is_rejected_everywhere() {
        assert_eq!(parse_type_err("any?"), "Type any cannot be made nullable");
        assert_eq!(
            parse_type_err("sequence<any?>"),
            "Type any cannot be made nullable"
        );
    }

    #[test]
    fn union_types() {
        let ty = parse_type("(DOMString or long)");
        assert!(ty.union);
        assert!(ty.generic.is_none());
        let IdlTypeValue::Types(members) = &ty.idl_type else {
            panic!("expected union members");
        };
        assert_eq!(members.len(), 2);

        let nullable_union = parse_type("(DOMString or long)?");
        assert!(nullable_union.nullable);
    }

    #[test]
    fn union_errors() {
        assert_eq!(parse_type_err("()"), "Union type with no content");
        assert_eq!(
            parse_type_err("(long or )"),
            "No type after 'or' in union type"
        );
        assert_eq!(
            parse_type_err("(long)"),
            "At least two types are expected in a union type"
        );
        assert_eq!(
            parse_type_err("(long or short"),
            "Unterminated union type"
        );
    }

    #[test]
    fn void_only_exists_in_return_position() {
        // In a typedef, `void` is just an identifier type name.
        assert_eq!(parse_type("void").name(), Some("void"));
        // In an operation, it is the bare keyword.
        let defs = parse("interface I { void run(); };").unwrap();
        let Definition::Interface(iface) = &defs[0] else {
            panic!("expected interface");
        };
        let Member::Operation(op) = &iface.members[0] else {
            panic!("expected operation");
        };
        assert!(op.idl_type.is_void());
    }

    #[test]
    fn escaped_identifier_as_type_name() {
        assert_eq!(parse_type("_long").name(), Some("long"));
    }
}
