// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Body members: constants, attributes, operations, `static` and
//! `stringifier` forms, and the iterable family.
//!
//! Interface, mixin, and namespace bodies each accept a different subset of
//! members, dispatched in a fixed order; the first production whose keyword
//! matches commits. Attributes are the one speculative case — `readonly`
//! could open `readonly attribute` or `readonly maplike`, so the attribute
//! production rolls back when the `attribute` keyword never arrives.

use crate::ast::{Attribute, CollectionLike, Const, IdlType, Iterable, Member, Operation,
    ReturnType, StringifierMember};
use crate::syntax::ParseError;

use super::Parser;

/// Where an attribute appears, which decides whether `inherit` is legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum AttrContext {
    /// A plain interface member: `inherit` is allowed.
    Regular,
    /// Under a `static` or `stringifier` prefix: `inherit` is fatal.
    StaticOrStringifier,
    /// A namespace or mixin member: `inherit` makes this not-an-attribute.
    NoInherit,
}

impl Parser {
    /// One interface member, extended attributes already consumed.
    pub(super) fn interface_member(&mut self) -> Result<Member, ParseError> {
        if let Some(member) = self.const_member()? {
            return Ok(Member::Const(member));
        }
        if self.options().allow_nested_typedefs {
            if let Some(member) = self.typedef_()? {
                return Ok(Member::Typedef(member));
            }
        }
        if let Some(member) = self.static_member()? {
            return Ok(member);
        }
        if let Some(member) = self.stringifier()? {
            return Ok(member);
        }
        if let Some(member) = self.iterable_member()? {
            return Ok(member);
        }
        if let Some(attribute) = self.attribute(AttrContext::Regular)? {
            return Ok(Member::Attribute(attribute));
        }
        if let Some(operation) = self.operation()? {
            return Ok(Member::Operation(operation));
        }
        Err(self.error("Unknown member"))
    }

    /// One mixin member: const, stringifier, non-inherited attribute, or
    /// regular operation.
    pub(super) fn mixin_member(&mut self) -> Result<Member, ParseError> {
        if let Some(member) = self.const_member()? {
            return Ok(Member::Const(member));
        }
        if let Some(member) = self.stringifier()? {
            return Ok(member);
        }
        if let Some(attribute) = self.attribute(AttrContext::NoInherit)? {
            return Ok(Member::Attribute(attribute));
        }
        if let Some(operation) = self.regular_operation()? {
            return Ok(Member::Operation(operation));
        }
        Err(self.error("Unknown member"))
    }

    /// One namespace member: non-inherited attribute or regular operation.
    pub(super) fn namespace_member(&mut self) -> Result<Member, ParseError> {
        if let Some(attribute) = self.attribute(AttrContext::NoInherit)? {
            return Ok(Member::Attribute(attribute));
        }
        if let Some(operation) = self.regular_operation()? {
            return Ok(Member::Operation(operation));
        }
        Err(self.error("Unknown member"))
    }

    /// `const TYPE ?? NAME = VALUE;`
    ///
    /// The type is a primitive or a user-defined name; the optional `?`
    /// marks the member itself nullable.
    pub(super) fn const_member(&mut self) -> Result<Option<Const>, ParseError> {
        if self.consume_keyword("const").is_none() {
            return Ok(None);
        }
        self.all_ws();
        let type_name = if let Some(primitive) = self.primitive_type()? {
            primitive
        } else {
            let Some(id) = self.consume_id() else {
                return Err(self.error("No type for const"));
            };
            id.into_text()
        };
        let idl_type = IdlType::named(Some("const-type"), type_name);
        self.all_ws();
        let nullable = self.consume_other("?").is_some();
        self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for const"));
        };
        self.all_ws();
        if self.consume_other("=").is_none() {
            return Err(self.error("No value assignment for const"));
        }
        self.all_ws();
        let Some(value) = self.const_value() else {
            return Err(self.error("No value for const"));
        };
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Unterminated const"));
        }
        Ok(Some(Const {
            name: name.into_text(),
            idl_type,
            nullable,
            value,
            ext_attrs: Vec::new(),
            trivia: None,
        }))
    }

    /// `inherit? readonly? attribute TYPE NAME ;`, rolling back when the
    /// `attribute` keyword never shows up.
    pub(super) fn attribute(
        &mut self,
        context: AttrContext,
    ) -> Result<Option<Attribute>, ParseError> {
        let start = self.checkpoint();
        let mut inherit = false;
        if self.consume_keyword("inherit").is_some() {
            match context {
                AttrContext::Regular => inherit = true,
                AttrContext::StaticOrStringifier => {
                    return Err(self.error("Cannot have a static or stringifier inherit"));
                }
                AttrContext::NoInherit => {
                    self.restore(start);
                    return Ok(None);
                }
            }
            self.all_ws();
        }
        let mut readonly = false;
        if self.consume_keyword("readonly").is_some() {
            readonly = true;
            self.all_ws();
        }
        if self.consume_keyword("attribute").is_none() {
            self.restore(start);
            return Ok(None);
        }
        self.all_ws();
        let Some(idl_type) = self.type_with_extended_attributes(Some("attribute-type"))? else {
            return Err(self.error("No type in attribute"));
        };
        if matches!(idl_type.generic.as_deref(), Some("sequence" | "record")) {
            return Err(self.error("Attributes cannot accept sequence/record types"));
        }
        self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name in attribute"));
        };
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Unterminated attribute, expected ;"));
        }
        Ok(Some(Attribute {
            name: name.into_text(),
            idl_type,
            readonly,
            inherit,
            is_static: false,
            stringifier: false,
            ext_attrs: Vec::new(),
            trivia: None,
        }))
    }

    /// An operation with optional `getter`/`setter`/`deleter` prefixes,
    /// each at most once.
    pub(super) fn operation(&mut self) -> Result<Option<Operation>, ParseError> {
        let mut getter = false;
        let mut setter = false;
        let mut deleter = false;
        loop {
            self.all_ws();
            if self.consume_keyword("getter").is_some() {
                if getter {
                    return Err(self.error("Duplicate getter in operation"));
                }
                getter = true;
            } else if self.consume_keyword("setter").is_some() {
                if setter {
                    return Err(self.error("Duplicate setter in operation"));
                }
                setter = true;
            } else if self.consume_keyword("deleter").is_some() {
                if deleter {
                    return Err(self.error("Duplicate deleter in operation"));
                }
                deleter = true;
            } else {
                break;
            }
        }
        let special = getter || setter || deleter;
        let Some(idl_type) = self.try_return_type()? else {
            if special {
                return Err(self.error("No return type"));
            }
            return Ok(None);
        };
        let mut operation = self.operation_rest(idl_type)?;
        operation.getter = getter;
        operation.setter = setter;
        operation.deleter = deleter;
        Ok(Some(operation))
    }

    /// An operation without special prefixes, as allowed in namespaces,
    /// mixins, and under `static`/`stringifier`.
    pub(super) fn regular_operation(&mut self) -> Result<Option<Operation>, ParseError> {
        let Some(idl_type) = self.try_return_type()? else {
            return Ok(None);
        };
        self.operation_rest(idl_type).map(Some)
    }

    /// The tail of an operation after its return type: optional name,
    /// argument list, semicolon.
    fn operation_rest(&mut self, idl_type: ReturnType) -> Result<Operation, ParseError> {
        self.all_ws();
        let name = self.consume_id().map(super::Lexeme::into_text);
        self.all_ws();
        if self.consume_other("(").is_none() {
            return Err(self.error("Invalid operation"));
        }
        let arguments = self.argument_list()?;
        self.all_ws();
        if self.consume_other(")").is_none() {
            return Err(self.error("Unterminated operation"));
        }
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Missing semicolon after operation"));
        }
        Ok(Operation {
            name,
            idl_type,
            arguments,
            getter: false,
            setter: false,
            deleter: false,
            is_static: false,
            stringifier: false,
            ext_attrs: Vec::new(),
            trivia: None,
        })
    }

    /// `static` followed by a non-inherited attribute or a regular
    /// operation.
    fn static_member(&mut self) -> Result<Option<Member>, ParseError> {
        if self.consume_keyword("static").is_none() {
            return Ok(None);
        }
        self.all_ws();
        if let Some(mut attribute) = self.attribute(AttrContext::StaticOrStringifier)? {
            attribute.is_static = true;
            return Ok(Some(Member::Attribute(attribute)));
        }
        if let Some(mut operation) = self.regular_operation()? {
            operation.is_static = true;
            return Ok(Some(Member::Operation(operation)));
        }
        Err(self.error("No body in static member"))
    }

    /// `stringifier` standing alone, or prefixing a non-inherited
    /// attribute or regular operation.
    fn stringifier(&mut self) -> Result<Option<Member>, ParseError> {
        if self.consume_keyword("stringifier").is_none() {
            return Ok(None);
        }
        self.all_ws();
        if self.consume_other(";").is_some() {
            return Ok(Some(Member::Stringifier(StringifierMember::default())));
        }
        if let Some(mut attribute) = self.attribute(AttrContext::StaticOrStringifier)? {
            attribute.stringifier = true;
            return Ok(Some(Member::Attribute(attribute)));
        }
        if let Some(mut operation) = self.regular_operation()? {
            operation.stringifier = true;
            return Ok(Some(Member::Operation(operation)));
        }
        Err(self.error("Unsupported stringifier member"))
    }

    /// `readonly? (iterable | legacyiterable | maplike | setlike) < … > ;`
    ///
    /// `readonly` is accepted only before `maplike`/`setlike`; when
    /// something else follows, the whole production rolls back so the
    /// attribute production can reclaim the `readonly`.
    fn iterable_member(&mut self) -> Result<Option<Member>, ParseError> {
        let start = self.checkpoint();
        let mut readonly = false;
        if self.consume_keyword("readonly").is_some() {
            readonly = true;
            self.all_ws();
        }
        let kinds: &[&str] = if readonly {
            &["maplike", "setlike"]
        } else {
            &["iterable", "legacyiterable", "maplike", "setlike"]
        };
        let Some(kind) = kinds
            .iter()
            .find(|kind| self.consume_keyword(kind).is_some())
            .copied()
        else {
            self.restore(start);
            return Ok(None);
        };
        let second_required = kind == "maplike";
        let second_allowed = second_required || kind == "iterable";
        self.all_ws();
        if self.consume_other("<").is_none() {
            return Err(self.error(format!("Error parsing {kind} declaration")));
        }
        let mut types = Vec::new();
        let Some(first) = self.type_with_extended_attributes(None)? else {
            return Err(self.error(format!("Error parsing {kind} declaration")));
        };
        types.push(first);
        self.all_ws();
        if second_allowed {
            if self.consume_other(",").is_some() {
                self.all_ws();
                if let Some(second) = self.type_with_extended_attributes(None)? {
                    types.push(second);
                    self.all_ws();
                }
            }
            if second_required && types.len() < 2 {
                return Err(self.error("Missing second type argument in maplike declaration"));
            }
        }
        if self.consume_other(">").is_none() {
            return Err(self.error(format!("Unterminated {kind} declaration")));
        }
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error(format!("Missing semicolon after {kind} declaration")));
        }
        let member = match kind {
            "iterable" => Member::Iterable(Iterable {
                idl_type: types,
                ext_attrs: Vec::new(),
                trivia: None,
            }),
            "legacyiterable" => Member::Legacyiterable(Iterable {
                idl_type: types,
                ext_attrs: Vec::new(),
                trivia: None,
            }),
            "maplike" => Member::Maplike(CollectionLike {
                readonly,
                idl_type: types,
                ext_attrs: Vec::new(),
                trivia: None,
            }),
            _ => Member::Setlike(CollectionLike {
                readonly,
                idl_type: types,
                ext_attrs: Vec::new(),
                trivia: None,
            }),
        };
        Ok(Some(member))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DefaultValue, Definition, Member};
    use crate::syntax::{parse, parse_with_options, ParseOptions};

    fn parse_members(body: &str) -> Vec<Member> {
        let source = format!("interface I {{ {body} }};");
        let defs = parse(&source).unwrap();
        match defs.into_iter().next().unwrap() {
            Definition::Interface(iface) => iface.members,
            other => panic!("expected interface, got {other:?}"),
        }
    }

    fn parse_member_err(body: &str) -> String {
        let source = format!("interface I {{ {body} }};");
        parse(&source).expect_err("expected error").message
    }

    #[test]
    fn const_members() {
        let members = parse_members(
            "const unsigned long long MAX = 0xFFFF; const MyType? NOTHING = null;",
        );
        let Member::Const(max) = &members[0] else {
            panic!("expected const");
        };
        assert_eq!(max.name, "MAX");
        assert_eq!(max.idl_type.name(), Some("unsigned long long"));
        assert_eq!(max.idl_type.role.as_deref(), Some("const-type"));
        assert!(!max.nullable);
        assert_eq!(max.value, DefaultValue::Number { value: "0xFFFF".into() });

        let Member::Const(nothing) = &members[1] else {
            panic!("expected const");
        };
        assert!(nothing.nullable);
        assert_eq!(nothing.value, DefaultValue::Null);
    }

    #[test]
    fn const_errors() {
        assert!(parse_member_err("const long = 1;").contains("No name for const"));
        assert!(parse_member_err("const long X 1;").contains("No value assignment for const"));
        assert!(parse_member_err("const long X = ;").contains("No value for const"));
        assert!(parse_member_err("const long X = 1").contains("Unterminated const"));
    }

    #[test]
    fn attribute_flags() {
        let members = parse_members(
            "attribute DOMString a; readonly attribute long b; inherit attribute long c; \
             inherit readonly attribute long d;",
        );
        let flags: Vec<(bool, bool)> = members
            .iter()
            .map(|m| match m {
                Member::Attribute(a) => (a.readonly, a.inherit),
                other => panic!("expected attribute, got {other:?}"),
            })
            .collect();
        assert_eq!(flags, vec![(false, false), (true, false), (false, true), (true, true)]);
    }

    #[test]
    fn attribute_rejects_sequence_and_record_types() {
        assert_eq!(
            parse_member_err("attribute sequence<long> x;"),
            "Got an error during or right after parsing `interface I`: \
             Attributes cannot accept sequence/record types"
        );
        assert!(
            parse_member_err("attribute record<DOMString, long> x;")
                .contains("Attributes cannot accept sequence/record types")
        );
    }

    #[test]
    fn static_members() {
        let members = parse_members("static attribute long a; static void run();");
        let Member::Attribute(attr) = &members[0] else {
            panic!("expected attribute");
        };
        assert!(attr.is_static && !attr.inherit);
        let Member::Operation(op) = &members[1] else {
            panic!("expected operation");
        };
        assert!(op.is_static);
        assert!(op.idl_type.is_void());
    }

    #[test]
    fn static_inherit_is_fatal() {
        assert!(
            parse_member_err("static inherit attribute long a;")
                .contains("Cannot have a static or stringifier inherit")
        );
        assert!(
            parse_member_err("stringifier inherit attribute long a;")
                .contains("Cannot have a static or stringifier inherit")
        );
    }

    #[test]
    fn stringifier_forms() {
        let members =
            parse_members("stringifier; stringifier attribute DOMString s; stringifier DOMString ();");
        assert!(matches!(members[0], Member::Stringifier(_)));
        let Member::Attribute(attr) = &members[1] else {
            panic!("expected attribute");
        };
        assert!(attr.stringifier);
        let Member::Operation(op) = &members[2] else {
            panic!("expected operation");
        };
        assert!(op.stringifier);
        assert_eq!(op.name, None);
    }

    #[test]
    fn special_operations() {
        let members = parse_members("getter long (unsigned long index); getter setter void named(DOMString name);");
        let Member::Operation(indexed) = &members[0] else {
            panic!("expected operation");
        };
        assert!(indexed.getter && !indexed.setter);
        assert_eq!(indexed.name, None);
        let Member::Operation(named) = &members[1] else {
            panic!("expected operation");
        };
        assert!(named.getter && named.setter);
        assert_eq!(named.name.as_deref(), Some("named"));
    }

    #[test]
    fn duplicate_special_prefix_is_fatal() {
        assert!(parse_member_err("getter getter void f();").contains("Duplicate getter in operation"));
    }

    #[test]
    fn iterable_family() {
        let members = parse_members(
            "iterable<long>; iterable<DOMString, long>; legacyiterable<long>; \
             maplike<DOMString, long>; readonly setlike<long>;",
        );
        let Member::Iterable(value_iter) = &members[0] else {
            panic!("expected iterable");
        };
        assert_eq!(value_iter.idl_type.len(), 1);
        let Member::Iterable(pair_iter) = &members[1] else {
            panic!("expected iterable");
        };
        assert_eq!(pair_iter.idl_type.len(), 2);
        assert!(matches!(members[2], Member::Legacyiterable(_)));
        let Member::Maplike(map) = &members[3] else {
            panic!("expected maplike");
        };
        assert!(!map.readonly);
        assert_eq!(map.idl_type.len(), 2);
        let Member::Setlike(set) = &members[4] else {
            panic!("expected setlike");
        };
        assert!(set.readonly);
        assert_eq!(set.idl_type.len(), 1);
    }

    #[test]
    fn iterable_family_errors() {
        assert!(parse_member_err("iterable;").contains("Error parsing iterable declaration"));
        assert!(
            parse_member_err("maplike<DOMString>;")
                .contains("Missing second type argument in maplike declaration")
        );
        assert!(
            parse_member_err("setlike<long, long>;").contains("Unterminated setlike declaration")
        );
        assert!(
            parse_member_err("iterable<long>")
                .contains("Missing semicolon after iterable declaration")
        );
    }

    #[test]
    fn nested_typedef_needs_the_option() {
        let source = "interface I { typedef long Int; };";
        assert!(parse(source).is_err());

        let options = ParseOptions {
            allow_nested_typedefs: true,
            ..ParseOptions::default()
        };
        let defs = parse_with_options(source, options).unwrap();
        let Definition::Interface(iface) = &defs[0] else {
            panic!("expected interface");
        };
        let Member::Typedef(td) = &iface.members[0] else {
            panic!("expected typedef member, got {:?}", iface.members[0]);
        };
        assert_eq!(td.name, "Int");
    }

    #[test]
    fn member_extended_attributes_are_attached() {
        let members = parse_members("[Unforgeable] readonly attribute DOMString href;");
        let Member::Attribute(attr) = &members[0] else {
            panic!("expected attribute");
        };
        assert_eq!(attr.ext_attrs.len(), 1);
        assert_eq!(attr.ext_attrs[0].name, "Unforgeable");
    }
}
