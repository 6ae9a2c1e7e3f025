// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Abstract Syntax Tree (AST) definitions for Web IDL.
//!
//! The AST is a tree of plain data: a parse produces a `Vec<Definition>` and
//! every node is owned by its parent. The serialized shape is the stable
//! external contract — each node carries a `type` discriminator string
//! (`"interface"`, `"callback interface"`, `"operation"`, …) and consumers
//! such as validators and binding generators read the tree as tagged unions.
//! Shared sub-records ([`IdlType`], [`Argument`], [`ExtendedAttribute`],
//! [`DefaultValue`]) are reused across variants.
//!
//! Two token-shaped fields deserve a note: `partial` and `inheritance` hold
//! the raw [`Lexeme`] they were parsed from (serialized as
//! `{"type": "identifier", "value": …}`), or `null` when absent. That keeps
//! a truthy marker for partial definitions and lets tools recover the exact
//! spelling of a parent name.
//!
//! # Example
//!
//! ```
//! use webidl_core::parse;
//! use webidl_core::ast::Definition;
//!
//! let defs = parse("interface Foo {};").unwrap();
//! match &defs[0] {
//!     Definition::Interface(iface) => assert_eq!(iface.name, "Foo"),
//!     _ => panic!("expected an interface"),
//! }
//! ```

use ecow::EcoString;
use serde::{Deserialize, Serialize};

use crate::syntax::Lexeme;

/// A top-level Web IDL definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Definition {
    /// `interface Name { … };`
    #[serde(rename = "interface")]
    Interface(Interface),
    /// `callback interface Name { … };`
    #[serde(rename = "callback interface")]
    CallbackInterface(Interface),
    /// `interface mixin Name { … };`
    #[serde(rename = "interface mixin")]
    Mixin(Interface),
    /// `namespace Name { … };`
    #[serde(rename = "namespace")]
    Namespace(Namespace),
    /// `dictionary Name { … };`
    #[serde(rename = "dictionary")]
    Dictionary(Dictionary),
    /// `enum Name { "a", "b" };`
    #[serde(rename = "enum")]
    Enum(Enum),
    /// `typedef Type Name;`
    #[serde(rename = "typedef")]
    Typedef(Typedef),
    /// `callback Name = ReturnType (args);`
    #[serde(rename = "callback")]
    Callback(Callback),
    /// `A implements B;`
    #[serde(rename = "implements")]
    Implements(Implements),
    /// `A includes B;`
    #[serde(rename = "includes")]
    Includes(Includes),
}

impl Definition {
    /// Attaches the extended attributes read before this definition.
    pub(crate) fn set_ext_attrs(&mut self, ext_attrs: Vec<ExtendedAttribute>) {
        match self {
            Self::Interface(d) | Self::CallbackInterface(d) | Self::Mixin(d) => {
                d.ext_attrs = ext_attrs;
            }
            Self::Namespace(d) => d.ext_attrs = ext_attrs,
            Self::Dictionary(d) => d.ext_attrs = ext_attrs,
            Self::Enum(d) => d.ext_attrs = ext_attrs,
            Self::Typedef(d) => d.ext_attrs = ext_attrs,
            Self::Callback(d) => d.ext_attrs = ext_attrs,
            Self::Implements(d) => d.ext_attrs = ext_attrs,
            Self::Includes(d) => d.ext_attrs = ext_attrs,
        }
    }
}

/// An `interface`, `callback interface`, or `interface mixin` definition.
///
/// All three share one record; mixins simply never carry inheritance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    /// The definition name.
    pub name: EcoString,
    /// The `partial` keyword lexeme for partial definitions, else `None`.
    pub partial: Option<Lexeme>,
    /// Interface members in declaration order.
    pub members: Vec<Member>,
    /// The parent name lexeme from `: Parent`, else `None`.
    pub inheritance: Option<Lexeme>,
    /// Extended attributes preceding the definition.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Whitespace captured around syntactic anchors (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<ContainerTrivia>,
}

/// A `namespace` definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    /// The definition name.
    pub name: EcoString,
    /// The `partial` keyword lexeme for partial definitions, else `None`.
    pub partial: Option<Lexeme>,
    /// Namespace members (attributes and operations) in declaration order.
    pub members: Vec<Member>,
    /// Extended attributes preceding the definition.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Whitespace captured around syntactic anchors (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<ContainerTrivia>,
}

/// A `dictionary` definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dictionary {
    /// The definition name.
    pub name: EcoString,
    /// The `partial` keyword lexeme for partial definitions, else `None`.
    pub partial: Option<Lexeme>,
    /// Dictionary fields in declaration order (each a [`Member::Field`]).
    pub members: Vec<Member>,
    /// The parent name lexeme from `: Parent`, else `None`.
    pub inheritance: Option<Lexeme>,
    /// Extended attributes preceding the definition.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Whitespace captured around syntactic anchors (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<ContainerTrivia>,
}

/// An `enum` definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    /// The definition name.
    pub name: EcoString,
    /// The enumeration values, unquoted.
    pub values: Vec<EcoString>,
    /// Extended attributes preceding the definition.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Whitespace captured around syntactic anchors (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<ContainerTrivia>,
}

/// A `typedef` definition, also usable as an interface member when nested
/// typedefs are enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typedef {
    /// The new type name.
    pub name: EcoString,
    /// The aliased type.
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    /// Extended attributes preceding the definition.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia when used as a member (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// A `callback` function type definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Callback {
    /// The callback name.
    pub name: EcoString,
    /// The return type.
    #[serde(rename = "idlType")]
    pub idl_type: ReturnType,
    /// The argument list.
    pub arguments: Vec<Argument>,
    /// Extended attributes preceding the definition.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
}

/// An `A implements B;` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implements {
    /// The implementing interface.
    pub target: EcoString,
    /// The implemented interface.
    pub implements: EcoString,
    /// Extended attributes preceding the statement.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
}

/// An `A includes B;` statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    /// The including interface.
    pub target: EcoString,
    /// The included mixin.
    pub includes: EcoString,
    /// Extended attributes preceding the statement.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
}

/// A member of an interface, mixin, namespace, or dictionary body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Member {
    /// `const Type name = value;`
    #[serde(rename = "const")]
    Const(Const),
    /// `attribute Type name;` and its readonly/inherit/static/stringifier
    /// variations.
    #[serde(rename = "attribute")]
    Attribute(Attribute),
    /// An operation, possibly with getter/setter/deleter/static/stringifier
    /// flags.
    #[serde(rename = "operation")]
    Operation(Operation),
    /// `iterable<T>` or `iterable<K, V>`.
    #[serde(rename = "iterable")]
    Iterable(Iterable),
    /// `legacyiterable<T>` (accepted but legacy).
    #[serde(rename = "legacyiterable")]
    Legacyiterable(Iterable),
    /// `maplike<K, V>`, optionally readonly.
    #[serde(rename = "maplike")]
    Maplike(CollectionLike),
    /// `setlike<T>`, optionally readonly.
    #[serde(rename = "setlike")]
    Setlike(CollectionLike),
    /// A standalone `stringifier;` member.
    #[serde(rename = "stringifier")]
    Stringifier(StringifierMember),
    /// A nested `typedef` (only with the nested-typedefs option).
    #[serde(rename = "typedef")]
    Typedef(Typedef),
    /// A dictionary field.
    #[serde(rename = "field")]
    Field(Field),
}

impl Member {
    /// Attaches the extended attributes read before this member.
    pub(crate) fn set_ext_attrs(&mut self, ext_attrs: Vec<ExtendedAttribute>) {
        match self {
            Self::Const(m) => m.ext_attrs = ext_attrs,
            Self::Attribute(m) => m.ext_attrs = ext_attrs,
            Self::Operation(m) => m.ext_attrs = ext_attrs,
            Self::Iterable(m) | Self::Legacyiterable(m) => m.ext_attrs = ext_attrs,
            Self::Maplike(m) | Self::Setlike(m) => m.ext_attrs = ext_attrs,
            Self::Stringifier(m) => m.ext_attrs = ext_attrs,
            Self::Typedef(m) => m.ext_attrs = ext_attrs,
            Self::Field(m) => m.ext_attrs = ext_attrs,
        }
    }

    /// Stores the trivia drained just before this member (`ws` option only).
    pub(crate) fn set_trivia(&mut self, trivia: EcoString) {
        let slot = match self {
            Self::Const(m) => &mut m.trivia,
            Self::Attribute(m) => &mut m.trivia,
            Self::Operation(m) => &mut m.trivia,
            Self::Iterable(m) | Self::Legacyiterable(m) => &mut m.trivia,
            Self::Maplike(m) | Self::Setlike(m) => &mut m.trivia,
            Self::Stringifier(m) => &mut m.trivia,
            Self::Typedef(m) => &mut m.trivia,
            Self::Field(m) => &mut m.trivia,
        };
        *slot = Some(trivia);
    }
}

/// A `const` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    /// The constant name.
    pub name: EcoString,
    /// The constant's type (role `const-type`).
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    /// Whether a `?` followed the type. The suffix belongs to the member,
    /// not the descriptor.
    pub nullable: bool,
    /// The constant value.
    pub value: DefaultValue,
    /// Extended attributes preceding the member.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// An `attribute` member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// The attribute name.
    pub name: EcoString,
    /// The attribute's type (role `attribute-type`). Never a `sequence<…>`
    /// or `record<…, …>`.
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    /// `readonly attribute …`
    pub readonly: bool,
    /// `inherit attribute …` (mutually exclusive with static/stringifier).
    pub inherit: bool,
    /// Declared under a `static` prefix.
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Declared under a `stringifier` prefix.
    pub stringifier: bool,
    /// Extended attributes preceding the member.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// An operation member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The operation name, absent for special forms like bare getters.
    pub name: Option<EcoString>,
    /// The return type.
    #[serde(rename = "idlType")]
    pub idl_type: ReturnType,
    /// The argument list.
    pub arguments: Vec<Argument>,
    /// `getter` prefix.
    pub getter: bool,
    /// `setter` prefix.
    pub setter: bool,
    /// `deleter` prefix.
    pub deleter: bool,
    /// Declared under a `static` prefix.
    #[serde(rename = "static")]
    pub is_static: bool,
    /// Declared under a `stringifier` prefix.
    pub stringifier: bool,
    /// Extended attributes preceding the member.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// An `iterable<…>` or `legacyiterable<…>` declaration member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Iterable {
    /// One type slot (value iterator) or two (pair iterator).
    #[serde(rename = "idlType")]
    pub idl_type: Vec<IdlType>,
    /// Extended attributes preceding the member.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// A `maplike<…>` or `setlike<…>` declaration member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionLike {
    /// `readonly maplike/setlike`.
    pub readonly: bool,
    /// Two type slots for maplike, one for setlike.
    #[serde(rename = "idlType")]
    pub idl_type: Vec<IdlType>,
    /// Extended attributes preceding the member.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// A standalone `stringifier;` member.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StringifierMember {
    /// Extended attributes preceding the member.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// A dictionary field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// The field name.
    pub name: EcoString,
    /// The field's type (role `dictionary-type`).
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    /// `required` fields never carry a default.
    pub required: bool,
    /// The default value from `= …`, if given.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<DefaultValue>,
    /// Extended attributes preceding the field.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// A type descriptor.
///
/// `idl_type` holds a plain name for simple types, a list for unions and
/// generics, and (through nesting) arbitrary combinations of the two.
/// The legacy `sequence` flag is maintained alongside `generic`: it is true
/// exactly when `generic` is `"sequence"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdlType {
    /// The syntactic role of this type (`"attribute-type"`,
    /// `"return-type"`, …), or `None` for nested types.
    #[serde(rename = "type")]
    pub role: Option<EcoString>,
    /// Legacy flag, true iff `generic == Some("sequence")`.
    pub sequence: bool,
    /// The generic constructor name (`sequence`, `record`, `Promise`, …)
    /// when this type is generic.
    pub generic: Option<EcoString>,
    /// Whether a `?` suffix applies.
    pub nullable: bool,
    /// Whether this is a union type.
    pub union: bool,
    /// The type body.
    #[serde(rename = "idlType")]
    pub idl_type: IdlTypeValue,
    /// Extended attributes attached to the type.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
}

impl IdlType {
    /// A simple named type in the given syntactic role.
    #[must_use]
    pub fn named(role: Option<&str>, name: impl Into<EcoString>) -> Self {
        Self {
            role: role.map(EcoString::from),
            sequence: false,
            generic: None,
            nullable: false,
            union: false,
            idl_type: IdlTypeValue::Name(name.into()),
            ext_attrs: Vec::new(),
        }
    }

    /// A generic type such as `sequence<T>` or `record<K, V>`. Sets the
    /// legacy `sequence` flag from the constructor name so the two can
    /// never disagree.
    #[must_use]
    pub fn generic(role: Option<&str>, name: impl Into<EcoString>, inner: Vec<Self>) -> Self {
        let name = name.into();
        Self {
            role: role.map(EcoString::from),
            sequence: name == "sequence",
            generic: Some(name),
            nullable: false,
            union: false,
            idl_type: IdlTypeValue::Types(inner),
            ext_attrs: Vec::new(),
        }
    }

    /// A union type `(T or U or …)`.
    #[must_use]
    pub fn union(role: Option<&str>, members: Vec<Self>) -> Self {
        Self {
            role: role.map(EcoString::from),
            sequence: false,
            generic: None,
            nullable: false,
            union: true,
            idl_type: IdlTypeValue::Types(members),
            ext_attrs: Vec::new(),
        }
    }

    /// Returns the simple type name, if this is a plain named type.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match &self.idl_type {
            IdlTypeValue::Name(name) => Some(name),
            _ => None,
        }
    }
}

/// The body of a type descriptor: a name, a nested descriptor, or a list of
/// descriptors (unions and generics).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IdlTypeValue {
    /// A plain type name such as `DOMString`.
    Name(EcoString),
    /// A single nested descriptor.
    Type(Box<IdlType>),
    /// Union members or generic type arguments.
    Types(Vec<IdlType>),
}

/// An operation or callback return type: either a full descriptor or the
/// bare `void` keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReturnType {
    /// A full type descriptor with role `return-type`.
    Type(Box<IdlType>),
    /// The `void` keyword, serialized as the bare string it parses from.
    Keyword(EcoString),
}

impl ReturnType {
    /// The `void` return type.
    #[must_use]
    pub fn void() -> Self {
        Self::Keyword("void".into())
    }

    /// Returns true for the `void` return type.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Keyword(k) if k == "void")
    }
}

/// An argument of an operation, callback, or extended attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    /// The argument name.
    pub name: EcoString,
    /// The argument's type (role `argument-type`).
    #[serde(rename = "idlType")]
    pub idl_type: IdlType,
    /// `optional` prefix.
    pub optional: bool,
    /// `...` suffix on the type (never combined with `optional`).
    pub variadic: bool,
    /// The default value; present only when `optional` and `= …` was given.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<DefaultValue>,
    /// Extended attributes preceding the argument.
    #[serde(rename = "extAttrs")]
    pub ext_attrs: Vec<ExtendedAttribute>,
    /// Leading trivia (`ws` option only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trivia: Option<EcoString>,
}

/// A single extended attribute inside a `[…]` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedAttribute {
    /// The attribute name.
    pub name: EcoString,
    /// The argument list from `(…)`, or `None` when no parentheses follow.
    pub arguments: Option<Vec<Argument>>,
    /// The right-hand side from `= …`, if any.
    pub rhs: Option<ExtAttrRhs>,
}

/// The right-hand side of an extended attribute assignment.
///
/// Single-token values keep their raw lexeme text (strings keep their
/// quotes); identifier values are underscore-unescaped like any consumed
/// identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExtAttrRhs {
    /// `[A=Ident]`
    #[serde(rename = "identifier")]
    Identifier {
        /// The identifier text.
        value: EcoString,
    },
    /// `[A=3.5]`
    #[serde(rename = "float")]
    Float {
        /// The raw float literal.
        value: EcoString,
    },
    /// `[A=42]`
    #[serde(rename = "integer")]
    Integer {
        /// The raw integer literal.
        value: EcoString,
    },
    /// `[A="text"]`
    #[serde(rename = "string")]
    String {
        /// The raw string literal, quotes included.
        value: EcoString,
    },
    /// `[A=(B, C)]`
    #[serde(rename = "identifier-list")]
    IdentifierList {
        /// The listed identifiers.
        value: Vec<EcoString>,
    },
}

/// A default or constant value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DefaultValue {
    /// `true` or `false`.
    #[serde(rename = "boolean")]
    Boolean {
        /// The literal value.
        value: bool,
    },
    /// `null`.
    #[serde(rename = "null")]
    Null,
    /// `Infinity` or `-Infinity`.
    #[serde(rename = "Infinity")]
    Infinity {
        /// Whether the value is `-Infinity`.
        negative: bool,
    },
    /// `NaN`.
    #[serde(rename = "NaN")]
    NaN,
    /// A numeric literal, kept as its raw text.
    #[serde(rename = "number")]
    Number {
        /// The raw literal.
        value: EcoString,
    },
    /// A string literal, unquoted.
    #[serde(rename = "string")]
    String {
        /// The string content.
        value: EcoString,
    },
    /// An empty sequence default `[]`.
    #[serde(rename = "sequence")]
    Sequence {
        /// Always empty: only `[]` is a valid sequence default.
        value: Vec<DefaultValue>,
    },
}

/// Whitespace captured between the syntactic anchors of a container
/// definition when the `ws` option is on.
///
/// Trivia is advisory data for formatting-preserving consumers; no
/// correctness invariant depends on it, and fields may be empty strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContainerTrivia {
    /// Before the parent name in `: Parent`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub base: Option<EcoString>,
    /// Before the `mixin` keyword (mixins only).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub mixin: Option<EcoString>,
    /// Before the definition name.
    pub name: EcoString,
    /// Before the opening `{`.
    pub open: EcoString,
    /// Before the closing `}`.
    pub close: EcoString,
    /// Before the terminating `;`.
    pub termination: EcoString,
}
