// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! End-to-end parses over realistic IDL fragments.
//!
//! These tests exercise the parser the way downstream tools use it: whole
//! multi-definition sources in, serialized definition trees out. The JSON
//! comparisons pin the externally stable AST shape.

use serde_json::json;
use webidl_core::ast::{Definition, Member};
use webidl_core::{parse, parse_with_options, ParseOptions};

/// A fetch-flavored slice of real-world IDL touching most productions.
const FETCH_FLAVORED: &str = r#"
typedef (Blob or BufferSource or DOMString) BodyInit;

enum RequestMode { "navigate", "same-origin", "no-cors", "cors" };

dictionary RequestInit {
  DOMString method = "GET";
  BodyInit? body;
  RequestMode mode;
  boolean keepalive;
};

[Exposed=(Window, Worker)]
interface Request {
  readonly attribute DOMString url;
  readonly attribute RequestMode mode;
  Request clone();
};

interface mixin Body {
  readonly attribute boolean bodyUsed;
  Promise<DOMString> text();
};

Request includes Body;

namespace FetchUtils {
  boolean canFetch(DOMString scheme);
};

callback FetchHandler = Promise<void> (Request request);
"#;

#[test]
fn fetch_flavored_corpus_parses() {
    let defs = parse(FETCH_FLAVORED).unwrap();
    assert_eq!(defs.len(), 8);

    let Definition::Typedef(body_init) = &defs[0] else {
        panic!("expected typedef first");
    };
    assert!(body_init.idl_type.union);

    let Definition::Enum(mode) = &defs[1] else {
        panic!("expected enum");
    };
    assert_eq!(mode.values.len(), 4);

    let Definition::Dictionary(init) = &defs[2] else {
        panic!("expected dictionary");
    };
    assert_eq!(init.members.len(), 4);
    let Member::Field(body) = &init.members[1] else {
        panic!("expected field");
    };
    assert!(body.idl_type.nullable);

    let Definition::Interface(request) = &defs[3] else {
        panic!("expected interface");
    };
    assert_eq!(request.ext_attrs.len(), 1);
    assert_eq!(request.ext_attrs[0].name, "Exposed");
    assert_eq!(request.members.len(), 3);

    let Definition::Mixin(mixin) = &defs[4] else {
        panic!("expected mixin");
    };
    let Member::Operation(text) = &mixin.members[1] else {
        panic!("expected operation");
    };
    assert_eq!(
        text.idl_type,
        webidl_core::ast::ReturnType::Type(Box::new(webidl_core::ast::IdlType::generic(
            Some("return-type"),
            "Promise",
            vec![webidl_core::ast::IdlType::named(None, "DOMString")],
        )))
    );

    let Definition::Includes(includes) = &defs[5] else {
        panic!("expected includes");
    };
    assert_eq!(includes.target, "Request");
    assert_eq!(includes.includes, "Body");

    assert!(matches!(&defs[6], Definition::Namespace(_)));
    assert!(matches!(&defs[7], Definition::Callback(_)));
}

#[test]
fn serialized_shape_matches_the_contract() {
    let defs = parse("interface Foo : Bar { readonly attribute DOMString baz; };").unwrap();
    assert_eq!(
        serde_json::to_value(&defs).unwrap(),
        json!([{
            "type": "interface",
            "name": "Foo",
            "partial": null,
            "inheritance": { "type": "identifier", "value": "Bar" },
            "extAttrs": [],
            "members": [{
                "type": "attribute",
                "name": "baz",
                "readonly": true,
                "inherit": false,
                "static": false,
                "stringifier": false,
                "extAttrs": [],
                "idlType": {
                    "type": "attribute-type",
                    "sequence": false,
                    "generic": null,
                    "nullable": false,
                    "union": false,
                    "idlType": "DOMString",
                    "extAttrs": [],
                },
            }],
        }])
    );
}

#[test]
fn serialized_operation_shape() {
    let defs = parse("interface I { getter void f(long... rest); };").unwrap();
    let value = serde_json::to_value(&defs).unwrap();
    assert_eq!(
        value[0]["members"][0],
        json!({
            "type": "operation",
            "name": "f",
            "getter": true,
            "setter": false,
            "deleter": false,
            "static": false,
            "stringifier": false,
            "extAttrs": [],
            "idlType": "void",
            "arguments": [{
                "name": "rest",
                "optional": false,
                "variadic": true,
                "extAttrs": [],
                "idlType": {
                    "type": "argument-type",
                    "sequence": false,
                    "generic": null,
                    "nullable": false,
                    "union": false,
                    "idlType": "long",
                    "extAttrs": [],
                },
            }],
        })
    );
}

#[test]
fn nullable_any_fails_with_the_documented_message() {
    let err = parse("interface X { attribute any? v; };").unwrap_err();
    assert!(
        err.message.contains("Type any cannot be made nullable"),
        "got: {}",
        err.message
    );
}

#[test]
fn duplicate_definition_error_carries_context_tokens() {
    let err = parse("interface A {}; interface A {};").unwrap_err();
    assert!(err
        .message
        .contains("The name \"A\" of type \"interface\" is already seen"));
    // The snapshot holds the unconsumed tail from the point of failure.
    assert_eq!(err.input, " {};");
    assert_eq!(err.line, 1);
}

#[test]
fn error_lines_accumulate_across_definitions() {
    let source = "interface A {};\ninterface B {};\ninterface C {\n  bogus!\n};";
    let err = parse(source).unwrap_err();
    assert_eq!(err.line, 4);
    assert!(err.message.starts_with(
        "Got an error during or right after parsing `interface C`:"
    ));
}

#[test]
fn ws_mode_preserves_member_trivia_verbatim() {
    let options = ParseOptions {
        ws: true,
        ..ParseOptions::default()
    };
    let source = "interface Log {\n  /* keep me */\n  void write(DOMString line);\n};";
    let defs = parse_with_options(source, options).unwrap();
    let Definition::Interface(log) = &defs[0] else {
        panic!("expected interface");
    };
    let Member::Operation(write) = &log.members[0] else {
        panic!("expected operation");
    };
    assert_eq!(write.trivia.as_deref(), Some("\n  /* keep me */\n  "));

    // The refined view classifies the same text.
    let refined = webidl_core::refine_trivia(write.trivia.as_deref().unwrap(), true);
    let tags: Vec<_> = refined.iter().map(webidl_core::TriviaLexeme::tag).collect();
    assert_eq!(tags, vec!["ws-pea", "multiline-comment-pea", "ws-pea"]);
}

#[test]
fn comments_anywhere_are_transparent() {
    let source = "interface /* a */ Foo /* b */ : /* c */ Bar // inherit\n{ /* d */ };";
    let defs = parse(source).unwrap();
    let Definition::Interface(iface) = &defs[0] else {
        panic!("expected interface");
    };
    assert_eq!(iface.name, "Foo");
    assert_eq!(iface.inheritance.as_ref().unwrap().text(), "Bar");
}

#[test]
fn full_member_zoo_round_trips_through_serde() {
    let source = "
        interface Zoo {
          const unsigned long long MAX = 42;
          attribute DOMString name;
          inherit attribute long depth;
          static readonly attribute long count;
          stringifier;
          getter Animal (unsigned long index);
          iterable<DOMString, Animal>;
        };
        dictionary AnimalInit {
          required DOMString species;
          sequence<DOMString> tags = [];
        };
    ";
    let defs = parse(source).unwrap();
    let serialized = serde_json::to_value(&defs).unwrap();
    let restored: Vec<Definition> = serde_json::from_value(serialized).unwrap();
    assert_eq!(restored, defs);
}
