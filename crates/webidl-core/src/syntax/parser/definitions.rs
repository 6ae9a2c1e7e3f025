// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Top-level definition productions: interfaces (plain, callback, mixin),
//! namespaces, dictionaries, enums, typedefs, callbacks, `partial`
//! wrappers, and the `implements`/`includes` statements.
//!
//! Each production reads its distinguishing keyword first and returns
//! `Ok(None)` untouched when it does not match, so the ordered dispatch in
//! the definitions loop stays single-lookahead. The `A implements B` and
//! `A includes B` forms are the exception: they must speculatively consume
//! an identifier and the following whitespace before deciding, and roll
//! both back when the second keyword is absent.

use ecow::EcoString;

use crate::ast::{
    Callback, ContainerTrivia, Definition, Dictionary, Enum, Field, Implements, Includes,
    Interface, Member, Namespace, Typedef,
};
use crate::syntax::{LexKind, Lexeme, ParseError};

use super::Parser;

impl Parser {
    /// `callback Name = ReturnType (args);` or a `callback interface`.
    pub(super) fn callback(&mut self) -> Result<Option<Definition>, ParseError> {
        if self.consume_keyword("callback").is_none() {
            return Ok(None);
        }
        self.all_ws();
        if self.consume_keyword("interface").is_some() {
            let name_trivia = self.all_ws();
            let interface = self.interface_rest(None, name_trivia, "callback interface")?;
            return Ok(Some(Definition::CallbackInterface(interface)));
        }
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for callback"));
        };
        let name = name.into_text();
        self.register_name(&name, "callback")?;
        self.set_current("callback", &name, false);
        self.all_ws();
        if self.consume_other("=").is_none() {
            return Err(self.error("No assignment in callback"));
        }
        self.all_ws();
        let idl_type = self.return_type()?;
        self.all_ws();
        if self.consume_other("(").is_none() {
            return Err(self.error("No arguments in callback"));
        }
        let arguments = self.argument_list()?;
        self.all_ws();
        if self.consume_other(")").is_none() {
            return Err(self.error("Unterminated callback"));
        }
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Unterminated callback, expected ;"));
        }
        Ok(Some(Definition::Callback(Callback {
            name,
            idl_type,
            arguments,
            ext_attrs: Vec::new(),
        })))
    }

    /// `interface Name … ;` or `interface mixin Name … ;`.
    pub(super) fn interface(
        &mut self,
        partial: Option<Lexeme>,
    ) -> Result<Option<Definition>, ParseError> {
        if self.consume_keyword("interface").is_none() {
            return Ok(None);
        }
        let after_keyword = self.all_ws();
        if self.consume_keyword("mixin").is_some() {
            return self.mixin_rest(partial, after_keyword).map(Some);
        }
        self.interface_rest(partial, after_keyword, "interface")
            .map(|iface| Some(Definition::Interface(iface)))
    }

    /// Everything after the `interface` keyword of a non-mixin interface.
    /// Shared by plain and callback interfaces; `kind` is the registry
    /// label and error-context kind.
    fn interface_rest(
        &mut self,
        partial: Option<Lexeme>,
        name_trivia: EcoString,
        kind: &'static str,
    ) -> Result<Interface, ParseError> {
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for interface"));
        };
        let name = name.into_text();
        if partial.is_none() {
            self.register_name(&name, kind)?;
        }
        self.set_current(kind, &name, partial.is_some());
        let mut trivia = ContainerTrivia {
            name: name_trivia,
            ..ContainerTrivia::default()
        };
        let inheritance = self.inheritance(&mut trivia)?;
        if self.consume_other("{").is_none() {
            return Err(self.error("Bogus interface body"));
        }
        let mut members = Vec::new();
        loop {
            let leading = self.all_ws();
            if self.consume_other("}").is_some() {
                trivia.close = leading;
                break;
            }
            let ext_attrs = self.extended_attrs()?;
            let mut member = self.interface_member()?;
            member.set_ext_attrs(ext_attrs);
            if self.options().ws {
                member.set_trivia(leading);
            }
            members.push(member);
        }
        trivia.termination = self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Missing semicolon after interface"));
        }
        Ok(Interface {
            name,
            partial,
            members,
            inheritance,
            ext_attrs: Vec::new(),
            trivia: self.options().ws.then_some(trivia),
        })
    }

    /// Everything after `interface mixin`.
    fn mixin_rest(
        &mut self,
        partial: Option<Lexeme>,
        mixin_trivia: EcoString,
    ) -> Result<Definition, ParseError> {
        let name_trivia = self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for interface"));
        };
        let name = name.into_text();
        if partial.is_none() {
            self.register_name(&name, "interface mixin")?;
        }
        self.set_current("interface mixin", &name, partial.is_some());
        let mut trivia = ContainerTrivia {
            mixin: Some(mixin_trivia),
            name: name_trivia,
            ..ContainerTrivia::default()
        };
        trivia.open = self.all_ws();
        if self.consume_other("{").is_none() {
            return Err(self.error("Bogus interface body"));
        }
        let mut members = Vec::new();
        loop {
            let leading = self.all_ws();
            if self.consume_other("}").is_some() {
                trivia.close = leading;
                break;
            }
            let ext_attrs = self.extended_attrs()?;
            let mut member = self.mixin_member()?;
            member.set_ext_attrs(ext_attrs);
            if self.options().ws {
                member.set_trivia(leading);
            }
            members.push(member);
        }
        trivia.termination = self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Missing semicolon after interface"));
        }
        Ok(Definition::Mixin(Interface {
            name,
            partial,
            members,
            inheritance: None,
            ext_attrs: Vec::new(),
            trivia: self.options().ws.then_some(trivia),
        }))
    }

    /// `: Parent` if present, capturing the trivia before the parent name
    /// and before the following `{`.
    fn inheritance(
        &mut self,
        trivia: &mut ContainerTrivia,
    ) -> Result<Option<Lexeme>, ParseError> {
        let before_colon = self.all_ws();
        if self.consume_other(":").is_none() {
            trivia.open = before_colon;
            return Ok(None);
        }
        trivia.base = Some(self.all_ws());
        let Some(parent) = self.consume_id() else {
            return Err(self.error("No type in inheritance"));
        };
        trivia.open = self.all_ws();
        Ok(Some(parent))
    }

    /// `partial` before a dictionary, interface, or namespace. The wrapped
    /// node keeps the `partial` keyword lexeme and skips name
    /// registration.
    pub(super) fn partial(&mut self) -> Result<Option<Definition>, ParseError> {
        let Some(keyword) = self.consume_keyword("partial") else {
            return Ok(None);
        };
        self.all_ws();
        if let Some(definition) = self.dictionary(Some(keyword.clone()))? {
            return Ok(Some(definition));
        }
        if let Some(definition) = self.interface(Some(keyword.clone()))? {
            return Ok(Some(definition));
        }
        if let Some(definition) = self.namespace(Some(keyword))? {
            return Ok(Some(definition));
        }
        Err(self.error("Nothing valid follows partial"))
    }

    /// `dictionary Name ( : Parent )? { fields } ;`
    pub(super) fn dictionary(
        &mut self,
        partial: Option<Lexeme>,
    ) -> Result<Option<Definition>, ParseError> {
        if self.consume_keyword("dictionary").is_none() {
            return Ok(None);
        }
        let name_trivia = self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for dictionary"));
        };
        let name = name.into_text();
        if partial.is_none() {
            self.register_name(&name, "dictionary")?;
        }
        self.set_current("dictionary", &name, partial.is_some());
        let mut trivia = ContainerTrivia {
            name: name_trivia,
            ..ContainerTrivia::default()
        };
        let inheritance = self.inheritance(&mut trivia)?;
        if self.consume_other("{").is_none() {
            return Err(self.error("Bogus dictionary body"));
        }
        let mut members = Vec::new();
        loop {
            let leading = self.all_ws();
            if self.consume_other("}").is_some() {
                trivia.close = leading;
                break;
            }
            let ext_attrs = self.extended_attrs()?;
            self.all_ws();
            let mut field = self.field()?;
            field.ext_attrs = ext_attrs;
            field.trivia = self.keep_trivia(leading);
            members.push(Member::Field(field));
        }
        trivia.termination = self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Missing semicolon after dictionary"));
        }
        Ok(Some(Definition::Dictionary(Dictionary {
            name,
            partial,
            members,
            inheritance,
            ext_attrs: Vec::new(),
            trivia: self.options().ws.then_some(trivia),
        })))
    }

    /// One dictionary field: `required? TYPE NAME ( = default )? ;`
    fn field(&mut self) -> Result<Field, ParseError> {
        let required = self.consume_keyword("required").is_some();
        let Some(idl_type) = self.type_with_extended_attributes(Some("dictionary-type"))? else {
            return Err(self.error("No type for dictionary member"));
        };
        self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for dictionary member"));
        };
        let default = self.default_assignment()?;
        if required && default.is_some() {
            return Err(self.error("Required member must not have a default"));
        }
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Unterminated dictionary member, expected ;"));
        }
        Ok(Field {
            name: name.into_text(),
            idl_type,
            required,
            default,
            ext_attrs: Vec::new(),
            trivia: None,
        })
    }

    /// `enum Name { "value", … } ;` — values may omit separating commas
    /// and may carry a trailing one; an empty body is allowed.
    pub(super) fn enum_(&mut self) -> Result<Option<Definition>, ParseError> {
        if self.consume_keyword("enum").is_none() {
            return Ok(None);
        }
        let name_trivia = self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for enum"));
        };
        let name = name.into_text();
        self.register_name(&name, "enum")?;
        self.set_current("enum", &name, false);
        let mut trivia = ContainerTrivia {
            name: name_trivia,
            ..ContainerTrivia::default()
        };
        trivia.open = self.all_ws();
        if self.consume_other("{").is_none() {
            return Err(self.error("No curly for enum"));
        }
        let mut values = Vec::new();
        loop {
            let leading = self.all_ws();
            if self.consume_other("}").is_some() {
                trivia.close = leading;
                break;
            }
            let Some(value) = self.consume(LexKind::String) else {
                return Err(self.error("Unexpected value in enum"));
            };
            values.push(value.text().trim_matches('"').into());
            self.all_ws();
            // Value separators are optional, and a trailing one is fine.
            let _ = self.consume_other(",");
        }
        trivia.termination = self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("No semicolon after enum"));
        }
        Ok(Some(Definition::Enum(Enum {
            name,
            values,
            ext_attrs: Vec::new(),
            trivia: self.options().ws.then_some(trivia),
        })))
    }

    /// `typedef TYPE NAME ;`, shared between the top level and (behind the
    /// nested-typedefs option) interface bodies.
    pub(super) fn typedef_(&mut self) -> Result<Option<Typedef>, ParseError> {
        if self.consume_keyword("typedef").is_none() {
            return Ok(None);
        }
        self.all_ws();
        let Some(idl_type) = self.type_with_extended_attributes(Some("typedef-type"))? else {
            return Err(self.error("No type in typedef"));
        };
        self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name in typedef"));
        };
        let name = name.into_text();
        self.register_name(&name, "typedef")?;
        self.set_current("typedef", &name, false);
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Unterminated typedef, expected ;"));
        }
        Ok(Some(Typedef {
            name,
            idl_type,
            ext_attrs: Vec::new(),
            trivia: None,
        }))
    }

    /// `A implements B ;`, rolling back cleanly when the `implements`
    /// keyword is absent so later dispatch can reconsider the identifier.
    pub(super) fn implements_(&mut self) -> Result<Option<Definition>, ParseError> {
        let start = self.checkpoint();
        let Some(target) = self.consume_id() else {
            return Ok(None);
        };
        self.all_ws();
        if self.consume_keyword("implements").is_none() {
            self.restore(start);
            return Ok(None);
        }
        self.all_ws();
        let Some(implements) = self.consume_id() else {
            return Err(self.error("Incomplete implements statement"));
        };
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("No terminating ; for implements statement"));
        }
        Ok(Some(Definition::Implements(Implements {
            target: target.into_text(),
            implements: implements.into_text(),
            ext_attrs: Vec::new(),
        })))
    }

    /// `A includes B ;`, with the same rollback behaviour as
    /// [`Parser::implements_`].
    pub(super) fn includes_(&mut self) -> Result<Option<Definition>, ParseError> {
        let start = self.checkpoint();
        let Some(target) = self.consume_id() else {
            return Ok(None);
        };
        self.all_ws();
        if self.consume_keyword("includes").is_none() {
            self.restore(start);
            return Ok(None);
        }
        self.all_ws();
        let Some(includes) = self.consume_id() else {
            return Err(self.error("Incomplete includes statement"));
        };
        self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("No terminating ; for includes statement"));
        }
        Ok(Some(Definition::Includes(Includes {
            target: target.into_text(),
            includes: includes.into_text(),
            ext_attrs: Vec::new(),
        })))
    }

    /// `namespace Name { members } ;`
    pub(super) fn namespace(
        &mut self,
        partial: Option<Lexeme>,
    ) -> Result<Option<Definition>, ParseError> {
        if self.consume_keyword("namespace").is_none() {
            return Ok(None);
        }
        let name_trivia = self.all_ws();
        let Some(name) = self.consume_id() else {
            return Err(self.error("No name for namespace"));
        };
        let name = name.into_text();
        if partial.is_none() {
            self.register_name(&name, "namespace")?;
        }
        self.set_current("namespace", &name, partial.is_some());
        let mut trivia = ContainerTrivia {
            name: name_trivia,
            ..ContainerTrivia::default()
        };
        trivia.open = self.all_ws();
        if self.consume_other("{").is_none() {
            return Err(self.error("Bogus namespace body"));
        }
        let mut members = Vec::new();
        loop {
            let leading = self.all_ws();
            if self.consume_other("}").is_some() {
                trivia.close = leading;
                break;
            }
            let ext_attrs = self.extended_attrs()?;
            let mut member = self.namespace_member()?;
            member.set_ext_attrs(ext_attrs);
            if self.options().ws {
                member.set_trivia(leading);
            }
            members.push(member);
        }
        trivia.termination = self.all_ws();
        if self.consume_other(";").is_none() {
            return Err(self.error("Missing semicolon after namespace"));
        }
        Ok(Some(Definition::Namespace(Namespace {
            name,
            partial,
            members,
            ext_attrs: Vec::new(),
            trivia: self.options().ws.then_some(trivia),
        })))
    }
}
