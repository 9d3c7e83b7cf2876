//! Root elements and declarations.

use ostw_ir::ast::{
    Class, ClassKind, Constructor, Declaration, Enum, EnumValue, Expr, FunctionBody,
    FunctionDeclaration, Hook, Ident, Import, Reservation, RootContext, RootItem, Rule,
    RuleCondition, RuleSetting, Subroutine, SubroutineScope, TargetVariable, TypeAlias,
    VariableDeclaration, WorkshopTarget,
};
use ostw_ir::TokenKind;

use super::unquote;
use crate::Parser;

struct VariableTail {
    workshop_id: Option<String>,
    extended: bool,
    target: Option<WorkshopTarget>,
    value: Option<Expr>,
    is_macro: bool,
}

impl Parser<'_> {
    /// Parse one element at the top level of the document.
    pub(crate) fn parse_root_element(&mut self, root: &mut RootContext) {
        if matches!(
            self.next_non_decorative(),
            TokenKind::Class | TokenKind::Struct
        ) {
            let class = self.parse_class();
            root.items.push(RootItem::Class(class));
            return;
        }

        match self.current_kind() {
            TokenKind::WorkshopVariables | TokenKind::WorkshopSubroutines => {
                let collection = self.parse_variable_collection();
                root.items.push(RootItem::VariableCollection(collection));
                return;
            }
            TokenKind::WorkshopSettings => {
                let settings = self.parse_lobby_settings();
                root.items.push(RootItem::LobbySettings(settings));
                return;
            }
            _ => {}
        }

        if self.is_vanilla_rule() {
            let rule = self.parse_vanilla_rule();
            root.items.push(RootItem::VanillaRule(rule));
            return;
        }

        match self.current_kind() {
            TokenKind::Rule | TokenKind::Disabled => {
                let rule = self.parse_rule();
                root.items.push(RootItem::Rule(rule));
            }
            TokenKind::Enum => {
                let value = self.parse_enum();
                root.items.push(RootItem::Enum(value));
            }
            TokenKind::Import => {
                let import = self.parse_import();
                root.items.push(RootItem::Import(import));
            }
            TokenKind::Type => {
                let alias = self.parse_type_alias();
                root.items.push(RootItem::TypeAlias(alias));
            }
            TokenKind::GlobalVar if self.peek_kind(1) == TokenKind::OpenCurly => {
                let reserved = self.parse_reservations();
                root.globalvar_reservations.extend(reserved);
            }
            TokenKind::PlayerVar if self.peek_kind(1) == TokenKind::OpenCurly => {
                let reserved = self.parse_reservations();
                root.playervar_reservations.extend(reserved);
            }
            _ => {
                if self.is_declaration(true) {
                    let declaration = self.parse_variable_or_function();
                    root.items.push(RootItem::Declaration(declaration));
                } else if self.is_hook() {
                    let hook = self.parse_hook();
                    root.hooks.push(hook);
                } else if self.check(TokenKind::ActionComment) {
                    // Documents nothing a declaration could claim.
                    self.parse_meta_comment();
                } else {
                    self.unexpected(true);
                }
            }
        }
    }

    /// Kind of the first token that is not an action comment or `single`.
    fn next_non_decorative(&mut self) -> TokenKind {
        let mut offset = 0;
        loop {
            match self.peek_kind(offset) {
                TokenKind::ActionComment | TokenKind::Single => offset += 1,
                kind => return kind,
            }
        }
    }

    /// `import "file" [as name];`
    fn parse_import(&mut self) -> Import {
        let start = self.start();
        self.parse_expected(TokenKind::Import);
        let file = self.parse_string_value();
        let alias = if self.parse_optional(TokenKind::As).is_some() {
            Some(self.parse_name())
        } else {
            None
        };
        self.parse_expected(TokenKind::Semicolon);
        Import {
            file,
            alias,
            range: self.range_from(start),
        }
    }

    /// `globalvar { "name", 5 }`
    fn parse_reservations(&mut self) -> Vec<Reservation> {
        self.advance();
        self.parse_expected(TokenKind::OpenCurly);
        let reserved = self.parse_delimited_list(
            TokenKind::CloseCurly,
            |p| matches!(p.current_kind(), TokenKind::String | TokenKind::Number),
            |p| {
                let token = p.current();
                p.advance();
                let text = if token.kind == TokenKind::String {
                    unquote(&token.text)
                } else {
                    token.text
                };
                Reservation {
                    text,
                    range: token.range,
                }
            },
        );
        self.parse_expected(TokenKind::CloseCurly);
        reserved
    }

    /// `[disabled] rule: "name" [order] Setting.Value* [if (cond)]* body`
    fn parse_rule(&mut self) -> Rule {
        self.incremental_node(|p| {
            let start = p.start();
            let disabled = p.parse_optional(TokenKind::Disabled).is_some();
            p.parse_expected(TokenKind::Rule);
            p.parse_expected(TokenKind::Colon);
            let name = p.parse_string_value();

            let is_number = p.check(TokenKind::Number)
                || (p.check(TokenKind::Minus) && p.peek_kind(1) == TokenKind::Number);
            let order = is_number.then(|| p.parse_number());

            let mut settings = Vec::new();
            while let Some(token) = p.parse_optional(TokenKind::Identifier) {
                let setting_start = token.range.start;
                let setting = Ident::new(token.text, token.range);
                p.parse_expected(TokenKind::Dot);
                let value = p.parse_name();
                settings.push(RuleSetting {
                    setting,
                    value,
                    range: p.range_from(setting_start),
                });
            }

            let mut conditions = Vec::new();
            while p.is_after_meta_comment(TokenKind::If) {
                let condition_start = p.start();
                let comment = p.parse_meta_comment();
                p.parse_expected(TokenKind::If);
                p.parse_expected(TokenKind::OpenParen);
                let condition = p.parse_expression();
                p.parse_expected(TokenKind::CloseParen);
                conditions.push(RuleCondition {
                    comment,
                    condition,
                    range: p.range_from(condition_start),
                });
            }

            let body = Box::new(p.parse_statement(true));
            Rule {
                disabled,
                name,
                order,
                settings,
                conditions,
                body,
                range: p.range_from(start),
            }
        })
    }

    /// `type Name = Type;`
    fn parse_type_alias(&mut self) -> TypeAlias {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::Type);
            let name = p.parse_name();
            p.parse_expected(TokenKind::Equal);
            let ty = p.parse_type();
            p.parse_expected(TokenKind::Semicolon);
            TypeAlias {
                name,
                ty,
                range: p.range_from(start),
            }
        })
    }

    /// `[single] class|struct Name [<T>] [: Base, ...] { members }`
    fn parse_class(&mut self) -> Class {
        self.incremental_node(|p| {
            let start = p.start();
            let comment = p.parse_meta_comment();
            let single = p.parse_optional(TokenKind::Single).is_some();
            let kind = match p.parse_expected_any(&[TokenKind::Class, TokenKind::Struct]) {
                Some(token) if token.kind == TokenKind::Struct => ClassKind::Struct,
                _ => ClassKind::Class,
            };
            let name = p.parse_name();
            let type_params = p.parse_optional_type_params().unwrap_or_default();

            let mut inherits = Vec::new();
            if p.parse_optional(TokenKind::Colon).is_some() {
                loop {
                    inherits.push(p.parse_type());
                    if p.parse_optional(TokenKind::Comma).is_none() {
                        break;
                    }
                }
            }

            p.parse_expected(TokenKind::OpenCurly);
            let mut declarations = Vec::new();
            let mut constructors = Vec::new();
            while !p.check(TokenKind::CloseCurly) && !p.is_at_end() {
                if p.is_declaration(true) {
                    declarations.push(p.parse_variable_or_function());
                } else if p.is_constructor() {
                    constructors.push(p.parse_constructor());
                } else if p.current_kind().is_skippable() {
                    p.unexpected(false);
                } else {
                    break;
                }
            }
            p.parse_expected(TokenKind::CloseCurly);

            Class {
                comment,
                single,
                kind,
                name,
                type_params,
                inherits,
                declarations,
                constructors,
                range: p.range_from(start),
            }
        })
    }

    /// `enum Name { A, B = value }`
    fn parse_enum(&mut self) -> Enum {
        self.incremental_node(|p| {
            let start = p.start();
            p.parse_expected(TokenKind::Enum);
            let name = p.parse_name();
            p.parse_expected(TokenKind::OpenCurly);

            let mut values = Vec::new();
            if !p.check(TokenKind::CloseCurly) {
                loop {
                    let value_start = p.start();
                    let name = p.parse_name();
                    let value = if p.parse_optional(TokenKind::Equal).is_some() {
                        Some(p.parse_expression())
                    } else {
                        None
                    };
                    values.push(EnumValue {
                        name,
                        value,
                        range: p.range_from(value_start),
                    });
                    if p.parse_optional(TokenKind::Comma).is_none() {
                        break;
                    }
                }
            }
            p.parse_expected(TokenKind::CloseCurly);

            Enum {
                name,
                values,
                range: p.range_from(start),
            }
        })
    }

    /// `a.b = value;` at the top level.
    fn parse_hook(&mut self) -> Hook {
        let start = self.start();
        let variable = self.parse_expression();
        self.parse_expected(TokenKind::Equal);
        let value = self.parse_expression();
        self.parse_expected(TokenKind::Semicolon);
        Hook {
            variable,
            value,
            range: self.range_from(start),
        }
    }

    /// A variable or function declaration in a class or at the top level.
    fn parse_variable_or_function(&mut self) -> Declaration {
        let start = self.start();
        let comment = self.parse_meta_comment();
        let attributes = self.parse_attributes();
        let ty = self.parse_type();
        let name = self.parse_name();
        let type_params = self.parse_optional_type_params();

        if type_params.is_none() && !self.check(TokenKind::OpenParen) {
            let tail = self.parse_variable_tail(true);
            return Declaration::Variable(VariableDeclaration {
                comment,
                attributes,
                ty,
                name,
                workshop_id: tail.workshop_id,
                extended: tail.extended,
                target: tail.target,
                value: tail.value,
                is_macro: tail.is_macro,
                range: self.range_from(start),
            });
        }

        self.parse_expected(TokenKind::OpenParen);
        let params = self.parse_parameters();
        self.parse_expected(TokenKind::CloseParen);

        let body = if self.parse_optional(TokenKind::Colon).is_some() {
            let value = self.parse_expression();
            self.parse_expected(TokenKind::Semicolon);
            FunctionBody::Macro(value)
        } else {
            let subroutine = self.parse_subroutine();
            FunctionBody::Block {
                subroutine,
                block: self.parse_block(),
            }
        };

        Declaration::Function(FunctionDeclaration {
            comment,
            attributes,
            return_type: ty,
            name,
            type_params: type_params.unwrap_or_default(),
            params,
            body,
            range: self.range_from(start),
        })
    }

    /// `[globalvar|playervar] "Name" [: "Target"]` before a function body.
    fn parse_subroutine(&mut self) -> Option<Subroutine> {
        let scope = match self.current_kind() {
            TokenKind::GlobalVar => Some(SubroutineScope::Global),
            TokenKind::PlayerVar => Some(SubroutineScope::Player),
            _ => None,
        };
        let name = if scope.is_some() {
            self.advance();
            self.parse_string_value()
        } else {
            self.parse_optional(TokenKind::String)
                .map(|token| unquote(&token.text))
        };
        let target = if name.is_some() && self.parse_optional(TokenKind::Colon).is_some() {
            self.parse_string_value()
        } else {
            None
        };

        (scope.is_some() || name.is_some()).then_some(Subroutine {
            scope,
            name,
            target,
        })
    }

    /// A variable declaration: a statement, a parameter or a class field.
    pub(crate) fn parse_declaration(&mut self, semicolon: bool) -> VariableDeclaration {
        let start = self.start();
        let comment = self.parse_meta_comment();
        let attributes = self.parse_attributes();
        let ty = self.parse_type();
        let name = self.parse_name();

        let tail = self.parse_variable_tail(semicolon);
        VariableDeclaration {
            comment,
            attributes,
            ty,
            name,
            workshop_id: tail.workshop_id,
            extended: tail.extended,
            target: tail.target,
            value: tail.value,
            is_macro: tail.is_macro,
            range: self.range_from(start),
        }
    }

    /// Everything after a variable's name: workshop id, extended marker
    /// or target list, then the value.
    fn parse_variable_tail(&mut self, semicolon: bool) -> VariableTail {
        let mut workshop_id = None;
        let mut extended = false;
        let mut target = None;
        if let Some(id) = self.parse_optional(TokenKind::Number) {
            workshop_id = Some(id.text);
        } else if self.parse_optional(TokenKind::Exclamation).is_some() {
            extended = true;
        } else {
            target = self.parse_optional_target();
        }

        let mut is_macro = false;
        let value = if self.parse_optional(TokenKind::Equal).is_some() {
            Some(self.parse_expression())
        } else if self.parse_optional(TokenKind::Colon).is_some() {
            is_macro = true;
            Some(self.parse_expression())
        } else {
            None
        };

        if semicolon {
            self.parse_expected(TokenKind::Semicolon);
        }

        VariableTail {
            workshop_id,
            extended,
            target,
            value,
            is_macro,
        }
    }

    /// `{"a"[0], "b"[..]}`
    fn parse_optional_target(&mut self) -> Option<WorkshopTarget> {
        let start = self.start();
        self.parse_optional(TokenKind::OpenCurly)?;

        let mut targets = Vec::new();
        loop {
            if let Some(name) = self.parse_string_value() {
                let mut indexer = Vec::new();
                while self.parse_optional(TokenKind::OpenSquare).is_some() {
                    if self.parse_optional(TokenKind::Spread).is_some() {
                        indexer.push(None);
                    } else {
                        indexer.push(Some(self.parse_expression()));
                    }
                    self.parse_expected(TokenKind::CloseSquare);
                }
                targets.push(TargetVariable { name, indexer });
            }
            if self.parse_optional(TokenKind::Comma).is_none() {
                break;
            }
        }
        self.parse_expected(TokenKind::CloseCurly);

        Some(WorkshopTarget {
            targets,
            range: self.range_from(start),
        })
    }

    /// Comma-separated parameter declarations, possibly none.
    fn parse_parameters(&mut self) -> Vec<VariableDeclaration> {
        let mut params = Vec::new();
        let kind = self.current_kind();
        if matches!(kind, TokenKind::Ref | TokenKind::In) || kind.is_start_of_type() {
            loop {
                params.push(self.parse_declaration(false));
                if self.parse_optional(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        params
    }

    /// `[attributes] constructor(params) ["subroutine"] { }`
    fn parse_constructor(&mut self) -> Constructor {
        let start = self.start();
        self.parse_meta_comment();
        let attributes = self.parse_attributes();
        self.parse_expected(TokenKind::Constructor);
        self.parse_expected(TokenKind::OpenParen);
        let params = self.parse_parameters();
        self.parse_expected(TokenKind::CloseParen);
        let subroutine = self
            .parse_optional(TokenKind::String)
            .map(|token| unquote(&token.text));
        let body = self.parse_block();
        Constructor {
            attributes,
            params,
            subroutine,
            body,
            range: self.range_from(start),
        }
    }

    /// An identifier, or a missing name where it should have been.
    pub(crate) fn parse_name(&mut self) -> Ident {
        let at = self.start();
        self.parse_expected(TokenKind::Identifier)
            .map_or_else(|| Ident::missing(at), |token| Ident::new(token.text, token.range))
    }

    /// Whether a declaration starts here: comments, attributes, a type and
    /// a name followed by something only a declaration can have.
    pub(crate) fn is_declaration(&mut self, function: bool) -> bool {
        self.look_ahead(|p| {
            p.parse_meta_comment();
            p.parse_attributes();
            if !p.parse_type_checked().valid || p.parse_expected(TokenKind::Identifier).is_none()
            {
                return false;
            }
            match p.current_kind() {
                TokenKind::Semicolon
                | TokenKind::Equal
                | TokenKind::Exclamation
                | TokenKind::Number
                | TokenKind::Colon
                | TokenKind::OpenCurly
                | TokenKind::Eof => true,
                TokenKind::OpenParen | TokenKind::LessThan => function,
                _ => false,
            }
        })
    }

    fn is_constructor(&mut self) -> bool {
        self.look_ahead(|p| {
            p.parse_meta_comment();
            p.parse_attributes();
            p.check(TokenKind::Constructor)
        })
    }

    /// `a.b.c =` at the top level.
    fn is_hook(&mut self) -> bool {
        self.look_ahead(|p| {
            let mut any = false;
            loop {
                any |= p.parse_expected(TokenKind::Identifier).is_some();
                if p.parse_optional(TokenKind::Dot).is_none() {
                    break;
                }
            }
            any && p.check(TokenKind::Equal)
        })
    }
}

#[cfg(test)]
mod tests;
