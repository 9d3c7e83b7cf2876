//! Type annotation parsing.
//!
//! ```text
//! type   = "void" | ["const"] ( named | "(" types ")" ) [ "=>" type ]
//! named  = (Identifier | "define") ["<" type {"," type} ">"] {"[" "]"} {"|" type}
//! ```
//!
//! A parenthesized list is a lambda's parameter list unless it holds
//! exactly one type and no arrow follows, in which case it is a group.

use ostw_ir::ast::{Ident, NamedType, TypeExpr, TypeKind, TypeParam};
use ostw_ir::{Position, TokenKind};

use crate::stack::ensure_sufficient_stack;
use crate::Parser;

/// A parsed type and whether lookahead may treat it as a real type.
pub(crate) struct ParsedType {
    pub(crate) ty: TypeExpr,
    pub(crate) valid: bool,
}

impl Parser<'_> {
    pub(crate) fn parse_type(&mut self) -> TypeExpr {
        self.parse_type_checked().ty
    }

    /// Parse a type and report whether it is complete enough for a
    /// declaration probe: named types need their name, lambdas their arrow.
    pub(crate) fn parse_type_checked(&mut self) -> ParsedType {
        ensure_sufficient_stack(|| self.parse_type_inner())
    }

    fn parse_type_inner(&mut self) -> ParsedType {
        let start = self.start();

        if self.parse_optional(TokenKind::Void).is_some() {
            return ParsedType {
                ty: TypeExpr {
                    kind: TypeKind::Void,
                    range: self.range_from(start),
                },
                valid: true,
            };
        }

        let is_const = self.parse_optional(TokenKind::Const).is_some();

        if self.parse_optional(TokenKind::OpenParen).is_none() {
            let mut parsed = self.parse_named_type(start);

            while self.parse_optional(TokenKind::Pipe).is_some() {
                let right = self.parse_type_checked();
                parsed = ParsedType {
                    ty: TypeExpr {
                        kind: TypeKind::Pipe(Box::new(parsed.ty), Box::new(right.ty)),
                        range: self.range_from(start),
                    },
                    valid: true,
                };
            }

            // `const` only qualifies lambda types.
            let has_arrow = if is_const {
                self.parse_expected(TokenKind::Arrow).is_some()
            } else {
                self.parse_optional(TokenKind::Arrow).is_some()
            };
            if !has_arrow {
                return parsed;
            }

            let ret = self.parse_type_checked();
            return ParsedType {
                ty: TypeExpr {
                    kind: TypeKind::Lambda {
                        params: vec![parsed.ty],
                        is_const,
                        ret: Box::new(ret.ty),
                    },
                    range: self.range_from(start),
                },
                valid: ret.valid,
            };
        }

        let mut params = self.parse_delimited_list(
            TokenKind::CloseParen,
            |p| p.current_kind().is_start_of_type(),
            |p| p.parse_type_checked(),
        );
        self.parse_expected(TokenKind::CloseParen);

        let has_arrow = if params.len() != 1 || is_const {
            self.parse_expected(TokenKind::Arrow).is_some()
        } else if self.parse_optional(TokenKind::Arrow).is_some() {
            true
        } else {
            let inner = params.remove(0);
            let array_depth = self.parse_array_depth();
            return ParsedType {
                ty: TypeExpr {
                    kind: TypeKind::Group {
                        inner: Box::new(inner.ty),
                        array_depth,
                    },
                    range: self.range_from(start),
                },
                valid: inner.valid,
            };
        };

        let ret = self.parse_type_checked();
        ParsedType {
            ty: TypeExpr {
                kind: TypeKind::Lambda {
                    params: params.into_iter().map(|param| param.ty).collect(),
                    is_const,
                    ret: Box::new(ret.ty),
                },
                range: self.range_from(start),
            },
            valid: has_arrow && ret.valid,
        }
    }

    fn parse_named_type(&mut self, start: Position) -> ParsedType {
        let missing_at = self.start();
        let name_token = self.parse_expected_any(&[TokenKind::Identifier, TokenKind::Define]);
        let (name, is_define) = match name_token {
            Some(token) => {
                let is_define = token.kind == TokenKind::Define;
                (Ident::new(token.text, token.range), is_define)
            }
            None => (Ident::missing(missing_at), false),
        };

        let mut args = Vec::new();
        if self.parse_optional(TokenKind::LessThan).is_some() {
            loop {
                args.push(self.parse_type());
                if self.parse_optional(TokenKind::Comma).is_none() {
                    break;
                }
            }
            self.parse_expected(TokenKind::GreaterThan);
        }

        let array_depth = self.parse_array_depth();
        let valid = !name.is_missing();
        ParsedType {
            ty: TypeExpr {
                kind: TypeKind::Named(NamedType {
                    name,
                    is_define,
                    args,
                    array_depth,
                }),
                range: self.range_from(start),
            },
            valid,
        }
    }

    /// Count `[]` pairs.
    fn parse_array_depth(&mut self) -> usize {
        let mut depth = 0;
        while self.parse_optional(TokenKind::OpenSquare).is_some() {
            self.parse_expected(TokenKind::CloseSquare);
            depth += 1;
        }
        depth
    }

    /// Whether a complete type starts here.
    pub(crate) fn is_valid_type_ahead(&mut self) -> bool {
        self.look_ahead(|p| p.parse_type_checked().valid)
    }

    /// `<[single] T, ...>` after a declaration's name. `None` when there is
    /// no `<`.
    pub(crate) fn parse_optional_type_params(&mut self) -> Option<Vec<TypeParam>> {
        self.parse_optional(TokenKind::LessThan)?;
        let params = self.parse_delimited_list(
            TokenKind::GreaterThan,
            |p| matches!(p.current_kind(), TokenKind::Identifier | TokenKind::Single),
            |p| {
                let single = p.parse_optional(TokenKind::Single).is_some();
                let at = p.start();
                let name = p
                    .parse_expected(TokenKind::Identifier)
                    .map_or_else(|| Ident::missing(at), |t| Ident::new(t.text, t.range));
                TypeParam { name, single }
            },
        );
        self.parse_expected(TokenKind::GreaterThan);
        Some(params)
    }
}

/// The name a type stands for when it turns out to be a plain identifier:
/// a lambda parameter or struct field written without a type.
pub(crate) fn generic_name(ty: &TypeExpr) -> Option<&Ident> {
    match &ty.kind {
        TypeKind::Named(named) if !named.name.is_missing() => Some(&named.name),
        TypeKind::Group { inner, .. } => generic_name(inner),
        _ => None,
    }
}

/// Only `void`, lambdas and unions are certainly types; anything else
/// might be a name.
pub(crate) fn is_definitely_type(ty: &TypeExpr) -> bool {
    match &ty.kind {
        TypeKind::Void | TypeKind::Lambda { .. } | TypeKind::Pipe(..) => true,
        TypeKind::Named(_) => false,
        TypeKind::Group { inner, .. } => is_definitely_type(inner),
    }
}
