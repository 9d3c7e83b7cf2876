//! Primary terms: literals, names, constructors, lambdas and struct
//! literals.

use ostw_diagnostic::{invalid_expression_term, missing_interpolation_terminator};
use ostw_ir::ast::{
    Expr, ExprKind, FormattedString, Ident, InterpolatedPart, InterpolatedString, Lambda,
    LambdaParam, Stmt, StmtKind, StringLiteral, StructField, StructLiteral, TypeExpr, TypeKind,
};
use ostw_ir::{ContextKind, QuoteStyle, TokenKind};

use crate::grammar::ty::{generic_name, is_definitely_type};
use crate::Parser;

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Expr {
        let start = self.start();
        let literal = match self.current_kind() {
            TokenKind::Minus | TokenKind::Number => return self.parse_number(),
            TokenKind::True => ExprKind::Boolean(true),
            TokenKind::False => ExprKind::Boolean(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::This => ExprKind::This,
            TokenKind::Root => ExprKind::Root,
            TokenKind::String | TokenKind::At => return self.parse_string(),
            TokenKind::InterpolatedString | TokenKind::InterpolatedStringHead => {
                return self.parse_interpolated_string();
            }
            TokenKind::New => return self.parse_new(),
            TokenKind::OpenSquare => return self.parse_array(),
            TokenKind::Async => return self.parse_async(),
            TokenKind::OpenCurly => return self.parse_struct_expression(),
            TokenKind::LessThan if self.is_formatted_string() => {
                return self.parse_formatted_string();
            }
            TokenKind::Import => return self.parse_json_import(),
            _ => return self.parse_other_primary(),
        };
        self.advance();
        Expr::new(literal, self.range_from(start))
    }

    fn parse_other_primary(&mut self) -> Expr {
        if self.is_lambda() {
            return self.parse_lambda();
        }
        match self.current_kind() {
            TokenKind::Single if self.peek_kind(1) == TokenKind::OpenCurly => {
                self.parse_struct_expression()
            }
            TokenKind::Identifier => self.parse_identifier(),
            TokenKind::OpenParen => self.parse_group(),
            _ => {
                let found = self.current_or_last();
                self.error(invalid_expression_term(&found));
                Expr::missing(self.missing_range())
            }
        }
    }

    /// A number, folding a leading `-` into the literal.
    pub(crate) fn parse_number(&mut self) -> Expr {
        let start = self.start();
        let negative = self.parse_optional(TokenKind::Minus).is_some();
        let Some(number) = self.parse_expected(TokenKind::Number) else {
            return Expr::missing(self.range_from(start));
        };
        let text = if negative {
            format!("-{}", number.text)
        } else {
            number.text
        };
        Expr::new(ExprKind::Number(text), self.range_from(start))
    }

    /// `"text"` or `@"localized text"`.
    fn parse_string(&mut self) -> Expr {
        let start = self.start();
        let localized = self.parse_optional(TokenKind::At).is_some();
        let text = self
            .parse_expected(TokenKind::String)
            .map(|token| token.text)
            .unwrap_or_default();
        Expr::new(
            ExprKind::String(StringLiteral { text, localized }),
            self.range_from(start),
        )
    }

    /// `$"a {x} b {y} c"`. The text between holes is lexed in the
    /// interpolation context matching the opening quote.
    fn parse_interpolated_string(&mut self) -> Expr {
        let start = self.start();
        let Some(head) = self.advance() else {
            return Expr::missing(self.missing_range());
        };
        if head.kind == TokenKind::InterpolatedString {
            return Expr::new(
                ExprKind::InterpolatedString(InterpolatedString {
                    head: head.text,
                    parts: Vec::new(),
                }),
                self.range_from(start),
            );
        }

        let quote = QuoteStyle::from_flags(head.flags);
        let head_range = head.range;
        let first = self.parse_expression();

        let parts = self.in_context(ContextKind::InterpolatedString(quote), |p| {
            let mut parts = Vec::new();
            let mut value = first;
            loop {
                match p.current_kind() {
                    TokenKind::InterpolatedStringMiddle => {
                        let text = p.advance().map(|token| token.text).unwrap_or_default();
                        parts.push(InterpolatedPart { value, text });
                        value = p.in_context(ContextKind::Normal, Self::parse_expression);
                    }
                    TokenKind::InterpolatedStringTail => {
                        let text = p.advance().map(|token| token.text).unwrap_or_default();
                        parts.push(InterpolatedPart { value, text });
                        return parts;
                    }
                    _ => {
                        p.error(missing_interpolation_terminator(head_range));
                        parts.push(InterpolatedPart {
                            value,
                            text: String::new(),
                        });
                        return parts;
                    }
                }
            }
        });

        Expr::new(
            ExprKind::InterpolatedString(InterpolatedString {
                head: head.text,
                parts,
            }),
            self.range_from(start),
        )
    }

    /// `<"text {0}", a, b>`
    fn parse_formatted_string(&mut self) -> Expr {
        let start = self.start();
        self.parse_expected(TokenKind::LessThan);
        let localized = self.parse_optional(TokenKind::At).is_some();
        let text = self
            .parse_expected(TokenKind::String)
            .map(|token| token.text)
            .unwrap_or_default();

        let mut args = Vec::new();
        while self.parse_optional(TokenKind::Comma).is_some() {
            args.push(self.parse_contained_expression(true));
        }
        self.parse_expected(TokenKind::GreaterThan);

        Expr::new(
            ExprKind::FormattedString(FormattedString {
                localized,
                text,
                args,
            }),
            self.range_from(start),
        )
    }

    /// `new Type(args)`
    fn parse_new(&mut self) -> Expr {
        let start = self.start();
        self.parse_expected(TokenKind::New);
        let ty = self.parse_type();
        self.parse_expected(TokenKind::OpenParen);
        let args = self.parse_arguments();
        self.parse_expected(TokenKind::CloseParen);
        Expr::new(ExprKind::New { ty, args }, self.range_from(start))
    }

    /// `[a, b, c]`
    fn parse_array(&mut self) -> Expr {
        let start = self.start();
        self.parse_expected(TokenKind::OpenSquare);
        let mut values = Vec::new();
        if !self.check(TokenKind::CloseSquare) {
            loop {
                values.push(self.parse_expression());
                if self.parse_optional(TokenKind::Comma).is_none() {
                    break;
                }
            }
        }
        self.parse_expected(TokenKind::CloseSquare);
        Expr::new(ExprKind::Array(values), self.range_from(start))
    }

    /// `async [!] expr`
    fn parse_async(&mut self) -> Expr {
        let start = self.start();
        self.parse_expected(TokenKind::Async);
        let ignore_if_running = self.parse_optional(TokenKind::Exclamation).is_some();
        let expr = self.parse_expression();
        Expr::new(
            ExprKind::Async {
                ignore_if_running,
                expr: Box::new(expr),
            },
            self.range_from(start),
        )
    }

    fn parse_group(&mut self) -> Expr {
        let start = self.start();
        self.parse_expected(TokenKind::OpenParen);
        let inner = self.parse_expression();
        self.parse_expected(TokenKind::CloseParen);
        Expr::new(ExprKind::Group(Box::new(inner)), self.range_from(start))
    }

    /// `import("file.json")`
    fn parse_json_import(&mut self) -> Expr {
        let start = self.start();
        self.parse_expected(TokenKind::Import);
        self.parse_expected(TokenKind::OpenParen);
        let file = self.parse_string_value();
        self.parse_expected(TokenKind::CloseParen);
        Expr::new(ExprKind::JsonImport(file), self.range_from(start))
    }

    /// `(params) => body` or `name => body`.
    fn parse_lambda(&mut self) -> Expr {
        let start = self.start();
        let params = if self.parse_optional(TokenKind::OpenParen).is_some() {
            let params = self.parse_delimited_list(
                TokenKind::CloseParen,
                |p| p.current_kind().is_start_of_type(),
                Self::parse_lambda_param,
            );
            self.parse_expected(TokenKind::CloseParen);
            params
        } else {
            let at = self.start();
            let name = self
                .parse_expected(TokenKind::Identifier)
                .map_or_else(|| Ident::missing(at), |token| Ident::new(token.text, token.range));
            vec![LambdaParam {
                ty: None,
                range: name.range,
                name,
            }]
        };
        self.parse_expected(TokenKind::Arrow);

        let body = if self.is_struct_declaration() {
            let value = self.parse_struct_expression();
            let range = value.range;
            Stmt::new(StmtKind::Expression(value), range)
        } else {
            self.parse_statement(false)
        };

        Expr::new(
            ExprKind::Lambda(Lambda {
                params,
                body: Box::new(body),
            }),
            self.range_from(start),
        )
    }

    /// `Type name` or just `name`. When a lone type could be a name, it is.
    fn parse_lambda_param(&mut self) -> LambdaParam {
        let start = self.start();
        let ty = self.parse_type();

        let (ty, name) = if is_definitely_type(&ty) {
            let at = self.start();
            let name = self
                .parse_expected(TokenKind::Identifier)
                .map_or_else(|| Ident::missing(at), |token| Ident::new(token.text, token.range));
            (Some(ty), name)
        } else if let Some(token) = self.parse_optional(TokenKind::Identifier) {
            (Some(ty), Ident::new(token.text, token.range))
        } else {
            let name = generic_name(&ty)
                .cloned()
                .unwrap_or_else(|| Ident::missing(start));
            (None, name)
        };

        LambdaParam {
            ty,
            name,
            range: self.range_from(start),
        }
    }

    fn parse_struct_expression(&mut self) -> Expr {
        let literal = self.parse_struct_literal();
        let range = literal.range;
        Expr::new(ExprKind::StructLiteral(literal), range)
    }

    /// `[single] { [Type] name: value, ..spread }`
    pub(crate) fn parse_struct_literal(&mut self) -> StructLiteral {
        self.incremental_node(|p| {
            let start = p.start();
            let single = p.parse_optional(TokenKind::Single).is_some();
            p.parse_expected(TokenKind::OpenCurly);
            let fields = p.parse_delimited_list(
                TokenKind::CloseCurly,
                |p| p.check(TokenKind::Spread) || p.is_valid_type_ahead(),
                Self::parse_struct_field,
            );
            p.parse_expected(TokenKind::CloseCurly);
            StructLiteral {
                single,
                fields,
                range: p.range_from(start),
            }
        })
    }

    fn parse_struct_field(&mut self) -> StructField {
        let start = self.start();
        if self.parse_optional(TokenKind::Spread).is_some() {
            let value = self.parse_expression();
            return StructField::Spread {
                value,
                range: self.range_from(start),
            };
        }

        let ty = self.parse_type();
        let name = self.parse_optional(TokenKind::Identifier);
        self.parse_expected(TokenKind::Colon);
        let value = self.parse_expression();

        let (ty, name) = match name {
            Some(token) => (Some(ty), Ident::new(token.text, token.range)),
            None => match generic_name(&ty).cloned() {
                Some(name) => (None, name),
                None => {
                    let at = ty.range.end;
                    (Some(ty), Ident::missing(at))
                }
            },
        };
        StructField::Value {
            ty,
            name,
            value,
            range: self.range_from(start),
        }
    }

    /// Whether a lambda starts here: `=>`, `name =>` or `(...) =>`.
    pub(crate) fn is_lambda(&mut self) -> bool {
        if self.check(TokenKind::Arrow) {
            return true;
        }
        self.look_ahead(|p| {
            if p.parse_optional(TokenKind::OpenParen).is_none() {
                return p.parse_expected(TokenKind::Identifier).is_some()
                    && p.check(TokenKind::Arrow);
            }
            if p.parse_optional(TokenKind::CloseParen).is_some() {
                return p.check(TokenKind::Arrow);
            }
            loop {
                p.parse_type();
                p.parse_optional(TokenKind::Identifier);
                if p.parse_optional(TokenKind::Comma).is_none() {
                    break;
                }
            }
            p.parse_expected(TokenKind::CloseParen).is_some() && p.check(TokenKind::Arrow)
        })
    }

    /// `<Type>` followed by an operand.
    pub(crate) fn is_type_cast(&mut self) -> bool {
        if !self.check(TokenKind::LessThan) {
            return false;
        }
        self.look_ahead(|p| {
            p.advance();
            p.check(TokenKind::GreaterThan)
                || (p.parse_type_checked().valid && p.check(TokenKind::GreaterThan))
        })
    }

    pub(crate) fn is_formatted_string(&mut self) -> bool {
        self.check(TokenKind::LessThan)
            && (self.peek_kind(1) == TokenKind::String
                || (self.peek_kind(1) == TokenKind::At && self.peek_kind(2) == TokenKind::String))
    }

    /// Whether `<` opens balanced type arguments rather than a comparison.
    pub(crate) fn is_generics(&mut self) -> bool {
        if !self.check(TokenKind::LessThan) {
            return false;
        }
        self.look_ahead(|p| {
            let mut depth = 0usize;
            loop {
                match p.current_kind() {
                    TokenKind::LessThan => depth += 1,
                    TokenKind::GreaterThan => {
                        depth -= 1;
                        if depth == 0 {
                            return true;
                        }
                    }
                    kind if kind.is_part_of_type_args() => {}
                    _ => return false,
                }
                p.advance();
            }
        })
    }

    /// `<A, B>` after a name.
    pub(super) fn parse_generics(&mut self) -> Vec<TypeExpr> {
        if self.parse_optional(TokenKind::LessThan).is_none() {
            return Vec::new();
        }
        let generics = self.parse_delimited_list(
            TokenKind::GreaterThan,
            |p| p.is_valid_type_ahead(),
            Self::parse_type,
        );
        self.parse_expected(TokenKind::GreaterThan);
        generics
    }

    /// Whether a struct literal rather than a block starts here.
    pub(crate) fn is_struct_declaration(&mut self) -> bool {
        self.look_ahead(|p| {
            let single = p.parse_optional(TokenKind::Single).is_some();
            if p.parse_optional(TokenKind::OpenCurly).is_none() {
                return false;
            }
            if single || p.check(TokenKind::Spread) {
                return true;
            }
            let parsed = p.parse_type_checked();
            let named = p.parse_optional(TokenKind::Identifier).is_some();
            let colon = p.check(TokenKind::Colon);
            let is_name = matches!(parsed.ty.kind, TypeKind::Named(_));
            ((parsed.valid && named) || (is_name && !named)) && colon
        })
    }
}
