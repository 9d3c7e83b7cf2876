//! Context-sensitive token matching.
//!
//! [`Matcher::match_one`] skips trivia at a position and applies the rules
//! of one [`LexContext`] in priority order. The first rule that accepts
//! wins; a position no rule accepts becomes a one-character `Unknown`
//! token. Matching is a pure function of the source, the position and the
//! context, which is what lets the controller splice fresh tokens into an
//! old list.

use ostw_ir::{LexError, ParserSettings, Position, QuoteStyle, Token, TokenKind, KEYWORDS, WORKSHOP_KEYWORDS};
use smallvec::{smallvec, SmallVec};
use tracing::trace;

use crate::context::LexContext;
use crate::scanner::{is_identifier_char, Scanner};
use crate::symbols::{is_structure_char, SymbolTrie};

/// One rule application.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Match {
    pub token: Token,
    /// Scan position right after the token.
    pub new_position: Position,
    pub error: Option<LexError>,
}

impl Match {
    fn new(scanner: &Scanner<'_>, kind: TokenKind) -> Self {
        Match {
            token: scanner.token(kind),
            new_position: scanner.position(),
            error: None,
        }
    }

    fn with_error(mut self, error: Option<LexError>) -> Self {
        self.error = error;
        self
    }
}

/// Tokens produced by one scan step. Usually one; two for a `disabled`
/// lobby setting.
pub type Matches = SmallVec<[Match; 2]>;

/// Symbols in match order. Two-character symbols precede their prefixes.
const C_SYMBOLS: &[(&str, TokenKind)] = &[
    ("{", TokenKind::OpenCurly),
    ("}", TokenKind::CloseCurly),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("[", TokenKind::OpenSquare),
    ("]", TokenKind::CloseSquare),
    (":", TokenKind::Colon),
    ("?", TokenKind::QuestionMark),
    (";", TokenKind::Semicolon),
    (".", TokenKind::Dot),
    ("=>", TokenKind::Arrow),
    ("!=", TokenKind::NotEqual),
    ("==", TokenKind::EqualEqual),
    ("<=", TokenKind::LessThanOrEqual),
    (">=", TokenKind::GreaterThanOrEqual),
    ("!", TokenKind::Exclamation),
    ("^=", TokenKind::HatEqual),
    ("*=", TokenKind::MultiplyEqual),
    ("/=", TokenKind::DivideEqual),
    ("%=", TokenKind::ModuloEqual),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("=", TokenKind::Equal),
    ("<", TokenKind::LessThan),
    (">", TokenKind::GreaterThan),
    (",", TokenKind::Comma),
    ("^", TokenKind::Hat),
    ("*", TokenKind::Multiply),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Modulo),
    ("++", TokenKind::PlusPlus),
    ("+", TokenKind::Plus),
    ("--", TokenKind::MinusMinus),
    ("-", TokenKind::Minus),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
];

/// Normal-context symbols tried after [`C_SYMBOLS`].
const EXTRA_SYMBOLS: &[(&str, TokenKind)] = &[
    ("~", TokenKind::Squiggle),
    ("|", TokenKind::Pipe),
    ("@", TokenKind::At),
];

const DISABLED: &str = "disabled";

#[derive(Clone, Copy, Debug)]
pub struct Matcher<'a> {
    source: &'a str,
    settings: ParserSettings,
}

impl<'a> Matcher<'a> {
    pub fn new(source: &'a str, settings: ParserSettings) -> Self {
        Matcher { source, settings }
    }

    /// Match the next token at or after `position`.
    ///
    /// Returns `None` only when nothing but trivia remains.
    pub fn match_one(&self, position: Position, context: LexContext<'_>) -> Option<Matches> {
        let mut scanner = Scanner::new(self.source, position);
        scanner.skip_trivia();
        if scanner.is_eof() {
            return None;
        }
        scanner.mark();

        let matched = match context {
            LexContext::Normal => self.match_normal(scanner).map(one),
            LexContext::InterpolatedString(quote) => match_continuation(scanner, quote)
                .or_else(|| self.match_normal(scanner))
                .map(one),
            LexContext::EmbeddedLiteral(symbols) => match_workshop(scanner, symbols).map(one),
            LexContext::SettingsLiteral(symbols) => match_settings(scanner, symbols),
        };
        let matched = matched.unwrap_or_else(|| one(match_unknown(scanner)));
        trace!(
            at = scanner.position().index,
            kind = ?matched[0].token.kind,
            count = matched.len(),
            "matched"
        );
        Some(matched)
    }

    fn match_normal(&self, scanner: Scanner<'_>) -> Option<Match> {
        match_action_comment(scanner)
            .or_else(|| match_number(scanner))
            .or_else(|| match_symbol(scanner, "..", TokenKind::Spread))
            .or_else(|| match_symbol_table(scanner, C_SYMBOLS))
            .or_else(|| match_symbol_table(scanner, EXTRA_SYMBOLS))
            .or_else(|| self.match_word(scanner))
            .or_else(|| match_string(scanner))
    }

    /// Keywords, the declaration keyword and identifiers.
    ///
    /// Every keyword requires a non-identifier character after it, so the
    /// whole identifier run is read once and looked up.
    fn match_word(&self, mut scanner: Scanner<'_>) -> Option<Match> {
        if scanner.eat_while(is_identifier_char) == 0 {
            return None;
        }
        let word = scanner.text();
        let kind = if word == self.settings.declaration_keyword.as_str() {
            TokenKind::Define
        } else {
            KEYWORDS
                .iter()
                .find(|(keyword, _)| *keyword == word)
                .map_or(TokenKind::Identifier, |&(_, kind)| kind)
        };
        Some(Match::new(&scanner, kind))
    }
}

fn one(matched: Match) -> Matches {
    smallvec![matched]
}

fn match_symbol(mut scanner: Scanner<'_>, symbol: &str, kind: TokenKind) -> Option<Match> {
    scanner
        .eat_str(symbol)
        .then(|| Match::new(&scanner, kind))
}

fn match_symbol_table(scanner: Scanner<'_>, table: &[(&str, TokenKind)]) -> Option<Match> {
    table
        .iter()
        .find_map(|&(symbol, kind)| match_symbol(scanner, symbol, kind))
}

/// A keyword that must not be followed by an identifier character.
fn match_keyword(mut scanner: Scanner<'_>, keyword: &str, kind: TokenKind) -> Option<Match> {
    (scanner.eat_str(keyword) && !scanner.at_identifier_char())
        .then(|| Match::new(&scanner, kind))
}

/// `# ...` to the end of the line.
fn match_action_comment(mut scanner: Scanner<'_>) -> Option<Match> {
    if !scanner.eat('#') {
        return None;
    }
    scanner.eat_line();
    Some(Match::new(&scanner, TokenKind::ActionComment))
}

/// Digits with an optional fraction.
///
/// `123.` and `.5` still produce a number, flagged with a soft error. A
/// `.` followed by another `.` is left for the spread operator.
fn match_number(mut scanner: Scanner<'_>) -> Option<Match> {
    let integer = scanner.eat_while(|c| c.is_ascii_digit());
    let mut error = None;

    if scanner.at('.') && scanner.peek(1) != Some('.') {
        let mut fraction_scanner = scanner;
        fraction_scanner.advance();
        let fraction = fraction_scanner.eat_while(|c| c.is_ascii_digit());
        match (integer, fraction) {
            (0, 0) => return None,
            (0, _) => error = Some(LexError::MissingIntegerPart),
            (_, 0) => error = Some(LexError::MissingFractionalPart),
            _ => {}
        }
        scanner = fraction_scanner;
    } else if integer == 0 {
        return None;
    }

    Some(Match::new(&scanner, TokenKind::Number).with_error(error))
}

/// `"..."`, `'...'`, `$"..."` with backslash escapes. Strings may span
/// lines.
fn match_string(mut scanner: Scanner<'_>) -> Option<Match> {
    let interpolated = scanner.eat('$');
    let quote = if scanner.eat('\'') {
        QuoteStyle::Single
    } else if scanner.eat('"') {
        QuoteStyle::Double
    } else {
        return None;
    };
    Some(scan_string_body(scanner, quote, interpolated, false))
}

/// `}...{` or `}..."` after an interpolation hole.
fn match_continuation(mut scanner: Scanner<'_>, quote: QuoteStyle) -> Option<Match> {
    scanner
        .eat('}')
        .then(|| scan_string_body(scanner, quote, true, true))
}

fn scan_string_body(
    mut scanner: Scanner<'_>,
    quote: QuoteStyle,
    interpolated: bool,
    continuation: bool,
) -> Match {
    let closed_kind = match (interpolated, continuation) {
        (false, _) => TokenKind::String,
        (true, false) => TokenKind::InterpolatedString,
        (true, true) => TokenKind::InterpolatedStringTail,
    };
    let mut escaped = false;

    let (kind, error) = loop {
        let Some(c) = scanner.current() else {
            break (closed_kind, Some(LexError::UnterminatedString));
        };
        scanner.advance();
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote.delimiter() {
            break (closed_kind, None);
        } else if interpolated && c == '{' {
            // `{{` is a literal brace
            if !scanner.eat('{') {
                let hole = if continuation {
                    TokenKind::InterpolatedStringMiddle
                } else {
                    TokenKind::InterpolatedStringHead
                };
                break (hole, None);
            }
        }
    };

    let mut matched = Match::new(&scanner, kind).with_error(error);
    matched.token.flags = quote.flags();
    matched
}

fn match_workshop(scanner: Scanner<'_>, symbols: &SymbolTrie) -> Option<Match> {
    match_number(scanner)
        .or_else(|| match_symbol_table(scanner, C_SYMBOLS))
        .or_else(|| match_string(scanner))
        .or_else(|| match_keyword(scanner, DISABLED, TokenKind::Disabled))
        .or_else(|| match_constant(scanner, symbols))
        .or_else(|| {
            WORKSHOP_KEYWORDS
                .iter()
                .find_map(|&(keyword, kind)| match_keyword(scanner, keyword, kind))
        })
        .or_else(|| match_vanilla_symbol(scanner))
}

fn match_settings(scanner: Scanner<'_>, symbols: &SymbolTrie) -> Option<Matches> {
    if let Some(pair) = match_disabled_setting(scanner, symbols) {
        return Some(pair);
    }
    match_constant(scanner, symbols)
        .or_else(|| match_number(scanner))
        .or_else(|| match_string(scanner))
        .or_else(|| match_symbol_table(scanner, C_SYMBOLS))
        .or_else(|| match_keyword(scanner, DISABLED, TokenKind::Disabled))
        .or_else(|| match_vanilla_symbol(scanner))
        .map(one)
}

/// `disabled` directly followed by a setting name: two tokens in one step.
fn match_disabled_setting(scanner: Scanner<'_>, symbols: &SymbolTrie) -> Option<Matches> {
    let disabled = match_keyword(scanner, DISABLED, TokenKind::Disabled)?;
    let mut next = scanner;
    next.eat_str(DISABLED);
    next.skip_trivia();
    next.mark();
    let setting = match_constant(next, symbols)?;
    Some(smallvec![disabled, setting])
}

fn match_constant(scanner: Scanner<'_>, symbols: &SymbolTrie) -> Option<Match> {
    symbols
        .longest_match(scanner)
        .map(|end| Match::new(&end, TokenKind::WorkshopConstant))
}

/// A run of term characters with single inner spaces: `My Custom Value`.
fn match_vanilla_symbol(mut scanner: Scanner<'_>) -> Option<Match> {
    let is_term = |c: char| !c.is_whitespace() && !is_structure_char(c);
    if scanner.eat_while(is_term) == 0 {
        return None;
    }
    while scanner.at(' ') && scanner.peek(1).is_some_and(is_term) {
        scanner.advance();
        scanner.eat_while(is_term);
    }
    Some(Match::new(&scanner, TokenKind::WorkshopSymbol))
}

fn match_unknown(mut scanner: Scanner<'_>) -> Match {
    scanner.advance();
    Match::new(&scanner, TokenKind::Unknown)
}
