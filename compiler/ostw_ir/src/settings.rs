//! Parser configuration.

/// Spelling of the untyped declaration keyword.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclarationKeyword {
    #[default]
    Define,
    Var,
}

impl DeclarationKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKeyword::Define => "define",
            DeclarationKeyword::Var => "var",
        }
    }
}

/// Settings that change how a document is lexed and parsed.
///
/// A document parsed under one set of settings cannot be incrementally
/// updated under another; changing them forces a full parse.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ParserSettings {
    pub declaration_keyword: DeclarationKeyword,
}

impl ParserSettings {
    pub fn with_declaration_keyword(keyword: DeclarationKeyword) -> Self {
        ParserSettings {
            declaration_keyword: keyword,
        }
    }
}
