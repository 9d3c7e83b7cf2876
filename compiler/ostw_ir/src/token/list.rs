use std::ops::{Index, Range};

use super::TokenNode;

/// Ordered token stream of one document version.
///
/// Tokens never overlap: `tokens[i].range.end.index <= tokens[i + 1].range.start.index`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenList {
    tokens: Vec<TokenNode>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList { tokens: Vec::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&TokenNode> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn last(&self) -> Option<&TokenNode> {
        self.tokens.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TokenNode> {
        self.tokens.iter()
    }

    #[inline]
    pub fn as_slice(&self) -> &[TokenNode] {
        &self.tokens
    }

    pub fn push(&mut self, token: TokenNode) {
        self.tokens.push(token);
    }

    pub fn insert(&mut self, index: usize, token: TokenNode) {
        self.tokens.insert(index, token);
    }

    pub fn remove(&mut self, index: usize) -> TokenNode {
        self.tokens.remove(index)
    }

    /// Replace the tokens in `range` with `replacement`.
    pub fn splice<I>(&mut self, range: Range<usize>, replacement: I)
    where
        I: IntoIterator<Item = TokenNode>,
    {
        self.tokens.splice(range, replacement);
    }

    /// Apply `f` to every token from `start` on.
    pub fn update_from(&mut self, start: usize, mut f: impl FnMut(&mut TokenNode)) {
        if let Some(tail) = self.tokens.get_mut(start..) {
            tail.iter_mut().for_each(&mut f);
        }
    }

    /// Index of the first pair of tokens that overlap or are out of order.
    pub fn first_overlap(&self) -> Option<usize> {
        self.tokens
            .windows(2)
            .position(|pair| pair[0].range().end.index > pair[1].range().start.index)
    }
}

impl Index<usize> for TokenList {
    type Output = TokenNode;

    #[inline]
    fn index(&self, index: usize) -> &TokenNode {
        &self.tokens[index]
    }
}

impl FromIterator<TokenNode> for TokenList {
    fn from_iter<T: IntoIterator<Item = TokenNode>>(iter: T) -> Self {
        TokenList {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a TokenNode;
    type IntoIter = std::slice::Iter<'a, TokenNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
