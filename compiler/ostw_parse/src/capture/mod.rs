//! Token captures: the memo table behind incremental reparsing.
//!
//! Every reusable production (blocks, control flow statements, rules,
//! classes, enums, type aliases and struct literals) records a
//! [`TokenCapture`] when it finishes without errors: where it started in
//! the token stream, how many tokens it consumed, how far it looked, and
//! the node it built.
//!
//! On the next parse the [`ReuseCache`] hands those captures back. A
//! capture in front of the edit is reused at the same token index. A
//! capture behind the edit is reused once the lexer has resynchronized,
//! with its token index moved by the resync delta and its positions moved
//! by the edit's shift.
//!
//! Captures nest. When an outer capture is reused its inner captures are
//! recorded again at their new indices so the following parse can still
//! reuse them individually.

use ostw_ir::ast::{
    Block, Class, Enum, For, Foreach, If, Relocate, Return, Rule, StructLiteral, Switch,
    TypeAlias, VanillaRule, While,
};
use ostw_ir::PositionShift;
use ostw_lexer::AffectedAreaInfo;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Which production a capture holds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CaptureKind {
    Block,
    If,
    Switch,
    For,
    While,
    Foreach,
    Return,
    Rule,
    VanillaRule,
    Class,
    Enum,
    TypeAlias,
    StructLiteral,
}

/// A node stored in a capture.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CapturedNode {
    Block(Block),
    If(If),
    Switch(Switch),
    For(For),
    While(While),
    Foreach(Foreach),
    Return(Return),
    Rule(Rule),
    VanillaRule(VanillaRule),
    Class(Class),
    Enum(Enum),
    TypeAlias(TypeAlias),
    StructLiteral(StructLiteral),
}

/// A production the parser can capture and reuse.
pub trait Capturable: Clone + Relocate {
    const KIND: CaptureKind;

    fn into_node(self) -> CapturedNode;

    fn from_node(node: &CapturedNode) -> Option<&Self>;
}

macro_rules! capturable {
    ($($name:ident),* $(,)?) => {
        impl CapturedNode {
            pub fn kind(&self) -> CaptureKind {
                match self {
                    $( CapturedNode::$name(_) => CaptureKind::$name, )*
                }
            }
        }

        impl Relocate for CapturedNode {
            fn relocate(&mut self, shift: PositionShift) {
                match self {
                    $( CapturedNode::$name(node) => node.relocate(shift), )*
                }
            }
        }

        $(
            impl Capturable for $name {
                const KIND: CaptureKind = CaptureKind::$name;

                fn into_node(self) -> CapturedNode {
                    CapturedNode::$name(self)
                }

                fn from_node(node: &CapturedNode) -> Option<&Self> {
                    match node {
                        CapturedNode::$name(inner) => Some(inner),
                        #[allow(unreachable_patterns, reason = "one arm per capturable kind")]
                        _ => None,
                    }
                }
            }
        )*
    };
}

capturable! {
    Block, If, Switch, For, While, Foreach, Return, Rule, VanillaRule, Class, Enum, TypeAlias,
    StructLiteral,
}

/// A finished production and the token span it came from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenCapture {
    /// Index of the first consumed token.
    pub start_token: usize,
    /// Number of consumed tokens.
    pub length: usize,
    /// Number of tokens, counted from `start_token`, that the production
    /// requested. At least `length`; more when it peeked past its end.
    pub examined: usize,
    pub node: CapturedNode,
    /// Cleared when an edit touched anything the production examined.
    pub is_valid: bool,
}

impl TokenCapture {
    #[inline]
    pub fn end_token(&self) -> usize {
        self.start_token + self.length
    }

    /// One past the last token the production may depend on.
    ///
    /// A production that stopped at token `n` decided to stop by looking
    /// at token `n`, so that token always counts.
    #[inline]
    pub fn examined_end(&self) -> usize {
        self.start_token + self.examined.max(self.length + 1)
    }
}

/// Captures being built by the current parse.
#[derive(Debug, Default)]
pub struct CaptureRecorder {
    /// One entry per open production: whether it has seen an error.
    open: Vec<bool>,
    finished: Vec<TokenCapture>,
}

impl CaptureRecorder {
    pub fn open(&mut self) {
        self.open.push(false);
    }

    /// An error was reported: nothing currently open may be reused.
    pub fn mark_open_erroneous(&mut self) {
        for has_error in &mut self.open {
            *has_error = true;
        }
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Close the innermost open production, storing it if it finished
    /// cleanly and consumed at least one token.
    pub fn close<T: Capturable>(
        &mut self,
        start_token: usize,
        length: usize,
        examined: usize,
        node: &T,
    ) -> bool {
        let has_error = self.open.pop().unwrap_or(true);
        if has_error || length == 0 {
            return false;
        }
        self.finished.push(TokenCapture {
            start_token,
            length,
            examined,
            node: node.clone().into_node(),
            is_valid: true,
        });
        true
    }

    /// Store a capture carried over from the previous parse.
    pub fn record(&mut self, capture: TokenCapture) {
        self.finished.push(capture);
    }

    /// Every stored capture, ordered by start token.
    pub fn finish(mut self) -> Vec<TokenCapture> {
        self.finished.sort_by_key(|capture| capture.start_token);
        self.finished
    }
}

/// Captures from the previous parse, indexed for lookup.
#[derive(Debug)]
pub struct ReuseCache {
    captures: Vec<TokenCapture>,
    by_start: FxHashMap<(usize, CaptureKind), usize>,
    shift: PositionShift,
}

impl ReuseCache {
    /// Index `captures` and invalidate every capture that examined a token
    /// in the affected area.
    pub fn new(
        mut captures: Vec<TokenCapture>,
        affected: AffectedAreaInfo,
        shift: PositionShift,
    ) -> Self {
        captures.sort_by_key(|capture| capture.start_token);
        let start = affected.starting_token_index;
        let end = affected.end().max(start + 1);

        let mut invalidated = 0;
        let mut by_start = FxHashMap::default();
        for (slot, capture) in captures.iter_mut().enumerate() {
            if capture.start_token < end && capture.examined_end() > start {
                capture.is_valid = false;
                invalidated += 1;
            }
            by_start
                .entry((capture.start_token, capture.node.kind()))
                .or_insert(slot);
        }
        debug!(
            captures = captures.len(),
            invalidated,
            start,
            end,
            "prepared capture cache"
        );
        ReuseCache {
            captures,
            by_start,
            shift,
        }
    }

    /// The capture of `kind` that started at `start_token` in the previous
    /// token stream.
    pub fn find(&self, start_token: usize, kind: CaptureKind) -> Option<usize> {
        self.by_start.get(&(start_token, kind)).copied()
    }

    #[inline]
    pub fn get(&self, slot: usize) -> &TokenCapture {
        &self.captures[slot]
    }

    /// Captures lying inside the capture at `slot`, excluding itself.
    pub fn nested(&self, slot: usize) -> impl Iterator<Item = &TokenCapture> + '_ {
        let outer = &self.captures[slot];
        let first = self
            .captures
            .partition_point(|c| c.start_token < outer.start_token);
        self.captures[first..]
            .iter()
            .enumerate()
            .take_while(move |(_, c)| c.start_token < outer.end_token())
            .filter(move |&(offset, c)| first + offset != slot && c.end_token() <= outer.end_token())
            .map(|(_, c)| c)
    }

    /// How positions behind the edit moved.
    #[inline]
    pub fn shift(&self) -> PositionShift {
        self.shift
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }
}

/// Statistics for incremental parsing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct IncrementalStats {
    /// Number of nodes reused from the previous parse.
    pub reused_count: usize,
    /// Number of reusable nodes that were parsed again.
    pub reparsed_count: usize,
}

impl IncrementalStats {
    /// Calculate reuse rate as a percentage.
    #[allow(
        clippy::cast_precision_loss,
        reason = "counts won't approach 2^52; precision loss irrelevant for display"
    )]
    pub fn reuse_rate(&self) -> f64 {
        let total = self.reused_count + self.reparsed_count;
        if total == 0 {
            0.0
        } else {
            (self.reused_count as f64 / total as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests;
