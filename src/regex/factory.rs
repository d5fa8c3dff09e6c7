//! Programmatic construction of regular expression trees.
//!
//! `RegexFactory` is the supported way to build a [`ManagedRegex`]: allocate
//! nodes through the typed constructors, then call [`RegexFactory::generate`]
//! with the root to move the arena into an immutable regex value.
//!
//! There is intentionally no textual pattern parser here; a parser is a thin
//! layer over this factory and lives with the caller.

use super::core::{AnchorKind, AssertionKind, CharRange, ClosureStrategy, Repetition};
use super::expr::{ExprArena, ExprId, ManagedRegex, RegexExpr, MAX_CAPTURE_ID};

/// Builder for [`ManagedRegex`] values.
///
/// ```
/// use kaede::RegexFactory;
///
/// // (a|b)+233
/// let mut f = RegexFactory::new();
/// let a = f.char_of(b'a');
/// let b = f.char_of(b'b');
/// let any = f.alter(vec![a, b]);
/// let rep = f.plus(any);
/// let tail = f.literal("233");
/// let root = f.concat(vec![rep, tail]);
/// let regex = f.generate(root);
/// assert!(regex.is_dfa_compatible());
/// ```
#[derive(Debug, Default)]
pub struct RegexFactory {
    arena: ExprArena,
}

impl RegexFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish construction, moving the arena into an immutable regex.
    pub fn generate(self, root: ExprId) -> ManagedRegex {
        ManagedRegex::new(self.arena, root)
    }

    // Character construction
    //

    pub fn range(&mut self, rg: CharRange) -> ExprId {
        self.arena.alloc(RegexExpr::Entity(rg))
    }

    pub fn char_of(&mut self, ch: u8) -> ExprId {
        self.range(CharRange::single(ch))
    }

    /// A concatenation matching `s` literally. `s` must be ASCII.
    pub fn literal(&mut self, s: &str) -> ExprId {
        assert!(s.is_ascii(), "literals are limited to ASCII");

        let seq: Vec<_> = s.bytes().map(|ch| self.char_of(ch)).collect();
        self.concat(seq)
    }

    /// `[a-z]|[A-Z]`
    pub fn letter(&mut self) -> ExprId {
        let lower = self.range(CharRange::new(b'a', b'z'));
        let upper = self.range(CharRange::new(b'A', b'Z'));
        self.alter(vec![lower, upper])
    }

    /// `[0-9]`
    pub fn digit(&mut self) -> ExprId {
        self.range(CharRange::new(b'0', b'9'))
    }

    // Compound construction
    //

    pub fn concat(&mut self, seq: Vec<ExprId>) -> ExprId {
        self.arena.alloc(RegexExpr::Concat(seq))
    }

    pub fn alter(&mut self, any: Vec<ExprId>) -> ExprId {
        assert!(!any.is_empty(), "alternation requires at least one branch");

        self.arena.alloc(RegexExpr::Alter(any))
    }

    // Repetition construction
    //

    pub fn repeat(&mut self, child: ExprId, count: Repetition, strategy: ClosureStrategy) -> ExprId {
        self.arena.alloc(RegexExpr::Repeat {
            child,
            count,
            strategy,
        })
    }

    /// `e?`
    pub fn optional(&mut self, child: ExprId) -> ExprId {
        self.repeat(child, Repetition::new(0, 1), ClosureStrategy::Greedy)
    }

    /// `e*`
    pub fn star(&mut self, child: ExprId) -> ExprId {
        self.repeat(child, Repetition::at_least(0), ClosureStrategy::Greedy)
    }

    /// `e+`
    pub fn plus(&mut self, child: ExprId) -> ExprId {
        self.repeat(child, Repetition::at_least(1), ClosureStrategy::Greedy)
    }

    /// `e??`
    pub fn optional_reluctant(&mut self, child: ExprId) -> ExprId {
        self.repeat(child, Repetition::new(0, 1), ClosureStrategy::Reluctant)
    }

    /// `e*?`
    pub fn star_reluctant(&mut self, child: ExprId) -> ExprId {
        self.repeat(child, Repetition::at_least(0), ClosureStrategy::Reluctant)
    }

    /// `e+?`
    pub fn plus_reluctant(&mut self, child: ExprId) -> ExprId {
        self.repeat(child, Repetition::at_least(1), ClosureStrategy::Reluctant)
    }

    // Fancy construction
    //

    pub fn anchor(&mut self, kind: AnchorKind) -> ExprId {
        self.arena.alloc(RegexExpr::Anchor(kind))
    }

    /// A capture group under a caller-assigned id.
    pub fn capture(&mut self, id: u32, child: ExprId) -> ExprId {
        assert!(id < MAX_CAPTURE_ID, "capture id {} out of bounds", id);

        self.arena.alloc(RegexExpr::Capture { id, child })
    }

    /// A back-reference to the group captured under `id`.
    pub fn reference(&mut self, id: u32) -> ExprId {
        assert!(id < MAX_CAPTURE_ID, "capture id {} out of bounds", id);

        self.arena.alloc(RegexExpr::Reference(id))
    }

    /// A lookaround assertion node. Representable but not executable; the
    /// NFA lowering rejects it.
    pub fn assertion(&mut self, kind: AssertionKind, child: ExprId) -> ExprId {
        self.arena.alloc(RegexExpr::Assertion { kind, child })
    }
}
