//! Regular expression model and construction.
//!
//! - `core`: shared value types (character ranges, repetition counts,
//!   priorities, anchor and assertion kinds)
//! - `expr`: the tagged expression tree and its owning arena
//! - `factory`: the programmatic builder producing [`ManagedRegex`] values

mod core;
mod expr;
mod factory;

pub use self::core::{
    AnchorKind, AssertionKind, CharRange, ClosureStrategy, EpsilonPriority, Repetition,
};
pub use self::expr::{ExprArena, ExprId, ManagedRegex, RegexExpr, MAX_CAPTURE_ID};
pub use self::factory::RegexFactory;
