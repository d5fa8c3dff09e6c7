//! kaede: an arena-backed regular expression engine.
//!
//! A regex is built programmatically through [`RegexFactory`] as a tree of
//! tagged nodes inside an arena, then lowered into a non-deterministic
//! finite automaton whose typed transitions carry character ranges, anchors,
//! capture delimiters and back-references. From there two execution paths
//! exist:
//!
//! - expressions that stay [DFA-compatible](ManagedRegex::is_dfa_compatible)
//!   run through the subset construction into a dense jump table scanned by
//!   [`dfa_matcher`];
//! - everything else (and anything needing captures) runs on the
//!   backtracking simulator behind [`nfa_matcher`], after epsilon
//!   elimination.
//!
//! ```
//! use kaede::{
//!     compile_to_nfa, dfa_matcher, eliminate_epsilon, generate_dfa, nfa_matcher, RegexFactory,
//!     RegexMatcher,
//! };
//!
//! // (a|b)+233
//! let mut f = RegexFactory::new();
//! let a = f.char_of(b'a');
//! let b = f.char_of(b'b');
//! let any = f.alter(vec![a, b]);
//! let rep = f.plus(any);
//! let tail = f.literal("233");
//! let root = f.concat(vec![rep, tail]);
//! let regex = f.generate(root);
//!
//! let nfa = compile_to_nfa(&regex);
//! let dfa = dfa_matcher(generate_dfa(&nfa));
//! assert!(dfa.is_match("ababa233"));
//! assert_eq!(dfa.search("xx aaa233 yy").map(|m| m.content), Some("aaa233"));
//!
//! let sim = nfa_matcher(eliminate_epsilon(&nfa));
//! assert!(sim.is_match("ababa233"));
//! ```
//!
//! Matching never allocates global state: automata and matchers are
//! immutable after construction and can be shared freely across threads.
//! Contract violations (DFA generation from an incompatible automaton,
//! simulating an automaton that still has epsilon edges, out-of-range
//! capture ids) abort with a panic rather than returning errors; absence of
//! a match is an `Option`/`bool`, never an error.

mod automaton;
mod debug;
mod matcher;
mod regex;

pub use automaton::{
    compile_to_nfa, eliminate_epsilon, enumerate_nfa, evaluate_nfa, generate_dfa, DfaAutomaton,
    DfaBuilder, DfaState, NfaArena, NfaAutomaton, NfaBranch, NfaBuilder, NfaEvaluation, NfaState,
    NfaTransition, Outbound, StateId, TransitionId, TransitionLink, INVALID_DFA_STATE,
    JUMP_TABLE_WIDTH,
};
pub use debug::{print_dfa, print_nfa, write_dfa, write_nfa};
pub use matcher::{
    dfa_matcher, nfa_matcher, DfaRegexMatcher, NfaRegexMatcher, RegexMatch, RegexMatcher,
};
pub use regex::{
    AnchorKind, AssertionKind, CharRange, ClosureStrategy, EpsilonPriority, ExprArena, ExprId,
    ManagedRegex, RegexExpr, RegexFactory, Repetition, MAX_CAPTURE_ID,
};
