//! Automaton construction and transformation.
//!
//! The pipeline lowers a regular expression into an epsilon-NFA, digests it
//! by epsilon-closure evaluation, and from there either rewrites it as an
//! epsilon-free NFA for the backtracking simulator or runs the subset
//! construction into a dense DFA.
//!
//! # Module Organization
//!
//! - `arena`: index-based storage for states and transitions
//! - `nfa`: `NfaBuilder` and the frozen `NfaAutomaton`
//! - `compile`: per-node lowering rules from the expression tree
//! - `analysis`: reachability, epsilon-closure digest, epsilon elimination
//! - `dfa`: `DfaAutomaton`, its builder and the subset construction

mod analysis;
mod arena;
mod compile;
mod dfa;
mod nfa;

pub use analysis::{eliminate_epsilon, enumerate_nfa, evaluate_nfa, NfaEvaluation, Outbound};
pub use arena::{NfaArena, NfaState, NfaTransition, StateId, TransitionId, TransitionLink};
pub use compile::compile_to_nfa;
pub use dfa::{
    generate_dfa, DfaAutomaton, DfaBuilder, DfaState, INVALID_DFA_STATE, JUMP_TABLE_WIDTH,
};
pub use nfa::{NfaAutomaton, NfaBranch, NfaBuilder};
