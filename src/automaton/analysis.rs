//! On-automaton algorithms: reachability enumeration, epsilon-closure
//! evaluation and epsilon elimination.
//!
//! `evaluate_nfa` digests an automaton into its *solid* states (states
//! entered through at least one non-epsilon edge, plus the initial state)
//! and, per solid state, the ordered list of non-epsilon transitions
//! reachable through any epsilon prefix. Epsilon priorities order that list;
//! the position where an epsilon-only path first reaches a final state is
//! kept as an explicit [`Outbound::Accept`] entry, so the exit preference of
//! a closure survives elimination.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use std::mem;

use crate::regex::EpsilonPriority;

use super::arena::{NfaArena, StateId, TransitionId, TransitionLink};
use super::nfa::{NfaAutomaton, NfaBranch, NfaBuilder};

/// One entry of a solid state's outbound list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound {
    /// A non-epsilon transition of the source automaton.
    Edge(TransitionId),
    /// The match may stop here; ranks the accept option among the edges.
    Accept,
}

/// The digest produced by [`evaluate_nfa`].
#[derive(Debug)]
pub struct NfaEvaluation {
    pub initial: StateId,
    /// Solid states in discovery order.
    pub solid: Vec<StateId>,
    /// States from which the match can terminate: final themselves, or
    /// reaching a final state through epsilon edges only.
    pub accepting: FxHashSet<StateId>,
    /// Ordered non-epsilon outbounds per solid state.
    pub outbounds: FxHashMap<StateId, Vec<Outbound>>,
}

/// Visit every state reachable from `initial` once, in breadth-first
/// discovery order.
pub fn enumerate_nfa(arena: &NfaArena, initial: StateId, mut callback: impl FnMut(StateId)) {
    let mut visited: FxHashSet<StateId> = FxHashSet::default();
    let mut waitlist: VecDeque<StateId> = VecDeque::new();

    visited.insert(initial);
    waitlist.push_back(initial);
    while let Some(source) = waitlist.pop_front() {
        callback(source);

        for &edge in &arena[source].exits {
            let target = arena[edge].target;
            if visited.insert(target) {
                waitlist.push_back(target);
            }
        }
    }
}

/// Exploration rank of a transition: High epsilon edges come first, Low ones
/// last, everything else rates as Normal.
fn link_rank(link: &TransitionLink) -> u8 {
    match link {
        TransitionLink::Epsilon(EpsilonPriority::High) => 0,
        TransitionLink::Epsilon(EpsilonPriority::Normal) => 1,
        TransitionLink::Epsilon(EpsilonPriority::Low) => 2,
        _ => 1,
    }
}

/// Append `state`'s exits to `output`, sorted by rank. The sort is stable,
/// so equal-rank edges keep construction order.
fn expand_exits(arena: &NfaArena, output: &mut Vec<Outbound>, state: StateId) {
    let from = output.len();
    output.extend(arena[state].exits.iter().map(|&t| Outbound::Edge(t)));
    output[from..].sort_by_key(|entry| match entry {
        Outbound::Edge(t) => link_rank(&arena[*t].link),
        Outbound::Accept => 1,
    });
}

/// Digest `atm` into solid states, accepting states and ordered outbounds.
pub fn evaluate_nfa(atm: &NfaAutomaton) -> NfaEvaluation {
    let arena = atm.arena();
    let initial = atm.initial_state();

    let mut result = NfaEvaluation {
        initial,
        solid: Vec::new(),
        accepting: FxHashSet::default(),
        outbounds: FxHashMap::default(),
    };

    let mut solid_seen: FxHashSet<StateId> = FxHashSet::default();
    let mut waitlist: VecDeque<StateId> = VecDeque::new();

    solid_seen.insert(initial);
    result.solid.push(initial);
    waitlist.push_back(initial);

    // Iterate until no further solid state is reachable.
    while let Some(source) = waitlist.pop_front() {
        let mut expanded: FxHashSet<TransitionId> = FxHashSet::default();
        let mut output: Vec<Outbound> = Vec::new();
        let mut input: Vec<Outbound> = Vec::new();
        let mut accept_recorded = false;

        if arena[source].is_final {
            result.accepting.insert(source);
        }

        expand_exits(arena, &mut output, source);

        // Expand epsilon edges round by round; non-epsilon entries are
        // carried through so their relative order is kept.
        let mut has_expansion = true;
        while has_expansion {
            has_expansion = false;
            input.clear();
            mem::swap(&mut input, &mut output);

            for entry in &input {
                let edge_id = match *entry {
                    Outbound::Accept => {
                        output.push(Outbound::Accept);
                        continue;
                    }
                    Outbound::Edge(edge_id) => edge_id,
                };

                let edge = &arena[edge_id];
                if edge.link.is_epsilon() {
                    if arena[edge.target].is_final {
                        // The source can reach a match without consuming
                        // anything; remember the rank of that option.
                        result.accepting.insert(source);
                        if !accept_recorded {
                            accept_recorded = true;
                            output.push(Outbound::Accept);
                        }
                    }

                    // Expand each epsilon edge once to stay loop-safe.
                    if expanded.insert(edge_id) {
                        has_expansion = true;
                        expand_exits(arena, &mut output, edge.target);
                    }
                } else {
                    // The edge enters a solid state.
                    if solid_seen.insert(edge.target) {
                        result.solid.push(edge.target);
                        waitlist.push_back(edge.target);
                    }
                    output.push(Outbound::Edge(edge_id));
                }
            }
        }

        // Repeated expansion can duplicate entries; collapsing adjacent
        // duplicates is a heuristic, the language does not depend on it.
        output.dedup();
        result.outbounds.insert(source, output);
    }

    result
}

/// Rewrite `atm` as an equivalent automaton without epsilon transitions.
///
/// Every solid state maps to a fresh state; outbound transitions are cloned
/// in order, and each [`Outbound::Accept`] entry becomes a zero-width
/// [`TransitionLink::Finish`] edge into one shared accepting sink. The
/// result never has epsilon edges, so eliminating it again is a no-op up to
/// state identity.
pub fn eliminate_epsilon(atm: &NfaAutomaton) -> NfaAutomaton {
    let eval = evaluate_nfa(atm);
    let arena = atm.arena();

    let mut builder = NfaBuilder::new();
    let mut state_map: FxHashMap<StateId, StateId> = FxHashMap::default();

    for &state in &eval.solid {
        let mapped = builder.new_state(arena[state].is_final);
        state_map.insert(state, mapped);
    }

    let mut accept_sink: Option<StateId> = None;

    for &source in &eval.solid {
        let mapped_source = state_map[&source];
        let entries = match eval.outbounds.get(&source) {
            Some(entries) => entries,
            None => continue,
        };

        for entry in entries {
            match *entry {
                Outbound::Accept => {
                    let sink = match accept_sink {
                        Some(sink) => sink,
                        None => {
                            let sink = builder.new_state(true);
                            accept_sink = Some(sink);
                            sink
                        }
                    };
                    builder.new_finish_transition(NfaBranch {
                        begin: mapped_source,
                        end: sink,
                    });
                }
                Outbound::Edge(edge_id) => {
                    let edge = &arena[edge_id];
                    debug_assert!(!edge.link.is_epsilon());
                    builder.clone_transition(
                        NfaBranch {
                            begin: mapped_source,
                            end: state_map[&edge.target],
                        },
                        edge.link,
                    );
                }
            }
        }
    }

    builder.build(state_map[&eval.initial])
}
