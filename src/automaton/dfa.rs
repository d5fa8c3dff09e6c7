//! Deterministic finite automaton: the dense jump table and the subset
//! construction that produces it.

use rustc_hash::FxHashMap;
use std::collections::VecDeque;

use super::analysis::{evaluate_nfa, Outbound};
use super::arena::{StateId, TransitionId, TransitionLink};
use super::nfa::NfaAutomaton;

/// A DFA state is denoted by a plain integer; state 0 is initial.
pub type DfaState = u32;

/// Sentinel for "no transition".
pub const INVALID_DFA_STATE: DfaState = u32::MAX;

/// Row width of the jump table; one column per ASCII codepoint.
pub const JUMP_TABLE_WIDTH: usize = 128;

/// An immutable DFA: an `N x 128` jump table plus a parallel acceptance
/// vector. It owns nothing of the NFA it was derived from.
#[derive(Debug, Clone)]
pub struct DfaAutomaton {
    acceptance: Vec<bool>,
    jumptable: Vec<DfaState>,
}

impl DfaAutomaton {
    pub fn state_count(&self) -> usize {
        self.acceptance.len()
    }

    #[inline]
    pub fn initial_state(&self) -> DfaState {
        0
    }

    #[inline]
    pub fn is_accepting(&self, state: DfaState) -> bool {
        state != INVALID_DFA_STATE && self.acceptance[state as usize]
    }

    /// Follow the transition out of `src` on `ch`. Characters outside the
    /// ASCII alphabet never transition anywhere.
    #[inline]
    pub fn transit(&self, src: DfaState, ch: u8) -> DfaState {
        debug_assert!((src as usize) < self.state_count());
        if ch as usize >= JUMP_TABLE_WIDTH {
            return INVALID_DFA_STATE;
        }

        self.jumptable[src as usize * JUMP_TABLE_WIDTH + ch as usize]
    }
}

/// Incremental constructor for [`DfaAutomaton`].
#[derive(Debug, Default)]
pub struct DfaBuilder {
    acceptance: Vec<bool>,
    jumptable: Vec<DfaState>,
}

impl DfaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a state with an empty jump-table row.
    pub fn new_state(&mut self, accepting: bool) -> DfaState {
        let id = self.acceptance.len() as DfaState;
        self.acceptance.push(accepting);
        self.jumptable
            .resize(self.jumptable.len() + JUMP_TABLE_WIDTH, INVALID_DFA_STATE);
        id
    }

    pub fn new_transition(&mut self, src: DfaState, target: DfaState, ch: u8) {
        assert!(
            (src as usize) < self.acceptance.len() && (target as usize) < self.acceptance.len(),
            "transition endpoints must be allocated states"
        );
        assert!((ch as usize) < JUMP_TABLE_WIDTH, "character out of alphabet");

        self.jumptable[src as usize * JUMP_TABLE_WIDTH + ch as usize] = target;
    }

    pub fn build(self) -> DfaAutomaton {
        DfaAutomaton {
            acceptance: self.acceptance,
            jumptable: self.jumptable,
        }
    }
}

/// Build a DFA from a DFA-compatible NFA by subset construction.
///
/// Sets of NFA states reached together become single DFA states; a set is
/// accepting when any member is. The source automaton must be
/// DFA-compatible, and its language must not contain the empty string.
pub fn generate_dfa(atm: &NfaAutomaton) -> DfaAutomaton {
    assert!(
        atm.dfa_compatible(),
        "DFA generation requires a DFA-compatible automaton"
    );

    let eval = evaluate_nfa(atm);
    let arena = atm.arena();
    let mut builder = DfaBuilder::new();

    // Subsets are kept as sorted id vectors so they can key the map.
    let mut id_map: FxHashMap<Vec<StateId>, DfaState> = FxHashMap::default();
    let mut waitlist: VecDeque<Vec<StateId>> = VecDeque::new();

    assert!(
        !eval.accepting.contains(&eval.initial),
        "the initial state must not accept: empty matches are not expressible"
    );
    let initial_set = vec![eval.initial];
    let initial_id = builder.new_state(false);
    id_map.insert(initial_set.clone(), initial_id);
    waitlist.push_back(initial_set);

    while let Some(source_set) = waitlist.pop_front() {
        let source_id = id_map[&source_set];

        // Collect the outgoing transitions of every member. DFA
        // compatibility guarantees they are all Entity edges.
        let mut transitions: Vec<TransitionId> = Vec::new();
        for state in &source_set {
            if let Some(entries) = eval.outbounds.get(state) {
                for entry in entries {
                    match entry {
                        Outbound::Edge(edge_id) => transitions.push(*edge_id),
                        Outbound::Accept => {}
                    }
                }
            }
        }
        debug_assert!(transitions
            .iter()
            .all(|&t| matches!(arena[t].link, TransitionLink::Entity(_))));

        for ch in 0..JUMP_TABLE_WIDTH as u8 {
            let mut target_set: Vec<StateId> = Vec::new();
            for &edge_id in &transitions {
                let edge = &arena[edge_id];
                if let TransitionLink::Entity(rg) = edge.link {
                    if rg.contains(ch) {
                        target_set.push(edge.target);
                    }
                }
            }

            // No member steps on this character.
            if target_set.is_empty() {
                continue;
            }

            target_set.sort_unstable_by_key(|s| s.index());
            target_set.dedup();

            let target_id = match id_map.get(&target_set) {
                Some(&id) => id,
                None => {
                    let accepting = target_set.iter().any(|s| eval.accepting.contains(s));
                    let id = builder.new_state(accepting);
                    id_map.insert(target_set.clone(), id);
                    waitlist.push_back(target_set);
                    id
                }
            };

            builder.new_transition(source_id, target_id, ch);
        }
    }

    builder.build()
}
