//! NFA construction: the mutable builder and the frozen automaton.
//!
//! `NfaBuilder` allocates states and typed transitions inside an arena and
//! tracks two structural facts while doing so: whether any epsilon edge was
//! added, and whether the graph is still expressible as a character-driven
//! DFA. `build` freezes everything into an immutable `NfaAutomaton`.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::collections::VecDeque;

use crate::regex::{AnchorKind, AssertionKind, CharRange, EpsilonPriority};

use super::arena::{NfaArena, StateId, TransitionId, TransitionLink};

/// An entry and an exit state delimiting one subgraph under construction.
#[derive(Debug, Clone, Copy)]
pub struct NfaBranch {
    pub begin: StateId,
    pub end: StateId,
}

/// Builder for [`NfaAutomaton`] values.
#[derive(Debug)]
pub struct NfaBuilder {
    arena: NfaArena,
    has_epsilon: bool,
    dfa_compatible: bool,
}

impl NfaBuilder {
    pub fn new() -> Self {
        Self {
            arena: NfaArena::new(),
            has_epsilon: false,
            dfa_compatible: true,
        }
    }

    /// Manually rule out DFA generation for the automaton under construction.
    pub fn disable_dfa(&mut self) {
        self.dfa_compatible = false;
    }

    /// Allocate a new state.
    pub fn new_state(&mut self, is_final: bool) -> StateId {
        self.arena.alloc_state(is_final)
    }

    /// Allocate an independent pair of states.
    pub fn new_branch(&mut self, is_final: bool) -> NfaBranch {
        NfaBranch {
            begin: self.new_state(false),
            end: self.new_state(is_final),
        }
    }

    pub fn new_epsilon_transition(
        &mut self,
        branch: NfaBranch,
        priority: EpsilonPriority,
    ) -> TransitionId {
        self.construct_transition(branch, TransitionLink::Epsilon(priority))
    }

    pub fn new_entity_transition(&mut self, branch: NfaBranch, value: CharRange) -> TransitionId {
        self.construct_transition(branch, TransitionLink::Entity(value))
    }

    pub fn new_anchor_transition(&mut self, branch: NfaBranch, anchor: AnchorKind) -> TransitionId {
        self.construct_transition(branch, TransitionLink::Anchor(anchor))
    }

    pub fn new_begin_capture_transition(&mut self, branch: NfaBranch, id: u32) -> TransitionId {
        self.construct_transition(branch, TransitionLink::BeginCapture(id))
    }

    pub fn new_end_capture_transition(&mut self, branch: NfaBranch) -> TransitionId {
        self.construct_transition(branch, TransitionLink::EndCapture)
    }

    pub fn new_reference_transition(&mut self, branch: NfaBranch, id: u32) -> TransitionId {
        self.construct_transition(branch, TransitionLink::Reference(id))
    }

    pub fn new_begin_assertion_transition(
        &mut self,
        branch: NfaBranch,
        kind: AssertionKind,
    ) -> TransitionId {
        self.construct_transition(branch, TransitionLink::BeginAssertion(kind))
    }

    pub fn new_end_assertion_transition(&mut self, branch: NfaBranch) -> TransitionId {
        self.construct_transition(branch, TransitionLink::EndAssertion)
    }

    pub fn new_finish_transition(&mut self, branch: NfaBranch) -> TransitionId {
        self.construct_transition(branch, TransitionLink::Finish)
    }

    /// Construct a transition with the same kind and payload as `link`
    /// between the endpoints of `branch`.
    pub fn clone_transition(&mut self, branch: NfaBranch, link: TransitionLink) -> TransitionId {
        self.construct_transition(branch, link)
    }

    /// Replicate the subgraph reachable from `source.begin` onto `target`,
    /// mapping `source.begin` to `target.begin` and `source.end` to
    /// `target.end` and cloning every other reached state onto a fresh one.
    /// Transition order is preserved per state.
    pub fn clone_branch(&mut self, target: NfaBranch, source: NfaBranch) {
        let mut state_map: FxHashMap<StateId, StateId> = FxHashMap::default();
        let mut waitlist: VecDeque<StateId> = VecDeque::new();

        state_map.insert(source.begin, target.begin);
        state_map.insert(source.end, target.end);

        waitlist.push_back(source.begin);
        while let Some(start) = waitlist.pop_front() {
            let mapped_start = state_map[&start];

            // Copy the exit list out so the arena can be mutated below.
            let exits: SmallVec<[TransitionId; 4]> = self.arena[start].exits.clone();
            for edge_id in exits {
                let (edge_target, edge_link) = {
                    let edge = &self.arena[edge_id];
                    (edge.target, edge.link)
                };

                let mapped_target = match state_map.get(&edge_target) {
                    Some(&mapped) => mapped,
                    None => {
                        let mapped = self.new_state(false);
                        state_map.insert(edge_target, mapped);
                        waitlist.push_back(edge_target);
                        mapped
                    }
                };

                self.clone_transition(
                    NfaBranch {
                        begin: mapped_start,
                        end: mapped_target,
                    },
                    edge_link,
                );
            }
        }
    }

    /// Freeze the builder into an immutable automaton rooted at `start`.
    pub fn build(self, start: StateId) -> NfaAutomaton {
        NfaAutomaton {
            arena: self.arena,
            initial: start,
            has_epsilon: self.has_epsilon,
            dfa_compatible: self.dfa_compatible,
        }
    }

    fn construct_transition(&mut self, branch: NfaBranch, link: TransitionLink) -> TransitionId {
        if link.is_epsilon() {
            self.has_epsilon = true;
        }
        if self.dfa_compatible && link.breaks_dfa() {
            self.dfa_compatible = false;
        }

        self.arena.alloc_transition(branch.begin, branch.end, link)
    }
}

/// An immutable non-deterministic finite automaton.
///
/// Owns its arena exclusively; every state and transition is reachable from
/// the initial state through the exit lists.
#[derive(Debug)]
pub struct NfaAutomaton {
    arena: NfaArena,
    initial: StateId,
    has_epsilon: bool,
    dfa_compatible: bool,
}

impl NfaAutomaton {
    #[inline]
    pub fn initial_state(&self) -> StateId {
        self.initial
    }

    /// True if any transition is an epsilon edge.
    #[inline]
    pub fn has_epsilon(&self) -> bool {
        self.has_epsilon
    }

    /// True if every transition is an Entity or an Epsilon edge.
    #[inline]
    pub fn dfa_compatible(&self) -> bool {
        self.dfa_compatible
    }

    #[inline]
    pub fn arena(&self) -> &NfaArena {
        &self.arena
    }
}
