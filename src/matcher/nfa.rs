//! Backtracking simulation over an epsilon-free NFA.
//!
//! The simulator keeps an explicit stack of `(target_index, edge)` frames on
//! the heap instead of recursing, so pathological patterns degrade in time,
//! not in stack space. Successors are pushed in reverse exit order, which
//! makes the stack pop earlier (higher-priority) edges first: greediness and
//! reluctance fall out of the edge order alone.

use crate::automaton::{NfaArena, NfaAutomaton, StateId, TransitionId, TransitionLink};
use crate::regex::AnchorKind;

use super::{view_slice, RegexMatch, RegexMatcher};

/// Matcher simulating an epsilon-free NFA with backtracking.
#[derive(Debug)]
pub struct NfaRegexMatcher {
    nfa: NfaAutomaton,
}

/// Wrap an epsilon-free NFA into a matcher.
pub fn nfa_matcher(nfa: NfaAutomaton) -> NfaRegexMatcher {
    assert!(
        !nfa.has_epsilon(),
        "NFA simulation requires an epsilon-free automaton"
    );

    NfaRegexMatcher { nfa }
}

/// One pending exploration step: take `edge`, landing at input position
/// `target_index`.
#[derive(Debug, Clone, Copy)]
struct Route {
    target_index: usize,
    edge: TransitionId,
}

/// A capture group opened on the current path.
#[derive(Debug, Clone, Copy)]
struct CaptureFrame {
    start: usize,
    depth: usize,
    id: u32,
}

impl RegexMatcher for NfaRegexMatcher {
    fn search_internal<'t>(&self, view: &'t str, allow_substr: bool) -> Option<RegexMatch<'t>> {
        let last_start = if allow_substr { view.len() } else { 0 };

        for start in 0..=last_start {
            if let Some(found) = self.simulate(view, start) {
                return Some(found);
            }
        }

        None
    }
}

impl NfaRegexMatcher {
    /// Run one backtracking simulation anchored at `start`.
    fn simulate<'t>(&self, view: &'t str, start: usize) -> Option<RegexMatch<'t>> {
        let arena = self.nfa.arena();
        let bytes = view.as_bytes();

        let mut routes: Vec<Route> = Vec::new();
        let mut captures: Vec<&'t str> = Vec::new();
        let mut capture_stack: Vec<CaptureFrame> = Vec::new();

        let mut found = false;
        let mut last_matched_index = start;
        let mut last_matched_depth = 0;

        expand_routes(
            arena,
            bytes,
            &captures,
            &mut routes,
            self.nfa.initial_state(),
            start,
        );

        while let Some(route) = routes.pop() {
            let depth = routes.len();

            // Once the stack shrinks below the depth of the best match,
            // further backtracking can only produce worse matches.
            if found && depth < last_matched_depth {
                break;
            }

            // Capture groups opened on abandoned branches are stale now.
            while capture_stack.last().map_or(false, |f| f.depth > depth) {
                capture_stack.pop();
            }

            let edge = &arena[route.edge];
            match edge.link {
                TransitionLink::BeginCapture(id) => {
                    capture_stack.push(CaptureFrame {
                        start: route.target_index,
                        depth,
                        id,
                    });
                }
                TransitionLink::EndCapture => {
                    // Read the innermost open group but leave it open; other
                    // paths may close the same group again after
                    // backtracking.
                    if let Some(frame) = capture_stack.last() {
                        let slot = frame.id as usize;
                        if captures.len() <= slot {
                            captures.resize(slot + 1, "");
                        }
                        captures[slot] = view_slice(view, frame.start, route.target_index);
                    }
                }
                _ => {}
            }

            if arena[edge.target].is_final {
                // Remember the match, then keep exploring: a longer one may
                // still be reachable on this branch.
                found = true;
                last_matched_index = route.target_index;
                last_matched_depth = depth;
            }

            expand_routes(
                arena,
                bytes,
                &captures,
                &mut routes,
                edge.target,
                route.target_index,
            );
        }

        if found {
            Some(RegexMatch {
                content: view_slice(view, start, last_matched_index),
                captures,
            })
        } else {
            None
        }
    }
}

/// Push a route for every viable exit of `state` at input position `index`,
/// in reverse exit order so that the first exit is popped first.
fn expand_routes(
    arena: &NfaArena,
    bytes: &[u8],
    captures: &[&str],
    routes: &mut Vec<Route>,
    state: StateId,
    index: usize,
) {
    for &edge_id in arena[state].exits.iter().rev() {
        let edge = &arena[edge_id];
        match edge.link {
            TransitionLink::Entity(rg) => {
                if index < bytes.len() && rg.contains(bytes[index]) {
                    routes.push(Route {
                        target_index: index + 1,
                        edge: edge_id,
                    });
                }
            }

            TransitionLink::Anchor(AnchorKind::LineStart) => {
                if index == 0 || bytes[index - 1] == b'\n' {
                    routes.push(Route {
                        target_index: index,
                        edge: edge_id,
                    });
                }
            }
            TransitionLink::Anchor(AnchorKind::LineEnd) => {
                if index == bytes.len() || bytes[index] == b'\n' {
                    routes.push(Route {
                        target_index: index,
                        edge: edge_id,
                    });
                }
            }

            TransitionLink::BeginCapture(_)
            | TransitionLink::EndCapture
            | TransitionLink::BeginAssertion(_)
            | TransitionLink::EndAssertion
            | TransitionLink::Finish => {
                routes.push(Route {
                    target_index: index,
                    edge: edge_id,
                });
            }

            TransitionLink::Reference(id) => {
                // Unset and empty captures never match; anything else would
                // loop forever on zero progress.
                let captured = captures.get(id as usize).copied().unwrap_or("");
                if !captured.is_empty() && bytes[index..].starts_with(captured.as_bytes()) {
                    routes.push(Route {
                        target_index: index + captured.len(),
                        edge: edge_id,
                    });
                }
            }

            TransitionLink::Epsilon(_) => {
                panic!("epsilon transition reached the NFA simulator");
            }
        }
    }
}
