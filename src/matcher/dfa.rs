//! Table-driven scanning over a [`DfaAutomaton`].

use crate::automaton::{DfaAutomaton, INVALID_DFA_STATE};

use super::{view_slice, RegexMatch, RegexMatcher};

/// Matcher running a compiled DFA.
#[derive(Debug)]
pub struct DfaRegexMatcher {
    dfa: DfaAutomaton,
}

/// Wrap a DFA into a matcher.
pub fn dfa_matcher(dfa: DfaAutomaton) -> DfaRegexMatcher {
    DfaRegexMatcher { dfa }
}

impl RegexMatcher for DfaRegexMatcher {
    fn search_internal<'t>(&self, view: &'t str, allow_substr: bool) -> Option<RegexMatch<'t>> {
        let bytes = view.as_bytes();

        for start in 0..bytes.len() {
            let mut found = false;
            let mut last_matched = start;
            let mut state = self.dfa.initial_state();

            for (index, &ch) in bytes.iter().enumerate().skip(start) {
                state = self.dfa.transit(state, ch);
                if state == INVALID_DFA_STATE {
                    // No further character is wanted.
                    break;
                }

                // Keep the rightmost accepting position of this run.
                if self.dfa.is_accepting(state) {
                    found = true;
                    last_matched = index;
                }
            }

            if found {
                return Some(RegexMatch {
                    content: view_slice(view, start, last_matched + 1),
                    captures: Vec::new(),
                });
            } else if !allow_substr {
                break;
            }
        }

        None
    }
}
