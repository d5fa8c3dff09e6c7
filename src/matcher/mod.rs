//! Matching engines over compiled automata.
//!
//! Two matchers share one surface: the table-driven [`DfaRegexMatcher`] for
//! automata that stayed DFA-compatible, and the backtracking
//! [`NfaRegexMatcher`] which additionally handles anchors, captures and
//! back-references. Both are immutable; all per-call state lives on the
//! stack of the matching operation, so one matcher can serve any number of
//! threads.

mod dfa;
mod nfa;

#[cfg(test)]
mod tests;

pub use dfa::{dfa_matcher, DfaRegexMatcher};
pub use nfa::{nfa_matcher, NfaRegexMatcher};

/// One successful match.
///
/// Both fields borrow from the searched input; a match never outlives it.
/// `captures` is indexed by capture id, dense up to the highest id recorded
/// on the matched path, with `""` for groups that never captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexMatch<'t> {
    pub content: &'t str,
    pub captures: Vec<&'t str>,
}

/// Common matching surface of the DFA and NFA engines.
pub trait RegexMatcher {
    /// The fundamental search operation: find a match inside `view`,
    /// anywhere if `allow_substr` is set, otherwise starting at offset 0.
    /// Implemented differently by each engine; callers normally use the
    /// provided methods instead.
    fn search_internal<'t>(&self, view: &'t str, allow_substr: bool) -> Option<RegexMatch<'t>>;

    /// True if the expression matches `s` in full.
    fn is_match(&self, s: &str) -> bool {
        self.search_internal(s, false)
            .map_or(false, |found| found.content.len() == s.len())
    }

    /// Find the first match inside `s`.
    fn search<'t>(&self, s: &'t str) -> Option<RegexMatch<'t>> {
        self.search_internal(s, true)
    }

    /// Find every match inside `s`, left to right. Each match begins
    /// strictly after the previous match's end.
    fn search_all<'t>(&self, s: &'t str) -> Vec<RegexMatch<'t>> {
        let mut result = Vec::new();
        let mut offset = 0;

        while offset < s.len() {
            let rest = match s.get(offset..) {
                Some(rest) => rest,
                None => {
                    // Mid-codepoint offset; resync on the next boundary.
                    offset += 1;
                    continue;
                }
            };

            let found = match self.search_internal(rest, true) {
                Some(found) => found,
                None => break,
            };

            // Offset of the match within `rest`, recovered from the view.
            let start = found.content.as_ptr() as usize - rest.as_ptr() as usize;
            let consumed = start + found.content.len();
            result.push(found);

            // A zero-width match must still advance the scan.
            offset += consumed.max(start + 1);
        }

        result
    }
}

/// Cut `[lo, hi)` out of `view` as a subview. Falls back to `""` instead of
/// panicking when the bounds would split a code point; matched bounds are
/// always ASCII-aligned, so this only triggers on degenerate inputs.
pub(crate) fn view_slice(view: &str, lo: usize, hi: usize) -> &str {
    view.as_bytes()
        .get(lo..hi)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .unwrap_or("")
}
