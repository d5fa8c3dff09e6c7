//! End-to-end matching scenarios exercising the full pipeline, plus the
//! cross-engine properties the pipeline guarantees.

use crate::automaton::{compile_to_nfa, eliminate_epsilon, generate_dfa};
use crate::matcher::{dfa_matcher, nfa_matcher, RegexMatch, RegexMatcher};
use crate::regex::{AnchorKind, ClosureStrategy, ExprId, ManagedRegex, RegexFactory, Repetition};

fn build(pattern: impl FnOnce(&mut RegexFactory) -> ExprId) -> ManagedRegex {
    let mut f = RegexFactory::new();
    let root = pattern(&mut f);
    f.generate(root)
}

/// `(a|b)+233`
fn ab_plus_233(f: &mut RegexFactory) -> ExprId {
    let a = f.char_of(b'a');
    let b = f.char_of(b'b');
    let any = f.alter(vec![a, b]);
    let rep = f.plus(any);
    let tail = f.literal("233");
    f.concat(vec![rep, tail])
}

fn offset_in(haystack: &str, found: &RegexMatch) -> usize {
    found.content.as_ptr() as usize - haystack.as_ptr() as usize
}

/// True if `inner` is a subview of `outer` (or empty).
fn is_subview(outer: &str, inner: &str) -> bool {
    if inner.is_empty() {
        return true;
    }
    let outer_lo = outer.as_ptr() as usize;
    let outer_hi = outer_lo + outer.len();
    let inner_lo = inner.as_ptr() as usize;
    let inner_hi = inner_lo + inner.len();
    outer_lo <= inner_lo && inner_hi <= outer_hi
}

#[test]
fn test_scenario_full_match_via_both_engines() {
    let regex = build(ab_plus_233);

    let dfa = dfa_matcher(generate_dfa(&compile_to_nfa(&regex)));
    assert!(dfa.is_match("aaa233"));
    assert!(dfa.is_match("ababa233"));
    assert!(!dfa.is_match("aaa2334"));
    assert!(!dfa.is_match("ggababa233"));

    let nfa = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex)));
    assert!(nfa.is_match("aaa233"));
    assert!(nfa.is_match("ababa233"));
    assert!(!nfa.is_match("aaa2334"));
    assert!(!nfa.is_match("ggababa233"));
}

#[test]
fn test_scenario_dfa_search_keeps_longest_prefix() {
    let regex = build(ab_plus_233);
    let dfa = dfa_matcher(generate_dfa(&compile_to_nfa(&regex)));

    let found = dfa.search("aaa2334").expect("should match a substring");
    assert_eq!(found.content, "aaa233");

    let found = dfa.search("ggababa233").expect("should match mid-string");
    assert_eq!(found.content, "ababa233");
}

#[test]
fn test_scenario_search_all_over_mixed_text() {
    let regex = build(ab_plus_233);
    let input = "a233a;iogjb233iia6bb233";

    let dfa = dfa_matcher(generate_dfa(&compile_to_nfa(&regex)));
    let matches = dfa.search_all(input);

    let contents: Vec<_> = matches.iter().map(|m| m.content).collect();
    assert_eq!(contents, vec!["a233", "b233", "bb233"]);

    let offsets: Vec<_> = matches.iter().map(|m| offset_in(input, m)).collect();
    assert_eq!(offsets, vec![0, 10, 18]);

    // The backtracking engine sees the same matches.
    let nfa = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex)));
    let matches = nfa.search_all(input);
    let contents: Vec<_> = matches.iter().map(|m| m.content).collect();
    assert_eq!(contents, vec!["a233", "b233", "bb233"]);
}

/// `([$|:])([a-z]|[A-Z])+[0-9]*\1;` with capture ids 1 and 2.
fn delimited_word(f: &mut RegexFactory) -> ExprId {
    let dollar = f.char_of(b'$');
    let pipe = f.char_of(b'|');
    let colon = f.char_of(b':');
    let delimiter = f.alter(vec![dollar, pipe, colon]);
    let open = f.capture(1, delimiter);

    let letter = f.letter();
    let letter_group = f.capture(2, letter);
    let word = f.plus(letter_group);

    let digit = f.digit();
    let digits = f.star(digit);

    let close = f.reference(1);
    let semi = f.char_of(b';');

    f.concat(vec![open, word, digits, close, semi])
}

#[test]
fn test_scenario_backreferenced_delimiters() {
    let regex = build(delimited_word);
    assert!(!regex.is_dfa_compatible());

    let nfa = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex)));

    let input = "a:ab12:;b$cd$;e";
    let matches = nfa.search_all(input);
    let contents: Vec<_> = matches.iter().map(|m| m.content).collect();
    assert_eq!(contents, vec![":ab12:;", "$cd$;"]);

    // The opening delimiter is the character right before the semicolon.
    for found in &matches {
        let open = found.captures[1];
        assert_eq!(open.len(), 1);
        let before_semi = &found.content[found.content.len() - 2..found.content.len() - 1];
        assert_eq!(open, before_semi);
        assert!(is_subview(found.content, open));
        assert!(is_subview(found.content, found.captures[2]));
    }
    assert_eq!(matches[0].captures[1], ":");
    assert_eq!(matches[0].captures[2], "b");
    assert_eq!(matches[1].captures[1], "$");
    assert_eq!(matches[1].captures[2], "d");

    // Mixed text where the closing delimiter never precedes the semicolon.
    let none = nfa.search_all(":a233:iogjb233iia6\n|bb233$\n$as6$\n$agu8;$");
    assert!(none.is_empty());
}

#[test]
fn test_scenario_repeated_group_keeps_last_capture() {
    let regex = build(|f| {
        let ab = f.literal("ab");
        let aa = f.literal("aa");
        let any = f.alter(vec![ab, aa]);
        let group = f.capture(0, any);
        f.plus(group)
    });

    let nfa = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex)));
    let found = nfa.search("ababaa").expect("should match the whole input");

    assert_eq!(found.content, "ababaa");
    assert_eq!(found.captures, vec!["aa"]);
    assert!(is_subview(found.content, found.captures[0]));
}

#[test]
fn test_scenario_greedy_reluctant_bounds() {
    let greedy = build(|f| {
        let a = f.char_of(b'a');
        f.repeat(a, Repetition::new(2, 4), ClosureStrategy::Greedy)
    });
    let reluctant = build(|f| {
        let a = f.char_of(b'a');
        f.repeat(a, Repetition::new(2, 4), ClosureStrategy::Reluctant)
    });

    let greedy = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&greedy)));
    let reluctant = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&reluctant)));

    assert_eq!(greedy.search("aaaaa").map(|m| m.content), Some("aaaa"));
    assert_eq!(reluctant.search("aaaaa").map(|m| m.content), Some("aa"));
}

#[test]
fn test_search_all_is_sorted_and_non_overlapping() {
    let regex = build(|f| {
        let a = f.char_of(b'a');
        f.plus(a)
    });
    let input = "aa b aaa ba a";

    for matches in [
        dfa_matcher(generate_dfa(&compile_to_nfa(&regex))).search_all(input),
        nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex))).search_all(input),
    ] {
        let contents: Vec<_> = matches.iter().map(|m| m.content).collect();
        assert_eq!(contents, vec!["aa", "aaa", "a", "a"]);

        let mut previous_end = 0;
        for (i, found) in matches.iter().enumerate() {
            let start = offset_in(input, found);
            if i > 0 {
                assert!(start >= previous_end, "matches overlap or regress");
            }
            previous_end = start + found.content.len();
        }
    }
}

#[test]
fn test_search_all_advances_past_zero_width_matches() {
    let regex = build(|f| {
        let a = f.char_of(b'a');
        f.star(a)
    });
    let nfa = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex)));

    let matches = nfa.search_all("bb");
    let contents: Vec<_> = matches.iter().map(|m| m.content).collect();
    // Zero-width matches still advance the scan one byte at a time.
    assert_eq!(contents, vec!["", ""]);
}

#[test]
fn test_anchored_lines_via_search_all() {
    let regex = build(|f| {
        let start = f.anchor(AnchorKind::LineStart);
        let letters = f.range(crate::regex::CharRange::new(b'a', b'z'));
        let word = f.plus(letters);
        let end = f.anchor(AnchorKind::LineEnd);
        f.concat(vec![start, word, end])
    });
    let nfa = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex)));

    let matches = nfa.search_all("ab\ncd\n12\nef");
    let contents: Vec<_> = matches.iter().map(|m| m.content).collect();
    assert_eq!(contents, vec!["ab", "cd", "ef"]);
}

#[test]
fn test_captures_are_dense_up_to_highest_id() {
    let regex = build(|f| {
        let a = f.char_of(b'a');
        f.capture(5, a)
    });
    let nfa = nfa_matcher(eliminate_epsilon(&compile_to_nfa(&regex)));

    let found = nfa.search("a").expect("should match");
    assert_eq!(found.captures.len(), 6);
    assert_eq!(found.captures[5], "a");
    for unused in &found.captures[..5] {
        assert_eq!(*unused, "");
    }
}
