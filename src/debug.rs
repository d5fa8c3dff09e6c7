//! Human-readable automaton dumps.
//!
//! Purely observational: the printers visit every state reachable from the
//! initial state once, number states in discovery order and list each
//! outgoing transition with its kind and payload. They write into any
//! [`fmt::Write`] sink; the `print_*` wrappers go to standard output.

use rustc_hash::FxHashMap;
use std::fmt::{self, Write};

use crate::automaton::{
    enumerate_nfa, DfaAutomaton, NfaAutomaton, StateId, TransitionLink, INVALID_DFA_STATE,
};
use crate::regex::{AnchorKind, AssertionKind, EpsilonPriority};

fn priority_name(priority: EpsilonPriority) -> &'static str {
    match priority {
        EpsilonPriority::High => "High",
        EpsilonPriority::Normal => "Normal",
        EpsilonPriority::Low => "Low",
    }
}

fn anchor_name(anchor: AnchorKind) -> &'static str {
    match anchor {
        AnchorKind::LineStart => "^",
        AnchorKind::LineEnd => "$",
    }
}

fn assertion_name(kind: AssertionKind) -> &'static str {
    match kind {
        AssertionKind::PositiveLookAhead => "PositiveLookAhead",
        AssertionKind::NegativeLookAhead => "NegativeLookAhead",
        AssertionKind::PositiveLookBehind => "PositiveLookBehind",
        AssertionKind::NegativeLookBehind => "NegativeLookBehind",
    }
}

fn write_char(out: &mut impl Write, ch: u8) -> fmt::Result {
    if (0x20..0x7F).contains(&ch) {
        write!(out, "{}", ch as char)
    } else {
        write!(out, "\\x{:02x}", ch)
    }
}

fn write_link(out: &mut impl Write, link: &TransitionLink) -> fmt::Result {
    match link {
        TransitionLink::Epsilon(priority) => write!(out, "Epsilon({})", priority_name(*priority)),
        TransitionLink::Entity(rg) => {
            write!(out, "Entity(")?;
            write_char(out, rg.min())?;
            if rg.min() != rg.max() {
                write!(out, "-")?;
                write_char(out, rg.max())?;
            }
            write!(out, ")")
        }
        TransitionLink::Anchor(anchor) => write!(out, "Anchor({})", anchor_name(*anchor)),
        TransitionLink::BeginCapture(id) => write!(out, "BeginCapture({})", id),
        TransitionLink::EndCapture => write!(out, "EndCapture"),
        TransitionLink::Reference(id) => write!(out, "Reference({})", id),
        TransitionLink::BeginAssertion(kind) => {
            write!(out, "BeginAssertion({})", assertion_name(*kind))
        }
        TransitionLink::EndAssertion => write!(out, "EndAssertion"),
        TransitionLink::Finish => write!(out, "Finish"),
    }
}

/// Dump `atm` into `out`, one block per reachable state.
pub fn write_nfa(out: &mut impl Write, atm: &NfaAutomaton) -> fmt::Result {
    let arena = atm.arena();

    // Number states in discovery order.
    let mut id_map: FxHashMap<StateId, usize> = FxHashMap::default();
    enumerate_nfa(arena, atm.initial_state(), |state| {
        let id = id_map.len();
        id_map.insert(state, id);
    });

    let mut result = Ok(());
    enumerate_nfa(arena, atm.initial_state(), |state| {
        if result.is_err() {
            return;
        }

        result = (|| -> fmt::Result {
            write!(out, "NfaState {}", id_map[&state])?;
            if arena[state].is_final {
                write!(out, "(final)")?;
            }
            writeln!(out, ":")?;

            for &edge_id in &arena[state].exits {
                let edge = &arena[edge_id];
                write!(out, "  ")?;
                write_link(out, &edge.link)?;
                writeln!(out, "  => NfaState {}", id_map[&edge.target])?;
            }

            Ok(())
        })();
    });

    result
}

/// Dump `atm` into `out`, one block per state with every live transition.
pub fn write_dfa(out: &mut impl Write, atm: &DfaAutomaton) -> fmt::Result {
    for state in 0..atm.state_count() as u32 {
        let accepting = if atm.is_accepting(state) { "(final)" } else { "" };
        writeln!(out, "DfaState {}{}:", state, accepting)?;

        for ch in 0..128u8 {
            let target = atm.transit(state, ch);
            if target != INVALID_DFA_STATE {
                write!(out, "  ")?;
                write_char(out, ch)?;
                writeln!(out, " => DfaState {}", target)?;
            }
        }
    }

    Ok(())
}

/// Print an NFA dump to standard output.
pub fn print_nfa(atm: &NfaAutomaton) {
    let mut text = String::new();
    if write_nfa(&mut text, atm).is_ok() {
        print!("{}", text);
    }
}

/// Print a DFA dump to standard output.
pub fn print_dfa(atm: &DfaAutomaton) {
    let mut text = String::new();
    if write_dfa(&mut text, atm).is_ok() {
        print!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::automaton::{compile_to_nfa, eliminate_epsilon, generate_dfa};
    use crate::regex::RegexFactory;

    #[test]
    fn test_write_nfa_lists_every_state_once() {
        let mut f = RegexFactory::new();
        let a = f.char_of(b'a');
        let rep = f.plus(a);
        let regex = f.generate(rep);
        let atm = compile_to_nfa(&regex);

        let mut text = String::new();
        write_nfa(&mut text, &atm).unwrap();

        let headers = text
            .lines()
            .filter(|l| l.starts_with("NfaState") && l.ends_with(':'))
            .count();
        assert_eq!(headers, atm.arena().state_count());
        assert!(text.contains("Entity(a)"));
        assert!(text.contains("Epsilon(High)"));
    }

    #[test]
    fn test_write_nfa_epsilon_free_dump() {
        let mut f = RegexFactory::new();
        let root = f.literal("ab");
        let regex = f.generate(root);
        let atm = eliminate_epsilon(&compile_to_nfa(&regex));

        let mut text = String::new();
        write_nfa(&mut text, &atm).unwrap();

        assert!(!text.contains("Epsilon"));
        assert!(text.contains("Finish"));
        assert_eq!(
            text,
            "NfaState 0:\n\
             \x20 Entity(a)  => NfaState 1\n\
             NfaState 1:\n\
             \x20 Entity(b)  => NfaState 2\n\
             NfaState 2:\n\
             \x20 Finish  => NfaState 3\n\
             NfaState 3(final):\n"
        );
    }

    #[test]
    fn test_write_dfa_shows_transitions_and_finals() {
        let mut f = RegexFactory::new();
        let root = f.literal("ab");
        let regex = f.generate(root);
        let dfa = generate_dfa(&compile_to_nfa(&regex));

        let mut text = String::new();
        write_dfa(&mut text, &dfa).unwrap();

        assert!(text.contains("DfaState 0:"));
        assert!(text.contains("a => DfaState 1"));
        assert!(text.contains("b => DfaState 2"));
        assert!(text.contains("DfaState 2(final):"));
    }
}
