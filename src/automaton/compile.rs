//! Lowering a regular expression tree into an epsilon-NFA.
//!
//! Each node kind contributes one subgraph construction rule. A rule gets a
//! target branch `(begin, end)` and wires its states in between, joining the
//! endpoints with Normal-priority epsilon edges unless the rule says
//! otherwise. Greedy and reluctant closures differ only in the priorities
//! assigned to the edges that restart or leave the repetition body.

use crate::regex::{ClosureStrategy, EpsilonPriority, ExprId, ManagedRegex, RegexExpr, Repetition};

use super::nfa::{NfaAutomaton, NfaBranch, NfaBuilder};

/// Compile a regex into its epsilon-NFA.
pub fn compile_to_nfa(regex: &ManagedRegex) -> NfaAutomaton {
    let mut builder = NfaBuilder::new();
    let branch = builder.new_branch(true);

    connect(&mut builder, regex, regex.root(), branch);

    builder.build(branch.begin)
}

/// Build the subgraph of `id` between the endpoints of `which`.
fn connect(builder: &mut NfaBuilder, regex: &ManagedRegex, id: ExprId, which: NfaBranch) {
    match regex.expr(id) {
        RegexExpr::Entity(rg) => {
            builder.new_entity_transition(which, *rg);
        }

        RegexExpr::Concat(seq) => {
            // which.begin - s0 - s1 - ... - sn - which.end
            let begin = builder.new_state(false);
            let mut end = begin;
            for &child in seq {
                let new_end = builder.new_state(false);
                connect(
                    builder,
                    regex,
                    child,
                    NfaBranch {
                        begin: end,
                        end: new_end,
                    },
                );
                end = new_end;
            }

            builder.new_epsilon_transition(
                NfaBranch {
                    begin: which.begin,
                    end: begin,
                },
                EpsilonPriority::Normal,
            );
            builder.new_epsilon_transition(
                NfaBranch {
                    begin: end,
                    end: which.end,
                },
                EpsilonPriority::Normal,
            );
        }

        RegexExpr::Alter(any) => {
            // One parallel branch per alternative, tried in source order.
            for &child in any {
                let alternative = builder.new_branch(false);
                connect(builder, regex, child, alternative);

                builder.new_epsilon_transition(
                    NfaBranch {
                        begin: which.begin,
                        end: alternative.begin,
                    },
                    EpsilonPriority::Normal,
                );
                builder.new_epsilon_transition(
                    NfaBranch {
                        begin: alternative.end,
                        end: which.end,
                    },
                    EpsilonPriority::Normal,
                );
            }
        }

        RegexExpr::Repeat {
            child,
            count,
            strategy,
        } => {
            connect_repeat(builder, regex, *child, *count, *strategy, which);
        }

        RegexExpr::Anchor(kind) => {
            builder.new_anchor_transition(which, *kind);
        }

        RegexExpr::Capture { id, child } => {
            let inner = builder.new_branch(false);
            connect(builder, regex, *child, inner);

            builder.new_begin_capture_transition(
                NfaBranch {
                    begin: which.begin,
                    end: inner.begin,
                },
                *id,
            );
            builder.new_end_capture_transition(NfaBranch {
                begin: inner.end,
                end: which.end,
            });
        }

        RegexExpr::Reference(id) => {
            builder.new_reference_transition(which, *id);
        }

        RegexExpr::Assertion { .. } => {
            panic!("lookaround assertions are not executable");
        }
    }
}

fn connect_repeat(
    builder: &mut NfaBuilder,
    regex: &ManagedRegex,
    child: ExprId,
    count: Repetition,
    strategy: ClosureStrategy,
    which: NfaBranch,
) {
    // Evaluate the repetition body once, then unfold it by cloning.
    let child_branch = builder.new_branch(false);
    connect(builder, regex, child, child_branch);

    let mut nodes = vec![child_branch.begin, child_branch.end];

    // An unbounded repetition needs min instances, a bounded one max; one
    // instance is already in place.
    let instance_count = if count.goes_infinite() {
        count.min()
    } else {
        count.max()
    };
    for _ in 1..instance_count {
        let new_begin = nodes[nodes.len() - 1];
        let new_end = builder.new_state(false);
        builder.clone_branch(
            NfaBranch {
                begin: new_begin,
                end: new_end,
            },
            child_branch,
        );
        nodes.push(new_end);
    }

    // A greedy closure tends to stay inside the body, a reluctant one to
    // leave it; the matcher just explores higher priorities first.
    let (staying, leaving) = match strategy {
        ClosureStrategy::Greedy => (EpsilonPriority::High, EpsilonPriority::Low),
        ClosureStrategy::Reluctant => (EpsilonPriority::Low, EpsilonPriority::High),
    };

    if count.goes_infinite() {
        let last_begin = nodes[nodes.len() - 2];
        let last_end = nodes[nodes.len() - 1];

        // When no instance is mandatory, a direct bypass replaces a whole
        // extra alternation.
        if count.min() == 0 {
            builder.new_epsilon_transition(
                NfaBranch {
                    begin: last_begin,
                    end: last_end,
                },
                leaving,
            );
        }
        builder.new_epsilon_transition(
            NfaBranch {
                begin: last_end,
                end: last_begin,
            },
            staying,
        );
    } else {
        let last = nodes[nodes.len() - 1];
        for i in count.min()..count.max() {
            builder.new_epsilon_transition(
                NfaBranch {
                    begin: nodes[i],
                    end: last,
                },
                leaving,
            );
        }
    }

    builder.new_epsilon_transition(
        NfaBranch {
            begin: which.begin,
            end: nodes[0],
        },
        EpsilonPriority::Normal,
    );
    builder.new_epsilon_transition(
        NfaBranch {
            begin: nodes[nodes.len() - 1],
            end: which.end,
        },
        leaving,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex::{AnchorKind, RegexFactory};

    #[test]
    fn test_entity_compiles_to_two_states() {
        let mut f = RegexFactory::new();
        let root = f.char_of(b'a');
        let regex = f.generate(root);

        let atm = compile_to_nfa(&regex);
        assert_eq!(atm.arena().state_count(), 2);
        assert_eq!(atm.arena().transition_count(), 1);
        assert!(!atm.has_epsilon());
        assert!(atm.dfa_compatible());
    }

    #[test]
    fn test_concat_chains_children() {
        let mut f = RegexFactory::new();
        let root = f.literal("ab");
        let regex = f.generate(root);

        let atm = compile_to_nfa(&regex);
        // branch pair + three chain states, two entity edges + two joins
        assert_eq!(atm.arena().state_count(), 5);
        assert_eq!(atm.arena().transition_count(), 4);
        assert!(atm.has_epsilon());
        assert!(atm.dfa_compatible());
    }

    #[test]
    fn test_capture_marks_incompatible() {
        let mut f = RegexFactory::new();
        let a = f.char_of(b'a');
        let root = f.capture(3, a);
        let regex = f.generate(root);

        let atm = compile_to_nfa(&regex);
        assert!(!atm.dfa_compatible());
    }

    #[test]
    fn test_anchor_marks_incompatible() {
        let mut f = RegexFactory::new();
        let root = f.anchor(AnchorKind::LineStart);
        let regex = f.generate(root);

        let atm = compile_to_nfa(&regex);
        assert!(!atm.dfa_compatible());
    }

    #[test]
    fn test_bounded_repeat_unfolds_instances() {
        let mut f = RegexFactory::new();
        let a = f.char_of(b'a');
        let root = f.repeat(a, Repetition::new(2, 4), ClosureStrategy::Greedy);
        let regex = f.generate(root);

        let atm = compile_to_nfa(&regex);
        // 2 outer + 2 body + 3 cloned ends; entity x4, leaving x2, joins x2
        assert_eq!(atm.arena().state_count(), 7);
        assert_eq!(atm.arena().transition_count(), 8);
        assert!(atm.dfa_compatible());
    }

    #[test]
    fn test_unbounded_repeat_loops_back() {
        let mut f = RegexFactory::new();
        let a = f.char_of(b'a');
        let root = f.star(a);
        let regex = f.generate(root);

        let atm = compile_to_nfa(&regex);
        // star: body + bypass + back edge + joins, no cloning
        assert_eq!(atm.arena().state_count(), 4);
        assert_eq!(atm.arena().transition_count(), 5);
    }

    #[test]
    #[should_panic]
    fn test_assertion_is_rejected() {
        let mut f = RegexFactory::new();
        let a = f.char_of(b'a');
        let root = f.assertion(crate::regex::AssertionKind::PositiveLookAhead, a);
        let regex = f.generate(root);

        compile_to_nfa(&regex);
    }
}
