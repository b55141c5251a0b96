#![cfg(feature = "minimize")]

use itertools::Itertools;
use nfa_dfa::prelude::*;

const EMPTY_WORD: [&str; 0] = [];

#[test_log::test]
fn self_loop_on_accepting_state() {
    let nfa = build_automaton(
        ["q0", "q1"],
        ["a"],
        "q0",
        ["q1"],
        [("q0", "a", "q1"), ("q1", "a", "q1")],
        "loop",
    )
    .unwrap();
    let dfa = to_dfa(&nfa);
    assert_eq!(dfa.states().len(), 2);
    assert!(dfa.is_dfa());
    assert!(accepts(&dfa, ["a"]));
    assert!(!accepts(&dfa, EMPTY_WORD));
    assert!(accepts(&dfa, ["a", "a", "a"]));
}

#[test_log::test]
fn epsilon_transition_only() {
    let nfa = build_automaton(
        ["q0", "q1"],
        Vec::<String>::new(),
        "q0",
        ["q1"],
        [("q0", "ε", "q1")],
        "eps",
    )
    .unwrap();
    let dfa = to_dfa(&nfa);
    let start = dfa.start_state();
    assert_eq!(
        dfa.composition_of(start).unwrap().iter().collect_vec(),
        vec!["q0", "q1"]
    );
    assert!(dfa.is_accepting(start));
    assert!(dfa.alphabet().is_empty());
    let stats = dfa.stats();
    assert_eq!(stats.total_transitions, 0);
    assert_eq!(stats.alphabet_size, 0);
}

#[test_log::test]
fn minimal_two_cycle_is_not_merged() {
    let dfa = build_automaton(
        ["q0", "q1"],
        ["a"],
        "q0",
        ["q1"],
        [("q0", "a", "q1"), ("q1", "a", "q0")],
        "cycle",
    )
    .unwrap();
    let min = minimize(&dfa).unwrap();
    assert_eq!(min.states().len(), 2);
    assert!(accepts(&min, ["a"]));
    assert!(!accepts(&min, ["a", "a"]));
}

#[test_log::test]
fn indistinguishable_states_are_merged() {
    let dfa = build_automaton(
        ["q0", "q1", "q2"],
        ["a", "b"],
        "q0",
        ["q1", "q2"],
        [("q0", "a", "q1"), ("q0", "b", "q2")],
        "leaves",
    )
    .unwrap();
    let min = minimize(&dfa).unwrap();
    assert_eq!(min.states().len(), 2);
    let merged = min.successor(min.start_state(), "a").unwrap();
    assert_eq!(min.successor(min.start_state(), "b"), Some(merged));
    assert_eq!(
        min.composition_of(merged).unwrap().iter().collect_vec(),
        vec!["q1", "q2"]
    );
}

#[test]
fn unknown_symbol_is_rejected() {
    let nfa = build_automaton(
        ["q0", "q1"],
        ["a"],
        "q0",
        ["q1"],
        [("q0", "a", "q1"), ("q0", "a", "q0"), ("q0", "eps", "q1")],
        "guess",
    )
    .unwrap();
    assert!(!nfa.is_dfa());
    // the nondeterministic run simply finds no successors
    assert!(!accepts(&nfa, ["z"]));
    assert!(nfa.reached_states(["z"]).is_empty());

    let dfa = to_dfa(&nfa);
    assert!(!accepts(&dfa, ["z"]));
    assert!(dfa.reached_state(["z"]).is_none());
    assert!(accepts(&dfa, ["a"]));
}

#[test_log::test]
fn pipeline_preserves_language() {
    // words over {a, b} whose third symbol from the end is `a`
    let nfa = Automaton::builder()
        .name("third-from-end")
        .start("0")
        .with_accepting(["3"])
        .with_transitions([
            ("0", "a", "0"),
            ("0", "b", "0"),
            ("0", "a", "1"),
            ("1", "a", "2"),
            ("1", "b", "2"),
            ("2", "a", "3"),
            ("2", "b", "3"),
        ])
        .build()
        .unwrap();
    let dfa = to_dfa(&nfa);
    let min = minimize(&dfa).unwrap();
    assert_eq!(dfa.states().len(), 8);
    assert_eq!(min.states().len(), 8);
    tracing::debug!("{}\n{}", min, min.stats());

    for len in 0..=6 {
        for word in std::iter::repeat(["a", "b"])
            .take(len)
            .multi_cartesian_product()
        {
            let expected = len >= 3 && word[len - 3] == "a";
            assert_eq!(accepts(&nfa, &word), expected, "{word:?}");
            assert_eq!(accepts(&dfa, &word), expected, "{word:?}");
            assert_eq!(accepts(&min, &word), expected, "{word:?}");
        }
    }
}

#[test]
fn every_produced_state_is_reachable() {
    let nfa = Automaton::builder()
        .start("s")
        .with_accepting(["t"])
        .with_transitions([
            ("s", "a", "t"),
            ("s", "epsilon", "u"),
            ("u", "b", "t"),
            ("v", "a", "s"),
            ("w", "", "v"),
        ])
        .build()
        .unwrap();
    let dfa = to_dfa(&nfa);
    assert_eq!(dfa.reachable_states().count(), dfa.states().len());
    let min = minimize(&dfa).unwrap();
    assert_eq!(min.reachable_states().count(), min.states().len());
    assert!(min
        .state_composition()
        .values()
        .flatten()
        .all(|q| ["s", "t", "u"].contains(&q.as_str())));
}

#[test]
fn accepting_composition_contains_an_accepting_state() {
    let nfa = Automaton::builder()
        .start("0")
        .with_accepting(["2"])
        .with_transitions([
            ("0", "a", "1"),
            ("0", "a", "2"),
            ("1", "b", "2"),
            ("2", "eps", "0"),
            ("1", "b", "1"),
        ])
        .build()
        .unwrap();
    for automaton in [to_dfa(&nfa), minimize(&to_dfa(&nfa)).unwrap()] {
        for state in automaton.states() {
            let composition = automaton.composition_of(state).unwrap();
            assert_eq!(
                automaton.is_accepting(state),
                composition.iter().any(|q| nfa.is_accepting(q)),
                "{}",
                automaton.readable_state_name(state)
            );
        }
    }
}

#[test]
fn missing_start_state_is_an_error() {
    let result = Automaton::builder()
        .name("headless")
        .with_transitions([("a", "x", "b")])
        .build();
    assert_eq!(
        result,
        Err(Error::MissingStartState {
            name: "headless".to_string()
        })
    );
    assert_eq!(
        result.unwrap_err().to_string(),
        "automaton `headless` has no start state"
    );
}
