use std::{collections::VecDeque, iter};

use tracing::{debug, trace};

use crate::{
    automaton::{Automaton, StateName, Transitions},
    closure::{epsilon_closure, move_on_symbol},
    math::{Bijection, Map, OrderedSet, SubsetKey},
    naming::Naming,
    reachable::prune_unreachable,
    symbol::Symbol,
    Show,
};

/// Converts `nfa` into an equivalent deterministic automaton through the subset construction,
/// using [`Naming::DETERMINIZED`]. See [`to_dfa_with`].
pub fn to_dfa(nfa: &Automaton) -> Automaton {
    to_dfa_with(nfa, &Naming::DETERMINIZED)
}

/// Converts `nfa` into an equivalent deterministic automaton through the subset construction.
///
/// Each state of the result stands for the epsilon closed set of states of `nfa` that the
/// input could be in, its composition is recorded in [`Automaton::state_composition`]. States
/// are named in the order in which they are discovered by a breadth-first search that visits
/// the symbols in ascending order, so the names are reproducible. Sets that are only reachable
/// through the empty set are never created, in that case the state simply has no transition.
/// If `nfa` is already deterministic, a renamed copy is returned.
pub fn to_dfa_with(nfa: &Automaton, naming: &Naming<'_>) -> Automaton {
    let name = naming.automaton(nfa.name());
    if nfa.is_dfa() {
        debug!("{} is already deterministic, returning a copy", nfa.name());
        let mut dfa = nfa.clone();
        dfa.set_name(name);
        return dfa;
    }

    let mut dfa = SubsetConstruction::new(nfa, naming).run(name);
    prune_unreachable(&mut dfa);
    debug!(
        "determinized {} with {} states into {} with {} states",
        nfa.name(),
        nfa.states().len(),
        dfa.name(),
        dfa.states().len()
    );
    dfa
}

/// Bookkeeping for one run of the subset construction.
struct SubsetConstruction<'a> {
    nfa: &'a Automaton,
    naming: &'a Naming<'a>,
    /// Discovered subsets and the names of the states representing them.
    names: Bijection<SubsetKey, StateName>,
    queue: VecDeque<(SubsetKey, StateName)>,
    accepting: OrderedSet<StateName>,
    transitions: Transitions,
}

impl<'a> SubsetConstruction<'a> {
    fn new(nfa: &'a Automaton, naming: &'a Naming<'a>) -> Self {
        Self {
            nfa,
            naming,
            names: Bijection::new(),
            queue: VecDeque::new(),
            accepting: OrderedSet::new(),
            transitions: Transitions::default(),
        }
    }

    /// Returns the name of the state representing `subset`, creating and enqueueing it if
    /// the subset is seen for the first time.
    fn intern(&mut self, subset: SubsetKey) -> StateName {
        if let Some(name) = self.names.get_by_left(&subset) {
            return name.clone();
        }

        let name = self.naming.state(self.names.len());
        trace!("discovered {} as {name}", subset.show());
        if subset.iter().any(|q| self.nfa.is_accepting(q)) {
            self.accepting.insert(name.clone());
        }
        self.names.insert(subset.clone(), name.clone());
        self.queue.push_back((subset, name.clone()));
        name
    }

    fn add_transition(&mut self, source: &StateName, symbol: &Symbol, target: StateName) {
        let targets = self
            .transitions
            .entry(source.clone())
            .or_default()
            .entry(symbol.clone())
            .or_default();
        targets.insert(target);
        assert_eq!(
            targets.len(),
            1,
            "subset construction produced several successors of {source} on {symbol}"
        );
    }

    fn run(mut self, name: String) -> Automaton {
        let nfa = self.nfa;
        let transitions = nfa.transitions();
        let start = epsilon_closure(iter::once(nfa.start_state()), transitions);
        let start_name = self.intern(SubsetKey::from(start));

        while let Some((subset, source)) = self.queue.pop_front() {
            for symbol in nfa.alphabet() {
                let moved = move_on_symbol(&subset, symbol, transitions);
                let target = epsilon_closure(&moved, transitions);
                if target.is_empty() {
                    continue;
                }
                let target = self.intern(SubsetKey::from(target));
                self.add_transition(&source, symbol, target);
            }
        }

        let mut states = OrderedSet::new();
        let mut composition = Map::default();
        for (subset, state) in self.names {
            composition.insert(state.clone(), subset.to_set());
            states.insert(state);
        }

        Automaton::from_parts(
            name,
            states,
            self.nfa.alphabet().clone(),
            start_name,
            self.accepting,
            self.transitions,
            composition,
        )
    }
}

impl Automaton {
    /// Converts `self` into an equivalent deterministic automaton, see [`to_dfa_with`].
    pub fn to_dfa(&self) -> Automaton {
        to_dfa(self)
    }

    /// Converts `self` into an equivalent deterministic automaton named according to `naming`,
    /// see [`to_dfa_with`].
    pub fn to_dfa_with(&self, naming: &Naming<'_>) -> Automaton {
        to_dfa_with(self, naming)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    const NO_SYMBOLS: [&str; 0] = [];

    fn composition(automaton: &Automaton, state: &str) -> Vec<String> {
        automaton
            .composition_of(state)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[test_log::test]
    fn loop_is_kept() {
        let nfa = Automaton::builder()
            .name("loop")
            .start("q0")
            .with_accepting(["q1"])
            .with_transitions([("q0", "a", "q1"), ("q1", "a", "q1")])
            .build()
            .unwrap();
        let dfa = nfa.to_dfa();
        assert_eq!(dfa.states().len(), 2);
        assert_eq!(dfa.name(), "loop__DFA");
        assert!(dfa.accepts(["a"]));
        assert!(!dfa.accepts(NO_SYMBOLS));
        assert_eq!(dfa.successor("q1", "a").map(String::as_str), Some("q1"));
    }

    #[test_log::test]
    fn epsilon_only() {
        let nfa = Automaton::builder()
            .start("q0")
            .with_accepting(["q1"])
            .with_transitions([("q0", "ε", "q1")])
            .build()
            .unwrap();
        let dfa = nfa.to_dfa();
        assert_eq!(dfa.states().len(), 1);
        assert_eq!(dfa.start_state(), "S0");
        assert_eq!(composition(&dfa, "S0"), vec!["q0", "q1"]);
        assert!(dfa.is_accepting("S0"));
        assert!(dfa.alphabet().is_empty());
        assert_eq!(dfa.stats().total_transitions, 0);
        assert!(dfa.is_dfa());
        assert!(dfa.accepts(NO_SYMBOLS));
    }

    fn ends_with_ab() -> Automaton {
        Automaton::builder()
            .name("ends-with-ab")
            .start("q0")
            .with_accepting(["q2"])
            .with_transitions([
                ("q0", "a", "q0"),
                ("q0", "b", "q0"),
                ("q0", "a", "q1"),
                ("q1", "b", "q2"),
            ])
            .build()
            .unwrap()
    }

    #[test_log::test]
    fn names_follow_discovery_order() {
        let nfa = ends_with_ab();
        let dfa = nfa.to_dfa();

        assert_eq!(dfa.states().iter().collect_vec(), vec!["S0", "S1", "S2"]);
        assert_eq!(composition(&dfa, "S0"), vec!["q0"]);
        assert_eq!(composition(&dfa, "S1"), vec!["q0", "q1"]);
        assert_eq!(composition(&dfa, "S2"), vec!["q0", "q2"]);
        assert_eq!(dfa.accept_states().iter().collect_vec(), vec!["S2"]);

        let expected = [
            ("S0", "a", "S1"),
            ("S0", "b", "S0"),
            ("S1", "a", "S1"),
            ("S1", "b", "S2"),
            ("S2", "a", "S1"),
            ("S2", "b", "S0"),
        ];
        for (p, a, q) in expected {
            assert_eq!(dfa.successor(p, a).map(String::as_str), Some(q));
        }

        // running the construction again reproduces the same automaton
        assert_eq!(nfa.to_dfa(), dfa);
    }

    #[test]
    fn result_is_deterministic() {
        let nfa = Automaton::builder()
            .start("0")
            .with_accepting(["3"])
            .with_transitions([
                ("0", "a", "1"),
                ("0", "a", "2"),
                ("0", "eps", "2"),
                ("1", "b", "3"),
                ("2", "b", "3"),
                ("2", "a", "0"),
                ("3", "epsilon", "0"),
            ])
            .build()
            .unwrap();
        let dfa = nfa.to_dfa();
        assert!(dfa.is_dfa());
        assert!(!dfa.has_epsilon_transitions());
        for by_symbol in dfa.transitions().values() {
            for (symbol, targets) in by_symbol {
                assert!(!is_epsilon(symbol));
                assert_eq!(targets.len(), 1);
            }
        }
        // every state is reachable
        assert_eq!(dfa.reachable_states().count(), dfa.states().len());

        for word in ["", "b", "ab", "abab", "ba", "aab", "bb"] {
            assert_eq!(nfa.accepts_str(word), dfa.accepts_str(word), "{word}");
        }
    }

    #[test]
    fn accepting_iff_composed_of_accepting() {
        let nfa = ends_with_ab();
        let dfa = nfa.to_dfa();
        for state in dfa.states() {
            let composed_of_accepting = dfa
                .composition_of(state)
                .unwrap()
                .iter()
                .any(|q| nfa.is_accepting(q));
            assert_eq!(dfa.is_accepting(state), composed_of_accepting);
        }
    }

    #[test]
    fn deterministic_input_is_copied() {
        let dfa = Automaton::builder()
            .name("det")
            .start("p")
            .with_accepting(["q"])
            .with_transitions([("p", "a", "q"), ("r", "a", "p")])
            .build()
            .unwrap();
        let copy = dfa.to_dfa();
        assert_eq!(copy.name(), "det__DFA");
        // no recomputation happens, not even pruning
        assert_eq!(copy.states(), dfa.states());
        assert!(copy.state_composition().is_empty());

        let custom = dfa.to_dfa_with(&Naming::new("D", "_det"));
        assert_eq!(custom.name(), "det_det");
    }

    #[test]
    fn custom_naming() {
        let dfa = ends_with_ab().to_dfa_with(&Naming::new("T", ""));
        assert_eq!(dfa.name(), "ends-with-ab");
        assert_eq!(dfa.start_state(), "T0");
        assert_eq!(dfa.readable_state_name("T2"), "T2<q0,q2>");
    }
}
