use std::collections::VecDeque;

use tracing::debug;

use crate::{
    automaton::{Automaton, StateName},
    math::Set,
    symbol::Symbol,
};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and the state itself.
pub type MinimalRepresentative<'a> = (Vec<&'a Symbol>, &'a StateName);

/// Iterator over the minimal representatives of the states that are reachable from a given
/// origin. A minimal representative for a state `q` is the length-lexicographically minimal
/// word with which `q` can be reached. Only transitions on alphabet symbols are followed,
/// epsilon transitions are ignored.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a> {
    automaton: &'a Automaton,
    seen: Set<&'a StateName>,
    queue: VecDeque<MinimalRepresentative<'a>>,
}

impl<'a> MinimalRepresentatives<'a> {
    /// Starts the breadth-first search at `origin`.
    pub fn new(automaton: &'a Automaton, origin: &'a StateName) -> Self {
        let seen = Set::from_iter([origin]);
        let queue = [(vec![], origin)].into_iter().collect();
        Self {
            automaton,
            seen,
            queue,
        }
    }
}

impl<'a> Iterator for MinimalRepresentatives<'a> {
    type Item = MinimalRepresentative<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        for symbol in self.automaton.alphabet() {
            let Some(targets) = self.automaton.successors(q, symbol) else {
                continue;
            };
            for p in targets {
                if self.seen.insert(p) {
                    let mut new_access = access.clone();
                    new_access.push(symbol);
                    self.queue.push_back((new_access, p));
                }
            }
        }
        Some((access, q))
    }
}

/// Breadth-first iterator over the states that are reachable from a given origin, following
/// transitions on alphabet symbols only. Unlike [`MinimalRepresentatives`] it keeps no
/// access words.
#[derive(Debug, Clone)]
pub struct ReachableStates<'a> {
    automaton: &'a Automaton,
    seen: Set<&'a StateName>,
    queue: VecDeque<&'a StateName>,
}

impl<'a> ReachableStates<'a> {
    /// Starts the search at `origin`.
    pub fn new(automaton: &'a Automaton, origin: &'a StateName) -> Self {
        Self {
            automaton,
            seen: Set::from_iter([origin]),
            queue: VecDeque::from([origin]),
        }
    }
}

impl<'a> Iterator for ReachableStates<'a> {
    type Item = &'a StateName;

    fn next(&mut self) -> Option<Self::Item> {
        let q = self.queue.pop_front()?;
        for symbol in self.automaton.alphabet() {
            for p in self.automaton.successors(q, symbol).into_iter().flatten() {
                if self.seen.insert(p) {
                    self.queue.push_back(p);
                }
            }
        }
        Some(q)
    }
}

impl Automaton {
    /// Returns the minimal representatives of all states that are reachable from the start state.
    pub fn minimal_representatives(&self) -> MinimalRepresentatives<'_> {
        MinimalRepresentatives::new(self, self.start_state())
    }

    /// Returns the states that are reachable from the start state in breadth-first order,
    /// starting with the start state itself.
    pub fn reachable_states(&self) -> ReachableStates<'_> {
        ReachableStates::new(self, self.start_state())
    }

    /// Removes all states that are not reachable from the start state, see [`prune_unreachable`].
    pub fn prune_unreachable(&mut self) -> usize {
        prune_unreachable(self)
    }
}

/// Restricts `automaton` to the states that are reachable from its start state, removing
/// the other states together with their transitions and composition. Transitions leading
/// to a removed state are dropped as well. Returns the number of removed states.
pub fn prune_unreachable(automaton: &mut Automaton) -> usize {
    let reachable: Set<StateName> = automaton.reachable_states().cloned().collect();
    let before = automaton.states().len();

    let (states, accept_states, transitions, composition) = automaton.parts_mut();
    states.retain(|q| reachable.contains(q));
    accept_states.retain(|q| reachable.contains(q));
    composition.retain(|q, _| reachable.contains(q));
    transitions.retain(|q, _| reachable.contains(q));
    for by_symbol in transitions.values_mut() {
        for targets in by_symbol.values_mut() {
            targets.retain(|p| reachable.contains(p));
        }
        by_symbol.retain(|_, targets| !targets.is_empty());
    }
    transitions.retain(|_, by_symbol| !by_symbol.is_empty());
    automaton.refresh_is_dfa();

    let removed = before - automaton.states().len();
    if removed > 0 {
        debug!(
            "pruned {removed} unreachable states from {}, {} remain",
            automaton.name(),
            automaton.states().len()
        );
    }
    removed
}
