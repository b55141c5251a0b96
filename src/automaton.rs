use std::fmt::Display;

use itertools::Itertools;

use crate::{
    math::{Map, OrderedSet},
    symbol::{is_epsilon, Symbol, EPSILON},
    Show,
};

mod builder;
pub use builder::{build_automaton, AutomatonBuilder};

mod stats;
pub use stats::Stats;

mod run;
pub use run::accepts;

/// Identifier of a state.
pub type StateName = String;

/// The transition table of an automaton: for each state and symbol the set of successors.
/// Epsilon transitions are stored under the key [`EPSILON`]. Empty inner maps and empty
/// successor sets are never stored.
pub type Transitions = Map<StateName, Map<Symbol, OrderedSet<StateName>>>;

/// A finite automaton, which may be nondeterministic and have epsilon transitions.
///
/// Instances are created through [`Automaton::builder`] or produced by one of the
/// transformations, [`Automaton::to_dfa`] and `Automaton::minimize`. Whether the automaton
/// is deterministic is derived from its transitions, see [`Automaton::is_dfa`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    name: String,
    states: OrderedSet<StateName>,
    alphabet: OrderedSet<Symbol>,
    start_state: StateName,
    accept_states: OrderedSet<StateName>,
    transitions: Transitions,
    is_dfa: bool,
    state_composition: Map<StateName, OrderedSet<StateName>>,
}

impl Automaton {
    /// Returns a builder for an automaton, this should be the main method for the construction
    /// of automata.
    ///
    /// # Example
    ///
    /// We want an automaton with states `q0` and `q1` over the alphabet `{a}`, which moves from
    /// `q0` to `q1` on `a` and stays in `q1` on `a`. The state `q0` is the start state and `q1`
    /// is accepting. This can be done as follows
    /// ```
    /// use nfa_dfa::prelude::*;
    ///
    /// let automaton = Automaton::builder()
    ///     .start("q0")
    ///     .with_accepting(["q1"])
    ///     .with_transitions([("q0", "a", "q1"), ("q1", "a", "q1")])
    ///     .build()
    ///     .unwrap();
    /// assert!(automaton.is_dfa());
    /// assert_eq!(automaton.states().len(), 2);
    /// ```
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::default()
    }

    /// Assembles an automaton from parts that are already consistent. The deterministic flag
    /// is computed from the transitions.
    pub(crate) fn from_parts(
        name: String,
        states: OrderedSet<StateName>,
        alphabet: OrderedSet<Symbol>,
        start_state: StateName,
        accept_states: OrderedSet<StateName>,
        transitions: Transitions,
        state_composition: Map<StateName, OrderedSet<StateName>>,
    ) -> Self {
        let is_dfa = is_deterministic(&transitions);
        Self {
            name,
            states,
            alphabet,
            start_state,
            accept_states,
            transitions,
            is_dfa,
            state_composition,
        }
    }

    /// The name of the automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the automaton.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// All states, in ascending order.
    pub fn states(&self) -> &OrderedSet<StateName> {
        &self.states
    }

    /// The input symbols, in ascending order. Never contains the epsilon marker.
    pub fn alphabet(&self) -> &OrderedSet<Symbol> {
        &self.alphabet
    }

    /// The unique start state.
    pub fn start_state(&self) -> &StateName {
        &self.start_state
    }

    /// The accepting states.
    pub fn accept_states(&self) -> &OrderedSet<StateName> {
        &self.accept_states
    }

    /// Returns true if `state` is accepting.
    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept_states.contains(state)
    }

    /// The full transition table.
    pub fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Returns the successors of `state` on `symbol`, if there are any. The symbol is taken
    /// literally, use [`EPSILON`] to look up epsilon transitions.
    pub fn successors(&self, state: &str, symbol: &str) -> Option<&OrderedSet<StateName>> {
        self.transitions.get(state)?.get(symbol)
    }

    /// Returns the successor of `state` on `symbol` in a deterministic automaton. For a
    /// nondeterministic automaton this is the smallest successor.
    pub fn successor(&self, state: &str, symbol: &str) -> Option<&StateName> {
        self.successors(state, symbol)?.first()
    }

    /// True iff no transition is labelled with epsilon and every defined pair of state and
    /// symbol has exactly one successor.
    pub fn is_dfa(&self) -> bool {
        self.is_dfa
    }

    /// Maps derived states to the states of the original automaton they stand for. This is
    /// filled by [`Automaton::to_dfa`] and merged by minimization, it is empty for automata
    /// built directly.
    pub fn state_composition(&self) -> &Map<StateName, OrderedSet<StateName>> {
        &self.state_composition
    }

    /// Returns the original states that `state` was composed of, if that is known.
    pub fn composition_of(&self, state: &str) -> Option<&OrderedSet<StateName>> {
        self.state_composition.get(state)
    }

    /// Returns a human readable name for `state` that also lists the states it was composed
    /// of, for example `S1<q0,q2>`. States without recorded composition keep their name.
    pub fn readable_state_name(&self, state: &str) -> String {
        match self.composition_of(state) {
            Some(composition) if !composition.is_empty() => {
                format!("{state}<{}>", composition.iter().join(","))
            }
            _ => state.to_string(),
        }
    }

    /// Computes a summary of the size of the automaton.
    pub fn stats(&self) -> Stats {
        let (total_transitions, epsilon_transitions) = self
            .transitions
            .values()
            .flat_map(|by_symbol| by_symbol.iter())
            .fold((0, 0), |(total, eps), (symbol, targets)| {
                let eps = if is_epsilon(symbol) {
                    eps + targets.len()
                } else {
                    eps
                };
                (total + targets.len(), eps)
            });
        Stats {
            states: self.states.len(),
            alphabet_size: self.alphabet.len(),
            accept_states: self.accept_states.len(),
            total_transitions,
            epsilon_transitions,
            is_dfa: self.is_dfa,
        }
    }

    /// Returns true if some transition is labelled with epsilon.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions
            .values()
            .any(|by_symbol| by_symbol.keys().any(|symbol| is_epsilon(symbol)))
    }

    /// Renders the transition table. There is one row per state and one column per symbol,
    /// plus a column for epsilon if needed. The start state is marked with `→` and accepting
    /// states are marked with `*`.
    pub fn transition_table(&self) -> String {
        let with_epsilon = self.has_epsilon_transitions();
        let columns = self
            .alphabet
            .iter()
            .map(|symbol| symbol.as_str())
            .chain(with_epsilon.then_some(EPSILON))
            .collect_vec();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(columns.iter().map(|s| s.to_string())),
        );
        for state in &self.states {
            let mut row = vec![format!(
                "{}{}{}",
                if *state == self.start_state { "→ " } else { "" },
                state,
                if self.is_accepting(state) { "*" } else { "" }
            )];
            for symbol in &columns {
                row.push(match self.successors(state, symbol) {
                    Some(targets) if targets.len() == 1 => targets.iter().join(""),
                    Some(targets) => targets.show(),
                    None => "-".to_string(),
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (
        &mut OrderedSet<StateName>,
        &mut OrderedSet<StateName>,
        &mut Transitions,
        &mut Map<StateName, OrderedSet<StateName>>,
    ) {
        (
            &mut self.states,
            &mut self.accept_states,
            &mut self.transitions,
            &mut self.state_composition,
        )
    }

    pub(crate) fn refresh_is_dfa(&mut self) {
        self.is_dfa = is_deterministic(&self.transitions);
    }
}

/// Checks the deterministic transition constraint: no epsilon labels and exactly one
/// successor for every defined pair of state and symbol.
pub(crate) fn is_deterministic(transitions: &Transitions) -> bool {
    transitions.values().all(|by_symbol| {
        by_symbol
            .iter()
            .all(|(symbol, targets)| !is_epsilon(symbol) && targets.len() == 1)
    })
}

impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} ({})",
            self.name,
            if self.is_dfa { "DFA" } else { "NFA" }
        )?;
        write!(f, "{}", self.transition_table())
    }
}
