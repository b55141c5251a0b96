use tracing::{trace, warn};

use crate::{
    error::{Error, Result},
    math::{Map, OrderedSet},
    symbol::{is_epsilon, Symbol, EPSILON},
};

use super::{Automaton, StateName, Transitions};

/// Name given to automata that are built without specifying one.
pub const DEFAULT_NAME: &str = "automaton";

/// Helper struct for the construction of automata. It collects states, symbols, accepting
/// states and transitions, and assembles them into an [`Automaton`] on [`AutomatonBuilder::build`].
///
/// Every state that is mentioned as start state, accepting state or on a transition becomes a
/// state of the automaton, so it is not necessary to list the states explicitly. Likewise, all
/// symbols that appear on transitions are added to the alphabet. Transitions that are labelled
/// with one of the epsilon spellings are stored under [`EPSILON`].
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    name: Option<String>,
    states: OrderedSet<StateName>,
    symbols: OrderedSet<Symbol>,
    start: Option<StateName>,
    accepting: OrderedSet<StateName>,
    transitions: Vec<(StateName, Symbol, StateName)>,
}

impl AutomatonBuilder {
    /// Sets the name of the automaton, it defaults to [`DEFAULT_NAME`].
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds states, which is only necessary for states that are not mentioned anywhere else.
    pub fn with_states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateName>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// By default, the only alphabet symbols in the automaton are the ones that appear on at
    /// least one transition. This method can be used to force additional alphabet symbols to
    /// appear. Epsilon spellings are ignored.
    pub fn with_alphabet_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        for symbol in symbols.into_iter().map(Into::into) {
            if is_epsilon(&symbol) {
                warn!("ignoring epsilon spelling {symbol:?} given as alphabet symbol");
                continue;
            }
            self.symbols.insert(symbol);
        }
        self
    }

    /// Sets the start state.
    pub fn start<S: Into<StateName>>(mut self, state: S) -> Self {
        self.start = Some(state.into());
        self
    }

    /// Marks the given states as accepting.
    pub fn with_accepting<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateName>,
    {
        self.accepting.extend(states.into_iter().map(Into::into));
        self
    }

    /// Adds transitions given as `(source, symbol, target)` triples.
    pub fn with_transitions<I, X, Y, Z>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (X, Y, Z)>,
        X: Into<StateName>,
        Y: Into<Symbol>,
        Z: Into<StateName>,
    {
        self.transitions.extend(
            transitions
                .into_iter()
                .map(|(p, a, q)| (p.into(), a.into(), q.into())),
        );
        self
    }

    /// Adds all transitions of a nested table mapping states to symbols to sets of successors.
    pub fn with_transition_table<I, X, J, Y, K, Z>(mut self, table: I) -> Self
    where
        I: IntoIterator<Item = (X, J)>,
        X: Into<StateName>,
        J: IntoIterator<Item = (Y, K)>,
        Y: Into<Symbol>,
        K: IntoIterator<Item = Z>,
        Z: Into<StateName>,
    {
        for (source, by_symbol) in table {
            let source: StateName = source.into();
            // a state with an empty row is still a state
            self.states.insert(source.clone());
            for (symbol, targets) in by_symbol {
                let symbol: Symbol = symbol.into();
                for target in targets {
                    self.transitions
                        .push((source.clone(), symbol.clone(), target.into()));
                }
            }
        }
        self
    }

    /// Assembles the automaton. Fails if no start state was given.
    pub fn build(self) -> Result<Automaton> {
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());
        let Some(start) = self.start else {
            return Err(Error::MissingStartState { name });
        };

        let mut states = self.states;
        let mut alphabet = self.symbols;
        states.insert(start.clone());
        states.extend(self.accepting.iter().cloned());

        let mut transitions = Transitions::default();
        for (source, symbol, target) in self.transitions {
            let symbol = if is_epsilon(&symbol) {
                EPSILON.to_string()
            } else {
                alphabet.insert(symbol.clone());
                symbol
            };
            states.insert(source.clone());
            states.insert(target.clone());
            transitions
                .entry(source)
                .or_default()
                .entry(symbol)
                .or_default()
                .insert(target);
        }

        trace!(
            "built automaton {name} with {} states over {} symbols",
            states.len(),
            alphabet.len()
        );

        Ok(Automaton::from_parts(
            name,
            states,
            alphabet,
            start,
            self.accepting,
            transitions,
            Map::default(),
        ))
    }
}

/// Builds an automaton from its constituents, `transitions` are `(source, symbol, target)`
/// triples. States that are only mentioned by `start`, `accepts` or `transitions` are added
/// to `states`.
pub fn build_automaton<S, A, F, T, X, Y, Z>(
    states: S,
    alphabet: A,
    start: impl Into<StateName>,
    accepts: F,
    transitions: T,
    name: impl Into<String>,
) -> Result<Automaton>
where
    S: IntoIterator,
    S::Item: Into<StateName>,
    A: IntoIterator,
    A::Item: Into<Symbol>,
    F: IntoIterator,
    F::Item: Into<StateName>,
    T: IntoIterator<Item = (X, Y, Z)>,
    X: Into<StateName>,
    Y: Into<Symbol>,
    Z: Into<StateName>,
{
    Automaton::builder()
        .name(name)
        .with_states(states)
        .with_alphabet_symbols(alphabet)
        .start(start)
        .with_accepting(accepts)
        .with_transitions(transitions)
        .build()
}
