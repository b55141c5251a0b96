use std::iter;

use tracing::trace;

use crate::{
    closure::{epsilon_closure, move_on_symbol},
    math::OrderedSet,
};

use super::{Automaton, StateName};

impl Automaton {
    /// Returns the state that is reached when running `word` from the start state of a
    /// deterministic automaton. The run fails, and `None` is returned, as soon as a symbol is
    /// not in the alphabet or the current state has no transition on it.
    pub fn reached_state<W, S>(&self, word: W) -> Option<&StateName>
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = &self.start_state;
        for symbol in word {
            let symbol = symbol.as_ref();
            if !self.alphabet.contains(symbol) {
                trace!("symbol {symbol:?} is not in the alphabet of {}", self.name);
                return None;
            }
            current = self.successor(current, symbol)?;
        }
        Some(current)
    }

    /// Returns the set of states that may be reached when running `word` from the start
    /// state, treating the automaton as nondeterministic. The set is epsilon closed after
    /// every step, symbols without transitions simply lead to the empty set.
    pub fn reached_states<W, S>(&self, word: W) -> OrderedSet<StateName>
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let initial = epsilon_closure(iter::once(&self.start_state), &self.transitions);
        word.into_iter().fold(initial, |current, symbol| {
            let moved = move_on_symbol(&current, symbol.as_ref(), &self.transitions);
            epsilon_closure(&moved, &self.transitions)
        })
    }

    /// Decides whether `word`, given as a sequence of symbols, is accepted.
    ///
    /// A deterministic automaton is run directly and rejects as soon as the run gets stuck,
    /// in particular on symbols outside its alphabet. Otherwise all possible runs are tracked
    /// simultaneously and the word is accepted if one of them ends in an accepting state.
    pub fn accepts<W, S>(&self, word: W) -> bool
    where
        W: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.is_dfa {
            self.reached_state(word)
                .is_some_and(|state| self.is_accepting(state))
        } else {
            self.reached_states(word)
                .iter()
                .any(|state| self.is_accepting(state))
        }
    }

    /// Same as [`Automaton::accepts`], where every character of `word` is one symbol.
    pub fn accepts_str(&self, word: &str) -> bool {
        self.accepts(word.chars().map(String::from))
    }
}

/// Decides whether `automaton` accepts `word`, see [`Automaton::accepts`].
pub fn accepts<W, S>(automaton: &Automaton, word: W) -> bool
where
    W: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    automaton.accepts(word)
}
