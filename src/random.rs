use tracing::debug;

use crate::{
    automaton::{Automaton, StateName},
    error::Result,
    math::OrderedSet,
    symbol::{Symbol, EPSILON},
};

/// Returns the name of the `index`-th symbol of a generated alphabet, which is `a` to `z`
/// followed by `x26`, `x27` and so on.
fn symbol_name(index: usize) -> Symbol {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => char::from(b'a' + offset).to_string(),
        _ => format!("x{index}"),
    }
}

/// Generates a random, in general nondeterministic, automaton with `size` states `q0` to
/// `q{size - 1}` over an alphabet of `symbols` symbols. The start state is `q0` and every
/// state is accepting with probability one third.
///
/// The transitions are drawn independently: for every state, symbol and potential target the
/// transition is inserted with probability `density`. In the same way, an epsilon transition
/// between two distinct states is inserted with probability `epsilon_density`. All symbols
/// belong to the alphabet, even those that do not appear on a transition. Passing the same
/// seeded `rng` reproduces the same automaton.
pub fn generate_random_nfa(
    rng: &mut fastrand::Rng,
    size: usize,
    symbols: usize,
    density: f64,
    epsilon_density: f64,
) -> Result<Automaton> {
    let states: Vec<StateName> = (0..size.max(1)).map(|i| format!("q{i}")).collect();
    let alphabet: Vec<Symbol> = (0..symbols).map(symbol_name).collect();

    let mut transitions = vec![];
    for source in &states {
        for symbol in &alphabet {
            for target in &states {
                if rng.f64() < density {
                    transitions.push((source.clone(), symbol.clone(), target.clone()));
                }
            }
        }
        for target in states.iter().filter(|target| *target != source) {
            if rng.f64() < epsilon_density {
                transitions.push((source.clone(), EPSILON.to_string(), target.clone()));
            }
        }
    }
    let accepting = states
        .iter()
        .filter(|_| rng.usize(..3) == 0)
        .cloned()
        .collect::<Vec<_>>();

    debug!(
        "generated random automaton with {} states and {} transitions",
        states.len(),
        transitions.len()
    );
    Automaton::builder()
        .name(format!("random-{}", states.len()))
        .with_states(states.iter().cloned())
        .with_alphabet_symbols(alphabet)
        .start(states[0].clone())
        .with_accepting(accepting)
        .with_transitions(transitions)
        .build()
}

/// Draws a random word over `alphabet` whose length is uniformly chosen between `min_len`
/// and `max_len`, both inclusive. Over an empty alphabet only the empty word exists.
pub fn generate_random_word(
    rng: &mut fastrand::Rng,
    alphabet: &OrderedSet<Symbol>,
    min_len: usize,
    max_len: usize,
) -> Vec<Symbol> {
    if alphabet.is_empty() {
        return vec![];
    }
    let symbols: Vec<&Symbol> = alphabet.iter().collect();
    let len = rng.usize(min_len..=max_len.max(min_len));
    (0..len)
        .map(|_| symbols[rng.usize(..symbols.len())].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_names() {
        assert_eq!(symbol_name(0), "a");
        assert_eq!(symbol_name(25), "z");
        assert_eq!(symbol_name(26), "x26");
    }

    #[test_log::test]
    fn generation_is_reproducible() {
        let first = generate_random_nfa(&mut fastrand::Rng::with_seed(7), 6, 3, 0.2, 0.1).unwrap();
        let second =
            generate_random_nfa(&mut fastrand::Rng::with_seed(7), 6, 3, 0.2, 0.1).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.states().len(), 6);
        assert_eq!(first.alphabet().len(), 3);
        assert_eq!(first.start_state(), "q0");
    }

    #[test]
    fn densities_are_respected() {
        let mut rng = fastrand::Rng::with_seed(1);
        let empty = generate_random_nfa(&mut rng, 4, 2, 0.0, 0.0).unwrap();
        assert_eq!(empty.stats().total_transitions, 0);
        assert!(empty.is_dfa());

        let full = generate_random_nfa(&mut rng, 4, 2, 1.0, 1.0).unwrap();
        let stats = full.stats();
        assert_eq!(stats.epsilon_transitions, 4 * 3);
        assert_eq!(stats.total_transitions, 4 * 2 * 4 + 4 * 3);
        assert!(!full.is_dfa());
    }

    #[test]
    fn words_stay_within_bounds() {
        let mut rng = fastrand::Rng::with_seed(3);
        let alphabet: OrderedSet<Symbol> = ["a", "b"].map(String::from).into();
        for _ in 0..50 {
            let word = generate_random_word(&mut rng, &alphabet, 2, 5);
            assert!((2..=5).contains(&word.len()));
            assert!(word.iter().all(|symbol| alphabet.contains(symbol)));
        }
        assert!(generate_random_word(&mut rng, &OrderedSet::new(), 1, 3).is_empty());
    }
}
