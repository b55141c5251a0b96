use crate::{
    automaton::{StateName, Transitions},
    math::OrderedSet,
    symbol::is_epsilon,
};

/// Iterates over the targets of all epsilon transitions leaving `state`, whatever spelling
/// they are labelled with.
fn epsilon_successors<'a>(
    state: &str,
    transitions: &'a Transitions,
) -> impl Iterator<Item = &'a StateName> + 'a {
    transitions
        .get(state)
        .into_iter()
        .flat_map(|by_symbol| by_symbol.iter())
        .filter(|(symbol, _)| is_epsilon(symbol))
        .flat_map(|(_, targets)| targets.iter())
}

/// Computes the epsilon closure of `states`, which is the smallest superset of `states` that
/// contains the target of every epsilon transition leaving one of its members. States without
/// transitions contribute only themselves.
pub fn epsilon_closure<'a, I>(states: I, transitions: &Transitions) -> OrderedSet<StateName>
where
    I: IntoIterator<Item = &'a StateName>,
{
    let mut closure: OrderedSet<StateName> = states.into_iter().cloned().collect();
    let mut stack: Vec<StateName> = closure.iter().cloned().collect();

    while let Some(state) = stack.pop() {
        for target in epsilon_successors(&state, transitions) {
            if closure.insert(target.clone()) {
                stack.push(target.clone());
            }
        }
    }

    closure
}

/// Computes the set of states that can be reached from a member of `states` by a single
/// transition labelled with `symbol`. The symbol is taken literally, epsilon transitions are
/// not followed.
pub fn move_on_symbol<'a, I>(
    states: I,
    symbol: &str,
    transitions: &Transitions,
) -> OrderedSet<StateName>
where
    I: IntoIterator<Item = &'a StateName>,
{
    states
        .into_iter()
        .filter_map(|state| transitions.get(state)?.get(symbol))
        .flatten()
        .cloned()
        .collect()
}
