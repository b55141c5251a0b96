use bit_set::BitSet;
use tracing::debug;

use crate::{
    automaton::{Automaton, StateName, Transitions},
    error::{Error, Result},
    math::{Map, OrderedSet, Partition},
    naming::Naming,
    reachable::prune_unreachable,
};

mod partition_refinement;
pub(crate) use partition_refinement::hopcroft;

/// Minimizes the deterministic automaton `dfa` using [`Naming::MINIMIZED`], see
/// [`minimize_with`].
pub fn minimize(dfa: &Automaton) -> Result<Automaton> {
    minimize_with(dfa, &Naming::MINIMIZED)
}

/// Minimizes the deterministic automaton `dfa` using Hopcroft's partition refinement
/// algorithm. Unreachable states are removed first, then all states that no word can
/// distinguish are merged into one.
///
/// The states of the result are named in the order in which a breadth-first search from the
/// start state that visits the symbols in ascending order discovers them. The composition
/// of a merged state is the union of the compositions of the states it consists of, where a
/// state without recorded composition stands for itself.
///
/// Fails with [`Error::NotDeterministic`] if `dfa` is not deterministic.
pub fn minimize_with(dfa: &Automaton, naming: &Naming<'_>) -> Result<Automaton> {
    if !dfa.is_dfa() {
        return Err(Error::NotDeterministic {
            name: dfa.name().to_string(),
        });
    }

    let mut pruned = dfa.clone();
    prune_unreachable(&mut pruned);
    let partition = hopcroft(&pruned);
    let min = quotient(&pruned, &partition, naming);
    debug!(
        "minimized {} with {} states into {} with {} states",
        dfa.name(),
        dfa.states().len(),
        min.name(),
        min.states().len()
    );
    Ok(min)
}

/// Builds the automaton that has one state for each class of `partition`. The transitions of
/// a class are those of its smallest member, which is well defined as long as the partition is
/// compatible with the transitions. Every state of `dfa` must belong to some class.
fn quotient(dfa: &Automaton, partition: &Partition<StateName>, naming: &Naming<'_>) -> Automaton {
    let class: Map<&StateName, usize> = partition
        .iter()
        .enumerate()
        .flat_map(|(i, members)| members.iter().map(move |q| (q, i)))
        .collect();
    let class_of_successor = |block: usize, symbol: &str| {
        let representative = partition[block].first()?;
        class.get(dfa.successor(representative, symbol)?).copied()
    };

    let start = class[dfa.start_state()];

    let mut order = vec![start];
    let mut seen = BitSet::with_capacity(partition.size());
    seen.insert(start);
    let mut next = 0;
    while let Some(&block) = order.get(next) {
        next += 1;
        for symbol in dfa.alphabet() {
            if let Some(target) = class_of_successor(block, symbol) {
                if seen.insert(target) {
                    order.push(target);
                }
            }
        }
    }
    // classes of a pruned automaton are all reachable, this only guards the naming
    for block in 0..partition.size() {
        if seen.insert(block) {
            order.push(block);
        }
    }

    let mut names = vec![StateName::new(); partition.size()];
    for (position, &block) in order.iter().enumerate() {
        names[block] = naming.state(position);
    }

    let mut states = OrderedSet::new();
    let mut accept_states = OrderedSet::new();
    let mut transitions = Transitions::default();
    let mut composition = Map::default();
    for (block, members) in partition.iter().enumerate() {
        let name = &names[block];
        states.insert(name.clone());
        if members.iter().any(|q| dfa.is_accepting(q)) {
            accept_states.insert(name.clone());
        }
        for symbol in dfa.alphabet() {
            if let Some(target) = class_of_successor(block, symbol) {
                transitions
                    .entry(name.clone())
                    .or_default()
                    .insert(symbol.clone(), OrderedSet::from([names[target].clone()]));
            }
        }
        let merged: OrderedSet<StateName> = members
            .iter()
            .flat_map(|q| match dfa.composition_of(q) {
                Some(composed) => composed.iter().cloned().collect::<Vec<_>>(),
                None => vec![q.clone()],
            })
            .collect();
        composition.insert(name.clone(), merged);
    }

    Automaton::from_parts(
        naming.automaton(dfa.name()),
        states,
        dfa.alphabet().clone(),
        names[start].clone(),
        accept_states,
        transitions,
        composition,
    )
}

impl Automaton {
    /// Minimizes `self`, see [`minimize_with`].
    pub fn minimize(&self) -> Result<Automaton> {
        minimize(self)
    }

    /// Minimizes `self` and names the result according to `naming`, see [`minimize_with`].
    pub fn minimize_with(&self, naming: &Naming<'_>) -> Result<Automaton> {
        minimize_with(self, naming)
    }
}
