use std::collections::VecDeque;

use bit_set::BitSet;
use itertools::Itertools;
use tracing::trace;

use crate::{
    automaton::{Automaton, StateName},
    math::{Map, Partition},
};

/// Blocks that still have to be used as splitters. The queue fixes the order in which they
/// are processed while the bit set answers membership queries.
#[derive(Debug, Default)]
struct Worklist {
    queue: VecDeque<usize>,
    pending: BitSet,
}

impl Worklist {
    fn push(&mut self, block: usize) {
        if self.pending.insert(block) {
            self.queue.push_back(block);
        }
    }

    fn pop(&mut self) -> Option<usize> {
        let block = self.queue.pop_front()?;
        self.pending.remove(block);
        Some(block)
    }
}

/// For every symbol (in ascending order) and every state index `q`, the indices of the
/// states whose transition on that symbol leads to `q`.
fn inverse_transitions(dfa: &Automaton, index: &Map<&StateName, usize>) -> Vec<Vec<Vec<usize>>> {
    let size = index.len();
    dfa.alphabet()
        .iter()
        .map(|symbol| {
            let mut predecessors = vec![vec![]; size];
            for (source, &p) in index {
                if let Some(q) = dfa
                    .successor(source, symbol)
                    .and_then(|target| index.get(target))
                {
                    predecessors[*q].push(p);
                }
            }
            predecessors
        })
        .collect()
}

/// Computes the coarsest partition of the states of `dfa` that separates accepting from
/// non-accepting states and is compatible with the transitions, using Hopcroft's algorithm.
///
/// A missing transition distinguishes a state from one that has a transition on the same
/// symbol, even if nothing is accepted from the target of that transition. Both initial
/// blocks are used as splitters, for partial automata refining only with respect to the
/// smaller one is not enough.
///
/// Each refinement step only visits the blocks that contain a predecessor of the splitter.
/// When a block is split, the smaller half moves to a new block and is queued, which is
/// correct whether or not the old block is still pending.
pub(crate) fn hopcroft(dfa: &Automaton) -> Partition<StateName> {
    let states = dfa.states().iter().collect_vec();
    let index: Map<&StateName, usize> = states.iter().enumerate().map(|(i, q)| (*q, i)).collect();
    let inverse = inverse_transitions(dfa, &index);

    let (mut accepting, mut rejecting) = (BitSet::new(), BitSet::new());
    for (i, q) in states.iter().enumerate() {
        if dfa.is_accepting(q) {
            accepting.insert(i);
        } else {
            rejecting.insert(i);
        }
    }
    let mut blocks = [accepting, rejecting]
        .into_iter()
        .filter(|block| !block.is_empty())
        .collect_vec();
    let mut sizes = blocks.iter().map(|block| block.len()).collect_vec();
    let mut block_of = vec![0; states.len()];
    for (b, block) in blocks.iter().enumerate() {
        for q in block {
            block_of[q] = b;
        }
    }

    let mut worklist = Worklist::default();
    for block in (0..blocks.len()).sorted_by_key(|&b| sizes[b]) {
        worklist.push(block);
    }

    while let Some(splitter) = worklist.pop() {
        let splitter = blocks[splitter].clone();
        for by_target in &inverse {
            // every state has at most one successor per symbol, so no state is hit twice
            let mut hit: Map<usize, Vec<usize>> = Map::default();
            for q in &splitter {
                for &p in &by_target[q] {
                    hit.entry(block_of[p]).or_default().push(p);
                }
            }

            for (y, inside) in hit.into_iter().sorted_by_key(|(y, _)| *y) {
                let outside_size = sizes[y] - inside.len();
                if outside_size == 0 {
                    continue;
                }
                // ties move the intersection
                let moved = if inside.len() <= outside_size {
                    inside
                } else {
                    let inside: BitSet = inside.into_iter().collect();
                    blocks[y].iter().filter(|q| !inside.contains(*q)).collect_vec()
                };

                let new = blocks.len();
                trace!(
                    "splitting {} states off block {y} of size {}",
                    moved.len(),
                    sizes[y]
                );
                let mut block = BitSet::with_capacity(states.len());
                for &q in &moved {
                    blocks[y].remove(q);
                    block.insert(q);
                    block_of[q] = new;
                }
                sizes[y] -= moved.len();
                sizes.push(moved.len());
                blocks.push(block);
                worklist.push(new);
            }
        }
    }

    Partition::new(
        blocks
            .into_iter()
            .map(|block| block.iter().map(|i| states[i].clone()).collect_vec()),
    )
}
