use std::{collections::BTreeSet, hash::Hash};

use itertools::Itertools;

use crate::{automaton::StateName, Show};

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;
/// Sets whose iteration order must be deterministic.
pub type OrderedSet<S> = BTreeSet<S>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A frozen, sorted and duplicate free collection of state names. This is what identifies
/// a state of the subset construction, it can be hashed and compared by value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubsetKey(Vec<StateName>);

impl SubsetKey {
    /// Returns the number of states in the subset.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the subset contains no states.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether `state` is an element of the subset.
    pub fn contains(&self, state: &str) -> bool {
        self.0
            .binary_search_by(|probe| probe.as_str().cmp(state))
            .is_ok()
    }

    /// Iterates over the states in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, StateName> {
        self.0.iter()
    }

    /// Thaws the key into an ordered set.
    pub fn to_set(&self) -> OrderedSet<StateName> {
        self.0.iter().cloned().collect()
    }
}

impl From<OrderedSet<StateName>> for SubsetKey {
    fn from(value: OrderedSet<StateName>) -> Self {
        // a BTreeSet already iterates in ascending order without duplicates
        Self(value.into_iter().collect())
    }
}

impl FromIterator<StateName> for SubsetKey {
    fn from_iter<T: IntoIterator<Item = StateName>>(iter: T) -> Self {
        Self(iter.into_iter().sorted().dedup().collect())
    }
}

impl<'a> IntoIterator for &'a SubsetKey {
    type Item = &'a StateName;
    type IntoIter = std::slice::Iter<'a, StateName>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Show for SubsetKey {
    fn show(&self) -> String {
        format!("{{{}}}", self.0.iter().join(", "))
    }
}

/// A partition is a different view on a congruence relation, by grouping elements of
/// type `I` into their respective classes under the relation.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield
    /// elements of type `I`.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .collect(),
        )
    }
}
