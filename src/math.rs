use std::collections::{BTreeMap, BTreeSet};

pub use std::collections::btree_map as ordered_map;
pub use std::collections::btree_set as ordered_set;
pub use indexmap::Equivalent;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets whose iteration order is determined by the ordering of the elements.
pub type OrderedSet<S> = BTreeSet<S>;
/// Type alias for maps whose iteration order is determined by the ordering of the keys.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// Type alias for sets that remember the order in which elements were inserted.
pub type IndexedSet<S> = indexmap::IndexSet<S, fxhash::FxBuildHasher>;
/// Type alias for maps that remember the order in which keys were inserted.
pub type IndexedMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiHashMap<L, R>;

/// A partition groups elements of type `I` into disjoint, non-empty classes. The classes are kept
/// in a vector, so the position of a class can serve as its identifier while the partition is
/// not modified.
#[derive(Debug, Clone)]
pub struct Partition<I: Ord>(Vec<BTreeSet<I>>);

impl<I: Ord> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Ord> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Ord> IntoIterator for Partition<I> {
    type Item = BTreeSet<I>;
    type IntoIter = std::vec::IntoIter<BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<I: Ord> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Ord> Eq for Partition<I> {}

impl<I: Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements of
    /// type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }

    /// Returns the position of the class that contains `element`, if any.
    pub fn class_of(&self, element: &I) -> Option<usize> {
        self.0.iter().position(|class| class.contains(element))
    }
}

impl<I: Ord> From<Vec<BTreeSet<I>>> for Partition<I> {
    fn from(value: Vec<BTreeSet<I>>) -> Self {
        Self(value.into_iter().filter(|class| !class.is_empty()).collect())
    }
}
