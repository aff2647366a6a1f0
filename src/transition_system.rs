use itertools::Itertools;

use crate::{math, prelude::*};

/// Defines the structural key of a [`TransitionTable`] and its canonical textual form.
pub mod key;
use key::KeyRef;

/// Contains the [`AutomatonBuilder`] for fluent construction of automata.
pub mod builder;

/// Epsilon closure of sets of states.
pub mod closure;

/// Reachability of states along non-epsilon transitions.
pub mod reachable;

/// Simulation of an automaton on a finite word.
pub mod run;

/// Operations that turn one automaton into another.
pub mod operations;

/// A set of states, identified by their names. The ordering of the underlying set makes its
/// iteration order (and therefore its rendering) canonical.
pub type StateSet = math::OrderedSet<String>;

static EMPTY: StateSet = StateSet::new();

impl Show for StateSet {
    fn show(&self) -> String {
        if self.is_empty() {
            "∅".to_string()
        } else {
            format!("{{{}}}", self.iter().join(", "))
        }
    }
}

/// Maps pairs of a state and a [`Symbol`] to the set of states that can be reached from the state
/// on that symbol. Multiple transitions from the same state on the same symbol accumulate into a
/// single entry, which is how nondeterminism is represented.
///
/// Entries are kept in the order in which their keys were first inserted, so enumerating them
/// through [`TransitionTable::entries`] is stable for a given table.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// let mut table = TransitionTable::default();
/// table.insert("q0", 'a', "q0");
/// table.insert("q0", 'a', "q1");
/// table.insert("q0", Symbol::Epsilon, "q1");
///
/// assert_eq!(table.lookup("q0", 'a').len(), 2);
/// assert!(table.lookup("q0", 'b').is_empty());
/// assert!(table.has_epsilon_transitions());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTable {
    edges: math::IndexedMap<TransitionKey, StateSet>,
}

impl TransitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set of states that can be reached from `state` on `symbol`. If there is no
    /// such transition, the returned set is empty.
    pub fn lookup<S: Into<Symbol>>(&self, state: &str, symbol: S) -> &StateSet {
        self.edges
            .get(&KeyRef::new(state, symbol.into()))
            .unwrap_or(&EMPTY)
    }

    /// Adds `next` to the set of states reachable from `state` on `symbol`, creating the entry
    /// if it does not exist yet. Existing successors are never removed. Returns true if `next`
    /// was not present before.
    pub fn insert<S: Into<Symbol>>(
        &mut self,
        state: impl Into<String>,
        symbol: S,
        next: impl Into<String>,
    ) -> bool {
        self.edges
            .entry(TransitionKey::new(state, symbol))
            .or_default()
            .insert(next.into())
    }

    /// Inserts all given states as successors of `state` on `symbol`, see [`Self::insert`]. An
    /// empty `next` leaves the table untouched, entries never hold an empty successor set.
    pub fn insert_all<S, I>(&mut self, state: impl Into<String>, symbol: S, next: I)
    where
        S: Into<Symbol>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let next = next.into_iter().map(Into::into).collect::<StateSet>();
        if next.is_empty() {
            return;
        }
        self.edges
            .entry(TransitionKey::new(state, symbol))
            .or_default()
            .extend(next);
    }

    /// Removes the entry for `state` and `symbol`, returning the successors it held.
    pub fn remove<S: Into<Symbol>>(&mut self, state: &str, symbol: S) -> Option<StateSet> {
        self.edges.shift_remove(&KeyRef::new(state, symbol.into()))
    }

    /// Iterates over all entries as triples of the source state, the symbol and the set of
    /// successors. The order is the order in which the keys were first inserted.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Symbol, &StateSet)> + '_ {
        self.edges
            .iter()
            .map(|(key, next)| (key.state(), key.symbol(), next))
    }

    /// Iterates over all keys of the table.
    pub fn keys(&self) -> impl Iterator<Item = &TransitionKey> + '_ {
        self.edges.keys()
    }

    /// Returns the number of entries, i.e. distinct pairs of state and symbol.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Returns true if at least one entry is labeled with [`Symbol::Epsilon`].
    pub fn has_epsilon_transitions(&self) -> bool {
        self.edges.keys().any(|key| key.symbol().is_epsilon())
    }

    /// Iterates over all states that are reachable from `state` in one step on any symbol,
    /// including epsilon. A state may be produced more than once.
    pub fn successors<'a>(&'a self, state: &'a str) -> impl Iterator<Item = &'a String> + 'a {
        self.entries()
            .filter(move |(source, _, _)| *source == state)
            .flat_map(|(_, _, next)| next.iter())
    }

    /// Keeps only the entries for which `f` returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, Symbol, &StateSet) -> bool,
    {
        self.edges
            .retain(|key, next| f(key.state(), key.symbol(), next))
    }
}

impl<F, S, T> FromIterator<(F, S, T)> for TransitionTable
where
    F: Into<String>,
    S: Into<Symbol>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, S, T)>>(iter: I) -> Self {
        let mut table = Self::default();
        for (state, symbol, next) in iter {
            table.insert(state, symbol, next);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn insert_accumulates() {
        let mut table = TransitionTable::new();
        assert!(table.insert("q0", 'a', "q1"));
        assert!(table.insert("q0", 'a', "q2"));
        assert!(!table.insert("q0", 'a', "q1"));
        assert_eq!(table.len(), 1);
        assert_eq!(
            table.lookup("q0", 'a').iter().collect::<Vec<_>>(),
            vec!["q1", "q2"]
        );
    }

    #[test]
    fn empty_targets_leave_no_entry() {
        let mut table = TransitionTable::new();
        table.insert("q0", 'a', "q0");
        table.insert_all("q0", Symbol::Epsilon, Vec::<String>::new());
        assert_eq!(table.len(), 1);
        assert!(!table.has_epsilon_transitions());

        let aut = Automaton::new("loop", CharAlphabet::from("a"), ["q0"], table.clone(), "q0", ["q0"]);
        assert!(aut.is_deterministic());
        assert_eq!(aut.minimize().map(|min| min.size()), Ok(1));
        #[cfg(feature = "serde")]
        assert_eq!(Automaton::from_json(&aut.to_json().unwrap()).unwrap(), aut);

        table.insert_all("q0", 'a', ["q1", "q0"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup("q0", 'a').show(), "{q0, q1}");
    }

    #[test]
    fn lookup_distinguishes_epsilon() {
        let table: TransitionTable = [
            ("q0", Symbol::Epsilon, "q1"),
            ("q0", Symbol::Char('a'), "q2"),
        ]
        .into_iter()
        .collect();
        assert_eq!(table.lookup("q0", Symbol::Epsilon).show(), "{q1}");
        assert_eq!(table.lookup("q0", 'a').show(), "{q2}");
        assert_eq!(table.lookup("q1", 'a').show(), "∅");
        assert_eq!(table.lookup("missing", None::<char>).show(), "∅");
    }

    #[test]
    fn entries_are_stable() {
        let mut table = TransitionTable::new();
        table.insert("q1", 'b', "q0");
        table.insert("q0", 'a', "q1");
        table.insert("q1", 'b', "q1");
        let entries = table
            .entries()
            .map(|(q, sym, next)| (q.to_string(), sym, next.len()))
            .collect::<Vec<_>>();
        assert_eq!(
            entries,
            vec![
                ("q1".to_string(), Symbol::Char('b'), 2),
                ("q0".to_string(), Symbol::Char('a'), 1)
            ]
        );
        assert_eq!(
            table.entries().collect::<Vec<_>>(),
            table.clone().entries().collect::<Vec<_>>()
        );
    }

    #[test]
    fn remove_and_retain() {
        let mut table: TransitionTable =
            [("q0", 'a', "q1"), ("q1", 'a', "q2"), ("q2", 'b', "q0")]
                .into_iter()
                .collect();
        assert_eq!(table.remove("q0", 'a').map(|s| s.len()), Some(1));
        assert_eq!(table.remove("q0", 'a'), None);
        table.retain(|_, sym, _| sym == Symbol::Char('b'));
        assert_eq!(table.len(), 1);
        assert_eq!(table.successors("q2").collect::<Vec<_>>(), vec!["q0"]);
    }
}
