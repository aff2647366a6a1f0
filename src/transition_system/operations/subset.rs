use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::{debug, trace};

use crate::{math, prelude::*};

use super::UniqueNames;

/// Represents the subset construction applied to an automaton. This produces a deterministic
/// automaton, which resolves the nondeterminism and the epsilon transitions of the original by
/// operating on sets of its states.
///
/// A set of original states is identified by a [`BitSet`] over the positions of its states, so two
/// composite states are the same exactly if they contain the same states. The name of a composite
/// state is its rendering as a set, like `{q0, q1}`, or `∅` for the empty set.
#[derive(Debug, Clone)]
pub struct SubsetConstruction<'a> {
    aut: &'a Automaton,
    names: UniqueNames<BitSet>,
    initial: String,
    states: Vec<String>,
    unexpanded: VecDeque<(String, StateSet)>,
}

impl<'a> SubsetConstruction<'a> {
    /// Prepares the subset construction of `aut`, starting with the epsilon closure of its initial
    /// state.
    pub fn new(aut: &'a Automaton) -> Self {
        let mut construction = Self {
            aut,
            names: UniqueNames::default(),
            initial: String::new(),
            states: vec![],
            unexpanded: VecDeque::new(),
        };
        construction.initial = construction.discover(aut.initial_closure());
        construction
    }

    fn key(&self, set: &StateSet) -> BitSet {
        let mut key = BitSet::with_capacity(self.aut.size());
        key.extend(set.iter().filter_map(|q| self.aut.state_index(q)));
        key
    }

    /// Returns the name of the composite state `set`. If it has not been seen before, it is named
    /// and queued for expansion.
    fn discover(&mut self, set: StateSet) -> String {
        let key = self.key(&set);
        if let Some(name) = self.names.get(&key) {
            return name.clone();
        }
        let name = self.names.assign(key, set.show());
        trace!("discovered composite state {name}");
        self.states.push(name.clone());
        self.unexpanded.push_back((name.clone(), set));
        name
    }

    /// Expands composite states until none are left and assembles the resulting deterministic
    /// automaton. Its alphabet is that of the original automaton and every state has exactly one
    /// transition per symbol.
    pub fn collect(mut self) -> Automaton {
        let aut = self.aut;
        let mut transitions = TransitionTable::new();
        let mut finals = math::OrderedSet::new();

        while let Some((name, set)) = self.unexpanded.pop_front() {
            trace!("expanding {name}");

            if aut.contains_final(&set) {
                finals.insert(name.clone());
            }

            for sym in aut.alphabet().universe() {
                let next = aut.successor_set(&set, sym);
                let target = self.discover(next);
                transitions.insert(name.clone(), sym, target);
            }
        }

        debug!(
            "subset construction turned {} states into {}",
            aut.size(),
            self.states.len()
        );

        Automaton::new(
            format!("{} (DFA)", aut.name()),
            aut.alphabet().clone(),
            self.states,
            transitions,
            self.initial,
            finals,
        )
    }
}

impl Automaton {
    /// Applies the subset construction to `self`, see [`SubsetConstruction`]. The result accepts
    /// the same words as `self`, has no epsilon transitions and exactly one transition for every
    /// state and symbol.
    ///
    /// # Example
    /// ```
    /// use finite_automata::prelude::*;
    ///
    /// let nfa = AutomatonBuilder::default()
    ///     .with_transitions([("q0", 'a', "q0"), ("q0", 'a', "q1"), ("q0", 'b', "q0")])
    ///     .with_final_states(["q1"])
    ///     .into_automaton("q0");
    /// let dfa = nfa.determinize();
    /// assert!(dfa.is_complete());
    /// assert_eq!(dfa.initial(), "{q0}");
    /// assert!(dfa.accepts_word("ba"));
    /// assert!(!dfa.accepts_word("ab"));
    /// ```
    pub fn determinize(&self) -> Automaton {
        SubsetConstruction::new(self).collect()
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;
    use crate::tests::{contains_ab, epsilon_chain};

    #[test_log::test]
    fn subset_construction() {
        let nfa = AutomatonBuilder::default()
            .with_transitions([
                ("0", 'a', "0"),
                ("0", 'a', "1"),
                ("0", 'b', "1"),
                ("1", 'b', "1"),
                ("1", 'a', "0"),
            ])
            .into_automaton("0");

        let dfa = nfa.determinize();
        assert_eq!(
            dfa.states().collect_vec(),
            vec!["{0}", "{0, 1}", "{1}"]
        );
        assert_eq!(dfa.successors("{0}", 'a').show(), "{{0, 1}}");
        assert_eq!(dfa.successors("{1}", 'a').show(), "{{0}}");
        assert!(dfa.is_complete());
    }

    #[test_log::test]
    fn contains_ab_determinized() {
        let nfa = contains_ab();
        let dfa = nfa.determinize();
        assert_eq!(dfa.name(), "contains ab (DFA)");
        for q in dfa.states() {
            for sym in ['a', 'b'] {
                assert_eq!(dfa.successors(q, sym).len(), 1);
            }
            assert_eq!(dfa.transitions().successors(q).count(), 2);
        }
        for word in ["ab", "ba", "aab", "baab", "", "a", "bba"] {
            assert_eq!(nfa.accepts_word(word), dfa.accepts_word(word), "{word}");
        }
        assert!(dfa.accepts_word("aab"));
        assert!(!dfa.accepts_word("ba"));
    }

    #[test]
    fn epsilon_transitions_are_absorbed() {
        let nfa = epsilon_chain();
        let dfa = nfa.determinize();
        assert_eq!(dfa.initial(), "{q0, q1}");
        assert!(!dfa.transitions().has_epsilon_transitions());
        assert_eq!(dfa.successors("{q0, q1}", 'a').show(), "{{q2}}");
        assert_eq!(dfa.successors("{q2}", 'a').show(), "{∅}");
        assert_eq!(dfa.successors("∅", 'a').show(), "{∅}");
        assert_eq!(dfa.final_states().show(), "{{q2}}");
        assert_eq!(dfa.size(), 3);
    }

    #[test]
    fn colliding_names_are_disambiguated() {
        let nfa = AutomatonBuilder::default()
            .with_transitions([("a, b", 'x', "a"), ("a, b", 'x', "b"), ("a", 'x', "a, b")])
            .into_automaton("a, b");
        let dfa = nfa.determinize();
        // {a, b} as the set containing the state `a, b` and as the set containing `a` and `b`
        assert_eq!(dfa.states().collect_vec(), vec!["{a, b}", "{a, b}'"]);
        assert_eq!(dfa.successors("{a, b}'", 'x').show(), "{{a, b}}");
        assert!(dfa.is_complete());
    }
}
