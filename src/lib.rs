//! Library for constructing, running and transforming finite automata with epsilon transitions.
//!
//! An [`Automaton`] consists of an alphabet of `char` symbols, an ordered collection of uniquely named
//! states, a [`TransitionTable`], one designated initial state and a set of final states. The table maps a
//! pair of a state and a [`Symbol`] (which is either a character or [`Symbol::Epsilon`]) to a *set* of
//! successor states, so nondeterminism is represented directly. A DFA is simply an automaton whose table has
//! no epsilon entries and at most one successor per key.
//!
//! All algorithms treat their input as immutable and return fresh values:
//! - [`Automaton::epsilon_closure`] computes the smallest superset of a set of states that is closed under
//!   epsilon transitions. Every other algorithm is built on top of it.
//! - [`Automaton::compute_run`] and [`Automaton::compute_run_tree`] simulate the automaton on a word, the
//!   former collapsing the reached states into one set per step, the latter keeping every branch apart.
//! - [`Automaton::determinize`] applies the subset construction.
//! - [`Automaton::minimize`] removes unreachable states and merges indistinguishable ones through partition
//!   refinement. It refuses to operate on automata that are not deterministic.
//! - [`Automaton::to_regex`] extracts a [`Regex`] through state elimination.
//!
//! Automata can be built with the fluent [`AutomatonBuilder`] or through the editing model in [`edit`], which
//! decouples stable state identifiers from display names and validates everything before producing an
//! [`Automaton`]. With the `serde` feature, automata round-trip through the persisted JSON form.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use finite_automata::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{CharAlphabet, Symbol},
        automaton::Automaton,
        edit::{AutomatonDraft, DraftState, DraftTransition, StateId, ValidationError},
        math,
        minimization::AutomatonError,
        regex::Regex,
        transition_system::{
            builder::AutomatonBuilder,
            key::TransitionKey,
            run::{NodeId, Run, RunNode, RunStep, RunTree},
            StateSet, TransitionTable,
        },
        word::KleeneStar,
        Show,
    };

    #[cfg(feature = "serde")]
    pub use super::persist::{PersistError, PersistedAutomaton, PersistedTransition};
}

/// This module contains some definitions of mathematical objects which are used throughout the crate and
/// do not really fit to the top level.
pub mod math;

/// Module that contains definitions for dealing with alphabets and symbols.
pub mod alphabet;
pub use alphabet::{CharAlphabet, Symbol};

/// This module defines the transition table together with the algorithms that operate on it.
pub mod transition_system;
pub use transition_system::{builder::AutomatonBuilder, StateSet, TransitionTable};

/// Defines the [`Automaton`] aggregate.
pub mod automaton;
pub use automaton::Automaton;

/// Contains the minimization of deterministic automata.
pub mod minimization;

/// Extraction of regular expressions from automata.
pub mod regex;
pub use regex::Regex;

/// Editing-time representation of an automaton.
pub mod edit;

/// Module that contains definitions for dealing with finite words.
pub mod word;

/// Persisted (JSON) form of an automaton. This is feature gated behind the `serde` feature.
#[cfg(feature = "serde")]
pub mod persist;

/// Implements the generation of random automata.
#[cfg(feature = "random")]
pub mod random;

use itertools::Itertools;

/// Helper trait which can be used to display states, symbols, sets of states and such.
pub trait Show {
    /// Returns a human readable representation of `self`, for a state that should be
    /// for example q0, for a set of states {q0, q1} and for a symbol just the character.
    fn show(&self) -> String;
    /// Show a collection of the thing, for a collection of symbols this is the word they form
    /// and for a collection of states it should be {q0, q1, q2, ...}.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!("{{{}}}", iter.into_iter().map(|x| x.show()).join(", "))
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
    {
        format!("\"{}\"", iter.into_iter().collect::<String>())
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        S::show_collection(self.iter())
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// Accepts all words over `{0, 1}` that contain at least one `1`.
    pub fn binary_contains_one() -> Automaton {
        AutomatonBuilder::default()
            .with_name("contains one")
            .with_transitions([
                ("q0", '0', "q0"),
                ("q0", '1', "q1"),
                ("q1", '0', "q1"),
                ("q1", '1', "q1"),
            ])
            .with_final_states(["q1"])
            .into_automaton("q0")
    }

    /// Epsilon NFA with `q0 -ε-> q1 -a-> q2` where `q2` is final.
    pub fn epsilon_chain() -> Automaton {
        AutomatonBuilder::default()
            .with_name("epsilon chain")
            .with_states(["q0", "q1", "q2"])
            .with_transitions([("q0", Symbol::Epsilon, "q1"), ("q1", Symbol::Char('a'), "q2")])
            .with_final_states(["q2"])
            .into_automaton("q0")
    }

    /// Three state NFA over `{a, b}` accepting all words that contain `ab` as an infix.
    pub fn contains_ab() -> Automaton {
        AutomatonBuilder::default()
            .with_name("contains ab")
            .with_transitions([
                ("s0", 'a', "s0"),
                ("s0", 'b', "s0"),
                ("s0", 'a', "s1"),
                ("s1", 'b', "s2"),
                ("s2", 'a', "s2"),
                ("s2", 'b', "s2"),
            ])
            .with_final_states(["s2"])
            .into_automaton("s0")
    }

    /// The DFA from the wikipedia article on DFA minimization. States `c`, `d` and `e` are
    /// equivalent, as are `a` and `b`, so the minimal automaton has three states.
    pub fn wiki_dfa() -> Automaton {
        AutomatonBuilder::default()
            .with_name("wiki")
            .with_transitions([
                ("a", '0', "b"),
                ("a", '1', "c"),
                ("b", '0', "a"),
                ("b", '1', "d"),
                ("c", '0', "e"),
                ("c", '1', "f"),
                ("d", '0', "e"),
                ("d", '1', "f"),
                ("e", '0', "e"),
                ("e", '1', "f"),
                ("f", '0', "f"),
                ("f", '1', "f"),
            ])
            .with_final_states(["c", "d", "e"])
            .into_automaton("a")
    }

    #[test]
    fn show_collections() {
        assert_eq!(vec!['a', 'b'].show(), "\"ab\"");
        assert_eq!(
            vec!["q0".to_string(), "q1".to_string()].show(),
            "{q0, q1}"
        );
        assert_eq!(("q0".to_string(), 'a').show(), "(q0, a)");
    }
}
