use itertools::Itertools;

use crate::{math, prelude::*};

/// A finite automaton over a [`CharAlphabet`], possibly nondeterministic and possibly with
/// epsilon transitions.
///
/// States are addressed by their names, which are unique within one automaton. The automaton
/// expects that its initial state, its final states and every state or symbol mentioned in the
/// transition table are part of its states and alphabet respectively. These conditions are
/// established when building it (see [`AutomatonBuilder`] and [`AutomatonDraft`]) and are not
/// checked again by the algorithms.
///
/// All algorithms take `&self` and produce fresh values, an automaton is never modified by them.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// let aut = AutomatonBuilder::default()
///     .with_transitions([("q0", '0', "q0"), ("q0", '1', "q1"), ("q1", '0', "q1"), ("q1", '1', "q1")])
///     .with_final_states(["q1"])
///     .into_automaton("q0");
///
/// assert!(aut.accepts_word("01"));
/// assert!(!aut.accepts_word("00"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    name: String,
    alphabet: CharAlphabet,
    states: math::IndexedSet<String>,
    transitions: TransitionTable,
    initial: String,
    finals: StateSet,
}

impl Automaton {
    /// Assembles an automaton from its parts. Duplicate state names are dropped, the first
    /// occurrence determines the position of a state.
    pub fn new<I, F>(
        name: impl Into<String>,
        alphabet: CharAlphabet,
        states: I,
        transitions: TransitionTable,
        initial: impl Into<String>,
        finals: F,
    ) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            name: name.into(),
            alphabet,
            states: states.into_iter().map(Into::into).collect(),
            transitions,
            initial: initial.into(),
            finals: finals.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns a builder for fluently constructing an automaton.
    pub fn builder() -> AutomatonBuilder {
        AutomatonBuilder::default()
    }

    /// The name of the automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alphabet, which never contains epsilon.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// Iterates over the names of all states in their order.
    pub fn states(&self) -> impl Iterator<Item = &String> + '_ {
        self.states.iter()
    }

    /// Returns the position of the state with the given name.
    pub fn state_index(&self, state: &str) -> Option<usize> {
        self.states.get_index_of(state)
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns true if a state with the given name exists.
    pub fn contains_state(&self, state: &str) -> bool {
        self.states.contains(state)
    }

    /// The transition table.
    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    /// The name of the initial state.
    pub fn initial(&self) -> &str {
        &self.initial
    }

    /// The set of final (accepting) states.
    pub fn final_states(&self) -> &StateSet {
        &self.finals
    }

    /// Returns true if `state` is final.
    pub fn is_final(&self, state: &str) -> bool {
        self.finals.contains(state)
    }

    /// Returns true if at least one of the given states is final.
    pub fn contains_final<'a, I: IntoIterator<Item = &'a String>>(&self, states: I) -> bool {
        states.into_iter().any(|q| self.is_final(q))
    }

    /// Shorthand for looking up the successors of `state` on `symbol` in the transition table.
    pub fn successors<S: Into<Symbol>>(&self, state: &str, symbol: S) -> &StateSet {
        self.transitions.lookup(state, symbol)
    }

    /// Returns true if `self` has no epsilon transitions and at most one successor for each pair
    /// of state and symbol. See [`Automaton::check_deterministic`] for the reason why an
    /// automaton is not deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.check_deterministic().is_ok()
    }

    /// Returns true if `self` is deterministic and every state has a transition on every symbol.
    pub fn is_complete(&self) -> bool {
        self.is_deterministic()
            && self.states.iter().all(|q| {
                self.alphabet
                    .universe()
                    .all(|sym| !self.successors(q, sym).is_empty())
            })
    }

    /// Returns a copy of `self` with a different name.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Renders the label of a state for the transition table, marking the initial state
    /// with an arrow and final states with an asterisk.
    fn decorated(&self, state: &str) -> String {
        format!(
            "{}{}{}",
            if state == self.initial { "→" } else { "" },
            if self.is_final(state) { "*" } else { "" },
            state
        )
    }

    /// Produces a table with one row per state and one column per symbol, epsilon is only
    /// given a column if it is used.
    pub fn build_transition_table(&self) -> String {
        let mut columns = self.alphabet.universe().map(Symbol::Char).collect_vec();
        if self.transitions.has_epsilon_transitions() {
            columns.push(Symbol::Epsilon);
        }

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string()).chain(columns.iter().map(|sym| sym.show())),
        );
        for q in &self.states {
            let mut row = vec![self.decorated(q)];
            for sym in &columns {
                let next = self.successors(q, *sym);
                row.push(match next.len() {
                    0 => "-".to_string(),
                    1 => next.iter().join(""),
                    _ => next.show(),
                });
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.name)?;
        write!(f, "{}", self.build_transition_table())
    }
}
