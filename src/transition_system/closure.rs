use std::collections::VecDeque;

use tracing::trace;

use crate::prelude::*;

impl TransitionTable {
    /// Computes the smallest superset of `seeds` that is closed under epsilon transitions, i.e. every
    /// state that can be reached from one of the seeds by taking only epsilon transitions.
    ///
    /// The set only ever grows and is bounded by the states mentioned in the table together with
    /// the seeds, so the computation always terminates.
    pub fn epsilon_closure<I>(&self, seeds: I) -> StateSet
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut closure = StateSet::new();
        let mut queue = VecDeque::new();
        for seed in seeds {
            let seed = seed.into();
            if closure.insert(seed.clone()) {
                queue.push_back(seed);
            }
        }

        while let Some(q) = queue.pop_front() {
            for p in self.lookup(&q, Symbol::Epsilon) {
                if closure.insert(p.clone()) {
                    trace!("{q} reaches {p} via epsilon");
                    queue.push_back(p.clone());
                }
            }
        }
        closure
    }

    /// Collects the states that are reachable from any of the given states through a transition on
    /// `symbol`, without applying the epsilon closure.
    pub fn step<'a, I, S>(&self, states: I, symbol: S) -> StateSet
    where
        I: IntoIterator<Item = &'a String>,
        S: Into<Symbol>,
    {
        let symbol = symbol.into();
        states
            .into_iter()
            .flat_map(|q| self.lookup(q, symbol).iter().cloned())
            .collect()
    }
}

impl Automaton {
    /// Computes the epsilon closure of the given states, see [`TransitionTable::epsilon_closure`].
    ///
    /// # Example
    /// ```
    /// use finite_automata::prelude::*;
    ///
    /// let aut = AutomatonBuilder::default()
    ///     .with_transitions([("q0", None, "q1"), ("q1", Some('a'), "q2")])
    ///     .with_final_states(["q2"])
    ///     .into_automaton("q0");
    /// assert_eq!(aut.epsilon_closure(["q0"]).show(), "{q0, q1}");
    /// ```
    pub fn epsilon_closure<I>(&self, seeds: I) -> StateSet
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.transitions().epsilon_closure(seeds)
    }

    /// Returns the epsilon closure of all states reached from `states` on `symbol`. This is one
    /// step of the simulation of `self`.
    pub fn successor_set<'a, I>(&self, states: I, symbol: char) -> StateSet
    where
        I: IntoIterator<Item = &'a String>,
    {
        self.epsilon_closure(self.transitions().step(states, symbol))
    }

    /// The epsilon closure of the initial state, the set of states `self` occupies before reading
    /// any input.
    pub fn initial_closure(&self) -> StateSet {
        self.epsilon_closure([self.initial()])
    }
}
