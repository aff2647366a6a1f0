use std::collections::VecDeque;

use crate::prelude::*;

impl Automaton {
    /// Returns all states that can be reached from `origin` by following transitions on symbols of
    /// the alphabet. Epsilon transitions are not followed.
    pub fn reachable_states_from(&self, origin: &str) -> StateSet {
        let mut seen = StateSet::from_iter([origin.to_string()]);
        let mut queue = VecDeque::from([origin.to_string()]);

        while let Some(q) = queue.pop_front() {
            for sym in self.alphabet().universe() {
                for p in self.successors(&q, sym) {
                    if seen.insert(p.clone()) {
                        queue.push_back(p.clone());
                    }
                }
            }
        }
        seen
    }

    /// Returns all states that can be reached from the initial state, see
    /// [`Automaton::reachable_states_from`].
    pub fn reachable_states(&self) -> StateSet {
        self.reachable_states_from(self.initial())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn reachable_states() {
        let aut = AutomatonBuilder::default()
            .with_transitions([
                ("0", 'a', "1"),
                ("0", 'b', "0"),
                ("1", 'a', "2"),
                ("1", 'b', "0"),
                ("2", 'a', "2"),
                ("2", 'b', "2"),
                ("3", 'a', "2"),
            ])
            .with_final_states(["2"])
            .into_automaton("0");

        assert_eq!(aut.reachable_states().show(), "{0, 1, 2}");
        assert_eq!(aut.reachable_states_from("2").show(), "{2}");
        assert_eq!(aut.reachable_states_from("3").show(), "{2, 3}");
    }
}
