use itertools::Itertools;

use crate::{math::Partition, prelude::*};

use super::UniqueNames;

/// A quotient takes a deterministic automaton and merges states which are in the same class of
/// some [`Partition`]. We assume that the partition is a congruence that respects finality, meaning
/// all states of a class are either final or not, and for two classes `X, Y`, all `p`, `q` in `X`
/// and every symbol `a`, the successor of `p` on `a` lies in `Y` if and only if the successor of
/// `q` on `a` does.
///
/// Every class is named by its members, e.g. `{q1, q2}` or `{q0}`.
#[derive(Debug, Clone)]
pub struct Quotient<'a> {
    aut: &'a Automaton,
    partition: Partition<String>,
}

impl<'a> Quotient<'a> {
    /// Creates a new quotient of the given automaton by the given [`Partition`]. The classes are
    /// ordered by the position of their first member among the states of `aut`.
    pub fn new(aut: &'a Automaton, partition: Partition<String>) -> Self {
        let position = |class: &StateSet| {
            class
                .iter()
                .filter_map(|q| aut.state_index(q))
                .min()
                .unwrap_or(usize::MAX)
        };
        let classes = partition
            .into_iter()
            .sorted_by_key(|class| position(class))
            .collect_vec();
        Self {
            aut,
            partition: Partition::from(classes),
        }
    }

    /// Returns a reference to the [`Partition`] underlying the quotient.
    pub fn partition(&self) -> &Partition<String> {
        &self.partition
    }

    /// Tries to find the id of the quotient class containing the given state `q`. If
    /// the state is not in the partition, `None` is returned.
    pub fn find_id_by_state(&self, q: &str) -> Option<usize> {
        self.partition.iter().position(|class| class.contains(q))
    }

    /// Assembles the quotient automaton with the given name.
    pub fn collect(self, name: impl Into<String>) -> Automaton {
        let mut names = UniqueNames::default();
        let class_names = self
            .partition
            .iter()
            .enumerate()
            .map(|(id, class)| names.assign(id, class.show()))
            .collect_vec();

        let mut transitions = TransitionTable::new();
        for (class, source) in self.partition.iter().zip(&class_names) {
            let Some(representative) = class.iter().next() else {
                continue;
            };
            for sym in self.aut.alphabet().universe() {
                let target = self
                    .aut
                    .successors(representative, sym)
                    .iter()
                    .next()
                    .and_then(|p| self.find_id_by_state(p));
                if let Some(target) = target {
                    transitions.insert(source.clone(), sym, class_names[target].clone());
                }
            }
        }

        let initial = self
            .find_id_by_state(self.aut.initial())
            .map(|id| class_names[id].clone())
            .unwrap_or_else(|| self.aut.initial().to_string());

        let finals = self
            .partition
            .iter()
            .zip(&class_names)
            .filter(|(class, _)| self.aut.contains_final(class.iter()))
            .map(|(_, name)| name.clone())
            .collect::<StateSet>();

        Automaton::new(
            name,
            self.aut.alphabet().clone(),
            class_names,
            transitions,
            initial,
            finals,
        )
    }
}
