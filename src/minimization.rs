pub(crate) mod partition_refinement;

use thiserror::Error;
use tracing::debug;

use crate::{prelude::*, transition_system::operations::Quotient};

/// Errors reported by operations that require a deterministic automaton.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum AutomatonError {
    /// Some state has more than one successor on a symbol.
    #[error("state `{state}` has {targets} successors on `{symbol}`, expected at most one")]
    NotDeterministic {
        /// The state with multiple successors.
        state: String,
        /// The symbol on which it has them.
        symbol: char,
        /// The number of successors.
        targets: usize,
    },
    /// Some state has an epsilon transition.
    #[error("state `{0}` has an epsilon transition")]
    EpsilonTransition(String),
}

impl Automaton {
    /// Verifies that `self` is deterministic, i.e. it has no epsilon transitions and no state has
    /// more than one successor on any symbol. Missing transitions are allowed.
    pub fn check_deterministic(&self) -> Result<(), AutomatonError> {
        for (state, symbol, next) in self.transitions().entries() {
            match symbol {
                Symbol::Epsilon => {
                    return Err(AutomatonError::EpsilonTransition(state.to_string()));
                }
                Symbol::Char(symbol) if next.len() > 1 => {
                    return Err(AutomatonError::NotDeterministic {
                        state: state.to_string(),
                        symbol,
                        targets: next.len(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns a copy of `self` that only contains the states reachable from the initial state,
    /// see [`Automaton::reachable_states`]. Transitions are kept if their source and all of their
    /// targets are reachable, final states are restricted to the reachable ones.
    pub fn remove_unreachable(&self) -> Automaton {
        let reachable = self.reachable_states();
        let mut transitions = self.transitions().clone();
        transitions.retain(|state, _, next| {
            reachable.contains(state) && next.iter().all(|p| reachable.contains(p))
        });
        Automaton::new(
            self.name(),
            self.alphabet().clone(),
            self.states().filter(|q| reachable.contains(*q)).cloned(),
            transitions,
            self.initial(),
            self.final_states().intersection(&reachable).cloned(),
        )
    }

    /// Computes the minimal deterministic automaton accepting the same words as `self`. First all
    /// unreachable states are removed, then indistinguishable states are merged through partition
    /// refinement.
    ///
    /// `self` has to be deterministic, otherwise an [`AutomatonError`] is returned. It does not have
    /// to be complete: a missing transition behaves like a transition into a rejecting sink.
    ///
    /// # Example
    /// ```
    /// use finite_automata::prelude::*;
    ///
    /// let dfa = AutomatonBuilder::default()
    ///     .with_transitions([
    ///         ("q0", 'a', "q1"),
    ///         ("q0", 'b', "q2"),
    ///         ("q1", 'a', "q1"),
    ///         ("q1", 'b', "q1"),
    ///         ("q2", 'a', "q2"),
    ///         ("q2", 'b', "q2"),
    ///     ])
    ///     .with_final_states(["q1", "q2"])
    ///     .into_automaton("q0");
    /// let min = dfa.minimize().unwrap();
    /// assert_eq!(min.size(), 2);
    /// assert_eq!(min.states().collect::<Vec<_>>(), vec!["{q0}", "{q1, q2}"]);
    ///
    /// assert!(dfa.determinize().minimize().is_ok());
    /// ```
    pub fn minimize(&self) -> Result<Automaton, AutomatonError> {
        self.check_deterministic()?;
        let trimmed = self.remove_unreachable();
        let partition = partition_refinement::refine(&trimmed);
        let min = Quotient::new(&trimmed, partition).collect(format!("{} (minimized)", self.name()));
        debug!(
            "minimized automaton with {} states to {} states",
            self.size(),
            min.size()
        );
        Ok(min)
    }
}
