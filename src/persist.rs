use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::prelude::*;

/// Errors that can occur when loading an [`Automaton`] from its persisted form.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PersistError {
    #[error("could not read persisted automaton: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{0}` is not a single character")]
    InvalidSymbol(String),
    #[error("symbol `{0}` is used on a transition but not part of the alphabet")]
    UnknownSymbol(char),
    #[error("state `{0}` is referenced but not part of the states")]
    UnknownState(String),
}

/// One entry of the persisted transition function. A missing `symbol` is read as `null`, i.e.
/// epsilon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PersistedTransition {
    pub current_state: String,
    #[serde(default)]
    pub symbol: Option<String>,
    pub next_states: Vec<String>,
}

/// The persisted (JSON) form of an [`Automaton`]. The transition function is a map whose keys are
/// the textual form of a [`TransitionKey`], such as
/// `TransitionFunctionKey(currentStateId=q0, symbol=null)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct PersistedAutomaton {
    pub name: String,
    pub alphabet: Vec<String>,
    pub states: Vec<String>,
    pub transition_function: BTreeMap<String, PersistedTransition>,
    pub initial_state: String,
    pub final_states: Vec<String>,
}

fn parse_symbol(symbol: &str) -> Result<char, PersistError> {
    let mut chars = symbol.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(PersistError::InvalidSymbol(symbol.to_string())),
    }
}

impl From<&Automaton> for PersistedAutomaton {
    fn from(aut: &Automaton) -> Self {
        let transition_function = aut
            .transitions()
            .entries()
            .map(|(state, symbol, next)| {
                let key = TransitionKey::new(state, symbol);
                let entry = PersistedTransition {
                    current_state: state.to_string(),
                    symbol: symbol.as_char().map(String::from),
                    next_states: next.iter().cloned().collect(),
                };
                (key.to_string(), entry)
            })
            .collect();

        Self {
            name: aut.name().to_string(),
            alphabet: aut.alphabet().universe().map(String::from).collect(),
            states: aut.states().cloned().collect(),
            transition_function,
            initial_state: aut.initial().to_string(),
            final_states: aut.final_states().iter().cloned().collect(),
        }
    }
}

impl TryFrom<PersistedAutomaton> for Automaton {
    type Error = PersistError;

    fn try_from(value: PersistedAutomaton) -> Result<Self, Self::Error> {
        let alphabet = value
            .alphabet
            .iter()
            .map(|sym| parse_symbol(sym))
            .collect::<Result<CharAlphabet, _>>()?;
        let states: crate::math::Set<&str> = value.states.iter().map(String::as_str).collect();
        let known = |q: &str| {
            states
                .contains(q)
                .then_some(())
                .ok_or_else(|| PersistError::UnknownState(q.to_string()))
        };

        let mut table = TransitionTable::new();
        for (key, entry) in &value.transition_function {
            let symbol = match entry.symbol.as_deref() {
                Some(sym) => {
                    let c = parse_symbol(sym)?;
                    if !alphabet.contains(c) {
                        return Err(PersistError::UnknownSymbol(c));
                    }
                    Symbol::Char(c)
                }
                None => Symbol::Epsilon,
            };
            let expected = TransitionKey::new(entry.current_state.as_str(), symbol);
            if key.parse::<TransitionKey>().ok().as_ref() != Some(&expected) {
                warn!("transition key `{key}` does not match its entry, using `{expected}`");
            }

            known(&entry.current_state)?;
            if entry.next_states.is_empty() {
                warn!("transition entry `{key}` has no next states and is skipped");
            }
            for next in &entry.next_states {
                known(next)?;
                table.insert(entry.current_state.as_str(), symbol, next.as_str());
            }
        }

        known(&value.initial_state)?;
        for q in &value.final_states {
            known(q)?;
        }

        debug!(
            "loaded {} with {} states and {} transition entries",
            value.name,
            value.states.len(),
            table.len()
        );
        Ok(Automaton::new(
            value.name,
            alphabet,
            value.states,
            table,
            value.initial_state,
            value.final_states,
        ))
    }
}

impl Automaton {
    /// Converts `self` into its persisted form.
    pub fn to_persisted(&self) -> PersistedAutomaton {
        PersistedAutomaton::from(self)
    }

    /// Serializes `self` into its persisted JSON form.
    pub fn to_json(&self) -> Result<String, PersistError> {
        Ok(serde_json::to_string_pretty(&self.to_persisted())?)
    }

    /// Reads an automaton from its persisted JSON form and checks that every referenced state and
    /// symbol is known.
    ///
    /// ```
    /// use finite_automata::prelude::*;
    ///
    /// let aut = Automaton::from_json(
    ///     r#"{
    ///         "name": "single a",
    ///         "alphabet": ["a"],
    ///         "states": ["p", "q"],
    ///         "transitionFunction": {
    ///             "TransitionFunctionKey(currentStateId=p, symbol=a)": {
    ///                 "currentState": "p", "symbol": "a", "nextStates": ["q"]
    ///             }
    ///         },
    ///         "initialState": "p",
    ///         "finalStates": ["q"]
    ///     }"#,
    /// )
    /// .unwrap();
    /// assert!(aut.accepts_word("a"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, PersistError> {
        let persisted: PersistedAutomaton = serde_json::from_str(json)?;
        Automaton::try_from(persisted)
    }
}
