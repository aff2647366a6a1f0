use std::str::FromStr;

use thiserror::Error;

use crate::{math::Equivalent, Symbol};

const PREFIX: &str = "TransitionFunctionKey(currentStateId=";
const SEPARATOR: &str = ", symbol=";
const SUFFIX: &str = ")";
const EPSILON: &str = "null";

/// Identifies an entry of a [`crate::TransitionTable`] by the state the transitions leave from and
/// the symbol they are labeled with. Equality is structural, [`Symbol::Epsilon`] is a value like
/// any other.
///
/// The [`std::fmt::Display`] implementation produces the canonical textual form that is used as a
/// map key in the persisted representation, [`FromStr`] reads it back.
///
/// ```
/// use finite_automata::prelude::*;
///
/// let key = TransitionKey::new("q0", Symbol::Epsilon);
/// assert_eq!(key.to_string(), "TransitionFunctionKey(currentStateId=q0, symbol=null)");
/// assert_eq!(key.to_string().parse::<TransitionKey>(), Ok(key));
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TransitionKey {
    state: String,
    symbol: Symbol,
}

impl TransitionKey {
    /// Creates a new key for transitions leaving `state` on `symbol`.
    pub fn new<S: Into<Symbol>>(state: impl Into<String>, symbol: S) -> Self {
        Self {
            state: state.into(),
            symbol: symbol.into(),
        }
    }

    /// The state that the transitions leave from.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The symbol that the transitions are labeled with.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }
}

impl std::fmt::Display for TransitionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{PREFIX}{}{SEPARATOR}", self.state)?;
        match self.symbol {
            Symbol::Char(c) => write!(f, "{c}")?,
            Symbol::Epsilon => write!(f, "{EPSILON}")?,
        }
        write!(f, "{SUFFIX}")
    }
}

/// Errors that can occur when reading a [`TransitionKey`] from its textual form.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum KeyParseError {
    #[error("transition key `{0}` is not of the form `TransitionFunctionKey(currentStateId=<state>, symbol=<symbol>)`")]
    Malformed(String),
    #[error("transition key has symbol `{0}`, expected a single character or `null`")]
    InvalidSymbol(String),
}

impl FromStr for TransitionKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (state, symbol) = s
            .strip_prefix(PREFIX)
            .and_then(|rest| rest.strip_suffix(SUFFIX))
            .and_then(|inner| inner.rsplit_once(SEPARATOR))
            .ok_or_else(|| KeyParseError::Malformed(s.to_string()))?;

        if symbol == EPSILON {
            return Ok(Self::new(state, Symbol::Epsilon));
        }
        let mut chars = symbol.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Self::new(state, c)),
            _ => Err(KeyParseError::InvalidSymbol(symbol.to_string())),
        }
    }
}

/// Borrowed form of a [`TransitionKey`], which allows looking up entries without allocating.
/// Hashes identically to the owned key.
#[derive(Hash)]
pub(crate) struct KeyRef<'a> {
    state: &'a str,
    symbol: Symbol,
}

impl<'a> KeyRef<'a> {
    pub(crate) fn new(state: &'a str, symbol: Symbol) -> Self {
        Self { state, symbol }
    }
}

impl Equivalent<TransitionKey> for KeyRef<'_> {
    fn equivalent(&self, key: &TransitionKey) -> bool {
        self.state == key.state && self.symbol == key.symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_form() {
        assert_eq!(
            TransitionKey::new("q0", 'a').to_string(),
            "TransitionFunctionKey(currentStateId=q0, symbol=a)"
        );
        assert_eq!(
            "TransitionFunctionKey(currentStateId=a, symbol=b, symbol=c)".parse::<TransitionKey>(),
            Ok(TransitionKey::new("a, symbol=b", 'c'))
        );
    }

    #[test]
    fn malformed_keys() {
        assert_eq!(
            "q0-a".parse::<TransitionKey>(),
            Err(KeyParseError::Malformed("q0-a".to_string()))
        );
        assert_eq!(
            "TransitionFunctionKey(currentStateId=q0, symbol=ab)".parse::<TransitionKey>(),
            Err(KeyParseError::InvalidSymbol("ab".to_string()))
        );
    }

    #[test]
    fn epsilon_is_distinct_from_characters() {
        assert_ne!(TransitionKey::new("q", Symbol::Epsilon), TransitionKey::new("q", 'n'));
    }
}
