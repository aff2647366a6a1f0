use itertools::Itertools;

use crate::Show;

/// A symbol labels a transition. It is either a single character that is consumed from the input,
/// or [`Symbol::Epsilon`], which is taken without consuming anything.
#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, PartialOrd, Ord)]
pub enum Symbol {
    /// Consumes the given character.
    Char(char),
    /// Consumes nothing.
    Epsilon,
}

impl Symbol {
    /// Returns the character of `self`, or `None` for [`Symbol::Epsilon`].
    pub fn as_char(&self) -> Option<char> {
        match self {
            Symbol::Char(c) => Some(*c),
            Symbol::Epsilon => None,
        }
    }

    /// Returns true if and only if `self` is [`Symbol::Epsilon`].
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl From<char> for Symbol {
    fn from(value: char) -> Self {
        Symbol::Char(value)
    }
}

impl From<Option<char>> for Symbol {
    fn from(value: Option<char>) -> Self {
        value.map(Symbol::Char).unwrap_or(Symbol::Epsilon)
    }
}

impl From<Symbol> for Option<char> {
    fn from(value: Symbol) -> Self {
        value.as_char()
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{c}"),
            Symbol::Epsilon => write!(f, "ε"),
        }
    }
}

impl Show for Symbol {
    fn show(&self) -> String {
        self.to_string()
    }

    fn show_collection<'a, I: IntoIterator<Item = &'a Self>>(iter: I) -> String
    where
        Self: 'a,
    {
        format!("\"{}\"", iter.into_iter().map(|sym| sym.to_string()).join(""))
    }
}

/// Represents an alphabet where every symbol is just a single `char`. The alphabet never contains
/// epsilon, its symbols are kept sorted and free of duplicates.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// let alphabet = CharAlphabet::from_iter(['b', 'a', 'b']);
/// assert_eq!(alphabet.universe().collect::<Vec<_>>(), vec!['a', 'b']);
/// assert!(alphabet.contains('a'));
/// assert!(!alphabet.contains('c'));
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, PartialOrd, Ord, Default)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Creates a new [`CharAlphabet`] alphabet of the given size. The symbols are just the first `size` letters
    /// of the alphabet, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self((0..size).map(|i| (b'a' + i as u8) as char).collect())
    }

    /// The binary alphabet `{0, 1}`.
    pub fn binary() -> Self {
        Self(vec!['0', '1'])
    }

    /// The decimal digits `0` to `9`.
    pub fn digits() -> Self {
        Self(('0'..='9').collect())
    }

    /// The lowercase latin letters `a` to `z`.
    pub fn latin_lowercase() -> Self {
        Self::of_size(26)
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all symbols in ascending order.
    pub fn universe(&self) -> std::iter::Copied<std::slice::Iter<'_, char>> {
        self.0.iter().copied()
    }

    /// Returns true if `symbol` is part of the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.binary_search(&symbol).is_ok()
    }

    /// Adds `symbol` to the alphabet, returns false if it was already present.
    pub fn insert(&mut self, symbol: char) -> bool {
        match self.0.binary_search(&symbol) {
            Ok(_) => false,
            Err(pos) => {
                self.0.insert(pos, symbol);
                true
            }
        }
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        Self(iter.into_iter().unique().sorted().collect())
    }
}

impl From<Vec<char>> for CharAlphabet {
    fn from(value: Vec<char>) -> Self {
        Self::from_iter(value)
    }
}

impl From<&str> for CharAlphabet {
    fn from(value: &str) -> Self {
        Self::from_iter(value.chars())
    }
}

impl Show for CharAlphabet {
    fn show(&self) -> String {
        format!("{{{}}}", self.0.iter().join(", "))
    }
}
