use crate::prelude::*;

/// Enumerates the words over a [`CharAlphabet`] by increasing length, and words of equal length in
/// the order of the alphabet. The empty word comes first. Built with [`KleeneStar::new`] the
/// enumeration only ends for an empty alphabet, [`KleeneStar::up_to`] stops after the last word of
/// the given length.
///
/// ```
/// use finite_automata::prelude::*;
///
/// let words = KleeneStar::up_to(&CharAlphabet::from("ab"), 2).collect::<Vec<_>>();
/// assert_eq!(words, vec!["", "a", "b", "aa", "ab", "ba", "bb"]);
/// ```
#[derive(Debug, Clone)]
pub struct KleeneStar {
    symbols: Vec<char>,
    max_len: Option<usize>,
    // positions into `symbols` of the next word, `None` once the enumeration is over
    upcoming: Option<Vec<usize>>,
}

impl KleeneStar {
    /// Enumerates all words over `alphabet`.
    pub fn new(alphabet: &CharAlphabet) -> Self {
        Self {
            symbols: alphabet.universe().collect(),
            max_len: None,
            upcoming: Some(vec![]),
        }
    }

    /// Enumerates all words over `alphabet` of length at most `max_len`.
    pub fn up_to(alphabet: &CharAlphabet, max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            ..Self::new(alphabet)
        }
    }

    /// Advances the positions like an odometer. Returns `None` if the alphabet is empty, as then
    /// there is no word after the empty one.
    fn successor(&self, mut positions: Vec<usize>) -> Option<Vec<usize>> {
        if self.symbols.is_empty() {
            return None;
        }
        for pos in positions.iter_mut().rev() {
            *pos += 1;
            if *pos < self.symbols.len() {
                return Some(positions);
            }
            *pos = 0;
        }
        positions.push(0);
        Some(positions)
    }
}

impl Iterator for KleeneStar {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let positions = self.upcoming.take()?;
        if self.max_len.is_some_and(|max| positions.len() > max) {
            return None;
        }
        let word = positions.iter().map(|i| self.symbols[*i]).collect();
        self.upcoming = self.successor(positions);
        Some(word)
    }
}

impl Automaton {
    /// Returns the words of length at most `max_len` accepted by `self`, ordered as in
    /// [`KleeneStar`].
    pub fn accepted_words(&self, max_len: usize) -> impl Iterator<Item = String> + '_ {
        KleeneStar::up_to(self.alphabet(), max_len).filter(|word| self.accepts_word(word))
    }
}

#[cfg(test)]
mod tests {
    use super::KleeneStar;
    use crate::prelude::*;
    use crate::tests::{binary_contains_one, epsilon_chain};

    #[test]
    fn words_by_length() {
        let mut words = KleeneStar::new(&CharAlphabet::from("01"));
        assert_eq!(words.nth(6).as_deref(), Some("11"));
        assert_eq!(words.next().as_deref(), Some("000"));

        assert_eq!(KleeneStar::up_to(&CharAlphabet::from("ab"), 3).count(), 15);
        assert_eq!(KleeneStar::up_to(&CharAlphabet::from("ab"), 0).collect::<Vec<_>>(), vec![""]);
        assert_eq!(KleeneStar::new(&CharAlphabet::from("")).collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn accepted_words() {
        assert_eq!(
            binary_contains_one().accepted_words(2).collect::<Vec<_>>(),
            vec!["1", "01", "10", "11"]
        );
        assert_eq!(epsilon_chain().accepted_words(3).collect::<Vec<_>>(), vec!["a"]);
    }
}
