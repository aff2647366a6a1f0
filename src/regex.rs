use itertools::Itertools;
use tracing::{debug, trace};

use crate::{math, prelude::*};

/// A regular expression over `char` symbols. Values are built bottom-up through the constructor
/// functions [`Regex::alternation`], [`Regex::concatenation`], [`Regex::star`], [`Regex::symbol`]
/// and [`Regex::epsilon`], which flatten nested operators, drop neutral operands and insert a
/// [`Regex::Grouping`] wherever precedence requires one. Thus the [`std::fmt::Display`]
/// implementation can render the expression without adding any parentheses itself.
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// let r = Regex::concatenation([
///     Regex::symbol('a'),
///     Regex::star(Regex::alternation([Regex::symbol('b'), Regex::symbol('c')])),
///     Regex::epsilon(),
/// ]);
/// assert_eq!(r.to_string(), "a(b|c)*");
/// assert!(r.matches("abcb"));
/// assert!(!r.matches("ba"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Regex {
    /// Matches if any of the operands matches.
    Alternation(Vec<Regex>),
    /// Matches the operands one after another.
    Concatenation(Vec<Regex>),
    /// Matches any number of repetitions of the operand.
    Star(Box<Regex>),
    /// Parenthesizes the operand.
    Grouping(Box<Regex>),
    /// Matches a single symbol, or the empty word for `None`.
    Terminal(Option<char>),
}

impl Regex {
    /// Matches only the empty word.
    pub fn epsilon() -> Self {
        Regex::Terminal(None)
    }

    /// Matches exactly the given symbol.
    pub fn symbol(sym: char) -> Self {
        Regex::Terminal(Some(sym))
    }

    /// Returns true if `self` is the terminal for the empty word.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Regex::Terminal(None))
    }

    /// Removes a grouping around `self`, if there is one.
    fn ungrouped(self) -> Self {
        match self {
            Regex::Grouping(inner) => inner.ungrouped(),
            other => other,
        }
    }

    /// Wraps `self` in a grouping if it is an alternation or a concatenation.
    fn grouped(self) -> Self {
        match self {
            Regex::Alternation(_) | Regex::Concatenation(_) => Regex::Grouping(Box::new(self)),
            other => other,
        }
    }

    /// Builds the alternation of the given operands. Nested alternations are flattened and
    /// duplicate operands removed, a single remaining operand is returned as is.
    pub fn alternation<I: IntoIterator<Item = Regex>>(operands: I) -> Self {
        let mut flat = vec![];
        for operand in operands {
            match operand.ungrouped() {
                Regex::Alternation(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        let mut flat = flat.into_iter().unique().collect_vec();
        match flat.len() {
            0 => Regex::epsilon(),
            1 => flat.remove(0),
            _ => Regex::Alternation(flat),
        }
    }

    /// Builds the concatenation of the given operands. Nested concatenations are flattened and
    /// epsilon operands dropped. If nothing remains, the result is epsilon.
    pub fn concatenation<I: IntoIterator<Item = Regex>>(operands: I) -> Self {
        let mut flat = vec![];
        for operand in operands {
            match operand.ungrouped() {
                Regex::Concatenation(inner) => flat.extend(inner),
                other if other.is_epsilon() => {}
                Regex::Alternation(inner) => {
                    flat.push(Regex::Grouping(Box::new(Regex::Alternation(inner))))
                }
                other => flat.push(other),
            }
        }
        match flat.len() {
            0 => Regex::epsilon(),
            1 => flat.remove(0).ungrouped(),
            _ => Regex::Concatenation(flat),
        }
    }

    /// Builds the Kleene star of `operand`. The star of epsilon is epsilon and a star is not
    /// applied twice.
    pub fn star(operand: Regex) -> Self {
        match operand.ungrouped() {
            r if r.is_epsilon() => r,
            Regex::Star(inner) => Regex::Star(inner),
            other => Regex::Star(Box::new(other.grouped())),
        }
    }

    /// Returns all positions in `word` at which a match of `self` that begins at `start` can end.
    fn ends(&self, word: &[char], start: usize) -> math::OrderedSet<usize> {
        match self {
            Regex::Terminal(None) => math::OrderedSet::from([start]),
            Regex::Terminal(Some(sym)) => match word.get(start) {
                Some(c) if c == sym => math::OrderedSet::from([start + 1]),
                _ => math::OrderedSet::new(),
            },
            Regex::Grouping(inner) => inner.ends(word, start),
            Regex::Alternation(operands) => operands
                .iter()
                .flat_map(|operand| operand.ends(word, start))
                .collect(),
            Regex::Concatenation(operands) => {
                operands
                    .iter()
                    .fold(math::OrderedSet::from([start]), |positions, operand| {
                        positions
                            .into_iter()
                            .flat_map(|p| operand.ends(word, p))
                            .collect()
                    })
            }
            Regex::Star(inner) => {
                let mut reached = math::OrderedSet::from([start]);
                let mut frontier = vec![start];
                while !frontier.is_empty() {
                    frontier = frontier
                        .into_iter()
                        .flat_map(|p| inner.ends(word, p))
                        .filter(|p| reached.insert(*p))
                        .collect();
                }
                reached
            }
        }
    }

    /// Returns true if `self` matches the whole of `word`.
    pub fn matches(&self, word: &str) -> bool {
        let word = word.chars().collect_vec();
        self.ends(&word, 0).contains(&word.len())
    }
}

impl std::fmt::Display for Regex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regex::Alternation(operands) => write!(f, "{}", operands.iter().join("|")),
            Regex::Concatenation(operands) => write!(f, "{}", operands.iter().join("")),
            Regex::Star(operand) => write!(f, "{operand}*"),
            Regex::Grouping(operand) => write!(f, "({operand})"),
            Regex::Terminal(Some(sym)) => write!(f, "{sym}"),
            Regex::Terminal(None) => write!(f, "ε"),
        }
    }
}

/// Edges between the states of the generalized automaton used during state elimination, labeled
/// with regular expressions. The original states keep their positions, the fresh initial and final
/// states come after them.
struct Generalized {
    edges: math::OrderedMap<(usize, usize), Regex>,
}

impl Generalized {
    fn add(&mut self, from: usize, to: usize, label: Regex) {
        let label = match self.edges.remove(&(from, to)) {
            Some(existing) => Regex::alternation([existing, label]),
            None => label,
        };
        self.edges.insert((from, to), label);
    }

    /// Removes `state`, connecting each of its predecessors to each of its successors with the
    /// expression for passing through it.
    fn eliminate(&mut self, state: usize) {
        let self_loop = self.edges.remove(&(state, state)).map(Regex::star);
        let incoming = self
            .edges
            .keys()
            .filter(|(_, to)| *to == state)
            .copied()
            .collect_vec()
            .into_iter()
            .filter_map(|key| self.edges.remove(&key).map(|label| (key.0, label)))
            .collect_vec();
        let outgoing = self
            .edges
            .keys()
            .filter(|(from, _)| *from == state)
            .copied()
            .collect_vec()
            .into_iter()
            .filter_map(|key| self.edges.remove(&key).map(|label| (key.1, label)))
            .collect_vec();

        for (from, into) in &incoming {
            for (to, out) in &outgoing {
                let through = Regex::concatenation(
                    std::iter::once(into.clone())
                        .chain(self_loop.clone())
                        .chain(std::iter::once(out.clone())),
                );
                self.add(*from, *to, through);
            }
        }
    }
}

impl Automaton {
    /// Extracts a regular expression that matches exactly the words accepted by `self`, using state
    /// elimination. A fresh initial state with an epsilon transition to the initial state and a fresh
    /// final state with epsilon transitions from every final state are added, then all original
    /// states are eliminated one at a time in ascending order of their names.
    ///
    /// Returns `None` if `self` accepts no word at all, as there is no expression for the empty
    /// language.
    ///
    /// # Example
    /// ```
    /// use finite_automata::prelude::*;
    ///
    /// let aut = AutomatonBuilder::default()
    ///     .with_transitions([("q0", '0', "q0"), ("q0", '1', "q1"), ("q1", '0', "q1"), ("q1", '1', "q1")])
    ///     .with_final_states(["q1"])
    ///     .into_automaton("q0");
    /// assert_eq!(aut.to_regex().unwrap().to_string(), "0*1(0|1)*");
    /// ```
    pub fn to_regex(&self) -> Option<Regex> {
        let start = self.size();
        let accept = start + 1;
        let index = |q: &str| self.state_index(q).unwrap_or(start);

        let mut generalized = Generalized {
            edges: math::OrderedMap::new(),
        };
        generalized.add(start, index(self.initial()), Regex::epsilon());
        for (state, symbol, next) in self.transitions().entries() {
            let label = Regex::Terminal(symbol.as_char());
            for p in next {
                generalized.add(index(state), index(p), label.clone());
            }
        }
        for q in self.final_states() {
            generalized.add(index(q), accept, Regex::epsilon());
        }

        for q in self.states().sorted() {
            trace!("eliminating {q}");
            generalized.eliminate(index(q));
        }

        let regex = generalized.edges.remove(&(start, accept));
        debug!(
            "extracted regular expression {} from automaton with {} states",
            regex.as_ref().map(|r| r.to_string()).unwrap_or("∅".to_string()),
            self.size()
        );
        regex
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{binary_contains_one, contains_ab, epsilon_chain, wiki_dfa};

    #[test]
    fn rendering() {
        let r = Regex::alternation([
            Regex::concatenation([Regex::symbol('a'), Regex::symbol('b')]),
            Regex::epsilon(),
            Regex::star(Regex::symbol('c')),
        ]);
        assert_eq!(r.to_string(), "ab|ε|c*");
        assert_eq!(
            Regex::star(Regex::concatenation([Regex::symbol('a'), Regex::symbol('b')])).to_string(),
            "(ab)*"
        );
        assert_eq!(Regex::star(Regex::epsilon()), Regex::epsilon());
        assert_eq!(
            Regex::star(Regex::star(Regex::symbol('a'))).to_string(),
            "a*"
        );
        assert_eq!(
            Regex::alternation([Regex::symbol('a'), Regex::symbol('a')]),
            Regex::symbol('a')
        );
    }

    #[test]
    fn nested_operators_are_flattened() {
        let r = Regex::concatenation([
            Regex::concatenation([Regex::symbol('a'), Regex::epsilon()]),
            Regex::alternation([
                Regex::symbol('b'),
                Regex::alternation([Regex::symbol('c'), Regex::symbol('d')]),
            ]),
        ]);
        assert_eq!(r.to_string(), "a(b|c|d)");
        assert!(matches!(&r, Regex::Concatenation(operands) if operands.len() == 2));
    }

    #[test]
    fn matching() {
        let r = Regex::concatenation([
            Regex::star(Regex::alternation([Regex::symbol('a'), Regex::epsilon()])),
            Regex::symbol('b'),
        ]);
        assert!(r.matches("b"));
        assert!(r.matches("aaab"));
        assert!(!r.matches("aaa"));
        assert!(!r.matches("bb"));
    }

    #[test_log::test]
    fn state_elimination() {
        assert_eq!(
            binary_contains_one().to_regex().unwrap().to_string(),
            "0*1(0|1)*"
        );
        assert_eq!(epsilon_chain().to_regex().unwrap().to_string(), "a");
    }

    #[test]
    fn empty_language_has_no_regex() {
        let aut = AutomatonBuilder::default()
            .with_transitions([("q0", 'a', "q0")])
            .into_automaton("q0");
        assert_eq!(aut.to_regex(), None);

        let unreachable_final = AutomatonBuilder::default()
            .with_transitions([("q0", 'a', "q0"), ("q1", 'a', "q1")])
            .with_final_states(["q1"])
            .into_automaton("q0");
        assert_eq!(unreachable_final.to_regex(), None);
    }

    #[test]
    fn extracted_regex_matches_the_same_words() {
        for aut in [binary_contains_one(), contains_ab(), epsilon_chain(), wiki_dfa()] {
            let regex = aut.to_regex().unwrap();
            for word in KleeneStar::up_to(aut.alphabet(), 5) {
                assert_eq!(aut.accepts_word(&word), regex.matches(&word), "{regex} on {word}");
            }
        }
    }
}
