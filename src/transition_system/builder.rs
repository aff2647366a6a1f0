use crate::{math, prelude::*};

/// Helper struct for the construction of automata. It collects a name, alphabet symbols, states,
/// transitions and final states and assembles them into an [`Automaton`] once the initial state
/// is known.
///
/// Symbols that appear on a transition are added to the alphabet automatically, epsilon is never
/// part of the alphabet. States appear in the order: explicitly given states, the initial state,
/// states in the order in which they first occur on a transition, final states.
///
/// # Example
///
/// We want to create an automaton with two states `q0` and `q1` over the alphabet `['a', 'b']`,
/// in which `q0` can move to `q1` without consuming a symbol.
/// ```
/// use finite_automata::prelude::*;
///
/// let aut = AutomatonBuilder::default()
///     .with_name("example")
///     .with_transitions([
///         ("q0", Symbol::Char('a'), "q0"),
///         ("q0", Symbol::Epsilon, "q1"),
///         ("q1", Symbol::Char('b'), "q1"),
///     ])
///     .with_final_states(["q1"])
///     .into_automaton("q0"); // q0 is the initial state
///
/// assert_eq!(aut.alphabet().size(), 2);
/// assert_eq!(aut.states().collect::<Vec<_>>(), vec!["q0", "q1"]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct AutomatonBuilder {
    name: String,
    symbols: math::Set<char>,
    states: Vec<String>,
    transitions: Vec<(String, Symbol, String)>,
    finals: Vec<String>,
}

impl AutomatonBuilder {
    /// Sets the name of the automaton.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// By default, the only alphabet symbols in the automaton that is built are the ones that
    /// appear on at least one transition. This method can be used to force additional alphabet
    /// symbols to appear.
    pub fn with_alphabet_symbols<I>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.symbols.extend(symbols);
        self
    }

    /// Uses all symbols of `alphabet`, see [`Self::with_alphabet_symbols`].
    pub fn with_alphabet(self, alphabet: &CharAlphabet) -> Self {
        self.with_alphabet_symbols(alphabet.universe())
    }

    /// Adds states in the given order, also ones without any transitions.
    pub fn with_states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.states.extend(states.into_iter().map(Into::into));
        self
    }

    /// Adds transitions given as triples of source state, symbol and target state. The symbol may
    /// be given as a `char`, an `Option<char>` (where `None` is epsilon) or a [`Symbol`].
    pub fn with_transitions<I, F, S, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (F, S, T)>,
        F: Into<String>,
        S: Into<Symbol>,
        T: Into<String>,
    {
        self.transitions.extend(
            transitions
                .into_iter()
                .map(|(from, sym, to)| (from.into(), sym.into(), to.into())),
        );
        self
    }

    /// Marks the given states as final.
    pub fn with_final_states<I>(mut self, states: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.finals.extend(states.into_iter().map(Into::into));
        self
    }

    /// Assembles the [`Automaton`] with the given initial state.
    pub fn into_automaton(self, initial: impl Into<String>) -> Automaton {
        let initial = initial.into();

        let alphabet = CharAlphabet::from_iter(
            self.transitions
                .iter()
                .filter_map(|(_, sym, _)| sym.as_char())
                .chain(self.symbols),
        );

        let mut states = math::IndexedSet::default();
        states.extend(self.states);
        states.insert(initial.clone());
        for (from, _, to) in &self.transitions {
            states.insert(from.clone());
            states.insert(to.clone());
        }
        states.extend(self.finals.iter().cloned());

        let transitions = self.transitions.into_iter().collect::<TransitionTable>();

        Automaton::new(
            self.name,
            alphabet,
            states,
            transitions,
            initial,
            self.finals,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn state_order() {
        let aut = AutomatonBuilder::default()
            .with_states(["z"])
            .with_transitions([("b", 'x', "a"), ("a", 'y', "c")])
            .with_final_states(["f"])
            .into_automaton("i");
        assert_eq!(
            aut.states().collect::<Vec<_>>(),
            vec!["z", "i", "b", "a", "c", "f"]
        );
        assert_eq!(aut.alphabet().universe().collect::<String>(), "xy");
    }

    #[test]
    fn epsilon_is_not_a_symbol() {
        let aut = AutomatonBuilder::default()
            .with_transitions([("q0", None, "q1"), ("q1", Some('a'), "q0")])
            .into_automaton("q0");
        assert_eq!(aut.alphabet(), &CharAlphabet::from("a"));
        assert_eq!(aut.successors("q0", Symbol::Epsilon).show(), "{q1}");
    }

    #[test]
    fn alphabet_can_be_extended() {
        let aut = Automaton::builder()
            .with_alphabet(&CharAlphabet::binary())
            .into_automaton("q0");
        assert_eq!(aut.alphabet().size(), 2);
        assert_eq!(aut.size(), 1);
        assert!(aut.transitions().is_empty());
    }
}
