use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::{math, prelude::*};

/// Stable identifier of a state while an automaton is edited. Unlike the name of a state, it never
/// changes and is unique even while names are blank or duplicated.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct StateId(u32);

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A state of an [`AutomatonDraft`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftState {
    id: StateId,
    name: String,
}

impl DraftState {
    /// The stable identifier.
    pub fn id(&self) -> StateId {
        self.id
    }
    /// The current display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A transition of an [`AutomatonDraft`], leading from one state on a symbol (`None` is epsilon)
/// to any number of states.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DraftTransition {
    from: StateId,
    symbol: Option<char>,
    to: Vec<StateId>,
}

impl DraftTransition {
    /// The state the transition leaves from.
    pub fn from(&self) -> StateId {
        self.from
    }
    /// The symbol, `None` for epsilon.
    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }
    /// The target states.
    pub fn to(&self) -> &[StateId] {
        &self.to
    }
}

/// Problems that prevent an [`AutomatonDraft`] from being turned into an [`Automaton`].
#[derive(Debug, Clone, Hash, Eq, PartialEq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("the automaton has no name")]
    BlankAutomatonName,
    #[error("the alphabet is empty")]
    EmptyAlphabet,
    #[error("the automaton has no states")]
    NoStates,
    #[error("state {0} has no name")]
    BlankStateName(StateId),
    #[error("the state name `{0}` is used more than once")]
    DuplicateStateName(String),
    #[error("no initial state is selected")]
    MissingInitialState,
    #[error("state {0} does not exist")]
    UnknownState(StateId),
    #[error("symbol `{0}` is not part of the alphabet")]
    UnknownSymbol(char),
    #[error("transition from state {0} has no target")]
    MissingTarget(StateId),
}

/// Editing-time representation of an automaton. States are referenced by their [`StateId`], so
/// they can be renamed freely, and transitions are kept as a list in the order in which they were
/// entered. [`AutomatonDraft::finalize`] validates the draft and folds the transitions into a
/// [`TransitionTable`].
///
/// # Example
/// ```
/// use finite_automata::prelude::*;
///
/// let mut draft = AutomatonDraft::new("ends with a");
/// draft.set_alphabet(CharAlphabet::from("ab"));
/// let q0 = draft.add_state("q0");
/// let q1 = draft.add_state("");
/// draft.add_transition(q0, Some('a'), [q0, q1]);
/// draft.add_transition(q0, Some('b'), [q0]);
/// draft.set_initial(q0);
/// draft.set_final(q1, true);
///
/// assert_eq!(draft.validate(), Err(vec![ValidationError::BlankStateName(q1)]));
/// draft.rename_state(q1, "q1");
///
/// let aut = draft.finalize().unwrap();
/// assert!(aut.accepts_word("bba"));
/// assert!(!aut.accepts_word("ab"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AutomatonDraft {
    name: String,
    alphabet: CharAlphabet,
    states: Vec<DraftState>,
    transitions: Vec<DraftTransition>,
    initial: Option<StateId>,
    finals: math::OrderedSet<StateId>,
    next_id: u32,
}

impl AutomatonDraft {
    /// Creates an empty draft with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Reopens a finalized automaton for editing. States receive identifiers in their order and
    /// every entry of the transition table becomes one transition.
    pub fn from_automaton(aut: &Automaton) -> Self {
        let mut draft = Self::new(aut.name());
        draft.alphabet = aut.alphabet().clone();
        let ids: math::Map<&str, StateId> = aut
            .states()
            .map(|q| (q.as_str(), draft.add_state(q.clone())))
            .collect();

        for (state, symbol, next) in aut.transitions().entries() {
            if let Some(&from) = ids.get(state) {
                let to = next.iter().filter_map(|p| ids.get(p.as_str()).copied());
                draft.add_transition(from, symbol.as_char(), to);
            }
        }
        draft.initial = ids.get(aut.initial()).copied();
        draft.finals = aut
            .final_states()
            .iter()
            .filter_map(|q| ids.get(q.as_str()).copied())
            .collect();
        draft
    }

    /// The name of the automaton.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Changes the name of the automaton.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The alphabet.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// Replaces the alphabet. Transitions on symbols that are no longer part of it are reported
    /// by [`AutomatonDraft::validate`].
    pub fn set_alphabet(&mut self, alphabet: CharAlphabet) {
        self.alphabet = alphabet;
    }

    /// Adds a state with the given (possibly blank) name and returns its identifier.
    pub fn add_state(&mut self, name: impl Into<String>) -> StateId {
        let id = StateId(self.next_id);
        self.next_id += 1;
        self.states.push(DraftState {
            id,
            name: name.into(),
        });
        id
    }

    /// Returns the state with the given identifier.
    pub fn state(&self, id: StateId) -> Option<&DraftState> {
        self.states.iter().find(|q| q.id == id)
    }

    /// Iterates over all states in the order in which they were added.
    pub fn states(&self) -> impl Iterator<Item = &DraftState> + '_ {
        self.states.iter()
    }

    /// Changes the name of a state, returns false if it does not exist.
    pub fn rename_state(&mut self, id: StateId, name: impl Into<String>) -> bool {
        match self.states.iter_mut().find(|q| q.id == id) {
            Some(state) => {
                state.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Removes a state together with every reference to it. Transitions leaving it are removed,
    /// transitions into it lose it as a target and are removed if no target remains.
    pub fn remove_state(&mut self, id: StateId) -> Option<DraftState> {
        let position = self.states.iter().position(|q| q.id == id)?;
        let removed = self.states.remove(position);

        self.transitions.retain_mut(|t| {
            t.to.retain(|p| *p != id);
            t.from != id && !t.to.is_empty()
        });
        if self.initial == Some(id) {
            self.initial = None;
        }
        self.finals.remove(&id);
        Some(removed)
    }

    /// Adds a transition and returns its position in the list of transitions.
    pub fn add_transition<I>(&mut self, from: StateId, symbol: Option<char>, to: I) -> usize
    where
        I: IntoIterator<Item = StateId>,
    {
        self.transitions.push(DraftTransition {
            from,
            symbol,
            to: to.into_iter().collect(),
        });
        self.transitions.len() - 1
    }

    /// Removes the transition at the given position.
    pub fn remove_transition(&mut self, position: usize) -> Option<DraftTransition> {
        (position < self.transitions.len()).then(|| self.transitions.remove(position))
    }

    /// All transitions in the order in which they were added.
    pub fn transitions(&self) -> &[DraftTransition] {
        &self.transitions
    }

    /// Selects the initial state.
    pub fn set_initial(&mut self, id: StateId) {
        self.initial = Some(id);
    }

    /// Marks a state as final or not final.
    pub fn set_final(&mut self, id: StateId, is_final: bool) {
        if is_final {
            self.finals.insert(id);
        } else {
            self.finals.remove(&id);
        }
    }

    fn name_of(&self, id: StateId) -> Option<&str> {
        self.state(id).map(|q| q.name.as_str())
    }

    /// Collects every problem that prevents finalizing the draft.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = vec![];
        if self.name.trim().is_empty() {
            errors.push(ValidationError::BlankAutomatonName);
        }
        if self.alphabet.is_empty() {
            errors.push(ValidationError::EmptyAlphabet);
        }
        if self.states.is_empty() {
            errors.push(ValidationError::NoStates);
        }

        for state in &self.states {
            if state.name.trim().is_empty() {
                errors.push(ValidationError::BlankStateName(state.id));
            }
        }
        errors.extend(
            self.states
                .iter()
                .map(|q| q.name.as_str())
                .filter(|name| !name.trim().is_empty())
                .duplicates()
                .map(|name| ValidationError::DuplicateStateName(name.to_string())),
        );

        match self.initial {
            None => errors.push(ValidationError::MissingInitialState),
            Some(id) if self.state(id).is_none() => errors.push(ValidationError::UnknownState(id)),
            _ => {}
        }
        let referenced = self
            .finals
            .iter()
            .copied()
            .chain(
                self.transitions
                    .iter()
                    .flat_map(|t| std::iter::once(t.from).chain(t.to.iter().copied())),
            )
            .unique()
            .filter(|id| self.state(*id).is_none())
            .map(ValidationError::UnknownState);
        errors.extend(referenced);

        for t in &self.transitions {
            if let Some(sym) = t.symbol.filter(|sym| !self.alphabet.contains(*sym)) {
                errors.push(ValidationError::UnknownSymbol(sym));
            }
            if t.to.is_empty() {
                errors.push(ValidationError::MissingTarget(t.from));
            }
        }

        let errors = errors.into_iter().unique().collect_vec();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates the draft and turns it into an [`Automaton`], in which states are addressed by
    /// their names. All transitions from the same state on the same symbol are merged into one
    /// entry of the transition table.
    pub fn finalize(&self) -> Result<Automaton, Vec<ValidationError>> {
        self.validate()?;

        let name = |id: StateId| {
            self.name_of(id)
                .map(str::to_string)
                .ok_or(vec![ValidationError::UnknownState(id)])
        };

        let mut table = TransitionTable::new();
        for t in &self.transitions {
            let from = name(t.from)?;
            for p in &t.to {
                table.insert(from.clone(), t.symbol, name(*p)?);
            }
        }
        let initial = name(self.initial.ok_or(vec![ValidationError::MissingInitialState])?)?;
        let finals = self
            .finals
            .iter()
            .map(|id| name(*id))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "finalized {} with {} transitions into {} table entries",
            self.name,
            self.transitions.len(),
            table.len()
        );
        Ok(Automaton::new(
            self.name.clone(),
            self.alphabet.clone(),
            self.states.iter().map(|q| q.name.clone()),
            table,
            initial,
            finals,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::contains_ab;

    #[test]
    fn empty_draft_reports_everything() {
        let draft = AutomatonDraft::new(" ");
        assert_eq!(
            draft.validate(),
            Err(vec![
                ValidationError::BlankAutomatonName,
                ValidationError::EmptyAlphabet,
                ValidationError::NoStates,
                ValidationError::MissingInitialState,
            ])
        );
    }

    #[test]
    fn duplicate_names_and_symbols() {
        let mut draft = AutomatonDraft::new("dup");
        draft.set_alphabet(CharAlphabet::from("a"));
        let p = draft.add_state("q");
        let q = draft.add_state("q");
        draft.add_transition(p, Some('b'), [q]);
        draft.add_transition(p, Some('b'), [q]);
        draft.set_initial(p);
        assert_eq!(
            draft.validate(),
            Err(vec![
                ValidationError::DuplicateStateName("q".to_string()),
                ValidationError::UnknownSymbol('b'),
            ])
        );
        draft.rename_state(q, "r");
        draft.set_alphabet(CharAlphabet::from("ab"));
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn renaming_keeps_references() {
        let mut draft = AutomatonDraft::new("rename");
        draft.set_alphabet(CharAlphabet::binary());
        let a = draft.add_state("a");
        let b = draft.add_state("b");
        draft.add_transition(a, Some('1'), [b]);
        draft.set_initial(a);
        draft.set_final(b, true);
        draft.rename_state(b, "accept");
        let aut = draft.finalize().unwrap();
        assert_eq!(aut.successors("a", '1').show(), "{accept}");
        assert!(aut.is_final("accept"));
        assert!(aut.accepts_word("1"));
    }

    #[test]
    fn transitions_are_folded() {
        let mut draft = AutomatonDraft::new("fold");
        draft.set_alphabet(CharAlphabet::from("a"));
        let p = draft.add_state("p");
        let q = draft.add_state("q");
        let r = draft.add_state("r");
        draft.add_transition(p, Some('a'), [q]);
        draft.add_transition(p, Some('a'), [r, q]);
        draft.add_transition(p, None, [r]);
        draft.set_initial(p);
        let aut = draft.finalize().unwrap();
        assert_eq!(aut.transitions().len(), 2);
        assert_eq!(aut.successors("p", 'a').show(), "{q, r}");
        assert_eq!(aut.successors("p", None::<char>).show(), "{r}");
    }

    #[test]
    fn removing_states_cleans_references() {
        let mut draft = AutomatonDraft::new("remove");
        draft.set_alphabet(CharAlphabet::from("a"));
        let p = draft.add_state("p");
        let q = draft.add_state("q");
        let r = draft.add_state("r");
        draft.add_transition(p, Some('a'), [q, r]);
        draft.add_transition(q, Some('a'), [p]);
        draft.add_transition(p, None, [q]);
        draft.set_initial(q);
        draft.set_final(q, true);

        assert_eq!(draft.remove_state(q).map(|s| s.name().to_string()), Some("q".to_string()));
        assert_eq!(draft.remove_state(q), None);
        assert_eq!(draft.transitions().len(), 1);
        assert_eq!(draft.transitions()[0].to(), &[r]);
        assert_eq!(draft.validate(), Err(vec![ValidationError::MissingInitialState]));
        draft.set_initial(p);
        assert!(draft.finalize().unwrap().final_states().is_empty());
        assert_eq!(draft.remove_transition(3), None);
        assert!(draft.remove_transition(0).is_some());
    }

    #[test]
    fn unknown_references() {
        let mut other = AutomatonDraft::new("other");
        let ghost = other.add_state("ghost");
        let _ = other.add_state("ghost2");
        let ghost2 = other.add_state("ghost3");

        let mut draft = AutomatonDraft::new("unknown");
        draft.set_alphabet(CharAlphabet::from("a"));
        let p = draft.add_state("p");
        draft.set_initial(ghost2);
        draft.add_transition(p, Some('a'), []);
        draft.set_final(p, true);
        assert_eq!(ghost, p);
        assert_eq!(
            draft.validate(),
            Err(vec![
                ValidationError::UnknownState(ghost2),
                ValidationError::MissingTarget(p),
            ])
        );
    }

    #[test]
    fn reopening_roundtrips() {
        let aut = contains_ab();
        let draft = AutomatonDraft::from_automaton(&aut);
        assert_eq!(draft.states().count(), 3);
        assert_eq!(draft.transitions().len(), aut.transitions().len());
        assert_eq!(draft.finalize(), Ok(aut));
    }
}
