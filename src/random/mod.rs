use crate::prelude::*;
use tracing::debug;

fn state_names(size: usize) -> Vec<String> {
    (0..size).map(|i| format!("q{i}")).collect()
}

/// Generates a random, possibly nondeterministic automaton with states `q0` to `q{size - 1}` over
/// the first `symbols` latin letters, where `q0` is initial. The algorithm is as follows:
/// 1. For every state `p`, symbol `a` and state `q`, add the transition `p -a-> q` with
///    probability `density`.
/// 2. For every pair of distinct states `p` and `q`, add the epsilon transition `p -> q` with
///    probability `epsilon_density`.
/// 3. Make every state final with probability `final_prob`.
///
/// Note that there may be unreachable states and states without any outgoing transition.
pub fn random_nfa(
    symbols: usize,
    size: usize,
    density: f64,
    epsilon_density: f64,
    final_prob: f64,
) -> Automaton {
    assert!(size > 0, "an automaton needs at least one state");
    let alphabet = CharAlphabet::of_size(symbols);
    let states = state_names(size);

    let mut transitions = vec![];
    for p in &states {
        for sym in alphabet.universe() {
            for q in &states {
                if fastrand::f64() < density {
                    transitions.push((p.clone(), Symbol::Char(sym), q.clone()));
                }
            }
        }
        for q in states.iter().filter(|q| *q != p) {
            if fastrand::f64() < epsilon_density {
                transitions.push((p.clone(), Symbol::Epsilon, q.clone()));
            }
        }
    }
    let finals = states
        .iter()
        .filter(|_| fastrand::f64() < final_prob)
        .cloned()
        .collect::<Vec<_>>();

    debug!(
        "drew random NFA with {size} states, {} transitions and {} final states",
        transitions.len(),
        finals.len()
    );
    AutomatonBuilder::default()
        .with_name("random NFA")
        .with_alphabet(&alphabet)
        .with_states(states)
        .with_transitions(transitions)
        .with_final_states(finals)
        .into_automaton("q0")
}

/// Generates a random complete deterministic automaton of size `size` by drawing, for every
/// state and each of the first `symbols` latin letters, a target state uniformly. Every state is
/// final with probability `final_prob` and `q0` is initial. Depending on the drawn transitions,
/// there may be unreachable states.
pub fn random_dfa(symbols: usize, size: usize, final_prob: f64) -> Automaton {
    assert!(size > 0, "an automaton needs at least one state");
    let alphabet = CharAlphabet::of_size(symbols);
    let states = state_names(size);

    let transitions = states
        .iter()
        .flat_map(|p| alphabet.universe().map(move |sym| (p.clone(), sym)))
        .map(|(p, sym)| (p, sym, format!("q{}", fastrand::usize(..size))))
        .collect::<Vec<_>>();
    let finals = states
        .iter()
        .filter(|_| fastrand::f64() < final_prob)
        .cloned()
        .collect::<Vec<_>>();

    AutomatonBuilder::default()
        .with_name("random DFA")
        .with_alphabet(&alphabet)
        .with_states(states)
        .with_transitions(transitions)
        .with_final_states(finals)
        .into_automaton("q0")
}

/// Generate a random `String` over the universe of the `alphabet`.
/// The length of the `String` is drawn uniformly from the range `min_len..=max_len`.
pub fn random_word(alphabet: &CharAlphabet, min_len: usize, max_len: usize) -> String {
    assert!(!alphabet.is_empty() || min_len == 0);
    let length = fastrand::usize(min_len..=max_len);
    (0..length)
        .map(|_| alphabet[fastrand::usize(..alphabet.size())])
        .collect()
}
