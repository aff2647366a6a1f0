use std::collections::BTreeSet;

use itertools::Itertools;
use tracing::trace;

use crate::{
    math::{self, Partition},
    prelude::*,
};

/// Computes the coarsest partition of the states of the deterministic automaton `aut` in which
/// states of the same class agree on finality and, for every symbol, have successors in the same
/// class. This is done by Moore's algorithm: starting from the split into final and non-final
/// states, every class is split according to the classes of the successors of its members until
/// the partition does not change anymore.
///
/// Missing transitions lead into an implicit rejecting sink, which takes part in the refinement
/// like any other state but is dropped from the returned partition. States that can never accept
/// end up in the class of the sink.
///
/// Every round either leaves the partition as it is or increases the number of classes, which is
/// bounded by the number of states, so the refinement terminates.
pub(crate) fn refine(aut: &Automaton) -> Partition<String> {
    let names = aut.states().collect_vec();
    let sink = names.len();

    let successors = names
        .iter()
        .map(|q| {
            aut.alphabet()
                .universe()
                .map(|sym| {
                    aut.successors(q, sym)
                        .iter()
                        .next()
                        .and_then(|p| aut.state_index(p))
                        .unwrap_or(sink)
                })
                .collect_vec()
        })
        .chain(std::iter::once(vec![sink; aut.alphabet().size()]))
        .collect_vec();

    let (accepting, rejecting): (Vec<usize>, Vec<usize>) =
        (0..=sink).partition(|&q| q != sink && aut.is_final(names[q]));
    let mut partition = Partition::new([accepting, rejecting]);

    let mut round = 0;
    loop {
        round += 1;
        let mut class_of = vec![0; sink + 1];
        for (id, class) in partition.iter().enumerate() {
            for &q in class {
                class_of[q] = id;
            }
        }

        let mut refined = vec![];
        for class in partition.iter() {
            if class.len() == 1 {
                refined.push(class.clone());
                continue;
            }
            let mut split: math::IndexedMap<Vec<usize>, BTreeSet<usize>> =
                math::IndexedMap::default();
            for &q in class {
                let signature = successors[q].iter().map(|&p| class_of[p]).collect_vec();
                split.entry(signature).or_default().insert(q);
            }
            refined.extend(split.into_values());
        }

        let refined = Partition::from(refined);
        trace!(
            "refinement round {round} produced {} classes from {}",
            refined.size(),
            partition.size()
        );
        if refined.size() == partition.size() {
            break;
        }
        partition = refined;
    }

    Partition::new(partition.into_iter().map(|class| {
        class
            .into_iter()
            .filter(|&q| q != sink)
            .map(|q| names[q].clone())
            .collect_vec()
    }))
}

#[cfg(test)]
mod tests {
    use super::refine;
    use crate::{math::Partition, prelude::*};

    #[test_log::test]
    fn refinement_of_wiki_dfa() {
        let partition = refine(&crate::tests::wiki_dfa());
        let expected = Partition::new([
            vec!["a".to_string(), "b".to_string()],
            vec!["c".to_string(), "d".to_string(), "e".to_string()],
            vec!["f".to_string()],
        ]);
        assert_eq!(partition, expected);
    }

    #[test]
    fn missing_transitions_lead_into_the_sink() {
        let aut = AutomatonBuilder::default()
            .with_transitions([("p", 'a', "q"), ("q", 'a', "q"), ("r", 'b', "q")])
            .into_automaton("p");
        assert_eq!(refine(&aut).size(), 1);

        let aut = AutomatonBuilder::default()
            .with_transitions([("p", 'a', "q"), ("q", 'a', "q"), ("r", 'b', "q")])
            .with_final_states(["q"])
            .into_automaton("p");
        let partition = refine(&aut);
        assert_eq!(partition.size(), 3);
        assert_ne!(partition.class_of(&"p".to_string()), partition.class_of(&"r".to_string()));
    }
}
