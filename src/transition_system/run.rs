use itertools::Itertools;
use tracing::trace;

use crate::prelude::*;

/// One entry of a [`Run`], the set of states occupied after consuming `symbol`. For the first entry,
/// which represents the situation before any input is read, `symbol` is `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunStep {
    states: StateSet,
    symbol: Option<char>,
}

impl RunStep {
    /// The states occupied at this point of the run, already closed under epsilon transitions.
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    /// The symbol that was consumed to get here, `None` for the initial step.
    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }
}

/// The result of simulating an automaton on a finite word. It contains exactly one more step
/// than the word has symbols. Once no state is occupied anymore the run continues with empty
/// steps instead of stopping early.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    steps: Vec<RunStep>,
}

impl Run {
    /// All steps, beginning with the initial one.
    pub fn steps(&self) -> &[RunStep] {
        &self.steps
    }

    /// The number of steps, which is the length of the word plus one.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false, a run contains at least its initial step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The set of states that is occupied after the whole word was consumed.
    pub fn reached(&self) -> &StateSet {
        &self
            .steps
            .last()
            .expect("a run always contains its initial step")
            .states
    }

    /// Returns true if the run ended in the empty set of states.
    pub fn is_stuck(&self) -> bool {
        self.reached().is_empty()
    }

    /// The word that was consumed.
    pub fn word(&self) -> Vec<char> {
        self.steps.iter().filter_map(|step| step.symbol).collect()
    }
}

impl std::fmt::Display for Run {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.steps
                .iter()
                .map(|step| match step.symbol {
                    None => step.states.show(),
                    Some(sym) => format!("-{sym}-> {}", step.states.show()),
                })
                .join(" ")
        )
    }
}

/// Identifies a node of a [`RunTree`], it is the position of the node in the tree's arena.
pub type NodeId = usize;

/// A node of a [`RunTree`]: one state that was reached on one branch of the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunNode {
    id: NodeId,
    state: String,
    symbol: Option<char>,
    depth: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl RunNode {
    /// The identifier of the node.
    pub fn id(&self) -> NodeId {
        self.id
    }
    /// The state that this node represents.
    pub fn state(&self) -> &str {
        &self.state
    }
    /// The symbol that led to this node, `None` for roots.
    pub fn symbol(&self) -> Option<char> {
        self.symbol
    }
    /// The number of symbols consumed when this node is reached.
    pub fn depth(&self) -> usize {
        self.depth
    }
    /// The node from which this one was reached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
    /// The nodes reached from this one on the next symbol.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// The branching history of a simulation. There is one root per state in the epsilon closure of the
/// initial state, and the children of a node are the epsilon closure of its successors on the next
/// symbol of the word. Unlike in a [`Run`], equal states on different branches are separate nodes.
///
/// Nodes are stored in an arena and identified by their position, which is assigned in the order in
/// which the nodes are created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunTree {
    nodes: Vec<RunNode>,
    roots: Vec<NodeId>,
    length: usize,
}

impl RunTree {
    fn add_node(
        &mut self,
        state: String,
        symbol: Option<char>,
        depth: usize,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(RunNode {
            id,
            state,
            symbol,
            depth,
            parent,
            children: vec![],
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.push(id);
        }
        id
    }

    /// The roots, one per state of the initial epsilon closure.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Returns the node with the given identifier.
    pub fn node(&self, id: NodeId) -> Option<&RunNode> {
        self.nodes.get(id)
    }

    /// Iterates over all nodes in the order of their creation.
    pub fn nodes(&self) -> impl Iterator<Item = &RunNode> + '_ {
        self.nodes.iter()
    }

    /// The length of the word that was consumed.
    pub fn word_length(&self) -> usize {
        self.length
    }

    /// Iterates over all nodes that are reached after consuming `depth` symbols.
    pub fn nodes_at_depth(&self, depth: usize) -> impl Iterator<Item = &RunNode> + '_ {
        self.nodes.iter().filter(move |node| node.depth == depth)
    }

    /// Collapses the nodes at the given depth into a set of states. This coincides with the
    /// corresponding step of the [`Run`] on the same word.
    pub fn states_at_depth(&self, depth: usize) -> StateSet {
        self.nodes_at_depth(depth)
            .map(|node| node.state.clone())
            .collect()
    }

    /// Iterates over the nodes that are reached after consuming the whole word.
    pub fn leaves(&self) -> impl Iterator<Item = &RunNode> + '_ {
        self.nodes_at_depth(self.length)
    }

    /// Returns the states on the branch that ends in the given node, starting at the root.
    pub fn branch(&self, id: NodeId) -> Vec<&str> {
        let mut branch = vec![];
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            branch.push(node.state.as_str());
            current = node.parent.and_then(|parent| self.nodes.get(parent));
        }
        branch.reverse();
        branch
    }
}

impl Automaton {
    /// Simulates `self` on `word`. Starting from the epsilon closure of the initial state, every
    /// symbol moves all occupied states along their transitions and closes the result under
    /// epsilon transitions again.
    ///
    /// # Example
    /// ```
    /// use finite_automata::prelude::*;
    ///
    /// let aut = AutomatonBuilder::default()
    ///     .with_transitions([("q0", None, "q1"), ("q1", Some('a'), "q2")])
    ///     .with_final_states(["q2"])
    ///     .into_automaton("q0");
    /// let run = aut.compute_run("a".chars());
    /// assert_eq!(run.len(), 2);
    /// assert_eq!(run.reached().show(), "{q2}");
    /// assert!(aut.accepts(&run));
    /// ```
    pub fn compute_run<W>(&self, word: W) -> Run
    where
        W: IntoIterator<Item = char>,
    {
        let mut current = self.initial_closure();
        let mut steps = vec![RunStep {
            states: current.clone(),
            symbol: None,
        }];

        for sym in word {
            current = self.successor_set(&current, sym);
            trace!("read {sym}, now in {}", current.show());
            steps.push(RunStep {
                states: current.clone(),
                symbol: Some(sym),
            });
        }
        Run { steps }
    }

    /// Returns true if the last step of `run` contains a final state.
    pub fn accepts(&self, run: &Run) -> bool {
        self.contains_final(run.reached())
    }

    /// Simulates `self` on the characters of `word` and decides acceptance.
    pub fn accepts_word(&self, word: &str) -> bool {
        self.accepts(&self.compute_run(word.chars()))
    }

    /// Simulates `self` on `word` like [`Automaton::compute_run`], but keeps every branch apart.
    pub fn compute_run_tree<W>(&self, word: W) -> RunTree
    where
        W: IntoIterator<Item = char>,
    {
        let mut tree = RunTree {
            nodes: vec![],
            roots: vec![],
            length: 0,
        };

        let mut frontier = vec![];
        for q in self.initial_closure() {
            let id = tree.add_node(q, None, 0, None);
            tree.roots.push(id);
            frontier.push(id);
        }

        for (depth, sym) in word.into_iter().enumerate() {
            let mut next_frontier = vec![];
            for parent in frontier {
                let source = [tree.nodes[parent].state.clone()];
                for p in self.successor_set(&source, sym) {
                    next_frontier.push(tree.add_node(p, Some(sym), depth + 1, Some(parent)));
                }
            }
            trace!("run tree has {} nodes at depth {}", next_frontier.len(), depth + 1);
            frontier = next_frontier;
            tree.length = depth + 1;
        }
        tree
    }

    /// Returns true if some branch of `tree` that consumed the whole word ends in a final state.
    pub fn accepts_run_tree(&self, tree: &RunTree) -> bool {
        tree.leaves().any(|node| self.is_final(&node.state))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::{binary_contains_one, contains_ab, epsilon_chain};

    #[test]
    fn binary_runs() {
        let aut = binary_contains_one();
        let run = aut.compute_run("01".chars());
        assert_eq!(run.len(), 3);
        assert_eq!(run.reached().show(), "{q1}");
        assert!(aut.accepts(&run));
        assert_eq!(run.to_string(), "{q0} -0-> {q0} -1-> {q1}");
        assert_eq!(run.word(), vec!['0', '1']);

        let run = aut.compute_run("00".chars());
        assert!(!aut.accepts(&run));
        assert_eq!(run.reached().show(), "{q0}");
    }

    #[test]
    fn epsilon_run() {
        let aut = epsilon_chain();
        let run = aut.compute_run("a".chars());
        assert_eq!(run.steps()[0].states().show(), "{q0, q1}");
        assert_eq!(run.steps()[0].symbol(), None);
        assert_eq!(run.steps()[1].symbol(), Some('a'));
        assert!(aut.accepts(&run));
        assert!(!aut.accepts_word(""));
    }

    #[test]
    fn stuck_runs_keep_going() {
        let aut = epsilon_chain();
        let run = aut.compute_run("ba".chars());
        assert_eq!(run.len(), 3);
        assert!(run.is_stuck());
        assert!(run.steps()[1].states().is_empty());
        assert!(!aut.accepts(&run));
    }

    #[test]
    fn run_tree_keeps_branches_apart() {
        let aut = contains_ab();
        let tree = aut.compute_run_tree("aab".chars());
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.word_length(), 3);
        // s0 -a-> {s0, s1}, s0 -a-> {s0, s1} and s1 -a-> nothing, then b
        assert_eq!(tree.nodes_at_depth(1).count(), 2);
        assert_eq!(tree.nodes_at_depth(2).count(), 2);
        assert_eq!(tree.nodes_at_depth(3).count(), 2);
        assert!(aut.accepts_run_tree(&tree));

        let leaf = tree
            .leaves()
            .find(|node| node.state() == "s2")
            .map(|node| node.id())
            .unwrap();
        assert_eq!(tree.branch(leaf), vec!["s0", "s0", "s1", "s2"]);
        assert_eq!(tree.node(leaf).and_then(|n| n.symbol()), Some('b'));
    }

    #[test]
    fn run_tree_duplicates_states_on_different_branches() {
        let aut = AutomatonBuilder::default()
            .with_transitions([("p", 'a', "q"), ("p", 'a', "r"), ("q", 'a', "s"), ("r", 'a', "s")])
            .into_automaton("p");
        let tree = aut.compute_run_tree("aa".chars());
        assert_eq!(tree.nodes_at_depth(2).count(), 2);
        assert_eq!(tree.states_at_depth(2).show(), "{s}");
    }

    #[test]
    fn run_tree_has_one_root_per_closure_state() {
        let aut = epsilon_chain();
        let tree = aut.compute_run_tree("a".chars());
        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.states_at_depth(1).show(), "{q2}");
        let q1 = tree.roots()[1];
        assert_eq!(tree.node(q1).map(|n| n.children().len()), Some(1));
    }

    #[test]
    fn run_tree_matches_run() {
        let aut = contains_ab();
        for word in ["", "a", "ab", "ba", "aab", "baab", "bbb"] {
            let run = aut.compute_run(word.chars());
            let tree = aut.compute_run_tree(word.chars());
            for (depth, step) in run.steps().iter().enumerate() {
                assert_eq!(&tree.states_at_depth(depth), step.states());
            }
            assert_eq!(aut.accepts(&run), aut.accepts_run_tree(&tree));
        }
    }
}
