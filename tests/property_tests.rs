//! Property-based tests for the evaluation algorithm.
//!
//! These tests use proptest to check that guard selection and history
//! bookkeeping hold across many randomly generated machines and inputs.

use brigade::{State, StateMachine, Step, TransitionTrigger};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
enum Node {
    A,
    B,
    C,
    D,
}

impl State for Node {
    fn name(&self) -> &str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

const NODES: [Node; 4] = [Node::A, Node::B, Node::C, Node::D];

prop_compose! {
    fn arbitrary_node()(index in 0..4usize) -> Node {
        NODES[index]
    }
}

/// Edge `(from, to, threshold)`: fires when the observed value is >= threshold.
fn arbitrary_edges() -> impl Strategy<Value = Vec<(Node, Node, u8)>> {
    prop::collection::vec((arbitrary_node(), arbitrary_node(), 0..10u8), 0..12)
}

fn build(edges: &[(Node, Node, u8)]) -> StateMachine<Node, u8> {
    let mut machine = StateMachine::new();
    for node in NODES {
        machine.add_state(node);
    }
    for &(from, to, threshold) in edges {
        machine
            .add_transition(from, to, move |value: &u8| *value >= threshold)
            .unwrap();
    }
    machine
}

/// Expected target: the first distinct target (by first registration) whose
/// most recently registered threshold is satisfied.
fn expected_target(edges: &[(Node, Node, u8)], from: Node, value: u8) -> Option<Node> {
    let mut table: Vec<(Node, u8)> = Vec::new();
    for &(_, to, threshold) in edges.iter().filter(|(f, _, _)| *f == from) {
        match table.iter_mut().find(|(target, _)| *target == to) {
            Some(entry) => entry.1 = threshold,
            None => table.push((to, threshold)),
        }
    }
    table
        .into_iter()
        .find(|(_, threshold)| value >= *threshold)
        .map(|(target, _)| target)
}

proptest! {
    #[test]
    fn update_picks_first_registered_match(
        edges in arbitrary_edges(),
        start in arbitrary_node(),
        value in 0..10u8,
    ) {
        let mut machine = build(&edges);
        machine.set_state(start).unwrap();

        let step = machine.update(&value).unwrap();
        match expected_target(&edges, start, value) {
            Some(to) => {
                prop_assert_eq!(step, Step::Transitioned { from: start, to });
                prop_assert_eq!(machine.get_state(), Some(&to));
            }
            None => {
                prop_assert_eq!(step, Step::Stayed);
                prop_assert_eq!(machine.get_state(), Some(&start));
            }
        }
    }

    #[test]
    fn history_counts_exactly_the_transitions_taken(
        edges in arbitrary_edges(),
        start in arbitrary_node(),
        values in prop::collection::vec(0..10u8, 0..20),
    ) {
        let mut machine = build(&edges);
        machine.set_state(start).unwrap();

        let mut fired = 0;
        for value in &values {
            if machine.update(value).unwrap().is_transition() {
                fired += 1;
            }
        }

        prop_assert_eq!(machine.history().len(), fired);
        prop_assert_eq!(machine.history().guarded_count(), fired);
        prop_assert_eq!(machine.ticks(), values.len() as u64);
        prop_assert!(machine
            .history()
            .transitions()
            .iter()
            .all(|t| t.trigger == TransitionTrigger::Guard));
    }

    #[test]
    fn unset_machine_never_moves(
        edges in arbitrary_edges(),
        values in prop::collection::vec(0..10u8, 0..10),
    ) {
        let mut machine = build(&edges);
        for value in &values {
            prop_assert_eq!(machine.update(value).unwrap(), Step::Stayed);
        }
        prop_assert_eq!(machine.get_state(), None);
        prop_assert!(machine.history().is_empty());
    }

    #[test]
    fn re_adding_edges_never_duplicates_targets(edges in arbitrary_edges()) {
        let machine = build(&edges);
        for node in NODES {
            let targets = machine.transitions_from(&node);
            let mut names: Vec<&str> = targets.iter().map(|n| n.name()).collect();
            names.sort_unstable();
            names.dedup();
            prop_assert_eq!(names.len(), targets.len());
        }
    }

    #[test]
    fn path_follows_history(
        edges in arbitrary_edges(),
        start in arbitrary_node(),
        values in prop::collection::vec(0..10u8, 1..10),
    ) {
        let mut machine = build(&edges);
        machine.set_state(start).unwrap();
        let mut expected = vec![start];
        for value in &values {
            if let Step::Transitioned { to, .. } = machine.update(value).unwrap() {
                expected.push(to);
            }
        }

        let path: Vec<Node> = machine.history().get_path().into_iter().copied().collect();
        if expected.len() == 1 {
            prop_assert!(path.is_empty());
        } else {
            prop_assert_eq!(path, expected);
        }
    }
}
