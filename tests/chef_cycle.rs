//! End-to-end runs of the reference chef configuration.

use brigade::chef::{ChefAction, ChefAgent, ChefConfig, ChefState, Observation};
use brigade::{Checkpoint, MachineObserver, StateTransition, Step, TracingObserver};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn orders(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn full_cycle() -> Vec<Observation> {
    vec![
        Observation::new("empty", "counter", orders(&["soup"])),
        Observation::new("empty", "at_onion_station", orders(&[])),
        Observation::new("onion", "at_onion_station", orders(&[])),
        Observation::new("soup", "pot", orders(&[])),
        Observation::new("empty", "serving_window", orders(&[])),
    ]
}

#[derive(Default)]
struct TransitionCounter {
    count: Arc<AtomicUsize>,
}

impl MachineObserver<ChefState> for TransitionCounter {
    fn on_transition(&self, _transition: &StateTransition<ChefState>) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn full_cycle_returns_to_idle_after_five_transitions() {
    let counter = TransitionCounter::default();
    let count = Arc::clone(&counter.count);
    let mut agent = ChefAgent::new(&ChefConfig::default())
        .unwrap()
        .with_observer(counter)
        .with_observer(TracingObserver);

    let mut actions = Vec::new();
    for obs in full_cycle() {
        let (action, step) = agent.step(&obs).unwrap();
        assert!(step.is_transition());
        actions.push(action);
    }

    assert_eq!(agent.state(), Some(ChefState::Idle));
    assert_eq!(count.load(Ordering::SeqCst), 5);
    assert_eq!(
        actions,
        vec![
            ChefAction::MoveToOnionStation,
            ChefAction::PickupOnion,
            ChefAction::MoveToPot,
            ChefAction::DeliverSoup,
            ChefAction::Wait,
        ]
    );

    let path: Vec<ChefState> = agent
        .machine()
        .history()
        .get_path()
        .into_iter()
        .copied()
        .collect();
    assert_eq!(path.first(), Some(&ChefState::Idle));
    assert_eq!(path.last(), Some(&ChefState::Idle));
    assert_eq!(&path[..5], ChefState::ALL);
}

#[test]
fn one_observation_advances_at_most_one_stage() {
    let mut agent = ChefAgent::new(&ChefConfig::default()).unwrap();

    // Satisfies IDLE's guard and, in principle, PREPARE_SOUP's.
    let busy = Observation::new("empty", "at_onion_station", orders(&["soup"]));
    agent.act(&busy).unwrap();
    assert_eq!(agent.state(), Some(ChefState::PrepareSoup));

    agent.act(&busy).unwrap();
    assert_eq!(agent.state(), Some(ChefState::PickingOnion));
}

#[test]
fn unmatched_observations_hold_position() {
    let mut agent = ChefAgent::new(&ChefConfig::default()).unwrap();
    agent
        .act(&Observation::new("empty", "counter", orders(&["soup"])))
        .unwrap();

    for _ in 0..3 {
        let (action, step) = agent
            .step(&Observation::new("soup", "counter", orders(&[])))
            .unwrap();
        assert_eq!(step, Step::Stayed);
        assert_eq!(action, ChefAction::MoveToOnionStation);
    }
    assert_eq!(agent.machine().ticks(), 4);
}

#[test]
fn json_config_renames_station() {
    let config = ChefConfig::from_json(r#"{ "onion_station": "onion_crate" }"#).unwrap();
    let mut agent = ChefAgent::new(&config).unwrap();

    agent
        .act(&Observation::new("empty", "counter", orders(&["soup"])))
        .unwrap();
    agent
        .act(&Observation::new("empty", "at_onion_station", orders(&[])))
        .unwrap();
    assert_eq!(agent.state(), Some(ChefState::PrepareSoup));

    agent
        .act(&Observation::new("empty", "onion_crate", orders(&[])))
        .unwrap();
    assert_eq!(agent.state(), Some(ChefState::PickingOnion));
}

#[test]
fn checkpoint_resumes_mid_cycle() {
    let mut agent = ChefAgent::new(&ChefConfig::default()).unwrap();
    let ticks = full_cycle();
    for obs in &ticks[..3] {
        agent.act(obs).unwrap();
    }
    assert_eq!(agent.state(), Some(ChefState::CookingSoup));

    let json = agent.machine().checkpoint().to_json().unwrap();
    let checkpoint: Checkpoint<ChefState> = Checkpoint::from_json(&json).unwrap();
    assert_eq!(checkpoint.metadata.transition_counts.len(), 3);

    let mut machine = brigade::chef::chef_machine(&ChefConfig::default()).unwrap();
    machine.restore(checkpoint).unwrap();
    for obs in &ticks[3..] {
        machine.update(obs).unwrap();
    }
    assert_eq!(machine.get_state(), Some(&ChefState::Idle));
    assert_eq!(machine.history().guarded_count(), 5);
}
