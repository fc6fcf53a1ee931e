//! Chef agent: owns one machine and maps its state to an action.

use super::{chef_machine, ChefConfig, ChefState, Observation};
use crate::machine::{MachineError, MachineObserver, Result, StateMachine, Step};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete action a chef takes on a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChefAction {
    Wait,
    MoveToOnionStation,
    PickupOnion,
    MoveToPot,
    DeliverSoup,
}

impl ChefAction {
    /// Action taken while in `state`.
    pub fn for_state(state: ChefState) -> Self {
        match state {
            ChefState::Idle => Self::Wait,
            ChefState::PrepareSoup => Self::MoveToOnionStation,
            ChefState::PickingOnion => Self::PickupOnion,
            ChefState::CookingSoup => Self::MoveToPot,
            ChefState::DeliverSoup => Self::DeliverSoup,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::MoveToOnionStation => "move_to_onion_station",
            Self::PickupOnion => "pickup_onion",
            Self::MoveToPot => "move_to_pot",
            Self::DeliverSoup => "deliver_soup",
        }
    }
}

impl fmt::Display for ChefAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule-based chef driven by the reference chef machine.
///
/// # Example
///
/// ```rust
/// use brigade::chef::{ChefAction, ChefAgent, ChefConfig, ChefState, Observation};
///
/// let mut agent = ChefAgent::new(&ChefConfig::default()).unwrap();
/// assert_eq!(agent.state(), Some(ChefState::Idle));
///
/// let orders = vec!["soup".to_string()];
/// let action = agent.act(&Observation::new("empty", "counter", orders)).unwrap();
/// assert_eq!(action, ChefAction::MoveToOnionStation);
/// ```
#[derive(Debug)]
pub struct ChefAgent {
    fsm: StateMachine<ChefState, Observation>,
}

impl ChefAgent {
    /// Build the chef machine and place it in `IDLE`.
    pub fn new(config: &ChefConfig) -> Result<Self> {
        let mut agent = Self {
            fsm: chef_machine(config)?,
        };
        agent.reset()?;
        Ok(agent)
    }

    pub fn with_observer<T>(mut self, observer: T) -> Self
    where
        T: MachineObserver<ChefState> + 'static,
    {
        self.fsm.add_observer(observer);
        self
    }

    /// Return to `IDLE`, running exit/enter hooks.
    pub fn reset(&mut self) -> Result<()> {
        self.fsm.set_state(ChefState::Idle)
    }

    /// Feed one observation to the machine and pick the resulting action.
    pub fn act(&mut self, observation: &Observation) -> Result<ChefAction> {
        self.step(observation).map(|(action, _)| action)
    }

    /// Like [`act`](Self::act), also reporting whether the machine moved.
    pub fn step(&mut self, observation: &Observation) -> Result<(ChefAction, Step<ChefState>)> {
        let step = self.fsm.update(observation)?;
        let state = self.state().ok_or(MachineError::NotStarted)?;
        Ok((ChefAction::for_state(state), step))
    }

    pub fn state(&self) -> Option<ChefState> {
        self.fsm.get_state().copied()
    }

    pub fn machine(&self) -> &StateMachine<ChefState, Observation> {
        &self.fsm
    }
}
