//! Reference chef configuration.
//!
//! The chef loop is plain data fed to the generic engine: five states wired
//! into one directed cycle
//! `IDLE -> PREPARE_SOUP -> PICKING_ONION -> COOKING_SOUP -> DELIVER_SOUP -> IDLE`,
//! each edge guarded by predicates over an [`Observation`]. The tokens the
//! guards compare against come from [`ChefConfig`].

mod agent;
mod config;
mod observation;

pub use agent::{ChefAction, ChefAgent};
pub use config::{ChefConfig, ConfigError};
pub use observation::Observation;

use crate::machine::{Result, StateMachine};
use crate::predicates::{has_orders, is_at_location, is_holding_item};
use crate::state_enum;

state_enum! {
    /// States of the chef machine.
    pub enum ChefState {
        Idle => "IDLE",
        PrepareSoup => "PREPARE_SOUP",
        PickingOnion => "PICKING_ONION",
        CookingSoup => "COOKING_SOUP",
        DeliverSoup => "DELIVER_SOUP",
    }
}

/// Register the chef states and transitions on `machine`.
///
/// Does not enter any state.
pub fn configure(
    machine: &mut StateMachine<ChefState, Observation>,
    config: &ChefConfig,
) -> Result<()> {
    for state in ChefState::ALL {
        machine.add_state(*state);
    }

    machine.add_transition(ChefState::Idle, ChefState::PrepareSoup, |obs: &Observation| {
        has_orders(&obs.orders)
    })?;

    let empty = config.empty_hand.clone();
    let station = config.onion_station.clone();
    machine.add_transition(
        ChefState::PrepareSoup,
        ChefState::PickingOnion,
        move |obs: &Observation| {
            is_holding_item(&obs.holding, empty.as_str())
                && is_at_location(&obs.location, station.as_str())
        },
    )?;

    let onion = config.onion.clone();
    machine.add_transition(
        ChefState::PickingOnion,
        ChefState::CookingSoup,
        move |obs: &Observation| is_holding_item(&obs.holding, onion.as_str()),
    )?;

    let soup = config.soup.clone();
    machine.add_transition(
        ChefState::CookingSoup,
        ChefState::DeliverSoup,
        move |obs: &Observation| is_holding_item(&obs.holding, soup.as_str()),
    )?;

    let empty = config.empty_hand.clone();
    machine.add_transition(
        ChefState::DeliverSoup,
        ChefState::Idle,
        move |obs: &Observation| is_holding_item(&obs.holding, empty.as_str()),
    )?;

    tracing::debug!(
        states = ChefState::ALL.len(),
        "chef machine initialized with default states and transitions"
    );
    Ok(())
}

/// A fresh chef machine with no current state.
pub fn chef_machine(config: &ChefConfig) -> Result<StateMachine<ChefState, Observation>> {
    let mut machine = StateMachine::new();
    configure(&mut machine, config)?;
    Ok(machine)
}
