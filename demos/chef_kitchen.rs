//! Chef Kitchen
//!
//! Drives a rule-based chef through one soup order with scripted
//! observations, then prints a checkpoint of the machine.
//!
//! Key concepts:
//! - Chef states and guards come from `ChefConfig`, not from the engine
//! - Every tick feeds one `Observation` and yields one `ChefAction`
//! - Transitions are logged through `TracingObserver`
//!
//! Run with: RUST_LOG=info cargo run --example chef_kitchen [config.json]

use brigade::chef::{ChefAgent, ChefConfig, Observation};
use brigade::TracingObserver;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ChefConfig::from_path(path)?,
        None => ChefConfig::default(),
    };

    println!("=== Chef Kitchen ===\n");

    let mut agent = ChefAgent::new(&config)?.with_observer(TracingObserver);
    let soup = vec!["soup".to_string()];
    let script = [
        Observation::new(&config.empty_hand, "counter", Vec::new()),
        Observation::new(&config.empty_hand, "counter", soup.clone()),
        Observation::new(&config.empty_hand, "walkway", soup.clone()),
        Observation::new(&config.empty_hand, &config.onion_station, soup.clone()),
        Observation::new(&config.onion, &config.onion_station, soup.clone()),
        Observation::new(&config.soup, "pot", soup),
        Observation::new(&config.empty_hand, "serving_window", Vec::new()),
    ];

    for (tick, observation) in script.iter().enumerate() {
        let (action, step) = agent.step(observation)?;
        let state = agent.state().map(|s| s.to_string()).unwrap_or_default();
        println!(
            "tick {tick}: holding={:<6} location={:<18} -> {:<14} {}{}",
            observation.holding,
            observation.location,
            state,
            action,
            if step.is_transition() { "  (moved)" } else { "" }
        );
    }

    let checkpoint = agent.machine().checkpoint();
    println!(
        "\n{} transitions over {} ticks",
        checkpoint.history.len(),
        checkpoint.metadata.ticks
    );
    println!("{}", checkpoint.to_json()?);

    println!("\n=== Example Complete ===");
    Ok(())
}
