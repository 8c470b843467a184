//! Replay a gesture scenario against a rack.

use anyhow::Context;
use clap::Args;
use patchwire_config::{RackSession, Scenario, Settings};
use patchwire_core::WirePhase;
use std::path::PathBuf;

use super::common::{describe_event, load_rack};

#[derive(Args)]
pub struct ReplayArgs {
    /// Rack name or path
    rack: String,

    /// Scenario file
    scenario: PathBuf,

    /// Only print the final connections
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: ReplayArgs, settings: &Settings) -> anyhow::Result<()> {
    let rack = load_rack(&args.rack)?;
    let scenario = Scenario::load(&args.scenario)
        .with_context(|| format!("loading scenario {}", args.scenario.display()))?;
    let mut session = RackSession::from_rack(&rack, settings)
        .with_context(|| format!("building rack '{}'", rack.name))?;

    if !args.quiet {
        println!(
            "Rack: {} ({} devices, {} ports)",
            rack.name,
            rack.devices.len(),
            rack.port_count()
        );
        println!("Scenario: {} ({} steps)", scenario.name, scenario.steps.len());
        println!();
    }

    let outcomes = scenario
        .run(&mut session)
        .with_context(|| format!("replaying scenario '{}'", scenario.name))?;

    if !args.quiet {
        for outcome in &outcomes {
            println!("[{}] {}", outcome.index, outcome.step);
            for event in outcome.events() {
                println!("    {}", describe_event(&session, event));
            }
        }
        println!();
    }

    let connections = session.bay.connections();
    println!("Connections:");
    if connections.is_empty() {
        println!("  (none)");
    }
    for connection in &connections {
        println!("  {connection}");
    }

    let dragging = session.bay.wire_count(WirePhase::Dragging);
    if dragging > 0 {
        println!();
        println!("{dragging} wire(s) still held by the pointer");
    }

    tracing::info!(
        ticks = session.bay.ticks(),
        connections = connections.len(),
        "replay finished"
    );
    Ok(())
}
