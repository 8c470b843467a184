//! Validate a rack file and list its ports.

use anyhow::Context;
use clap::Args;
use patchwire_config::{RackSession, Settings};
use patchwire_core::PortRole;

use super::common::load_rack;

#[derive(Args)]
pub struct CheckArgs {
    /// Rack name or path
    rack: String,

    /// List every port with its role
    #[arg(short, long)]
    verbose: bool,
}

pub fn run(args: CheckArgs, settings: &Settings) -> anyhow::Result<()> {
    let rack = load_rack(&args.rack)?;
    let session = RackSession::from_rack(&rack, settings)
        .with_context(|| format!("rack '{}' is invalid", rack.name))?;

    println!(
        "ok: rack '{}' ({} devices, {} ports)",
        rack.name,
        rack.devices.len(),
        rack.port_count()
    );

    if args.verbose {
        for name in session.port_names() {
            let Some(port) = session
                .port_entity(name)
                .and_then(|entity| session.bay.world.ports.get(&entity))
            else {
                continue;
            };
            let role = match port.role() {
                PortRole::Source => "source",
                PortRole::Sink => "sink",
                PortRole::Duplex => "source+sink",
                PortRole::Inert => "inert",
            };
            println!("  {name:24} {role}");
        }
    }
    Ok(())
}
