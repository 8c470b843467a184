//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use patchwire_config::{ConfigError, Rack, RackSession, find_rack};
use patchwire_core::{Connection, Edge, Entity, WireEvent};

/// Load a rack by name or path.
///
/// Searches the path first, then the user racks directory.
pub fn load_rack(name: &str) -> anyhow::Result<Rack> {
    let path = find_rack(name).ok_or_else(|| ConfigError::RackNotFound(name.to_string()))?;
    Rack::load(&path).with_context(|| format!("loading rack {}", path.display()))
}

/// Entity label, or its id once despawned.
fn name(session: &RackSession, entity: Entity) -> String {
    session
        .bay
        .world
        .label(entity)
        .map_or_else(|| entity.to_string(), str::to_string)
}

/// Connection described with node and parameter names.
pub fn describe_connection(session: &RackSession, connection: &Connection) -> String {
    session.bay.graph.describe(&Edge {
        source: connection.source,
        destination: connection.destination,
    })
}

/// One line per engine event.
pub fn describe_event(session: &RackSession, event: &WireEvent) -> String {
    match event {
        WireEvent::Spawned {
            wire,
            source,
            pointer,
        } => format!(
            "spawned {wire} from {} following {}",
            name(session, *source),
            name(session, *pointer)
        ),
        WireEvent::Severed {
            wire,
            port,
            connection,
        } => match connection {
            Some(c) => format!(
                "severed {wire} at {}: {}",
                name(session, *port),
                describe_connection(session, c)
            ),
            None => format!("severed {wire} at {}", name(session, *port)),
        },
        WireEvent::Connected { wire, connection } => format!(
            "connected {wire}: {}",
            describe_connection(session, connection)
        ),
        WireEvent::Unplugged { wire, connection } => format!(
            "unplugged {wire}: {}",
            describe_connection(session, connection)
        ),
        WireEvent::Discarded { wire, reason } => format!("discarded {wire}: {reason}"),
    }
}
