//! Connection adapter: wire endpoints to one audio-graph call.
//!
//! [`resolve`] looks up the two ports of a wire and orders them with
//! [`Connection::normalize`]. [`apply`] turns the result into exactly one
//! [`AudioGraph`] mutation. Connect and disconnect share the same path, so a
//! wire is always torn down along the edge it was built on.

use crate::audio::AudioGraph;
use crate::error::WireError;
use crate::port::Connection;
use crate::wire::Wire;
use crate::world::World;

/// Direction of an adapter call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Create the edge.
    Connect,
    /// Remove the edge.
    Disconnect,
}

/// Resolves both ends of `wire` to ports and normalizes them into an edge.
pub fn resolve(world: &World, wire: &Wire) -> Result<Connection, WireError> {
    let source = world
        .ports
        .get(&wire.source)
        .ok_or(WireError::MissingPort(wire.source))?;
    let destination = world
        .ports
        .get(&wire.destination)
        .ok_or(WireError::MissingPort(wire.destination))?;
    Connection::normalize(source, destination).ok_or(WireError::Incompatible {
        first: wire.source,
        second: wire.destination,
    })
}

/// Issues the single graph mutation for `connection`.
pub fn apply<G: AudioGraph + ?Sized>(
    graph: &mut G,
    connection: &Connection,
    mode: Mode,
) -> Result<(), WireError> {
    match mode {
        Mode::Connect => graph.connect(connection.source, connection.destination)?,
        Mode::Disconnect => graph.disconnect(connection.source, connection.destination)?,
    }
    Ok(())
}

/// Resolves `wire` and applies `mode` in one step, returning the edge used.
pub fn connect_wire<G: AudioGraph + ?Sized>(
    world: &World,
    graph: &mut G,
    wire: &Wire,
    mode: Mode,
) -> Result<Connection, WireError> {
    let connection = resolve(world, wire)?;
    apply(graph, &connection, mode)?;
    Ok(connection)
}
