//! Wire lifecycle engine.
//!
//! [`WireEngine::tick`] runs once per frame, after the grabbing collaborator
//! has written press/release state. It works in two passes:
//!
//! 1. **Collect**: read the grab table and turn each transition into an
//!    [`Intent`]. Nothing is mutated.
//! 2. **Apply**: run the intents in entity order. Each one runs to completion
//!    (table edits, graph calls, spawns) before the next starts.
//!
//! # Transitions
//!
//! | Grab entry                         | Intent        | Effect |
//! |------------------------------------|---------------|--------|
//! | port, `grabbed` set                | `Pick`        | sever the connected wire at the port and re-drag its other end, or spawn a new wire |
//! | wire, `grabbed` unset              | `Drop`        | connect to the port under the pointer or discard |
//! | anything else                      | none          | |
//!
//! Before either pass, the tick disconnects the edges of connected wires that
//! [`World::despawn`] removed along with one of their ports.
//!
//! The engine clears a port's `grabbed` in the tick that sees it, and removes
//! a wire's grab entry when it drops, so a set field on a port always means
//! "just grabbed" and an unset field on a wire always means "just released".
//! Re-running a tick without new pointer events changes nothing.
//!
//! # Wire lifecycle
//!
//! ```text
//! None ──pick──▶ Dragging ──drop on compatible port──▶ Connected
//!                   │                                      │
//!                   └──drop elsewhere / fail──▶ Destroyed  │
//!                                                          │
//!     Dragging (from the other end) ◀──pick either plug────┘
//! ```

use crate::adapter::{self, Mode};
use crate::audio::AudioGraph;
use crate::error::WireError;
use crate::grab::GrabTarget;
use crate::pointer::HitTest;
use crate::port::Connection;
use crate::wire::Wire;
use crate::world::{Entity, World};

/// A transition found while scanning the grab table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Intent {
    /// A port was just grabbed by `pointer`.
    Pick { port: Entity, pointer: Entity },
    /// A dragging wire was just released.
    Drop { wire: Entity },
}

/// Why a dragged wire was destroyed on drop.
#[derive(Clone, Debug, PartialEq)]
pub enum DiscardReason {
    /// Released over empty space.
    NoTarget,
    /// Released over an entity that is not a port.
    NotAPort(Entity),
    /// Released back onto the port it was pulled from.
    OwnSource,
    /// Lookup or connection failed.
    Failed(WireError),
}

impl core::fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoTarget => write!(f, "no drop target"),
            Self::NotAPort(entity) => write!(f, "{entity} is not a port"),
            Self::OwnSource => write!(f, "dropped on its own source"),
            Self::Failed(err) => write!(f, "{err}"),
        }
    }
}

/// Something the engine did during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum WireEvent {
    /// A dragging wire was created at `source`, following `pointer`.
    Spawned {
        /// New wire entity.
        wire: Entity,
        /// Port the wire hangs from.
        source: Entity,
        /// Pointer dragging the free end.
        pointer: Entity,
    },
    /// A connected wire was picked up by one plug and removed.
    Severed {
        /// Removed wire entity.
        wire: Entity,
        /// Port that was grabbed.
        port: Entity,
        /// Edge that was disconnected, if the disconnect succeeded.
        connection: Option<Connection>,
    },
    /// A dropped wire formed a live edge.
    Connected {
        /// Wire entity, now in the connected phase.
        wire: Entity,
        /// Edge created in the audio graph.
        connection: Connection,
    },
    /// A connected wire lost a port to [`World::despawn`] and its edge was
    /// disconnected.
    Unplugged {
        /// Wire entity, already despawned.
        wire: Entity,
        /// Edge removed from the audio graph.
        connection: Connection,
    },
    /// A dropped wire was destroyed.
    Discarded {
        /// Destroyed wire entity.
        wire: Entity,
        /// What went wrong.
        reason: DiscardReason,
    },
}

/// Events produced by one [`WireEngine::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Events in the order they happened.
    pub events: Vec<WireEvent>,
}

impl TickReport {
    /// Returns `true` if the tick changed nothing.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Drives wire creation, severing and connection from grab-table transitions.
///
/// The engine holds no wire state of its own; everything lives in the
/// [`World`] it is handed each tick.
#[derive(Debug, Default)]
pub struct WireEngine {
    ticks: u64,
}

impl WireEngine {
    /// Creates an engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Runs one frame: collect intents from the grab table, then apply them.
    pub fn tick<H, G>(&mut self, world: &mut World, hit: &H, graph: &mut G) -> TickReport
    where
        H: HitTest + ?Sized,
        G: AudioGraph + ?Sized,
    {
        self.ticks += 1;
        let mut report = TickReport::default();
        Self::unplug(world, graph, &mut report);
        let intents = Self::collect(world);
        for intent in intents {
            match intent {
                Intent::Pick { port, pointer } => {
                    Self::pick(world, graph, port, pointer, &mut report);
                }
                Intent::Drop { wire } => Self::drop_wire(world, hit, graph, wire, &mut report),
            }
        }
        #[cfg(feature = "tracing")]
        if !report.is_empty() {
            tracing::debug!(tick = self.ticks, events = report.events.len(), "wire_tick");
        }
        report
    }

    /// Disconnects edges left behind by despawned ports.
    fn unplug<G: AudioGraph + ?Sized>(world: &mut World, graph: &mut G, report: &mut TickReport) {
        for (wire, connection) in world.take_unplugged() {
            match adapter::apply(graph, &connection, Mode::Disconnect) {
                Ok(()) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(%wire, "wire_unplug: {connection}");
                    report.events.push(WireEvent::Unplugged { wire, connection });
                }
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(%wire, error = %_err, "wire_unplug: disconnect failed");
                }
            }
        }
    }

    /// Read-only scan of the grab table.
    fn collect(world: &World) -> Vec<Intent> {
        world
            .grab_targets
            .iter()
            .filter_map(|(&entity, target)| match target.grabbed {
                Some(grab) if world.ports.contains_key(&entity) => Some(Intent::Pick {
                    port: entity,
                    pointer: grab.pointer,
                }),
                None if world.wires.contains_key(&entity) => Some(Intent::Drop { wire: entity }),
                _ => None,
            })
            .collect()
    }

    /// Grab on a port: sever the wire plugged there, or start a new one.
    fn pick<G: AudioGraph + ?Sized>(
        world: &mut World,
        graph: &mut G,
        port: Entity,
        pointer: Entity,
        report: &mut TickReport,
    ) {
        // The port stays a grab target; what the pointer drags is a wire.
        if let Some(target) = world.grab_targets.get_mut(&port) {
            target.grabbed = None;
        }

        let anchor = match world.wire_at_port(port) {
            Some((wire, endpoints)) => {
                let connection = Self::sever(world, graph, wire, &endpoints);
                report.events.push(WireEvent::Severed {
                    wire,
                    port,
                    connection,
                });
                endpoints
                    .other_end(port)
                    .filter(|end| world.ports.contains_key(end))
                    .unwrap_or(port)
            }
            None => port,
        };

        let wire = Self::spawn_dragging(world, anchor, pointer);
        #[cfg(feature = "tracing")]
        tracing::debug!(%wire, source = %anchor, %pointer, "wire_spawn");
        report.events.push(WireEvent::Spawned {
            wire,
            source: anchor,
            pointer,
        });
    }

    /// Disconnects and despawns a connected wire.
    fn sever<G: AudioGraph + ?Sized>(
        world: &mut World,
        graph: &mut G,
        wire: Entity,
        endpoints: &Wire,
    ) -> Option<Connection> {
        let connection = match adapter::connect_wire(world, graph, endpoints, Mode::Disconnect) {
            Ok(connection) => Some(connection),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(%wire, error = %_err, "wire_sever: disconnect failed");
                None
            }
        };
        // Drop the row first so despawn does not queue the edge a second time.
        world.wires.remove(&wire);
        world.despawn(wire);
        #[cfg(feature = "tracing")]
        tracing::debug!(%wire, "wire_sever");
        connection
    }

    /// New wire hanging from `source`, held by `pointer`.
    fn spawn_dragging(world: &mut World, source: Entity, pointer: Entity) -> Entity {
        let wire = world.spawn("wire");
        world.wires.insert(wire, Wire::new(source, pointer));
        world.grab_targets.insert(wire, GrabTarget::held_by(pointer));
        wire
    }

    /// Resolves a released wire against whatever lies under its free end.
    ///
    /// The wire's grab entry is removed whatever the outcome; the wire itself
    /// survives only if it connected.
    fn drop_wire<H, G>(
        world: &mut World,
        hit: &H,
        graph: &mut G,
        wire: Entity,
        report: &mut TickReport,
    ) where
        H: HitTest + ?Sized,
        G: AudioGraph + ?Sized,
    {
        world.grab_targets.remove(&wire);

        let outcome = Self::try_connect(world, hit, graph, wire);
        match outcome {
            Ok(connection) => {
                #[cfg(feature = "tracing")]
                tracing::info!(%wire, "wire_connect: {connection}");
                report.events.push(WireEvent::Connected { wire, connection });
            }
            Err(reason) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%wire, %reason, "wire_discard");
                world.despawn(wire);
                report.events.push(WireEvent::Discarded { wire, reason });
            }
        }
    }

    fn try_connect<H, G>(
        world: &mut World,
        hit: &H,
        graph: &mut G,
        wire: Entity,
    ) -> Result<Connection, DiscardReason>
    where
        H: HitTest + ?Sized,
        G: AudioGraph + ?Sized,
    {
        let endpoints = *world
            .wires
            .get(&wire)
            .ok_or(DiscardReason::Failed(WireError::MissingWire(wire)))?;
        let at = *world
            .transforms
            .get(&endpoints.destination)
            .ok_or(DiscardReason::Failed(WireError::MissingTransform(
                endpoints.destination,
            )))?;

        let target = hit.find_target(world, &at).ok_or(DiscardReason::NoTarget)?;
        if !world.ports.contains_key(&target) {
            return Err(DiscardReason::NotAPort(target));
        }
        if target == endpoints.source {
            return Err(DiscardReason::OwnSource);
        }

        let dropped = Wire::new(endpoints.source, target);
        let connection = adapter::connect_wire(world, graph, &dropped, Mode::Connect)
            .map_err(DiscardReason::Failed)?;
        world.wires.insert(wire, dropped);
        Ok(connection)
    }
}
