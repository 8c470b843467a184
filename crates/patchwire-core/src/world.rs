//! Entity registry and component tables.
//!
//! The [`World`] is the single store every system borrows: it hands out
//! [`Entity`] handles and owns one table per component type. Nothing is
//! global; systems receive `&World` or `&mut World` from the frame loop.
//!
//! Tables are ordered maps keyed by entity, so iteration runs in ascending
//! entity id. The wire engine relies on that for a deterministic intent order
//! within a tick.

use std::collections::{BTreeMap, BTreeSet};

use crate::adapter;
use crate::grab::GrabTarget;
use crate::port::{Connection, Port};
use crate::transform::{Region, Transform};
use crate::wire::{Wire, WirePhase};

/// Opaque handle identifying a row across the component tables.
///
/// Entities are assigned sequentially and never reused within a world, so a
/// stale handle simply stops resolving once its entity is despawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(pub(crate) u32);

impl Entity {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for Entity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Map from entity to component value.
pub type ComponentMap<C> = BTreeMap<Entity, C>;

/// Set of entities tagged with a marker component.
pub type EntitySet = BTreeSet<Entity>;

/// Owns every entity and component table for the lifetime of a session.
///
/// Tables are public: collaborators such as the pointer grabber write
/// [`grab_targets`](Self::grab_targets) directly, the same way the wire
/// engine does.
#[derive(Debug, Default)]
pub struct World {
    next_entity: u32,
    labels: BTreeMap<Entity, String>,
    /// Screen positions.
    pub transforms: ComponentMap<Transform>,
    /// Hit regions, centred on the entity's transform.
    pub regions: ComponentMap<Region>,
    /// Connection points.
    pub ports: ComponentMap<Port>,
    /// Wires, dragging or connected.
    pub wires: ComponentMap<Wire>,
    /// Entities that act as pointers (mouse cursor, touch points).
    pub pointers: EntitySet,
    /// Entities a pointer may grab, with their current grab state.
    pub grab_targets: ComponentMap<GrabTarget>,
    /// Edges of connected wires removed by [`despawn`](Self::despawn), waiting
    /// for the engine to disconnect them.
    unplugged: Vec<(Entity, Connection)>,
}

impl World {
    /// Creates an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new entity. The label is kept for diagnostics only.
    pub fn spawn(&mut self, label: impl Into<String>) -> Entity {
        let entity = Entity(self.next_entity);
        self.next_entity += 1;
        self.labels.insert(entity, label.into());
        entity
    }

    /// Removes an entity from every table that references it.
    ///
    /// Wires with an end at `entity` are despawned with it. The edge of each
    /// connected one is queued and disconnected by the next engine tick, since
    /// the world holds no audio graph.
    ///
    /// Returns `false` if the entity was never spawned or is already gone.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let stranded: Vec<Entity> = self
            .wires
            .iter()
            .filter(|(wire, ends)| **wire == entity || ends.touches(entity))
            .map(|(wire, _)| *wire)
            .collect();
        for wire in stranded {
            let connected = self.wire_phase(wire) == Some(WirePhase::Connected);
            let edge = self
                .wires
                .get(&wire)
                .filter(|_| connected)
                .and_then(|ends| adapter::resolve(self, ends).ok());
            if let Some(connection) = edge {
                self.unplugged.push((wire, connection));
            }
            self.wires.remove(&wire);
            if wire != entity {
                self.labels.remove(&wire);
                self.grab_targets.remove(&wire);
            }
        }

        let alive = self.labels.remove(&entity).is_some();
        self.transforms.remove(&entity);
        self.regions.remove(&entity);
        self.ports.remove(&entity);
        self.wires.remove(&entity);
        self.pointers.remove(&entity);
        self.grab_targets.remove(&entity);
        alive
    }

    /// Drains the edges queued by [`despawn`](Self::despawn).
    pub fn take_unplugged(&mut self) -> Vec<(Entity, Connection)> {
        std::mem::take(&mut self.unplugged)
    }

    /// Returns `true` while the entity has not been despawned.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.labels.contains_key(&entity)
    }

    /// Debug label given at spawn time.
    pub fn label(&self, entity: Entity) -> Option<&str> {
        self.labels.get(&entity).map(String::as_str)
    }

    /// Number of live entities.
    pub fn entity_count(&self) -> usize {
        self.labels.len()
    }

    /// Spawns a pointer entity at the given position.
    pub fn spawn_pointer(&mut self, label: impl Into<String>, x: f32, y: f32) -> Entity {
        let pointer = self.spawn(label);
        self.pointers.insert(pointer);
        self.transforms.insert(pointer, Transform::new(x, y));
        pointer
    }

    /// Spawns a grabbable port with a hit region at the given position.
    pub fn spawn_port(
        &mut self,
        label: impl Into<String>,
        port: Port,
        at: Transform,
        region: Region,
    ) -> Entity {
        let entity = self.spawn(label);
        self.ports.insert(entity, port);
        self.transforms.insert(entity, at);
        self.regions.insert(entity, region);
        self.grab_targets.insert(entity, GrabTarget::default());
        entity
    }

    /// Lifecycle phase of a wire, or `None` if the entity is not a wire.
    ///
    /// A wire with a port at both ends is connected; anything else is still
    /// following a pointer.
    pub fn wire_phase(&self, entity: Entity) -> Option<WirePhase> {
        let wire = self.wires.get(&entity)?;
        if self.ports.contains_key(&wire.source)
            && self.ports.contains_key(&wire.destination)
            && !self.pointers.contains(&wire.destination)
        {
            Some(WirePhase::Connected)
        } else {
            Some(WirePhase::Dragging)
        }
    }

    /// Wires currently in the [`WirePhase::Connected`] phase.
    pub fn connected_wires(&self) -> impl Iterator<Item = (Entity, &Wire)> + '_ {
        self.wires
            .iter()
            .filter(|(entity, _)| self.wire_phase(**entity) == Some(WirePhase::Connected))
            .map(|(entity, wire)| (*entity, wire))
    }

    /// First connected wire with an endpoint at `port`, in entity order.
    pub fn wire_at_port(&self, port: Entity) -> Option<(Entity, Wire)> {
        self.connected_wires()
            .find(|(_, wire)| wire.touches(port))
            .map(|(entity, wire)| (entity, *wire))
    }
}
