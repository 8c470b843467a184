//! Wire component.

use crate::world::Entity;

/// Lifecycle phase of a wire entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WirePhase {
    /// Source is fixed; the destination follows a pointer.
    Dragging,
    /// Both ends sit on ports and the audio-graph edge is live.
    Connected,
}

/// The two endpoints of a wire.
///
/// While dragging, `destination` is the pointer entity. On drop it is
/// rewritten to a port or the wire is despawned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Wire {
    /// Port the wire was pulled from.
    pub source: Entity,
    /// Port the wire is plugged into, or the pointer dragging it.
    pub destination: Entity,
}

impl Wire {
    /// Creates a wire between two entities.
    pub fn new(source: Entity, destination: Entity) -> Self {
        Self {
            source,
            destination,
        }
    }

    /// Returns `true` if either end is `entity`.
    pub fn touches(&self, entity: Entity) -> bool {
        self.source == entity || self.destination == entity
    }

    /// The end opposite `entity`, if `entity` is one of the ends.
    pub fn other_end(&self, entity: Entity) -> Option<Entity> {
        if self.source == entity {
            Some(self.destination)
        } else if self.destination == entity {
            Some(self.source)
        } else {
            None
        }
    }
}
