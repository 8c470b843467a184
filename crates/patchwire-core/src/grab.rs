//! Pointer grab state.

use crate::world::Entity;

/// Attachment of an entity to a pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grab {
    /// Pointer holding the entity.
    pub pointer: Entity,
    /// Horizontal offset from the pointer to the entity.
    pub dx: f32,
    /// Vertical offset from the pointer to the entity.
    pub dy: f32,
}

impl Grab {
    /// Grab with no offset: the entity sits exactly under the pointer.
    pub fn at(pointer: Entity) -> Self {
        Self {
            pointer,
            dx: 0.0,
            dy: 0.0,
        }
    }
}

/// Grab-table entry. An entity with an entry can be grabbed; `grabbed` is set
/// while a pointer holds it.
///
/// The transition from set to unset is the release event. An entry that stays
/// unset carries no event.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrabTarget {
    /// Current holder, if any.
    pub grabbed: Option<Grab>,
}

impl GrabTarget {
    /// Entry already held by `pointer` with zero offset.
    pub fn held_by(pointer: Entity) -> Self {
        Self {
            grabbed: Some(Grab::at(pointer)),
        }
    }

    /// Returns `true` if `pointer` currently holds this entry.
    pub fn is_held_by(&self, pointer: Entity) -> bool {
        self.grabbed.is_some_and(|grab| grab.pointer == pointer)
    }
}
