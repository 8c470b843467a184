//! Pointer collaborators: hit-testing and grabbing.
//!
//! The wire engine only consumes [`HitTest`] and the grab table. This module
//! supplies the reference implementations used by the session driver:
//! [`RegionHitTest`] resolves a screen position to the topmost entity, and
//! [`PointerGrabber`] writes `GrabTarget::grabbed` on press and clears it on
//! release, moving dragged entities in between.

use crate::grab::Grab;
use crate::transform::Transform;
use crate::world::{Entity, World};

/// Resolves a screen position to an entity.
pub trait HitTest {
    /// Topmost entity whose on-screen region contains `at`, if any.
    fn find_target(&self, world: &World, at: &Transform) -> Option<Entity>;
}

/// Hit tester over the [`Region`](crate::Region) table.
///
/// "Topmost" is the most recently spawned entity, matching draw order. Pointers
/// and entities without a transform are never hit.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegionHitTest;

impl RegionHitTest {
    /// Every entity under `at`, topmost first.
    pub fn hits<'w>(&self, world: &'w World, at: &Transform) -> impl Iterator<Item = Entity> + 'w {
        let at = *at;
        world
            .regions
            .iter()
            .rev()
            .filter(move |(entity, region)| {
                !world.pointers.contains(*entity)
                    && world
                        .transforms
                        .get(*entity)
                        .is_some_and(|center| region.contains(*center, at))
            })
            .map(|(entity, _)| *entity)
    }
}

impl HitTest for RegionHitTest {
    fn find_target(&self, world: &World, at: &Transform) -> Option<Entity> {
        self.hits(world, at).next()
    }
}

/// Reference grabbing collaborator.
///
/// Owns no state: every call reads and writes the world it is given.
#[derive(Clone, Copy, Debug, Default)]
pub struct PointerGrabber;

impl PointerGrabber {
    /// Grabs the topmost grab target under `pointer`.
    ///
    /// Only entities with a grab-table entry are candidates; anything drawn
    /// above them that is not grabbable is looked through. Returns the grabbed
    /// entity, or `None` if nothing grabbable is under the pointer.
    pub fn press(&self, world: &mut World, hit: &RegionHitTest, pointer: Entity) -> Option<Entity> {
        let at = *world.transforms.get(&pointer)?;
        let target = hit
            .hits(world, &at)
            .find(|entity| world.grab_targets.contains_key(entity))?;
        let offset = world
            .transforms
            .get(&target)
            .map_or((0.0, 0.0), |t| (t.x - at.x, t.y - at.y));
        let entry = world.grab_targets.get_mut(&target)?;
        entry.grabbed = Some(Grab {
            pointer,
            dx: offset.0,
            dy: offset.1,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(%pointer, %target, "pointer_press");
        Some(target)
    }

    /// Moves `pointer` and every entity it holds that has a transform.
    pub fn move_to(&self, world: &mut World, pointer: Entity, x: f32, y: f32) {
        let at = Transform::new(x, y);
        world.transforms.insert(pointer, at);
        for (entity, target) in &world.grab_targets {
            if let Some(grab) = target.grabbed
                && grab.pointer == pointer
                && let Some(transform) = world.transforms.get_mut(entity)
            {
                *transform = at.offset(grab.dx, grab.dy);
            }
        }
    }

    /// Clears `grabbed` on every entry held by `pointer`. Returns how many
    /// entries were released.
    pub fn release(&self, world: &mut World, pointer: Entity) -> usize {
        let mut released = 0;
        for target in world.grab_targets.values_mut() {
            if target.is_held_by(pointer) {
                target.grabbed = None;
                released += 1;
            }
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(%pointer, released, "pointer_release");
        released
    }
}
