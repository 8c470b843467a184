//! Headless editing session.
//!
//! [`Patchbay`] bundles the world, the wire engine and the reference
//! collaborators behind one single-pointer API. It is what the CLI and the
//! integration tests drive; a GUI would wire the same pieces to its own input
//! and rendering instead.

use crate::audio::{NodeId, ParamId};
use crate::engine::{TickReport, WireEngine};
use crate::pointer::{PointerGrabber, RegionHitTest};
use crate::port::Port;
use crate::transform::{Region, Transform};
use crate::wire::WirePhase;
use crate::world::{Entity, World};
use crate::{GraphError, PatchGraph};

/// A device panel: its audio node plus the rectangle drawn for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Device {
    /// Node in the audio graph.
    pub node: NodeId,
    /// Panel entity (hit region only, not grabbable).
    pub panel: Entity,
}

/// Single-pointer editing session over a [`PatchGraph`].
#[derive(Debug)]
pub struct Patchbay {
    /// Entity and component tables.
    pub world: World,
    /// Audio graph the wires drive.
    pub graph: PatchGraph,
    engine: WireEngine,
    hit: RegionHitTest,
    grabber: PointerGrabber,
    pointer: Entity,
}

impl Default for Patchbay {
    fn default() -> Self {
        Self::new("pointer")
    }
}

impl Patchbay {
    /// Creates an empty session with one pointer at the origin.
    pub fn new(pointer_label: &str) -> Self {
        let mut world = World::new();
        let pointer = world.spawn_pointer(pointer_label, 0.0, 0.0);
        Self {
            world,
            graph: PatchGraph::new(),
            engine: WireEngine::new(),
            hit: RegionHitTest,
            grabber: PointerGrabber,
            pointer,
        }
    }

    /// The session's pointer entity.
    pub fn pointer(&self) -> Entity {
        self.pointer
    }

    /// Adds a device: an audio node and a rectangular panel centred at `at`.
    pub fn add_device(
        &mut self,
        name: &str,
        at: Transform,
        size: (f32, f32),
        inputs: u32,
        outputs: u32,
    ) -> Device {
        let node = self.graph.add_node(name, inputs, outputs);
        let panel = self.world.spawn(name);
        self.world.transforms.insert(panel, at);
        self.world.regions.insert(
            panel,
            Region::Rect {
                width: size.0,
                height: size.1,
            },
        );
        Device { node, panel }
    }

    /// Adds a named parameter to a device's node.
    pub fn add_param(&mut self, device: &Device, name: &str) -> Result<ParamId, GraphError> {
        self.graph.add_param(device.node, name)
    }

    /// Adds a circular, grabbable port. Spawn ports after their device so
    /// they sit on top of the panel.
    pub fn add_port(&mut self, label: &str, port: Port, at: Transform, radius: f32) -> Entity {
        self.world
            .spawn_port(label, port, at, Region::Circle { radius })
    }

    /// Removes a port and any wire plugged into it, then runs a frame so the
    /// graph edges of those wires are disconnected before returning.
    pub fn remove_port(&mut self, port: Entity) -> TickReport {
        self.world.despawn(port);
        self.tick()
    }

    // --- Pointer input ---

    /// Moves the pointer, dragging whatever it holds.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.grabber.move_to(&mut self.world, self.pointer, x, y);
    }

    /// Presses at the pointer's position. Returns the grabbed entity.
    pub fn press(&mut self) -> Option<Entity> {
        self.grabber.press(&mut self.world, &self.hit, self.pointer)
    }

    /// Releases everything the pointer holds.
    pub fn release(&mut self) -> usize {
        self.grabber.release(&mut self.world, self.pointer)
    }

    /// Runs one engine frame.
    pub fn tick(&mut self) -> TickReport {
        self.engine
            .tick(&mut self.world, &self.hit, &mut self.graph)
    }

    /// Press at a port's position, drag to `to`, release, ticking after each
    /// step. Returns the report of every tick in order.
    pub fn drag(&mut self, from: Entity, to: Transform) -> Vec<TickReport> {
        let mut reports = Vec::with_capacity(3);
        if let Some(at) = self.world.transforms.get(&from).copied() {
            self.move_to(at.x, at.y);
        }
        self.press();
        reports.push(self.tick());
        self.move_to(to.x, to.y);
        reports.push(self.tick());
        self.release();
        reports.push(self.tick());
        reports
    }

    // --- Queries ---

    /// Live edges, described with node and parameter names.
    pub fn connections(&self) -> Vec<String> {
        self.graph
            .edges()
            .map(|edge| self.graph.describe(edge))
            .collect()
    }

    /// Number of wires in the given phase.
    pub fn wire_count(&self, phase: WirePhase) -> usize {
        self.world
            .wires
            .keys()
            .filter(|wire| self.world.wire_phase(**wire) == Some(phase))
            .count()
    }

    /// Number of engine ticks run.
    pub fn ticks(&self) -> u64 {
        self.engine.ticks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WireEvent;

    #[test]
    fn drag_between_devices() {
        let mut bay = Patchbay::default();
        let osc = bay.add_device("osc", Transform::new(50.0, 50.0), (80.0, 80.0), 0, 1);
        let out = bay.add_port("osc.out", Port::output(osc.node, 0), Transform::new(80.0, 50.0), 6.0);
        let vca = bay.add_device("vca", Transform::new(250.0, 50.0), (80.0, 80.0), 1, 1);
        let inp = bay.add_port("vca.in", Port::input(vca.node, 0), Transform::new(220.0, 50.0), 6.0);

        let to = bay.world.transforms[&inp];
        let reports = bay.drag(out, to);
        assert!(matches!(reports[0].events[..], [WireEvent::Spawned { .. }]));
        assert!(reports[1].is_empty());
        assert!(matches!(reports[2].events[..], [WireEvent::Connected { .. }]));
        assert_eq!(bay.connections(), vec!["osc:0 → vca:0".to_string()]);
        assert_eq!(bay.wire_count(WirePhase::Connected), 1);
        assert_eq!(bay.ticks(), 3);
    }

    #[test]
    fn panels_are_not_grabbable() {
        let mut bay = Patchbay::default();
        bay.add_device("osc", Transform::new(50.0, 50.0), (80.0, 80.0), 0, 1);
        bay.move_to(50.0, 50.0);
        assert_eq!(bay.press(), None);
        assert!(bay.tick().is_empty());
    }
}
