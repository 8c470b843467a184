//! Patchwire Core - wire lifecycle engine for visual patch editors
//!
//! This crate decides what happens when a user drags a cable between two
//! device ports: create a wire on grab, connect it on drop, pick an existing
//! plug up to sever it. It owns the entity-component model the decision runs
//! on and talks to the outside world through narrow traits.
//!
//! # Core Abstractions
//!
//! ## Data Model
//!
//! - [`World`] - Entity registry and component tables, passed explicitly to every system
//! - [`Entity`] - Opaque sequential handle; labels are diagnostics only
//! - [`Port`] / [`Sink`] - Connection point with optional output and input-or-parameter sink
//! - [`Wire`] - Source and destination endpoints (destination is a pointer while dragging)
//! - [`GrabTarget`] / [`Grab`] - Pointer attachment written by the grabbing collaborator
//! - [`Transform`] / [`Region`] - Screen position and hit area
//!
//! ## Engine
//!
//! - [`WireEngine`] - Per-frame state machine: collect intents, then apply
//! - [`Connection`] - Normalized source → destination edge, order-independent
//! - [`adapter`] - One connect/disconnect call per resolved wire
//!
//! ## Collaborators
//!
//! - [`AudioGraph`] - Connect/disconnect entry points of the audio graph
//! - [`HitTest`] - Screen position to topmost entity
//! - [`PatchGraph`], [`RegionHitTest`], [`PointerGrabber`] - Reference implementations
//! - [`Patchbay`] - Headless single-pointer session bundling all of the above
//!
//! # Example
//!
//! ```rust
//! use patchwire_core::{Patchbay, Port, Transform, WirePhase};
//!
//! let mut bay = Patchbay::default();
//! let osc = bay.add_device("osc", Transform::new(50.0, 50.0), (80.0, 80.0), 0, 1);
//! let out = bay.add_port("osc.out", Port::output(osc.node, 0), Transform::new(80.0, 50.0), 6.0);
//! let vca = bay.add_device("vca", Transform::new(250.0, 50.0), (80.0, 80.0), 1, 1);
//! let inp = bay.add_port("vca.in", Port::input(vca.node, 0), Transform::new(220.0, 50.0), 6.0);
//!
//! bay.drag(out, Transform::new(220.0, 50.0));
//! assert_eq!(bay.connections(), ["osc:0 → vca:0"]);
//! assert_eq!(bay.wire_count(WirePhase::Connected), 1);
//! # let _ = inp;
//! ```
//!
//! # Tracing
//!
//! Enable the `tracing` feature to get `debug`-level events for every spawn,
//! sever, connect and discard.

pub mod adapter;
pub mod audio;
pub mod engine;
pub mod error;
pub mod grab;
pub mod patch_graph;
pub mod pointer;
pub mod port;
pub mod session;
pub mod transform;
pub mod wire;
pub mod world;

pub use adapter::Mode;
pub use audio::{AudioGraph, Destination, GraphError, NodeId, NodeOutput, ParamId};
pub use engine::{DiscardReason, TickReport, WireEngine, WireEvent};
pub use error::WireError;
pub use grab::{Grab, GrabTarget};
pub use patch_graph::{Edge, PatchGraph};
pub use pointer::{HitTest, PointerGrabber, RegionHitTest};
pub use port::{Connection, Port, PortRole, Sink};
pub use session::{Device, Patchbay};
pub use transform::{Region, Transform};
pub use wire::{Wire, WirePhase};
pub use world::{ComponentMap, Entity, EntitySet, World};
