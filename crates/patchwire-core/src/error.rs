//! Error types for wire operations.
//!
//! None of these are fatal. The engine contains every failure to "the wire in
//! progress is discarded" and reports it through
//! [`WireEvent::Discarded`](crate::engine::WireEvent::Discarded).

use thiserror::Error;

use crate::audio::GraphError;
use crate::world::Entity;

/// Failure of a single wire operation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WireError {
    /// The two ends cannot form an output → input/param edge.
    #[error("incompatible endpoints {first} and {second}")]
    Incompatible {
        /// Wire source as stored on the wire.
        first: Entity,
        /// Wire destination as stored on the wire.
        second: Entity,
    },

    /// A referenced entity has no Port component (stale or not a port).
    #[error("{0} has no port")]
    MissingPort(Entity),

    /// A referenced entity has no Transform component.
    #[error("{0} has no transform")]
    MissingTransform(Entity),

    /// The entity is not (or no longer) a wire.
    #[error("{0} is not a wire")]
    MissingWire(Entity),

    /// The audio graph rejected the mutation.
    #[error("audio graph: {0}")]
    Graph(#[from] GraphError),
}
