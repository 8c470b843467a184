//! Audio-graph collaborator interface.
//!
//! The wire engine never owns signal processing. It addresses the external
//! graph through [`AudioGraph`], using plain handles: a [`NodeOutput`] for the
//! source side and a [`Destination`] for the receiving side. A destination is
//! either a node input slot or a parameter, matched on the tag rather than on
//! optional-field presence.

use thiserror::Error;

/// Handle of a node in the audio graph.
///
/// Ports hold this as a non-owning reference; the graph decides whether it
/// still resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Creates a handle from a raw identifier issued by an external graph.
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Handle of a modulatable parameter in the audio graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamId(pub(crate) u32);

impl ParamId {
    /// Creates a handle from a raw identifier issued by an external graph.
    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl core::fmt::Display for ParamId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ParamId({})", self.0)
    }
}

/// Source side of an edge: an output slot on a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeOutput {
    /// Emitting node.
    pub node: NodeId,
    /// Output slot index on that node.
    pub slot: u32,
}

/// Receiving side of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Destination {
    /// An input slot on a node.
    NodeInput {
        /// Receiving node.
        node: NodeId,
        /// Input slot index on that node.
        slot: u32,
    },
    /// A parameter driven at audio rate by the source.
    Parameter(ParamId),
}

impl core::fmt::Display for NodeOutput {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}:{}", self.node, self.slot)
    }
}

impl core::fmt::Display for Destination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NodeInput { node, slot } => write!(f, "{node}:{slot}"),
            Self::Parameter(param) => write!(f, "{param}"),
        }
    }
}

/// Errors an audio graph may report for a mutation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The node does not exist (or was removed).
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    /// The parameter does not exist (or its node was removed).
    #[error("parameter {0} not found")]
    ParamNotFound(ParamId),
    /// The output slot is beyond the node's output count.
    #[error("output slot {slot} out of range for {node} ({count} outputs)")]
    OutputOutOfRange {
        /// Node addressed.
        node: NodeId,
        /// Requested slot.
        slot: u32,
        /// Outputs the node has.
        count: u32,
    },
    /// The input slot is beyond the node's input count.
    #[error("input slot {slot} out of range for {node} ({count} inputs)")]
    InputOutOfRange {
        /// Node addressed.
        node: NodeId,
        /// Requested slot.
        slot: u32,
        /// Inputs the node has.
        count: u32,
    },
    /// The same edge is already live.
    #[error("edge {0} → {1} already exists")]
    DuplicateEdge(NodeOutput, Destination),
    /// Disconnect was asked for an edge that is not live.
    #[error("edge {0} → {1} not found")]
    EdgeNotFound(NodeOutput, Destination),
}

/// Mutation entry points of the external audio graph.
///
/// Implementations decide their own idempotency; the wire engine performs no
/// double-connect guard and treats any error as a failed connection.
pub trait AudioGraph {
    /// Creates an edge from `source` into `destination`.
    fn connect(&mut self, source: NodeOutput, destination: Destination) -> Result<(), GraphError>;

    /// Removes the edge from `source` into `destination`.
    fn disconnect(&mut self, source: NodeOutput, destination: Destination)
    -> Result<(), GraphError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_display() {
        let input = Destination::NodeInput {
            node: NodeId(2),
            slot: 1,
        };
        assert_eq!(input.to_string(), "NodeId(2):1");
        assert_eq!(Destination::Parameter(ParamId(7)).to_string(), "ParamId(7)");
    }

    #[test]
    fn graph_error_display() {
        let err = GraphError::DuplicateEdge(
            NodeOutput {
                node: NodeId(0),
                slot: 0,
            },
            Destination::NodeInput {
                node: NodeId(1),
                slot: 0,
            },
        );
        assert_eq!(err.to_string(), "edge NodeId(0):0 → NodeId(1):0 already exists");
    }
}
