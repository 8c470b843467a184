//! Port component and connection normalization.
//!
//! A [`Port`] is a connection point on a device. It may emit (an output slot),
//! receive (a [`Sink`]: input slot or parameter), or both. Two ports form a
//! [`Connection`] only after [`Connection::normalize`] has decided which side
//! is the source.

use crate::audio::{Destination, NodeId, NodeOutput, ParamId};

/// Receiving capability of a port.
///
/// A port receives either into a node input or into a parameter, never both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sink {
    /// Node input slot index.
    Input(u32),
    /// Parameter handle in the audio graph.
    Param(ParamId),
}

/// Directional role of a port, derived from its capabilities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortRole {
    /// Output only.
    Source,
    /// Input or parameter only.
    Sink,
    /// Both output and sink.
    Duplex,
    /// Neither; can never take part in a connection.
    Inert,
}

/// Connection point on a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Port {
    /// Owning audio-graph node (non-owning handle).
    pub node: NodeId,
    /// Output slot, when the port can act as a source.
    pub output: Option<u32>,
    /// Receiving side, when the port can act as a destination.
    pub sink: Option<Sink>,
}

impl Port {
    /// Output-only port.
    pub fn output(node: NodeId, slot: u32) -> Self {
        Self {
            node,
            output: Some(slot),
            sink: None,
        }
    }

    /// Input-only port.
    pub fn input(node: NodeId, slot: u32) -> Self {
        Self {
            node,
            output: None,
            sink: Some(Sink::Input(slot)),
        }
    }

    /// Parameter port: receives into `param` instead of a node input.
    pub fn param(node: NodeId, param: ParamId) -> Self {
        Self {
            node,
            output: None,
            sink: Some(Sink::Param(param)),
        }
    }

    /// Adds an output slot, making the port usable as a source too.
    pub fn with_output(mut self, slot: u32) -> Self {
        self.output = Some(slot);
        self
    }

    /// Role derived from which capabilities are set.
    pub fn role(&self) -> PortRole {
        match (self.output.is_some(), self.sink.is_some()) {
            (true, true) => PortRole::Duplex,
            (true, false) => PortRole::Source,
            (false, true) => PortRole::Sink,
            (false, false) => PortRole::Inert,
        }
    }

    fn node_output(&self) -> Option<NodeOutput> {
        self.output.map(|slot| NodeOutput {
            node: self.node,
            slot,
        })
    }

    fn destination(&self) -> Option<Destination> {
        self.sink.map(|sink| match sink {
            Sink::Input(slot) => Destination::NodeInput {
                node: self.node,
                slot,
            },
            Sink::Param(param) => Destination::Parameter(param),
        })
    }
}

/// A directed edge between two ports, ready to hand to the audio graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Emitting side.
    pub source: NodeOutput,
    /// Receiving side.
    pub destination: Destination,
}

impl Connection {
    /// Orders two ports into a source → destination edge.
    ///
    /// The first port is the source unless it has no output, in which case the
    /// two swap. The result is the same whichever end the user dragged from.
    /// Returns `None` when, after ordering, the source has no output or the
    /// destination has no sink.
    pub fn normalize(a: &Port, b: &Port) -> Option<Self> {
        let (source, destination) = if a.output.is_none() { (b, a) } else { (a, b) };
        Some(Self {
            source: source.node_output()?,
            destination: destination.destination()?,
        })
    }
}

impl core::fmt::Display for Connection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} → {}", self.source, self.destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N1: NodeId = NodeId(1);
    const N2: NodeId = NodeId(2);

    #[test]
    fn normalize_output_to_input() {
        let a = Port::output(N1, 0);
        let b = Port::input(N2, 3);
        let conn = Connection::normalize(&a, &b).unwrap();
        assert_eq!(conn.source, NodeOutput { node: N1, slot: 0 });
        assert_eq!(
            conn.destination,
            Destination::NodeInput { node: N2, slot: 3 }
        );
    }

    #[test]
    fn normalize_is_order_independent() {
        let a = Port::output(N1, 1);
        let b = Port::input(N2, 0);
        assert_eq!(Connection::normalize(&a, &b), Connection::normalize(&b, &a));
    }

    #[test]
    fn normalize_into_param() {
        let a = Port::output(N1, 0);
        let b = Port::param(N2, ParamId(4));
        let conn = Connection::normalize(&b, &a).unwrap();
        assert_eq!(conn.destination, Destination::Parameter(ParamId(4)));
    }

    #[test]
    fn output_to_output_fails() {
        let a = Port::output(N1, 0);
        let b = Port::output(N2, 0);
        assert!(Connection::normalize(&a, &b).is_none());
    }

    #[test]
    fn input_to_input_fails() {
        let a = Port::input(N1, 0);
        let b = Port::param(N2, ParamId(0));
        assert!(Connection::normalize(&a, &b).is_none());
    }

    #[test]
    fn duplex_source_keeps_first_as_source() {
        // A duplex port has an output, so it stays on the source side and the
        // output-only port must then receive, which it cannot.
        let duplex = Port::input(N1, 0).with_output(0);
        let out = Port::output(N2, 0);
        assert!(Connection::normalize(&duplex, &out).is_none());

        let conn = Connection::normalize(&out, &duplex).unwrap();
        assert_eq!(conn.source.node, N2);
    }

    #[test]
    fn roles() {
        assert_eq!(Port::output(N1, 0).role(), PortRole::Source);
        assert_eq!(Port::input(N1, 0).role(), PortRole::Sink);
        assert_eq!(Port::input(N1, 0).with_output(1).role(), PortRole::Duplex);
        let inert = Port {
            node: N1,
            output: None,
            sink: None,
        };
        assert_eq!(inert.role(), PortRole::Inert);
    }
}
