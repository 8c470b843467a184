//! In-memory audio graph: topology only, no signal processing.
//!
//! [`PatchGraph`] tracks which node outputs feed which node inputs or
//! parameters. It is the reference [`AudioGraph`] used by the session driver,
//! the CLI and the tests, and a stand-in for a real processing graph when the
//! editor runs headless.
//!
//! Node, parameter and edge slots are assigned sequentially and never reused,
//! so handles held by ports go stale instead of aliasing a newer node.

use crate::audio::{AudioGraph, Destination, GraphError, NodeId, NodeOutput, ParamId};

/// Bookkeeping for one node.
#[derive(Debug)]
struct NodeData {
    name: String,
    inputs: u32,
    outputs: u32,
}

/// Bookkeeping for one parameter.
#[derive(Debug)]
struct ParamData {
    node: NodeId,
    name: String,
}

/// A live edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    /// Emitting side.
    pub source: NodeOutput,
    /// Receiving side.
    pub destination: Destination,
}

/// Topology-only audio graph.
///
/// # Usage
///
/// 1. Add nodes with [`add_node()`](Self::add_node) and parameters with
///    [`add_param()`](Self::add_param)
/// 2. Connect through the [`AudioGraph`] trait
/// 3. Inspect with [`edges()`](Self::edges) / [`has_edge()`](Self::has_edge)
#[derive(Debug, Default)]
pub struct PatchGraph {
    nodes: Vec<Option<NodeData>>,
    params: Vec<Option<ParamData>>,
    edges: Vec<Option<Edge>>,
}

impl PatchGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node mutations ---

    /// Adds a node with the given number of input and output slots.
    pub fn add_node(&mut self, name: impl Into<String>, inputs: u32, outputs: u32) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let name = name.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(node = %id, name = %name, inputs, outputs, "graph_add: node");
        self.nodes.push(Some(NodeData {
            name,
            inputs,
            outputs,
        }));
        id
    }

    /// Adds a named parameter owned by `node`.
    pub fn add_param(&mut self, node: NodeId, name: impl Into<String>) -> Result<ParamId, GraphError> {
        self.get_node(node)?;
        let id = ParamId(self.params.len() as u32);
        self.params.push(Some(ParamData {
            node,
            name: name.into(),
        }));
        Ok(id)
    }

    /// Removes a node, its parameters and every edge touching either.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        self.get_node(id)?;

        let owned: Vec<ParamId> = self
            .params
            .iter()
            .enumerate()
            .filter(|(_, p)| p.as_ref().is_some_and(|p| p.node == id))
            .map(|(i, _)| ParamId(i as u32))
            .collect();

        for edge in &mut self.edges {
            let touches = edge.is_some_and(|e| {
                e.source.node == id
                    || match e.destination {
                        Destination::NodeInput { node, .. } => node == id,
                        Destination::Parameter(param) => owned.contains(&param),
                    }
            });
            if touches {
                *edge = None;
            }
        }
        for param in owned {
            self.params[param.0 as usize] = None;
        }
        self.nodes[id.0 as usize] = None;
        #[cfg(feature = "tracing")]
        tracing::debug!(node = %id, "graph_remove: node");
        Ok(())
    }

    // --- Queries ---

    /// Display name of a node.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.get_node(id).ok().map(|n| n.name.as_str())
    }

    /// Display name of a parameter.
    pub fn param_name(&self, id: ParamId) -> Option<&str> {
        self.get_param(id).ok().map(|p| p.name.as_str())
    }

    /// Owning node of a parameter.
    pub fn param_node(&self, id: ParamId) -> Option<NodeId> {
        self.get_param(id).ok().map(|p| p.node)
    }

    /// Returns the number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    /// Returns the number of live edges.
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// Live edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().flatten()
    }

    /// Returns `true` if the edge is live.
    pub fn has_edge(&self, source: NodeOutput, destination: Destination) -> bool {
        self.find_edge(source, destination).is_some()
    }

    /// Human-readable edge description, e.g. `osc:0 → vca.cv`.
    pub fn describe(&self, edge: &Edge) -> String {
        let source = self.node_name(edge.source.node).unwrap_or("?");
        match edge.destination {
            Destination::NodeInput { node, slot } => format!(
                "{source}:{} → {}:{slot}",
                edge.source.slot,
                self.node_name(node).unwrap_or("?")
            ),
            Destination::Parameter(param) => {
                let owner = self
                    .param_node(param)
                    .and_then(|n| self.node_name(n))
                    .unwrap_or("?");
                format!(
                    "{source}:{} → {owner}.{}",
                    edge.source.slot,
                    self.param_name(param).unwrap_or("?")
                )
            }
        }
    }

    // --- Internal helpers ---

    fn get_node(&self, id: NodeId) -> Result<&NodeData, GraphError> {
        self.nodes
            .get(id.0 as usize)
            .and_then(|n| n.as_ref())
            .ok_or(GraphError::NodeNotFound(id))
    }

    fn get_param(&self, id: ParamId) -> Result<&ParamData, GraphError> {
        self.params
            .get(id.0 as usize)
            .and_then(|p| p.as_ref())
            .ok_or(GraphError::ParamNotFound(id))
    }

    fn find_edge(&self, source: NodeOutput, destination: Destination) -> Option<usize> {
        self.edges.iter().position(|e| {
            e.is_some_and(|e| e.source == source && e.destination == destination)
        })
    }

    /// Validates that both endpoints exist and slots are in range.
    fn validate_endpoints(
        &self,
        source: NodeOutput,
        destination: Destination,
    ) -> Result<(), GraphError> {
        let from = self.get_node(source.node)?;
        if source.slot >= from.outputs {
            return Err(GraphError::OutputOutOfRange {
                node: source.node,
                slot: source.slot,
                count: from.outputs,
            });
        }
        match destination {
            Destination::NodeInput { node, slot } => {
                let to = self.get_node(node)?;
                if slot >= to.inputs {
                    return Err(GraphError::InputOutOfRange {
                        node,
                        slot,
                        count: to.inputs,
                    });
                }
            }
            Destination::Parameter(param) => {
                self.get_param(param)?;
            }
        }
        Ok(())
    }
}

impl AudioGraph for PatchGraph {
    fn connect(&mut self, source: NodeOutput, destination: Destination) -> Result<(), GraphError> {
        self.validate_endpoints(source, destination)?;
        if self.find_edge(source, destination).is_some() {
            return Err(GraphError::DuplicateEdge(source, destination));
        }
        self.edges.push(Some(Edge {
            source,
            destination,
        }));
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_connect: {source} → {destination}");
        Ok(())
    }

    fn disconnect(
        &mut self,
        source: NodeOutput,
        destination: Destination,
    ) -> Result<(), GraphError> {
        let idx = self
            .find_edge(source, destination)
            .ok_or(GraphError::EdgeNotFound(source, destination))?;
        self.edges[idx] = None;
        #[cfg(feature = "tracing")]
        tracing::debug!("graph_disconnect: {source} → {destination}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn out(node: NodeId, slot: u32) -> NodeOutput {
        NodeOutput { node, slot }
    }

    fn input(node: NodeId, slot: u32) -> Destination {
        Destination::NodeInput { node, slot }
    }

    #[test]
    fn test_add_nodes() {
        let mut graph = PatchGraph::new();
        let osc = graph.add_node("osc", 0, 1);
        let vca = graph.add_node("vca", 1, 1);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node_name(osc), Some("osc"));
        assert_eq!(graph.node_name(vca), Some("vca"));
    }

    #[test]
    fn test_connect_and_edge_count() {
        let mut graph = PatchGraph::new();
        let osc = graph.add_node("osc", 0, 1);
        let vca = graph.add_node("vca", 1, 1);
        graph.connect(out(osc, 0), input(vca, 0)).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!(graph.has_edge(out(osc, 0), input(vca, 0)));
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let mut graph = PatchGraph::new();
        let osc = graph.add_node("osc", 0, 1);
        let vca = graph.add_node("vca", 1, 1);
        graph.connect(out(osc, 0), input(vca, 0)).unwrap();
        let result = graph.connect(out(osc, 0), input(vca, 0));
        assert!(matches!(result, Err(GraphError::DuplicateEdge(_, _))));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_slot_ranges_checked() {
        let mut graph = PatchGraph::new();
        let osc = graph.add_node("osc", 0, 1);
        let vca = graph.add_node("vca", 1, 1);
        assert!(matches!(
            graph.connect(out(osc, 1), input(vca, 0)),
            Err(GraphError::OutputOutOfRange { slot: 1, count: 1, .. })
        ));
        assert!(matches!(
            graph.connect(out(osc, 0), input(vca, 2)),
            Err(GraphError::InputOutOfRange { slot: 2, count: 1, .. })
        ));
        assert!(matches!(
            graph.connect(out(vca, 0), input(osc, 0)),
            Err(GraphError::InputOutOfRange { count: 0, .. })
        ));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_connect_into_param() {
        let mut graph = PatchGraph::new();
        let lfo = graph.add_node("lfo", 0, 1);
        let filter = graph.add_node("filter", 1, 1);
        let cutoff = graph.add_param(filter, "cutoff").unwrap();
        graph
            .connect(out(lfo, 0), Destination::Parameter(cutoff))
            .unwrap();
        let edge = graph.edges().next().unwrap();
        assert_eq!(graph.describe(edge), "lfo:0 → filter.cutoff");
    }

    #[test]
    fn test_disconnect_missing_edge() {
        let mut graph = PatchGraph::new();
        let osc = graph.add_node("osc", 0, 1);
        let vca = graph.add_node("vca", 1, 1);
        assert!(matches!(
            graph.disconnect(out(osc, 0), input(vca, 0)),
            Err(GraphError::EdgeNotFound(_, _))
        ));
        graph.connect(out(osc, 0), input(vca, 0)).unwrap();
        graph.disconnect(out(osc, 0), input(vca, 0)).unwrap();
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_remove_node_drops_edges_and_params() {
        let mut graph = PatchGraph::new();
        let osc = graph.add_node("osc", 0, 1);
        let lfo = graph.add_node("lfo", 0, 1);
        let vca = graph.add_node("vca", 1, 1);
        let gain = graph.add_param(vca, "gain").unwrap();
        graph.connect(out(osc, 0), input(vca, 0)).unwrap();
        graph.connect(out(lfo, 0), Destination::Parameter(gain)).unwrap();
        assert_eq!(graph.edge_count(), 2);

        graph.remove_node(vca).unwrap();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
        assert!(graph.param_name(gain).is_none());
        assert!(matches!(
            graph.connect(out(lfo, 0), Destination::Parameter(gain)),
            Err(GraphError::ParamNotFound(_))
        ));
    }

    #[test]
    fn test_ids_not_reused() {
        let mut graph = PatchGraph::new();
        let a = graph.add_node("a", 1, 1);
        graph.remove_node(a).unwrap();
        let b = graph.add_node("b", 1, 1);
        assert_ne!(a, b);
        assert!(matches!(graph.remove_node(a), Err(GraphError::NodeNotFound(_))));
    }
}
