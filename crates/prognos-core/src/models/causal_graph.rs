//! Per-patient causal graph: node arena indexed by disease code plus an
//! ordered edge list. Serialized as `{nodes, edges, global_fit, modification_history}`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::disease::DiseaseCode;

/// Index into the node arena of one [`CausalGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: DiseaseCode,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Directed, weighted hypothesis that `from` leads to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausalEdge {
    pub from: DiseaseCode,
    pub to: DiseaseCode,
    /// Strength in [0, 1].
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit_score: Option<f64>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub clinician_added: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub clinician_reversed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl CausalEdge {
    /// New edge with its weight clamped into [0, 1].
    pub fn new(from: DiseaseCode, to: DiseaseCode, weight: f64) -> Self {
        Self {
            from,
            to,
            weight: clamp_weight(weight),
            fit_score: None,
            clinician_added: false,
            clinician_reversed: false,
            reason: None,
        }
    }

    /// Exact (directed) endpoint match.
    pub fn connects(&self, from: &DiseaseCode, to: &DiseaseCode) -> bool {
        &self.from == from && &self.to == to
    }

    /// Whether either endpoint is `code`.
    pub fn touches(&self, code: &DiseaseCode) -> bool {
        &self.from == code || &self.to == code
    }

    /// `"FROM -> TO"`, the label used in modification records.
    pub fn label(&self) -> String {
        format!("{} -> {}", self.from, self.to)
    }
}

/// Clamp a weight into [0, 1]. NaN becomes 0.
pub fn clamp_weight(weight: f64) -> f64 {
    if weight.is_nan() {
        0.0
    } else {
        weight.clamp(0.0, 1.0)
    }
}

/// One evidence-driven weight change made during refinement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationRecord {
    pub iteration: usize,
    pub edge: String,
    #[serde(default)]
    pub phrase: String,
    pub reason: String,
    pub old_weight: f64,
    pub new_weight: f64,
}

/// Wire shape of a graph. Older payloads may omit everything but the edges.
#[derive(Serialize, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    nodes: Vec<GraphNode>,
    #[serde(default)]
    edges: Vec<CausalEdge>,
    #[serde(default)]
    global_fit: f64,
    #[serde(default)]
    modification_history: Vec<ModificationRecord>,
}

/// Directed graph of disease hypotheses for one patient.
///
/// Every edge endpoint has a node. Self-loops are never generated, but cycles
/// across two or more nodes are allowed and only reported diagnostically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "GraphDocument", into = "GraphDocument")]
pub struct CausalGraph {
    nodes: Vec<GraphNode>,
    index: HashMap<DiseaseCode, NodeId>,
    edges: Vec<CausalEdge>,
    pub global_fit: f64,
    pub modification_history: Vec<ModificationRecord>,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the node for `code`, creating it if needed.
    pub fn ensure_node(&mut self, code: &DiseaseCode) -> NodeId {
        if let Some(id) = self.index.get(code) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(GraphNode { id: code.clone() });
        self.index.insert(code.clone(), id);
        id
    }

    pub fn node_id(&self, code: &DiseaseCode) -> Option<NodeId> {
        self.index.get(code).copied()
    }

    pub fn contains_node(&self, code: &DiseaseCode) -> bool {
        self.index.contains_key(code)
    }

    pub fn node(&self, id: NodeId) -> &DiseaseCode {
        &self.nodes[id.0].id
    }

    /// Node codes in insertion order.
    pub fn node_codes(&self) -> impl Iterator<Item = &DiseaseCode> {
        self.nodes.iter().map(|n| &n.id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[CausalEdge] {
        &self.edges
    }

    /// Mutable access to edge attributes. Endpoints changed through this
    /// slice must already be nodes of the graph.
    pub fn edges_mut(&mut self) -> &mut [CausalEdge] {
        &mut self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Append an edge, creating its endpoint nodes.
    pub fn push_edge(&mut self, edge: CausalEdge) {
        self.ensure_node(&edge.from);
        self.ensure_node(&edge.to);
        self.edges.push(edge);
    }

    /// Remove the first edge exactly matching `(from, to)`.
    pub fn remove_first_edge(&mut self, from: &DiseaseCode, to: &DiseaseCode) -> Option<CausalEdge> {
        let pos = self.edges.iter().position(|e| e.connects(from, to))?;
        Some(self.edges.remove(pos))
    }

    /// The first edge exactly matching `(from, to)`.
    pub fn find_edge_mut(&mut self, from: &DiseaseCode, to: &DiseaseCode) -> Option<&mut CausalEdge> {
        self.edges.iter_mut().find(|e| e.connects(from, to))
    }

    /// Largest weight among edges touching `code`.
    pub fn max_weight_touching(&self, code: &DiseaseCode) -> Option<f64> {
        self.edges
            .iter()
            .filter(|e| e.touches(code))
            .map(|e| e.weight)
            .fold(None, |acc, w| Some(acc.map_or(w, |m: f64| m.max(w))))
    }
}

impl From<GraphDocument> for CausalGraph {
    fn from(doc: GraphDocument) -> Self {
        let mut graph = CausalGraph {
            global_fit: doc.global_fit,
            modification_history: doc.modification_history,
            ..CausalGraph::default()
        };
        for node in &doc.nodes {
            graph.ensure_node(&node.id);
        }
        for mut edge in doc.edges {
            edge.weight = clamp_weight(edge.weight);
            graph.push_edge(edge);
        }
        graph
    }
}

impl From<CausalGraph> for GraphDocument {
    fn from(graph: CausalGraph) -> Self {
        GraphDocument {
            nodes: graph.nodes,
            edges: graph.edges,
            global_fit: graph.global_fit,
            modification_history: graph.modification_history,
        }
    }
}
