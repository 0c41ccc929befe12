// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use crate::{earth_distance, Edge, Location, Node};

/// Represents a road network as a set of [Nodes](Node)
/// and [Edges](Edge) between them.
///
/// Nodes are kept in the order in which they were registered while building
/// the graph. A Graph is never modified after it has been built, and can be freely
/// shared between threads running independent searches.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Graph {
    vertices: Vec<(Node, Vec<Edge>)>,
    index: HashMap<i64, usize>,
}

impl Graph {
    /// Creates a graph from vertices in their registration order.
    /// Vertex ids must be unique.
    pub(crate) fn from_vertices(vertices: Vec<(Node, Vec<Edge>)>) -> Self {
        let index: HashMap<i64, usize> = vertices
            .iter()
            .enumerate()
            .map(|(idx, (node, _))| (node.id, idx))
            .collect();
        debug_assert_eq!(index.len(), vertices.len());
        Self { vertices, index }
    }

    /// Returns the number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if there are no nodes in the graph.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns an iterator over all [Nodes](Node) in the graph, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.vertices.iter().map(|(node, _)| node)
    }

    /// Checks if a [Node] with the provided id exists.
    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    /// Retrieves a [Node] with the provided id.
    pub fn get_node(&self, id: i64) -> Option<Node> {
        self.index.get(&id).map(|&idx| self.vertices[idx].0)
    }

    /// Finds the closest [Node] to the given position.
    ///
    /// This function requires computing the distance to every [Node] in the graph,
    /// and is not suitable for large graphs. If multiple nodes are equally close,
    /// the one registered first wins. Returns `None` for an empty graph.
    pub fn find_nearest_node(&self, position: Location) -> Option<Node> {
        self.iter()
            .map(|&nd| (earth_distance(position, nd.location()), nd))
            .min_by(|(a_dist, _), (b_dist, _)| a_dist.total_cmp(b_dist))
            .map(|(_, nd)| nd)
    }

    /// Gets all outgoing [Edges](Edge) from a node with a given id.
    pub fn get_edges(&self, from_id: i64) -> &[Edge] {
        self.index
            .get(&from_id)
            .map(|&idx| self.vertices[idx].1.as_slice())
            .unwrap_or_default()
    }

    /// Gets the speed limit of an [Edge] from one node to another,
    /// or `None` if such an edge doesn't exist.
    pub fn get_edge(&self, from_id: i64, to_id: i64) -> Option<f64> {
        self.get_edges(from_id)
            .iter()
            .find(|edge| edge.to == to_id)
            .map(|edge| edge.speed)
    }

    /// Returns the total number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(|(_, edges)| edges.len()).sum()
    }
}
