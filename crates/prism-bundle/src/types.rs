//! Core data types for path-bundle total coloring.
//!
//! A fiber is a small undirected simple graph `F`; its elements (vertices and
//! edges) are colored together by a [`FiberColoring`]. Consecutive fibers are
//! joined by `K_{n,n}`, whose edges are [`JoinEdge`]s.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Vertex ID type alias for clarity.
pub type VertexId = usize;

/// Color label. Colors are positive; `0` never appears in a valid coloring.
pub type Color = u32;

/// Undirected simple graph used as the fiber `F` of a path bundle.
///
/// Vertices are `0..n`. Neighbor lists are kept sorted and deduplicated so
/// that edge iteration is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiberGraph {
    /// Number of vertices in the graph
    pub num_vertices: usize,

    /// Number of edges in the graph
    pub num_edges: usize,

    /// Adjacency list representation: vertex -> sorted list of neighbors
    pub adjacency: Vec<Vec<VertexId>>,
}

impl FiberGraph {
    /// Creates a new edgeless graph with the specified number of vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self {
            num_vertices,
            num_edges: 0,
            adjacency: vec![Vec::new(); num_vertices],
        }
    }

    /// Builds a graph from an edge list. Invalid edges are skipped as in [`FiberGraph::add_edge`].
    pub fn from_edges(num_vertices: usize, edges: &[(VertexId, VertexId)]) -> Self {
        let mut graph = Self::new(num_vertices);
        for &(u, v) in edges {
            graph.add_edge(u, v);
        }
        graph
    }

    /// Path `P_n`: `0 - 1 - ... - (n-1)`.
    pub fn path(num_vertices: usize) -> Self {
        let edges: Vec<_> = (1..num_vertices).map(|v| (v - 1, v)).collect();
        Self::from_edges(num_vertices, &edges)
    }

    /// Cycle `C_n` (for `n >= 3`; smaller `n` degrades to a path).
    pub fn cycle(num_vertices: usize) -> Self {
        let mut graph = Self::path(num_vertices);
        if num_vertices >= 3 {
            graph.add_edge(num_vertices - 1, 0);
        }
        graph
    }

    /// Complete graph `K_n`.
    pub fn complete(num_vertices: usize) -> Self {
        let mut graph = Self::new(num_vertices);
        for u in 0..num_vertices {
            for v in (u + 1)..num_vertices {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    /// Adds an undirected edge between two vertices.
    ///
    /// Out-of-range endpoints, self-loops and duplicate edges are ignored.
    /// Returns `true` when the edge was inserted.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) -> bool {
        if u >= self.num_vertices || v >= self.num_vertices || u == v {
            return false;
        }
        match self.adjacency[u].binary_search(&v) {
            Ok(_) => false,
            Err(pos) => {
                self.adjacency[u].insert(pos, v);
                if let Err(pos) = self.adjacency[v].binary_search(&u) {
                    self.adjacency[v].insert(pos, u);
                }
                self.num_edges += 1;
                true
            }
        }
    }

    /// Number of vertices `n = |V(F)|`.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Number of edges `|E(F)|`.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Vertex ids in increasing order.
    pub fn vertices(&self) -> std::ops::Range<VertexId> {
        0..self.num_vertices
    }

    /// Edges as canonical `(u, v)` pairs with `u < v`, in lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    /// Neighbors of a vertex, sorted ascending.
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        &self.adjacency[vertex]
    }

    /// Returns the degree of a vertex.
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.adjacency[vertex].len()
    }

    /// Maximum vertex degree `Δ(F)`; `0` for an empty or edgeless graph.
    pub fn max_degree(&self) -> usize {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether `u` and `v` are adjacent.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        u < self.num_vertices && self.adjacency[u].binary_search(&v).is_ok()
    }
}

/// A colorable element of a fiber: a vertex or an (unordered) edge.
///
/// Edges always store their endpoints as a sorted pair; build them with
/// [`Element::edge`]. Ordering puts every vertex before every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Element {
    /// A vertex of the fiber
    Vertex(VertexId),
    /// An edge `{u, v}` stored as `(min, max)`
    Edge(VertexId, VertexId),
}

impl Element {
    /// Canonical edge element for the unordered pair `{u, v}`.
    pub fn edge(u: VertexId, v: VertexId) -> Self {
        if u <= v {
            Element::Edge(u, v)
        } else {
            Element::Edge(v, u)
        }
    }

    pub fn is_vertex(&self) -> bool {
        matches!(self, Element::Vertex(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Element::Edge(..))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Vertex(v) => write!(f, "{}", v),
            Element::Edge(u, v) => write!(f, "({}, {})", u, v),
        }
    }
}

/// Total coloring of one fiber: a color for every vertex and every edge.
///
/// Backed by an ordered map so iteration (and therefore everything derived
/// from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiberColoring {
    colors: BTreeMap<Element, Color>,
}

impl FiberColoring {
    /// Creates an empty coloring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `color` to `element`, returning the previous color if any.
    pub fn insert(&mut self, element: Element, color: Color) -> Option<Color> {
        let element = match element {
            Element::Edge(u, v) => Element::edge(u, v),
            vertex => vertex,
        };
        self.colors.insert(element, color)
    }

    /// Color of an element, if assigned.
    pub fn get(&self, element: &Element) -> Option<Color> {
        let element = match *element {
            Element::Edge(u, v) => Element::edge(u, v),
            vertex => vertex,
        };
        self.colors.get(&element).copied()
    }

    /// Color of vertex `v`, if assigned.
    pub fn vertex_color(&self, v: VertexId) -> Option<Color> {
        self.colors.get(&Element::Vertex(v)).copied()
    }

    /// Color of edge `{u, v}`, if assigned.
    pub fn edge_color(&self, u: VertexId, v: VertexId) -> Option<Color> {
        self.colors.get(&Element::edge(u, v)).copied()
    }

    /// Distinct colors used by the coloring, sorted ascending.
    pub fn color_set(&self) -> BTreeSet<Color> {
        self.colors.values().copied().collect()
    }

    /// Distinct colors assigned to vertex elements.
    pub fn vertex_colors(&self) -> BTreeSet<Color> {
        self.colors
            .iter()
            .filter(|(element, _)| element.is_vertex())
            .map(|(_, &color)| color)
            .collect()
    }

    /// Elements with their colors, vertices first, in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&Element, &Color)> {
        self.colors.iter()
    }

    /// Number of colored elements.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl FromIterator<(Element, Color)> for FiberColoring {
    fn from_iter<I: IntoIterator<Item = (Element, Color)>>(iter: I) -> Self {
        let mut coloring = Self::new();
        for (element, color) in iter {
            coloring.insert(element, color);
        }
        coloring
    }
}

impl Serialize for FiberColoring {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.colors.len()))?;
        for (element, color) in &self.colors {
            map.serialize_entry(&element.to_string(), color)?;
        }
        map.end()
    }
}

/// A vertex of the bundle: `(fiber index, vertex id within the fiber)`.
pub type BundleVertex = (usize, VertexId);

/// Edge of the `K_{n,n}` join between fiber `i-1` (upper) and fiber `i` (lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JoinEdge {
    /// Endpoint in fiber `i-1`
    pub upper: BundleVertex,
    /// Endpoint in fiber `i`
    pub lower: BundleVertex,
}

impl JoinEdge {
    /// Join edge `((from, u), (from + 1, v))` leaving fiber `from`.
    pub fn new(from: usize, u: VertexId, v: VertexId) -> Self {
        Self {
            upper: (from, u),
            lower: (from + 1, v),
        }
    }
}

impl fmt::Display for JoinEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(({}, {}), ({}, {}))",
            self.upper.0, self.upper.1, self.lower.0, self.lower.1
        )
    }
}

/// Colors of all join edges between one pair of consecutive fibers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinColoring {
    colors: BTreeMap<JoinEdge, Color>,
}

impl JoinColoring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, edge: JoinEdge, color: Color) -> Option<Color> {
        self.colors.insert(edge, color)
    }

    pub fn get(&self, edge: &JoinEdge) -> Option<Color> {
        self.colors.get(edge).copied()
    }

    /// Join edges with their colors in ascending edge order.
    pub fn iter(&self) -> impl Iterator<Item = (&JoinEdge, &Color)> {
        self.colors.iter()
    }

    /// Distinct colors used by this join, sorted ascending.
    pub fn color_set(&self) -> BTreeSet<Color> {
        self.colors.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Serialize for JoinColoring {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.colors.len()))?;
        for (edge, color) in &self.colors {
            map.serialize_entry(&edge.to_string(), color)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_ignores_invalid() {
        let mut graph = FiberGraph::new(3);
        assert!(graph.add_edge(0, 1));
        assert!(!graph.add_edge(1, 0)); // duplicate
        assert!(!graph.add_edge(2, 2)); // self-loop
        assert!(!graph.add_edge(0, 7)); // out of range
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0]);
    }

    #[test]
    fn test_edges_are_canonical_and_sorted() {
        let graph = FiberGraph::from_edges(4, &[(3, 2), (1, 0), (2, 0)]);
        let edges: Vec<_> = graph.edges().collect();
        assert_eq!(edges, vec![(0, 1), (0, 2), (2, 3)]);
    }

    #[test]
    fn test_degrees() {
        let graph = FiberGraph::complete(4);
        assert_eq!(graph.num_edges(), 6);
        assert_eq!(graph.max_degree(), 3);
        assert!(graph.vertices().all(|v| graph.degree(v) == 3));

        assert_eq!(FiberGraph::path(5).max_degree(), 2);
        assert_eq!(FiberGraph::path(1).max_degree(), 0);
        assert_eq!(FiberGraph::new(0).max_degree(), 0);
        assert_eq!(FiberGraph::cycle(5).num_edges(), 5);
    }

    #[test]
    fn test_edge_element_is_unordered() {
        assert_eq!(Element::edge(3, 1), Element::Edge(1, 3));
        assert_eq!(Element::edge(1, 3).to_string(), "(1, 3)");
        assert_eq!(Element::Vertex(4).to_string(), "4");
        assert!(Element::Vertex(9) < Element::edge(0, 1));
    }

    #[test]
    fn test_fiber_coloring_normalizes_edges() {
        let mut coloring = FiberColoring::new();
        coloring.insert(Element::Vertex(0), 1);
        coloring.insert(Element::Vertex(1), 2);
        coloring.insert(Element::Edge(1, 0), 3);

        assert_eq!(coloring.edge_color(0, 1), Some(3));
        assert_eq!(coloring.get(&Element::Edge(1, 0)), Some(3));
        assert_eq!(coloring.len(), 3);
        assert_eq!(coloring.vertex_colors().into_iter().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(coloring.color_set().into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_fiber_coloring_serializes_with_string_keys() {
        let coloring: FiberColoring = [
            (Element::Vertex(0), 1),
            (Element::Vertex(1), 2),
            (Element::edge(0, 1), 3),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_string(&coloring).unwrap();
        assert_eq!(json, r#"{"0":1,"1":2,"(0, 1)":3}"#);
    }

    #[test]
    fn test_join_edge_display() {
        let edge = JoinEdge::new(1, 0, 1);
        assert_eq!(edge.upper, (1, 0));
        assert_eq!(edge.lower, (2, 1));
        assert_eq!(edge.to_string(), "((1, 0), (2, 1))");

        let first = JoinEdge::new(0, 1, 0);
        assert_eq!(first.to_string(), "((0, 1), (1, 0))");
    }
}
