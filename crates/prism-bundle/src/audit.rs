//! Conflict audit for fiber and bundle colorings.
//!
//! Conflicts are counted per offending pair and split into three disjoint
//! categories so callers can tell which part of a coloring is improper:
//!
//! - **fiber**: two incident elements of one fiber share a color
//! - **join**: two join edges of one `K_{n,n}` share an endpoint and a color,
//!   or a join edge matches an endpoint's vertex color
//! - **seam**: elements from different sets meet with equal colors, i.e.
//!   adjacent vertices of consecutive fibers, or edges from different sets
//!   (fiber edges, incoming join, outgoing join) at one bundle vertex
//!
//! Colored elements that the fiber graph does not have (a vertex id `>= n`,
//! a non-edge) are counted separately as **extraneous**, once per fiber.
//!
//! The constructor guarantees zero fiber and join conflicts for a proper
//! base coloring. Seam conflicts are reported but not guaranteed.

use crate::bundle::BundleColoring;
use crate::types::{Color, Element, FiberColoring, FiberGraph, JoinColoring};
use serde::Serialize;

/// Conflict counts of an audited coloring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Conflicts inside a single fiber
    pub fiber: usize,
    /// Conflicts inside a single join set
    pub join: usize,
    /// Conflicts between elements of different sets
    pub seam: usize,
    /// Fiber vertices or edges without a color
    pub uncolored: usize,
    /// Colored elements that are not vertices or edges of the fiber graph
    pub extraneous: usize,
}

impl AuditReport {
    /// Total conflict count (excluding uncolored elements).
    pub fn total_conflicts(&self) -> usize {
        self.fiber + self.join + self.seam
    }

    /// Exactly the graph's elements are colored and no conflict of any category.
    pub fn is_proper(&self) -> bool {
        self.total_conflicts() == 0 && self.uncolored == 0 && self.extraneous == 0
    }

    /// Fiber and join sets are proper and complete; seam conflicts are ignored.
    pub fn local_properness_holds(&self) -> bool {
        self.fiber == 0 && self.join == 0 && self.uncolored == 0 && self.extraneous == 0
    }
}

/// Audits a single fiber coloring against its graph.
///
/// Only `fiber`, `uncolored` and `extraneous` can be non-zero.
pub fn check_fiber_coloring(graph: &FiberGraph, coloring: &FiberColoring) -> AuditReport {
    let mut report = AuditReport::default();
    audit_fiber(graph, coloring, &mut report);
    report
}

/// Audits a complete bundle coloring built over `graph`.
pub fn audit(graph: &FiberGraph, bundle: &BundleColoring) -> AuditReport {
    let mut report = AuditReport::default();
    let n = graph.num_vertices();

    for fiber in bundle.fibers() {
        audit_fiber(graph, fiber, &mut report);
    }

    for (k, join) in bundle.joins().iter().enumerate() {
        let upper = &bundle.fibers()[k];
        let lower = &bundle.fibers()[k + 1];
        let (at_upper, at_lower) = incident_join_colors(join, n);

        report.join += at_upper.iter().map(|c| equal_pairs(c)).sum::<usize>();
        report.join += at_lower.iter().map(|c| equal_pairs(c)).sum::<usize>();

        for (edge, &color) in join.iter() {
            let upper_color = upper.vertex_color(edge.upper.1);
            let lower_color = lower.vertex_color(edge.lower.1);
            if upper_color == Some(color) {
                report.join += 1;
            }
            if lower_color == Some(color) {
                report.join += 1;
            }
            if upper_color.is_some() && upper_color == lower_color {
                report.seam += 1;
            }
        }
    }

    // Edges from different sets meeting at bundle vertex (i, u).
    let incident: Vec<_> = bundle
        .joins()
        .iter()
        .map(|join| incident_join_colors(join, n))
        .collect();
    for (i, fiber) in bundle.fibers().iter().enumerate() {
        for u in graph.vertices() {
            let own: Vec<Color> = graph
                .neighbors(u)
                .iter()
                .filter_map(|&v| fiber.edge_color(u, v))
                .collect();
            let incoming: &[Color] = match i.checked_sub(1).and_then(|k| incident.get(k)) {
                Some((_, at_lower)) => at_lower[u].as_slice(),
                None => &[],
            };
            let outgoing: &[Color] = match incident.get(i) {
                Some((at_upper, _)) => at_upper[u].as_slice(),
                None => &[],
            };

            let all: Vec<Color> = own
                .iter()
                .chain(incoming)
                .chain(outgoing)
                .copied()
                .collect();
            report.seam += equal_pairs(&all)
                - equal_pairs(&own)
                - equal_pairs(incoming)
                - equal_pairs(outgoing);
        }
    }

    report
}

fn audit_fiber(graph: &FiberGraph, coloring: &FiberColoring, report: &mut AuditReport) {
    for (element, _) in coloring.iter() {
        let present = match *element {
            Element::Vertex(v) => v < graph.num_vertices(),
            Element::Edge(u, v) => graph.has_edge(u, v),
        };
        if !present {
            report.extraneous += 1;
        }
    }

    for v in graph.vertices() {
        if coloring.vertex_color(v).is_none() {
            report.uncolored += 1;
        }
    }

    for (u, v) in graph.edges() {
        let cu = coloring.vertex_color(u);
        let cv = coloring.vertex_color(v);
        if cu.is_some() && cu == cv {
            report.fiber += 1;
        }
        match coloring.edge_color(u, v) {
            Some(ce) => {
                report.fiber += usize::from(cu == Some(ce)) + usize::from(cv == Some(ce));
            }
            None => report.uncolored += 1,
        }
    }

    for u in graph.vertices() {
        let colors: Vec<Color> = graph
            .neighbors(u)
            .iter()
            .filter_map(|&v| coloring.edge_color(u, v))
            .collect();
        report.fiber += equal_pairs(&colors);
    }
}

/// Join edge colors grouped by upper-fiber vertex and by lower-fiber vertex.
fn incident_join_colors(join: &JoinColoring, n: usize) -> (Vec<Vec<Color>>, Vec<Vec<Color>>) {
    let mut at_upper = vec![Vec::new(); n];
    let mut at_lower = vec![Vec::new(); n];
    for (edge, &color) in join.iter() {
        if let Some(colors) = at_upper.get_mut(edge.upper.1) {
            colors.push(color);
        }
        if let Some(colors) = at_lower.get_mut(edge.lower.1) {
            colors.push(color);
        }
    }
    (at_upper, at_lower)
}

/// Number of unordered pairs with equal colors.
fn equal_pairs(colors: &[Color]) -> usize {
    let mut sorted = colors.to_vec();
    sorted.sort_unstable();
    let mut pairs = 0;
    let mut run = 0;
    for window in sorted.windows(2) {
        if window[0] == window[1] {
            run += 1;
            pairs += run;
        } else {
            run = 0;
        }
    }
    pairs
}
