//! Determinism Acceptance Test
//!
//! Building the same bundle twice must produce identical colorings and
//! byte-for-byte identical JSON.

use prism_bundle::{total_coloring_path_bundle, Element, FiberColoring, FiberGraph};

/// C_6 with a 3-color total coloring (n divisible by 3 makes C_n Type 1).
fn c6() -> (FiberGraph, FiberColoring) {
    let graph = FiberGraph::cycle(6);
    let mut phi = FiberColoring::new();
    for v in 0..6 {
        // Vertex v gets v mod 3, edge {v, v+1} gets (v + 2) mod 3, shifted to 1..=3.
        phi.insert(Element::Vertex(v), (v % 3) as u32 + 1);
        phi.insert(Element::edge(v, (v + 1) % 6), ((v + 2) % 3) as u32 + 1);
    }
    (graph, phi)
}

#[test]
fn test_construction_determinism() {
    let (graph, phi) = c6();

    let first = total_coloring_path_bundle(7, &graph, &phi).unwrap();
    let second = total_coloring_path_bundle(7, &graph, &phi).unwrap();
    assert_eq!(first, second);

    let first_json = serde_json::to_string(&first).unwrap();
    let second_json = serde_json::to_string(&second).unwrap();
    assert_eq!(first_json, second_json);
}

#[test]
fn test_insertion_order_does_not_matter() {
    let (graph, phi) = c6();
    let reversed: FiberColoring = phi
        .iter()
        .map(|(&element, &color)| (element, color))
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();

    let a = total_coloring_path_bundle(4, &graph, &phi).unwrap();
    let b = total_coloring_path_bundle(4, &graph, &reversed).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_c6_coloring_is_proper() {
    let (graph, phi) = c6();
    assert!(prism_bundle::check_fiber_coloring(&graph, &phi).is_proper());
}
