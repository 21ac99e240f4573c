//! # prism-bundle
//!
//! Constructive total coloring of path bundles `P_m × F` for the PRISM
//! graph coloring platform.
//!
//! A path bundle stacks `m` copies ("fibers") of a base graph `F` along a
//! path and joins each consecutive pair with `K_{n,n}` (`n = |V(F)|`).
//! Given one total coloring of `F`, the constructor derives every other
//! fiber and every join deterministically, drawing join colors from the
//! palette `{1 .. Δ(G)+1}` with `Δ(G) = Δ(F) + 2n`.
//!
//! ## Architecture
//! ```text
//! ┌──────────────┐   ┌──────────────┐
//! │  matching    │   │  deranger    │   leaf components
//! └──────┬───────┘   └──────┬───────┘
//!        └────────┬─────────┘
//!          ┌──────▼──────┐
//!          │   bundle    │   total-coloring constructor
//!          └──────┬──────┘
//!          ┌──────▼──────┐
//!          │   audit     │   conflict counting
//!          └─────────────┘
//! ```
//!
//! ## Usage
//! ```
//! use prism_bundle::{total_coloring_path_bundle, Element, FiberColoring, FiberGraph};
//!
//! let fiber = FiberGraph::path(2);
//! let phi: FiberColoring = [
//!     (Element::Vertex(0), 1),
//!     (Element::Vertex(1), 2),
//!     (Element::edge(0, 1), 3),
//! ]
//! .into_iter()
//! .collect();
//!
//! let bundle = total_coloring_path_bundle(3, &fiber, &phi)?;
//! assert_eq!(bundle.fiber(1).unwrap().vertex_color(0), Some(2));
//! assert_eq!(bundle.join(0, 1).unwrap().len(), 4);
//! # Ok::<(), prism_bundle::BundleError>(())
//! ```

pub mod audit;
pub mod bundle;
pub mod deranger;
pub mod dimacs;
pub mod errors;
pub mod matching;
pub mod types;

// Re-export commonly used items
pub use audit::{audit, check_fiber_coloring, AuditReport};
pub use bundle::{total_coloring_path_bundle, BundleColoring, BundleEntry, BundleSummary};
pub use deranger::{cyclic_shift, CyclicShift};
pub use errors::{BundleError, Result};
pub use matching::{generate_perfect_matchings, PerfectMatching};
pub use types::{
    BundleVertex, Color, Element, FiberColoring, FiberGraph, JoinColoring, JoinEdge, VertexId,
};
