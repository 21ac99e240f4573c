//! Total-coloring constructor for path bundles `P_m × F`.
//!
//! Starting from a total coloring of fiber 0, each following fiber is the
//! previous one relabeled by the cyclic shift of the base color set. The
//! `K_{n,n}` join between fibers `i-1` and `i` is split into `n` perfect
//! matchings, and matching `k` takes the `k`-th smallest palette color not
//! used by a vertex of either fiber.

use crate::deranger::CyclicShift;
use crate::errors::{BundleError, Result};
use crate::matching::generate_perfect_matchings;
use crate::types::{Color, FiberColoring, FiberGraph, JoinColoring, JoinEdge};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;

/// Derived constants of one construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSummary {
    /// Number of fibers `m`
    pub fibers: usize,
    /// Vertices per fiber `n`
    pub fiber_vertices: usize,
    /// `Δ(F)`
    pub fiber_max_degree: usize,
    /// `Δ(G) = Δ(F) + 2n`
    pub bundle_max_degree: usize,
    /// `|{1 .. Δ(G)+1}|`
    pub palette_size: usize,
    /// `C_fiber`, sorted ascending
    pub fiber_colors: Vec<Color>,
}

/// A view of one keyed entry of a [`BundleColoring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleEntry<'a> {
    Fiber(&'a FiberColoring),
    Join(&'a JoinColoring),
}

/// Total coloring of a whole path bundle.
///
/// `fibers[i]` is `Fiber_i`; `joins[k]` colors the join between fibers `k`
/// and `k + 1` (`E_join_k_to_{k+1}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleColoring {
    fibers: Vec<FiberColoring>,
    joins: Vec<JoinColoring>,
    summary: BundleSummary,
}

impl BundleColoring {
    /// Number of fibers `m`.
    pub fn num_fibers(&self) -> usize {
        self.fibers.len()
    }

    pub fn fibers(&self) -> &[FiberColoring] {
        &self.fibers
    }

    pub fn joins(&self) -> &[JoinColoring] {
        &self.joins
    }

    pub fn summary(&self) -> &BundleSummary {
        &self.summary
    }

    /// Coloring of fiber `i`.
    pub fn fiber(&self, i: usize) -> Option<&FiberColoring> {
        self.fibers.get(i)
    }

    /// Join coloring between fibers `from` and `to`; only `to == from + 1` exists.
    pub fn join(&self, from: usize, to: usize) -> Option<&JoinColoring> {
        if to != from + 1 {
            return None;
        }
        self.joins.get(from)
    }

    /// Output keys: every `Fiber_i`, then every `E_join_{i-1}_to_{i}`, in path order.
    pub fn keys(&self) -> Vec<String> {
        let fibers = (0..self.fibers.len()).map(fiber_key);
        let joins = (0..self.joins.len()).map(join_key);
        fibers.chain(joins).collect()
    }

    /// Looks up an entry by its output key (`"Fiber_2"`, `"E_join_0_to_1"`).
    pub fn get(&self, key: &str) -> Option<BundleEntry<'_>> {
        if let Some(index) = key.strip_prefix("Fiber_") {
            let i: usize = index.parse().ok()?;
            return self.fiber(i).map(BundleEntry::Fiber);
        }
        let pair = key.strip_prefix("E_join_")?;
        let (from, to) = pair.split_once("_to_")?;
        let (from, to) = (from.parse().ok()?, to.parse().ok()?);
        self.join(from, to).map(BundleEntry::Join)
    }

    /// Iterates entries in [`BundleColoring::keys`] order.
    pub fn entries(&self) -> impl Iterator<Item = (String, BundleEntry<'_>)> {
        let fibers = self
            .fibers
            .iter()
            .enumerate()
            .map(|(i, f)| (fiber_key(i), BundleEntry::Fiber(f)));
        let joins = self
            .joins
            .iter()
            .enumerate()
            .map(|(k, j)| (join_key(k), BundleEntry::Join(j)));
        fibers.chain(joins)
    }
}

impl Serialize for BundleColoring {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fibers.len() + self.joins.len()))?;
        for (key, entry) in self.entries() {
            match entry {
                BundleEntry::Fiber(fiber) => map.serialize_entry(&key, fiber)?,
                BundleEntry::Join(join) => map.serialize_entry(&key, join)?,
            }
        }
        map.end()
    }
}

/// Output key of fiber `i`.
pub fn fiber_key(i: usize) -> String {
    format!("Fiber_{}", i)
}

/// Output key of the join between fibers `from` and `from + 1`.
pub fn join_key(from: usize) -> String {
    format!("E_join_{}_to_{}", from, from + 1)
}

/// Constructs a total coloring of `P_m × F` from a total coloring of `F`.
///
/// `fiber_total_coloring` is trusted to be a proper total coloring of
/// `fiber_graph`; it is copied as fiber 0 and never validated here.
///
/// ## Errors
/// - `BundleError::EmptyFiberGraph`: `fiber_graph` has no vertices
/// - `BundleError::InsufficientJoinColors`: fewer than `n` palette colors are
///   free of boundary vertex colors for some fiber pair
/// - `BundleError::ValidationError`: `m == 0`
pub fn total_coloring_path_bundle(
    m: usize,
    fiber_graph: &FiberGraph,
    fiber_total_coloring: &FiberColoring,
) -> Result<BundleColoring> {
    let n = fiber_graph.num_vertices();
    if n == 0 {
        return Err(BundleError::EmptyFiberGraph);
    }
    if m == 0 {
        return Err(BundleError::validation(
            "Path bundle needs at least one fiber (m >= 1)",
        ));
    }

    let delta_f = fiber_graph.max_degree();
    let delta_g = delta_f + 2 * n;
    let palette_max = Color::try_from(delta_g + 1).map_err(|_| {
        BundleError::validation(format!("Palette size {} exceeds color range", delta_g + 1))
    })?;

    let c_fiber = fiber_total_coloring.color_set();
    let shift = CyclicShift::new(&c_fiber);
    let matchings = generate_perfect_matchings(n);

    let mut fibers = Vec::with_capacity(m);
    let mut joins = Vec::with_capacity(m - 1);
    fibers.push(fiber_total_coloring.clone());

    for i in 1..m {
        let prev = &fibers[i - 1];
        let next = shift_fiber(prev, &shift)?;

        let used: BTreeSet<Color> = prev
            .vertex_colors()
            .union(&next.vertex_colors())
            .copied()
            .collect();
        let c_avail: Vec<Color> = (1..=palette_max).filter(|c| !used.contains(c)).collect();
        if c_avail.len() < n {
            return Err(BundleError::insufficient_join_colors(i, c_avail.len(), n));
        }

        let mut join = JoinColoring::new();
        for (matching, &color) in matchings.iter().zip(&c_avail) {
            for &(u, v) in matching {
                join.insert(JoinEdge::new(i - 1, u, v), color);
            }
        }

        fibers.push(next);
        joins.push(join);
    }

    let summary = BundleSummary {
        fibers: m,
        fiber_vertices: n,
        fiber_max_degree: delta_f,
        bundle_max_degree: delta_g,
        palette_size: delta_g + 1,
        fiber_colors: c_fiber.into_iter().collect(),
    };

    Ok(BundleColoring {
        fibers,
        joins,
        summary,
    })
}

fn shift_fiber(prev: &FiberColoring, shift: &CyclicShift) -> Result<FiberColoring> {
    prev.iter()
        .map(|(&element, &color)| {
            shift
                .apply(color)
                .map(|next| (element, next))
                .ok_or_else(|| {
                    BundleError::validation(format!(
                        "Color {} of element {} is outside the fiber color set",
                        color, element
                    ))
                })
        })
        .collect()
}
