//! Cyclic-shift deranger over a finite color set.
//!
//! Advancing every color one step in the sorted cyclic order of the set is a
//! bijection on the set, and a derangement whenever the set has at least two
//! colors. A single-color set maps to itself.

use crate::types::Color;
use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

/// Returns the color after `color` in the sorted cyclic order of `color_set`,
/// wrapping from the maximum to the minimum.
///
/// Returns `None` when `color` is not a member of `color_set`.
pub fn cyclic_shift(color: Color, color_set: &BTreeSet<Color>) -> Option<Color> {
    if !color_set.contains(&color) {
        return None;
    }
    color_set
        .range((Excluded(color), Unbounded))
        .next()
        .or_else(|| color_set.iter().next())
        .copied()
}

/// Precomputed cyclic shift for repeated use on the same color set.
///
/// The constructor relabels every element of every fiber with the same
/// set, so the successor table is built once per invocation.
#[derive(Debug, Clone)]
pub struct CyclicShift {
    sorted: Vec<Color>,
}

impl CyclicShift {
    pub fn new(color_set: &BTreeSet<Color>) -> Self {
        Self {
            sorted: color_set.iter().copied().collect(),
        }
    }

    /// Number of colors in the underlying set.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Whether the shift moves every color (`|set| >= 2`).
    pub fn is_derangement(&self) -> bool {
        self.sorted.len() >= 2
    }

    /// Successor of `color`, or `None` if it is not in the set.
    pub fn apply(&self, color: Color) -> Option<Color> {
        let idx = self.sorted.binary_search(&color).ok()?;
        Some(self.sorted[(idx + 1) % self.sorted.len()])
    }
}
