//! Perfect-matching generator for `K_{n,n}`.
//!
//! Circulant 1-factorization: matching `k` pairs every left vertex `v` with
//! right vertex `(v + k) mod n`. Each shift is a bijection, and the `n`
//! shifts together cover each of the `n²` edges exactly once.

use crate::types::VertexId;

/// One perfect matching of `K_{n,n}` as `(left, right)` pairs, ordered by `left`.
pub type PerfectMatching = Vec<(VertexId, VertexId)>;

/// Matching `k` of the circulant 1-factorization of `K_{n,n}`.
pub fn shifted_matching(n: usize, k: usize) -> PerfectMatching {
    (0..n).map(|v| (v, (v + k) % n)).collect()
}

/// Decomposes `K_{n,n}` into `n` pairwise edge-disjoint perfect matchings.
///
/// Matchings are returned in increasing shift `k`. For `n == 0` the result is empty.
pub fn generate_perfect_matchings(n: usize) -> Vec<PerfectMatching> {
    (0..n).map(|k| shifted_matching(n, k)).collect()
}
