//! PageRank over the unit similarity graph
//!
//! Weighted, undirected power iteration; see [`standard::StandardPageRank`].

pub mod standard;

/// Outcome of a power iteration run
#[derive(Debug, Clone, PartialEq)]
pub struct PageRankResult {
    /// Stationary probabilities, one per unit, summing to 1
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// L1 change of the last iteration
    pub delta: f64,
    pub converged: bool,
}
