//! Weighted PageRank
//!
//! `r'(i) = (1 - d) / N + d * (Σ_j r(j) * w(j, i) / s(j) + m / N)`, where
//! `s(j)` is unit `j`'s strength and `m` the rank held by isolated units.
//! The similarity graph is symmetric, so each unit pulls rank from its own
//! neighbor list. Iteration stops once the L1 change falls to the
//! threshold or the iteration cap is hit.

use super::PageRankResult;
use crate::graph::csr::CsrGraph;

#[derive(Debug, Clone)]
pub struct StandardPageRank {
    pub damping: f64,
    pub max_iterations: usize,
    pub threshold: f64,
}

impl Default for StandardPageRank {
    fn default() -> Self {
        Self {
            damping: 0.85,
            max_iterations: 100,
            threshold: 1e-6,
        }
    }
}

impl StandardPageRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Iterate to the stationary distribution.
    ///
    /// A run that hits the iteration cap still returns its last scores,
    /// with `converged` false.
    pub fn run(&self, graph: &CsrGraph) -> PageRankResult {
        let n = graph.unit_count;
        if n == 0 {
            return PageRankResult {
                scores: Vec::new(),
                iterations: 0,
                delta: 0.0,
                converged: true,
            };
        }

        let uniform = 1.0 / n as f64;
        let isolated = graph.isolated_units();
        let mut rank = vec![uniform; n];
        let mut next = vec![0.0; n];
        // rank(j) / s(j), refreshed every iteration
        let mut outflow = vec![0.0; n];

        let mut iterations = 0;
        let mut delta = f64::INFINITY;

        while iterations < self.max_iterations && delta > self.threshold {
            iterations += 1;

            for (unit, flow) in outflow.iter_mut().enumerate() {
                let strength = graph.strength(unit);
                *flow = if strength > 0.0 { rank[unit] / strength } else { 0.0 };
            }

            let stranded: f64 = isolated.iter().map(|&u| rank[u]).sum();
            let base = (1.0 - self.damping) * uniform + self.damping * stranded * uniform;

            for (unit, value) in next.iter_mut().enumerate() {
                let inflow: f64 = graph.neighbors(unit).map(|(j, w)| outflow[j] * w).sum();
                *value = base + self.damping * inflow;
            }

            delta = rank.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
            std::mem::swap(&mut rank, &mut next);
        }

        let total: f64 = rank.iter().sum();
        if total > 0.0 {
            rank.iter_mut().for_each(|r| *r /= total);
        }

        PageRankResult {
            scores: rank,
            iterations,
            delta,
            converged: delta <= self.threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::builder::GraphBuilder;

    fn graph(n: usize, edges: &[(u32, u32, f64)]) -> CsrGraph {
        let mut builder = GraphBuilder::with_nodes(n);
        for &(a, b, w) in edges {
            builder.increment_edge(a, b, w);
        }
        CsrGraph::from_builder(&builder)
    }

    #[test]
    fn test_symmetric_cycle_is_uniform() {
        let result = StandardPageRank::new().run(&graph(3, &[(0, 1, 0.4), (1, 2, 0.4), (2, 0, 0.4)]));

        assert!(result.converged);
        assert!(result.scores.iter().all(|s| (s - 1.0 / 3.0).abs() < 1e-6));
    }

    #[test]
    fn test_hub_ranks_first() {
        let star = graph(4, &[(0, 1, 0.3), (0, 2, 0.3), (0, 3, 0.3)]);
        let result = StandardPageRank::new().run(&star);

        assert!(result.scores[1..].iter().all(|&s| result.scores[0] > s));
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_damping_sharpens_hub() {
        let star = graph(4, &[(0, 1, 0.3), (0, 2, 0.3), (0, 3, 0.3)]);
        let gap = |d: f64| {
            let r = StandardPageRank::new().with_damping(d).run(&star);
            r.scores[0] - r.scores[1]
        };

        assert!(gap(0.95) > gap(0.5));
    }

    #[test]
    fn test_heavier_edges_attract_more_rank() {
        let result = StandardPageRank::new().run(&graph(3, &[(0, 1, 0.9), (1, 2, 0.1)]));

        assert!(result.scores[1] > result.scores[0]);
        assert!(result.scores[0] > result.scores[2]);
    }

    #[test]
    fn test_isolated_unit_keeps_teleport_mass() {
        let result = StandardPageRank::new().run(&graph(3, &[(0, 1, 0.5)]));

        assert!(result.converged);
        assert!(result.scores[2] > 0.0);
        assert!(result.scores[2] < result.scores[0]);
    }

    #[test]
    fn test_iteration_cap() {
        let result = StandardPageRank::new()
            .with_max_iterations(1)
            .with_threshold(0.0)
            .run(&graph(3, &[(0, 1, 0.2), (1, 2, 0.7)]));

        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 3);
    }

    #[test]
    fn test_empty_graph() {
        let result = StandardPageRank::new().run(&CsrGraph::default());

        assert!(result.converged);
        assert!(result.scores.is_empty());
    }
}
