//! Unit centrality
//!
//! Builds the thresholded similarity graph and runs weighted PageRank on it.
//! Scores are divided by the maximum, so the most central unit scores 1.0.
//! A graph without edges gives every unit the uniform prior `1/N`.

use super::builder::GraphBuilder;
use super::csr::CsrGraph;
use crate::config::GraphConfig;
use crate::pagerank::standard::StandardPageRank;
use crate::summarizer::tfidf::SimilarityMatrix;

/// Centrality scores of all units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Centrality {
    /// One score per unit, indexed like the similarity matrix
    pub scores: Vec<f64>,
    /// Undirected edges that passed the threshold
    pub edges: usize,
    pub iterations: usize,
    pub converged: bool,
    /// True when the zero-edge fallback was used
    pub uniform: bool,
}

/// Graph-based ranker for text units
#[derive(Debug, Clone)]
pub struct CentralityRanker {
    edge_threshold: f64,
    pagerank: StandardPageRank,
    parallel: bool,
}

impl Default for CentralityRanker {
    fn default() -> Self {
        Self::from_config(&GraphConfig::default())
    }
}

impl CentralityRanker {
    pub fn from_config(config: &GraphConfig) -> Self {
        Self {
            edge_threshold: config.edge_threshold,
            pagerank: StandardPageRank::new()
                .with_damping(config.damping)
                .with_max_iterations(config.max_iterations)
                .with_threshold(config.convergence_threshold),
            parallel: false,
        }
    }

    /// Scan matrix rows for edges on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn rank(&self, matrix: &SimilarityMatrix) -> Centrality {
        let n = matrix.len();
        if n == 0 {
            return Centrality {
                converged: true,
                ..Default::default()
            };
        }

        let builder = GraphBuilder::from_similarity(matrix, self.edge_threshold, self.parallel);
        let edges = builder.edge_count();

        if edges == 0 {
            #[cfg(feature = "tracing")]
            tracing::warn!(units = n, "similarity graph has no edges, using uniform centrality");
            return Centrality {
                scores: vec![1.0 / n as f64; n],
                edges: 0,
                iterations: 0,
                converged: true,
                uniform: true,
            };
        }

        let graph = CsrGraph::from_builder(&builder);
        let result = self.pagerank.run(&graph);

        if !result.converged {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                iterations = result.iterations,
                delta = result.delta,
                "PageRank did not converge"
            );
        }

        let max = result.scores.iter().copied().fold(0.0, f64::max);
        let scores = result
            .scores
            .iter()
            .map(|&s| if max > 0.0 { s / max } else { 0.0 })
            .collect();

        Centrality {
            scores,
            edges,
            iterations: result.iterations,
            converged: result.converged,
            uniform: false,
        }
    }
}
