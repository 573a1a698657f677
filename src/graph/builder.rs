//! Graph builder with efficient edge handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) edge lookups during construction. Nodes are text units,
//! identified by their index; edges are undirected and weighted by
//! cosine similarity.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::summarizer::tfidf::SimilarityMatrix;

/// A node in the graph builder
#[derive(Debug, Clone, Default)]
pub struct BuilderNode {
    /// Adjacency list: target node ID -> edge weight
    pub edges: FxHashMap<u32, f64>,
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<BuilderNode>,
}

impl GraphBuilder {
    /// Create a graph with `n` isolated nodes
    pub fn with_nodes(n: usize) -> Self {
        Self {
            nodes: vec![BuilderNode::default(); n],
        }
    }

    /// Increment the edge weight between two nodes
    ///
    /// If the edge doesn't exist, it's created with the given weight.
    pub fn increment_edge(&mut self, from: u32, to: u32, weight: f64) {
        if from == to {
            return; // No self-loops
        }

        // Add edge in both directions (undirected graph)
        if let Some(node) = self.nodes.get_mut(from as usize) {
            *node.edges.entry(to).or_insert(0.0) += weight;
        }
        if let Some(node) = self.nodes.get_mut(to as usize) {
            *node.edges.entry(from).or_insert(0.0) += weight;
        }
    }

    /// Build the unit graph from a similarity matrix
    ///
    /// An edge `(i, j)`, `i < j`, is added with weight `sim(i, j)` when the
    /// similarity reaches `threshold`. Zero similarities never form edges.
    pub fn from_similarity(matrix: &SimilarityMatrix, threshold: f64, parallel: bool) -> Self {
        let n = matrix.len();
        let row_edges = |i: usize| -> Vec<(u32, u32, f64)> {
            let row = matrix.row(i);
            ((i + 1)..n)
                .filter(|&j| row[j] > 0.0 && row[j] >= threshold)
                .map(|j| (i as u32, j as u32, row[j]))
                .collect()
        };

        // Collect edges per row, then merge in row order
        let partial: Vec<Vec<(u32, u32, f64)>> = if parallel {
            (0..n).into_par_iter().map(row_edges).collect()
        } else {
            (0..n).map(row_edges).collect()
        };

        let mut builder = Self::with_nodes(n);
        for edges in partial {
            for (a, b, weight) in edges {
                builder.increment_edge(a, b, weight);
            }
        }
        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges (counting each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum::<usize>() / 2
    }

    /// Get a node by ID
    pub fn get_node(&self, id: u32) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (u32, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as u32, n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::tfidf::TfidfVectorizer;

    fn matrix(docs: &[&str]) -> SimilarityMatrix {
        let docs: Vec<String> = docs.iter().map(|d| d.to_string()).collect();
        TfidfVectorizer::new()
            .fit_transform(&docs, false)
            .similarity_matrix(false)
    }

    #[test]
    fn test_edge_incrementing() {
        let mut builder = GraphBuilder::with_nodes(2);

        builder.increment_edge(0, 1, 0.5);
        builder.increment_edge(0, 1, 0.5);

        // Should have weight 1.0 in both directions
        assert_eq!(builder.get_node(0).unwrap().edges.get(&1), Some(&1.0));
        assert_eq!(builder.get_node(1).unwrap().edges.get(&0), Some(&1.0));
        assert_eq!(builder.edge_count(), 1);
    }

    #[test]
    fn test_self_loops_prevented() {
        let mut builder = GraphBuilder::with_nodes(1);

        builder.increment_edge(0, 0, 1.0);

        assert!(builder.get_node(0).unwrap().edges.is_empty());
        assert_eq!(builder.edge_count(), 0);
    }

    #[test]
    fn test_from_similarity_threshold() {
        let sims = matrix(&["lãi suất tăng", "lãi suất giảm", "thời tiết đẹp"]);
        let builder = GraphBuilder::from_similarity(&sims, 0.10, false);

        assert_eq!(builder.node_count(), 3);
        assert_eq!(builder.edge_count(), 1);
        let weight = builder.get_node(0).unwrap().edges[&1];
        assert!((weight - sims.get(0, 1)).abs() < 1e-12);
        assert!(builder.get_node(2).unwrap().edges.is_empty());

        // nothing survives a threshold above every similarity
        let strict = GraphBuilder::from_similarity(&sims, 0.99, false);
        assert_eq!(strict.edge_count(), 0);
        assert_eq!(strict.node_count(), 3);
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let sims = matrix(&["một hai", "hai ba", "ba bốn", "bốn một", "năm"]);
        let a = GraphBuilder::from_similarity(&sims, 0.0, true);
        let b = GraphBuilder::from_similarity(&sims, 0.0, false);

        assert_eq!(a.edge_count(), b.edge_count());
        for (id, node) in a.nodes() {
            assert_eq!(node.edges, b.get_node(id).unwrap().edges);
        }
    }
}
