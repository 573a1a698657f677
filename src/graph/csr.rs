//! Compressed Sparse Row (CSR) form of the unit similarity graph
//!
//! Unit `i`'s neighbors live at `targets[offsets[i]..offsets[i + 1]]`,
//! sorted by unit index, so PageRank walks them in a fixed order.

use super::builder::GraphBuilder;

/// Frozen, undirected similarity graph in CSR layout.
///
/// Every undirected edge is stored twice, once per endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrGraph {
    pub unit_count: usize,
    pub offsets: Vec<usize>,
    pub targets: Vec<u32>,
    pub similarities: Vec<f64>,
    /// Sum of edge similarities per unit (weighted degree)
    pub strength: Vec<f64>,
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self {
            unit_count: 0,
            offsets: vec![0],
            targets: Vec::new(),
            similarities: Vec::new(),
            strength: Vec::new(),
        }
    }
}

impl CsrGraph {
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let mut graph = Self {
            unit_count: builder.node_count(),
            ..Self::default()
        };
        graph.offsets.reserve(graph.unit_count);
        graph.strength.reserve(graph.unit_count);

        for (_, node) in builder.nodes() {
            let mut adjacency: Vec<(u32, f64)> = node.edges.iter().map(|(&t, &w)| (t, w)).collect();
            adjacency.sort_unstable_by_key(|&(target, _)| target);

            let mut strength = 0.0;
            for (target, similarity) in adjacency {
                graph.targets.push(target);
                graph.similarities.push(similarity);
                strength += similarity;
            }
            graph.strength.push(strength);
            graph.offsets.push(graph.targets.len());
        }

        graph
    }

    /// `(neighbor, similarity)` pairs of `unit`, by ascending neighbor index
    pub fn neighbors(&self, unit: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.offsets[unit]..self.offsets[unit + 1];
        self.targets[span.clone()]
            .iter()
            .zip(&self.similarities[span])
            .map(|(&t, &w)| (t as usize, w))
    }

    pub fn strength(&self, unit: usize) -> f64 {
        self.strength[unit]
    }

    pub fn is_empty(&self) -> bool {
        self.unit_count == 0
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Units with no edge above the threshold
    pub fn isolated_units(&self) -> Vec<usize> {
        (0..self.unit_count)
            .filter(|&u| self.offsets[u] == self.offsets[u + 1])
            .collect()
    }
}
