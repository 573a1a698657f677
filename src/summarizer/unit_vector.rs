//! Sparse unit vectors over a term vocabulary
//!
//! Each unit's TF-IDF row is stored as a sparse, L2-normalized vector keyed
//! by term id, so cosine similarity is a plain dot product.

use rustc_hash::FxHashMap;

/// A sparse unit vector representation of a text unit
#[derive(Debug, Clone, Default)]
pub struct UnitVector {
    /// Non-zero dimensions: term id -> weight
    pub dimensions: FxHashMap<u32, f64>,
    /// L2 norm of the vector before normalization
    pub norm: f64,
}

impl UnitVector {
    /// Create a new empty unit vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from a map of dimensions, scaling to unit length.
    ///
    /// An all-zero map stays all-zero.
    pub fn from_dimensions(mut dimensions: FxHashMap<u32, f64>) -> Self {
        dimensions.retain(|_, v| *v != 0.0);
        let norm = Self::compute_norm(&dimensions);
        if norm > 0.0 {
            for value in dimensions.values_mut() {
                *value /= norm;
            }
        }
        Self { dimensions, norm }
    }

    /// Normalized mean of `vectors`.
    pub fn centroid(vectors: &[UnitVector]) -> Self {
        if vectors.is_empty() {
            return Self::new();
        }
        let n = vectors.len() as f64;
        let mut sum: FxHashMap<u32, f64> = FxHashMap::default();
        for vector in vectors {
            for (&term, &weight) in &vector.dimensions {
                *sum.entry(term).or_insert(0.0) += weight;
            }
        }
        for value in sum.values_mut() {
            *value /= n;
        }
        Self::from_dimensions(sum)
    }

    /// Compute L2 norm
    fn compute_norm(dimensions: &FxHashMap<u32, f64>) -> f64 {
        dimensions.values().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Cosine similarity with another vector, in `[0, 1]` for TF-IDF rows.
    pub fn cosine_similarity(&self, other: &UnitVector) -> f64 {
        // Both sides are normalized, so the dot product is the cosine
        let (small, large) = if self.dimensions.len() <= other.dimensions.len() {
            (self, other)
        } else {
            (other, self)
        };
        let mut dot = 0.0;
        for (key, value) in &small.dimensions {
            if let Some(other_value) = large.dimensions.get(key) {
                dot += value * other_value;
            }
        }
        dot.clamp(0.0, 1.0)
    }

    /// Check if the vector is empty
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }
}
