//! TF-IDF vector space and pairwise similarity
//!
//! Each unit contributes one document: its filtered tokens joined by spaces.
//! Terms are `\w\w+` words plus adjacent-word bigrams. Weights are raw
//! counts times a smoothed idf, `ln((1 + n) / (1 + df)) + 1`, and every row
//! is L2-normalized. Term ids follow the lexicographic order of the
//! vocabulary.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;

use crate::nlp::tokenizer::Tokenizer;

use super::unit_vector::UnitVector;

/// Builds a [`TfidfModel`] from a corpus of unit documents.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    /// Largest n-gram size (1 = unigrams only)
    max_ngram: usize,
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TfidfVectorizer {
    /// Unigram + bigram vectorizer
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            max_ngram: 2,
        }
    }

    /// Set the largest n-gram size (at least 1)
    pub fn with_max_ngram(mut self, max_ngram: usize) -> Self {
        self.max_ngram = max_ngram.max(1);
        self
    }

    /// Term counts of one document.
    pub fn analyze(&self, document: &str) -> FxHashMap<String, usize> {
        let words = self.tokenizer.terms(document);
        let mut counts: FxHashMap<String, usize> = FxHashMap::default();
        for n in 1..=self.max_ngram {
            for gram in words.windows(n) {
                *counts.entry(gram.join(" ")).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Learn the vocabulary and idf weights and vectorize every document.
    pub fn fit_transform(&self, documents: &[String], parallel: bool) -> TfidfModel {
        let counts: Vec<FxHashMap<String, usize>> = if parallel {
            documents.par_iter().map(|d| self.analyze(d)).collect()
        } else {
            documents.iter().map(|d| self.analyze(d)).collect()
        };

        // term -> document frequency, sorted by term
        let mut df: BTreeMap<&str, usize> = BTreeMap::new();
        for doc in &counts {
            for term in doc.keys() {
                *df.entry(term.as_str()).or_insert(0) += 1;
            }
        }

        let n = documents.len() as f64;
        let vocabulary: Vec<String> = df.keys().map(|t| t.to_string()).collect();
        let idf: Vec<f64> = df
            .values()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();
        let term_ids: FxHashMap<&str, u32> = df
            .keys()
            .enumerate()
            .map(|(id, t)| (*t, id as u32))
            .collect();

        let vectorize = |doc: &FxHashMap<String, usize>| -> UnitVector {
            let dims = doc
                .iter()
                .filter_map(|(term, &count)| {
                    term_ids
                        .get(term.as_str())
                        .map(|&id| (id, count as f64 * idf[id as usize]))
                })
                .collect();
            UnitVector::from_dimensions(dims)
        };

        let rows = if parallel {
            counts.par_iter().map(vectorize).collect()
        } else {
            counts.iter().map(vectorize).collect()
        };

        TfidfModel { vocabulary, rows }
    }
}

/// A fitted TF-IDF space: the vocabulary and one normalized row per unit.
#[derive(Debug, Clone, Default)]
pub struct TfidfModel {
    /// Sorted terms; the position is the term id
    pub vocabulary: Vec<String>,
    pub rows: Vec<UnitVector>,
}

impl TfidfModel {
    /// Number of rows (units)
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn term(&self, id: u32) -> Option<&str> {
        self.vocabulary.get(id as usize).map(String::as_str)
    }

    /// Sum of every row's weight per term id.
    pub fn summed_weights(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for (&id, &w) in &row.dimensions {
                sums[id as usize] += w;
            }
        }
        sums
    }

    /// Up to `k` terms with the largest summed weight; ties go to the
    /// lexicographically smaller term.
    pub fn top_terms(&self, k: usize) -> Vec<String> {
        let sums = self.summed_weights();
        let mut ranked: Vec<(usize, f64)> = sums
            .into_iter()
            .enumerate()
            .filter(|(_, w)| *w > 0.0)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .take(k)
            .map(|(id, _)| self.vocabulary[id].clone())
            .collect()
    }

    /// Normalized mean row.
    pub fn centroid(&self) -> UnitVector {
        UnitVector::centroid(&self.rows)
    }

    /// Cosine similarity of every row to the corpus centroid.
    pub fn centroid_similarities(&self) -> Vec<f64> {
        let centroid = self.centroid();
        self.rows
            .iter()
            .map(|row| row.cosine_similarity(&centroid))
            .collect()
    }

    /// Pairwise cosine similarity of all rows.
    pub fn similarity_matrix(&self, parallel: bool) -> SimilarityMatrix {
        SimilarityMatrix::from_rows(&self.rows, parallel)
    }
}

/// Dense, symmetric `n x n` cosine-similarity matrix with a unit diagonal.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    n: usize,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute the upper triangle once and mirror it.
    pub fn from_rows(rows: &[UnitVector], parallel: bool) -> Self {
        let n = rows.len();
        let upper_row = |i: usize| -> Vec<f64> {
            ((i + 1)..n)
                .map(|j| rows[i].cosine_similarity(&rows[j]))
                .collect()
        };
        let upper: Vec<Vec<f64>> = if parallel {
            (0..n).into_par_iter().map(upper_row).collect()
        } else {
            (0..n).map(upper_row).collect()
        };

        let mut values = vec![0.0; n * n];
        for (i, row) in upper.into_iter().enumerate() {
            values[i * n + i] = 1.0;
            for (offset, sim) in row.into_iter().enumerate() {
                let j = i + 1 + offset;
                values[i * n + j] = sim;
                values[j * n + i] = sim;
            }
        }

        Self { n, values }
    }

    /// Dimension of the matrix
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.values[i * self.n..(i + 1) * self.n]
    }

    /// Largest similarity of `i` to any of `others` (0 when empty).
    pub fn max_similarity(&self, i: usize, others: &[usize]) -> f64 {
        others
            .iter()
            .map(|&j| self.get(i, j))
            .fold(0.0, f64::max)
    }
}
