//! MMR-based unit selection for summarization
//!
//! Implements Maximal Marginal Relevance (MMR) for selecting
//! diverse yet relevant units for extractive summarization.
//!
//! The candidate set is fixed up front; each step of the greedy loop asks
//! [`MmrSelector::next_pick`] for the best remaining candidate and the loop
//! ends when [`stop_reason`] reports either that the target count was
//! reached or that no valid candidate is left.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::tfidf::SimilarityMatrix;
use crate::config::SelectionConfig;
use crate::types::{ScoreRow, Unit};

/// Why the greedy loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    TargetReached,
    /// Every remaining candidate was picked or hit the redundancy cutoff
    CandidatesExhausted,
}

/// Result of unit selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Picked unit indexes in document order
    pub picked: Vec<usize>,
    pub target: usize,
    pub stop_reason: StopReason,
    /// Indexes added by the score-rank backfill, in the order they were added
    pub backfilled: Vec<usize>,
}

/// A scored candidate for the next greedy step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick {
    pub index: usize,
    pub mmr: f64,
    pub redundancy: f64,
    pub coverage: f64,
}

/// Immutable inputs of one selection run
#[derive(Debug)]
pub struct CandidatePool<'a> {
    units: &'a [Unit],
    similarity: &'a SimilarityMatrix,
    /// Total scores divided by their maximum
    normalized: Vec<f64>,
    /// Keyphrase ids found in each unit's token string
    unit_keyphrases: Vec<Vec<usize>>,
}

impl<'a> CandidatePool<'a> {
    pub fn new(
        units: &'a [Unit],
        scores: &[ScoreRow],
        similarity: &'a SimilarityMatrix,
        keyphrases: &[String],
    ) -> Self {
        let mut totals = vec![0.0; units.len()];
        for row in scores {
            if let Some(slot) = totals.get_mut(row.unit_index) {
                *slot = row.total_score;
            }
        }
        let max = totals.iter().copied().fold(0.0, f64::max);
        let normalized = if max > 0.0 {
            totals.iter().map(|s| s / max).collect()
        } else {
            totals
        };

        let unit_keyphrases = units
            .iter()
            .map(|unit| {
                let token_string = unit.token_string();
                keyphrases
                    .iter()
                    .enumerate()
                    .filter(|(_, kp)| token_string.contains(kp.as_str()))
                    .map(|(id, _)| id)
                    .collect()
            })
            .collect();

        Self {
            units,
            similarity,
            normalized,
            unit_keyphrases,
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn normalized_score(&self, index: usize) -> f64 {
        self.normalized.get(index).copied().unwrap_or(0.0)
    }
}

/// Greedy loop state: what has been picked and which keyphrases it covers
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub picked: Vec<usize>,
    covered: FxHashSet<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    fn contains(&self, index: usize) -> bool {
        self.picked.contains(&index)
    }

    fn push(&mut self, pool: &CandidatePool<'_>, index: usize) {
        self.picked.push(index);
        if let Some(ids) = pool.unit_keyphrases.get(index) {
            self.covered.extend(ids.iter().copied());
        }
    }
}

/// Termination predicate of the greedy loop, `None` while it should go on.
pub fn stop_reason(state: &SelectionState, target: usize, next: Option<&Pick>) -> Option<StopReason> {
    if state.picked.len() >= target {
        Some(StopReason::TargetReached)
    } else if next.is_none() {
        Some(StopReason::CandidatesExhausted)
    } else {
        None
    }
}

/// MMR-based unit selector
#[derive(Debug, Clone, Default)]
pub struct MmrSelector {
    config: SelectionConfig,
}

impl MmrSelector {
    pub fn new(config: SelectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Best remaining candidate, or `None` if every candidate is picked or
    /// too close to a picked one.
    ///
    /// `mmr = λ * score + (1 - λ) * coverage - β * redundancy`. Candidates
    /// are visited in index order and only a strictly greater value
    /// replaces the best, so ties go to the lowest index.
    pub fn next_pick(&self, pool: &CandidatePool<'_>, state: &SelectionState) -> Option<Pick> {
        let lambda = self.config.lambda;
        let mut best: Option<Pick> = None;

        for index in (0..pool.len()).filter(|&i| !state.contains(i)) {
            let redundancy = pool.similarity.max_similarity(index, &state.picked);
            if redundancy >= self.config.redundancy_cutoff {
                continue;
            }

            let new_keyphrases = pool.unit_keyphrases[index]
                .iter()
                .filter(|id| !state.covered.contains(id))
                .count();
            let coverage = (new_keyphrases as f64 / self.config.coverage_saturation).min(1.0);
            let mmr = lambda * pool.normalized_score(index) + (1.0 - lambda) * coverage
                - self.config.redundancy_penalty * redundancy;

            if best.map_or(true, |b| mmr > b.mmr) {
                best = Some(Pick {
                    index,
                    mmr,
                    redundancy,
                    coverage,
                });
            }
        }
        best
    }

    /// Run the greedy loop, backfill up to the minimum, restore document order.
    pub fn select(
        &self,
        units: &[Unit],
        scores: &[ScoreRow],
        similarity: &SimilarityMatrix,
        keyphrases: &[String],
        sentence_count: usize,
    ) -> Selection {
        let target = self.config.target_count(sentence_count);
        let pool = CandidatePool::new(units, scores, similarity, keyphrases);
        let mut state = SelectionState::new();

        let stop = loop {
            let next = self.next_pick(&pool, &state);
            if let Some(reason) = stop_reason(&state, target, next.as_ref()) {
                break reason;
            }
            if let Some(pick) = next {
                state.push(&pool, pick.index);
            }
        };

        let backfilled = self.backfill(&pool, &mut state);
        if !backfilled.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                picked = state.picked.len() - backfilled.len(),
                backfilled = backfilled.len(),
                minimum = self.config.min_bullets,
                "MMR selection fell short, backfilled by score"
            );
        }

        let mut picked = state.picked;
        picked.sort_by_key(|&i| (units[i].sentence_id, i));
        picked.dedup();

        #[cfg(feature = "tracing")]
        tracing::debug!(target_count = target, picked = picked.len(), stop_reason = ?stop, "selection done");

        Selection {
            picked,
            target,
            stop_reason: stop,
            backfilled,
        }
    }

    /// Add the best-scoring unpicked units, ignoring redundancy, until the
    /// minimum count is met or no unit is left.
    fn backfill(&self, pool: &CandidatePool<'_>, state: &mut SelectionState) -> Vec<usize> {
        let mut added = Vec::new();
        if state.picked.len() >= self.config.min_bullets {
            return added;
        }

        let mut ranked: Vec<usize> = (0..pool.len()).collect();
        // stable sort keeps index order among equal scores
        ranked.sort_by(|&a, &b| {
            pool.normalized_score(b)
                .partial_cmp(&pool.normalized_score(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        for index in ranked {
            if state.picked.len() >= self.config.min_bullets {
                break;
            }
            if !state.contains(index) {
                state.push(pool, index);
                added.push(index);
            }
        }
        added
    }
}
