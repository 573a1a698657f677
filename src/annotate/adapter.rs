//! Annotator adapter
//!
//! Runs the configured [`Annotator`] over every raw unit and turns the
//! result into [`Unit`]s: filtered tokens, aligned POS/NER tags and noun
//! phrases. A unit whose annotation fails (error, panic, missed deadline)
//! is tokenized by the regex fallback instead; the request never fails
//! because of annotation.
//!
//! With a deadline, one annotate call starts a small set of worker threads
//! (one, or one per rayon thread when parallel) that pull units from a
//! shared queue. Each result must arrive within the deadline of the
//! previous one. Once the deadline passes, the workers stop taking units
//! and everything not yet annotated uses the fallback. A worker blocked in
//! a call that never returns is left detached; it exits when that call
//! does.

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::errors::AnnotatorError;
use crate::nlp::segmenter::RawUnit;
use crate::nlp::stopwords::StopwordFilter;
use crate::phrase::chunker::NounChunker;
use crate::types::{NerTag, PosTag, Sentence, Unit};

use super::{Annotator, RegexAnnotator};

/// Annotated units of one document.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedUnits {
    /// Units in document order, `index` equal to position.
    pub units: Vec<Unit>,
    /// Number of raw units that went through the regex fallback.
    pub fallbacks: usize,
}

/// Tokens and tags for one unit text.
#[derive(Debug, Clone, Default)]
struct Tagged {
    raw_tokens: Vec<String>,
    pos_tags: Vec<PosTag>,
    ner_tags: Vec<NerTag>,
    noun_phrases: Vec<String>,
    fallback: bool,
}

/// Bridges an [`Annotator`] to the pipeline.
#[derive(Clone)]
pub struct AnnotatorAdapter {
    annotator: Arc<dyn Annotator>,
    fallback: RegexAnnotator,
    stopwords: StopwordFilter,
    chunker: NounChunker,
    timeout: Option<Duration>,
    parallel: bool,
}

impl std::fmt::Debug for AnnotatorAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotatorAdapter")
            .field("annotator", &self.annotator.name())
            .field("timeout", &self.timeout)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl AnnotatorAdapter {
    pub fn new(annotator: Arc<dyn Annotator>, stopwords: StopwordFilter) -> Self {
        Self {
            annotator,
            fallback: RegexAnnotator::new(),
            stopwords,
            chunker: NounChunker::new(),
            timeout: None,
            parallel: false,
        }
    }

    /// Per-unit deadline for the annotator (`None` calls it inline)
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Annotate units on the rayon pool
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn annotator_name(&self) -> &str {
        self.annotator.name()
    }

    /// Annotate every raw unit and build the unit list.
    ///
    /// Units left without any non-stopword token are dropped, unless every
    /// unit would be; then the first one is kept on its own.
    pub fn annotate(&self, sentences: &[Sentence], raw_units: &[RawUnit]) -> AnnotatedUnits {
        let available = self.annotator.is_available();
        if !available {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                annotator = self.annotator.name(),
                "annotator unavailable, using regex fallback for every unit"
            );
        }

        let tagged: Vec<Tagged> = match (available, self.timeout) {
            (false, _) => self.map_units(raw_units, |raw| self.tag_with_fallback(&raw.text)),
            (true, Some(timeout)) => self
                .annotate_with_deadline(raw_units, timeout)
                .into_iter()
                .zip(raw_units)
                .map(|(outcome, raw)| self.settle(outcome, &raw.text))
                .collect(),
            (true, None) => self.map_units(raw_units, |raw| {
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    run_annotator(self.annotator.as_ref(), &raw.text)
                }))
                .unwrap_or(Err(AnnotatorError::Panicked));
                self.settle(outcome, &raw.text)
            }),
        };

        let fallbacks = tagged.iter().filter(|t| t.fallback).count();

        let mut units: Vec<Unit> = raw_units
            .iter()
            .zip(tagged)
            .filter_map(|(raw, tagged)| {
                let sentence = sentences.get(raw.sentence_id)?;
                Some(self.build_unit(sentence, &raw.text, tagged))
            })
            .collect();

        if units.iter().any(|u| !u.tokens.is_empty()) {
            units.retain(|u| !u.tokens.is_empty());
        } else {
            units.truncate(1);
        }
        for (index, unit) in units.iter_mut().enumerate() {
            unit.index = index;
        }

        AnnotatedUnits { units, fallbacks }
    }

    fn build_unit(&self, sentence: &Sentence, text: &str, tagged: Tagged) -> Unit {
        let tokens = tagged
            .raw_tokens
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !self.stopwords.is_stop_token(t))
            .collect();

        Unit {
            index: 0,
            text: text.trim().to_string(),
            sentence_id: sentence.global_id,
            paragraph_index: sentence.paragraph_index,
            position_in_paragraph: sentence.index_in_paragraph,
            sentence_count_in_paragraph: sentence.sentence_count_in_paragraph,
            raw_tokens: tagged.raw_tokens,
            tokens,
            pos_tags: tagged.pos_tags,
            ner_tags: tagged.ner_tags,
            noun_phrases: tagged.noun_phrases,
        }
    }

    fn map_units<F>(&self, raw_units: &[RawUnit], tag: F) -> Vec<Tagged>
    where
        F: Fn(&RawUnit) -> Tagged + Sync + Send,
    {
        if self.parallel {
            raw_units.par_iter().map(tag).collect()
        } else {
            raw_units.iter().map(tag).collect()
        }
    }

    /// Chunk a successful annotation, or fall back on failure.
    fn settle(&self, outcome: Result<Tagged, AnnotatorError>, text: &str) -> Tagged {
        match outcome {
            Ok(mut tagged) => {
                tagged.noun_phrases =
                    self.chunker
                        .extract(&tagged.raw_tokens, &tagged.pos_tags, &tagged.ner_tags);
                tagged
            }
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    annotator = self.annotator.name(),
                    error = %_err,
                    "annotation failed, using regex fallback for unit"
                );
                self.tag_with_fallback(text)
            }
        }
    }

    fn tag_with_fallback(&self, text: &str) -> Tagged {
        let raw_tokens = self.fallback.words(text);
        let n = raw_tokens.len();
        Tagged {
            raw_tokens,
            pos_tags: vec![PosTag::Other; n],
            ner_tags: vec![NerTag::Outside; n],
            noun_phrases: Vec::new(),
            fallback: true,
        }
    }

    /// Annotate `raw_units` on worker threads, one outcome per unit.
    ///
    /// Units with no result by the deadline get [`AnnotatorError::Timeout`].
    fn annotate_with_deadline(
        &self,
        raw_units: &[RawUnit],
        timeout: Duration,
    ) -> Vec<Result<Tagged, AnnotatorError>> {
        let n = raw_units.len();
        if n == 0 {
            return Vec::new();
        }

        let texts: Arc<Vec<String>> = Arc::new(raw_units.iter().map(|r| r.text.clone()).collect());
        let cursor = Arc::new(AtomicUsize::new(0));
        let abandoned = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let workers = if self.parallel {
            rayon::current_num_threads().clamp(1, n)
        } else {
            1
        };

        for _ in 0..workers {
            let annotator = Arc::clone(&self.annotator);
            let texts = Arc::clone(&texts);
            let cursor = Arc::clone(&cursor);
            let abandoned = Arc::clone(&abandoned);
            let tx = tx.clone();
            let spawned = thread::Builder::new()
                .name("annotator".to_string())
                .spawn(move || {
                    while !abandoned.load(Ordering::Acquire) {
                        let index = cursor.fetch_add(1, Ordering::AcqRel);
                        let Some(text) = texts.get(index) else {
                            break;
                        };
                        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                            run_annotator(annotator.as_ref(), text)
                        }))
                        .unwrap_or(Err(AnnotatorError::Panicked));
                        if tx.send((index, outcome)).is_err() {
                            break;
                        }
                    }
                });
            if let Err(_err) = spawned {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_err, "could not start annotator worker");
                break;
            }
        }
        drop(tx);

        let mut outcomes: Vec<Option<Result<Tagged, AnnotatorError>>> = (0..n).map(|_| None).collect();
        let mut missing = AnnotatorError::Timeout(timeout);
        let mut received = 0;
        while received < n {
            match rx.recv_timeout(timeout) {
                Ok((index, outcome)) => {
                    outcomes[index] = Some(outcome);
                    received += 1;
                }
                Err(RecvTimeoutError::Timeout) => {
                    abandoned.store(true, Ordering::Release);
                    break;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    missing = AnnotatorError::Failed("no annotator worker running".to_string());
                    break;
                }
            }
        }

        outcomes
            .into_iter()
            .map(|o| o.unwrap_or_else(|| Err(missing.clone())))
            .collect()
    }
}

/// Tokenize, then align POS and NER tags to the raw tokens.
///
/// Tokenization failures fail the unit; tagging failures only blank the
/// affected tags.
fn run_annotator(annotator: &dyn Annotator, text: &str) -> Result<Tagged, AnnotatorError> {
    let raw_tokens: Vec<String> = annotator
        .tokenize(text)?
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .collect();

    let pos_map: FxHashMap<String, PosTag> = annotator
        .pos_tag(text)
        .unwrap_or_else(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(annotator = annotator.name(), error = %_err, "POS tagging failed");
            Vec::new()
        })
        .into_iter()
        .collect();
    let ner_map: FxHashMap<String, NerTag> = annotator
        .ner_tag(text)
        .unwrap_or_else(|_err| {
            #[cfg(feature = "tracing")]
            tracing::warn!(annotator = annotator.name(), error = %_err, "NER tagging failed");
            Vec::new()
        })
        .into_iter()
        .collect();

    let pos_tags = raw_tokens
        .iter()
        .map(|t| pos_map.get(t).copied().unwrap_or(PosTag::Other))
        .collect();
    let ner_tags = raw_tokens
        .iter()
        .map(|t| ner_map.get(t).copied().unwrap_or_default())
        .collect();

    Ok(Tagged {
        raw_tokens,
        pos_tags,
        ner_tags,
        noun_phrases: Vec::new(),
        fallback: false,
    })
}
