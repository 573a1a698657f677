//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! The [`Pipeline`] struct holds the compiled stages of one configuration.
//! Calling [`Pipeline::run`] executes them in order, threading artifacts
//! between stages and notifying a [`PipelineObserver`] at each boundary.
//!
//! Stages, in order: normalize, segment, annotate, similarity, rank,
//! keyphrases, score, select, bullets. A document that is a single short
//! sentence stops after segmentation; a document with at most one unit
//! stops as soon as that is known.
//!
//! A pipeline owns no per-request state: every artifact of a run lives on
//! the stack of [`Pipeline::run`].

use std::sync::Arc;

use crate::annotate::{Annotator, AnnotatorAdapter};
use crate::config::SummarizerConfig;
use crate::errors::{Result, SummarizeError};
use crate::graph::ranker::CentralityRanker;
use crate::nlp::lexicon::LexiconSet;
use crate::nlp::normalizer::Normalizer;
use crate::nlp::segmenter::Segmenter;
use crate::nlp::tokenizer::char_len;
use crate::phrase::keyphrases::KeyphraseExtractor;
use crate::pipeline::artifacts::{ShortCircuit, SummaryDebug};
use crate::pipeline::observer::{
    PipelineObserver, StageClock, StageReportBuilder, STAGE_ANNOTATE, STAGE_BULLETS,
    STAGE_KEYPHRASES, STAGE_NORMALIZE, STAGE_RANK, STAGE_SCORE, STAGE_SEGMENT, STAGE_SELECT,
    STAGE_SIMILARITY,
};
use crate::summarizer::bullets::BulletBuilder;
use crate::summarizer::scorer::{Scorer, ScoringContext};
use crate::summarizer::selector::MmrSelector;
use crate::summarizer::tfidf::TfidfVectorizer;

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

/// Run one stage inside its span, timing it and notifying the observer.
///
/// `metrics` adds stage-specific numbers to the report.
fn run_stage<T>(
    observer: &mut impl PipelineObserver,
    stage: &'static str,
    body: impl FnOnce() -> T,
    metrics: impl FnOnce(&T, StageReportBuilder) -> StageReportBuilder,
) -> T {
    trace_stage!(stage);
    observer.on_stage_start(stage);
    let clock = StageClock::start();
    let out = body();
    let report = metrics(&out, StageReportBuilder::new(clock.elapsed())).build();
    observer.on_stage_end(stage, &report);
    out
}

fn no_metrics<T>(_: &T, report: StageReportBuilder) -> StageReportBuilder {
    report
}

/// Text produced by one run, with the debug payload when requested.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub text: String,
    pub debug: Option<SummaryDebug>,
}

// ============================================================================
// Compiled stage container
// ============================================================================

/// The compiled stages of one [`SummarizerConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: Normalizer,
    segmenter: Segmenter,
    adapter: AnnotatorAdapter,
    vectorizer: TfidfVectorizer,
    ranker: CentralityRanker,
    keyphrases: KeyphraseExtractor,
    scorer: Scorer,
    selector: MmrSelector,
    bullets: BulletBuilder,
    parallel: bool,
}

impl Pipeline {
    /// Compile the stages of `config` around `annotator`.
    ///
    /// The configuration is expected to be validated already; only lexicon
    /// patterns can still fail here.
    pub fn from_config(config: &SummarizerConfig, annotator: Arc<dyn Annotator>) -> Result<Self> {
        let lexicons = LexiconSet::resolve(&config.language, &config.lexicons);

        Ok(Self {
            normalizer: Normalizer::new(),
            segmenter: Segmenter::new(config.segmenter.clone(), &lexicons.discourse_markers)?,
            adapter: AnnotatorAdapter::new(annotator, lexicons.stopwords.clone())
                .with_timeout(config.annotator_timeout())
                .with_parallel(config.parallel),
            vectorizer: TfidfVectorizer::new(),
            ranker: CentralityRanker::from_config(&config.graph).with_parallel(config.parallel),
            keyphrases: KeyphraseExtractor::new(config.keyphrase_top_k),
            scorer: Scorer::new(config.weights.clone(), &lexicons),
            selector: MmrSelector::new(config.selection.clone()),
            bullets: BulletBuilder::new(config.selection.min_bullets),
            parallel: config.parallel,
        })
    }

    pub fn annotator_name(&self) -> &str {
        self.adapter.annotator_name()
    }

    /// Execute the pipeline on `text`.
    ///
    /// Fails only with [`SummarizeError::EmptyText`]; every other problem is
    /// recovered inside its stage.
    pub fn run(
        &self,
        text: &str,
        debug: bool,
        observer: &mut impl PipelineObserver,
    ) -> Result<PipelineOutput> {
        // Stage 1: Normalize
        let normalized = run_stage(
            observer,
            STAGE_NORMALIZE,
            || self.normalizer.normalize(text),
            no_metrics,
        );
        if normalized.is_empty() {
            return Err(SummarizeError::EmptyText);
        }

        // Stage 2: Segment
        let segmentation = run_stage(
            observer,
            STAGE_SEGMENT,
            || self.segmenter.segment(&normalized),
            |s, r| r.items(s.units.len()),
        );
        observer.on_sentences(&segmentation.sentences);

        let mut trace = debug.then(|| SummaryDebug {
            sentences: segmentation.sentences.clone(),
            ..Default::default()
        });

        let short_limit = self.segmenter.config().short_text_chars;
        if segmentation.sentences.len() == 1 && char_len(&normalized) < short_limit {
            return Ok(short_circuit(normalized, ShortCircuit::ShortText, trace));
        }
        if segmentation.units.len() <= 1 {
            let text = segmentation
                .units
                .into_iter()
                .next()
                .map_or(normalized, |u| u.text);
            return Ok(short_circuit(text, ShortCircuit::SingleUnit, trace));
        }

        // Stage 3: Annotate
        let annotated = run_stage(
            observer,
            STAGE_ANNOTATE,
            || {
                self.adapter
                    .annotate(&segmentation.sentences, &segmentation.units)
            },
            |a, r| r.items(a.units.len()),
        );
        let units = annotated.units;
        observer.on_units(&units);
        if let Some(t) = trace.as_mut() {
            t.units = units.clone();
            t.annotation_fallbacks = annotated.fallbacks;
        }

        if units.len() <= 1 {
            let text = units.into_iter().next().map_or(normalized, |u| u.text);
            return Ok(short_circuit(text, ShortCircuit::SingleUnit, trace));
        }

        // Stage 4: TF-IDF vectors and pairwise similarity
        let (model, similarity) = run_stage(
            observer,
            STAGE_SIMILARITY,
            || {
                let documents: Vec<String> = units.iter().map(|u| u.token_string()).collect();
                let model = self.vectorizer.fit_transform(&documents, self.parallel);
                let similarity = model.similarity_matrix(self.parallel);
                (model, similarity)
            },
            |(model, _), r| r.items(model.vocabulary.len()),
        );

        // Stage 5: Rank
        let centrality = run_stage(
            observer,
            STAGE_RANK,
            || self.ranker.rank(&similarity),
            |c, r| r.edges(c.edges).iterations(c.iterations).converged(c.converged),
        );

        // Stage 6: Keyphrases
        let keyphrases = run_stage(
            observer,
            STAGE_KEYPHRASES,
            || self.keyphrases.extract(&units, &model),
            |k, r| r.items(k.len()),
        );
        observer.on_keyphrases(&keyphrases);

        // Stage 7: Score
        let scores = run_stage(
            observer,
            STAGE_SCORE,
            || {
                let centroid = model.centroid_similarities();
                let ctx = ScoringContext {
                    sentence_count: segmentation.sentences.len(),
                    keyphrases: &keyphrases,
                    centroid: &centroid,
                    centrality: &centrality.scores,
                };
                self.scorer.score_all(&units, &ctx)
            },
            |s, r| r.items(s.len()),
        );
        observer.on_scores(&scores);

        // Stage 8: Select
        let selection = run_stage(
            observer,
            STAGE_SELECT,
            || {
                self.selector.select(
                    &units,
                    &scores,
                    &similarity,
                    &keyphrases,
                    segmentation.sentences.len(),
                )
            },
            |s, r| r.items(s.picked.len()),
        );
        observer.on_selection(&selection);

        // Stage 9: Bullets
        let rendered = run_stage(
            observer,
            STAGE_BULLETS,
            || self.bullets.render(&units, &selection.picked),
            |b, r| r.items(b.lines().count()),
        );
        let text = if rendered.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::warn!("no bullets rendered, returning the normalized text");
            normalized
        } else {
            rendered
        };

        if let Some(t) = trace.as_mut() {
            t.keyphrases = keyphrases;
            t.scores = scores;
            t.picked_unit_indexes = selection.picked;
            t.target = selection.target;
            t.stop_reason = Some(selection.stop_reason);
            t.backfilled = selection.backfilled;
            t.graph_edges = centrality.edges;
        }

        Ok(PipelineOutput { text, debug: trace })
    }
}

fn short_circuit(text: String, reason: ShortCircuit, trace: Option<SummaryDebug>) -> PipelineOutput {
    #[cfg(feature = "tracing")]
    tracing::debug!(?reason, "short-circuit, returning text verbatim");

    PipelineOutput {
        text,
        debug: trace.map(|t| SummaryDebug {
            short_circuit: Some(reason),
            ..t
        }),
    }
}

// ============================================================================
// Tests
// ============================================================================
