use hypr_embedding::{EmbeddingCache, adjacent_similarities, similarity_matrix};
use hypr_highlight_interface::{
    Embedder, GenerationOracle, GenerationRequest, SentimentClassifier, ValidationOracle,
};
use hypr_highlights::{
    EmotionScores, EmotionalIntensity, HighlightSet, IntroLikeness, QuestionDetector,
    SalienceExtractor, ScriptBook, aggregate, admit, select,
};
use hypr_segmenter::{ContextAssembler, segment};
use hypr_storage::EmbeddingStore;
use hypr_transcript::{SentenceRow, Transcript, stitch, theme_keywords};
use rayon::prelude::*;

use crate::{Clip, Error, Failure, FailureStage, HighlightEntry, PipelineConfig, PipelineReport};

/// External collaborators of a run, passed in by the caller.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    pub embedder: &'a dyn Embedder,
    pub store: &'a dyn EmbeddingStore,
    pub sentiment: &'a dyn SentimentClassifier,
    pub generator: &'a dyn GenerationOracle,
    pub validator: &'a dyn ValidationOracle,
}

pub struct Pipeline<'a> {
    config: PipelineConfig,
    services: Services<'a>,
    cache: EmbeddingCache<&'a dyn EmbeddingStore, &'a dyn Embedder>,
}

enum AnchorOutcome {
    Admitted(Vec<usize>),
    Failed(Failure),
}

impl<'a> Pipeline<'a> {
    pub fn new(config: PipelineConfig, services: Services<'a>) -> Self {
        Self {
            cache: EmbeddingCache::new(services.store, services.embedder),
            config,
            services,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Select highlight clips from one transcript.
    ///
    /// Only input and embedding errors abort the run. A skipped extractor,
    /// per-anchor oracle failures and a failed final validation are
    /// recorded in the report.
    pub fn run(&self, transcript_id: &str, rows: Vec<SentenceRow>) -> Result<PipelineReport, Error> {
        let transcript = self.prepare(transcript_id, rows)?;
        let similarities = similarity_matrix(&transcript.embeddings());
        let segmentation = segment(&similarities, &self.config.segmenter);

        let emotions = EmotionScores::compute(&transcript, self.services.sentiment);
        let mut failures = Vec::new();
        let highlights = self.extract(transcript_id, &transcript, &emotions, &mut failures);
        let keywords = theme_keywords(&transcript, self.config.keyword_count);
        tracing::info!(transcript_id = %transcript_id, keywords = ?keywords, "theme_keywords");

        let assembler = ContextAssembler::new(&segmentation, &similarities, self.config.context);
        let anchors: Vec<usize> = highlights.anchors().collect();
        let contexts: Vec<Vec<usize>> = anchors.iter().map(|&a| assembler.assemble(a)).collect();

        let outcomes: Vec<AnchorOutcome> = anchors
            .par_iter()
            .zip(contexts.par_iter())
            .map(|(&anchor, context)| self.generate(&transcript, anchor, context, &keywords))
            .collect();

        let mut duplicates = Vec::new();
        let mut book = ScriptBook::new();
        for (&anchor, outcome) in anchors.iter().zip(outcomes) {
            match outcome {
                AnchorOutcome::Admitted(indices) => {
                    if !book.insert_from(&transcript, indices) {
                        duplicates.push(anchor);
                    }
                }
                AnchorOutcome::Failed(failure) => failures.push(failure),
            }
        }
        tracing::info!(
            transcript_id = %transcript_id,
            highlights = anchors.len(),
            candidates = book.len(),
            failures = failures.len(),
            duplicates = duplicates.len(),
            "scripts_collected"
        );

        let selection = match select(&book, self.services.validator, self.config.desired_count) {
            Ok(selection) => selection,
            Err(e) => {
                tracing::warn!(transcript_id = %transcript_id, error = %e, "validation_failed");
                failures.push(Failure {
                    stage: FailureStage::Validation,
                    anchor: None,
                    reason: e.to_string(),
                });
                Vec::new()
            }
        };

        let clips = selection
            .iter()
            .filter_map(|&position| {
                book.nth(position)
                    .map(|candidate| Clip::from_candidate(&transcript, position, candidate))
            })
            .collect::<Vec<_>>();
        tracing::info!(transcript_id = %transcript_id, clips = clips.len(), "clips_selected");

        let highlight_entries = anchors
            .iter()
            .zip(contexts)
            .map(|(&anchor, context)| HighlightEntry {
                anchor,
                sources: highlights.sources(anchor).to_vec(),
                context,
            })
            .collect();

        Ok(PipelineReport {
            transcript_id: transcript_id.to_string(),
            sentences: transcript.len(),
            segments: segmentation.count(),
            keywords,
            sentiment_failures: emotions.failed().to_vec(),
            highlights: highlight_entries,
            failures,
            duplicates,
            candidates: book.into_candidates(),
            clips,
        })
    }

    /// Stitch rows if configured, embed them through the cache and build
    /// the transcript.
    pub fn prepare(&self, transcript_id: &str, rows: Vec<SentenceRow>) -> Result<Transcript, Error> {
        let rows = if self.config.stitch_continuations {
            self.stitch_rows(transcript_id, rows)?
        } else {
            rows
        };

        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        let embeddings = self.cache.get_or_compute(transcript_id, &texts)?;

        Ok(Transcript::build(
            transcript_id,
            rows,
            embeddings,
            self.config.pause_offset,
        )?)
    }

    // Adjacent similarity is measured on the unmerged rows, cached under a
    // separate key so the merged transcript keeps its own entry.
    fn stitch_rows(&self, transcript_id: &str, rows: Vec<SentenceRow>) -> Result<Vec<SentenceRow>, Error> {
        let texts: Vec<&str> = rows.iter().map(|r| r.text.as_str()).collect();
        let raw = self
            .cache
            .get_or_compute(&format!("{transcript_id}.unstitched"), &texts)?;
        let adjacent = adjacent_similarities(&raw);

        let before = rows.len();
        let rows = stitch(rows, Some(&adjacent), &self.config.stitch);
        tracing::info!(transcript_id = %transcript_id, before, after = rows.len(), "rows_stitched");
        Ok(rows)
    }

    fn extract(
        &self,
        transcript_id: &str,
        transcript: &Transcript,
        emotions: &EmotionScores,
        failures: &mut Vec<Failure>,
    ) -> HighlightSet {
        let salience = &self.config.salience;
        let emotional = EmotionalIntensity::new(emotions);
        let questions = QuestionDetector::new(emotions);
        let intros = IntroLikeness::new(
            self.services.embedder,
            &self.config.intro_prototype,
            salience.intro_threshold,
        )
        .unwrap_or_else(|e| {
            tracing::warn!(transcript_id = %transcript_id, error = %e, "intro_prototype_unavailable");
            failures.push(Failure {
                stage: FailureStage::Extraction,
                anchor: None,
                reason: e.to_string(),
            });
            IntroLikeness::disabled()
        });

        let extractors: [(&dyn SalienceExtractor, usize); 3] = [
            (&emotional, salience.emotion_budget),
            (&questions, salience.question_budget),
            (&intros, salience.intro_budget),
        ];
        aggregate(transcript, &extractors)
    }

    fn generate(
        &self,
        transcript: &Transcript,
        anchor: usize,
        context: &[usize],
        keywords: &[String],
    ) -> AnchorOutcome {
        let texts: Vec<&str> = context
            .iter()
            .filter_map(|&i| transcript.get(i))
            .map(|s| s.text.as_str())
            .collect();
        let request = GenerationRequest {
            anchor,
            context_indices: context,
            context_texts: &texts,
            theme_keywords: keywords,
            bounds: self.config.script_bounds,
        };

        let raw = match self.services.generator.generate(&request) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(anchor, error = %e, "generation_failed");
                return AnchorOutcome::Failed(Failure {
                    stage: FailureStage::Generation,
                    anchor: Some(anchor),
                    reason: e.to_string(),
                });
            }
        };

        match admit(&raw, context, self.config.script_bounds) {
            Ok(indices) => AnchorOutcome::Admitted(indices),
            Err(rejection) => {
                tracing::info!(anchor, returned = ?raw, reason = %rejection, "script_rejected");
                AnchorOutcome::Failed(Failure {
                    stage: FailureStage::Admission,
                    anchor: Some(anchor),
                    reason: rejection.to_string(),
                })
            }
        }
    }
}
