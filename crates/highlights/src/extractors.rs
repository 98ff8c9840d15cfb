use std::cmp::Ordering;

use hypr_embedding::cosine_similarity;
use hypr_highlight_interface::{Embedder, Embedding};
use hypr_transcript::Transcript;
use serde::{Deserialize, Serialize};

use crate::EmotionScores;

pub const DEFAULT_EMOTION_BUDGET: usize = 8;
pub const DEFAULT_QUESTION_BUDGET: usize = 10;
pub const DEFAULT_INTRO_BUDGET: usize = 10;
pub const DEFAULT_INTRO_THRESHOLD: f64 = 0.765;

/// Typical self-introductions. Sentences close to this in embedding space
/// tend to be speakers presenting themselves or a guest.
pub const DEFAULT_INTRO_PROTOTYPE: &str = "My name is Ankit Singla and I'm a full-time blogger. \
I blog about blogging. I'm Karen, an entrepreneur and VC consultant. \
Paul Erdős was a Hungarian mathematician. He was one of the most prolific mathematicians \
and producers of mathematical conjectures of the 20th century. \
This is Maria and she is ML Engineer at Rask";

/// A heuristic that flags salient sentences.
///
/// `rank` returns at most `budget` indices into the transcript, and an empty
/// list when nothing qualifies.
pub trait SalienceExtractor {
    fn name(&self) -> &'static str;
    fn rank(&self, transcript: &Transcript, budget: usize) -> Vec<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SalienceConfig {
    pub emotion_budget: usize,
    pub question_budget: usize,
    pub intro_budget: usize,
    pub intro_threshold: f64,
}

impl Default for SalienceConfig {
    fn default() -> Self {
        Self {
            emotion_budget: DEFAULT_EMOTION_BUDGET,
            question_budget: DEFAULT_QUESTION_BUDGET,
            intro_budget: DEFAULT_INTRO_BUDGET,
            intro_threshold: DEFAULT_INTRO_THRESHOLD,
        }
    }
}

/// Most emotional sentences, returned in sentence order.
pub struct EmotionalIntensity<'a> {
    scores: &'a EmotionScores,
}

impl<'a> EmotionalIntensity<'a> {
    pub fn new(scores: &'a EmotionScores) -> Self {
        Self { scores }
    }
}

impl SalienceExtractor for EmotionalIntensity<'_> {
    fn name(&self) -> &'static str {
        "emotion"
    }

    fn rank(&self, transcript: &Transcript, budget: usize) -> Vec<usize> {
        let mut top = top_by_emotion(self.scores, 0..transcript.len(), budget);
        top.sort_unstable();
        top
    }
}

/// Sentences containing a question mark. When more than `budget` qualify
/// the most emotional ones are kept. Returned in sentence order.
pub struct QuestionDetector<'a> {
    scores: &'a EmotionScores,
}

impl<'a> QuestionDetector<'a> {
    pub fn new(scores: &'a EmotionScores) -> Self {
        Self { scores }
    }
}

impl SalienceExtractor for QuestionDetector<'_> {
    fn name(&self) -> &'static str {
        "question"
    }

    fn rank(&self, transcript: &Transcript, budget: usize) -> Vec<usize> {
        let questions = transcript
            .sentences()
            .iter()
            .filter(|s| s.is_question)
            .map(|s| s.index);

        let mut top = top_by_emotion(self.scores, questions, budget);
        top.sort_unstable();
        top
    }
}

/// Sentences that read like an introduction, most similar first.
pub struct IntroLikeness {
    prototype: Option<Embedding>,
    threshold: f64,
}

impl IntroLikeness {
    /// Embeds `prototype` once.
    pub fn new<E: Embedder + ?Sized>(
        embedder: &E,
        prototype: &str,
        threshold: f64,
    ) -> Result<Self, hypr_highlight_interface::Error> {
        let prototype = embedder.embed(prototype)?;
        Ok(Self::from_embedding(prototype, threshold))
    }

    /// An extractor that never flags anything, for when the prototype could
    /// not be embedded.
    pub fn disabled() -> Self {
        Self {
            prototype: None,
            threshold: DEFAULT_INTRO_THRESHOLD,
        }
    }

    pub fn from_embedding(prototype: Embedding, threshold: f64) -> Self {
        Self {
            prototype: Some(prototype),
            threshold,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.prototype.is_some()
    }
}

impl SalienceExtractor for IntroLikeness {
    fn name(&self) -> &'static str {
        "intro"
    }

    fn rank(&self, transcript: &Transcript, budget: usize) -> Vec<usize> {
        let Some(prototype) = &self.prototype else {
            return Vec::new();
        };

        let mut matches: Vec<(usize, f64)> = transcript
            .sentences()
            .iter()
            .map(|s| (s.index, cosine_similarity(prototype, &s.embedding)))
            .filter(|&(_, sim)| sim > self.threshold)
            .collect();

        matches.sort_by(|a, b| descending(a.1, b.1).then(a.0.cmp(&b.0)));
        matches.into_iter().take(budget).map(|(i, _)| i).collect()
    }
}

// Highest emotion first, earlier sentence on ties.
fn top_by_emotion(
    scores: &EmotionScores,
    candidates: impl Iterator<Item = usize>,
    budget: usize,
) -> Vec<usize> {
    let mut candidates: Vec<usize> = candidates.collect();
    candidates.sort_by(|&a, &b| {
        descending(scores.emotion(a) as f64, scores.emotion(b) as f64).then(a.cmp(&b))
    });
    candidates.truncate(budget);
    candidates
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}
