use hypr_highlight_interface::{SentimentClassifier, SentimentScores};
use hypr_transcript::Transcript;
use rayon::prelude::*;

/// Sentiment per sentence, indexed like the transcript.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmotionScores {
    scores: Vec<SentimentScores>,
    failed: Vec<usize>,
}

impl EmotionScores {
    /// Classify every sentence. A sentence whose classification fails is
    /// logged, recorded in [`EmotionScores::failed`] and scored fully neutral.
    pub fn compute<C: SentimentClassifier + ?Sized>(transcript: &Transcript, classifier: &C) -> Self {
        let results: Vec<_> = transcript
            .sentences()
            .par_iter()
            .map(|sentence| classifier.classify(&sentence.text))
            .collect();

        let mut failed = Vec::new();
        let scores = results
            .into_iter()
            .enumerate()
            .map(|(index, result)| match result {
                Ok(scores) => scores,
                Err(e) => {
                    tracing::warn!(sentence = index, error = %e, "sentiment_failed");
                    failed.push(index);
                    neutral()
                }
            })
            .collect();

        Self { scores, failed }
    }

    pub fn from_scores(scores: Vec<SentimentScores>) -> Self {
        Self {
            scores,
            failed: Vec::new(),
        }
    }

    /// Scores with only the `1 - neutral` value known.
    pub fn from_emotions(emotions: &[f32]) -> Self {
        Self::from_scores(
            emotions
                .iter()
                .map(|&e| SentimentScores::new(0.0, 1.0 - e, 0.0))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SentimentScores> {
        self.scores.get(index)
    }

    /// `1 - neutral` for a sentence, 0 when unknown.
    pub fn emotion(&self, index: usize) -> f32 {
        self.scores.get(index).map_or(0.0, SentimentScores::emotion)
    }

    pub fn failed(&self) -> &[usize] {
        &self.failed
    }
}

fn neutral() -> SentimentScores {
    SentimentScores::new(0.0, 1.0, 0.0)
}
