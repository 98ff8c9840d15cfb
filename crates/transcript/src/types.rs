use crate::timeline::build_timeline;
use crate::tokenize::{is_question, tempo, tokenize};
use crate::Error;

/// One sentence as it arrives from the transcript source.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SentenceRow {
    pub text: String,
    /// Spoken duration in seconds, without the inter-sentence pause.
    pub duration: f64,
}

impl SentenceRow {
    pub fn new(text: impl Into<String>, duration: f64) -> Self {
        Self {
            text: text.into(),
            duration,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct Sentence {
    pub index: usize,
    pub text: String,
    pub duration: f64,
    pub tokens: Vec<String>,
    /// Words per second over `duration`.
    pub tempo: f64,
    pub is_question: bool,
    #[serde(skip)]
    pub embedding: Vec<f32>,
    pub start: f64,
    pub end: f64,
}

impl Sentence {
    pub fn word_count(&self) -> usize {
        self.tokens.len()
    }
}

/// Ordered, immutable sentence sequence sharing one embedding space and one
/// timeline origin.
///
/// Downstream stages read from it and return their own derived values; none
/// of them writes back.
#[derive(Debug, Clone)]
pub struct Transcript {
    id: String,
    sentences: Vec<Sentence>,
}

impl Transcript {
    /// Assemble sentences from source rows and their embeddings (same order),
    /// deriving tokens, tempo, question flag and timestamps.
    pub fn build(
        id: impl Into<String>,
        rows: Vec<SentenceRow>,
        embeddings: Vec<Vec<f32>>,
        pause_offset: f64,
    ) -> Result<Self, Error> {
        if rows.len() != embeddings.len() {
            return Err(Error::EmbeddingCountMismatch {
                sentences: rows.len(),
                embeddings: embeddings.len(),
            });
        }

        if let Some(expected) = embeddings.first().map(Vec::len) {
            if let Some((index, found)) = embeddings
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|(_, len)| *len != expected)
            {
                return Err(Error::EmbeddingDimensionMismatch {
                    index,
                    expected,
                    found,
                });
            }
        }

        let durations: Vec<f64> = rows.iter().map(|r| r.duration).collect();
        let spans = build_timeline(&durations, pause_offset)?;

        let sentences = rows
            .into_iter()
            .zip(embeddings)
            .zip(spans)
            .enumerate()
            .map(|(index, ((row, embedding), span))| {
                let tokens = tokenize(&row.text);
                Sentence {
                    index,
                    tempo: tempo(tokens.len(), row.duration),
                    is_question: is_question(&row.text),
                    tokens,
                    text: row.text,
                    duration: row.duration,
                    embedding,
                    start: span.start,
                    end: span.end,
                }
            })
            .collect();

        Ok(Self {
            id: id.into(),
            sentences,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sentence> {
        self.sentences.get(index)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn embeddings(&self) -> Vec<&[f32]> {
        self.sentences.iter().map(|s| s.embedding.as_slice()).collect()
    }

    /// Texts of the given sentences in the order given, joined by single
    /// spaces. Unknown indices are skipped.
    pub fn join_text(&self, indices: &[usize]) -> String {
        indices
            .iter()
            .filter_map(|&i| self.sentences.get(i))
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
