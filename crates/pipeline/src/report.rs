use hypr_highlights::ScriptCandidate;
use hypr_transcript::Transcript;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Extraction,
    Generation,
    Admission,
    Validation,
}

/// Something that went wrong without aborting the run. `anchor` is unset
/// for failures that concern the whole transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub stage: FailureStage,
    pub anchor: Option<usize>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightEntry {
    pub anchor: usize,
    pub sources: Vec<&'static str>,
    pub context: Vec<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipSpan {
    pub index: usize,
    pub start: f64,
    pub end: f64,
}

/// One selected script as a cut list over the source media.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clip {
    /// Position of the script among the candidates.
    pub candidate: usize,
    pub text: String,
    pub spans: Vec<ClipSpan>,
    /// Sum of the span lengths, in seconds.
    pub duration: f64,
}

impl Clip {
    pub fn from_candidate(transcript: &Transcript, position: usize, candidate: &ScriptCandidate) -> Self {
        let spans: Vec<ClipSpan> = candidate
            .indices
            .iter()
            .filter_map(|&i| transcript.get(i))
            .map(|s| ClipSpan {
                index: s.index,
                start: s.start,
                end: s.end,
            })
            .collect();
        let duration = spans.iter().map(|s| s.end - s.start).sum();

        Self {
            candidate: position,
            text: candidate.text.clone(),
            spans,
            duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub transcript_id: String,
    pub sentences: usize,
    pub segments: usize,
    pub keywords: Vec<String>,
    /// Sentences whose sentiment could not be classified and scored neutral.
    pub sentiment_failures: Vec<usize>,
    pub highlights: Vec<HighlightEntry>,
    pub failures: Vec<Failure>,
    /// Anchors whose admitted script repeated an earlier one.
    pub duplicates: Vec<usize>,
    pub candidates: Vec<ScriptCandidate>,
    pub clips: Vec<Clip>,
}
