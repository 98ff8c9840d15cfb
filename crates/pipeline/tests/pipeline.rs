use std::collections::HashSet;

use hypr_highlight_interface::{
    Embedder, Embedding, Error, GenerationOracle, GenerationRequest, SentimentClassifier,
    SentimentScores, ValidationOracle,
};
use hypr_storage::{EmbeddingStore, MemoryEmbeddingStore};
use hypr_transcript::SentenceRow;
use pipeline::{FailureStage, Pipeline, PipelineConfig, Services};

struct TopicEmbedder;

impl Embedder for TopicEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, Error> {
        let lower = text.to_lowercase();
        let wobble = (text.len() % 7) as f32 * 1e-3;
        let v = if lower.contains("my name is") {
            vec![0.0, 0.0, 1.0]
        } else if lower.contains("rust") {
            vec![1.0, wobble, 0.0]
        } else if lower.contains("coffee") {
            vec![wobble, 1.0, 0.0]
        } else {
            vec![0.5, 0.5, wobble]
        };
        Ok(v)
    }
}

struct ExclamationSentiment;

impl SentimentClassifier for ExclamationSentiment {
    fn classify(&self, text: &str) -> Result<SentimentScores, Error> {
        if text.contains("glitch") {
            return Err(Error::sentiment("timeout"));
        }
        if text.contains('!') {
            Ok(SentimentScores::new(0.1, 0.2, 0.7))
        } else {
            Ok(SentimentScores::new(0.05, 0.9, 0.05))
        }
    }
}

/// Picks the first `min` context sentences; refuses anchors that ask "why".
struct PrefixGenerator;

impl GenerationOracle for PrefixGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Vec<usize>, Error> {
        let anchor_text = request
            .numbered()
            .find(|(i, _)| *i == request.anchor)
            .map(|(_, text)| text)
            .unwrap_or_default();
        if anchor_text.starts_with("Why") {
            return Err(Error::oracle("content filter"));
        }
        Ok(request
            .context_indices
            .iter()
            .copied()
            .take(request.bounds.min)
            .collect())
    }
}

struct FixedValidator(Result<Vec<usize>, &'static str>);

impl ValidationOracle for FixedValidator {
    fn validate(&self, _scripts: &[String], _desired: usize) -> Result<Vec<usize>, Error> {
        self.0.clone().map_err(Error::oracle)
    }
}

fn rows() -> Vec<SentenceRow> {
    let texts = [
        "My name is Dana and I host this show.",
        "Today we talk about Rust.",
        "Rust has no garbage collector.",
        "Rust is amazing for systems work!",
        "Why is Rust so fast?",
        "Rust compiles to native code.",
        "The Rust borrow checker keeps memory safe.",
        "Rust traits are like interfaces.",
        "Rust crates live on a registry.",
        "A glitch in Rust tooling is rare.",
        "Rust async is evolving.",
        "Let us switch to coffee.",
        "Coffee beans come from cherries.",
        "Light roast coffee is acidic.",
        "Dark roast coffee is bitter!",
        "How do you brew coffee at home?",
        "Pour over coffee takes patience.",
        "Espresso is concentrated coffee.",
        "Cold brew coffee steeps overnight.",
        "Coffee grinders matter a lot.",
        "Fresh coffee tastes better!",
        "Decaf coffee still has caffeine.",
        "Coffee culture differs by country.",
        "Thanks for listening to coffee talk.",
    ];
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| SentenceRow::new(*t, 1.0 + (i % 3) as f64))
        .collect()
}

#[test]
fn produces_candidates_clips_and_failures() {
    let store = MemoryEmbeddingStore::new();
    let validator = FixedValidator(Ok(vec![1, 0, 1, 42]));
    let services = Services {
        embedder: &TopicEmbedder,
        store: &store,
        sentiment: &ExclamationSentiment,
        generator: &PrefixGenerator,
        validator: &validator,
    };
    let pipeline = Pipeline::new(PipelineConfig::default(), services);

    let report = pipeline.run("episode-1", rows()).unwrap();

    assert_eq!(report.sentences, 24);
    assert!(report.segments >= 1);
    assert_eq!(report.sentiment_failures, vec![9]);
    assert!(store.exists("episode-1").unwrap());

    let intro = report.highlights.iter().find(|h| h.anchor == 0).unwrap();
    assert!(intro.sources.contains(&"intro"));
    assert!(report.highlights.iter().all(|h| h.context.contains(&h.anchor)));

    assert!(report.failures.iter().any(|f| f.stage == FailureStage::Generation && f.anchor == Some(4)));

    let keys: Vec<&Vec<usize>> = report.candidates.iter().map(|c| &c.indices).collect();
    assert!(!keys.is_empty());
    assert!(keys.iter().all(|k| k.len() == 6 && k.windows(2).all(|w| w[0] < w[1])));
    let distinct: HashSet<_> = keys.iter().collect();
    assert_eq!(distinct.len(), keys.len());

    assert_eq!(report.clips.len(), report.candidates.len().min(2));
    for clip in &report.clips {
        let expected: f64 = clip.spans.iter().map(|s| s.end - s.start).sum();
        assert!((clip.duration - expected).abs() < 1e-9);
        assert_eq!(clip.text, report.candidates[clip.candidate].text);
    }
}

#[test]
fn validation_failure_leaves_no_clips() {
    let store = MemoryEmbeddingStore::new();
    let validator = FixedValidator(Err("quota exceeded"));
    let services = Services {
        embedder: &TopicEmbedder,
        store: &store,
        sentiment: &ExclamationSentiment,
        generator: &PrefixGenerator,
        validator: &validator,
    };
    let pipeline = Pipeline::new(PipelineConfig::default(), services);

    let report = pipeline.run("episode-2", rows()).unwrap();

    assert!(!report.candidates.is_empty());
    assert!(report.clips.is_empty());
    assert!(report.failures.iter().any(|f| f.stage == FailureStage::Validation && f.anchor.is_none()));
}

#[test]
fn undersized_answers_are_rejected() {
    let store = MemoryEmbeddingStore::new();
    let validator = FixedValidator(Ok(vec![0]));
    let services = Services {
        embedder: &TopicEmbedder,
        store: &store,
        sentiment: &ExclamationSentiment,
        generator: &PrefixGenerator,
        validator: &validator,
    };
    let mut config = PipelineConfig::default();
    // No context is this long.
    config.script_bounds.min = 30;
    config.script_bounds.max = 40;
    let pipeline = Pipeline::new(config, services);

    let report = pipeline.run("episode-3", rows()).unwrap();

    assert!(report.candidates.is_empty());
    assert!(report.clips.is_empty());
    assert!(report.failures.iter().any(|f| f.stage == FailureStage::Admission));
}

#[test]
fn stitching_merges_ellipsis_rows() {
    let store = MemoryEmbeddingStore::new();
    let validator = FixedValidator(Ok(vec![]));
    let services = Services {
        embedder: &TopicEmbedder,
        store: &store,
        sentiment: &ExclamationSentiment,
        generator: &PrefixGenerator,
        validator: &validator,
    };
    let config = PipelineConfig {
        stitch_continuations: true,
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(config, services);
    let mut input = rows();
    input[1] = SentenceRow::new("Today we talk about...", 1.0);
    input[2] = SentenceRow::new("...Rust and its garbage-free memory model.", 2.0);

    let transcript = pipeline.prepare("episode-4", input).unwrap();

    assert!(transcript.len() < 24);
    assert_eq!(
        transcript.get(1).unwrap().text,
        "Today we talk about Rust and its garbage-free memory model."
    );
    assert!(store.exists("episode-4.unstitched").unwrap());
}

#[test]
fn empty_transcript_runs_clean() {
    let store = MemoryEmbeddingStore::new();
    let validator = FixedValidator(Err("must not be called"));
    let services = Services {
        embedder: &TopicEmbedder,
        store: &store,
        sentiment: &ExclamationSentiment,
        generator: &PrefixGenerator,
        validator: &validator,
    };
    let pipeline = Pipeline::new(PipelineConfig::default(), services);

    let report = pipeline.run("empty", Vec::new()).unwrap();

    assert_eq!(report.sentences, 0);
    assert_eq!(report.segments, 0);
    assert!(report.highlights.is_empty());
    assert!(report.failures.is_empty());
}

struct NoPrototypeEmbedder;

impl Embedder for NoPrototypeEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, Error> {
        if text == "INTRO PROTOTYPE" {
            return Err(Error::embedding("model overloaded"));
        }
        TopicEmbedder.embed(text)
    }
}

#[test]
fn unavailable_intro_prototype_is_reported() {
    let store = MemoryEmbeddingStore::new();
    let validator = FixedValidator(Ok(vec![0]));
    let services = Services {
        embedder: &NoPrototypeEmbedder,
        store: &store,
        sentiment: &ExclamationSentiment,
        generator: &PrefixGenerator,
        validator: &validator,
    };
    let config = PipelineConfig {
        intro_prototype: "INTRO PROTOTYPE".to_string(),
        ..PipelineConfig::default()
    };
    let pipeline = Pipeline::new(config, services);

    let report = pipeline.run("episode-5", rows()).unwrap();

    let extraction: Vec<_> = report
        .failures
        .iter()
        .filter(|f| f.stage == FailureStage::Extraction)
        .collect();
    assert_eq!(extraction.len(), 1);
    assert!(extraction[0].anchor.is_none());
    assert!(extraction[0].reason.contains("model overloaded"));
    assert!(report.highlights.iter().all(|h| !h.sources.contains(&"intro")));
    assert!(!report.highlights.is_empty());
}
