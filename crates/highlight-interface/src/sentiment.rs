use crate::Error;

/// Three-way sentiment probabilities for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct SentimentScores {
    pub negative: f32,
    pub neutral: f32,
    pub positive: f32,
}

impl SentimentScores {
    pub fn new(negative: f32, neutral: f32, positive: f32) -> Self {
        Self {
            negative,
            neutral,
            positive,
        }
    }

    /// How far the text is from neutral, `1 - neutral`.
    pub fn emotion(&self) -> f32 {
        1.0 - self.neutral
    }

    /// Rescale so the three probabilities sum to one. All-zero input is
    /// returned unchanged.
    pub fn normalized(self) -> Self {
        let total = self.negative + self.neutral + self.positive;
        if total <= 0.0 || !total.is_finite() {
            return self;
        }
        Self {
            negative: self.negative / total,
            neutral: self.neutral / total,
            positive: self.positive / total,
        }
    }
}

pub trait SentimentClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<SentimentScores, Error>;
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for &T {
    fn classify(&self, text: &str) -> Result<SentimentScores, Error> {
        (**self).classify(text)
    }
}
