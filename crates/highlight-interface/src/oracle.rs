use crate::Error;

/// Inclusive length bounds for an accepted sentence subsequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LengthBounds {
    pub min: usize,
    pub max: usize,
}

impl LengthBounds {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, len: usize) -> bool {
        len >= self.min && len <= self.max
    }
}

impl Default for LengthBounds {
    fn default() -> Self {
        Self { min: 6, max: 12 }
    }
}

/// Everything the generation oracle sees for one anchor.
///
/// `context_indices` and `context_texts` are parallel slices in ascending
/// sentence order.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub anchor: usize,
    pub context_indices: &'a [usize],
    pub context_texts: &'a [&'a str],
    pub theme_keywords: &'a [String],
    pub bounds: LengthBounds,
}

impl<'a> GenerationRequest<'a> {
    /// `(index, text)` pairs of the context.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        self.context_indices
            .iter()
            .copied()
            .zip(self.context_texts.iter().copied())
    }
}

/// Picks an ordered subsequence of the context that reads as a standalone
/// passage. An empty result means "no candidate".
pub trait GenerationOracle: Send + Sync {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Vec<usize>, Error>;
}

/// Picks up to `desired` entries out of a numbered list of scripts. Returned
/// values index into `scripts`; the caller checks range and uniqueness.
pub trait ValidationOracle: Send + Sync {
    fn validate(&self, scripts: &[String], desired: usize) -> Result<Vec<usize>, Error>;
}

impl<T: GenerationOracle + ?Sized> GenerationOracle for &T {
    fn generate(&self, request: &GenerationRequest<'_>) -> Result<Vec<usize>, Error> {
        (**self).generate(request)
    }
}

impl<T: ValidationOracle + ?Sized> ValidationOracle for &T {
    fn validate(&self, scripts: &[String], desired: usize) -> Result<Vec<usize>, Error> {
        (**self).validate(scripts, desired)
    }
}
