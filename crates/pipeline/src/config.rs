use std::path::Path;

use hypr_highlight_interface::LengthBounds;
use hypr_highlights::{DEFAULT_DESIRED_COUNT, DEFAULT_INTRO_PROTOTYPE, SalienceConfig};
use hypr_segmenter::{ContextConfig, SegmenterConfig};
use hypr_transcript::{DEFAULT_PAUSE_OFFSET, StitchConfig};
use serde::{Deserialize, Serialize};

use crate::Error;

pub const DEFAULT_KEYWORD_COUNT: usize = 3;

/// Tunables for one run. Every field has a default, so a config file only
/// needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seconds of silence assumed between consecutive sentences.
    pub pause_offset: f64,
    pub stitch_continuations: bool,
    pub stitch: StitchConfig,
    pub segmenter: SegmenterConfig,
    pub context: ContextConfig,
    pub salience: SalienceConfig,
    pub intro_prototype: String,
    pub script_bounds: LengthBounds,
    pub desired_count: usize,
    pub keyword_count: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pause_offset: DEFAULT_PAUSE_OFFSET,
            stitch_continuations: false,
            stitch: StitchConfig::default(),
            segmenter: SegmenterConfig::default(),
            context: ContextConfig::default(),
            salience: SalienceConfig::default(),
            intro_prototype: DEFAULT_INTRO_PROTOTYPE.to_string(),
            script_bounds: LengthBounds::default(),
            desired_count: DEFAULT_DESIRED_COUNT,
            keyword_count: DEFAULT_KEYWORD_COUNT,
        }
    }
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
