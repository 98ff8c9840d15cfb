//! Row consolidation ahead of embedding.
//!
//! ASR sentence splitting leaves two kinds of fragments behind: a thought
//! broken across rows with trailing/leading ellipses, and very short
//! interjections that carry on the previous sentence. Both are folded into
//! the preceding row.

use crate::tokenize::tokenize;
use crate::types::SentenceRow;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// Rows with at most this many tokens are candidates for merging.
    pub short_len: usize,
    /// Quantile of adjacent similarity above which a short row is merged.
    pub similarity_quantile: f64,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            short_len: 5,
            similarity_quantile: 0.8,
        }
    }
}

/// Merge continuation rows into their predecessor.
///
/// `adjacent_similarity[i]` is the similarity between row `i` and row
/// `i + 1`. Without it (or with the wrong length) only the ellipsis rule
/// applies. Merged rows sum their durations.
pub fn stitch(
    rows: Vec<SentenceRow>,
    adjacent_similarity: Option<&[f64]>,
    config: &StitchConfig,
) -> Vec<SentenceRow> {
    let similarity = adjacent_similarity.filter(|s| {
        let ok = s.len() + 1 == rows.len();
        if !ok && !rows.is_empty() {
            tracing::warn!(
                rows = rows.len(),
                similarities = s.len(),
                "stitch_similarity_length_mismatch"
            );
        }
        ok
    });
    let cutoff = similarity.and_then(|s| quantile(s, config.similarity_quantile));

    let original_len = rows.len();
    let mut out: Vec<SentenceRow> = Vec::with_capacity(rows.len());

    for (i, row) in rows.into_iter().enumerate() {
        let Some(previous) = out.last_mut() else {
            out.push(row);
            continue;
        };

        let close = match (similarity, cutoff) {
            (Some(s), Some(cutoff)) => s[i - 1] > cutoff,
            _ => false,
        };

        if close && tokenize(&row.text).len() <= config.short_len {
            previous.text = format!("{} {}", previous.text, row.text);
            previous.duration += row.duration;
        } else if previous.text.ends_with(ELLIPSIS) && row.text.starts_with(ELLIPSIS) {
            let head = previous.text.trim_end_matches(ELLIPSIS).trim_end();
            let tail = row.text.trim_start_matches(ELLIPSIS).trim_start();
            previous.text = format!("{head} {tail}");
            previous.duration += row.duration;
        } else {
            out.push(row);
        }
    }

    if out.len() != original_len {
        tracing::debug!(before = original_len, after = out.len(), "rows_stitched");
    }

    out
}

/// Linear-interpolated quantile, `q` in `[0, 1]`.
fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
