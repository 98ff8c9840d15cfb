use crate::Error;

/// Silence between consecutive sentences that the source durations leave out.
pub const DEFAULT_PAUSE_OFFSET: f64 = 0.23;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Lay sentences end to end starting at `t = 0`, each one lasting its raw
/// duration plus `pause_offset`.
///
/// `spans[i + 1].start` is taken from `spans[i].end` rather than re-summed,
/// so consecutive spans touch exactly.
pub fn build_timeline(durations: &[f64], pause_offset: f64) -> Result<Vec<Span>, Error> {
    if !pause_offset.is_finite() || pause_offset < 0.0 {
        return Err(Error::InvalidPauseOffset(pause_offset));
    }

    let mut spans = Vec::with_capacity(durations.len());
    let mut cursor = 0.0;

    for (index, &duration) in durations.iter().enumerate() {
        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidDuration {
                index,
                value: duration,
            });
        }

        let end = cursor + duration + pause_offset;
        spans.push(Span { start: cursor, end });
        cursor = end;
    }

    Ok(spans)
}
