use hypr_highlight_interface::LengthBounds;

/// Why an oracle-picked subsequence was not admitted as a script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("empty selection")]
    Empty,
    #[error("selection of {len} sentences outside [{}, {}]", .bounds.min, .bounds.max)]
    Length { len: usize, bounds: LengthBounds },
    #[error("sentence {0} selected more than once")]
    Duplicate(usize),
    #[error("sentence {0} is not part of the context")]
    OutsideContext(usize),
}
