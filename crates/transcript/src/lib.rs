mod error;
pub mod input;
pub mod keywords;
pub mod stitch;
pub mod timeline;
pub mod tokenize;
pub mod types;

pub use error::*;
pub use input::{read_rows, read_rows_from_path};
pub use keywords::theme_keywords;
pub use stitch::{StitchConfig, stitch};
pub use timeline::{DEFAULT_PAUSE_OFFSET, Span, build_timeline};
pub use tokenize::tokenize;
pub use types::{Sentence, SentenceRow, Transcript};
