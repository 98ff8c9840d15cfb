mod cache;
mod error;
mod similarity;

pub use cache::*;
pub use error::*;
pub use similarity::*;
