mod embed;
mod error;
mod oracle;
mod sentiment;

pub use embed::*;
pub use error::*;
pub use oracle::*;
pub use sentiment::*;
