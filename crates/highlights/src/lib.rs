mod aggregate;
mod emotion;
mod error;
mod extractors;
mod script;
mod selection;

pub use aggregate::*;
pub use emotion::*;
pub use error::*;
pub use extractors::*;
pub use script::*;
pub use selection::*;
