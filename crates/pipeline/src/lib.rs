mod config;
mod error;
mod report;
mod run;

pub use config::*;
pub use error::*;
pub use report::*;
pub use run::*;
