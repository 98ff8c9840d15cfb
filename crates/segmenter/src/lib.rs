mod activation;
mod context;
mod minima;
mod segmentation;

pub use activation::*;
pub use context::*;
pub use minima::*;
pub use segmentation::*;
