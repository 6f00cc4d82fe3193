//! Cursor motion sampling and direction classification.

mod direction;
mod sampler;

pub use direction::*;
pub use sampler::*;
