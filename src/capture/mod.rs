//! The composite capture subsystem and its builder.

mod builder;
mod system;

pub use builder::*;
pub use system::*;
