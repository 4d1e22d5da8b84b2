//! Shared infrastructure for the diagram pipeline

mod error;
pub mod logging;

pub use error::*;
pub use logging::*;
