//! Path domain - what a model-supplied path string may name.
//!
//! - [`PathPolicy`] rejects hostile strings and classifies secrets
//! - [`RelativePath`] is the normalized value every file tool works with

pub mod policy;
pub mod relative;

pub use policy::{PathError, PathPolicy, PathViolation};
pub use relative::RelativePath;
