//! Context module for project memory
//!
//! Delegated tasks carry the developer's standing instructions for AI
//! assistants so the remote model follows the same house rules as a local
//! one. Loading happens in infrastructure; this module only models and
//! renders what was found.
//!
//! # Key Types
//!
//! - [`MemorySource`] - The four places memory is looked up
//! - [`MemorySection`] - One loaded file
//! - [`ProjectMemory`] - Ordered aggregate rendered into the task prompt

pub mod entities;
pub mod value_objects;

pub use entities::ProjectMemory;
pub use value_objects::{MemorySection, MemorySource};
