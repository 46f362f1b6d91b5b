//! Project memory loading
//!
//! [`LocalContextLoader`] implements the
//! [`ContextLoaderPort`](delegate_application::ContextLoaderPort) defined in
//! the application layer.
//!
//! ```
//! use delegate_infrastructure::LocalContextLoader;
//! use delegate_application::ContextLoaderPort;
//! use std::path::Path;
//!
//! let loader = LocalContextLoader::with_home("/nonexistent-home");
//! let memory = loader.load_project_memory(Path::new("/nonexistent-repo"));
//! assert!(memory.is_empty());
//! ```

mod loader;

pub use loader::LocalContextLoader;
