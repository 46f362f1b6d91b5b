//! Use cases (application services)
//!
//! - [`dispatch_loop`] — the model ↔ tool turn loop over one conversation
//! - [`delegate`] — session resolution followed by a dispatch run

pub mod delegate;
pub mod dispatch_loop;
