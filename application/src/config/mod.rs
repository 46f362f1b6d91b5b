//! Application-level configuration.
//!
//! - [`ExecutionParams`] — dispatch loop control (turn ceiling, model, effort)
//! - [`DelegateMode`] — review vs execute runs

pub mod delegate_mode;
pub mod execution_params;

pub use delegate_mode::DelegateMode;
pub use execution_params::ExecutionParams;
