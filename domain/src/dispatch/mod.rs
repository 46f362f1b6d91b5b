//! Dispatch domain - the turn-taking between the remote model and local tools.
//!
//! ```text
//!            ┌──────────────── tool results ───────────────┐
//!            ▼                                              │
//!   AwaitingModel ──(reply with calls)──▶ ExecutingTool ────┘
//!        │  │
//!        │  └──(reply without calls)──▶ Complete
//!        └─────(turn ceiling reached)──▶ Aborted
//! ```

pub mod state;

pub use state::{DispatchOutcome, DispatchPhase, DispatchState};
