//! Session persistence
//!
//! [`JsonSessionStore`] implements the
//! [`SessionStore`](delegate_application::SessionStore) port with one small
//! JSON file per session.

mod file_store;

pub use file_store::JsonSessionStore;
