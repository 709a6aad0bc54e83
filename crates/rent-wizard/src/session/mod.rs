//! Persistencia de sesiones y trait `SessionStore`.

mod store;
mod types;

pub use store::{InMemorySessionStore, SessionStore};
pub use types::PersistedSession;
