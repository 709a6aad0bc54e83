use std::collections::HashMap;

use super::PersistedSession;
use crate::errors::SessionStoreError;

/// Persistencia opaca de sesiones, clave-valor por string.
///
/// Contrato que el engine asume:
/// - `load` devuelve `None` si la clave no existe (no es error).
/// - `save` es best-effort y last-write-wins; el engine nunca bloquea
///   navegación por un `save` fallido.
/// - `delete` sobre una clave inexistente es no-op exitoso.
/// No se exige coordinación entre procesos: un solo engine escribe su clave.
pub trait SessionStore: Send {
    fn load(&self, key: &str) -> Result<Option<PersistedSession>, SessionStoreError>;
    fn save(&mut self, key: &str, session: &PersistedSession) -> Result<(), SessionStoreError>;
    fn delete(&mut self, key: &str) -> Result<(), SessionStoreError>;
}

/// Backend en memoria (tests y fakes). `Clone` permite simular recuperación:
/// un segundo engine construido sobre el clon ve lo persistido por el
/// primero.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    pub inner: HashMap<String, PersistedSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self, key: &str) -> Result<Option<PersistedSession>, SessionStoreError> {
        Ok(self.inner.get(key).cloned())
    }

    fn save(&mut self, key: &str, session: &PersistedSession) -> Result<(), SessionStoreError> {
        self.inner.insert(key.to_string(), session.clone());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), SessionStoreError> {
        self.inner.remove(key);
        Ok(())
    }
}
