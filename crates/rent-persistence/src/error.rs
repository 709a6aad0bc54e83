//! Errores de persistencia.
//! Mapea errores de IO / serde a variantes semánticas del dominio de
//! persistencia, y de ahí al `SessionStoreError` neutro que el core espera.

use rent_wizard::SessionStoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("session key unusable as file name: {0}")]
    InvalidKey(String),
    #[error("corrupt session document: {0}")]
    Corrupt(String),
    #[error("transient IO error: {0}")]
    TransientIo(String),
}

impl From<std::io::Error> for PersistenceError {
    fn from(err: std::io::Error) -> Self {
        Self::TransientIo(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Corrupt(err.to_string())
    }
}

impl From<PersistenceError> for SessionStoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::InvalidKey(m) => SessionStoreError::Backend(m),
            PersistenceError::Corrupt(m) => SessionStoreError::Decode(m),
            PersistenceError::TransientIo(m) => SessionStoreError::Io(m),
        }
    }
}
