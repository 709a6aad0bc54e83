//! Implementación en disco del trait `SessionStore` del core.
//!
//! Objetivo general del módulo:
//! - Un documento JSON por clave de sesión bajo un directorio configurable,
//!   con paridad 1:1 respecto al backend en memoria.
//! - Escritura casi-atómica: archivo temporal + rename, para que un reload a
//!   mitad de escritura nunca observe un documento truncado.
//! - `load` tolera clave inexistente (`None`); un documento ilegible se
//!   reporta como error de decodificación (el engine arranca fresco y lo
//!   loguea).
//!
//! Sin coordinación entre procesos: el contrato del core es last-write-wins
//! para un único engine dueño de su clave.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use rent_wizard::{PersistedSession, SessionStore, SessionStoreError};

use crate::config::SessionsConfig;
use crate::error::PersistenceError;

pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Construye el store con el directorio de `SESSIONS_DIR` (o su default).
    pub fn from_env() -> Self {
        Self::new(SessionsConfig::from_env().dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Nombre de archivo para una clave. Caracteres fuera de
    /// `[A-Za-z0-9._-]` se reemplazan por `_` (las claves del marketplace
    /// son UUIDs o slugs, la colisión no es un caso real).
    fn path_for(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        if key.is_empty() {
            return Err(PersistenceError::InvalidKey("empty session key".into()));
        }
        let sanitized: String = key.chars()
                                   .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
                                   .collect();
        Ok(self.dir.join(format!("{sanitized}.json")))
    }

    fn read(&self, key: &str) -> Result<Option<PersistedSession>, PersistenceError> {
        let path = self.path_for(key)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let session: PersistedSession = serde_json::from_str(&raw)?;
        Ok(Some(session))
    }

    fn write(&self, key: &str, session: &PersistedSession) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_vec_pretty(session)?;
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &path)?;
        debug!("session '{key}' written to {}", path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            // delete de clave inexistente es no-op exitoso (contrato core).
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self, key: &str) -> Result<Option<PersistedSession>, SessionStoreError> {
        self.read(key).map_err(SessionStoreError::from)
    }

    fn save(&mut self, key: &str, session: &PersistedSession) -> Result<(), SessionStoreError> {
        self.write(key, session).map_err(SessionStoreError::from)
    }

    fn delete(&mut self, key: &str) -> Result<(), SessionStoreError> {
        self.remove(key).map_err(SessionStoreError::from)
    }
}
