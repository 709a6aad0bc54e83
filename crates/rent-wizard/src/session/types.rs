//! Snapshot serializable de un run en progreso.
//!
//! Rol en el asistente:
//! - Cada mutación con persistencia habilitada sobreescribe el snapshot bajo
//!   la clave de sesión del caller.
//! - `complete()`/`cancel()` lo borran antes de invocar el callback.
//! - No hay TTL en este subsistema: la política de vencimiento es del caller.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub current_step_id: String,
    pub answers: AnswerSet,
    pub completed_step_ids: Vec<String>,
    /// Metadato de auditoría; no participa de la restauración.
    pub saved_at: DateTime<Utc>,
}

impl PersistedSession {
    pub fn new(current_step_id: impl Into<String>,
               answers: AnswerSet,
               completed_step_ids: Vec<String>)
               -> Self {
        Self { current_step_id: current_step_id.into(),
               answers,
               completed_step_ids,
               saved_at: Utc::now() }
    }
}
