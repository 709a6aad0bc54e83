//! Errores del motor de asistentes (taxonomía cerrada).
//!
//! Todas las variantes son fallos locales y síncronos: se devuelven al caller
//! inmediato de la operación que los produjo y nunca invalidan el `RunState`
//! del engine. Ninguna variante es fatal salvo `Configuration`, que se emite
//! una única vez en la construcción.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum WizardError {
    /// Lista de pasos vacía o malformada al construir. Fatal, sin retry.
    #[error("invalid wizard configuration: {0}")]
    Configuration(String),
    /// El `step_id` no pertenece a la lista de descriptores del run.
    #[error("unknown step id: {0}")]
    UnknownStep(String),
    /// Ya hay un `advance`/`jump_to` con validación en vuelo; la segunda
    /// llamada concurrente se rechaza, no se encola.
    #[error("a navigation call is already in flight")]
    Busy,
    /// El destino de `jump_to` está adelante sin skip-ahead habilitado, no
    /// es visible en la secuencia efectiva actual, o el gate del paso actual
    /// no pasó antes del salto hacia adelante.
    #[error("skip ahead to step '{target}' not allowed")]
    SkipNotAllowed { target: String },
    /// Operación de navegación después de `complete()`/`cancel()`. Indica un
    /// bug del caller (la UI debería desmontarse al terminar).
    #[error("wizard already reached a terminal state")]
    TerminalState,
}

/// Falla interna de un validador de paso (el equivalente a una excepción
/// lanzada dentro de `validate`). El engine la captura, la loguea y la trata
/// como validación negativa; nunca se propaga al caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("step validation fault: {0}")]
pub struct StepFault(pub String);

impl From<String> for StepFault {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

impl From<&str> for StepFault {
    fn from(msg: &str) -> Self {
        Self(msg.to_string())
    }
}

/// Errores del backend de sesiones. Para el engine son no-fatales: un `save`
/// o `delete` fallido se loguea y la navegación continúa sólo en memoria.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStoreError {
    #[error("session io error: {0}")]
    Io(String),
    #[error("session decode error: {0}")]
    Decode(String),
    #[error("session backend error: {0}")]
    Backend(String),
}
