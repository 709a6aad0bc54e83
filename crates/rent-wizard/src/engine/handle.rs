//! Handle compartido para el event loop de UI.
//!
//! Las operaciones del engine toman `&mut self`, de modo que dentro del
//! lenguaje dos `advance` no pueden solaparse. `SharedWizard` es el envoltorio
//! clonable que una UI usa desde varios handlers de eventos; materializa la
//! política de concurrencia del motor: mientras una validación asíncrona está
//! en vuelo, cualquier otra operación se rechaza con `Busy` (no se encola).

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;

use crate::engine::{NavOutcome, WizardEngine};
use crate::errors::WizardError;
use crate::progress::ProgressEntry;
use crate::session::SessionStore;

pub struct SharedWizard<S: SessionStore> {
    inner: Arc<Mutex<WizardEngine<S>>>,
}

impl<S: SessionStore> Clone for SharedWizard<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S: SessionStore> SharedWizard<S> {
    pub fn new(engine: WizardEngine<S>) -> Self {
        Self { inner: Arc::new(Mutex::new(engine)) }
    }

    /// Toma el lock sin esperar; si otra operación está en vuelo → `Busy`.
    fn engine(&self) -> Result<tokio::sync::OwnedMutexGuard<WizardEngine<S>>, WizardError> {
        Arc::clone(&self.inner).try_lock_owned().map_err(|_| WizardError::Busy)
    }

    pub fn update_answers(&self, step_id: &str, partial: Value) -> Result<(), WizardError> {
        self.engine()?.update_answers(step_id, partial)
    }

    /// El lock se sostiene a través del await de la validación: una segunda
    /// llamada concurrente observa `Busy` de forma determinista.
    pub async fn advance(&self) -> Result<NavOutcome, WizardError> {
        let mut guard = self.engine()?;
        guard.advance().await
    }

    pub fn retreat(&self) -> Result<(), WizardError> {
        self.engine()?.retreat()
    }

    pub async fn jump_to(&self, step_id: &str) -> Result<NavOutcome, WizardError> {
        let mut guard = self.engine()?;
        guard.jump_to(step_id).await
    }

    pub fn complete(&self) -> Result<(), WizardError> {
        self.engine()?.complete()
    }

    pub fn cancel(&self) -> Result<(), WizardError> {
        self.engine()?.cancel()
    }

    pub fn progress(&self) -> Result<Vec<ProgressEntry>, WizardError> {
        Ok(self.engine()?.progress())
    }

    pub fn current_step_id(&self) -> Result<String, WizardError> {
        Ok(self.engine()?.current_step_id().to_string())
    }
}
