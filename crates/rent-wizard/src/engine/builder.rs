//! Builder para `WizardEngine`.
//!
//! Concentra la construcción/restauración del run:
//! - Valida la lista de descriptores (no vacía, ids únicos, al menos un paso
//!   visible con las respuestas iniciales).
//! - Si hay clave de sesión y un snapshot persistido bajo ella, restaura el
//!   `RunState` fusionando las respuestas iniciales DEBAJO de las
//!   restauradas.
//! - Un `load` fallido del backend no es fatal: se loguea y el run arranca
//!   fresco (misma política best-effort que los `save`).

use indexmap::IndexSet;
use log::{debug, warn};

use crate::answers::AnswerSet;
use crate::engine::core::{CancelHook, CompletionHook, WizardEngine, WizardPhase};
use crate::errors::WizardError;
use crate::registry::{effective_sequence, position_of};
use crate::session::SessionStore;
use crate::step::StepDescriptor;

pub struct WizardBuilder<S: SessionStore> {
    store: S,
    steps: Vec<Box<dyn StepDescriptor>>,
    initial_answers: AnswerSet,
    session_key: Option<String>,
    allow_skip_ahead: bool,
    on_complete: Option<CompletionHook>,
    on_cancel: Option<CancelHook>,
}

impl<S: SessionStore> WizardBuilder<S> {
    pub(crate) fn with_store(store: S) -> Self {
        Self { store,
               steps: Vec::new(),
               initial_answers: AnswerSet::new(),
               session_key: None,
               allow_skip_ahead: false,
               on_complete: None,
               on_cancel: None }
    }

    /// Reemplaza la lista completa de pasos (orden del caller).
    pub fn steps(mut self, steps: Vec<Box<dyn StepDescriptor>>) -> Self {
        self.steps = steps;
        self
    }

    /// Agrega un paso al final de la lista.
    pub fn add_step(mut self, step: Box<dyn StepDescriptor>) -> Self {
        self.steps.push(step);
        self
    }

    /// Respuestas previas del caller; en una restauración quedan debajo de
    /// las persistidas.
    pub fn initial_answers(mut self, answers: AnswerSet) -> Self {
        self.initial_answers = answers;
        self
    }

    /// Habilita persistencia/restauración bajo esta clave.
    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = Some(key.into());
        self
    }

    /// Permite `jump_to` hacia adelante (gate del paso actual mediante).
    pub fn allow_skip_ahead(mut self, allow: bool) -> Self {
        self.allow_skip_ahead = allow;
        self
    }

    /// Callback de completion, invocado exactamente una vez con el
    /// `AnswerSet` completo.
    pub fn on_complete(mut self, hook: impl FnOnce(AnswerSet) + Send + Sync + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    /// Callback de cancelación, invocado exactamente una vez. Mutuamente
    /// excluyente con el de completion.
    pub fn on_cancel(mut self, hook: impl FnOnce() + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }

    /// Construye el engine, restaurando sesión si corresponde.
    pub fn build(self) -> Result<WizardEngine<S>, WizardError> {
        if self.steps.is_empty() {
            return Err(WizardError::Configuration("step list is empty".into()));
        }
        let mut seen: IndexSet<&str> = IndexSet::new();
        for step in &self.steps {
            if !seen.insert(step.id()) {
                return Err(WizardError::Configuration(format!("duplicate step id '{}'", step.id())));
            }
        }

        let mut answers = self.initial_answers;
        let mut completed: IndexSet<String> = IndexSet::new();
        let mut restored_current: Option<String> = None;

        if let Some(key) = &self.session_key {
            match self.store.load(key) {
                Ok(Some(session)) => {
                    debug!("restoring wizard session '{key}' (saved_at={})", session.saved_at);
                    answers.overlay(&session.answers);
                    completed = session.completed_step_ids
                                       .into_iter()
                                       .filter(|id| self.steps.iter().any(|s| s.id() == id))
                                       .collect();
                    restored_current = Some(session.current_step_id);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("session load failed for key '{key}', starting fresh: {e}");
                }
            }
        }

        let seq = effective_sequence(&self.steps, &answers);
        if seq.is_empty() {
            return Err(WizardError::Configuration("no step is visible with the initial answers".into()));
        }
        let first_visible = seq[0].id().to_string();

        // El current restaurado puede haber quedado invisible (o venir de una
        // definición vieja); se reconcilia con la misma regla del engine.
        let current = match restored_current {
            Some(id) if position_of(&seq, &id).is_some() => id,
            Some(id) => {
                drop(seq);
                let mut engine = WizardEngine { steps: self.steps,
                                                store: self.store,
                                                session_key: self.session_key,
                                                answers,
                                                current: id,
                                                completed,
                                                allow_skip_ahead: self.allow_skip_ahead,
                                                phase: WizardPhase::Active,
                                                on_complete: self.on_complete,
                                                on_cancel: self.on_cancel };
                engine.reconcile_current();
                return Ok(engine);
            }
            None => first_visible,
        };

        Ok(WizardEngine { steps: self.steps,
                          store: self.store,
                          session_key: self.session_key,
                          answers,
                          current,
                          completed,
                          allow_skip_ahead: self.allow_skip_ahead,
                          phase: WizardPhase::Active,
                          on_complete: self.on_complete,
                          on_cancel: self.on_cancel })
    }
}
