//! Core WizardEngine implementation

use indexmap::IndexSet;
use log::{debug, warn};
use serde_json::Value;

use crate::answers::AnswerSet;
use crate::engine::WizardBuilder;
use crate::errors::WizardError;
use crate::progress::{self, ProgressEntry};
use crate::registry::{effective_sequence, position_of};
use crate::session::{InMemorySessionStore, PersistedSession, SessionStore};
use crate::step::StepDescriptor;

/// Fase del run. `Completed` y `Cancelled` son terminales: ninguna
/// transición sale de ellas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Active,
    Completed,
    Cancelled,
}

/// Resultado de una operación de navegación hacia adelante.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// El paso actual cambió.
    Moved,
    /// No quedaba entrada siguiente: el run se completó implícitamente.
    Completed,
    /// La validación del paso actual falló; el `RunState` quedó intacto.
    Denied,
}

pub(crate) type CompletionHook = Box<dyn FnOnce(AnswerSet) + Send + Sync>;
pub(crate) type CancelHook = Box<dyn FnOnce() + Send + Sync>;

/// Motor del asistente multi-paso.
///
/// Dueño único y mutador exclusivo del `RunState` {paso actual, respuestas,
/// completados}. Secuencia pasos sobre la lista efectiva (filtrada por
/// visibilidad), aplica el gate de validación antes de avanzar y persiste el
/// snapshot de sesión en cada mutación si hay clave configurada.
///
/// Invariante central: el paso actual siempre pertenece a la secuencia
/// efectiva derivada de las respuestas actuales. Cuando una mutación de
/// respuestas vuelve invisible al paso actual, el engine lo reconcilia al
/// paso visible más cercano en o antes de su posición anterior (orden del
/// caller), con fallback al primer visible.
pub struct WizardEngine<S: SessionStore = InMemorySessionStore> {
    pub(crate) steps: Vec<Box<dyn StepDescriptor>>,
    pub(crate) store: S,
    pub(crate) session_key: Option<String>,
    pub(crate) answers: AnswerSet,
    pub(crate) current: String,
    pub(crate) completed: IndexSet<String>,
    pub(crate) allow_skip_ahead: bool,
    pub(crate) phase: WizardPhase,
    pub(crate) on_complete: Option<CompletionHook>,
    pub(crate) on_cancel: Option<CancelHook>,
}

impl<S: SessionStore> std::fmt::Debug for WizardEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardEngine")
         .field("session_key", &self.session_key)
         .field("current", &self.current)
         .field("completed", &self.completed)
         .field("allow_skip_ahead", &self.allow_skip_ahead)
         .field("phase", &self.phase)
         .finish_non_exhaustive()
    }
}

impl WizardEngine<InMemorySessionStore> {
    /// Builder con store en memoria (tests, runs sin persistencia).
    pub fn builder() -> WizardBuilder<InMemorySessionStore> {
        WizardBuilder::with_store(InMemorySessionStore::new())
    }
}

impl<S: SessionStore> WizardEngine<S> {
    /// Builder sobre un backend de sesiones concreto.
    pub fn builder_with_store(store: S) -> WizardBuilder<S> {
        WizardBuilder::with_store(store)
    }

    // ------------------------------------------------------------------
    // Lecturas
    // ------------------------------------------------------------------

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn current_step_id(&self) -> &str {
        &self.current
    }

    /// Descriptor del paso actual.
    pub fn current_step(&self) -> &dyn StepDescriptor {
        self.descriptor(&self.current)
            .unwrap_or_else(|| unreachable!("current step id siempre pertenece a la lista"))
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn completed_ids(&self) -> &IndexSet<String> {
        &self.completed
    }

    pub fn skip_ahead_enabled(&self) -> bool {
        self.allow_skip_ahead
    }

    /// Acceso al backend de sesiones (tests de purga).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ids de la secuencia efectiva actual.
    pub fn effective_ids(&self) -> Vec<String> {
        effective_sequence(&self.steps, &self.answers).iter()
                                                      .map(|s| s.id().to_string())
                                                      .collect()
    }

    /// Proyección de progreso para display (ver `progress::project`).
    pub fn progress(&self) -> Vec<ProgressEntry> {
        let seq = effective_sequence(&self.steps, &self.answers);
        progress::project(&seq, &self.current, &self.completed)
    }

    fn descriptor(&self, step_id: &str) -> Option<&dyn StepDescriptor> {
        self.steps.iter().find(|s| s.id() == step_id).map(|s| s.as_ref())
    }

    fn ensure_active(&self) -> Result<(), WizardError> {
        match self.phase {
            WizardPhase::Active => Ok(()),
            _ => Err(WizardError::TerminalState),
        }
    }

    // ------------------------------------------------------------------
    // Mutaciones
    // ------------------------------------------------------------------

    /// Fusiona `partial` en el slice de `step_id` y reconcilia el paso
    /// actual (la visibilidad puede haber cambiado). No mueve el cursor
    /// salvo que la reconciliación lo exija para mantener el invariante.
    pub fn update_answers(&mut self, step_id: &str, partial: Value) -> Result<(), WizardError> {
        self.ensure_active()?;
        if self.descriptor(step_id).is_none() {
            return Err(WizardError::UnknownStep(step_id.to_string()));
        }
        self.answers.merge(step_id, partial);
        self.reconcile_current();
        self.persist();
        Ok(())
    }

    /// Avanza al siguiente paso visible, previa validación del actual.
    ///
    /// El slice validado es un snapshot tomado al entrar: un `update_answers`
    /// posterior no cambia lo que este gate evalúa. Un `Err` del validador se
    /// captura, se loguea y cuenta como validación negativa (la navegación se
    /// niega, no se crashea). Si no hay entrada siguiente en la secuencia
    /// recomputada, completa el run implícitamente.
    pub async fn advance(&mut self) -> Result<NavOutcome, WizardError> {
        self.ensure_active()?;

        let slice = self.answers.slice_or_empty(&self.current);
        let passed = self.run_validation(&self.current, &slice).await;
        if !passed {
            return Ok(NavOutcome::Denied);
        }

        self.completed.insert(self.current.clone());

        // Recomputar SIEMPRE después del gate: las condiciones de visibilidad
        // dependen de respuestas que pudieron entrar antes de este advance.
        let seq = effective_sequence(&self.steps, &self.answers);
        let pos = match position_of(&seq, &self.current) {
            Some(p) => p,
            None => {
                // El actual quedó invisible entre medio; reconciliar y
                // reintentar la posición sobre la misma secuencia.
                drop(seq);
                self.reconcile_current();
                let seq = effective_sequence(&self.steps, &self.answers);
                match position_of(&seq, &self.current) {
                    Some(p) => p,
                    None => return Ok(NavOutcome::Denied),
                }
            }
        };

        let seq = effective_sequence(&self.steps, &self.answers);
        if pos + 1 < seq.len() {
            self.current = seq[pos + 1].id().to_string();
            self.persist();
            Ok(NavOutcome::Moved)
        } else {
            self.finish_completed();
            Ok(NavOutcome::Completed)
        }
    }

    /// Retrocede a la entrada inmediatamente anterior de la secuencia
    /// efectiva. Sin validación: retroceder siempre está permitido. No-op en
    /// el primer paso.
    pub fn retreat(&mut self) -> Result<(), WizardError> {
        self.ensure_active()?;
        let seq = effective_sequence(&self.steps, &self.answers);
        let pos = position_of(&seq, &self.current).unwrap_or(0);
        if pos == 0 {
            return Ok(());
        }
        self.current = seq[pos - 1].id().to_string();
        self.persist();
        Ok(())
    }

    /// Salta directamente a `step_id`.
    ///
    /// Hacia atrás o a la misma posición: siempre permitido, sin validación
    /// (esos pasos ya fueron completados o son el actual). Hacia adelante:
    /// sólo con skip-ahead habilitado Y la validación del paso actual en
    /// verde; si el gate falla se rechaza con `SkipNotAllowed` sin mover
    /// nada. Un destino fuera de la secuencia efectiva también se rechaza
    /// con `SkipNotAllowed`.
    pub async fn jump_to(&mut self, step_id: &str) -> Result<NavOutcome, WizardError> {
        self.ensure_active()?;
        if self.descriptor(step_id).is_none() {
            return Err(WizardError::UnknownStep(step_id.to_string()));
        }

        let seq = effective_sequence(&self.steps, &self.answers);
        let target_pos = match position_of(&seq, step_id) {
            Some(p) => p,
            // Visible no está: aterrizar ahí violaría el invariante.
            None => return Err(WizardError::SkipNotAllowed { target: step_id.to_string() }),
        };
        let current_pos = position_of(&seq, &self.current).unwrap_or(0);

        if target_pos <= current_pos {
            self.current = step_id.to_string();
            self.persist();
            return Ok(NavOutcome::Moved);
        }

        if !self.allow_skip_ahead {
            return Err(WizardError::SkipNotAllowed { target: step_id.to_string() });
        }

        let slice = self.answers.slice_or_empty(&self.current);
        if !self.run_validation(&self.current, &slice).await {
            return Err(WizardError::SkipNotAllowed { target: step_id.to_string() });
        }

        self.completed.insert(self.current.clone());
        self.current = step_id.to_string();
        self.persist();
        Ok(NavOutcome::Moved)
    }

    /// Cierre explícito (acción de UI del último paso) o implícito (via
    /// `advance` más allá del final). Borra la sesión persistida ANTES de
    /// invocar el callback de completion, exactamente una vez, con el
    /// `AnswerSet` completo. El engine queda terminal.
    pub fn complete(&mut self) -> Result<(), WizardError> {
        self.ensure_active()?;
        self.finish_completed();
        Ok(())
    }

    /// Cancela el run: borra la sesión, invoca el callback de cancelación y
    /// deja el engine terminal.
    pub fn cancel(&mut self) -> Result<(), WizardError> {
        self.ensure_active()?;
        self.purge_session();
        self.phase = WizardPhase::Cancelled;
        if let Some(hook) = self.on_cancel.take() {
            hook();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internos
    // ------------------------------------------------------------------

    async fn run_validation(&self, step_id: &str, slice: &Value) -> bool {
        let step = match self.descriptor(step_id) {
            Some(s) => s,
            None => return false,
        };
        match step.validate(slice).await {
            Ok(passed) => passed,
            Err(fault) => {
                warn!("validator of step '{step_id}' faulted, treating as failure: {fault}");
                false
            }
        }
    }

    /// Restituye el invariante `current ∈ secuencia efectiva`.
    ///
    /// Regla (decisión sobre la ambigüedad de la fuente): si el actual quedó
    /// invisible, mover al paso visible más cercano EN O ANTES de su posición
    /// anterior en el orden del caller; si no hay ninguno, al primer visible.
    /// La marca de completado de un paso que se oculta se conserva.
    pub(crate) fn reconcile_current(&mut self) {
        let seq = effective_sequence(&self.steps, &self.answers);
        if position_of(&seq, &self.current).is_some() {
            return;
        }
        if seq.is_empty() {
            // Degenerado: todas las condiciones apagadas. Sin candidato al
            // cual reconciliar; el caller verá la secuencia vacía.
            warn!("effective sequence became empty; current step '{}' left as-is", self.current);
            return;
        }

        let former = self.steps.iter().position(|s| s.id() == self.current).unwrap_or(0);
        let fallback = self.steps[..former]
                           .iter()
                           .rev()
                           .find(|s| position_of(&seq, s.id()).is_some())
                           .map(|s| s.id().to_string())
                           .unwrap_or_else(|| seq[0].id().to_string());
        debug!("current step '{}' no longer visible, reconciled to '{}'", self.current, fallback);
        self.current = fallback;
    }

    fn finish_completed(&mut self) {
        self.purge_session();
        self.phase = WizardPhase::Completed;
        if let Some(hook) = self.on_complete.take() {
            hook(self.answers.clone());
        }
    }

    /// Persistencia best-effort: un fallo de IO se loguea y la navegación
    /// sigue sólo en memoria.
    fn persist(&mut self) {
        let key = match &self.session_key {
            Some(k) => k.clone(),
            None => return,
        };
        let snapshot = PersistedSession::new(self.current.clone(),
                                             self.answers.clone(),
                                             self.completed.iter().cloned().collect());
        if let Err(e) = self.store.save(&key, &snapshot) {
            warn!("session save failed for key '{key}': {e}");
        }
    }

    fn purge_session(&mut self) {
        if let Some(key) = self.session_key.clone() {
            if let Err(e) = self.store.delete(&key) {
                warn!("session delete failed for key '{key}': {e}");
            }
        }
    }
}
