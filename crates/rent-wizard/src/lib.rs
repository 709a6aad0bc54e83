//! rent-wizard: motor genérico de asistentes multi-paso.
//!
//! Orquesta los dos flujos del marketplace (reserva y onboarding de
//! operadores) sin conocer sus UIs: secuencia pasos sobre una lista filtrada
//! dinámicamente por visibilidad, aplica el gate de validación (sync o async)
//! antes de avanzar, persiste/restaura sesiones en progreso contra un
//! `SessionStore` inyectado y entrega el `AnswerSet` consolidado al callback
//! de completion.
pub mod answers;
pub mod engine;
pub mod errors;
pub mod progress;
pub mod registry;
pub mod session;
pub mod step;

pub use answers::AnswerSet;
pub use engine::{NavOutcome, SharedWizard, WizardBuilder, WizardEngine, WizardPhase};
pub use errors::{SessionStoreError, StepFault, WizardError};
pub use progress::{project, ProgressEntry, StepProgress};
pub use registry::{effective_sequence, position_of};
pub use session::{InMemorySessionStore, PersistedSession, SessionStore};
pub use step::StepDescriptor;
