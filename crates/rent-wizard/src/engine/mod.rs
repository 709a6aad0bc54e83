//! Engine module for the wizard implementation
//!
//! Provides the core engine, builder pattern, and the shared handle used by
//! UI event loops.

pub mod builder;
pub mod core;
pub mod handle;

pub use builder::WizardBuilder;
pub use core::{NavOutcome, WizardEngine, WizardPhase};
pub use handle::SharedWizard;

pub use crate::progress::{ProgressEntry, StepProgress};
pub use crate::session::{InMemorySessionStore, PersistedSession, SessionStore};
