//! Proyección de progreso (sólo lectura).
//!
//! Proyección pura del estado del engine a un indicador lineal para display.
//! No muta nada y es segura de recomputar en cada render: dos llamadas con
//! inputs idénticos producen salida idéntica.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::step::StepDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepProgress {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEntry {
    pub id: String,
    pub title: String,
    pub status: StepProgress,
}

/// Proyecta la secuencia efectiva a entradas de progreso. El paso actual es
/// `Current` aunque figure en el set de completados (caso retreat).
pub fn project(sequence: &[&dyn StepDescriptor],
               current_id: &str,
               completed: &IndexSet<String>)
               -> Vec<ProgressEntry> {
    sequence.iter()
            .map(|step| {
                let status = if step.id() == current_id {
                    StepProgress::Current
                } else if completed.contains(step.id()) {
                    StepProgress::Completed
                } else {
                    StepProgress::Upcoming
                };
                ProgressEntry { id: step.id().to_string(),
                                title: step.title().to_string(),
                                status }
            })
            .collect()
}
