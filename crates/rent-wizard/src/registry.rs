//! Filtro de visibilidad: secuencia efectiva de pasos.
//!
//! Función pura y sin efectos: dos llamadas con los mismos inputs devuelven
//! la misma secuencia (el engine depende de esto para reconciliar el paso
//! actual). Nunca se cachea a través de cambios de respuestas.

use crate::answers::AnswerSet;
use crate::step::StepDescriptor;

/// Deriva la secuencia efectiva: subsecuencia de `steps` (orden del caller
/// preservado) cuyos predicados `visible` aceptan el `AnswerSet` actual.
/// Cada predicado recibe el set COMPLETO, no sólo su propio slice.
pub fn effective_sequence<'a>(steps: &'a [Box<dyn StepDescriptor>],
                              answers: &AnswerSet)
                              -> Vec<&'a dyn StepDescriptor> {
    steps.iter()
         .filter(|s| s.visible(answers))
         .map(|s| s.as_ref())
         .collect()
}

/// Posición de un paso dentro de una secuencia efectiva.
pub fn position_of(sequence: &[&dyn StepDescriptor], step_id: &str) -> Option<usize> {
    sequence.iter().position(|s| s.id() == step_id)
}
