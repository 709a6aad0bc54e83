//! Definiciones relacionadas a pasos del asistente.
//!
//! Un paso es una unidad declarativa de trabajo: identidad estable, metadata
//! de display, condición de visibilidad sobre el `AnswerSet` completo y un
//! gate de validación (síncrono o asíncrono) sobre su propio slice. El
//! payload renderizable que la UI asocia al paso es opaco para el engine.

mod descriptor;

pub use descriptor::StepDescriptor;
