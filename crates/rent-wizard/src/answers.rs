//! Conjunto de respuestas acumuladas (`AnswerSet`).
//!
//! Mapea `step_id -> slice` donde cada slice es un objeto JSON cuyo shape es
//! propiedad exclusiva del paso (el engine no interpreta su semántica).
//! Invariantes:
//! - Existe a lo sumo un slice por `step_id`.
//! - Escrituras posteriores se FUSIONAN en el slice existente (merge
//!   superficial de claves), nunca lo reemplazan completo.
//! - Toda mutación pasa por el engine (`update_answers`); este tipo sólo
//!   provee la mecánica de merge y lectura.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    slices: IndexMap<String, Value>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slice crudo de un paso, si existe.
    pub fn slice(&self, step_id: &str) -> Option<&Value> {
        self.slices.get(step_id)
    }

    /// Slice de un paso, u objeto vacío si aún no respondió nada. Copia
    /// dueña: es el snapshot que el engine entrega a `validate`.
    pub fn slice_or_empty(&self, step_id: &str) -> Value {
        self.slices.get(step_id).cloned().unwrap_or_else(|| json!({}))
    }

    /// Lectura puntual de un campo dentro del slice de un paso.
    pub fn field(&self, step_id: &str, name: &str) -> Option<&Value> {
        self.slices.get(step_id).and_then(|slice| slice.get(name))
    }

    /// Azúcar para condiciones de visibilidad: `true` sólo si el campo
    /// existe y es exactamente `true`.
    pub fn flag(&self, step_id: &str, name: &str) -> bool {
        matches!(self.field(step_id, name), Some(Value::Bool(true)))
    }

    /// Fusiona `partial` dentro del slice de `step_id`.
    ///
    /// Si ambos lados son objetos JSON el merge es superficial por clave
    /// (claves nuevas se agregan, claves repetidas se sobreescriben). Un
    /// `partial` no-objeto reemplaza el slot completo; es una escotilla para
    /// pasos con respuesta escalar, no el camino normal.
    pub fn merge(&mut self, step_id: &str, partial: Value) {
        match (self.slices.get_mut(step_id), partial) {
            (Some(Value::Object(existing)), Value::Object(incoming)) => {
                for (k, v) in incoming {
                    existing.insert(k, v);
                }
            }
            (_, value) => {
                self.slices.insert(step_id.to_string(), value);
            }
        }
    }

    /// Superpone todos los slices de `other` sobre `self` (merge por paso).
    /// Usado en la restauración de sesión: las respuestas iniciales quedan
    /// DEBAJO de las restauradas.
    pub fn overlay(&mut self, other: &AnswerSet) {
        for (step_id, slice) in &other.slices {
            self.merge(step_id, slice.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.slices.iter()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_agrega_y_sobreescribe_superficialmente() {
        let mut answers = AnswerSet::new();
        answers.merge("dates", json!({"pickup_date": "2026-09-01", "cross_border": false}));
        answers.merge("dates", json!({"cross_border": true, "return_date": "2026-09-05"}));

        // Merge, no reemplazo: pickup_date sobrevive.
        assert_eq!(answers.field("dates", "pickup_date"), Some(&json!("2026-09-01")));
        assert_eq!(answers.field("dates", "return_date"), Some(&json!("2026-09-05")));
        assert!(answers.flag("dates", "cross_border"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn overlay_pone_lo_restaurado_encima() {
        let mut base = AnswerSet::new();
        base.merge("dates", json!({"pickup_date": "2026-09-01", "note": "inicial"}));

        let mut restored = AnswerSet::new();
        restored.merge("dates", json!({"note": "restaurada"}));
        restored.merge("payment", json!({"holder": "Ana"}));

        base.overlay(&restored);
        assert_eq!(base.field("dates", "note"), Some(&json!("restaurada")));
        assert_eq!(base.field("dates", "pickup_date"), Some(&json!("2026-09-01")));
        assert_eq!(base.field("payment", "holder"), Some(&json!("Ana")));
    }

    #[test]
    fn flag_exige_true_literal() {
        let mut answers = AnswerSet::new();
        answers.merge("dates", json!({"cross_border": "yes"}));
        assert!(!answers.flag("dates", "cross_border"));
        assert!(!answers.flag("dates", "missing"));
    }
}
