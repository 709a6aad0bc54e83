use async_trait::async_trait;
use serde_json::Value;

use crate::answers::AnswerSet;
use crate::errors::StepFault;

/// Interfaz neutral que todo paso debe implementar para participar del
/// asistente. Inmutable durante el run: el caller la provee una vez en la
/// construcción.
///
/// Contrato:
/// - `id` es estable y único dentro del run; se usa como clave de secuencia
///   y como namespace del slice de respuestas (por convención son el mismo
///   string, ver `AnswerSet`).
/// - `visible` se evalúa con el `AnswerSet` COMPLETO, porque la visibilidad
///   de un paso suele depender de respuestas de pasos anteriores.
/// - `validate` recibe únicamente el slice propio del paso, snapshot tomado
///   al momento de invocar `advance`. Debe resolver (no colgarse): el engine
///   no impone timeout propio.
#[async_trait]
pub trait StepDescriptor: Send + Sync {
    /// Identificador estable y único dentro del run.
    fn id(&self) -> &str;

    /// Título para el indicador de progreso.
    fn title(&self) -> &str;

    /// Descripción opcional para display.
    fn description(&self) -> Option<&str> {
        None
    }

    /// Condición de visibilidad. Default: siempre visible. Debe ser pura y
    /// determinista respecto de `answers` (el engine la reevalúa en cada
    /// mutación y confía en eso para reconciliar).
    fn visible(&self, answers: &AnswerSet) -> bool {
        let _ = answers;
        true
    }

    /// Gate de validación sobre el slice propio. Default: pasa siempre.
    /// Un `Err` equivale a una excepción del validador: el engine lo captura
    /// y lo trata como `Ok(false)`.
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        let _ = slice;
        Ok(true)
    }

    /// Payload renderizable opaco (elemento de UI del caller). El engine lo
    /// transporta sin interpretarlo.
    fn render_payload(&self) -> Value {
        Value::Null
    }
}
