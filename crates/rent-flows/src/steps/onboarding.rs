//! Pasos del flujo de onboarding de operadores.

use async_trait::async_trait;
use serde_json::Value;

use rent_wizard::{AnswerSet, StepDescriptor, StepFault};

/// Lista de pasos de onboarding en el orden del producto.
pub fn onboarding_steps() -> Vec<Box<dyn StepDescriptor>> {
    vec![Box::new(BusinessInfoStep),
         Box::new(DocumentsStep),
         Box::new(VerificationStep),
         Box::new(FleetSetupStep)]
}

fn non_empty_str(slice: &Value, name: &str) -> bool {
    slice.get(name)
         .and_then(Value::as_str)
         .map(|s| !s.trim().is_empty())
         .unwrap_or(false)
}

fn uploaded_documents(answers: &AnswerSet) -> bool {
    answers.field("documents", "uploaded")
           .and_then(Value::as_array)
           .map(|docs| !docs.is_empty())
           .unwrap_or(false)
}

/// Razón social y matrícula del operador.
pub struct BusinessInfoStep;

#[async_trait]
impl StepDescriptor for BusinessInfoStep {
    fn id(&self) -> &str {
        "business_info"
    }
    fn title(&self) -> &str {
        "Datos del negocio"
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        let registration_ok = slice.get("registration_id")
                                   .and_then(Value::as_str)
                                   .map(|id| id.len() >= 6 && id.chars().all(|c| c.is_ascii_alphanumeric()))
                                   .unwrap_or(false);
        Ok(non_empty_str(slice, "legal_name") && registration_ok)
    }
}

/// Carga de documentación respaldatoria.
pub struct DocumentsStep;

#[async_trait]
impl StepDescriptor for DocumentsStep {
    fn id(&self) -> &str {
        "documents"
    }
    fn title(&self) -> &str {
        "Documentación"
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        Ok(slice.get("uploaded")
                .and_then(Value::as_array)
                .map(|docs| !docs.is_empty())
                .unwrap_or(false))
    }
    fn render_payload(&self) -> Value {
        serde_json::json!({"component": "document-uploader"})
    }
}

/// Verificación del operador; no tiene sentido mostrarla hasta que haya
/// documentos cargados. En producción el chequeo contra el registro es una
/// llamada de red; la UI deja el resultado en el slice (`registry_ack`).
pub struct VerificationStep;

#[async_trait]
impl StepDescriptor for VerificationStep {
    fn id(&self) -> &str {
        "verification"
    }
    fn title(&self) -> &str {
        "Verificación"
    }
    fn visible(&self, answers: &AnswerSet) -> bool {
        uploaded_documents(answers)
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        Ok(slice.get("registry_ack") == Some(&Value::Bool(true)))
    }
}

/// Alta inicial de la flota.
pub struct FleetSetupStep;

#[async_trait]
impl StepDescriptor for FleetSetupStep {
    fn id(&self) -> &str {
        "fleet_setup"
    }
    fn title(&self) -> &str {
        "Flota"
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        let vehicles = match slice.get("vehicles").and_then(Value::as_array) {
            Some(v) if !v.is_empty() => v,
            _ => return Ok(false),
        };
        // Cada vehículo necesita al menos una patente no vacía.
        Ok(vehicles.iter().all(|v| non_empty_str(v, "plate")))
    }
}
