//! Pasos del flujo de reserva.
//!
//! - `DatesStep`: fechas de retiro/devolución; prende el flag de cruce de
//!   frontera que gobierna la visibilidad del paso siguiente.
//! - `CrossBorderStep`: visible sólo si `dates.cross_border == true`.
//! - `PaymentStep`: validación asíncrona (chequeo de tarjeta); acá es un
//!   dígito verificador Luhn determinista, el gateway real queda afuera.
//!
//! Ningún paso accede a IO externo; sólo inspecciona su slice de respuestas.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};

use rent_wizard::{AnswerSet, StepDescriptor, StepFault};

/// Lista de pasos de reserva en el orden del producto.
pub fn booking_steps() -> Vec<Box<dyn StepDescriptor>> {
    vec![Box::new(DatesStep),
         Box::new(CrossBorderStep),
         Box::new(InsuranceStep),
         Box::new(PaymentStep),
         Box::new(ConfirmationStep)]
}

fn str_field<'a>(slice: &'a Value, name: &str) -> Option<&'a str> {
    slice.get(name).and_then(Value::as_str)
}

fn parse_date(slice: &Value, name: &str) -> Option<NaiveDate> {
    str_field(slice, name).and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Dígito verificador Luhn sobre el número de tarjeta (espacios permitidos).
/// Suficiente para el gate del asistente; la autorización real es del
/// gateway y queda fuera de alcance.
pub(crate) fn luhn_valid(card_number: &str) -> bool {
    let digits: Vec<u32> = card_number.chars()
                                      .filter(|c| !c.is_whitespace())
                                      .map(|c| c.to_digit(10))
                                      .collect::<Option<Vec<_>>>()
                                      .unwrap_or_default();
    if digits.len() < 12 || digits.len() > 19 {
        return false;
    }
    let sum: u32 = digits.iter()
                         .rev()
                         .enumerate()
                         .map(|(i, &d)| {
                             if i % 2 == 1 {
                                 let doubled = d * 2;
                                 if doubled > 9 { doubled - 9 } else { doubled }
                             } else {
                                 d
                             }
                         })
                         .sum();
    sum % 10 == 0
}

/// Fechas de retiro y devolución del vehículo.
pub struct DatesStep;

#[async_trait]
impl StepDescriptor for DatesStep {
    fn id(&self) -> &str {
        "dates"
    }
    fn title(&self) -> &str {
        "Fechas y retiro"
    }
    fn description(&self) -> Option<&str> {
        Some("Elegí cuándo retirás y devolvés el vehículo")
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        let pickup = parse_date(slice, "pickup_date");
        let dropoff = parse_date(slice, "return_date");
        match (pickup, dropoff) {
            // Se permite retiro y devolución el mismo día.
            (Some(p), Some(r)) => Ok(p <= r),
            _ => Ok(false),
        }
    }
    fn render_payload(&self) -> Value {
        json!({"component": "date-range-picker"})
    }
}

/// Permisos de cruce de frontera; sólo aparece si el paso de fechas lo pidió.
pub struct CrossBorderStep;

#[async_trait]
impl StepDescriptor for CrossBorderStep {
    fn id(&self) -> &str {
        "cross_border"
    }
    fn title(&self) -> &str {
        "Cruce de frontera"
    }
    fn visible(&self, answers: &AnswerSet) -> bool {
        answers.flag("dates", "cross_border")
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        let countries = slice.get("countries").and_then(Value::as_array);
        Ok(countries.map(|c| !c.is_empty()).unwrap_or(false))
    }
    fn render_payload(&self) -> Value {
        json!({"component": "country-multi-select"})
    }
}

/// Selección de plan de seguro.
pub struct InsuranceStep;

#[async_trait]
impl StepDescriptor for InsuranceStep {
    fn id(&self) -> &str {
        "insurance"
    }
    fn title(&self) -> &str {
        "Seguro"
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        Ok(matches!(str_field(slice, "plan"), Some("none" | "basic" | "standard" | "premium")))
    }
}

/// Datos de pago. La validación es asíncrona porque en producción consulta
/// al gateway; acá el chequeo es local y determinista.
pub struct PaymentStep;

#[async_trait]
impl StepDescriptor for PaymentStep {
    fn id(&self) -> &str {
        "payment"
    }
    fn title(&self) -> &str {
        "Pago"
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        let holder_ok = str_field(slice, "holder").map(|h| !h.trim().is_empty()).unwrap_or(false);
        let card_ok = str_field(slice, "card_number").map(luhn_valid).unwrap_or(false);
        Ok(holder_ok && card_ok)
    }
    fn render_payload(&self) -> Value {
        json!({"component": "card-input"})
    }
}

/// Resumen y aceptación de términos.
pub struct ConfirmationStep;

#[async_trait]
impl StepDescriptor for ConfirmationStep {
    fn id(&self) -> &str {
        "confirmation"
    }
    fn title(&self) -> &str {
        "Confirmación"
    }
    async fn validate(&self, slice: &Value) -> Result<bool, StepFault> {
        Ok(slice.get("accepted_terms") == Some(&Value::Bool(true)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luhn_acepta_numeros_de_prueba_clasicos() {
        assert!(luhn_valid("4539 1488 0343 6467"));
        assert!(luhn_valid("4111111111111111"));
        assert!(!luhn_valid("4111111111111112"));
        assert!(!luhn_valid("1234"));
        assert!(!luhn_valid("no-un-numero"));
    }

    #[tokio::test]
    async fn fechas_invertidas_no_pasan() {
        let step = DatesStep;
        let ok = step.validate(&json!({"pickup_date": "2026-09-05", "return_date": "2026-09-01"}))
                     .await
                     .expect("validate");
        assert!(!ok);

        let ok = step.validate(&json!({"pickup_date": "2026-09-01", "return_date": "2026-09-01"}))
                     .await
                     .expect("validate");
        assert!(ok, "mismo día permitido");
    }

    #[tokio::test]
    async fn cross_border_exige_paises() {
        let step = CrossBorderStep;
        assert!(!step.validate(&json!({})).await.expect("validate"));
        assert!(!step.validate(&json!({"countries": []})).await.expect("validate"));
        assert!(step.validate(&json!({"countries": ["UY"]})).await.expect("validate"));
    }
}
