//! rent-flows: pasos concretos de los dos asistentes del marketplace.
//!
//! El core (`rent-wizard`) es neutral; este crate aporta los descriptores de
//! producto: el flujo de reserva (fechas → cruce de frontera → seguro → pago
//! → confirmación) y el de onboarding de operadores (datos del negocio →
//! documentos → verificación → flota). Las UIs de cada paso quedan afuera:
//! aquí viven sólo identidad, visibilidad, validación y el payload opaco que
//! la UI renderiza.

pub mod steps;

pub use steps::booking::{booking_steps, ConfirmationStep, CrossBorderStep, DatesStep, InsuranceStep,
                         PaymentStep};
pub use steps::onboarding::{onboarding_steps, BusinessInfoStep, DocumentsStep, FleetSetupStep,
                            VerificationStep};
