//! Demo de punta a punta del flujo de reserva sobre el store de archivos.
//!
//! Construye el asistente, responde cada paso como lo haría la UI y muestra
//! la proyección de progreso después de cada transición. La sesión se
//! persiste bajo `SESSIONS_DIR` y se purga al completar.

use serde_json::json;
use uuid::Uuid;

use rent_flows::booking_steps;
use rent_persistence::{init_dotenv, FileSessionStore};
use rent_wizard::{NavOutcome, StepProgress, WizardEngine, WizardError};

fn print_progress<S: rent_wizard::SessionStore>(engine: &WizardEngine<S>) {
    for entry in engine.progress() {
        let mark = match entry.status {
            StepProgress::Completed => "x",
            StepProgress::Current => ">",
            StepProgress::Upcoming => " ",
        };
        println!("  [{mark}] {} ({})", entry.title, entry.id);
    }
}

#[tokio::main]
async fn main() -> Result<(), WizardError> {
    // Cargar .env si existe para obtener SESSIONS_DIR
    init_dotenv();

    let session_key = format!("booking-{}", Uuid::new_v4());
    println!("Reserva nueva, sesión: {session_key}");

    let mut engine = WizardEngine::builder_with_store(FileSessionStore::from_env())
        .steps(booking_steps())
        .session_key(session_key.as_str())
        .on_complete(|answers| {
            println!("Reserva confirmada con {} pasos respondidos", answers.len());
        })
        .build()?;

    print_progress(&engine);

    // Fechas con cruce de frontera: el paso de permisos aparece en la
    // secuencia efectiva recién acá.
    engine.update_answers("dates",
                          json!({"pickup_date": "2026-09-01", "return_date": "2026-09-05",
                                 "cross_border": true}))?;
    engine.advance().await?;
    println!("\nDespués de las fechas (con cruce de frontera):");
    print_progress(&engine);

    engine.update_answers("cross_border", json!({"countries": ["UY"]}))?;
    engine.advance().await?;

    engine.update_answers("insurance", json!({"plan": "standard"}))?;
    engine.advance().await?;

    engine.update_answers("payment",
                          json!({"holder": "Ana Rivas", "card_number": "4539 1488 0343 6467"}))?;
    engine.advance().await?;
    println!("\nEn confirmación:");
    print_progress(&engine);

    engine.update_answers("confirmation", json!({"accepted_terms": true}))?;
    match engine.advance().await? {
        NavOutcome::Completed => println!("\nRun terminado; la sesión persistida fue purgada."),
        other => println!("\nResultado inesperado: {other:?}"),
    }

    Ok(())
}
