use serde_json::json;

use rent_flows::booking_steps;
use rent_wizard::{NavOutcome, StepProgress, WizardEngine};

#[tokio::test]
async fn domestic_booking_skips_cross_border() {
    let mut engine = WizardEngine::builder().steps(booking_steps()).build().expect("build");

    engine.update_answers("dates",
                          json!({"pickup_date": "2026-09-01", "return_date": "2026-09-05",
                                 "cross_border": false}))
          .expect("update");
    assert_eq!(engine.effective_ids(), vec!["dates", "insurance", "payment", "confirmation"]);

    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "insurance");
}

#[tokio::test]
async fn cross_border_booking_inserts_the_permit_step() {
    let mut engine = WizardEngine::builder().steps(booking_steps()).build().expect("build");

    engine.update_answers("dates",
                          json!({"pickup_date": "2026-09-01", "return_date": "2026-09-05",
                                 "cross_border": true}))
          .expect("update");

    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "cross_border");

    engine.update_answers("cross_border", json!({"countries": ["UY", "CL"]})).expect("update");
    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "insurance");
}

#[tokio::test]
async fn payment_gate_rejects_bad_card_and_accepts_good_one() {
    let mut engine = WizardEngine::builder().steps(booking_steps()).build().expect("build");

    engine.update_answers("dates",
                          json!({"pickup_date": "2026-09-01", "return_date": "2026-09-05"}))
          .expect("update");
    engine.advance().await.expect("advance");
    engine.update_answers("insurance", json!({"plan": "standard"})).expect("update");
    engine.advance().await.expect("advance");
    assert_eq!(engine.current_step_id(), "payment");

    engine.update_answers("payment", json!({"holder": "Ana Rivas", "card_number": "4111111111111112"}))
          .expect("update");
    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Denied);
    assert_eq!(engine.current_step_id(), "payment");

    engine.update_answers("payment", json!({"card_number": "4111111111111111"})).expect("update");
    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "confirmation");
}

#[tokio::test]
async fn full_booking_run_completes_with_consolidated_answers() {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut engine = WizardEngine::builder()
        .steps(booking_steps())
        .on_complete(move |answers| {
            tx.send(answers).expect("send");
        })
        .build()
        .expect("build");

    engine.update_answers("dates",
                          json!({"pickup_date": "2026-09-01", "return_date": "2026-09-05",
                                 "cross_border": false}))
          .expect("update");
    engine.advance().await.expect("dates");
    engine.update_answers("insurance", json!({"plan": "premium"})).expect("update");
    engine.advance().await.expect("insurance");
    engine.update_answers("payment", json!({"holder": "Ana Rivas", "card_number": "4539 1488 0343 6467"}))
          .expect("update");
    engine.advance().await.expect("payment");
    engine.update_answers("confirmation", json!({"accepted_terms": true})).expect("update");
    assert_eq!(engine.advance().await.expect("confirmation"), NavOutcome::Completed);

    let answers = rx.recv().expect("completion callback");
    assert_eq!(answers.field("insurance", "plan"), Some(&json!("premium")));
    assert_eq!(answers.field("dates", "pickup_date"), Some(&json!("2026-09-01")));
    // The hidden cross-border step never collected anything.
    assert!(answers.slice("cross_border").is_none());
}

#[tokio::test]
async fn progress_projection_tracks_the_booking() {
    let mut engine = WizardEngine::builder().steps(booking_steps()).build().expect("build");
    engine.update_answers("dates",
                          json!({"pickup_date": "2026-09-01", "return_date": "2026-09-05"}))
          .expect("update");
    engine.advance().await.expect("advance");

    let progress = engine.progress();
    assert_eq!(progress.len(), 4); // cross_border hidden
    assert_eq!(progress[0].status, StepProgress::Completed);
    assert_eq!(progress[1].status, StepProgress::Current);
    assert!(progress[2..].iter().all(|e| e.status == StepProgress::Upcoming));
}
