use async_trait::async_trait;
use serde_json::{json, Value};

use rent_wizard::{AnswerSet, NavOutcome, StepDescriptor, StepFault, WizardEngine, WizardError};

// Always-visible step with no validation gate.
struct Plain(&'static str);

impl StepDescriptor for Plain {
    fn id(&self) -> &str {
        self.0
    }
    fn title(&self) -> &str {
        self.0
    }
}

// Step visible only when a prior step set a boolean flag.
struct GatedBy {
    id: &'static str,
    source: &'static str,
    flag: &'static str,
}

impl StepDescriptor for GatedBy {
    fn id(&self) -> &str {
        self.id
    }
    fn title(&self) -> &str {
        self.id
    }
    fn visible(&self, answers: &AnswerSet) -> bool {
        answers.flag(self.source, self.flag)
    }
}

// Validator that always faults (the async-throw case).
struct Faulty(&'static str);

#[async_trait]
impl StepDescriptor for Faulty {
    fn id(&self) -> &str {
        self.0
    }
    fn title(&self) -> &str {
        self.0
    }
    async fn validate(&self, _slice: &Value) -> Result<bool, StepFault> {
        Err(StepFault::from("backend check unavailable"))
    }
}

fn booking_like() -> Vec<Box<dyn StepDescriptor>> {
    vec![Box::new(Plain("dates")),
         Box::new(GatedBy { id: "cross_border", source: "dates", flag: "cross_border" }),
         Box::new(Plain("payment"))]
}

#[tokio::test]
async fn advance_skips_invisible_step() {
    // dates.cross_border=false -> effective sequence [dates, payment].
    let mut engine = WizardEngine::builder().steps(booking_like()).build().expect("build");
    engine.update_answers("dates", json!({"cross_border": false})).expect("update");

    assert_eq!(engine.effective_ids(), vec!["dates", "payment"]);
    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "payment");
}

#[tokio::test]
async fn advance_lands_on_newly_visible_step() {
    let mut engine = WizardEngine::builder().steps(booking_like()).build().expect("build");
    engine.update_answers("dates", json!({"cross_border": true})).expect("update");

    assert_eq!(engine.effective_ids(), vec!["dates", "cross_border", "payment"]);
    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "cross_border");
}

#[tokio::test]
async fn current_step_reconciles_when_it_turns_invisible() {
    // A(always) -> B(visible iff a.flag) -> C(always); stand on B, then
    // turn the flag off underneath it.
    let steps: Vec<Box<dyn StepDescriptor>> =
        vec![Box::new(Plain("a")),
             Box::new(GatedBy { id: "b", source: "a", flag: "flag" }),
             Box::new(Plain("c"))];
    let mut engine = WizardEngine::builder().steps(steps).build().expect("build");

    engine.update_answers("a", json!({"flag": true})).expect("update");
    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "b");

    engine.update_answers("a", json!({"flag": false})).expect("update");
    // Invariant: current is always a member of the effective sequence.
    assert_eq!(engine.current_step_id(), "a");
    assert!(engine.effective_ids().contains(&"a".to_string()));

    // Advancing from the reconciled step resolves inside the recomputed
    // sequence, never on the hidden B.
    let outcome = engine.advance().await.expect("advance");
    assert_eq!(outcome, NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "c");
}

#[tokio::test]
async fn hidden_step_completion_mark_survives() {
    let steps: Vec<Box<dyn StepDescriptor>> =
        vec![Box::new(Plain("a")),
             Box::new(GatedBy { id: "b", source: "a", flag: "flag" }),
             Box::new(Plain("c"))];
    let mut engine = WizardEngine::builder().steps(steps).build().expect("build");

    engine.update_answers("a", json!({"flag": true})).expect("update");
    engine.advance().await.expect("advance");
    assert_eq!(engine.current_step_id(), "b");
    engine.advance().await.expect("advance");
    assert!(engine.completed_ids().contains("b"));

    engine.update_answers("a", json!({"flag": false})).expect("update");
    assert!(engine.completed_ids().contains("b"), "completed mark kept while hidden");

    engine.update_answers("a", json!({"flag": true})).expect("update");
    let progress = engine.progress();
    let b = progress.iter().find(|e| e.id == "b").expect("b visible again");
    assert_eq!(b.status, rent_wizard::StepProgress::Completed);
}

#[tokio::test]
async fn jump_ahead_without_skip_flag_is_rejected_and_state_untouched() {
    let mut engine = WizardEngine::builder().steps(booking_like()).build().expect("build");

    let before_current = engine.current_step_id().to_string();
    let before_completed = engine.completed_ids().clone();
    let before_answers = engine.answers().clone();

    let err = engine.jump_to("payment").await.unwrap_err();
    assert_eq!(err, WizardError::SkipNotAllowed { target: "payment".into() });

    assert_eq!(engine.current_step_id(), before_current);
    assert_eq!(engine.completed_ids(), &before_completed);
    assert_eq!(engine.answers(), &before_answers);
}

#[tokio::test]
async fn jump_ahead_with_skip_flag_validates_current_first() {
    let steps: Vec<Box<dyn StepDescriptor>> =
        vec![Box::new(Faulty("gatekeeper")), Box::new(Plain("mid")), Box::new(Plain("end"))];
    let mut engine = WizardEngine::builder()
        .steps(steps)
        .allow_skip_ahead(true)
        .build()
        .expect("build");

    // Skip-ahead is on, but the current step's gate fails: the jump is
    // rejected with SkipNotAllowed and the run state stays untouched.
    let err = engine.jump_to("end").await.unwrap_err();
    assert_eq!(err, WizardError::SkipNotAllowed { target: "end".into() });
    assert_eq!(engine.current_step_id(), "gatekeeper");
    assert!(engine.completed_ids().is_empty());
}

#[tokio::test]
async fn jump_backwards_never_validates() {
    let mut engine = WizardEngine::builder().steps(booking_like()).build().expect("build");
    engine.advance().await.expect("advance");
    assert_eq!(engine.current_step_id(), "payment");

    assert_eq!(engine.jump_to("dates").await.expect("jump"), NavOutcome::Moved);
    assert_eq!(engine.current_step_id(), "dates");
}

#[tokio::test]
async fn jump_to_hidden_step_is_rejected() {
    let mut engine = WizardEngine::builder()
        .steps(booking_like())
        .allow_skip_ahead(true)
        .build()
        .expect("build");

    // cross_border is not in the effective sequence.
    let err = engine.jump_to("cross_border").await.unwrap_err();
    assert_eq!(err, WizardError::SkipNotAllowed { target: "cross_border".into() });
}

#[tokio::test]
async fn faulting_validator_behaves_like_false() {
    let steps: Vec<Box<dyn StepDescriptor>> = vec![Box::new(Faulty("check")), Box::new(Plain("end"))];
    let mut engine = WizardEngine::builder().steps(steps).build().expect("build");

    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Denied);
    assert_eq!(engine.current_step_id(), "check");
    assert!(engine.completed_ids().is_empty());
}

#[tokio::test]
async fn completion_callback_receives_full_answer_set_once() {
    let (tx, rx) = std::sync::mpsc::channel::<AnswerSet>();
    let mut engine = WizardEngine::builder()
        .add_step(Box::new(Plain("only")))
        .on_complete(move |answers| {
            tx.send(answers).expect("send");
        })
        .build()
        .expect("build");

    engine.update_answers("only", json!({"done": true})).expect("update");
    assert_eq!(engine.advance().await.expect("advance"), NavOutcome::Completed);

    let delivered = rx.recv().expect("callback ran");
    assert_eq!(delivered.field("only", "done"), Some(&json!(true)));
    assert!(rx.try_recv().is_err(), "callback must fire exactly once");
}

#[tokio::test]
async fn cancel_fires_cancel_callback_and_is_terminal() {
    let (tx, rx) = std::sync::mpsc::channel::<()>();
    let mut engine = WizardEngine::builder()
        .steps(booking_like())
        .on_cancel(move || {
            tx.send(()).expect("send");
        })
        .build()
        .expect("build");

    engine.cancel().expect("cancel");
    rx.recv().expect("cancel callback ran");
    assert_eq!(engine.phase(), rent_wizard::WizardPhase::Cancelled);
    assert_eq!(engine.complete().unwrap_err(), WizardError::TerminalState);
}
