use datamint_core::{GenerationMetadata, GenerationResult, GeneratorConfig, Session};
use serde_json::json;

fn result_with(records: u64) -> GenerationResult {
    GenerationResult {
        success: true,
        request_id: format!("req-{records}"),
        data: json!([{"id": records}]),
        record_count: records,
        metadata: GenerationMetadata::default(),
        error: None,
    }
}

#[test]
fn submit_marks_session_loading() {
    let mut session = Session::new(GeneratorConfig::new());
    let submission = session.submit().expect("valid config");
    assert_eq!(submission.seq, 1);
    assert_eq!(submission.request.entity, "cart");
    assert!(session.is_loading());
}

#[test]
fn completion_stores_result() {
    let mut session = Session::default();
    let submission = session.submit().expect("submit");
    assert!(session.complete::<String>(submission.seq, Ok(result_with(3))));

    assert!(!session.is_loading());
    assert_eq!(session.result().map(|r| r.record_count), Some(3));
    assert!(session.error().is_none());
}

#[test]
fn stale_response_is_ignored() {
    let mut session = Session::default();
    let first = session.submit().expect("first submit");
    let second = session.submit().expect("second submit");

    assert!(!session.complete::<String>(first.seq, Ok(result_with(1))));
    assert!(session.result().is_none());
    assert!(session.is_loading());

    assert!(session.complete::<String>(second.seq, Ok(result_with(2))));
    assert_eq!(session.result().map(|r| r.request_id.as_str()), Some("req-2"));

    // A late arrival of the first response cannot overwrite the second.
    assert!(!session.complete::<String>(first.seq, Ok(result_with(1))));
    assert_eq!(session.result().map(|r| r.request_id.as_str()), Some("req-2"));
}

#[test]
fn new_submit_clears_previous_result_and_error() {
    let mut session = Session::default();
    let first = session.submit().expect("submit");
    session.complete(first.seq, Err::<GenerationResult, _>("connection refused"));
    assert_eq!(session.error(), Some("connection refused"));

    session.submit().expect("resubmit");
    assert!(session.error().is_none());
    assert!(session.result().is_none());
}

#[test]
fn backend_failure_populates_error_and_keeps_result() {
    let mut session = Session::default();
    let submission = session.submit().expect("submit");
    let failed = GenerationResult {
        success: false,
        error: Some("Rate limited".to_string()),
        ..result_with(0)
    };
    session.complete::<String>(submission.seq, Ok(failed));

    assert_eq!(session.error(), Some("Rate limited"));
    assert_eq!(session.result().map(|r| r.success), Some(false));
}

#[test]
fn transport_error_message_is_kept_raw() {
    let mut session = Session::default();
    let submission = session.submit().expect("submit");
    session.complete(
        submission.seq,
        Err::<GenerationResult, _>("backend returned 503: upstream overloaded"),
    );
    assert_eq!(session.error(), Some("backend returned 503: upstream overloaded"));
    assert!(session.result().is_none());
}

#[test]
fn config_edits_do_not_touch_result() {
    let mut session = Session::default();
    let submission = session.submit().expect("submit");
    session.complete::<String>(submission.seq, Ok(result_with(5)));

    session.config_mut().set_count(500);
    assert_eq!(session.config().count(), 500);
    assert_eq!(session.result().map(|r| r.record_count), Some(5));

    session.clear_result();
    assert!(session.result().is_none());
}

#[test]
fn completion_without_pending_submission_is_ignored() {
    let mut session = Session::default();
    assert!(!session.complete::<String>(0, Ok(result_with(9))));
    assert!(session.result().is_none());
    assert!(!session.is_loading());

    let submission = session.submit().expect("submit");
    assert!(session.complete::<String>(submission.seq, Ok(result_with(1))));
    assert!(!session.complete::<String>(submission.seq, Err("late duplicate".to_string())));
    assert_eq!(session.result().map(|r| r.record_count), Some(1));
    assert!(session.error().is_none());
}
