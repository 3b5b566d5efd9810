use import_dashboard_wasm::domain::import::{
    ImportOutcome, ImportSession, ImportStage, ProgressEvent, SessionEvent, SessionToken,
};

const MB: u64 = 1_048_576;

fn uploading_session() -> (ImportSession, SessionToken) {
    let mut session = ImportSession::new();
    let token = session.select_file("products.xlsx").unwrap();
    session.select_sheet("Products");
    session.begin_upload().unwrap();
    (session, token)
}

fn processing(step: Option<&str>, progress: Option<f64>) -> SessionEvent {
    SessionEvent::Processing(ProgressEvent {
        step: step.map(str::to_string),
        progress,
    })
}

fn completed(imported: u64) -> SessionEvent {
    SessionEvent::UploadCompleted(ImportOutcome {
        message: "Importación completada".to_string(),
        imported,
    })
}

#[test]
fn transport_progress_tracks_uploaded_bytes() {
    let (mut session, token) = uploading_session();
    session.apply(
        token,
        SessionEvent::TransportProgress { loaded: MB, total: Some(2 * MB) },
    );
    assert_eq!(session.upload_progress(), 50);
    session.apply(
        token,
        SessionEvent::TransportProgress { loaded: 2 * MB, total: Some(2 * MB) },
    );
    assert_eq!(session.upload_progress(), 100);
    assert!(session.is_uploading());
}

#[test]
fn transport_progress_never_goes_backwards() {
    let (mut session, token) = uploading_session();
    session.apply(
        token,
        SessionEvent::TransportProgress { loaded: 3 * MB, total: Some(4 * MB) },
    );
    session.apply(
        token,
        SessionEvent::TransportProgress { loaded: MB, total: Some(4 * MB) },
    );
    assert_eq!(session.upload_progress(), 75);
}

#[test]
fn unknown_totals_leave_the_bar_alone() {
    let (mut session, token) = uploading_session();
    session.apply(
        token,
        SessionEvent::TransportProgress { loaded: MB, total: Some(2 * MB) },
    );
    session.apply(
        token,
        SessionEvent::TransportProgress { loaded: 99 * MB, total: None },
    );
    assert_eq!(session.upload_progress(), 50);
}

#[test]
fn processing_frames_update_step_and_target_without_a_stage_change() {
    let (mut session, token) = uploading_session();
    let applied = session.apply(token, processing(Some("Procesando filas 50/100"), Some(50.0)));
    assert!(!applied.stale);
    assert!(!applied.refresh);
    assert_eq!(session.step(), "Procesando filas 50/100");
    assert_eq!(session.processing_target(), 50.0);
    assert_eq!(session.stage(), ImportStage::Uploading);
}

#[test]
fn a_terminal_frame_requests_the_refresh_exactly_once() {
    let (mut session, token) = uploading_session();
    let first = session.apply(token, processing(Some("Completado"), Some(100.0)));
    assert!(first.refresh);
    let second = session.apply(token, processing(Some("Completado"), Some(100.0)));
    assert!(!second.refresh);
}

#[test]
fn completion_after_a_terminal_frame_does_not_refresh_twice() {
    let (mut session, token) = uploading_session();
    assert!(session.apply(token, processing(None, Some(100.0))).refresh);

    let applied = session.apply(token, completed(42));
    assert!(!applied.refresh);
    assert_eq!(session.stage(), ImportStage::Completed);
    assert!(session.succeeded());
    assert_eq!(session.outcome().map(|outcome| outcome.imported), Some(42));
    assert_eq!(session.upload_progress(), 100);
}

#[test]
fn completion_first_also_latches_the_refresh() {
    let (mut session, token) = uploading_session();
    assert!(session.apply(token, completed(10)).refresh);

    // Trailing push frames still update the caption but never re-trigger
    let late = session.apply(token, processing(Some("Completado"), Some(100.0)));
    assert!(!late.refresh);
    assert_eq!(session.step(), "Completado");
}

#[test]
fn failure_keeps_the_progress_made_so_far() {
    let (mut session, token) = uploading_session();
    session.apply(
        token,
        SessionEvent::TransportProgress { loaded: MB, total: Some(2 * MB) },
    );
    session.apply(token, processing(Some("Procesando"), Some(30.0)));
    session.apply(token, SessionEvent::UploadFailed("disk full".into()));
    assert_eq!(session.stage(), ImportStage::Failed);
    assert_eq!(session.error(), Some("disk full"));
    assert_eq!(session.upload_progress(), 50);
    assert_eq!(session.processing_target(), 30.0);
    assert!(!session.succeeded());
}

#[test]
fn a_new_attempt_discards_events_from_the_old_upload() {
    let (mut session, old_token) = uploading_session();
    let new_token = session.select_file("catalog.xls").unwrap();
    assert_ne!(old_token, new_token);

    let applied = session.apply(old_token, processing(Some("Completado"), Some(100.0)));
    assert!(applied.stale);
    assert!(!applied.refresh);
    assert_eq!(session.processing_target(), 0.0);
    assert_eq!(session.stage(), ImportStage::FileSelected);
}

#[test]
fn restarting_an_upload_rearms_the_refresh_latch() {
    let (mut session, token) = uploading_session();
    assert!(session.apply(token, completed(5)).refresh);

    session.begin_upload().unwrap();
    assert_eq!(session.upload_progress(), 0);
    assert_eq!(session.outcome(), None);
    assert!(session.apply(token, completed(7)).refresh);
}
