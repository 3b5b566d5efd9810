use import_dashboard_wasm::domain::import::{ProgressEvent, decode_progress_frame};

fn frame(step: Option<&str>, progress: Option<f64>) -> ProgressEvent {
    ProgressEvent {
        step: step.map(str::to_string),
        progress,
    }
}

#[test]
fn decodes_a_full_frame() {
    let event = decode_progress_frame(r#"{"step": "Procesando filas 50/100", "progress": 50.0}"#)
        .unwrap();
    assert_eq!(event.step.as_deref(), Some("Procesando filas 50/100"));
    assert_eq!(event.progress, Some(50.0));
}

#[test]
fn either_field_may_be_absent() {
    let step_only = decode_progress_frame(r#"{"step": "Reading sheet"}"#).unwrap();
    assert_eq!(step_only.progress, None);

    let progress_only = decode_progress_frame(r#"{"progress": 10}"#).unwrap();
    assert_eq!(progress_only.step, None);
    assert_eq!(progress_only.progress, Some(10.0));

    assert_eq!(decode_progress_frame("{}").unwrap(), frame(None, None));
}

#[test]
fn extra_fields_are_tolerated() {
    let event = decode_progress_frame(r#"{"step": "x", "progress": 5, "sheet": "Products"}"#)
        .unwrap();
    assert_eq!(event.step.as_deref(), Some("x"));
}

#[test]
fn malformed_frames_are_dropped() {
    assert_eq!(decode_progress_frame("not json"), None);
    assert_eq!(decode_progress_frame(""), None);
    assert_eq!(decode_progress_frame("null"), None);
    assert_eq!(decode_progress_frame("[1, 2, 3]"), None);
}

#[test]
fn one_hundred_percent_is_terminal() {
    assert!(frame(None, Some(100.0)).is_terminal());
    assert!(!frame(None, Some(99.9)).is_terminal());
}

#[test]
fn completion_labels_are_terminal_in_any_language_or_casing() {
    assert!(frame(Some("Completado"), None).is_terminal());
    assert!(frame(Some("import complete"), None).is_terminal());
    assert!(frame(Some("COMPLETED"), Some(40.0)).is_terminal());
    assert!(!frame(Some("Procesando"), Some(40.0)).is_terminal());
}

#[test]
fn silent_frames_are_not_terminal() {
    assert!(!frame(None, None).is_terminal());
}
