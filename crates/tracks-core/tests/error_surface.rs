use tracks_core::{ErrorInfo, TracksError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("set_name", "pricing")
        .with_hint("supply a name")
}

#[test]
fn config_error_surface() {
    let err = TracksError::Config(sample_info("set-name-missing", "track set declares no name"));
    assert_eq!(err.info().code, "set-name-missing");
    assert!(err.info().context.contains_key("set_name"));
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn selection_error_surface() {
    let err = TracksError::Selection(sample_info("bucket-empty", "zero buckets"));
    assert_eq!(err.info().code, "bucket-empty");
}

#[test]
fn serde_error_surface() {
    let err = TracksError::Serde(sample_info("key-encode", "unencodable key"));
    assert_eq!(err.info().code, "key-encode");
    assert!(err.to_string().contains("hint: supply a name"));
}

#[test]
fn error_round_trips_through_json() {
    let err = TracksError::Config(sample_info("set-empty", "track set gathered no tracks"));
    let encoded = serde_json::to_string(&err).unwrap();
    let decoded: TracksError = serde_json::from_str(&encoded).unwrap();
    assert_eq!(err, decoded);
}
