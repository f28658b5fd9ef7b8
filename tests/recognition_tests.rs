// Unit tests for recognition event types and script parsing

use voice_translator::recognition::{
    fragment_from_results, Alternative, FragmentEvent, RecognitionError, RecognitionEvent,
    RecognitionResult, ScriptedSource,
};

fn result(alternatives: &[&str]) -> RecognitionResult {
    RecognitionResult {
        alternatives: alternatives
            .iter()
            .map(|t| Alternative {
                transcript: t.to_string(),
                confidence: Some(0.9),
            })
            .collect(),
        is_final: false,
    }
}

#[test]
fn test_fragment_joins_top_alternatives() {
    let results = vec![result(&["hallo", "halo"]), result(&[" wereld"])];

    let fragment = fragment_from_results(&results, 750);
    assert_eq!(fragment, FragmentEvent::new("hallo wereld", 750));
}

#[test]
fn test_fragment_skips_results_without_alternatives() {
    let results = vec![result(&["goede"]), result(&[]), result(&["morgen"])];

    let fragment = fragment_from_results(&results, 0);
    assert_eq!(fragment.transcript, "goedemorgen");
}

#[test]
fn test_fragment_from_no_results_is_empty() {
    assert_eq!(fragment_from_results(&[], 10).transcript, "");
}

#[test]
fn test_error_codes() {
    assert_eq!(RecognitionError::from_code("not-allowed"), RecognitionError::NotAllowed);
    assert_eq!(RecognitionError::from_code("no-speech"), RecognitionError::NoSpeech);
    assert_eq!(RecognitionError::from_code("aborted"), RecognitionError::Aborted);
    assert_eq!(
        RecognitionError::from_code("bad-grammar"),
        RecognitionError::Other("bad-grammar".to_string())
    );
}

#[test]
fn test_error_display() {
    assert_eq!(RecognitionError::NoSpeech.to_string(), "no speech detected");
    assert_eq!(RecognitionError::Other("weird".into()).to_string(), "weird");
}

#[test]
fn test_event_json_shape() {
    let json = serde_json::to_string(&RecognitionEvent::Fragment(FragmentEvent::new("dag", 12)))
        .unwrap();
    assert!(json.contains("\"type\":\"fragment\""));
    assert!(json.contains("\"transcript\":\"dag\""));
    assert!(json.contains("\"timestamp_ms\":12"));

    let end: RecognitionEvent = serde_json::from_str(r#"{"type":"end"}"#).unwrap();
    assert_eq!(end, RecognitionEvent::End);
}

#[test]
fn test_parse_script_skips_comments_and_blank_lines() {
    let script = r#"
# warm-up
{"type":"fragment","transcript":"een","timestamp_ms":0}

{"type":"error","error":"no-speech"}
{"type":"end"}
"#;

    let events = ScriptedSource::parse(script).unwrap();
    assert_eq!(
        events,
        vec![
            RecognitionEvent::Fragment(FragmentEvent::new("een", 0)),
            RecognitionEvent::Error {
                error: RecognitionError::NoSpeech
            },
            RecognitionEvent::End,
        ]
    );
}

#[test]
fn test_parse_script_reports_bad_line() {
    let script = "{\"type\":\"end\"}\nnot json\n";

    let err = ScriptedSource::parse(script).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}
