// Integration tests for live sessions
//
// These tests run a LiveSession end to end: events pushed through a
// ChannelSource or replayed from a script, translated by async backends
// that may be slow or fail.

use anyhow::{bail, Result};
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::time::Instant;
use voice_translator::recognition::{
    ChannelSource, FragmentEvent, RecognitionError, RecognitionEvent, RecognitionSource,
    ScriptedSource,
};
use voice_translator::session::{LiveSession, SessionConfig};
use voice_translator::translate::{BlockingBackend, SuffixTranslator, TranslationBackend};

/// Uppercases text after a delay chosen per input
struct DelayedBackend {
    delays: Vec<(&'static str, u64)>,
}

#[async_trait::async_trait]
impl TranslationBackend for DelayedBackend {
    async fn translate(&self, text: &str) -> Result<String> {
        let delay = self
            .delays
            .iter()
            .find(|(t, _)| *t == text)
            .map(|(_, ms)| *ms)
            .unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(text.to_uppercase())
    }

    fn name(&self) -> &str {
        "delayed"
    }
}

struct FailingBackend;

#[async_trait::async_trait]
impl TranslationBackend for FailingBackend {
    async fn translate(&self, _text: &str) -> Result<String> {
        bail!("translation service unavailable")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn suffix_backend() -> Arc<dyn TranslationBackend> {
    Arc::new(BlockingBackend::new(SuffixTranslator::default()))
}

fn channel_session(
    translator: Arc<dyn TranslationBackend>,
) -> (LiveSession, voice_translator::FragmentSender) {
    let (source, sender) = ChannelSource::new();
    let session = LiveSession::new(SessionConfig::default(), Box::new(source), translator);
    (session, sender)
}

#[tokio::test]
async fn test_session_builds_lines_from_channel() -> Result<()> {
    let (session, sender) = channel_session(suffix_backend());
    session.start().await?;

    sender.send_fragment("hallo", Some(0)).await?;
    sender.send_fragment("hallo wereld", Some(500)).await?;
    sender.send_fragment("dag", Some(2000)).await?;

    let stats = session.stop().await?;
    let snapshot = session.snapshot().await;

    assert_eq!(snapshot.source_lines, vec!["hallo wereld", "dag"]);
    assert_eq!(
        snapshot.translated_lines,
        vec![
            "hallo wereld (Translated to English)",
            "dag (Translated to English)"
        ]
    );
    assert_eq!(snapshot.open_line, None);
    assert_eq!(stats.fragments_received, 3);
    assert_eq!(stats.lines_opened, 2);
    assert!(!stats.is_active);

    Ok(())
}

#[tokio::test]
async fn test_stop_without_fragments_gives_empty_snapshot() -> Result<()> {
    let (session, _sender) = channel_session(suffix_backend());
    session.start().await?;
    session.stop().await?;

    assert!(session.snapshot().await.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_stop_before_start_is_noop() -> Result<()> {
    let (session, _sender) = channel_session(suffix_backend());

    let stats = session.stop().await?;
    assert!(!stats.is_active);
    assert_eq!(stats.fragments_received, 0);

    session.stop().await?;
    Ok(())
}

#[tokio::test]
async fn test_slow_translation_never_overwrites_newer_revision() -> Result<()> {
    let backend = Arc::new(DelayedBackend {
        delays: vec![("ab", 200)],
    });
    let (session, sender) = channel_session(backend);
    session.start().await?;

    sender.send_fragment("a", Some(0)).await?;
    sender.send_fragment("ab", Some(100)).await?;
    sender.send_fragment("abc", Some(200)).await?;

    session.stop().await?;
    let snapshot = session.snapshot().await;

    assert_eq!(snapshot.source_lines, vec!["abc"]);
    assert_eq!(snapshot.translated_lines, vec!["ABC"]);
    Ok(())
}

#[tokio::test]
async fn test_slow_translation_of_closed_line_keeps_line_order() -> Result<()> {
    let backend = Arc::new(DelayedBackend {
        delays: vec![("hallo", 200)],
    });
    let (session, sender) = channel_session(backend);
    session.start().await?;

    sender.send_fragment("hallo", Some(0)).await?;
    sender.send_fragment("dag", Some(1500)).await?;
    sender.send_fragment("dag allemaal", Some(1600)).await?;

    session.stop().await?;
    let snapshot = session.snapshot().await;

    assert_eq!(snapshot.source_lines, vec!["hallo", "dag allemaal"]);
    assert_eq!(snapshot.translated_lines, vec!["HALLO", "DAG ALLEMAAL"]);
    Ok(())
}

#[tokio::test]
async fn test_failed_translation_falls_back_to_source_text() -> Result<()> {
    let (session, sender) = channel_session(Arc::new(FailingBackend));
    session.start().await?;

    sender.send_fragment("goedemiddag", Some(0)).await?;

    session.stop().await?;
    let snapshot = session.snapshot().await;

    assert_eq!(snapshot.source_lines, vec!["goedemiddag"]);
    assert_eq!(snapshot.translated_lines, vec!["goedemiddag"]);
    Ok(())
}

#[tokio::test]
async fn test_translation_timeout_falls_back_to_source_text() -> Result<()> {
    let backend = Arc::new(DelayedBackend {
        delays: vec![("traag", 500)],
    });
    let (source, sender) = ChannelSource::new();
    let config = SessionConfig {
        translation_timeout: Duration::from_millis(50),
        ..SessionConfig::default()
    };
    let session = LiveSession::new(config, Box::new(source), backend);
    session.start().await?;

    sender.send_fragment("traag", Some(0)).await?;
    sender.send_fragment("snel", Some(3000)).await?;

    session.stop().await?;
    let snapshot = session.snapshot().await;

    assert_eq!(snapshot.translated_lines, vec!["traag", "SNEL"]);
    Ok(())
}

#[tokio::test]
async fn test_recognition_error_is_recorded_without_touching_lines() -> Result<()> {
    let (session, sender) = channel_session(suffix_backend());
    session.start().await?;

    sender.send_fragment("hallo", Some(0)).await?;
    sender.send_error(RecognitionError::NoSpeech).await?;
    sender.send_fragment("hallo daar", Some(400)).await?;

    let stats = session.stop().await?;

    assert_eq!(stats.recognition_errors, 1);
    assert_eq!(stats.last_error, Some(RecognitionError::NoSpeech));
    assert_eq!(session.snapshot().await.source_lines, vec!["hallo daar"]);
    Ok(())
}

#[tokio::test]
async fn test_end_event_finishes_session() -> Result<()> {
    let (session, sender) = channel_session(suffix_backend());
    session.start().await?;

    sender.send_fragment("tot ziens", Some(0)).await?;
    sender.end().await?;

    let stats = session.wait().await?;
    assert!(!stats.is_active);
    assert!(!session.is_active());

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.source_lines, vec!["tot ziens"]);
    assert_eq!(snapshot.open_line, None);
    Ok(())
}

#[tokio::test]
async fn test_sender_rejects_events_after_stop() -> Result<()> {
    let (session, sender) = channel_session(suffix_backend());
    session.start().await?;
    session.stop().await?;

    assert!(sender.send_fragment("te laat", Some(0)).await.is_err());
    Ok(())
}

#[tokio::test]
async fn test_session_can_be_restarted() -> Result<()> {
    let (session, sender) = channel_session(suffix_backend());

    session.start().await?;
    sender.send_fragment("eerste sessie", Some(0)).await?;
    session.stop().await?;

    session.start().await?;
    sender.send_fragment("tweede sessie", Some(0)).await?;
    session.stop().await?;

    assert_eq!(session.snapshot().await.source_lines, vec!["tweede sessie"]);
    Ok(())
}

#[tokio::test]
async fn test_replay_script_file() -> Result<()> {
    let mut script = NamedTempFile::new()?;
    writeln!(script, "# recorded session")?;
    writeln!(script, r#"{{"type":"fragment","transcript":"hallo","timestamp_ms":0}}"#)?;
    writeln!(script, r#"{{"type":"fragment","transcript":"hallo wereld","timestamp_ms":500}}"#)?;
    writeln!(script)?;
    writeln!(script, r#"{{"type":"error","error":"network"}}"#)?;
    writeln!(script, r#"{{"type":"fragment","transcript":"dag","timestamp_ms":2000}}"#)?;
    script.flush()?;

    let source = ScriptedSource::open(script.path())?;
    assert_eq!(source.events().len(), 4);

    let session = LiveSession::new(SessionConfig::default(), Box::new(source), suffix_backend());
    session.start().await?;
    let stats = session.wait().await?;

    let snapshot = session.snapshot().await;
    assert_eq!(snapshot.source_lines, vec!["hallo wereld", "dag"]);
    assert_eq!(snapshot.len(), snapshot.translated_lines.len());
    assert_eq!(stats.last_error, Some(RecognitionError::Network));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_fragments_without_timestamp_use_elapsed_time() -> Result<()> {
    let (session, sender) = channel_session(suffix_backend());
    session.start().await?;

    let first = sender.send_fragment("een", None).await?;
    tokio::time::advance(Duration::from_millis(1500)).await;
    let second = sender.send_fragment("twee", None).await?;

    assert!(second.timestamp_ms - first.timestamp_ms >= 1500);

    session.stop().await?;
    assert_eq!(session.snapshot().await.source_lines, vec!["een", "twee"]);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_realtime_replay_waits_between_fragments() -> Result<()> {
    let events = vec![
        RecognitionEvent::Fragment(FragmentEvent::new("een", 0)),
        RecognitionEvent::Fragment(FragmentEvent::new("een twee", 500)),
        RecognitionEvent::Fragment(FragmentEvent::new("drie", 2000)),
    ];
    let mut source = ScriptedSource::from_events(events).realtime(true);

    let began = Instant::now();
    let mut rx = source.start().await?;

    let mut arrivals = Vec::new();
    while let Some(event) = rx.recv().await {
        if let RecognitionEvent::Fragment(fragment) = event {
            arrivals.push((fragment.timestamp_ms, began.elapsed()));
        }
    }

    assert_eq!(arrivals.len(), 3);
    for (timestamp_ms, elapsed) in arrivals {
        assert!(elapsed >= Duration::from_millis(timestamp_ms));
    }
    source.stop().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_replay_without_realtime_does_not_wait() -> Result<()> {
    let events = vec![
        RecognitionEvent::Fragment(FragmentEvent::new("een", 0)),
        RecognitionEvent::Fragment(FragmentEvent::new("drie", 5000)),
    ];
    let mut source = ScriptedSource::from_events(events);

    let began = Instant::now();
    let mut rx = source.start().await?;
    while rx.recv().await.is_some() {}

    assert!(began.elapsed() < Duration::from_millis(5000));
    Ok(())
}

#[tokio::test]
async fn test_duration_is_frozen_after_stop() -> Result<()> {
    let (session, sender) = channel_session(suffix_backend());
    session.start().await?;
    sender.send_fragment("hallo", Some(0)).await?;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let stopped = session.stop().await?;
    tokio::time::sleep(Duration::from_millis(50)).await;
    let later = session.stats().await;

    assert!(stopped.duration_secs > 0.0);
    assert_eq!(later.duration_secs, stopped.duration_secs);
    Ok(())
}
