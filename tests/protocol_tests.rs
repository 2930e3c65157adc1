// Integration tests for the satellite frame reader and event decoding

mod common;

use anyhow::Result;
use common::{frame, raw_frame};
use futures::StreamExt;
use satellite_bridge::protocol::{
    Event, FrameError, FrameReader, Message, MAX_HEADER_BYTES, MAX_PAYLOAD_BYTES,
};
use serde_json::json;

fn reader(bytes: &[u8]) -> FrameReader<&[u8]> {
    FrameReader::new(bytes)
}

#[tokio::test]
async fn test_reads_header_and_payload() -> Result<()> {
    let bytes = frame("synthesize", Some(json!({"text": "Hello, world!!!!"})));
    let mut frames = reader(&bytes);

    let message = frames.read_message().await?;
    assert_eq!(message.event_type, "synthesize");
    assert_eq!(message.data_length, 27);
    assert_eq!(message.payload["text"], "Hello, world!!!!");

    assert!(matches!(frames.read_message().await, Err(FrameError::Closed)));
    Ok(())
}

#[tokio::test]
async fn test_literal_wire_bytes() -> Result<()> {
    let bytes = b"{\"type\":\"synthesize\",\"data_length\":27}\n{\"text\":\"Hello, world!!!!\"}";
    let message = reader(bytes).read_message().await?;
    assert_eq!(message.payload["text"], "Hello, world!!!!");
    Ok(())
}

#[tokio::test]
async fn test_frames_without_data_are_skipped() -> Result<()> {
    let mut bytes = frame("detection", None);
    bytes.extend(b"{\"type\":\"voice-started\",\"data_length\":-1}\n");
    bytes.extend(b"{\"type\":\"ping\"}\n");
    bytes.extend(frame("transcript", Some(json!({"text": "turn on the lights"}))));

    let mut frames = reader(&bytes);
    let message = frames.read_message().await?;
    assert_eq!(message.event_type, "transcript");
    Ok(())
}

#[tokio::test]
async fn test_header_only_stream_yields_nothing() {
    let bytes = frame("detection", None);
    let messages: Vec<_> = reader(&bytes).into_stream().collect().await;

    assert_eq!(messages.len(), 1);
    assert!(matches!(messages[0], Err(FrameError::Closed)));
}

#[tokio::test]
async fn test_malformed_payload_keeps_reading() -> Result<()> {
    let mut bytes = raw_frame("synthesize", b"{not json!}");
    bytes.extend(frame("synthesize", Some(json!({"text": "second"}))));

    let mut frames = reader(&bytes);
    let err = frames.read_message().await.unwrap_err();
    assert!(matches!(err, FrameError::Payload { ref event_type, .. } if event_type == "synthesize"));
    assert!(!err.is_fatal());

    let message = frames.read_message().await?;
    assert_eq!(message.payload["text"], "second");
    Ok(())
}

#[tokio::test]
async fn test_payload_must_be_an_object() {
    let bytes = raw_frame("synthesize", b"[1,2,3]");
    let err = reader(&bytes).read_message().await.unwrap_err();
    assert!(matches!(err, FrameError::Payload { .. }));
}

#[tokio::test]
async fn test_malformed_header_is_fatal() {
    let mut bytes = b"this is not json\n".to_vec();
    bytes.extend(frame("synthesize", Some(json!({"text": "never read"}))));

    let messages: Vec<_> = reader(&bytes).into_stream().collect().await;
    assert_eq!(messages.len(), 1);
    let err = messages[0].as_ref().unwrap_err();
    assert!(err.is_fatal());
    match err {
        FrameError::Header { line, .. } => assert_eq!(line, "this is not json"),
        other => panic!("expected header error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_truncated_payload_is_fatal() {
    let mut bytes = b"{\"type\":\"synthesize\",\"data_length\":50}\n".to_vec();
    bytes.extend(b"{\"text\":\"short\"}");

    let err = reader(&bytes).read_message().await.unwrap_err();
    assert!(matches!(err, FrameError::Io(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_header_cut_by_eof_is_fatal() {
    let bytes = b"{\"type\":\"detection\"";
    let err = reader(bytes).read_message().await.unwrap_err();
    assert!(matches!(err, FrameError::Io(_)));
}

#[tokio::test]
async fn test_oversized_payload_is_skipped() -> Result<()> {
    let mut bytes = raw_frame("synthesize", &vec![b' '; MAX_PAYLOAD_BYTES + 1]);
    bytes.extend(frame("synthesize", Some(json!({"text": "after the big one"}))));

    let mut frames = reader(&bytes);
    let err = frames.read_message().await.unwrap_err();
    assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
    assert!(!err.is_fatal());

    let message = frames.read_message().await?;
    assert_eq!(message.payload["text"], "after the big one");
    Ok(())
}

#[tokio::test]
async fn test_oversized_payload_cut_by_eof_is_fatal() {
    let header = format!(
        "{{\"type\":\"synthesize\",\"data_length\":{}}}\n",
        MAX_PAYLOAD_BYTES + 1
    );
    let err = reader(header.as_bytes()).read_message().await.unwrap_err();
    assert!(matches!(err, FrameError::Io(_)));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_header_without_newline_is_bounded() {
    let mut bytes = vec![b'a'; MAX_HEADER_BYTES + 10];
    bytes.push(b'\n');

    let messages: Vec<_> = reader(&bytes).into_stream().collect().await;
    assert_eq!(messages.len(), 1);
    let err = messages[0].as_ref().unwrap_err();
    assert!(matches!(err, FrameError::HeaderTooLong { max } if *max == MAX_HEADER_BYTES));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_stream_preserves_arrival_order() {
    let mut bytes = Vec::new();
    for text in ["one", "two", "three"] {
        bytes.extend(frame("transcript", Some(json!({"text": text}))));
    }

    let texts: Vec<String> = reader(&bytes)
        .into_stream()
        .filter_map(|m| async move { m.ok() })
        .map(|m| m.payload["text"].as_str().unwrap().to_string())
        .collect()
        .await;

    assert_eq!(texts, vec!["one", "two", "three"]);
}

fn message(event_type: &str, payload: serde_json::Value) -> Message {
    let payload = payload.as_object().cloned().unwrap_or_default();
    Message {
        event_type: event_type.to_string(),
        data_length: 1,
        payload,
    }
}

#[test]
fn test_decode_known_events() {
    assert_eq!(
        Event::try_from(message("detection", json!({"name": "ok_nabu"}))).unwrap(),
        Event::Detection {
            name: Some("ok_nabu".to_string())
        }
    );
    assert_eq!(
        Event::try_from(message("voice-started", json!({"timestamp": 10}))).unwrap(),
        Event::VoiceStarted
    );
    assert_eq!(
        Event::try_from(message("voice-stopped", json!({}))).unwrap(),
        Event::VoiceStopped
    );
    assert_eq!(
        Event::try_from(message("transcript", json!({"text": "what time is it"}))).unwrap(),
        Event::Transcript {
            text: Some("what time is it".to_string())
        }
    );
    assert_eq!(
        Event::try_from(message("synthesize", json!({"text": "It is noon.", "voice": {}}))).unwrap(),
        Event::Synthesize {
            text: "It is noon.".to_string()
        }
    );
}

#[test]
fn test_decode_unknown_event() {
    let event = Event::try_from(message("audio-chunk", json!({"rate": 16000}))).unwrap();
    assert_eq!(event, Event::Other("audio-chunk".to_string()));
    assert_eq!(event.event_type(), "audio-chunk");
}

#[test]
fn test_synthesize_requires_string_text() {
    assert!(Event::try_from(message("synthesize", json!({}))).is_err());
    assert!(Event::try_from(message("synthesize", json!({"text": 42}))).is_err());
}

#[test]
fn test_detection_tolerates_odd_name() {
    let event = Event::try_from(message("detection", json!({"name": 7}))).unwrap();
    assert_eq!(event, Event::Detection { name: None });
}
