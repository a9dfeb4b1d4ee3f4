//! Framed protocol integration tests
//!
//! Drives the framer end-to-end against in-memory buffers and scripted
//! streams, including frames whose bytes arrive in pieces the way a real
//! pipe delivers them.

use gamdl_bridge::app::protocol::{read_message, write_message};
use gamdl_bridge::errors::ProtocolResult;
use serde_json::{json, Value};

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut bytes = (payload.len() as u32).to_ne_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

#[tokio::test]
async fn round_trip_through_a_buffer() {
    let message = json!({
        "action": "download",
        "url": "https://music.apple.com/us/album/1440768600",
        "selectedIds": ["1", "2"],
        "codec": "alac",
    });

    let mut buffer: Vec<u8> = Vec::new();
    write_message(&mut buffer, &message).await.unwrap();

    let mut reader = buffer.as_slice();
    let decoded: Option<Value> = read_message(&mut reader).await.unwrap();
    assert_eq!(decoded, Some(message));
}

#[tokio::test]
async fn prefix_arriving_in_pieces_is_reassembled() {
    let payload = br#"{"action":"check_status"}"#;
    let prefix = (payload.len() as u32).to_ne_bytes();

    let mut mock = tokio_test::io::Builder::new()
        .read(&prefix[..2])
        .read(&prefix[2..])
        .read(payload)
        .build();

    let decoded: Option<Value> = read_message(&mut mock).await.unwrap();
    assert_eq!(decoded, Some(json!({"action": "check_status"})));
}

#[tokio::test]
async fn payload_arriving_in_pieces_is_reassembled() {
    let bytes = frame(br#"{"action":"fetch_items","url":"x"}"#);

    let mut mock = tokio_test::io::Builder::new()
        .read(&bytes[..6])
        .read(&bytes[6..20])
        .read(&bytes[20..])
        .build();

    let decoded: Option<Value> = read_message(&mut mock).await.unwrap();
    assert_eq!(
        decoded,
        Some(json!({"action": "fetch_items", "url": "x"}))
    );
}

#[tokio::test]
async fn stream_ending_mid_payload_is_an_error() {
    let bytes = frame(br#"{"action":"check_status"}"#);

    let mut mock = tokio_test::io::Builder::new().read(&bytes[..10]).build();

    let result: ProtocolResult<Option<Value>> = read_message(&mut mock).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn immediate_close_reads_as_end_of_stream() {
    let mut mock = tokio_test::io::Builder::new().build();

    let decoded: Option<Value> = read_message(&mut mock).await.unwrap();
    assert_eq!(decoded, None);
}
