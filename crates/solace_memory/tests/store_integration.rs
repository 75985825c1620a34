//! Integration tests for MemoryStore
//!
//! Uses tempfile::TempDir for isolated memory documents.

use solace_core::state::{ContextEntry, EMOTION_HISTORY_CAP};
use solace_core::{Emotion, Intent, SentimentLabel, SessionMemory};
use solace_memory::MemoryStore;

fn populated() -> SessionMemory {
    let mut m = SessionMemory {
        username: Some("Alex".into()),
        last_topic: Some(Intent::Exam),
        mood_score: -4,
        turn_count: 7,
        last_emotion: Some(Emotion::Anxious),
        last_emotion_intensity: 2.5,
        relationship_level: 3,
        ..Default::default()
    };
    m.push_context(ContextEntry::Turn {
        user: "exam stress".into(),
        intent: Intent::Exam,
        emotion: Some(Emotion::Anxious),
        intensity: 2.5,
        context: None,
        sentiment: Some(SentimentLabel::Negative),
    });
    m.push_context(ContextEntry::Reply {
        bot: "Tell me more".into(),
    });
    m
}

/// Test 1: save → fresh memory → load restores every field
#[tokio::test]
async fn test_save_then_load_restores_state() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = MemoryStore::new(dir.path().join("memory.json"));
    let original = populated();
    store.save(&original).await.unwrap();

    let mut restored = SessionMemory::default();
    assert!(store.load_into(&mut restored).await.unwrap());
    assert_eq!(restored, original);
}

/// Test 2: the document is a plain JSON object keyed by field name
#[tokio::test]
async fn test_document_shape() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("memory.json");
    let store = MemoryStore::new(&path);
    store.save(&populated()).await.unwrap();

    let raw = tokio::fs::read_to_string(&path).await.unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(doc["username"], "Alex");
    assert_eq!(doc["mood_score"], -4);
    assert_eq!(doc["last_emotion"], "anxious");
    assert_eq!(doc["conversation_context"][1]["bot"], "Tell me more");
    assert!(doc.get("relationship_level").is_some());
}

/// Test 3: a partial document only overrides what it contains
#[tokio::test]
async fn test_partial_document_merges() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("partial.json");
    tokio::fs::write(&path, r#"{ "username": "Robin" }"#).await.unwrap();

    let mut m = populated();
    MemoryStore::new(&path).load_into(&mut m).await.unwrap();
    assert_eq!(m.username.as_deref(), Some("Robin"));
    assert_eq!(m.mood_score, -4);
    assert_eq!(m.turn_count, 7);
}

/// Test 4: oversized histories are trimmed on load
#[tokio::test]
async fn test_oversized_history_trimmed() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("big.json");
    let entries: Vec<serde_json::Value> = (0..30)
        .map(|i| {
            serde_json::json!({
                "timestamp": "2024-01-01T00:00:00Z",
                "emotion": null,
                "intensity": 1.0,
                "mood_score": i % 10,
                "sentiment": null
            })
        })
        .collect();
    let doc = serde_json::json!({ "emotion_history": entries });
    tokio::fs::write(&path, doc.to_string()).await.unwrap();

    let mut m = SessionMemory::default();
    MemoryStore::new(&path).load_into(&mut m).await.unwrap();
    assert_eq!(m.emotion_history.len(), EMOTION_HISTORY_CAP);
    // oldest ten dropped
    assert_eq!(m.emotion_history.front().unwrap().mood_score, 0);
}

/// Test 5: saving creates missing parent directories
#[tokio::test]
async fn test_save_creates_parent_dirs() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("memory.json");
    MemoryStore::new(&path)
        .save(&SessionMemory::default())
        .await
        .unwrap();
    assert!(path.exists());
}
