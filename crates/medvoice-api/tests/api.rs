//! End-to-end handler tests against mocked OpenAI endpoints

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use medvoice_api::{AppState, app};
use medvoice_core::{CompletionClient, Config, FileStore, OpenAiConfig, StorageConfig};
use medvoice_voice::{TtsClient, TtsConfig, WhisperClient, WhisperConfig};

const BOUNDARY: &str = "test-boundary";

async fn test_state(server: &MockServer, root: &Path) -> AppState {
    let storage = StorageConfig {
        upload_dir: root.join("uploads").to_string_lossy().into_owned(),
        keywords_dir: root.join("keywords").to_string_lossy().into_owned(),
        audio_dir: root.join("static").to_string_lossy().into_owned(),
    };
    let config = Config {
        openai: OpenAiConfig {
            api_key: "sk-test".to_string(),
            base_url: Some(server.uri()),
            ..OpenAiConfig::default()
        },
        api: Default::default(),
        storage: storage.clone(),
    };

    let completion = CompletionClient::new(&config).unwrap();
    let whisper = WhisperClient::new(
        WhisperConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_retry(3, Duration::from_millis(10)),
    )
    .unwrap();
    let tts = TtsClient::new(TtsConfig::new("sk-test").with_base_url(server.uri())).unwrap();
    let store = FileStore::new(&storage).await.unwrap();

    AppState {
        completion: Arc::new(completion),
        whisper: Arc::new(whisper),
        tts: Arc::new(tts),
        store,
    }
}

fn multipart_request(field_name: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
Content-Disposition: form-data; name=\"{field_name}\"; filename=\"audio.wav\"\r\n\
Content-Type: audio/wav\r\n\r\n\
RIFFfakeWAVE\r\n\
--{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri("/transcribe")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn dir_entry_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

#[tokio::test]
async fn health_returns_static_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    let response = app(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["message"], "Medical AI backend is running.");
}

#[tokio::test]
async fn analyze_empty_text_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    let response = app(state)
        .oneshot(json_request("/analyze", serde_json::json!({"text": "   "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "No transcription provided.");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn speak_empty_text_rejected_without_upstream_call() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    let response = app(state)
        .oneshot(json_request("/speak", serde_json::json!({"text": ""})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "No text provided");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn transcribe_without_file_field_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    let response = app(state)
        .oneshot(multipart_request("not_the_file"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "No audio file provided.");

    // Nothing was written and no upstream call was made.
    assert_eq!(dir_entry_count(&dir.path().join("uploads")), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn transcribe_end_to_end() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"text": "patient has a cough"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": "Cough"},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(state.clone())
        .oneshot(multipart_request("file"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["transcription"], "patient has a cough");
    assert_eq!(body["keywords"], "Cough");

    let keywords_file = body["keywords_file"].as_str().unwrap();
    assert!(keywords_file.starts_with("patient_"));
    assert!(keywords_file.ends_with(".txt"));
    // patient_<YYYYMMDDHHMMSS>.txt
    assert_eq!(keywords_file.len(), "patient_".len() + 14 + ".txt".len());

    let content = std::fs::read_to_string(state.store.keywords_path(keywords_file)).unwrap();
    assert_eq!(content, "Cough");

    // Temporary audio was cleaned up.
    assert_eq!(dir_entry_count(&dir.path().join("uploads")), 0);
}

#[tokio::test]
async fn transcribe_upstream_failure_returns_500_and_cleans_up() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream outage"))
        .expect(3)
        .mount(&server)
        .await;

    let response = app(state)
        .oneshot(multipart_request("file"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Transcription failed or audio was empty.");

    assert_eq!(dir_entry_count(&dir.path().join("uploads")), 0);
    assert_eq!(dir_entry_count(&dir.path().join("keywords")), 0);
}

#[tokio::test]
async fn transcribe_auth_failure_returns_401() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid key"))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(state)
        .oneshot(multipart_request("file"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid OpenAI API key. Check your .env file.");
    assert_eq!(dir_entry_count(&dir.path().join("uploads")), 0);
}

#[tokio::test]
async fn analyze_end_to_end() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    let structured = "Key Symptoms Identified:\n- Headache";
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{
                "message": {"role": "assistant", "content": format!("\n{structured}\n")},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = app(state)
        .oneshot(json_request(
            "/analyze",
            serde_json::json!({"text": "I have a headache"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["analysis"], structured);
}

#[tokio::test]
async fn speak_end_to_end() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let state = test_state(&server, dir.path()).await;

    Mock::given(method("POST"))
        .and(path("/audio/speech"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "audio/mpeg")
                .set_body_bytes(b"ID3 fake mp3".to_vec()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let response = app(state)
        .oneshot(json_request(
            "/speak",
            serde_json::json!({"text": "Take rest and drink fluids"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "audio/mp3"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment; filename=\"speech_"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ID3 fake mp3");

    // The synthesized audio is also persisted on disk.
    assert_eq!(dir_entry_count(&dir.path().join("static")), 1);
}
