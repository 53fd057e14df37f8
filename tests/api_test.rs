use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use tower::ServiceExt;

use vellum::application::ports::{
    PdfSource, PdfSourceError, TextExtractor, TextExtractorError, TextGenerator,
    TextGeneratorError,
};
use vellum::application::services::{GenerationService, SegmentationService, UploadService};
use vellum::domain::GenerationParams;
use vellum::infrastructure::storage::MockDocumentStore;
use vellum::infrastructure::text_processing::FixedBlockSplitter;
use vellum::presentation::{AppState, create_router};

const TEST_BLOCK_SIZE: usize = 10;
const TEST_MAX_LENGTH: usize = 200;
const TEST_TOP_K: usize = 10;

/// Serves fixed bytes, or fails like an unreachable host when `data` is None.
struct StaticPdfSource {
    data: Option<Vec<u8>>,
}

#[async_trait]
impl PdfSource for StaticPdfSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, PdfSourceError> {
        match &self.data {
            Some(d) => Ok(Bytes::from(d.clone())),
            None => Err(PdfSourceError::RequestFailed {
                url: url.to_string(),
                reason: "connection refused".to_string(),
            }),
        }
    }
}

/// Treats the downloaded bytes as UTF-8 text, standing in for PDF parsing.
struct Utf8Extractor;

#[async_trait]
impl TextExtractor for Utf8Extractor {
    async fn extract_text(&self, data: &[u8]) -> Result<String, TextExtractorError> {
        String::from_utf8(data.to_vec())
            .map_err(|e| TextExtractorError::InvalidDocument(e.to_string()))
    }
}

/// Echoes the prompt and records every prompt and parameter set it was
/// handed.
struct RecordingGenerator {
    calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl RecordingGenerator {
    fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    fn recorded(&self) -> Vec<(String, GenerationParams)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, TextGeneratorError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), *params));
        Ok(format!("{prompt} [generated]"))
    }
}

fn create_test_app(
    source_data: Option<&str>,
    generator: Arc<RecordingGenerator>,
) -> axum::Router {
    let store = Arc::new(MockDocumentStore);
    let source = Arc::new(StaticPdfSource {
        data: source_data.map(|s| s.as_bytes().to_vec()),
    });
    let extractor = Arc::new(Utf8Extractor);
    let splitter = Arc::new(FixedBlockSplitter::new());

    let upload_service = Arc::new(UploadService::new(store));
    let segmentation_service = Arc::new(SegmentationService::new(
        source,
        extractor,
        splitter,
        TEST_BLOCK_SIZE,
    ));
    let generation_service = Arc::new(GenerationService::new(
        Arc::clone(&segmentation_service),
        generator,
    ));

    let state = AppState {
        upload_service,
        segmentation_service,
        generation_service,
        default_max_length: TEST_MAX_LENGTH,
        default_top_k: TEST_TOP_K,
    };

    create_router(state)
}

fn multipart_request(filename: &str, field_name: &str) -> Request<Body> {
    let boundary = "test-boundary";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n%PDF-1.4 test content\r\n--{boundary}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri("/upload-pdf")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn given_running_server_when_health_check_then_returns_ok() {
    let app = create_test_app(Some("text"), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn given_valid_file_when_upload_then_returns_storage_url() {
    let app = create_test_app(None, Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(multipart_request("report.pdf", "file"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["url"], "mock://report.pdf");
    assert_eq!(json["message"], "File uploaded successfully.");
}

#[tokio::test]
async fn given_empty_filename_when_upload_then_returns_bad_request() {
    let app = create_test_app(None, Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(multipart_request("", "file"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Empty filename");
}

#[tokio::test]
async fn given_no_file_field_when_upload_then_returns_bad_request() {
    let app = create_test_app(None, Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(multipart_request("report.pdf", "attachment"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "No file provided");
}

#[tokio::test]
async fn given_missing_url_when_process_then_returns_bad_request() {
    let app = create_test_app(Some("text"), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process-pdf")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Missing required parameter: 'url'");
}

#[tokio::test]
async fn given_valid_url_when_process_then_returns_segment_count() {
    // 25 chars at block size 10 -> ceil(25/10) = 3 segments.
    let text = "a".repeat(25);
    let app = create_test_app(Some(&text), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process-pdf")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"url": "http://example.com/doc.pdf"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["segments"], 3);
    assert_eq!(json["message"], "PDF processed successfully.");
}

#[tokio::test]
async fn given_block_size_override_when_process_then_uses_requested_size() {
    let text = "a".repeat(25);
    let app = create_test_app(Some(&text), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process-pdf")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"url": "http://example.com/doc.pdf", "block_size": 5}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["segments"], 5);
}

#[tokio::test]
async fn given_unreachable_url_when_process_then_returns_error_response() {
    let app = create_test_app(None, Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/process-pdf")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"url": "http://unreachable.invalid/doc.pdf"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("error downloading PDF"),
        "unexpected error body: {json}"
    );
}

#[tokio::test]
async fn given_missing_fields_when_generate_then_returns_bad_request() {
    let app = create_test_app(Some("text"), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-text")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"url": "http://example.com/doc.pdf"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(
        json["error"],
        "Missing required parameters: 'url', 'prompt', and 'segment_index'"
    );
}

#[tokio::test]
async fn given_out_of_range_segment_index_when_generate_then_returns_valid_count() {
    // 25 chars at block size 10 -> 3 segments, so index 7 is out of range.
    let text = "a".repeat(25);
    let app = create_test_app(Some(&text), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-text")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"url": "http://example.com/doc.pdf", "prompt": "Summarize:", "segment_index": 7}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("out of range"), "unexpected error: {error}");
    assert!(
        error.contains("Total segments: 3"),
        "error must name the valid count: {error}"
    );
}

#[tokio::test]
async fn given_valid_request_when_generate_then_combines_prompt_and_segment() {
    let generator = Arc::new(RecordingGenerator::new());
    let text = "0123456789abcdefghij";
    let app = create_test_app(Some(text), Arc::clone(&generator));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-text")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"url": "http://example.com/doc.pdf", "prompt": "Summarize:", "segment_index": 1}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["generated_text"], "Summarize:\n\nabcdefghij [generated]");

    let calls = generator.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Summarize:\n\nabcdefghij");
}

#[tokio::test]
async fn given_request_without_id_when_any_endpoint_then_response_contains_request_id() {
    let app = create_test_app(Some("text"), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn given_negative_segment_index_when_generate_then_returns_valid_count() {
    // 25 chars at block size 10 -> 3 segments; -1 must hit the range check,
    // not a deserialization rejection.
    let text = "a".repeat(25);
    let app = create_test_app(Some(&text), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-text")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"url": "http://example.com/doc.pdf", "prompt": "Summarize:", "segment_index": -1}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    let error = json["error"].as_str().unwrap();
    assert!(error.contains("out of range"), "unexpected error: {error}");
    assert!(
        error.contains("Total segments: 3"),
        "error must name the valid count: {error}"
    );
}

#[tokio::test]
async fn given_param_overrides_when_generate_then_generator_receives_them() {
    let generator = Arc::new(RecordingGenerator::new());
    let app = create_test_app(Some("0123456789"), Arc::clone(&generator));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-text")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"url": "http://example.com/doc.pdf", "prompt": "P", "segment_index": 0,
                        "max_length": 64, "top_k": 3, "seed": 42, "greedy": true}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let calls = generator.recorded();
    assert_eq!(
        calls[0].1,
        GenerationParams {
            max_length: 64,
            top_k: 3,
            seed: 42,
            greedy: true,
        }
    );
}

#[tokio::test]
async fn given_no_param_overrides_when_generate_then_defaults_reach_generator() {
    let generator = Arc::new(RecordingGenerator::new());
    let app = create_test_app(Some("0123456789"), Arc::clone(&generator));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-text")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"url": "http://example.com/doc.pdf", "prompt": "P", "segment_index": 0}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let params = generator.recorded()[0].1;
    assert_eq!(params.max_length, TEST_MAX_LENGTH);
    assert_eq!(params.top_k, TEST_TOP_K);
    assert!(!params.greedy);
}

#[tokio::test]
async fn given_client_supplied_request_id_when_any_endpoint_then_same_id_is_echoed() {
    let app = create_test_app(Some("text"), Arc::new(RecordingGenerator::new()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "client-id-7")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "client-id-7");
}
