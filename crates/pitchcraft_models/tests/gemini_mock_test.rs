//! GeminiClient tests against a mocked Gemini REST API.

use pitchcraft_core::{Description, Narrative, Platform};
use pitchcraft_error::{GenerationErrorKind, PitchcraftError};
use pitchcraft_interface::{PitchGenerator, PollPolicy};
use pitchcraft_models::{GeminiClient, ProviderConfig};
use pitchcraft_storage::InMemoryMediaStore;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";
const OPERATION: &str = "models/veo-3.1-fast-generate-preview/operations/op-1";

fn client(server: &MockServer) -> (GeminiClient, Arc<InMemoryMediaStore>) {
    let config = ProviderConfig {
        base_url: server.uri(),
        ..ProviderConfig::default()
    };
    let store = Arc::new(InMemoryMediaStore::new());
    (GeminiClient::new(config, API_KEY, store.clone()), store)
}

fn description() -> Description {
    Description::parse("An app that connects busy professionals with local dog walkers").unwrap()
}

fn narrative() -> Narrative {
    Narrative {
        hook: "Your dog is waiting by the door again.".into(),
        emotion: "Guilt turning into relief.".into(),
        conflict: "Long meetings leave no time for walks.".into(),
        resolution: "A trusted local walker arrives on schedule.".into(),
        cta: "Book your first walk today.".into(),
    }
}

fn text_response(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }] })
}

fn operation(done: bool) -> Value {
    json!({ "name": OPERATION, "done": done })
}

fn finished_operation(server: &MockServer) -> Value {
    json!({
        "name": OPERATION,
        "done": true,
        "response": {
            "generateVideoResponse": {
                "generatedSamples": [{
                    "video": { "uri": format!("{}/files/abc:download?alt=media", server.uri()) }
                }]
            }
        }
    })
}

fn fast_polling() -> PollPolicy {
    PollPolicy::new(Duration::from_millis(20))
}

fn generation_kind(err: &PitchcraftError) -> GenerationErrorKind {
    err.generation_kind()
        .cloned()
        .unwrap_or_else(|| panic!("not a generation error: {err}"))
}

async fn mount_submit(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path("/models/veo-3.1-fast-generate-preview:predictLongRunning"))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "parameters": { "sampleCount": 1, "resolution": "720p", "aspectRatio": "16:9" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_download(server: &MockServer, expected: u64) {
    Mock::given(method("GET"))
        .and(path("/files/abc:download"))
        .and(query_param("alt", "media"))
        .and(query_param("key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"mp4-bytes".to_vec()))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_narrative_parses_structured_output() {
    let server = MockServer::start().await;
    let body = json!({
        "hook": "h", "emotion": "e", "conflict": "c", "resolution": "r", "cta": "a"
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": { "type": "OBJECT" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&body.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let narrative = client.generate_narrative(&description()).await.unwrap();

    assert_eq!(narrative.hook, "h");
    assert_eq!(narrative.cta, "a");
}

#[tokio::test]
async fn test_narrative_missing_field_fails_whole_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(r#"{"hook":"h","emotion":"e","conflict":"c"}"#)),
        )
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let err = client.generate_narrative(&description()).await.unwrap_err();

    assert!(matches!(generation_kind(&err), GenerationErrorKind::GenerationFailed(_)));
}

#[tokio::test]
async fn test_narrative_server_error_is_generation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "status": "INTERNAL", "message": "backend exploded" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let err = client.generate_narrative(&description()).await.unwrap_err();

    match generation_kind(&err) {
        GenerationErrorKind::GenerationFailed(message) => {
            assert!(message.contains("backend exploded"))
        }
        other => panic!("unexpected kind: {other}"),
    }
}

#[tokio::test]
async fn test_image_returns_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseModalities": ["IMAGE"] }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Here is your collage" },
                { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
            ] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let image = client
        .generate_image(&narrative(), &description())
        .await
        .unwrap();

    assert_eq!(image.data, "iVBORw0KGgo=");
    assert_eq!(image.data_url(), "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn test_image_without_inline_data() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-image:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("I cannot draw that")))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let err = client
        .generate_image(&narrative(), &description())
        .await
        .unwrap_err();

    assert_eq!(generation_kind(&err), GenerationErrorKind::NoImageData);
}

#[tokio::test]
async fn test_social_posts_cover_every_platform() {
    let server = MockServer::start().await;
    let posts = json!({
        "youtube": "Summary\n\nKey points\n\n#dogs",
        "instagram": "🐶 Walks sorted!\n\n#dogwalker #pets",
        "linkedin": "Busy schedules.\n\n- Trusted walkers\n\n#productivity",
        "facebook": "Who else feels guilty?\n\n#dogs",
        "x": "Walks handled. Book now #dogs"
    });
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-pro:generateContent"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseSchema": { "required": ["youtube", "instagram", "linkedin", "facebook", "x"] } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&posts.to_string())))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let posts = client
        .generate_social_posts(&narrative(), &description())
        .await
        .unwrap();

    for platform in Platform::ALL {
        assert!(!posts.get(platform).is_empty());
    }
    assert!(posts.x.contains("#dogs"));
}

#[tokio::test]
async fn test_video_polls_until_done_then_downloads() {
    let server = MockServer::start().await;
    mount_submit(&server, operation(false)).await;

    // Three pending answers, then the finished operation
    Mock::given(method("GET"))
        .and(path(format!("/{}", OPERATION)))
        .and(header("x-goog-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(operation(false)))
        .up_to_n_times(3)
        .expect(3)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", OPERATION)))
        .respond_with(ResponseTemplate::new(200).set_body_json(finished_operation(&server)))
        .expect(1)
        .with_priority(2)
        .mount(&server)
        .await;
    mount_download(&server, 1).await;

    let (client, store) = client(&server);
    let started = std::time::Instant::now();
    let media = client
        .generate_video(&narrative(), &fast_polling())
        .await
        .unwrap();

    // One wait before each of the four status queries
    assert!(started.elapsed() >= Duration::from_millis(80));
    assert_eq!(media.mime_type(), "video/mp4");
    assert!(media.url().starts_with("local://"));
    assert_eq!(media.bytes().await.unwrap(), b"mp4-bytes");
    assert_eq!(store.live_count(), 1);

    drop(media);
    assert_eq!(store.live_count(), 0);
    server.verify().await;
}

#[tokio::test]
async fn test_video_already_done_skips_polling() {
    let server = MockServer::start().await;
    mount_submit(&server, finished_operation(&server)).await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", OPERATION)))
        .respond_with(ResponseTemplate::new(200).set_body_json(operation(false)))
        .expect(0)
        .mount(&server)
        .await;
    mount_download(&server, 1).await;

    let (client, _) = client(&server);
    let media = client
        .generate_video(&narrative(), &PollPolicy::default())
        .await
        .unwrap();

    assert!(!media.is_released());
    server.verify().await;
}

#[tokio::test]
async fn test_video_done_without_link_does_not_download() {
    let server = MockServer::start().await;
    mount_submit(
        &server,
        json!({ "name": OPERATION, "done": true, "response": { "generateVideoResponse": {} } }),
    )
    .await;
    mount_download(&server, 0).await;

    let (client, store) = client(&server);
    let err = client
        .generate_video(&narrative(), &PollPolicy::default())
        .await
        .unwrap_err();

    assert_eq!(generation_kind(&err), GenerationErrorKind::MissingDownloadLink);
    assert_eq!(store.live_count(), 0);
    server.verify().await;
}

#[tokio::test]
async fn test_video_operation_error_not_found_is_invalid_key() {
    let server = MockServer::start().await;
    mount_submit(
        &server,
        json!({
            "name": OPERATION,
            "done": true,
            "error": { "code": 5, "status": "NOT_FOUND", "message": "Requested entity was not found." }
        }),
    )
    .await;

    let (client, _) = client(&server);
    let err = client
        .generate_video(&narrative(), &PollPolicy::default())
        .await
        .unwrap_err();

    assert!(matches!(generation_kind(&err), GenerationErrorKind::InvalidApiKey(_)));
}

#[tokio::test]
async fn test_video_submit_rejected_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/veo-3.1-fast-generate-preview:predictLongRunning"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "status": "NOT_FOUND", "message": "Requested entity was not found." }
        })))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let err = client
        .generate_video(&narrative(), &PollPolicy::default())
        .await
        .unwrap_err();

    assert!(generation_kind(&err).is_authorization());
}

#[tokio::test]
async fn test_video_download_failure_reports_status() {
    let server = MockServer::start().await;
    mount_submit(&server, finished_operation(&server)).await;
    Mock::given(method("GET"))
        .and(path("/files/abc:download"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let (client, store) = client(&server);
    let err = client
        .generate_video(&narrative(), &PollPolicy::default())
        .await
        .unwrap_err();

    assert_eq!(
        generation_kind(&err),
        GenerationErrorKind::DownloadFailed {
            status: 403,
            message: "forbidden".into()
        }
    );
    assert_eq!(store.live_count(), 0);
}

#[tokio::test]
async fn test_video_poll_gives_up_at_max_wait() {
    let server = MockServer::start().await;
    mount_submit(&server, operation(false)).await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", OPERATION)))
        .respond_with(ResponseTemplate::new(200).set_body_json(operation(false)))
        .expect(2)
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let policy =
        PollPolicy::new(Duration::from_millis(200)).with_max_wait(Duration::from_millis(500));
    let err = client
        .generate_video(&narrative(), &policy)
        .await
        .unwrap_err();

    assert!(matches!(generation_kind(&err), GenerationErrorKind::Timeout { .. }));
    server.verify().await;
}

#[tokio::test]
async fn test_video_poll_cancelled() {
    let server = MockServer::start().await;
    mount_submit(&server, operation(false)).await;
    Mock::given(method("GET"))
        .and(path(format!("/{}", OPERATION)))
        .respond_with(ResponseTemplate::new(200).set_body_json(operation(false)))
        .mount(&server)
        .await;

    let (client, _) = client(&server);
    let (policy, cancel) = PollPolicy::default().cancellable();
    cancel.cancel();

    let err = client
        .generate_video(&narrative(), &policy)
        .await
        .unwrap_err();

    assert_eq!(generation_kind(&err), GenerationErrorKind::Cancelled);
}

async fn mount_stalled_poll(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/{}", OPERATION)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(operation(false))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_stalled_status_query_times_out_at_max_wait() {
    let server = MockServer::start().await;
    mount_submit(&server, operation(false)).await;
    mount_stalled_poll(&server).await;

    let (client, _) = client(&server);
    let policy =
        PollPolicy::new(Duration::from_millis(50)).with_max_wait(Duration::from_millis(300));
    let started = std::time::Instant::now();
    let err = client
        .generate_video(&narrative(), &policy)
        .await
        .unwrap_err();

    assert!(matches!(generation_kind(&err), GenerationErrorKind::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_stalled_status_query_is_cancellable() {
    let server = MockServer::start().await;
    mount_submit(&server, operation(false)).await;
    mount_stalled_poll(&server).await;

    let (client, _) = client(&server);
    let (policy, cancel) = PollPolicy::new(Duration::from_millis(50)).cancellable();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        cancel.cancel();
    });

    let started = std::time::Instant::now();
    let err = client
        .generate_video(&narrative(), &policy)
        .await
        .unwrap_err();

    assert_eq!(generation_kind(&err), GenerationErrorKind::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_stalled_download_times_out_at_max_wait() {
    let server = MockServer::start().await;
    mount_submit(&server, finished_operation(&server)).await;
    Mock::given(method("GET"))
        .and(path("/files/abc:download"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"mp4-bytes".to_vec())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let (client, store) = client(&server);
    let policy = PollPolicy::default().with_max_wait(Duration::from_millis(300));
    let started = std::time::Instant::now();
    let err = client
        .generate_video(&narrative(), &policy)
        .await
        .unwrap_err();

    assert!(matches!(generation_kind(&err), GenerationErrorKind::Timeout { .. }));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(store.live_count(), 0);
}

#[tokio::test]
async fn test_download_transport_error_hides_api_key() {
    let server = MockServer::start().await;
    mount_submit(
        &server,
        json!({
            "name": OPERATION,
            "done": true,
            "response": { "generateVideoResponse": { "generatedSamples": [{
                "video": { "uri": "http://127.0.0.1:1/files/x:download?alt=media" }
            }] } }
        }),
    )
    .await;

    let (client, _) = client(&server);
    let err = client
        .generate_video(&narrative(), &PollPolicy::default())
        .await
        .unwrap_err();

    match generation_kind(&err) {
        GenerationErrorKind::DownloadFailed { status, message } => {
            assert_eq!(status, 0);
            assert!(!message.contains(API_KEY), "key leaked: {message}");
        }
        other => panic!("unexpected kind: {other}"),
    }
    assert!(!err.to_string().contains(API_KEY));
}
