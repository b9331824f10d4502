//! End-to-end pipeline tests
//!
//! The spec is served by wiremock; completion backends are scripted stubs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use inkify::config::FetchProperties;
use inkify::error::{DocError, FetchError, UNEXPECTED_MESSAGE, user_message};
use inkify::fetch::SpecFetcher;
use inkify::orchestrator::DocumentationOrchestrator;
use inkify::provider::{CompletionProvider, ProviderRegistry};
use inkify::streaming::ChunkStream;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MINIMAL_SPEC: &str =
    r#"{"openapi":"3.0.0","info":{"title":"T","description":"D"},"paths":{},"components":{"schemas":{}}}"#;

/// Backend that replays a fixed script and records the prompts it saw
struct ScriptedProvider {
    name: &'static str,
    script: Vec<Result<String, DocError>>,
    prompts: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProvider {
    fn new(name: &'static str, script: Vec<Result<String, DocError>>) -> Self {
        Self {
            name,
            script,
            prompts: Arc::default(),
            calls: Arc::default(),
        }
    }

    fn chunks(name: &'static str, chunks: &[&str]) -> Self {
        Self::new(name, chunks.iter().map(|c| Ok(c.to_string())).collect())
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        self.name
    }

    async fn complete(&self, prompt: &str) -> Result<ChunkStream, DocError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(Box::pin(futures_util::stream::iter(self.script.clone())))
    }
}

/// Backend whose stream never finishes and flags when it is dropped
struct HangingProvider {
    dropped: Arc<AtomicBool>,
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CompletionProvider for HangingProvider {
    fn provider_name(&self) -> &str {
        "hanging"
    }

    async fn complete(&self, _prompt: &str) -> Result<ChunkStream, DocError> {
        let flag = DropFlag(self.dropped.clone());
        Ok(Box::pin(async_stream::stream! {
            let _flag = flag;
            yield Ok::<_, DocError>("# Start".to_string());
            futures_util::future::pending::<()>().await;
        }))
    }
}

fn fast_properties() -> FetchProperties {
    FetchProperties::default()
        .with_max_retries(2)
        .with_retry_delay(Duration::from_millis(1))
}

async fn serve_spec(body: &str) -> (MockServer, String) {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&mock_server)
        .await;
    let url = format!("{}/openapi.json", mock_server.uri());
    (mock_server, url)
}

fn orchestrator(registry: ProviderRegistry) -> DocumentationOrchestrator {
    DocumentationOrchestrator::new(SpecFetcher::new(fast_properties()).unwrap(), registry)
}

async fn collect(stream: ChunkStream) -> Vec<Result<String, DocError>> {
    stream.collect().await
}

#[tokio::test]
async fn test_end_to_end_single_chunk() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let stub = ScriptedProvider::chunks("ollama", &["# Doc"]);
    let prompts = stub.prompts.clone();
    let orchestrator = orchestrator(ProviderRegistry::new().with_provider(stub));

    let chunks = collect(orchestrator.generate(&url, "ollama").await.unwrap()).await;
    assert_eq!(chunks, vec![Ok("# Doc".to_string())]);

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Title: T"));
    assert!(prompts[0].contains("Description: D"));
    assert!(prompts[0].contains("## Endpoints\n\n"));
}

#[tokio::test]
async fn test_chunks_keep_backend_order() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let parts: Vec<String> = (0..200).map(|i| format!("part-{i} ")).collect();
    let refs: Vec<&str> = parts.iter().map(String::as_str).collect();
    let orchestrator = orchestrator(
        ProviderRegistry::new().with_provider(ScriptedProvider::chunks("ollama", &refs)),
    )
    .with_channel_capacity(4);

    let document = orchestrator.generate_to_string(&url, "ollama").await.unwrap();
    assert_eq!(document, parts.concat());
}

#[tokio::test]
async fn test_provider_lookup_ignores_case() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let orchestrator = orchestrator(
        ProviderRegistry::new().with_provider(ScriptedProvider::chunks("ollama", &["ok"])),
    );
    let document = orchestrator.generate_to_string(&url, "OLLAMA").await.unwrap();
    assert_eq!(document, "ok");
}

#[tokio::test]
async fn test_default_provider_is_used() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let orchestrator = orchestrator(
        ProviderRegistry::new()
            .with_provider(ScriptedProvider::chunks("ollama", &["local"]))
            .with_provider(ScriptedProvider::chunks("openai", &["hosted"])),
    )
    .with_default_provider("openai");

    assert_eq!(orchestrator.providers(), vec!["ollama", "openai"]);
    let chunks = collect(orchestrator.generate_default(&url).await.unwrap()).await;
    assert_eq!(chunks, vec![Ok("hosted".to_string())]);
}

#[tokio::test]
async fn test_empty_generation_is_a_failure() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let orchestrator = orchestrator(
        ProviderRegistry::new()
            .with_provider(ScriptedProvider::new("ollama", vec![]))
            .with_provider(ScriptedProvider::chunks("blank", &["", ""])),
    );

    for provider in ["ollama", "blank"] {
        let err = orchestrator.generate(&url, provider).await.err().unwrap();
        assert!(
            matches!(err, DocError::GenerationFailed { .. }),
            "{provider}: {err:?}"
        );
    }
}

#[tokio::test]
async fn test_backend_error_before_output_is_returned() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let failure = DocError::generation_failed("ollama", "model not loaded");
    let orchestrator = orchestrator(ProviderRegistry::new().with_provider(ScriptedProvider::new(
        "ollama",
        vec![Err(failure.clone())],
    )));

    let err = orchestrator.generate(&url, "ollama").await.err().unwrap();
    assert_eq!(err, failure);
}

#[tokio::test]
async fn test_mid_stream_error_is_propagated() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let failure = DocError::generation_failed("ollama", "connection reset");
    let orchestrator = orchestrator(ProviderRegistry::new().with_provider(ScriptedProvider::new(
        "ollama",
        vec![
            Ok("# Doc".to_string()),
            Err(failure.clone()),
            Ok("unreachable".to_string()),
        ],
    )));

    let chunks = collect(orchestrator.generate(&url, "ollama").await.unwrap()).await;
    assert_eq!(chunks, vec![Ok("# Doc".to_string()), Err(failure)]);

    let err = orchestrator
        .generate_to_string(&url, "ollama")
        .await
        .unwrap_err();
    assert!(matches!(err, DocError::GenerationFailed { .. }));
}

#[tokio::test]
async fn test_fetch_failure_short_circuits() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(3)
        .mount(&mock_server)
        .await;

    let stub = ScriptedProvider::chunks("ollama", &["never"]);
    let calls = stub.calls.clone();
    let orchestrator = orchestrator(ProviderRegistry::new().with_provider(stub));

    let err = orchestrator
        .generate(&format!("{}/openapi.json", mock_server.uri()), "ollama")
        .await
        .err()
        .unwrap();
    match err {
        DocError::Fetch(FetchError::RetriesExhausted { attempts, source, .. }) => {
            assert_eq!(attempts, 3);
            assert!(source.to_string().contains("500 Internal Server Error"));
        }
        other => panic!("expected a wrapped fetch error, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_invalid_spec_short_circuits() {
    let (_server, url) = serve_spec(r#"{"name":"not a spec"}"#).await;
    let stub = ScriptedProvider::chunks("ollama", &["never"]);
    let calls = stub.calls.clone();
    let orchestrator = orchestrator(ProviderRegistry::new().with_provider(stub));

    let err = orchestrator.generate(&url, "ollama").await.err().unwrap();
    assert!(matches!(err, DocError::IllegalSpec { .. }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_provider_is_reported() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let orchestrator = orchestrator(
        ProviderRegistry::new().with_provider(ScriptedProvider::chunks("ollama", &["x"])),
    );

    let err = orchestrator.generate(&url, "nonexistent").await.err().unwrap();
    assert_eq!(
        err,
        DocError::unsupported_provider("nonexistent", vec!["ollama".to_string()])
    );
}

#[tokio::test]
async fn test_dropping_stream_releases_backend() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let dropped = Arc::new(AtomicBool::new(false));
    let orchestrator = orchestrator(ProviderRegistry::new().with_provider(HangingProvider {
        dropped: dropped.clone(),
    }));

    let mut stream = orchestrator.generate(&url, "hanging").await.unwrap();
    assert_eq!(stream.next().await, Some(Ok("# Start".to_string())));
    drop(stream);

    tokio::time::timeout(Duration::from_secs(1), async {
        while !dropped.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("backend stream should be released after the consumer leaves");
}

#[tokio::test]
async fn test_cancel_aborts_in_flight_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(MINIMAL_SPEC)
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&mock_server)
        .await;

    let orchestrator = orchestrator(
        ProviderRegistry::new().with_provider(ScriptedProvider::chunks("ollama", &["x"])),
    );
    let handle = orchestrator.generate_with_cancel(&format!("{}/slow.json", mock_server.uri()), "ollama");
    let (mut stream, cancel) = handle.into_parts();

    let cancel_soon = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    };
    let (next, ()) = tokio::join!(
        tokio::time::timeout(Duration::from_secs(2), stream.next()),
        cancel_soon
    );
    let first = next.expect("cancel should resolve the stream promptly");
    assert_eq!(first, Some(Err(DocError::Cancelled)));
    assert_eq!(user_message(&DocError::Cancelled), UNEXPECTED_MESSAGE);
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_cancel_handle_streams_and_reports_errors() {
    let (_server, url) = serve_spec(MINIMAL_SPEC).await;
    let orchestrator = orchestrator(
        ProviderRegistry::new().with_provider(ScriptedProvider::chunks("ollama", &["a", "b"])),
    );

    let handle = orchestrator.generate_with_cancel(&url, "ollama");
    assert_eq!(
        collect(handle.stream).await,
        vec![Ok("a".to_string()), Ok("b".to_string())]
    );

    let handle = orchestrator.generate_with_cancel(&url, "missing");
    let items = collect(handle.stream).await;
    assert!(matches!(
        items.as_slice(),
        [Err(DocError::UnsupportedProvider { .. })]
    ));
}
