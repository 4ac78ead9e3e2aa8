use std::sync::Arc;

use newsforge_core::article::{Article, ArticleLength, SynthesisRequest, Tone, WritingStyle};
use newsforge_core::config::Settings;
use newsforge_core::search::{ArticleSearch, SearchOrigin, SearchQuery, ViewTracker};
use newsforge_core::synthesis::{ArticleAdapter, ArticleSimulator};
use newsforge_interaction::{
    AffiliateStats, BackendClient, BackendHttp, ChatGptAdapter, ClaudeAdapter, GeminiSearchClient, MistralAdapter,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Nothing listens on the discard port.
const UNREACHABLE_BACKEND: &str = "http://127.0.0.1:9";

fn request() -> SynthesisRequest {
    SynthesisRequest {
        sources: vec![
            Article::new(
                "Transit funding approved",
                "The city approved transit funding for new bus lines.",
            )
            .with_source("Reuters"),
        ],
        topic: "public transit".to_string(),
        style: WritingStyle::Journalistic,
        tone: Tone::Neutral,
        length: ArticleLength::Short,
    }
}

fn simulator() -> Arc<ArticleSimulator> {
    Arc::new(ArticleSimulator::default())
}

/// Serves exactly one HTTP response and returns the base URL plus a handle
/// resolving to the raw request text.
async fn one_shot_server(
    status_line: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
            if request_complete(&received) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&received).into_owned()
    });

    (format!("http://{}", addr), handle)
}

fn request_complete(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    data.len() >= header_end + 4 + content_length
}

#[tokio::test]
async fn test_missing_key_skips_network_and_simulates() {
    let adapter = ChatGptAdapter::new(BackendHttp::new(), simulator());
    let settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);

    let article = adapter.synthesize(&settings, &request()).await.unwrap();
    assert_eq!(article.processing_metrics.ai_model_used, "chatgpt-simulated");
    assert_eq!(article.topic, "public transit");
}

#[tokio::test]
async fn test_malformed_key_is_rejected_upfront() {
    let adapter = ClaudeAdapter::new(BackendHttp::new(), simulator());
    let mut settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);
    // An OpenAI-style key is not a valid Anthropic key.
    settings.claude.api_key = Some("sk-proj-123".to_string());

    let article = adapter.synthesize(&settings, &request()).await.unwrap();
    assert_eq!(article.processing_metrics.ai_model_used, "claude-simulated");
}

#[tokio::test]
async fn test_network_failure_falls_back_to_simulation() {
    let adapter = MistralAdapter::new(BackendHttp::new(), simulator());
    let mut settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);
    settings.mistral.api_key = Some("abcdefghijklmnopqrstuvwxyz0123".to_string());

    let article = adapter.synthesize(&settings, &request()).await.unwrap();
    assert!(article.processing_metrics.is_simulated());

    let edited = adapter
        .edit(&settings, &article, r#"add "Service starts in May.""#)
        .await
        .unwrap();
    assert!(edited.content.contains("Service starts in May."));
    assert_eq!(edited.processing_metrics.ai_model_used, "mistral-simulated");
}

#[tokio::test]
async fn test_successful_synthesis_is_normalized() {
    let (base_url, server) = one_shot_server(
        "200 OK",
        r#"{"article":{"title":"Buses Return","content":"One two three four five.\n\nSix seven.","model":"gpt-4o-mini","qualityScore":93}}"#,
    )
    .await;
    let adapter = ChatGptAdapter::new(BackendHttp::new(), simulator());
    let mut settings = Settings::default().with_backend_url(base_url);
    settings.chatgpt.api_key = Some("sk-test-key".to_string());

    let article = adapter.synthesize(&settings, &request()).await.unwrap();
    let raw_request = server.await.unwrap();

    assert!(raw_request.starts_with("POST /api/openai/synthesize"));
    assert!(raw_request.contains("\"topic\":\"public transit\""));
    assert!(raw_request.contains("\"targetWords\":300"));
    assert_eq!(article.title, "Buses Return");
    assert_eq!(article.word_count, 7);
    assert_eq!(article.reading_time, 1);
    assert_eq!(article.summary, "One two three four five.");
    assert_eq!(article.processing_metrics.ai_model_used, "gpt-4o-mini");
    assert_eq!(article.processing_metrics.content_quality_score, 93);
    assert_eq!(article.source_ids.len(), 1);
}

#[tokio::test]
async fn test_error_status_falls_back_to_simulation() {
    let (base_url, server) =
        one_shot_server("503 Service Unavailable", r#"{"error":"overloaded"}"#).await;
    let adapter = ClaudeAdapter::new(BackendHttp::new(), simulator());
    let mut settings = Settings::default().with_backend_url(base_url);
    settings.claude.api_key = Some("sk-ant-test".to_string());

    let article = adapter.synthesize(&settings, &request()).await.unwrap();
    server.await.unwrap();
    assert_eq!(article.processing_metrics.ai_model_used, "claude-simulated");
}

#[tokio::test]
async fn test_titles_and_quality_fall_back_locally() {
    let adapter = ClaudeAdapter::new(BackendHttp::new(), simulator());
    let settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);
    let article = adapter.synthesize(&settings, &request()).await.unwrap();

    let titles = adapter.suggest_titles(&settings, &article, 2).await.unwrap();
    assert_eq!(titles.len(), 2);

    let report = adapter.assess_quality(&settings, &article).await.unwrap();
    assert!(report.score <= 100);
}

#[tokio::test]
async fn test_viral_content_falls_back_locally() {
    let adapter = ChatGptAdapter::new(BackendHttp::new(), simulator());
    let mut settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);
    settings.chatgpt.api_key = Some("sk-test-key".to_string());
    let article = adapter.synthesize(&settings, &request()).await.unwrap();

    let viral = adapter.generate_viral(&settings, &article).await.unwrap();
    assert!(!viral.hook.is_empty());
}

#[tokio::test]
async fn test_search_without_key_returns_mock_results() {
    let client = GeminiSearchClient::new(BackendHttp::new(), simulator());
    let settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);
    let query = SearchQuery::new("housing prices").unwrap().with_max_results(2);

    let response = client.search(&settings, &query).await.unwrap();
    assert_eq!(response.origin, SearchOrigin::Mock);
    assert_eq!(response.articles.len(), 2);
}

#[tokio::test]
async fn test_search_parses_remote_results() {
    let (base_url, server) = one_shot_server(
        "200 OK",
        r#"{"articles":[{"id":"g1","title":"Prices cool","description":"Home prices cooled.","source":"AP"}]}"#,
    )
    .await;
    let client = GeminiSearchClient::new(BackendHttp::new(), simulator());
    let mut settings = Settings::default().with_backend_url(base_url);
    settings.gemini_search.api_key = Some("gemini-key-0123456789abcdef".to_string());
    let query = SearchQuery::new("housing prices").unwrap();

    let response = client.search(&settings, &query).await.unwrap();
    let raw_request = server.await.unwrap();

    assert!(raw_request.starts_with("POST /api/gemini/search"));
    assert_eq!(response.origin, SearchOrigin::Remote);
    assert_eq!(response.articles[0].id, "g1");
    assert_eq!(response.articles[0].content, "Home prices cooled.");
}

#[tokio::test]
async fn test_most_viewed_and_record_view() {
    let (base_url, server) = one_shot_server(
        "200 OK",
        r#"[{"articleId":"a1","title":"First","views":40},{"articleId":"a2","views":12}]"#,
    )
    .await;
    let client = BackendClient::new(BackendHttp::new());
    let settings = Settings::default().with_backend_url(base_url);

    let entries = client.most_viewed(&settings, 1).await.unwrap();
    let raw_request = server.await.unwrap();
    assert!(raw_request.starts_with("GET /api/article/most-viewed?limit=1"));
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].views, 40);

    let unreachable = Settings::default().with_backend_url(UNREACHABLE_BACKEND);
    assert!(client.record_view(&unreachable, "a1").await.unwrap_err().is_http());
}

#[tokio::test]
async fn test_affiliate_link_is_requested_by_topic() {
    let (base_url, server) = one_shot_server(
        "200 OK",
        r#"{"link":{"url":"https://shop.example/solar","label":"Solar kits"}}"#,
    )
    .await;
    let client = BackendClient::new(BackendHttp::new());
    let settings = Settings::default().with_backend_url(base_url);

    let link = client.affiliate_link(&settings, "solar").await.unwrap();
    let raw_request = server.await.unwrap();
    assert!(raw_request.starts_with("GET /api/affiliate/link?topic=solar"));
    assert_eq!(link.url, "https://shop.example/solar");
    assert_eq!(link.label.as_deref(), Some("Solar kits"));
}

#[tokio::test]
async fn test_affiliate_failures_are_swallowed() {
    let client = BackendClient::new(BackendHttp::new());
    let settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);

    assert!(client.affiliate_link(&settings, "solar").await.is_none());
    assert_eq!(client.affiliate_stats(&settings).await, AffiliateStats::default());
}

#[tokio::test]
async fn test_affiliate_stats_parse() {
    let (base_url, server) = one_shot_server(
        "200 OK",
        r#"{"stats":{"clicks":30,"conversions":4,"revenue":12.5}}"#,
    )
    .await;
    let client = BackendClient::new(BackendHttp::new());
    let settings = Settings::default().with_backend_url(base_url);

    let stats = client.affiliate_stats(&settings).await;
    assert!(server.await.unwrap().starts_with("GET /api/affiliate/stats"));
    assert_eq!(stats.clicks, 30);
    assert_eq!(stats.conversions, 4);
}

#[tokio::test]
async fn test_subscribe_validates_email_before_network() {
    let client = BackendClient::new(BackendHttp::new());
    let settings = Settings::default().with_backend_url(UNREACHABLE_BACKEND);
    let err = client.subscribe(&settings, "nope").await.unwrap_err();
    assert!(!err.is_http());
}
