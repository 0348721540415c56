//! Shared fixtures for the integration tests

use async_trait::async_trait;
use company_brief::config::CrawlerConfig;
use company_brief::llm::{CompletionRequest, CompletionService, FragmentStream};
use company_brief::{CompletionError, Fetcher};
use futures::StreamExt;
use std::sync::Mutex;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Completion service with fixed answers
///
/// JSON requests get the relevance answer, plain requests the summary.
pub struct StubCompletion {
    relevance: String,
    summary: Result<Vec<String>, String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl StubCompletion {
    pub fn new(relevance: impl Into<String>, summary: &[&str]) -> Self {
        Self {
            relevance: relevance.into(),
            summary: Ok(summary.iter().map(|s| s.to_string()).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Relevance works, the summary call fails
    pub fn failing_summary(relevance: impl Into<String>) -> Self {
        Self {
            relevance: relevance.into(),
            summary: Err("model overloaded".to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for StubCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        let json = request.json_output;
        self.requests.lock().unwrap().push(request);

        if json {
            return Ok(self.relevance.clone());
        }

        match &self.summary {
            Ok(fragments) => Ok(fragments.concat()),
            Err(e) => Err(CompletionError::Api(e.clone())),
        }
    }

    async fn complete_streaming(
        &self,
        request: CompletionRequest,
    ) -> Result<FragmentStream, CompletionError> {
        self.requests.lock().unwrap().push(request);

        match &self.summary {
            Ok(fragments) => {
                let items: Vec<Result<String, CompletionError>> =
                    fragments.iter().cloned().map(Ok).collect();
                Ok(futures::stream::iter(items).boxed())
            }
            Err(e) => Err(CompletionError::Api(e.clone())),
        }
    }
}

/// Relevance answer naming a single link
pub fn relevance_json(kind: &str, url: &str) -> String {
    serde_json::json!({ "links": [{ "type": kind, "url": url }] }).to_string()
}

pub fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.into(), "text/html")
}

/// Mounts an HTML page at `route`, optionally asserting how often it is hit
pub async fn mount_page(server: &MockServer, route: &str, body: &str, hits: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body));

    match hits {
        Some(n) => mock.expect(n).mount(server).await,
        None => mock.mount(server).await,
    }
}

/// Mounts the Acme landing page with `/about` and `/careers` links
pub async fn mount_acme(server: &MockServer) {
    mount_page(
        server,
        "/",
        r##"<html><head><title>Acme Inc</title></head><body>
            <p>We build widgets.</p>
            <a href="#">Top</a>
            <a href="javascript:void(0)">Menu</a>
            <a href="/about">About</a>
            <a href="/careers">Careers</a>
        </body></html>"##,
        None,
    )
    .await;

    mount_page(
        server,
        "/about",
        r#"<html><head><title>About Acme</title></head><body>
            <p>Founded in 1999 by widget enthusiasts.</p>
        </body></html>"#,
        None,
    )
    .await;

    mount_page(
        server,
        "/careers",
        r#"<html><head><title>Careers</title></head><body>
            <p>We are hiring engineers.</p>
        </body></html>"#,
        None,
    )
    .await;
}

pub fn test_crawler_config() -> CrawlerConfig {
    CrawlerConfig {
        request_timeout_secs: 5,
        ..CrawlerConfig::default()
    }
}

pub fn test_fetcher() -> Fetcher {
    Fetcher::new(&test_crawler_config()).expect("Failed to build fetcher")
}
