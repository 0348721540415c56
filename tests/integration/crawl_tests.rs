//! Crawl integration tests against a mock website

use crate::support::{mount_acme, mount_page, test_crawler_config, test_fetcher};
use company_brief::crawler::{crawl, Crawler};
use company_brief::config::CrawlerConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_depth_one_collects_seed_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_acme(&mock_server).await;

    let crawler = Crawler::new(test_fetcher(), 100);
    let state = crawler.crawl(&format!("{}/", base_url), 1).await;

    assert_eq!(
        state.links(),
        &[format!("{}/about", base_url), format!("{}/careers", base_url)]
    );
    assert_eq!(state.pages_fetched(), 1);
    assert_eq!(state.failed_fetches(), 0);

    // Links one hop past the limit are recorded as visited, never requested
    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(state.is_visited(&format!("{}/about", base_url)));
}

#[tokio::test]
async fn test_depth_zero_fetches_only_seed() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/about">About</a></body></html>"#,
        Some(1),
    )
    .await;

    let crawler = Crawler::new(test_fetcher(), 100);
    let state = crawler.crawl(&format!("{}/", mock_server.uri()), 0).await;

    assert!(state.links().is_empty());
    assert_eq!(state.pages_fetched(), 1);
}

#[tokio::test]
async fn test_depth_two_follows_one_more_hop() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#,
        Some(1),
    )
    .await;
    mount_page(
        &mock_server,
        "/a",
        r#"<html><body><a href="/a/deep">Deep</a></body></html>"#,
        Some(1),
    )
    .await;
    mount_page(&mock_server, "/b", "<html><body>B</body></html>", Some(1)).await;
    mount_page(&mock_server, "/a/deep", "<html><body>Deep</body></html>", Some(0)).await;

    let crawler = Crawler::new(test_fetcher(), 100);
    let state = crawler.crawl(&format!("{}/", base_url), 2).await;

    assert_eq!(
        state.links(),
        &[
            format!("{}/a", base_url),
            format!("{}/b", base_url),
            format!("{}/a/deep", base_url),
        ]
    );
    assert_eq!(state.pages_fetched(), 3);
}

#[tokio::test]
async fn test_cycles_are_fetched_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/ping">Ping</a></body></html>"#,
        Some(1),
    )
    .await;
    mount_page(
        &mock_server,
        "/ping",
        r#"<html><body><a href="/pong">Pong</a><a href="/">Home</a></body></html>"#,
        Some(1),
    )
    .await;
    mount_page(
        &mock_server,
        "/pong",
        r#"<html><body><a href="/ping">Ping</a><a href="/">Home</a></body></html>"#,
        Some(1),
    )
    .await;

    let crawler = Crawler::new(test_fetcher(), 100);
    let state = crawler.crawl(&format!("{}/", base_url), 5).await;

    assert_eq!(state.pages_fetched(), 3);
    assert_eq!(
        state.links(),
        &[format!("{}/ping", base_url), format!("{}/pong", base_url)]
    );
    assert_eq!(
        state.visited(),
        &[
            format!("{}/", base_url),
            format!("{}/ping", base_url),
            format!("{}/pong", base_url),
        ]
    );
}

#[tokio::test]
async fn test_redirect_target_not_fetched_twice() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/old">Old</a><a href="/new">New</a></body></html>"#,
        Some(1),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", format!("{}/new", base_url).as_str()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/new",
        r#"<html><body><a href="team">Team</a></body></html>"#,
        Some(1),
    )
    .await;

    let crawler = Crawler::new(test_fetcher(), 100);
    let state = crawler.crawl(&format!("{}/", base_url), 2).await;

    assert_eq!(state.pages_fetched(), 2);
    assert_eq!(
        state.visited(),
        &[
            format!("{}/", base_url),
            format!("{}/old", base_url),
            format!("{}/new", base_url),
            format!("{}/team", base_url),
        ]
    );
    // Relative links on the redirected page resolve against its final URL
    assert!(state.links().contains(&format!("{}/team", base_url)));
}

#[tokio::test]
async fn test_broken_link_does_not_stop_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/missing">Gone</a><a href="/ok">Ok</a></body></html>"#,
        None,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/ok",
        r#"<html><body><a href="/ok/child">Child</a></body></html>"#,
        Some(1),
    )
    .await;

    let crawler = Crawler::new(test_fetcher(), 100);
    let state = crawler.crawl(&format!("{}/", base_url), 2).await;

    assert_eq!(state.failed_fetches(), 1);
    assert_eq!(state.pages_fetched(), 2);
    assert!(state.links().contains(&format!("{}/ok/child", base_url)));
}

#[tokio::test]
async fn test_page_limit_stops_crawl() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        r#"<html><body>
            <a href="/one">1</a><a href="/two">2</a><a href="/three">3</a>
        </body></html>"#,
        None,
    )
    .await;
    mount_page(&mock_server, "/one", "<html><body>1</body></html>", Some(1)).await;
    mount_page(&mock_server, "/two", "<html><body>2</body></html>", Some(0)).await;
    mount_page(&mock_server, "/three", "<html><body>3</body></html>", Some(0)).await;

    let crawler = Crawler::new(test_fetcher(), 2);
    let state = crawler.crawl(&format!("{}/", base_url), 2).await;

    assert!(state.page_limit_hit());
    assert_eq!(state.fetch_attempts(), 2);
    // Everything discovered on fetched pages is still reported
    assert_eq!(state.links().len(), 3);
}

#[tokio::test]
async fn test_unreachable_seed_yields_empty_crawl() {
    let crawler = Crawler::new(test_fetcher(), 100);
    let state = crawler.crawl("http://127.0.0.1:1/", 1).await;

    assert!(state.links().is_empty());
    assert_eq!(state.failed_fetches(), 1);
    assert_eq!(state.pages_fetched(), 0);
}

#[tokio::test]
async fn test_crawl_entry_point_uses_config_depth() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_acme(&mock_server).await;

    let config = CrawlerConfig {
        max_depth: 0,
        ..test_crawler_config()
    };
    let state = crawl(&format!("{}/", base_url), &config)
        .await
        .expect("Crawl should succeed");

    assert_eq!(state.max_depth, 0);
    assert!(state.links().is_empty());
}
