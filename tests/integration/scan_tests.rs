//! Integration tests for the scan engine
//!
//! These tests use wiremock to serve pages, robots.txt and sitemap.xml and
//! run full scans end-to-end.

use geolens::config::{Config, FetchConfig};
use geolens::{CheckKey, FetchFailure, ScanError, ScanReport, ScanRequest, Scanner, Status};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HTML: &str = "text/html; charset=utf-8";

/// Creates a test configuration with short deadlines
fn create_test_config() -> Config {
    Config {
        fetch: FetchConfig {
            timeout_ms: 2_000,
            probe_timeout_ms: 2_000,
            ..FetchConfig::default()
        },
        ..Config::default()
    }
}

fn words(n: usize) -> String {
    vec!["lorem"; n].join(" ")
}

fn status_of(report: &ScanReport, key: CheckKey) -> Status {
    report
        .checklist
        .iter()
        .find(|item| item.key == key)
        .map(|item| item.status)
        .expect("every check is present")
}

async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, HTML))
        .mount(server)
        .await;
}

async fn mount_site_files(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!("User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n", server.uri()),
            "text/plain",
        ))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"<?xml version="1.0"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#,
            "application/xml",
        ))
        .mount(server)
        .await;
}

async fn scan(config: &Config, url: String) -> Result<ScanReport, ScanError> {
    let scanner = Scanner::new(config).expect("client builds");
    scanner.scan(&ScanRequest::new(url)).await
}

#[tokio::test]
async fn test_minimal_page_scores_low() {
    let mock_server = MockServer::start().await;

    // No title, description, h1 or links; robots.txt and sitemap.xml fall through to 404
    mount_page(
        &mock_server,
        "/",
        format!("<html><body><p>{}</p></body></html>", words(50)),
    )
    .await;

    let report = scan(&create_test_config(), mock_server.uri())
        .await
        .expect("scan succeeds");

    assert_eq!(status_of(&report, CheckKey::Title), Status::Bad);
    assert_eq!(status_of(&report, CheckKey::Headings), Status::Bad);
    assert_eq!(status_of(&report, CheckKey::CopyLength), Status::Bad);
    assert_eq!(status_of(&report, CheckKey::Description), Status::Warn);
    // Zero links is below the warn threshold of 2
    assert_eq!(status_of(&report, CheckKey::InternalLinks), Status::Bad);
    assert_eq!(status_of(&report, CheckKey::RobotsTxt), Status::Warn);
    assert_eq!(status_of(&report, CheckKey::SitemapFile), Status::Warn);

    assert_eq!(report.heur.word_count, 50);
    assert_eq!(report.score, 35);
    assert!(report.score < 40);
    assert_eq!(report.suggestions.len(), 11);
}

#[tokio::test]
async fn test_complete_page_scores_full_marks() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let title = "t".repeat(50);
    let description = "d".repeat(140);
    let links: String = (1..=6)
        .map(|i| format!(r#"<a href="/page{}">p</a>"#, i))
        .collect();
    let html = format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <title>{title}</title>
  <meta name="description" content="{description}">
  <link rel="canonical" href="{base}/">
  <script type="application/ld+json">{{"@context":"https://schema.org","@type":"Organization","name":"Example"}}</script>
</head>
<body>
  <h1>Main</h1>
  <h2>One</h2><p>{copy}</p>
  <h2>Two</h2>
  <h2>Three</h2>
  <nav>{links}</nav>
</body>
</html>"#,
        copy = words(350),
    );

    mount_page(&mock_server, "/", html).await;
    mount_site_files(&mock_server).await;

    let report = scan(&create_test_config(), format!("{}/", base))
        .await
        .expect("scan succeeds");

    for item in &report.checklist {
        assert_eq!(item.status, Status::Good, "{}: {}", item.key.label(), item.note);
    }
    assert_eq!(report.score, 100);
    assert!(report.suggestions.is_empty());

    assert!(report.heur.has_ld_any);
    assert!(report.heur.has_ld_organization);
    assert_eq!(report.heur.internal_links, 6);
    assert_eq!(
        report.heur.sitemap_urls,
        vec![format!("{}/sitemap.xml", base)]
    );
    assert_eq!(report.meta.html_lang, "en");
    assert_eq!(report.meta.canonical, format!("{}/", base));
    assert_eq!(report.meta.charset, "UTF-8");
}

#[tokio::test]
async fn test_page_x_robots_tag_blocks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-robots-tag", "noindex")
                .set_body_raw("<html><head><title>Hidden</title></head></html>", HTML),
        )
        .mount(&mock_server)
        .await;

    let report = scan(&create_test_config(), mock_server.uri())
        .await
        .expect("scan succeeds");

    assert_eq!(status_of(&report, CheckKey::Robots), Status::Bad);
    assert!(report.page.robots_directives.contains("noindex"));
}

#[tokio::test]
async fn test_repeated_page_x_robots_tag_blocks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("x-robots-tag", "noarchive")
                .append_header("x-robots-tag", "noindex")
                .set_body_raw("<html><head><title>Hidden</title></head></html>", HTML),
        )
        .mount(&mock_server)
        .await;

    let report = scan(&create_test_config(), mock_server.uri())
        .await
        .expect("scan succeeds");

    assert!(report.page.robots_directives.contains("noarchive"));
    assert!(report.page.robots_directives.contains("noindex"));
    assert_eq!(status_of(&report, CheckKey::Robots), Status::Bad);
}

#[tokio::test]
async fn test_repeated_robots_txt_x_robots_tag_blocks() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html><title>Open</title></html>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("x-robots-tag", "noarchive")
                .append_header("x-robots-tag", "nofollow")
                .set_body_raw("User-agent: *\nAllow: /\n", "text/plain"),
        )
        .mount(&mock_server)
        .await;

    let report = scan(&create_test_config(), mock_server.uri())
        .await
        .expect("scan succeeds");

    assert_eq!(report.heur.x_robots_header, "noarchive, nofollow");
    assert_eq!(status_of(&report, CheckKey::Robots), Status::Bad);
}

#[tokio::test]
async fn test_robots_txt_header_blocks() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html><title>Open</title></html>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-robots-tag", "none")
                .set_body_raw("User-agent: *\nAllow: /\n", "text/plain"),
        )
        .mount(&mock_server)
        .await;

    let report = scan(&create_test_config(), mock_server.uri())
        .await
        .expect("scan succeeds");

    assert_eq!(report.heur.x_robots_header, "none");
    assert_eq!(status_of(&report, CheckKey::Robots), Status::Bad);
    assert_eq!(status_of(&report, CheckKey::RobotsTxt), Status::Good);
    assert_eq!(status_of(&report, CheckKey::SitemapReference), Status::Warn);
}

#[tokio::test]
async fn test_json_response_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(r#"{"ok":true}"#, "application/json"))
        .mount(&mock_server)
        .await;

    let result = scan(&create_test_config(), format!("{}/api", mock_server.uri())).await;

    match result {
        Err(ScanError::UnsupportedContentType { content_type }) => {
            assert!(content_type.starts_with("application/json"));
        }
        other => panic!("expected UnsupportedContentType, got {:?}", other.map(|r| r.score)),
    }
}

#[tokio::test]
async fn test_error_status_fails_scan() {
    let mock_server = MockServer::start().await;

    let result = scan(&create_test_config(), format!("{}/missing", mock_server.uri())).await;

    assert!(matches!(
        result,
        Err(ScanError::FetchFailed {
            cause: FetchFailure::Status(404),
            ..
        })
    ));
}

#[tokio::test]
async fn test_redirect_sets_final_url() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", format!("{}/new", base).as_str()))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/new",
        r#"<html><body><a href="/x">x</a><a href="/y">y</a></body></html>"#.to_string(),
    )
    .await;

    let report = scan(&create_test_config(), format!("{}/old", base))
        .await
        .expect("scan succeeds");

    assert_eq!(report.requested_url, format!("{}/old", base));
    assert_eq!(report.final_url, format!("{}/new", base));
    assert_eq!(report.meta.final_url, report.final_url);
    assert_eq!(report.heur.internal_links, 2);
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html></html>", HTML)
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.fetch.timeout_ms = 200;

    let result = scan(&config, mock_server.uri()).await;
    assert!(matches!(result, Err(ScanError::Timeout { .. })));
}

#[tokio::test]
async fn test_oversized_page_rejected() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        format!("<html><body>{}</body></html>", "x".repeat(8_000)),
    )
    .await;

    let mut config = create_test_config();
    config.fetch.max_bytes = 4_096;

    let result = scan(&config, mock_server.uri()).await;
    assert!(matches!(
        result,
        Err(ScanError::PayloadTooLarge { limit: 4_096 })
    ));
}

/// Serves every connection a chunked HTML body of `chunks` x 1 KiB with no Content-Length
async fn start_chunked_server(chunks: usize) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;

                let head = "HTTP/1.1 200 OK\r\n\
                            Content-Type: text/html\r\n\
                            Transfer-Encoding: chunked\r\n\
                            Connection: close\r\n\r\n";
                if socket.write_all(head.as_bytes()).await.is_err() {
                    return;
                }

                let chunk = "x".repeat(1024);
                for _ in 0..chunks {
                    let frame = format!("{:x}\r\n{}\r\n", chunk.len(), chunk);
                    if socket.write_all(frame.as_bytes()).await.is_err() {
                        return;
                    }
                }
                let _ = socket.write_all(b"0\r\n\r\n").await;
            });
        }
    });

    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_streamed_page_past_limit_rejected() {
    let url = start_chunked_server(8).await;

    let mut config = create_test_config();
    config.fetch.max_bytes = 4_096;

    let result = scan(&config, url).await;
    assert!(matches!(
        result,
        Err(ScanError::PayloadTooLarge { limit: 4_096 })
    ));
}

#[tokio::test]
async fn test_streamed_page_within_limit_accepted() {
    let url = start_chunked_server(2).await;

    let mut config = create_test_config();
    config.fetch.max_bytes = 4_096;
    config.fetch.probe_timeout_ms = 500;

    let report = scan(&config, url).await.expect("scan succeeds");
    // Chunks arrive back to back as one token
    assert_eq!(report.heur.word_count, 1);
}

#[tokio::test]
async fn test_probe_failures_degrade() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html><title>Ok</title></html>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("Sitemap: /sitemap.xml\n", "text/plain")
                .set_delay(Duration::from_millis(1_500)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config();
    config.fetch.probe_timeout_ms = 200;

    let report = scan(&config, mock_server.uri())
        .await
        .expect("probe failures never fail the scan");

    assert!(!report.heur.robots_txt_ok);
    assert!(!report.heur.has_sitemap_file);
    assert!(!report.heur.has_sitemap_ref_in_robots);
    assert_eq!(status_of(&report, CheckKey::RobotsTxt), Status::Warn);
    assert_eq!(status_of(&report, CheckKey::SitemapFile), Status::Warn);
}

#[tokio::test]
async fn test_internal_links_deduplicated() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    let html = format!(
        r#"<html><body>
        <a href="/about">About</a>
        <a href="{base}/about">About again</a>
        <a href="./about">Relative about</a>
        <a href="/contact">Contact</a>
        <a href="https://other.example/">Elsewhere</a>
        <a href="mailto:hi@example.com">Mail</a>
        </body></html>"#
    );
    mount_page(&mock_server, "/", html).await;

    let report = scan(&create_test_config(), format!("{}/", base))
        .await
        .expect("scan succeeds");

    assert_eq!(report.heur.internal_links, 2);
    assert_eq!(status_of(&report, CheckKey::InternalLinks), Status::Warn);
}

#[tokio::test]
async fn test_legacy_charset_decoded() {
    let mock_server = MockServer::start().await;

    // "Şirket" in windows-1254
    let mut body = b"<html><head><title>".to_vec();
    body.extend_from_slice(&[0xDE, b'i', b'r', b'k', b'e', b't']);
    body.extend_from_slice(b"</title></head></html>");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=windows-1254"))
        .mount(&mock_server)
        .await;

    let report = scan(&create_test_config(), mock_server.uri())
        .await
        .expect("scan succeeds");

    assert_eq!(report.meta.title, "Şirket");
    assert_eq!(report.meta.charset, "windows-1254");
}

#[tokio::test]
async fn test_ai_crawlers_blocked_reported() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", "<html><title>Ok</title></html>".to_string()).await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "User-agent: GPTBot\nDisallow: /\n\nUser-agent: *\nAllow: /\n",
            "text/plain",
        ))
        .mount(&mock_server)
        .await;

    let report = scan(&create_test_config(), format!("{}/", mock_server.uri()))
        .await
        .expect("scan succeeds");

    assert_eq!(report.heur.ai_crawlers_blocked, vec!["GPTBot".to_string()]);
    // Not scored
    assert_eq!(status_of(&report, CheckKey::Robots), Status::Good);
}

#[tokio::test]
async fn test_invalid_url_rejected() {
    let result = scan(&create_test_config(), "not a url".to_string()).await;
    assert!(matches!(result, Err(ScanError::InvalidInput(_))));
}
