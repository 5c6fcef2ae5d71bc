//! End-to-end scrapes against a local mock of the profile site.

use allmylinks::app::extract::DISABLED_LINK_URL;
use allmylinks::app::fetch::{FetchConfig, USER_AGENT};
use allmylinks::{FetchError, ProfileTarget, ScrapeError, Scraper, ScraperConfig};
use httpmock::prelude::*;

const PROFILE_HTML: &str = include_str!("fixtures/profile.html");

fn scraper_for(server: &MockServer) -> Scraper {
    Scraper::new(ScraperConfig {
        base_url: server.base_url(),
        fetch: FetchConfig::default(),
    })
    .unwrap()
}

#[tokio::test]
async fn test_full_profile_scrape() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/sample").header("user-agent", USER_AGENT);
            then.status(200)
                .header("content-type", "text/html; charset=utf-8")
                .body(PROFILE_HTML);
        })
        .await;
    let views = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/profile/views")
                .query_param("id", "31337")
                .header("user-agent", USER_AGENT);
            then.status(200).body("  1,024\n");
        })
        .await;

    let record = scraper_for(&server)
        .scrape(&ProfileTarget::Username("sample".to_string()))
        .await
        .unwrap();

    page.assert_async().await;
    views.assert_async().await;

    assert_eq!(record.username, "sample");
    assert_eq!(
        record.avatar_url,
        "https://cdn.allmylinks.com/prod/Avatar/sample.jpg"
    );
    assert_eq!(record.display_name, "Sample Person");
    assert_eq!(record.bio.as_deref(), Some("Photographer & traveller."));
    assert_eq!(record.birthday.as_deref(), Some("May 5"));
    assert_eq!(record.location.as_deref(), Some("Lisbon, Portugal"));
    assert_eq!(record.content.as_deref(), Some("Shooting film since 2010."));
    assert_eq!(record.last_online.map(|t| t.timestamp()), Some(1_717_171_717));
    assert_eq!(record.qr_code_url, "https://allmylinks.com/qr/sample");
    assert_eq!(record.profile_views.as_deref(), Some("1,024"));

    let links: Vec<_> = record
        .links
        .iter()
        .map(|l| (l.title.as_str(), l.url.as_str()))
        .collect();
    assert_eq!(
        links,
        [
            ("Instagram", "https://instagram.com/sample"),
            ("Portfolio", "https://sample.example"),
            ("Retired shop", DISABLED_LINK_URL),
        ]
    );
    assert_eq!(record.links[0].subtitle.as_deref(), Some("@sample"));
    assert_eq!(record.links[0].connection_status.as_deref(), Some("Connected"));
    assert_eq!(record.links[1].connection_status, None);
    assert_eq!(record.links[2].subtitle, None);
}

#[tokio::test]
async fn test_profile_url_target_derives_username() {
    let server = MockServer::start_async().await;
    let page = server
        .mock_async(|when, then| {
            when.method(GET).path("/someone");
            then.status(200).body(
                r#"<html><body><span class="profile-username">Someone</span></body></html>"#,
            );
        })
        .await;

    let target = ProfileTarget::classify(&server.url("/someone"));
    let record = scraper_for(&server).scrape(&target).await.unwrap();

    page.assert_async().await;
    assert_eq!(record.username, "someone");
    assert_eq!(record.display_name, "Someone");
}

#[tokio::test]
async fn test_minimal_page_without_view_counter() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/jane");
            then.status(200).body(
                r#"<html><body>
                     <img alt="Profile avatar" src="https://cdn.example/jane.png">
                     <span class="profile-username">Jane</span>
                     <div class="simple-text">
                       <a data-x-url="https://example.com"><span class="link-title">Example</span></a>
                     </div>
                   </body></html>"#,
            );
        })
        .await;
    let views = server
        .mock_async(|when, then| {
            when.method(GET).path("/profile/views");
            then.status(200).body("1");
        })
        .await;

    let record = scraper_for(&server)
        .scrape_user_info(Some("jane"), None)
        .await
        .unwrap();

    views.assert_hits_async(0).await;
    assert_eq!(record.avatar_url, "https://cdn.example/jane.png");
    assert_eq!(record.display_name, "Jane");
    assert_eq!(record.links.len(), 1);
    assert_eq!(record.links[0].title, "Example");
    assert_eq!(record.links[0].url, "https://example.com");
    assert_eq!(record.profile_views, None);
}

#[tokio::test]
async fn test_missing_profile_is_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/nobody");
            then.status(404).body("not found");
        })
        .await;

    let err = scraper_for(&server)
        .scrape(&ProfileTarget::Username("nobody".to_string()))
        .await
        .unwrap_err();

    match err {
        ScrapeError::Fetch(inner @ FetchError::Status { .. }) => {
            assert_eq!(inner.status(), Some(404));
            assert_eq!(inner.url(), Some(server.url("/nobody").as_str()));
        }
        other => panic!("expected status failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_view_counter_failure_fails_scrape() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/sample");
            then.status(200).body(PROFILE_HTML);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/profile/views");
            then.status(500);
        })
        .await;

    let err = scraper_for(&server)
        .scrape(&ProfileTarget::Username("sample".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::ProfileViews(FetchError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_non_utf8_body_is_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/garbled");
            then.status(200).body(vec![0x3c, 0x70, 0x3e, 0xff, 0xfe, 0x3c]);
        })
        .await;

    let err = scraper_for(&server)
        .scrape(&ProfileTarget::Username("garbled".to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::Parse { .. }));
}

#[tokio::test]
async fn test_username_wins_over_url() {
    let server = MockServer::start_async().await;
    let by_name = server
        .mock_async(|when, then| {
            when.method(GET).path("/alice");
            then.status(200).body("<html></html>");
        })
        .await;
    let by_url = server
        .mock_async(|when, then| {
            when.method(GET).path("/bob");
            then.status(200).body("<html></html>");
        })
        .await;

    let record = scraper_for(&server)
        .scrape_user_info(Some("alice"), Some(&server.url("/bob")))
        .await
        .unwrap();

    by_name.assert_async().await;
    by_url.assert_hits_async(0).await;
    assert_eq!(record.username, "alice");
}

#[tokio::test]
async fn test_missing_target() {
    let scraper = Scraper::new(ScraperConfig::default()).unwrap();
    let err = scraper.scrape_user_info(None, None).await.unwrap_err();
    assert!(matches!(err, ScrapeError::MissingTarget));
}

#[test]
fn test_malformed_proxy_fails_construction() {
    let err = Scraper::new(ScraperConfig {
        fetch: FetchConfig {
            proxy_url: Some("http://exa mple.com:8080".to_string()),
            timeout: None,
        },
        ..ScraperConfig::default()
    })
    .unwrap_err();

    assert!(matches!(
        err,
        ScrapeError::Fetch(FetchError::InvalidProxy { .. })
    ));
}
