//! `GET /me` against a mock Web API.

mod common;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use yt2spotify::core::http::{DEFAULT_TIMEOUT, build_client};
use yt2spotify::core::profile::fetch_profile;
use yt2spotify::error::Yt2sError;
use yt2spotify::test_utils::make_test_profile_json;

use common::logger::TestLogger;

#[tokio::test]
async fn fetches_profile_with_bearer_token() {
    let log = TestLogger::new("fetches_profile_with_bearer_token");
    log.phase("setup");

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .and(header("authorization", "Bearer BQDtoken"))
        .respond_with(ResponseTemplate::new(200).set_body_json(make_test_profile_json()))
        .expect(1)
        .mount(&server)
        .await;

    log.phase("execute");
    let client = build_client(DEFAULT_TIMEOUT).unwrap();
    let api_url = format!("{}/v1", server.uri());
    log.http_request("GET", &format!("{api_url}/me"));
    let profile = fetch_profile(&client, &api_url, "BQDtoken", DEFAULT_TIMEOUT)
        .await
        .expect("profile loads");

    log.phase("verify");
    assert_eq!(profile.name(), "JM Wizzler");
    assert_eq!(profile.email.as_deref(), Some("email@example.com"));
    assert_eq!(profile.country.as_deref(), Some("SE"));
    assert_eq!(profile.followers.total, 3829);
    assert_eq!(profile.avatar_url(), Some("https://i.scdn.co/image/ab67"));
    log.finish_ok();
}

#[tokio::test]
async fn trailing_slash_in_api_url_is_tolerated() {
    let log = TestLogger::new("trailing_slash_in_api_url_is_tolerated");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(make_test_profile_json()))
        .mount(&server)
        .await;

    let client = build_client(DEFAULT_TIMEOUT).unwrap();
    let api_url = format!("{}/v1/", server.uri());
    assert!(fetch_profile(&client, &api_url, "t", DEFAULT_TIMEOUT).await.is_ok());
    log.finish_ok();
}

#[tokio::test]
async fn unauthorized_is_spotify_api_error() {
    let log = TestLogger::new("unauthorized_is_spotify_api_error");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"status": 401, "message": "The access token expired"}
        })))
        .mount(&server)
        .await;

    let client = build_client(DEFAULT_TIMEOUT).unwrap();
    let err = fetch_profile(&client, &format!("{}/v1", server.uri()), "stale", DEFAULT_TIMEOUT)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(matches!(err, Yt2sError::SpotifyApi { .. }));
    log.finish_ok();
}

#[tokio::test]
async fn unexpected_body_is_parse_error() {
    let log = TestLogger::new("unexpected_body_is_parse_error");
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = build_client(DEFAULT_TIMEOUT).unwrap();
    let err = fetch_profile(&client, &format!("{}/v1", server.uri()), "t", DEFAULT_TIMEOUT)
        .await
        .unwrap_err();
    assert!(matches!(err, Yt2sError::ParseResponse(_)), "{err:?}");
    log.finish_ok();
}
