use std::time::SystemTime;

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};
use zaptv::{cache, fetch::fetch_and_store, playlist, ZapError};

const PLAYLIST: &str = "#EXTM3U\r\n\
    #EXTINF:-1 group-title=\"News\",CNN\r\nhttp://x/cnn\r\n\
    #EXTINF:-1 group-title=\"News\",BBC\r\nhttp://x/bbc\r\n";

async fn setup_mock_server(status: u16, body: &str) -> (String, MockServer) {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channels.m3u"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;

    (format!("{}/channels.m3u", mock_server.uri()), mock_server)
}

#[tokio::test]
async fn test_fetch_writes_body_verbatim() -> anyhow::Result<()> {
    let (url, _server) = setup_mock_server(200, PLAYLIST).await;

    let dir = tempfile::tempdir()?;
    let dest = cache::expiry_path(dir.path(), SystemTime::now());
    fetch_and_store(&reqwest::Client::new(), &url, &dest).await?;

    assert_eq!(std::fs::read_to_string(&dest)?, PLAYLIST);
    Ok(())
}

#[tokio::test]
async fn test_fetched_artifact_is_found_by_the_cache_check() -> anyhow::Result<()> {
    let (url, _server) = setup_mock_server(200, PLAYLIST).await;

    let dir = tempfile::tempdir()?;
    let dest = cache::expiry_path(dir.path(), SystemTime::now());
    fetch_and_store(&reqwest::Client::new(), &url, &dest).await?;

    assert_eq!(cache::locate_valid_cache(dir.path()), Some(dest.clone()));

    let channels = playlist::load_channels(&dest).await?;
    assert_eq!(channels.len(), 2);
    assert_eq!(channels[0].url, "http://x/cnn");
    assert_eq!(channels[1].url, "http://x/bbc");
    Ok(())
}

#[tokio::test]
async fn test_non_ok_status_is_an_error() -> anyhow::Result<()> {
    let (url, _server) = setup_mock_server(404, "not found").await;

    let dir = tempfile::tempdir()?;
    let dest = cache::expiry_path(dir.path(), SystemTime::now());
    let err = fetch_and_store(&reqwest::Client::new(), &url, &dest)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ZapError::HttpError(status) if status == reqwest::StatusCode::NOT_FOUND
    ));
    // No artifact may be left behind claiming to be a valid cache.
    assert_eq!(cache::locate_valid_cache(dir.path()), None);
    Ok(())
}

#[tokio::test]
async fn test_network_error_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let dest = cache::expiry_path(dir.path(), SystemTime::now());

    // Nothing listens on this port.
    let err = fetch_and_store(
        &reqwest::Client::new(),
        "http://127.0.0.1:9/channels.m3u",
        &dest,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ZapError::RequestError(_)));
    assert_eq!(cache::locate_valid_cache(dir.path()), None);
}
