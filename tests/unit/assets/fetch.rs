use httpmock::MockServer;

use super::*;

#[tokio::test]
async fn http_fetcher_returns_body_on_success() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/media/a.jpg")
                .header("user-agent", USER_AGENT);
            then.status(200).body("jpeg-bytes");
        })
        .await;

    let fetcher = HttpFetcher::new().unwrap();
    let bytes = fetcher
        .fetch(&server.url("/media/a.jpg"), Duration::from_secs(5))
        .await
        .unwrap();
    assert_eq!(bytes, b"jpeg-bytes");
    mock.assert_async().await;
}

#[tokio::test]
async fn http_fetcher_maps_non_success_status_to_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/missing.jpg");
            then.status(404);
        })
        .await;

    let err = HttpFetcher::new()
        .unwrap()
        .fetch(&server.url("/missing.jpg"), Duration::from_secs(5))
        .await
        .unwrap_err();
    assert!(matches!(err, PostframeError::Fetch(_)), "{err}");
    assert!(err.to_string().contains("404"));
}

#[tokio::test]
async fn http_fetcher_times_out_as_fetch_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/slow.jpg");
            then.status(200)
                .body("late")
                .delay(Duration::from_millis(1500));
        })
        .await;

    let err = HttpFetcher::new()
        .unwrap()
        .fetch(&server.url("/slow.jpg"), Duration::from_millis(100))
        .await
        .unwrap_err();
    assert!(matches!(err, PostframeError::Fetch(_)), "{err}");
}

#[tokio::test]
async fn in_memory_fetcher_fails_unknown_urls() {
    let fetcher = InMemoryFetcher::new().with("https://m/a", vec![1, 2, 3]);
    let timeout = Duration::from_secs(1);
    assert_eq!(fetcher.fetch("https://m/a", timeout).await.unwrap(), vec![1, 2, 3]);
    assert!(matches!(
        fetcher.fetch("https://m/b", timeout).await,
        Err(PostframeError::Fetch(_))
    ));
}
