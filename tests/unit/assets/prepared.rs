use std::io::Cursor;

use super::*;
use crate::assets::fetch::InMemoryFetcher;

fn png(color: [u8; 4], w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(color));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[tokio::test]
async fn failures_are_isolated_per_slot_and_order_is_kept() {
    let fetcher = InMemoryFetcher::new()
        .with("https://m/0", png([255, 0, 0, 255], 4, 2))
        .with("https://m/1", b"corrupt".to_vec())
        .with("https://m/3", png([0, 0, 255, 255], 3, 3));

    let record = PostRecord {
        author_avatar_url: Some("https://m/avatar".to_string()),
        images: vec![
            "https://m/0".to_string(),
            "https://m/1".to_string(),
            "https://m/2".to_string(),
            "https://m/3".to_string(),
            "https://m/4".to_string(),
        ],
        ..PostRecord::default()
    };

    let media = PreparedMedia::prepare(&record, &fetcher, Duration::from_secs(1)).await;
    assert!(media.avatar.is_none());
    assert_eq!(media.images.len(), 4);
    assert_eq!(media.images[0].as_ref().unwrap().dimensions(), (4, 2));
    assert!(media.images[1].is_none());
    assert!(media.images[2].is_none());
    assert_eq!(media.images[3].as_ref().unwrap().dimensions(), (3, 3));
}

#[tokio::test]
async fn empty_avatar_url_is_not_fetched() {
    let record = PostRecord {
        author_avatar_url: Some(String::new()),
        ..PostRecord::default()
    };
    let media =
        PreparedMedia::prepare(&record, &InMemoryFetcher::new(), Duration::from_secs(1)).await;
    assert!(media.avatar.is_none());
    assert!(media.images.is_empty());
}

#[tokio::test]
async fn http_status_failure_leaves_only_that_cell_empty() {
    use httpmock::MockServer;

    use crate::assets::fetch::HttpFetcher;

    let server = MockServer::start_async().await;
    for (path, color) in [("/0.png", [255, 0, 0, 255]), ("/2.png", [0, 255, 0, 255])] {
        let body = png(color, 6, 4);
        server
            .mock_async(move |when, then| {
                when.method("GET").path(path);
                then.status(200).header("content-type", "image/png").body(body);
            })
            .await;
    }
    server
        .mock_async(|when, then| {
            when.method("GET").path("/1.png");
            then.status(404);
        })
        .await;

    let record = PostRecord {
        images: ["/0.png", "/1.png", "/2.png"]
            .iter()
            .map(|p| server.url(*p))
            .collect(),
        ..PostRecord::default()
    };
    let fetcher = HttpFetcher::new().unwrap();
    let media = PreparedMedia::prepare(&record, &fetcher, Duration::from_secs(5)).await;

    assert_eq!(media.images.len(), 3);
    assert_eq!(media.images[0].as_ref().unwrap().get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert!(media.images[1].is_none());
    assert_eq!(media.images[2].as_ref().unwrap().get_pixel(0, 0).0, [0, 255, 0, 255]);
}
