use std::time::Duration;

use futures::future::join_all;

use crate::{
    assets::{decode::decode_image, fetch::MediaFetcher},
    model::PostRecord,
};

/// Decoded remote media for one post: the only IO performed by a render.
///
/// `images[i]` corresponds to `record.media_urls()[i]`; a `None` marks a fetch or decode
/// failure that the composer renders as a blank cell.
#[derive(Clone, Debug, Default)]
pub struct PreparedMedia {
    pub avatar: Option<image::RgbaImage>,
    pub images: Vec<Option<image::RgbaImage>>,
}

impl PreparedMedia {
    /// Fetch and decode the avatar and up to four images concurrently, keeping input order.
    #[tracing::instrument(skip_all, fields(images = record.media_urls().len()))]
    pub async fn prepare(
        record: &PostRecord,
        fetcher: &dyn MediaFetcher,
        timeout: Duration,
    ) -> Self {
        let avatar = async {
            match record.author_avatar_url.as_deref() {
                Some(url) if !url.is_empty() => load(fetcher, url, timeout).await,
                _ => None,
            }
        };
        let images = join_all(
            record
                .media_urls()
                .iter()
                .map(|url| load(fetcher, url, timeout)),
        );

        let (avatar, images) = futures::join!(avatar, images);
        let loaded = images.iter().filter(|i| i.is_some()).count();
        tracing::debug!(
            avatar = avatar.is_some(),
            loaded,
            requested = images.len(),
            "media prepared"
        );
        Self { avatar, images }
    }
}

async fn load(fetcher: &dyn MediaFetcher, url: &str, timeout: Duration) -> Option<image::RgbaImage> {
    let bytes = match fetcher.fetch(url, timeout).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(url, %err, "media fetch failed");
            return None;
        }
    };
    match decode_image(&bytes) {
        Ok(img) => Some(img),
        Err(err) => {
            tracing::warn!(url, %err, "media decode failed");
            None
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/prepared.rs"]
mod tests;
