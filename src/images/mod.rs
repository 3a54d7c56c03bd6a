//! Image lookup and download for a topic.
//!
//! Images land in `images_<topic_slug>/` as `1.jpg`, `2.jpg`, ... and are
//! never cleaned up between runs.

mod google;

pub use google::GoogleImageSearch;

use crate::config::ImageSettings;
use crate::error::{Result, SeminarError};
use crate::topic::Topic;
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// A downloaded image on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub path: PathBuf,
    /// 1-based position in the download order.
    pub index: usize,
}

/// Trait for image search backends.
#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Return up to `count` image URLs for the topic.
    async fn image_urls(&self, topic: &Topic, count: usize) -> Result<Vec<String>>;
}

/// Folder that holds the images for a topic.
pub fn image_folder(export_dir: &Path, topic: &Topic) -> PathBuf {
    export_dir.join(format!("images_{}", topic.slug()))
}

/// Finds and downloads images for a topic.
pub struct ImageProvider {
    search: Arc<dyn ImageSearch>,
    client: Client,
    count: usize,
}

impl ImageProvider {
    /// Create a provider using Google image search.
    pub fn new(settings: &ImageSettings) -> Result<Self> {
        let search = Arc::new(GoogleImageSearch::new(&settings.search_url, &settings.user_agent)?);
        Self::with_search(search, settings)
    }

    /// Create a provider with a custom search backend.
    pub fn with_search(search: Arc<dyn ImageSearch>, settings: &ImageSettings) -> Result<Self> {
        let client = Client::builder().user_agent(&settings.user_agent).build()?;
        Ok(Self {
            search,
            client,
            count: settings.count,
        })
    }

    /// Search and download images for the topic into `export_dir`.
    ///
    /// Failures are logged; whatever downloaded successfully is returned.
    #[instrument(skip(self, export_dir), fields(topic = %topic))]
    pub async fn fetch(&self, topic: &Topic, export_dir: &Path) -> Vec<ImageRef> {
        let urls = match self.search.image_urls(topic, self.count).await {
            Ok(urls) => urls,
            Err(e) => {
                error!("Image fetching error: {}", e);
                return Vec::new();
            }
        };

        debug!("Found {} image URLs", urls.len());
        self.download(&urls, &image_folder(export_dir, topic)).await
    }

    /// Download each URL into `folder` as `<n>.jpg`, skipping failures.
    pub async fn download(&self, urls: &[String], folder: &Path) -> Vec<ImageRef> {
        if let Err(e) = std::fs::create_dir_all(folder) {
            warn!("Cannot create image folder {:?}: {}", folder, e);
            return Vec::new();
        }

        let mut images = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            let path = folder.join(format!("{}.jpg", i + 1));
            match self.download_one(url, &path).await {
                Ok(()) => images.push(ImageRef { path, index: i + 1 }),
                Err(e) => warn!("Failed to download image {}: {}", url, e),
            }
        }

        info!("Downloaded {} of {} images", images.len(), urls.len());
        images
    }

    async fn download_one(&self, url: &str, path: &Path) -> Result<()> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SeminarError::Image(format!("HTTP {}", response.status().as_u16())));
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(path, &bytes).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_folder_name() {
        let topic = Topic::new("solar system").unwrap();
        assert_eq!(
            image_folder(Path::new("/tmp/out"), &topic),
            PathBuf::from("/tmp/out/images_solar_system")
        );
    }
}
