/// Weight-preset feed source
///
/// Downloads the preset feed and keeps a copy on disk. When the download
/// fails, or the settings ask for it, the cached copy is read instead.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::feed::parse_weight_sets;
use crate::config::Config;
use crate::stats::WeightSet;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);
const CACHE_FILE_NAME: &str = "weight-presets.txt";

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to download weight presets: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to access the weight preset cache: {0}")]
    Cache(#[from] std::io::Error),

    #[error("weight preset feed contained no presets")]
    Empty,
}

pub struct FeedSource {
    url: String,
    cache_path: PathBuf,
    use_cache: bool,
    timeout: Duration,
}

impl FeedSource {
    pub fn new(url: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.into(),
            cache_path: cache_path.into(),
            use_cache: false,
            timeout: DOWNLOAD_TIMEOUT,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let cache_path = config
            .weights_cache_path
            .clone()
            .unwrap_or_else(default_cache_path);
        let mut source = Self::new(config.weights_url.clone(), cache_path);
        source.use_cache = config.use_cached_weights;
        source
    }

    /// Skip the download and read the cache only
    pub fn cache_only(mut self) -> Self {
        self.use_cache = true;
        self
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Fetch the raw feed: download and cache it, or fall back to the cache
    pub async fn fetch_text(&self) -> Result<String, FeedError> {
        if !self.use_cache {
            match self.download().await {
                Ok(text) => {
                    if let Err(e) = self.write_cache(&text) {
                        warn!("Could not cache weight presets at {:?}: {}", self.cache_path, e);
                    }
                    return Ok(text);
                }
                Err(e) => warn!("{}, trying the cache", e),
            }
        }
        self.read_cache()
    }

    /// Every preset in the feed, or the lowbie set when nothing is available
    pub async fn weight_sets(&self) -> Vec<WeightSet> {
        let sets = match self.fetch_text().await {
            Ok(text) => parse_weight_sets(&text),
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        };

        if sets.is_empty() {
            warn!("{}, falling back to the lowbie weight set", FeedError::Empty);
            return vec![WeightSet::lowbie()];
        }
        info!("Parsed {} weight presets", sets.len());
        sets
    }

    async fn download(&self) -> Result<String, FeedError> {
        debug!("Downloading weight presets from {}", self.url);
        let client = reqwest::Client::builder().timeout(self.timeout).build()?;
        let text = client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!("Weight presets downloaded ({} bytes)", text.len());
        Ok(text)
    }

    fn write_cache(&self, text: &str) -> Result<(), FeedError> {
        if let Some(parent) = self.cache_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.cache_path, text)?;
        Ok(())
    }

    fn read_cache(&self) -> Result<String, FeedError> {
        let text = fs::read_to_string(&self.cache_path)?;
        info!("Read weight presets from cache {:?}", self.cache_path);
        Ok(text)
    }
}

fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("auto_equip")
        .join(CACHE_FILE_NAME)
}
