use async_trait::async_trait;
use color_sampler::PixelBuffer;
use resvg::usvg;
use std::sync::Arc;
use std::time::Duration;

use super::decode::decode;
use super::locator::{decode_data_uri, Locator, Payload};
use crate::error::LoadError;
use crate::models::FetchConfig;

/// Largest edge a decoded buffer may have.
pub const MAX_DIMENSION: u32 = 32767;

/// Requested output size for a rasterization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterTarget {
    pub scale: f64,
    pub size: Option<(u32, u32)>,
}

impl RasterTarget {
    /// Natural image size multiplied by `scale`.
    pub fn natural(scale: f64) -> Self {
        Self { scale, size: None }
    }

    /// Explicit size, ignoring the image's natural size.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            scale: 1.0,
            size: Some((width, height)),
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Final buffer dimensions for an image of the given natural size.
    ///
    /// Fractional results are truncated.
    pub fn resolve(
        &self,
        natural_width: f64,
        natural_height: f64,
    ) -> Result<(u32, u32), LoadError> {
        let (base_width, base_height) = match self.size {
            Some((width, height)) => (width as f64, height as f64),
            None => (natural_width, natural_height),
        };
        let width = (base_width * self.scale).trunc();
        let height = (base_height * self.scale).trunc();

        let valid = |v: f64| (1.0..=MAX_DIMENSION as f64).contains(&v);
        if !valid(width) || !valid(height) {
            return Err(LoadError::UnsupportedDimensions { width, height });
        }
        Ok((width as u32, height as u32))
    }
}

/// Turns an image locator into an RGBA pixel buffer.
#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(
        &self,
        locator: &str,
        target: RasterTarget,
    ) -> Result<PixelBuffer, LoadError>;
}

#[async_trait]
impl<T: Rasterizer + ?Sized> Rasterizer for Arc<T> {
    async fn rasterize(
        &self,
        locator: &str,
        target: RasterTarget,
    ) -> Result<PixelBuffer, LoadError> {
        (**self).rasterize(locator, target).await
    }
}

/// Rasterizer for `data:` URIs, HTTP(S) URLs and local files.
pub struct ImageRasterizer {
    client: reqwest::Client,
    max_bytes: Option<usize>,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl ImageRasterizer {
    pub fn new(config: &FetchConfig) -> Result<Self, LoadError> {
        // Anonymous requests: no cookie store, no stored credentials
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| LoadError::Fetch(format!("Failed to build HTTP client: {e}")))?;

        let mut fontdb = usvg::fontdb::Database::new();
        fontdb.load_system_fonts();
        tracing::debug!(fonts = fontdb.len(), "Loaded system fonts for SVG text");

        Ok(Self {
            client,
            max_bytes: config.max_bytes,
            fontdb: Arc::new(fontdb),
        })
    }

    async fn load(&self, locator: &Locator<'_>) -> Result<Payload, LoadError> {
        match locator {
            Locator::Data(uri) => decode_data_uri(uri),
            Locator::Http(url) => self.fetch(url).await,
            Locator::File(path) => {
                let bytes = tokio::fs::read(path).await?;
                self.check_size(bytes.len())?;
                Ok(Payload::new(bytes, None))
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Payload, LoadError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LoadError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(length) = response.content_length() {
            self.check_size(length as usize)?;
        }

        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(';').next())
            .map(|value| value.trim().to_ascii_lowercase());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadError::Fetch(e.to_string()))?;
        self.check_size(bytes.len())?;

        tracing::debug!(url, bytes = bytes.len(), mime = ?mime, "Fetched image");
        Ok(Payload::new(bytes.to_vec(), mime))
    }

    fn check_size(&self, size: usize) -> Result<(), LoadError> {
        match self.max_bytes {
            Some(max) if size > max => Err(LoadError::TooLarge { size, max }),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Rasterizer for ImageRasterizer {
    async fn rasterize(
        &self,
        locator: &str,
        target: RasterTarget,
    ) -> Result<PixelBuffer, LoadError> {
        let parsed = Locator::parse(locator);
        tracing::debug!(
            kind = parsed.kind(),
            scale = target.scale,
            size = ?target.size,
            "Rasterizing image"
        );

        let payload = self.load(&parsed).await?;
        let fontdb = self.fontdb.clone();

        let buffer = tokio::task::spawn_blocking(move || decode(&payload, target, &fontdb))
            .await
            .map_err(|e| LoadError::Task(e.to_string()))??;

        tracing::debug!(
            kind = parsed.kind(),
            width = buffer.width(),
            height = buffer.height(),
            "Rasterized image"
        );
        Ok(buffer)
    }
}
