//! Image sources and the pixel loader
//!
//! Fetches an image from a URL or a local path, decodes it and downsamples
//! it to a bounded pixel area before the palette core sees it.

use crate::buffer::PixelBuffer;
use crate::error::SourceError;
use async_trait::async_trait;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};

/// Default pixel area images are scaled down to before quantization (112x112)
pub const DEFAULT_RESIZE_AREA: u32 = 112 * 112;

/// Where an image comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    Url(String),
    Path(PathBuf),
}

impl std::fmt::Display for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageSource::Url(url) => write!(f, "{}", url),
            ImageSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Supplies decoded pixels for an image source
///
/// Implementations fail fast: a buffer is only returned when it is complete.
#[async_trait]
pub trait PixelSource: Send + Sync {
    async fn fetch_pixels(&self, source: &ImageSource) -> Result<PixelBuffer, SourceError>;
}

/// Loads images over HTTP or from disk and decodes them with the `image` crate
pub struct ImageLoader {
    client: Client,
    /// Target pixel area; 0 disables downsampling
    resize_area: u32,
}

impl ImageLoader {
    pub fn new(client: Client, resize_area: u32) -> Self {
        Self {
            client,
            resize_area,
        }
    }

    async fn fetch_url(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        tracing::info!("Fetching image from {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "image/*")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Err(SourceError::Absent(format!("{} returned {}", url, status)));
        }
        if !status.is_success() {
            return Err(SourceError::Fetch(format!("{} returned {}", url, status)));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(SourceError::Absent(format!("{} returned an empty body", url)));
        }

        Ok(bytes.to_vec())
    }

    async fn read_file(&self, path: &Path) -> Result<Vec<u8>, SourceError> {
        tracing::info!("Reading image from {}", path.display());

        // Client-facing messages carry the file name only
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::Absent(format!("{} not found", name)),
            _ => SourceError::Fetch(format!("{}: {}", name, e)),
        })?;

        if bytes.is_empty() {
            return Err(SourceError::Absent(format!("{} is empty", name)));
        }

        Ok(bytes)
    }
}

#[async_trait]
impl PixelSource for ImageLoader {
    async fn fetch_pixels(&self, source: &ImageSource) -> Result<PixelBuffer, SourceError> {
        let bytes = match source {
            ImageSource::Url(url) => self.fetch_url(url).await?,
            ImageSource::Path(path) => self.read_file(path).await?,
        };

        let resize_area = self.resize_area;
        tokio::task::spawn_blocking(move || decode_pixels(&bytes, resize_area))
            .await
            .map_err(|e| SourceError::Unusable(format!("Decode task failed: {}", e)))?
    }
}

/// Decode image bytes into a pixel buffer, downsampled to at most `resize_area` pixels
pub fn decode_pixels(bytes: &[u8], resize_area: u32) -> Result<PixelBuffer, SourceError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| SourceError::Unusable(format!("Failed to decode image: {}", e)))?;

    let (width, height) = img.dimensions();
    let img = scale_to_area(img, resize_area);
    let rgb = img.to_rgb8();

    tracing::debug!(
        "Decoded {}x{} image, sampling {}x{}",
        width,
        height,
        rgb.width(),
        rgb.height()
    );

    Ok(PixelBuffer::from(&rgb))
}

/// Scale down (never up) so that width * height is about `area`, keeping aspect ratio
fn scale_to_area(img: DynamicImage, area: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    let current = width as u64 * height as u64;

    if area == 0 || current <= area as u64 {
        return img;
    }

    let scale = (area as f64 / current as f64).sqrt();
    let new_width = ((width as f64 * scale).ceil() as u32).max(1);
    let new_height = ((height as f64 * scale).ceil() as u32).max(1);

    // Triangle (bilinear) averages neighbouring pixels, which suits palette sampling
    img.resize_exact(new_width, new_height, FilterType::Triangle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_keeps_small_images_exact() {
        let img = RgbImage::from_fn(10, 15, |_, y| {
            if y < 10 {
                image::Rgb([34, 139, 34])
            } else {
                image::Rgb([245, 245, 245])
            }
        });

        let buffer = decode_pixels(&png_bytes(&img), DEFAULT_RESIZE_AREA).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (10, 15));
        assert_eq!(buffer.pixels()[0], Rgb::new(34, 139, 34));
        assert_eq!(buffer.pixels()[149], Rgb::new(245, 245, 245));
    }

    #[test]
    fn test_decode_downsamples_large_images() {
        let img = RgbImage::from_pixel(400, 200, image::Rgb([10, 20, 30]));

        let buffer = decode_pixels(&png_bytes(&img), 100).unwrap();
        // sqrt(100 / 80000) * (400, 200) = (14.1, 7.07) rounded up
        assert_eq!((buffer.width(), buffer.height()), (15, 8));
    }

    #[test]
    fn test_zero_area_disables_downsampling() {
        let img = RgbImage::from_pixel(300, 300, image::Rgb([1, 2, 3]));
        let buffer = decode_pixels(&png_bytes(&img), 0).unwrap();
        assert_eq!(buffer.len(), 90_000);
    }

    #[test]
    fn test_decode_garbage_is_unusable() {
        let err = decode_pixels(b"definitely not an image", DEFAULT_RESIZE_AREA).unwrap_err();
        assert!(matches!(err, SourceError::Unusable(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ImageLoader::new(Client::new(), DEFAULT_RESIZE_AREA);

        let err = loader
            .fetch_pixels(&ImageSource::Path(dir.path().join("missing.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Absent(_)));
    }

    #[tokio::test]
    async fn test_empty_file_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        let loader = ImageLoader::new(Client::new(), DEFAULT_RESIZE_AREA);
        let err = loader
            .fetch_pixels(&ImageSource::Path(path))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Absent(_)));
    }

    #[tokio::test]
    async fn test_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        let img = RgbImage::from_pixel(4, 4, image::Rgb([255, 0, 0]));
        std::fs::write(&path, png_bytes(&img)).unwrap();

        let loader = ImageLoader::new(Client::new(), DEFAULT_RESIZE_AREA);
        let buffer = loader.fetch_pixels(&ImageSource::Path(path)).await.unwrap();

        assert_eq!(buffer.len(), 16);
        assert!(buffer.pixels().iter().all(|p| *p == Rgb::new(255, 0, 0)));
    }

    #[tokio::test]
    async fn test_file_errors_omit_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        std::fs::write(&path, b"").unwrap();

        let loader = ImageLoader::new(Client::new(), DEFAULT_RESIZE_AREA);
        let err = loader
            .fetch_pixels(&ImageSource::Path(path))
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("empty.png"));
        assert!(!message.contains(&*dir.path().to_string_lossy()));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_decodes_full_size_off_the_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.png");
        let img = RgbImage::from_pixel(600, 400, image::Rgb([0, 90, 180]));
        std::fs::write(&path, png_bytes(&img)).unwrap();

        let loader = ImageLoader::new(Client::new(), 0);
        let buffer = loader.fetch_pixels(&ImageSource::Path(path)).await.unwrap();

        assert_eq!((buffer.width(), buffer.height()), (600, 400));
    }
}
