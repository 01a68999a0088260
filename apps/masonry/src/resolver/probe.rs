//! Image probes: the seam that actually loads an image to learn its height.

use std::io::Cursor;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use image::ImageReader;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ImageResolutionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Image request failed with status {status}")]
    Status { status: u16 },

    #[error("Could not read image bytes: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Loads the image at a URL and reports its natural pixel height.
#[async_trait]
pub trait ImageProbe: Send + Sync {
    async fn natural_height(&self, url: &str) -> Result<u32, ImageResolutionError>;
}

/// Production probe: downloads the image over HTTP and reads its dimensions
/// from the encoded header.
#[derive(Clone)]
pub struct HttpImageProbe {
    client: Client,
}

impl HttpImageProbe {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
        })
    }
}

#[async_trait]
impl ImageProbe for HttpImageProbe {
    async fn natural_height(&self, url: &str) -> Result<u32, ImageResolutionError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageResolutionError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let height = decode_height(&body)?;
        debug!("Probed {url}: height={height}px ({} bytes)", body.len());
        Ok(height)
    }
}

/// Reads the pixel height from encoded image bytes without decoding pixels.
pub fn decode_height(body: &Bytes) -> Result<u32, ImageResolutionError> {
    let (_, height) = ImageReader::new(Cursor::new(body.as_ref()))
        .with_guessed_format()?
        .into_dimensions()?;
    Ok(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(width: u32, height: u32) -> Bytes {
        let img = image::RgbImage::new(width, height);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        Bytes::from(buf.into_inner())
    }

    #[test]
    fn test_decode_height_reads_png_header() {
        let body = encode_png(3, 7);
        assert_eq!(decode_height(&body).unwrap(), 7);
    }

    #[test]
    fn test_decode_height_rejects_non_image() {
        let body = Bytes::from_static(b"<html>not an image</html>");
        assert!(decode_height(&body).is_err());
    }
}
