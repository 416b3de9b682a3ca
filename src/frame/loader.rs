//! Image file loading using the `image` crate.
//!
//! Supports every format the `image` crate decodes (PNG, JPEG, BMP, ...).

use std::path::Path;

use thiserror::Error;

use super::Frame;

/// Errors that can occur during image loading or saving.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Failed to open image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode or encode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Pixel count {len} does not match {width}x{height}")]
    InvalidDimensions { width: u32, height: u32, len: usize },

    #[error("Image has zero width or height")]
    Empty,
}

/// Load an image from a file path.
///
/// The image is decoded to RGBA and normalized to 0.0..=1.0 per channel.
///
/// # Example
///
/// ```no_run
/// use rts_filters::frame::load_image;
///
/// let frame = load_image("cat.png").unwrap();
/// println!("{}x{}", frame.width(), frame.height());
/// ```
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<Frame, FrameError> {
    let path = path.as_ref();
    let img = image::open(path)?;
    log::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Frame::try_from(&img)
}

/// Save a frame to a file path; the format follows the extension.
pub fn save_image<P: AsRef<Path>>(frame: &Frame, path: P) -> Result<(), FrameError> {
    let path = path.as_ref();
    let img = frame.to_image();

    // JPEG has no alpha channel
    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        image::DynamicImage::ImageRgba8(img).to_rgb8().save(path)?;
    } else {
        img.save(path)?;
    }
    log::debug!("Saved {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::generate_color_bars;

    #[test]
    fn test_load_missing_file() {
        let result = load_image("/nonexistent/path/image.png");
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.png");
        let frame = generate_color_bars(16, 8);

        save_image(&frame, &path).unwrap();
        let loaded = load_image(&path).unwrap();

        assert_eq!(loaded.width(), 16);
        assert_eq!(loaded.height(), 8);
        assert_eq!(loaded.to_rgba8(), frame.to_rgba8());
    }
}
