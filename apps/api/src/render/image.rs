//! Profile picture decoding. Uploads are flattened to 8-bit RGB (alpha dropped)
//! because that is what the PDF image XObject is written as.

use std::io::Cursor;

use image::{ImageFormat, ImageReader, Limits};

use crate::layout::error::ImagePlacementWarning;

/// Largest accepted edge, in pixels.
pub const MAX_IMAGE_DIMENSION: u32 = 10_000;

/// A decoded three-channel raster, ready to embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    width: u32,
    height: u32,
    rgb: Vec<u8>,
}

impl ProfileImage {
    /// Decodes an uploaded PNG or JPEG.
    pub fn decode(bytes: &[u8]) -> Result<Self, ImagePlacementWarning> {
        let format = image::guess_format(bytes)
            .map_err(|e| ImagePlacementWarning::Undecodable(e.to_string()))?;
        if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
            return Err(ImagePlacementWarning::UnsupportedFormat);
        }

        // The header is read first so an oversized picture is refused before
        // any pixel buffer is allocated.
        let (width, height) = ImageReader::with_format(Cursor::new(bytes), format)
            .into_dimensions()
            .map_err(|e| ImagePlacementWarning::Undecodable(e.to_string()))?;
        check_dimensions(width, height)?;

        let mut reader = ImageReader::with_format(Cursor::new(bytes), format);
        let mut limits = Limits::default();
        limits.max_image_width = Some(MAX_IMAGE_DIMENSION);
        limits.max_image_height = Some(MAX_IMAGE_DIMENSION);
        reader.limits(limits);
        let decoded = reader
            .decode()
            .map_err(|e| ImagePlacementWarning::Undecodable(e.to_string()))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Self::from_rgb(width, height, rgb.into_raw())
    }

    /// Wraps raw interleaved RGB samples, checking the dimensions against the buffer.
    pub fn from_rgb(width: u32, height: u32, rgb: Vec<u8>) -> Result<Self, ImagePlacementWarning> {
        check_dimensions(width, height)?;
        if rgb.len() != width as usize * height as usize * 3 {
            return Err(ImagePlacementWarning::InvalidDimensions { width, height });
        }
        Ok(Self { width, height, rgb })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), ImagePlacementWarning> {
    if width == 0 || height == 0 || width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
        return Err(ImagePlacementWarning::InvalidDimensions { width, height });
    }
    Ok(())
}
