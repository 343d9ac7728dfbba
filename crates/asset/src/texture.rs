//! CPU-side texture images referenced by `map_Kd`.
//! Pixels are decoded to RGBA8; the renderer owns upload and sampling.

use anyhow::{Context, Result, ensure};

/// Decoded texture in CPU-friendly format before GPU upload.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
}

/// Supported texture formats.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextureFormat {
    Rgba8,
}

impl TextureData {
    /// Wrap raw RGBA8 pixels, checking the buffer matches the dimensions.
    pub fn from_rgba8(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let texture = Self {
            data,
            width,
            height,
            format: TextureFormat::Rgba8,
        };
        ensure!(
            texture.is_valid(),
            "RGBA8 data is {} bytes, expected {:?} for {}x{}",
            texture.data.len(),
            texture.expected_len(),
            width,
            height
        );
        Ok(texture)
    }

    /// Decode an encoded image (PNG) held in memory.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes).context("Failed to decode texture image")?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("Decoded texture {}x{}", width, height);
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Get the number of bytes per pixel for the format.
    pub fn bytes_per_pixel(&self) -> u32 {
        match self.format {
            TextureFormat::Rgba8 => 4,
        }
    }

    /// Byte length implied by the dimensions and format, `None` if it does not
    /// fit in memory.
    pub fn expected_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.bytes_per_pixel() as usize)
    }

    /// Non-empty and the pixel buffer matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.expected_len() == Some(self.data.len())
    }
}
