use std::path::Path;

use derive_more::Constructor;
use rgb::ComponentBytes;
use slicer_extract::AlphaSource;

use crate::AssetError;

/// A decoded image as tightly packed 8-bit RGBA rows.
#[derive(Constructor, Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaImage {
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl AlphaSource for RgbaImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn alpha(&self, x: u32, y: u32) -> f32 {
        let index = (y as usize * self.width as usize + x as usize) * 4 + 3;
        self.pixels.get(index).map_or(0., |&a| a as f32 / 255.)
    }
}

pub fn decode_png(png: &[u8]) -> Result<RgbaImage, AssetError> {
    let image = lodepng::decode32(png)?;
    Ok(RgbaImage::new(
        image.width as u32,
        image.height as u32,
        image.buffer.as_bytes().to_owned(),
    ))
}

pub fn load_png(path: impl AsRef<Path>) -> Result<RgbaImage, AssetError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| AssetError::io(path, e))?;
    let image = decode_png(&bytes)?;
    log::debug!("decoded {} ({}x{})", path.display(), image.width, image.height);
    Ok(image)
}

#[cfg(test)]
pub(crate) fn encode_test_png(width: usize, height: usize, opaque: &[(usize, usize)]) -> Vec<u8> {
    let mut pixels = vec![rgb::RGBA8::new(0, 0, 0, 0); width * height];
    for &(x, y) in opaque {
        pixels[y * width + x] = rgb::RGBA8::new(255, 255, 255, 255);
    }
    lodepng::encode32(&pixels, width, height).unwrap()
}
