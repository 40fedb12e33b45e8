//! RGBA pixel buffers produced by the texture synthesizer.

use crate::error::{GenError, GenResult};
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Largest edge length any generated texture may have.
pub const MAX_TEXTURE_SIZE: u32 = 512;

/// RGBA pixel
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const TRANSPARENT: Pixel = Pixel::new(0, 0, 0, 0);
    /// Solid magenta used for placeholder textures.
    pub const PLACEHOLDER: Pixel = Pixel::new(255, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0) as u8,
            g: (g.clamp(0.0, 1.0) * 255.0) as u8,
            b: (b.clamp(0.0, 1.0) * 255.0) as u8,
            a: (a.clamp(0.0, 1.0) * 255.0) as u8,
        }
    }

    /// Color from a linear `[0, 1]` RGB vector plus alpha.
    pub fn from_color(color: Vec3, alpha: f32) -> Self {
        Self::from_rgba(color.x, color.y, color.z, alpha)
    }

    pub fn to_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Immutable-once-built RGBA image, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TextureBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl TextureBuffer {
    /// Transparent buffer of the given size. Fails outside `1..=MAX_TEXTURE_SIZE`.
    pub fn new(width: u32, height: u32) -> GenResult<Self> {
        Self::filled(width, height, Pixel::TRANSPARENT)
    }

    /// Buffer of the given size filled with `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> GenResult<Self> {
        if width == 0 || height == 0 || width > MAX_TEXTURE_SIZE || height > MAX_TEXTURE_SIZE {
            return Err(GenError::TextureSize {
                width,
                height,
                max: MAX_TEXTURE_SIZE,
            });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![pixel; (width * height) as usize],
        })
    }

    /// Clearly-wrong solid magenta square, used when generation had to give up.
    /// The size is clamped into the valid range so this never fails.
    pub fn placeholder(size: u32) -> Self {
        let size = size.clamp(1, MAX_TEXTURE_SIZE);
        Self {
            width: size,
            height: size,
            pixels: vec![Pixel::PLACEHOLDER; (size * size) as usize],
        }
    }

    /// Build a square buffer by evaluating `shade` at every pixel.
    pub fn from_fn(size: u32, mut shade: impl FnMut(u32, u32) -> Pixel) -> GenResult<Self> {
        let mut texture = Self::new(size, size)?;
        for y in 0..size {
            for x in 0..size {
                texture.pixels[(y * size + x) as usize] = shade(x, y);
            }
        }
        Ok(texture)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = pixel;
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Pixel {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize]
        } else {
            Pixel::TRANSPARENT
        }
    }

    /// Whether every pixel is the placeholder color.
    pub fn is_placeholder(&self) -> bool {
        self.pixels.iter().all(|p| *p == Pixel::PLACEHOLDER)
    }

    /// Fraction of pixels with non-zero alpha.
    pub fn coverage(&self) -> f32 {
        let opaque = self.pixels.iter().filter(|p| p.a > 0).count();
        opaque as f32 / self.pixels.len() as f32
    }

    /// Raw RGBA8 bytes, ready for an engine texture upload or an image encoder.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(TextureBuffer::new(0, 16).is_err());
        assert!(TextureBuffer::new(16, MAX_TEXTURE_SIZE + 1).is_err());
        assert!(TextureBuffer::new(MAX_TEXTURE_SIZE, MAX_TEXTURE_SIZE).is_ok());
    }

    #[test]
    fn placeholder_is_clamped_and_recognizable() {
        let p = TextureBuffer::placeholder(4096);
        assert_eq!(p.width(), MAX_TEXTURE_SIZE);
        assert!(p.is_placeholder());
        let tiny = TextureBuffer::placeholder(0);
        assert_eq!(tiny.width(), 1);
    }

    #[test]
    fn bytes_are_rgba_row_major() {
        let mut t = TextureBuffer::new(2, 2).unwrap();
        t.set_pixel(1, 0, Pixel::new(1, 2, 3, 4));
        let bytes = t.as_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 4]);
    }

    #[test]
    fn out_of_bounds_access_is_ignored() {
        let mut t = TextureBuffer::new(2, 2).unwrap();
        t.set_pixel(5, 5, Pixel::PLACEHOLDER);
        assert_eq!(t.get_pixel(5, 5), Pixel::TRANSPARENT);
        assert_eq!(t.coverage(), 0.0);
    }

    #[test]
    fn from_rgba_clamps() {
        let p = Pixel::from_rgba(2.0, -1.0, 0.5, 1.0);
        assert_eq!(p, Pixel::new(255, 0, 127, 255));
    }
}
