//! Owned, tightly packed ARGB images.
//!
//! ```rust
//! use dye::{Argb, ArgbImage, ChannelWeights, Simd};
//!
//! let mut img = ArgbImage::from_fn(4, 3, |x, y| Argb::from_channels(255, x as u8 * 60, y as u8 * 80, 200));
//! img.color_shift(&Simd, ChannelWeights::new(0.5, 0.3, 1.0).unwrap()).unwrap();
//! assert_eq!(img.pixel(3, 0).r(), 90);
//! ```

use alloc::vec;
use alloc::vec::Vec;

use crate::SizeError;
use crate::pixel::{Argb, ChannelWeights};
use crate::strategy::Kernel;

/// `width × height` pixels in row-major order.
#[derive(Clone, PartialEq, Eq)]
pub struct ArgbImage {
    width: usize,
    height: usize,
    pixels: Vec<Argb>,
}

impl ArgbImage {
    /// Wrap `pixels`; its length must be exactly `width * height`, both non-zero.
    pub fn new(width: usize, height: usize, pixels: Vec<Argb>) -> Result<Self, SizeError> {
        if width == 0 || height == 0 {
            return Err(SizeError::InvalidStride);
        }
        let n = width.checked_mul(height).ok_or(SizeError::InvalidStride)?;
        if pixels.len() != n {
            return Err(SizeError::LengthMismatch);
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// An image with every pixel set to `fill`.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or `width * height` overflows `usize`.
    pub fn filled(width: usize, height: usize, fill: Argb) -> Self {
        let n = pixel_count(width, height);
        Self {
            width,
            height,
            pixels: vec![fill; n],
        }
    }

    /// Build an image from `f(x, y)`.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or `width * height` overflows `usize`.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Argb) -> Self {
        let mut pixels = Vec::with_capacity(pixel_count(width, height));
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Argb] {
        &mut self.pixels
    }

    /// # Panics
    ///
    /// If `(x, y)` is outside the image.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Argb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Argb]> {
        self.pixels.chunks_exact(self.width)
    }

    /// The pixel words as native-endian bytes, 4 per pixel.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        bytemuck::cast_slice_mut(&mut self.pixels)
    }

    pub fn into_pixels(self) -> Vec<Argb> {
        self.pixels
    }

    /// Weight the whole image in place with `kernel`.
    pub fn color_shift<K: Kernel + ?Sized>(
        &mut self,
        kernel: &K,
        weights: ChannelWeights,
    ) -> Result<(), SizeError> {
        kernel.color_shift(&mut self.pixels, weights)
    }
}

fn pixel_count(width: usize, height: usize) -> usize {
    assert!(width > 0 && height > 0, "image dimensions must be non-zero");
    width
        .checked_mul(height)
        .expect("image dimensions overflow")
}

impl core::fmt::Debug for ArgbImage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ArgbImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
