//! Conversions between [`rgb`] crate RGBA8 pixels and [`Argb`] words.
//!
//! ```rust
//! use rgb::Rgba;
//! use dye::{Argb, typed_rgb};
//!
//! let rgba = vec![Rgba::new(0xAA, 0x20, 0x40, 0xFF); 4];
//! let argb = typed_rgb::rgba_to_argb_vec(&rgba);
//! assert_eq!(argb[0], Argb::from_channels(0xFF, 0xAA, 0x20, 0x40));
//! ```

use alloc::vec::Vec;

use rgb::Rgba;

use crate::SizeError;
use crate::pixel::{Argb, ChannelWeights};

impl From<Rgba<u8>> for Argb {
    #[inline]
    fn from(px: Rgba<u8>) -> Self {
        Argb::from_channels(px.a, px.r, px.g, px.b)
    }
}

impl From<Argb> for Rgba<u8> {
    #[inline]
    fn from(px: Argb) -> Self {
        Rgba::new(px.r(), px.g(), px.b(), px.a())
    }
}

/// Copy `src` into `dst`, packing each RGBA8 pixel into an [`Argb`] word.
pub fn rgba_to_argb(src: &[Rgba<u8>], dst: &mut [Argb]) -> Result<(), SizeError> {
    if dst.len() < src.len() {
        return Err(SizeError::LengthMismatch);
    }
    for (s, d) in src.iter().zip(dst.iter_mut()) {
        *d = Argb::from(*s);
    }
    Ok(())
}

/// Copy `src` into `dst`, unpacking each [`Argb`] word into RGBA8.
pub fn argb_to_rgba(src: &[Argb], dst: &mut [Rgba<u8>]) -> Result<(), SizeError> {
    if dst.len() < src.len() {
        return Err(SizeError::LengthMismatch);
    }
    for (s, d) in src.iter().zip(dst.iter_mut()) {
        *d = Rgba::from(*s);
    }
    Ok(())
}

pub fn rgba_to_argb_vec(src: &[Rgba<u8>]) -> Vec<Argb> {
    src.iter().map(|&px| Argb::from(px)).collect()
}

pub fn argb_to_rgba_vec(src: &[Argb]) -> Vec<Rgba<u8>> {
    src.iter().map(|&px| Rgba::from(px)).collect()
}

/// Weight the R, G, B of RGBA8 pixels in place, using the SIMD kernel.
///
/// The pixels are packed into [`Argb`] words, shifted, and unpacked again.
pub fn color_shift_rgba(pixels: &mut [Rgba<u8>], weights: ChannelWeights) -> Result<(), SizeError> {
    let mut words = rgba_to_argb_vec(pixels);
    crate::color_shift_pixels(&mut words, weights)?;
    argb_to_rgba(&words, pixels)
}
