//! Whole-image channel weighting on [`imgref`] buffers.
//!
//! These handle strided images row by row with the SIMD-dispatched core.
//!
//! ```rust
//! use imgref::ImgVec;
//! use dye::{Argb, ChannelWeights};
//!
//! let mut img = ImgVec::new(vec![Argb::from_channels(255, 200, 100, 50); 64 * 48], 64, 48);
//! let w = ChannelWeights::new(0.5, 0.3, 1.0).unwrap();
//! dye::imgref::color_shift_img(img.as_mut(), w).unwrap();
//! assert_eq!(img.buf()[0].r(), 100);
//! ```

use alloc::vec::Vec;

use ::imgref::{ImgRef, ImgRefMut, ImgVec};
use rgb::Rgba;

use crate::img::ArgbImage;
use crate::pixel::{Argb, ChannelWeights};
use crate::SizeError;

/// Weight every pixel of `img` in place. Padding past `width` in each row is
/// never touched.
pub fn color_shift_img(mut img: ImgRefMut<'_, Argb>, weights: ChannelWeights) -> Result<(), SizeError> {
    if img.width() == 0 || img.height() == 0 {
        return Err(SizeError::InvalidStride);
    }
    for row in img.rows_mut() {
        crate::color_shift_pixels(row, weights)?;
    }
    Ok(())
}

/// Pack an RGBA8 image into an `ImgVec<Argb>`, dropping any stride padding.
pub fn argb_from_rgba(img: ImgRef<'_, Rgba<u8>>) -> ImgVec<Argb> {
    let (w, h) = (img.width(), img.height());
    let mut buf = Vec::with_capacity(w * h);
    for row in img.rows() {
        buf.extend(row.iter().map(|&px| Argb::from(px)));
    }
    ImgVec::new(buf, w, h)
}

/// Unpack an `Argb` image into RGBA8, dropping any stride padding.
pub fn rgba_from_argb(img: ImgRef<'_, Argb>) -> ImgVec<Rgba<u8>> {
    let (w, h) = (img.width(), img.height());
    let mut buf = Vec::with_capacity(w * h);
    for row in img.rows() {
        buf.extend(row.iter().map(|&px| Rgba::from(px)));
    }
    ImgVec::new(buf, w, h)
}

impl From<ArgbImage> for ImgVec<Argb> {
    fn from(img: ArgbImage) -> Self {
        let (w, h) = (img.width(), img.height());
        ImgVec::new(img.into_pixels(), w, h)
    }
}

impl TryFrom<ImgRef<'_, Argb>> for ArgbImage {
    type Error = SizeError;

    fn try_from(img: ImgRef<'_, Argb>) -> Result<Self, SizeError> {
        let pixels: Vec<Argb> = img.rows().flatten().copied().collect();
        ArgbImage::new(img.width(), img.height(), pixels)
    }
}
