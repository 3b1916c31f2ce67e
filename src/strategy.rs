//! Interchangeable implementations of the three buffer operations.
//!
//! [`Simd`] is the runtime-dispatched kernel, [`ScalarTier`] is the
//! dispatcher's own scalar fallback, and [`Naive`] is a plain per-element
//! loop kept independent of both so it can serve as the reference.

use crate::pixel::{
    ALPHA_MASK, Argb, BLUE_MASK, BLUE_SHIFT, ChannelWeights, GREEN_MASK, GREEN_SHIFT, RED_MASK,
    RED_SHIFT,
};
use crate::SizeError;

/// A color-shift / copy / fill implementation.
pub trait Kernel {
    /// Short label used in logs and oracle reports.
    fn name(&self) -> &'static str;

    /// Weight R, G, B of every pixel in place.
    fn color_shift(&self, pixels: &mut [Argb], weights: ChannelWeights) -> Result<(), SizeError>;

    /// Copy `src` into the front of `dst`.
    fn copy(&self, src: &[f32], dst: &mut [f32]) -> Result<(), SizeError>;

    /// Set every element of `buf` to `value`.
    fn fill(&self, buf: &mut [f32], value: f32);
}

impl<K: Kernel + ?Sized> Kernel for &K {
    fn name(&self) -> &'static str {
        (**self).name()
    }
    fn color_shift(&self, pixels: &mut [Argb], weights: ChannelWeights) -> Result<(), SizeError> {
        (**self).color_shift(pixels, weights)
    }
    fn copy(&self, src: &[f32], dst: &mut [f32]) -> Result<(), SizeError> {
        (**self).copy(src, dst)
    }
    fn fill(&self, buf: &mut [f32], value: f32) {
        (**self).fill(buf, value)
    }
}

/// Best available SIMD tier, picked at runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simd;

impl Kernel for Simd {
    fn name(&self) -> &'static str {
        "simd"
    }
    fn color_shift(&self, pixels: &mut [Argb], weights: ChannelWeights) -> Result<(), SizeError> {
        crate::color_shift_pixels(pixels, weights)
    }
    fn copy(&self, src: &[f32], dst: &mut [f32]) -> Result<(), SizeError> {
        crate::copy_f32(src, dst)
    }
    fn fill(&self, buf: &mut [f32], value: f32) {
        crate::fill_f32(buf, value)
    }
}

/// The dispatcher's scalar fallback, called without dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarTier;

impl Kernel for ScalarTier {
    fn name(&self) -> &'static str {
        "scalar"
    }
    fn color_shift(&self, pixels: &mut [Argb], weights: ChannelWeights) -> Result<(), SizeError> {
        crate::simd::color_shift_scalar_tier(bytemuck::cast_slice_mut(pixels), weights)
    }
    fn copy(&self, src: &[f32], dst: &mut [f32]) -> Result<(), SizeError> {
        crate::simd::copy_f32_scalar_tier(src, dst)
    }
    fn fill(&self, buf: &mut [f32], value: f32) {
        crate::simd::fill_f32_scalar_tier(buf, value)
    }
}

/// Element-by-element reference loops.
#[derive(Debug, Clone, Copy, Default)]
pub struct Naive;

impl Kernel for Naive {
    fn name(&self) -> &'static str {
        "naive"
    }

    fn color_shift(&self, pixels: &mut [Argb], weights: ChannelWeights) -> Result<(), SizeError> {
        if pixels.is_empty() {
            return Err(SizeError::NotPixelAligned);
        }
        for px in pixels.iter_mut() {
            let v = px.0;
            let r = ((v & RED_MASK) >> RED_SHIFT) as f32;
            let g = ((v & GREEN_MASK) >> GREEN_SHIFT) as f32;
            let b = ((v & BLUE_MASK) >> BLUE_SHIFT) as f32;
            let r = ((r * weights.red()) as u32) << RED_SHIFT & RED_MASK;
            let g = ((g * weights.green()) as u32) << GREEN_SHIFT & GREEN_MASK;
            let b = ((b * weights.blue()) as u32) << BLUE_SHIFT & BLUE_MASK;
            px.0 = (v & ALPHA_MASK) | r | g | b;
        }
        Ok(())
    }

    fn copy(&self, src: &[f32], dst: &mut [f32]) -> Result<(), SizeError> {
        if dst.len() < src.len() {
            return Err(SizeError::LengthMismatch);
        }
        for (i, &v) in src.iter().enumerate() {
            dst[i] = v;
        }
        Ok(())
    }

    fn fill(&self, buf: &mut [f32], value: f32) {
        for v in buf.iter_mut() {
            *v = value;
        }
    }
}
