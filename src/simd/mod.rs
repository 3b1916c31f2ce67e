// ---------------------------------------------------------------------------
// Row-level channel weighting and f32 copy/fill with SIMD dispatch.
//
// Architecture: #[rite] row functions contain the SIMD loops.
// #[arcane] wrappers dispatch via incant!: contiguous (single call)
// and strided (loop over rows, single dispatch).
// ---------------------------------------------------------------------------

use crate::SizeError;
use crate::pixel::{ChannelWeights, shift_word};
use archmage::incant;
use archmage::prelude::*;

mod scalar;
use scalar::*;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;

#[cfg(test)]
mod tests;

// ===========================================================================
// Validation helpers
// ===========================================================================

#[inline]
fn check_inplace(len: usize) -> Result<(), SizeError> {
    if len == 0 || !len.is_multiple_of(4) {
        Err(SizeError::NotPixelAligned)
    } else {
        Ok(())
    }
}

#[inline]
fn check_image(len: usize, width: usize, height: usize) -> Result<usize, SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::InvalidStride);
    }
    let total = width
        .checked_mul(height)
        .and_then(|px| px.checked_mul(4))
        .ok_or(SizeError::InvalidStride)?;
    if len < total {
        return Err(SizeError::LengthMismatch);
    }
    Ok(total)
}

#[inline]
fn check_strided(len: usize, width: usize, height: usize, stride: usize) -> Result<(), SizeError> {
    if width == 0 || height == 0 {
        return Err(SizeError::InvalidStride);
    }
    let row_bytes = width.checked_mul(4).ok_or(SizeError::InvalidStride)?;
    if row_bytes > stride {
        return Err(SizeError::InvalidStride);
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(SizeError::InvalidStride)?
        .checked_add(row_bytes)
        .ok_or(SizeError::InvalidStride)?;
    if len < total {
        return Err(SizeError::LengthMismatch);
    }
    Ok(())
}

// ===========================================================================
// Utility
// ===========================================================================

/// Scalar tail shared by every tier: whatever is left after the vector loop.
#[inline(always)]
fn shift_tail(row: &mut [u8], w: ChannelWeights) {
    for px in row.chunks_exact_mut(4) {
        let v = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&shift_word(v, w).to_ne_bytes());
    }
}

// ===========================================================================
// Public API: channel weighting
// ===========================================================================

/// Weight R, G and B of every 4-byte pixel in place; alpha is untouched.
///
/// Each pixel is read as a native-endian `u32` with the [`Argb`](crate::Argb)
/// layout. Channel results are `trunc(channel * weight) & 0xFF`: values
/// above 255 wrap.
pub fn color_shift(buf: &mut [u8], weights: ChannelWeights) -> Result<(), SizeError> {
    check_inplace(buf.len())?;
    incant!(color_shift_impl(buf, weights), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// Weight a tightly packed `width × height` image in place.
///
/// The buffer must hold at least `width * height * 4` bytes; bytes past that
/// are left alone.
pub fn color_shift_image(
    buf: &mut [u8],
    width: usize,
    height: usize,
    weights: ChannelWeights,
) -> Result<(), SizeError> {
    let total = check_image(buf.len(), width, height)?;
    let buf = &mut buf[..total];
    incant!(color_shift_impl(buf, weights), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// Weight a strided image in place.
///
/// `stride` is the distance in bytes between the start of consecutive rows.
/// Must be ≥ `width × 4`. Padding bytes between rows are never read or written.
/// The buffer must be at least `(height - 1) * stride + width * 4` bytes.
pub fn color_shift_strided(
    buf: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    weights: ChannelWeights,
) -> Result<(), SizeError> {
    check_strided(buf.len(), width, height, stride)?;
    incant!(
        color_shift_strided_impl(buf, width, height, stride, weights),
        [v3, arm_v2, wasm128, scalar]
    );
    Ok(())
}

/// Typed form of [`color_shift`].
pub fn color_shift_pixels(
    pixels: &mut [crate::Argb],
    weights: ChannelWeights,
) -> Result<(), SizeError> {
    color_shift(bytemuck::cast_slice_mut(pixels), weights)
}

// ===========================================================================
// Public API: f32 buffers
// ===========================================================================

/// Copy `src` into the front of `dst`.
///
/// `dst` must be at least as long as `src`; anything past `src.len()` is left
/// alone. An empty `src` copies nothing.
pub fn copy_f32(src: &[f32], dst: &mut [f32]) -> Result<(), SizeError> {
    if dst.len() < src.len() {
        return Err(SizeError::LengthMismatch);
    }
    if src.is_empty() {
        return Ok(());
    }
    let dst = &mut dst[..src.len()];
    incant!(copy_f32_impl(src, dst), [v3, arm_v2, wasm128, scalar]);
    Ok(())
}

/// Set every element of `buf` to `value`.
pub fn fill_f32(buf: &mut [f32], value: f32) {
    if buf.is_empty() {
        return;
    }
    incant!(fill_f32_impl(buf, value), [v3, arm_v2, wasm128, scalar]);
}

/// Prepare a copy: `src` becomes all `src_value`, `dst` all `dst_value`.
pub fn fill_pair_f32(src: &mut [f32], dst: &mut [f32], src_value: f32, dst_value: f32) {
    fill_f32(src, src_value);
    fill_f32(dst, dst_value);
}

// ===========================================================================
// Scalar tier, called without dispatch
// ===========================================================================

pub(crate) fn color_shift_scalar_tier(
    buf: &mut [u8],
    weights: ChannelWeights,
) -> Result<(), SizeError> {
    check_inplace(buf.len())?;
    color_shift_impl_scalar(ScalarToken, buf, weights);
    Ok(())
}

pub(crate) fn copy_f32_scalar_tier(src: &[f32], dst: &mut [f32]) -> Result<(), SizeError> {
    if dst.len() < src.len() {
        return Err(SizeError::LengthMismatch);
    }
    copy_f32_impl_scalar(ScalarToken, src, &mut dst[..src.len()]);
    Ok(())
}

pub(crate) fn fill_f32_scalar_tier(buf: &mut [f32], value: f32) {
    fill_f32_impl_scalar(ScalarToken, buf, value);
}
