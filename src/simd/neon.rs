use archmage::prelude::*;

use super::shift_tail;
use crate::pixel::ChannelWeights;

// ===========================================================================
// ARM NEON: rite row implementations
// ===========================================================================

// vcvtq_u32_f32 truncates toward zero like the scalar `as u32` cast.
#[rite]
pub(super) fn color_shift_row_arm_v2(_token: Arm64V2Token, row: &mut [u8], w: ChannelWeights) {
    use core::arch::aarch64::{
        vandq_u32, vcvtq_f32_u32, vcvtq_u32_f32, vdupq_n_f32, vdupq_n_u32, vmulq_f32,
        vorrq_u32, vreinterpretq_u8_u32, vreinterpretq_u32_u8, vshlq_n_u32, vshrq_n_u32,
    };
    let byte = vdupq_n_u32(0xFF);
    let wr = vdupq_n_f32(w.red());
    let wg = vdupq_n_f32(w.green());
    let wb = vdupq_n_f32(w.blue());
    let n = row.len();
    let mut i = 0;
    while i + 16 <= n {
        let arr: &[u8; 16] = row[i..i + 16].try_into().unwrap();
        let v = vreinterpretq_u32_u8(safe_unaligned_simd::aarch64::vld1q_u8(arr));

        let r = vcvtq_f32_u32(vandq_u32(vshrq_n_u32::<16>(v), byte));
        let g = vcvtq_f32_u32(vandq_u32(vshrq_n_u32::<8>(v), byte));
        let b = vcvtq_f32_u32(vshrq_n_u32::<24>(v));

        let r = vandq_u32(vcvtq_u32_f32(vmulq_f32(r, wr)), byte);
        let g = vandq_u32(vcvtq_u32_f32(vmulq_f32(g, wg)), byte);
        let b = vandq_u32(vcvtq_u32_f32(vmulq_f32(b, wb)), byte);

        let ag = vorrq_u32(vandq_u32(v, byte), vshlq_n_u32::<8>(g));
        let rb = vorrq_u32(vshlq_n_u32::<16>(r), vshlq_n_u32::<24>(b));
        let out: &mut [u8; 16] = (&mut row[i..i + 16]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_u8(out, vreinterpretq_u8_u32(vorrq_u32(ag, rb)));
        i += 16;
    }
    shift_tail(&mut row[i..], w);
}

#[rite]
pub(super) fn copy_f32_row_arm_v2(_token: Arm64V2Token, src: &[f32], dst: &mut [f32]) {
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 4 <= n {
        let s: &[f32; 4] = src[i..i + 4].try_into().unwrap();
        let v = safe_unaligned_simd::aarch64::vld1q_f32(s);
        let d: &mut [f32; 4] = (&mut dst[i..i + 4]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_f32(d, v);
        i += 4;
    }
    dst[i..n].copy_from_slice(&src[i..n]);
}

#[rite]
pub(super) fn fill_f32_row_arm_v2(_token: Arm64V2Token, buf: &mut [f32], value: f32) {
    use core::arch::aarch64::vdupq_n_f32;
    let v = vdupq_n_f32(value);
    let n = buf.len();
    let mut i = 0;
    while i + 4 <= n {
        let d: &mut [f32; 4] = (&mut buf[i..i + 4]).try_into().unwrap();
        safe_unaligned_simd::aarch64::vst1q_f32(d, v);
        i += 4;
    }
    buf[i..].fill(value);
}

// ARM arcane contiguous wrappers
#[arcane]
pub(super) fn color_shift_impl_arm_v2(t: Arm64V2Token, b: &mut [u8], w: ChannelWeights) {
    color_shift_row_arm_v2(t, b, w);
}
#[arcane]
pub(super) fn copy_f32_impl_arm_v2(t: Arm64V2Token, s: &[f32], d: &mut [f32]) {
    copy_f32_row_arm_v2(t, s, d);
}
#[arcane]
pub(super) fn fill_f32_impl_arm_v2(t: Arm64V2Token, b: &mut [f32], v: f32) {
    fill_f32_row_arm_v2(t, b, v);
}

// ARM arcane strided wrappers
#[arcane]
pub(super) fn color_shift_strided_impl_arm_v2(
    t: Arm64V2Token,
    buf: &mut [u8],
    w: usize,
    h: usize,
    stride: usize,
    weights: ChannelWeights,
) {
    for y in 0..h {
        color_shift_row_arm_v2(t, &mut buf[y * stride..][..w * 4], weights);
    }
}
