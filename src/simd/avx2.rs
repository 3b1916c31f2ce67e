use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{
    _mm256_loadu_ps, _mm256_loadu_si256, _mm256_storeu_ps, _mm256_storeu_si256,
};

use super::shift_tail;
use crate::pixel::ChannelWeights;

// ===========================================================================
// x86-64 AVX2: rite row implementations
// ===========================================================================

// 8 pixels per 256-bit vector. Channels are isolated as i32 lanes, converted
// to f32, multiplied, truncated (cvttps), masked to 8 bits and shifted back.
#[rite]
pub(super) fn color_shift_row_v3(_token: X64V3Token, row: &mut [u8], w: ChannelWeights) {
    let byte = _mm256_set1_epi32(0xFF);
    let wr = _mm256_set1_ps(w.red());
    let wg = _mm256_set1_ps(w.green());
    let wb = _mm256_set1_ps(w.blue());
    let n = row.len();
    let mut i = 0;
    while i + 32 <= n {
        let arr: &[u8; 32] = row[i..i + 32].try_into().unwrap();
        let v = _mm256_loadu_si256(arr);

        let r = _mm256_cvtepi32_ps(_mm256_and_si256(_mm256_srli_epi32::<16>(v), byte));
        let g = _mm256_cvtepi32_ps(_mm256_and_si256(_mm256_srli_epi32::<8>(v), byte));
        let b = _mm256_cvtepi32_ps(_mm256_srli_epi32::<24>(v));

        let r = _mm256_and_si256(_mm256_cvttps_epi32(_mm256_mul_ps(r, wr)), byte);
        let g = _mm256_and_si256(_mm256_cvttps_epi32(_mm256_mul_ps(g, wg)), byte);
        let b = _mm256_and_si256(_mm256_cvttps_epi32(_mm256_mul_ps(b, wb)), byte);

        let ag = _mm256_or_si256(_mm256_and_si256(v, byte), _mm256_slli_epi32::<8>(g));
        let rb = _mm256_or_si256(_mm256_slli_epi32::<16>(r), _mm256_slli_epi32::<24>(b));
        let out: &mut [u8; 32] = (&mut row[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(out, _mm256_or_si256(ag, rb));
        i += 32;
    }
    shift_tail(&mut row[i..], w);
}

#[rite]
pub(super) fn copy_f32_row_v3(_token: X64V3Token, src: &[f32], dst: &mut [f32]) {
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 8 <= n {
        let s: &[f32; 8] = src[i..i + 8].try_into().unwrap();
        let v = _mm256_loadu_ps(s);
        let d: &mut [f32; 8] = (&mut dst[i..i + 8]).try_into().unwrap();
        _mm256_storeu_ps(d, v);
        i += 8;
    }
    dst[i..n].copy_from_slice(&src[i..n]);
}

#[rite]
pub(super) fn fill_f32_row_v3(_token: X64V3Token, buf: &mut [f32], value: f32) {
    let v = _mm256_set1_ps(value);
    let n = buf.len();
    let mut i = 0;
    while i + 8 <= n {
        let d: &mut [f32; 8] = (&mut buf[i..i + 8]).try_into().unwrap();
        _mm256_storeu_ps(d, v);
        i += 8;
    }
    buf[i..].fill(value);
}

// x86-64 arcane contiguous wrappers
#[arcane]
pub(super) fn color_shift_impl_v3(t: X64V3Token, b: &mut [u8], w: ChannelWeights) {
    color_shift_row_v3(t, b, w);
}
#[arcane]
pub(super) fn copy_f32_impl_v3(t: X64V3Token, s: &[f32], d: &mut [f32]) {
    copy_f32_row_v3(t, s, d);
}
#[arcane]
pub(super) fn fill_f32_impl_v3(t: X64V3Token, b: &mut [f32], v: f32) {
    fill_f32_row_v3(t, b, v);
}

// x86-64 arcane strided wrappers
#[arcane]
pub(super) fn color_shift_strided_impl_v3(
    t: X64V3Token,
    buf: &mut [u8],
    w: usize,
    h: usize,
    stride: usize,
    weights: ChannelWeights,
) {
    for y in 0..h {
        color_shift_row_v3(t, &mut buf[y * stride..][..w * 4], weights);
    }
}
