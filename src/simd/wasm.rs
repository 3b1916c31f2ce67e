use core::arch::wasm32::{
    f32x4_convert_u32x4, f32x4_mul, f32x4_splat, u32x4_shl, u32x4_shr, u32x4_splat,
    u32x4_trunc_sat_f32x4, v128_and, v128_or,
};

use archmage::prelude::*;
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

use super::shift_tail;
use crate::pixel::ChannelWeights;

// ===========================================================================
// WASM SIMD128: rite row implementations
// ===========================================================================

#[rite]
pub(super) fn color_shift_row_wasm128(_token: Wasm128Token, row: &mut [u8], w: ChannelWeights) {
    let byte = u32x4_splat(0xFF);
    let wr = f32x4_splat(w.red());
    let wg = f32x4_splat(w.green());
    let wb = f32x4_splat(w.blue());
    let n = row.len();
    let mut i = 0;
    while i + 16 <= n {
        let arr: &[u8; 16] = row[i..i + 16].try_into().unwrap();
        let v = v128_load(arr);

        let r = f32x4_convert_u32x4(v128_and(u32x4_shr(v, 16), byte));
        let g = f32x4_convert_u32x4(v128_and(u32x4_shr(v, 8), byte));
        let b = f32x4_convert_u32x4(u32x4_shr(v, 24));

        let r = v128_and(u32x4_trunc_sat_f32x4(f32x4_mul(r, wr)), byte);
        let g = v128_and(u32x4_trunc_sat_f32x4(f32x4_mul(g, wg)), byte);
        let b = v128_and(u32x4_trunc_sat_f32x4(f32x4_mul(b, wb)), byte);

        let ag = v128_or(v128_and(v, byte), u32x4_shl(g, 8));
        let rb = v128_or(u32x4_shl(r, 16), u32x4_shl(b, 24));
        let out: &mut [u8; 16] = (&mut row[i..i + 16]).try_into().unwrap();
        v128_store(out, v128_or(ag, rb));
        i += 16;
    }
    shift_tail(&mut row[i..], w);
}

#[rite]
pub(super) fn copy_f32_row_wasm128(_token: Wasm128Token, src: &[f32], dst: &mut [f32]) {
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 4 <= n {
        let s: &[f32; 4] = src[i..i + 4].try_into().unwrap();
        let v = v128_load(s);
        let d: &mut [f32; 4] = (&mut dst[i..i + 4]).try_into().unwrap();
        v128_store(d, v);
        i += 4;
    }
    dst[i..n].copy_from_slice(&src[i..n]);
}

#[rite]
pub(super) fn fill_f32_row_wasm128(_token: Wasm128Token, buf: &mut [f32], value: f32) {
    let v = f32x4_splat(value);
    let n = buf.len();
    let mut i = 0;
    while i + 4 <= n {
        let d: &mut [f32; 4] = (&mut buf[i..i + 4]).try_into().unwrap();
        v128_store(d, v);
        i += 4;
    }
    buf[i..].fill(value);
}

// WASM arcane contiguous wrappers
#[arcane]
pub(super) fn color_shift_impl_wasm128(t: Wasm128Token, b: &mut [u8], w: ChannelWeights) {
    color_shift_row_wasm128(t, b, w);
}
#[arcane]
pub(super) fn copy_f32_impl_wasm128(t: Wasm128Token, s: &[f32], d: &mut [f32]) {
    copy_f32_row_wasm128(t, s, d);
}
#[arcane]
pub(super) fn fill_f32_impl_wasm128(t: Wasm128Token, b: &mut [f32], v: f32) {
    fill_f32_row_wasm128(t, b, v);
}

// WASM arcane strided wrappers
#[arcane]
pub(super) fn color_shift_strided_impl_wasm128(
    t: Wasm128Token,
    buf: &mut [u8],
    w: usize,
    h: usize,
    stride: usize,
    weights: ChannelWeights,
) {
    for y in 0..h {
        color_shift_row_wasm128(t, &mut buf[y * stride..][..w * 4], weights);
    }
}
