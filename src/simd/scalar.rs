use archmage::prelude::*;

use super::shift_tail;
use crate::pixel::ChannelWeights;

// ===========================================================================
// Scalar row implementations
// ===========================================================================

pub(super) fn color_shift_row_scalar(_token: ScalarToken, row: &mut [u8], w: ChannelWeights) {
    shift_tail(row, w);
}

pub(super) fn copy_f32_row_scalar(_token: ScalarToken, src: &[f32], dst: &mut [f32]) {
    let n = src.len().min(dst.len());
    dst[..n].copy_from_slice(&src[..n]);
}

pub(super) fn fill_f32_row_scalar(_token: ScalarToken, buf: &mut [f32], value: f32) {
    buf.fill(value);
}

// ===========================================================================
// Scalar wrappers (dispatch targets for incant!)
// ===========================================================================

pub(super) fn color_shift_impl_scalar(t: ScalarToken, b: &mut [u8], w: ChannelWeights) {
    color_shift_row_scalar(t, b, w);
}
pub(super) fn copy_f32_impl_scalar(t: ScalarToken, s: &[f32], d: &mut [f32]) {
    copy_f32_row_scalar(t, s, d);
}
pub(super) fn fill_f32_impl_scalar(t: ScalarToken, b: &mut [f32], v: f32) {
    fill_f32_row_scalar(t, b, v);
}

pub(super) fn color_shift_strided_impl_scalar(
    t: ScalarToken,
    buf: &mut [u8],
    w: usize,
    h: usize,
    stride: usize,
    weights: ChannelWeights,
) {
    for y in 0..h {
        color_shift_row_scalar(t, &mut buf[y * stride..][..w * 4], weights);
    }
}
