extern crate alloc;
extern crate std;
use super::*;
use crate::Argb;
use alloc::{vec, vec::Vec};
use archmage::testing::{CompileTimePolicy, for_each_token_permutation};

fn policy() -> CompileTimePolicy {
    if std::env::var_os("CI").is_some() {
        CompileTimePolicy::Fail
    } else {
        CompileTimePolicy::WarnStderr
    }
}

// --- Helpers to generate test data ---

fn make_4bpp(n_pixels: usize) -> Vec<u8> {
    (0..n_pixels * 4).map(|i| (i * 37 % 251) as u8).collect()
}

fn make_f32(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32 * 0.25 - 17.0).collect()
}

fn weights(r: f32, g: f32, b: f32) -> ChannelWeights {
    ChannelWeights::new(r, g, b).unwrap()
}

// --- Reference implementation, written from the bit masks ---

fn ref_color_shift(data: &[u8], w: ChannelWeights) -> Vec<u8> {
    let mut out = data.to_vec();
    for px in out.chunks_exact_mut(4) {
        let v = u32::from_ne_bytes([px[0], px[1], px[2], px[3]]);
        let r = ((v & 0x00FF_0000) >> 16) as f32;
        let g = ((v & 0x0000_FF00) >> 8) as f32;
        let b = ((v & 0xFF00_0000) >> 24) as f32;
        let r = ((r * w.red()) as u32) << 16 & 0x00FF_0000;
        let g = ((g * w.green()) as u32) << 8 & 0x0000_FF00;
        let b = ((b * w.blue()) as u32) << 24 & 0xFF00_0000;
        let shifted = (v & 0x0000_00FF) | r | g | b;
        px.copy_from_slice(&shifted.to_ne_bytes());
    }
    out
}

// Test sizes: small (remainder only), medium (SIMD + remainder), large (multiple SIMD chunks)
const TEST_PIXEL_COUNTS: &[usize] = &[1, 2, 3, 4, 5, 7, 8, 9, 15, 16, 17, 31, 32, 33, 100];

const TEST_WEIGHTS: &[(f32, f32, f32)] = &[
    (0.5, 0.3, 1.0),
    (1.0, 1.0, 1.0),
    (0.0, 0.0, 0.0),
    (2.0, 2.5, 3.75),
    (0.999, 1.001, 0.123),
    (300.0, 65536.0, 17.3),
];

// -----------------------------------------------------------------------
// SIMD-dispatched operations: tested at every capability tier
// -----------------------------------------------------------------------

#[test]
fn permutation_color_shift() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &(r, g, b) in TEST_WEIGHTS {
            let w = weights(r, g, b);
            for &n in TEST_PIXEL_COUNTS {
                let mut data = make_4bpp(n);
                let expected = ref_color_shift(&data, w);
                color_shift(&mut data, w).unwrap();
                assert_eq!(data, expected, "color_shift n={n} w={w:?} tier={perm}");
            }
        }
    });
    std::eprintln!("color_shift: {report}");
}

#[test]
fn permutation_color_shift_every_channel_value() {
    let report = for_each_token_permutation(policy(), |perm| {
        let w = weights(0.5, 0.3, 1.7);
        // Every byte value in every position, including alpha.
        let mut data: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v, v]).collect();
        let expected = ref_color_shift(&data, w);
        color_shift(&mut data, w).unwrap();
        assert_eq!(data, expected, "all channel values tier={perm}");
    });
    std::eprintln!("color_shift_every_channel_value: {report}");
}

#[test]
fn permutation_alpha_preserved() {
    let report = for_each_token_permutation(policy(), |perm| {
        let w = weights(7.0, 0.1, 250.0);
        let mut px: Vec<Argb> = (0..64u32)
            .map(|i| Argb::from_channels(i as u8 * 4, 255, 128, i as u8))
            .collect();
        let before = px.clone();
        color_shift_pixels(&mut px, w).unwrap();
        for (a, b) in before.iter().zip(&px) {
            assert_eq!(a.a(), b.a(), "alpha tier={perm}");
        }
    });
    std::eprintln!("alpha_preserved: {report}");
}

#[test]
fn permutation_copy_f32() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let src = make_f32(n);
            let mut dst = vec![0.0f32; n + 3];
            copy_f32(&src, &mut dst).unwrap();
            assert_eq!(&dst[..n], &src[..], "copy_f32 n={n} tier={perm}");
            assert_eq!(&dst[n..], &[0.0; 3], "copy_f32 tail n={n} tier={perm}");
        }
    });
    std::eprintln!("copy_f32: {report}");
}

#[test]
fn permutation_fill_f32() {
    let report = for_each_token_permutation(policy(), |perm| {
        for &n in TEST_PIXEL_COUNTS {
            let mut buf = make_f32(n);
            fill_f32(&mut buf, 10.0);
            assert!(buf.iter().all(|&v| v == 10.0), "fill_f32 n={n} tier={perm}");
        }
    });
    std::eprintln!("fill_f32: {report}");
}

// -----------------------------------------------------------------------
// Strided and whole-image variants: also tested at every tier
// -----------------------------------------------------------------------

#[test]
fn permutation_strided_color_shift() {
    let report = for_each_token_permutation(policy(), |perm| {
        // 10 pixels wide, stride 48 bytes (12 pixels × 4bpp), 4 rows
        let w = 10;
        let h = 4;
        let stride = 48;
        let cw = weights(0.5, 0.3, 1.0);
        let mut buf = vec![0xCCu8; stride * h];
        for y in 0..h {
            for x in 0..w {
                let i = y * stride + x * 4;
                buf[i] = (y * w + x) as u8;
                buf[i + 1] = 100;
                buf[i + 2] = 200;
                buf[i + 3] = 255;
            }
        }
        let orig = buf.clone();
        color_shift_strided(&mut buf, w, h, stride, cw).unwrap();
        for y in 0..h {
            let row = y * stride;
            let expected = ref_color_shift(&orig[row..row + w * 4], cw);
            assert_eq!(&buf[row..row + w * 4], &expected[..], "strided y={y} tier={perm}");
            // Padding untouched
            for i in (w * 4)..stride {
                assert_eq!(buf[row + i], 0xCC, "padding corrupted y={y} i={i} tier={perm}");
            }
        }
    });
    std::eprintln!("strided_color_shift: {report}");
}

#[test]
fn permutation_color_shift_image() {
    let report = for_each_token_permutation(policy(), |perm| {
        let (w, h) = (13, 7);
        let cw = weights(1.5, 0.75, 0.2);
        let mut buf = make_4bpp(w * h);
        buf.extend_from_slice(&[0xAB; 8]);
        let expected = ref_color_shift(&buf[..w * h * 4], cw);
        color_shift_image(&mut buf, w, h, cw).unwrap();
        assert_eq!(&buf[..w * h * 4], &expected[..], "image tier={perm}");
        assert_eq!(&buf[w * h * 4..], &[0xAB; 8], "trailing bytes tier={perm}");
    });
    std::eprintln!("color_shift_image: {report}");
}

// -----------------------------------------------------------------------
// Scalar tier called directly
// -----------------------------------------------------------------------

#[test]
fn scalar_tier_matches_dispatch() {
    let w = weights(0.5, 0.3, 1.0);
    let mut a = make_4bpp(77);
    let mut b = a.clone();
    color_shift(&mut a, w).unwrap();
    color_shift_scalar_tier(&mut b, w).unwrap();
    assert_eq!(a, b);

    let src = make_f32(77);
    let mut d1 = vec![0.0f32; 77];
    let mut d2 = vec![0.0f32; 77];
    copy_f32(&src, &mut d1).unwrap();
    copy_f32_scalar_tier(&src, &mut d2).unwrap();
    assert_eq!(d1, d2);

    fill_f32_scalar_tier(&mut d2, -1.5);
    assert!(d2.iter().all(|&v| v == -1.5));
}

#[test]
fn fill_pair_prepares_both_buffers() {
    let mut src = vec![1.0f32; 40];
    let mut dst = vec![1.0f32; 40];
    fill_pair_f32(&mut src, &mut dst, 10.0, 0.0);
    assert!(src.iter().all(|&v| v == 10.0));
    assert!(dst.iter().all(|&v| v == 0.0));
}

// -----------------------------------------------------------------------
// Size validation
// -----------------------------------------------------------------------

#[test]
fn test_size_errors() {
    let w = ChannelWeights::IDENTITY;
    assert_eq!(color_shift(&mut [0; 5], w), Err(SizeError::NotPixelAligned));
    assert_eq!(color_shift(&mut [0; 0], w), Err(SizeError::NotPixelAligned));
    assert_eq!(color_shift_scalar_tier(&mut [0; 3], w), Err(SizeError::NotPixelAligned));
    assert_eq!(
        copy_f32(&[1.0; 8], &mut [0.0; 7]),
        Err(SizeError::LengthMismatch)
    );
    assert_eq!(copy_f32(&[], &mut []), Ok(()));
    assert_eq!(
        color_shift_image(&mut [0; 15], 2, 2, w),
        Err(SizeError::LengthMismatch)
    );
    assert_eq!(
        color_shift_image(&mut [0; 16], 0, 4, w),
        Err(SizeError::InvalidStride)
    );
    assert_eq!(
        color_shift_image(&mut [0; 16], usize::MAX, 2, w),
        Err(SizeError::InvalidStride)
    );
}

#[test]
fn test_strided_size_errors() {
    let w = ChannelWeights::IDENTITY;
    // stride < width * bpp
    assert_eq!(
        color_shift_strided(&mut [0; 32], 4, 2, 8, w),
        Err(SizeError::InvalidStride)
    );
    // buffer too small
    assert_eq!(
        color_shift_strided(&mut [0; 10], 2, 2, 8, w),
        Err(SizeError::LengthMismatch)
    );
    // zero width
    assert_eq!(
        color_shift_strided(&mut [0; 8], 0, 1, 8, w),
        Err(SizeError::InvalidStride)
    );
    // zero height
    assert_eq!(
        color_shift_strided(&mut [0; 8], 2, 0, 8, w),
        Err(SizeError::InvalidStride)
    );
}
