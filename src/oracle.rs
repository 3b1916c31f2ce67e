//! Run two [`Kernel`]s on identical input and report the first disagreement.
//!
//! ```rust
//! use dye::oracle::{self, CopyCase};
//! use dye::{Argb, ChannelWeights, Naive, Simd};
//!
//! let w = ChannelWeights::new(0.5, 0.3, 1.0).unwrap();
//! let pixels = [Argb(0xFFAA_2040); 64];
//! oracle::compare_color_shift(&Simd, &Naive, &pixels, w).unwrap();
//! oracle::compare_copy(&Simd, &Naive, CopyCase::default()).unwrap();
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::aligned::{Alignment, FloatBuffer};
use crate::pixel::{Argb, ChannelWeights};
use crate::strategy::Kernel;
use crate::SizeError;

/// Both kernels produced the same output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agreement {
    /// Number of elements compared.
    pub elements: usize,
}

/// First position at which two outputs differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divergence<T> {
    pub index: usize,
    pub left_kernel: &'static str,
    pub left: T,
    pub right_kernel: &'static str,
    pub right: T,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mismatch {
    /// A kernel refused the input.
    Rejected {
        kernel: &'static str,
        error: SizeError,
    },
    /// Color-shift outputs differ.
    Pixel(Divergence<Argb>),
    /// Copy outputs differ, from each other or from the source.
    Value(Divergence<f32>),
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rejected { kernel, error } => write!(f, "{kernel} rejected input: {error}"),
            Self::Pixel(d) => write!(
                f,
                "pixel {}: {} gave {:?}, {} gave {:?}",
                d.index, d.left_kernel, d.left, d.right_kernel, d.right
            ),
            Self::Value(d) => write!(
                f,
                "element {}: {} gave {}, {} gave {}",
                d.index, d.left_kernel, d.left, d.right_kernel, d.right
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Mismatch {}

/// Apply both kernels to copies of `pixels`; outputs must match exactly.
pub fn compare_color_shift<A, B>(
    a: &A,
    b: &B,
    pixels: &[Argb],
    weights: ChannelWeights,
) -> Result<Agreement, Mismatch>
where
    A: Kernel + ?Sized,
    B: Kernel + ?Sized,
{
    let mut left = pixels.to_vec();
    let mut right = pixels.to_vec();
    a.color_shift(&mut left, weights)
        .map_err(|error| Mismatch::Rejected {
            kernel: a.name(),
            error,
        })?;
    b.color_shift(&mut right, weights)
        .map_err(|error| Mismatch::Rejected {
            kernel: b.name(),
            error,
        })?;

    if let Some(index) = left.iter().zip(&right).position(|(l, r)| l != r) {
        let d = Divergence {
            index,
            left_kernel: a.name(),
            left: left[index],
            right_kernel: b.name(),
            right: right[index],
        };
        tracing::debug!(index, left = ?d.left, right = ?d.right, "color shift diverged");
        return Err(Mismatch::Pixel(d));
    }
    tracing::trace!(pixels = pixels.len(), a = a.name(), b = b.name(), "color shift agrees");
    Ok(Agreement {
        elements: pixels.len(),
    })
}

/// Geometry and fill values for a copy comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CopyCase {
    pub len: usize,
    pub alignment: Alignment,
    /// Value the source is filled with before copying.
    pub source: f32,
    /// Value the destination is filled with before copying.
    pub dest: f32,
}

impl CopyCase {
    /// 10 000 × 16 elements.
    pub const DEFAULT_LEN: usize = 10_000 * 16;

    pub fn new(len: usize, alignment: Alignment) -> Self {
        Self {
            len,
            alignment,
            ..Self::default()
        }
    }
}

impl Default for CopyCase {
    fn default() -> Self {
        Self {
            len: Self::DEFAULT_LEN,
            alignment: Alignment::Simd16,
            source: 10.0,
            dest: 0.0,
        }
    }
}

/// Fill, copy and verify with one kernel; returns the destination.
///
/// Every destination element must equal the source bit for bit.
pub fn run_copy<K: Kernel + ?Sized>(kernel: &K, case: CopyCase) -> Result<FloatBuffer, Mismatch> {
    let mut src = FloatBuffer::new(case.len, case.alignment);
    let mut dst = FloatBuffer::new(case.len, case.alignment);
    kernel.fill(&mut src, case.source);
    kernel.fill(&mut dst, case.dest);
    kernel
        .copy(&src, &mut dst)
        .map_err(|error| Mismatch::Rejected {
            kernel: kernel.name(),
            error,
        })?;
    if let Some(index) = first_difference(&src, &dst) {
        return Err(Mismatch::Value(Divergence {
            index,
            left_kernel: "source",
            left: src[index],
            right_kernel: kernel.name(),
            right: dst[index],
        }));
    }
    Ok(dst)
}

/// Copy with both kernels under `case`; both must reproduce the source and
/// each other exactly.
pub fn compare_copy<A, B>(a: &A, b: &B, case: CopyCase) -> Result<Agreement, Mismatch>
where
    A: Kernel + ?Sized,
    B: Kernel + ?Sized,
{
    let left = run_copy(a, case)?;
    let right = run_copy(b, case)?;
    if let Some(index) = first_difference(&left, &right) {
        return Err(Mismatch::Value(Divergence {
            index,
            left_kernel: a.name(),
            left: left[index],
            right_kernel: b.name(),
            right: right[index],
        }));
    }
    tracing::trace!(len = case.len, alignment = ?case.alignment, "copy agrees");
    Ok(Agreement { elements: case.len })
}

/// Copy `case` once per [`Alignment`]; every result must be identical.
pub fn compare_copy_alignments<K: Kernel + ?Sized>(
    kernel: &K,
    case: CopyCase,
) -> Result<Agreement, Mismatch> {
    let results = Alignment::ALL
        .iter()
        .map(|&alignment| run_copy(kernel, CopyCase { alignment, ..case }))
        .collect::<Result<Vec<_>, _>>()?;
    // Alignment::ALL is never empty.
    let (first, rest) = (&results[0], &results[1..]);
    for other in rest {
        if let Some(index) = first_difference(first, other) {
            return Err(Mismatch::Value(Divergence {
                index,
                left_kernel: kernel.name(),
                left: first[index],
                right_kernel: kernel.name(),
                right: other[index],
            }));
        }
    }
    Ok(Agreement { elements: case.len })
}

fn first_difference(a: &[f32], b: &[f32]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x.to_bits() != y.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{Naive, ScalarTier, Simd};

    /// Deliberately wrong kernel for exercising the failure paths.
    struct Broken;

    impl Kernel for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn color_shift(&self, pixels: &mut [Argb], _: ChannelWeights) -> Result<(), SizeError> {
            if let Some(last) = pixels.last_mut() {
                last.0 ^= 0x0100_0000;
            }
            Ok(())
        }
        fn copy(&self, src: &[f32], dst: &mut [f32]) -> Result<(), SizeError> {
            let n = src.len().saturating_sub(1);
            dst[..n].copy_from_slice(&src[..n]);
            Ok(())
        }
        fn fill(&self, buf: &mut [f32], value: f32) {
            buf.fill(value);
        }
    }

    fn sample_pixels(n: usize) -> Vec<Argb> {
        (0..n as u32).map(|i| Argb(i.wrapping_mul(0x9E37_79B9))).collect()
    }

    #[test]
    fn simd_agrees_with_naive() {
        let w = ChannelWeights::new(0.5, 0.3, 1.0).unwrap();
        let pixels = sample_pixels(1027);
        let ok = compare_color_shift(&Simd, &Naive, &pixels, w).unwrap();
        assert_eq!(ok.elements, 1027);
        compare_color_shift(&ScalarTier, &Naive, &pixels, w).unwrap();
    }

    #[test]
    fn divergence_names_first_bad_pixel() {
        let pixels = sample_pixels(10);
        let err = compare_color_shift(&Naive, &Broken, &pixels, ChannelWeights::IDENTITY)
            .unwrap_err();
        match err {
            Mismatch::Pixel(d) => {
                assert_eq!(d.index, 9);
                assert_eq!(d.left_kernel, "naive");
                assert_eq!(d.right_kernel, "broken");
                assert_eq!(d.left.0 ^ d.right.0, 0x0100_0000);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rejection_is_reported() {
        let err = compare_color_shift(&Simd, &Naive, &[], ChannelWeights::IDENTITY).unwrap_err();
        assert_eq!(
            err,
            Mismatch::Rejected {
                kernel: "simd",
                error: SizeError::NotPixelAligned
            }
        );
    }

    #[test]
    fn default_copy_case_is_exact() {
        for alignment in Alignment::ALL {
            let case = CopyCase::new(CopyCase::DEFAULT_LEN, alignment);
            let dst = run_copy(&Simd, case).unwrap();
            assert_eq!(dst.len(), 160_000);
            assert!(dst.iter().all(|&v| v == 10.0));
            compare_copy(&Simd, &Naive, case).unwrap();
        }
    }

    #[test]
    fn copy_is_alignment_independent() {
        for len in [1, 7, 8, 9, 33, 4096] {
            compare_copy_alignments(&Simd, CopyCase::new(len, Alignment::Natural)).unwrap();
        }
    }

    #[test]
    fn short_copy_is_caught() {
        let err = compare_copy(&Naive, &Broken, CopyCase::new(12, Alignment::Simd16)).unwrap_err();
        assert_eq!(
            err,
            Mismatch::Value(Divergence {
                index: 11,
                left_kernel: "source",
                left: 10.0,
                right_kernel: "broken",
                right: 0.0,
            })
        );
    }

    #[test]
    fn display_is_readable() {
        let m = Mismatch::Rejected {
            kernel: "simd",
            error: SizeError::LengthMismatch,
        };
        let s = alloc::format!("{m}");
        assert!(s.starts_with("simd rejected input"));
    }
}
