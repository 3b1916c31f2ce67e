//! # dye
//!
//! *Re-tint your pixels, then prove the fast path told the truth.*
//!
//! SIMD-accelerated per-channel weighting of packed 32-bit ARGB pixels, plus
//! f32 buffer copy and fill, with a naive reference implementation and an
//! equivalence oracle that checks one against the other. Supports x86-64
//! AVX2, ARM NEON, and WASM SIMD128 with automatic fallback to scalar code.
//!
//! ## Pixel layout
//!
//! A pixel is a `u32`. From the low byte up: alpha, green, red, blue
//! ([`ALPHA_MASK`], [`GREEN_MASK`], [`RED_MASK`], [`BLUE_MASK`]). Weighting
//! multiplies red, green and blue by their weight, truncates, and keeps the
//! low 8 bits. Nothing is clamped; a weight above ~2.0 wraps bright values.
//! Alpha is never touched.
//!
//! ```rust
//! use dye::{Argb, ChannelWeights};
//!
//! let w = ChannelWeights::new(0.5, 0.3, 1.0).unwrap();
//! let mut px = [Argb(0xFFAA_2040); 16];
//! dye::color_shift_pixels(&mut px, w).unwrap();
//! assert_eq!(px[0], Argb(0xFF55_0940));
//! ```
//!
//! ## Core operations (always available)
//!
//! The functions in the crate root work on raw `&mut [u8]` pixel bytes,
//! `&mut [Argb]`, and `&[f32]` slices. [`Kernel`] wraps them as
//! interchangeable strategies ([`Simd`], [`ScalarTier`], [`Naive`]) for the
//! [`oracle`] to compare.
//!
//! ## Feature flags
//!
//! - **`std`**: `std::error::Error` impls and runtime CPU detection.
//! - **`rgb`**: RGBA8 ↔ [`Argb`] conversions using [`rgb`] pixel types.
//! - **`imgref`**: Strided whole-image weighting on [`imgref`] buffers.
//!   Implies `rgb`.
//! - **`codec`**: Load and save images with the `image` crate, and the
//!   file-based [`fixture`]. Implies `std` and `rgb`.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod aligned;
mod error;
mod img;
mod pixel;
mod simd;
mod strategy;

pub mod oracle;

pub use aligned::{Alignment, FloatBuffer};
pub use error::{Channel, SizeError, WeightError};
pub use img::ArgbImage;
pub use pixel::{
    ALPHA_MASK, Argb, BLUE_MASK, ChannelWeights, GREEN_MASK, MAX_WEIGHT, RED_MASK,
};
pub use simd::{
    color_shift, color_shift_image, color_shift_pixels, color_shift_strided, copy_f32,
    fill_f32, fill_pair_f32,
};
pub use strategy::{Kernel, Naive, ScalarTier, Simd};

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod imgref;

#[cfg(feature = "codec")]
pub mod codec;

#[cfg(feature = "codec")]
pub mod fixture;
