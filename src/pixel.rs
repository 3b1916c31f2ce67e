//! The 32-bit ARGB pixel word and the per-channel weight triple.
//!
//! Channel positions follow the word's bit masks, low byte first:
//! alpha, green, red, blue.
//!
//! ```rust
//! use dye::{Argb, ChannelWeights};
//!
//! let px = Argb::from_channels(0xFF, 0xAA, 0x20, 0x40);
//! let w = ChannelWeights::new(0.5, 0.3, 1.0).unwrap();
//! assert_eq!(px.color_shifted(w), Argb::from_channels(0xFF, 0x55, 0x09, 0x40));
//! ```

use core::fmt;

use bytemuck::{Pod, Zeroable};

use crate::error::{Channel, WeightError};

pub const ALPHA_MASK: u32 = 0x0000_00FF;
pub const GREEN_MASK: u32 = 0x0000_FF00;
pub const RED_MASK: u32 = 0x00FF_0000;
pub const BLUE_MASK: u32 = 0xFF00_0000;

pub(crate) const GREEN_SHIFT: u32 = 8;
pub(crate) const RED_SHIFT: u32 = 16;
pub(crate) const BLUE_SHIFT: u32 = 24;

/// Largest accepted channel weight.
///
/// `255.0 * MAX_WEIGHT` stays below `i32::MAX`, the range in which every
/// SIMD float→int truncation matches the scalar `as u32` cast.
pub const MAX_WEIGHT: f32 = 65536.0;

/// One ARGB pixel held as a native-endian `u32`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
#[repr(transparent)]
pub struct Argb(pub u32);

impl Argb {
    #[inline]
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(
            a as u32
                | (g as u32) << GREEN_SHIFT
                | (r as u32) << RED_SHIFT
                | (b as u32) << BLUE_SHIFT,
        )
    }

    #[inline]
    pub const fn a(self) -> u8 {
        (self.0 & ALPHA_MASK) as u8
    }

    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 & RED_MASK) >> RED_SHIFT) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 & GREEN_MASK) >> GREEN_SHIFT) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        ((self.0 & BLUE_MASK) >> BLUE_SHIFT) as u8
    }

    /// Apply the channel weighting to this one pixel.
    ///
    /// Each of R, G, B becomes `trunc(channel * weight) & 0xFF`. Results above
    /// 255 wrap; they are not clamped. Alpha is copied through.
    #[inline]
    pub fn color_shifted(self, weights: ChannelWeights) -> Self {
        Self(shift_word(self.0, weights))
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb(0x{:08X})", self.0)
    }
}

impl From<u32> for Argb {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

impl From<Argb> for u32 {
    fn from(px: Argb) -> Self {
        px.0
    }
}

#[inline(always)]
pub(crate) fn weigh(channel: u32, weight: f32) -> u32 {
    ((channel as f32 * weight) as u32) & 0xFF
}

#[inline(always)]
pub(crate) fn shift_word(v: u32, w: ChannelWeights) -> u32 {
    let r = weigh((v & RED_MASK) >> RED_SHIFT, w.red);
    let g = weigh((v & GREEN_MASK) >> GREEN_SHIFT, w.green);
    let b = weigh(v >> BLUE_SHIFT, w.blue);
    (v & ALPHA_MASK) | (r << RED_SHIFT) | (g << GREEN_SHIFT) | (b << BLUE_SHIFT)
}

/// Red, green and blue multipliers, each finite and in `0.0..=MAX_WEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelWeights {
    red: f32,
    green: f32,
    blue: f32,
}

impl ChannelWeights {
    /// Leaves every channel as it is.
    pub const IDENTITY: Self = Self {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
    };

    /// Halve red, cut green to 30 %, keep blue.
    pub const WARM_DOWN: Self = Self {
        red: 0.5,
        green: 0.3,
        blue: 1.0,
    };

    pub fn new(red: f32, green: f32, blue: f32) -> Result<Self, WeightError> {
        check_weight(Channel::Red, red)?;
        check_weight(Channel::Green, green)?;
        check_weight(Channel::Blue, blue)?;
        Ok(Self { red, green, blue })
    }

    #[inline]
    pub fn red(&self) -> f32 {
        self.red
    }

    #[inline]
    pub fn green(&self) -> f32 {
        self.green
    }

    #[inline]
    pub fn blue(&self) -> f32 {
        self.blue
    }
}

impl Default for ChannelWeights {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[inline]
fn check_weight(channel: Channel, value: f32) -> Result<(), WeightError> {
    // NaN fails both comparisons.
    if value >= 0.0 && value <= MAX_WEIGHT {
        Ok(())
    } else {
        Err(WeightError { channel, value })
    }
}
