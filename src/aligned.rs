//! Owned `f32` buffers with a chosen start-address alignment.
//!
//! Over-aligned storage is a `Vec` of `#[repr(align)]` lanes viewed as `f32`
//! through bytemuck, so no allocator calls are made by hand and the memory is
//! released on drop.
//!
//! ```rust
//! use dye::{Alignment, FloatBuffer};
//!
//! let buf = FloatBuffer::filled(160_000, 10.0, Alignment::Simd16);
//! assert!(buf.is_aligned_to(16));
//! assert!(buf.iter().all(|&v| v == 10.0));
//! ```

use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use bytemuck::{Pod, Zeroable};

/// Start-address alignment of a [`FloatBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Whatever the allocator gives a `Vec<f32>` (4 bytes).
    #[default]
    Natural,
    /// 16 bytes (SSE / NEON / SIMD128 vector width).
    Simd16,
    /// 32 bytes (AVX2 vector width).
    Simd32,
}

impl Alignment {
    pub const ALL: [Alignment; 3] = [Alignment::Natural, Alignment::Simd16, Alignment::Simd32];

    /// Guaranteed alignment in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            Self::Natural => core::mem::align_of::<f32>(),
            Self::Simd16 => 16,
            Self::Simd32 => 32,
        }
    }

    /// The smallest alignment that guarantees `bytes`, if one exists.
    pub const fn at_least(bytes: usize) -> Option<Self> {
        if bytes <= 4 {
            Some(Self::Natural)
        } else if bytes <= 16 {
            Some(Self::Simd16)
        } else if bytes <= 32 {
            Some(Self::Simd32)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C, align(16))]
struct Lane16([f32; 4]);

#[derive(Clone, Copy, Pod, Zeroable)]
#[repr(C, align(32))]
struct Lane32([f32; 8]);

#[derive(Clone)]
enum Storage {
    Natural(Vec<f32>),
    Simd16(Vec<Lane16>),
    Simd32(Vec<Lane32>),
}

/// A fixed-length `f32` buffer whose first element sits on an
/// [`Alignment`] boundary. Dereferences to `[f32]`.
#[derive(Clone)]
pub struct FloatBuffer {
    storage: Storage,
    len: usize,
}

impl FloatBuffer {
    /// A zeroed buffer of `len` elements. Aborts if allocation fails.
    pub fn new(len: usize, alignment: Alignment) -> Self {
        let storage = match alignment {
            Alignment::Natural => Storage::Natural(alloc::vec![0.0; len]),
            Alignment::Simd16 => Storage::Simd16(alloc::vec![Lane16::zeroed(); len.div_ceil(4)]),
            Alignment::Simd32 => Storage::Simd32(alloc::vec![Lane32::zeroed(); len.div_ceil(8)]),
        };
        Self { storage, len }
    }

    /// Like [`new`](Self::new), but reports allocation failure instead of aborting.
    pub fn try_new(len: usize, alignment: Alignment) -> Result<Self, TryReserveError> {
        let storage = match alignment {
            Alignment::Natural => Storage::Natural(try_zeroed(len)?),
            Alignment::Simd16 => Storage::Simd16(try_zeroed(len.div_ceil(4))?),
            Alignment::Simd32 => Storage::Simd32(try_zeroed(len.div_ceil(8))?),
        };
        Ok(Self { storage, len })
    }

    /// A buffer of `len` copies of `value`.
    pub fn filled(len: usize, value: f32, alignment: Alignment) -> Self {
        let mut buf = Self::new(len, alignment);
        crate::fill_f32(&mut buf, value);
        buf
    }

    pub fn alignment(&self) -> Alignment {
        match self.storage {
            Storage::Natural(_) => Alignment::Natural,
            Storage::Simd16(_) => Alignment::Simd16,
            Storage::Simd32(_) => Alignment::Simd32,
        }
    }

    /// Whether the first element's address is a multiple of `bytes`.
    pub fn is_aligned_to(&self, bytes: usize) -> bool {
        bytes != 0 && (self.as_slice().as_ptr() as usize).is_multiple_of(bytes)
    }

    pub fn as_slice(&self) -> &[f32] {
        let all: &[f32] = match &self.storage {
            Storage::Natural(v) => v,
            Storage::Simd16(v) => bytemuck::cast_slice(v),
            Storage::Simd32(v) => bytemuck::cast_slice(v),
        };
        &all[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        let all: &mut [f32] = match &mut self.storage {
            Storage::Natural(v) => v,
            Storage::Simd16(v) => bytemuck::cast_slice_mut(v),
            Storage::Simd32(v) => bytemuck::cast_slice_mut(v),
        };
        &mut all[..self.len]
    }
}

fn try_zeroed<T: Zeroable + Clone>(n: usize) -> Result<Vec<T>, TryReserveError> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)?;
    v.resize(n, T::zeroed());
    Ok(v)
}

impl Deref for FloatBuffer {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        self.as_slice()
    }
}

impl DerefMut for FloatBuffer {
    fn deref_mut(&mut self) -> &mut [f32] {
        self.as_mut_slice()
    }
}

impl core::fmt::Debug for FloatBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FloatBuffer")
            .field("len", &self.len)
            .field("alignment", &self.alignment())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_is_honoured() {
        for len in [1, 3, 4, 5, 8, 9, 1000, 160_000] {
            for a in Alignment::ALL {
                let buf = FloatBuffer::new(len, a);
                assert_eq!(buf.len(), len);
                assert_eq!(buf.alignment(), a);
                assert!(buf.is_aligned_to(a.bytes()), "len={len} {a:?}");
                assert!(buf.iter().all(|&v| v == 0.0));
            }
        }
    }

    #[test]
    fn try_new_matches_new() {
        let buf = FloatBuffer::try_new(37, Alignment::Simd32).unwrap();
        assert_eq!(buf.len(), 37);
        assert!(buf.is_aligned_to(32));
    }

    #[test]
    fn try_new_reports_impossible_sizes() {
        assert!(FloatBuffer::try_new(usize::MAX, Alignment::Natural).is_err());
        assert!(FloatBuffer::try_new(usize::MAX, Alignment::Simd16).is_err());
    }

    #[test]
    fn writes_stay_within_len() {
        let mut buf = FloatBuffer::new(5, Alignment::Simd16);
        buf.as_mut_slice().copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(&buf[..], &[1.0, 2.0, 3.0, 4.0, 5.0]);
        let copy = buf.clone();
        assert_eq!(copy.as_slice(), buf.as_slice());
    }

    #[test]
    fn empty_buffer() {
        for a in Alignment::ALL {
            let buf = FloatBuffer::new(0, a);
            assert!(buf.is_empty());
        }
    }

    #[test]
    fn at_least_picks_smallest() {
        assert_eq!(Alignment::at_least(1), Some(Alignment::Natural));
        assert_eq!(Alignment::at_least(16), Some(Alignment::Simd16));
        assert_eq!(Alignment::at_least(17), Some(Alignment::Simd32));
        assert_eq!(Alignment::at_least(64), None);
    }
}
