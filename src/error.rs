use core::fmt;

/// Buffer geometry rejected by a kernel entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SizeError {
    /// Buffer is empty or its length is not a multiple of 4 bytes.
    NotPixelAligned,
    /// Destination (or image buffer) is shorter than the data it must hold.
    LengthMismatch,
    /// Zero width/height, `stride < width * 4`, or an overflowing extent.
    InvalidStride,
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPixelAligned => f.write_str("buffer length is not a whole number of pixels"),
            Self::LengthMismatch => f.write_str("buffer is too short for the requested extent"),
            Self::InvalidStride => f.write_str("invalid width, height or stride"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SizeError {}

/// A channel weight outside `0.0..=MAX_WEIGHT`, or not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightError {
    pub channel: Channel,
    pub value: f32,
}

/// One of the three weighted color channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        })
    }
}

impl fmt::Display for WeightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} weight {} is outside 0.0..={}",
            self.channel,
            self.value,
            crate::MAX_WEIGHT
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for WeightError {}
