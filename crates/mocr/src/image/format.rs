//! Pixel format table for raw image buffers.
//!
//! This module provides the [`PixelFormat`] enum mapping each supported
//! layout to its bit width and the mode string understood by the embedded
//! image constructor.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Pixel layout of a raw image buffer.
///
/// The mode string of every variant is handed verbatim to the embedded
/// image constructor, which performs all interpretation; no variant
/// reinterprets pixel data or converts between color spaces on the Rust
/// side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
pub enum PixelFormat {
    /// 1-bit monochrome, packed eight pixels per byte ("1")
    #[strum(serialize = "1")]
    Bit1,
    /// 8-bit grayscale ("L")
    #[strum(serialize = "L")]
    Luma8,
    /// 8-bit palette indices ("P")
    #[strum(serialize = "P")]
    Palette8,
    /// 24-bit true color ("RGB")
    #[strum(serialize = "RGB")]
    Rgb24,
    /// 32-bit true color with alpha ("RGBA")
    #[strum(serialize = "RGBA")]
    Rgba32,
    /// 32-bit prepress separation ("CMYK")
    #[strum(serialize = "CMYK")]
    Cmyk32,
    /// 24-bit luma/chroma video color ("YCbCr")
    #[strum(serialize = "YCbCr")]
    YCbCr24,
    /// 24-bit CIE L*a*b* ("LAB")
    #[strum(serialize = "LAB")]
    Lab24,
    /// 24-bit hue/saturation/value ("HSV")
    #[strum(serialize = "HSV")]
    Hsv24,
    /// 32-bit signed integer pixels ("I")
    #[strum(serialize = "I")]
    Int32,
    /// 32-bit floating point pixels ("F")
    #[strum(serialize = "F")]
    Float32,
}

impl PixelFormat {
    /// Mode string understood by the embedded image constructor.
    #[must_use]
    pub fn mode(self) -> &'static str {
        match self {
            Self::Bit1 => "1",
            Self::Luma8 => "L",
            Self::Palette8 => "P",
            Self::Rgb24 => "RGB",
            Self::Rgba32 => "RGBA",
            Self::Cmyk32 => "CMYK",
            Self::YCbCr24 => "YCbCr",
            Self::Lab24 => "LAB",
            Self::Hsv24 => "HSV",
            Self::Int32 => "I",
            Self::Float32 => "F",
        }
    }

    /// Bits consumed by one pixel in this format.
    #[must_use]
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Bit1 => 1,
            Self::Luma8 | Self::Palette8 => 8,
            Self::Rgb24 | Self::YCbCr24 | Self::Lab24 | Self::Hsv24 => 24,
            Self::Rgba32 | Self::Cmyk32 | Self::Int32 | Self::Float32 => 32,
        }
    }

    /// Bytes a `width` x `height` buffer in this format must hold.
    ///
    /// The bit total is rounded up to whole bytes, so sub-byte formats pay
    /// for a trailing partial byte. The multiplication saturates instead of
    /// overflowing at dimensions no real buffer can reach.
    #[must_use]
    pub fn byte_len(self, width: u32, height: u32) -> u64 {
        let pixels = u64::from(width) * u64::from(height);
        pixels
            .saturating_mul(u64::from(self.bits_per_pixel()))
            .div_ceil(8)
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_table_is_total() {
        for format in PixelFormat::iter() {
            assert!(format.bits_per_pixel() > 0);
            assert!(!format.mode().is_empty());
            assert_eq!(format.mode(), format.as_ref());
        }
    }

    #[test]
    fn test_byte_len_matches_the_table() {
        assert_eq!(PixelFormat::Luma8.byte_len(640, 480), 307_200);
        assert_eq!(PixelFormat::Rgb24.byte_len(4, 4), 48);
        assert_eq!(PixelFormat::Rgba32.byte_len(2, 3), 24);
        assert_eq!(PixelFormat::YCbCr24.byte_len(16, 8), 384);
        assert_eq!(PixelFormat::Float32.byte_len(10, 10), 400);
    }

    #[test]
    fn test_byte_len_rounds_partial_bytes_up() {
        assert_eq!(PixelFormat::Bit1.byte_len(1, 1), 1);
        assert_eq!(PixelFormat::Bit1.byte_len(8, 1), 1);
        assert_eq!(PixelFormat::Bit1.byte_len(9, 1), 2);
        assert_eq!(PixelFormat::Bit1.byte_len(13, 7), 12);
    }

    #[test]
    fn test_byte_len_saturates_at_absurd_dimensions() {
        let len = PixelFormat::Float32.byte_len(u32::MAX, u32::MAX);
        assert_eq!(len, u64::MAX.div_ceil(8));
    }

    #[test]
    fn test_zero_dimensions_need_no_bytes() {
        assert_eq!(PixelFormat::Rgb24.byte_len(0, 480), 0);
        assert_eq!(PixelFormat::Bit1.byte_len(640, 0), 0);
    }

    #[test]
    fn test_from_str_round_trips() {
        use std::str::FromStr;

        for format in PixelFormat::iter() {
            assert_eq!(PixelFormat::from_str(format.mode()).unwrap(), format);
        }
        assert!(PixelFormat::from_str("BGR").is_err());
    }
}
