//! Operand format codec.
//!
//! Pure conversions between the memory encodings an x87 load/store can name
//! and the FPU's internal `f64`:
//!
//! | Format   | Bytes | Store                                    | Load              |
//! |----------|-------|------------------------------------------|-------------------|
//! | int16    | 2     | round to i64, keep the low 16 bits       | sign-extend       |
//! | int32    | 4     | round to i64, keep the low 32 bits       | sign-extend       |
//! | int64    | 8     | round to i64 (or replay the exact value) | convert, keep raw |
//! | single   | 4     | narrow to `f32`                          | widen             |
//! | double   | 8     | bit copy                                 | bit copy          |
//! | extended | 10    | see [`super::extended`]                  |                   |
//!
//! Narrow integer stores truncate; they never saturate. Guest code that stores
//! an out-of-range value to a word sees the low bits of the rounded integer.

use std::fmt;

/// Width of an integer memory operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// `m16int` (word integer).
    W16,
    /// `m32int` (short integer).
    W32,
    /// `m64int` (long integer).
    W64,
}

impl IntWidth {
    /// Operand size in bytes.
    #[inline]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::W16 => 2,
            Self::W32 => 4,
            Self::W64 => 8,
        }
    }

    /// Operand size in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.bytes() * 8
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}int", self.bits())
    }
}

/// Encoding of a real memory operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RealFormat {
    /// `m32fp`, IEEE-754 binary32.
    Single,
    /// `m64fp`, IEEE-754 binary64.
    Double,
    /// `m80fp`, x87 double-extended.
    Extended,
}

impl RealFormat {
    /// Operand size in bytes.
    #[inline]
    pub const fn bytes(self) -> u32 {
        match self {
            Self::Single => 4,
            Self::Double => 8,
            Self::Extended => 10,
        }
    }
}

impl fmt::Display for RealFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}fp", self.bytes() * 8)
    }
}

/// Integer widths a non-popping `FIST` can store. There is no `FIST m64int`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FistWidth {
    /// `m16int`.
    W16,
    /// `m32int`.
    W32,
}

impl FistWidth {
    /// The general operand width.
    #[inline]
    pub const fn widen(self) -> IntWidth {
        match self {
            Self::W16 => IntWidth::W16,
            Self::W32 => IntWidth::W32,
        }
    }
}

impl fmt::Display for FistWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.widen().fmt(f)
    }
}

/// Real formats a non-popping `FST` can store. There is no `FST m80fp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FstFormat {
    /// `m32fp`.
    Single,
    /// `m64fp`.
    Double,
}

impl FstFormat {
    /// The general operand format.
    #[inline]
    pub const fn widen(self) -> RealFormat {
        match self {
            Self::Single => RealFormat::Single,
            Self::Double => RealFormat::Double,
        }
    }
}

impl fmt::Display for FstFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.widen().fmt(f)
    }
}

/// Sign-extends a raw little-endian integer operand of `width` and widens it to `f64`.
///
/// Exact for 16- and 32-bit operands; 64-bit operands round to nearest.
#[inline]
pub fn decode_int(width: IntWidth, raw: u64) -> f64 {
    sign_extend(width, raw) as f64
}

/// Reinterprets the low `width` bits of `raw` as a signed integer.
#[inline]
pub const fn sign_extend(width: IntWidth, raw: u64) -> i64 {
    match width {
        IntWidth::W16 => raw as u16 as i16 as i64,
        IntWidth::W32 => raw as u32 as i32 as i64,
        IntWidth::W64 => raw as i64,
    }
}

/// Truncates an already-rounded integer to the operand width.
///
/// The result holds the low `width` bits; higher bits are zero.
#[inline]
pub const fn encode_int(width: IntWidth, rounded: i64) -> u64 {
    match width {
        IntWidth::W16 => rounded as u16 as u64,
        IntWidth::W32 => rounded as u32 as u64,
        IntWidth::W64 => rounded as u64,
    }
}

/// Widens an `m32fp` bit pattern.
#[inline]
pub fn decode_f32(bits: u32) -> f64 {
    f64::from(f32::from_bits(bits))
}

/// Narrows a value to `m32fp` (round to nearest) and returns its bit pattern.
#[inline]
pub fn encode_f32(value: f64) -> u32 {
    (value as f32).to_bits()
}

/// Reinterprets an `m64fp` bit pattern. The internal format is binary64, so this is a bit copy.
#[inline]
pub const fn decode_f64(bits: u64) -> f64 {
    f64::from_bits(bits)
}

/// Returns the `m64fp` bit pattern of a value. A bit copy.
#[inline]
pub const fn encode_f64(value: f64) -> u64 {
    value.to_bits()
}
