//! x87 rounding control.
//!
//! The RC field of the control word selects how `FIST`/`FISTP` turn a real
//! into an integer:
//!
//! | RC   | Mode    | Description                      |
//! |------|---------|----------------------------------|
//! | 0b00 | Nearest | Round to nearest, ties to even   |
//! | 0b01 | Down    | Round towards −∞                 |
//! | 0b10 | Up      | Round towards +∞                 |
//! | 0b11 | Chop    | Round towards zero (truncate)    |
//!
//! Integer stores obtain their rounding through the [`RoundToInteger`] trait so
//! that a caller can substitute its own policy; [`RoundingControl`] is the
//! implementation driven by the control word.

/// Integer produced for NaN or out-of-range operands ("integer indefinite").
pub const INTEGER_INDEFINITE: i64 = i64::MIN;

/// Lower bound (inclusive) of reals that fit an `i64` after rounding: -2^63.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;

/// Upper bound (exclusive) of reals that fit an `i64` after rounding: 2^63.
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// Rounds a real to a 64-bit integer.
pub trait RoundToInteger {
    /// Rounds `value`; NaN and values outside the `i64` range give [`INTEGER_INDEFINITE`].
    fn round_to_integer(&self, value: f64) -> i64;
}

/// x87 rounding-control encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum RoundingControl {
    /// Round to nearest, ties to even (reset default).
    #[default]
    Nearest = 0b00,
    /// Round down, towards −∞.
    Down = 0b01,
    /// Round up, towards +∞.
    Up = 0b10,
    /// Chop, towards zero.
    Chop = 0b11,
}

impl RoundingControl {
    /// Decodes a 2-bit RC field. Upper bits are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Self::Nearest,
            0b01 => Self::Down,
            0b10 => Self::Up,
            _ => Self::Chop,
        }
    }

    /// Applies the rounding mode without converting to an integer.
    pub fn round(self, value: f64) -> f64 {
        match self {
            Self::Nearest => value.round_ties_even(),
            Self::Down => value.floor(),
            Self::Up => value.ceil(),
            Self::Chop => value.trunc(),
        }
    }
}

impl RoundToInteger for RoundingControl {
    fn round_to_integer(&self, value: f64) -> i64 {
        let rounded = self.round(value);
        if rounded.is_nan() || !(I64_MIN_F64..I64_END_F64).contains(&rounded) {
            return INTEGER_INDEFINITE;
        }
        rounded as i64
    }
}
