//! x87 double-extended (`m80fp`) conversion.
//!
//! Memory layout (little-endian, 10 bytes):
//!
//! | Bytes | Field                                              |
//! |-------|----------------------------------------------------|
//! | 0-7   | 64-bit significand with explicit integer bit (63)  |
//! | 8-9   | bit 15: sign, bits 14:0: exponent (bias 16383)     |
//!
//! Loads narrow to `f64` with round-to-nearest-even on the 11 dropped
//! significand bits, producing denormals, zero or infinity when the exponent
//! leaves double range. Stores are exact: every `f64` (denormals included)
//! has an `m80fp` encoding.

/// Exponent bias of the extended format.
const F80_BIAS: i32 = 16383;

/// Exponent bias of binary64.
const F64_BIAS: i32 = 1023;

/// All-ones extended exponent (infinity / NaN).
const F80_EXP_MAX: u16 = 0x7FFF;

/// All-ones binary64 exponent.
const F64_EXP_MAX: u64 = 0x7FF;

/// Explicit integer bit of the extended significand.
const F80_INTEGER_BIT: u64 = 1 << 63;

/// Binary64 fraction field.
const F64_FRACTION_MASK: u64 = (1 << 52) - 1;

/// Binary64 quiet-NaN bit.
const F64_QUIET_BIT: u64 = 1 << 51;

/// Significand bits dropped when narrowing 64 → 53 bits.
const NARROW_SHIFT: u32 = 11;

/// An `m80fp` value split into its two memory fields.
///
/// The load/store unit moves the fields as a `u64` at the operand address
/// and a `u16` at offset 8.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Float80 {
    /// Significand including the explicit integer bit.
    pub significand: u64,
    /// Sign (bit 15) and biased exponent (bits 14:0).
    pub sign_exponent: u16,
}

impl Float80 {
    #[inline]
    const fn negative(self) -> bool {
        self.sign_exponent & 0x8000 != 0
    }

    #[inline]
    const fn exponent(self) -> u16 {
        self.sign_exponent & F80_EXP_MAX
    }

    /// Converts to `f64`, rounding to nearest-even.
    pub fn to_f64(self) -> f64 {
        let sign = u64::from(self.negative()) << 63;
        let exp = self.exponent();
        let sig = self.significand;

        if exp == F80_EXP_MAX {
            let fraction = sig & !F80_INTEGER_BIT;
            if fraction == 0 {
                return f64::from_bits(sign | (F64_EXP_MAX << 52));
            }
            // Keep the top payload bits; a payload that only lived in the
            // dropped bits still has to stay a NaN.
            let mut payload = (fraction >> NARROW_SHIFT) & F64_FRACTION_MASK;
            if payload == 0 {
                payload = F64_QUIET_BIT;
            }
            return f64::from_bits(sign | (F64_EXP_MAX << 52) | payload);
        }
        if sig == 0 {
            return f64::from_bits(sign);
        }

        // Denormals and pseudo-denormals share the exponent of the smallest normal.
        let effective_exp = if exp == 0 { 1 } else { i32::from(exp) };
        let lz = sig.leading_zeros();
        let norm = sig << lz;
        let biased = effective_exp - F80_BIAS - lz as i32 + F64_BIAS;

        if biased >= F64_EXP_MAX as i32 {
            return f64::from_bits(sign | (F64_EXP_MAX << 52));
        }

        let (shift, exp_field) = if biased >= 1 {
            (NARROW_SHIFT, biased as u64)
        } else {
            (NARROW_SHIFT + (1 - biased) as u32, 0)
        };
        if shift > 64 {
            return f64::from_bits(sign);
        }

        let wide = u128::from(norm);
        let kept = (wide >> shift) as u64;
        let rem = wide & ((1u128 << shift) - 1);
        let half = 1u128 << (shift - 1);

        // The integer bit survives for normals and is folded into the exponent.
        let mantissa = if exp_field == 0 {
            kept
        } else {
            kept & F64_FRACTION_MASK
        };
        let mut bits = (exp_field << 52) | mantissa;
        if rem > half || (rem == half && bits & 1 == 1) {
            // A carry out of the fraction bumps the exponent, up to infinity.
            bits += 1;
        }
        f64::from_bits(sign | bits)
    }

    /// Converts an `f64` exactly.
    pub fn from_f64(value: f64) -> Self {
        let bits = value.to_bits();
        let sign = if bits >> 63 == 1 { 0x8000u16 } else { 0 };
        let exp = (bits >> 52) & F64_EXP_MAX;
        let fraction = bits & F64_FRACTION_MASK;

        if exp == F64_EXP_MAX {
            let significand = if fraction == 0 {
                F80_INTEGER_BIT
            } else {
                F80_INTEGER_BIT | (fraction << NARROW_SHIFT)
            };
            return Self {
                significand,
                sign_exponent: sign | F80_EXP_MAX,
            };
        }
        if exp == 0 {
            if fraction == 0 {
                return Self {
                    significand: 0,
                    sign_exponent: sign,
                };
            }
            // Denormal doubles are normal in the wider exponent range.
            let lz = fraction.leading_zeros();
            let e = F80_BIAS - 1074 + 63 - lz as i32;
            return Self {
                significand: fraction << lz,
                sign_exponent: sign | e as u16,
            };
        }

        let e = exp as i32 - F64_BIAS + F80_BIAS;
        Self {
            significand: F80_INTEGER_BIT | (fraction << NARROW_SHIFT),
            sign_exponent: sign | e as u16,
        }
    }
}
