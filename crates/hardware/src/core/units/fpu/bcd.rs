//! Packed BCD (`m80bcd`) encoding for `FBSTP`.
//!
//! Bytes 0-8 hold 18 decimal digits, two per byte, least significant byte
//! first and the lower digit in the low nibble. Byte 9 carries the sign in
//! bit 7 and, in its low nibble, whatever decimal digit of the magnitude is
//! left after the first 18 have been extracted (real hardware leaves those
//! bits zero).
//!
//! Digits are peeled off the magnitude with `floor(fmod(x, 10))` and a divide
//! by ten, without rounding `ST(0)` to an integer first.

/// Size of a packed BCD operand.
pub const BCD_BYTES: usize = 10;

/// Byte holding the sign bit.
const SIGN_BYTE: usize = 9;

/// Sign bit within byte 9.
const SIGN_BIT: u8 = 0x80;

/// Removes the lowest decimal digit from `x` and returns it.
#[inline]
fn next_digit(x: &mut f64) -> u8 {
    let digit = (*x % 10.0).floor();
    *x -= digit;
    *x /= 10.0;
    digit as u8
}

/// Encodes a value as a packed BCD operand.
///
/// # Examples
///
/// ```
/// use pcsim_core::core::units::fpu::bcd::encode_packed_bcd;
///
/// assert_eq!(
///     encode_packed_bcd(-12345.0),
///     [0x45, 0x23, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80]
/// );
/// ```
pub fn encode_packed_bcd(value: f64) -> [u8; BCD_BYTES] {
    let mut out = [0u8; BCD_BYTES];
    let mut x = value.abs();

    for byte in &mut out[..SIGN_BYTE] {
        let low = next_digit(&mut x);
        let high = next_digit(&mut x);
        *byte = low | (high << 4);
    }

    let mut last = (x % 10.0).floor() as u8;
    if value < 0.0 {
        last |= SIGN_BIT;
    }
    out[SIGN_BYTE] = last;
    out
}
