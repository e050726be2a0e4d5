//! x87 Control Word.
//!
//! Only the rounding-control field (bits 11:10) influences the load/store
//! path; the exception masks and precision control are carried verbatim.

use crate::config::defaults;
use crate::core::units::fpu::rounding_modes::RoundingControl;

/// Bit position of the RC field.
const RC_SHIFT: u16 = 10;

/// Mask of the RC field after shifting.
const RC_MASK: u16 = 0b11;

/// Bit position of the PC (precision control) field.
const PC_SHIFT: u16 = 8;

/// x87 FPU control word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlWord(pub u16);

impl Default for ControlWord {
    fn default() -> Self {
        Self(defaults::FPU_CONTROL_WORD)
    }
}

impl ControlWord {
    /// Returns the raw 16-bit value.
    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Decodes the rounding-control field.
    #[inline]
    pub const fn rounding_control(self) -> RoundingControl {
        RoundingControl::from_bits(((self.0 >> RC_SHIFT) & RC_MASK) as u8)
    }

    /// Returns a copy with the rounding-control field replaced.
    #[inline]
    pub const fn with_rounding_control(self, rc: RoundingControl) -> Self {
        Self((self.0 & !(RC_MASK << RC_SHIFT)) | ((rc as u16) << RC_SHIFT))
    }

    /// Returns the raw precision-control field (0 = 24-bit, 2 = 53-bit, 3 = 64-bit).
    #[inline]
    pub const fn precision_control(self) -> u8 {
        ((self.0 >> PC_SHIFT) & 0b11) as u8
    }
}
