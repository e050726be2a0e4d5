//! x87 Floating-Point Register Stack.
//!
//! This module implements the eight-slot x87 register stack. It performs the following:
//! 1. **Storage:** Eight physical slots, each an `f64` optionally paired with an exact `i64`.
//! 2. **Stack Addressing:** `ST(i)` is physical slot `(TOP + i) mod 8`; push and pop rotate `TOP`.
//! 3. **Tagging:** Per-slot class (valid, zero, special, empty) plus the exact-int64 marker.
//!
//! Values are held in double precision rather than the 80-bit hardware format.
//! The exact-int64 shadow exists so that `FILD m64` followed by `FISTP m64`
//! reproduces integers that do not fit in a 53-bit significand.

use crate::core::arch::fcw::ControlWord;
use crate::core::units::fpu::rounding_modes::RoundingControl;

/// Number of physical registers in the stack.
pub const STACK_DEPTH: usize = 8;

/// Mask applied to `TOP` and physical slot indices.
const TOP_MASK: u8 = 0b111;

/// Bit position of the TOP field in the status word.
const FSW_TOP_SHIFT: u16 = 11;

/// Value classification of a physical register, as encoded in the tag word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TagClass {
    /// Finite, non-zero, normal value.
    Valid = 0b00,
    /// Positive or negative zero.
    Zero = 0b01,
    /// NaN, infinity or denormal.
    Special = 0b10,
    /// No value; available for a push.
    Empty = 0b11,
}

impl TagClass {
    /// Classifies a value about to be written into a register.
    pub fn classify(value: f64) -> Self {
        if value == 0.0 {
            Self::Zero
        } else if value.is_nan() || value.is_infinite() || value.is_subnormal() {
            Self::Special
        } else {
            Self::Valid
        }
    }
}

/// Full tag of a physical register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag {
    /// Liveness and value class.
    pub class: TagClass,
    /// The slot carries the exact 64-bit integer it was loaded from.
    pub exact_int64: bool,
}

/// Contents of one physical register.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SlotValue {
    /// A plain double-precision value.
    Real(f64),
    /// A value loaded by `FILD m64`, together with the integer it came from.
    ExactInt64 {
        /// Rounded double-precision view used by everything except `FISTP m64`.
        real: f64,
        /// The integer as loaded, bit for bit.
        raw: i64,
    },
}

impl SlotValue {
    /// Returns the floating-point view of the slot.
    #[inline]
    pub const fn real(self) -> f64 {
        match self {
            Self::Real(v) | Self::ExactInt64 { real: v, .. } => v,
        }
    }

    /// Returns the exact integer if the slot holds one.
    #[inline]
    pub const fn exact_int64(self) -> Option<i64> {
        match self {
            Self::Real(_) => None,
            Self::ExactInt64 { raw, .. } => Some(raw),
        }
    }
}

/// x87 register stack and control state.
///
/// One instance exists per virtual CPU; handlers receive it by `&mut`.
#[derive(Clone, Debug)]
pub struct FpuState {
    slots: [SlotValue; STACK_DEPTH],
    tags: [TagClass; STACK_DEPTH],
    top: u8,
    control: ControlWord,
}

impl Default for FpuState {
    fn default() -> Self {
        Self::new()
    }
}

impl FpuState {
    /// Creates an FPU in its `FINIT` state: all slots empty, `TOP = 0`, control word `0x037F`.
    pub fn new() -> Self {
        Self::with_control_word(ControlWord::default())
    }

    /// Creates an FPU in its `FINIT` state with a specific control word.
    pub fn with_control_word(control: ControlWord) -> Self {
        Self {
            slots: [SlotValue::Real(0.0); STACK_DEPTH],
            tags: [TagClass::Empty; STACK_DEPTH],
            top: 0,
            control,
        }
    }

    /// Re-initialises to the `FINIT` state, control word included.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the physical slot currently addressed as `ST(0)`.
    #[inline]
    pub const fn top(&self) -> u8 {
        self.top
    }

    /// Maps a stack-relative index to a physical slot.
    #[inline]
    pub const fn physical(&self, i: u8) -> usize {
        (self.top.wrapping_add(i) & TOP_MASK) as usize
    }

    /// Pushes a value: `TOP` is decremented, then the new `ST(0)` is written and tagged.
    ///
    /// Any exact-int64 shadow left in the slot is discarded.
    pub fn push(&mut self, value: f64) {
        self.top = self.top.wrapping_sub(1) & TOP_MASK;
        let slot = self.top as usize;
        self.slots[slot] = SlotValue::Real(value);
        self.tags[slot] = TagClass::classify(value);
    }

    /// Pops the stack: `ST(0)` is tagged empty, then `TOP` is incremented.
    ///
    /// The popped value is not returned; read it with [`FpuState::read`] first.
    pub fn pop(&mut self) {
        let slot = self.top as usize;
        self.slots[slot] = SlotValue::Real(self.slots[slot].real());
        self.tags[slot] = TagClass::Empty;
        self.top = self.top.wrapping_add(1) & TOP_MASK;
    }

    /// Returns the value of `ST(i)`.
    #[inline]
    pub fn read(&self, i: u8) -> f64 {
        self.slots[self.physical(i)].real()
    }

    /// Returns the full contents of `ST(i)`.
    #[inline]
    pub fn slot(&self, i: u8) -> SlotValue {
        self.slots[self.physical(i)]
    }

    /// Records the exact integer `ST(i)` was loaded from and marks the slot's tag.
    pub fn set_shadow_int64(&mut self, i: u8, raw: i64) {
        let slot = self.physical(i);
        let real = self.slots[slot].real();
        self.slots[slot] = SlotValue::ExactInt64 { real, raw };
    }

    /// Returns the exact integer behind `ST(i)`, if the tag says one is present.
    #[inline]
    pub fn shadow_int64(&self, i: u8) -> Option<i64> {
        self.slots[self.physical(i)].exact_int64()
    }

    /// Returns the tag of `ST(i)`.
    pub fn tag(&self, i: u8) -> Tag {
        self.physical_tag(self.physical(i))
    }

    /// Returns the tag of a physical slot (0-7).
    pub fn physical_tag(&self, slot: usize) -> Tag {
        let slot = slot & TOP_MASK as usize;
        Tag {
            class: self.tags[slot],
            exact_int64: self.slots[slot].exact_int64().is_some(),
        }
    }

    /// Returns the architectural tag word: two bits per physical slot, slot 0 in bits 1:0.
    pub fn tag_word(&self) -> u16 {
        self.tags
            .iter()
            .enumerate()
            .fold(0u16, |word, (slot, class)| word | ((*class as u16) << (slot * 2)))
    }

    /// Returns the status word with the TOP field populated.
    ///
    /// Condition codes and exception flags belong to instructions outside the
    /// load/store set and read back as zero.
    pub fn status_word(&self) -> u16 {
        u16::from(self.top) << FSW_TOP_SHIFT
    }

    /// Returns the control word.
    #[inline]
    pub const fn control_word(&self) -> ControlWord {
        self.control
    }

    /// Loads a new control word.
    pub fn set_control_word(&mut self, control: ControlWord) {
        self.control = control;
    }

    /// Returns the rounding mode integer stores use.
    #[inline]
    pub const fn rounding_control(&self) -> RoundingControl {
        self.control.rounding_control()
    }
}
