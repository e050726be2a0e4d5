//! Rounding control tests.
//!
//! `FIST`/`FISTP` round with the RC field of the control word; the trait seam
//! lets a caller substitute its own policy.

use crate::common::harness::{TestContext, ds, fistp32};
use pcsim_core::core::arch::fcw::ControlWord;
use pcsim_core::core::units::fpu::Fpu;
use pcsim_core::core::units::fpu::codec::IntWidth;
use pcsim_core::core::units::fpu::rounding_modes::{
    INTEGER_INDEFINITE, RoundToInteger, RoundingControl,
};
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Mode table
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(RoundingControl::Nearest, [2, -2, 2, -2, 4])]
#[case(RoundingControl::Down, [2, -3, 1, -2, 3])]
#[case(RoundingControl::Up, [3, -2, 2, -1, 4])]
#[case(RoundingControl::Chop, [2, -2, 1, -1, 3])]
fn integer_store_honours_rc(#[case] rc: RoundingControl, #[case] expected: [i32; 5]) {
    let inputs = [2.5, -2.5, 1.7, -1.7, 3.5];
    for (value, want) in inputs.into_iter().zip(expected) {
        let mut ctx = TestContext::new();
        ctx.cpu
            .fpu
            .set_control_word(ControlWord::default().with_rounding_control(rc));
        ctx.push(value);
        let _ = ctx.run(&fistp32(0x0100));
        assert_eq!(
            ctx.peek(0x0100, 4),
            want.to_le_bytes(),
            "{rc:?} rounding of {value}"
        );
    }
}

#[test]
fn rc_field_decodes_all_four_modes() {
    assert_eq!(RoundingControl::from_bits(0), RoundingControl::Nearest);
    assert_eq!(RoundingControl::from_bits(1), RoundingControl::Down);
    assert_eq!(RoundingControl::from_bits(2), RoundingControl::Up);
    assert_eq!(RoundingControl::from_bits(3), RoundingControl::Chop);
    assert_eq!(RoundingControl::from_bits(0b111), RoundingControl::Chop);
}

// ══════════════════════════════════════════════════════════
// 2. Range
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
#[case(f64::NEG_INFINITY)]
#[case(9_223_372_036_854_775_808.0)]
#[case(-9_223_372_036_854_777_856.0)]
fn unrepresentable_values_are_indefinite(#[case] value: f64) {
    for rc in [
        RoundingControl::Nearest,
        RoundingControl::Down,
        RoundingControl::Up,
        RoundingControl::Chop,
    ] {
        assert_eq!(rc.round_to_integer(value), INTEGER_INDEFINITE);
    }
}

#[test]
fn most_negative_long_is_representable() {
    assert_eq!(
        RoundingControl::Nearest.round_to_integer(-9_223_372_036_854_775_808.0),
        i64::MIN
    );
}

#[test]
fn directed_rounding_of_negative_half() {
    assert_eq!(RoundingControl::Up.round_to_integer(-0.5), 0);
    assert_eq!(RoundingControl::Down.round_to_integer(-0.5), -1);
}

// ══════════════════════════════════════════════════════════
// 3. Substitute policy
// ══════════════════════════════════════════════════════════

struct AlwaysAnswer;

impl RoundToInteger for AlwaysAnswer {
    fn round_to_integer(&self, _value: f64) -> i64 {
        42
    }
}

#[test]
fn caller_supplied_policy_replaces_control_word() {
    let mut ctx = TestContext::new();
    ctx.push(-1.0);
    let mut cycles = 0u64;

    let mut fpu = Fpu::new(&mut ctx.cpu.fpu, &mut ctx.mem, &mut cycles);
    let exact = fpu
        .store_int_with(&AlwaysAnswer, IntWidth::W16, ds(0x0100), true)
        .unwrap();

    assert!(!exact);
    assert_eq!(ctx.peek(0x0100, 2), 42u16.to_le_bytes());
    assert_eq!(ctx.top(), 0);
}
