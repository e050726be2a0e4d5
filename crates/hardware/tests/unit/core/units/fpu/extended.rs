//! Double-extended (`m80fp`) tests.

use crate::common::harness::{TestContext, fld64, fld80, fstp64, fstp80};
use pcsim_core::core::units::fpu::extended::Float80;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn f80(significand: u64, sign_exponent: u16) -> Float80 {
    Float80 {
        significand,
        sign_exponent,
    }
}

/// The ten bytes an `m80fp` operand occupies in memory.
fn operand_bytes(value: Float80) -> Vec<u8> {
    let mut out = value.significand.to_le_bytes().to_vec();
    out.extend_from_slice(&value.sign_exponent.to_le_bytes());
    out
}

proptest! {
    #[test]
    fn finite_doubles_round_trip(value in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
        prop_assert_eq!(Float80::from_f64(value).to_f64().to_bits(), value.to_bits());
    }
}

#[test]
fn one_has_explicit_integer_bit() {
    assert_eq!(Float80::from_f64(1.0), f80(0x8000_0000_0000_0000, 0x3FFF));
    assert_eq!(Float80::from_f64(-2.0), f80(0x8000_0000_0000_0000, 0xC000));
}

#[test]
fn extended_pi_narrows_to_double_pi() {
    let pi = f80(0xC90F_DAA2_2168_C235, 0x4000);
    assert_eq!(pi.to_f64(), std::f64::consts::PI);
}

#[test]
fn specials_survive_narrowing() {
    assert_eq!(f80(1 << 63, 0x7FFF).to_f64(), f64::INFINITY);
    assert_eq!(f80(1 << 63, 0xFFFF).to_f64(), f64::NEG_INFINITY);
    assert!(f80(0xC000_0000_0000_0000, 0x7FFF).to_f64().is_nan());
    // A payload only in the dropped low bits must stay a NaN.
    assert!(f80(0x8000_0000_0000_0001, 0x7FFF).to_f64().is_nan());
    assert_eq!(f80(0, 0x8000).to_f64().to_bits(), (-0.0f64).to_bits());
}

#[test]
fn exponent_below_double_range_goes_denormal_then_zero() {
    // 2^-1074: the smallest double denormal.
    assert_eq!(f80(1 << 63, 16383 - 1074).to_f64().to_bits(), 1);
    // 2^-1080 rounds to zero.
    assert_eq!(f80(1 << 63, 16383 - 1080).to_f64(), 0.0);
    // Extended denormals are far below double range.
    assert_eq!(f80(0x4000_0000_0000_0000, 0).to_f64(), 0.0);
}

#[test]
fn exponent_above_double_range_overflows() {
    assert_eq!(f80(1 << 63, 16383 + 1024).to_f64(), f64::INFINITY);
    // Largest finite double survives; rounding it up would overflow.
    assert_eq!(Float80::from_f64(f64::MAX).to_f64(), f64::MAX);
    assert_eq!(f80(u64::MAX, 16383 + 1023).to_f64(), f64::INFINITY);
}

#[test]
fn load_then_store_through_memory() {
    let pi = f80(0xC90F_DAA2_2168_C235, 0x4000);
    let mut ctx = TestContext::new();
    ctx.poke(0x0100, &operand_bytes(pi));

    let outcome = ctx.run(&fld80(0x0100));
    assert_eq!(outcome.retired.cycles, 6);
    assert_eq!(ctx.st0(), std::f64::consts::PI);

    let _ = ctx.run(&fstp80(0x0200));
    assert_eq!(ctx.top(), 0);
    assert_eq!(
        ctx.peek(0x0200, 10),
        operand_bytes(Float80::from_f64(std::f64::consts::PI))
    );
}

#[test]
fn stored_operand_is_significand_then_sign_exponent() {
    let mut ctx = TestContext::new();
    ctx.push(-2.0);
    let _ = ctx.run(&fstp80(0x0100));
    assert_eq!(
        ctx.peek(0x0100, 10),
        [0, 0, 0, 0, 0, 0, 0, 0x80, 0x00, 0xC0]
    );
}

#[test]
fn extended_store_of_double_reloads_identically() {
    let mut ctx = TestContext::new();
    let value = -6.02214076e23f64;
    ctx.poke(0x0100, &value.to_le_bytes());

    let _ = ctx.run(&fld64(0x0100));
    let _ = ctx.run(&fstp80(0x0200));
    let _ = ctx.run(&fld80(0x0200));
    let _ = ctx.run(&fstp64(0x0300));

    assert_eq!(ctx.peek(0x0300, 8), value.to_le_bytes());
}
