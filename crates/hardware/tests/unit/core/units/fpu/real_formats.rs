//! Single and double real load/store tests.

use crate::common::harness::{TestContext, direct16, fld64, fstp64};
use pcsim_core::core::arch::fpr::TagClass;
use pcsim_core::isa::x87::opcodes::{ESC_D9, ESC_DD, REG_LOAD, REG_STORE, REG_STORE_POP};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn fld32(offset: u16) -> Vec<u8> {
    direct16(ESC_D9, REG_LOAD, offset)
}

fn fst32(offset: u16) -> Vec<u8> {
    direct16(ESC_D9, REG_STORE, offset)
}

fn fstp32(offset: u16) -> Vec<u8> {
    direct16(ESC_D9, REG_STORE_POP, offset)
}

proptest! {
    #[test]
    fn double_is_a_bit_copy(bits in any::<u64>()) {
        let mut ctx = TestContext::new();
        ctx.cpu.trace = false;
        ctx.poke(0x0100, &bits.to_le_bytes());

        let _ = ctx.run(&fld64(0x0100));
        prop_assert_eq!(ctx.st0().to_bits(), bits);
        let _ = ctx.run(&fstp64(0x0200));

        prop_assert_eq!(ctx.peek(0x0200, 8), bits.to_le_bytes().to_vec());
        prop_assert_eq!(ctx.top(), 0);
    }

    #[test]
    fn finite_singles_round_trip(value in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
        let mut ctx = TestContext::new();
        ctx.cpu.trace = false;
        ctx.poke(0x0100, &value.to_bits().to_le_bytes());

        let _ = ctx.run(&fld32(0x0100));
        prop_assert_eq!(ctx.st0(), f64::from(value));
        let _ = ctx.run(&fstp32(0x0200));

        prop_assert_eq!(ctx.peek(0x0200, 4), value.to_bits().to_le_bytes().to_vec());
    }
}

#[test]
fn signed_zeros_pass_through_double() {
    for value in [0.0f64, -0.0] {
        let mut ctx = TestContext::new();
        ctx.poke(0x0100, &value.to_le_bytes());
        let _ = ctx.run(&fld64(0x0100));
        assert_eq!(ctx.cpu.fpu.tag(0).class, TagClass::Zero);
        let _ = ctx.run(&fstp64(0x0200));
        assert_eq!(ctx.peek(0x0200, 8), value.to_le_bytes());
    }
}

#[test]
fn single_store_rounds_to_nearest() {
    let mut ctx = TestContext::new();
    ctx.push(0.1);
    let _ = ctx.run(&fst32(0x0100));
    assert_eq!(ctx.peek(0x0100, 4), 0.1f32.to_bits().to_le_bytes());
    assert_eq!(ctx.top(), 7);
}

#[test]
fn single_store_overflows_to_infinity() {
    let mut ctx = TestContext::new();
    ctx.push(-1e300);
    let _ = ctx.run(&fstp32(0x0100));
    assert_eq!(ctx.peek(0x0100, 4), f32::NEG_INFINITY.to_bits().to_le_bytes());
}

#[test]
fn double_store_keeps_stack() {
    let mut ctx = TestContext::new();
    ctx.push(6.25);
    let outcome = ctx.run(&direct16(ESC_DD, REG_STORE, 0x0100));
    assert!(!outcome.retired.popped);
    assert_eq!(ctx.st0(), 6.25);
    assert_eq!(ctx.peek(0x0100, 8), 6.25f64.to_le_bytes());
}

#[test]
fn single_denormal_widens_to_normal_double() {
    let mut ctx = TestContext::new();
    ctx.poke(0x0100, &1u32.to_le_bytes());
    let _ = ctx.run(&fld32(0x0100));
    assert_eq!(ctx.cpu.fpu.tag(0).class, TagClass::Valid);
    assert_eq!(ctx.st0(), f64::from(f32::from_bits(1)));
}
