//! x87 register stack tests.
//!
//! Covers push/pop rotation of `TOP`, tag classification, the tag word and
//! the lifetime of the exact-int64 shadow.

use pcsim_core::core::arch::fpr::{FpuState, STACK_DEPTH, SlotValue, TagClass};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn finit_state_is_empty() {
    let fpu = FpuState::new();
    assert_eq!(fpu.top(), 0);
    assert_eq!(fpu.tag_word(), 0xFFFF);
    assert_eq!(fpu.status_word(), 0);
    assert_eq!(fpu.control_word().bits(), 0x037F);
}

#[test]
fn eight_pushes_and_pops_restore_top() {
    let mut fpu = FpuState::new();
    for i in 0..STACK_DEPTH {
        fpu.push(i as f64 + 1.0);
    }
    assert_eq!(fpu.top(), 0);
    assert_eq!(fpu.read(0), 8.0);
    assert_eq!(fpu.read(7), 1.0);
    assert_eq!(fpu.tag_word(), 0x0000);

    for _ in 0..STACK_DEPTH {
        fpu.pop();
    }
    assert_eq!(fpu.top(), 0);
    assert_eq!(fpu.tag_word(), 0xFFFF);
}

#[test]
fn push_decrements_top_modulo_eight() {
    let mut fpu = FpuState::new();
    fpu.push(1.0);
    assert_eq!(fpu.top(), 7);
    assert_eq!(fpu.physical(0), 7);
    assert_eq!(fpu.physical(1), 0);
    assert_eq!(fpu.status_word(), 7 << 11);
}

#[rstest]
#[case(1.0, TagClass::Valid)]
#[case(-2.5e300, TagClass::Valid)]
#[case(0.0, TagClass::Zero)]
#[case(-0.0, TagClass::Zero)]
#[case(f64::INFINITY, TagClass::Special)]
#[case(f64::NEG_INFINITY, TagClass::Special)]
#[case(f64::NAN, TagClass::Special)]
#[case(f64::MIN_POSITIVE / 2.0, TagClass::Special)]
fn push_tags_by_class(#[case] value: f64, #[case] class: TagClass) {
    let mut fpu = FpuState::new();
    fpu.push(value);
    let tag = fpu.tag(0);
    assert_eq!(tag.class, class);
    assert!(!tag.exact_int64);
}

#[test]
fn tag_word_packs_two_bits_per_physical_slot() {
    let mut fpu = FpuState::new();
    fpu.push(0.0); // slot 7: zero
    fpu.push(f64::NAN); // slot 6: special
    fpu.push(3.0); // slot 5: valid
    assert_eq!(fpu.tag_word(), 0b01_10_00_11_11_11_11_11);
}

#[test]
fn read_does_not_touch_tags() {
    let mut fpu = FpuState::new();
    fpu.push(4.0);
    let before = fpu.tag_word();
    assert_eq!(fpu.read(0), 4.0);
    assert_eq!(fpu.tag_word(), before);
}

#[test]
fn shadow_is_reported_until_popped() {
    let mut fpu = FpuState::new();
    fpu.push(9.223_372_036_854_775_807e18);
    fpu.set_shadow_int64(0, i64::MAX);

    assert!(fpu.tag(0).exact_int64);
    assert_eq!(fpu.shadow_int64(0), Some(i64::MAX));
    assert_eq!(
        fpu.slot(0),
        SlotValue::ExactInt64 {
            real: 9.223_372_036_854_775_807e18,
            raw: i64::MAX
        }
    );

    fpu.pop();
    assert_eq!(fpu.physical_tag(7).class, TagClass::Empty);
    assert!(!fpu.physical_tag(7).exact_int64);
}

#[test]
fn push_over_stale_shadow_clears_it() {
    let mut fpu = FpuState::new();
    fpu.push(5.0);
    fpu.set_shadow_int64(0, 5);
    // A full rotation lands back on the same physical slot.
    for _ in 0..STACK_DEPTH {
        fpu.push(1.0);
    }
    assert_eq!(fpu.shadow_int64(0), None);
}

#[test]
fn reset_restores_finit_control_word() {
    let mut fpu = FpuState::new();
    fpu.set_control_word(pcsim_core::core::arch::fcw::ControlWord(0x0F7F));
    fpu.push(1.0);
    fpu.reset();
    assert_eq!(fpu.top(), 0);
    assert_eq!(fpu.tag_word(), 0xFFFF);
    assert_eq!(fpu.control_word().bits(), 0x037F);
}
