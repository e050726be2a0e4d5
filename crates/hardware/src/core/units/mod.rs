//! Execution units and functional components.
//!
//! Only the x87 load/store unit is modelled.

/// x87 loads, stores and operand format conversion.
pub mod fpu;
