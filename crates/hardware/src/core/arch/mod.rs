//! IA-32 architectural state.
//!
//! This module contains the register state the x87 load/store path touches.
//! It includes the following modules:
//! 1. **FCW:** The x87 control word.
//! 2. **FPRs:** The x87 register stack and tag word.
//! 3. **GPRs:** The general-purpose registers used for address computation.

/// x87 control word.
pub mod fcw;

/// x87 register stack.
pub mod fpr;

/// General-Purpose Register file implementation.
pub mod gpr;
