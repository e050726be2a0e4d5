//! x87 Load/Store Opcodes.
//!
//! An x87 memory instruction is an escape byte followed by a ModR/M byte
//! whose `reg` field (`/digit`) picks the operation within that escape.

/// First escape byte of the x87 opcode space.
pub const ESC_FIRST: u8 = 0xD8;

/// Last escape byte of the x87 opcode space.
pub const ESC_LAST: u8 = 0xDF;

/// `m32fp` loads/stores (FLD, FST, FSTP).
pub const ESC_D9: u8 = 0xD9;

/// `m32int` loads/stores and `m80fp` FLD/FSTP.
pub const ESC_DB: u8 = 0xDB;

/// `m64fp` loads/stores (FLD, FST, FSTP).
pub const ESC_DD: u8 = 0xDD;

/// `m16int`, `m64int` and `m80bcd` loads/stores.
pub const ESC_DF: u8 = 0xDF;

/// `/0`: FLD m32fp (D9), FILD m32int (DB), FLD m64fp (DD), FILD m16int (DF).
pub const REG_LOAD: u8 = 0;

/// `/2`: non-popping store (FST / FIST).
pub const REG_STORE: u8 = 2;

/// `/3`: store and pop (FSTP / FISTP).
pub const REG_STORE_POP: u8 = 3;

/// `/4`: FBLD m80bcd (DF). Packed BCD loads are not provided.
pub const REG_BCD_LOAD: u8 = 4;

/// `/5`: FLD m80fp (DB), FILD m64int (DF).
pub const REG_LOAD_WIDE: u8 = 5;

/// `/6`: FBSTP m80bcd (DF).
pub const REG_BCD_STORE_POP: u8 = 6;

/// `/7`: FSTP m80fp (DB), FISTP m64int (DF).
pub const REG_STORE_POP_WIDE: u8 = 7;

/// Address-size override prefix.
pub const PREFIX_ADDRESS_SIZE: u8 = 0x67;
