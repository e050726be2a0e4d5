use pcsim_core::common::{AddressSize, SegmentReg, SegmentedAddr};
use pcsim_core::config::Config;
use pcsim_core::core::Cpu;
use pcsim_core::core::cpu::execution::{ExecError, ExecOutcome};
use pcsim_core::isa::x87::opcodes;
use pcsim_core::soc::SegmentedMemory;
use tracing_subscriber::EnvFilter;

/// RAM given to every test context.
pub const TEST_RAM: usize = 0x2_0000;

/// Installs a test-friendly `tracing` subscriber once per process.
///
/// Set `RUST_LOG=trace` to see per-instruction operand events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A CPU and the memory it executes against.
pub struct TestContext {
    pub cpu: Cpu,
    pub mem: SegmentedMemory,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        init_tracing();
        let mut cpu = Cpu::new(config);
        cpu.trace = true;
        Self {
            cpu,
            mem: SegmentedMemory::new(TEST_RAM, config.memory.segment_limit),
        }
    }

    /// Switches the code segment to 32-bit addressing.
    pub fn addr32(mut self) -> Self {
        self.cpu.default_address_size = AddressSize::Addr32;
        self
    }

    /// Writes raw bytes at a linear address.
    pub fn poke(&mut self, linear: u64, data: &[u8]) {
        assert!(self.mem.load(linear, data), "poke outside RAM");
    }

    /// Reads raw bytes at a linear address.
    pub fn peek(&self, linear: u64, len: usize) -> Vec<u8> {
        self.mem
            .peek(linear, len)
            .map(<[u8]>::to_vec)
            .unwrap_or_default()
    }

    /// Decodes and executes one instruction.
    pub fn exec(&mut self, bytes: &[u8]) -> Result<ExecOutcome, ExecError> {
        self.cpu.execute_x87(&mut self.mem, bytes)
    }

    /// Executes one instruction that is expected to retire.
    pub fn run(&mut self, bytes: &[u8]) -> ExecOutcome {
        match self.exec(bytes) {
            Ok(outcome) => outcome,
            Err(e) => panic!("{bytes:02x?} did not retire: {e}"),
        }
    }

    /// Pushes a value directly onto the register stack.
    pub fn push(&mut self, value: f64) {
        self.cpu.fpu.push(value);
    }

    pub fn st0(&self) -> f64 {
        self.cpu.fpu.read(0)
    }

    pub fn top(&self) -> u8 {
        self.cpu.fpu.top()
    }
}

/// `DS:offset`.
pub fn ds(offset: u32) -> SegmentedAddr {
    SegmentedAddr::new(SegmentReg::Ds, offset)
}

/// Encodes `escape /reg` with a 16-bit direct address (`mod = 0, rm = 6`).
pub fn direct16(escape: u8, reg: u8, offset: u16) -> Vec<u8> {
    let [lo, hi] = offset.to_le_bytes();
    vec![escape, (reg << 3) | 0b110, lo, hi]
}

/// Encodes `escape /reg` with a 32-bit direct address (`mod = 0, rm = 5`).
pub fn direct32(escape: u8, reg: u8, offset: u32) -> Vec<u8> {
    let mut bytes = vec![escape, (reg << 3) | 0b101];
    bytes.extend_from_slice(&offset.to_le_bytes());
    bytes
}

pub fn fild16(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DF, opcodes::REG_LOAD, offset)
}

pub fn fistp16(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DF, opcodes::REG_STORE_POP, offset)
}

pub fn fild32(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DB, opcodes::REG_LOAD, offset)
}

pub fn fistp32(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DB, opcodes::REG_STORE_POP, offset)
}

pub fn fild64(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DF, opcodes::REG_LOAD_WIDE, offset)
}

pub fn fistp64(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DF, opcodes::REG_STORE_POP_WIDE, offset)
}

pub fn fld64(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DD, opcodes::REG_LOAD, offset)
}

pub fn fstp64(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DD, opcodes::REG_STORE_POP, offset)
}

pub fn fld80(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DB, opcodes::REG_LOAD_WIDE, offset)
}

pub fn fstp80(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DB, opcodes::REG_STORE_POP_WIDE, offset)
}

pub fn fbstp(offset: u16) -> Vec<u8> {
    direct16(opcodes::ESC_DF, opcodes::REG_BCD_STORE_POP, offset)
}
