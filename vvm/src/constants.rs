//! Machine parameters for the VuPP virtual machine

/// Words of addressable memory
pub const MEMORY_WORDS: usize = 0x1_0000;

/// General purpose registers visible to programs
pub const REGISTER_COUNT: usize = 4;

/// Initial stack pointer; the first push lands at 0xFFFF
pub const STACK_BASE: u16 = 0x0000;

// Default VM configuration
pub const DEFAULT_DATA_BASE: u16 = 0x0100;
pub const DEFAULT_MAX_STEPS: u64 = 10_000_000;
pub const DEFAULT_SYMBOL_PREFIX: &str = "_";
