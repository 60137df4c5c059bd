/// 16-bit little-endian vector addresses the control unit loads `pc` from when entering
/// the corresponding interrupt/reset sequence. BRK shares the IRQ vector; the two are
/// distinguished only by the `Break` bit in the pushed copy of `P` (see `mod.rs`).
pub const NMI_VECTOR_ADDRESS: u16 = 0xFFFA;
pub const RESET_VECTOR_ADDRESS: u16 = 0xFFFC;
pub const IRQ_VECTOR_ADDRESS: u16 = 0xFFFE;
