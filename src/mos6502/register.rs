/// Identifies one of the CPU's 8-bit registers for the purposes of the generic
/// load/store/transfer handlers in `mod.rs`. `P` is deliberately excluded: every write to
/// it goes through `Status::set_bits` (PLP/RTI) or a hand-built pushed copy (PHP/BRK),
/// never through the generic N/Z-setting path the other registers share.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Register {
    A,
    X,
    Y,
    SP,
}
