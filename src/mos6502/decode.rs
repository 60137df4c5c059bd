use super::addressing_mode::AddressingMode;
use super::opcode::Opcode;

/// One row of the 256-entry opcode decode table: the mnemonic, the addressing mode that
/// supplies its operand, and the byte length / base cycle count used for instruction
/// accounting. Byte values the hardware never assigned a mnemonic to decode to
/// `Opcode::Illegal` - `MOS6502::step` halts rather than guessing at unofficial behavior.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct DecodeEntry {
    pub opcode: Opcode,
    pub addressing_mode: AddressingMode,
    pub cycles: u8,
    pub bytes: u8,
}

impl DecodeEntry {
    const fn new(opcode: Opcode, addressing_mode: AddressingMode, cycles: u8, bytes: u8) -> DecodeEntry {
        DecodeEntry { opcode, addressing_mode, cycles, bytes }
    }
}

const ILLEGAL: DecodeEntry = DecodeEntry::new(Opcode::Illegal, AddressingMode::Implied, 2, 1);

/// Look up the decode entry for `opcode` (the first byte of an instruction).
pub fn decode(opcode: u8) -> &'static DecodeEntry {
    &DECODE_TABLE[opcode as usize]
}

/// The 256-entry opcode decode table. Cycle counts are the instruction's base cost and do
/// not include the extra cycle hardware spends on a taken branch or a page-crossing
/// indexed read - cycle-exact sub-instruction timing is out of scope, see `MOS6502::step`.
static DECODE_TABLE: [DecodeEntry; 256] = {
    use AddressingMode::*;
    use Opcode::*;

    [
        /*0x00*/ DecodeEntry::new(BRK, Implied, 7, 1),
        /*0x01*/ DecodeEntry::new(ORA, IndexedIndirect, 6, 2),
        /*0x02*/ ILLEGAL,
        /*0x03*/ ILLEGAL,
        /*0x04*/ ILLEGAL,
        /*0x05*/ DecodeEntry::new(ORA, ZeroPage, 3, 2),
        /*0x06*/ DecodeEntry::new(ASL, ZeroPage, 5, 2),
        /*0x07*/ ILLEGAL,
        /*0x08*/ DecodeEntry::new(PHP, Implied, 3, 1),
        /*0x09*/ DecodeEntry::new(ORA, Immediate, 2, 2),
        /*0x0A*/ DecodeEntry::new(ASL, Accumulator, 2, 1),
        /*0x0B*/ ILLEGAL,
        /*0x0C*/ ILLEGAL,
        /*0x0D*/ DecodeEntry::new(ORA, Absolute, 4, 3),
        /*0x0E*/ DecodeEntry::new(ASL, Absolute, 6, 3),
        /*0x0F*/ ILLEGAL,
        /*0x10*/ DecodeEntry::new(BPL, Relative, 2, 2),
        /*0x11*/ DecodeEntry::new(ORA, IndirectIndexed, 5, 2),
        /*0x12*/ ILLEGAL,
        /*0x13*/ ILLEGAL,
        /*0x14*/ ILLEGAL,
        /*0x15*/ DecodeEntry::new(ORA, ZeroPageX, 4, 2),
        /*0x16*/ DecodeEntry::new(ASL, ZeroPageX, 6, 2),
        /*0x17*/ ILLEGAL,
        /*0x18*/ DecodeEntry::new(CLC, Implied, 2, 1),
        /*0x19*/ DecodeEntry::new(ORA, AbsoluteY, 4, 3),
        /*0x1A*/ ILLEGAL,
        /*0x1B*/ ILLEGAL,
        /*0x1C*/ ILLEGAL,
        /*0x1D*/ DecodeEntry::new(ORA, AbsoluteX, 4, 3),
        /*0x1E*/ DecodeEntry::new(ASL, AbsoluteX, 7, 3),
        /*0x1F*/ ILLEGAL,
        /*0x20*/ DecodeEntry::new(JSR, Absolute, 6, 3),
        /*0x21*/ DecodeEntry::new(AND, IndexedIndirect, 6, 2),
        /*0x22*/ ILLEGAL,
        /*0x23*/ ILLEGAL,
        /*0x24*/ DecodeEntry::new(BIT, ZeroPage, 3, 2),
        /*0x25*/ DecodeEntry::new(AND, ZeroPage, 3, 2),
        /*0x26*/ DecodeEntry::new(ROL, ZeroPage, 5, 2),
        /*0x27*/ ILLEGAL,
        /*0x28*/ DecodeEntry::new(PLP, Implied, 4, 1),
        /*0x29*/ DecodeEntry::new(AND, Immediate, 2, 2),
        /*0x2A*/ DecodeEntry::new(ROL, Accumulator, 2, 1),
        /*0x2B*/ ILLEGAL,
        /*0x2C*/ DecodeEntry::new(BIT, Absolute, 4, 3),
        /*0x2D*/ DecodeEntry::new(AND, Absolute, 4, 3),
        /*0x2E*/ DecodeEntry::new(ROL, Absolute, 6, 3),
        /*0x2F*/ ILLEGAL,
        /*0x30*/ DecodeEntry::new(BMI, Relative, 2, 2),
        /*0x31*/ DecodeEntry::new(AND, IndirectIndexed, 5, 2),
        /*0x32*/ ILLEGAL,
        /*0x33*/ ILLEGAL,
        /*0x34*/ ILLEGAL,
        /*0x35*/ DecodeEntry::new(AND, ZeroPageX, 4, 2),
        /*0x36*/ DecodeEntry::new(ROL, ZeroPageX, 6, 2),
        /*0x37*/ ILLEGAL,
        /*0x38*/ DecodeEntry::new(SEC, Implied, 2, 1),
        /*0x39*/ DecodeEntry::new(AND, AbsoluteY, 4, 3),
        /*0x3A*/ ILLEGAL,
        /*0x3B*/ ILLEGAL,
        /*0x3C*/ ILLEGAL,
        /*0x3D*/ DecodeEntry::new(AND, AbsoluteX, 4, 3),
        /*0x3E*/ DecodeEntry::new(ROL, AbsoluteX, 7, 3),
        /*0x3F*/ ILLEGAL,
        /*0x40*/ DecodeEntry::new(RTI, Implied, 6, 1),
        /*0x41*/ DecodeEntry::new(EOR, IndexedIndirect, 6, 2),
        /*0x42*/ ILLEGAL,
        /*0x43*/ ILLEGAL,
        /*0x44*/ ILLEGAL,
        /*0x45*/ DecodeEntry::new(EOR, ZeroPage, 3, 2),
        /*0x46*/ DecodeEntry::new(LSR, ZeroPage, 5, 2),
        /*0x47*/ ILLEGAL,
        /*0x48*/ DecodeEntry::new(PHA, Implied, 3, 1),
        /*0x49*/ DecodeEntry::new(EOR, Immediate, 2, 2),
        /*0x4A*/ DecodeEntry::new(LSR, Accumulator, 2, 1),
        /*0x4B*/ ILLEGAL,
        /*0x4C*/ DecodeEntry::new(JMP, Absolute, 3, 3),
        /*0x4D*/ DecodeEntry::new(EOR, Absolute, 4, 3),
        /*0x4E*/ DecodeEntry::new(LSR, Absolute, 6, 3),
        /*0x4F*/ ILLEGAL,
        /*0x50*/ DecodeEntry::new(BVC, Relative, 2, 2),
        /*0x51*/ DecodeEntry::new(EOR, IndirectIndexed, 5, 2),
        /*0x52*/ ILLEGAL,
        /*0x53*/ ILLEGAL,
        /*0x54*/ ILLEGAL,
        /*0x55*/ DecodeEntry::new(EOR, ZeroPageX, 4, 2),
        /*0x56*/ DecodeEntry::new(LSR, ZeroPageX, 6, 2),
        /*0x57*/ ILLEGAL,
        /*0x58*/ DecodeEntry::new(CLI, Implied, 2, 1),
        /*0x59*/ DecodeEntry::new(EOR, AbsoluteY, 4, 3),
        /*0x5A*/ ILLEGAL,
        /*0x5B*/ ILLEGAL,
        /*0x5C*/ ILLEGAL,
        /*0x5D*/ DecodeEntry::new(EOR, AbsoluteX, 4, 3),
        /*0x5E*/ DecodeEntry::new(LSR, AbsoluteX, 7, 3),
        /*0x5F*/ ILLEGAL,
        /*0x60*/ DecodeEntry::new(RTS, Implied, 6, 1),
        /*0x61*/ DecodeEntry::new(ADC, IndexedIndirect, 6, 2),
        /*0x62*/ ILLEGAL,
        /*0x63*/ ILLEGAL,
        /*0x64*/ ILLEGAL,
        /*0x65*/ DecodeEntry::new(ADC, ZeroPage, 3, 2),
        /*0x66*/ DecodeEntry::new(ROR, ZeroPage, 5, 2),
        /*0x67*/ ILLEGAL,
        /*0x68*/ DecodeEntry::new(PLA, Implied, 4, 1),
        /*0x69*/ DecodeEntry::new(ADC, Immediate, 2, 2),
        /*0x6A*/ DecodeEntry::new(ROR, Accumulator, 2, 1),
        /*0x6B*/ ILLEGAL,
        /*0x6C*/ DecodeEntry::new(JMP, Indirect, 5, 3),
        /*0x6D*/ DecodeEntry::new(ADC, Absolute, 4, 3),
        /*0x6E*/ DecodeEntry::new(ROR, Absolute, 6, 3),
        /*0x6F*/ ILLEGAL,
        /*0x70*/ DecodeEntry::new(BVS, Relative, 2, 2),
        /*0x71*/ DecodeEntry::new(ADC, IndirectIndexed, 5, 2),
        /*0x72*/ ILLEGAL,
        /*0x73*/ ILLEGAL,
        /*0x74*/ ILLEGAL,
        /*0x75*/ DecodeEntry::new(ADC, ZeroPageX, 4, 2),
        /*0x76*/ DecodeEntry::new(ROR, ZeroPageX, 6, 2),
        /*0x77*/ ILLEGAL,
        /*0x78*/ DecodeEntry::new(SEI, Implied, 2, 1),
        /*0x79*/ DecodeEntry::new(ADC, AbsoluteY, 4, 3),
        /*0x7A*/ ILLEGAL,
        /*0x7B*/ ILLEGAL,
        /*0x7C*/ ILLEGAL,
        /*0x7D*/ DecodeEntry::new(ADC, AbsoluteX, 4, 3),
        /*0x7E*/ DecodeEntry::new(ROR, AbsoluteX, 7, 3),
        /*0x7F*/ ILLEGAL,
        /*0x80*/ ILLEGAL,
        /*0x81*/ DecodeEntry::new(STA, IndexedIndirect, 6, 2),
        /*0x82*/ ILLEGAL,
        /*0x83*/ ILLEGAL,
        /*0x84*/ DecodeEntry::new(STY, ZeroPage, 3, 2),
        /*0x85*/ DecodeEntry::new(STA, ZeroPage, 3, 2),
        /*0x86*/ DecodeEntry::new(STX, ZeroPage, 3, 2),
        /*0x87*/ ILLEGAL,
        /*0x88*/ DecodeEntry::new(DEY, Implied, 2, 1),
        /*0x89*/ ILLEGAL,
        /*0x8A*/ DecodeEntry::new(TXA, Implied, 2, 1),
        /*0x8B*/ ILLEGAL,
        /*0x8C*/ DecodeEntry::new(STY, Absolute, 4, 3),
        /*0x8D*/ DecodeEntry::new(STA, Absolute, 4, 3),
        /*0x8E*/ DecodeEntry::new(STX, Absolute, 4, 3),
        /*0x8F*/ ILLEGAL,
        /*0x90*/ DecodeEntry::new(BCC, Relative, 2, 2),
        /*0x91*/ DecodeEntry::new(STA, IndirectIndexed, 6, 2),
        /*0x92*/ ILLEGAL,
        /*0x93*/ ILLEGAL,
        /*0x94*/ DecodeEntry::new(STY, ZeroPageX, 4, 2),
        /*0x95*/ DecodeEntry::new(STA, ZeroPageX, 4, 2),
        /*0x96*/ DecodeEntry::new(STX, ZeroPageY, 4, 2),
        /*0x97*/ ILLEGAL,
        /*0x98*/ DecodeEntry::new(TYA, Implied, 2, 1),
        /*0x99*/ DecodeEntry::new(STA, AbsoluteY, 5, 3),
        /*0x9A*/ DecodeEntry::new(TXS, Implied, 2, 1),
        /*0x9B*/ ILLEGAL,
        /*0x9C*/ ILLEGAL,
        /*0x9D*/ DecodeEntry::new(STA, AbsoluteX, 5, 3),
        /*0x9E*/ ILLEGAL,
        /*0x9F*/ ILLEGAL,
        /*0xA0*/ DecodeEntry::new(LDY, Immediate, 2, 2),
        /*0xA1*/ DecodeEntry::new(LDA, IndexedIndirect, 6, 2),
        /*0xA2*/ DecodeEntry::new(LDX, Immediate, 2, 2),
        /*0xA3*/ ILLEGAL,
        /*0xA4*/ DecodeEntry::new(LDY, ZeroPage, 3, 2),
        /*0xA5*/ DecodeEntry::new(LDA, ZeroPage, 3, 2),
        /*0xA6*/ DecodeEntry::new(LDX, ZeroPage, 3, 2),
        /*0xA7*/ ILLEGAL,
        /*0xA8*/ DecodeEntry::new(TAY, Implied, 2, 1),
        /*0xA9*/ DecodeEntry::new(LDA, Immediate, 2, 2),
        /*0xAA*/ DecodeEntry::new(TAX, Implied, 2, 1),
        /*0xAB*/ ILLEGAL,
        /*0xAC*/ DecodeEntry::new(LDY, Absolute, 4, 3),
        /*0xAD*/ DecodeEntry::new(LDA, Absolute, 4, 3),
        /*0xAE*/ DecodeEntry::new(LDX, Absolute, 4, 3),
        /*0xAF*/ ILLEGAL,
        /*0xB0*/ DecodeEntry::new(BCS, Relative, 2, 2),
        /*0xB1*/ DecodeEntry::new(LDA, IndirectIndexed, 5, 2),
        /*0xB2*/ ILLEGAL,
        /*0xB3*/ ILLEGAL,
        /*0xB4*/ DecodeEntry::new(LDY, ZeroPageX, 4, 2),
        /*0xB5*/ DecodeEntry::new(LDA, ZeroPageX, 4, 2),
        /*0xB6*/ DecodeEntry::new(LDX, ZeroPageY, 4, 2),
        /*0xB7*/ ILLEGAL,
        /*0xB8*/ DecodeEntry::new(CLV, Implied, 2, 1),
        /*0xB9*/ DecodeEntry::new(LDA, AbsoluteY, 4, 3),
        /*0xBA*/ DecodeEntry::new(TSX, Implied, 2, 1),
        /*0xBB*/ ILLEGAL,
        /*0xBC*/ DecodeEntry::new(LDY, AbsoluteX, 4, 3),
        /*0xBD*/ DecodeEntry::new(LDA, AbsoluteX, 4, 3),
        /*0xBE*/ DecodeEntry::new(LDX, AbsoluteY, 4, 3),
        /*0xBF*/ ILLEGAL,
        /*0xC0*/ DecodeEntry::new(CPY, Immediate, 2, 2),
        /*0xC1*/ DecodeEntry::new(CMP, IndexedIndirect, 6, 2),
        /*0xC2*/ ILLEGAL,
        /*0xC3*/ ILLEGAL,
        /*0xC4*/ DecodeEntry::new(CPY, ZeroPage, 3, 2),
        /*0xC5*/ DecodeEntry::new(CMP, ZeroPage, 3, 2),
        /*0xC6*/ DecodeEntry::new(DEC, ZeroPage, 5, 2),
        /*0xC7*/ ILLEGAL,
        /*0xC8*/ DecodeEntry::new(INY, Implied, 2, 1),
        /*0xC9*/ DecodeEntry::new(CMP, Immediate, 2, 2),
        /*0xCA*/ DecodeEntry::new(DEX, Implied, 2, 1),
        /*0xCB*/ ILLEGAL,
        /*0xCC*/ DecodeEntry::new(CPY, Absolute, 4, 3),
        /*0xCD*/ DecodeEntry::new(CMP, Absolute, 4, 3),
        /*0xCE*/ DecodeEntry::new(DEC, Absolute, 6, 3),
        /*0xCF*/ ILLEGAL,
        /*0xD0*/ DecodeEntry::new(BNE, Relative, 2, 2),
        /*0xD1*/ DecodeEntry::new(CMP, IndirectIndexed, 5, 2),
        /*0xD2*/ ILLEGAL,
        /*0xD3*/ ILLEGAL,
        /*0xD4*/ ILLEGAL,
        /*0xD5*/ DecodeEntry::new(CMP, ZeroPageX, 4, 2),
        /*0xD6*/ DecodeEntry::new(DEC, ZeroPageX, 6, 2),
        /*0xD7*/ ILLEGAL,
        /*0xD8*/ DecodeEntry::new(CLD, Implied, 2, 1),
        /*0xD9*/ DecodeEntry::new(CMP, AbsoluteY, 4, 3),
        /*0xDA*/ ILLEGAL,
        /*0xDB*/ ILLEGAL,
        /*0xDC*/ ILLEGAL,
        /*0xDD*/ DecodeEntry::new(CMP, AbsoluteX, 4, 3),
        /*0xDE*/ DecodeEntry::new(DEC, AbsoluteX, 7, 3),
        /*0xDF*/ ILLEGAL,
        /*0xE0*/ DecodeEntry::new(CPX, Immediate, 2, 2),
        /*0xE1*/ DecodeEntry::new(SBC, IndexedIndirect, 6, 2),
        /*0xE2*/ ILLEGAL,
        /*0xE3*/ ILLEGAL,
        /*0xE4*/ DecodeEntry::new(CPX, ZeroPage, 3, 2),
        /*0xE5*/ DecodeEntry::new(SBC, ZeroPage, 3, 2),
        /*0xE6*/ DecodeEntry::new(INC, ZeroPage, 5, 2),
        /*0xE7*/ ILLEGAL,
        /*0xE8*/ DecodeEntry::new(INX, Implied, 2, 1),
        /*0xE9*/ DecodeEntry::new(SBC, Immediate, 2, 2),
        /*0xEA*/ DecodeEntry::new(NOP, Implied, 2, 1),
        /*0xEB*/ ILLEGAL,
        /*0xEC*/ DecodeEntry::new(CPX, Absolute, 4, 3),
        /*0xED*/ DecodeEntry::new(SBC, Absolute, 4, 3),
        /*0xEE*/ DecodeEntry::new(INC, Absolute, 6, 3),
        /*0xEF*/ ILLEGAL,
        /*0xF0*/ DecodeEntry::new(BEQ, Relative, 2, 2),
        /*0xF1*/ DecodeEntry::new(SBC, IndirectIndexed, 5, 2),
        /*0xF2*/ ILLEGAL,
        /*0xF3*/ ILLEGAL,
        /*0xF4*/ ILLEGAL,
        /*0xF5*/ DecodeEntry::new(SBC, ZeroPageX, 4, 2),
        /*0xF6*/ DecodeEntry::new(INC, ZeroPageX, 6, 2),
        /*0xF7*/ ILLEGAL,
        /*0xF8*/ DecodeEntry::new(SED, Implied, 2, 1),
        /*0xF9*/ DecodeEntry::new(SBC, AbsoluteY, 4, 3),
        /*0xFA*/ ILLEGAL,
        /*0xFB*/ ILLEGAL,
        /*0xFC*/ ILLEGAL,
        /*0xFD*/ DecodeEntry::new(SBC, AbsoluteX, 4, 3),
        /*0xFE*/ DecodeEntry::new(INC, AbsoluteX, 7, 3),
        /*0xFF*/ ILLEGAL,
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn brk_decodes_to_implied_seven_cycles() {
        let entry = decode(0x00);
        assert_eq!(entry.opcode, Opcode::BRK);
        assert_eq!(entry.addressing_mode, AddressingMode::Implied);
        assert_eq!(entry.cycles, 7);
        assert_eq!(entry.bytes, 1);
    }

    #[test]
    pub fn lda_immediate_decodes_correctly() {
        let entry = decode(0xA9);
        assert_eq!(entry.opcode, Opcode::LDA);
        assert_eq!(entry.addressing_mode, AddressingMode::Immediate);
        assert_eq!(entry.bytes, 2);
    }

    #[test]
    pub fn undefined_opcodes_decode_to_illegal() {
        for byte in [0x02u8, 0x03, 0x0B, 0xF2, 0xFF] {
            assert_eq!(decode(byte).opcode, Opcode::Illegal, "byte {:#04x}", byte);
        }
    }
}
