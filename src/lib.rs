pub mod mos6502;
