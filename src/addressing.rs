//! # Addressing Modes
//!
//! The 13 ways a 6502 instruction locates its operand. The mode determines
//! how many operand bytes follow the opcode and how the effective address is
//! computed from them (see the decoder in [`crate::cpu`]).

/// 6502 addressing mode enumeration.
///
/// # Operand sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative,
///   IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand; the operation is implied by the instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implied,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: ASL A, LSR A, ROL A
    Accumulator,

    /// 8-bit constant embedded in the instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address into the zero page (0x0000-0x00FF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero-page address indexed by X; wraps within the zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero-page address indexed by Y; wraps within the zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset from the address of the next instruction.
    /// Used only by the eight branch instructions.
    Relative,

    /// Full 16-bit little-endian address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X. Crossing a page boundary costs one
    /// extra cycle.
    AbsoluteX,

    /// 16-bit address indexed by Y. Crossing a page boundary costs one
    /// extra cycle.
    AbsoluteY,

    /// Jump through a 16-bit pointer. Used only by JMP, and subject to the
    /// NMOS page-wrap bug when the pointer's low byte is 0xFF.
    Indirect,

    /// Indexed indirect: the operand plus X selects a zero-page cell pair
    /// holding the effective address.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: a zero-page cell pair holds a base address to
    /// which Y is added. Crossing a page boundary costs one extra cycle.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implied | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}
