//! # Assembly Helpers
//!
//! The reverse direction of the opcode table: mnemonic plus addressing mode
//! back to the opcode byte, and operand-checked instruction encoding. Handy
//! for building test programs without a hex listing. There is no parser and
//! there are no labels; text assembly stays out of scope.

use crate::addressing::AddressingMode;
use crate::opcodes::{Mnemonic, OPCODE_TABLE};

/// Errors from [`encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AsmError {
    /// The mnemonic does not exist with that addressing mode.
    #[error("{mnemonic} has no {mode:?} encoding")]
    NoSuchEncoding {
        /// Requested instruction.
        mnemonic: Mnemonic,
        /// Requested addressing mode.
        mode: AddressingMode,
    },

    /// Operand byte count does not match the addressing mode.
    #[error("{mnemonic} {mode:?} takes {expected} operand byte(s), got {got}")]
    OperandLength {
        /// Requested instruction.
        mnemonic: Mnemonic,
        /// Requested addressing mode.
        mode: AddressingMode,
        /// Operand bytes the mode requires.
        expected: u8,
        /// Operand bytes supplied.
        got: usize,
    },
}

/// Looks up the opcode byte for a mnemonic/mode pair.
///
/// # Examples
///
/// ```
/// use nes6502::{assembler, AddressingMode, Mnemonic};
///
/// assert_eq!(
///     assembler::opcode_for(Mnemonic::Lda, AddressingMode::Immediate),
///     Some(0xA9)
/// );
/// assert_eq!(
///     assembler::opcode_for(Mnemonic::Lda, AddressingMode::Relative),
///     None
/// );
/// ```
pub fn opcode_for(mnemonic: Mnemonic, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE.iter().enumerate().find_map(|(byte, entry)| {
        entry
            .filter(|e| e.mnemonic == mnemonic && e.mode == mode)
            .map(|_| byte as u8)
    })
}

/// All addressing modes a mnemonic is encodable with.
pub fn modes_for(mnemonic: Mnemonic) -> Vec<AddressingMode> {
    OPCODE_TABLE
        .iter()
        .flatten()
        .filter(|e| e.mnemonic == mnemonic)
        .map(|e| e.mode)
        .collect()
}

/// Encodes one instruction as opcode byte plus operand bytes.
///
/// # Errors
///
/// [`AsmError::NoSuchEncoding`] for a pair the 6502 does not offer;
/// [`AsmError::OperandLength`] when `operands` does not match the mode's
/// size.
///
/// # Examples
///
/// ```
/// use nes6502::{assembler, AddressingMode, Mnemonic};
///
/// let bytes =
///     assembler::encode(Mnemonic::Sta, AddressingMode::Absolute, &[0x00, 0x02]).unwrap();
/// assert_eq!(bytes, vec![0x8D, 0x00, 0x02]);
/// ```
pub fn encode(
    mnemonic: Mnemonic,
    mode: AddressingMode,
    operands: &[u8],
) -> Result<Vec<u8>, AsmError> {
    let opcode =
        opcode_for(mnemonic, mode).ok_or(AsmError::NoSuchEncoding { mnemonic, mode })?;

    let expected = mode.operand_bytes();
    if operands.len() != expected as usize {
        return Err(AsmError::OperandLength {
            mnemonic,
            mode,
            expected,
            got: operands.len(),
        });
    }

    let mut bytes = Vec::with_capacity(1 + operands.len());
    bytes.push(opcode);
    bytes.extend_from_slice(operands);
    Ok(bytes)
}
