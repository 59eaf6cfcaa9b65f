//! Load and store instructions.
//!
//! Loads take the latched operand and set N/Z; stores write the register to
//! the effective address and touch no flags. The decoder's operand
//! pre-fetch is harmless for stores since the cell is overwritten here.

use crate::cpu::Cpu;
use crate::memory::Bus;

/// LDA - Load Accumulator.
pub(crate) fn lda<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.a = cpu.operand;
    cpu.set_nz(cpu.a);
}

/// LDX - Load X Register.
pub(crate) fn ldx<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.x = cpu.operand;
    cpu.set_nz(cpu.x);
}

/// LDY - Load Y Register.
pub(crate) fn ldy<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.y = cpu.operand;
    cpu.set_nz(cpu.y);
}

/// STA - Store Accumulator.
pub(crate) fn sta<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.bus.write(cpu.eff_addr, cpu.a);
}

/// STX - Store X Register.
pub(crate) fn stx<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.bus.write(cpu.eff_addr, cpu.x);
}

/// STY - Store Y Register.
pub(crate) fn sty<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.bus.write(cpu.eff_addr, cpu.y);
}
