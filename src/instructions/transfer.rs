//! Register transfer instructions.
//!
//! Every transfer sets N/Z from the copied value except TXS, which moves X
//! into the stack pointer without touching any flag.

use crate::cpu::Cpu;
use crate::memory::Bus;

/// TAX - Transfer Accumulator to X.
pub(crate) fn tax<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.x = cpu.a;
    cpu.set_nz(cpu.x);
}

/// TAY - Transfer Accumulator to Y.
pub(crate) fn tay<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.y = cpu.a;
    cpu.set_nz(cpu.y);
}

/// TXA - Transfer X to Accumulator.
pub(crate) fn txa<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.a = cpu.x;
    cpu.set_nz(cpu.a);
}

/// TYA - Transfer Y to Accumulator.
pub(crate) fn tya<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.a = cpu.y;
    cpu.set_nz(cpu.a);
}

/// TSX - Transfer Stack Pointer to X.
pub(crate) fn tsx<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.x = cpu.sp;
    cpu.set_nz(cpu.x);
}

/// TXS - Transfer X to Stack Pointer. No flags.
pub(crate) fn txs<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.sp = cpu.x;
}
