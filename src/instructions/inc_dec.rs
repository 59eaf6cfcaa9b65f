//! Increment and decrement instructions.
//!
//! INC and DEC are read-modify-write: the decoder latched the old value,
//! the new one must be written back to the effective address. The register
//! variants touch X and Y directly. All wrap modulo 256 and set N/Z from
//! the result.

use crate::cpu::Cpu;
use crate::memory::Bus;

/// INC - Increment Memory.
pub(crate) fn inc<B: Bus>(cpu: &mut Cpu<B>) {
    let v = cpu.operand.wrapping_add(1);
    cpu.bus.write(cpu.eff_addr, v);
    cpu.set_nz(v);
}

/// DEC - Decrement Memory.
pub(crate) fn dec<B: Bus>(cpu: &mut Cpu<B>) {
    let v = cpu.operand.wrapping_sub(1);
    cpu.bus.write(cpu.eff_addr, v);
    cpu.set_nz(v);
}

/// INX - Increment X Register.
pub(crate) fn inx<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_nz(cpu.x);
}

/// INY - Increment Y Register.
pub(crate) fn iny<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_nz(cpu.y);
}

/// DEX - Decrement X Register.
pub(crate) fn dex<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_nz(cpu.x);
}

/// DEY - Decrement Y Register.
pub(crate) fn dey<B: Bus>(cpu: &mut Cpu<B>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_nz(cpu.y);
}
