//! Fuzz target: step the CPU from arbitrary register state over arbitrary
//! memory and check that nothing panics and the cheap invariants hold.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nes6502::{Bus, Cpu, FlatRam};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    /// Opcode plus operand bytes at the PC.
    instruction: [u8; 3],
    /// Zero page, stack page, and a window at 0x4000.
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    data_page: [u8; 256],
}

fuzz_target!(|input: FuzzInput| {
    let mut ram = FlatRam::new();

    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    ram.write(0xFFFE, 0x00);
    ram.write(0xFFFF, 0x90);

    for (i, &b) in input.instruction.iter().enumerate() {
        ram.write(0x8000 + i as u16, b);
    }
    for (i, &b) in input.zero_page.iter().enumerate() {
        ram.write(i as u16, b);
    }
    for (i, &b) in input.stack_page.iter().enumerate() {
        ram.write(0x0100 + i as u16, b);
    }
    for (i, &b) in input.data_page.iter().enumerate() {
        ram.write(0x4000 + i as u16, b);
    }

    let mut cpu = Cpu::new(ram);
    cpu.set_a(input.a);
    cpu.set_x(input.x);
    cpu.set_y(input.y);
    cpu.set_sp(input.sp);
    cpu.set_status(input.status);

    // Illegal opcodes are a normal outcome here; panics are not.
    match cpu.step() {
        Ok(()) => {
            assert!(cpu.pending_cycles() >= 2);
            assert!(cpu.pending_cycles() <= 9);
        }
        Err(_) => {
            // pending stays at its pre-step value (8 out of reset)
            assert_eq!(cpu.pending_cycles(), 8);
        }
    }

    // the in-register B bit must never appear
    assert_eq!(cpu.status() & 0x10, 0);
});
