//! BRK and RTI: software interrupt entry and the return path.

use nes6502::{Bus, Cpu, FlatRam};

fn setup_cpu() -> Cpu<FlatRam> {
    let mut ram = FlatRam::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    ram.write(0xFFFE, 0x00);
    ram.write(0xFFFF, 0x90); // IRQ/BRK handler at 0x9000
    Cpu::new(ram)
}

#[test]
fn test_brk_vectors_through_fffe() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x9000);
    assert!(cpu.flag_i());
    assert_eq!(cpu.cycles(), 7);
}

#[test]
fn test_brk_pushes_pc_plus_two_and_status_with_b() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x00);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    // return address 0x8002 (opcode address + 2), high byte first
    assert_eq!(cpu.bus().read(0x01FD), 0x80);
    assert_eq!(cpu.bus().read(0x01FC), 0x02);

    // pushed P carries B=1 and U=1 on top of I (reset) and C
    assert_eq!(cpu.bus().read(0x01FB), 0b0011_0101);
    assert_eq!(cpu.sp(), 0xFA);

    // the in-register copy never gains B
    assert!(!cpu.flag_b());
}

#[test]
fn test_rti_restores_flags_and_pc() {
    let mut cpu = setup_cpu();

    // hand-crafted interrupt frame: P, then return address 0x1234
    cpu.bus_mut().write(0x01FB, 0b1100_0001); // N, V, C
    cpu.bus_mut().write(0x01FC, 0x34);
    cpu.bus_mut().write(0x01FD, 0x12);
    cpu.set_sp(0xFA);
    cpu.bus_mut().write(0x8000, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x1234); // no +1, unlike RTS
    assert_eq!(cpu.sp(), 0xFD);
    assert!(cpu.flag_n() && cpu.flag_v() && cpu.flag_c());
    assert!(!cpu.flag_i());
    assert!(!cpu.flag_b()); // B discarded even if the frame had it
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_brk_then_rti_resumes_after_padding_byte() {
    let mut cpu = setup_cpu();

    // BRK at 0x8000, handler is a lone RTI
    cpu.bus_mut().write(0x8000, 0x00);
    cpu.bus_mut().write(0x9000, 0x40);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x9000);

    cpu.step().unwrap();

    // BRK is architecturally two bytes wide: execution resumes at 0x8002
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_rti_keeps_i_from_frame() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x01FB, 0b0010_0100); // I set in the frame
    cpu.bus_mut().write(0x01FC, 0x00);
    cpu.bus_mut().write(0x01FD, 0x70);
    cpu.set_sp(0xFA);
    cpu.bus_mut().write(0x8000, 0x40);

    cpu.step().unwrap();

    assert!(cpu.flag_i());
    assert_eq!(cpu.pc(), 0x7000);
}
