//! ASL, LSR, ROL, ROR: single-bit movement, carry wiring, and the
//! read-modify-write writeback for memory modes.

use nes6502::{Bus, Cpu, FlatRam};

fn setup_cpu() -> Cpu<FlatRam> {
    let mut ram = FlatRam::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    Cpu::new(ram)
}

#[test]
fn test_asl_accumulator_shifts_one_bit() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x0A);
    cpu.set_a(0b0100_0001);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0b1000_0010);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_asl_carries_out_bit_7() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x0A);
    cpu.set_a(0x80);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}

#[test]
fn test_asl_zero_page_writes_back() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x06);
    cpu.bus_mut().write(0x8001, 0x42);
    cpu.bus_mut().write(0x0042, 0x21);

    cpu.step().unwrap();

    assert_eq!(cpu.bus().read(0x0042), 0x42);
    assert_eq!(cpu.a(), 0x00); // accumulator untouched in memory mode
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_lsr_accumulator() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x4A);
    cpu.set_a(0b0000_0011);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0b0000_0001);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n()); // bit 7 always clears on LSR
}

#[test]
fn test_lsr_absolute_writes_back() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x4E);
    cpu.bus_mut().write(0x8001, 0x00);
    cpu.bus_mut().write(0x8002, 0x02);
    cpu.bus_mut().write(0x0200, 0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.bus().read(0x0200), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_rol_rotates_carry_into_bit_0() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x2A);
    cpu.set_a(0b1000_0000);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0b0000_0001);
    assert!(cpu.flag_c()); // old bit 7
}

#[test]
fn test_rol_without_carry_in() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x2A);
    cpu.set_a(0b0100_0000);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0b1000_0000);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_rotates_carry_into_bit_7() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x6A);
    cpu.set_a(0b0000_0001);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0b1000_0000);
    assert!(cpu.flag_c()); // old bit 0
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_zero_page_x_writes_back() {
    let mut cpu = setup_cpu();

    // ROR $40,X with X=2 -> $42
    cpu.bus_mut().write(0x8000, 0x76);
    cpu.bus_mut().write(0x8001, 0x40);
    cpu.bus_mut().write(0x0042, 0b0000_0010);
    cpu.set_x(0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.bus().read(0x0042), 0b0000_0001);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_asl_absolute_x_is_seven_cycles_without_cross() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x1E);
    cpu.bus_mut().write(0x8001, 0x00);
    cpu.bus_mut().write(0x8002, 0x02);
    cpu.bus_mut().write(0x0205, 0x01);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.bus().read(0x0205), 0x02);
    assert_eq!(cpu.cycles(), 7);
}
