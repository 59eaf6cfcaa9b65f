//! AND, ORA, EOR, and the BIT quirks.

use nes6502::{Bus, Cpu, FlatRam};

fn setup_cpu() -> Cpu<FlatRam> {
    let mut ram = FlatRam::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    Cpu::new(ram)
}

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x29);
    cpu.bus_mut().write(0x8001, 0x0F);
    cpu.set_a(0xF5);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x05);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_and_to_zero() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x29);
    cpu.bus_mut().write(0x8001, 0x0F);
    cpu.set_a(0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_ora_sets_negative() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x09);
    cpu.bus_mut().write(0x8001, 0x80);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_eor_self_clears_accumulator() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x49);
    cpu.bus_mut().write(0x8001, 0x5A);
    cpu.set_a(0x5A);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_eor_zero_page() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x45);
    cpu.bus_mut().write(0x8001, 0x20);
    cpu.bus_mut().write(0x0020, 0xFF);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_bit_zero_from_masked_and() {
    let mut cpu = setup_cpu();

    // BIT $10 with A & M == 0 but M nonzero
    cpu.bus_mut().write(0x8000, 0x24);
    cpu.bus_mut().write(0x8001, 0x10);
    cpu.bus_mut().write(0x0010, 0x0F);
    cpu.set_a(0xF0);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.a(), 0xF0); // A untouched
}

#[test]
fn test_bit_copies_memory_bits_7_and_6() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x2C);
    cpu.bus_mut().write(0x8001, 0x00);
    cpu.bus_mut().write(0x8002, 0x02);
    cpu.bus_mut().write(0x0200, 0xC1);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(!cpu.flag_z()); // A & M == 0x01
    assert!(cpu.flag_n()); // bit 7 of M
    assert!(cpu.flag_v()); // bit 6 of M
    assert_eq!(cpu.cycles(), 4);
}
