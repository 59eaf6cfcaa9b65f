//! INC/DEC on memory and the register increment/decrement family.

use nes6502::{Bus, Cpu, FlatRam};

fn setup_cpu() -> Cpu<FlatRam> {
    let mut ram = FlatRam::new();
    ram.write(0xFFFC, 0x00);
    ram.write(0xFFFD, 0x80);
    Cpu::new(ram)
}

#[test]
fn test_inc_zero_page() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0xE6);
    cpu.bus_mut().write(0x8001, 0x10);
    cpu.bus_mut().write(0x0010, 0x41);

    cpu.step().unwrap();

    assert_eq!(cpu.bus().read(0x0010), 0x42);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_inc_wraps_to_zero() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0xE6);
    cpu.bus_mut().write(0x8001, 0x10);
    cpu.bus_mut().write(0x0010, 0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.bus().read(0x0010), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_dec_absolute() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0xCE);
    cpu.bus_mut().write(0x8001, 0x00);
    cpu.bus_mut().write(0x8002, 0x02);
    cpu.bus_mut().write(0x0200, 0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.bus().read(0x0200), 0xFF);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_inx_and_wrap() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0xE8);
    cpu.set_x(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_iny() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0xC8);
    cpu.set_y(0x7F);

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x80);
    assert!(cpu.flag_n());
}

#[test]
fn test_dex_to_zero() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0xCA);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_dey_wraps() {
    let mut cpu = setup_cpu();

    cpu.bus_mut().write(0x8000, 0x88);
    cpu.set_y(0x00);

    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0xFF);
    assert!(cpu.flag_n());
}
