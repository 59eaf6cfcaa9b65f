//! Interactive machine monitor: load a hex-text program, point the RESET
//! vector at it, and single-step while watching registers, flags, and
//! memory.
//!
//! ```text
//! monitor program.hex --origin 8000
//! ```
//!
//! Commands at the prompt: Enter or `s` steps one instruction, `m <hex>`
//! dumps the 16-byte row containing that address, `r` resets, `q` quits.

use std::fs;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use log::error;

use nes6502::{disassembler, loader, Bus, Cpu, CpuError, FlatRam};

#[derive(Parser)]
#[command(about = "Single-step monitor for the NES 6502 core")]
struct Args {
    /// Program file: whitespace-separated hex byte pairs
    program: String,

    /// Load address and initial PC, in hex
    #[arg(long, default_value = "8000", value_parser = parse_hex_addr)]
    origin: u16,
}

fn parse_hex_addr(s: &str) -> Result<u16, String> {
    u16::from_str_radix(s.trim_start_matches("0x"), 16)
        .map_err(|e| format!("not a hex address: {e}"))
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match fs::read_to_string(&args.program) {
        Ok(text) => text,
        Err(e) => {
            error!("cannot read {}: {e}", args.program);
            return ExitCode::FAILURE;
        }
    };

    let mut ram = FlatRam::new();
    if let Err(e) = loader::load_hex(&mut ram, &text, args.origin) {
        error!("cannot load {}: {e}", args.program);
        return ExitCode::FAILURE;
    }
    ram.write(nes6502::RESET_VECTOR, args.origin as u8);
    ram.write(nes6502::RESET_VECTOR.wrapping_add(1), (args.origin >> 8) as u8);

    let mut cpu = Cpu::new(ram);
    println!("loaded {} at {:04X}; Enter/s step, m <addr> dump, r reset, q quit", args.program, args.origin);
    print_state(&cpu);

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                error!("stdin: {e}");
                return ExitCode::FAILURE;
            }
        }

        match line.trim() {
            "" | "s" => match cpu.step() {
                Ok(()) => print_state(&cpu),
                Err(CpuError::IllegalOpcode(byte)) => {
                    println!("illegal opcode {byte:02X}; state preserved");
                    print_state(&cpu);
                }
            },
            "r" => {
                cpu.reset();
                print_state(&cpu);
            }
            "q" => break,
            cmd => {
                if let Some(addr) = cmd.strip_prefix("m ").and_then(|a| parse_hex_addr(a).ok()) {
                    print_row(&cpu, addr & 0xFFF0);
                } else {
                    println!("? (Enter/s step, m <addr> dump, r reset, q quit)");
                }
            }
        }
    }

    ExitCode::SUCCESS
}

/// Registers, a `N V - B D I Z C` flag row, the next instruction, and the
/// memory rows a stepping session usually watches: the zero page head and
/// the current PC.
fn print_state<B: Bus>(cpu: &Cpu<B>) {
    let p = cpu.status();
    let flags: String = "NV-BDIZC"
        .chars()
        .enumerate()
        .map(|(i, c)| if p & (0x80 >> i) != 0 { c } else { '.' })
        .collect();

    println!(
        "PC={:04X} A={:02X} X={:02X} Y={:02X} S={:02X} P={p:02X} [{flags}] cyc={}",
        cpu.pc(),
        cpu.a(),
        cpu.x(),
        cpu.y(),
        cpu.sp(),
        cpu.cycles(),
    );
    println!("next: {}", disassembler::disassemble_at(cpu.bus(), cpu.pc()));
    print_row(cpu, 0x0000);
    print_row(cpu, cpu.pc() & 0xFFF0);
}

/// One 16-byte row, the byte at PC bracketed.
fn print_row<B: Bus>(cpu: &Cpu<B>, start: u16) {
    let mut row = format!("{start:04X} |");
    for i in 0..16 {
        let addr = start.wrapping_add(i);
        let byte = cpu.bus().read(addr);
        if addr == cpu.pc() {
            row.push_str(&format!("[{byte:02X}]"));
        } else {
            row.push_str(&format!(" {byte:02X} "));
        }
    }
    println!("{row}");
}
