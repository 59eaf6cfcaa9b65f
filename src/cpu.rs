//! # CPU State and Execution
//!
//! The [`Cpu`] struct is the register file of one emulated 6502 plus the
//! transient decode latches, generic over its [`Bus`]. Everything the
//! processor does funnels through three layers that share this state:
//!
//! - the **addressing-mode decoder** ([`Cpu::decode`]): advances PC past the
//!   operand bytes, resolves the effective address, latches the operand, and
//!   flags page crossings;
//! - the **instruction semantics** (the [`crate::instructions`] modules),
//!   dispatched by a `match` on [`Mnemonic`];
//! - the **interrupt machinery** ([`Cpu::reset`], [`Cpu::nmi`],
//!   [`Cpu::irq`]), which vectors through the fixed locations at the top of
//!   memory.
//!
//! ## Execution model
//!
//! - [`Cpu::step`] executes one whole instruction and charges its cycle cost
//!   to `pending_cycles`. Instructions are atomic; there is no
//!   sub-instruction cycle scheduling.
//! - [`Cpu::clock`] is one tick of the 1.789773 MHz clock: it fetches a new
//!   instruction only when the pending count has drained to zero, so the
//!   aggregate timing is cycle-accurate.
//! - [`Cpu::run`] drives `clock` against the wall clock, sleeping one
//!   [`TICK`] per cycle so other emulated components can synchronize.
//!
//! Interrupts are sampled between instructions only; an NMI or IRQ raised
//! mid-instruction is serviced after the instruction completes.

use std::time::Duration;

use log::{debug, trace};

use crate::addressing::AddressingMode;
use crate::instructions::{alu, branches, control, flags, inc_dec, load_store, shifts, stack, transfer};
use crate::memory::Bus;
use crate::opcodes::{Mnemonic, Opcode, OPCODE_TABLE};
use crate::CpuError;

/// NTSC NES CPU frequency in Hz.
pub const CLOCK_HZ: u32 = 1_789_773;

/// Wall-clock duration of one CPU cycle (10⁹ / 1 789 773 ns ≈ 558 ns).
pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / CLOCK_HZ as u64);

/// NMI vector location (little-endian pointer at 0xFFFA/0xFFFB).
pub const NMI_VECTOR: u16 = 0xFFFA;

/// RESET vector location (0xFFFC/0xFFFD).
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector location (0xFFFE/0xFFFF).
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Assembles a 16-bit address from little-endian bytes.
pub(crate) const fn word(lo: u8, hi: u8) -> u16 {
    (hi as u16) << 8 | lo as u16
}

/// 6502 register file, decode latches, and cycle accounting.
///
/// The CPU owns its bus; collaborators reach memory through
/// [`Cpu::bus`]/[`Cpu::bus_mut`]. All register arithmetic wraps: modulo 256
/// on A/X/Y/S, modulo 65536 on PC and addresses.
///
/// # Examples
///
/// ```
/// use nes6502::{Bus, Cpu, FlatRam};
///
/// let mut ram = FlatRam::new();
/// ram.write(0xFFFC, 0x00);
/// ram.write(0xFFFD, 0x80); // RESET vector -> 0x8000
/// ram.write(0x8000, 0xA9); // LDA #$42
/// ram.write(0x8001, 0x42);
///
/// let mut cpu = Cpu::new(ram);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert!(cpu.flag_i());
///
/// cpu.step().unwrap();
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.pending_cycles(), 2);
/// ```
pub struct Cpu<B: Bus> {
    /// Accumulator.
    pub(crate) a: u8,

    /// X index register.
    pub(crate) x: u8,

    /// Y index register.
    pub(crate) y: u8,

    /// Stack pointer low byte; the stack lives at `0x0100 | sp` and grows
    /// downward through page 1.
    pub(crate) sp: u8,

    /// Program counter; points at the next opcode byte.
    pub(crate) pc: u16,

    /// Negative flag (bit 7 of the last produced value).
    pub(crate) flag_n: bool,

    /// Overflow flag (signed overflow out of ADC/SBC, bit 6 via BIT).
    pub(crate) flag_v: bool,

    /// Break flag. Never set by hardware events; B=1 exists only in the
    /// status copies pushed by BRK and PHP.
    pub(crate) flag_b: bool,

    /// Decimal mode flag. Freely settable, ignored by ADC/SBC on the NES
    /// variant (the 2A03 has no BCD unit).
    pub(crate) flag_d: bool,

    /// Interrupt-disable flag; masks IRQ only, never NMI or RESET.
    pub(crate) flag_i: bool,

    /// Zero flag.
    pub(crate) flag_z: bool,

    /// Carry flag.
    pub(crate) flag_c: bool,

    /// Operand byte latched by the addressing-mode decoder (M).
    pub(crate) operand: u8,

    /// Effective address resolved by the addressing-mode decoder.
    pub(crate) eff_addr: u16,

    /// Set by AbsoluteX/AbsoluteY/IndirectY resolution when the indexed
    /// address leaves the base page; consumed (and cleared) by `step`.
    pub(crate) page_crossed: bool,

    /// Cycles left before the clock loop fetches the next instruction.
    pub(crate) pending_cycles: u8,

    /// Total cycles charged since the last RESET.
    pub(crate) cycles: u64,

    /// Memory this CPU executes against.
    pub(crate) bus: B,
}

impl<B: Bus> Cpu<B> {
    /// Creates a CPU and performs the power-on RESET.
    ///
    /// Equivalent to zeroing the register file and calling [`Cpu::reset`]:
    /// A=X=Y=0, S=0xFD, P has I and the unused bit set, PC is loaded from
    /// the RESET vector, and 8 cycles are pending.
    pub fn new(bus: B) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            pc: 0,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            operand: 0,
            eff_addr: 0,
            page_crossed: false,
            pending_cycles: 0,
            cycles: 0,
            bus,
        };
        cpu.reset();
        cpu
    }

    // ========== Clock loop ==========

    /// Executes exactly one instruction, regardless of pending cycles.
    ///
    /// Fetch, table lookup, addressing-mode decode, semantics; then
    /// `pending_cycles` is set to the instruction's full cost (base cycles,
    /// plus one for a page cross, plus the branch penalties) and the same
    /// amount is added to the running [`Cpu::cycles`] total.
    ///
    /// This is the single-step entry point debuggers use.
    ///
    /// # Errors
    ///
    /// [`CpuError::IllegalOpcode`] when the fetched byte has no entry in
    /// [`OPCODE_TABLE`]. PC has then already advanced past the offending
    /// byte and every register stays observable, so a driver that prefers
    /// NOP semantics can simply keep stepping.
    pub fn step(&mut self) -> Result<(), CpuError> {
        let at = self.pc;
        let byte = self.bus.read(at);
        self.pc = self.pc.wrapping_add(1);

        let entry = OPCODE_TABLE[byte as usize].ok_or(CpuError::IllegalOpcode(byte))?;
        trace!("{at:04X}  {} ({byte:02X})", entry.mnemonic);

        self.decode(entry.mode);
        let extra = self.dispatch(entry);

        let mut cost = entry.base_cycles + extra;
        if self.page_crossed {
            cost += 1;
            self.page_crossed = false;
        }
        self.pending_cycles = cost;
        self.cycles += u64::from(cost);
        Ok(())
    }

    /// Advances the emulation by one cycle of the 1.789773 MHz clock.
    ///
    /// When the pending count is zero this samples the bus IRQ line (see
    /// [`Bus::irq_active`]) and either enters the interrupt sequence or
    /// fetches and executes the next instruction; in either case one pending
    /// cycle is then consumed. `pending_cycles() == 0` therefore means
    /// exactly "the next tick fetches a new opcode".
    ///
    /// # Errors
    ///
    /// Propagates [`CpuError::IllegalOpcode`] from the embedded fetch.
    pub fn clock(&mut self) -> Result<(), CpuError> {
        if self.pending_cycles == 0 {
            if self.bus.irq_active() && !self.flag_i {
                self.irq();
            } else {
                self.step()?;
            }
        }
        self.pending_cycles -= 1;
        Ok(())
    }

    /// Drives [`Cpu::clock`] for exactly `budget` ticks without sleeping.
    ///
    /// This is the frame-locked model: 29780 ticks is one 60 Hz NTSC frame
    /// at [`CLOCK_HZ`]. Execution stops early on the first error.
    ///
    /// # Examples
    ///
    /// ```
    /// use nes6502::{Bus, Cpu, FlatRam};
    ///
    /// let mut ram = FlatRam::new();
    /// ram.write(0xFFFC, 0x00);
    /// ram.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8010 {
    ///     ram.write(addr, 0xEA); // NOP sled
    /// }
    ///
    /// let mut cpu = Cpu::new(ram);
    /// // 8 RESET ticks, then five 2-cycle NOPs
    /// cpu.run_for_cycles(18).unwrap();
    /// assert_eq!(cpu.pc(), 0x8005);
    /// ```
    pub fn run_for_cycles(&mut self, budget: u64) -> Result<(), CpuError> {
        for _ in 0..budget {
            self.clock()?;
        }
        Ok(())
    }

    /// Runs the clock loop in wall-clock time, sleeping one [`TICK`] per
    /// cycle, until an error stops it.
    pub fn run(&mut self) -> Result<(), CpuError> {
        loop {
            self.clock()?;
            std::thread::sleep(TICK);
        }
    }

    // ========== Interrupts ==========

    /// RESET entry: reinitializes the register file.
    ///
    /// A=X=Y=0, S=0xFD, all flags clear except I (and the conceptual unused
    /// bit), PC loaded from [`RESET_VECTOR`]. Nothing is pushed; the cycle
    /// total restarts and 8 cycles are pending.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;

        self.flag_n = false;
        self.flag_v = false;
        self.flag_b = false;
        self.flag_d = false;
        self.flag_i = true;
        self.flag_z = false;
        self.flag_c = false;

        self.pc = self.read_vector(RESET_VECTOR);

        self.operand = 0;
        self.eff_addr = 0;
        self.page_crossed = false;
        self.pending_cycles = 8;
        self.cycles = 0;

        debug!("RESET -> {:04X}", self.pc);
    }

    /// NMI entry: non-maskable, taken even with I set.
    ///
    /// Pushes PC (high byte first), pushes P with B clear, sets I, and
    /// vectors through [`NMI_VECTOR`]. Costs 8 cycles.
    pub fn nmi(&mut self) {
        self.interrupt(NMI_VECTOR, 8);
        debug!("NMI -> {:04X}", self.pc);
    }

    /// IRQ entry: ignored while I is set.
    ///
    /// Otherwise identical to [`Cpu::nmi`] but through [`IRQ_VECTOR`] at a
    /// cost of 7 cycles.
    pub fn irq(&mut self) {
        if self.flag_i {
            return;
        }
        self.interrupt(IRQ_VECTOR, 7);
        debug!("IRQ -> {:04X}", self.pc);
    }

    /// Shared NMI/IRQ entry sequence. The pushed status copy carries B=0 to
    /// distinguish hardware interrupts from BRK.
    fn interrupt(&mut self, vector: u16, cost: u8) {
        self.push((self.pc >> 8) as u8);
        self.push(self.pc as u8);
        self.push((self.status() | 0x20) & !0x10);

        self.flag_i = true;
        self.pc = self.read_vector(vector);

        self.pending_cycles = cost;
        self.cycles += u64::from(cost);
    }

    // ========== Addressing-mode decoder ==========

    /// Resolves the effective address for `mode`, advancing PC past the
    /// operand bytes, and latches the operand with a bus read.
    ///
    /// Implied fetches nothing and Accumulator latches A directly; every
    /// other mode ends with `operand <- bus[eff_addr]`. The pre-fetch is
    /// harmless for store-class instructions, which overwrite the cell.
    ///
    /// AbsoluteX, AbsoluteY, and IndirectY raise `page_crossed` when the
    /// index carries into the high address byte; `step` charges the extra
    /// cycle and clears the latch.
    fn decode(&mut self, mode: AddressingMode) {
        match mode {
            AddressingMode::Implied => return,

            AddressingMode::Accumulator => {
                self.operand = self.a;
                return;
            }

            AddressingMode::Immediate => {
                self.eff_addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
            }

            AddressingMode::ZeroPage => {
                self.eff_addr = self.bus.read(self.pc) as u16;
                self.pc = self.pc.wrapping_add(1);
            }

            AddressingMode::ZeroPageX => {
                self.eff_addr = self.bus.read(self.pc).wrapping_add(self.x) as u16;
                self.pc = self.pc.wrapping_add(1);
            }

            AddressingMode::ZeroPageY => {
                self.eff_addr = self.bus.read(self.pc).wrapping_add(self.y) as u16;
                self.pc = self.pc.wrapping_add(1);
            }

            AddressingMode::Relative => {
                // Branch target = next instruction + sign-extended offset.
                // The taken/page-cross penalties are charged by the branch
                // itself, not here.
                let offset = self.bus.read(self.pc) as i8;
                self.pc = self.pc.wrapping_add(1);
                self.eff_addr = self.pc.wrapping_add_signed(offset as i16);
            }

            AddressingMode::Absolute => {
                let lo = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let hi = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                self.eff_addr = word(lo, hi);
            }

            AddressingMode::AbsoluteX => {
                let lo = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let hi = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let base = word(lo, hi);
                self.eff_addr = base.wrapping_add(self.x as u16);
                self.page_crossed = self.eff_addr & 0xFF00 != base & 0xFF00;
            }

            AddressingMode::AbsoluteY => {
                let lo = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let hi = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let base = word(lo, hi);
                self.eff_addr = base.wrapping_add(self.y as u16);
                self.page_crossed = self.eff_addr & 0xFF00 != base & 0xFF00;
            }

            AddressingMode::IndirectX => {
                // The pointer is offset by X before the indirection; both
                // pointer cells stay inside the zero page.
                let ptr = self.bus.read(self.pc).wrapping_add(self.x);
                self.pc = self.pc.wrapping_add(1);
                let lo = self.bus.read(ptr as u16);
                let hi = self.bus.read(ptr.wrapping_add(1) as u16);
                self.eff_addr = word(lo, hi);
            }

            AddressingMode::IndirectY => {
                // Y is added after the indirection, so a page cross is
                // possible here, unlike IndirectX.
                let ptr = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let lo = self.bus.read(ptr as u16);
                let hi = self.bus.read(ptr.wrapping_add(1) as u16);
                let base = word(lo, hi);
                self.eff_addr = base.wrapping_add(self.y as u16);
                self.page_crossed = self.eff_addr & 0xFF00 != base & 0xFF00;
            }

            AddressingMode::Indirect => {
                let ptr_lo = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let ptr_hi = self.bus.read(self.pc);
                self.pc = self.pc.wrapping_add(1);
                let ptr = word(ptr_lo, ptr_hi);

                // NMOS page-wrap bug: a pointer ending in 0xFF fetches its
                // high byte from the start of the same page.
                let lo = self.bus.read(ptr);
                let hi = if ptr & 0x00FF == 0x00FF {
                    self.bus.read(ptr & 0xFF00)
                } else {
                    self.bus.read(ptr.wrapping_add(1))
                };
                self.eff_addr = word(lo, hi);
            }
        }

        self.operand = self.bus.read(self.eff_addr);
    }

    /// Central dispatcher: runs the semantics for `entry` and returns the
    /// extra cycles the instruction charges beyond its base cost (non-zero
    /// only for taken branches).
    fn dispatch(&mut self, entry: Opcode) -> u8 {
        use Mnemonic::*;

        match entry.mnemonic {
            // arithmetic and logic
            Adc => alu::adc(self),
            Sbc => alu::sbc(self),
            And => alu::and(self),
            Ora => alu::ora(self),
            Eor => alu::eor(self),
            Cmp => alu::cmp(self),
            Cpx => alu::cpx(self),
            Cpy => alu::cpy(self),
            Bit => alu::bit(self),

            // shifts and rotates
            Asl => shifts::asl(self, entry.mode),
            Lsr => shifts::lsr(self, entry.mode),
            Rol => shifts::rol(self, entry.mode),
            Ror => shifts::ror(self, entry.mode),

            // branches charge their own taken/page-cross penalties
            Bpl => return branches::bpl(self),
            Bmi => return branches::bmi(self),
            Bvc => return branches::bvc(self),
            Bvs => return branches::bvs(self),
            Bcc => return branches::bcc(self),
            Bcs => return branches::bcs(self),
            Bne => return branches::bne(self),
            Beq => return branches::beq(self),

            // control flow
            Jmp => control::jmp(self),
            Jsr => control::jsr(self),
            Rts => control::rts(self),
            Rti => control::rti(self),
            Brk => control::brk(self),
            Nop => control::nop(self),

            // flag operations
            Clc => flags::clc(self),
            Sec => flags::sec(self),
            Cli => flags::cli(self),
            Sei => flags::sei(self),
            Clv => flags::clv(self),
            Cld => flags::cld(self),
            Sed => flags::sed(self),

            // increment / decrement
            Inc => inc_dec::inc(self),
            Dec => inc_dec::dec(self),
            Inx => inc_dec::inx(self),
            Iny => inc_dec::iny(self),
            Dex => inc_dec::dex(self),
            Dey => inc_dec::dey(self),

            // loads and stores
            Lda => load_store::lda(self),
            Ldx => load_store::ldx(self),
            Ldy => load_store::ldy(self),
            Sta => load_store::sta(self),
            Stx => load_store::stx(self),
            Sty => load_store::sty(self),

            // stack
            Pha => stack::pha(self),
            Pla => stack::pla(self),
            Php => stack::php(self),
            Plp => stack::plp(self),

            // transfers
            Tax => transfer::tax(self),
            Tay => transfer::tay(self),
            Txa => transfer::txa(self),
            Tya => transfer::tya(self),
            Tsx => transfer::tsx(self),
            Txs => transfer::txs(self),
        }

        0
    }

    // ========== Stack and vector helpers ==========

    /// Pushes a byte: write at `0x0100 | S`, then decrement S (wrapping).
    pub(crate) fn push(&mut self, value: u8) {
        self.bus.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Pulls a byte: increment S (wrapping), then read at `0x0100 | S`.
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.bus.read(0x0100 | self.sp as u16)
    }

    /// Reads a little-endian word from one of the fixed vectors.
    pub(crate) fn read_vector(&self, at: u16) -> u16 {
        word(self.bus.read(at), self.bus.read(at.wrapping_add(1)))
    }

    /// Sets Z and N from a produced value: Z when zero, N from bit 7.
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    // ========== Status register packing ==========

    /// Packs the flags into the P byte: `NV1B DIZC`, with the unused bit 5
    /// always reading as 1.
    pub fn status(&self) -> u8 {
        let mut p = 0b0010_0000;
        if self.flag_n {
            p |= 0x80;
        }
        if self.flag_v {
            p |= 0x40;
        }
        if self.flag_b {
            p |= 0x10;
        }
        if self.flag_d {
            p |= 0x08;
        }
        if self.flag_i {
            p |= 0x04;
        }
        if self.flag_z {
            p |= 0x02;
        }
        if self.flag_c {
            p |= 0x01;
        }
        p
    }

    /// Unpacks a P byte into the flags, the PLP/RTI way: the in-register B
    /// is forced clear and the unused bit stays conceptually 1 no matter
    /// what the pulled copy carried.
    pub fn set_status(&mut self, p: u8) {
        self.flag_n = p & 0x80 != 0;
        self.flag_v = p & 0x40 != 0;
        self.flag_b = false;
        self.flag_d = p & 0x08 != 0;
        self.flag_i = p & 0x04 != 0;
        self.flag_z = p & 0x02 != 0;
        self.flag_c = p & 0x01 != 0;
    }

    // ========== Register accessors ==========

    /// Accumulator.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// X index register.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Y index register.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Stack pointer low byte; the full stack address is `0x0100 | sp`.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Program counter.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Operand latched by the last addressing-mode decode.
    pub fn operand(&self) -> u8 {
        self.operand
    }

    /// Effective address resolved by the last addressing-mode decode.
    pub fn eff_addr(&self) -> u16 {
        self.eff_addr
    }

    /// Cycles left before the next instruction fetch.
    pub fn pending_cycles(&self) -> u8 {
        self.pending_cycles
    }

    /// Total cycles charged since the last RESET.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Negative flag.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Overflow flag.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Break flag (always false outside pushed status copies).
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Decimal mode flag.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Interrupt-disable flag.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Zero flag.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Carry flag.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    /// Shared view of the bus, for debuggers and other observers.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Mutable access to the bus, for loaders and tests.
    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    // ========== Register setters ==========

    /// Sets the accumulator.
    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    /// Sets the X index register.
    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    /// Sets the Y index register.
    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    /// Sets the stack pointer low byte.
    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Sets the program counter.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets the carry flag.
    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }

    /// Sets the zero flag.
    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    /// Sets the interrupt-disable flag.
    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    /// Sets the decimal mode flag.
    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    /// Sets the overflow flag.
    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    /// Sets the negative flag.
    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }
}
