mod alu;
mod bus;
mod cb;
mod decode;
mod exec;
mod helpers;
mod init;
mod instruction;
mod interrupts;
mod regs;

pub use bus::Bus;
pub use decode::{AluOp, CbOp, Condition, Op, Operand, Shift};
pub use instruction::Instruction;
pub use interrupts::InterruptFlags;
pub use regs::{FlagBits, FlagRegister, Registers, Target};

use crate::config::FlagQuirks;

const P1_ADDR: u16 = 0xFF00;

/// Game Boy CPU core.
///
/// `execute` runs one instruction against a [`Bus`] and reports how many
/// T-cycles it took. Every counted bus access costs 4 cycles and each call
/// adds a fixed 4-cycle tail for the opcode fetch.
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    /// Decoded F. Only authoritative while an opcode executes; `regs.f`
    /// holds the value between instructions.
    pub flags: FlagRegister,
    pub ime: bool,
    pub halted: bool,
    /// STOP low-power state. Cleared once a joypad line on P1 goes low.
    pub stopped: bool,
    /// P1 input lines (low nibble) that were high when STOP was entered.
    stop_lines: u8,
    /// IME value requested by DI/EI, applied one instruction later.
    next_interrupt_state: Option<bool>,
    /// Set after the DI/EI instruction itself has completed.
    interrupt_delay: bool,
    quirks: FlagQuirks,
    /// Counted bus accesses during the current `execute` call.
    accesses: u32,
    last_instruction: Instruction,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new(FlagQuirks::default())
    }
}

impl Cpu {
    pub fn new(quirks: FlagQuirks) -> Self {
        Self {
            regs: Registers::default(),
            flags: FlagRegister::default(),
            ime: false,
            halted: false,
            stopped: false,
            stop_lines: 0x0F,
            next_interrupt_state: None,
            interrupt_delay: false,
            quirks,
            accesses: 0,
            last_instruction: Instruction::default(),
        }
    }

    pub fn quirks(&self) -> FlagQuirks {
        self.quirks
    }

    /// Instruction record of the most recent `execute` call that fetched
    /// an opcode.
    pub fn last_instruction(&self) -> &Instruction {
        &self.last_instruction
    }

    /// IME value scheduled by a DI/EI that has not taken effect yet.
    pub fn pending_interrupt_state(&self) -> Option<bool> {
        self.next_interrupt_state
    }

    /// Execute one instruction (or interrupt entry) and return its cost in
    /// T-cycles.
    pub fn execute<B: Bus>(&mut self, bus: &mut B) -> u32 {
        if self.stopped {
            let p1 = bus.read8(P1_ADDR);
            // Wake on a falling edge: a line high at entry that now reads low.
            if self.stop_lines & !p1 & 0x0F != 0 {
                log::debug!("leaving STOP, P1=0x{p1:02X}");
                self.stopped = false;
            }
            return 4;
        }

        if let Some(cycles) = self.handle_interrupts(bus) {
            return cycles;
        }

        if self.halted {
            if self.interrupt_pending(bus) {
                // IME is clear here, otherwise the interrupt would have
                // been serviced above.
                self.halted = false;
            } else {
                return 4;
            }
        }

        self.accesses = 0;
        let pc = self.regs.pc;
        let opcode = bus.read8(pc);
        self.regs.pc = pc.wrapping_add(1);
        log::trace!("fetch 0x{opcode:02X} at 0x{pc:04X}");

        self.flags = FlagRegister::from(self.regs.f);

        let op = Op::decode(opcode);
        let mut instruction = match op {
            Op::Prefix => {
                let cb = self.fetch8(bus);
                let cb_op = CbOp::decode(cb);
                self.exec_cb(bus, cb_op);
                Self::describe_cb(pc, cb, cb_op)
            }
            op => {
                self.exec_op(bus, op);
                Self::describe(pc, opcode, op)
            }
        };

        self.regs.f = self.flags.into();

        let cycles = self.accesses * 4 + 4;
        instruction.cycles = cycles;
        log::trace!("{instruction}");
        self.last_instruction = instruction;

        self.apply_ime_delay();
        cycles
    }

    fn describe(pc: u16, opcode: u8, op: Op) -> Instruction {
        let (mnemonic, target1, o1, target2, o2) = op.describe();
        Instruction {
            mnemonic,
            target1,
            target2,
            t1_indirect: target1 != Target::None && o1.is_indirect(),
            t2_indirect: target2 != Target::None && o2.is_indirect(),
            pc,
            opcode: u16::from(opcode),
            two_byte: false,
            cycles: 0,
        }
    }

    fn describe_cb(pc: u16, cb: u8, op: CbOp) -> Instruction {
        let (mnemonic, target1, target2) = op.describe();
        let indirect = op.operand().is_indirect();
        Instruction {
            mnemonic,
            target1,
            target2,
            t1_indirect: indirect && !matches!(target1, Target::Bit(_)),
            t2_indirect: indirect && matches!(target1, Target::Bit(_)),
            pc,
            opcode: 0xCB00 | u16::from(cb),
            two_byte: true,
            cycles: 0,
        }
    }

    /// Log the register file, IME state and the last instruction.
    pub fn dump(&self) {
        let r = &self.regs;
        log::info!(
            "CPU A={:02X} F={:02X} [{}] B={:02X} C={:02X} D={:02X} E={:02X} H={:02X} L={:02X} SP={:04X} PC={:04X}",
            r.a,
            r.f,
            FlagRegister::from(r.f),
            r.b,
            r.c,
            r.d,
            r.e,
            r.h,
            r.l,
            r.sp,
            r.pc,
        );
        log::info!(
            "CPU ime={} pending={:?} halted={} stopped={}",
            self.ime,
            self.next_interrupt_state,
            self.halted,
            self.stopped
        );
        log::info!("CPU last: {}", self.last_instruction);
    }
}

#[cfg(test)]
mod tests;
