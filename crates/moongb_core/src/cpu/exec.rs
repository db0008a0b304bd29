mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu, Op};

impl Cpu {
    /// Execute a decoded base opcode.
    ///
    /// Cycle cost is not returned here: every counted access made by the
    /// handlers feeds `execute`'s total.
    pub(super) fn exec_op<B: Bus>(&mut self, bus: &mut B, op: Op) {
        match op {
            Op::Nop => {}

            // Loads.
            Op::Ld { dst, src } => self.exec_ld(bus, dst, src),
            Op::LdImm16(target) => self.exec_ld_rr_d16(bus, target),
            Op::LdSpHl => self.regs.sp = self.regs.hl(),
            Op::LdHlSpOffset => self.exec_ld_hl_sp_offset(bus),
            Op::StoreSp => self.exec_store_sp(bus),

            // Increments and decrements.
            Op::Inc(operand) => self.exec_inc8(bus, operand),
            Op::Dec(operand) => self.exec_dec8(bus, operand),
            Op::Inc16(target) => self.exec_inc16(target),
            Op::Dec16(target) => self.exec_dec16(target),

            // Arithmetic.
            Op::Alu { op, src } => self.exec_alu(bus, op, src),
            Op::AddHl(target) => self.exec_add_hl(target),
            Op::AddSpOffset => self.exec_add_sp_offset(bus),
            Op::Daa => self.alu_daa(),
            Op::Cpl => self.exec_cpl(),
            Op::Ccf => self.exec_ccf(),
            Op::Scf => self.exec_scf(),
            Op::RotateA(kind) => self.regs.a = self.shift(kind, self.regs.a, false),

            // Stack.
            Op::Push(target) => self.exec_push(bus, target),
            Op::Pop(target) => self.exec_pop(bus, target),

            // Control flow.
            Op::Jp(cond) => self.exec_jp(bus, cond),
            Op::JpHl => self.regs.pc = self.regs.hl(),
            Op::Jr(cond) => self.exec_jr(bus, cond),
            Op::Call(cond) => self.exec_call(bus, cond),
            Op::Ret(cond) => self.exec_ret(bus, cond),
            Op::Reti => self.exec_reti(bus),
            Op::Rst(vector) => self.exec_rst(bus, vector),

            // System.
            Op::Halt => self.halted = true,
            Op::Stop => self.exec_stop(bus),
            Op::Di => self.schedule_ime(false),
            Op::Ei => self.schedule_ime(true),

            Op::Prefix => unreachable!("CB prefix is dispatched by execute"),
            Op::Unknown(opcode) => {
                log::debug!(
                    "unknown opcode 0x{opcode:02X} at 0x{:04X}; A={:02X} F={:02X} BC={:04X} DE={:04X} HL={:04X} SP={:04X}",
                    self.regs.pc.wrapping_sub(1),
                    self.regs.a,
                    u8::from(self.flags),
                    self.regs.bc(),
                    self.regs.de(),
                    self.regs.hl(),
                    self.regs.sp,
                );
            }
        }
    }
}
