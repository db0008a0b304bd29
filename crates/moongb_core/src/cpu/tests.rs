use super::*;
use crate::config::{CarrySource, FlagQuirks};
use crate::mmu::Mmu;

struct TestBus {
    memory: [u8; 0x10000],
}

impl Default for TestBus {
    fn default() -> Self {
        Self {
            memory: [0; 0x10000],
        }
    }
}

impl Bus for TestBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.memory[addr as usize] = value;
    }
}

fn setup(program: &[u8]) -> (Cpu, TestBus) {
    setup_with(FlagQuirks::default(), program)
}

fn setup_with(quirks: FlagQuirks, program: &[u8]) -> (Cpu, TestBus) {
    let mut bus = TestBus::default();
    bus.memory[0x0100..0x0100 + program.len()].copy_from_slice(program);
    let mut cpu = Cpu::new(quirks);
    cpu.regs.pc = 0x0100;
    cpu.regs.sp = 0xDFF0;
    (cpu, bus)
}

#[test]
fn cpu_add_a_b_wraps_to_zero_with_carry() {
    // ADD A,B
    let (mut cpu, mut bus) = setup(&[0x80]);
    cpu.regs.a = 0x3A;
    cpu.regs.b = 0xC6;

    let cycles = cpu.execute(&mut bus);

    assert_eq!(cycles, 4);
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.flags.zero);
    assert!(cpu.flags.carry);
    assert!(cpu.flags.half_carry);
    assert!(!cpu.flags.subtract);
    assert_eq!(cpu.regs.f, 0xB0);
}

#[test]
fn cpu_add_post_result_mode_uses_updated_accumulator() {
    let quirks = FlagQuirks::builder()
        .carry_source(CarrySource::PostResult)
        .build();
    let (mut cpu, mut bus) = setup_with(quirks, &[0x80]);
    cpu.regs.a = 0x3A;
    cpu.regs.b = 0xC6;

    cpu.execute(&mut bus);

    // Flags come from 0x00 + 0xC6, which neither carries nor half-carries.
    assert_eq!(cpu.regs.a, 0x00);
    assert!(cpu.flags.zero);
    assert!(!cpu.flags.carry);
    assert!(!cpu.flags.half_carry);
}

fn post_result_quirks() -> FlagQuirks {
    FlagQuirks::builder()
        .carry_source(CarrySource::PostResult)
        .build()
}

#[test]
fn cpu_post_result_mode_alu_table() {
    // (program, A, B, carry in, A after, half, carry)
    let cases: &[(&[u8], u8, u8, bool, u8, bool, bool)] = &[
        // Register forms: flags from the new A and operand + carry.
        (&[0x88], 0x0F, 0x00, true, 0x10, false, false), // ADC A,B
        (&[0x88], 0x20, 0xFF, true, 0x20, false, false), // ADC A,B, 0xFF + 1 wraps
        (&[0x90], 0x10, 0x01, false, 0x0F, false, false), // SUB B
        (&[0x90], 0x01, 0x02, false, 0xFF, false, false), // SUB B
        (&[0x98], 0x05, 0xFF, true, 0x05, false, false), // SBC A,B, 0xFF + 1 wraps
        (&[0xB8], 0x10, 0x20, false, 0x10, false, false), // CP B
        (&[0xB8], 0x30, 0x20, false, 0x30, false, true), // CP B
        // Immediate forms: flags from the old A and operand + carry.
        (&[0xC6, 0xC6], 0x3A, 0x00, false, 0x00, true, true), // ADD A,n
        (&[0xCE, 0xFF], 0x20, 0x00, true, 0x20, false, false), // ADC A,n, wraps
        (&[0xCE, 0x01], 0x0F, 0x00, false, 0x10, true, false), // ADC A,n
        (&[0xD6, 0x01], 0x10, 0x00, false, 0x0F, true, false), // SUB n
        (&[0xDE, 0xFF], 0x05, 0x00, true, 0x05, false, false), // SBC A,n, wraps
        (&[0xFE, 0x20], 0x10, 0x00, false, 0x10, false, true), // CP n
        (&[0xFE, 0x20], 0x30, 0x00, false, 0x30, false, false), // CP n
    ];

    for &(program, a, b, carry_in, expected, half, carry) in cases {
        let (mut cpu, mut bus) = setup_with(post_result_quirks(), program);
        cpu.regs.a = a;
        cpu.regs.b = b;
        cpu.regs.f = if carry_in { 0x10 } else { 0x00 };

        cpu.execute(&mut bus);

        let opcode = program[0];
        assert_eq!(cpu.regs.a, expected, "opcode 0x{opcode:02X} A=0x{a:02X}");
        assert_eq!(cpu.flags.half_carry, half, "H for 0x{opcode:02X} A=0x{a:02X}");
        assert_eq!(cpu.flags.carry, carry, "C for 0x{opcode:02X} A=0x{a:02X}");
        assert_eq!(cpu.flags.zero, expected == 0 && opcode & 0x38 != 0x38);
        assert_eq!(cpu.flags.subtract, opcode & 0x10 != 0);
    }
}

#[test]
fn cpu_post_result_mode_inc_dec_table() {
    // (program, B, B after, half)
    let cases: &[(&[u8], u8, u8, bool)] = &[
        (&[0x04], 0x0F, 0x10, false), // INC B
        (&[0x04], 0x0E, 0x0F, true),  // INC B
        (&[0x05], 0x10, 0x0F, false), // DEC B
        (&[0x05], 0x01, 0x00, true),  // DEC B
    ];

    for &(program, b, expected, half) in cases {
        let (mut cpu, mut bus) = setup_with(post_result_quirks(), program);
        cpu.regs.b = b;
        cpu.regs.f = 0x10;

        cpu.execute(&mut bus);

        assert_eq!(cpu.regs.b, expected);
        assert_eq!(cpu.flags.half_carry, half, "0x{:02X} B=0x{b:02X}", program[0]);
        assert_eq!(cpu.flags.zero, expected == 0);
        assert!(cpu.flags.carry, "carry is kept");
    }

    // The default mode uses the operand.
    let (mut cpu, mut bus) = setup(&[0x04]);
    cpu.regs.b = 0x0F;
    cpu.execute(&mut bus);
    assert!(cpu.flags.half_carry);
}

#[test]
fn cpu_logic_subtract_flag_follows_quirk() {
    // XOR A
    let (mut cpu, mut bus) = setup(&[0xAF]);
    cpu.regs.a = 0x5A;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0);
    assert!(cpu.flags.zero);
    assert!(cpu.flags.subtract);

    let quirks = FlagQuirks::builder().logic_sets_subtract(false).build();
    let (mut cpu, mut bus) = setup_with(quirks, &[0xE6, 0x0F]);
    cpu.regs.a = 0xF3;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x03);
    assert!(!cpu.flags.subtract);
    assert!(cpu.flags.half_carry);
    assert!(!cpu.flags.carry);
}

#[test]
fn cpu_ld_hl_immediate_writes_through_mmu() {
    // Program lives in WRAM since ROM rejects writes.
    let mut mmu = Mmu::new();
    mmu.write_byte(0xC100, 0x36);
    mmu.write_byte(0xC101, 0x42);

    let mut cpu = Cpu::default();
    cpu.regs.pc = 0xC100;
    cpu.regs.set_hl(0xC000);

    let cycles = cpu.execute(&mut mmu);

    assert_eq!(cycles, 12);
    assert_eq!(mmu.read_byte(0xC000), 0x42);
    assert_eq!(cpu.regs.pc, 0xC102);
    assert_eq!(cpu.last_instruction().to_string(), "C100: 36   LD (HL),n [12 cycles]");
}

#[test]
fn cpu_bit_7_a_sets_half_carry_and_keeps_operand() {
    let (mut cpu, mut bus) = setup(&[0xCB, 0x7F]);
    cpu.regs.a = 0x80;
    cpu.regs.f = 0x10; // carry set

    let cycles = cpu.execute(&mut bus);

    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.a, 0x80);
    assert!(!cpu.flags.zero);
    assert!(cpu.flags.half_carry);
    assert!(!cpu.flags.subtract);
    assert!(cpu.flags.carry);
    assert_eq!(cpu.last_instruction().opcode, 0xCB7F);
    assert!(cpu.last_instruction().two_byte);
}

#[test]
fn cpu_bit_on_clear_bit_sets_zero() {
    // BIT 0,B
    let (mut cpu, mut bus) = setup(&[0xCB, 0x40]);
    cpu.regs.b = 0xFE;
    cpu.execute(&mut bus);
    assert!(cpu.flags.zero);
}

#[test]
fn cpu_cb_shift_group_covers_sla_through_srl() {
    assert_eq!(
        CbOp::decode(0x20),
        CbOp::Shift { kind: Shift::Sla, operand: Operand::Reg(Target::B) }
    );
    assert_eq!(
        CbOp::decode(0x2F),
        CbOp::Shift { kind: Shift::Sra, operand: Operand::Reg(Target::A) }
    );
    assert_eq!(
        CbOp::decode(0x36),
        CbOp::Shift { kind: Shift::Swap, operand: Operand::Indirect(Target::HL) }
    );
    assert_eq!(
        CbOp::decode(0x3F),
        CbOp::Shift { kind: Shift::Srl, operand: Operand::Reg(Target::A) }
    );
    assert_eq!(
        CbOp::decode(0x46),
        CbOp::Bit { bit: 0, operand: Operand::Indirect(Target::HL) }
    );
    assert_eq!(
        CbOp::decode(0xFF),
        CbOp::Set { bit: 7, operand: Operand::Reg(Target::A) }
    );
}

#[test]
fn cpu_swap_exchanges_nibbles_and_clears_carry() {
    // SWAP A
    let (mut cpu, mut bus) = setup(&[0xCB, 0x37]);
    cpu.regs.a = 0xF0;
    cpu.regs.f = 0x10;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x0F);
    assert!(!cpu.flags.carry);
    assert!(!cpu.flags.zero);
}

#[test]
fn cpu_cp_immediate_sets_zero_without_touching_a() {
    let (mut cpu, mut bus) = setup(&[0xFE, 0x42]);
    cpu.regs.a = 0x42;
    let cycles = cpu.execute(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.a, 0x42);
    assert!(cpu.flags.zero);
    assert!(cpu.flags.subtract);
    assert!(!cpu.flags.carry);
}

#[test]
fn cpu_sub_borrow_sets_carry_and_half() {
    // SUB n
    let (mut cpu, mut bus) = setup(&[0xD6, 0x01]);
    cpu.regs.a = 0x00;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0xFF);
    assert!(cpu.flags.carry);
    assert!(cpu.flags.half_carry);
    assert!(cpu.flags.subtract);
}

#[test]
fn cpu_daa_adjusts_bcd_addition() {
    // ADD A,B ; DAA
    let (mut cpu, mut bus) = setup(&[0x80, 0x27]);
    cpu.regs.a = 0x45;
    cpu.regs.b = 0x38;
    cpu.execute(&mut bus);
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x83);
    assert!(!cpu.flags.carry);
}

#[test]
fn cpu_inc_dec_keep_carry() {
    // INC B ; DEC C
    let (mut cpu, mut bus) = setup(&[0x04, 0x0D]);
    cpu.regs.b = 0x0F;
    cpu.regs.c = 0x01;
    cpu.regs.f = 0x10;

    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.b, 0x10);
    assert!(cpu.flags.half_carry);
    assert!(cpu.flags.carry);

    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.c, 0x00);
    assert!(cpu.flags.zero);
    assert!(cpu.flags.subtract);
    assert!(cpu.flags.carry);
}

#[test]
fn cpu_add_hl_keeps_zero_and_carries_from_bit_11() {
    // ADD HL,BC
    let (mut cpu, mut bus) = setup(&[0x09]);
    cpu.regs.set_hl(0x0FFF);
    cpu.regs.set_bc(0x0001);
    cpu.regs.f = 0x80;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.hl(), 0x1000);
    assert!(cpu.flags.zero);
    assert!(cpu.flags.half_carry);
    assert!(!cpu.flags.carry);
}

#[test]
fn cpu_add_sp_uses_signed_single_byte_immediate() {
    let (mut cpu, mut bus) = setup(&[0xE8, 0x08, 0xE8, 0xFF]);
    cpu.regs.sp = 0xFFF8;

    let cycles = cpu.execute(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.sp, 0x0000);
    assert!(cpu.flags.half_carry);
    assert!(cpu.flags.carry);
    assert!(!cpu.flags.zero);
    assert_eq!(cpu.regs.pc, 0x0102);

    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.sp, 0xFFFF);
}

#[test]
fn cpu_ld_hl_sp_offset() {
    let (mut cpu, mut bus) = setup(&[0xF8, 0xFE]);
    cpu.regs.sp = 0xC010;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.hl(), 0xC00E);
    assert_eq!(cpu.regs.sp, 0xC010);
}

#[test]
fn cpu_jr_offset_is_relative_to_next_instruction() {
    // JR -2 loops onto itself.
    let (mut cpu, mut bus) = setup(&[0x18, 0xFE]);
    let cycles = cpu.execute(&mut bus);
    assert_eq!(cycles, 8);
    assert_eq!(cpu.regs.pc, 0x0100);
}

#[test]
fn cpu_conditional_jumps_follow_flags() {
    // JP NZ,0x2000 with Z set falls through.
    let (mut cpu, mut bus) = setup(&[0xC2, 0x00, 0x20]);
    cpu.regs.f = 0x80;
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0103);

    let (mut cpu, mut bus) = setup(&[0xC2, 0x00, 0x20]);
    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.pc, 0x2000);
}

#[test]
fn cpu_call_and_ret_round_trip() {
    let (mut cpu, mut bus) = setup(&[0xCD, 0x00, 0x02]);
    bus.memory[0x0200] = 0xC9;

    assert_eq!(cpu.execute(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0200);
    assert_eq!(cpu.regs.sp, 0xDFEE);
    assert_eq!(bus.memory[0xDFEE], 0x03);
    assert_eq!(bus.memory[0xDFEF], 0x01);

    assert_eq!(cpu.execute(&mut bus), 12);
    assert_eq!(cpu.regs.pc, 0x0103);
    assert_eq!(cpu.regs.sp, 0xDFF0);
}

#[test]
fn cpu_cycle_costs_follow_access_count() {
    let cases: &[(&[u8], u32)] = &[
        (&[0x00], 4),             // NOP
        (&[0x41], 4),             // LD B,C
        (&[0x46], 8),             // LD B,(HL)
        (&[0x70], 8),             // LD (HL),B
        (&[0x36, 0x11], 12),      // LD (HL),n
        (&[0xC3, 0x00, 0x20], 12), // JP nn
        (&[0xCD, 0x00, 0x20], 20), // CALL nn
        (&[0xC9], 12),            // RET
        (&[0xC5], 12),            // PUSH BC
        (&[0xC1], 12),            // POP BC
        (&[0xFF], 12),            // RST 38H
        (&[0x18, 0x00], 8),       // JR 0
        (&[0x08, 0x00, 0xC0], 20), // LD (nn),SP
        (&[0xCB, 0x00], 8),       // RLC B
        (&[0xCB, 0x06], 16),      // RLC (HL)
        (&[0xCB, 0x46], 12),      // BIT 0,(HL)
        (&[0xCB, 0xC6], 16),      // SET 0,(HL)
        (&[0x34], 12),            // INC (HL)
        (&[0xEA, 0x00, 0xC0], 16), // LD (nn),A
        (&[0xF0, 0x80], 12),      // LDH A,(n)
    ];

    for (program, expected) in cases {
        let (mut cpu, mut bus) = setup(program);
        cpu.regs.set_hl(0xC000);
        let cycles = cpu.execute(&mut bus);
        assert_eq!(cycles, *expected, "program {:02X?}", program);
    }
}

#[test]
fn cpu_ldi_ldd_step_hl() {
    // LDI (HL),A ; LDD A,(HL)
    let (mut cpu, mut bus) = setup(&[0x22, 0x3A]);
    cpu.regs.a = 0x99;
    cpu.regs.set_hl(0xC000);
    bus.memory[0xC001] = 0x55;

    cpu.execute(&mut bus);
    assert_eq!(bus.memory[0xC000], 0x99);
    assert_eq!(cpu.regs.hl(), 0xC001);

    cpu.execute(&mut bus);
    assert_eq!(cpu.regs.a, 0x55);
    assert_eq!(cpu.regs.hl(), 0xC000);
}

#[test]
fn cpu_pop_af_keeps_popped_flags() {
    let (mut cpu, mut bus) = setup(&[0xF1]);
    bus.memory[0xDFF0] = 0xFF; // F
    bus.memory[0xDFF1] = 0x12; // A

    cpu.execute(&mut bus);

    assert_eq!(cpu.regs.a, 0x12);
    assert_eq!(cpu.regs.f, 0xF0);
    assert!(cpu.flags.zero && cpu.flags.subtract && cpu.flags.half_carry && cpu.flags.carry);
}

#[test]
fn cpu_push_af_uses_current_flags() {
    let (mut cpu, mut bus) = setup(&[0xF5]);
    cpu.regs.a = 0x34;
    cpu.regs.f = 0x50;
    cpu.execute(&mut bus);
    assert_eq!(bus.memory[0xDFEF], 0x34);
    assert_eq!(bus.memory[0xDFEE], 0x50);
}

#[test]
fn cpu_unknown_opcode_is_a_four_cycle_noop() {
    for opcode in [0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4, 0xFC, 0xFD] {
        assert_eq!(Op::decode(opcode), Op::Unknown(opcode));

        let (mut cpu, mut bus) = setup(&[opcode]);
        cpu.regs.a = 0x12;
        let before = cpu.regs;

        assert_eq!(cpu.execute(&mut bus), 4);
        assert_eq!(cpu.regs.pc, before.pc + 1);
        assert_eq!(cpu.regs.a, before.a);
        assert_eq!(cpu.regs.sp, before.sp);
    }
}

#[test]
fn cpu_stop_requires_trailing_zero() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00]);
    bus.memory[0xFF00] = 0xFF;
    assert_eq!(cpu.execute(&mut bus), 8);
    assert!(cpu.stopped);
    assert_eq!(cpu.regs.pc, 0x0102);

    // While stopped with every P1 line high, nothing runs.
    bus.memory[0xFF00] = 0xFF;
    assert_eq!(cpu.execute(&mut bus), 4);
    assert!(cpu.stopped);
    assert_eq!(cpu.regs.pc, 0x0102);

    bus.memory[0xFF00] = 0xEE;
    cpu.execute(&mut bus);
    assert!(!cpu.stopped);

    let (mut cpu, mut bus) = setup(&[0x10, 0x01]);
    assert_eq!(cpu.execute(&mut bus), 8);
    assert!(!cpu.stopped);
    assert_eq!(cpu.regs.pc, 0x0101);
}

#[test]
fn cpu_stop_ignores_lines_already_low_on_entry() {
    let (mut cpu, mut bus) = setup(&[0x10, 0x00]);
    // P1 as left by the boot state: select bits clear, line 3 low.
    bus.memory[0xFF00] = 0xC7;
    cpu.execute(&mut bus);
    assert!(cpu.stopped);

    for _ in 0..3 {
        assert_eq!(cpu.execute(&mut bus), 4);
        assert!(cpu.stopped);
    }
    assert_eq!(cpu.regs.pc, 0x0102);

    // Releasing the held line does not wake either.
    bus.memory[0xFF00] = 0xCF;
    cpu.execute(&mut bus);
    assert!(cpu.stopped);

    bus.memory[0xFF00] = 0xC6;
    cpu.execute(&mut bus);
    assert!(!cpu.stopped);
}

#[test]
fn cpu_decode_register_group_excludes_halt() {
    assert_eq!(Op::decode(0x76), Op::Halt);
    assert_eq!(
        Op::decode(0x41),
        Op::Ld {
            dst: Operand::Reg(Target::B),
            src: Operand::Reg(Target::C)
        }
    );
    assert_eq!(
        Op::decode(0x77),
        Op::Ld {
            dst: Operand::Indirect(Target::HL),
            src: Operand::Reg(Target::A)
        }
    );
    assert_eq!(
        Op::decode(0xBE),
        Op::Alu {
            op: AluOp::Cp,
            src: Operand::Indirect(Target::HL)
        }
    );
    assert_eq!(Op::decode(0xCB), Op::Prefix);
    assert_eq!(Op::decode(0xE7), Op::Rst(0x20));
    assert_eq!(Op::decode(0xF1), Op::Pop(Target::AF));
    assert_eq!(Op::decode(0x31), Op::LdImm16(Target::SP));
    assert_eq!(Op::decode(0x38), Op::Jr(Condition::Carry));
}

#[test]
fn cpu_ei_takes_effect_after_following_instruction() {
    // EI ; NOP ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0x00, 0x00]);
    bus.memory[0xFFFF] = 0x01;
    bus.memory[0xFF0F] = 0x01;

    assert_eq!(cpu.execute(&mut bus), 4);
    assert!(!cpu.ime);
    assert_eq!(cpu.pending_interrupt_state(), Some(true));

    // The instruction right after EI still runs uninterrupted.
    assert_eq!(cpu.execute(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert!(cpu.ime);
    assert_eq!(cpu.pending_interrupt_state(), None);

    // Now the V-Blank interrupt is serviced.
    assert_eq!(cpu.execute(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0040);
    assert!(!cpu.ime);
    assert_eq!(bus.memory[0xFF0F], 0x00);
    assert_eq!(bus.memory[0xDFEE], 0x02);
    assert_eq!(bus.memory[0xDFEF], 0x01);
}

#[test]
fn cpu_di_after_ei_cancels_enable() {
    // EI ; DI ; NOP ; NOP
    let (mut cpu, mut bus) = setup(&[0xFB, 0xF3, 0x00, 0x00]);
    for _ in 0..4 {
        cpu.execute(&mut bus);
    }
    assert!(!cpu.ime);
}

#[test]
fn cpu_reti_enables_immediately() {
    let (mut cpu, mut bus) = setup(&[0xD9]);
    bus.memory[0xDFF0] = 0x34;
    bus.memory[0xDFF1] = 0x12;
    cpu.execute(&mut bus);
    assert!(cpu.ime);
    assert_eq!(cpu.regs.pc, 0x1234);
}

#[test]
fn cpu_interrupt_priority_picks_lowest_bit() {
    let (mut cpu, mut bus) = setup(&[0x00]);
    cpu.ime = true;
    bus.memory[0xFFFF] = 0x1F;
    bus.memory[0xFF0F] = 0x14; // timer and joypad

    assert_eq!(cpu.execute(&mut bus), 20);
    assert_eq!(cpu.regs.pc, 0x0050);
    assert_eq!(bus.memory[0xFF0F], 0x10);
}

#[test]
fn cpu_halt_waits_for_pending_interrupt() {
    // HALT ; INC A
    let (mut cpu, mut bus) = setup(&[0x76, 0x3C]);
    cpu.execute(&mut bus);
    assert!(cpu.halted);

    assert_eq!(cpu.execute(&mut bus), 4);
    assert_eq!(cpu.regs.pc, 0x0101);

    // With IME clear, a pending interrupt only wakes the CPU.
    bus.memory[0xFFFF] = 0x04;
    bus.memory[0xFF0F] = 0x04;
    cpu.execute(&mut bus);
    assert!(!cpu.halted);
    assert_eq!(cpu.regs.a, 0x01);
    assert_eq!(cpu.regs.pc, 0x0102);
}

#[test]
fn cpu_boot_state_without_licensee_match() {
    let mut bus = TestBus::default();
    let mut cpu = Cpu::default();
    cpu.apply_boot_state(&mut bus);

    assert_eq!(cpu.regs.a, 0x11);
    assert_eq!(cpu.regs.f, 0x80);
    assert_eq!(cpu.regs.b, 0x00);
    assert_eq!(cpu.regs.hl(), 0x007C);
    assert_eq!(cpu.regs.pc, 0x0100);
    assert_eq!(cpu.regs.sp, 0xFFFE);
    assert_eq!(bus.memory[0xFF40], 0x91);
    assert_eq!(bus.memory[0xFF47], 0xFC);
    assert_eq!(bus.memory[0xFF0F], 0xE1);
}

#[test]
fn cpu_boot_state_sums_title_for_licensed_games() {
    let mut bus = TestBus::default();
    bus.memory[0x014B] = 0x33;
    bus.memory[0x0144] = b'0';
    bus.memory[0x0145] = b'1';
    bus.memory[0x0134] = 0x40;
    bus.memory[0x0135] = 0x03;

    let mut cpu = Cpu::default();
    cpu.apply_boot_state(&mut bus);

    assert_eq!(cpu.regs.b, 0x43);
    assert_eq!(cpu.regs.hl(), 0x991A);
}

#[test]
#[should_panic(expected = "not an 8-bit register")]
fn cpu_byte_view_of_register_pair_panics() {
    Registers::default().get_byte_reg(Target::HL);
}

#[test]
#[should_panic(expected = "not a 16-bit register")]
fn cpu_short_view_of_single_register_panics() {
    Registers::default().get_short_reg(Target::A);
}

#[test]
fn cpu_flag_register_round_trips_through_f() {
    let flags = FlagRegister {
        zero: true,
        subtract: false,
        half_carry: true,
        carry: false,
    };
    assert_eq!(u8::from(flags), 0xA0);
    assert_eq!(FlagRegister::from(0xAF), flags);
    assert_eq!(flags.to_string(), "Z-H-");
}
