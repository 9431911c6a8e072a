//! Property-based tests using proptest.
//!
//! These tests verify encoder invariants across large, randomly generated
//! input spaces — complementing the targeted unit/integration tests and
//! the libfuzzer-based fuzz target.

use proptest::prelude::*;
use rvasm::{assemble_line, encode_line, AsmError};

// ── Strategies ──────────────────────────────────────────────────────────

/// Generates arbitrary ASCII strings (the encoder only accepts text input).
fn arb_asm_input() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::char::range('\0', '\x7f'), 0..128)
        .prop_map(|v| v.into_iter().collect())
}

/// Generates valid instruction lines from a curated pool.
fn valid_line() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "add x1, x2, x3",
        "sub x1, x2, x3",
        "addw x1, x2, x3",
        "and x5, x6, x7",
        "xor x1, x2, x3",
        "sltu x1, x2, x3",
        "addiw x1, x2, 10",
        "andi x5, x6, 12",
        "ori x1, x2, 7",
        "slli x1, x2, 1",
        "srli x3, x4, 2",
        "srai x5, x6, 3",
        "jalr x1, 20(x2)",
        "lw x1, 8(x2)",
        "lh x3, 4(x5)",
        "sw x1, 12(x2)",
        "sb x3, 5(x7)",
        "bge x1, x2, 8",
        "bne x1, x2, -4",
        "lui x1, 0x10000",
        "jal x1, 40",
    ])
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    /// Purity: the same line always encodes to the same word.
    #[test]
    fn encoding_is_deterministic(line in valid_line()) {
        prop_assert_eq!(encode_line(line).unwrap(), encode_line(line).unwrap());
    }

    /// Truncation law: the encoded I-type field equals the immediate
    /// modulo 2^12, as two's complement.
    #[test]
    fn andi_immediate_field_is_mod_4096(imm in any::<i32>()) {
        let word = encode_line(&format!("andi x1, x2, {imm}")).unwrap().unwrap();
        prop_assert_eq!(word >> 20, (imm as u32) & 0xFFF);
        // Fixed low bits: rs1=x2, funct3=111, rd=x1, opcode=0010011.
        prop_assert_eq!(word & 0xFFFFF, 0x17093);
    }

    /// Shift amounts keep exactly 5 bits; funct7 stays fixed above them.
    #[test]
    fn shift_amount_field_is_mod_32(shamt in any::<i64>()) {
        let word = encode_line(&format!("srai x5, x6, {shamt}")).unwrap().unwrap();
        prop_assert_eq!((word >> 20) & 0x1F, (shamt as u32) & 0x1F);
        prop_assert_eq!(word >> 25, 0b010_0000);
    }

    /// Branch offsets keep 13 bits with bit 0 dropped; reassembling the
    /// scattered field recovers the offset modulo 2^13 (even part).
    #[test]
    fn branch_offset_field_is_mod_8192(imm in any::<i32>()) {
        let word = encode_line(&format!("bne x1, x2, {imm}")).unwrap().unwrap();
        let bit12 = word >> 31;
        let bits10_5 = (word >> 25) & 0x3F;
        let bits4_1 = (word >> 8) & 0xF;
        let bit11 = (word >> 7) & 1;
        let offset = (bit12 << 12) | (bit11 << 11) | (bits10_5 << 5) | (bits4_1 << 1);
        prop_assert_eq!(offset, (imm as u32) & 0x1FFE);
    }

    /// Jump offsets keep 21 bits with bit 0 dropped.
    #[test]
    fn jump_offset_field_is_mod_2097152(imm in any::<i32>()) {
        let word = encode_line(&format!("jal x1, {imm}")).unwrap().unwrap();
        let bit20 = word >> 31;
        let bits10_1 = (word >> 21) & 0x3FF;
        let bit11 = (word >> 20) & 1;
        let bits19_12 = (word >> 12) & 0xFF;
        let offset = (bit20 << 20) | (bits19_12 << 12) | (bit11 << 11) | (bits10_1 << 1);
        prop_assert_eq!(offset, (imm as u32) & 0x1F_FFFE);
    }

    /// Registers 0–31 encode; everything above is a hard error.
    #[test]
    fn register_bound(n in 0u32..=255) {
        let result = encode_line(&format!("add x{n}, x2, x3"));
        if n <= 31 {
            let word = result.unwrap().unwrap();
            prop_assert_eq!((word >> 7) & 0x1F, n);
        } else {
            prop_assert!(matches!(result, Err(AsmError::RegisterOutOfRange { .. })), "expected RegisterOutOfRange");
        }
    }

    /// The encoder never panics, whatever the input.
    #[test]
    fn arbitrary_input_never_panics(input in arb_asm_input()) {
        let _ = assemble_line(&input);
        let _ = rvasm::assemble(&input);
    }
}
