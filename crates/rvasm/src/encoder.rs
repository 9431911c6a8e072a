//! Instruction encoding: field encoders, operand reordering, and the
//! per-format 32-bit word builders.
//!
//! ## Instruction formats
//!
//! ```text
//! R-type:  [funct7 | rs2 | rs1 | funct3 | rd  | opcode]
//! I-type:  [  imm[11:0]  | rs1 | funct3 | rd  | opcode]
//! S-type:  [imm[11:5]|rs2| rs1 | funct3 |imm[4:0]|opcode]
//! SB-type: [imm[12|10:5]|rs2|rs1|funct3|imm[4:1|11]|opcode]
//! U-type:  [      imm[31:12]             | rd  | opcode]
//! UJ-type: [imm[20|10:1|11|19:12]        | rd  | opcode]
//! ```
//!
//! Immediates are narrowed by two's-complement truncation: exactly the low
//! N bits of the value are kept, with no range check. Branch and jump
//! offsets are truncated to 13 and 21 bits respectively; their bit 0 is
//! implicitly zero and never stored.

use alloc::format;
use alloc::string::String;

use crate::error::{AsmError, Span};
use crate::isa::{Format, InstrSpec};
use crate::lexer::Token;

// ── Field encoders ──────────────────────────────────────────────────────

/// Parse a register token (`x<N>` or bare `<N>`) into its 5-bit field.
pub(crate) fn parse_reg(token: &Token<'_>) -> Result<u32, AsmError> {
    let digits = token.text.strip_prefix('x').unwrap_or(token.text);
    let Ok(num) = digits.parse::<i64>() else {
        return Err(AsmError::InvalidOperands {
            detail: format!("expected register, got '{}'", token.text),
            span: token.span,
        });
    };
    if !(0..=31).contains(&num) {
        return Err(AsmError::RegisterOutOfRange {
            token: String::from(token.text),
            span: token.span,
        });
    }
    Ok(num as u32)
}

/// Parse an immediate token with base auto-detection: `0x` hex, `0b`
/// binary, `0o` octal, otherwise decimal, with an optional leading sign.
pub(crate) fn parse_imm(token: &Token<'_>) -> Result<i128, AsmError> {
    let text = token.text;
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    // The radix parsers accept their own sign; a second sign inside the
    // body ("0x-ff", "+-5") is malformed.
    let parsed = if body.starts_with('-') || body.starts_with('+') {
        Err(())
    } else if let Some(hex) = strip_prefix2(body, "0x", "0X") {
        i128::from_str_radix(hex, 16).map_err(drop)
    } else if let Some(bin) = strip_prefix2(body, "0b", "0B") {
        i128::from_str_radix(bin, 2).map_err(drop)
    } else if let Some(oct) = strip_prefix2(body, "0o", "0O") {
        i128::from_str_radix(oct, 8).map_err(drop)
    } else {
        body.parse::<i128>().map_err(drop)
    };

    match parsed {
        Ok(magnitude) => Ok(if negative { -magnitude } else { magnitude }),
        Err(()) => Err(AsmError::ImmediateParse {
            text: String::from(text),
            span: token.span,
        }),
    }
}

#[inline]
fn strip_prefix2<'a>(s: &'a str, lower: &str, upper: &str) -> Option<&'a str> {
    s.strip_prefix(lower).or_else(|| s.strip_prefix(upper))
}

/// Keep exactly the low `width` bits of the value's two's-complement
/// representation. Negative values take their natural bit pattern;
/// oversized positive values lose their high bits silently.
#[inline]
pub(crate) fn truncate(value: i128, width: u32) -> u32 {
    debug_assert!(width < 32);
    ((value as u128) & ((1u128 << width) - 1)) as u32
}

// ── Word builders ───────────────────────────────────────────────────────
//
// Each builder takes register fields already validated to 5 bits and an
// immediate already truncated to the format's width, and concatenates the
// sub-fields most-significant first.

/// Build an R-type word.
#[inline]
fn r_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, rs2: u32, funct7: u32) -> u32 {
    (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Build an I-type word. `imm12` is the full 12-bit field — for shift
/// immediates the caller composes it as `funct7 | shamt`.
#[inline]
fn i_type(opcode: u32, rd: u32, funct3: u32, rs1: u32, imm12: u32) -> u32 {
    (imm12 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
}

/// Build an S-type word from a 12-bit immediate, split `imm[11:5]` / `imm[4:0]`.
#[inline]
fn s_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm12: u32) -> u32 {
    let imm_hi = (imm12 >> 5) & 0x7F;
    let imm_lo = imm12 & 0x1F;
    (imm_hi << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (imm_lo << 7) | opcode
}

/// Build an SB-type word from a 13-bit branch offset. Bit 0 is dropped.
#[inline]
fn b_type(opcode: u32, funct3: u32, rs1: u32, rs2: u32, imm13: u32) -> u32 {
    let bit12 = (imm13 >> 12) & 1;
    let bits10_5 = (imm13 >> 5) & 0x3F;
    let bits4_1 = (imm13 >> 1) & 0xF;
    let bit11 = (imm13 >> 11) & 1;
    (bit12 << 31)
        | (bits10_5 << 25)
        | (rs2 << 20)
        | (rs1 << 15)
        | (funct3 << 12)
        | (bits4_1 << 8)
        | (bit11 << 7)
        | opcode
}

/// Build a U-type word. `imm_hi20` is the 20-bit field stored in bits
/// 31:12 — the raw immediate right-shifted by 12 and masked.
#[inline]
fn u_type(opcode: u32, rd: u32, imm_hi20: u32) -> u32 {
    (imm_hi20 << 12) | (rd << 7) | opcode
}

/// Build a UJ-type word from a 21-bit jump offset. Bit 0 is dropped.
#[inline]
fn j_type(opcode: u32, rd: u32, imm21: u32) -> u32 {
    let bit20 = (imm21 >> 20) & 1;
    let bits10_1 = (imm21 >> 1) & 0x3FF;
    let bit11 = (imm21 >> 11) & 1;
    let bits19_12 = (imm21 >> 12) & 0xFF;
    (bit20 << 31) | (bits10_1 << 21) | (bit11 << 20) | (bits19_12 << 12) | (rd << 7) | opcode
}

// ── Operand access ──────────────────────────────────────────────────────

fn operand<'a, 's>(
    tokens: &'a [Token<'s>],
    idx: usize,
    mnemonic: &str,
    format: Format,
    span: Span,
) -> Result<&'a Token<'s>, AsmError> {
    tokens.get(idx).ok_or_else(|| AsmError::InvalidOperands {
        detail: format!(
            "'{}' expects {} operands, got {}",
            mnemonic,
            format.operand_count(),
            tokens.len().saturating_sub(1)
        ),
        span,
    })
}

// ── Dispatch ────────────────────────────────────────────────────────────

/// Encode one tokenized instruction into its 32-bit word.
///
/// Operand tokens are consumed in format-specific order. For several
/// formats that order differs from the textual order:
///
/// - Loads and `jalr` write `rd, imm(rs1)`, so the base register is token
///   3 and the offset token 2. The memory form is detected by a `(`
///   anywhere in the raw line, or by the mnemonic being `jalr` — the
///   historical heuristic, kept as-is.
/// - Stores write `rs2, imm(rs1)`: same swap.
///
/// Surplus tokens beyond the format's operand count are ignored.
pub(crate) fn encode_instruction(
    spec: &InstrSpec,
    mnemonic: &str,
    line: &str,
    tokens: &[Token<'_>],
) -> Result<u32, AsmError> {
    let span = tokens.first().map_or_else(Span::dummy, |t| t.span);
    let op = |idx: usize| operand(tokens, idx, mnemonic, spec.format, span);

    match spec.format {
        Format::R => {
            let rd = parse_reg(op(1)?)?;
            let rs1 = parse_reg(op(2)?)?;
            let rs2 = parse_reg(op(3)?)?;
            Ok(r_type(spec.opcode, rd, spec.funct3, rs1, rs2, spec.funct7))
        }

        Format::I => {
            // Memory form `rd, imm(rs1)` puts the base register last.
            let memory_form = line.contains('(') || mnemonic == "jalr";
            let (rs1_idx, imm_idx) = if memory_form { (3, 2) } else { (2, 3) };
            let rd = parse_reg(op(1)?)?;
            let rs1 = parse_reg(op(rs1_idx)?)?;
            let imm = parse_imm(op(imm_idx)?)?;
            let imm12 = if spec.shamt_funct7 {
                (spec.funct7 << 5) | truncate(imm, 5)
            } else {
                truncate(imm, 12)
            };
            Ok(i_type(spec.opcode, rd, spec.funct3, rs1, imm12))
        }

        Format::S => {
            let rs2 = parse_reg(op(1)?)?;
            let rs1 = parse_reg(op(3)?)?;
            let imm = parse_imm(op(2)?)?;
            Ok(s_type(
                spec.opcode,
                spec.funct3,
                rs1,
                rs2,
                truncate(imm, 12),
            ))
        }

        Format::Sb => {
            let rs1 = parse_reg(op(1)?)?;
            let rs2 = parse_reg(op(2)?)?;
            let imm = parse_imm(op(3)?)?;
            Ok(b_type(
                spec.opcode,
                spec.funct3,
                rs1,
                rs2,
                truncate(imm, 13),
            ))
        }

        Format::U => {
            let rd = parse_reg(op(1)?)?;
            let imm = parse_imm(op(2)?)?;
            Ok(u_type(spec.opcode, rd, truncate(imm >> 12, 20)))
        }

        Format::Uj => {
            let rd = parse_reg(op(1)?)?;
            let imm = parse_imm(op(2)?)?;
            Ok(j_type(spec.opcode, rd, truncate(imm, 21)))
        }
    }
}
