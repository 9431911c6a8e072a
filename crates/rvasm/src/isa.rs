//! Instruction catalog: mnemonic → format tag and fixed encoding fields.
//!
//! The catalog is a deliberate subset of RV32I/RV64I. Only the mnemonics
//! listed in [`lookup`] are recognized; everything else — including real
//! base-ISA mnemonics such as `or`, `srl`, and `sra` — is rejected as an
//! unknown instruction. Downstream consumers depend on the exact membership,
//! so the set must not grow silently.

use core::fmt;

// ── Opcodes ─────────────────────────────────────────────────────────────

const OP_LUI: u32 = 0b011_0111;
const OP_JAL: u32 = 0b110_1111;
const OP_JALR: u32 = 0b110_0111;
const OP_BRANCH: u32 = 0b110_0011;
const OP_LOAD: u32 = 0b000_0011;
const OP_STORE: u32 = 0b010_0011;
const OP_IMM: u32 = 0b001_0011;
const OP_REG: u32 = 0b011_0011;
const OP_IMM_W: u32 = 0b001_1011; // RV64I W-suffix immediate ops
const OP_REG_W: u32 = 0b011_1011; // RV64I W-suffix register ops

// ── funct7 values ───────────────────────────────────────────────────────

const F7_BASE: u32 = 0b000_0000;
const F7_ALT: u32 = 0b010_0000; // SUB / SRAI

/// RISC-V base instruction format.
///
/// Each format defines a distinct 32-bit field layout; see the per-format
/// word builders in the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Format {
    /// Register-register: `funct7 | rs2 | rs1 | funct3 | rd | opcode`.
    R,
    /// Register-immediate, loads, and `jalr`: `imm[11:0] | rs1 | funct3 | rd | opcode`.
    I,
    /// Stores: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
    S,
    /// Conditional branches: `imm[12|10:5] | rs2 | rs1 | funct3 | imm[4:1|11] | opcode`.
    Sb,
    /// Upper-immediate: `imm[31:12] | rd | opcode`.
    U,
    /// Unconditional jumps: `imm[20|10:1|11|19:12] | rd | opcode`.
    Uj,
}

impl Format {
    /// Number of operand tokens the format consumes after the mnemonic.
    #[must_use]
    pub fn operand_count(self) -> usize {
        match self {
            Format::R | Format::I | Format::S | Format::Sb => 3,
            Format::U | Format::Uj => 2,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::R => write!(f, "R"),
            Format::I => write!(f, "I"),
            Format::S => write!(f, "S"),
            Format::Sb => write!(f, "SB"),
            Format::U => write!(f, "U"),
            Format::Uj => write!(f, "UJ"),
        }
    }
}

/// Fixed encoding fields for one mnemonic.
///
/// Constructed once per lookup from static data; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrSpec {
    /// Instruction format tag.
    pub format: Format,
    /// 7-bit major opcode.
    pub opcode: u32,
    /// 3-bit sub-opcode (zero where the format has none).
    pub funct3: u32,
    /// 7-bit sub-opcode (zero where the format has none).
    pub funct7: u32,
    /// The 12-bit immediate field is `funct7 | shamt[4:0]` instead of a
    /// plain immediate — shift-by-immediate instructions only.
    pub shamt_funct7: bool,
}

impl InstrSpec {
    const fn r(opcode: u32, funct3: u32, funct7: u32) -> Self {
        Self {
            format: Format::R,
            opcode,
            funct3,
            funct7,
            shamt_funct7: false,
        }
    }

    const fn i(opcode: u32, funct3: u32) -> Self {
        Self {
            format: Format::I,
            opcode,
            funct3,
            funct7: 0,
            shamt_funct7: false,
        }
    }

    const fn shift(opcode: u32, funct3: u32, funct7: u32) -> Self {
        Self {
            format: Format::I,
            opcode,
            funct3,
            funct7,
            shamt_funct7: true,
        }
    }

    const fn s(opcode: u32, funct3: u32) -> Self {
        Self {
            format: Format::S,
            opcode,
            funct3,
            funct7: 0,
            shamt_funct7: false,
        }
    }

    const fn sb(opcode: u32, funct3: u32) -> Self {
        Self {
            format: Format::Sb,
            opcode,
            funct3,
            funct7: 0,
            shamt_funct7: false,
        }
    }

    const fn u(opcode: u32) -> Self {
        Self {
            format: Format::U,
            opcode,
            funct3: 0,
            funct7: 0,
            shamt_funct7: false,
        }
    }

    const fn uj(opcode: u32) -> Self {
        Self {
            format: Format::Uj,
            opcode,
            funct3: 0,
            funct7: 0,
            shamt_funct7: false,
        }
    }
}

/// Look up a mnemonic in the catalog.
///
/// The caller lower-cases the mnemonic first; lookup itself is exact.
/// Returns `None` for anything outside the supported subset.
#[must_use]
pub fn lookup(mnemonic: &str) -> Option<InstrSpec> {
    Some(match mnemonic {
        // ── R-type ──────────────────────────────────────────────
        "add" => InstrSpec::r(OP_REG, 0b000, F7_BASE),
        "sub" => InstrSpec::r(OP_REG, 0b000, F7_ALT),
        "addw" => InstrSpec::r(OP_REG_W, 0b000, F7_BASE),
        "and" => InstrSpec::r(OP_REG, 0b111, F7_BASE),
        "xor" => InstrSpec::r(OP_REG, 0b100, F7_BASE),
        "sltu" => InstrSpec::r(OP_REG, 0b011, F7_BASE),

        // ── I-type ──────────────────────────────────────────────
        "addiw" => InstrSpec::i(OP_IMM_W, 0b000),
        "andi" => InstrSpec::i(OP_IMM, 0b111),
        "ori" => InstrSpec::i(OP_IMM, 0b110),
        "slli" => InstrSpec::shift(OP_IMM, 0b001, F7_BASE),
        "srli" => InstrSpec::shift(OP_IMM, 0b101, F7_BASE),
        "srai" => InstrSpec::shift(OP_IMM, 0b101, F7_ALT),
        "jalr" => InstrSpec::i(OP_JALR, 0b000),
        "lh" => InstrSpec::i(OP_LOAD, 0b001),
        "lw" => InstrSpec::i(OP_LOAD, 0b010),

        // ── S-type ──────────────────────────────────────────────
        "sb" => InstrSpec::s(OP_STORE, 0b000),
        "sw" => InstrSpec::s(OP_STORE, 0b010),

        // ── SB-type ─────────────────────────────────────────────
        "bge" => InstrSpec::sb(OP_BRANCH, 0b101),
        "bne" => InstrSpec::sb(OP_BRANCH, 0b001),

        // ── U-type ──────────────────────────────────────────────
        "lui" => InstrSpec::u(OP_LUI),

        // ── UJ-type ─────────────────────────────────────────────
        "jal" => InstrSpec::uj(OP_JAL),

        _ => return None,
    })
}
