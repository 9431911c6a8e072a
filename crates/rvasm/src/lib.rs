//! # rvasm — RISC-V instruction encoder
//!
//! `rvasm` turns single lines of RISC-V assembly text into their 32-bit
//! machine-code encoding, rendered as 8 lowercase hex digits.
//!
//! ## Quick Start
//!
//! ```rust
//! use rvasm::assemble_line;
//!
//! let hex = assemble_line("add x1, x2, x3")?;
//! assert_eq!(hex.as_deref(), Some("003100b3"));
//! # Ok::<(), rvasm::AsmError>(())
//! ```
//!
//! ## Scope
//!
//! - **Fixed subset of RV32I/RV64I** — 21 mnemonics across all six base
//!   formats (R, I, S, SB, U, UJ). Mnemonics outside the catalog — even
//!   real ones like `or` or `srl` — are rejected, deliberately.
//! - **One line, one word** — no labels, no relocation, no directives, no
//!   pseudo-instruction expansion. Branch and jump offsets are literal
//!   immediates supplied by the caller.
//! - **Two's-complement truncation** — immediates keep exactly the low N
//!   bits of their field width; there is no overflow check.
//! - **Pure Rust, `no_std` + `alloc`** — no I/O, no shared mutable state;
//!   every call is independent and safe to issue from any thread.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// An encoder intentionally performs narrowing / sign-changing casts between
// integer widths and uses dense hex literals; the lints below are expected
// and acceptable in this context.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc
)]

extern crate alloc;

/// Line assembler, multi-line driver, and assembly results.
pub mod assembler;
/// Field encoders, operand reordering, and per-format word builders.
pub(crate) mod encoder;
/// Error types and source-span diagnostics.
pub mod error;
/// Instruction catalog: mnemonic → format and fixed fields.
pub mod isa;
/// Tokenizer for one line of assembly text.
pub mod lexer;

// Re-exports
pub use assembler::{encode_line, Assembler, AssemblyResult};
pub use error::{AsmError, Span};
pub use isa::{lookup, Format, InstrSpec};
pub use lexer::{tokenize, Token};

use alloc::string::String;
use alloc::vec::Vec;

/// Encode one line of assembly and render it as 8 lowercase hex digits.
///
/// Returns `Ok(None)` for blank lines and lines starting with `#`.
///
/// # Errors
///
/// Returns [`AsmError`] if the mnemonic is unknown, a register is out of
/// range, an immediate fails to parse, or operand tokens are missing.
///
/// # Examples
///
/// ```rust
/// use rvasm::assemble_line;
///
/// assert_eq!(assemble_line("sw x1, 12(x2)")?.as_deref(), Some("00112623"));
/// assert_eq!(assemble_line("")?, None);
/// # Ok::<(), rvasm::AsmError>(())
/// ```
pub fn assemble_line(line: &str) -> Result<Option<String>, AsmError> {
    Ok(encode_line(line)?.map(|word| alloc::format!("{word:08x}")))
}

/// Assemble a multi-line source, returning one hex string per instruction.
///
/// Blank and comment lines produce no output. The first failing line
/// aborts with its error.
///
/// # Errors
///
/// Returns [`AsmError`] on the first failing line (see [`assemble_line`]).
///
/// # Examples
///
/// ```rust
/// use rvasm::assemble;
///
/// let hex = assemble("bne x1, x2, 16\n# loop exit\njal x1, 40")?;
/// assert_eq!(hex, ["00209863", "028000ef"]);
/// # Ok::<(), rvasm::AsmError>(())
/// ```
pub fn assemble(source: &str) -> Result<Vec<String>, AsmError> {
    let mut asm = Assembler::new();
    asm.emit(source)?;
    Ok(asm.finish().hex_lines())
}
