//! Line assembler and the multi-line driver built on top of it.
//!
//! [`encode_line`] is the core pipeline: mnemonic lookup, tokenization,
//! operand reordering, format dispatch. [`Assembler`] is a thin builder
//! that walks a multi-line source and collects the encoded words — each
//! line is independent, so a caller can just as well loop over
//! [`assemble_line`](crate::assemble_line) and handle errors per line.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::encoder;
use crate::error::{AsmError, Span};
use crate::isa;
use crate::lexer;

/// Encode one line of assembly into its 32-bit instruction word.
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
/// ```
/// use rvasm::encode_line;
///
/// assert_eq!(encode_line("add x1, x2, x3")?, Some(0x003100b3));
/// assert_eq!(encode_line("# a comment")?, None);
/// # Ok::<(), rvasm::AsmError>(())
/// ```
pub fn encode_line(line: &str) -> Result<Option<u32>, AsmError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // The mnemonic is the first whitespace-delimited token, lower-cased
    // for the catalog lookup. Operand tokens keep their original case.
    let raw = line.split_whitespace().next().unwrap_or_default();
    let mnemonic = raw.to_lowercase();
    let Some(spec) = isa::lookup(&mnemonic) else {
        return Err(AsmError::UnknownMnemonic {
            mnemonic,
            span: Span::new(1, 1, 0, raw.len()),
        });
    };

    let tokens = lexer::tokenize(line);
    let word = encoder::encode_instruction(&spec, &mnemonic, line, &tokens)?;
    Ok(Some(word))
}

/// The result of a successful assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct AssemblyResult {
    /// The encoded instruction words, in source order.
    words: Vec<u32>,
}

impl AssemblyResult {
    /// The encoded words.
    #[must_use]
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Consume and return the words.
    #[must_use]
    pub fn into_words(self) -> Vec<u32> {
        self.words
    }

    /// Render each word as 8 lowercase hex digits, in source order.
    #[must_use]
    pub fn hex_lines(&self) -> Vec<String> {
        self.words.iter().map(|w| format!("{w:08x}")).collect()
    }

    /// Number of encoded instructions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether nothing was encoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Builder that drives [`encode_line`] over a multi-line source.
///
/// Blank and comment lines are skipped; the first failing line aborts
/// `emit` with its error, stamped with the source line number.
///
/// # Examples
///
/// ```
/// use rvasm::Assembler;
///
/// let mut asm = Assembler::new();
/// asm.emit("add x1, x2, x3\n# comment\nlui x1, 0x10000")?;
/// let result = asm.finish();
/// assert_eq!(result.words(), &[0x003100b3, 0x000100b7]);
/// # Ok::<(), rvasm::AsmError>(())
/// ```
#[derive(Debug, Default)]
pub struct Assembler {
    words: Vec<u32>,
    line: u32,
}

impl Assembler {
    /// Create an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode every line of `source`, appending the resulting words.
    ///
    /// # Errors
    ///
    /// Returns the first line's [`AsmError`]; words from preceding lines
    /// are kept, so a caller may fix the line and continue emitting.
    pub fn emit(&mut self, source: &str) -> Result<(), AsmError> {
        for line in source.lines() {
            self.line += 1;
            let lineno = self.line;
            if let Some(word) = encode_line(line).map_err(|e| e.at_line(lineno))? {
                self.words.push(word);
            }
        }
        Ok(())
    }

    /// Finish and return the collected result.
    pub fn finish(self) -> AssemblyResult {
        AssemblyResult { words: self.words }
    }
}
