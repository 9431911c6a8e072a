//! Error types and source span tracking for diagnostics.

use alloc::string::String;
use core::fmt;

/// Source location for diagnostics.
///
/// Tracks the line, column, byte offset, and length of a token in the
/// assembly source text. The encoder operates line-at-a-time, so spans
/// produced during encoding carry line 1; the [`Assembler`](crate::Assembler)
/// driver rewrites the line number when it walks a multi-line source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column number (byte offset within line).
    pub col: u32,
    /// 0-based byte offset from start of the line.
    pub offset: usize,
    /// Byte length of the spanned region.
    pub len: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub fn new(line: u32, col: u32, offset: usize, len: usize) -> Self {
        Self {
            line,
            col,
            offset,
            len,
        }
    }

    /// A dummy span for constructs with no source position.
    #[must_use]
    pub fn dummy() -> Self {
        Self {
            line: 0,
            col: 0,
            offset: 0,
            len: 0,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Encoding error with source location and descriptive message.
///
/// Every error aborts the current line only. The encoder never logs and
/// never produces a partial encoding; the error is the whole diagnostic
/// surface.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsmError {
    /// Mnemonic not present in the instruction catalog.
    UnknownMnemonic {
        /// The mnemonic that was not recognized (already lower-cased).
        mnemonic: String,
        /// Source location of the mnemonic.
        span: Span,
    },

    /// Register index outside x0–x31.
    RegisterOutOfRange {
        /// The offending register token as written.
        token: String,
        /// Source location of the register token.
        span: Span,
    },

    /// Missing or malformed operand tokens for the instruction.
    InvalidOperands {
        /// Description of why the operands are invalid.
        detail: String,
        /// Source location of the instruction.
        span: Span,
    },

    /// Operand text is not a valid integer literal.
    ImmediateParse {
        /// The text that failed to parse.
        text: String,
        /// Source location of the immediate token.
        span: Span,
    },
}

impl AsmError {
    /// Source span of the error.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            AsmError::UnknownMnemonic { span, .. }
            | AsmError::RegisterOutOfRange { span, .. }
            | AsmError::InvalidOperands { span, .. }
            | AsmError::ImmediateParse { span, .. } => *span,
        }
    }

    /// Rewrite the span's line number — used by the multi-line driver so
    /// errors point at the source line, not at "line 1 of this line".
    pub(crate) fn at_line(mut self, line: u32) -> Self {
        match &mut self {
            AsmError::UnknownMnemonic { span, .. }
            | AsmError::RegisterOutOfRange { span, .. }
            | AsmError::InvalidOperands { span, .. }
            | AsmError::ImmediateParse { span, .. } => span.line = line,
        }
        self
    }
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmError::UnknownMnemonic { mnemonic, span } => {
                write!(f, "{}: unknown instruction '{}'", span, mnemonic)
            }
            AsmError::RegisterOutOfRange { token, span } => {
                write!(f, "{}: register out of range '{}'", span, token)
            }
            AsmError::InvalidOperands { detail, span } => {
                write!(f, "{}: invalid operand combination: {}", span, detail)
            }
            AsmError::ImmediateParse { text, span } => {
                write!(f, "{}: invalid immediate literal '{}'", span, text)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AsmError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn span_display() {
        let span = Span::new(3, 12, 45, 5);
        assert_eq!(format!("{}", span), "3:12");
    }

    #[test]
    fn span_dummy() {
        let span = Span::dummy();
        assert_eq!(span.line, 0);
        assert_eq!(span.col, 0);
    }

    #[test]
    fn unknown_mnemonic_display() {
        let err = AsmError::UnknownMnemonic {
            mnemonic: "or".into(),
            span: Span::new(1, 1, 0, 2),
        };
        assert_eq!(format!("{}", err), "1:1: unknown instruction 'or'");
    }

    #[test]
    fn register_out_of_range_display() {
        let err = AsmError::RegisterOutOfRange {
            token: "x32".into(),
            span: Span::new(1, 5, 4, 3),
        };
        assert_eq!(format!("{}", err), "1:5: register out of range 'x32'");
    }

    #[test]
    fn invalid_operands_display() {
        let err = AsmError::InvalidOperands {
            detail: "'add' expects 3 operands, got 1".into(),
            span: Span::new(2, 1, 0, 3),
        };
        assert_eq!(
            format!("{}", err),
            "2:1: invalid operand combination: 'add' expects 3 operands, got 1"
        );
    }

    #[test]
    fn immediate_parse_display() {
        let err = AsmError::ImmediateParse {
            text: "0xZZ".into(),
            span: Span::new(1, 13, 12, 4),
        };
        assert_eq!(format!("{}", err), "1:13: invalid immediate literal '0xZZ'");
    }

    #[test]
    fn at_line_rewrites_only_the_line() {
        let err = AsmError::ImmediateParse {
            text: "q".into(),
            span: Span::new(1, 13, 12, 1),
        };
        let moved = err.at_line(7);
        assert_eq!(moved.span(), Span::new(7, 13, 12, 1));
    }
}
