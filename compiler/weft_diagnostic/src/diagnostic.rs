use std::fmt;

use crate::ErrorCode;

/// A lexical diagnostic threaded from scanning routines to the caller.
///
/// `offset` is relative to the start of the lexeme being scanned when the
/// diagnostic was created (or absolute, if the reported position precedes
/// the lexeme start). `width` is measured in code units.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexDiagnostic {
    pub code: ErrorCode,
    pub offset: usize,
    pub width: usize,
    pub args: Vec<String>,
}

impl LexDiagnostic {
    /// Create a diagnostic without arguments.
    pub fn new(code: ErrorCode, offset: usize, width: usize) -> Self {
        LexDiagnostic {
            code,
            offset,
            width,
            args: Vec::new(),
        }
    }

    /// Attach a formatting argument.
    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Shift the offset by `delta` code units.
    ///
    /// Used when a diagnostic recorded against an inner construct is
    /// attached to an enclosing lexeme.
    #[must_use]
    pub fn rebased(mut self, delta: usize) -> Self {
        self.offset += delta;
        self
    }
}

impl fmt::Display for LexDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (+{}, width {})",
            self.code,
            self.code.description(),
            self.offset,
            self.width
        )?;
        for arg in &self.args {
            write!(f, " `{arg}`")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
