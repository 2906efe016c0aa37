//! Diagnostic payloads produced by the weft lexer front end.
//!
//! The lexer core never formats or reports diagnostics itself. Scanning
//! routines build [`LexDiagnostic`] values (a code, an offset relative to the
//! lexeme start, a width, and arguments) and hand them to the caller, which
//! interprets and reports them.

mod diagnostic;
mod error_code;

pub use diagnostic::LexDiagnostic;
pub use error_code::ErrorCode;
