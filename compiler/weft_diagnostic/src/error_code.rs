use std::fmt;

/// Error codes for lexical diagnostics.
///
/// Format: E0xxx. Every lexical error is recoverable: scanning continues
/// past the malformed content with a best-effort value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorCode {
    /// Unrecognized escape sequence (`\u` with fewer than 4 hex digits,
    /// `\U` without exactly 8 hex digits, or a scalar above `0x10FFFF`).
    E0001,
    /// Malformed or unknown XML entity reference.
    E0002,
}

impl ErrorCode {
    /// Get the numeric code as a string (e.g., "E0001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
        }
    }

    /// Short description, suitable as the default message.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unrecognized escape sequence",
            ErrorCode::E0002 => "malformed XML entity",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E0001.to_string(), "E0001");
        assert_eq!(ErrorCode::E0002.as_str(), "E0002");
    }

    #[test]
    fn test_description() {
        assert_eq!(ErrorCode::E0001.description(), "unrecognized escape sequence");
    }
}
