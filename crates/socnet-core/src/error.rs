use std::fmt;

/// Machine-readable error codes for callers that branch on failure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    EmptyUsername,
    EmptyTarget,
    TimestampOutOfRange,
    InvalidMonthKey,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EmptyUsername => "E1001",
            Self::EmptyTarget => "E1002",
            Self::TimestampOutOfRange => "E1003",
            Self::InvalidMonthKey => "E1004",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyUsername => "Username is empty",
            Self::EmptyTarget => "Followed or mentioned username is empty",
            Self::TimestampOutOfRange => "Timestamp cannot be resolved to a month",
            Self::InvalidMonthKey => "Invalid month key",
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::EmptyUsername | Self::EmptyTarget => None,
            Self::TimestampOutOfRange => {
                Some("Pass a timestamp inside chrono's representable range.")
            }
            Self::InvalidMonthKey => Some("Use the YYYY-MM form with a month between 01 and 12."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced by ingestion and month-key resolution.
///
/// Querying a user or month with no recorded data is not an error: those
/// calls return empty results instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// Malformed ingestion arguments.
    #[error("{}: {}: {reason}", .code.code(), .code.message())]
    InvalidInput { code: ErrorCode, reason: String },
}

impl NetworkError {
    pub(crate) fn invalid(code: ErrorCode, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            code,
            reason: reason.into(),
        }
    }

    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidInput { code, .. } => *code,
        }
    }

    /// Optional remediation hint.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorCode, NetworkError};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::EmptyUsername,
            ErrorCode::EmptyTarget,
            ErrorCode::TimestampOutOfRange,
            ErrorCode::InvalidMonthKey,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::InvalidMonthKey.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn display_includes_code_and_reason() {
        let err = NetworkError::invalid(ErrorCode::EmptyUsername, "add_user called with \"\"");
        let text = err.to_string();
        assert!(text.starts_with("E1001"), "{text}");
        assert!(text.contains("add_user called"), "{text}");
        assert_eq!(err.code(), ErrorCode::EmptyUsername);
        assert!(err.hint().is_none());
    }
}
