//! Error types

/// Reason a candidate string was rejected as a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseError {
    #[error("The URI string was empty")]
    Empty,
    #[error("No protocol was found")]
    InvalidProtocol,
    #[error("Port number is bad")]
    InvalidPort,
    #[error("Invalid symbols encoded")]
    BadEncoding,
    #[error("Bad URL format")]
    BadFormat,
    #[error("TLD part is not detected")]
    TldMissing,
    #[error("Host part is missing")]
    HostMissing,
}

impl ParseError {
    /// Static description, same text as `Display`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseError::Empty => "The URI string was empty",
            ParseError::InvalidProtocol => "No protocol was found",
            ParseError::InvalidPort => "Port number is bad",
            ParseError::BadEncoding => "Invalid symbols encoded",
            ParseError::BadFormat => "Bad URL format",
            ParseError::TldMissing => "TLD part is not detected",
            ParseError::HostMissing => "Host part is missing",
        }
    }
}

/// Error type for scanner construction.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to build pattern automaton: {0}")]
    Automaton(#[from] aho_corasick::BuildError),
    #[error("Pattern automaton has no unanchored start state: {0}")]
    StartState(#[from] aho_corasick::MatchError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_as_str() {
        let all = [
            ParseError::Empty,
            ParseError::InvalidProtocol,
            ParseError::InvalidPort,
            ParseError::BadEncoding,
            ParseError::BadFormat,
            ParseError::TldMissing,
            ParseError::HostMissing,
        ];
        for err in all {
            assert_eq!(err.to_string(), err.as_str());
        }
        assert_eq!(ParseError::TldMissing.to_string(), "TLD part is not detected");
    }
}
