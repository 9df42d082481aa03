use serde::{Deserialize, Serialize};

/// Unified error type for all DNS server operations.
///
/// All variants are serializable for structured error reporting.
///
/// # Expected Errors
///
/// [`InvalidTtl`](Self::InvalidTtl) represents bad caller input and is
/// reported at `warn` level; the remaining variants indicate a failed or
/// unparseable external invocation and are reported at `error` level.
/// Use [`is_expected()`](Self::is_expected) to pick the log level.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum DnsServerError {
    /// The PowerShell invocation backing a query reported failure.
    ///
    /// Produced only on the read path, where a failed process must be
    /// distinguishable from "zero records". Write operations surface the
    /// runner's verdict as a plain `bool` instead.
    CommandFailed {
        /// Cmdlet that was invoked.
        cmdlet: String,
        /// Exit code of the process (`-1` if it never launched or was killed).
        exit_code: i32,
        /// Captured standard error, possibly empty.
        stderr: String,
    },

    /// The structured (JSON) output of a query could not be decoded.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// A TTL string could not be converted to a TimeSpan token.
    ///
    /// Raised before any process is spawned.
    InvalidTtl {
        /// The offending input.
        value: String,
        /// Description of what's wrong.
        detail: String,
    },
}

impl DnsServerError {
    /// Whether this error represents expected behavior (bad caller input),
    /// used for log-level selection.
    ///
    /// Returns `true` for `warn`-level errors, `false` for `error`-level.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::InvalidTtl { .. })
    }
}

impl std::fmt::Display for DnsServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CommandFailed {
                cmdlet,
                exit_code,
                stderr,
            } => {
                if stderr.is_empty() {
                    write!(f, "Command '{cmdlet}' failed with exit code {exit_code}")
                } else {
                    write!(
                        f,
                        "Command '{cmdlet}' failed with exit code {exit_code}: {stderr}"
                    )
                }
            }
            Self::ParseError { detail } => {
                write!(f, "Failed to parse command output: {detail}")
            }
            Self::InvalidTtl { value, detail } => {
                write!(f, "Invalid TTL '{value}': {detail}")
            }
        }
    }
}

impl std::error::Error for DnsServerError {}

/// Convenience type alias for `Result<T, DnsServerError>`.
pub type Result<T> = std::result::Result<T, DnsServerError>;
