use std::fmt;

pub const NO_FILES_SELECTED: &str = "Please select one or more files first.";
pub const EMPTY_QUERY: &str = "Please enter a question.";
pub const EMPTY_JOB_DESCRIPTION: &str = "Please paste a job description.";

/// Machine-distinguishable cause of a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Rejected locally before any network call.
    Validation,
    /// No response was received (DNS, refused connection, dropped stream).
    Unreachable,
    /// HTTP 404.
    EndpointMissing,
    /// HTTP 413.
    PayloadTooLarge,
    /// HTTP 429.
    RateLimited,
    /// Any other 4xx; the message is the server's own when it sent one.
    Rejected(u16),
    /// 5xx and any other non-success status.
    Server(u16),
    /// A success response whose body was not in the expected shape.
    Decode,
    /// A success response carrying an explicit `error` field.
    Domain,
}

impl FailureKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => FailureKind::EndpointMissing,
            413 => FailureKind::PayloadTooLarge,
            429 => FailureKind::RateLimited,
            400..=499 => FailureKind::Rejected(status),
            _ => FailureKind::Server(status),
        }
    }

    pub fn status(self) -> Option<u16> {
        match self {
            FailureKind::EndpointMissing => Some(404),
            FailureKind::PayloadTooLarge => Some(413),
            FailureKind::RateLimited => Some(429),
            FailureKind::Rejected(code) | FailureKind::Server(code) => Some(code),
            _ => None,
        }
    }
}

/// A failure recovered at an operation boundary: a kind plus the detail it
/// was reported with. `Display` yields the user-facing status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Validation, message)
    }

    pub fn unreachable(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Unreachable, detail)
    }

    /// Classifies a non-success HTTP status. `message` is the server-supplied
    /// text, or the generic "code + reason phrase" when none was parsed.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(FailureKind::from_status(status), message)
    }

    pub fn decode(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Decode, detail)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Domain, message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::Validation | FailureKind::Domain => write!(f, "{}", self.message),
            FailureKind::Unreachable => write!(f, "cannot connect to the server ({})", self.message),
            FailureKind::EndpointMissing => write!(f, "server endpoint not found (HTTP 404)"),
            FailureKind::PayloadTooLarge => {
                write!(f, "file is too large for the server to accept (HTTP 413)")
            }
            FailureKind::RateLimited => {
                write!(f, "rate limited by the server, wait a moment and retry (HTTP 429)")
            }
            FailureKind::Rejected(_) => write!(f, "{}", self.message),
            FailureKind::Server(code) => write!(f, "server error (HTTP {code}): {}", self.message),
            FailureKind::Decode => write!(f, "unexpected response from server: {}", self.message),
        }
    }
}
