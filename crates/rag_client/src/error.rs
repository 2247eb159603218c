use rag_core::Failure;

/// Failure of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// No response was received.
    #[error("transport error: {message}")]
    Transport { message: String },
    /// A response arrived with a non-success status.
    #[error("http status {status}: {message}")]
    Http { status: u16, message: String },
    /// A success response did not have the expected shape.
    #[error("unexpected response body: {message}")]
    Decode { message: String },
    /// A success response carried an explicit `error` field.
    #[error("{message}")]
    Domain { message: String },
    /// The request could not be built, so nothing was sent.
    #[error("invalid request: {message}")]
    Invalid { message: String },
}

impl RequestError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        RequestError::Transport {
            message: message.into(),
        }
    }

    pub(crate) fn decode(message: impl Into<String>) -> Self {
        RequestError::Decode {
            message: message.into(),
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RequestError::Invalid {
            message: message.into(),
        }
    }

    pub fn to_failure(&self) -> Failure {
        match self {
            RequestError::Transport { message } => Failure::unreachable(message.clone()),
            RequestError::Http { status, message } => Failure::from_status(*status, message.clone()),
            RequestError::Decode { message } => Failure::decode(message.clone()),
            RequestError::Domain { message } => Failure::domain(message.clone()),
            RequestError::Invalid { message } => Failure::validation(message.clone()),
        }
    }
}

/// Failure of a client operation: rejected locally or failed on the wire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl ClientError {
    pub fn to_failure(&self) -> Failure {
        match self {
            ClientError::Validation(message) => Failure::validation(message.clone()),
            ClientError::Request(err) => err.to_failure(),
        }
    }
}
