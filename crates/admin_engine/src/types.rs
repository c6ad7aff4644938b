use std::fmt;

use admin_core::{DropdownOption, FieldIndex, RequestId, RequestOutcome, ServerReply, Timer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Delete or bulk delete finished, one way or another.
    MutationCompleted {
        request_id: RequestId,
        outcome: RequestOutcome,
    },
    OptionsLoaded {
        request_id: RequestId,
        field: FieldIndex,
        result: Result<Vec<DropdownOption>, RequestFailure>,
    },
    TimerFired(Timer),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RequestFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Response body as text; empty when no response arrived.
    pub body: String,
}

impl RequestFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            body: String::new(),
        }
    }

    pub(crate) fn with_body(mut self, body: String) -> Self {
        self.body = body;
        self
    }

    pub fn status(&self) -> Option<u16> {
        match self.kind {
            FailureKind::HttpStatus(code) => Some(code),
            FailureKind::Decode { status } => Some(status),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// A 2xx answer whose body is not the expected JSON.
    Decode { status: u16 },
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Decode { status } => write!(f, "undecodable body (status {status})"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Folds a mutation result into what the page state consumes.
pub fn into_outcome(result: Result<ServerReply, RequestFailure>) -> RequestOutcome {
    match result {
        Ok(reply) => RequestOutcome::Replied(reply),
        Err(failure) => RequestOutcome::Failed {
            status: failure.status(),
            body: failure.body,
        },
    }
}
