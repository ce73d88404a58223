use async_trait::async_trait;
use crate::core::election::ElectionError;

#[derive(Debug)]
pub enum CommandError {
    Conflict {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
        reason_code: Option<String>,
    },
    Remote {
        message: String,
        status: Option<u16>,
        retryable: bool,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Unavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::Conflict { message, .. } |
            CommandError::Database { message, .. } |
            CommandError::DuplicateKey { message, .. } |
            CommandError::NotFound { message, .. } |
            CommandError::Remote { message, .. } |
            CommandError::Runtime { message, .. } |
            CommandError::Serialization { message } |
            CommandError::Unavailable { message, .. } |
            CommandError::Validation { message, .. } => message.as_str(),
        }
    }

    pub fn reason_code(&self) -> Option<String> {
        match self {
            CommandError::Conflict { reason_code, .. } |
            CommandError::Database { reason_code, .. } |
            CommandError::DuplicateKey { reason_code, .. } |
            CommandError::NotFound { reason_code, .. } |
            CommandError::Runtime { reason_code, .. } |
            CommandError::Unavailable { reason_code, .. } |
            CommandError::Validation { reason_code, .. } => reason_code.clone(),
            CommandError::Remote { status, .. } => status.map(|s| s.to_string()),
            CommandError::Serialization { .. } => None,
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<ElectionError> for CommandError {
    fn from(other: ElectionError) -> Self {
        match other {
            ElectionError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            ElectionError::NotGranted { message, reason_code } => {
                CommandError::Conflict { message, reason_code }
            }
            ElectionError::DuplicateKey { message, reason_code } => {
                CommandError::DuplicateKey { message, reason_code }
            }
            ElectionError::NotFound { message, reason_code } => {
                CommandError::NotFound { message, reason_code }
            }
            ElectionError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Unavailable { message, reason_code, retryable }
            }
            ElectionError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            ElectionError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            ElectionError::Remote { message, status, retryable } => {
                CommandError::Remote { message, status, retryable }
            }
            ElectionError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: false }
            }
        }
    }
}
