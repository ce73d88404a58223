use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ElectionError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    // The requested change is well-formed but other records still depend on the target.
    NotGranted {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
        reason_code: Option<String>,
    },
    NotFound {
        message: String,
        reason_code: Option<String>,
    },
    // This is a retry-able error, which indicates that the store or a remote service could not
    // serve the request right now (throttling, transient network failure).
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    // Failure reported by a remote collaborator; status is None when no HTTP response arrived.
    Remote {
        message: String,
        status: Option<u16>,
        retryable: bool,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl ElectionError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> ElectionError {
        ElectionError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn not_granted(message: &str, reason_code: Option<String>) -> ElectionError {
        ElectionError::NotGranted { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str, reason_code: Option<String>) -> ElectionError {
        ElectionError::DuplicateKey { message: message.to_string(), reason_code }
    }

    pub fn not_found(message: &str, reason_code: Option<String>) -> ElectionError {
        ElectionError::NotFound { message: message.to_string(), reason_code }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> ElectionError {
        ElectionError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> ElectionError {
        if retryable {
            ElectionError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                ElectionError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str(), None)
            } else {
                ElectionError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            ElectionError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> ElectionError {
        ElectionError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> ElectionError {
        ElectionError::Serialization { message: message.to_string() }
    }

    pub fn remote(message: &str, status: Option<u16>, retryable: bool) -> ElectionError {
        ElectionError::Remote { message: message.to_string(), status, retryable }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> ElectionError {
        ElectionError::Runtime { message: message.to_string(), reason_code }
    }

    // builds the error a caller sees for a party rule violation
    pub fn rejected(reason: FailureReason) -> ElectionError {
        let message = reason.message();
        let code = Some(reason.to_string());
        match reason {
            FailureReason::InvalidId |
            FailureReason::InvalidName |
            FailureReason::InvalidNameLength |
            FailureReason::InvalidCode |
            FailureReason::InvalidNumber => ElectionError::validation(message, code),
            FailureReason::PartyNotFound => ElectionError::not_found(message, code),
            FailureReason::DuplicateCode |
            FailureReason::DuplicateNumber => ElectionError::duplicate_key(message, code),
            FailureReason::PartyHasCandidates => ElectionError::not_granted(message, code),
            FailureReason::InvalidCandidate => ElectionError::unavailable(message, code, false),
        }
    }

    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            ElectionError::Database { reason_code, .. } |
            ElectionError::NotGranted { reason_code, .. } |
            ElectionError::DuplicateKey { reason_code, .. } |
            ElectionError::NotFound { reason_code, .. } |
            ElectionError::CurrentlyUnavailable { reason_code, .. } |
            ElectionError::Validation { reason_code, .. } |
            ElectionError::Runtime { reason_code, .. } => {
                reason_code.as_deref().and_then(FailureReason::parse)
            }
            ElectionError::Serialization { .. } => { None }
            ElectionError::Remote { .. } => { None }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ElectionError::Database { message, .. } |
            ElectionError::NotGranted { message, .. } |
            ElectionError::DuplicateKey { message, .. } |
            ElectionError::NotFound { message, .. } |
            ElectionError::CurrentlyUnavailable { message, .. } |
            ElectionError::Validation { message, .. } |
            ElectionError::Serialization { message } |
            ElectionError::Remote { message, .. } |
            ElectionError::Runtime { message, .. } => message.as_str(),
        }
    }

    pub fn retryable(&self) -> bool {
        match self {
            ElectionError::Database { retryable, .. } => { *retryable }
            ElectionError::NotGranted { .. } => { false }
            ElectionError::DuplicateKey { .. } => { false }
            ElectionError::NotFound { .. } => { false }
            ElectionError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            ElectionError::Validation { .. } => { false }
            ElectionError::Serialization { .. } => { false }
            ElectionError::Remote { retryable, .. } => { *retryable }
            ElectionError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for ElectionError {
    fn from(err: std::io::Error) -> Self {
        ElectionError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for ElectionError {
    fn from(err: serde_json::Error) -> Self {
        ElectionError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for ElectionError {
    fn from(err: String) -> Self {
        ElectionError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for ElectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ElectionError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ElectionError::NotGranted { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ElectionError::DuplicateKey { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ElectionError::NotFound { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ElectionError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ElectionError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ElectionError::Serialization { message } => {
                write!(f, "{}", message)
            }
            ElectionError::Remote { message, status, retryable } => {
                write!(f, "{} {:?} {}", message, status, retryable)
            }
            ElectionError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for ElectionError {}

/// A specialized Result type for the party service.
pub type ElectionResult<T> = Result<T, ElectionError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// FailureReason names every rule a party request can break.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum FailureReason {
    InvalidId,
    PartyNotFound,
    InvalidName,
    InvalidNameLength,
    InvalidCode,
    InvalidNumber,
    DuplicateCode,
    DuplicateNumber,
    PartyHasCandidates,
    InvalidCandidate,
}

impl FailureReason {
    pub fn message(&self) -> &'static str {
        match self {
            FailureReason::InvalidId => "Invalid id",
            FailureReason::PartyNotFound => "Party not found",
            FailureReason::InvalidName => "Invalid name",
            FailureReason::InvalidNameLength => "Invalid Name, must contain at least 5 characters",
            FailureReason::InvalidCode => "Invalid code",
            FailureReason::InvalidNumber => "Invalid number, must contain 2 characters",
            FailureReason::DuplicateCode => "Duplicate Code",
            FailureReason::DuplicateNumber => "Duplicate Number",
            FailureReason::PartyHasCandidates => "The Party has candidates yet",
            FailureReason::InvalidCandidate => "Invalid candidate",
        }
    }

    pub fn parse(s: &str) -> Option<FailureReason> {
        match s {
            "InvalidId" => Some(FailureReason::InvalidId),
            "PartyNotFound" => Some(FailureReason::PartyNotFound),
            "InvalidName" => Some(FailureReason::InvalidName),
            "InvalidNameLength" => Some(FailureReason::InvalidNameLength),
            "InvalidCode" => Some(FailureReason::InvalidCode),
            "InvalidNumber" => Some(FailureReason::InvalidNumber),
            "DuplicateCode" => Some(FailureReason::DuplicateCode),
            "DuplicateNumber" => Some(FailureReason::DuplicateNumber),
            "PartyHasCandidates" => Some(FailureReason::PartyHasCandidates),
            "InvalidCandidate" => Some(FailureReason::InvalidCandidate),
            _ => None,
        }
    }
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            FailureReason::InvalidId => write!(f, "InvalidId"),
            FailureReason::PartyNotFound => write!(f, "PartyNotFound"),
            FailureReason::InvalidName => write!(f, "InvalidName"),
            FailureReason::InvalidNameLength => write!(f, "InvalidNameLength"),
            FailureReason::InvalidCode => write!(f, "InvalidCode"),
            FailureReason::InvalidNumber => write!(f, "InvalidNumber"),
            FailureReason::DuplicateCode => write!(f, "DuplicateCode"),
            FailureReason::DuplicateNumber => write!(f, "DuplicateNumber"),
            FailureReason::PartyHasCandidates => write!(f, "PartyHasCandidates"),
            FailureReason::InvalidCandidate => write!(f, "InvalidCandidate"),
        }
    }
}
