//! Unified error codes for the registry services
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 2xxx: Permission errors
//! - 4xxx: Acte errors
//! - 5xxx: Copie errors
//! - 6xxx: Archive errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-service compatibility. Upstream services use the code family to
/// decide whether a failure is retryable (9xxx) or a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Acte belongs to a different notary
    NotaireMismatch = 2002,

    // ==================== 4xxx: Acte ====================
    /// Acte not found
    ActeNotFound = 4001,
    /// Operation not permitted in the acte's current lifecycle state
    ActeStateInvalid = 4002,
    /// Stored digest does not match recomputed digest
    ActeIntegrityViolation = 4003,
    /// Acte has no parties
    ActeEmptyParties = 4004,
    /// Acte content has an empty required section
    ActeEmptyContent = 4005,

    // ==================== 5xxx: Copie ====================
    /// Copie not found
    CopieNotFound = 5001,
    /// Source acte must be signed to issue a certified copy
    CopieSourceNotSigned = 5002,
    /// Copie digest does not match recomputed digest
    CopieIntegrityViolation = 5003,

    // ==================== 6xxx: Archive ====================
    /// Archive record not found
    ArchiveNotFound = 6001,
    /// Acte must be at least signed before archival
    ArchiveStateInvalid = 6002,
    /// Acte is already archived
    ArchiveAlreadyArchived = 6003,
    /// One of the requested backup destinations failed
    ArchiveBackupFailed = 6004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error (transaction aborted, retryable)
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// System errors (9xxx) are infrastructure failures: logged server-side
    /// and retryable by the caller.
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::NotaireMismatch => "Acte belongs to a different notary",

            // Acte
            ErrorCode::ActeNotFound => "Acte not found",
            ErrorCode::ActeStateInvalid => "Operation not permitted in current acte state",
            ErrorCode::ActeIntegrityViolation => "Acte integrity check failed",
            ErrorCode::ActeEmptyParties => "Acte must have at least one party",
            ErrorCode::ActeEmptyContent => "Acte content section is empty",

            // Copie
            ErrorCode::CopieNotFound => "Copie not found",
            ErrorCode::CopieSourceNotSigned => {
                "Acte must be signed to issue a certified copy"
            }
            ErrorCode::CopieIntegrityViolation => "Copie integrity check failed",

            // Archive
            ErrorCode::ArchiveNotFound => "Archive record not found",
            ErrorCode::ArchiveStateInvalid => "Acte must be signed before archival",
            ErrorCode::ArchiveAlreadyArchived => "Acte is already archived",
            ErrorCode::ArchiveBackupFailed => "Backup destination failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// Get the HTTP status code upstream services should map this error to
    pub fn http_status(&self) -> http::StatusCode {
        use http::StatusCode;
        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::ActeEmptyParties
            | ErrorCode::ActeEmptyContent => StatusCode::BAD_REQUEST,
            ErrorCode::PermissionDenied | ErrorCode::NotaireMismatch => StatusCode::FORBIDDEN,
            ErrorCode::NotFound
            | ErrorCode::ActeNotFound
            | ErrorCode::CopieNotFound
            | ErrorCode::ArchiveNotFound => StatusCode::NOT_FOUND,
            ErrorCode::AlreadyExists | ErrorCode::ArchiveAlreadyArchived => StatusCode::CONFLICT,
            ErrorCode::ActeStateInvalid
            | ErrorCode::CopieSourceNotSigned
            | ErrorCode::ArchiveStateInvalid => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ActeIntegrityViolation
            | ErrorCode::CopieIntegrityViolation
            | ErrorCode::ArchiveBackupFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::NotaireMismatch),

            // Acte
            4001 => Ok(ErrorCode::ActeNotFound),
            4002 => Ok(ErrorCode::ActeStateInvalid),
            4003 => Ok(ErrorCode::ActeIntegrityViolation),
            4004 => Ok(ErrorCode::ActeEmptyParties),
            4005 => Ok(ErrorCode::ActeEmptyContent),

            // Copie
            5001 => Ok(ErrorCode::CopieNotFound),
            5002 => Ok(ErrorCode::CopieSourceNotSigned),
            5003 => Ok(ErrorCode::CopieIntegrityViolation),

            // Archive
            6001 => Ok(ErrorCode::ArchiveNotFound),
            6002 => Ok(ErrorCode::ArchiveStateInvalid),
            6003 => Ok(ErrorCode::ArchiveAlreadyArchived),
            6004 => Ok(ErrorCode::ArchiveBackupFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
