//! Registry error taxonomy
//!
//! `RegistreError` is the service-layer error: every operation of the
//! registry returns one of these kinds so upstream services can map
//! `InvalidStateTransition` and `Unauthorized` to non-retryable client
//! errors and `Storage` to a retryable condition.

use shared::error::{AppError, ErrorCode};
use shared::models::StatutActe;
use thiserror::Error;

/// Service-layer error for all registry operations
#[derive(Debug, Error)]
pub enum RegistreError {
    /// Act, copy or backup reference absent
    #[error("{entite} {id} not found")]
    NotFound { entite: &'static str, id: i64 },

    /// The acte belongs to a different notary
    #[error("acte {acte_id} is not owned by notaire {notaire_id}")]
    Unauthorized { acte_id: i64, notaire_id: i64 },

    /// Operation not permitted in the acte's current lifecycle state.
    /// `requis` is the minimum state the operation needs.
    #[error("operation requires statut {requis} but acte is {actuel}")]
    InvalidStateTransition {
        requis: StatutActe,
        actuel: StatutActe,
    },

    /// Stored digest does not match the recomputed digest on read.
    /// Never swallowed or auto-corrected; surfaces to the caller verbatim.
    #[error("integrity violation on record {record_id}: stored digest does not match content")]
    IntegrityViolation { record_id: i64 },

    /// Malformed request (empty parties, empty content sections, ...)
    #[error("validation failed: {0}")]
    Validation(String),

    /// Underlying transaction aborted for infrastructure reasons
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RegistreError {
    pub fn acte_not_found(id: i64) -> Self {
        RegistreError::NotFound { entite: "acte", id }
    }

    pub fn copie_not_found(id: i64) -> Self {
        RegistreError::NotFound { entite: "copie", id }
    }
}

impl From<sqlx::Error> for RegistreError {
    fn from(e: sqlx::Error) -> Self {
        RegistreError::Storage(e.to_string())
    }
}

impl From<serde_json::Error> for RegistreError {
    fn from(e: serde_json::Error) -> Self {
        // Stored JSON that no longer parses is a storage-level corruption
        RegistreError::Storage(format!("stored document corrupt: {e}"))
    }
}

impl From<validator::ValidationErrors> for RegistreError {
    fn from(e: validator::ValidationErrors) -> Self {
        RegistreError::Validation(e.to_string())
    }
}

impl From<RegistreError> for AppError {
    fn from(e: RegistreError) -> Self {
        match e {
            RegistreError::NotFound { entite, id } => {
                AppError::with_message(ErrorCode::ActeNotFound, format!("{entite} {id} not found"))
                    .with_detail("entite", entite)
                    .with_detail("id", id)
            }
            RegistreError::Unauthorized {
                acte_id,
                notaire_id,
            } => AppError::new(ErrorCode::NotaireMismatch)
                .with_detail("acte_id", acte_id)
                .with_detail("notaire_id", notaire_id),
            RegistreError::InvalidStateTransition { requis, actuel } => {
                AppError::new(ErrorCode::ActeStateInvalid)
                    .with_detail("requis", requis.as_str())
                    .with_detail("actuel", actuel.as_str())
            }
            RegistreError::IntegrityViolation { record_id } => {
                AppError::new(ErrorCode::ActeIntegrityViolation).with_detail("record_id", record_id)
            }
            RegistreError::Validation(msg) => AppError::validation(msg),
            RegistreError::Storage(msg) => {
                tracing::error!(error = %msg, "Registry storage failure");
                AppError::database(msg)
            }
        }
    }
}

/// Result type for registry operations
pub type RegistreResult<T> = Result<T, RegistreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_transition_maps_to_app_error_with_states() {
        let err = RegistreError::InvalidStateTransition {
            requis: StatutActe::Signe,
            actuel: StatutActe::Brouillon,
        };
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ActeStateInvalid);
        let details = app.details.unwrap();
        assert_eq!(details.get("requis").unwrap(), "SIGNE");
        assert_eq!(details.get("actuel").unwrap(), "BROUILLON");
    }

    #[test]
    fn test_storage_is_retryable_after_mapping() {
        let app: AppError = RegistreError::Storage("disk full".into()).into();
        assert!(app.is_retryable());

        let app: AppError = RegistreError::Unauthorized {
            acte_id: 1,
            notaire_id: 2,
        }
        .into();
        assert!(!app.is_retryable());
    }

    #[test]
    fn test_not_found_display() {
        let err = RegistreError::acte_not_found(42);
        assert_eq!(err.to_string(), "acte 42 not found");
    }
}
