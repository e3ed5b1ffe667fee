//! Service-level error type.

use keel_core::error::CoreError;

/// Error for service operations.
///
/// Wraps [`CoreError`] for domain failures and `sqlx::Error` for storage
/// failures. Domain errors are surfaced to callers as-is; transient
/// storage failures are retried at the write boundary before reaching
/// this type (see the retry module).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A domain-level error from `keel_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A storage failure from sqlx.
    #[error("Storage error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for service return values.
pub type ServiceResult<T> = Result<T, ServiceError>;
