//! Error types for the ledger layer

use crate::{OrgId, RowKey};
use audit::AuditError;
use bulletproofs_core::BulletproofsError;
use thiserror::Error;

/// Failures of the key-value backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// Failures while encoding or decoding persisted records
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode {0}")]
    Encode(&'static str, #[source] bincode::Error),

    #[error("Failed to decode {0}")]
    Decode(&'static str, #[source] bincode::Error),
}

/// Invalid or unreadable configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Load(#[from] Box<figment::Error>),
}

/// Errors raised by ledger operations.
///
/// A proof that fails to verify is not an error; verification calls report
/// it as `Ok(false)`.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Row {0} not found")]
    RowNotFound(RowKey),

    #[error("Organization {0} is not part of this ledger")]
    UnknownOrganization(OrgId),

    #[error("Organization {org} of row {row} has not been audited")]
    NotAudited { row: RowKey, org: OrgId },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Specification does not match the ledger: {0}")]
    SpecificationMismatch(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Proof(#[from] BulletproofsError),

    #[error(transparent)]
    Audit(#[from] AuditError),
}

/// Result type for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
