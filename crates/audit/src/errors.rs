//! Error types for audit tokens and disjunctive proofs

use bulletproofs_core::BulletproofsError;
use thiserror::Error;

/// Errors raised while building or decoding audit material
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuditError {
    #[error("Witness does not satisfy the {0} branch of the statement")]
    InvalidWitness(&'static str),

    #[error("Malformed disjunctive proof: {0}")]
    MalformedProof(String),

    #[error(transparent)]
    Core(#[from] BulletproofsError),
}

/// Result type for audit operations
pub type AuditResult<T> = Result<T, AuditError>;
