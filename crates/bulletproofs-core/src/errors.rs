//! Error types for proof construction and parameter handling

use thiserror::Error;

/// Main error type for the proof engine.
///
/// Rejection of a proof during verification is never reported through this
/// type; verifiers answer with `false`. These variants cover caller contract
/// violations and internal faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BulletproofsError {
    /// Invalid proof format or structure
    #[error("Invalid proof format: {0}")]
    InvalidProof(String),

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Vector length mismatch
    #[error("Vector length mismatch: expected {expected}, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },

    /// Vector length is not a power of two
    #[error("Vector length {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// Insufficient generators
    #[error("Insufficient generators: need {needed}, have {available}")]
    InsufficientGenerators { needed: usize, available: usize },

    /// Scalar has no multiplicative inverse mod the group order
    #[error("Scalar is not invertible modulo the group order")]
    NonInvertible,

    /// Value outside of the provable range
    #[error("Value {value} is not in range [0, 2^{bits})")]
    ValueOutOfRange { value: i64, bits: usize },

    /// Prover self-check failed; indicates a bug rather than bad input
    #[error("Algebraic inconsistency: {0}")]
    AlgebraicInconsistency(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for proof engine operations
pub type BulletproofsResult<T> = Result<T, BulletproofsError>;
