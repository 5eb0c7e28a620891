//! # Bulletproofs Core
//!
//! Foundational types for the zkledger proof engine:
//!
//! - Ristretto group elements with the arithmetic the provers need
//! - Deterministic derivation of the shared [`ParameterSet`]
//! - Two-vector Pedersen commitments and scalar vector helpers
//! - Fiat-Shamir challenge derivation
//!
//! ## Mathematical Background
//!
//! All proofs operate over a prime-order group with generators:
//! - `G`: value generator for Pedersen commitments
//! - `H`: blinding generator
//! - `BPG_i`, `BPH_i`: vector generators for two-vector commitments
//! - `U`: generator binding the claimed inner product
//!
//! The core relation proven by the inner-product argument is:
//! ```text
//! P = <a, BPG> + <b, BPH> + <a,b>·U
//! ```

pub mod commitment;
pub mod errors;
pub mod generators;
pub mod group;
pub mod transcript;
pub mod utils;

pub use commitment::*;
pub use errors::*;
pub use generators::*;
pub use group::*;
pub use transcript::*;

/// Re-export commonly used types from curve25519-dalek
pub use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};

/// Re-export merlin transcript
pub use merlin::Transcript;
