//! # Bulletproofs Range Proofs
//!
//! Proves that a Pedersen commitment `Comm = v·G + γ·H` opens to a value in
//! `[0, 2^V)` without revealing `v`.
//!
//! ## Mathematical Background
//!
//! 1. **Bit Decomposition**: `v = <aL, 2^n>` with `aR = aL - 1`, so that
//!    `aL ∘ aR = 0` exactly when every entry of `aL` is a bit
//! 2. **Vector Commitments**: `A` commits to `(aL, aR)`, `S` to random `(sL, sR)`
//! 3. **Polynomial**: with challenges `y`, `z` the prover builds
//!    `l(X) = aL - z·1 + X·sL` and `r(X) = y^n ∘ (aR + z·1 + X·sR) + z²·2^n`
//!    whose inner product `t(X)` has constant term `z²·v + δ(y, z)`
//! 4. **Inner Product Argument**: at challenge `x` the prover shows
//!    `<l(x), r(x)> = t(x)` against the basis `(BPG, H')`, `H'_i = y^{-i}·BPH_i`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bulletproofs_core::ParameterSet;
//! use range::{prove_range, verify_range};
//! use rand::rngs::OsRng;
//!
//! let params = ParameterSet::derive(64).unwrap();
//! let (proof, _blinding) = prove_range(&params, 42, &mut OsRng).unwrap();
//! assert!(verify_range(&params, &proof));
//! ```

pub mod proof;
pub mod prover;
pub mod verifier;


pub use proof::*;
pub use prover::*;
pub use verifier::*;

use bulletproofs_core::{utils::*, Scalar};

/// Transcript domain for challenge `y`.
pub const RANGE_Y_DOMAIN: &[u8] = b"range.y";
/// Transcript domain for challenge `z`.
pub const RANGE_Z_DOMAIN: &[u8] = b"range.z";
/// Transcript domain for challenge `x`.
pub const RANGE_X_DOMAIN: &[u8] = b"range.x";

/// `δ(y, z) = (z - z²)·<1, y^n> - z³·<1, 2^n>`
pub fn delta(y_powers: &[Scalar], z: &Scalar, bits: usize) -> Scalar {
    let z2 = z * z;
    let z3 = z2 * z;
    let sum_y = vector_sum(y_powers);
    let sum_2 = vector_sum(&scalar_powers(&Scalar::from(2u64), bits));
    (z - z2) * sum_y - z3 * sum_2
}
