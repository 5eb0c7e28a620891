//! # Inner Product Argument (IPA)
//!
//! Proves knowledge of vectors `a` and `b` such that:
//!
//! ```text
//! P = <a, G> + <b, H>    and    c = <a, b>
//! ```
//!
//! ## Mathematical Background
//!
//! Before folding, an initial challenge `x0 = Hash(P)` rebinds the target to
//! `P' = P + (x0·c)·U` and all later rounds use `U' = x0·U`.
//!
//! For vectors of length `n > 1` each round:
//! - Splits `a = (a_L, a_R)`, `b = (b_L, b_R)` and the generators likewise
//! - Commits the cross terms:
//!   - `L = <a_L, G_R> + <b_R, H_L> + <a_L, b_R>·U'`
//!   - `R = <a_R, G_L> + <b_L, H_R> + <a_R, b_L>·U'`
//! - Derives `x = Hash(L, R)`
//! - Folds:
//!   - `a' = x·a_L + x⁻¹·a_R`, `b' = x⁻¹·b_L + x·b_R`
//!   - `G' = x⁻¹·G_L + x·G_R`, `H' = x·H_L + x⁻¹·H_R`
//!   - `P' = x²·L + P + x⁻²·R`
//!
//! The proof is every `L`, `R`, the challenge sequence and the final `a`, `b`.

pub mod proof;
pub mod prover;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use verifier::*;

/// Transcript domain for the challenge bound to `P`.
pub const IPA_INIT_DOMAIN: &[u8] = b"ipa.init";
/// Transcript domain for the per-round challenges.
pub const IPA_ROUND_DOMAIN: &[u8] = b"ipa.round";
