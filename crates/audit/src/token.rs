//! Commitments and audit tokens
//!
//! ```text
//! Comm    = v·G + r·H
//! Token   = r·pk
//! Token'  = T + (S − Com_RP)·secret
//! Token'' = Token + (Com_RP − S)·secret
//! ```
//!
//! `S` and `T` are an organization's running sums of commitments and tokens,
//! `Com_RP` the commitment carried by its range proof. Which party uses `sk`
//! and which a throwaway nonce depends on its role in the transfer.

use bulletproofs_core::{utils::scalar_from_i64, GroupElement, ParameterSet, Scalar};

/// Pedersen commitment to a signed ledger amount
pub fn commitment(params: &ParameterSet, value: i64, blinding: &Scalar) -> GroupElement {
    params.commit(&scalar_from_i64(value), blinding)
}

/// Audit token `r·pk`
pub fn token(public_key: &GroupElement, blinding: &Scalar) -> GroupElement {
    *public_key * blinding
}

/// `T + (S − Com_RP)·secret`
pub fn token_prime(
    t: &GroupElement,
    com_rp: &GroupElement,
    s: &GroupElement,
    secret: &Scalar,
) -> GroupElement {
    *t + (*s - *com_rp) * secret
}

/// `Token + (Com_RP − S)·secret`
pub fn token_double_prime(
    token: &GroupElement,
    com_rp: &GroupElement,
    s: &GroupElement,
    secret: &Scalar,
) -> GroupElement {
    *token + (*com_rp - *s) * secret
}
