//! Two-vector Pedersen commitments

use crate::{BulletproofsError, BulletproofsResult, GroupElement};
use curve25519_dalek::scalar::Scalar;

/// Compute `Σ a_i·G_i + Σ b_i·H_i`.
///
/// All four slices must have the same length; nothing is truncated.
pub fn vector_commit(
    g: &[GroupElement],
    h: &[GroupElement],
    a: &[Scalar],
    b: &[Scalar],
) -> BulletproofsResult<GroupElement> {
    let n = g.len();
    for actual in [h.len(), a.len(), b.len()] {
        if actual != n {
            return Err(BulletproofsError::VectorLengthMismatch { expected: n, actual });
        }
    }

    let scalars = a.iter().chain(b.iter());
    let points = g.iter().chain(h.iter()).map(|p| p.0);
    Ok(GroupElement::multiscalar_mul(scalars, points))
}
