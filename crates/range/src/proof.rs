//! Range proof structure and serialization

use bulletproofs_core::{BulletproofsError, BulletproofsResult, GroupElement, Scalar};
use ipa::InnerProductProof;
use serde::{Deserialize, Serialize};

/// Number of fixed 32-byte fields preceding the embedded IPA in the byte layout.
const FIXED_FIELDS: usize = 11;

/// A range proof that a committed value lies in `[0, 2^V)`
///
/// Every field comes out of a single proving run and is checked as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProof {
    /// Commitment `v·G + γ·H` to the proven value
    pub commitment: GroupElement,
    /// Commitment to the bit vectors `aL`, `aR`
    pub a: GroupElement,
    /// Commitment to the blinding vectors `sL`, `sR`
    pub s: GroupElement,
    /// Commitment to the linear coefficient of `t(X)`
    pub t1: GroupElement,
    /// Commitment to the quadratic coefficient of `t(X)`
    pub t2: GroupElement,
    /// Blinding of `t(x)` under `H`
    pub tau: Scalar,
    /// Evaluation `t(x) = <l, r>`
    pub th: Scalar,
    /// Combined blinding of `A` and `S`
    pub mu: Scalar,
    /// Challenge derived from `A`
    pub cy: Scalar,
    /// Challenge derived from `S`
    pub cz: Scalar,
    /// Challenge derived from `T1` and `T2`
    pub cx: Scalar,
    /// Inner product argument for `<l, r> = th`
    pub ipp: InnerProductProof,
}

impl RangeProof {
    /// Get the commitment to the value
    pub fn commitment(&self) -> &GroupElement {
        &self.commitment
    }

    /// Get the IPA proof
    pub fn ipa_proof(&self) -> &InnerProductProof {
        &self.ipp
    }

    /// Serialize the proof to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(FIXED_FIELDS * 32 + self.ipp.size_bytes());
        for point in [&self.commitment, &self.a, &self.s, &self.t1, &self.t2] {
            bytes.extend_from_slice(&point.to_bytes());
        }
        for scalar in [&self.tau, &self.th, &self.mu, &self.cy, &self.cz, &self.cx] {
            bytes.extend_from_slice(scalar.as_bytes());
        }
        bytes.extend_from_slice(&self.ipp.to_bytes());
        bytes
    }

    /// Deserialize proof from bytes
    pub fn from_bytes(bytes: &[u8]) -> BulletproofsResult<Self> {
        if bytes.len() < FIXED_FIELDS * 32 {
            return Err(BulletproofsError::InvalidProof(format!(
                "range proof needs at least {} bytes, got {}",
                FIXED_FIELDS * 32,
                bytes.len()
            )));
        }

        let field = |i: usize| &bytes[i * 32..(i + 1) * 32];
        let point = |i: usize| GroupElement::from_bytes(field(i));
        let scalar = |i: usize| -> BulletproofsResult<Scalar> {
            let mut buf = [0u8; 32];
            buf.copy_from_slice(field(i));
            Option::from(Scalar::from_canonical_bytes(buf))
                .ok_or_else(|| BulletproofsError::InvalidProof("non-canonical scalar".to_string()))
        };

        Ok(Self {
            commitment: point(0)?,
            a: point(1)?,
            s: point(2)?,
            t1: point(3)?,
            t2: point(4)?,
            tau: scalar(5)?,
            th: scalar(6)?,
            mu: scalar(7)?,
            cy: scalar(8)?,
            cz: scalar(9)?,
            cx: scalar(10)?,
            ipp: InnerProductProof::from_bytes(&bytes[FIXED_FIELDS * 32..])?,
        })
    }
}
