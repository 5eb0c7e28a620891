//! Deterministic generator derivation shared by every prover and verifier

use crate::{utils::is_power_of_two, BulletproofsError, BulletproofsResult, GroupElement};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Domain label absorbed before the first counter value.
const GENERATOR_DOMAIN: &[u8] = b"zkledger.generators.v1";

/// Vector length used for production range proofs.
pub const DEFAULT_VECTOR_LENGTH: usize = 64;

/// Generator set for commitments and range proofs.
///
/// Built once by [`ParameterSet::derive`] and then only read. Provers and
/// verifiers borrow it, so a single set can serve concurrent verifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    vector_length: usize,
    bp_g: Vec<GroupElement>,
    bp_h: Vec<GroupElement>,
    g: GroupElement,
    h: GroupElement,
    u: GroupElement,
}

impl ParameterSet {
    /// Derive the generators for vectors of length `vector_length`.
    ///
    /// A SHA-256 state is seeded with a domain label. For each counter value
    /// the counter is absorbed and the running digest is tried as a compressed
    /// Ristretto point. Accepted points fill `BPG`/`BPH` alternately, then
    /// `U`, `G` and `H`. The search runs until `2V + 3` points are accepted.
    pub fn derive(vector_length: usize) -> BulletproofsResult<Self> {
        if !is_power_of_two(vector_length) {
            return Err(BulletproofsError::InvalidParameters(format!(
                "vector length must be a power of two, got {}",
                vector_length
            )));
        }

        let needed = 2 * vector_length + 3;
        let mut accepted = Vec::with_capacity(needed);
        let mut hasher = Sha256::new();
        hasher.update(GENERATOR_DOMAIN);

        let mut counter: u64 = 0;
        while accepted.len() < needed {
            hasher.update(counter.to_le_bytes());
            let digest: [u8; 32] = hasher.clone().finalize().into();
            if let Some(point) = CompressedRistretto(digest).decompress() {
                let point = GroupElement::from(point);
                if !point.is_identity() {
                    accepted.push(point);
                }
            }
            counter += 1;
        }
        debug!(vector_length, attempts = counter, "derived generator set");

        let mut bp_g = Vec::with_capacity(vector_length);
        let mut bp_h = Vec::with_capacity(vector_length);
        for (i, point) in accepted[..2 * vector_length].iter().enumerate() {
            if i % 2 == 0 {
                bp_g.push(*point);
            } else {
                bp_h.push(*point);
            }
        }
        let tail = &accepted[2 * vector_length..];

        Ok(Self {
            vector_length,
            bp_g,
            bp_h,
            u: tail[0],
            g: tail[1],
            h: tail[2],
        })
    }

    /// Get the vector length
    pub fn vector_length(&self) -> usize {
        self.vector_length
    }

    /// Value generator `G`
    pub fn g(&self) -> GroupElement {
        self.g
    }

    /// Blinding generator `H`
    pub fn h(&self) -> GroupElement {
        self.h
    }

    /// Inner-product generator `U`
    pub fn u(&self) -> GroupElement {
        self.u
    }

    /// Left vector generators `BPG`
    pub fn bp_g(&self) -> &[GroupElement] {
        &self.bp_g
    }

    /// Right vector generators `BPH`
    pub fn bp_h(&self) -> &[GroupElement] {
        &self.bp_h
    }

    /// Pedersen commitment `value·G + blinding·H`
    pub fn commit(&self, value: &Scalar, blinding: &Scalar) -> GroupElement {
        GroupElement::multiscalar_mul([*value, *blinding], [self.g.0, self.h.0])
    }

    /// SHA-256 over every generator in derivation order.
    pub fn fingerprint(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update((self.vector_length as u64).to_le_bytes());
        for point in self.bp_g.iter().chain(self.bp_h.iter()) {
            hasher.update(point.to_bytes());
        }
        hasher.update(self.u.to_bytes());
        hasher.update(self.g.to_bytes());
        hasher.update(self.h.to_bytes());
        hasher.finalize().into()
    }
}
