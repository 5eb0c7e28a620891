//! Organization key pairs
//!
//! Each organization holds a secret scalar `sk` and publishes `pk = sk·H`.
//! Audit tokens are formed against `pk`, so `sk` is what lets an organization
//! (or an auditor it trusts) open the value hidden in a commitment.

use bulletproofs_core::{GroupElement, ParameterSet, Scalar};
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Secret audit key of one organization.
///
/// Automatically zeroized when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Scalar);

impl SecretKey {
    /// Wrap an existing scalar
    pub fn from_scalar(scalar: Scalar) -> Self {
        Self(scalar)
    }

    /// Draw a fresh secret key
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(Scalar::random(rng))
    }

    /// Returns a reference to the secret scalar.
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }

    /// `sk·H`
    pub fn public_key(&self, params: &ParameterSet) -> GroupElement {
        params.h() * self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

/// Secret key together with its public counterpart
#[derive(Clone, Debug)]
pub struct OrgKeyPair {
    pub secret: SecretKey,
    pub public: GroupElement,
}

impl OrgKeyPair {
    /// Derive the key pair for a known secret
    pub fn from_secret(params: &ParameterSet, secret: SecretKey) -> Self {
        let public = secret.public_key(params);
        Self { secret, public }
    }

    /// Generate a key pair with fresh randomness
    pub fn generate<R: RngCore + CryptoRng>(params: &ParameterSet, rng: &mut R) -> Self {
        Self::from_secret(params, SecretKey::random(rng))
    }

    /// Generate `n` independent key pairs, one per organization slot
    pub fn generate_many<R: RngCore + CryptoRng>(
        params: &ParameterSet,
        n: usize,
        rng: &mut R,
    ) -> Vec<Self> {
        (0..n).map(|_| Self::generate(params, &mut *rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn test_public_key_is_secret_times_h() {
        let params = ParameterSet::derive(8).unwrap();
        let pair = OrgKeyPair::generate(&params, &mut OsRng);
        assert_eq!(pair.public, params.h() * *pair.secret.as_scalar());
    }

    #[test]
    fn test_generate_many_yields_distinct_keys() {
        let params = ParameterSet::derive(8).unwrap();
        let pairs = OrgKeyPair::generate_many(&params, 4, &mut OsRng);
        assert_eq!(pairs.len(), 4);
        for (i, a) in pairs.iter().enumerate() {
            for b in &pairs[i + 1..] {
                assert_ne!(a.public, b.public);
            }
        }
    }

    #[test]
    fn test_debug_hides_secret() {
        let key = SecretKey::from_scalar(Scalar::from(42u64));
        assert_eq!(format!("{:?}", key), "SecretKey(<redacted>)");
    }

    #[test]
    fn test_zeroize_clears_scalar() {
        let mut key = SecretKey::from_scalar(Scalar::from(7u64));
        key.zeroize();
        assert_eq!(key.as_scalar(), &Scalar::ZERO);
    }
}
