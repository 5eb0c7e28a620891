//! Group operations and point utilities

use crate::{BulletproofsError, BulletproofsResult};
use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{Identity, IsIdentity, VartimeMultiscalarMul},
};
use serde::{Deserialize, Serialize};

/// A point on the Ristretto group with additional utility methods.
///
/// The identity compresses to 32 zero bytes, which is the encoding compared
/// against when summing commitments of a balanced row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupElement(pub RistrettoPoint);

impl GroupElement {
    /// Identity element
    pub fn identity() -> Self {
        Self(RistrettoPoint::identity())
    }

    /// Whether this is the identity element
    pub fn is_identity(&self) -> bool {
        self.0.is_identity()
    }

    /// Create from compressed point
    pub fn from_compressed(compressed: &CompressedRistretto) -> BulletproofsResult<Self> {
        compressed
            .decompress()
            .map(Self)
            .ok_or_else(|| BulletproofsError::InvalidProof("Invalid compressed point".to_string()))
    }

    /// Create from a 32-byte canonical encoding
    pub fn from_bytes(bytes: &[u8]) -> BulletproofsResult<Self> {
        let compressed = CompressedRistretto::from_slice(bytes).map_err(|_| {
            BulletproofsError::SerializationError(format!(
                "point encoding must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Self::from_compressed(&compressed)
    }

    /// Compress this point
    pub fn compress(&self) -> CompressedRistretto {
        self.0.compress()
    }

    /// Canonical 32-byte encoding
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.compress().to_bytes()
    }

    /// Perform multi-scalar multiplication
    pub fn multiscalar_mul<I, J>(scalars: I, points: J) -> Self
    where
        I: IntoIterator,
        I::Item: core::borrow::Borrow<Scalar>,
        J: IntoIterator,
        J::Item: core::borrow::Borrow<RistrettoPoint>,
    {
        Self(RistrettoPoint::vartime_multiscalar_mul(scalars, points))
    }
}

impl Default for GroupElement {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Add for GroupElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::ops::AddAssign for GroupElement {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl std::ops::Sub for GroupElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::ops::Mul<Scalar> for GroupElement {
    type Output = Self;

    fn mul(self, scalar: Scalar) -> Self {
        Self(self.0 * scalar)
    }
}

impl std::ops::Mul<&Scalar> for GroupElement {
    type Output = Self;

    fn mul(self, scalar: &Scalar) -> Self {
        Self(self.0 * scalar)
    }
}

impl std::ops::Neg for GroupElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for GroupElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, p| acc + p)
    }
}

impl<'a> std::iter::Sum<&'a GroupElement> for GroupElement {
    fn sum<I: Iterator<Item = &'a GroupElement>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, p| acc + *p)
    }
}

impl From<RistrettoPoint> for GroupElement {
    fn from(point: RistrettoPoint) -> Self {
        Self(point)
    }
}

impl From<GroupElement> for RistrettoPoint {
    fn from(element: GroupElement) -> Self {
        element.0
    }
}
