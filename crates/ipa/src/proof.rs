//! Inner Product Argument proof structure

use bulletproofs_core::{BulletproofsError, BulletproofsResult, GroupElement};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use serde::{Deserialize, Serialize};

/// An inner product argument proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerProductProof {
    /// L values from each folding round (log_2(n) elements)
    pub l_vec: Vec<CompressedRistretto>,
    /// R values from each folding round (log_2(n) elements)
    pub r_vec: Vec<CompressedRistretto>,
    /// Initial challenge bound to `P`, followed by one challenge per round
    pub challenges: Vec<Scalar>,
    /// Final scalar value a
    pub a: Scalar,
    /// Final scalar value b
    pub b: Scalar,
}

impl InnerProductProof {
    /// Create a new inner product proof
    pub fn new(
        l_vec: &[GroupElement],
        r_vec: &[GroupElement],
        challenges: Vec<Scalar>,
        a: Scalar,
        b: Scalar,
    ) -> Self {
        Self {
            l_vec: l_vec.iter().map(|p| p.compress()).collect(),
            r_vec: r_vec.iter().map(|p| p.compress()).collect(),
            challenges,
            a,
            b,
        }
    }

    /// Get the number of folding rounds
    pub fn num_rounds(&self) -> usize {
        self.l_vec.len()
    }

    /// Check that the L, R and challenge sequences agree in length
    pub fn validate_structure(&self) -> BulletproofsResult<()> {
        if self.l_vec.len() != self.r_vec.len() {
            return Err(BulletproofsError::InvalidProof(
                "L and R vectors must have the same length".to_string(),
            ));
        }
        if self.challenges.len() != self.l_vec.len() + 1 {
            return Err(BulletproofsError::InvalidProof(format!(
                "expected {} challenges, found {}",
                self.l_vec.len() + 1,
                self.challenges.len()
            )));
        }
        Ok(())
    }

    /// Decompress L values
    pub fn decompress_l_vec(&self) -> BulletproofsResult<Vec<GroupElement>> {
        self.l_vec.iter().map(GroupElement::from_compressed).collect()
    }

    /// Decompress R values
    pub fn decompress_r_vec(&self) -> BulletproofsResult<Vec<GroupElement>> {
        self.r_vec.iter().map(GroupElement::from_compressed).collect()
    }

    /// Get proof size in bytes
    pub fn size_bytes(&self) -> usize {
        4 + (self.l_vec.len() + self.r_vec.len() + self.challenges.len() + 2) * 32
    }

    /// Serialize proof to bytes
    ///
    /// Layout: round count (u32 LE), L points, R points, challenges, `a`, `b`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.size_bytes());

        result.extend_from_slice(&(self.l_vec.len() as u32).to_le_bytes());
        for point in self.l_vec.iter().chain(self.r_vec.iter()) {
            result.extend_from_slice(point.as_bytes());
        }
        for scalar in &self.challenges {
            result.extend_from_slice(scalar.as_bytes());
        }
        result.extend_from_slice(self.a.as_bytes());
        result.extend_from_slice(self.b.as_bytes());

        result
    }

    /// Deserialize proof from bytes
    pub fn from_bytes(bytes: &[u8]) -> BulletproofsResult<Self> {
        if bytes.len() < 4 {
            return Err(BulletproofsError::InvalidProof(
                "Insufficient bytes for proof".to_string(),
            ));
        }

        let mut header = [0u8; 4];
        header.copy_from_slice(&bytes[..4]);
        let num_rounds = u32::from_le_bytes(header) as usize;

        let expected_size = 4 + (3 * num_rounds + 3) * 32;
        if bytes.len() != expected_size {
            return Err(BulletproofsError::InvalidProof(format!(
                "Invalid proof size: expected {}, got {}",
                expected_size,
                bytes.len()
            )));
        }

        let mut chunks = bytes[4..].chunks_exact(32);
        let mut next_chunk = || -> BulletproofsResult<[u8; 32]> {
            let mut buf = [0u8; 32];
            let chunk = chunks
                .next()
                .ok_or_else(|| BulletproofsError::InvalidProof("truncated proof".to_string()))?;
            buf.copy_from_slice(chunk);
            Ok(buf)
        };

        let mut l_vec = Vec::with_capacity(num_rounds);
        for _ in 0..num_rounds {
            l_vec.push(CompressedRistretto(next_chunk()?));
        }
        let mut r_vec = Vec::with_capacity(num_rounds);
        for _ in 0..num_rounds {
            r_vec.push(CompressedRistretto(next_chunk()?));
        }
        let mut challenges = Vec::with_capacity(num_rounds + 1);
        for _ in 0..=num_rounds {
            challenges.push(canonical_scalar(next_chunk()?)?);
        }
        let a = canonical_scalar(next_chunk()?)?;
        let b = canonical_scalar(next_chunk()?)?;

        Ok(Self {
            l_vec,
            r_vec,
            challenges,
            a,
            b,
        })
    }
}

fn canonical_scalar(bytes: [u8; 32]) -> BulletproofsResult<Scalar> {
    Option::from(Scalar::from_canonical_bytes(bytes))
        .ok_or_else(|| BulletproofsError::InvalidProof("non-canonical scalar".to_string()))
}
