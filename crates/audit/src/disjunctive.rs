//! Disjunctive (OR) proofs of discrete-log knowledge
//!
//! A prover shows it knows `x` with `Y1 = x·G1` **or** `Y2 = x·G2` without
//! revealing which. [`SigmaOr`] runs a real Schnorr proof on the true branch
//! and simulates the other, splitting the Fiat-Shamir challenge so that
//! `c1 + c2 = H(G1, Y1, G2, Y2, A1, A2)`.

use crate::{AuditError, AuditResult};
use bulletproofs_core::{proof_transcript, GroupElement, Scalar, TranscriptProtocol};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

/// Domain label for the OR-proof challenge
pub const OR_PROOF_DOMAIN: &[u8] = b"audit.or";

/// Encoded size of an [`OrProof`]: two points and four scalars.
pub const OR_PROOF_SIZE: usize = 6 * 32;

/// Which relation of an [`OrStatement`] the witness satisfies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Branch {
    /// `Y1 = x·G1`
    Left,
    /// `Y2 = x·G2`
    Right,
}

impl Branch {
    fn name(self) -> &'static str {
        match self {
            Branch::Left => "left",
            Branch::Right => "right",
        }
    }
}

/// Public statement `Y1 = x·G1 ∨ Y2 = x·G2`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrStatement {
    pub g1: GroupElement,
    pub y1: GroupElement,
    pub g2: GroupElement,
    pub y2: GroupElement,
}

impl OrStatement {
    /// Whether `witness` opens the chosen branch
    pub fn is_satisfied_by(&self, witness: &Scalar, branch: Branch) -> bool {
        match branch {
            Branch::Left => self.g1 * witness == self.y1,
            Branch::Right => self.g2 * witness == self.y2,
        }
    }

    fn challenge(&self, a1: &GroupElement, a2: &GroupElement) -> Scalar {
        let mut transcript = proof_transcript(OR_PROOF_DOMAIN);
        transcript.append_point(b"g1", &self.g1);
        transcript.append_point(b"y1", &self.y1);
        transcript.append_point(b"g2", &self.g2);
        transcript.append_point(b"y2", &self.y2);
        transcript.append_point(b"a1", a1);
        transcript.append_point(b"a2", a2);
        transcript.challenge_scalar(b"challenge")
    }
}

/// Capability of proving and checking OR statements.
///
/// The ledger only depends on this interface, so any sound Sigma-protocol
/// OR composition can be plugged in.
pub trait DisjunctiveProver {
    /// Proof object produced by this scheme
    type Proof;

    /// Prove knowledge of `witness` for `branch` of `statement`.
    fn prove<R: RngCore + CryptoRng>(
        &self,
        statement: &OrStatement,
        witness: &Scalar,
        branch: Branch,
        rng: &mut R,
    ) -> AuditResult<Self::Proof>;

    /// Check a proof against `statement`; never errors, only rejects.
    fn verify(&self, statement: &OrStatement, proof: &Self::Proof) -> bool;

    /// Encode a proof for storage
    fn serialize(&self, proof: &Self::Proof) -> Vec<u8>;

    /// Decode a proof previously produced by [`DisjunctiveProver::serialize`]
    fn deserialize(&self, bytes: &[u8]) -> AuditResult<Self::Proof>;
}

/// Transcript of a Cramer-Damgård-Schoenmakers OR proof
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrProof {
    pub a1: GroupElement,
    pub a2: GroupElement,
    pub c1: Scalar,
    pub c2: Scalar,
    pub s1: Scalar,
    pub s2: Scalar,
}

/// OR composition of two Schnorr proofs
#[derive(Debug, Clone, Copy, Default)]
pub struct SigmaOr;

impl DisjunctiveProver for SigmaOr {
    type Proof = OrProof;

    fn prove<R: RngCore + CryptoRng>(
        &self,
        statement: &OrStatement,
        witness: &Scalar,
        branch: Branch,
        rng: &mut R,
    ) -> AuditResult<OrProof> {
        if !statement.is_satisfied_by(witness, branch) {
            return Err(AuditError::InvalidWitness(branch.name()));
        }

        let (real_base, sim_base, sim_target) = match branch {
            Branch::Left => (statement.g1, statement.g2, statement.y2),
            Branch::Right => (statement.g2, statement.g1, statement.y1),
        };

        // Simulated branch: pick the response and challenge, solve for A
        let c_sim = Scalar::random(&mut *rng);
        let s_sim = Scalar::random(&mut *rng);
        let a_sim = sim_base * s_sim - sim_target * c_sim;

        let mut k = Scalar::random(&mut *rng);
        let a_real = real_base * k;

        let (a1, a2) = match branch {
            Branch::Left => (a_real, a_sim),
            Branch::Right => (a_sim, a_real),
        };
        let c = statement.challenge(&a1, &a2);
        let c_real = c - c_sim;
        let s_real = k + c_real * witness;
        k.zeroize();

        debug!(branch = branch.name(), "disjunctive proof created");

        Ok(match branch {
            Branch::Left => OrProof { a1, a2, c1: c_real, c2: c_sim, s1: s_real, s2: s_sim },
            Branch::Right => OrProof { a1, a2, c1: c_sim, c2: c_real, s1: s_sim, s2: s_real },
        })
    }

    fn verify(&self, statement: &OrStatement, proof: &OrProof) -> bool {
        if proof.c1 + proof.c2 != statement.challenge(&proof.a1, &proof.a2) {
            debug!("disjunctive proof challenge split mismatch");
            return false;
        }
        let left = statement.g1 * proof.s1 == proof.a1 + statement.y1 * proof.c1;
        let right = statement.g2 * proof.s2 == proof.a2 + statement.y2 * proof.c2;
        if !(left && right) {
            debug!(left, right, "disjunctive proof response check failed");
        }
        left && right
    }

    fn serialize(&self, proof: &OrProof) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(OR_PROOF_SIZE);
        bytes.extend_from_slice(&proof.a1.to_bytes());
        bytes.extend_from_slice(&proof.a2.to_bytes());
        for scalar in [&proof.c1, &proof.c2, &proof.s1, &proof.s2] {
            bytes.extend_from_slice(scalar.as_bytes());
        }
        bytes
    }

    fn deserialize(&self, bytes: &[u8]) -> AuditResult<OrProof> {
        if bytes.len() != OR_PROOF_SIZE {
            return Err(AuditError::MalformedProof(format!(
                "expected {} bytes, got {}",
                OR_PROOF_SIZE,
                bytes.len()
            )));
        }
        let chunk = |i: usize| &bytes[i * 32..(i + 1) * 32];
        let scalar = |i: usize| -> AuditResult<Scalar> {
            let mut buf = [0u8; 32];
            buf.copy_from_slice(chunk(i));
            Option::from(Scalar::from_canonical_bytes(buf))
                .ok_or_else(|| AuditError::MalformedProof("non-canonical scalar".to_string()))
        };

        Ok(OrProof {
            a1: GroupElement::from_bytes(chunk(0))?,
            a2: GroupElement::from_bytes(chunk(1))?,
            c1: scalar(2)?,
            c2: scalar(3)?,
            s1: scalar(4)?,
            s2: scalar(5)?,
        })
    }
}
