//! Transcript management for the Fiat-Shamir heuristic
//!
//! Every challenge is squeezed from a fresh transcript that absorbs the
//! fixed-width compressed encoding of its input points.

use crate::GroupElement;
use curve25519_dalek::scalar::Scalar;
use merlin::Transcript;

/// Extension trait for Transcript with group-aware helpers
pub trait TranscriptProtocol {
    /// Append a group element to the transcript
    fn append_point(&mut self, label: &'static [u8], point: &GroupElement);

    /// Append a scalar to the transcript
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Challenge scalar from transcript
    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar;
}

impl TranscriptProtocol for Transcript {
    fn append_point(&mut self, label: &'static [u8], point: &GroupElement) {
        self.append_message(label, point.compress().as_bytes());
    }

    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, scalar.as_bytes());
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> Scalar {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        Scalar::from_bytes_mod_order_wide(&buf)
    }
}

/// Create a new transcript with domain separation
pub fn proof_transcript(domain_label: &'static [u8]) -> Transcript {
    let mut transcript = Transcript::new(b"zkledger");
    transcript.append_message(b"domain", domain_label);
    transcript
}

/// Hash a list of points to a challenge scalar under `domain_label`.
pub fn point_challenge(domain_label: &'static [u8], points: &[&GroupElement]) -> Scalar {
    let mut transcript = proof_transcript(domain_label);
    transcript.append_message(b"count", &(points.len() as u64).to_le_bytes());
    for point in points {
        transcript.append_point(b"point", point);
    }
    transcript.challenge_scalar(b"challenge")
}
