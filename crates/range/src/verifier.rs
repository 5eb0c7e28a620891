//! Range proof verifier implementation

use crate::{delta, prover::fold_h, RangeProof, RANGE_X_DOMAIN, RANGE_Y_DOMAIN, RANGE_Z_DOMAIN};
use bulletproofs_core::{point_challenge, utils::*, GroupElement, ParameterSet, Scalar};
use ipa::InnerProductVerifier;
use rayon::prelude::*;
use tracing::debug;

/// Verifier for range proofs
#[derive(Debug, Clone, Copy)]
pub struct RangeVerifier<'a> {
    params: &'a ParameterSet,
}

impl<'a> RangeVerifier<'a> {
    /// Create a range verifier over a shared parameter set
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    /// Verify a range proof.
    ///
    /// Three checks must all pass: challenge replay, the `t(x)` commitment
    /// equation, and the inner product argument. Verification holds no state,
    /// so repeated calls agree.
    pub fn verify(&self, proof: &RangeProof) -> bool {
        let params = self.params;
        let bits = params.vector_length();

        if point_challenge(RANGE_Y_DOMAIN, &[&proof.a]) != proof.cy
            || point_challenge(RANGE_Z_DOMAIN, &[&proof.s]) != proof.cz
            || point_challenge(RANGE_X_DOMAIN, &[&proof.t1, &proof.t2]) != proof.cx
        {
            debug!("range proof challenge mismatch");
            return false;
        }

        let (cy, cz, cx) = (proof.cy, proof.cz, proof.cx);
        let z2 = cz * cz;
        let y_powers = scalar_powers(&cy, bits);
        let twos = scalar_powers(&Scalar::from(2u64), bits);
        let delta_yz = delta(&y_powers, &cz, bits);

        // th·G + τ·H - z²·Comm - δ·G - x·T1 - x²·T2 == 0
        let polynomial_residual = GroupElement::multiscalar_mul(
            [proof.th - delta_yz, proof.tau, -z2, -cx, -(cx * cx)],
            [
                params.g().0,
                params.h().0,
                proof.commitment.0,
                proof.t1.0,
                proof.t2.0,
            ],
        );
        if !polynomial_residual.is_identity() {
            debug!("range proof polynomial commitment check failed");
            return false;
        }

        let Ok(h_prime) = fold_h(params.bp_h(), &cy) else {
            debug!("range proof challenge y is not invertible");
            return false;
        };

        // P = A + x·S - z·ΣBPG + Σ H'_i·(z·y_i + z²·2^i) - μ·H
        let h_scalars = y_powers.iter().zip(twos.iter()).map(|(y, two)| cz * y + z2 * two);
        let p = GroupElement::multiscalar_mul(
            [Scalar::ONE, cx, -proof.mu]
                .into_iter()
                .chain(std::iter::repeat(-cz).take(bits))
                .chain(h_scalars),
            [proof.a.0, proof.s.0, params.h().0]
                .into_iter()
                .chain(params.bp_g().iter().map(|g| g.0))
                .chain(h_prime.iter().map(|h| h.0)),
        );

        let verifier = match InnerProductVerifier::new(params.bp_g(), &h_prime, params.u()) {
            Ok(verifier) => verifier,
            Err(err) => {
                debug!(%err, "parameter set cannot back an inner product verifier");
                return false;
            }
        };
        let valid = verifier.verify(&proof.th, &p, &proof.ipp);
        if !valid {
            debug!("range proof inner product argument rejected");
        }
        valid
    }

    /// Verify independent proofs in parallel; results keep the input order.
    pub fn verify_batch(&self, proofs: &[RangeProof]) -> Vec<bool> {
        proofs.par_iter().map(|proof| self.verify(proof)).collect()
    }
}

/// Verify `proof` against `params`; see [`RangeVerifier::verify`].
pub fn verify_range(params: &ParameterSet, proof: &RangeProof) -> bool {
    RangeVerifier::new(params).verify(proof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{prove_range, RangeProver};
    use rand::rngs::OsRng;

    #[test]
    fn test_value_five_with_eight_bits() {
        let params = ParameterSet::derive(8).unwrap();
        let r = Scalar::from(123_456_789u64);
        let proof = RangeProver::new(&params)
            .prove_with_blinding(5, &r, &mut OsRng)
            .unwrap();

        assert_eq!(proof.commitment, params.g() * Scalar::from(5u64) + params.h() * r);
        assert!(verify_range(&params, &proof));

        let wider = ParameterSet::derive(16).unwrap();
        assert!(!verify_range(&wider, &proof));
    }

    #[test]
    fn test_boundary_values() {
        let params = ParameterSet::derive(8).unwrap();
        for value in [0, 1, 128, 255] {
            let (proof, _) = prove_range(&params, value, &mut OsRng).unwrap();
            assert!(verify_range(&params, &proof), "value {} rejected", value);
        }
    }

    #[test]
    fn test_production_width() {
        let params = ParameterSet::derive(64).unwrap();
        for value in [0, 42, i64::MAX] {
            let (proof, _) = prove_range(&params, value, &mut OsRng).unwrap();
            assert!(verify_range(&params, &proof));
        }
    }

    #[test]
    fn test_verification_is_idempotent() {
        let params = ParameterSet::derive(8).unwrap();
        let (proof, _) = prove_range(&params, 17, &mut OsRng).unwrap();
        let verifier = RangeVerifier::new(&params);
        let first = verifier.verify(&proof);
        let second = verifier.verify(&proof);
        assert!(first);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_tampered_fields() {
        let params = ParameterSet::derive(8).unwrap();
        let (proof, _) = prove_range(&params, 200, &mut OsRng).unwrap();
        let verifier = RangeVerifier::new(&params);

        let mut flipped = proof.clone();
        let mut th_bytes = flipped.th.to_bytes();
        th_bytes[0] ^= 1;
        flipped.th = Scalar::from_bytes_mod_order(th_bytes);
        assert!(!verifier.verify(&flipped));

        let mut swapped = proof.clone();
        std::mem::swap(&mut swapped.ipp.l_vec[0], &mut swapped.ipp.r_vec[0]);
        assert!(!verifier.verify(&swapped));

        let mut moved_commitment = proof.clone();
        moved_commitment.commitment = moved_commitment.commitment + params.g();
        assert!(!verifier.verify(&moved_commitment));

        let mut other_a = proof.clone();
        other_a.a = other_a.a + params.h();
        assert!(!verifier.verify(&other_a));

        let mut other_tau = proof.clone();
        other_tau.tau += Scalar::ONE;
        assert!(!verifier.verify(&other_tau));

        let mut other_mu = proof.clone();
        other_mu.mu += Scalar::ONE;
        assert!(!verifier.verify(&other_mu));

        let mut other_cx = proof;
        other_cx.cx += Scalar::ONE;
        assert!(!verifier.verify(&other_cx));
    }

    #[test]
    fn test_batch_keeps_order() {
        let params = ParameterSet::derive(8).unwrap();
        let (good, _) = prove_range(&params, 3, &mut OsRng).unwrap();
        let mut bad = good.clone();
        bad.mu += Scalar::ONE;

        let results = RangeVerifier::new(&params).verify_batch(&[good.clone(), bad, good]);
        assert_eq!(results, vec![true, false, true]);
    }

    #[test]
    fn test_byte_encoding_round_trip_still_verifies() {
        let params = ParameterSet::derive(8).unwrap();
        let (proof, _) = prove_range(&params, 99, &mut OsRng).unwrap();
        let decoded = RangeProof::from_bytes(&proof.to_bytes()).unwrap();
        assert_eq!(decoded, proof);
        assert!(verify_range(&params, &decoded));
        assert!(RangeProof::from_bytes(&proof.to_bytes()[..100]).is_err());
    }
}
