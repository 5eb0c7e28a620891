//! Inner Product Argument verifier implementation

use crate::{InnerProductProof, IPA_INIT_DOMAIN, IPA_ROUND_DOMAIN};
use bulletproofs_core::{
    point_challenge, utils::*, BulletproofsError, BulletproofsResult, GroupElement,
};
use curve25519_dalek::scalar::Scalar;
use tracing::debug;

/// Inner Product Argument verifier over a fixed generator basis
#[derive(Debug, Clone)]
pub struct InnerProductVerifier<'a> {
    g: &'a [GroupElement],
    h: &'a [GroupElement],
    u: GroupElement,
    rounds: usize,
}

impl<'a> InnerProductVerifier<'a> {
    /// Create a new IPA verifier with the given generators
    pub fn new(g: &'a [GroupElement], h: &'a [GroupElement], u: GroupElement) -> BulletproofsResult<Self> {
        if g.len() != h.len() {
            return Err(BulletproofsError::VectorLengthMismatch {
                expected: g.len(),
                actual: h.len(),
            });
        }
        let rounds = log2_exact(g.len())?;
        Ok(Self { g, h, u, rounds })
    }

    /// Verify an inner product proof for commitment `P` and claimed product `c`.
    ///
    /// The stored challenges are replayed first; any mismatch rejects. The
    /// folding is then checked with one multiscalar multiplication instead
    /// of recomputing every round.
    pub fn verify(&self, c: &Scalar, p: &GroupElement, proof: &InnerProductProof) -> bool {
        if proof.validate_structure().is_err() || proof.num_rounds() != self.rounds {
            debug!(
                expected = self.rounds,
                found = proof.num_rounds(),
                "inner product proof has wrong shape"
            );
            return false;
        }

        if point_challenge(IPA_INIT_DOMAIN, &[p]) != proof.challenges[0] {
            debug!("initial inner product challenge mismatch");
            return false;
        }

        let (l_vec, r_vec) = match (proof.decompress_l_vec(), proof.decompress_r_vec()) {
            (Ok(l), Ok(r)) => (l, r),
            _ => {
                debug!("inner product proof carries an invalid point");
                return false;
            }
        };

        let round_challenges = &proof.challenges[1..];
        for (j, (l, r)) in l_vec.iter().zip(r_vec.iter()).enumerate() {
            if point_challenge(IPA_ROUND_DOMAIN, &[l, r]) != round_challenges[j] {
                debug!(round = j, "inner product round challenge mismatch");
                return false;
            }
        }

        let inverses: BulletproofsResult<Vec<Scalar>> = round_challenges.iter().map(invert).collect();
        let Ok(inverses) = inverses else {
            debug!("inner product challenge is not invertible");
            return false;
        };

        let (s, s_inv) = self.compute_s_scalars(round_challenges, &inverses);
        self.verify_final_equation(c, p, &l_vec, &r_vec, round_challenges, &inverses, &s, &s_inv, proof)
    }

    /// Compute the per-generator scalars of the fully folded basis.
    ///
    /// Round `j` halves on bit `rounds - 1 - j` of the generator index; a set
    /// bit selects `x_j`, a clear bit selects `x_j⁻¹`. The second vector is the
    /// element-wise inverse.
    fn compute_s_scalars(&self, challenges: &[Scalar], inverses: &[Scalar]) -> (Vec<Scalar>, Vec<Scalar>) {
        let n = self.g.len();
        let mut s = vec![Scalar::ONE; n];
        let mut s_inv = vec![Scalar::ONE; n];

        for (round, (x, x_inv)) in challenges.iter().zip(inverses.iter()).enumerate() {
            let bit_position = self.rounds - 1 - round;
            for i in 0..n {
                if (i >> bit_position) & 1 == 1 {
                    s[i] *= x;
                    s_inv[i] *= x_inv;
                } else {
                    s[i] *= x_inv;
                    s_inv[i] *= x;
                }
            }
        }

        (s, s_inv)
    }

    /// Check `<a·s, G> + <b·s⁻¹, H> + x0·(a·b − c)·U − P − Σ(x_j²L_j + x_j⁻²R_j) == 0`.
    #[allow(clippy::too_many_arguments)]
    fn verify_final_equation(
        &self,
        c: &Scalar,
        p: &GroupElement,
        l_vec: &[GroupElement],
        r_vec: &[GroupElement],
        challenges: &[Scalar],
        inverses: &[Scalar],
        s: &[Scalar],
        s_inv: &[Scalar],
        proof: &InnerProductProof,
    ) -> bool {
        let x0 = proof.challenges[0];
        let neg_x_sq = challenges.iter().map(|x| -(x * x));
        let neg_x_inv_sq = inverses.iter().map(|x| -(x * x));

        let scalars = s
            .iter()
            .map(|si| proof.a * si)
            .chain(s_inv.iter().map(|si| proof.b * si))
            .chain([x0 * (proof.a * proof.b - c), -Scalar::ONE])
            .chain(neg_x_sq)
            .chain(neg_x_inv_sq);

        let points = self
            .g
            .iter()
            .chain(self.h.iter())
            .chain([&self.u, p])
            .chain(l_vec.iter())
            .chain(r_vec.iter())
            .map(|point| point.0);

        let residual = GroupElement::multiscalar_mul(scalars, points);
        let valid = residual.is_identity();
        if !valid {
            debug!("inner product final equation does not hold");
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InnerProductProver;
    use bulletproofs_core::{vector_commit, ParameterSet};
    use rand::rngs::OsRng;

    struct Fixture {
        params: ParameterSet,
        a: Vec<Scalar>,
        b: Vec<Scalar>,
        c: Scalar,
        p: GroupElement,
    }

    fn fixture(n: usize) -> Fixture {
        let params = ParameterSet::derive(n).unwrap();
        let a = random_vector(&mut OsRng, n);
        let b = random_vector(&mut OsRng, n);
        let c = inner_product(&a, &b).unwrap();
        let p = vector_commit(params.bp_g(), params.bp_h(), &a, &b).unwrap();
        Fixture { params, a, b, c, p }
    }

    fn prove(f: &Fixture) -> InnerProductProof {
        let prover = InnerProductProver::new(f.params.bp_g(), f.params.bp_h(), f.params.u()).unwrap();
        prover.prove(&f.a, &f.b, &f.c, &f.p).unwrap()
    }

    fn verifier(f: &Fixture) -> InnerProductVerifier<'_> {
        InnerProductVerifier::new(f.params.bp_g(), f.params.bp_h(), f.params.u()).unwrap()
    }

    fn test_ipa_round_trip(n: usize) {
        let f = fixture(n);
        let proof = prove(&f);
        assert!(verifier(&f).verify(&f.c, &f.p, &proof), "length {} failed", n);
    }

    #[test]
    fn test_ipa_various_lengths() {
        for n in [1, 2, 4, 8, 16, 64] {
            test_ipa_round_trip(n);
        }
    }

    #[test]
    fn test_ipa_rejects_wrong_inner_product() {
        let f = fixture(8);
        let proof = prove(&f);
        assert!(!verifier(&f).verify(&(f.c + Scalar::ONE), &f.p, &proof));
    }

    #[test]
    fn test_ipa_rejects_wrong_commitment() {
        let f = fixture(8);
        let proof = prove(&f);
        let other = f.p + f.params.g();
        assert!(!verifier(&f).verify(&f.c, &other, &proof));
    }

    #[test]
    fn test_ipa_rejects_swapped_l_and_r() {
        let f = fixture(8);
        let mut proof = prove(&f);
        std::mem::swap(&mut proof.l_vec[0], &mut proof.r_vec[0]);
        assert!(!verifier(&f).verify(&f.c, &f.p, &proof));
    }

    #[test]
    fn test_ipa_rejects_tampered_scalars() {
        let f = fixture(8);
        let proof = prove(&f);

        let mut tampered = proof.clone();
        tampered.a += Scalar::ONE;
        assert!(!verifier(&f).verify(&f.c, &f.p, &tampered));

        let mut tampered = proof.clone();
        tampered.challenges[2] = Scalar::from(7u64);
        assert!(!verifier(&f).verify(&f.c, &f.p, &tampered));
    }

    #[test]
    fn test_ipa_rejects_wrong_round_count() {
        let f = fixture(8);
        let mut proof = prove(&f);
        proof.l_vec.pop();
        proof.r_vec.pop();
        proof.challenges.pop();
        assert!(!verifier(&f).verify(&f.c, &f.p, &proof));
    }

    #[test]
    fn test_ipa_verifier_rejects_bad_basis() {
        let params = ParameterSet::derive(8).unwrap();
        assert!(InnerProductVerifier::new(&params.bp_g()[..6], &params.bp_h()[..6], params.u()).is_err());
        assert!(InnerProductVerifier::new(params.bp_g(), &params.bp_h()[..4], params.u()).is_err());
    }

    #[test]
    fn test_ipa_verification_is_repeatable() {
        let f = fixture(4);
        let proof = prove(&f);
        let v = verifier(&f);
        assert_eq!(v.verify(&f.c, &f.p, &proof), v.verify(&f.c, &f.p, &proof));
    }
}
