//! Inner Product Argument prover implementation

use crate::{InnerProductProof, IPA_INIT_DOMAIN, IPA_ROUND_DOMAIN};
use bulletproofs_core::{
    point_challenge, utils::*, vector_commit, BulletproofsError, BulletproofsResult, GroupElement,
};
use curve25519_dalek::scalar::Scalar;
use tracing::trace;

/// Inner Product Argument prover over a fixed generator basis
#[derive(Debug, Clone)]
pub struct InnerProductProver<'a> {
    g: &'a [GroupElement],
    h: &'a [GroupElement],
    u: GroupElement,
}

impl<'a> InnerProductProver<'a> {
    /// Create a new IPA prover with the given generators
    ///
    /// `g` and `h` must have the same power-of-two length.
    pub fn new(g: &'a [GroupElement], h: &'a [GroupElement], u: GroupElement) -> BulletproofsResult<Self> {
        if g.len() != h.len() {
            return Err(BulletproofsError::VectorLengthMismatch {
                expected: g.len(),
                actual: h.len(),
            });
        }
        log2_exact(g.len())?;
        Ok(Self { g, h, u })
    }

    /// Create an inner product proof
    ///
    /// Proves knowledge of `a`, `b` with `P = <a,G> + <b,H>` and `c = <a,b>`.
    /// The initial challenge rebinds `P` to `c` through `U` before folding.
    pub fn prove(
        &self,
        a: &[Scalar],
        b: &[Scalar],
        c: &Scalar,
        p: &GroupElement,
    ) -> BulletproofsResult<InnerProductProof> {
        let n = self.g.len();
        for actual in [a.len(), b.len()] {
            if actual != n {
                return Err(BulletproofsError::VectorLengthMismatch { expected: n, actual });
            }
        }
        let rounds = log2_exact(n)?;

        let x0 = point_challenge(IPA_INIT_DOMAIN, &[p]);
        let ux = self.u * x0;
        let mut target = *p + ux * c;

        let mut challenges = Vec::with_capacity(rounds + 1);
        challenges.push(x0);
        let mut l_vec = Vec::with_capacity(rounds);
        let mut r_vec = Vec::with_capacity(rounds);

        let mut current_a = a.to_vec();
        let mut current_b = b.to_vec();
        let mut current_g = self.g.to_vec();
        let mut current_h = self.h.to_vec();

        while current_a.len() > 1 {
            let m = current_a.len() / 2;

            let (a_l, a_r) = current_a.split_at(m);
            let (b_l, b_r) = current_b.split_at(m);
            let (g_l, g_r) = current_g.split_at(m);
            let (h_l, h_r) = current_h.split_at(m);

            let c_l = inner_product(a_l, b_r)?;
            let c_r = inner_product(a_r, b_l)?;

            // L = <a_L, G_R> + <b_R, H_L> + c_L·U'
            let l = vector_commit(g_r, h_l, a_l, b_r)? + ux * c_l;
            // R = <a_R, G_L> + <b_L, H_R> + c_R·U'
            let r = vector_commit(g_l, h_r, a_r, b_l)? + ux * c_r;

            let x = point_challenge(IPA_ROUND_DOMAIN, &[&l, &r]);
            let x_inv = invert(&x)?;

            let mut folded_a = Vec::with_capacity(m);
            let mut folded_b = Vec::with_capacity(m);
            let mut folded_g = Vec::with_capacity(m);
            let mut folded_h = Vec::with_capacity(m);

            for i in 0..m {
                folded_a.push(a_l[i] * x + a_r[i] * x_inv);
                folded_b.push(b_l[i] * x_inv + b_r[i] * x);
                folded_g.push(GroupElement::multiscalar_mul([x_inv, x], [g_l[i].0, g_r[i].0]));
                folded_h.push(GroupElement::multiscalar_mul([x, x_inv], [h_l[i].0, h_r[i].0]));
            }

            target = l * (x * x) + target + r * (x_inv * x_inv);

            l_vec.push(l);
            r_vec.push(r);
            challenges.push(x);

            current_a = folded_a;
            current_b = folded_b;
            current_g = folded_g;
            current_h = folded_h;
        }

        let (final_a, final_b) = (current_a[0], current_b[0]);
        let opened = current_g[0] * final_a + current_h[0] * final_b + ux * (final_a * final_b);
        if opened != target {
            return Err(BulletproofsError::AlgebraicInconsistency(
                "commitment does not open to the supplied vectors and inner product".to_string(),
            ));
        }
        trace!(n, rounds, "inner product proof created");

        Ok(InnerProductProof::new(&l_vec, &r_vec, challenges, final_a, final_b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InnerProductVerifier;
    use bulletproofs_core::ParameterSet;

    fn scalars(values: &[u64]) -> Vec<Scalar> {
        values.iter().copied().map(Scalar::from).collect()
    }

    #[test]
    fn test_ipa_prove_rounds() {
        let params = ParameterSet::derive(4).unwrap();
        let prover = InnerProductProver::new(params.bp_g(), params.bp_h(), params.u()).unwrap();

        let a = scalars(&[1, 2, 3, 4]);
        let b = scalars(&[5, 6, 7, 8]);
        let c = inner_product(&a, &b).unwrap();
        let p = vector_commit(params.bp_g(), params.bp_h(), &a, &b).unwrap();

        let proof = prover.prove(&a, &b, &c, &p).unwrap();

        assert_eq!(proof.num_rounds(), 2);
        assert_eq!(proof.challenges.len(), 3);
        assert!(proof.validate_structure().is_ok());
    }

    #[test]
    fn test_ipa_prove_length_one() {
        let params = ParameterSet::derive(1).unwrap();
        let prover = InnerProductProver::new(params.bp_g(), params.bp_h(), params.u()).unwrap();

        let a = scalars(&[9]);
        let b = scalars(&[11]);
        let p = vector_commit(params.bp_g(), params.bp_h(), &a, &b).unwrap();
        let proof = prover.prove(&a, &b, &Scalar::from(99u64), &p).unwrap();

        assert_eq!(proof.num_rounds(), 0);
        assert_eq!((proof.a, proof.b), (a[0], b[0]));
    }

    #[test]
    fn test_ipa_rejects_non_power_of_two() {
        let params = ParameterSet::derive(4).unwrap();
        let result = InnerProductProver::new(&params.bp_g()[..3], &params.bp_h()[..3], params.u());
        assert_eq!(result.err(), Some(BulletproofsError::NotPowerOfTwo(3)));
    }

    #[test]
    fn test_ipa_rejects_mismatched_vectors() {
        let params = ParameterSet::derive(4).unwrap();
        let prover = InnerProductProver::new(params.bp_g(), params.bp_h(), params.u()).unwrap();
        let a = scalars(&[1, 2, 3, 4]);
        let b = scalars(&[1, 2]);
        let result = prover.prove(&a, &b, &Scalar::ZERO, &GroupElement::identity());
        assert!(matches!(result, Err(BulletproofsError::VectorLengthMismatch { .. })));
    }

    #[test]
    fn test_ipa_rejects_commitment_that_does_not_open() {
        let params = ParameterSet::derive(4).unwrap();
        let prover = InnerProductProver::new(params.bp_g(), params.bp_h(), params.u()).unwrap();
        let a = scalars(&[1, 2, 3, 4]);
        let b = scalars(&[5, 6, 7, 8]);
        let c = inner_product(&a, &b).unwrap();
        let p = vector_commit(params.bp_g(), params.bp_h(), &a, &b).unwrap();

        let result = prover.prove(&a, &b, &(c + Scalar::ONE), &p);
        assert!(matches!(result, Err(BulletproofsError::AlgebraicInconsistency(_))));
    }

    #[test]
    fn test_ipa_proof_bytes_round_trip() {
        let params = ParameterSet::derive(8).unwrap();
        let prover = InnerProductProver::new(params.bp_g(), params.bp_h(), params.u()).unwrap();
        let a = scalars(&[3, 1, 4, 1, 5, 9, 2, 6]);
        let b = scalars(&[2, 7, 1, 8, 2, 8, 1, 8]);
        let c = inner_product(&a, &b).unwrap();
        let p = vector_commit(params.bp_g(), params.bp_h(), &a, &b).unwrap();
        let proof = prover.prove(&a, &b, &c, &p).unwrap();

        let bytes = proof.to_bytes();
        assert_eq!(bytes.len(), proof.size_bytes());
        let decoded = InnerProductProof::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, proof);

        let verifier = InnerProductVerifier::new(params.bp_g(), params.bp_h(), params.u()).unwrap();
        assert!(verifier.verify(&c, &p, &decoded));

        assert!(InnerProductProof::from_bytes(&bytes[..bytes.len() - 32]).is_err());
        assert!(InnerProductProof::from_bytes(&bytes[..2]).is_err());
    }
}
