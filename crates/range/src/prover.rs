//! Range proof prover implementation

use crate::{delta, RangeProof, RANGE_X_DOMAIN, RANGE_Y_DOMAIN, RANGE_Z_DOMAIN};
use bulletproofs_core::{
    point_challenge, utils::*, vector_commit, BulletproofsError, BulletproofsResult,
    GroupElement, ParameterSet, Scalar,
};
use ipa::InnerProductProver;
use rand_core::{CryptoRng, RngCore};
use tracing::debug;

/// Largest vector length a value of type `u64` can be decomposed into.
pub const MAX_BIT_LENGTH: usize = 64;

/// Prover for range proofs
#[derive(Debug, Clone, Copy)]
pub struct RangeProver<'a> {
    params: &'a ParameterSet,
}

impl<'a> RangeProver<'a> {
    /// Create a range prover over a shared parameter set
    pub fn new(params: &'a ParameterSet) -> Self {
        Self { params }
    }

    /// Prove that `value` lies in `[0, 2^V)` under a freshly drawn blinding factor.
    ///
    /// Returns the proof together with the blinding `γ` of its commitment.
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        value: i64,
        rng: &mut R,
    ) -> BulletproofsResult<(RangeProof, Scalar)> {
        self.check_value(value)?;
        let gamma = Scalar::random(&mut *rng);
        let proof = self.prove_with_blinding(value, &gamma, rng)?;
        Ok((proof, gamma))
    }

    /// Prove with a caller supplied blinding factor for `Comm = v·G + γ·H`.
    pub fn prove_with_blinding<R: RngCore + CryptoRng>(
        &self,
        value: i64,
        gamma: &Scalar,
        rng: &mut R,
    ) -> BulletproofsResult<RangeProof> {
        let bits = self.check_value(value)?;
        let params = self.params;
        let (bp_g, bp_h) = (params.bp_g(), params.bp_h());
        let v = Scalar::from(value as u64);

        let commitment = params.commit(&v, gamma);

        // Bit vectors: aL holds bit i at index i, aR = aL - 1
        let a_l = bit_decomposition(value as u64, bits);
        let a_r = vector_add_scalar(&a_l, &(-Scalar::ONE));
        let alpha = Scalar::random(&mut *rng);
        let a = vector_commit(bp_g, bp_h, &a_l, &a_r)? + params.h() * alpha;

        let s_l = random_vector(&mut *rng, bits);
        let s_r = random_vector(&mut *rng, bits);
        let rho = Scalar::random(&mut *rng);
        let s = vector_commit(bp_g, bp_h, &s_l, &s_r)? + params.h() * rho;

        let cy = point_challenge(RANGE_Y_DOMAIN, &[&a]);
        let cz = point_challenge(RANGE_Z_DOMAIN, &[&s]);
        let z2 = cz * cz;
        let y_powers = scalar_powers(&cy, bits);
        let twos = scalar_powers(&Scalar::from(2u64), bits);

        // l(X) = l0 + X·sL, r(X) = r0 + X·r1
        let l0 = vector_add_scalar(&a_l, &(-cz));
        let r0 = vector_add(
            &hadamard_product(&y_powers, &vector_add_scalar(&a_r, &cz))?,
            &vector_scale(&twos, &z2),
        )?;
        let r1 = hadamard_product(&s_r, &y_powers)?;

        let t0 = v * z2 + delta(&y_powers, &cz, bits);
        let t1 = inner_product(&s_l, &r0)? + inner_product(&l0, &r1)?;
        let t2 = inner_product(&s_l, &r1)?;

        let tau1 = Scalar::random(&mut *rng);
        let tau2 = Scalar::random(&mut *rng);
        let t1_commit = params.commit(&t1, &tau1);
        let t2_commit = params.commit(&t2, &tau2);

        let cx = point_challenge(RANGE_X_DOMAIN, &[&t1_commit, &t2_commit]);

        let l = vector_add(&l0, &vector_scale(&s_l, &cx))?;
        let r = vector_add(&r0, &vector_scale(&r1, &cx))?;
        let th = inner_product(&l, &r)?;
        if th != t0 + t1 * cx + t2 * cx * cx {
            return Err(BulletproofsError::AlgebraicInconsistency(
                "t(x) does not match <l(x), r(x)>".to_string(),
            ));
        }

        let tau = tau2 * cx * cx + tau1 * cx + z2 * gamma;
        let mu = alpha + rho * cx;

        let h_prime = fold_h(bp_h, &cy)?;
        let p = vector_commit(bp_g, &h_prime, &l, &r)?;
        let ipp = InnerProductProver::new(bp_g, &h_prime, params.u())?.prove(&l, &r, &th, &p)?;

        debug!(bits, "range proof created");

        Ok(RangeProof {
            commitment,
            a,
            s,
            t1: t1_commit,
            t2: t2_commit,
            tau,
            th,
            mu,
            cy,
            cz,
            cx,
            ipp,
        })
    }

    /// Validate the parameter size and the value; returns the bit length.
    fn check_value(&self, value: i64) -> BulletproofsResult<usize> {
        let bits = self.params.vector_length();
        if bits > MAX_BIT_LENGTH {
            return Err(BulletproofsError::InvalidParameters(format!(
                "range proofs support at most {} bits, parameters have {}",
                MAX_BIT_LENGTH, bits
            )));
        }
        let in_range = value >= 0 && (bits == MAX_BIT_LENGTH || (value as u64) < (1u64 << bits));
        if !in_range {
            return Err(BulletproofsError::ValueOutOfRange { value, bits });
        }
        Ok(bits)
    }
}

/// `H'_i = y^{-i}·BPH_i`
pub(crate) fn fold_h(bp_h: &[GroupElement], cy: &Scalar) -> BulletproofsResult<Vec<GroupElement>> {
    let y_inv = invert(cy)?;
    Ok(bp_h
        .iter()
        .zip(scalar_powers(&y_inv, bp_h.len()))
        .map(|(h, y)| *h * y)
        .collect())
}

/// Prove that `value` is in range for `params`; see [`RangeProver::prove`].
pub fn prove_range<R: RngCore + CryptoRng>(
    params: &ParameterSet,
    value: i64,
    rng: &mut R,
) -> BulletproofsResult<(RangeProof, Scalar)> {
    RangeProver::new(params).prove(value, rng)
}
