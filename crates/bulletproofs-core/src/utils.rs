//! Scalar vector helpers shared by the prover and verifier

use crate::{BulletproofsError, BulletproofsResult};
use curve25519_dalek::scalar::Scalar;
use rand_core::{CryptoRng, RngCore};

fn check_lengths(a: &[Scalar], b: &[Scalar]) -> BulletproofsResult<()> {
    if a.len() != b.len() {
        return Err(BulletproofsError::VectorLengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(())
}

/// Compute powers of a scalar: [1, x, x^2, x^3, ..., x^(n-1)]
pub fn scalar_powers(x: &Scalar, n: usize) -> Vec<Scalar> {
    let mut powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;

    for _ in 0..n {
        powers.push(current);
        current *= x;
    }

    powers
}

/// Compute the inner product of two scalar vectors
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> BulletproofsResult<Scalar> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum())
}

/// Hadamard (element-wise) product of two scalar vectors
pub fn hadamard_product(a: &[Scalar], b: &[Scalar]) -> BulletproofsResult<Vec<Scalar>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).collect())
}

/// Add two scalar vectors element-wise
pub fn vector_add(a: &[Scalar], b: &[Scalar]) -> BulletproofsResult<Vec<Scalar>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai + bi).collect())
}

/// Subtract two scalar vectors element-wise: a - b
pub fn vector_sub(a: &[Scalar], b: &[Scalar]) -> BulletproofsResult<Vec<Scalar>> {
    check_lengths(a, b)?;
    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai - bi).collect())
}

/// Scale a vector by a scalar
pub fn vector_scale(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| v * scalar).collect()
}

/// Add the same scalar to every entry
pub fn vector_add_scalar(vec: &[Scalar], scalar: &Scalar) -> Vec<Scalar> {
    vec.iter().map(|v| v + scalar).collect()
}

/// Sum of all entries
pub fn vector_sum(vec: &[Scalar]) -> Scalar {
    vec.iter().sum()
}

/// Fresh uniformly random scalars
pub fn random_vector<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Vec<Scalar> {
    (0..n).map(|_| Scalar::random(&mut *rng)).collect()
}

/// Multiplicative inverse mod the group order.
pub fn invert(x: &Scalar) -> BulletproofsResult<Scalar> {
    if *x == Scalar::ZERO {
        return Err(BulletproofsError::NonInvertible);
    }
    Ok(x.invert())
}

/// Map a signed amount into the scalar field
pub fn scalar_from_i64(value: i64) -> Scalar {
    if value < 0 {
        -Scalar::from(value.unsigned_abs())
    } else {
        Scalar::from(value as u64)
    }
}

/// Construct the bit decomposition of a value (little-endian)
pub fn bit_decomposition(value: u64, bits: usize) -> Vec<Scalar> {
    let mut result = Vec::with_capacity(bits);
    let mut v = value;

    for _ in 0..bits {
        result.push(Scalar::from(v & 1));
        v >>= 1;
    }

    result
}

/// Check if a number is a power of 2
pub fn is_power_of_two(n: usize) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// Base-2 logarithm of an exact power of two
pub fn log2_exact(n: usize) -> BulletproofsResult<usize> {
    if !is_power_of_two(n) {
        return Err(BulletproofsError::NotPowerOfTwo(n));
    }
    Ok(n.trailing_zeros() as usize)
}
