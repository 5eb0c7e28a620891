//! Transaction and audit specifications
//!
//! A specification is the secret side of a row: the plaintext amounts and
//! blinding factors that the ledger commits to. Blindings of one row always
//! sum to zero, so a balanced row's commitments sum to the identity.

use crate::{LedgerError, LedgerResult, OrgId, RowKind};
use audit::{OrgKeyPair, SecretKey};
use bulletproofs_core::{utils::random_vector, GroupElement, Scalar};
use rand_core::{CryptoRng, RngCore};

/// Amounts and blindings for every organization of one row
#[derive(Debug, Clone)]
pub struct TxSpecification {
    pub kind: RowKind,
    pub public_keys: Vec<GroupElement>,
    pub blindings: Vec<Scalar>,
    pub values: Vec<i64>,
}

impl TxSpecification {
    /// Initial issuance of `assets[i]` to organization `i`
    pub fn genesis<R: RngCore + CryptoRng>(
        public_keys: &[GroupElement],
        assets: &[i64],
        rng: &mut R,
    ) -> LedgerResult<Self> {
        if public_keys.len() != assets.len() {
            return Err(LedgerError::SpecificationMismatch(format!(
                "{} organizations but {} asset amounts",
                public_keys.len(),
                assets.len()
            )));
        }
        if let Some(negative) = assets.iter().find(|a| **a < 0) {
            return Err(LedgerError::SpecificationMismatch(format!(
                "genesis assets must be non-negative, got {}",
                negative
            )));
        }
        Ok(Self {
            kind: RowKind::Genesis,
            public_keys: public_keys.to_vec(),
            blindings: zero_sum_blindings(public_keys.len(), rng)?,
            values: assets.to_vec(),
        })
    }

    /// Transfer of `value` from `spender` to `receiver`; every other slot carries 0
    pub fn transfer<R: RngCore + CryptoRng>(
        public_keys: &[GroupElement],
        spender: OrgId,
        receiver: OrgId,
        value: i64,
        rng: &mut R,
    ) -> LedgerResult<Self> {
        let n = public_keys.len();
        let blindings = zero_sum_blindings(n, rng)?;
        for org in [spender, receiver] {
            if org.index() >= n {
                return Err(LedgerError::UnknownOrganization(org));
            }
        }
        if spender == receiver {
            return Err(LedgerError::SpecificationMismatch(format!(
                "{} cannot transfer to itself",
                spender
            )));
        }
        if value < 0 {
            return Err(LedgerError::SpecificationMismatch(format!(
                "transfer value must be non-negative, got {}",
                value
            )));
        }

        let mut values = vec![0i64; n];
        values[spender.index()] = -value;
        values[receiver.index()] = value;

        Ok(Self {
            kind: RowKind::Transfer,
            public_keys: public_keys.to_vec(),
            blindings,
            values,
        })
    }

    pub fn organizations(&self) -> usize {
        self.public_keys.len()
    }
}

/// Secrets the audit step needs for one row
#[derive(Debug, Clone)]
pub struct AuditSpecification {
    pub spender: OrgId,
    pub spender_secret: SecretKey,
    /// Row blindings, as in the matching [`TxSpecification`]
    pub blindings: Vec<Scalar>,
    /// Value each organization range-proves: the spender's remaining
    /// balance, the received amount, or zero
    pub range_values: Vec<i64>,
}

impl AuditSpecification {
    /// Build the audit inputs for a transfer row.
    ///
    /// `spender_balance` is the spender's balance after `tx` is applied. The
    /// spender slot is found by matching `spender_key.public` against the
    /// row's public keys.
    pub fn new(
        tx: &TxSpecification,
        spender_key: &OrgKeyPair,
        spender_balance: i64,
        receiver: OrgId,
        value: i64,
    ) -> LedgerResult<Self> {
        let spender = tx
            .public_keys
            .iter()
            .position(|pk| *pk == spender_key.public)
            .ok_or_else(|| {
                LedgerError::SpecificationMismatch(
                    "spender key does not belong to any organization of the row".to_string(),
                )
            })
            .and_then(OrgId::try_from)?;
        if receiver.index() >= tx.organizations() {
            return Err(LedgerError::UnknownOrganization(receiver));
        }
        if receiver == spender {
            return Err(LedgerError::SpecificationMismatch(
                "receiver and spender are the same organization".to_string(),
            ));
        }

        let mut range_values = vec![0i64; tx.organizations()];
        range_values[spender.index()] = spender_balance;
        range_values[receiver.index()] = value;

        Ok(Self {
            spender,
            spender_secret: spender_key.secret.clone(),
            blindings: tx.blindings.clone(),
            range_values,
        })
    }
}

/// Fewest organizations a row can hide its amounts among. With one slot the
/// zero-sum constraint forces the blinding to zero.
pub const MIN_ORGANIZATIONS: usize = 2;

/// `n` random scalars whose sum is zero
fn zero_sum_blindings<R: RngCore + CryptoRng>(n: usize, rng: &mut R) -> LedgerResult<Vec<Scalar>> {
    if n < MIN_ORGANIZATIONS {
        return Err(LedgerError::InvalidParameters(format!(
            "a row needs at least {} organizations, got {}",
            MIN_ORGANIZATIONS, n
        )));
    }
    let mut blindings = random_vector(rng, n - 1);
    let total: Scalar = blindings.iter().sum();
    blindings.push(-total);
    Ok(blindings)
}
