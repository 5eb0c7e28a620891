//! The ledger orchestrator
//!
//! Rows live in a [`StateStore`] under `row/<key>`; the number of rows is
//! kept under `height`. Every operation reads, decodes, modifies, encodes and
//! writes back the row it touches.

use crate::{
    codec, verifier::asset_statement, AuditRecord, AuditSpecification, LedgerError, LedgerResult,
    LedgerRow, LedgerRowVerifier, OrgColumn, OrgId, RowKey, RowKind, StateStore, TxSpecification,
};
use audit::{
    commitment, token, token_double_prime, token_prime, Branch, DisjunctiveProver, SecretKey,
    SigmaOr,
};
use bulletproofs_core::{GroupElement, ParameterSet, Scalar};
use rand_core::{CryptoRng, RngCore};
use range::RangeProver;
use rayon::prelude::*;
use tracing::{debug, info, instrument};
use zeroize::Zeroize;

const HEIGHT_KEY: &str = "height";

fn row_key(key: RowKey) -> String {
    format!("row/{}", key)
}

/// A confidential-value ledger over a fixed set of organizations
pub struct Ledger<S, D = SigmaOr> {
    params: ParameterSet,
    public_keys: Vec<GroupElement>,
    store: S,
    disjunctive: D,
}

impl<S: StateStore> Ledger<S, SigmaOr> {
    pub fn new(params: ParameterSet, public_keys: Vec<GroupElement>, store: S) -> Self {
        Self::with_disjunctive(params, public_keys, store, SigmaOr)
    }
}

impl<S: StateStore, D: DisjunctiveProver + Sync> Ledger<S, D> {
    /// Create a ledger that stores its OR proofs with `disjunctive`.
    pub fn with_disjunctive(
        params: ParameterSet,
        public_keys: Vec<GroupElement>,
        store: S,
        disjunctive: D,
    ) -> Self {
        Self {
            params,
            public_keys,
            store,
            disjunctive,
        }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    pub fn public_keys(&self) -> &[GroupElement] {
        &self.public_keys
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Number of rows written so far
    pub fn height(&self) -> LedgerResult<u64> {
        match self.store.get_state(HEIGHT_KEY)? {
            Some(bytes) => Ok(codec::decode_height(&bytes)?),
            None => Ok(0),
        }
    }

    /// Load and decode a row
    pub fn row(&self, key: RowKey) -> LedgerResult<LedgerRow> {
        let bytes = self
            .store
            .get_state(&row_key(key))?
            .ok_or(LedgerError::RowNotFound(key))?;
        Ok(codec::decode_row(&bytes)?)
    }

    fn put_row(&mut self, key: RowKey, row: &LedgerRow) -> LedgerResult<()> {
        self.store.put_state(&row_key(key), codec::encode_row(row)?)?;
        Ok(())
    }

    fn public_key(&self, org: OrgId) -> LedgerResult<&GroupElement> {
        self.public_keys
            .get(org.index())
            .ok_or(LedgerError::UnknownOrganization(org))
    }

    fn row_verifier(&self) -> LedgerRowVerifier<'_, D> {
        LedgerRowVerifier::new(&self.params, &self.disjunctive)
    }

    /// Commit a transaction as the next row and return its key.
    ///
    /// The genesis specification must come first and only once. Running sums
    /// start at the genesis commitments and tokens.
    #[instrument(skip_all, fields(kind = ?tx.kind))]
    pub fn append_row(&mut self, tx: &TxSpecification) -> LedgerResult<RowKey> {
        if tx.public_keys != self.public_keys {
            return Err(LedgerError::SpecificationMismatch(
                "public keys differ from the ledger's organizations".to_string(),
            ));
        }
        let n = self.public_keys.len();
        if tx.blindings.len() != n || tx.values.len() != n {
            return Err(LedgerError::SpecificationMismatch(format!(
                "expected {} blindings and values, got {} and {}",
                n,
                tx.blindings.len(),
                tx.values.len()
            )));
        }

        let key = self.height()?;
        let previous = match (tx.kind, key) {
            (RowKind::Genesis, 0) => None,
            (RowKind::Transfer, k) if k > 0 => Some(self.row(k - 1)?),
            (kind, k) => {
                return Err(LedgerError::SpecificationMismatch(format!(
                    "{:?} specification cannot be row {}",
                    kind, k
                )))
            }
        };

        let columns = (0..n)
            .map(|i| {
                let comm = commitment(&self.params, tx.values[i], &tx.blindings[i]);
                let tok = token(&self.public_keys[i], &tx.blindings[i]);
                let (s, t) = match &previous {
                    Some(prev) => (prev.columns[i].s + comm, prev.columns[i].t + tok),
                    None => (comm, tok),
                };
                OrgColumn::new(comm, tok, s, t)
            })
            .collect();

        self.put_row(key, &LedgerRow::new(tx.kind, columns))?;
        self.store.put_state(HEIGHT_KEY, codec::encode_height(key + 1)?)?;

        info!(row = key, organizations = n, "row appended");
        Ok(key)
    }

    /// Attach range proofs, audit tokens and OR proofs to every column of a row.
    ///
    /// The spender proves its remaining balance and opens the left branch with
    /// its secret key; every other organization proves its received amount and
    /// opens the right branch with `r − r_rp`.
    #[instrument(skip_all, fields(row = key))]
    pub fn audit<R: RngCore + CryptoRng>(
        &mut self,
        key: RowKey,
        spec: &AuditSpecification,
        rng: &mut R,
    ) -> LedgerResult<()> {
        let mut row = self.row(key)?;
        let n = row.columns.len();
        if spec.blindings.len() != n || spec.range_values.len() != n {
            return Err(LedgerError::SpecificationMismatch(format!(
                "row has {} organizations, audit specification covers {}",
                n,
                spec.blindings.len()
            )));
        }
        self.public_key(spec.spender)?;

        let prover = RangeProver::new(&self.params);
        for (i, column) in row.columns.iter_mut().enumerate() {
            let pk = self.public_keys[i];
            let (range_proof, r_rp) = prover.prove(spec.range_values[i], &mut *rng)?;
            let com_rp = range_proof.commitment;
            let mut nonce = Scalar::random(&mut *rng);

            let is_spender = i == spec.spender.index();
            let (tp, tdp) = if is_spender {
                (
                    token(&pk, &r_rp),
                    token_double_prime(&column.audit_token, &com_rp, &column.s, &nonce),
                )
            } else {
                (
                    token_prime(&column.t, &com_rp, &column.s, &nonce),
                    token(&pk, &r_rp),
                )
            };
            nonce.zeroize();

            let statement = asset_statement(column, &pk, &com_rp, &tp, &tdp);
            let proof = if is_spender {
                self.disjunctive.prove(
                    &statement,
                    spec.spender_secret.as_scalar(),
                    Branch::Left,
                    &mut *rng,
                )?
            } else {
                let mut witness = spec.blindings[i] - r_rp;
                let proof = self
                    .disjunctive
                    .prove(&statement, &witness, Branch::Right, &mut *rng);
                witness.zeroize();
                proof?
            };

            column.audit = Some(AuditRecord {
                token_prime: tp,
                token_double_prime: tdp,
                range_proof,
                disjunctive_proof: self.disjunctive.serialize(&proof),
            });
            column.is_valid_asset = false;
        }
        row.refresh_flags();

        self.put_row(key, &row)?;
        info!(spender = %spec.spender, "row audited");
        Ok(())
    }

    /// Stage one for `org` of row `key`: proof of balance and proof of
    /// correctness. Stores and returns the column's `is_valid_bal_cor`.
    #[instrument(skip_all, fields(row = key, %org))]
    pub fn verify_step_one(
        &mut self,
        key: RowKey,
        org: OrgId,
        secret: &SecretKey,
        value: i64,
    ) -> LedgerResult<bool> {
        let mut row = self.row(key)?;
        if row.column(org).is_none() {
            return Err(LedgerError::UnknownOrganization(org));
        }

        let valid = self.row_verifier().step_one(&row, org, secret, value);
        if let Some(column) = row.column_mut(org) {
            column.is_valid_bal_cor = valid;
        }
        row.refresh_flags();
        self.put_row(key, &row)?;

        debug!(valid, row_valid = row.is_valid_bal_cor, "stage one recorded");
        Ok(valid)
    }

    /// Stage two for `org` of row `key`. Stores and returns the column's
    /// `is_valid_asset`.
    ///
    /// `secret` enables the consistency check, which only holds for
    /// organizations other than the spender.
    #[instrument(skip_all, fields(row = key, %org))]
    pub fn verify_step_two(
        &mut self,
        key: RowKey,
        org: OrgId,
        secret: Option<&SecretKey>,
    ) -> LedgerResult<bool> {
        let mut row = self.row(key)?;
        let pk = *self.public_key(org)?;
        let column = row.column(org).ok_or(LedgerError::UnknownOrganization(org))?;
        if column.audit.is_none() {
            return Err(LedgerError::NotAudited { row: key, org });
        }

        let valid = self.row_verifier().step_two(column, &pk, secret);
        if let Some(column) = row.column_mut(org) {
            column.is_valid_asset = valid;
        }
        row.refresh_flags();
        self.put_row(key, &row)?;

        debug!(valid, row_valid = row.is_valid_asset, "stage two recorded");
        Ok(valid)
    }

    /// Stage two for every column of row `key`, columns checked in parallel.
    /// Returns the row's `is_valid_asset`.
    #[instrument(skip_all, fields(row = key))]
    pub fn verify_step_two_all(&mut self, key: RowKey) -> LedgerResult<bool> {
        let mut row = self.row(key)?;
        if row.columns.len() != self.public_keys.len() {
            return Err(LedgerError::SpecificationMismatch(format!(
                "row has {} columns, ledger has {} organizations",
                row.columns.len(),
                self.public_keys.len()
            )));
        }
        if let Some(i) = row.columns.iter().position(|c| c.audit.is_none()) {
            return Err(LedgerError::NotAudited {
                row: key,
                org: OrgId::try_from(i)?,
            });
        }

        let verifier = self.row_verifier();
        let results: Vec<bool> = row
            .columns
            .par_iter()
            .zip(self.public_keys.par_iter())
            .map(|(column, pk)| verifier.step_two(column, pk, None))
            .collect();

        for (column, valid) in row.columns.iter_mut().zip(results) {
            column.is_valid_asset = valid;
        }
        row.refresh_flags();
        self.put_row(key, &row)?;

        debug!(row_valid = row.is_valid_asset, "stage two recorded for all organizations");
        Ok(row.is_valid_asset)
    }
}
