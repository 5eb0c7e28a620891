//! Row verification: proof of balance, proof of correctness and the
//! stage-two audit checks.
//!
//! Nothing here needs more than public row data, except the correctness and
//! consistency checks which take the organization's own secret key.

use crate::{AuditRecord, LedgerRow, OrgColumn, OrgId, RowKind};
use audit::{DisjunctiveProver, OrStatement, SecretKey};
use bulletproofs_core::{utils::scalar_from_i64, GroupElement, ParameterSet};
use range::verify_range;
use tracing::{debug, warn};

/// Proof of balance: the commitments of a row sum to the identity.
pub fn verify_balance(commitments: &[GroupElement]) -> bool {
    commitments.iter().sum::<GroupElement>().is_identity()
}

/// Proof of correctness: `Token + v·(sk·G) == sk·Comm`.
pub fn verify_correctness(
    params: &ParameterSet,
    token: &GroupElement,
    commitment: &GroupElement,
    secret: &SecretKey,
    value: i64,
) -> bool {
    let sk = secret.as_scalar();
    *token + params.g() * (scalar_from_i64(value) * sk) == *commitment * sk
}

/// `(Comm − Com_RP)·sk == Token − Token''`, which holds for organizations
/// that did not spend in the row.
pub fn verify_consistency(
    commitment: &GroupElement,
    com_rp: &GroupElement,
    token: &GroupElement,
    token_double_prime: &GroupElement,
    secret: &SecretKey,
) -> bool {
    (*commitment - *com_rp) * secret.as_scalar() == *token - *token_double_prime
}

/// OR statement binding a column's audit tokens:
/// `S − Com_RP, T − Token'` on the left and `pk, Token − Token''` on the right.
pub fn asset_statement(
    column: &OrgColumn,
    public_key: &GroupElement,
    com_rp: &GroupElement,
    token_prime: &GroupElement,
    token_double_prime: &GroupElement,
) -> OrStatement {
    OrStatement {
        g1: column.s - *com_rp,
        y1: column.t - *token_prime,
        g2: *public_key,
        y2: column.audit_token - *token_double_prime,
    }
}

/// Range proof plus disjunctive proof of one audited column.
pub fn verify_asset<D: DisjunctiveProver>(
    params: &ParameterSet,
    column: &OrgColumn,
    public_key: &GroupElement,
    disjunctive: &D,
) -> bool {
    let Some(record) = &column.audit else {
        warn!("column carries no audit record");
        return false;
    };
    if !verify_range(params, &record.range_proof) {
        warn!(check = "range", "asset verification failed");
        return false;
    }

    let statement = record_statement(column, public_key, record);
    let valid = match disjunctive.deserialize(&record.disjunctive_proof) {
        Ok(proof) => disjunctive.verify(&statement, &proof),
        Err(err) => {
            warn!(%err, "stored disjunctive proof is unreadable");
            false
        }
    };
    if !valid {
        warn!(check = "disjunctive", "asset verification failed");
    }
    valid
}

fn record_statement(column: &OrgColumn, public_key: &GroupElement, record: &AuditRecord) -> OrStatement {
    asset_statement(
        column,
        public_key,
        record.range_proof.commitment(),
        &record.token_prime,
        &record.token_double_prime,
    )
}

/// Verifier for the rows of one ledger
#[derive(Debug, Clone, Copy)]
pub struct LedgerRowVerifier<'a, D> {
    params: &'a ParameterSet,
    disjunctive: &'a D,
}

impl<'a, D: DisjunctiveProver> LedgerRowVerifier<'a, D> {
    pub fn new(params: &'a ParameterSet, disjunctive: &'a D) -> Self {
        Self { params, disjunctive }
    }

    /// Stage one for `org`: balance of the whole row and correctness of the
    /// organization's column under its secret key.
    ///
    /// Genesis rows issue assets, so only correctness is checked for them.
    pub fn step_one(&self, row: &LedgerRow, org: OrgId, secret: &SecretKey, value: i64) -> bool {
        let Some(column) = row.column(org) else {
            return false;
        };

        let balanced = match row.kind {
            RowKind::Genesis => true,
            RowKind::Transfer => verify_balance(&row.commitments()),
        };
        if !balanced {
            warn!(%org, check = "balance", "stage one failed");
            return false;
        }

        let correct = verify_correctness(
            self.params,
            &column.audit_token,
            &column.commitment,
            secret,
            value,
        );
        if !correct {
            warn!(%org, check = "correctness", "stage one failed");
            return false;
        }

        debug!(%org, "stage one passed");
        true
    }

    /// Stage two for one column. When `secret` is given the consistency of
    /// `Token''` with the column's commitment is checked as well.
    pub fn step_two(
        &self,
        column: &OrgColumn,
        public_key: &GroupElement,
        secret: Option<&SecretKey>,
    ) -> bool {
        if !verify_asset(self.params, column, public_key, self.disjunctive) {
            return false;
        }

        if let (Some(sk), Some(record)) = (secret, &column.audit) {
            let consistent = verify_consistency(
                &column.commitment,
                record.range_proof.commitment(),
                &column.audit_token,
                &record.token_double_prime,
                sk,
            );
            if !consistent {
                warn!(check = "consistency", "stage two failed");
                return false;
            }
        }

        debug!("stage two passed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit::{commitment, token, OrgKeyPair};
    use bulletproofs_core::Scalar;
    use proptest::prelude::*;
    use rand::rngs::OsRng;
    use std::sync::OnceLock;

    fn params() -> &'static ParameterSet {
        static PARAMS: OnceLock<ParameterSet> = OnceLock::new();
        PARAMS.get_or_init(|| ParameterSet::derive(8).unwrap())
    }

    fn balanced_commitments(values: &[i64]) -> Vec<GroupElement> {
        let mut blindings: Vec<Scalar> =
            (1..values.len()).map(|_| Scalar::random(&mut OsRng)).collect();
        blindings.push(-blindings.iter().sum::<Scalar>());
        values
            .iter()
            .zip(&blindings)
            .map(|(v, r)| commitment(params(), *v, r))
            .collect()
    }

    #[test]
    fn test_balance_accepts_zero_sum() {
        assert!(verify_balance(&balanced_commitments(&[-40, 40, 0])));
        assert!(verify_balance(&[]));
    }

    #[test]
    fn test_balance_rejects_perturbed_value() {
        assert!(!verify_balance(&balanced_commitments(&[-40, 41, 0])));
    }

    #[test]
    fn test_correctness() {
        let keys = OrgKeyPair::generate(params(), &mut OsRng);
        let r = Scalar::random(&mut OsRng);
        let comm = commitment(params(), -25, &r);
        let tok = token(&keys.public, &r);

        assert!(verify_correctness(params(), &tok, &comm, &keys.secret, -25));
        assert!(!verify_correctness(params(), &tok, &comm, &keys.secret, 25));

        let other = OrgKeyPair::generate(params(), &mut OsRng);
        assert!(!verify_correctness(params(), &tok, &comm, &other.secret, -25));
    }

    #[test]
    fn test_consistency() {
        let keys = OrgKeyPair::generate(params(), &mut OsRng);
        let (r, r_rp) = (Scalar::random(&mut OsRng), Scalar::random(&mut OsRng));
        let comm = commitment(params(), 7, &r);
        let com_rp = commitment(params(), 7, &r_rp);
        let tok = token(&keys.public, &r);
        let tdp = token(&keys.public, &r_rp);

        assert!(verify_consistency(&comm, &com_rp, &tok, &tdp, &keys.secret));
        let off_by_one = commitment(params(), 8, &r_rp);
        assert!(!verify_consistency(&comm, &off_by_one, &tok, &tdp, &keys.secret));
    }

    #[test]
    fn test_unaudited_column_fails_asset_check() {
        let p = params().g();
        let column = OrgColumn::new(p, p, p, p);
        assert!(!verify_asset(params(), &column, &p, &audit::SigmaOr));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_balanced_transfers_verify(value in 0i64..1_000_000, orgs in 2usize..6) {
            let mut values = vec![0i64; orgs];
            values[0] = -value;
            values[orgs - 1] = value;
            prop_assert!(verify_balance(&balanced_commitments(&values)));

            values[orgs / 2] += 1;
            prop_assert!(!verify_balance(&balanced_commitments(&values)));
        }
    }
}
