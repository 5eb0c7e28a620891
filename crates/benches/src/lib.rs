//! Benchmarks for the zkledger proof engine
//!
//! This crate contains performance benchmarks for:
//! - Inner product argument proving and verification
//! - Range proof generation, verification and batch verification
//! - Ledger row auditing and both verification stages
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p benches
//! ```
//!
//! Or run specific benchmarks:
//! ```bash
//! cargo bench -p benches --bench range_proof
//! cargo bench -p benches --bench ledger_verification
//! ```

use audit::OrgKeyPair;
use bulletproofs_core::ParameterSet;
use ledger::{
    AuditSpecification, Ledger, LedgerResult, MemoryStore, OrgId, RowKey, TxSpecification,
};
use rand::rngs::OsRng;

/// A ledger with `orgs` organizations, a genesis row and one audited
/// transfer of 1 from org 0 to org 1.
pub fn audited_ledger(
    vector_length: usize,
    orgs: usize,
) -> LedgerResult<(Ledger<MemoryStore>, Vec<OrgKeyPair>, RowKey)> {
    let params = ParameterSet::derive(vector_length)?;
    let keys = OrgKeyPair::generate_many(&params, orgs, &mut OsRng);
    let pks: Vec<_> = keys.iter().map(|k| k.public).collect();
    let mut ledger = Ledger::new(params, pks.clone(), MemoryStore::new());

    let mut assets = vec![0i64; orgs];
    assets[0] = 1000;
    ledger.append_row(&TxSpecification::genesis(&pks, &assets, &mut OsRng)?)?;

    let tx = TxSpecification::transfer(&pks, OrgId(0), OrgId(1), 1, &mut OsRng)?;
    let key = ledger.append_row(&tx)?;
    let spec = AuditSpecification::new(&tx, &keys[0], 999, OrgId(1), 1)?;
    ledger.audit(key, &spec, &mut OsRng)?;

    Ok((ledger, keys, key))
}
