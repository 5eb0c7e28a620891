//! Common test utilities shared across integration tests.

use audit::OrgKeyPair;
use bulletproofs_core::{GroupElement, ParameterSet};
use ledger::{Ledger, MemoryStore, RowKey, TxSpecification};
use rand::rngs::OsRng;

/// Initialize test tracing (call once at the beginning of tests).
///
/// Subsequent calls are safe and will be ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("ledger=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// A ledger with a committed genesis row
pub struct Fixture {
    pub keys: Vec<OrgKeyPair>,
    pub ledger: Ledger<MemoryStore>,
    pub genesis: RowKey,
}

impl Fixture {
    /// Sixteen-bit range proofs keep the suite fast while covering every path.
    pub fn new(assets: &[i64]) -> Self {
        init_tracing();
        let params = ParameterSet::derive(16).unwrap();
        let keys = OrgKeyPair::generate_many(&params, assets.len(), &mut OsRng);
        let mut ledger = Ledger::new(params, public_keys(&keys), MemoryStore::new());
        let tx = TxSpecification::genesis(&public_keys(&keys), assets, &mut OsRng).unwrap();
        let genesis = ledger.append_row(&tx).unwrap();
        Self {
            keys,
            ledger,
            genesis,
        }
    }

    pub fn public_keys(&self) -> Vec<GroupElement> {
        public_keys(&self.keys)
    }
}

pub fn public_keys(keys: &[OrgKeyPair]) -> Vec<GroupElement> {
    keys.iter().map(|k| k.public).collect()
}
