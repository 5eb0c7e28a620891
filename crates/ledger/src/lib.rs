//! # Ledger
//!
//! A confidential-value ledger: each row holds, per organization, a Pedersen
//! commitment to the amount it sent or received and an audit token under the
//! organization's key. Rows are verified in two stages:
//!
//! 1. **Balance and correctness**: the row's commitments sum to the identity
//!    and each organization's token matches its commitment under its key
//! 2. **Assets**: after an audit step, each organization's range proof and
//!    disjunctive proof verify against its running sums `S` and `T`
//!
//! ```rust,no_run
//! use audit::OrgKeyPair;
//! use bulletproofs_core::ParameterSet;
//! use ledger::{Ledger, MemoryStore, OrgId, TxSpecification};
//! use rand::rngs::OsRng;
//!
//! let params = ParameterSet::derive(64).unwrap();
//! let keys = OrgKeyPair::generate_many(&params, 2, &mut OsRng);
//! let pks: Vec<_> = keys.iter().map(|k| k.public).collect();
//! let mut ledger = Ledger::new(params, pks.clone(), MemoryStore::new());
//!
//! let genesis = TxSpecification::genesis(&pks, &[100, 0], &mut OsRng).unwrap();
//! let row = ledger.append_row(&genesis).unwrap();
//! assert!(ledger.verify_step_one(row, OrgId(0), &keys[0].secret, 100).unwrap());
//! ```

pub mod codec;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod row;
pub mod spec;
pub mod store;
pub mod telemetry;
pub mod verifier;

pub use config::*;
pub use errors::*;
pub use ledger::*;
pub use row::*;
pub use spec::*;
pub use store::*;
pub use verifier::*;
