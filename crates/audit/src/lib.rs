//! # Audit
//!
//! The audit layer of zkledger: organization keys, the commitment and token
//! algebra of a ledger column, and the OR proof that binds an organization's
//! audit tokens to its range proof without revealing its role in a transfer.

pub mod disjunctive;
pub mod errors;
pub mod keys;
pub mod token;

pub use disjunctive::*;
pub use errors::*;
pub use keys::*;
pub use token::*;
