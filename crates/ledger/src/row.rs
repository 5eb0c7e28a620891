//! Ledger rows and per-organization columns

use crate::LedgerError;
use bulletproofs_core::GroupElement;
use range::RangeProof;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sequential row index, starting at 0 for the genesis row
pub type RowKey = u64;

/// Stable slot index of an organization within every row
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrgId(pub u32);

impl OrgId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<usize> for OrgId {
    type Error = LedgerError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        u32::try_from(index).map(OrgId).map_err(|_| {
            LedgerError::InvalidParameters(format!("organization index {} exceeds u32", index))
        })
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "org{}", self.0)
    }
}

/// How a row came into being
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// Initial asset issuance; exempt from proof of balance
    Genesis,
    /// Transfer between two organizations
    Transfer,
}

/// Material attached to a column by the audit step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub token_prime: GroupElement,
    pub token_double_prime: GroupElement,
    pub range_proof: RangeProof,
    /// Encoded by the ledger's disjunctive prover
    pub disjunctive_proof: Vec<u8>,
}

/// One organization's slot in a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgColumn {
    pub commitment: GroupElement,
    pub audit_token: GroupElement,
    /// Sum of this organization's commitments up to and including this row
    pub s: GroupElement,
    /// Sum of this organization's tokens up to and including this row
    pub t: GroupElement,
    pub audit: Option<AuditRecord>,
    pub is_valid_bal_cor: bool,
    pub is_valid_asset: bool,
}

impl OrgColumn {
    pub fn new(
        commitment: GroupElement,
        audit_token: GroupElement,
        s: GroupElement,
        t: GroupElement,
    ) -> Self {
        Self {
            commitment,
            audit_token,
            s,
            t,
            audit: None,
            is_valid_bal_cor: false,
            is_valid_asset: false,
        }
    }
}

/// A ledger row: one column per organization plus row-level flags.
///
/// Row flags are the conjunction of the column flags and are recomputed by
/// [`LedgerRow::refresh_flags`] after every verification pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub kind: RowKind,
    pub columns: Vec<OrgColumn>,
    pub is_valid_bal_cor: bool,
    pub is_valid_asset: bool,
}

impl LedgerRow {
    pub fn new(kind: RowKind, columns: Vec<OrgColumn>) -> Self {
        Self {
            kind,
            columns,
            is_valid_bal_cor: false,
            is_valid_asset: false,
        }
    }

    pub fn column(&self, org: OrgId) -> Option<&OrgColumn> {
        self.columns.get(org.index())
    }

    pub fn column_mut(&mut self, org: OrgId) -> Option<&mut OrgColumn> {
        self.columns.get_mut(org.index())
    }

    /// Commitments of every column, in slot order
    pub fn commitments(&self) -> Vec<GroupElement> {
        self.columns.iter().map(|c| c.commitment).collect()
    }

    pub fn refresh_flags(&mut self) {
        self.is_valid_bal_cor = self.columns.iter().all(|c| c.is_valid_bal_cor);
        self.is_valid_asset = self.columns.iter().all(|c| c.is_valid_asset);
    }
}
