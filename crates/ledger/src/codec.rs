//! Binary encoding of persisted ledger records

use crate::{CodecError, LedgerRow};
use serde::{de::DeserializeOwned, Serialize};

fn encode<T: Serialize>(what: &'static str, value: &T) -> Result<Vec<u8>, CodecError> {
    bincode::serialize(value).map_err(|e| CodecError::Encode(what, e))
}

fn decode<T: DeserializeOwned>(what: &'static str, bytes: &[u8]) -> Result<T, CodecError> {
    bincode::deserialize(bytes).map_err(|e| CodecError::Decode(what, e))
}

pub fn encode_row(row: &LedgerRow) -> Result<Vec<u8>, CodecError> {
    encode("ledger row", row)
}

pub fn decode_row(bytes: &[u8]) -> Result<LedgerRow, CodecError> {
    decode("ledger row", bytes)
}

pub fn encode_height(height: u64) -> Result<Vec<u8>, CodecError> {
    encode("ledger height", &height)
}

pub fn decode_height(bytes: &[u8]) -> Result<u64, CodecError> {
    decode("ledger height", bytes)
}
