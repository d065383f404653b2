//! Entity key derivation
//!
//! Every store key is built here and nowhere else. Keys are lowercase hex
//! fragments joined with `-`:
//!
//! | Subject | Key |
//! |---|---|
//! | One entity per contract | `{contract}` |
//! | Per-counterparty accumulator | `{contract}-{counterparty}[-{token}]` |
//! | Per-token child of a contract | `{contract}-{token}` |
//! | One record per log | `{tx_hash}-{log_index}` |
//! | DAO | `{dao_id}` (unpadded hex) |
//! | Collateral whitelist entry | `{dao_id}-{token}` |
//! | DAO-scoped role | `{dao_id}-{role}-{account}` |
//! | Global role | `{role}-{account}` |
//!
//! Addresses and hashes are rendered full width; numeric ids and log indices
//! are rendered as minimal hex (`0x1`, `0xa`).

use bondline_common::primitive_types::U256;
use bondline_common::{address_hex, bytes32_hex, index_hex, u256_hex, Address, Bytes32};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store key of an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Key of the single entity tracking a contract (Bond, factories, mediators, pools).
    pub fn contract(address: &Address) -> Self {
        Self(address_hex(address))
    }

    /// Key of a running total for one counterparty of a contract.
    ///
    /// The token segment is omitted for single-token contracts (staking pools).
    pub fn accumulator(contract: &Address, counterparty: &Address, token: Option<&Address>) -> Self {
        let mut key = format!("{}-{}", address_hex(contract), address_hex(counterparty));
        if let Some(token) = token {
            key.push('-');
            key.push_str(&address_hex(token));
        }
        Self(key)
    }

    /// Key of a per-token child of a contract (reward pools, pool rewards).
    pub fn keyed(contract: &Address, token: &Address) -> Self {
        Self(format!("{}-{}", address_hex(contract), address_hex(token)))
    }

    /// Key of a record written once per emitted log.
    pub fn log(transaction_hash: &Bytes32, log_index: u64) -> Self {
        Self(format!("{}-{}", bytes32_hex(transaction_hash), index_hex(log_index)))
    }

    /// Key of a DAO.
    ///
    /// The id is rendered as unpadded hex, so DAO keys are short and of varying
    /// length. Downstream consumers read these keys verbatim; they must not be
    /// padded, even though an unpadded id could collide with another hex-keyed
    /// entity set if the two ever shared a key space.
    pub fn dao(dao_id: U256) -> Self {
        Self(u256_hex(dao_id))
    }

    /// Key of a collateral whitelist entry of a DAO.
    pub fn whitelist(dao_id: U256, token: &Address) -> Self {
        Self(format!("{}-{}", u256_hex(dao_id), address_hex(token)))
    }

    /// Key of a role granted to an account within a DAO.
    pub fn dao_role(dao_id: U256, role: &Bytes32, account: &Address) -> Self {
        Self(format!(
            "{}-{}-{}",
            u256_hex(dao_id),
            bytes32_hex(role),
            address_hex(account)
        ))
    }

    /// Key of a role granted to an account across all DAOs of a mediator.
    pub fn global_role(role: &Bytes32, account: &Address) -> Self {
        Self(format!("{}-{}", bytes32_hex(role), address_hex(account)))
    }

    /// Wrap a key read back from storage.
    pub fn from_stored(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
