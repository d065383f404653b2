//! Contract read port
//!
//! Mediator initialization reads the current factory back from the mediator
//! contract. That is the only place projection leaves the event stream, so the
//! read sits behind [`ContractReader`] and can be served by a node client, a
//! replay fixture, or a test stub.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use bondline_common::{address_hex, Address};

#[async_trait]
pub trait ContractReader: Send + Sync {
    /// Call the zero-argument `getter` on `contract` at `block_number` and
    /// decode its single address return value.
    async fn read_address(&self, contract: Address, getter: &str, block_number: u64)
        -> Result<Address>;
}

/// Reader answering from a fixed table of `(contract, getter)` values.
///
/// Any read that is not in the table fails, as a node would for a contract
/// that is not deployed at the queried block.
#[derive(Debug, Clone, Default)]
pub struct StaticReader {
    values: HashMap<(Address, String), Address>,
}

impl StaticReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, contract: Address, getter: impl Into<String>, value: Address) -> Self {
        self.insert(contract, getter, value);
        self
    }

    pub fn insert(&mut self, contract: Address, getter: impl Into<String>, value: Address) {
        self.values.insert((contract, getter.into()), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[async_trait]
impl ContractReader for StaticReader {
    async fn read_address(
        &self,
        contract: Address,
        getter: &str,
        block_number: u64,
    ) -> Result<Address> {
        self.values
            .get(&(contract, getter.to_string()))
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "No value for {}.{getter}() at block {block_number}",
                    address_hex(&contract)
                )
            })
    }
}
