//! Dynamic event sources
//!
//! Factories and mediators announce new child contracts. The engine forwards
//! those announcements to a [`SourceRegistry`], which is the host runtime's
//! hook for starting a new event stream at that address.
//!
//! [`ContractRegistry`] is the in-process registry: it records which templates
//! each address has been registered under, and is what the replay binary and
//! tests use in place of a live host.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::RwLock;

use anyhow::{anyhow, Result};
use bondline_common::{address_hex, Address};

/// Contract template a dynamic source is started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceTemplate {
    PerformanceBond,
    PerformanceBondFactory,
    StakingPool,
    StakingPoolFactory,
}

impl SourceTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PerformanceBond => "performance_bond",
            Self::PerformanceBondFactory => "performance_bond_factory",
            Self::StakingPool => "staking_pool",
            Self::StakingPoolFactory => "staking_pool_factory",
        }
    }
}

impl fmt::Display for SourceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request to start streaming `template` events from `address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceRegistration {
    pub template: SourceTemplate,
    pub address: Address,
}

/// Host hook for dynamic data-source creation.
///
/// Registering the same `(template, address)` twice must be harmless.
pub trait SourceRegistry: Send + Sync {
    fn register(&self, template: SourceTemplate, address: Address) -> Result<()>;
}

/// In-memory registry of dynamically started sources.
#[derive(Debug, Default)]
pub struct ContractRegistry {
    sources: RwLock<HashMap<Address, BTreeSet<SourceTemplate>>>,
}

impl ContractRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Templates `address` is registered under (empty if unknown).
    pub fn templates_for(&self, address: &Address) -> Vec<SourceTemplate> {
        self.sources
            .read()
            .map(|sources| {
                sources
                    .get(address)
                    .map(|templates| templates.iter().copied().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    pub fn is_tracked(&self, address: &Address) -> bool {
        self.sources
            .read()
            .map(|sources| sources.contains_key(address))
            .unwrap_or(false)
    }

    /// All registered addresses, sorted.
    pub fn addresses(&self) -> Vec<Address> {
        let mut addresses: Vec<Address> = self
            .sources
            .read()
            .map(|sources| sources.keys().copied().collect())
            .unwrap_or_default();
        addresses.sort();
        addresses
    }

    /// Number of registered addresses.
    pub fn len(&self) -> usize {
        self.sources.read().map(|sources| sources.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SourceRegistry for ContractRegistry {
    fn register(&self, template: SourceTemplate, address: Address) -> Result<()> {
        let mut sources = self
            .sources
            .write()
            .map_err(|e| anyhow!("Contract registry lock poisoned: {e}"))?;

        if sources.entry(address).or_default().insert(template) {
            tracing::info!(
                target: "bondline::etl::source",
                template = %template,
                address = %address_hex(&address),
                "Registered dynamic source"
            );
        } else {
            tracing::debug!(
                target: "bondline::etl::source",
                template = %template,
                address = %address_hex(&address),
                "Source already registered"
            );
        }

        Ok(())
    }
}
