//! Shared fixtures for the unit tests.
//!
//! `ValueStore` is the smallest useful accessor contract: the constructor
//! records the deployer at slot 0 and seeds slot 1, and the runtime exposes
//! both through `owner()` and `value()`.

use alloy_primitives::U256;

use crate::artifact::{register_artifact, ContractArtifact};
use crate::bytecode::AccessorContract;
use crate::env::{ChainEnv, EnvConfig};

pub const VALUE_STORE: &str = "ValueStore";
pub const STORED_VALUE: u64 = 42;

pub fn value_store_code() -> alloy_primitives::Bytes {
    AccessorContract::new()
        .caller_slot(0)
        .init_slot(1, U256::from(STORED_VALUE))
        .accessor("owner()", 0)
        .accessor("value()", 1)
        .creation_code()
}

pub fn register_value_store() {
    register_artifact(ContractArtifact::new(VALUE_STORE, value_store_code()));
}

/// Fresh environment with the `ValueStore` artifact registered. Five signers
/// keep the tests cheap; the defaults are exercised separately.
pub fn test_env() -> ChainEnv {
    register_value_store();
    ChainEnv::new(EnvConfig {
        signer_count: 5,
        ..EnvConfig::default()
    })
}
