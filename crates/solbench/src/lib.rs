//! An in-memory EVM test bench.
//!
//! `solbench` reproduces the contract-testing protocol of an in-process dev
//! chain: a [`ChainEnv`] hands out a deterministic ordered list of funded
//! signer identities, resolves contract factories against a registry of
//! build artifacts, deploys contract instances, and serves read-only calls
//! against the committed state. Every environment is fully isolated, so a
//! test case that builds its own `ChainEnv` can never observe another
//! case's state.
//!
//! Typical flow:
//!
//! ```rust,ignore
//! let mut env = ChainEnv::new(EnvConfig::default());
//! let factory = env.contract_factory("NFTMarketplace")?;
//! let market = factory.deploy(&mut env)?;
//! let owner = market.read_address(&mut env, "owner()")?;
//! ```

use alloy_primitives::Address;
use thiserror::Error;

pub mod account;
pub mod artifact;
pub mod bytecode;
pub mod contract;
pub mod db;
pub mod env;
pub mod factory;

#[cfg(test)]
mod tests;

pub use account::SignerIdentity;
pub use artifact::{lookup_artifact, register_artifact, ContractArtifact};
pub use bytecode::{selector, AccessorContract};
pub use contract::DeployedContract;
pub use db::BenchDb;
pub use env::{ChainEnv, EnvConfig};
pub use factory::ContractFactory;

/// Errors surfaced by the bench.
///
/// Setup failures (artifact resolution, deployment) and call failures
/// (revert, halt, undecodable return data) are kept distinct so a failing
/// test report names the operation that broke, not just the mismatch.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("no contract named `{0}` is registered in the build artifacts")]
    UnknownArtifact(String),

    #[error("artifact `{name}` carries invalid bytecode hex")]
    InvalidBytecode {
        name: String,
        #[source]
        source: hex::FromHexError,
    },

    #[error("malformed contract artifact: {0}")]
    ArtifactFormat(#[from] serde_json::Error),

    #[error("environment provides {have} signers, harness needs at least {need}")]
    NotEnoughSigners { have: usize, need: usize },

    #[error("deployment of `{name}` reverted with output 0x{output}")]
    DeploymentReverted { name: String, output: String },

    #[error("deployment of `{name}` halted: {reason}")]
    DeploymentHalted { name: String, reason: String },

    #[error("call to {address} reverted with output 0x{output}")]
    CallReverted { address: Address, output: String },

    #[error("call to {address} halted: {reason}")]
    CallHalted { address: Address, reason: String },

    #[error("return data from {address} is {len} bytes, expected at least 32")]
    ShortReturnData { address: Address, len: usize },

    #[error("failed to decode return data: {0}")]
    AbiDecode(String),

    #[error("evm failure: {0}")]
    Evm(String),
}
