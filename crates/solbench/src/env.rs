//! The chain test environment.
//!
//! A [`ChainEnv`] owns one EVM over one [`BenchDb`] plus the ordered signer
//! list, which makes it the unit of test isolation: build a fresh
//! environment per test case and nothing leaks between cases. Execution
//! rules match an in-process dev chain (Hardhat-style): chain id 31337,
//! relaxed balance/base-fee/sender checks, callers impersonated by address.

use alloy_primitives::{Address, Bytes, U256};
use revm::primitives::{ExecutionResult, Output, SpecId, TxKind};
use revm::Evm;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::account::{derive_signers, SignerIdentity};
use crate::artifact::lookup_artifact;
use crate::db::BenchDb;
use crate::factory::ContractFactory;
use crate::BenchError;

/// Gas limit applied to every bench transaction.
pub const TX_GAS_LIMIT: u64 = 30_000_000;

/// Environment parameters. The defaults mirror the usual dev-chain setup:
/// twenty signers funded with 10 000 ETH each on chain id 31337.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    pub signer_count: usize,
    pub initial_balance: U256,
    pub chain_id: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            signer_count: 20,
            initial_balance: U256::from(10_000u128 * 10u128.pow(18)),
            chain_id: 31337,
        }
    }
}

/// An isolated in-memory chain: EVM, committed state, and funded signers.
pub struct ChainEnv {
    evm: Evm<'static, (), BenchDb>,
    signers: Vec<SignerIdentity>,
}

impl Default for ChainEnv {
    fn default() -> Self {
        Self::new(EnvConfig::default())
    }
}

impl ChainEnv {
    pub fn new(config: EnvConfig) -> Self {
        let mut evm = Evm::builder()
            .with_db(BenchDb::new())
            .with_spec_id(SpecId::SHANGHAI)
            .modify_cfg_env(|cfg| {
                cfg.chain_id = config.chain_id;
                cfg.disable_balance_check = true;
                cfg.disable_eip3607 = true;
                cfg.disable_block_gas_limit = true;
                cfg.disable_base_fee = true;
            })
            .modify_block_env(|block| {
                block.number = U256::from(1);
                block.timestamp = U256::from(1_700_000_000u64);
                block.gas_limit = U256::from(TX_GAS_LIMIT);
            })
            .build();

        let signers = derive_signers(config.signer_count);
        for signer in &signers {
            evm.db_mut().fund_account(signer.address, config.initial_balance);
        }

        Self { evm, signers }
    }

    /// The deterministic, ordered signer list. Position 0 is the default
    /// deployer.
    pub fn signers(&self) -> &[SignerIdentity] {
        &self.signers
    }

    /// Resolves a deployable contract by name against the artifact registry,
    /// bound to the first signer. Fails if the name was never registered or
    /// the registered bytecode does not decode.
    pub fn contract_factory(&self, name: &str) -> Result<ContractFactory, BenchError> {
        let artifact =
            lookup_artifact(name).ok_or_else(|| BenchError::UnknownArtifact(name.to_string()))?;
        let creation_code = artifact.creation_code()?;
        let deployer = self
            .signers
            .first()
            .cloned()
            .ok_or(BenchError::NotEnoughSigners { have: 0, need: 1 })?;
        Ok(ContractFactory::new(artifact.contract_name, creation_code, deployer))
    }

    /// Executes a CREATE transaction from `deployer` and commits the result.
    /// `name` only labels errors and log events.
    pub fn deploy(
        &mut self,
        deployer: Address,
        creation_code: Bytes,
        name: &str,
    ) -> Result<Address, BenchError> {
        debug!(contract = name, %deployer, code_len = creation_code.len(), "deploying contract");
        let tx = self.evm.tx_mut();
        tx.caller = deployer;
        tx.transact_to = TxKind::Create;
        tx.data = creation_code;
        tx.value = U256::ZERO;
        tx.gas_limit = TX_GAS_LIMIT;
        tx.nonce = None;

        let result = self
            .evm
            .transact_commit()
            .map_err(|err| BenchError::Evm(err.to_string()))?;
        match result {
            ExecutionResult::Success {
                output: Output::Create(_, Some(address)),
                gas_used,
                ..
            } => {
                debug!(contract = name, %address, gas_used, "contract deployed");
                Ok(address)
            }
            ExecutionResult::Success { .. } => Err(BenchError::DeploymentHalted {
                name: name.to_string(),
                reason: "create transaction produced no contract address".to_string(),
            }),
            ExecutionResult::Revert { output, .. } => Err(BenchError::DeploymentReverted {
                name: name.to_string(),
                output: hex::encode(&output),
            }),
            ExecutionResult::Halt { reason, .. } => Err(BenchError::DeploymentHalted {
                name: name.to_string(),
                reason: format!("{reason:?}"),
            }),
        }
    }

    /// Executes a read-only CALL. State is not committed, so reads cannot
    /// perturb the chain no matter what the callee does.
    pub fn call(
        &mut self,
        caller: Address,
        to: Address,
        calldata: Bytes,
    ) -> Result<Bytes, BenchError> {
        debug!(%caller, %to, data_len = calldata.len(), "calling contract");
        let tx = self.evm.tx_mut();
        tx.caller = caller;
        tx.transact_to = TxKind::Call(to);
        tx.data = calldata;
        tx.value = U256::ZERO;
        tx.gas_limit = TX_GAS_LIMIT;
        tx.nonce = None;

        let outcome = self
            .evm
            .transact()
            .map_err(|err| BenchError::Evm(err.to_string()))?;
        match outcome.result {
            ExecutionResult::Success { output, gas_used, .. } => {
                debug!(%to, gas_used, "call returned");
                Ok(output.into_data())
            }
            ExecutionResult::Revert { output, .. } => Err(BenchError::CallReverted {
                address: to,
                output: hex::encode(&output),
            }),
            ExecutionResult::Halt { reason, .. } => Err(BenchError::CallHalted {
                address: to,
                reason: format!("{reason:?}"),
            }),
        }
    }

    /// Committed balance of `address`.
    pub fn balance_of(&mut self, address: Address) -> U256 {
        self.evm.db_mut().balance(address)
    }
}
