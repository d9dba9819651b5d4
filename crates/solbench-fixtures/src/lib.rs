//! Fixture contracts and the deployment harness.
//!
//! The `NFTMarketplace` fixture is the contract the deployment suite runs
//! against: its constructor records the deployer as owner and seeds the
//! minimum listing price, and its runtime answers the two read accessors the
//! suite asserts on. [`deploy_marketplace`] is the per-test setup: it
//! rebuilds every fixture from scratch (environment, signers, deployed
//! instance), so no test case can observe another's state.

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use anyhow::Result;

use solbench::{
    register_artifact, AccessorContract, BenchError, ChainEnv, ContractArtifact,
    DeployedContract, EnvConfig, SignerIdentity,
};

sol! {
    /// Read-only surface of the marketplace fixture.
    interface NFTMarketplace {
        function owner() external view returns (address);
        function getListPrice() external view returns (uint256);
    }
}

pub const MARKETPLACE_CONTRACT: &str = "NFTMarketplace";
/// Same runtime as the marketplace, constructor initializes nothing.
pub const UNINITIALIZED_MARKETPLACE_CONTRACT: &str = "UninitializedMarketplace";

/// Minimum listing price the marketplace constructor seeds.
pub const LIST_PRICE: u64 = 1;

const OWNER_SLOT: u8 = 0;
const LIST_PRICE_SLOT: u8 = 1;

fn marketplace_runtime() -> AccessorContract {
    AccessorContract::new()
        .accessor("owner()", OWNER_SLOT)
        .accessor("getListPrice()", LIST_PRICE_SLOT)
}

pub fn marketplace_artifact() -> ContractArtifact {
    let code = marketplace_runtime()
        .caller_slot(OWNER_SLOT)
        .init_slot(LIST_PRICE_SLOT, U256::from(LIST_PRICE))
        .creation_code();
    ContractArtifact::new(MARKETPLACE_CONTRACT, code)
}

/// The regression guard: deploying this instead of the real fixture must
/// trip both deployment assertions (owner zero, price zero).
pub fn uninitialized_marketplace_artifact() -> ContractArtifact {
    ContractArtifact::new(
        UNINITIALIZED_MARKETPLACE_CONTRACT,
        marketplace_runtime().creation_code(),
    )
}

/// Registers both fixture artifacts. Idempotent, safe under parallel tests.
pub fn register_fixture_artifacts() {
    register_artifact(marketplace_artifact());
    register_artifact(uninitialized_marketplace_artifact());
}

/// Everything one test case owns: the environment, the named signer roles
/// plus the leftover pool, and the freshly deployed instance.
pub struct Deployment {
    pub env: ChainEnv,
    pub owner: SignerIdentity,
    pub addr1: SignerIdentity,
    pub addr2: SignerIdentity,
    pub rest: Vec<SignerIdentity>,
    pub marketplace: DeployedContract,
}

/// Per-test setup: fresh environment, signers destructured into named roles,
/// marketplace deployed by `owner`. Any provisioning or deployment failure
/// propagates and fails the caller's test case.
pub fn deploy_marketplace() -> Result<Deployment> {
    deploy_named(MARKETPLACE_CONTRACT)
}

/// Same setup flow against any registered fixture artifact.
pub fn deploy_named(name: &str) -> Result<Deployment> {
    register_fixture_artifacts();
    let mut env = ChainEnv::new(EnvConfig::default());

    let (owner, addr1, addr2, rest) = match env.signers() {
        [owner, addr1, addr2, rest @ ..] => {
            (owner.clone(), addr1.clone(), addr2.clone(), rest.to_vec())
        }
        signers => {
            return Err(BenchError::NotEnoughSigners {
                have: signers.len(),
                need: 3,
            }
            .into())
        }
    };

    let factory = env.contract_factory(name)?;
    let marketplace = factory.deploy(&mut env)?;

    Ok(Deployment {
        env,
        owner,
        addr1,
        addr2,
        rest,
        marketplace,
    })
}

impl Deployment {
    /// Reads `owner()` through the typed call binding.
    pub fn owner_on_chain(&mut self) -> Result<Address> {
        let data = self
            .marketplace
            .call_raw(&mut self.env, NFTMarketplace::ownerCall {}.abi_encode().into())?;
        let ret = NFTMarketplace::ownerCall::abi_decode_returns(&data, true)
            .map_err(|err| BenchError::AbiDecode(err.to_string()))?;
        Ok(ret._0)
    }

    /// Reads `getListPrice()` through the typed call binding.
    pub fn list_price(&mut self) -> Result<U256> {
        let data = self.marketplace.call_raw(
            &mut self.env,
            NFTMarketplace::getListPriceCall {}.abi_encode().into(),
        )?;
        let ret = NFTMarketplace::getListPriceCall::abi_decode_returns(&data, true)
            .map_err(|err| BenchError::AbiDecode(err.to_string()))?;
        Ok(ret._0)
    }
}
