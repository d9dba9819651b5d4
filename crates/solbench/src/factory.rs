//! Contract factories: an artifact's creation code bound to a deployer.

use alloy_primitives::Bytes;

use crate::account::SignerIdentity;
use crate::contract::DeployedContract;
use crate::env::ChainEnv;
use crate::BenchError;

/// A deployable handle for one named contract. Obtained from
/// [`ChainEnv::contract_factory`], which binds the environment's first
/// signer as the deployer; [`connect`](Self::connect) rebinds it.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    creation_code: Bytes,
    deployer: SignerIdentity,
}

impl ContractFactory {
    pub(crate) fn new(name: String, creation_code: Bytes, deployer: SignerIdentity) -> Self {
        Self {
            name,
            creation_code,
            deployer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn deployer(&self) -> &SignerIdentity {
        &self.deployer
    }

    /// Rebinds the factory to deploy as `signer`.
    pub fn connect(mut self, signer: SignerIdentity) -> Self {
        self.deployer = signer;
        self
    }

    /// Deploys a fresh instance with no constructor arguments.
    pub fn deploy(&self, env: &mut ChainEnv) -> Result<DeployedContract, BenchError> {
        self.deploy_with_args(env, &[])
    }

    /// Deploys a fresh instance, appending ABI-encoded constructor arguments
    /// to the creation code.
    pub fn deploy_with_args(
        &self,
        env: &mut ChainEnv,
        constructor_args: &[u8],
    ) -> Result<DeployedContract, BenchError> {
        let mut code = self.creation_code.to_vec();
        code.extend_from_slice(constructor_args);
        let address = env.deploy(self.deployer.address, code.into(), &self.name)?;
        Ok(DeployedContract::new(
            self.name.clone(),
            address,
            self.deployer.address,
        ))
    }
}
