//! Handles to deployed contract instances.

use alloy_primitives::{Address, Bytes, U256};

use crate::bytecode::selector;
use crate::env::ChainEnv;
use crate::BenchError;

/// One deployed instance. All reads go through the environment that
/// deployed it and are issued from the deploying caller.
#[derive(Debug, Clone)]
pub struct DeployedContract {
    name: String,
    address: Address,
    caller: Address,
}

impl DeployedContract {
    pub(crate) fn new(name: String, address: Address, caller: Address) -> Self {
        Self {
            name,
            address,
            caller,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Issues a read-only call with raw calldata and returns the raw return
    /// data. Typed callers (e.g. `sol!`-generated call structs) encode and
    /// decode around this.
    pub fn call_raw(&self, env: &mut ChainEnv, calldata: Bytes) -> Result<Bytes, BenchError> {
        env.call(self.caller, self.address, calldata)
    }

    /// Reads a no-argument accessor returning a single `uint256`.
    pub fn read_u256(&self, env: &mut ChainEnv, signature: &str) -> Result<U256, BenchError> {
        let word = self.read_word(env, signature)?;
        Ok(U256::from_be_bytes(word))
    }

    /// Reads a no-argument accessor returning a single `address` (the low
    /// 20 bytes of the returned word).
    pub fn read_address(&self, env: &mut ChainEnv, signature: &str) -> Result<Address, BenchError> {
        let word = self.read_word(env, signature)?;
        Ok(Address::from_slice(&word[12..]))
    }

    fn read_word(&self, env: &mut ChainEnv, signature: &str) -> Result<[u8; 32], BenchError> {
        let data = self.call_raw(env, selector(signature).to_vec().into())?;
        if data.len() < 32 {
            return Err(BenchError::ShortReturnData {
                address: self.address,
                len: data.len(),
            });
        }
        let mut word = [0u8; 32];
        word.copy_from_slice(&data[..32]);
        Ok(word)
    }
}
