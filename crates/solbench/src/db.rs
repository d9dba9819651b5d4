//! In-memory EVM state backing a [`ChainEnv`](crate::ChainEnv).
//!
//! Committed state lives for the lifetime of one environment and is dropped
//! with it, which is what gives each test case a fresh chain.

use std::collections::HashMap;
use std::convert::Infallible;

use alloy_primitives::{Address, B256, U256};
use revm::primitives::{Account, AccountInfo, Bytecode, HashMap as RevmHashMap, KECCAK_EMPTY};
use revm::{Database, DatabaseCommit};

#[derive(Debug, Default, Clone)]
pub struct BenchDb {
    accounts: HashMap<Address, AccountInfo>,
    storage: HashMap<Address, HashMap<U256, U256>>,
    code: HashMap<B256, Bytecode>,
    block_hashes: HashMap<u64, B256>,
}

impl BenchDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates (or replaces) an externally-owned account holding `balance`.
    pub fn fund_account(&mut self, address: Address, balance: U256) {
        self.accounts.insert(
            address,
            AccountInfo {
                balance,
                nonce: 0,
                code_hash: KECCAK_EMPTY,
                code: None,
            },
        );
    }

    /// Committed balance of `address`, zero for unknown accounts.
    pub fn balance(&self, address: Address) -> U256 {
        self.accounts
            .get(&address)
            .map(|info| info.balance)
            .unwrap_or(U256::ZERO)
    }

    /// Committed storage word at `(address, slot)`, zero when unset.
    pub fn storage_at(&self, address: Address, slot: U256) -> U256 {
        self.storage
            .get(&address)
            .and_then(|slots| slots.get(&slot))
            .copied()
            .unwrap_or(U256::ZERO)
    }
}

impl Database for BenchDb {
    type Error = Infallible;

    fn basic(&mut self, address: Address) -> Result<Option<AccountInfo>, Self::Error> {
        Ok(self.accounts.get(&address).cloned())
    }

    fn code_by_hash(&mut self, code_hash: B256) -> Result<Bytecode, Self::Error> {
        Ok(self.code.get(&code_hash).cloned().unwrap_or_default())
    }

    fn storage(&mut self, address: Address, index: U256) -> Result<U256, Self::Error> {
        Ok(self.storage_at(address, index))
    }

    fn block_hash(&mut self, number: u64) -> Result<B256, Self::Error> {
        Ok(self
            .block_hashes
            .get(&number)
            .copied()
            .unwrap_or(B256::ZERO))
    }
}

impl DatabaseCommit for BenchDb {
    fn commit(&mut self, changes: RevmHashMap<Address, Account>) {
        for (address, account) in changes {
            if !account.is_touched() {
                continue;
            }
            if account.is_selfdestructed() {
                self.accounts.remove(&address);
                self.storage.remove(&address);
                continue;
            }

            if let Some(code) = &account.info.code {
                if !code.is_empty() {
                    self.code.insert(account.info.code_hash, code.clone());
                }
            }
            self.accounts.insert(address, account.info);

            let slots = self.storage.entry(address).or_default();
            for (index, slot) in account.storage {
                slots.insert(index, slot.present_value());
            }
        }
    }
}
