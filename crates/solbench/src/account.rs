//! Deterministic signer identities.
//!
//! The bench does not manage private keys: like an in-process dev chain, the
//! EVM is driven with the transaction `caller` set directly, so a signer is
//! just an ordered, funded address. Addresses are derived from the signer's
//! position, which keeps the list identical across environments and runs.

use alloy_primitives::{keccak256, Address};

/// One test account: an ordered position and the address derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerIdentity {
    pub index: usize,
    pub address: Address,
}

impl SignerIdentity {
    /// Derives the identity at `index`. The address is the low 20 bytes of
    /// `keccak256("solbench signer {index}")`.
    pub fn derive(index: usize) -> Self {
        let digest = keccak256(format!("solbench signer {index}").as_bytes());
        Self {
            index,
            address: Address::from_slice(&digest[12..]),
        }
    }
}

/// Derives the first `count` signer identities in order.
pub fn derive_signers(count: usize) -> Vec<SignerIdentity> {
    (0..count).map(SignerIdentity::derive).collect()
}
