//! Build artifacts and the process-wide artifact registry.
//!
//! Factory resolution works against prebuilt creation bytecode registered by
//! contract name, the same role Hardhat's artifact directory plays for
//! `getContractFactory`. The JSON shape mirrors the two artifact fields the
//! bench consumes (`contractName`, `bytecode`).

use std::collections::HashMap;
use std::sync::RwLock;

use alloy_primitives::Bytes;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::BenchError;

/// Prebuilt creation bytecode for one named contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractArtifact {
    pub contract_name: String,
    /// Creation bytecode as 0x-prefixed hex.
    pub bytecode: String,
}

impl ContractArtifact {
    pub fn new(contract_name: impl Into<String>, creation_code: Bytes) -> Self {
        Self {
            contract_name: contract_name.into(),
            bytecode: format!("0x{}", hex::encode(&creation_code)),
        }
    }

    /// Parses a Hardhat-shaped artifact JSON document.
    pub fn from_json(raw: &str) -> Result<Self, BenchError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Decodes the creation bytecode, accepting an optional `0x` prefix.
    pub fn creation_code(&self) -> Result<Bytes, BenchError> {
        let raw = self.bytecode.strip_prefix("0x").unwrap_or(&self.bytecode);
        let code = hex::decode(raw).map_err(|source| BenchError::InvalidBytecode {
            name: self.contract_name.clone(),
            source,
        })?;
        Ok(code.into())
    }
}

static ARTIFACTS: Lazy<RwLock<HashMap<String, ContractArtifact>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers an artifact under its contract name. Registration is idempotent
/// per name; re-registering replaces the previous bytecode.
pub fn register_artifact(artifact: ContractArtifact) {
    let mut artifacts = ARTIFACTS.write().expect("artifact registry poisoned");
    artifacts.insert(artifact.contract_name.clone(), artifact);
}

/// Looks up a registered artifact by contract name.
pub fn lookup_artifact(name: &str) -> Option<ContractArtifact> {
    let artifacts = ARTIFACTS.read().expect("artifact registry poisoned");
    artifacts.get(name).cloned()
}
