use alloy_primitives::U256;
use anyhow::Result;

use crate::env::{ChainEnv, EnvConfig};
use crate::tests::helpers::{test_env, STORED_VALUE, VALUE_STORE};
use crate::BenchError;

#[test]
fn signers_are_deterministic_across_environments() {
    let a = test_env();
    let b = test_env();
    assert_eq!(a.signers(), b.signers());
    assert_eq!(a.signers().len(), 5);
}

#[test]
fn signer_addresses_are_pairwise_distinct() {
    let env = ChainEnv::new(EnvConfig::default());
    let signers = env.signers();
    assert_eq!(signers.len(), 20);
    for (i, left) in signers.iter().enumerate() {
        for right in &signers[i + 1..] {
            assert_ne!(left.address, right.address);
        }
    }
}

#[test]
fn signers_are_funded_at_construction() {
    let mut env = test_env();
    let expected = EnvConfig::default().initial_balance;
    let first = env.signers()[0].address;
    let last = env.signers()[4].address;
    assert_eq!(env.balance_of(first), expected);
    assert_eq!(env.balance_of(last), expected);
}

#[test]
fn deploy_and_read_seeded_slot() -> Result<()> {
    let mut env = test_env();
    let factory = env.contract_factory(VALUE_STORE)?;
    let instance = factory.deploy(&mut env)?;

    assert_eq!(
        instance.read_u256(&mut env, "value()")?,
        U256::from(STORED_VALUE)
    );
    Ok(())
}

#[test]
fn deploy_records_deployer_as_owner() -> Result<()> {
    let mut env = test_env();
    let deployer = env.signers()[0].clone();
    let factory = env.contract_factory(VALUE_STORE)?;
    let instance = factory.deploy(&mut env)?;

    assert_eq!(instance.read_address(&mut env, "owner()")?, deployer.address);
    Ok(())
}

#[test]
fn connect_rebinds_the_deployer() -> Result<()> {
    let mut env = test_env();
    let other = env.signers()[1].clone();
    let factory = env.contract_factory(VALUE_STORE)?.connect(other.clone());
    let instance = factory.deploy(&mut env)?;

    assert_eq!(instance.read_address(&mut env, "owner()")?, other.address);
    Ok(())
}

#[test]
fn repeated_deploys_get_distinct_addresses() -> Result<()> {
    let mut env = test_env();
    let factory = env.contract_factory(VALUE_STORE)?;
    let first = factory.deploy(&mut env)?;
    let second = factory.deploy(&mut env)?;

    assert_ne!(first.address(), second.address());
    // Both instances answer independently.
    assert_eq!(
        first.read_u256(&mut env, "value()")?,
        U256::from(STORED_VALUE)
    );
    assert_eq!(
        second.read_u256(&mut env, "value()")?,
        U256::from(STORED_VALUE)
    );
    Ok(())
}

#[test]
fn unknown_selector_reverts() -> Result<()> {
    let mut env = test_env();
    let factory = env.contract_factory(VALUE_STORE)?;
    let instance = factory.deploy(&mut env)?;

    let err = instance
        .read_u256(&mut env, "noSuchAccessor()")
        .expect_err("fallback must revert");
    assert!(matches!(err, BenchError::CallReverted { .. }), "got {err}");
    Ok(())
}

#[test]
fn short_return_data_is_rejected_by_typed_reads() -> Result<()> {
    // Runtime is PUSH1 0, PUSH1 0, RETURN: every call answers with zero
    // bytes, which no word-typed accessor read may accept.
    crate::artifact::register_artifact(crate::artifact::ContractArtifact {
        contract_name: "EmptyReturner".to_string(),
        bytecode: "0x600580600b6000396000f360006000f3".to_string(),
    });

    let mut env = test_env();
    let factory = env.contract_factory("EmptyReturner")?;
    let instance = factory.deploy(&mut env)?;

    let err = instance
        .read_u256(&mut env, "value()")
        .expect_err("empty return data must not decode as a word");
    match err {
        BenchError::ShortReturnData { address, len } => {
            assert_eq!(address, instance.address());
            assert_eq!(len, 0);
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[test]
fn unknown_artifact_fails_factory_resolution() {
    let env = test_env();
    let err = env
        .contract_factory("NoSuchContract")
        .expect_err("unregistered name must not resolve");
    match err {
        BenchError::UnknownArtifact(name) => assert_eq!(name, "NoSuchContract"),
        other => panic!("unexpected error: {other}"),
    }
}
