//! Hand-assembled creation bytecode for fixture contracts.
//!
//! Real build pipelines hand the bench solc output through the artifact
//! registry; the fixtures that exercise the bench itself assemble their
//! bytecode here instead. An [`AccessorContract`] is a contract whose
//! constructor records the caller and seeds storage words, and whose runtime
//! dispatches 4-byte selectors to `SLOAD`-and-return accessor bodies. That
//! is exactly enough surface for read-only deployment checks.
//!
//! The generated code avoids `PUSH0`, so it runs under any post-Byzantium
//! spec.

use alloy_primitives::{keccak256, Bytes, U256};

// Opcodes used by the assembler.
const CALLER: u8 = 0x33;
const CALLDATALOAD: u8 = 0x35;
const CODECOPY: u8 = 0x39;
const SHR: u8 = 0x1c;
const EQ: u8 = 0x14;
const SLOAD: u8 = 0x54;
const SSTORE: u8 = 0x55;
const MSTORE: u8 = 0x52;
const JUMPI: u8 = 0x57;
const JUMPDEST: u8 = 0x5b;
const PUSH1: u8 = 0x60;
const PUSH4: u8 = 0x63;
const PUSH32: u8 = 0x7f;
const DUP1: u8 = 0x80;
const RETURN: u8 = 0xf3;
const REVERT: u8 = 0xfd;

// Byte lengths of the runtime sections; the dispatch jump targets are
// computed from these.
const DISPATCH_PROLOGUE_LEN: usize = 6;
const DISPATCH_ENTRY_LEN: usize = 10;
const FALLBACK_LEN: usize = 5;
const ACCESSOR_BODY_LEN: usize = 12;
// PUSH1 len, DUP1, PUSH1 offset, PUSH1 0, CODECOPY, PUSH1 0, RETURN
const CONSTRUCTOR_TAIL_LEN: usize = 11;

/// First four bytes of `keccak256(signature)`, the Solidity call selector.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = keccak256(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Builder for a storage-accessor fixture contract.
#[derive(Debug, Default, Clone)]
pub struct AccessorContract {
    caller_slot: Option<u8>,
    init_values: Vec<(u8, U256)>,
    accessors: Vec<([u8; 4], u8)>,
}

impl AccessorContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the deploying caller's address at `slot` during construction.
    pub fn caller_slot(mut self, slot: u8) -> Self {
        self.caller_slot = Some(slot);
        self
    }

    /// Seeds the storage word at `slot` with `value` during construction.
    pub fn init_slot(mut self, slot: u8, value: U256) -> Self {
        self.init_values.push((slot, value));
        self
    }

    /// Adds a read accessor: calls matching `signature` return the storage
    /// word at `slot`.
    pub fn accessor(mut self, signature: &str, slot: u8) -> Self {
        self.accessors.push((selector(signature), slot));
        self
    }

    /// Assembles the full creation bytecode: constructor stores followed by
    /// the standard codecopy-and-return tail, then the runtime.
    ///
    /// Panics if the contract grows past what one-byte jump targets and
    /// code offsets can address; fixture contracts are tiny by construction.
    pub fn creation_code(&self) -> Bytes {
        let runtime = self.runtime_code();
        assert!(runtime.len() < 256, "fixture runtime exceeds PUSH1 range");

        let mut code = Vec::new();
        if let Some(slot) = self.caller_slot {
            code.extend_from_slice(&[CALLER, PUSH1, slot, SSTORE]);
        }
        for (slot, value) in &self.init_values {
            code.push(PUSH32);
            code.extend_from_slice(&value.to_be_bytes::<32>());
            code.extend_from_slice(&[PUSH1, *slot, SSTORE]);
        }

        let constructor_len = code.len() + CONSTRUCTOR_TAIL_LEN;
        assert!(constructor_len < 256, "fixture constructor exceeds PUSH1 range");
        code.extend_from_slice(&[
            PUSH1,
            runtime.len() as u8,
            DUP1,
            PUSH1,
            constructor_len as u8,
            PUSH1,
            0x00,
            CODECOPY,
            PUSH1,
            0x00,
            RETURN,
        ]);
        debug_assert_eq!(code.len(), constructor_len);

        code.extend_from_slice(&runtime);
        code.into()
    }

    /// Assembles the runtime: selector load, one dispatch entry per
    /// accessor, a reverting fallback, then the accessor bodies.
    fn runtime_code(&self) -> Vec<u8> {
        let bodies_start =
            DISPATCH_PROLOGUE_LEN + DISPATCH_ENTRY_LEN * self.accessors.len() + FALLBACK_LEN;

        // PUSH1 0, CALLDATALOAD, PUSH1 0xe0, SHR -- selector on the stack
        let mut code = vec![PUSH1, 0x00, CALLDATALOAD, PUSH1, 0xe0, SHR];

        for (i, (sel, _)) in self.accessors.iter().enumerate() {
            let dest = bodies_start + ACCESSOR_BODY_LEN * i;
            assert!(dest < 256, "fixture jump target exceeds PUSH1 range");
            code.push(DUP1);
            code.push(PUSH4);
            code.extend_from_slice(sel);
            code.extend_from_slice(&[EQ, PUSH1, dest as u8, JUMPI]);
        }
        // No match: revert with empty output.
        code.extend_from_slice(&[PUSH1, 0x00, PUSH1, 0x00, REVERT]);
        debug_assert_eq!(code.len(), bodies_start);

        for (_, slot) in &self.accessors {
            code.extend_from_slice(&[
                JUMPDEST, PUSH1, *slot, SLOAD, PUSH1, 0x00, MSTORE, PUSH1, 0x20, PUSH1, 0x00,
                RETURN,
            ]);
        }
        code
    }
}
