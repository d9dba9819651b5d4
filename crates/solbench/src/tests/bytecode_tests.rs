use alloy_primitives::U256;

use crate::bytecode::{selector, AccessorContract};
use crate::tests::helpers::value_store_code;

const JUMPDEST: u8 = 0x5b;
const PUSH4: u8 = 0x63;
const REVERT: u8 = 0xfd;

// Selector load: PUSH1 0, CALLDATALOAD, PUSH1 0xe0, SHR
const RUNTIME_PROLOGUE: [u8; 6] = [0x60, 0x00, 0x35, 0x60, 0xe0, 0x1c];

/// Locates the runtime region inside creation code by its prologue.
fn runtime_of(code: &[u8]) -> &[u8] {
    let start = code
        .windows(RUNTIME_PROLOGUE.len())
        .position(|w| w == RUNTIME_PROLOGUE)
        .expect("runtime prologue not found");
    &code[start..]
}

#[test]
fn selectors_match_known_solidity_values() {
    // ERC-173 owner() and ERC-20 transfer, both well-known constants.
    assert_eq!(selector("owner()"), [0x8d, 0xa5, 0xcb, 0x5b]);
    assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
}

#[test]
fn dispatch_entries_carry_the_accessor_selectors() {
    let code = value_store_code();
    let runtime = runtime_of(&code);

    for signature in ["owner()", "value()"] {
        let sel = selector(signature);
        assert!(
            runtime.windows(4).any(|w| w == sel),
            "selector for {signature} missing from runtime"
        );
    }
}

#[test]
fn dispatch_jump_targets_land_on_jumpdest() {
    let code = value_store_code();
    let runtime = runtime_of(&code);

    // Walk the dispatch entries: DUP1, PUSH4 <sel>, EQ, PUSH1 <dest>, JUMPI.
    let mut offset = RUNTIME_PROLOGUE.len();
    let mut entries = 0;
    while runtime[offset] == 0x80 {
        assert_eq!(runtime[offset + 1], PUSH4);
        let dest = runtime[offset + 8] as usize;
        assert_eq!(runtime[dest], JUMPDEST, "entry {entries} jumps into the weeds");
        offset += 10;
        entries += 1;
    }
    assert_eq!(entries, 2);
}

#[test]
fn fallback_reverts_when_nothing_matches() {
    // A contract with no accessors is all fallback.
    let code = AccessorContract::new().init_slot(0, U256::from(7)).creation_code();
    assert_eq!(*code.last().expect("non-empty code"), REVERT);
}

#[test]
fn constructor_tail_copies_the_whole_runtime() {
    let code = value_store_code();
    let runtime = runtime_of(&code);
    let constructor_len = code.len() - runtime.len();

    // PUSH1 <runtime len>, DUP1, PUSH1 <runtime offset> open the tail.
    let tail = &code[constructor_len - 11..constructor_len];
    assert_eq!(tail[0], 0x60);
    assert_eq!(tail[1] as usize, runtime.len());
    assert_eq!(tail[2], 0x80);
    assert_eq!(tail[3], 0x60);
    assert_eq!(tail[4] as usize, constructor_len);
}
