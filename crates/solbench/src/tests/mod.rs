//! Unit tests for the bench.
//!
//! Every test builds its own [`ChainEnv`](crate::ChainEnv); the only shared
//! state is the artifact registry, which registration keeps idempotent.

mod helpers;

mod bytecode_tests;
mod env_tests;
