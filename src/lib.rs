//! Purpose: Library crate behind the `jsonecho` binary and tests.
//! Exports: `core` (errors), `json` (policy-driven parse/render), `echo`, `variant`, `serve`.
//! Role: JSON round-trip echo fixture exposing parser behavior differences per variant.
//! Invariants: The echo transform is a pure function of bytes and policies.
//! Invariants: Variant policies are process-wide constants, read-only after startup.
pub mod core;
pub mod echo;
pub mod json;
pub mod serve;
pub mod variant;

pub use crate::core::error::{Error, ErrorKind, to_exit_code};
pub use echo::{EchoOutput, transform};
pub use variant::Variant;
