//! # passmint-types
//!
//! Shared types, errors, and configuration for the **Passmint** issuance
//! registry.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identifiers**: [`Address`], [`TokenId`]
//! - **Mint phase**: [`MintPhase`]
//! - **Events**: [`RegistryEvent`], [`EventKind`]
//! - **Configuration**: [`RegistryConfig`]
//! - **Errors**: [`PassmintError`] with `PM_ERR_` prefix codes, [`ErrorKind`]
//! - **Constants**: supply cap, unit price and other defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod phase;

// Re-export all primary types at crate root for ergonomic imports:
//   use passmint_types::{Address, TokenId, PassmintError, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use phase::*;

// Constants are accessed via `passmint_types::constants::FOO`
// (not re-exported to avoid name collisions).
