//! # passmint-registry
//!
//! Capped-supply pass issuance registry.
//!
//! ## Architecture
//!
//! One aggregate, [`PassRegistry`], owns four components:
//! 1. **AccessGuard**: single-owner capability check, transferable or renounceable
//! 2. **MintGate**: one-way `NOT_STARTED → ACTIVE` switch, owner only
//! 3. **IssuanceLedger**: payment and supply checks, sequential ids, holder counts
//! 4. **Treasury**: custody of payments, owner-only full withdrawal
//!
//! ## Mint Flow
//!
//! ```text
//! mint_pass(caller, payment)
//!     → MintGate.check_open() → payment >= unit_price → counter < max_supply
//!     → Treasury.deposit(payment) → owner_of / balance_of updated → PassIssued event
//! ```
//!
//! Every operation commits fully or leaves the registry untouched.
//! [`SharedRegistry`] serializes calls from several threads behind one lock.

pub mod access_guard;
pub mod issuance_ledger;
pub mod mint_gate;
pub mod payout;
pub mod registry;
pub mod shared;
pub mod snapshot;
pub mod treasury;

pub use access_guard::AccessGuard;
pub use issuance_ledger::IssuanceLedger;
pub use mint_gate::MintGate;
pub use payout::{LedgerPayout, PayoutSink};
pub use registry::{PassRegistry, RegistryState};
pub use shared::SharedRegistry;
pub use snapshot::{RegistrySnapshot, state_digest};
pub use treasury::Treasury;
