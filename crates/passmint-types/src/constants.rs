//! System-wide constants for the Passmint registry.

use rust_decimal::Decimal;

/// Default supply cap: number of passes that can ever be issued.
pub const DEFAULT_MAX_SUPPLY: u64 = 1000;

/// Default price of one pass, in the base monetary unit (0.1).
pub const DEFAULT_UNIT_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Default human-readable collection name.
pub const DEFAULT_COLLECTION_NAME: &str = "Creator Pass";

/// Suffix appended to `base_uri + token_id` to form a metadata pointer.
pub const METADATA_SUFFIX: &str = ".json";

/// Maximum accepted length of a base URI, in bytes.
pub const MAX_BASE_URI_LEN: usize = 2048;

/// Domain separator hashed in front of every snapshot digest.
pub const SNAPSHOT_DOMAIN: &[u8] = b"passmint:snapshot:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
