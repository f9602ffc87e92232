//! Geobin - Fast IP Geolocation Lookups from BIN Databases
//!
//! Geobin is a read-only lookup engine for IP2Location-format BIN
//! databases: given a textual IPv4 or IPv6 address and a selection of
//! fields, it returns the geolocation record whose IP range covers the
//! address.
//!
//! # Quick Start
//!
//! ```no_run
//! use geobin::{Database, Fields};
//!
//! let db = Database::open("IP2LOCATION-LITE-DB11.BIN")?;
//!
//! // Full record
//! let rec = db.query("8.8.8.8", Fields::ALL)?;
//! println!("{} ({})", rec.country_long, rec.country_short);
//!
//! // Single field; IPv6 forms that embed an IPv4 address
//! // (IPv4-mapped, 6to4, Teredo) resolve transparently.
//! let rec = db.query("::ffff:8.8.8.8", Fields::CITY)?;
//! println!("{}", rec.city);
//! # Ok::<(), geobin::DatabaseError>(())
//! ```
//!
//! # Key Properties
//!
//! - **Zero-copy loading**: [`Database::open`] memory-maps the file; no
//!   parsing beyond the fixed header happens up front.
//! - **Concurrent readers**: handles are immutable and byte sources use
//!   stateless positional reads, so one handle serves many threads.
//! - **Total queries**: invalid addresses and fields the file does not
//!   carry are reported in-band as placeholder text, never as errors.
//! - **In-memory variant**: [`Database::open_in_memory`] buffers the whole
//!   file when the filesystem should be touched only once.
//!
//! # Architecture
//!
//! ```text
//! query(ip, fields)
//!   └─ addr: parse + rewrite v4-in-v6 forms ─► numeric address
//!   └─ binary search over sorted (ip_from, ip_to) ranges
//!      (narrowed by the file's first-octet index when present)
//!   └─ decode requested columns from the matched row
//!      (strings live in a length-prefixed heap behind row pointers)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod addr;
/// Database handle and lookup engine
mod database;
mod decode;
/// Error types for database operations
pub mod error;
mod format;
mod record;
mod schema;
/// Byte sources (mmap-backed and in-memory)
pub mod source;

pub use crate::database::Database;
pub use crate::error::{DatabaseError, Result};
pub use crate::format::Header;
pub use crate::record::{Fields, Record, FIELD_UNSUPPORTED, INVALID_ADDRESS, MISSING_DATABASE};
pub use crate::source::{ByteSource, MemSource, MmapSource};

/// Library version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version of the lookup component, in the scheme the original
/// implementation reports.
pub fn api_version() -> &'static str {
    VERSION
}
