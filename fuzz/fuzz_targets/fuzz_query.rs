#![no_main]
use geobin::{Database, Fields};
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

static DB: OnceLock<Database> = OnceLock::new();

// Minimal country-only image: one range covering the v4 space plus the
// sentinel row and a tiny string heap.
fn tiny_db() -> Database {
    let mut buf = vec![0u8; 64];
    buf[0] = 1; // DB1
    buf[1] = 2; // columns
    buf[5..9].copy_from_slice(&1u32.to_le_bytes()); // one row
    buf[9..13].copy_from_slice(&65u32.to_le_bytes()); // v4 section (1-indexed)

    let heap = 64 + 2 * 8; // header + row + sentinel
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&(heap as u32).to_le_bytes());
    buf.extend_from_slice(&u32::MAX.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes());
    buf.extend_from_slice(&[2]);
    buf.extend_from_slice(b"ZZ");
    buf.extend_from_slice(&[7]);
    buf.extend_from_slice(b"Nowhere");
    Database::from_bytes(buf).expect("fuzz fixture must open")
}

fuzz_target!(|data: &[u8]| {
    // Fuzzed query strings: IP parsing and normalization edge cases must
    // resolve to a record or an error, never a panic.
    if let Ok(s) = std::str::from_utf8(data) {
        let db = DB.get_or_init(tiny_db);
        let _ = db.query(s, Fields::ALL);
        let _ = db.query(s, Fields::COUNTRY_SHORT | Fields::COUNTRY_LONG);
    }
});
