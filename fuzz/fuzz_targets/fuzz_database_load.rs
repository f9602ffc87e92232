#![no_main]
use geobin::{Database, Fields};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a database image: opening may fail, but queries
    // against whatever opens must never panic.
    if let Ok(db) = Database::from_bytes(data.to_vec()) {
        let _ = db.query("8.8.8.8", Fields::ALL);
        let _ = db.query("255.255.255.255", Fields::ALL);
        let _ = db.query("2001:4860:4860::8888", Fields::ALL);
    }
});
