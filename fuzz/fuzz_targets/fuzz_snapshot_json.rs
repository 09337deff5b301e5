#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot loading.
///
/// Feeds arbitrary UTF-8 strings to `Snapshot::from_json`, which parses and
/// validates the export. Malformed input must surface as an error.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = vaultview::Snapshot::from_json(s);
    }
});
