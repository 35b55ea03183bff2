#![no_main]

use libfuzzer_sys::fuzz_target;
use loadgate::catalog::MetricCatalog;
use loadgate::snapshot::Snapshot;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and extraction must never panic, and extracted values are finite
        if let Ok(snapshot) = Snapshot::from_json_str("fuzz.json", chrono::Utc::now(), input) {
            if let Ok(catalog) = MetricCatalog::builtin() {
                for metric in catalog.metrics() {
                    if let Some(value) = snapshot.extract(metric) {
                        assert!(value.is_finite());
                    }
                }
            }
        }
    }
});
