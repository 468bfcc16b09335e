#![no_main]

use forkstat::identity::BenchmarkIdentity;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Must never panic; a successful parse must round-trip the name shape
        if let Ok(id) = BenchmarkIdentity::parse(input) {
            let rebuilt = format!(
                "{}__{}#{}#{}.json",
                id.organization, id.project, id.method, id.params
            );
            assert_eq!(rebuilt, input);
        }
    }
});
