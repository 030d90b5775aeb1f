#![no_main]

use libfuzzer_sys::fuzz_target;
use passchain::core::operations::normalize::{normalize, normalize_utf8};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes should never panic
    let _ = normalize_utf8(data);

    if let Ok(s) = core::str::from_utf8(data) {
        if let Ok(once) = normalize(s) {
            assert_eq!(normalize(&once).as_deref(), Ok(once.as_str()));
        }
    }
});
