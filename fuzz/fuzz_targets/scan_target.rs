#![no_main]

use libfuzzer_sys::fuzz_target;
use remedian::{remediate, scan};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        for finding in scan(text) {
            assert!(finding.line >= 1, "line numbers are 1-based");
            assert!(finding.column >= 1, "columns are 1-based");
        }

        let outcome = remediate(text);
        for fix in &outcome.applied {
            assert_ne!(fix.original, fix.fixed, "applied fixes must change the line");
        }
    }
});
