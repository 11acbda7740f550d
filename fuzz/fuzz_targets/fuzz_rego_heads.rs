//! Fuzz target for the Rego rule-head scanner.
//!
//! Goal: scanning arbitrary text must **never panic**, and every head it
//! reports must carry a line number inside the source.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rego_heads
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 64 * 1024 {
        return;
    }
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };

    let table = hcunit_rego_parser::parse_rule_table(source);
    let lines = source.split('\n').count() as u32;
    for head in &table.rules {
        assert!(head.line >= 1 && head.line <= lines);
    }

    // Discovery over any table must not panic either.
    let _ = hcunit_domain::discover_tests(&table.rules);
});
