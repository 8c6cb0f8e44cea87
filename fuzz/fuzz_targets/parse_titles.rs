//! Fuzz harness for the titles file parser.
//!
//! Target: `publabel_ingest_tsv::parse_titles`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use publabel_ingest_tsv::parse_titles;

fuzz_target!(|data: &[u8]| {
    // Ensure the input is valid UTF-8
    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return, // Skip non-UTF-8 input
    };

    // Errors are fine; panics are not.
    let _result = parse_titles(input);
});
