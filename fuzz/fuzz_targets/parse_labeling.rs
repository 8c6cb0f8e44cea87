//! Fuzz harness for the completion response parser.
//!
//! The payload comes back from a language model, so arbitrary garbage is
//! expected input. Target: `publabel_labeler::parse_labeling`.

#![no_main]

use libfuzzer_sys::fuzz_target;
use publabel_labeler::parse_labeling;

fuzz_target!(|data: &[u8]| {
    // Ensure the input is valid UTF-8
    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return, // Skip non-UTF-8 input
    };

    // Errors are fine; panics are not.
    let _result = parse_labeling(input);
});
