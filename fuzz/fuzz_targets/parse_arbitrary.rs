// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for parser crash safety testing.
//!
//! This target feeds arbitrary byte sequences to the parser and asserts
//! that it never panics. Every input must produce either a module or a
//! syntax error; a panic means an internal invariant was broken.
//!
//! # Corpus Seeding
//!
//! Seed `fuzz/corpus/parse_arbitrary/` with `.exl` sources for realistic
//! starting points.

#![no_main]

use exeme_core::source_analysis::{ErrorCode, parse};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 is rejected when the file is read, not by the parser
    if let Ok(source) = std::str::from_utf8(data) {
        if let Err(error) = parse(source) {
            // Every error maps to a stable code
            let _code: ErrorCode = error.code();
        }
    }
});
