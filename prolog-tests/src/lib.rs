//! Integration tests for the resolution engine, parser and loader working
//! together. Mirrors the reference test crate's shape: everything here is
//! test-only, so the crate's real dependencies live under
//! `[dev-dependencies]` and this file (like the reference's
//! `test_util.rs`) is gated with `#![cfg(test)]`.

#![cfg(test)]

mod test_util;

mod invariants;
mod scenarios;
