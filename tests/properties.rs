//! Property tests for droidprep.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "first declaration wins".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/naming.rs"]
mod naming;

#[path = "properties/icon_resolution.rs"]
mod icon_resolution;
