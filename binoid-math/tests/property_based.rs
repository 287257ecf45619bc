//! Property-based testing entry point for binoid-math
//!
//! Run with: cargo test --test property_based

mod property_tests;
