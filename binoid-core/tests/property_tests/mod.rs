//! Property-based tests for binoid-core
//!
//! This module contains property tests for:
//! - Classification and redundancy filtering
//! - Cellular decomposition by both strategies
//! - Saturation of partial characters

mod cellular_properties;
mod character_properties;
mod redundancy_properties;
