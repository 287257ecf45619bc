//! Property-based tests for binoid-math
//!
//! This module contains property tests for:
//! - Cyclotomic field arithmetic and root extraction
//! - Hermite normal form and integral solving
//! - Ideal operations (intersection, quotient, saturation)

mod cyclotomic_properties;
mod ideal_properties;
mod lattice_properties;
