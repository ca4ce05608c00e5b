// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod bitstring;
pub mod error;

// Re-export public types for convenient access via `haiqu::core::TypeName`
pub use bitstring::{BitRange, Bitstring};
pub use error::HaiquError;

pub mod constants;
pub use constants::haiqu_constants::{DEFAULT_BASE_HZ, DEFAULT_PERCENT_DECIMALS, DEFAULT_TOP_N, POEM_FIELD_BITS};
