//! Defaults shared across the sampling, reporting and sonification layers.

/// Defaults used when callers do not supply their own configuration
pub mod haiqu_constants {
    /// Decimal places used when formatting a percentage for display.
    pub const DEFAULT_PERCENT_DECIMALS: usize = 2;
    /// Length of "top poems by probability" style rankings.
    pub const DEFAULT_TOP_N: usize = 10;
    /// Width in bits of one poem line index (8-entry word banks).
    pub const POEM_FIELD_BITS: usize = 3;
    /// Root pitch (A3) for sonified chords.
    pub const DEFAULT_BASE_HZ: f64 = 220.0;
}
