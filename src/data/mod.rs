// src/data/mod.rs

//! Recorded hardware results bundled with the crate.
//!
//! Counts are literals captured from previously run circuits; they are
//! validated into tables on demand and never modified.

use crate::core::HaiquError;
use crate::correlation::CorrelationMatrix;
use crate::decoding::WordBank;
use crate::distribution::{DistributionTable, ExperimentCounts};
use std::collections::BTreeMap;

/// Bell pair measured in the Z basis, 1024 shots.
pub const DIST_Z: &[(&str, u64)] = &[("00", 496), ("01", 14), ("10", 19), ("11", 495)];

/// Bell pair measured in the X basis, 1024 shots.
pub const DIST_X: &[(&str, u64)] = &[("00", 488), ("01", 21), ("10", 17), ("11", 498)];

/// Three-qubit GHZ state, 1024 shots.
pub const DIST_GHZ: &[(&str, u64)] = &[
    ("000", 478),
    ("001", 14),
    ("010", 11),
    ("011", 9),
    ("100", 13),
    ("101", 10),
    ("110", 27),
    ("111", 462),
];

/// Two-qubit GHZ (Bell) preparation from the depth sweep, 1024 shots.
const DIST_GHZ_2: &[(&str, u64)] = &[("00", 501), ("01", 9), ("10", 12), ("11", 502)];

/// Four-qubit GHZ preparation from the depth sweep, 1024 shots. Outcomes
/// that never occurred are omitted.
const DIST_GHZ_4: &[(&str, u64)] = &[
    ("0000", 431),
    ("0001", 17),
    ("0010", 12),
    ("0100", 15),
    ("0111", 11),
    ("1000", 19),
    ("1011", 9),
    ("1101", 13),
    ("1110", 22),
    ("1111", 475),
];

/// Joint counts of first-line index (row) against last-line index (column)
/// for the entangled poem pair.
pub const BELL_PAIR_MATRIX: [[u64; 8]; 8] = [
    [487, 25, 14, 2, 21, 0, 2, 0],
    [25, 470, 18, 12, 3, 16, 1, 2],
    [14, 18, 492, 20, 2, 1, 15, 3],
    [2, 12, 20, 468, 1, 3, 2, 17],
    [21, 3, 2, 1, 479, 22, 13, 2],
    [0, 16, 1, 3, 22, 481, 2, 14],
    [2, 1, 15, 2, 13, 2, 474, 19],
    [0, 2, 3, 17, 2, 14, 19, 488],
];

/// Nine-qubit poem circuit: three 3-bit line indices, high bits first.
/// Outcomes that never occurred are omitted.
pub const DIST_POEM: &[(&str, u64)] = &[
    ("000000000", 79),
    ("000001000", 118),
    ("000011000", 46),
    ("000011010", 12),
    ("001000001", 219),
    ("001110001", 150),
    ("010001010", 111),
    ("010011101", 46),
    ("010101010", 31),
    ("010111010", 116),
    ("011001011", 112),
    ("011011011", 71),
    ("011011110", 91),
    ("100010100", 155),
    ("100100100", 38),
    ("100111100", 113),
    ("101010101", 89),
    ("101011101", 156),
    ("101100101", 100),
    ("110011110", 278),
    ("110100110", 129),
    ("110111110", 55),
    ("111001111", 60),
    ("111110111", 173),
    ("111111111", 32),
];

pub const FIRST_LINES: [&str; 8] = [
    "cold qubits at rest",
    "a photon hesitates",
    "two spins share one breath",
    "the gate opens wide",
    "silence in the fridge",
    "a coin that never lands",
    "phases drift apart",
    "the readout glows green",
];

pub const MIDDLE_LINES: [&str; 8] = [
    "both answers held in one hand",
    "noise hums through the copper lines",
    "the measurement waits its turn",
    "amplitudes fold into light",
    "a whisper crosses the chip",
    "every path is walked at once",
    "the ancilla keeps its watch",
    "entangled, they choose as one",
];

pub const LAST_LINES: [&str; 8] = [
    "zero, and then still",
    "one bright certain bit",
    "the wave comes to rest",
    "a choice is recorded",
    "morning in the lab",
    "the pair agrees again",
    "noise takes what it will",
    "the poem is sampled",
];

/// Z-basis Bell distribution.
pub fn dist_z() -> Result<DistributionTable, HaiquError> {
    DistributionTable::from_static("DIST_Z", DIST_Z)
}

/// X-basis Bell distribution.
pub fn dist_x() -> Result<DistributionTable, HaiquError> {
    DistributionTable::from_static("DIST_X", DIST_X)
}

/// Three-qubit GHZ distribution.
pub fn dist_ghz() -> Result<DistributionTable, HaiquError> {
    DistributionTable::from_static("DIST_GHZ", DIST_GHZ)
}

/// GHZ distribution from the preparation sweep for `qubits` qubits (2, 3 or 4).
pub fn ghz_for_qubits(qubits: usize) -> Result<DistributionTable, HaiquError> {
    match qubits {
        2 => DistributionTable::from_static("DIST_GHZ_2", DIST_GHZ_2),
        3 => dist_ghz(),
        4 => DistributionTable::from_static("DIST_GHZ_4", DIST_GHZ_4),
        _ => Err(HaiquError::IndexOutOfRange { index: qubits, len: 5, context: "GHZ qubit sweep (2..=4)".to_string() }),
    }
}

/// Bell results in both bases, as a per-basis experiment.
pub fn bell_counts() -> Result<ExperimentCounts, HaiquError> {
    let mut tables = BTreeMap::new();
    for (basis, counts) in [("Z", DIST_Z), ("X", DIST_X)] {
        tables.insert(basis.to_string(), DistributionTable::from_static(&format!("bell/{}", basis), counts)?);
    }
    Ok(ExperimentCounts::PerBasis(tables))
}

pub fn bell_pair_matrix() -> Result<CorrelationMatrix, HaiquError> {
    CorrelationMatrix::from_static(&BELL_PAIR_MATRIX)
}

pub fn poem_distribution() -> Result<DistributionTable, HaiquError> {
    DistributionTable::from_static("DIST_POEM", DIST_POEM)
}

/// The three poem word banks, in line order.
pub fn poem_word_banks() -> Result<Vec<WordBank>, HaiquError> {
    Ok(vec![
        WordBank::from_static("line1", &FIRST_LINES)?,
        WordBank::from_static("line2", &MIDDLE_LINES)?,
        WordBank::from_static("line3", &LAST_LINES)?,
    ])
}
