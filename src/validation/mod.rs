// src/validation/mod.rs

//! Construction-time checks for decoder wiring, tables and correlation matrices.
//!
//! These are the fail-fast guards: anything that would otherwise corrupt a
//! decoded artifact silently is rejected here with a `HaiquError`.

use crate::core::{BitRange, HaiquError};
use crate::correlation::CorrelationMatrix;
use crate::distribution::DistributionTable;

/// Checks that `ranges` are pairwise disjoint and together cover every
/// position of a `width`-bit string exactly once.
///
/// # Returns
/// * `Ok(())` if the ranges tile `0..width`.
/// * `Err(HaiquError::InvalidBinding)` naming the first gap, overlap or
///   zero-width range found.
pub fn check_binding_coverage(width: usize, ranges: &[BitRange]) -> Result<(), HaiquError> {
    if width == 0 {
        return Err(HaiquError::InvalidBinding { message: "decoder width must be positive".to_string() });
    }
    if let Some(empty) = ranges.iter().find(|r| r.width == 0) {
        return Err(HaiquError::InvalidBinding { message: format!("bit range starting at {} is empty", empty.start) });
    }

    let mut sorted: Vec<BitRange> = ranges.to_vec();
    sorted.sort();

    let mut cursor = 0;
    for range in &sorted {
        if range.start < cursor {
            return Err(HaiquError::InvalidBinding { message: format!("bit range {} overlaps a previous field", range) });
        }
        if range.start > cursor {
            return Err(HaiquError::InvalidBinding { message: format!("bits [{}..{}) are not bound to any field", cursor, range.start) });
        }
        cursor = range.end();
    }

    if cursor != width {
        let message = if cursor > width {
            format!("fields cover {} bits but the bitstring has {}", cursor, width)
        } else {
            format!("bits [{}..{}) are not bound to any field", cursor, width)
        };
        return Err(HaiquError::InvalidBinding { message });
    }
    Ok(())
}

/// Checks that a table's keys have the width a decoder expects.
pub fn check_table_width(table: &DistributionTable, width: usize) -> Result<(), HaiquError> {
    if table.width() != width {
        return Err(HaiquError::WidthMismatch { expected: width, found: table.width() });
    }
    Ok(())
}

/// Checks that every row and every column of `matrix` carries positive mass.
///
/// Real hardware matrices always do; a zero line would force the
/// correlation deriver onto its diagonal fallback.
pub fn check_positive_lines(matrix: &CorrelationMatrix) -> Result<(), HaiquError> {
    for i in 0..matrix.size() {
        if matrix.row_total(i)? == 0 {
            return Err(HaiquError::InvalidMatrix { message: format!("row {} has no recorded counts", i) });
        }
        if matrix.column_total(i)? == 0 {
            return Err(HaiquError::InvalidMatrix { message: format!("column {} has no recorded counts", i) });
        }
    }
    Ok(())
}

/// Returns `true` if `matrix[i][j] == matrix[j][i]` for all `i, j`.
pub fn is_symmetric(matrix: &CorrelationMatrix) -> bool {
    let n = matrix.size();
    (0..n).all(|i| (0..i).all(|j| matrix.get(i, j) == matrix.get(j, i)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(layout: &[(usize, usize)]) -> Vec<BitRange> {
        layout.iter().map(|(s, w)| BitRange::new(*s, *w)).collect()
    }

    #[test]
    fn test_three_fields_tile_nine_bits() {
        assert!(check_binding_coverage(9, &ranges(&[(0, 3), (3, 3), (6, 3)])).is_ok());
        // Order of the bindings does not matter.
        assert!(check_binding_coverage(9, &ranges(&[(6, 3), (0, 3), (3, 3)])).is_ok());
    }

    #[test]
    fn test_gap_overlap_and_overrun_rejected() {
        assert!(check_binding_coverage(9, &ranges(&[(0, 3), (4, 3), (7, 2)])).is_err());
        assert!(check_binding_coverage(9, &ranges(&[(0, 3), (2, 3), (5, 4)])).is_err());
        assert!(check_binding_coverage(6, &ranges(&[(0, 3), (3, 4)])).is_err());
        assert!(check_binding_coverage(9, &ranges(&[(0, 3), (3, 3)])).is_err());
        assert!(check_binding_coverage(3, &ranges(&[(0, 0), (0, 3)])).is_err());
        assert!(check_binding_coverage(0, &[]).is_err());
    }

    #[test]
    fn test_range_reaching_usize_limit_rejected() {
        let err = check_binding_coverage(9, &ranges(&[(0, 3), (3, usize::MAX)])).unwrap_err();
        assert!(matches!(err, HaiquError::InvalidBinding { .. }));
        assert!(check_binding_coverage(9, &ranges(&[(usize::MAX, 1)])).is_err());
    }

    #[test]
    fn test_table_width() -> Result<(), HaiquError> {
        let table = DistributionTable::from_static("t", &[("010", 1)])?;
        assert!(check_table_width(&table, 3).is_ok());
        assert_eq!(check_table_width(&table, 9), Err(HaiquError::WidthMismatch { expected: 9, found: 3 }));
        Ok(())
    }

    #[test]
    fn test_positive_lines_and_symmetry() -> Result<(), HaiquError> {
        let good = CorrelationMatrix::new(vec![vec![5, 1], vec![1, 7]])?;
        assert!(check_positive_lines(&good).is_ok());
        assert!(is_symmetric(&good));

        let lopsided = CorrelationMatrix::new(vec![vec![5, 0], vec![2, 0]])?;
        assert!(check_positive_lines(&lopsided).is_err());
        assert!(!is_symmetric(&lopsided));
        Ok(())
    }
}
