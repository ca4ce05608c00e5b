// src/correlation/mod.rs

//! Correlated paired draws from a measured joint-count matrix.
//!
//! A `CorrelationMatrix` records how often a "first" choice `i` was
//! observed together with a "last" choice `j`. Fixing one side and sampling
//! the other from the matching row or column reproduces the hardware's
//! correlations, noise included. Matching indices mean the correlation held;
//! any divergence is what the noise did to it.

use crate::core::HaiquError;
use crate::sampling::sample_index;
use rand::Rng;
use std::fmt;
use tracing::warn;

/// Square joint-count table, stored row-major. Rows may have different sums.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationMatrix {
    size: usize,
    cells: Vec<u64>,
}

impl CorrelationMatrix {
    /// # Errors
    /// `HaiquError::InvalidMatrix` if `rows` is empty, not square, or its
    /// counts sum past `u64::MAX`.
    pub fn new(rows: Vec<Vec<u64>>) -> Result<Self, HaiquError> {
        let size = rows.len();
        if size == 0 {
            return Err(HaiquError::InvalidMatrix { message: "matrix has no rows".to_string() });
        }
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(HaiquError::InvalidMatrix {
                    message: format!("row {} has {} columns, expected {}", i, row.len(), size),
                });
            }
            cells.extend(row);
        }
        // Every row, column and diagonal sum is bounded by the grand total.
        if cells.iter().try_fold(0u64, |acc, c| acc.checked_add(*c)).is_none() {
            return Err(HaiquError::InvalidMatrix { message: "matrix counts overflow u64".to_string() });
        }
        Ok(Self { size, cells })
    }

    /// Builds a matrix from a fixed-size array literal.
    pub fn from_static<const N: usize>(rows: &[[u64; N]; N]) -> Result<Self, HaiquError> {
        Self::new(rows.iter().map(|r| r.to_vec()).collect())
    }

    /// Number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, column: usize) -> Option<u64> {
        if row < self.size && column < self.size {
            Some(self.cells[row * self.size + column])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> Result<&[u64], HaiquError> {
        self.check_index(i, "row")?;
        Ok(&self.cells[i * self.size..(i + 1) * self.size])
    }

    pub fn column(&self, j: usize) -> Result<Vec<u64>, HaiquError> {
        self.check_index(j, "column")?;
        Ok((0..self.size).map(|i| self.cells[i * self.size + j]).collect())
    }

    pub fn row_total(&self, i: usize) -> Result<u64, HaiquError> {
        Ok(self.row(i)?.iter().sum())
    }

    pub fn column_total(&self, j: usize) -> Result<u64, HaiquError> {
        Ok(self.column(j)?.iter().sum())
    }

    /// Sum of every cell.
    pub fn total(&self) -> u64 {
        self.cells.iter().sum()
    }

    /// Sum of the cells where first and last choice agree.
    pub fn diagonal_total(&self) -> u64 {
        (0..self.size).map(|i| self.cells[i * self.size + i]).sum()
    }

    /// Samples the complementary index for `axis`. See [`derive`].
    pub fn derive<R: Rng + ?Sized>(&self, axis: Axis, rng: &mut R) -> Result<CorrelatedDraw, HaiquError> {
        derive(self, axis, rng)
    }

    fn check_index(&self, index: usize, what: &str) -> Result<(), HaiquError> {
        if index >= self.size {
            return Err(HaiquError::IndexOutOfRange {
                index,
                len: self.size,
                context: format!("correlation matrix {}", what),
            });
        }
        Ok(())
    }
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.size {
            let row = &self.cells[i * self.size..(i + 1) * self.size];
            let cells: Vec<String> = row.iter().map(|c| format!("{:>5}", c)).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Which side of the matrix the caller fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// The first choice is fixed; the last choice is sampled from the row.
    Row(usize),
    /// The last choice is fixed; the first choice is sampled from the column.
    Column(usize),
}

/// Result of one correlated draw. `first` is always the row index and
/// `last` the column index, whichever side was fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelatedDraw {
    pub first: usize,
    pub last: usize,
    /// `true` iff `first == last`.
    pub held: bool,
    /// Recorded count of the `(first, last)` cell.
    pub weight: u64,
    /// Sum of the row or column that was sampled.
    pub line_total: u64,
    /// `true` if the line had no mass and the diagonal was used instead.
    pub fallback: bool,
}

impl CorrelatedDraw {
    /// Observed probability of the sampled cell within its row or column.
    pub fn probability(&self) -> f64 {
        if self.line_total == 0 { 0.0 } else { self.weight as f64 / self.line_total as f64 }
    }
}

/// Fixes one side of `matrix` and samples the other from the corresponding
/// row or column weights.
///
/// A row or column with no recorded counts does not error: the draw falls
/// back to the diagonal index, so the correlation is reported as held.
///
/// # Errors
/// `HaiquError::IndexOutOfRange` if the fixed index is not below `matrix.size()`.
pub fn derive<R: Rng + ?Sized>(
    matrix: &CorrelationMatrix,
    axis: Axis,
    rng: &mut R,
) -> Result<CorrelatedDraw, HaiquError> {
    let (fixed, line): (usize, Vec<u64>) = match axis {
        Axis::Row(i) => (i, matrix.row(i)?.to_vec()),
        Axis::Column(j) => (j, matrix.column(j)?),
    };
    let line_total: u64 = line.iter().sum();

    let (sampled, fallback) = match sample_index(&line, line_total, rng) {
        Some(index) => (index, false),
        None => {
            warn!(?axis, "correlation line has no recorded counts, using diagonal");
            (fixed, true)
        }
    };

    let (first, last) = match axis {
        Axis::Row(_) => (fixed, sampled),
        Axis::Column(_) => (sampled, fixed),
    };

    Ok(CorrelatedDraw {
        first,
        last,
        held: first == last,
        weight: line[sampled],
        line_total,
        fallback,
    })
}
