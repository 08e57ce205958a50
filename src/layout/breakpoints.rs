//! Viewport width → column count step function.

use serde::Deserialize;
use thiserror::Error;

/// One row of the breakpoint table: viewports at least `min_width` pixels
/// wide get `columns` columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    /// Smallest viewport width, in pixels, this row applies to.
    pub min_width: u32,
    /// Column count at and above `min_width`.
    pub columns: usize,
}

/// Errors from building a custom breakpoint table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakpointError {
    /// A row maps to zero columns.
    #[error("Breakpoint at {min_width}px must have at least one column")]
    ZeroColumns {
        /// The offending row's threshold.
        min_width: u32,
    },

    /// Two rows share the same threshold.
    #[error("Duplicate breakpoint at {0}px")]
    Duplicate(u32),
}

/// Ordered breakpoint table.
///
/// # Invariants
/// - Rows are sorted by `min_width`, widest first.
/// - Every row has `columns >= 1`.
/// - Widths below every threshold map to a single column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breakpoints {
    rows: Vec<Breakpoint>,
}

impl Breakpoints {
    /// Validates and sorts a custom table.
    pub fn new(mut rows: Vec<Breakpoint>) -> Result<Self, BreakpointError> {
        if let Some(row) = rows.iter().find(|row| row.columns == 0) {
            return Err(BreakpointError::ZeroColumns {
                min_width: row.min_width,
            });
        }

        rows.sort_by(|a, b| b.min_width.cmp(&a.min_width));
        if let Some(pair) = rows.windows(2).find(|w| w[0].min_width == w[1].min_width) {
            return Err(BreakpointError::Duplicate(pair[0].min_width));
        }

        Ok(Self { rows })
    }

    /// Column count for a viewport width.
    ///
    /// # Examples
    ///
    /// ```
    /// # use waterfall::layout::breakpoints::Breakpoints;
    /// let table = Breakpoints::default();
    /// assert_eq!(table.column_count(1600), 4);
    /// assert_eq!(table.column_count(320), 1);
    /// ```
    pub fn column_count(&self, viewport_width: u32) -> usize {
        self.rows
            .iter()
            .find(|row| viewport_width >= row.min_width)
            .map(|row| row.columns)
            .unwrap_or(1)
    }

    /// Rows, widest first.
    pub fn rows(&self) -> &[Breakpoint] {
        &self.rows
    }
}

impl Default for Breakpoints {
    /// ≥1920→5, ≥1440→4, ≥768→3, ≥576→2, else 1.
    fn default() -> Self {
        let row = |min_width, columns| Breakpoint { min_width, columns };
        Self {
            rows: vec![row(1920, 5), row(1440, 4), row(768, 3), row(576, 2)],
        }
    }
}

/// Column count for `viewport_width` under the default breakpoint table.
pub fn compute_column_count(viewport_width: u32) -> usize {
    Breakpoints::default().column_count(viewport_width)
}
