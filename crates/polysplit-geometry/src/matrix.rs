//! Row-major coordinate matrices and their conversion to points.
//!
//! A matrix holds one vertex per row. The first two columns are `x` and
//! `y`; any further columns (Z, M, ...) are carried but ignored by the
//! geometry.

use serde::{Deserialize, Serialize};

use crate::types::{GeometryError, Point, Polyline, Tolerances};

/// An owned `rows x cols` matrix of `f64` stored row by row.
///
/// Deserialization goes through [`new`](Self::new), so a document whose
/// `values` do not fill the declared shape is rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct CoordinateMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

/// Unchecked wire form of [`CoordinateMatrix`].
#[derive(Deserialize)]
struct RawMatrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl TryFrom<RawMatrix> for CoordinateMatrix {
    type Error = GeometryError;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        Self::new(raw.rows, raw.cols, raw.values)
    }
}

impl CoordinateMatrix {
    /// Wrap `values` as a `rows x cols` matrix.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidShape`] if `values.len()` is not
    /// `rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> Result<Self, GeometryError> {
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            GeometryError::InvalidShape(format!("{rows} x {cols} matrix is too large"))
        })?;
        if values.len() != expected {
            return Err(GeometryError::InvalidShape(format!(
                "{rows} x {cols} matrix needs {expected} values, got {}",
                values.len()
            )));
        }
        Ok(Self { rows, cols, values })
    }

    /// Build a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidShape`] if the rows differ in
    /// length.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, GeometryError> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(GeometryError::InvalidShape(format!(
                "row {i} has {} columns, expected {cols}",
                row.len()
            )));
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            values: rows.concat(),
        })
    }

    /// An `n x 2` matrix with one point per row.
    #[must_use]
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            rows: points.len(),
            cols: 2,
            values: points.iter().flat_map(|p| [p.x, p.y]).collect(),
        }
    }

    /// Number of rows (vertices).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns per row.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Raw row-major values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at (`row`, `col`), or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    /// Iterate over rows as slices.
    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on 0; a zero-column matrix has no values.
        self.values.chunks_exact(self.cols.max(1))
    }

    /// Read the first two columns as points.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidShape`] when the matrix has rows
    /// but fewer than 2 columns, or when its values do not fill
    /// `rows x cols`.
    ///
    /// # Examples
    ///
    /// ```
    /// use polysplit_geometry::{CoordinateMatrix, Point};
    ///
    /// # fn main() -> Result<(), polysplit_geometry::GeometryError> {
    /// let m = CoordinateMatrix::new(2, 3, vec![0.0, 1.0, 9.0, 2.0, 3.0, 9.0])?;
    /// assert_eq!(m.to_points()?, vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn to_points(&self) -> Result<Vec<Point>, GeometryError> {
        if self.rows.checked_mul(self.cols) != Some(self.values.len()) {
            return Err(GeometryError::InvalidShape(format!(
                "{} x {} matrix holds {} values",
                self.rows,
                self.cols,
                self.values.len()
            )));
        }
        if self.rows == 0 {
            return Ok(Vec::new());
        }
        if self.cols < 2 {
            return Err(GeometryError::InvalidShape(format!(
                "coordinate matrix needs at least 2 columns, got {}",
                self.cols
            )));
        }
        Ok(self.row_iter().map(|r| Point::new(r[0], r[1])).collect())
    }

    /// Read the matrix as a normalized polyline.
    ///
    /// # Errors
    ///
    /// Fails like [`to_points`](Self::to_points).
    pub fn to_polyline(&self, tolerances: &Tolerances) -> Result<Polyline, GeometryError> {
        Ok(Polyline::normalized(&self.to_points()?, tolerances))
    }
}

impl From<&Polyline> for CoordinateMatrix {
    fn from(polyline: &Polyline) -> Self {
        Self::from_points(polyline.points())
    }
}
