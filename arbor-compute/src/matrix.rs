use num_complex::Complex64;
use std::fmt::{Display, Formatter};

/// A dense rows x cols matrix of scalars, stored in row-major order.
///
/// Entries are kept as complex numbers internally; results with zero imaginary parts are demoted
/// back to real scalars when they re-enter the value lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<Complex64>,
}

impl Matrix {
    /// Creates a matrix from row-major data. The data length must be `rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<Complex64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Creates the n x n identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut data = vec![Complex64::new(0.0, 0.0); n * n];
        for i in 0..n {
            data[i * n + i] = Complex64::new(1.0, 0.0);
        }
        Self { rows: n, cols: n, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.data[row * self.cols + col]
    }

    /// Sets the entry at the given row and column.
    pub fn set(&mut self, row: usize, col: usize, value: Complex64) {
        self.data[row * self.cols + col] = value;
    }

    /// Returns the given row as a slice.
    pub fn row(&self, row: usize) -> &[Complex64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Applies a function to every entry.
    pub fn map(&self, f: impl Fn(Complex64) -> Complex64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Combines two matrices of equal shape entry by entry. The caller checks the shapes.
    pub fn zip(&self, other: &Matrix, f: impl Fn(Complex64, Complex64) -> Complex64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter()
                .zip(&other.data)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Returns the transpose of this matrix.
    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for col in 0..self.cols {
            for row in 0..self.rows {
                data.push(self.get(row, col));
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Computes the standard row-by-column matrix product. The caller checks that
    /// `self.cols == other.rows`.
    pub fn mul_matrix(&self, other: &Matrix) -> Matrix {
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for row in 0..self.rows {
            for col in 0..other.cols {
                let mut sum = Complex64::new(0.0, 0.0);
                for k in 0..self.cols {
                    sum += self.get(row, k) * other.get(k, col);
                }
                data.push(sum);
            }
        }
        Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        }
    }

    /// Multiplies this matrix by a column vector. The caller checks that
    /// `self.cols == vector.len()`.
    pub fn mul_vector(&self, vector: &[Complex64]) -> Vec<Complex64> {
        (0..self.rows)
            .map(|row| {
                self.row(row)
                    .iter()
                    .zip(vector)
                    .map(|(&a, &b)| a * b)
                    .sum()
            })
            .collect()
    }

    /// Computes the inverse of this square matrix by Gauss-Jordan elimination with partial
    /// pivoting. Returns [`None`] if the matrix is singular.
    pub fn inverse(&self) -> Option<Matrix> {
        let n = self.rows;
        let mut work = self.clone();
        let mut inv = Matrix::identity(n);

        for col in 0..n {
            // pivot on the largest remaining entry in this column
            let pivot_row = (col..n)
                .max_by(|&a, &b| {
                    work.get(a, col).norm()
                        .partial_cmp(&work.get(b, col).norm())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })?;
            let pivot = work.get(pivot_row, col);
            if pivot.norm() < 1e-12 {
                return None;
            }

            if pivot_row != col {
                for k in 0..n {
                    let (a, b) = (work.get(col, k), work.get(pivot_row, k));
                    work.set(col, k, b);
                    work.set(pivot_row, k, a);

                    let (a, b) = (inv.get(col, k), inv.get(pivot_row, k));
                    inv.set(col, k, b);
                    inv.set(pivot_row, k, a);
                }
            }

            for k in 0..n {
                work.set(col, k, work.get(col, k) / pivot);
                inv.set(col, k, inv.get(col, k) / pivot);
            }

            for row in 0..n {
                if row == col {
                    continue;
                }
                let factor = work.get(row, col);
                if factor.norm() == 0.0 {
                    continue;
                }
                for k in 0..n {
                    let new_work = work.get(row, k) - factor * work.get(col, k);
                    work.set(row, k, new_work);
                    let new_inv = inv.get(row, k) - factor * inv.get(col, k);
                    inv.set(row, k, new_inv);
                }
            }
        }

        Some(inv)
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for row in 0..self.rows {
            if row > 0 {
                write!(f, "; ")?;
            }
            for col in 0..self.cols {
                if col > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", crate::value::demote(self.get(row, col)))?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::assert_float_absolute_eq;
    use super::*;

    fn real(n: f64) -> Complex64 {
        Complex64::new(n, 0.0)
    }

    #[test]
    fn product() {
        let a = Matrix::new(2, 2, vec![real(1.0), real(2.0), real(3.0), real(4.0)]);
        let b = Matrix::new(2, 2, vec![real(5.0), real(6.0), real(7.0), real(8.0)]);
        let product = a.mul_matrix(&b);

        assert_eq!(product, Matrix::new(2, 2, vec![
            real(19.0), real(22.0),
            real(43.0), real(50.0),
        ]));
    }

    #[test]
    fn transpose_roundtrip() {
        let a = Matrix::new(2, 3, vec![
            real(1.0), real(2.0), real(3.0),
            real(4.0), real(5.0), real(6.0),
        ]);
        assert_eq!(a.transpose().transpose(), a);
        assert_eq!(a.transpose().get(2, 1), real(6.0));
    }

    #[test]
    fn inverse_times_original_is_identity() {
        let a = Matrix::new(2, 2, vec![real(4.0), real(7.0), real(2.0), real(6.0)]);
        let inv = a.inverse().unwrap();
        let product = a.mul_matrix(&inv);

        for row in 0..2 {
            for col in 0..2 {
                let expected = if row == col { 1.0 } else { 0.0 };
                assert_float_absolute_eq!(product.get(row, col).re, expected, 1e-12);
                assert_float_absolute_eq!(product.get(row, col).im, 0.0, 1e-12);
            }
        }
    }

    #[test]
    fn singular_matrix_has_no_inverse() {
        let a = Matrix::new(2, 2, vec![real(1.0), real(2.0), real(2.0), real(4.0)]);
        assert_eq!(a.inverse(), None);
    }
}
