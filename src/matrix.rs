//! Flat row-major matrix used for signals and spectra.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::fft::FftError;
use crate::num::{Complex, Float};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// `rows * cols` does not match the buffer length.
    ShapeMismatch { rows: usize, cols: usize, len: usize },
    /// Column buffer length differs from the row count.
    ColumnLength { rows: usize, len: usize },
}

impl fmt::Display for MatrixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { rows, cols, len } => write!(
                f,
                "buffer of length {} cannot hold a {}x{} matrix",
                len, rows, cols
            ),
            Self::ColumnLength { rows, len } => write!(
                f,
                "column buffer of length {} for a matrix with {} rows",
                len, rows
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatrixError {}

impl From<MatrixError> for FftError {
    fn from(_: MatrixError) -> Self {
        FftError::MismatchedLengths
    }
}

/// `rows × cols` grid stored as one contiguous row-major buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<E> {
    rows: usize,
    cols: usize,
    data: Vec<E>,
}

impl<E: Copy> Matrix<E> {
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn filled(rows: usize, cols: usize, value: E) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; entry_count(rows, cols)],
        }
    }

    pub fn from_vec(rows: usize, cols: usize, data: Vec<E>) -> Result<Self, MatrixError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix by evaluating `f(row, col)` for every entry.
    ///
    /// # Panics
    ///
    /// Panics if `rows * cols` overflows `usize`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> E) -> Self {
        let mut data = Vec::with_capacity(entry_count(rows, cols));
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<E> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[E] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [E] {
        &mut self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn rows_iter(&self) -> core::slice::Chunks<'_, E> {
        self.data.chunks(self.cols.max(1))
    }

    pub fn rows_iter_mut(&mut self) -> core::slice::ChunksMut<'_, E> {
        self.data.chunks_mut(self.cols.max(1))
    }

    pub fn as_slice(&self) -> &[E] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.data
    }

    pub fn map<U: Copy>(&self, f: impl FnMut(E) -> U) -> Matrix<U> {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().copied().map(f).collect(),
        }
    }

    /// Copy column `col` into `out`, which must hold exactly `rows` entries.
    pub fn gather_column(&self, col: usize, out: &mut [E]) -> Result<(), MatrixError> {
        self.check_column(out.len())?;
        for (r, slot) in out.iter_mut().enumerate() {
            *slot = self.data[r * self.cols + col];
        }
        Ok(())
    }

    /// Write `values` back into column `col`; `values.len()` must equal `rows`.
    pub fn scatter_column(&mut self, col: usize, values: &[E]) -> Result<(), MatrixError> {
        self.check_column(values.len())?;
        for (r, v) in values.iter().enumerate() {
            self.data[r * self.cols + col] = *v;
        }
        Ok(())
    }

    fn check_column(&self, len: usize) -> Result<(), MatrixError> {
        if len != self.rows {
            return Err(MatrixError::ColumnLength {
                rows: self.rows,
                len,
            });
        }
        Ok(())
    }
}

fn entry_count(rows: usize, cols: usize) -> usize {
    match rows.checked_mul(cols) {
        Some(n) => n,
        None => panic!("{}x{} matrix overflows usize", rows, cols),
    }
}

impl<E> core::ops::Index<(usize, usize)> for Matrix<E> {
    type Output = E;
    fn index(&self, (row, col): (usize, usize)) -> &E {
        assert!(col < self.cols, "column {} out of range", col);
        &self.data[row * self.cols + col]
    }
}

impl<E> core::ops::IndexMut<(usize, usize)> for Matrix<E> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut E {
        assert!(col < self.cols, "column {} out of range", col);
        &mut self.data[row * self.cols + col]
    }
}

impl<T: Float> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    /// Lift to complex samples with zero imaginary part.
    pub fn to_complex(&self) -> Matrix<Complex<T>> {
        self.map(Complex::from_re)
    }
}

impl<T: Float> Matrix<Complex<T>> {
    pub fn zeros_complex(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, Complex::zero())
    }

    /// Real parts of every entry.
    pub fn re(&self) -> Matrix<T> {
        self.map(|c| c.re)
    }

    /// Largest absolute imaginary part.
    pub fn max_abs_im(&self) -> T {
        self.data
            .iter()
            .map(|c| c.im.abs())
            .fold(T::zero(), |acc, v| if v > acc { v } else { acc })
    }
}
