//! Two-dimensional FFT (row-column algorithm)
//!
//! - rows first, then columns gathered into one reusable buffer
//! - both dimensions must be powers of two
//! - raw transforms are unnormalized; [`ifft2d_real`] divides by `rows * cols`

use alloc::vec;

use log::trace;

use crate::fft::{scale_inplace, validate_len, Complex, Direction, FftError, FftImpl, Float};
use crate::matrix::Matrix;

/// Check that a grid can be transformed along both axes.
pub fn validate_shape<E>(grid: &Matrix<E>) -> Result<(), FftError>
where
    E: Copy,
{
    validate_len(grid.rows())?;
    validate_len(grid.cols())
}

/// 2D FFT in place: every row, then every column.
pub fn fft2d_inplace<T: Float, F: FftImpl<T> + ?Sized>(
    grid: &mut Matrix<Complex<T>>,
    fft: &F,
    direction: Direction,
) -> Result<(), FftError> {
    let mut col = vec![Complex::<T>::zero(); grid.rows()];
    fft2d_inplace_with_scratch(grid, fft, direction, &mut col)
}

/// 2D FFT in place with a caller-provided column buffer of length `rows`.
pub fn fft2d_inplace_with_scratch<T: Float, F: FftImpl<T> + ?Sized>(
    grid: &mut Matrix<Complex<T>>,
    fft: &F,
    direction: Direction,
    col: &mut [Complex<T>],
) -> Result<(), FftError> {
    validate_shape(grid)?;
    let (rows, cols) = grid.shape();
    if col.len() != rows {
        return Err(FftError::MismatchedLengths);
    }
    trace!("fft2d {:?} {}x{}: row pass", direction, rows, cols);
    for row in grid.rows_iter_mut() {
        fft.process(row, direction)?;
    }
    trace!("fft2d {:?} {}x{}: column pass", direction, rows, cols);
    for c in 0..cols {
        grid.gather_column(c, col)?;
        fft.process(col, direction)?;
        grid.scatter_column(c, col)?;
    }
    Ok(())
}

/// Forward 2D transform of a real grid.
pub fn fft2d<T: Float, F: FftImpl<T> + ?Sized>(
    real: &Matrix<T>,
    fft: &F,
) -> Result<Matrix<Complex<T>>, FftError> {
    let mut grid = real.to_complex();
    fft2d_inplace(&mut grid, fft, Direction::Forward)?;
    Ok(grid)
}

/// Inverse 2D transform normalized by `rows * cols`.
pub fn ifft2d_normalized<T: Float, F: FftImpl<T> + ?Sized>(
    grid: &mut Matrix<Complex<T>>,
    fft: &F,
) -> Result<(), FftError> {
    fft2d_inplace(grid, fft, Direction::Inverse)?;
    let total = T::from_usize(grid.rows() * grid.cols()).ok_or(FftError::InvalidValue)?;
    scale_inplace(grid.as_mut_slice(), T::one() / total);
    Ok(())
}

/// Inverse 2D transform back to a real grid; imaginary parts are dropped.
pub fn ifft2d_real<T: Float, F: FftImpl<T> + ?Sized>(
    mut spectrum: Matrix<Complex<T>>,
    fft: &F,
) -> Result<Matrix<T>, FftError> {
    ifft2d_normalized(&mut spectrum, fft)?;
    Ok(spectrum.re())
}
