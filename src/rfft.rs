//! Real FFT (RFFT) utilities built on top of the complex FFT.
//!
//! A real signal's spectrum is Hermitian, `X[N-k] = conj(X[k])`, so only the
//! first [`half_len`]`(N) = N/2 + 1` bins (DC through Nyquist) are stored.
//! This module provides the real-to-complex forward transform (`rfft`), the
//! complex-to-real inverse (`irfft`), and the pure symmetry reconstruction
//! (`hermitian_extend`) in three layouts:
//!
//! - 1D: one signal.
//! - Row-wise: every row of a matrix is an independent signal, giving a
//!   `rows × (cols/2 + 1)` matrix of per-row half-spectra.
//! - 2D: the half-spectrum of the full 2D transform (rows `r2c`, then complex
//!   FFT down each kept column), where symmetry pairs `(i, j)` with
//!   `((rows - i) % rows, cols - j)`.
//!
//! Every inverse here is normalized by the number of samples it reconstructs
//! from: `N` per signal, `rows * cols` in 2D.

use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::fft::{validate_len, Complex, Direction, FftError, FftImpl, Float};
use crate::fft2d::{fft2d_inplace, ifft2d_normalized, validate_shape};
use crate::matrix::Matrix;

/// Number of non-redundant bins of a length-`n` real signal.
#[inline]
pub const fn half_len(n: usize) -> usize {
    n / 2 + 1
}

/// Rebuild a full length-`full.len()` spectrum from its first `half_len` bins.
pub fn hermitian_extend<T: Float>(
    half: &[Complex<T>],
    full: &mut [Complex<T>],
) -> Result<(), FftError> {
    let n = full.len();
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if half.len() != half_len(n) {
        return Err(FftError::MismatchedLengths);
    }
    let kept = half.len().min(n);
    full[..kept].copy_from_slice(&half[..kept]);
    for k in kept..n {
        full[k] = full[n - k].conj();
    }
    Ok(())
}

/// Real-to-complex forward transform using a caller-provided scratch buffer
/// of length `input.len()`.
pub fn rfft_with_scratch<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    input: &[T],
    output: &mut [Complex<T>],
    scratch: &mut [Complex<T>],
) -> Result<(), FftError> {
    let n = input.len();
    validate_len(n)?;
    if output.len() != half_len(n) || scratch.len() != n {
        return Err(FftError::MismatchedLengths);
    }
    for (slot, &x) in scratch.iter_mut().zip(input) {
        *slot = Complex::from_re(x);
    }
    fft.fft(scratch)?;
    let kept = output.len().min(n);
    output[..kept].copy_from_slice(&scratch[..kept]);
    Ok(())
}

/// Real-to-complex forward transform; `output` holds `half_len(input.len())` bins.
pub fn rfft<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    input: &[T],
    output: &mut [Complex<T>],
) -> Result<(), FftError> {
    let mut scratch = vec![Complex::zero(); input.len()];
    rfft_with_scratch(fft, input, output, &mut scratch)
}

/// Complex-to-real inverse using a caller-provided scratch buffer of length
/// `output.len()`. The result is normalized by `N`.
pub fn irfft_with_scratch<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    input: &[Complex<T>],
    output: &mut [T],
    scratch: &mut [Complex<T>],
) -> Result<(), FftError> {
    let n = output.len();
    validate_len(n)?;
    if scratch.len() != n {
        return Err(FftError::MismatchedLengths);
    }
    hermitian_extend(input, scratch)?;
    fft.process(scratch, Direction::Inverse)?;
    let inv = T::one() / T::from_usize(n).ok_or(FftError::InvalidValue)?;
    let mut residual = T::zero();
    for (out, c) in output.iter_mut().zip(scratch.iter()) {
        *out = c.re * inv;
        let im = (c.im * inv).abs();
        if im > residual {
            residual = im;
        }
    }
    debug!("irfft n = {}: max discarded imaginary part {:e}", n, residual);
    Ok(())
}

/// Complex-to-real inverse; `input` holds `half_len(output.len())` bins.
pub fn irfft<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    input: &[Complex<T>],
    output: &mut [T],
) -> Result<(), FftError> {
    let mut scratch = vec![Complex::zero(); output.len()];
    irfft_with_scratch(fft, input, output, &mut scratch)
}

/// Per-row half-spectra of a real matrix: `rows × half_len(cols)`.
pub fn rfft_rows<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    real: &Matrix<T>,
) -> Result<Matrix<Complex<T>>, FftError> {
    let (rows, cols) = real.shape();
    validate_len(cols)?;
    let mut out = Matrix::zeros_complex(rows, half_len(cols));
    let mut scratch = vec![Complex::zero(); cols];
    for (src, dst) in real.rows_iter().zip(out.rows_iter_mut()) {
        rfft_with_scratch(fft, src, dst, &mut scratch)?;
    }
    Ok(out)
}

/// Reconstruct each row's full spectrum (`cols` bins) from its half-spectrum.
pub fn hermitian_extend_rows<T: Float>(
    half: &Matrix<Complex<T>>,
    cols: usize,
) -> Result<Matrix<Complex<T>>, FftError> {
    if cols == 0 {
        return Err(FftError::EmptyInput);
    }
    if half.cols() != half_len(cols) {
        return Err(FftError::MismatchedLengths);
    }
    let mut full = Matrix::zeros_complex(half.rows(), cols);
    for (src, dst) in half.rows_iter().zip(full.rows_iter_mut()) {
        hermitian_extend(src, dst)?;
    }
    Ok(full)
}

/// Invert per-row half-spectra back to a `rows × cols` real matrix, each row
/// normalized by `cols`.
pub fn irfft_rows<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    half: &Matrix<Complex<T>>,
    cols: usize,
) -> Result<Matrix<T>, FftError> {
    validate_len(cols)?;
    if half.cols() != half_len(cols) {
        return Err(FftError::MismatchedLengths);
    }
    let mut out = Matrix::zeros(half.rows(), cols);
    let mut scratch = vec![Complex::zero(); cols];
    for (src, dst) in half.rows_iter().zip(out.rows_iter_mut()) {
        irfft_with_scratch(fft, src, dst, &mut scratch)?;
    }
    Ok(out)
}

/// Half-spectrum of the 2D transform of a real matrix: `rows × half_len(cols)`.
///
/// Equal to the first `half_len(cols)` columns of the full 2D FFT.
pub fn rfft2d<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    real: &Matrix<T>,
) -> Result<Matrix<Complex<T>>, FftError> {
    validate_shape(real)?;
    let mut half = rfft_rows(fft, real)?;
    let rows = half.rows();
    let mut col: Vec<Complex<T>> = vec![Complex::zero(); rows];
    for c in 0..half.cols() {
        half.gather_column(c, &mut col)?;
        fft.fft(&mut col)?;
        half.scatter_column(c, &col)?;
    }
    Ok(half)
}

/// Rebuild the full `rows × cols` 2D spectrum from a 2D half-spectrum using
/// `X[i][j] = conj(X[(rows - i) % rows][cols - j])`.
pub fn hermitian_extend_2d<T: Float>(
    half: &Matrix<Complex<T>>,
    cols: usize,
) -> Result<Matrix<Complex<T>>, FftError> {
    let rows = half.rows();
    if rows == 0 || cols == 0 {
        return Err(FftError::EmptyInput);
    }
    let kept = half_len(cols);
    if half.cols() != kept {
        return Err(FftError::MismatchedLengths);
    }
    let kept = kept.min(cols);
    let full = Matrix::from_fn(rows, cols, |i, j| {
        if j < kept {
            half[(i, j)]
        } else {
            half[((rows - i) % rows, cols - j)].conj()
        }
    });
    Ok(full)
}

/// Invert a 2D half-spectrum back to a `rows × cols` real matrix,
/// normalized by `rows * cols`.
pub fn irfft2d<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    half: &Matrix<Complex<T>>,
    cols: usize,
) -> Result<Matrix<T>, FftError> {
    let mut full = hermitian_extend_2d(half, cols)?;
    ifft2d_normalized(&mut full, fft)?;
    debug!(
        "irfft2d {}x{}: max discarded imaginary part {:e}",
        full.rows(),
        cols,
        full.max_abs_im()
    );
    Ok(full.re())
}

/// Full 2D spectrum of a real matrix via the complex path, for comparison
/// with [`rfft2d`].
pub fn full_spectrum_2d<T: Float, F: FftImpl<T> + ?Sized>(
    fft: &F,
    real: &Matrix<T>,
) -> Result<Matrix<Complex<T>>, FftError> {
    let mut grid = real.to_complex();
    fft2d_inplace(&mut grid, fft, Direction::Forward)?;
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fft::{Complex64, RecursiveFft};

    fn close(a: Complex64, b: Complex64, tol: f64) -> bool {
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol
    }

    #[test]
    fn half_len_values() {
        assert_eq!(half_len(1), 1);
        assert_eq!(half_len(2), 2);
        assert_eq!(half_len(8), 5);
        assert_eq!(half_len(6), 4);
    }

    #[test]
    fn extend_mirrors_conjugates() {
        let half = [
            Complex64::new(10.0, 0.0),
            Complex64::new(1.0, 2.0),
            Complex64::new(3.0, -4.0),
            Complex64::new(-2.0, 0.0),
        ];
        let mut full = [Complex64::zero(); 6];
        hermitian_extend(&half, &mut full).unwrap();
        assert_eq!(full[4], Complex64::new(3.0, 4.0));
        assert_eq!(full[5], Complex64::new(1.0, -2.0));
        assert_eq!(&full[..4], &half);
    }

    #[test]
    fn extend_rejects_wrong_half() {
        let half = [Complex64::zero(); 3];
        let mut full = [Complex64::zero(); 8];
        assert_eq!(
            hermitian_extend(&half, &mut full),
            Err(FftError::MismatchedLengths)
        );
    }

    #[test]
    fn rfft_matches_complex_fft() {
        let fft = RecursiveFft::<f64>::default();
        let input = [0.5, -1.0, 2.0, 0.25, 3.0, -0.75, 1.5, 0.0];
        let mut half = [Complex64::zero(); 5];
        rfft(&fft, &input, &mut half).unwrap();
        let mut full: Vec<Complex64> = input.iter().map(|&x| Complex64::from_re(x)).collect();
        fft.fft(&mut full).unwrap();
        for k in 0..5 {
            assert!(close(half[k], full[k], 1e-12));
        }
        assert!(half[0].im.abs() < 1e-12);
        assert!(half[4].im.abs() < 1e-12);
    }

    #[test]
    fn rfft_irfft_roundtrip() {
        let fft = RecursiveFft::<f64>::default();
        let input: Vec<f64> = (0..32).map(|i| ((i * 13) % 7) as f64 - 3.0).collect();
        let mut half = vec![Complex64::zero(); half_len(32)];
        rfft(&fft, &input, &mut half).unwrap();
        let mut back = vec![0.0; 32];
        irfft(&fft, &half, &mut back).unwrap();
        for (a, b) in input.iter().zip(&back) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn rfft_length_one() {
        let fft = RecursiveFft::<f64>::default();
        let mut half = [Complex64::zero(); 1];
        rfft(&fft, &[4.0], &mut half).unwrap();
        assert_eq!(half[0], Complex64::new(4.0, 0.0));
        let mut back = [0.0];
        irfft(&fft, &half, &mut back).unwrap();
        assert_eq!(back[0], 4.0);
    }

    #[test]
    fn rfft_rejects_bad_sizes() {
        let fft = RecursiveFft::<f64>::default();
        let mut half = [Complex64::zero(); 4];
        assert_eq!(
            rfft(&fft, &[1.0; 6], &mut half),
            Err(FftError::NonPowerOfTwo)
        );
        let mut short = [Complex64::zero(); 3];
        assert_eq!(
            rfft(&fft, &[1.0; 8], &mut short),
            Err(FftError::MismatchedLengths)
        );
    }

    #[test]
    fn rfft2d_is_left_half_of_fft2d() {
        let fft = RecursiveFft::<f64>::default();
        let real = Matrix::from_fn(4, 8, |i, j| ((i * 5 + j * 3) % 11) as f64 * 0.5 - 2.0);
        let full = full_spectrum_2d(&fft, &real).unwrap();
        let half = rfft2d(&fft, &real).unwrap();
        assert_eq!(half.shape(), (4, 5));
        for i in 0..4 {
            for j in 0..5 {
                assert!(close(half[(i, j)], full[(i, j)], 1e-10));
            }
        }
        let rebuilt = hermitian_extend_2d(&half, 8).unwrap();
        for (a, b) in rebuilt.as_slice().iter().zip(full.as_slice()) {
            assert!(close(*a, *b, 1e-10));
        }
    }

    #[test]
    fn irfft2d_roundtrip() {
        let fft = RecursiveFft::<f64>::default();
        let real = Matrix::from_fn(8, 4, |i, j| (i as f64 - 3.5) * (j as f64 + 0.25));
        let half = rfft2d(&fft, &real).unwrap();
        let back = irfft2d(&fft, &half, 4).unwrap();
        for (a, b) in real.as_slice().iter().zip(back.as_slice()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn rows_roundtrip() {
        let fft = RecursiveFft::<f64>::default();
        let real = Matrix::from_fn(3, 8, |i, j| (i * 8 + j) as f64);
        let half = rfft_rows(&fft, &real).unwrap();
        assert_eq!(half.shape(), (3, 5));
        let back = irfft_rows(&fft, &half, 8).unwrap();
        for (a, b) in real.as_slice().iter().zip(back.as_slice()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
