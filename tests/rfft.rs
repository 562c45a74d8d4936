use radix2d::fft::{Complex64, FftError, FftImpl, RecursiveFft};
use radix2d::fft2d::fft2d;
use radix2d::rfft::{
    half_len, hermitian_extend, hermitian_extend_2d, hermitian_extend_rows, irfft, irfft2d,
    irfft_rows, rfft, rfft2d, rfft_rows,
};
use radix2d::signal::gaussian_matrix;
use radix2d::{compare_complex, compare_real, Matrix, DEFAULT_RELATIVE_THRESHOLD};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn assert_close(a: Complex64, b: Complex64, tol: f64) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{:?} vs {:?}",
        a,
        b
    );
}

/// Row-wise complex spectrum of a real matrix.
fn row_spectra(fft: &RecursiveFft<f64>, real: &Matrix<f64>) -> Matrix<Complex64> {
    let mut out = real.to_complex();
    for r in 0..out.rows() {
        fft.fft(out.row_mut(r)).unwrap();
    }
    out
}

#[test]
fn row_spectra_are_hermitian() {
    let fft = RecursiveFft::<f64>::default();
    let n = 16;
    let real: Matrix<f64> = gaussian_matrix(n, n, 0.0, 1.0, StdRng::seed_from_u64(11));
    let spec = row_spectra(&fft, &real);
    for i in 0..n {
        for j in n / 2 + 1..n {
            assert_close(spec[(i, n - j)], spec[(i, j)].conj(), 1e-12);
        }
    }
}

#[test]
fn full_2d_spectrum_is_hermitian() {
    let fft = RecursiveFft::<f64>::default();
    let n = 16;
    let real: Matrix<f64> = gaussian_matrix(n, n, 0.0, 1.0, StdRng::seed_from_u64(12));
    let spec = fft2d(&real, &fft).unwrap();
    for i in 0..n {
        for j in 0..n {
            let mirror = spec[((n - i) % n, (n - j) % n)];
            assert_close(spec[(i, j)], mirror.conj(), 1e-10);
        }
    }
}

#[test]
fn half_spectrum_rows_rebuild_full_rows() {
    let fft = RecursiveFft::<f64>::default();
    let real: Matrix<f64> = gaussian_matrix(8, 32, 1.0, 1.0, StdRng::seed_from_u64(13));
    let half = rfft_rows(&fft, &real).unwrap();
    assert_eq!(half.shape(), (8, half_len(32)));
    let rebuilt = hermitian_extend_rows(&half, 32).unwrap();
    let expected = row_spectra(&fft, &real);
    let report = compare_complex(expected.as_slice(), rebuilt.as_slice(), 1e-10).unwrap();
    assert!(report.max_abs < 1e-10, "{}", report);
}

#[test]
fn half_spectrum_2d_rebuilds_full_2d() {
    let fft = RecursiveFft::<f64>::default();
    let real: Matrix<f64> = gaussian_matrix(16, 16, 0.0, 1.0, StdRng::seed_from_u64(14));
    let half = rfft2d(&fft, &real).unwrap();
    assert_eq!(half.shape(), (16, 9));
    let rebuilt = hermitian_extend_2d(&half, 16).unwrap();
    let expected = fft2d(&real, &fft).unwrap();
    for (a, b) in rebuilt.as_slice().iter().zip(expected.as_slice()) {
        assert_close(*a, *b, 1e-10);
    }
}

#[test]
fn real_paths_roundtrip() {
    let _ = env_logger::builder().is_test(true).try_init();
    let fft = RecursiveFft::<f64>::default();
    let real: Matrix<f64> = gaussian_matrix(32, 32, 0.0, 1.0, StdRng::seed_from_u64(15));

    let back_2d = irfft2d(&fft, &rfft2d(&fft, &real).unwrap(), 32).unwrap();
    let report = compare_real(real.as_slice(), back_2d.as_slice(), DEFAULT_RELATIVE_THRESHOLD).unwrap();
    assert!(report.mean_abs < 1e-13, "{}", report);

    let back_rows = irfft_rows(&fft, &rfft_rows(&fft, &real).unwrap(), 32).unwrap();
    let report =
        compare_real(real.as_slice(), back_rows.as_slice(), DEFAULT_RELATIVE_THRESHOLD).unwrap();
    assert!(report.mean_abs < 1e-13, "{}", report);
}

#[test]
fn one_dimensional_nyquist_and_dc_are_real() {
    let fft = RecursiveFft::<f64>::default();
    let input: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).cos() + 0.5).collect();
    let mut half = vec![Complex64::zero(); half_len(64)];
    rfft(&fft, &input, &mut half).unwrap();
    assert!(half[0].im.abs() < 1e-12);
    assert!(half[32].im.abs() < 1e-12);
    let sum: f64 = input.iter().sum();
    assert!((half[0].re - sum).abs() < 1e-10);

    let mut back = vec![0.0; 64];
    irfft(&fft, &half, &mut back).unwrap();
    for (a, b) in input.iter().zip(&back) {
        assert!((a - b).abs() < 1e-12);
    }
}

#[test]
fn extension_is_pure() {
    // no transform involved: reconstruction only mirrors the stored bins
    let half = [
        Complex64::new(1.0, 0.0),
        Complex64::new(2.0, 3.0),
        Complex64::new(4.0, 0.0),
    ];
    let mut full = [Complex64::zero(); 4];
    hermitian_extend(&half, &mut full).unwrap();
    assert_eq!(
        full,
        [
            Complex64::new(1.0, 0.0),
            Complex64::new(2.0, 3.0),
            Complex64::new(4.0, 0.0),
            Complex64::new(2.0, -3.0),
        ]
    );
}

#[test]
fn shape_errors() {
    let fft = RecursiveFft::<f64>::default();
    let real = Matrix::<f64>::zeros(6, 6);
    assert_eq!(rfft2d(&fft, &real).unwrap_err(), FftError::NonPowerOfTwo);
    let half = Matrix::<Complex64>::zeros_complex(4, 3);
    assert_eq!(
        hermitian_extend_2d(&half, 8).unwrap_err(),
        FftError::MismatchedLengths
    );
    assert_eq!(
        irfft_rows(&fft, &half, 8).unwrap_err(),
        FftError::MismatchedLengths
    );
    let mut out = vec![0.0; 8];
    assert_eq!(
        irfft(&fft, &[Complex64::zero(); 4], &mut out),
        Err(FftError::MismatchedLengths)
    );
}
