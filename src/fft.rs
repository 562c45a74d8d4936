//! Recursive radix-2 Fast Fourier Transform.
//!
//! This module implements the complex FFT on top of the
//! [Cooley–Tukey algorithm](https://en.wikipedia.org/wiki/Cooley%E2%80%93Tukey_FFT_algorithm)
//! in its recursive decimation-in-time form. A [`FftPlanner`] caches twiddle
//! factors per transform length and lends out a scratch buffer, so repeated
//! transforms of the same size (every row and column of a 2D grid) allocate
//! nothing after the first call.
//!
//! Transforms are unnormalized in both directions; scaling the inverse by
//! `1/N` is left to the caller (see [`FftImpl::ifft_normalized`]).

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use log::debug;

pub use crate::num::{Complex, Complex32, Complex64, Float};

/// Sign convention of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `exp(-2πi·k/N)` twiddles.
    Forward,
    /// `exp(+2πi·k/N)` twiddles, no normalization.
    Inverse,
}

impl Direction {
    /// The opposite direction.
    pub fn reverse(self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    EmptyInput,
    NonPowerOfTwo,
    MismatchedLengths,
    InvalidValue,
}

impl fmt::Display for FftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("transform input is empty"),
            Self::NonPowerOfTwo => f.write_str("invalid transform size: length must be a power of two"),
            Self::MismatchedLengths => f.write_str("input and output lengths do not match"),
            Self::InvalidValue => f.write_str("transform size is not representable in the sample type"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FftError {}

/// Check that `n` is a usable transform length.
pub fn validate_len(n: usize) -> Result<(), FftError> {
    if n == 0 {
        return Err(FftError::EmptyInput);
    }
    if !n.is_power_of_two() {
        return Err(FftError::NonPowerOfTwo);
    }
    Ok(())
}

pub struct FftPlanner<T: Float> {
    /// Twiddle tables keyed by transform length `n`. The table for `n` has
    /// `n/2` elements representing `exp(-2πi k / n)` for `k = 0..n/2`.
    cache: HashMap<usize, Arc<[Complex<T>]>>,
    scratch: Vec<Complex<T>>,
}

impl<T: Float> Default for FftPlanner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> FftPlanner<T> {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            scratch: Vec::new(),
        }
    }

    /// Retrieve the forward twiddle table for length `n`.
    pub fn get_twiddles(&mut self, n: usize) -> Result<Arc<[Complex<T>]>, FftError> {
        if let Some(table) = self.cache.get(&n) {
            return Ok(Arc::clone(table));
        }
        let len = T::from_usize(n).ok_or(FftError::InvalidValue)?;
        let two_pi = T::from_f64(2.0) * T::PI;
        let mut table: Vec<Complex<T>> = Vec::with_capacity(n / 2);
        for k in 0..n / 2 {
            let k = T::from_usize(k).ok_or(FftError::InvalidValue)?;
            table.push(Complex::expi(-(two_pi * k / len)));
        }
        debug!("built twiddle table for n = {}", n);
        let table: Arc<[Complex<T>]> = Arc::from(table);
        self.cache.insert(n, Arc::clone(&table));
        Ok(table)
    }

    /// Number of cached twiddle tables.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

pub trait FftImpl<T: Float> {
    /// Unnormalized in-place transform in the given direction.
    fn process(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError>;

    fn fft(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process(data, Direction::Forward)
    }

    /// Raw inverse transform; the result is `N` times the original signal.
    fn ifft(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.process(data, Direction::Inverse)
    }

    /// Inverse transform scaled by `1/N`.
    fn ifft_normalized(&self, data: &mut [Complex<T>]) -> Result<(), FftError> {
        self.ifft(data)?;
        let n = T::from_usize(data.len()).ok_or(FftError::InvalidValue)?;
        scale_inplace(data, T::one() / n);
        Ok(())
    }

    fn fft_out_of_place(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::MismatchedLengths);
        }
        output.copy_from_slice(input);
        self.fft(output)
    }

    fn ifft_out_of_place(
        &self,
        input: &[Complex<T>],
        output: &mut [Complex<T>],
    ) -> Result<(), FftError> {
        if input.len() != output.len() {
            return Err(FftError::MismatchedLengths);
        }
        output.copy_from_slice(input);
        self.ifft(output)
    }
}

/// Recursive Cooley–Tukey FFT for power-of-two lengths.
///
/// Holds its planner in a `RefCell`, so one instance serves a single thread.
pub struct RecursiveFft<T: Float> {
    planner: RefCell<FftPlanner<T>>,
}

impl<T: Float> Default for RecursiveFft<T> {
    fn default() -> Self {
        Self {
            planner: RefCell::new(FftPlanner::new()),
        }
    }
}

impl<T: Float> RecursiveFft<T> {
    pub fn with_planner(planner: FftPlanner<T>) -> Self {
        Self {
            planner: RefCell::new(planner),
        }
    }

    /// Consume the transform and hand back its planner.
    pub fn into_planner(self) -> FftPlanner<T> {
        self.planner.into_inner()
    }
}

impl<T: Float> FftImpl<T> for RecursiveFft<T> {
    fn process(&self, data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
        let n = data.len();
        validate_len(n)?;
        if n == 1 {
            return Ok(());
        }

        let (twiddles, mut scratch) = {
            let mut planner = self.planner.borrow_mut();
            let twiddles = planner.get_twiddles(n)?;
            let scratch = core::mem::take(&mut planner.scratch);
            (twiddles, scratch)
        };

        scratch.clear();
        scratch.extend_from_slice(data);
        recurse(&scratch, 1, data, &twiddles, direction);

        // Return scratch to planner for reuse.
        self.planner.borrow_mut().scratch = scratch;
        Ok(())
    }
}

/// Transform the strided view `input[0], input[stride], ...` into `output`.
///
/// `twiddles` is the table of the top-level length; a sub-transform of
/// length `n = N / stride` reads its `k`-th twiddle at `k * stride`.
fn recurse<T: Float>(
    input: &[Complex<T>],
    stride: usize,
    output: &mut [Complex<T>],
    twiddles: &[Complex<T>],
    direction: Direction,
) {
    let n = output.len();
    if n == 1 {
        output[0] = input[0];
        return;
    }
    let half = n / 2;
    let (even, odd) = output.split_at_mut(half);
    recurse(input, stride * 2, even, twiddles, direction);
    recurse(&input[stride..], stride * 2, odd, twiddles, direction);

    for k in 0..half {
        let w = match direction {
            Direction::Forward => twiddles[k * stride],
            Direction::Inverse => twiddles[k * stride].conj(),
        };
        let t = w * odd[k];
        let e = even[k];
        even[k] = e + t;
        odd[k] = e - t;
    }
}

/// One-shot transform without keeping a planner around.
pub fn fft_inplace<T: Float>(data: &mut [Complex<T>], direction: Direction) -> Result<(), FftError> {
    RecursiveFft::<T>::default().process(data, direction)
}

/// Scale every sample by `factor`.
pub fn scale_inplace<T: Float>(data: &mut [Complex<T>], factor: T) {
    for c in data.iter_mut() {
        *c = c.scale(factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn impulse_is_flat() {
        let fft = RecursiveFft::<f64>::default();
        let mut data = vec![
            Complex64::new(1.0, 0.0),
            Complex64::zero(),
            Complex64::zero(),
            Complex64::zero(),
        ];
        fft.fft(&mut data).unwrap();
        for c in &data {
            assert!((c.re - 1.0).abs() < 1e-12, "re = {}", c.re);
            assert!(c.im.abs() < 1e-12, "im = {}", c.im);
        }
        fft.ifft_normalized(&mut data).unwrap();
        assert!((data[0].re - 1.0).abs() < 1e-12);
        for c in &data[1..] {
            assert!(c.re.abs() < 1e-12);
            assert!(c.im.abs() < 1e-12);
        }
    }

    #[test]
    fn single_sample_is_identity() {
        let fft = RecursiveFft::<f64>::default();
        let mut data = vec![Complex64::new(3.5, -1.25)];
        fft.fft(&mut data).unwrap();
        assert_eq!(data[0], Complex64::new(3.5, -1.25));
        fft.ifft(&mut data).unwrap();
        assert_eq!(data[0], Complex64::new(3.5, -1.25));
    }

    #[test]
    fn forward_sign_convention() {
        // x[n] = exp(2πi n/N) concentrates in bin 1 with exp(-2πi k n/N) kernels
        let n = 8;
        let mut data: Vec<Complex64> = (0..n)
            .map(|i| Complex64::expi(2.0 * core::f64::consts::PI * i as f64 / n as f64))
            .collect();
        fft_inplace(&mut data, Direction::Forward).unwrap();
        assert!((data[1].re - n as f64).abs() < 1e-9);
        for (k, c) in data.iter().enumerate() {
            if k != 1 {
                assert!(c.norm() < 1e-9, "bin {} = {:?}", k, c);
            }
        }
    }

    #[test]
    fn rejects_bad_lengths() {
        let fft = RecursiveFft::<f32>::default();
        let mut empty: [Complex32; 0] = [];
        assert_eq!(fft.fft(&mut empty), Err(FftError::EmptyInput));
        let mut three = vec![Complex32::zero(); 3];
        assert_eq!(fft.fft(&mut three), Err(FftError::NonPowerOfTwo));
        let mut out = vec![Complex32::zero(); 4];
        assert_eq!(
            fft.fft_out_of_place(&three, &mut out),
            Err(FftError::MismatchedLengths)
        );
    }

    #[test]
    fn planner_reuses_tables() {
        let fft = RecursiveFft::<f64>::default();
        let mut a = vec![Complex64::new(1.0, 2.0); 16];
        let mut b = vec![Complex64::new(-1.0, 0.5); 16];
        fft.fft(&mut a).unwrap();
        fft.ifft(&mut b).unwrap();
        let planner = fft.into_planner();
        assert_eq!(planner.cache_len(), 1);
    }

    #[test]
    fn direction_reverse() {
        assert_eq!(Direction::Forward.reverse(), Direction::Inverse);
        assert_eq!(Direction::Inverse.reverse(), Direction::Forward);
    }

    #[test]
    fn normalized_inverse_is_scaled_raw_inverse() {
        let fft = RecursiveFft::<f64>::default();
        let input: Vec<Complex64> = (0..8)
            .map(|k| Complex64::new(k as f64, 1.0 - k as f64))
            .collect();
        let mut raw = input.clone();
        fft.ifft(&mut raw).unwrap();
        scale_inplace(&mut raw, 0.125);
        let mut normalized = input;
        fft.ifft_normalized(&mut normalized).unwrap();
        assert_eq!(raw, normalized);
    }
}
