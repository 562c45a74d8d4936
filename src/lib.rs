//! # radix2d - recursive radix-2 FFT in one and two dimensions
//!
//! A compact Cooley–Tukey FFT engine for power-of-two grids, with the
//! real-input optimizations that make 2D spectra of real data cheap to store.
//!
//! ## Features
//!
//! - **Recursive radix-2 FFT** over slices, no per-level allocation
//! - **2D transforms** (rows, then columns) on flat row-major [`Matrix`] buffers
//! - **Real-input transforms** storing only the `N/2 + 1` non-redundant bins,
//!   with Hermitian reconstruction of the full spectrum
//! - **Round-trip metrics**: RMS and median absolute/relative error
//! - **Test signals and text files**: Box–Muller Gaussian matrices and a plain
//!   text format for matrices and spectra
//!
//! ## Cargo Features
//!
//! - `std` (default): `std::error::Error` impls and the [`textio`] module.
//!   Without it the crate is `no_std` + `alloc`.
//!
//! ## Conventions
//!
//! - Forward transforms use `exp(-2πi·k/N)`, inverse `exp(+2πi·k/N)`.
//! - Raw transforms never normalize. Every normalized inverse divides by the
//!   number of samples it reconstructs: `N` in 1D, `rows * cols` in 2D.
//!
//! ## Example
//!
//! ```
//! use radix2d::fft::{Complex64, FftImpl, RecursiveFft};
//!
//! let fft = RecursiveFft::<f64>::default();
//! let mut data = vec![Complex64::new(1.0, 0.0), Complex64::zero(), Complex64::zero(), Complex64::zero()];
//! fft.fft(&mut data).unwrap();
//! assert!(data.iter().all(|c| (c.re - 1.0).abs() < 1e-12 && c.im.abs() < 1e-12));
//! fft.ifft_normalized(&mut data).unwrap();
//! assert!((data[0].re - 1.0).abs() < 1e-12);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

/// Complex sample type and the float abstraction behind it.
pub mod num;

pub mod fft;

/// Flat row-major matrices for signals and spectra.
pub mod matrix;

/// Two-dimensional FFT
///
/// Row-column transform over [`Matrix`] grids.
pub mod fft2d;

/// Real-input FFT helpers built on top of complex FFT routines
/// for converting between real and complex domains.
pub mod rfft;

pub mod metrics;

/// Gaussian test signals
pub mod signal;

/// Text serialization of matrices and spectra
#[cfg(feature = "std")]
pub mod textio;

pub use fft::{Direction, FftError, FftImpl, FftPlanner, RecursiveFft};
pub use matrix::Matrix;
pub use metrics::{compare_complex, compare_real, ErrorReport, DEFAULT_RELATIVE_THRESHOLD};
pub use num::{Complex, Complex32, Complex64, Float};
