//! Gaussian test signals.
//!
//! [`BoxMuller`] turns a uniform source into standard normal samples two at a
//! time and hands them out one by one.

use rand::Rng;

use crate::matrix::Matrix;
use crate::num::Float;

pub struct BoxMuller<R: Rng> {
    rng: R,
    spare: Option<f64>,
}

impl<R: Rng> BoxMuller<R> {
    pub fn new(rng: R) -> Self {
        Self { rng, spare: None }
    }

    /// Next standard normal sample (mean 0, standard deviation 1).
    pub fn next_standard(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }
        // u1 in (0, 1] keeps ln finite
        let u1 = 1.0 - self.rng.gen::<f64>();
        let u2 = self.rng.gen::<f64>();
        let radius = libm::sqrt(-2.0 * libm::log(u1));
        let (sin, cos) = libm::sincos(2.0 * core::f64::consts::PI * u2);
        self.spare = Some(radius * sin);
        radius * cos
    }

    pub fn next_normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        mean + std_dev * self.next_standard()
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

/// `rows × cols` matrix of independent normal samples.
pub fn gaussian_matrix<T: Float, R: Rng>(
    rows: usize,
    cols: usize,
    mean: f64,
    std_dev: f64,
    rng: R,
) -> Matrix<T> {
    let mut source = BoxMuller::new(rng);
    Matrix::from_fn(rows, cols, |_, _| {
        T::from_f64(source.next_normal(mean, std_dev))
    })
}
