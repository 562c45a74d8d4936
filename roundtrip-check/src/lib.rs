use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use log::info;
use radix2d::fft2d::{fft2d, ifft2d_real};
use radix2d::rfft::{hermitian_extend_2d, irfft2d, rfft2d};
use radix2d::signal::gaussian_matrix;
use radix2d::textio::{save_complex, save_real};
use radix2d::{
    compare_complex, compare_real, Complex64, ErrorReport, Float, Matrix,
    RecursiveFft,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustfft::num_complex::Complex as RustComplex;
use rustfft::FftPlanner;

/// Everything one round-trip run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub size: usize,
    pub seed: Option<u64>,
    pub mean: f64,
    pub std_dev: f64,
    pub threshold: f64,
    pub bonus_size: usize,
    pub output_dir: Option<PathBuf>,
    pub oracle: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            size: 1024,
            seed: None,
            mean: 0.0,
            std_dev: 1.0,
            threshold: radix2d::DEFAULT_RELATIVE_THRESHOLD,
            bonus_size: 8,
            output_dir: None,
            oracle: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summary {
    pub size: usize,
    pub c2c: ErrorReport,
    pub r2c: ErrorReport,
    pub c00: Complex64,
    pub r00: Complex64,
    pub bonus_size: usize,
    pub bonus: ErrorReport,
    pub oracle: Option<ErrorReport>,
    pub timings: Vec<(&'static str, Duration)>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Errors for c2c FFT ({0}x{0}):", self.size)?;
        writeln!(f, "{}", self.c2c)?;
        writeln!(f)?;
        writeln!(f, "Errors for r2c FFT ({0}x{0}):", self.size)?;
        writeln!(f, "{}", self.r2c)?;
        writeln!(f)?;
        writeln!(f, "Machine epsilon for f64: {:e}", <f64 as Float>::EPSILON)?;
        writeln!(f, "C[0,0] = {:e} + i{:e}", self.c00.re, self.c00.im)?;
        writeln!(f, "R[0,0] = {:e} + i{:e}", self.r00.re, self.r00.im)?;
        writeln!(f)?;
        writeln!(
            f,
            "Full spectrum rebuilt from half-spectrum ({0}x{0}):",
            self.bonus_size
        )?;
        writeln!(f, "{}", self.bonus)?;
        if let Some(oracle) = &self.oracle {
            writeln!(f)?;
            writeln!(f, "Spectrum vs rustfft:")?;
            writeln!(f, "{}", oracle)?;
        }
        writeln!(f)?;
        writeln!(f, "Timings:")?;
        for (stage, elapsed) in &self.timings {
            writeln!(f, "  {:<16} {:.6} s", stage, elapsed.as_secs_f64())?;
        }
        Ok(())
    }
}

/// Seeded generator when a seed is given, entropy otherwise.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// 2D forward transform through rustfft, rows then columns.
pub fn rustfft_2d(real: &Matrix<f64>) -> Matrix<Complex64> {
    let (rows, cols) = real.shape();
    let mut planner = FftPlanner::<f64>::new();
    let row_fft = planner.plan_fft_forward(cols);
    let col_fft = planner.plan_fft_forward(rows);
    let mut buf: Vec<RustComplex<f64>> = real
        .as_slice()
        .iter()
        .map(|&x| RustComplex::new(x, 0.0))
        .collect();
    for row in buf.chunks_mut(cols.max(1)) {
        row_fft.process(row);
    }
    let mut col = vec![RustComplex::new(0.0, 0.0); rows];
    for c in 0..cols {
        for (r, slot) in col.iter_mut().enumerate() {
            *slot = buf[r * cols + c];
        }
        col_fft.process(&mut col);
        for (r, v) in col.iter().enumerate() {
            buf[r * cols + c] = *v;
        }
    }
    Matrix::from_fn(rows, cols, |i, j| {
        let c = buf[i * cols + j];
        Complex64::new(c.re, c.im)
    })
}

struct Stopwatch {
    timings: Vec<(&'static str, Duration)>,
}

impl Stopwatch {
    fn time<R>(&mut self, stage: &'static str, f: impl FnOnce() -> R) -> R {
        let start = Instant::now();
        let out = f();
        let elapsed = start.elapsed();
        info!("{} took {:.6} s", stage, elapsed.as_secs_f64());
        self.timings.push((stage, elapsed));
        out
    }
}

fn save_to(dir: Option<&Path>, name: &str, save: impl FnOnce(&Path) -> std::io::Result<()>) -> Result<()> {
    if let Some(dir) = dir {
        let path = dir.join(name);
        save(&path).with_context(|| format!("writing {}", path.display()))?;
        info!("saved {}", path.display());
    }
    Ok(())
}

/// Generate, transform, reconstruct and measure.
pub fn run(config: &RunConfig) -> Result<Summary> {
    ensure!(
        config.size.is_power_of_two(),
        "size {} is not a power of two",
        config.size
    );
    ensure!(
        config.bonus_size.is_power_of_two(),
        "bonus size {} is not a power of two",
        config.bonus_size
    );
    ensure!(
        config.threshold >= 0.0,
        "threshold {} must be a non-negative number",
        config.threshold
    );
    let out_dir = config.output_dir.as_deref();
    if let Some(dir) = out_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let fft = RecursiveFft::<f64>::default();
    let mut watch = Stopwatch {
        timings: Vec::new(),
    };
    let mut rng = make_rng(config.seed);
    let n = config.size;

    info!("generating {}x{} Gaussian matrix", n, n);
    let a: Matrix<f64> = watch.time("generate", || {
        gaussian_matrix(n, n, config.mean, config.std_dev, &mut rng)
    });
    save_to(out_dir, "A.txt", |p| save_real(&a, p))?;

    info!("c2c forward");
    let c = watch
        .time("c2c forward", || fft2d(&a, &fft))
        .context("c2c forward transform")?;
    save_to(out_dir, "C.txt", |p| save_complex(&c, p))?;
    let c00 = c[(0, 0)];

    let oracle = if config.oracle {
        info!("rustfft reference transform");
        let reference = watch.time("rustfft forward", || rustfft_2d(&a));
        Some(compare_complex(
            reference.as_slice(),
            c.as_slice(),
            config.threshold,
        )?)
    } else {
        None
    };

    info!("c2c inverse");
    let a_c2c = watch
        .time("c2c inverse", || ifft2d_real(c, &fft))
        .context("c2c inverse transform")?;
    save_to(out_dir, "A_reconstructed_c2c.txt", |p| save_real(&a_c2c, p))?;
    let c2c = compare_real(a.as_slice(), a_c2c.as_slice(), config.threshold)?;

    info!("r2c forward");
    let r = watch
        .time("r2c forward", || rfft2d(&fft, &a))
        .context("r2c forward transform")?;
    save_to(out_dir, "R.txt", |p| save_complex(&r, p))?;
    let r00 = r[(0, 0)];

    info!("c2r inverse");
    let a_r2c = watch
        .time("c2r inverse", || irfft2d(&fft, &r, n))
        .context("c2r inverse transform")?;
    save_to(out_dir, "A_reconstructed_r2c.txt", |p| save_real(&a_r2c, p))?;
    let r2c = compare_real(a.as_slice(), a_r2c.as_slice(), config.threshold)?;

    let b = config.bonus_size;
    info!("rebuilding {}x{} spectrum from its half", b, b);
    let small: Matrix<f64> = gaussian_matrix(b, b, config.mean, config.std_dev, &mut rng);
    let small_c = fft2d(&small, &fft).context("small c2c forward transform")?;
    let small_r = rfft2d(&fft, &small).context("small r2c forward transform")?;
    let small_c_from_r = hermitian_extend_2d(&small_r, b).context("rebuilding small spectrum")?;
    save_to(out_dir, "A_small.txt", |p| save_real(&small, p))?;
    save_to(out_dir, "C_small.txt", |p| save_complex(&small_c, p))?;
    save_to(out_dir, "R_small.txt", |p| save_complex(&small_r, p))?;
    save_to(out_dir, "C_small_from_R.txt", |p| save_complex(&small_c_from_r, p))?;
    let bonus = compare_complex(
        small_c.as_slice(),
        small_c_from_r.as_slice(),
        config.threshold,
    )?;

    Ok(Summary {
        size: n,
        c2c,
        r2c,
        c00,
        r00,
        bonus_size: b,
        bonus,
        oracle,
        timings: watch.timings,
    })
}
