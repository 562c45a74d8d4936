use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use radix2d::fft::{Complex64, Direction, RecursiveFft};
use radix2d::fft2d::fft2d_inplace_with_scratch;
use radix2d::rfft::{irfft2d, rfft2d};
use radix2d::signal::gaussian_matrix;
use radix2d::Matrix;

fn bench_fft2d(c: &mut Criterion) {
    let mut group = c.benchmark_group("fft2d");
    let fft = RecursiveFft::<f64>::default();
    for n in [64usize, 256, 1024] {
        let real: Matrix<f64> = gaussian_matrix(n, n, 0.0, 1.0, StdRng::seed_from_u64(n as u64));
        let input = real.to_complex();
        let mut grid = input.clone();
        let mut col = vec![Complex64::zero(); n];
        group.bench_with_input(BenchmarkId::new("c2c", n), &n, |b, _| {
            b.iter(|| {
                grid.as_mut_slice().copy_from_slice(input.as_slice());
                fft2d_inplace_with_scratch(&mut grid, &fft, Direction::Forward, &mut col).unwrap();
            });
        });
        group.bench_with_input(BenchmarkId::new("r2c", n), &n, |b, _| {
            b.iter(|| rfft2d(&fft, &real).unwrap());
        });
        let half = rfft2d(&fft, &real).unwrap();
        group.bench_with_input(BenchmarkId::new("c2r", n), &n, |b, _| {
            b.iter(|| irfft2d(&fft, &half, n).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_fft2d);
criterion_main!(benches);
