//! Plain-text matrix files.
//!
//! One matrix row per line, entries separated by a single space. Real entries
//! are written with `{:e}`; complex entries as one `<re>+i<im>` token, e.g.
//! `1.5e0+i-2e-1`. Rust's shortest round-trip formatting makes
//! write-then-read exact.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::matrix::Matrix;
use crate::num::{Complex, Float};

#[derive(Debug)]
pub enum TextIoError {
    Io(io::Error),
    Parse { line: usize, token: String },
    Ragged { line: usize, expected: usize, found: usize },
}

impl fmt::Display for TextIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {}", e),
            Self::Parse { line, token } => {
                write!(f, "line {}: cannot parse {:?} as a number", line, token)
            }
            Self::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {}: expected {} entries, found {}",
                line, expected, found
            ),
        }
    }
}

impl std::error::Error for TextIoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TextIoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Separator between the real and imaginary halves of a complex token.
const IMAG_MARK: &str = "+i";

pub fn format_complex<T: Float>(c: Complex<T>) -> String {
    format!("{:e}{}{:e}", c.re, IMAG_MARK, c.im)
}

pub fn parse_complex<T: Float>(token: &str) -> Option<Complex<T>> {
    let (re, im) = token.split_once(IMAG_MARK)?;
    Some(Complex::new(re.parse().ok()?, im.parse().ok()?))
}

pub fn write_real<T: Float, W: Write>(matrix: &Matrix<T>, out: W) -> io::Result<()> {
    write_rows(matrix, out, |w, x| write!(w, "{:e}", x))
}

pub fn write_complex<T: Float, W: Write>(matrix: &Matrix<Complex<T>>, out: W) -> io::Result<()> {
    write_rows(matrix, out, |w, c| w.write_all(format_complex(c).as_bytes()))
}

fn write_rows<E: Copy, W: Write>(
    matrix: &Matrix<E>,
    out: W,
    mut entry: impl FnMut(&mut BufWriter<W>, E) -> io::Result<()>,
) -> io::Result<()> {
    let mut w = BufWriter::new(out);
    for i in 0..matrix.rows() {
        for (j, &e) in matrix.row(i).iter().enumerate() {
            if j > 0 {
                w.write_all(b" ")?;
            }
            entry(&mut w, e)?;
        }
        w.write_all(b"\n")?;
    }
    w.flush()
}

pub fn read_real<T: Float, R: BufRead>(input: R) -> Result<Matrix<T>, TextIoError> {
    read_rows(input, |tok| tok.parse().ok())
}

pub fn read_complex<T: Float, R: BufRead>(input: R) -> Result<Matrix<Complex<T>>, TextIoError> {
    read_rows(input, parse_complex)
}

fn read_rows<E: Copy, R: BufRead>(
    input: R,
    parse: impl Fn(&str) -> Option<E>,
) -> Result<Matrix<E>, TextIoError> {
    let mut data = Vec::new();
    let mut rows = 0usize;
    let mut cols: Option<usize> = None;
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let before = data.len();
        for tok in line.split_whitespace() {
            let value = parse(tok).ok_or_else(|| TextIoError::Parse {
                line: idx + 1,
                token: tok.into(),
            })?;
            data.push(value);
        }
        let found = data.len() - before;
        match cols {
            None => cols = Some(found),
            Some(expected) if expected != found => {
                return Err(TextIoError::Ragged {
                    line: idx + 1,
                    expected,
                    found,
                })
            }
            Some(_) => {}
        }
        rows += 1;
    }
    let cols = cols.unwrap_or(0);
    let len = data.len();
    Matrix::from_vec(rows, cols, data).map_err(|_| TextIoError::Ragged {
        line: rows,
        expected: rows * cols,
        found: len,
    })
}

pub fn save_real<T: Float>(matrix: &Matrix<T>, path: impl AsRef<Path>) -> io::Result<()> {
    write_real(matrix, File::create(path)?)
}

pub fn save_complex<T: Float>(
    matrix: &Matrix<Complex<T>>,
    path: impl AsRef<Path>,
) -> io::Result<()> {
    write_complex(matrix, File::create(path)?)
}

pub fn load_real<T: Float>(path: impl AsRef<Path>) -> Result<Matrix<T>, TextIoError> {
    read_real(BufReader::new(File::open(path)?))
}

pub fn load_complex<T: Float>(path: impl AsRef<Path>) -> Result<Matrix<Complex<T>>, TextIoError> {
    read_complex(BufReader::new(File::open(path)?))
}
