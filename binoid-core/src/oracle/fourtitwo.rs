//! 4ti2 lattice oracle.
//!
//! Every call gets its own temporary directory, removed on drop whether the
//! program succeeds, fails, or produces unreadable output. Matrices travel as
//! plain text: a `rows cols` header followed by one row per line.

use super::LatticeBasisOracle;
use crate::config::OracleConfig;
use crate::error::{BinomialError, Result};
use binoid_math::IntMatrix;
use num_bigint::BigInt;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Lattice oracle running the 4ti2 executables.
#[derive(Debug, Clone, Default)]
pub struct FourTiTwoOracle {
    config: OracleConfig,
}

impl FourTiTwoOracle {
    /// Create with the given executable settings.
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    fn program(&self, name: &str) -> PathBuf {
        match &self.config.binary_dir {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        }
    }

    /// Write the inputs, run `program -q <prefix>` and parse `<prefix>.<output>`.
    fn run(
        &self,
        program: &str,
        lattice: &IntMatrix,
        cost: Option<&[i64]>,
        output: &str,
    ) -> Result<IntMatrix> {
        let dir = tempfile::Builder::new().prefix("binoid-4ti2-").tempdir()?;
        let prefix = dir.path().join("lattice");
        fs::write(with_suffix(&prefix, "lat"), format_matrix(lattice))?;
        if let Some(cost) = cost {
            let row: Vec<BigInt> = cost.iter().map(|&c| BigInt::from(c)).collect();
            let matrix = IntMatrix::from_big_rows(vec![row], cost.len())?;
            fs::write(with_suffix(&prefix, "cost"), format_matrix(&matrix))?;
        }

        let command = self.program(program);
        debug!(command = %command.display(), rows = lattice.nrows(), "running lattice oracle");
        let result = Command::new(&command).arg("-q").arg(&prefix).output()?;
        if !result.status.success() {
            warn!(
                stderr = %String::from_utf8_lossy(&result.stderr),
                "lattice oracle failed"
            );
            return Err(BinomialError::OracleFailure {
                command: command.display().to_string(),
                status: result.status,
            });
        }

        let text = fs::read_to_string(with_suffix(&prefix, output))?;
        parse_matrix(&text, lattice.ncols())
    }
}

fn with_suffix(prefix: &Path, ext: &str) -> PathBuf {
    prefix.with_extension(ext)
}

/// Render a matrix as `rows cols` followed by its rows.
pub fn format_matrix(matrix: &IntMatrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", matrix.nrows(), matrix.ncols());
    for row in matrix.rows() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        let _ = writeln!(out, "{}", cells.join(" "));
    }
    out
}

/// Parse the `rows cols` text format; `cols` is the expected width.
pub fn parse_matrix(text: &str, cols: usize) -> Result<IntMatrix> {
    let mut tokens = text.split_whitespace();
    let mut header = |what: &str| -> Result<usize> {
        tokens
            .next()
            .ok_or_else(|| BinomialError::OracleParse(format!("missing {}", what)))?
            .parse()
            .map_err(|_| BinomialError::OracleParse(format!("bad {}", what)))
    };
    let rows = header("row count")?;
    let width = header("column count")?;
    if rows > 0 && width != cols {
        return Err(BinomialError::DimensionMismatch {
            expected: cols,
            found: width,
        });
    }

    let entries: Vec<BigInt> = tokens
        .map(|t| {
            t.parse::<BigInt>()
                .map_err(|_| BinomialError::OracleParse(format!("bad entry `{}`", t)))
        })
        .collect::<Result<_>>()?;
    if entries.len() != rows * width {
        return Err(BinomialError::OracleParse(format!(
            "expected {} entries, found {}",
            rows * width,
            entries.len()
        )));
    }
    let data: Vec<Vec<BigInt>> = if width == 0 {
        vec![Vec::new(); rows]
    } else {
        entries.chunks(width).map(<[BigInt]>::to_vec).collect()
    };
    Ok(IntMatrix::from_big_rows(data, cols)?)
}

impl LatticeBasisOracle for FourTiTwoOracle {
    fn name(&self) -> &str {
        "4ti2"
    }

    fn markov_basis(&self, lattice: &IntMatrix) -> Result<IntMatrix> {
        self.run("markov", lattice, None, "mar")
    }

    fn lattice_groebner_basis(&self, lattice: &IntMatrix, cost: &[i64]) -> Result<IntMatrix> {
        if cost.len() != lattice.ncols() {
            return Err(BinomialError::DimensionMismatch {
                expected: lattice.ncols(),
                found: cost.len(),
            });
        }
        self.run("groebner", lattice, Some(cost), "gro")
    }
}
