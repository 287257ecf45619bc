//! Cellularity Engine.
//!
//! A binomial ideal is cellular when every variable is either a nonzerodivisor
//! or nilpotent modulo the ideal. The nonzerodivisors are the cell variables.
//!
//! Two decomposition strategies are provided:
//! - [`cellular_decomposition`] splits `I = (I : v^∞) ∩ (I + (v^k))` on a
//!   certifying zero-divisor `v` and recurses on both halves
//! - [`cellular_decomposition_worklist`] walks the variables with an explicit
//!   queue and stops once the components found so far intersect to `I`

use crate::classify::is_binomial;
use crate::error::{BinomialError, Result};
use crate::redundancy::{minimal_ideals, stream_irredundant, RunningIntersection};
use binoid_math::{Ideal, Polynomial, Var};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// Outcome of a cellularity test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cellularity {
    /// The ideal is cellular with these cell variables.
    Cellular(Vec<Var>),
    /// The variable is a zero-divisor that is not nilpotent.
    NotCellular(Var),
}

impl Cellularity {
    /// Returns true for [`Cellularity::Cellular`].
    pub fn is_cellular(&self) -> bool {
        matches!(self, Cellularity::Cellular(_))
    }
}

/// Decide cellularity of a proper ideal.
pub fn is_cellular(ideal: &Ideal) -> Result<Cellularity> {
    if ideal.is_one()? {
        return Err(BinomialError::NotProper);
    }
    let ring = ideal.ring();
    if ideal.is_zero() {
        return Ok(Cellularity::Cellular(ring.vars()));
    }

    let mut cells = Vec::new();
    for v in ring.vars() {
        if !ideal.saturation(&Polynomial::from_var(v))?.is_one()? {
            cells.push(v);
        }
    }

    let saturated = ideal.cascade_saturation(&cells)?;
    if saturated.is_subset(ideal)? {
        return Ok(Cellularity::Cellular(cells));
    }

    for &v in &cells {
        if !ideal.quotient(&Polynomial::from_var(v))?.is_subset(ideal)? {
            trace!(var = v, "zero-divisor certifies non-cellularity");
            return Ok(Cellularity::NotCellular(v));
        }
    }
    Err(BinomialError::Internal(format!(
        "saturation of {} grew but no cell variable is a zero-divisor",
        ideal
    )))
}

/// The cell variables of a cellular ideal.
pub fn cell_variables(ideal: &Ideal) -> Result<Vec<Var>> {
    match is_cellular(ideal)? {
        Cellularity::Cellular(cells) => Ok(cells),
        Cellularity::NotCellular(v) => Err(BinomialError::NotCellular(v)),
    }
}

/// The variables of the ring that are not in `cells`.
pub fn complement(nvars: usize, cells: &[Var]) -> Vec<Var> {
    (0..nvars as Var).filter(|v| !cells.contains(v)).collect()
}

fn check_input(ideal: &Ideal) -> Result<()> {
    if !is_binomial(ideal)? {
        return Err(BinomialError::NotBinomial);
    }
    if ideal.is_one()? {
        return Err(BinomialError::NotProper);
    }
    Ok(())
}

/// Cellular decomposition by recursive splitting.
pub fn cellular_decomposition(ideal: &Ideal) -> Result<Vec<Ideal>> {
    check_input(ideal)?;
    split(ideal)
}

fn split(ideal: &Ideal) -> Result<Vec<Ideal>> {
    let v = match is_cellular(ideal)? {
        Cellularity::Cellular(_) => return Ok(vec![ideal.clone()]),
        Cellularity::NotCellular(v) => v,
    };
    let x = Polynomial::from_var(v);
    let (saturated, k) = ideal.saturation_with_index(&x)?;
    debug!(var = v, index = k, "splitting on zero-divisor");

    let left = split(&saturated)?;
    let right = split(&ideal.with_generators([x.pow(k)]))?;
    stream_irredundant(ideal.ring(), left.into_iter().chain(right))
}

/// A pending piece of the worklist decomposition.
#[derive(Debug, Clone)]
struct CellularTask {
    saturated_by: Vec<Var>,
    remaining: Vec<Var>,
    ideal: Ideal,
}

/// Cellular decomposition with an explicit worklist.
///
/// Returns as soon as the recorded components intersect to the input.
pub fn cellular_decomposition_worklist(ideal: &Ideal) -> Result<Vec<Ideal>> {
    check_input(ideal)?;
    let ring = ideal.ring();

    let mut queue = VecDeque::from([CellularTask {
        saturated_by: Vec::new(),
        remaining: ring.vars(),
        ideal: ideal.clone(),
    }]);
    let mut running = RunningIntersection::new(ring);
    let mut components = Vec::new();

    while let Some(task) = queue.pop_front() {
        if running.intersection().is_subset(&task.ideal)? {
            trace!("dropping redundant task");
            continue;
        }

        let Some((&v, rest)) = task.remaining.split_first() else {
            running.offer(&task.ideal)?;
            components.push(task.ideal);
            if running.intersection().is_subset(ideal)? {
                debug!(components = components.len(), "components certify the decomposition");
                break;
            }
            continue;
        };

        let x = Polynomial::from_var(v);
        let (saturated, k) = task.ideal.saturation_with_index(&x)?;
        if k > 0 {
            let truncated = task
                .ideal
                .with_generators([x.pow(k)])
                .cascade_saturation(&task.saturated_by)?;
            queue.push_back(CellularTask {
                saturated_by: task.saturated_by.clone(),
                remaining: rest.to_vec(),
                ideal: truncated,
            });
        }
        if !saturated.is_one()? {
            let mut saturated_by = task.saturated_by;
            saturated_by.push(v);
            queue.push_back(CellularTask {
                saturated_by,
                remaining: rest.to_vec(),
                ideal: saturated,
            });
        }
    }

    minimal_ideals(components)
}
