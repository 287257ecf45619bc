//! Redundancy Filter.
//!
//! Keeps result sets inclusion-minimal. [`minimal_ideals`] compares every
//! pair; [`RunningIntersection`] drops an ideal as soon as the intersection
//! of what was kept so far already lies inside it.

use crate::error::Result;
use binoid_math::{Ideal, Ring};

/// The inclusion-minimal members of `ideals`, in input order.
///
/// If `A ⊆ B` then `B` is dropped; of several equal ideals the first is kept.
pub fn minimal_ideals(ideals: Vec<Ideal>) -> Result<Vec<Ideal>> {
    let mut keep = vec![true; ideals.len()];
    for i in 0..ideals.len() {
        for j in 0..ideals.len() {
            if i == j || !keep[j] {
                continue;
            }
            if ideals[j].is_subset(&ideals[i])? {
                let equal = ideals[i].is_subset(&ideals[j])?;
                if !equal || j < i {
                    keep[i] = false;
                    break;
                }
            }
        }
    }
    Ok(ideals
        .into_iter()
        .zip(keep)
        .filter_map(|(ideal, kept)| kept.then_some(ideal))
        .collect())
}

/// Streaming filter folding a running intersection.
#[derive(Debug, Clone)]
pub struct RunningIntersection {
    acc: Ideal,
}

impl RunningIntersection {
    /// Start with the whole ring.
    pub fn new(ring: Ring) -> Self {
        Self {
            acc: Ideal::unit(ring),
        }
    }

    /// The intersection of everything accepted so far.
    pub fn intersection(&self) -> &Ideal {
        &self.acc
    }

    /// Accept `ideal` unless the running intersection already lies inside it.
    pub fn offer(&mut self, ideal: &Ideal) -> Result<bool> {
        if self.acc.is_subset(ideal)? {
            return Ok(false);
        }
        self.acc = self.acc.intersect(ideal)?;
        Ok(true)
    }
}

/// Keep the ideals that shrink the running intersection.
pub fn stream_irredundant(ring: Ring, ideals: impl IntoIterator<Item = Ideal>) -> Result<Vec<Ideal>> {
    stream_irredundant_by(ring, ideals, |ideal| ideal)
}

/// Keep the items whose key ideal shrinks the running intersection.
pub fn stream_irredundant_by<T>(
    ring: Ring,
    items: impl IntoIterator<Item = T>,
    key: impl Fn(&T) -> &Ideal,
) -> Result<Vec<T>> {
    let mut running = RunningIntersection::new(ring);
    let mut kept = Vec::new();
    for item in items {
        if running.offer(key(&item))? {
            kept.push(item);
        }
    }
    Ok(kept)
}
