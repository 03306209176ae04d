//! Greedy seed-absorption partitioning.
//!
//! Records are visited in input order. Each record not yet assigned seeds a
//! new cluster and absorbs every later unassigned record the proximity rule
//! admits relative to that seed. Membership therefore depends on which record
//! became the seed: the grouping is neither symmetric nor transitive, and
//! reordering the input can change the output. Callers that need stable
//! output must keep the input order stable.

use crate::geo::Coordinate;
use crate::photo::{Cluster, ClusterBuilder, PhotoRecord};

/// Decides whether a candidate joins the cluster opened at `seed`.
pub trait ProximityRule {
    fn admits(&self, seed: &Coordinate, candidate: &Coordinate) -> bool;
}

/// Both axis differences within the threshold (build-time snapshot rule).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisThreshold(pub f64);

impl ProximityRule for AxisThreshold {
    fn admits(&self, seed: &Coordinate, candidate: &Coordinate) -> bool {
        seed.chebyshev(candidate) <= self.0
    }
}

/// Euclidean degree-space distance within the threshold (zoom rule).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialThreshold(pub f64);

impl ProximityRule for RadialThreshold {
    fn admits(&self, seed: &Coordinate, candidate: &Coordinate) -> bool {
        seed.euclidean(candidate) <= self.0
    }
}

/// Partitions `photos` so every record lands in exactly one cluster.
pub fn partition<'a, R, I>(photos: I, rule: &R) -> Vec<Cluster>
where
    R: ProximityRule + ?Sized,
    I: IntoIterator<Item = &'a PhotoRecord>,
{
    let pending: Vec<&PhotoRecord> = photos.into_iter().collect();
    let mut assigned = vec![false; pending.len()];
    let mut clusters = Vec::new();

    for seed_index in 0..pending.len() {
        if assigned[seed_index] {
            continue;
        }
        assigned[seed_index] = true;

        let mut builder = ClusterBuilder::seeded(pending[seed_index].clone());
        let seed = builder.seed();

        for candidate_index in (seed_index + 1)..pending.len() {
            if assigned[candidate_index] {
                continue;
            }
            let candidate = pending[candidate_index];
            if rule.admits(&seed, &candidate.coordinate()) {
                assigned[candidate_index] = true;
                builder.absorb(candidate.clone());
            }
        }

        clusters.push(builder.finish());
    }

    clusters
}
