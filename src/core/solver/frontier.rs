use std::{cmp::Reverse, rc::Rc};

use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::{
    core::{grid::SocLevel, solver::state::StateRecord},
    quantity::time::Hours,
};

/// Non-dominated arrivals at one station.
///
/// A state dominates another when it is no worse on every dimension —
/// charge, arrival time, cost — and strictly better on at least one.
/// Dominated states can never seed a better completion, so they are dropped
/// to bound the state space.
pub(crate) struct Frontier {
    /// Sorted by (charge descending, cost, arrival time), which keeps scans
    /// and downstream expansions deterministic.
    states: Vec<Rc<StateRecord>>,
}

impl Frontier {
    pub fn origin(record: StateRecord) -> Self {
        Self { states: vec![Rc::new(record)] }
    }

    /// Reduce raw stage expansions to the surviving frontier.
    ///
    /// Arrivals within one `(level, time bucket)` cell are first collapsed
    /// to the cheapest (then earliest) representative; the dominance scan
    /// then runs over the collapsed set.
    pub fn from_candidates(mut candidates: Vec<StateRecord>, time_bucket: Hours) -> Self {
        candidates.sort_by_key(|state| {
            (Reverse(state.level), OrderedFloat(state.cost.0), OrderedFloat(state.elapsed.0))
        });
        let candidates = if time_bucket > Hours::ZERO {
            // The sort puts each cell's best first, so `unique_by` keeps it:
            candidates
                .into_iter()
                .unique_by(|state| (state.level, bucket_of(state.elapsed, time_bucket)))
                .collect_vec()
        } else {
            candidates
        };

        // In this sort order a dominating state always precedes the states
        // it dominates, so comparing against accepted survivors suffices.
        let mut states: Vec<Rc<StateRecord>> = Vec::new();
        for candidate in candidates {
            let beaten =
                states.iter().any(|survivor| dominates_or_ties(survivor, &candidate));
            if !beaten {
                states.push(Rc::new(candidate));
            }
        }
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<StateRecord>> {
        self.states.iter()
    }

    /// Highest charge level present, regardless of time and cost.
    pub fn best_level(&self) -> Option<SocLevel> {
        self.states.iter().map(|state| state.level).max()
    }
}

#[expect(clippy::cast_possible_truncation)]
fn bucket_of(elapsed: Hours, bucket: Hours) -> i64 {
    (elapsed.0 / bucket.0).floor() as i64
}

/// Whether keeping `b` is pointless given `a`.
///
/// Exact ties count: of two indistinguishable states the earlier-sorted one
/// survives, which keeps the result deterministic.
fn dominates_or_ties(a: &StateRecord, b: &StateRecord) -> bool {
    a.level >= b.level && a.elapsed <= b.elapsed && a.cost <= b.cost
}
