use std::{iter::from_fn, rc::Rc};

use crate::{
    core::{action::BerthAction, grid::SocLevel, pricing::CostBreakdown},
    quantity::{cost::Cost, time::Hours},
};

/// One surviving arrival at a station.
///
/// Records form a backpointer chain to the origin, wrapped in [`Rc`] so that
/// a frontier can be replaced stage by stage while the chains behind its
/// survivors stay alive for the final backtrack.
pub(crate) struct StateRecord {
    /// Index of the station the vessel has arrived at.
    pub station: usize,

    /// Charge level on arrival, on the state-of-charge grid.
    pub level: SocLevel,

    /// Linear hours since departure; monotonically non-decreasing along any
    /// chain. The 24-hour dial reading is derived, never stored.
    pub elapsed: Hours,

    /// Cumulative monetary cost.
    pub cost: Cost,

    /// The berth event at the previous station; [`None`] only at the origin.
    pub via: Option<Visit>,

    pub predecessor: Option<Rc<StateRecord>>,
}

/// What happened at the station the vessel sailed from.
#[derive(Copy, Clone)]
pub(crate) struct Visit {
    pub action: BerthAction,

    /// Waiting for the station to open, included in `dwell`.
    pub wait: Hours,

    pub dwell: Hours,

    pub breakdown: CostBreakdown,
}

impl StateRecord {
    /// Walk the chain from this record back to the origin.
    pub fn backtrack(&self) -> impl Iterator<Item = &Self> {
        let mut pointer = Some(self);
        from_fn(move || {
            let current = pointer?;
            pointer = current.predecessor.as_deref();
            Some(current)
        })
    }
}
