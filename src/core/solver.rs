pub(crate) mod berth;
pub(crate) mod frontier;
pub(crate) mod state;

use std::{
    cmp::Reverse,
    rc::Rc,
    sync::atomic::{AtomicBool, Ordering},
};

use bon::Builder;
use ordered_float::OrderedFloat;

use crate::{
    core::{
        action::BerthAction,
        diagnosis::{self, FrontierOverflow},
        grid::SocGrid,
        outcome::Outcome,
        plan::Plan,
        pricing::{CostBreakdown, Tariff},
        segment,
        solver::{
            frontier::Frontier,
            state::{StateRecord, Visit},
        },
    },
    prelude::*,
    quantity::{cost::Cost, energy::KilowattHours, time::Hours},
    scenario::Scenario,
};

/// Slack for comparing a gridded charge against the required terminal
/// charge.
const SOC_EPSILON: KilowattHours = crate::quantity::Quantity(1e-9);

/// Safety limits of the state-space sweep.
#[derive(Copy, Clone, Debug)]
pub struct Limits {
    /// A frontier growing past this cap abandons the solve with a
    /// precision-too-fine report instead of thrashing.
    pub max_frontier_states: usize,

    /// Arrivals at the same charge level within one bucket collapse to the
    /// cheapest of them.
    pub time_bucket: Hours,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_frontier_states: 100_000, time_bucket: crate::quantity::Quantity(0.1) }
    }
}

#[derive(Builder)]
#[builder(finish_fn(vis = ""))]
pub struct Solver<'a> {
    scenario: &'a Scenario,

    #[builder(default)]
    limits: Limits,

    /// Cooperative cancellation, checked between stage expansions.
    cancel: Option<&'a AtomicBool>,
}

impl<S: solver_builder::IsComplete> SolverBuilder<'_, S> {
    pub fn solve(self) -> Outcome {
        self.build().solve()
    }
}

impl Solver<'_> {
    /// Find the cheapest replenishment schedule along the station sequence.
    ///
    /// A forward [DP][1] sweep over `(charge level, arrival time)` states:
    /// at every station each surviving state fans out over the legal berth
    /// actions, sails the outgoing segment, and lands in the next station's
    /// frontier, which the dominance rule keeps small. Everything the sweep
    /// can end in — a plan, a diagnosed infeasibility, cancellation, or a
    /// rejected scenario — comes back as a value.
    ///
    /// [1]: https://en.wikipedia.org/wiki/Dynamic_programming
    #[instrument(skip_all)]
    fn solve(self) -> Outcome {
        if let Err(error) = self.scenario.validate() {
            warn!(%error, "rejecting the scenario");
            return Outcome::Misconfigured(error);
        }

        let scenario = self.scenario;
        let grid = SocGrid::new(scenario.soc_step, scenario.battery_capacity);
        let crossings = segment::crossings(scenario);
        info!(
            stations = scenario.stations.len(),
            soc_levels = grid.max_level().0 + 1,
            "planning…",
        );

        let mut frontiers = vec![Frontier::origin(StateRecord {
            station: 0,
            level: grid.floor(scenario.initial_soc),
            elapsed: Hours::ZERO,
            cost: Cost::ZERO,
            via: None,
            predecessor: None,
        })];

        for (index, crossing) in crossings.iter().copied().enumerate() {
            if self.is_cancelled() {
                info!("cancelled");
                return Outcome::Cancelled;
            }

            let station = &scenario.stations[index];
            let tariff = Tariff::for_station(station);
            let mut candidates = Vec::new();
            for state in frontiers[index].iter() {
                let arrival = scenario.clock_at(state.elapsed);
                for event in berth::enumerate(station, scenario, &grid, state.level, arrival) {
                    let breakdown = if event.action == BerthAction::Idle {
                        CostBreakdown::ZERO
                    } else {
                        tariff.quote(
                            event.action.containers(),
                            event.billable,
                            arrival,
                            event.dwell(),
                        )
                    };

                    // Sail the segment:
                    let soc_arriving = grid.energy(event.level_after) - crossing.energy;
                    let level_arriving = grid.floor(soc_arriving);
                    if soc_arriving < scenario.min_soc
                        || grid.energy(level_arriving) < scenario.min_soc
                    {
                        continue;
                    }

                    candidates.push(StateRecord {
                        station: index + 1,
                        level: level_arriving,
                        elapsed: state.elapsed + event.dwell() + crossing.travel,
                        cost: state.cost + breakdown.total,
                        via: Some(Visit {
                            action: event.action,
                            wait: event.wait,
                            dwell: event.dwell(),
                            breakdown,
                        }),
                        predecessor: Some(Rc::clone(state)),
                    });
                }
            }

            let frontier = Frontier::from_candidates(candidates, self.limits.time_bucket);
            debug!(station = index + 1, states = frontier.len(), "expanded");
            if frontier.len() > self.limits.max_frontier_states {
                warn!(states = frontier.len(), cap = self.limits.max_frontier_states, "overflow");
                let overflow = FrontierOverflow {
                    station: scenario.stations[index + 1].id.clone(),
                    states: frontier.len(),
                    cap: self.limits.max_frontier_states,
                };
                frontiers.push(frontier);
                return Outcome::Infeasible(Box::new(diagnosis::diagnose(
                    scenario,
                    &grid,
                    &crossings,
                    &frontiers,
                    Some(overflow),
                )));
            }
            frontiers.push(frontier);
        }

        if self.is_cancelled() {
            info!("cancelled");
            return Outcome::Cancelled;
        }

        let terminal = frontiers[scenario.segment_count()]
            .iter()
            .filter(|state| {
                grid.energy(state.level) >= scenario.final_soc_required - SOC_EPSILON
            })
            .min_by_key(|state| {
                (OrderedFloat(state.cost.0), OrderedFloat(state.elapsed.0), Reverse(state.level))
            });
        match terminal {
            Some(state) => {
                let plan = Plan::materialize(state, scenario, &grid);
                info!(
                    total_cost = %plan.total_cost,
                    journey = %plan.total_journey,
                    swaps = plan.swap_count,
                    "planned",
                );
                Outcome::Plan(plan)
            }
            None => {
                info!("no terminal state satisfies the required final charge");
                Outcome::Infeasible(Box::new(diagnosis::diagnose(
                    scenario, &grid, &crossings, &frontiers, None,
                )))
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
