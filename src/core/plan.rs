use serde::Serialize;

use crate::{
    core::{
        action::BerthAction,
        grid::SocGrid,
        pricing::CostBreakdown,
        solver::state::StateRecord,
    },
    quantity::{clock::ClockTime, cost::Cost, energy::KilowattHours, time::Hours},
    scenario::Scenario,
};

/// The optimal journey: one step per station, in route order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plan {
    pub total_cost: Cost,

    /// Linear travel-plus-dwell time, not folded onto the 24-hour dial.
    #[serde(rename = "total_journey_hours")]
    pub total_journey: Hours,

    /// Dial reading on arrival at the terminus.
    #[serde(rename = "arrival_clock_time")]
    pub arrival_clock: ClockTime,

    /// Stations where containers were exchanged.
    pub swap_count: u32,

    pub steps: Vec<PlanStep>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanStep {
    pub station: String,

    /// Linear hours since departure.
    #[serde(rename = "arrival_time")]
    pub arrival_offset: Hours,

    #[serde(rename = "arrival_clock_time")]
    pub arrival_clock: ClockTime,

    pub soc_arriving: KilowattHours,

    pub action: BerthAction,

    pub containers_swapped: u32,

    #[serde(rename = "energy_charged_kwh")]
    pub energy_charged: KilowattHours,

    /// Waiting for the station to open, included in `dwell`.
    #[serde(rename = "wait_hours")]
    pub wait: Hours,

    #[serde(rename = "dwell_hours")]
    pub dwell: Hours,

    pub cost_breakdown: CostBreakdown,
}

impl Plan {
    /// Walk the backpointers of the winning terminal state and lay the
    /// journey out forward.
    pub(crate) fn materialize(
        terminal: &StateRecord,
        scenario: &Scenario,
        grid: &SocGrid,
    ) -> Self {
        let mut chain: Vec<&StateRecord> = terminal.backtrack().collect();
        chain.reverse();

        let steps: Vec<PlanStep> = chain
            .iter()
            .enumerate()
            .map(|(index, record)| {
                // The berth event at this station is recorded on the arrival
                // it led to; the terminus has none.
                let visit = chain.get(index + 1).and_then(|next| next.via.as_ref());
                let action = visit.map_or(BerthAction::Idle, |visit| visit.action);
                PlanStep {
                    station: scenario.stations[record.station].id.clone(),
                    arrival_offset: record.elapsed,
                    arrival_clock: scenario.clock_at(record.elapsed),
                    soc_arriving: grid.energy(record.level),
                    action,
                    containers_swapped: action.containers(),
                    energy_charged: action.charged_energy(),
                    wait: visit.map_or(Hours::ZERO, |visit| visit.wait),
                    dwell: visit.map_or(Hours::ZERO, |visit| visit.dwell),
                    cost_breakdown: visit.map_or(CostBreakdown::ZERO, |visit| visit.breakdown),
                }
            })
            .collect();

        #[expect(clippy::cast_possible_truncation)]
        let swap_count = steps.iter().filter(|step| step.action.is_swap()).count() as u32;
        Self {
            total_cost: terminal.cost,
            total_journey: terminal.elapsed,
            arrival_clock: scenario.clock_at(terminal.elapsed),
            swap_count,
            steps,
        }
    }
}
