use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::{
    core::{grid::SocGrid, segment::Crossing, solver::frontier::Frontier},
    quantity::{clock::ClockWindow, energy::KilowattHours},
    scenario::Scenario,
};

/// Structured post-mortem of an infeasible solve.
///
/// Built from the partial state spaces the solver left behind; the
/// collaborating surface renders it, so everything is plain data. The
/// [`Display`] implementation is the canonical textual form.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiagnosticReport {
    /// Whether any state reached the terminus at all.
    pub terminus_reached: bool,

    /// Best state-of-charge among terminal states, when any exist.
    pub best_terminal_soc: Option<KilowattHours>,

    /// How far the best terminal state falls short of the requirement.
    pub shortfall: Option<KilowattHours>,

    pub bottlenecks: Vec<Bottleneck>,

    pub energy_budget: EnergyBudget,

    /// Suspicious-but-legal configuration the validator lets through.
    pub contradictions: Vec<Contradiction>,

    /// Remedies filtered to those that plausibly address the cause above.
    pub suggestions: Vec<Suggestion>,

    /// Present when the solve was abandoned because a frontier outgrew the
    /// configured cap rather than because the scenario is provably
    /// infeasible.
    pub frontier_overflow: Option<FrontierOverflow>,
}

/// A segment on which every surviving path dies.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bottleneck {
    /// Index of the segment, which leaves the station of the same index.
    pub segment: usize,

    pub from: String,

    pub to: String,

    pub energy_required: KilowattHours,

    pub battery_capacity: KilowattHours,

    /// No charge level can survive this crossing.
    pub exceeds_capacity: bool,

    /// Whether any station up to and including the segment start could have
    /// replenished the battery.
    pub replenishment_upstream: bool,
}

/// Whole-journey energy accounting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnergyBudget {
    pub total_segment_energy: KilowattHours,

    /// What the battery may spend: initial charge minus the required
    /// terminal charge.
    pub disposable_energy: KilowattHours,

    /// Energy that must come from stations, when positive.
    pub deficit: Option<KilowattHours>,

    pub replenishment_available: bool,

    /// In deficit with nowhere to replenish: infeasible regardless of
    /// scheduling.
    pub catastrophic: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contradiction {
    /// Peak bounds coincide while the multiplier is not 1: the surcharge can
    /// never apply.
    EmptyPeakWindow { station: String },

    /// Queueing alone exceeds the longest allowed berth occupation.
    QueueExceedsMaxDwell { station: String },

    /// Swapping is offered but no charged container is on hand.
    SwapWithoutStock { station: String },

    /// The operating window closes before the queue clears.
    WindowShorterThanQueue { station: String },
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Suggestion {
    EnableReplenishment { station: String },
    RaiseBatteryCapacity,
    LowerFinalSocRequirement,
    WidenOperatingHours { station: String },
    IncreaseChargedStock { station: String },
    RaiseChargingPower { station: String },
    ExtendMaxDwell { station: String },

    /// The scenario is too large for the configured precision, not provably
    /// infeasible.
    CoarsenSocStep,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FrontierOverflow {
    pub station: String,

    pub states: usize,

    pub cap: usize,
}

/// Post-mortem over the partial state spaces.
///
/// `frontiers` holds one frontier per station the sweep reached; a solve
/// abandoned at an overflowing station passes the stages built so far.
pub(crate) fn diagnose(
    scenario: &Scenario,
    grid: &SocGrid,
    crossings: &[Crossing],
    frontiers: &[Frontier],
    frontier_overflow: Option<FrontierOverflow>,
) -> DiagnosticReport {
    let terminal = frontiers.get(scenario.segment_count());
    let terminus_reached = terminal.is_some_and(|frontier| !frontier.is_empty());
    let best_terminal_soc = terminal
        .and_then(Frontier::best_level)
        .map(|level| grid.energy(level));
    let shortfall = best_terminal_soc
        .map(|soc| scenario.final_soc_required - soc)
        .filter(|shortfall| shortfall.0 > 0.0);

    let bottlenecks = scan_bottlenecks(scenario, crossings, frontiers);
    let energy_budget = energy_budget(scenario, crossings);
    let contradictions = scan_contradictions(scenario);
    let suggestions = suggest(
        scenario,
        &bottlenecks,
        &energy_budget,
        &contradictions,
        shortfall.is_some(),
        frontier_overflow.is_some(),
    );

    DiagnosticReport {
        terminus_reached,
        best_terminal_soc,
        shortfall,
        bottlenecks,
        energy_budget,
        contradictions,
        suggestions,
        frontier_overflow,
    }
}

fn scan_bottlenecks(
    scenario: &Scenario,
    crossings: &[Crossing],
    frontiers: &[Frontier],
) -> Vec<Bottleneck> {
    crossings
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            let populated = frontiers.get(*index).is_some_and(|frontier| !frontier.is_empty());
            let next_empty =
                frontiers.get(index + 1).is_none_or(|frontier| frontier.is_empty());
            populated && next_empty
        })
        .map(|(index, crossing)| Bottleneck {
            segment: index,
            from: scenario.stations[index].id.clone(),
            to: scenario.stations[index + 1].id.clone(),
            energy_required: crossing.energy,
            battery_capacity: scenario.battery_capacity,
            exceeds_capacity: crossing.exceeds(scenario.battery_capacity),
            replenishment_upstream: scenario.stations[..=index]
                .iter()
                .any(|station| station.offers_replenishment()),
        })
        .collect()
}

fn energy_budget(scenario: &Scenario, crossings: &[Crossing]) -> EnergyBudget {
    let total_segment_energy: KilowattHours =
        crossings.iter().map(|crossing| crossing.energy).sum();
    let disposable_energy = scenario.initial_soc - scenario.final_soc_required;
    let deficit =
        Some(total_segment_energy - disposable_energy).filter(|deficit| deficit.0 > 0.0);
    let replenishment_available = scenario
        .stations
        .iter()
        .take(scenario.segment_count())
        .any(|station| station.offers_replenishment());
    EnergyBudget {
        total_segment_energy,
        disposable_energy,
        catastrophic: deficit.is_some() && !replenishment_available,
        deficit,
        replenishment_available,
    }
}

fn scan_contradictions(scenario: &Scenario) -> Vec<Contradiction> {
    let mut contradictions = Vec::new();
    for station in &scenario.stations {
        let pricing = &station.pricing;
        if pricing.peak_window().is_some_and(ClockWindow::is_empty)
            && pricing.peak_hour_multiplier != 1.0
        {
            contradictions.push(Contradiction::EmptyPeakWindow { station: station.id.clone() });
        }
        if station.queue_time > station.max_dwell {
            contradictions
                .push(Contradiction::QueueExceedsMaxDwell { station: station.id.clone() });
        }
        if station.swap_allowed && station.charged_stock == 0 {
            contradictions.push(Contradiction::SwapWithoutStock { station: station.id.clone() });
        }
        if let Some(window) = station.operating_hours {
            if station.queue_time > window.start.until(window.end) {
                contradictions
                    .push(Contradiction::WindowShorterThanQueue { station: station.id.clone() });
            }
        }
    }
    contradictions
}

fn suggest(
    scenario: &Scenario,
    bottlenecks: &[Bottleneck],
    budget: &EnergyBudget,
    contradictions: &[Contradiction],
    short_of_final_soc: bool,
    overflowed: bool,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();
    let push = |suggestions: &mut Vec<Suggestion>, suggestion: Suggestion| {
        if !suggestions.contains(&suggestion) {
            suggestions.push(suggestion);
        }
    };

    for bottleneck in bottlenecks {
        if !bottleneck.replenishment_upstream {
            push(
                &mut suggestions,
                Suggestion::EnableReplenishment { station: bottleneck.from.clone() },
            );
        }
        if bottleneck.exceeds_capacity {
            push(&mut suggestions, Suggestion::RaiseBatteryCapacity);
        }
        if scenario.stations[bottleneck.segment].operating_hours.is_some() {
            push(
                &mut suggestions,
                Suggestion::WidenOperatingHours { station: bottleneck.from.clone() },
            );
        }
    }

    if budget.catastrophic {
        for station in scenario.stations.iter().take(scenario.segment_count()) {
            push(
                &mut suggestions,
                Suggestion::EnableReplenishment { station: station.id.clone() },
            );
        }
        push(&mut suggestions, Suggestion::LowerFinalSocRequirement);
    }

    if short_of_final_soc {
        push(&mut suggestions, Suggestion::LowerFinalSocRequirement);
        for station in scenario.stations.iter().take(scenario.segment_count()) {
            if !station.offers_replenishment() {
                push(
                    &mut suggestions,
                    Suggestion::EnableReplenishment { station: station.id.clone() },
                );
            }
            if station.swap_allowed && station.charged_stock < station.container_count {
                push(
                    &mut suggestions,
                    Suggestion::IncreaseChargedStock { station: station.id.clone() },
                );
            }
            if station.charging_allowed {
                push(
                    &mut suggestions,
                    Suggestion::RaiseChargingPower { station: station.id.clone() },
                );
                if station.max_dwell.0 < 24.0 {
                    push(
                        &mut suggestions,
                        Suggestion::ExtendMaxDwell { station: station.id.clone() },
                    );
                }
            }
        }
    }

    for contradiction in contradictions {
        match contradiction {
            Contradiction::QueueExceedsMaxDwell { station } => {
                push(&mut suggestions, Suggestion::ExtendMaxDwell { station: station.clone() });
            }
            Contradiction::SwapWithoutStock { station } => {
                push(
                    &mut suggestions,
                    Suggestion::IncreaseChargedStock { station: station.clone() },
                );
            }
            Contradiction::WindowShorterThanQueue { station } => {
                push(
                    &mut suggestions,
                    Suggestion::WidenOperatingHours { station: station.clone() },
                );
            }
            Contradiction::EmptyPeakWindow { .. } => {}
        }
    }

    if overflowed {
        push(&mut suggestions, Suggestion::CoarsenSocStep);
    }

    suggestions
}

impl Display for DiagnosticReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.terminus_reached {
            writeln!(f, "The terminus was reached, but below the required charge.")?;
        } else {
            writeln!(f, "No state reached the terminus.")?;
        }
        if let (Some(best), Some(shortfall)) = (self.best_terminal_soc, self.shortfall) {
            writeln!(f, "Best achievable arrival charge: {best} ({shortfall} short).")?;
        }
        for bottleneck in &self.bottlenecks {
            write!(
                f,
                "Bottleneck on {} → {}: requires {} against a {} battery",
                bottleneck.from,
                bottleneck.to,
                bottleneck.energy_required,
                bottleneck.battery_capacity,
            )?;
            if bottleneck.exceeds_capacity {
                write!(f, " (exceeds capacity)")?;
            }
            if !bottleneck.replenishment_upstream {
                write!(f, "; no replenishment upstream")?;
            }
            writeln!(f, ".")?;
        }
        if let Some(deficit) = self.energy_budget.deficit {
            write!(
                f,
                "Energy budget: {} to sail, {} disposable, {deficit} must come from stations",
                self.energy_budget.total_segment_energy, self.energy_budget.disposable_energy,
            )?;
            if self.energy_budget.catastrophic {
                write!(f, ", and no station can replenish")?;
            }
            writeln!(f, ".")?;
        }
        for contradiction in &self.contradictions {
            writeln!(f, "Contradiction: {contradiction:?}.")?;
        }
        if let Some(overflow) = &self.frontier_overflow {
            writeln!(
                f,
                "Abandoned at {}: {} states exceed the cap of {}.",
                overflow.station, overflow.states, overflow.cap,
            )?;
        }
        for suggestion in &self.suggestions {
            writeln!(f, "Suggestion: {suggestion:?}.")?;
        }
        Ok(())
    }
}
