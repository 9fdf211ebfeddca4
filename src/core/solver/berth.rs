use crate::{
    core::{
        action::BerthAction,
        grid::{SocGrid, SocLevel},
    },
    quantity::{clock::ClockTime, energy::KilowattHours, time::Hours},
    scenario::{
        Scenario,
        station::{Service, Station},
    },
};

/// One legal berth event: the action plus its time and charge consequences.
pub(crate) struct BerthEvent {
    pub action: BerthAction,

    /// Waiting for the station to open.
    pub wait: Hours,

    /// Queueing, container handling, and charging; bounded by the station's
    /// maximum dwell and by its operating window.
    pub service: Hours,

    /// Charge level when casting off.
    pub level_after: SocLevel,

    /// Billable energy delta: grid charge plus the shortfall of the returned
    /// containers against the charged ones they were exchanged for.
    pub billable: KilowattHours,
}

impl BerthEvent {
    pub fn dwell(&self) -> Hours {
        self.wait + self.service
    }

    fn idle(level: SocLevel) -> Self {
        Self {
            action: BerthAction::Idle,
            wait: Hours::ZERO,
            service: Hours::ZERO,
            level_after: level,
            billable: KilowattHours::ZERO,
        }
    }
}

/// Enumerate the legal berth events at `station` for a vessel arriving with
/// `level` charge at `arrival` on the dial.
///
/// The order is fixed — idle, swaps by container count, each swap's hybrid
/// extensions, then pure charges by energy — so that planning is
/// deterministic.
pub(crate) fn enumerate(
    station: &Station,
    scenario: &Scenario,
    grid: &SocGrid,
    level: SocLevel,
    arrival: ClockTime,
) -> Vec<BerthEvent> {
    let mut events = Vec::new();
    let hours = station.operating_hours;

    // Passing through needs no berth, but only while the station operates:
    if hours.is_none_or(|window| window.contains(arrival)) {
        events.push(BerthEvent::idle(level));
    }

    let services = station.services();
    if services.is_empty() {
        return events;
    }

    let wait = hours.map_or(Hours::ZERO, |window| window.wait_until_open(arrival));
    let service_start = arrival.advanced_by(wait);
    let window_remaining = hours.map(|window| window.remaining(service_start));
    let fits = |service: Hours| {
        service <= station.max_dwell
            && window_remaining.is_none_or(|remaining| service <= remaining)
    };

    if services.contains(Service::Swap) {
        let soc = grid.energy(level);
        // Containers carry the pack charge in equal shares:
        let residual_per_container = soc / f64::from(station.container_count);
        for containers in 1..=station.container_count.min(station.charged_stock) {
            if containers < station.container_count && !services.contains(Service::PartialSwap) {
                continue;
            }
            let returned = residual_per_container * f64::from(containers);
            let provided = station.container_capacity * f64::from(containers);
            let soc_after = (soc - returned + provided).min(scenario.battery_capacity);
            let level_after = grid.floor(soc_after);
            let billable = (provided - returned).max(KilowattHours::ZERO);
            let service =
                station.queue_time + station.swap_time_per_container * f64::from(containers);
            if !fits(service) {
                continue;
            }
            events.push(BerthEvent {
                action: BerthAction::Swap { containers },
                wait,
                service,
                level_after,
                billable,
            });
            if scenario.allow_hybrid_swap_and_charge && services.contains(Service::Charge) {
                extend_with_charges(
                    &mut events,
                    station,
                    grid,
                    BerthEvent {
                        action: BerthAction::Swap { containers },
                        wait,
                        service,
                        level_after,
                        billable,
                    },
                    &fits,
                );
            }
        }
    }

    if services.contains(Service::Charge) {
        extend_with_charges(&mut events, station, grid, BerthEvent::idle(level), &fits);
    }

    events
}

/// Push the charge extensions of `base`, smallest energy first, stopping at
/// the first one the berth limits reject.
fn extend_with_charges(
    events: &mut Vec<BerthEvent>,
    station: &Station,
    grid: &SocGrid,
    base: BerthEvent,
    fits: &impl Fn(Hours) -> bool,
) {
    let base_service = if matches!(base.action, BerthAction::Idle) {
        // A pure charge still queues for the berth:
        station.queue_time
    } else {
        base.service
    };
    for steps in 1..=grid.headroom(base.level_after) {
        let energy = grid.step() * f64::from(steps);
        let service = base_service + energy / station.charging_power;
        // Charging time grows with energy, so nothing further fits either:
        if !fits(service) {
            break;
        }
        let action = match base.action {
            BerthAction::Idle => BerthAction::Charge { energy },
            BerthAction::Swap { containers } => BerthAction::SwapAndCharge { containers, energy },
            BerthAction::Charge { .. } | BerthAction::SwapAndCharge { .. } => unreachable!(),
        };
        events.push(BerthEvent {
            action,
            wait: base.wait,
            service,
            level_after: SocLevel(base.level_after.0 + steps),
            billable: base.billable + energy,
        });
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::quantity::{
        clock::ClockWindow,
        distance::NauticalMiles,
        power::Kilowatts,
        rate::KilowattHoursPerMile,
        speed::Knots,
    };

    fn scenario(station: Station, hybrid: bool) -> Scenario {
        Scenario::builder()
            .stations(vec![station, Station::builder().id("end").build()])
            .battery_capacity(KilowattHours::from(100.0))
            .initial_soc(KilowattHours::from(100.0))
            .cruise_speed(Knots::from(10.0))
            .base_consumption(KilowattHoursPerMile::from(1.0))
            .soc_step(KilowattHours::from(10.0))
            .allow_hybrid_swap_and_charge(hybrid)
            .build()
    }

    fn swap_station() -> Station {
        Station::builder()
            .id("Duisburg")
            .distance_to_next(NauticalMiles::from(10.0))
            .swap_allowed(true)
            .partial_swap_allowed(true)
            .container_count(2)
            .container_capacity(KilowattHours::from(50.0))
            .charged_stock(2)
            .swap_time_per_container(Hours::from(0.25))
            .build()
    }

    fn grid() -> SocGrid {
        SocGrid::new(KilowattHours::from(10.0), KilowattHours::from(100.0))
    }

    #[test]
    fn test_plain_station_only_idles() {
        let station = Station::builder().id("Emmerich").build();
        let scenario = scenario(station, false);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(5), ClockTime::MIDNIGHT);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, BerthAction::Idle);
    }

    #[test]
    fn test_swap_billing_is_soc_based() {
        let scenario = scenario(swap_station(), false);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(5), ClockTime::MIDNIGHT);
        // Idle, swap 1, swap 2:
        assert_eq!(events.len(), 3);

        // Arriving at 50 kWh, each of the 2 containers holds 25 kWh.
        let single = &events[1];
        assert_eq!(single.action, BerthAction::Swap { containers: 1 });
        assert_abs_diff_eq!(single.billable.0, 25.0);
        assert_eq!(single.level_after, SocLevel(7));
        assert_abs_diff_eq!(single.service.0, 0.25);

        let full = &events[2];
        assert_abs_diff_eq!(full.billable.0, 50.0);
        assert_eq!(full.level_after, SocLevel(10));
        assert_abs_diff_eq!(full.service.0, 0.5);
    }

    #[test]
    fn test_partial_swap_gate() {
        let mut station = swap_station();
        station.partial_swap_allowed = false;
        let scenario = scenario(station, false);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(5), ClockTime::MIDNIGHT);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].action, BerthAction::Swap { containers: 2 });
    }

    #[test]
    fn test_stock_limits_swaps() {
        let mut station = swap_station();
        station.charged_stock = 1;
        let scenario = scenario(station, false);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(5), ClockTime::MIDNIGHT);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].action, BerthAction::Swap { containers: 1 });
    }

    #[test]
    fn test_charge_enumeration_and_max_dwell() {
        let station = Station::builder()
            .id("Wesel")
            .charging_allowed(true)
            .charging_power(Kilowatts::from(20.0))
            .max_dwell(Hours::from(1.0))
            .build();
        let scenario = scenario(station, false);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(7), ClockTime::MIDNIGHT);
        // Idle, then 10 kWh (0.5 h) and 20 kWh (1.0 h); 30 kWh would take 1.5 h:
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].action, BerthAction::Charge { energy: KilowattHours::from(10.0) });
        assert_eq!(events[2].action, BerthAction::Charge { energy: KilowattHours::from(20.0) });
        assert_eq!(events[2].level_after, SocLevel(9));
    }

    #[test]
    fn test_wait_until_open() {
        let mut station = swap_station();
        station.operating_hours =
            Some(ClockWindow::new(ClockTime::new(8.0), ClockTime::new(18.0)));
        station.queue_time = Hours::from(1.0);
        let scenario = scenario(station, false);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(5), ClockTime::new(6.0));
        // Idle is not available outside the window:
        assert!(events.iter().all(|event| event.action != BerthAction::Idle));
        let swap = &events[0];
        assert_abs_diff_eq!(swap.wait.0, 2.0);
        assert_abs_diff_eq!(swap.service.0, 1.25);
        assert_abs_diff_eq!(swap.dwell().0, 3.25);
    }

    #[test]
    fn test_service_must_finish_before_closing() {
        let mut station = swap_station();
        station.operating_hours =
            Some(ClockWindow::new(ClockTime::new(8.0), ClockTime::new(8.4)));
        let scenario = scenario(station, false);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(5), ClockTime::new(8.0));
        // 0.25 h for one container fits the 0.4 h window; 0.5 h for two does not:
        assert_eq!(
            events.iter().map(|event| event.action).collect::<Vec<_>>(),
            [BerthAction::Idle, BerthAction::Swap { containers: 1 }],
        );
    }

    #[test]
    fn test_hybrid_extensions() {
        let mut station = swap_station();
        station.charging_allowed = true;
        station.charging_power = Kilowatts::from(100.0);
        let scenario = scenario(station, true);
        let events =
            enumerate(&scenario.stations[0], &scenario, &grid(), SocLevel(5), ClockTime::MIDNIGHT);
        // Swap 1 leaves level 7, so hybrids may add 10, 20, or 30 kWh;
        // swap 2 fills the pack and admits no extension.
        let hybrids: Vec<_> = events
            .iter()
            .filter_map(|event| match event.action {
                BerthAction::SwapAndCharge { containers, energy } => Some((containers, energy.0)),
                _ => None,
            })
            .collect();
        assert_eq!(hybrids, [(1, 10.0), (1, 20.0), (1, 30.0)]);
        let hybrid = events
            .iter()
            .find(|event| {
                event.action
                    == BerthAction::SwapAndCharge {
                        containers: 1,
                        energy: KilowattHours::from(10.0),
                    }
            })
            .unwrap();
        assert_abs_diff_eq!(hybrid.billable.0, 35.0);
        assert_eq!(hybrid.level_after, SocLevel(8));
    }
}
