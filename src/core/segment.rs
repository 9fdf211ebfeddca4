use serde::Serialize;

use crate::{
    quantity::{energy::KilowattHours, time::Hours},
    scenario::{Scenario, station::Station},
};

/// Pre-computed sailing of one segment between consecutive stations.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Crossing {
    /// Propulsion energy drawn from the battery.
    pub energy: KilowattHours,

    pub travel: Hours,
}

impl Crossing {
    /// Energy and travel time of the segment leaving `station`.
    pub fn for_segment(station: &Station, scenario: &Scenario) -> Self {
        Self {
            energy: station.distance_to_next
                * scenario.base_consumption
                * station.current.multiplier(),
            travel: station.distance_to_next / scenario.cruise_speed,
        }
    }

    /// A crossing no battery charge level can survive.
    pub fn exceeds(self, capacity: KilowattHours) -> bool {
        self.energy > capacity
    }
}

/// Crossings for all sailed segments, in route order.
pub fn crossings(scenario: &Scenario) -> Vec<Crossing> {
    scenario
        .stations
        .iter()
        .take(scenario.segment_count())
        .map(|station| Crossing::for_segment(station, scenario))
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        quantity::{distance::NauticalMiles, rate::KilowattHoursPerMile, speed::Knots},
        scenario::station::CurrentSign,
    };

    fn scenario_with_current(current: CurrentSign) -> Scenario {
        Scenario::builder()
            .stations(vec![
                Station::builder()
                    .id("A")
                    .distance_to_next(NauticalMiles::from(50.0))
                    .current(current)
                    .build(),
                Station::builder().id("B").build(),
            ])
            .battery_capacity(KilowattHours::from(100.0))
            .initial_soc(KilowattHours::from(100.0))
            .cruise_speed(Knots::from(10.0))
            .base_consumption(KilowattHoursPerMile::from(1.0))
            .soc_step(KilowattHours::from(1.0))
            .build()
    }

    #[test]
    fn test_slack_water() {
        let scenario = scenario_with_current(CurrentSign::Slack);
        let crossing = Crossing::for_segment(&scenario.stations[0], &scenario);
        assert_abs_diff_eq!(crossing.energy.0, 50.0);
        assert_abs_diff_eq!(crossing.travel.0, 5.0);
    }

    #[test]
    fn test_upstream_resistance() {
        let scenario = scenario_with_current(CurrentSign::Upstream);
        let crossing = Crossing::for_segment(&scenario.stations[0], &scenario);
        assert_abs_diff_eq!(crossing.energy.0, 62.5);
    }

    #[test]
    fn test_downstream_aid() {
        let scenario = scenario_with_current(CurrentSign::Downstream);
        let crossing = Crossing::for_segment(&scenario.stations[0], &scenario);
        assert_abs_diff_eq!(crossing.energy.0, 37.5);
    }

    #[test]
    fn test_structural_infeasibility() {
        let scenario = scenario_with_current(CurrentSign::Upstream);
        let crossing = Crossing::for_segment(&scenario.stations[0], &scenario);
        assert!(!crossing.exceeds(scenario.battery_capacity));
        assert!(crossing.exceeds(KilowattHours::from(60.0)));
    }

    #[test]
    fn test_crossings_skip_terminus() {
        let scenario = scenario_with_current(CurrentSign::Slack);
        assert_eq!(crossings(&scenario).len(), 1);
    }
}
