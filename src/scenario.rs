pub mod error;
pub mod pricing;
pub mod station;

use serde::{Deserialize, Serialize};

use crate::{
    quantity::{
        clock::ClockTime,
        energy::KilowattHours,
        power::Kilowatts,
        rate::KilowattHoursPerMile,
        speed::Knots,
        time::Hours,
    },
    scenario::{error::ConfigError, station::Station},
};

/// One voyage to plan: the fixed station sequence plus the vessel parameters.
///
/// Immutable during a solve; two solves on the same scenario produce
/// identical plans.
#[derive(Clone, Debug, Serialize, Deserialize, bon::Builder)]
pub struct Scenario {
    pub stations: Vec<Station>,

    #[serde(rename = "battery_capacity_kwh")]
    pub battery_capacity: KilowattHours,

    /// Never to be violated en route.
    #[serde(rename = "min_soc_kwh", default)]
    #[builder(default)]
    pub min_soc: KilowattHours,

    #[serde(rename = "initial_soc_kwh")]
    pub initial_soc: KilowattHours,

    /// Required on arrival at the terminus.
    #[serde(rename = "final_soc_required_kwh", default)]
    #[builder(default)]
    pub final_soc_required: KilowattHours,

    #[serde(rename = "departure_hour", default)]
    #[builder(default)]
    pub departure: ClockTime,

    pub cruise_speed: Knots,

    #[serde(rename = "base_consumption_per_unit")]
    pub base_consumption: KilowattHoursPerMile,

    /// Precision/performance dial of the state-of-charge grid.
    #[serde(rename = "soc_step_kwh")]
    pub soc_step: KilowattHours,

    /// Permit combined swap and grid-charge within a single berth event.
    #[serde(default)]
    #[builder(default)]
    pub allow_hybrid_swap_and_charge: bool,
}

impl Scenario {
    /// Number of sailed segments; one fewer than the number of stations.
    pub fn segment_count(&self) -> usize {
        self.stations.len().saturating_sub(1)
    }

    /// Clock reading after the given linear hours since departure.
    pub fn clock_at(&self, elapsed: Hours) -> ClockTime {
        self.departure.advanced_by(elapsed)
    }

    /// Reject self-contradictory input before any solve work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stations.is_empty() {
            return Err(ConfigError::NoStations);
        }
        if self.cruise_speed <= Knots::ZERO {
            return Err(ConfigError::NonPositiveCruiseSpeed);
        }
        if self.base_consumption.is_negative() {
            return Err(ConfigError::NegativeConsumption);
        }
        if !self.departure.is_valid() {
            return Err(ConfigError::DepartureHourOutOfRange { hour: self.departure.hour() });
        }
        if self.battery_capacity <= KilowattHours::ZERO {
            return Err(ConfigError::NonPositiveCapacity);
        }

        let within_battery =
            |soc: KilowattHours| !soc.is_negative() && soc <= self.battery_capacity;
        if !within_battery(self.min_soc) {
            return Err(ConfigError::MinSocOutOfRange { min_soc_kwh: self.min_soc.0 });
        }
        if !within_battery(self.initial_soc) {
            return Err(ConfigError::InitialSocOutOfRange { initial_soc_kwh: self.initial_soc.0 });
        }
        if !within_battery(self.final_soc_required) {
            return Err(ConfigError::FinalSocOutOfRange {
                final_soc_kwh: self.final_soc_required.0,
            });
        }
        if self.soc_step <= KilowattHours::ZERO || self.soc_step > self.battery_capacity {
            return Err(ConfigError::SocStepOutOfRange { step_kwh: self.soc_step.0 });
        }

        for (index, station) in self.stations.iter().enumerate() {
            self.validate_station(index, station)?;
        }
        Ok(())
    }

    fn validate_station(&self, index: usize, station: &Station) -> Result<(), ConfigError> {
        let fail = |error: fn(String) -> ConfigError| Err(error(station.id.clone()));

        let is_terminus = index + 1 == self.stations.len();
        if !is_terminus && station.distance_to_next.is_negative() {
            return fail(|station| ConfigError::NegativeDistance { station });
        }
        if station.queue_time.is_negative()
            || station.swap_time_per_container.is_negative()
            || station.max_dwell.is_negative()
        {
            return fail(|station| ConfigError::NegativeDuration { station });
        }
        if station.charging_power.is_negative() || station.hotelling_power.is_negative() {
            return fail(|station| ConfigError::NegativePower { station });
        }
        if station.charging_allowed && station.charging_power <= Kilowatts::ZERO {
            return fail(|station| ConfigError::ChargingWithoutPower { station });
        }
        if station.swap_allowed
            && (station.container_count == 0
                || station.container_capacity <= KilowattHours::ZERO)
        {
            return fail(|station| ConfigError::SwapWithoutContainers { station });
        }

        let pricing = &station.pricing;
        if pricing.base_service_fee.is_negative()
            || pricing.swap_cost_per_container.is_negative()
            || pricing.location_premium_per_container.is_negative()
            || pricing.energy_cost_per_kwh.is_negative()
            || pricing.degradation_fee_per_kwh.is_negative()
        {
            return fail(|station| ConfigError::NegativePricing { station });
        }
        if pricing.peak_hour_multiplier < 0.0 {
            return fail(|station| ConfigError::NegativePeakMultiplier { station });
        }
        if !(0.0..1.0).contains(&pricing.subscription_discount) {
            return Err(ConfigError::DiscountOutOfRange {
                station: station.id.clone(),
                discount: pricing.subscription_discount,
            });
        }
        for bound in [pricing.peak_start, pricing.peak_end].into_iter().flatten() {
            if !bound.is_valid() {
                return fail(|station| ConfigError::ClockOutOfRange { station });
            }
        }

        if let Some(hours) = station.operating_hours {
            if !hours.start.is_valid() || !hours.end.is_valid() {
                return fail(|station| ConfigError::ClockOutOfRange { station });
            }
            if hours.is_empty() {
                return fail(|station| ConfigError::DegenerateOperatingHours { station });
            }
        }
        Ok(())
    }
}
