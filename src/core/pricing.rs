use serde::Serialize;

use crate::{
    quantity::{clock::ClockTime, cost::Cost, energy::KilowattHours, power::Kilowatts, time::Hours},
    scenario::{pricing::PricingTerms, station::Station},
};

/// Per-station pricing function, curried with the station's tariff terms
/// and hotelling demand.
pub struct Tariff<'a> {
    terms: &'a PricingTerms,
    hotelling_power: Kilowatts,
}

impl<'a> Tariff<'a> {
    pub fn for_station(station: &'a Station) -> Self {
        Self { terms: &station.pricing, hotelling_power: station.hotelling_power }
    }

    /// Price a berth event.
    ///
    /// `energy` is the billable energy delta — what the swapped containers
    /// and the grid connection actually delivered, never the nominal
    /// container capacity. `berth` is the full time at the berth, which the
    /// shore connection covers for hotelling demand.
    pub fn quote(
        &self,
        containers: u32,
        energy: KilowattHours,
        arrival: ClockTime,
        berth: Hours,
    ) -> CostBreakdown {
        let containers = f64::from(containers);
        let service_fee = self.terms.base_service_fee;
        let swap_fee = self.terms.swap_cost_per_container * containers;
        let location_premium = self.terms.location_premium_per_container * containers;
        let energy_fee = energy * self.terms.energy_cost_per_kwh;
        let degradation_fee = energy * self.terms.degradation_fee_per_kwh;
        let components = service_fee + swap_fee + location_premium + energy_fee + degradation_fee;

        let peak_multiplier = match self.terms.peak_window() {
            Some(window) if window.contains(arrival) => self.terms.peak_hour_multiplier,
            _ => 1.0,
        };
        let peak_surcharge = components * (peak_multiplier - 1.0);
        let subtotal = components * peak_multiplier;
        let discount = subtotal * self.terms.subscription_discount;
        let hotelling_fee = self.hotelling_power * berth * self.terms.energy_cost_per_kwh;

        CostBreakdown {
            service_fee,
            swap_fee,
            location_premium,
            energy_fee,
            degradation_fee,
            peak_surcharge,
            discount,
            hotelling_fee,
            total: subtotal - discount + hotelling_fee,
        }
    }
}

/// Itemized price of a single berth event.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub service_fee: Cost,
    pub swap_fee: Cost,
    pub location_premium: Cost,
    pub energy_fee: Cost,
    pub degradation_fee: Cost,

    /// Extra charged by the peak multiplier on top of the plain components.
    pub peak_surcharge: Cost,

    /// Amount subtracted by the subscription discount.
    pub discount: Cost,

    /// Shore energy drawn by onboard services over the whole berth time.
    pub hotelling_fee: Cost,

    pub total: Cost,
}

impl CostBreakdown {
    pub const ZERO: Self = Self {
        service_fee: Cost::ZERO,
        swap_fee: Cost::ZERO,
        location_premium: Cost::ZERO,
        energy_fee: Cost::ZERO,
        degradation_fee: Cost::ZERO,
        peak_surcharge: Cost::ZERO,
        discount: Cost::ZERO,
        hotelling_fee: Cost::ZERO,
        total: Cost::ZERO,
    };
}
