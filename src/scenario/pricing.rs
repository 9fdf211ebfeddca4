use serde::{Deserialize, Serialize};

use crate::quantity::{
    clock::{ClockTime, ClockWindow},
    cost::Cost,
    rate::KilowattHourRate,
};

/// Per-station tariff parameters.
///
/// Omitted components default to their identity (0 for additive fees, 1.0
/// for the peak multiplier), so a sparsely configured station prices as if
/// the missing components were never there.
#[derive(Clone, Debug, Serialize, Deserialize, bon::Builder)]
#[serde(default)]
pub struct PricingTerms {
    #[builder(default)]
    pub base_service_fee: Cost,

    #[builder(default)]
    pub swap_cost_per_container: Cost,

    #[builder(default)]
    pub location_premium_per_container: Cost,

    #[builder(default)]
    pub energy_cost_per_kwh: KilowattHourRate,

    #[builder(default)]
    pub degradation_fee_per_kwh: KilowattHourRate,

    #[builder(default = 1.0)]
    pub peak_hour_multiplier: f64,

    pub peak_start: Option<ClockTime>,

    pub peak_end: Option<ClockTime>,

    #[builder(default)]
    pub subscription_discount: f64,
}

impl Default for PricingTerms {
    fn default() -> Self {
        Self {
            base_service_fee: Cost::ZERO,
            swap_cost_per_container: Cost::ZERO,
            location_premium_per_container: Cost::ZERO,
            energy_cost_per_kwh: KilowattHourRate::ZERO,
            degradation_fee_per_kwh: KilowattHourRate::ZERO,
            peak_hour_multiplier: 1.0,
            peak_start: None,
            peak_end: None,
            subscription_discount: 0.0,
        }
    }
}

impl PricingTerms {
    /// The configured peak window, or [`None`] when either bound is missing.
    ///
    /// A window with `peak_start == peak_end` is empty and never matches;
    /// the diagnostic flags it when the multiplier is not 1.0.
    pub fn peak_window(&self) -> Option<ClockWindow> {
        match (self.peak_start, self.peak_end) {
            (Some(start), Some(end)) => Some(ClockWindow::new(start, end)),
            _ => None,
        }
    }
}
