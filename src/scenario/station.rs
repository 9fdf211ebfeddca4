use enumset::{EnumSet, EnumSetType};
use serde::{Deserialize, Serialize};

use crate::{
    quantity::{
        clock::ClockWindow,
        distance::NauticalMiles,
        energy::KilowattHours,
        power::Kilowatts,
        time::Hours,
    },
    scenario::pricing::PricingTerms,
};

/// Replenishment service offered by a station.
#[derive(Debug, EnumSetType)]
pub enum Service {
    /// Exchange depleted containers for charged ones.
    Swap,

    /// Exchange a strict subset of the containers.
    PartialSwap,

    /// Draw grid energy while berthed.
    Charge,
}

/// Direction of the water current on the outgoing segment.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum CurrentSign {
    /// Against the current; propulsion works harder.
    Upstream,

    #[default]
    Slack,

    /// With the current; propulsion is aided.
    Downstream,
}

impl CurrentSign {
    const DOWNSTREAM_FACTOR: f64 = 0.75;
    const SLACK_FACTOR: f64 = 1.0;
    const UPSTREAM_FACTOR: f64 = 1.25;

    /// Consumption multiplier applied to the segment's base energy.
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Upstream => Self::UPSTREAM_FACTOR,
            Self::Slack => Self::SLACK_FACTOR,
            Self::Downstream => Self::DOWNSTREAM_FACTOR,
        }
    }
}

impl TryFrom<i8> for CurrentSign {
    type Error = String;

    fn try_from(sign: i8) -> Result<Self, Self::Error> {
        match sign {
            -1 => Ok(Self::Upstream),
            0 => Ok(Self::Slack),
            1 => Ok(Self::Downstream),
            _ => Err(format!("current sign must be -1, 0, or 1, got {sign}")),
        }
    }
}

impl From<CurrentSign> for i8 {
    fn from(sign: CurrentSign) -> Self {
        match sign {
            CurrentSign::Upstream => -1,
            CurrentSign::Slack => 0,
            CurrentSign::Downstream => 1,
        }
    }
}

/// A berth along the fixed route.
#[derive(Clone, Debug, Serialize, Deserialize, bon::Builder)]
pub struct Station {
    #[builder(into)]
    pub id: String,

    /// Distance to the next station; ignored for the terminus.
    #[serde(rename = "dist_to_next", default)]
    #[builder(default)]
    pub distance_to_next: NauticalMiles,

    /// Current on the outgoing segment; ignored for the terminus.
    #[serde(rename = "current_sign", default)]
    #[builder(default)]
    pub current: CurrentSign,

    #[serde(default)]
    #[builder(default)]
    pub swap_allowed: bool,

    #[serde(default)]
    #[builder(default)]
    pub charging_allowed: bool,

    #[serde(default)]
    #[builder(default)]
    pub partial_swap_allowed: bool,

    /// Number of containers the vessel's pack is serviced as at this station.
    #[serde(default)]
    #[builder(default)]
    pub container_count: u32,

    #[serde(rename = "container_capacity_kwh", default)]
    #[builder(default)]
    pub container_capacity: KilowattHours,

    /// Charged containers on hand; each swap consumes one per container.
    #[serde(default)]
    #[builder(default)]
    pub charged_stock: u32,

    #[serde(rename = "charging_power_kw", default)]
    #[builder(default)]
    pub charging_power: Kilowatts,

    /// Shore demand of onboard services while berthed (cold-ironing).
    #[serde(rename = "hotelling_power_kw", default)]
    #[builder(default)]
    pub hotelling_power: Kilowatts,

    /// Absent means the station operates around the clock.
    #[serde(default)]
    pub operating_hours: Option<ClockWindow>,

    #[serde(rename = "queue_time_hr", default)]
    #[builder(default)]
    pub queue_time: Hours,

    #[serde(rename = "swap_time_per_container_hr", default)]
    #[builder(default)]
    pub swap_time_per_container: Hours,

    /// Longest allowed berth occupation for queueing, handling, and charging.
    #[serde(rename = "max_dwell_hr", default = "default_max_dwell")]
    #[builder(default = default_max_dwell())]
    pub max_dwell: Hours,

    #[serde(default)]
    #[builder(default)]
    pub pricing: PricingTerms,
}

fn default_max_dwell() -> Hours {
    Hours::from(24.0)
}

impl Station {
    pub fn services(&self) -> EnumSet<Service> {
        let mut services = EnumSet::new();
        if self.swap_allowed {
            services |= Service::Swap;
        }
        if self.swap_allowed && self.partial_swap_allowed {
            services |= Service::PartialSwap;
        }
        if self.charging_allowed {
            services |= Service::Charge;
        }
        services
    }

    pub fn offers_replenishment(&self) -> bool {
        !self.services().is_empty()
    }
}
