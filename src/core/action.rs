use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::quantity::energy::KilowattHours;

/// What the vessel does at a station before sailing on.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BerthAction {
    /// Pass through without berthing.
    Idle,

    /// Exchange `containers` depleted containers for charged ones.
    Swap { containers: u32 },

    /// Draw `energy` from the grid while berthed.
    Charge { energy: KilowattHours },

    /// Combined swap and grid-charge within a single berth event.
    SwapAndCharge { containers: u32, energy: KilowattHours },
}

impl BerthAction {
    pub const fn containers(self) -> u32 {
        match self {
            Self::Idle | Self::Charge { .. } => 0,
            Self::Swap { containers } | Self::SwapAndCharge { containers, .. } => containers,
        }
    }

    pub const fn charged_energy(self) -> KilowattHours {
        match self {
            Self::Idle | Self::Swap { .. } => KilowattHours::ZERO,
            Self::Charge { energy } | Self::SwapAndCharge { energy, .. } => energy,
        }
    }

    pub const fn is_swap(self) -> bool {
        matches!(self, Self::Swap { .. } | Self::SwapAndCharge { .. })
    }
}

impl Display for BerthAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Swap { containers } => write!(f, "swap {containers}"),
            Self::Charge { energy } => write!(f, "charge {energy}"),
            Self::SwapAndCharge { containers, energy } => {
                write!(f, "swap {containers} + charge {energy}")
            }
        }
    }
}
