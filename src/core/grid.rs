use serde::Serialize;

use crate::quantity::energy::KilowattHours;

/// Index into the state-of-charge grid; physical value is `index · step`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub struct SocLevel(pub u32);

/// Uniform grid of representable charge levels `{0, step, …, max · step}`.
///
/// Continuous energies are quantized by flooring, so the planner only ever
/// under-states the charge on board: a schedule feasible on the grid is
/// feasible in reality.
#[derive(Copy, Clone, Debug)]
pub struct SocGrid {
    step: KilowattHours,
    max_level: u32,
}

impl SocGrid {
    /// Tolerance against representation noise when an energy is an exact
    /// multiple of the step.
    const RELATIVE_EPSILON: f64 = 1e-9;

    /// Expects a validated scenario: `0 < step ≤ capacity`.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(step: KilowattHours, capacity: KilowattHours) -> Self {
        Self { step, max_level: (capacity.0 / step.0 + Self::RELATIVE_EPSILON) as u32 }
    }

    pub const fn step(&self) -> KilowattHours {
        self.step
    }

    pub const fn max_level(&self) -> SocLevel {
        SocLevel(self.max_level)
    }

    /// Pessimistic quantization: floor, clamped onto the grid.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn floor(&self, energy: KilowattHours) -> SocLevel {
        let level = (energy.0 / self.step.0 + Self::RELATIVE_EPSILON).floor().max(0.0) as u32;
        SocLevel(level.min(self.max_level))
    }

    pub fn energy(&self, level: SocLevel) -> KilowattHours {
        self.step * f64::from(level.0)
    }

    /// Grid steps of charge that still fit above `level`.
    pub const fn headroom(&self, level: SocLevel) -> u32 {
        self.max_level.saturating_sub(level.0)
    }
}
