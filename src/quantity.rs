pub mod clock;
pub mod cost;
pub mod distance;
pub mod energy;
pub mod power;
pub mod rate;
pub mod speed;
pub mod time;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Dimensioned physical quantity.
///
/// The const parameters are the exponents of the four base dimensions:
/// energy, distance, time, and money. Cross-dimension arithmetic is provided
/// by explicit `Mul`/`Div` implementations on the concrete aliases.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Eq,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
#[serde(transparent)]
pub struct Quantity<T, const ENERGY: isize, const DISTANCE: isize, const TIME: isize, const MONEY: isize>(
    pub T,
);

impl<T, const ENERGY: isize, const DISTANCE: isize, const TIME: isize, const MONEY: isize>
    Quantity<T, ENERGY, DISTANCE, TIME, MONEY>
where
    Self: PartialOrd,
{
    pub fn min(mut self, rhs: Self) -> Self {
        if rhs < self {
            self = rhs;
        }
        self
    }

    pub fn max(mut self, rhs: Self) -> Self {
        if rhs > self {
            self = rhs;
        }
        self
    }

    pub fn clamp(mut self, min: Self, max: Self) -> Self {
        if self < min {
            self = min;
        }
        if self > max {
            self = max;
        }
        self
    }
}

impl<const ENERGY: isize, const DISTANCE: isize, const TIME: isize, const MONEY: isize>
    Quantity<f64, ENERGY, DISTANCE, TIME, MONEY>
{
    pub const ZERO: Self = Self(0.0);

    pub fn is_negative(self) -> bool {
        self.0 < 0.0
    }
}

impl<T, const ENERGY: isize, const DISTANCE: isize, const TIME: isize, const MONEY: isize> Mul<T>
    for Quantity<T, ENERGY, DISTANCE, TIME, MONEY>
where
    T: Mul<T>,
{
    type Output = Quantity<T::Output, ENERGY, DISTANCE, TIME, MONEY>;

    fn mul(self, rhs: T) -> Self::Output {
        Quantity(self.0 * rhs)
    }
}

impl<T, const ENERGY: isize, const DISTANCE: isize, const TIME: isize, const MONEY: isize> Div<T>
    for Quantity<T, ENERGY, DISTANCE, TIME, MONEY>
where
    T: Div<T>,
{
    type Output = Quantity<T::Output, ENERGY, DISTANCE, TIME, MONEY>;

    fn div(self, rhs: T) -> Self::Output {
        Quantity(self.0 / rhs)
    }
}
