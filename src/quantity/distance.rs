use std::ops::{Div, Mul};

use crate::quantity::{
    Quantity,
    energy::KilowattHours,
    rate::KilowattHoursPerMile,
    speed::Knots,
    time::Hours,
};

pub type NauticalMiles = Quantity<f64, 0, 1, 0, 0>;

impl Mul<KilowattHoursPerMile> for NauticalMiles {
    type Output = KilowattHours;

    fn mul(self, rhs: KilowattHoursPerMile) -> Self::Output {
        Quantity(self.0 * rhs.0)
    }
}

impl Div<Knots> for NauticalMiles {
    type Output = Hours;

    fn div(self, rhs: Knots) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}
