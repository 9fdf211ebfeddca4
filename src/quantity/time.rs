use std::fmt::{Display, Formatter};

use crate::quantity::Quantity;

pub type Hours = Quantity<f64, 0, 0, 1, 0>;

impl Display for Hours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} h", self.0)
    }
}
