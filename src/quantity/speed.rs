use crate::quantity::Quantity;

pub type Knots = Quantity<f64, 0, 1, -1, 0>;
