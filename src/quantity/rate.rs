use crate::quantity::Quantity;

/// Money per kilowatt-hour.
pub type KilowattHourRate = Quantity<f64, -1, 0, 0, 1>;

/// Propulsion energy per unit of distance.
///
/// The distance unit is whatever the scenario's segment distances are
/// expressed in; the collaborator layer is responsible for keeping the pair
/// coherent.
pub type KilowattHoursPerMile = Quantity<f64, 1, -1, 0, 0>;
