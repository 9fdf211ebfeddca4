/// Fatal, self-contradictory configuration detected before any solve work.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("the station sequence is empty")]
    NoStations,

    #[error("station `{station}`: distance to the next station is negative")]
    NegativeDistance { station: String },

    #[error("cruise speed must be positive")]
    NonPositiveCruiseSpeed,

    #[error("base consumption must not be negative")]
    NegativeConsumption,

    #[error("departure hour {hour} is outside [0, 24)")]
    DepartureHourOutOfRange { hour: f64 },

    #[error("battery capacity must be positive")]
    NonPositiveCapacity,

    #[error("minimum state-of-charge {min_soc_kwh} kWh is outside [0, capacity]")]
    MinSocOutOfRange { min_soc_kwh: f64 },

    #[error("initial state-of-charge {initial_soc_kwh} kWh is outside [0, capacity]")]
    InitialSocOutOfRange { initial_soc_kwh: f64 },

    #[error("required final state-of-charge {final_soc_kwh} kWh is outside [0, capacity]")]
    FinalSocOutOfRange { final_soc_kwh: f64 },

    #[error("state-of-charge step {step_kwh} kWh is outside (0, capacity]")]
    SocStepOutOfRange { step_kwh: f64 },

    #[error("station `{station}`: negative queue, handling, or berth duration")]
    NegativeDuration { station: String },

    #[error("station `{station}`: negative charging or hotelling power")]
    NegativePower { station: String },

    #[error("station `{station}`: charging is allowed but charging power is not positive")]
    ChargingWithoutPower { station: String },

    #[error("station `{station}`: swapping is allowed but container geometry is missing")]
    SwapWithoutContainers { station: String },

    #[error("station `{station}`: negative pricing component")]
    NegativePricing { station: String },

    #[error("station `{station}`: peak-hour multiplier must not be negative")]
    NegativePeakMultiplier { station: String },

    #[error("station `{station}`: subscription discount {discount} is outside [0, 1)")]
    DiscountOutOfRange { station: String, discount: f64 },

    #[error("station `{station}`: clock value outside [0, 24)")]
    ClockOutOfRange { station: String },

    #[error("station `{station}`: operating hours open and close at the same instant")]
    DegenerateOperatingHours { station: String },
}
