use thiserror::Error;

/// Failure kinds raised by the calculation engine. All are raised immediately
/// and propagated to the caller; computations are deterministic and pure, so
/// there are no internal retries. The boundary layer is responsible for
/// translating these into user-facing messages.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Unknown appliance or fuel type: '{0}'")]
    UnknownApplianceType(String),
    #[error("Unsupported COP calculation method: '{0}'")]
    UnsupportedCopMethod(String),
    #[error("Hot temperature {t_hot}°C must exceed cold temperature {t_cold}°C in a Carnot COP calculation")]
    ThermalBoundsViolation { t_hot: f64, t_cold: f64 },
    #[error("A non-zero total is required to normalise {0}, but the total was zero")]
    DegenerateNormalization(&'static str),
    #[error("Unrecognised tariff rate period keys: {0:?}")]
    UnrecognizedTariffKeySet(Vec<String>),
}
