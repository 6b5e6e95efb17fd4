use thiserror::Error;

#[derive(Debug, Error)]
pub enum CallerError {
    #[error("No bearer token provided")]
    MissingToken,

    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },
}

impl CallerError {
    pub fn unauthorized(reason: Option<String>) -> Self {
        Self::Unauthorized {
            reason: reason.unwrap_or_else(|| "No reason provided".to_string()),
        }
    }
}

/// The driver behind an authenticated request, as decoded from their bearer
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub driver_id: u32,

    /// The bus this driver is allowed to update. Taken from the token, not
    /// re-checked against the driver records.
    pub bus_id: u32,
}

impl Caller {
    pub fn driver(driver_id: u32, bus_id: u32) -> Self {
        Self { driver_id, bus_id }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn driver_carries_token_bus() {
        let caller = Caller::driver(2, 7);
        assert_eq!(caller.driver_id, 2);
        assert_eq!(caller.bus_id, 7);
    }

    #[test]
    fn unauthorized_without_reason_gets_placeholder() {
        assert!(matches!(
            CallerError::unauthorized(None),
            CallerError::Unauthorized { reason } if reason == "No reason provided"
        ));
    }
}
