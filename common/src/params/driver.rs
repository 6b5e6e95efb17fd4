use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of a driver's location update.
///
/// `current_passengers` is signed on the wire so that a negative count is
/// rejected with a validation error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLocationParams {
    /// Id of the stop the bus is currently at.
    pub current_stop: u32,

    /// Id of the stop the bus is heading to.
    pub next_stop: u32,

    /// Number of passengers on board.
    pub current_passengers: i64,
}
