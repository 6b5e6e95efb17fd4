use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Driver;

/// Response for the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthLoginResponse {
    pub message: String,

    /// The bearer token for the authenticated driver. This token should be
    /// included in the `Authorization` header of subsequent requests as
    /// `Bearer <token>`.
    pub token: String,

    /// The authenticated driver's record.
    pub driver: Driver,
}
