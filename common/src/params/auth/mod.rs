use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AuthLoginParams {
    /// The login email of the driver to authenticate as.
    pub email: String,

    /// The driver's secret. Compared case-sensitively.
    pub password: String,
}
