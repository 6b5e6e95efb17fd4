use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// The unique identifier for this driver.
    pub id: u32,

    /// The driver's display name.
    pub name: String,

    /// The driver's login email.
    pub email: String,

    /// The driver's plaintext secret. Only present for drivers configured with
    /// a plaintext secret; hashed secrets are never echoed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// The bus this driver is assigned to.
    pub bus_id: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}
