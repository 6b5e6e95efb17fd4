//! Output views for the various operations of the transit API.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod auth;
pub use auth::*;

mod bus;
pub use bus::*;

mod driver;
pub use driver::*;

mod route;
pub use route::*;

mod stop;
pub use stop::*;

/// An error response for an API endpoint. This is used to return errors to the
/// client in a consistent format.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// An optional error code that can be used to identify the type of error
    /// that occurred.
    pub code: Option<String>,

    /// A human-readable message describing the error that occurred.
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A bare `{message}` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a lookup that answers a miss with a message instead of an error
/// status. Serializes as either the record itself or `{"message": ...}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Lookup<T> {
    Found(T),
    Absent(MessageResponse),
}

impl<T> Lookup<T> {
    pub fn from_option(value: Option<T>, absent_message: &str) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::Absent(MessageResponse::new(absent_message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_absent_serializes_as_message() {
        let lookup: Lookup<u32> = Lookup::from_option(None, "No bus arriving soon");
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "No bus arriving soon" }));
    }

    #[test]
    fn lookup_found_serializes_as_inner_value() {
        let lookup = Lookup::from_option(Some(MessageResponse::new("hi")), "unused");
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "hi" }));
        assert!(matches!(lookup, Lookup::Found(_)));
    }

    #[test]
    fn error_response_omits_empty_details() {
        let body = ApiErrorResponse {
            code: Some("NotFound".into()),
            message: "Bus not found".into(),
            details: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["message"], "Bus not found");
    }
}
