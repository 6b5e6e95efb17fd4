use std::future::Future;
use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use transit_common::caller::{Caller, CallerError};

use super::error::AuthError;
use crate::{context::ApiContext, error::ApiError};

/// Extractor that REQUIRES a valid driver bearer token.
///
/// Rejects with 403 when no token is presented and 401 when the token is
/// invalid or expired.
///
/// # Examples
///
/// ```rust,ignore
/// use transit_api::auth::Auth;
///
/// pub async fn driver_bus(
///     State(ctx): State<ApiContext>,
///     Auth(caller): Auth,  // ← extracts authenticated driver
/// ) -> Result<Json<Bus>, ApiError> {
///     let bus_id = caller.bus_id;
///     // ... look up the bus
/// }
/// ```
pub struct Auth(pub Caller);

impl FromRequestParts<ApiContext> for Auth {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &ApiContext,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let auth_manager = Arc::clone(&state.auth_manager);
        async move {
            let caller = auth_manager
                .authenticate(parts)
                .await
                .map_err(|e| match e {
                    AuthError::MissingCredentials => CallerError::MissingToken,
                    e => CallerError::unauthorized(Some(e.to_string())),
                })?;
            Ok(Auth(caller))
        }
    }
}
