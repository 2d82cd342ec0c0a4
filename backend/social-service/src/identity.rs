/// Caller identity extraction
///
/// Authentication itself is delegated to the identity provider in front of
/// this service; requests arrive with a verified uid in the `x-user-id`
/// header. Handlers take [`AuthenticatedUser`] as a parameter, so a request
/// without an identity is rejected before any read happens.
use std::future::{ready, Ready};

use actix_web::{dev::Payload, FromRequest, HttpRequest};

use crate::error::AppError;

/// Header carrying the gateway-verified caller uid.
pub const IDENTITY_HEADER: &str = "x-user-id";

/// Verified identity of the calling user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let uid = req
            .headers()
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        ready(
            uid.map(AuthenticatedUser)
                .ok_or_else(|| AppError::Unauthenticated("no verified identity on request".to_string())),
        )
    }
}
