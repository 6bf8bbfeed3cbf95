use std::future::{ready, Ready};

use actix_web::{
    body::MessageBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    middleware::Next,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};

use crate::auth::decode_jwt;
use crate::config::Config;
use crate::errors::ApiError;
use crate::models::Claims;

/// Identity attached by the authentication gate. Handlers that require a
/// caller declare this as an extractor parameter; everything else ignores
/// it.
#[derive(Debug, Clone)]
pub struct Identity(pub Claims);

/// Authentication gate, applied to every route. Decodes the Authorization
/// header if present and attaches the identity on success. Never rejects:
/// a bad token leaves the request anonymous, same as no token at all.
pub async fn authentication(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if let Some(claims) = identity_from(&req) {
        req.extensions_mut().insert(Identity(claims));
    }
    next.call(req).await
}

fn identity_from(req: &ServiceRequest) -> Option<Claims> {
    let config = req.app_data::<web::Data<Config>>()?;
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    // Accept the bare token as well as the Bearer form.
    let token = header.strip_prefix("Bearer ").unwrap_or(header);
    decode_jwt(token, &config.secret)
}

impl FromRequest for Identity {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or(ApiError::Unauthorized),
        )
    }
}
