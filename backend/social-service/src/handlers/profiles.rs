/// Profile handlers - sign-up profile creation and profile reads
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ServiceResult;
use crate::identity::AuthenticatedUser;
use crate::services::ProfileService;

#[derive(Debug, Deserialize)]
pub struct RegisterProfileRequest {
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "photoURL", default)]
    pub photo_url: String,
}

/// Create the caller's profile
///
/// PUT /api/v1/profiles
pub async fn register_profile(
    service: web::Data<ProfileService>,
    caller: AuthenticatedUser,
    req: web::Json<RegisterProfileRequest>,
) -> ServiceResult<HttpResponse> {
    let profile = service
        .register(&caller.0, &req.display_name, &req.photo_url)
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Get a profile by uid
///
/// GET /api/v1/profiles/{uid}
pub async fn get_profile(
    service: web::Data<ProfileService>,
    path: web::Path<String>,
) -> ServiceResult<HttpResponse> {
    let profile = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profiles")
            .route("", web::put().to(register_profile))
            .route("/{uid}", web::get().to(get_profile)),
    );
}
