/// Follow and like handlers - the callable toggle operations
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::identity::AuthenticatedUser;
use crate::services::{FollowService, LikeService};

#[derive(Debug, Deserialize)]
pub struct FollowRequest {
    #[serde(rename = "targetUid")]
    pub target_uid: String,
}

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub following: bool,
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    #[serde(rename = "postId")]
    pub post_id: String,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub liked: bool,
}

/// Toggle a follow relationship
///
/// POST /api/v1/social/follow
pub async fn follow_user(
    service: web::Data<FollowService>,
    caller: AuthenticatedUser,
    req: web::Json<FollowRequest>,
) -> ServiceResult<HttpResponse> {
    let following = service.toggle(&caller.0, &req.target_uid).await?;
    Ok(HttpResponse::Ok().json(FollowResponse { following }))
}

/// Toggle a like on a post
///
/// POST /api/v1/social/like
pub async fn toggle_like(
    service: web::Data<LikeService>,
    caller: AuthenticatedUser,
    req: web::Json<LikeRequest>,
) -> ServiceResult<HttpResponse> {
    let liked = service.toggle(&caller.0, &req.post_id).await?;
    Ok(HttpResponse::Ok().json(LikeResponse { liked }))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/social")
            .route("/follow", web::post().to(follow_user))
            .route("/like", web::post().to(toggle_like)),
    );
}
