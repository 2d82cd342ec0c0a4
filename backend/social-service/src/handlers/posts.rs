/// Post handlers - post creation with follower fan-out
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::identity::AuthenticatedUser;
use crate::services::PostService;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub content: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePostResponse {
    #[serde(rename = "postId")]
    pub post_id: String,
}

/// Create a new post
///
/// POST /api/v1/posts
pub async fn create_post(
    service: web::Data<PostService>,
    caller: AuthenticatedUser,
    req: web::Json<CreatePostRequest>,
) -> ServiceResult<HttpResponse> {
    let post_id = service.create(&caller.0, &req.content, &req.image_url).await?;
    Ok(HttpResponse::Created().json(CreatePostResponse { post_id }))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/posts").route("", web::post().to(create_post)));
}
