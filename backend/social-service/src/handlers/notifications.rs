/// Notification inbox handlers
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::ServiceResult;
use crate::identity::AuthenticatedUser;
use crate::services::InboxService;

/// List the caller's notifications, newest first
///
/// GET /api/v1/notifications
pub async fn list_notifications(
    service: web::Data<InboxService>,
    caller: AuthenticatedUser,
) -> ServiceResult<HttpResponse> {
    let entries = service.list(&caller.0).await?;
    Ok(HttpResponse::Ok().json(entries))
}

/// Count of the caller's unread notifications
///
/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    service: web::Data<InboxService>,
    caller: AuthenticatedUser,
) -> ServiceResult<HttpResponse> {
    let count = service.unread_count(&caller.0).await?;
    Ok(HttpResponse::Ok().json(json!({ "count": count })))
}

/// Mark one notification as read
///
/// PUT /api/v1/notifications/{id}/read
pub async fn mark_as_read(
    service: web::Data<InboxService>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ServiceResult<HttpResponse> {
    service.mark_read(&caller.0, &path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

/// Register routes
pub fn register_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .route("", web::get().to(list_notifications))
            .route("/unread-count", web::get().to(unread_count))
            .route("/{id}/read", web::put().to(mark_as_read)),
    );
}
