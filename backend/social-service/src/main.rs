use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use doc_store::{DocumentStore, MemoryStore};
use social_service::handlers::{
    notifications::register_routes as register_notifications,
    posts::register_routes as register_posts,
    profiles::register_routes as register_profiles,
    social::register_routes as register_social,
};
use social_service::services::{
    FollowService, InboxService, LikeService, PostService, ProfileService,
};
use social_service::workers::PostCreatedWorker;
use social_service::{metrics, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting social service");

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new(config.store.to_store_config()));

    let follow_service = FollowService::new(store.clone());
    let like_service = LikeService::new(store.clone());
    let post_service = PostService::new(store.clone());
    let profile_service = ProfileService::new(store.clone());
    let inbox_service = InboxService::new(store.clone());

    // Fallback fan-out for posts reaching the store without going through
    // the callable create operation.
    tokio::spawn(PostCreatedWorker::new(store.clone()).run());

    let addr = format!("{}:{}", config.app.host, config.app.http_port);
    tracing::info!("Starting HTTP server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(follow_service.clone()))
            .app_data(web::Data::new(like_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(web::Data::new(inbox_service.clone()))
            .wrap(middleware::Logger::default())
            .route("/health", web::get().to(|| async { "OK" }))
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .route("/", web::get().to(|| async { "Social Service v1.0" }))
            .configure(|cfg| {
                register_social(cfg);
                register_posts(cfg);
                register_profiles(cfg);
                register_notifications(cfg);
            })
    })
    .bind(&addr)?
    .run()
    .await
}
