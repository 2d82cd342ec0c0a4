use actix_web::HttpResponse;
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, TextEncoder};

static NOTIFICATIONS_ENQUEUED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "social_service_notifications_enqueued_total",
            "Notification documents enqueued into user inboxes",
        ),
        &["type"],
    )
    .expect("failed to create social_service_notifications_enqueued_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register social_service_notifications_enqueued_total");
    counter
});

static FANOUT_BATCHES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "social_service_fanout_batches_total",
            "Fan-out batch commits by outcome",
        ),
        &["outcome"],
    )
    .expect("failed to create social_service_fanout_batches_total");
    prometheus::default_registry()
        .register(Box::new(counter.clone()))
        .expect("failed to register social_service_fanout_batches_total");
    counter
});

pub fn observe_notifications(kind: &str, count: u64) {
    NOTIFICATIONS_ENQUEUED_TOTAL
        .with_label_values(&[kind])
        .inc_by(count);
}

pub fn observe_fanout_batch(outcome: &str) {
    FANOUT_BATCHES_TOTAL.with_label_values(&[outcome]).inc();
}

pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
