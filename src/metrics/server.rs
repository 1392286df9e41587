use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use prometheus::{Encoder, Registry, TextEncoder};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{Metrics, OUTCOME_FAILURE, OUTCOME_SUCCESS};

/// Serve `/metrics` for scraping and `/health` with a summary of rebuild activity.
/// Runs on its own runtime, separate from the consumer loop.
pub async fn start_metrics_server(metrics: Arc<Metrics>, port: u16) -> std::io::Result<()> {
    tracing::info!(port, "Starting metrics server on http://0.0.0.0:{}/metrics", port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(metrics.clone()))
            .route("/metrics", web::get().to(metrics_handler))
            .route("/health", web::get().to(health_handler))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

async fn metrics_handler(metrics: web::Data<Arc<Metrics>>) -> impl Responder {
    match render(metrics.registry()) {
        Ok(buffer) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn health_handler(metrics: web::Data<Arc<Metrics>>) -> impl Responder {
    HttpResponse::Ok().json(health_report(&metrics))
}

fn render(registry: &Registry) -> prometheus::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    Ok(buffer)
}

/// Liveness plus run counters, so an operator can tell whether rebuilds are failing
fn health_report(metrics: &Metrics) -> Value {
    json!({
        "status": "healthy",
        "service": "club-read-updater",
        "runs": {
            "succeeded": metrics.club_runs.with_label_values(&[OUTCOME_SUCCESS]).get(),
            "failed": metrics.club_runs.with_label_values(&[OUTCOME_FAILURE]).get(),
        },
        "projections": {
            "written": metrics.projections_written.get(),
            "failed": metrics.projection_write_failures.get(),
        },
    })
}
