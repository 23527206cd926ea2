use axum::routing::{delete, post};
use axum::{routing::get, Router};

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;
use crate::prelude::Result;

pub async fn build_routes() -> Result<Router> {
    let state = AppState::new().await?;
    let app = Router::new()
        .route("/", get(handlers::ui::cards))
        .route("/admin", get(handlers::ui::admin))
        .route("/api/admin/dashboard", get(handlers::admin::dashboard))
        .route("/api/admin/candidates", get(handlers::admin::list))
        .route(
            "/api/admin/candidates/{id}",
            get(handlers::admin::retrieve)
                .patch(handlers::admin::update)
                .delete(handlers::admin::remove),
        )
        .route("/api/admin/upload-resume", post(handlers::admin::upload_resume))
        .route(
            "/api/admin/regenerate-questions",
            post(handlers::admin::regenerate_questions),
        )
        .route("/api/candidates", get(handlers::candidates::list))
        .route("/api/candidates/export.csv", get(handlers::candidates::export_csv))
        .route("/api/candidates/bulk-delete", post(handlers::candidates::bulk_delete))
        .route(
            "/api/candidates/{id}",
            get(handlers::candidates::retrieve)
                .patch(handlers::candidates::update)
                .delete(handlers::candidates::remove),
        )
        .route("/api/scraper/scrape", post(handlers::scraper::scrape))
        .route("/api/scraper/search", post(handlers::scraper::search))
        .route("/api/scraper/candidates", get(handlers::scraper::list))
        .route("/api/scraper/candidates/{id}", delete(handlers::scraper::remove))
        .route("/api/scraper/generate-pdf", post(handlers::scraper::generate_pdf))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .with_state(state);

    Ok(app)
}
