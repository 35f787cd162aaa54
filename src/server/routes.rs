use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tower_http::trace::TraceLayer;

use crate::config::{SiteConfig, DEFAULT_CONSULTATION_COLLECTION, DEFAULT_TESTIMONIALS_COLLECTION};
use crate::core::page::{self, PageView, SiteContent};
use crate::core::PageController;
use crate::domain::ports::{ConfigProvider, DataService};

/// Shared by every request. Each request still gets its own controller.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn DataService>,
    pub content: Arc<SiteContent>,
    pub testimonials_collection: String,
    pub consultation_collection: String,
}

impl AppState {
    pub fn new(service: Arc<dyn DataService>, config: &SiteConfig) -> Self {
        Self {
            service,
            content: Arc::new(config.content.clone()),
            testimonials_collection: config.testimonials_collection().to_string(),
            consultation_collection: config.consultation_collection().to_string(),
        }
    }

    /// Default copy and collection names.
    pub fn with_service(service: Arc<dyn DataService>) -> Self {
        Self {
            service,
            content: Arc::new(SiteContent::default()),
            testimonials_collection: DEFAULT_TESTIMONIALS_COLLECTION.to_string(),
            consultation_collection: DEFAULT_CONSULTATION_COLLECTION.to_string(),
        }
    }

    async fn mounted_controller(&self) -> PageController<dyn DataService> {
        let mut controller = PageController::new(
            Arc::clone(&self.service),
            self.testimonials_collection.as_str(),
            self.consultation_collection.as_str(),
        );
        controller.mount().await;
        controller
    }

    fn render(&self, controller: &PageController<dyn DataService>) -> Response {
        let rendered = page::render(&PageView {
            content: &self.content,
            testimonials: controller.testimonials(),
            form: controller.form(),
            alert: controller.alert(),
        });
        match rendered {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "page rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}

pub async fn health() -> &'static str {
    "ok"
}

async fn index(State(state): State<AppState>) -> Response {
    let controller = state.mounted_controller().await;
    state.render(&controller)
}

// Always answers 200; a failed insert only shows up as the alert.
async fn submit_consultation(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut controller = state.mounted_controller().await;
    for (name, value) in fields {
        controller.update_named_field(&name, value);
    }
    let alert = controller.submit().await;
    tracing::debug!("Submission finished: {}", alert.text());
    state.render(&controller)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(submit_consultation))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
