// HTTP surface: guide and dish-pairing endpoints

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Json, State},
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::Config;
use crate::content::{generate_dish_pairing, generate_guide_content, AnthropicClient, ContentGenerator};
use crate::error::AppError;
use crate::guide::{assemble_guide, validate_event};
use crate::layout::GuideTemplate;
use crate::model::{DishPairing, DishPairingRequest, EventRequest};
use crate::render::Renderer;

/// Per-request knobs taken from configuration.
#[derive(Debug, Clone, Copy)]
pub struct GuideSettings {
    pub guide_max_tokens: u32,
    pub pairing_max_tokens: u32,
    pub require_all_categories: bool,
}

impl GuideSettings {
    pub fn from_config(config: &Config) -> Self {
        GuideSettings {
            guide_max_tokens: config.generator.guide_max_tokens,
            pairing_max_tokens: config.generator.pairing_max_tokens,
            require_all_categories: config.guide.require_all_categories,
        }
    }
}

impl Default for GuideSettings {
    fn default() -> Self {
        GuideSettings::from_config(&Config::default())
    }
}

/// Shared, read-only state. Requests never mutate it.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn ContentGenerator>,
    pub renderer: Arc<dyn Renderer>,
    pub template: Arc<GuideTemplate>,
    pub settings: GuideSettings,
}

impl AppState {
    pub fn new(generator: Arc<dyn ContentGenerator>, config: &Config) -> Self {
        AppState {
            generator,
            renderer: Arc::from(config.guide.renderer.build()),
            template: Arc::new(GuideTemplate::default()),
            settings: GuideSettings::from_config(config),
        }
    }
}

/// Build the application router with all routes configured
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/generate-pdf",
            post(generate_pdf).options(preflight).fallback(method_not_allowed),
        )
        .route(
            "/api/wine-recommendation",
            post(wine_recommendation)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/health",
            get(health_check).options(preflight).fallback(method_not_allowed),
        )
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: Config) -> Result<(), AppError> {
    if config.generator.api_key.is_none() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; content requests will fail");
    }

    let generator = Arc::new(AnthropicClient::new(&config.generator));
    let state = AppState::new(generator, &config);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!(bind = %config.server.bind, "wine-guide listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

// ============================================================================
// Handlers
// ============================================================================

fn body_error(rejection: JsonRejection) -> AppError {
    AppError::Validation(rejection.body_text())
}

/// Generate and return the eight-page wedding wine guide.
pub async fn generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<EventRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(event) = payload.map_err(body_error)?;
    validate_event(&event)?;

    let content = generate_guide_content(
        state.generator.as_ref(),
        &event,
        state.settings.guide_max_tokens,
    )
    .await?;
    let guide = assemble_guide(
        &event,
        content,
        &state.template,
        state.settings.require_all_categories,
    )?;

    let filename = guide.filename.clone();
    let pages = guide.pages.len();
    let renderer = Arc::clone(&state.renderer);
    let bytes = tokio::task::spawn_blocking(move || guide.render(renderer.as_ref()))
        .await
        .map_err(|e| AppError::Render(e.to_string()))??;

    tracing::info!(pages, bytes = bytes.len(), filename = %filename, "guide generated");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Recommend wines for a single dinner.
pub async fn wine_recommendation(
    State(state): State<AppState>,
    payload: Result<Json<DishPairingRequest>, JsonRejection>,
) -> Result<Json<DishPairing>, AppError> {
    let Json(request) = payload.map_err(body_error)?;
    if request.dish.as_deref().map(str::trim).unwrap_or("").is_empty() {
        return Err(AppError::Validation("Dish is required".into()));
    }

    generate_dish_pairing(
        state.generator.as_ref(),
        &request,
        state.settings.pairing_max_tokens,
    )
    .await
    .map(Json)
    .map_err(pairing_error)
}

/// The pairing endpoint reports failures with fixed messages.
fn pairing_error(err: AppError) -> AppError {
    let message = match err {
        AppError::Validation(_) => return err,
        AppError::Upstream { .. } => "API request failed",
        AppError::Parse(_) => "Failed to parse recommendations",
        _ => "Internal server error",
    };
    tracing::error!(error = %err, "dish pairing failed");
    AppError::Internal(message.into())
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "wine-guide",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> AppError {
    AppError::InvalidMethod
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_errors_use_fixed_messages() {
        let upstream = pairing_error(AppError::Upstream { status: 529 });
        assert_eq!(upstream.to_string(), "API request failed");

        let parse = pairing_error(AppError::Parse("Failed to parse AI response".into()));
        assert_eq!(parse.to_string(), "Failed to parse recommendations");

        let transport = pairing_error(AppError::Transport("connection refused".into()));
        assert_eq!(transport.to_string(), "Internal server error");

        let validation = pairing_error(AppError::Validation("Dish is required".into()));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_settings_follow_config() {
        let mut config = Config::default();
        config.guide.require_all_categories = false;
        config.generator.pairing_max_tokens = 500;
        let settings = GuideSettings::from_config(&config);
        assert!(!settings.require_all_categories);
        assert_eq!(settings.pairing_max_tokens, 500);
        assert_eq!(settings.guide_max_tokens, 4000);
    }
}
