use std::net::SocketAddr;

use axum::{Router, extract::{Query, State}, response::{IntoResponse, Response}, Json, http::{header, HeaderValue}};
use reqwest::StatusCode;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, services::{ServeDir, ServeFile}, set_header::SetResponseHeaderLayer, trace::TraceLayer};
use tracing::log;

use crate::{match_filter::{self, MatchFilter}, match_service::SafeMatchService, models_api::error::ApiError};

#[derive(Clone)]
pub struct ApiState {
    pub match_service: SafeMatchService,
}

pub struct Api;
impl Api {
    pub fn router(match_service: SafeMatchService, static_dir: &str) -> Router {
        let state = ApiState { match_service };
        let index = format!("{}/index.html", static_dir.trim_end_matches('/'));
        Router::new()
            .route("/api/matches", axum::routing::get(Api::get_matches))
            .route("/api/filters", axum::routing::get(Api::get_filters))
            .with_state(state)
            .fallback_service(ServeDir::new(static_dir).not_found_service(ServeFile::new(index)))
            .layer(ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache, no-store, must-revalidate"),
                ))
                .layer(CompressionLayer::new())
            )
    }

    pub async fn serve(port: u16, match_service: SafeMatchService, static_dir: &str) -> anyhow::Result<()> {
        let app = Api::router(match_service, static_dir);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        log::info!("[API] Listening on {}", addr);
        axum::Server::bind(&addr)
            .serve(app.into_make_service())
            .await?;
        Ok(())
    }

    /// First `filter` wins when the parameter is repeated.
    fn filter_token(query: &[(String, String)]) -> Option<&str> {
        query.iter()
            .find(|(key, _)| key == "filter")
            .map(|(_, value)| value.as_str())
    }

    async fn get_matches(State(state): State<ApiState>, Query(query): Query<Vec<(String, String)>>) -> Response {
        let latest = state.match_service.read().await.read();
        match latest {
            None => (StatusCode::SERVICE_UNAVAILABLE, Json(ApiError::new("Loading matches"))).into_response(),
            Some(Err(e)) => (e.status_code(), Json(ApiError { error: e.user_message() })).into_response(),
            Some(Ok(batch)) => match Api::filter_token(&query) {
                Some(token) => Json(MatchFilter::from_token(token).apply(&batch)).into_response(),
                None => Json(batch.as_slice()).into_response(),
            },
        }
    }

    async fn get_filters() -> impl IntoResponse {
        Json(match_filter::get_filters())
    }
}
