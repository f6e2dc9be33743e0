use crate::config::MISSING_API_KEY;
use crate::server::state::{AppState, BusyStatus, Operation, SharedGenerator};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use kit_core::{CampaignSpec, KitError, MarketingKit, OutputFormat, SourceAsset};
use kit_engine::KitOrchestrator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { error: msg.into() }
    }
}

type ApiFailure = (StatusCode, Json<ApiError>);
type ApiResult<T> = Result<Json<T>, ApiFailure>;

fn err(status: StatusCode, msg: impl Into<String>) -> ApiFailure {
    (status, Json(ApiError::new(msg)))
}

/// HTTP status for each failure kind.
pub fn status_for(error: &KitError) -> StatusCode {
    match error {
        KitError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        KitError::Upstream(_) | KitError::NoPosters | KitError::NoSourceImage => {
            StatusCode::BAD_GATEWAY
        }
        KitError::InvalidDataUrl(_) => StatusCode::BAD_REQUEST,
        KitError::Busy => StatusCode::CONFLICT,
        KitError::Io(_) | KitError::Serde(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn kit_err(error: KitError) -> ApiFailure {
    err(status_for(&error), error.to_string())
}

fn bad_json(rejection: JsonRejection) -> ApiFailure {
    err(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Generation is refused up front when no credential was configured.
fn orchestrator(state: &AppState) -> Result<Arc<KitOrchestrator<SharedGenerator>>, ApiFailure> {
    state.orchestrator.clone().ok_or_else(|| kit_err(KitError::config(MISSING_API_KEY)))
}

/// Liveness probe
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// One row of the format table shown on the form
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FormatInfo {
    pub key: String,
    pub label: String,
}

/// List selectable output formats in form order
pub async fn list_formats() -> Json<Vec<FormatInfo>> {
    Json(
        OutputFormat::ALL
            .iter()
            .map(|f| FormatInfo { key: f.key().to_string(), label: f.label().to_string() })
            .collect(),
    )
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    #[serde(flatten)]
    pub busy: BusyStatus,
    pub configured: bool,
    pub has_kit: bool,
}

/// Busy flags and whether a kit is available
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        busy: state.busy.status(),
        configured: state.orchestrator.is_some(),
        has_kit: state.latest_kit.read().await.is_some(),
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SourceImageResponse {
    /// Data URL of the synthesized photo
    pub image: String,
}

/// Synthesize a source photo from the campaign description
pub async fn generate_source_image(
    State(state): State<AppState>,
    payload: Result<Json<CampaignSpec>, JsonRejection>,
) -> ApiResult<SourceImageResponse> {
    let orchestrator = orchestrator(&state)?;
    let Json(spec) = payload.map_err(bad_json)?;
    let _permit = state.busy.try_acquire(Operation::SourceImage).map_err(kit_err)?;

    match orchestrator.generate_source_image(&spec).await {
        Ok(image) => Ok(Json(SourceImageResponse { image: image.to_data_url() })),
        Err(e) => {
            warn!(error = %e, "source image generation failed");
            Err(kit_err(e))
        }
    }
}

/// Kit submission: the campaign plus its images as data URLs
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitRequest {
    pub campaign: CampaignSpec,
    pub source_image: String,
    #[serde(default)]
    pub customer_selfie: Option<String>,
}

/// Run every applicable stage and return the finished kit
pub async fn generate_kit(
    State(state): State<AppState>,
    payload: Result<Json<KitRequest>, JsonRejection>,
) -> ApiResult<MarketingKit> {
    let orchestrator = orchestrator(&state)?;
    let Json(request) = payload.map_err(bad_json)?;
    let _permit = state.busy.try_acquire(Operation::Kit).map_err(kit_err)?;

    let source = SourceAsset::from_data_url(&request.source_image).map_err(kit_err)?;
    let selfie = request
        .customer_selfie
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(SourceAsset::from_data_url)
        .transpose()
        .map_err(kit_err)?;

    // The previous kit is gone as soon as a new submission starts.
    *state.latest_kit.write().await = None;

    match orchestrator.generate_kit(&request.campaign, &source, selfie.as_ref()).await {
        Ok(kit) => {
            info!(kit.id = %kit.id, assets = kit.asset_count(), "kit ready");
            *state.latest_kit.write().await = Some(kit.clone());
            Ok(Json(kit))
        }
        Err(e) => {
            error!(error = %e, "kit generation failed");
            Err(kit_err(e))
        }
    }
}

/// The most recent successful kit
pub async fn latest_kit(State(state): State<AppState>) -> ApiResult<MarketingKit> {
    state
        .latest_kit
        .read()
        .await
        .clone()
        .map(Json)
        .ok_or_else(|| err(StatusCode::NOT_FOUND, "No kit has been generated yet"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_statuses() {
        assert_eq!(status_for(&KitError::config("x")), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&KitError::upstream("x")), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&KitError::NoPosters), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&KitError::InvalidDataUrl("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&KitError::Busy), StatusCode::CONFLICT);
    }
}
