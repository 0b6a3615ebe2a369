//! Mind-map generation route.

use axum::Json;
use axum::extract::State;
use tracing::{info, warn};

use models::api::{MindMapRequest, MindMapResponse};

use super::auth::MaybeToken;
use super::error::ApiError;
use crate::services::mind_map::{self, MindMapServiceError};
use crate::state::AppState;

/// `POST /api/mind-maps/generate`: upload a document, get a map back.
pub async fn generate(
    State(state): State<AppState>,
    MaybeToken(token): MaybeToken,
    Json(req): Json<MindMapRequest>,
) -> Result<Json<MindMapResponse>, ApiError> {
    match mind_map::generate(state.backend.as_ref(), &state.functions.mind_map, token.as_deref(), &req.file).await {
        Ok(map) => {
            info!(map_id = %map.id, nodes = map.node_count(), "mind map generated");
            Ok(Json(MindMapResponse { map }))
        }
        Err(MindMapServiceError::EmptyFile) => Err(ApiError::BadRequest("O arquivo enviado está vazio".into())),
        Err(e) => {
            warn!(error = %e, file = %req.file.name, "mind map generation failed");
            Err(ApiError::Upstream("Erro ao gerar mapa mental".into()))
        }
    }
}

#[cfg(test)]
#[path = "mind_maps_test.rs"]
mod tests;
