use std::collections::HashMap;

use axum::{extract::State, Json};

use crate::{
    api::{middleware::ApiResult, AppState},
    models::{SendBroadcastRequest, SendBroadcastResponse, SendTemplateBroadcastRequest},
};

/// Send caller-resolved subject/content to a set of users. The admin UI
/// resolves template variables before calling this; only `{name}` and
/// `{email}` remain for per-recipient substitution.
pub async fn send_broadcast(
    State(state): State<AppState>,
    Json(req): Json<SendBroadcastRequest>,
) -> ApiResult<Json<SendBroadcastResponse>> {
    let outcome = state
        .broadcast_service
        .send_broadcast(&req.user_ids, &req.subject, &req.content, &HashMap::new())
        .await?;

    Ok(Json(SendBroadcastResponse::from(outcome)))
}

/// Send a built-in template, resolved server-side with the supplied
/// variable map.
pub async fn send_template_broadcast(
    State(state): State<AppState>,
    Json(req): Json<SendTemplateBroadcastRequest>,
) -> ApiResult<Json<SendBroadcastResponse>> {
    let outcome = state
        .broadcast_service
        .send_template_broadcast(&req.user_ids, &req.template_id, &req.variables)
        .await?;

    Ok(Json(SendBroadcastResponse::from(outcome)))
}
