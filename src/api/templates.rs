use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    api::{
        middleware::{ApiError, ApiResult},
        AppState,
    },
    models::{PreviewRequest, PreviewResponse, Template, TemplateListResponse},
    services::substitute,
};

pub async fn list_templates(State(state): State<AppState>) -> Json<TemplateListResponse> {
    Json(TemplateListResponse {
        templates: state.templates.all().to_vec(),
    })
}

pub async fn get_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Template>> {
    let template = state
        .templates
        .get_by_str(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Template '{}' not found", id)))?;

    Ok(Json(template.clone()))
}

/// Resolve a template with the supplied variables without sending
/// anything. `{name}` and `{email}` stay unresolved here since there is no
/// recipient to derive them from.
pub async fn preview_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<PreviewRequest>,
) -> ApiResult<Json<PreviewResponse>> {
    let template = state
        .templates
        .get_by_str(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Template '{}' not found", id)))?;

    Ok(Json(PreviewResponse {
        subject: substitute(&template.subject, &req.variables),
        html: substitute(&template.html, &req.variables),
    }))
}
