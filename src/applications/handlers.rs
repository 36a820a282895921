use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{dto::MessageResponse, session::AuthUser},
    error::ApiError,
    state::AppState,
};

use super::{
    dto::{ApplicationResponse, CreatedResponse, NewApplication, StatsResponse, UpdateApplication},
    repo::{Application, StatusCount},
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/api/applications", get(list_applications))
        .route("/api/stats", get(stats))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/api/applications", post(create_application))
        .route(
            "/api/applications/:id",
            put(update_application).delete(delete_application),
        )
}

#[instrument(skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ApplicationResponse>>, ApiError> {
    let rows = Application::list_by_owner(&state.db, user_id).await?;
    let items = rows.into_iter().map(ApplicationResponse::from).collect();
    Ok(Json(items))
}

#[instrument(skip(state, payload))]
pub async fn create_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<NewApplication>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let Json(payload) = payload?;
    if payload.company.trim().is_empty() || payload.position.trim().is_empty() {
        return Err(ApiError::Validation(
            "Company and position are required".into(),
        ));
    }

    let row = Application::insert(&state.db, user_id, payload).await?;

    info!(application_id = %row.id, "application added");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: row.id,
            message: "Application added successfully",
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateApplication>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    if payload.company.trim().is_empty() || payload.position.trim().is_empty() {
        return Err(ApiError::Validation(
            "Company and position are required".into(),
        ));
    }

    if !Application::update(&state.db, user_id, id, payload).await? {
        return Err(ApiError::NotFound("Application not found".into()));
    }

    info!(application_id = %id, "application updated");
    Ok(Json(MessageResponse {
        message: "Application updated successfully",
    }))
}

#[instrument(skip(state))]
pub async fn delete_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Path(id) = id?;
    if !Application::delete(&state.db, user_id, id).await? {
        return Err(ApiError::NotFound("Application not found".into()));
    }

    info!(application_id = %id, "application deleted");
    Ok(Json(MessageResponse {
        message: "Application deleted successfully",
    }))
}

#[instrument(skip(state))]
pub async fn stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<StatsResponse>, ApiError> {
    let total = Application::count_by_owner(&state.db, user_id).await?;
    let counts = Application::status_counts(&state.db, user_id).await?;
    Ok(Json(build_stats(total, counts)))
}

fn build_stats(total: i64, counts: Vec<StatusCount>) -> StatsResponse {
    let by_status = counts.into_iter().map(|c| (c.status, c.count)).collect();
    StatsResponse { total, by_status }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_map_only_contains_observed_statuses() {
        let counts = vec![
            StatusCount {
                status: "Applied".into(),
                count: 2,
            },
            StatusCount {
                status: "Interview".into(),
                count: 1,
            },
        ];
        let stats = build_stats(3, counts);

        assert_eq!(stats.total, 3);
        assert_eq!(stats.by_status.len(), 2);
        assert_eq!(stats.by_status["Applied"], 2);
        assert_eq!(stats.by_status["Interview"], 1);
        assert!(!stats.by_status.contains_key("Offer"));
        assert_eq!(stats.by_status.values().sum::<i64>(), stats.total);
    }

    #[test]
    fn empty_repository_yields_empty_stats() {
        let stats = build_stats(0, Vec::new());
        assert_eq!(stats.total, 0);
        assert!(stats.by_status.is_empty());

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total"], 0);
        assert_eq!(json["by_status"], serde_json::json!({}));
    }
}
