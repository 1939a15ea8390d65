use axum::Json;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde_json::Value;
use tracing::warn;

use crate::error::AppError;
use crate::models::{
    AddPlanListResponse, GetPlanListResponse, StatusResponse, UpdatePlanListResponse,
};
use crate::services::PlanService;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/planinfo", post(invoke))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.ping().await?;
    Ok(StatusCode::OK)
}

/// Single dispatch endpoint: routes the `action` tag to its handler. Unknown
/// actions and payloads that fail boundary validation get an explicit failure
/// envelope rather than a transport error.
async fn invoke(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    let service = PlanService::new(state.store.clone());
    let action = body
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    match action.as_str() {
        "get_plan_list" => match serde_json::from_value(body) {
            Ok(req) => Json(service.get_plan_list(req).await).into_response(),
            Err(err) => {
                warn!("malformed get_plan_list request: {}", err);
                Json(GetPlanListResponse::fail()).into_response()
            }
        },
        "add_plan_list" => match serde_json::from_value(body) {
            Ok(req) => Json(service.add_plan_list(req).await).into_response(),
            Err(err) => {
                warn!("malformed add_plan_list request: {}", err);
                Json(AddPlanListResponse::fail()).into_response()
            }
        },
        "update_plan_list" => match serde_json::from_value(body) {
            Ok(req) => Json(service.update_plan_list(req).await).into_response(),
            Err(err) => {
                warn!("malformed update_plan_list request: {}", err);
                Json(UpdatePlanListResponse::fail()).into_response()
            }
        },
        "delete_plan_list" => match serde_json::from_value(body) {
            Ok(req) => Json(service.delete_plan_list(req).await).into_response(),
            Err(err) => {
                warn!("malformed delete_plan_list request: {}", err);
                Json(StatusResponse::fail("删除失败，没有传递id")).into_response()
            }
        },
        _ => {
            warn!("unknown action: {:?}", action);
            Json(StatusResponse::fail("未知操作")).into_response()
        }
    }
}
