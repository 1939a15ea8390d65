use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current server time in milliseconds, the unit plan timestamps use.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "_id")]
    pub id: String,
    pub open_id: String,
    pub title: String,
    pub detail: String,
    pub is_finish: bool,
    pub create_time: i64,
    pub update_time: i64,
    pub organize: String,
    pub closing_date: i64,
    #[serde(rename = "stepList")]
    pub step_list: Vec<Value>,
    pub repeat: Map<String, Value>,
}

impl Plan {
    /// Normalize a creation payload into a full record. The identifier is left
    /// empty until storage assigns one; `repeat` always starts out empty.
    pub fn from_request(req: NewPlanRequest, now: i64) -> Self {
        Self {
            id: String::new(),
            open_id: req.open_id.unwrap_or_default(),
            title: req.title.trim().to_string(),
            detail: req.detail.unwrap_or_default(),
            is_finish: false,
            create_time: now,
            update_time: now,
            organize: req.organize.unwrap_or_else(|| "normal".to_string()),
            closing_date: req.closing_date.unwrap_or(0),
            step_list: req.step_list.unwrap_or_default(),
            repeat: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlanRequest {
    pub open_id: Option<String>,
    pub title: String,
    pub detail: Option<String>,
    pub organize: Option<String>,
    pub closing_date: Option<i64>,
    #[serde(rename = "stepList")]
    pub step_list: Option<Vec<Value>>,
}

/// Partial update payload. Only the fields present are written; `create_time`
/// has no counterpart here so the creation timestamp can never be rewritten.
/// The `notUpdated` client marker is accepted on input and never echoed back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanPatch {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_finish: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organize: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_date: Option<i64>,
    #[serde(rename = "stepList", skip_serializing_if = "Option::is_none")]
    pub step_list: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Map<String, Value>>,
    #[serde(rename = "notUpdated", default, skip_serializing)]
    pub not_updated: Option<Value>,
}
