use serde::Serialize;

use super::plan::{Plan, PlanPatch};

#[derive(Debug, Serialize)]
pub struct GetPlanListResponse {
    #[serde(rename = "planList", skip_serializing_if = "Option::is_none")]
    pub plan_list: Option<Vec<Plan>>,
    pub code: String,
    pub message: String,
}

impl GetPlanListResponse {
    pub fn ok(plan_list: Vec<Plan>) -> Self {
        Self {
            plan_list: Some(plan_list),
            code: "1".to_string(),
            message: "获取成功".to_string(),
        }
    }

    pub fn fail() -> Self {
        Self {
            plan_list: None,
            code: "0".to_string(),
            message: "获取失败".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddPlanListResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_list: Option<Vec<Plan>>,
}

impl AddPlanListResponse {
    pub fn ok(add_list: Vec<Plan>) -> Self {
        Self {
            code: "1".to_string(),
            message: "添加成功".to_string(),
            add_list: Some(add_list),
        }
    }

    pub fn fail() -> Self {
        Self {
            code: "0".to_string(),
            message: "添加失败".to_string(),
            add_list: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdatePlanListResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<PlanPatch>>,
}

impl UpdatePlanListResponse {
    pub fn ok(data: Vec<PlanPatch>) -> Self {
        Self {
            code: "1".to_string(),
            message: "更新成功".to_string(),
            data: Some(data),
        }
    }

    pub fn fail() -> Self {
        Self {
            code: "0".to_string(),
            message: "更新失败".to_string(),
            data: None,
        }
    }
}

/// Bare `{code, message}` envelope, used where no data field travels along
/// (delete results, unknown actions).
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub code: String,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: &str) -> Self {
        Self {
            code: "1".to_string(),
            message: message.to_string(),
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            code: "0".to_string(),
            message: message.to_string(),
        }
    }
}
