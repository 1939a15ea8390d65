use serde::Deserialize;

use super::plan::{NewPlanRequest, PlanPatch};

#[derive(Debug, Deserialize)]
pub struct GetPlanListRequest {
    pub open_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddPlanListRequest {
    pub plan_list: Option<Vec<NewPlanRequest>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlanListRequest {
    pub plan_list: Option<Vec<PlanPatch>>,
}

#[derive(Debug, Deserialize)]
pub struct DeletePlanListRequest {
    pub ids: Option<Vec<String>>,
}
