pub mod envelope;
pub mod plan;
pub mod request;

pub use envelope::{AddPlanListResponse, GetPlanListResponse, StatusResponse, UpdatePlanListResponse};
pub use plan::{NewPlanRequest, Plan, PlanPatch, now_ms};
pub use request::{AddPlanListRequest, DeletePlanListRequest, GetPlanListRequest, UpdatePlanListRequest};
