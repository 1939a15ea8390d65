use std::sync::Arc;

use futures::future::join_all;
use tracing::{error, info, warn};

use crate::models::{
    AddPlanListRequest, AddPlanListResponse, DeletePlanListRequest, GetPlanListRequest,
    GetPlanListResponse, Plan, PlanPatch, StatusResponse, UpdatePlanListRequest,
    UpdatePlanListResponse, now_ms,
};
use crate::store::PlanStore;

pub struct PlanService {
    store: Arc<dyn PlanStore>,
}

impl PlanService {
    pub fn new(store: Arc<dyn PlanStore>) -> Self {
        Self { store }
    }

    /// All plans owned by one identity. An empty list is still a success.
    pub async fn get_plan_list(&self, req: GetPlanListRequest) -> GetPlanListResponse {
        let Some(open_id) = req.open_id else {
            return GetPlanListResponse::fail();
        };
        if open_id.is_empty() || open_id.starts_with('"') {
            warn!("rejected plan list fetch for malformed open_id");
            return GetPlanListResponse::fail();
        }

        match self.store.find_by_owner(&open_id).await {
            Ok(plan_list) => GetPlanListResponse::ok(plan_list),
            Err(err) => {
                error!("failed to fetch plan list: {}", err);
                GetPlanListResponse::fail()
            }
        }
    }

    /// Normalize and insert a batch of plans. Payloads without an owner are
    /// dropped silently; the batch fails only when nothing is left to insert.
    pub async fn add_plan_list(&self, req: AddPlanListRequest) -> AddPlanListResponse {
        let plan_list = match req.plan_list {
            Some(list) if !list.is_empty() => list,
            _ => return AddPlanListResponse::fail(),
        };

        let now = now_ms();
        let mut add_list: Vec<Plan> = plan_list
            .into_iter()
            .filter(|item| item.open_id.as_deref().is_some_and(|id| !id.is_empty()))
            .map(|item| Plan::from_request(item, now))
            .collect();

        if add_list.is_empty() {
            return AddPlanListResponse::fail();
        }

        match self.store.insert_many(&add_list).await {
            Ok(ids) => {
                for (plan, id) in add_list.iter_mut().zip(ids) {
                    plan.id = id;
                }
                AddPlanListResponse::ok(add_list)
            }
            Err(err) => {
                error!("failed to insert plan list: {}", err);
                AddPlanListResponse::fail()
            }
        }
    }

    /// Apply a batch of partial updates. Each item races independently against
    /// storage; the join resolves once every item has settled, and only items
    /// storage confirms as one modified record make it into the result.
    pub async fn update_plan_list(&self, req: UpdatePlanListRequest) -> UpdatePlanListResponse {
        let plan_list = match req.plan_list {
            Some(list) if !list.is_empty() => list,
            _ => return UpdatePlanListResponse::fail(),
        };

        let now = now_ms();
        let updates = plan_list.into_iter().map(|mut item| {
            let store = Arc::clone(&self.store);
            async move {
                let id = item.id.clone()?;
                item.not_updated = None;
                item.update_time = Some(now);

                match store.update_by_id(&id, &item).await {
                    Ok(1) => Some(item),
                    Ok(modified) => {
                        warn!("plan {} not updated ({} records modified)", id, modified);
                        None
                    }
                    Err(err) => {
                        error!("failed to update plan {}: {}", id, err);
                        None
                    }
                }
            }
        });

        let data: Vec<PlanPatch> = join_all(updates).await.into_iter().flatten().collect();

        if data.is_empty() {
            UpdatePlanListResponse::fail()
        } else {
            UpdatePlanListResponse::ok(data)
        }
    }

    /// Remove a batch of plans by id. Removing zero matching records is still
    /// a success; only a missing id list is an error.
    pub async fn delete_plan_list(&self, req: DeletePlanListRequest) -> StatusResponse {
        let Some(ids) = req.ids else {
            return StatusResponse::fail("删除失败，没有传递id");
        };

        match self.store.delete_by_ids(&ids).await {
            Ok(removed) => {
                info!("removed {} plans", removed);
                StatusResponse::ok("删除成功")
            }
            Err(err) => {
                error!("failed to delete plans: {}", err);
                StatusResponse::fail("删除失败")
            }
        }
    }
}
