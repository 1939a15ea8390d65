pub mod sqlite;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Plan, PlanPatch};

pub use sqlite::SqlitePlanStore;

/// Client interface to the plan_list collection. Handlers receive this as an
/// injected dependency so tests can swap in a double.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Liveness probe backing the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;

    async fn find_by_owner(&self, open_id: &str) -> Result<Vec<Plan>, AppError>;

    /// All-or-nothing batch insert. Returns the assigned identifiers in batch
    /// order.
    async fn insert_many(&self, plans: &[Plan]) -> Result<Vec<String>, AppError>;

    /// Write the fields present in the patch onto one record. Returns the
    /// number of records modified (0 when the id is unknown). The identifier
    /// itself is never a written field.
    async fn update_by_id(&self, id: &str, patch: &PlanPatch) -> Result<u64, AppError>;

    /// Batch remove by identifier set. Returns the number of records removed.
    async fn delete_by_ids(&self, ids: &[String]) -> Result<u64, AppError>;
}
