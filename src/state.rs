use std::sync::Arc;

use crate::store::PlanStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PlanStore>,
}
