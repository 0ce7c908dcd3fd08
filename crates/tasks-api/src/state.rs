use std::sync::Arc;

use tasks_core::TaskRepository;

#[derive(Clone)]
pub struct ApiState {
    pub repo: Arc<dyn TaskRepository>,
}

impl ApiState {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self { repo }
    }
}
