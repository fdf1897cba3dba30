use super::actor::{GenerationActor, GenerationActorHandle};
use super::backend::ModelBackend;
use crate::components::roster::Employee;
use crate::components::schedule::{ScheduleData, ShiftTimes};
use crate::error::PlannerResult;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the generation actor
#[derive(Clone)]
pub struct GenerationHandle {
    actor_handle: GenerationActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GenerationHandle {
    /// Create a new GenerationHandle and spawn the actor
    pub fn new(backend: Arc<dyn ModelBackend>) -> Self {
        let (mut actor, handle) = GenerationActor::new(backend);

        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    /// Generate a schedule for the given roster and shift times
    pub async fn generate(
        &self,
        employees: &[Employee],
        shift_times: &ShiftTimes,
    ) -> PlannerResult<ScheduleData> {
        self.actor_handle
            .generate(employees.to_vec(), shift_times.clone())
            .await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> PlannerResult<()> {
        self.actor_handle.shutdown().await
    }
}
