use super::backend::ModelBackend;
use super::generate_schedule;
use crate::components::roster::Employee;
use crate::components::schedule::{ScheduleData, ShiftTimes};
use crate::error::{generation_error, PlannerResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

/// The generation actor; requests are served one at a time
pub struct GenerationActor {
    backend: Arc<dyn ModelBackend>,
    command_rx: mpsc::Receiver<GenerationCommand>,
}

/// Commands that can be sent to the generation actor
pub enum GenerationCommand {
    Generate(
        Vec<Employee>,
        ShiftTimes,
        mpsc::Sender<PlannerResult<ScheduleData>>,
    ),
    Shutdown,
}

/// Handle for communicating with the generation actor
#[derive(Clone)]
pub struct GenerationActorHandle {
    command_tx: mpsc::Sender<GenerationCommand>,
}

impl GenerationActorHandle {
    /// Request a schedule and wait for the answer
    pub async fn generate(
        &self,
        employees: Vec<Employee>,
        shift_times: ShiftTimes,
    ) -> PlannerResult<ScheduleData> {
        let (response_tx, mut response_rx) = mpsc::channel(1);
        self.command_tx
            .send(GenerationCommand::Generate(employees, shift_times, response_tx))
            .await
            .map_err(|e| generation_error(&format!("Actor mailbox error: {}", e)))?;

        response_rx
            .recv()
            .await
            .ok_or_else(|| generation_error("Response channel closed"))?
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> PlannerResult<()> {
        let _ = self.command_tx.send(GenerationCommand::Shutdown).await;
        Ok(())
    }
}

impl GenerationActor {
    /// Create a new actor and return its handle
    pub fn new(backend: Arc<dyn ModelBackend>) -> (Self, GenerationActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(8);

        let actor = Self {
            backend,
            command_rx,
        };

        let handle = GenerationActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Generation actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GenerationCommand::Generate(employees, shift_times, response_tx) => {
                    let result =
                        generate_schedule(self.backend.as_ref(), &employees, &shift_times).await;
                    let _ = response_tx.send(result).await;
                }
                GenerationCommand::Shutdown => {
                    info!("Generation actor shutting down");
                    break;
                }
            }
        }

        info!("Generation actor shut down");
    }
}
