//! Generation gateway: turns the roster and shift times into a weekly
//! schedule by asking a text-generation model.

mod actor;
pub mod backend;
mod handle;
pub mod prompt;
pub mod schema;
pub mod validation;

pub use backend::{GeminiBackend, ModelBackend};
pub use handle::GenerationHandle;
pub use prompt::build_prompt;
pub use schema::response_schema;
pub use validation::{parse_response, validate_request};

use crate::components::roster::Employee;
use crate::components::schedule::{ScheduleData, ShiftTimes};
use crate::error::{generation_error, Error, PlannerResult};
use tracing::{error, info};

/// Generate a schedule for `employees`.
///
/// The roster is validated before anything is sent. A missing API key is
/// reported as a configuration error; every other failure of the call or of
/// its answer is logged and reported with one generic message.
pub async fn generate_schedule(
    backend: &dyn ModelBackend,
    employees: &[Employee],
    shift_times: &ShiftTimes,
) -> PlannerResult<ScheduleData> {
    validate_request(employees)?;

    let prompt = build_prompt(employees, shift_times);
    let schema = response_schema();
    info!("Generating schedule for {} employees", employees.len());

    let response = match backend.generate_json(&prompt, &schema).await {
        Ok(response) => response,
        Err(Error::Config(message)) => {
            error!("Generation is not configured: {}", message);
            return Err(Error::Config(message));
        }
        Err(e) => {
            error!("Error generating schedule: {:?}", e);
            return Err(generation_error(&t!("generation_failed")));
        }
    };

    let schedule = parse_response(&response, employees)?;
    info!("Generated schedule with {} rows", schedule.employees.len());
    Ok(schedule)
}
