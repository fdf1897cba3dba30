use crate::components::schedule::Weekday;
use serde_json::{json, Map, Value};

fn day_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "status": { "type": "STRING", "description": "Either 'Work' or 'Off'." },
            "hours": { "type": "NUMBER", "description": "Total hours worked for the day. 0 if status is 'Off'." },
            "shiftDescription": { "type": "STRING", "description": "A clear text description of the assigned shift(s) for the day, or 'راحة' if off." }
        },
        "required": ["status", "hours", "shiftDescription"]
    })
}

/// Response schema sent with every generation request
pub fn response_schema() -> Value {
    let days: Map<String, Value> = Weekday::ALL
        .into_iter()
        .map(|day| (day.as_str().to_string(), day_schema()))
        .collect();
    let required: Vec<&str> = Weekday::ALL.into_iter().map(Weekday::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "employees": {
                "type": "ARRAY",
                "description": "An array of employee schedule objects.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "employeeName": {
                            "type": "STRING",
                            "description": "The full name of the employee (e.g., 'John Doe'), using one of the names provided in the prompt."
                        },
                        "totalHours": {
                            "type": "NUMBER",
                            "description": "The total calculated weekly hours for the employee. This value MUST NOT exceed 40."
                        },
                        "schedule": {
                            "type": "OBJECT",
                            "properties": days,
                            "required": required
                        }
                    },
                    "required": ["employeeName", "totalHours", "schedule"]
                }
            }
        },
        "required": ["employees"]
    })
}
