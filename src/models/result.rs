use serde_json::{json, Map, Value};

use crate::error::AppError;
use crate::models::action::Action;

/// ISO 8601 local time with microseconds, e.g. `2024-05-01T13:45:12.123456`.
pub fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Outcome of one dispatched action.
#[derive(Debug)]
pub enum ActionResult {
    Status {
        info: Map<String, Value>,
        timestamp: String,
    },
    Success {
        action: Action,
        timestamp: String,
    },
    Failure(AppError),
}

impl ActionResult {
    pub fn status(info: Value) -> Self {
        let info = match info {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("info".into(), other);
                map
            }
        };
        ActionResult::Status {
            info,
            timestamp: timestamp(),
        }
    }

    pub fn success(action: Action) -> Self {
        ActionResult::Success {
            action,
            timestamp: timestamp(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ActionResult::Failure(_))
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            ActionResult::Failure(err) => Some(err),
            _ => None,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.error().map(AppError::exit_code).unwrap_or(0)
    }

    /// The flat JSON object printed for this result.
    pub fn to_json(&self) -> Value {
        match self {
            ActionResult::Status { info, timestamp } => {
                let mut map = info.clone();
                map.insert("timestamp".into(), json!(timestamp));
                Value::Object(map)
            }
            ActionResult::Success { action, timestamp } => {
                let mut map = Map::new();
                map.insert("success".into(), json!(true));
                map.insert("action".into(), json!(action.name()));
                map.extend(action.params());
                map.insert("timestamp".into(), json!(timestamp));
                Value::Object(map)
            }
            ActionResult::Failure(err) => err.to_json(),
        }
    }
}

impl From<AppError> for ActionResult {
    fn from(err: AppError) -> Self {
        ActionResult::Failure(err)
    }
}
