//! Platform access ports

pub mod ports;

use dancefloor_domain::{DanceFloorError, Result};
use serde::Serialize;
use serde_json::Value;

/// Serialise rows for a REST call.
pub fn to_rows<T: Serialize + ?Sized>(rows: &T) -> Result<Value> {
    serde_json::to_value(rows)
        .map_err(|err| DanceFloorError::Internal(format!("Failed to serialize rows: {err}")))
}
