//! Seeder output consumed by the scale test orchestrator

use serde::{Deserialize, Serialize};

use crate::types::schedule::AvailabilityWindow;

/// One seeded user as emitted on the seeder's final JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeededUser {
    pub email: String,
    pub user_id: String,
    pub profile_id: String,
    #[serde(default)]
    pub windows: Vec<AvailabilityWindow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_default_to_empty() {
        let user: SeededUser =
            serde_json::from_str(r#"{"email":"a@x.com","user_id":"u","profile_id":"p"}"#).unwrap();
        assert!(user.windows.is_empty());
    }
}
