//! User profile and role types
//!
//! Profiles reference an auth identity by `auth_user_id`; the platform owns
//! both rows, the tooling only inserts or looks them up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;
use crate::types::schedule::AvailabilityWindow;

/// Primary partner role, stored as a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DanceRole {
    Leader,
    Follower,
    Both,
}

impl DanceRole {
    pub const fn code(self) -> u8 {
        match self {
            Self::Leader => 0,
            Self::Follower => 1,
            Self::Both => 2,
        }
    }
}

/// WSDC skill level. Stored as its ordinal on profiles and as its label in
/// `schedule_preference_levels`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WsdcLevel {
    Newcomer,
    Novice,
    Intermediate,
    Advanced,
    AllStar,
    Champion,
}

impl_label_conversions!(WsdcLevel {
    Newcomer => "NEWCOMER",
    Novice => "NOVICE",
    Intermediate => "INTERMEDIATE",
    Advanced => "ADVANCED",
    AllStar => "ALL_STAR",
    Champion => "CHAMPION",
});

impl WsdcLevel {
    pub const fn code(self) -> u8 {
        match self {
            Self::Newcomer => 0,
            Self::Novice => 1,
            Self::Intermediate => 2,
            Self::Advanced => 3,
            Self::AllStar => 4,
            Self::Champion => 5,
        }
    }
}

/// Application role labels (`user_roles.role`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoleLabel {
    Dancer,
    Instructor,
    Admin,
    Organizer,
}

impl_label_conversions!(RoleLabel {
    Dancer => "DANCER",
    Instructor => "INSTRUCTOR",
    Admin => "ADMIN",
    Organizer => "ORGANIZER",
});

/// A user the seeder signs up and fills with profile and schedule data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFixture {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    pub primary_role: DanceRole,
    pub wsdc_level: WsdcLevel,
    pub competitiveness_level: u8,
    pub bio: Option<String>,
    pub dance_goals: Option<String>,
    pub windows: Vec<AvailabilityWindow>,
    pub roles: Vec<RoleLabel>,
}

impl UserFixture {
    /// `"Alice J."`-style label, falling back to the first name.
    pub fn short_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.first_name)
    }
}

/// Row posted to `user_profiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInsert {
    pub auth_user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dance_goals: Option<String>,
    pub primary_role: u8,
    pub wsdc_level: u8,
    pub competitiveness_level: u8,
    pub profile_visible: bool,
    pub account_status: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i32,
}

impl ProfileInsert {
    /// Visible, active, version-0 profile for `fixture`.
    pub fn from_fixture(auth_user_id: &str, fixture: &UserFixture, now: DateTime<Utc>) -> Self {
        Self {
            auth_user_id: auth_user_id.to_string(),
            email: fixture.email.clone(),
            first_name: fixture.first_name.clone(),
            last_name: fixture.last_name.clone(),
            display_name: fixture.display_name.clone(),
            bio: fixture.bio.clone(),
            dance_goals: fixture.dance_goals.clone(),
            primary_role: fixture.primary_role.code(),
            wsdc_level: fixture.wsdc_level.code(),
            competitiveness_level: fixture.competitiveness_level,
            profile_visible: true,
            account_status: 0,
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }
}

/// Row posted to `user_roles`; unique on `(user_id, role)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    pub user_id: String,
    pub role: RoleLabel,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;

    use super::*;
    use crate::types::schedule::Weekday;

    fn fixture() -> UserFixture {
        UserFixture {
            email: "alice@example.com".into(),
            password: "alice123".into(),
            first_name: "Alice".into(),
            last_name: "Johnson".into(),
            display_name: Some("Alice J.".into()),
            primary_role: DanceRole::Leader,
            wsdc_level: WsdcLevel::Intermediate,
            competitiveness_level: 3,
            bio: None,
            dance_goals: Some("Compete".into()),
            windows: vec![AvailabilityWindow::new(Weekday::Tuesday, "18:00:00", "21:00:00")],
            roles: vec![RoleLabel::Dancer],
        }
    }

    #[test]
    fn profile_insert_uses_codes_and_defaults() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        let row = ProfileInsert::from_fixture("auth-1", &fixture(), now);
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["auth_user_id"], json!("auth-1"));
        assert_eq!(value["primary_role"], json!(0));
        assert_eq!(value["wsdc_level"], json!(2));
        assert_eq!(value["profile_visible"], json!(true));
        assert_eq!(value["account_status"], json!(0));
        assert_eq!(value["version"], json!(0));
        assert_eq!(value["dance_goals"], json!("Compete"));
        assert!(value.get("bio").is_none());
    }

    #[test]
    fn role_labels_render_upper_case() {
        let row = RoleAssignment { user_id: "p1".into(), role: RoleLabel::Admin };
        assert_eq!(serde_json::to_value(row).unwrap(), json!({"user_id": "p1", "role": "ADMIN"}));
        assert_eq!(WsdcLevel::AllStar.to_string(), "ALL_STAR");
        assert_eq!(WsdcLevel::Novice.code(), 1);
    }

    #[test]
    fn short_name_falls_back_to_first_name() {
        let mut user = fixture();
        assert_eq!(user.short_name(), "Alice J.");
        user.display_name = None;
        assert_eq!(user.short_name(), "Alice");
    }
}
