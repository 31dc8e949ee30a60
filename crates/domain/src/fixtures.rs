//! Literal fixture data
//!
//! The accounts, studio and availability the seeder writes on every run.
//! Alice, Bob and the test account share Tuesday and Thursday evenings and
//! Saturday late morning so the matching flows always have overlaps to find.

use crate::types::{
    AvailabilityWindow, DanceRole, FocusArea, LocationFixture, PracticeRole, RoleLabel,
    UserFixture, Weekday, WsdcLevel,
};

/// Account created directly in the database by `create-test-user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestAccount {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl Default for TestAccount {
    fn default() -> Self {
        Self {
            email: "test@example.com".into(),
            password: "test123".into(),
            first_name: "Test".into(),
            last_name: "User".into(),
        }
    }
}

/// Default identities for the RLS smoke test.
pub const RLS_ADMIN_EMAIL: &str = "test@ex.com";
pub const RLS_ADMIN_PASSWORD: &str = "test123";
pub const RLS_USER_EMAIL: &str = "alice@example.com";
pub const RLS_USER_PASSWORD: &str = "alice123";

pub const FOCUS_AREAS: [FocusArea; 3] =
    [FocusArea::Technique, FocusArea::Musicality, FocusArea::Connection];

pub const SKILL_LEVELS: [WsdcLevel; 3] =
    [WsdcLevel::Novice, WsdcLevel::Intermediate, WsdcLevel::Advanced];

pub const FLEXIBLE_ROLES: [PracticeRole; 2] = [PracticeRole::Lead, PracticeRole::Follow];

fn window(day: Weekday, start: &str, end: &str) -> AvailabilityWindow {
    AvailabilityWindow::new(day, start, end)
}

/// Slots shared by every fixture user.
pub fn overlapping_windows() -> Vec<AvailabilityWindow> {
    vec![
        window(Weekday::Tuesday, "18:00:00", "21:00:00"),
        window(Weekday::Thursday, "18:00:00", "21:00:00"),
        window(Weekday::Saturday, "10:00:00", "14:00:00"),
    ]
}

/// The shared downtown studio.
pub fn shared_location() -> LocationFixture {
    LocationFixture {
        name: "Dance Studio Downtown".into(),
        description: Some("Popular practice space in downtown area".into()),
        address_line1: Some("123 Main Street".into()),
        city: "San Francisco".into(),
        state: "CA".into(),
        postal_code: Some("94102".into()),
        country: "USA".into(),
        latitude: Some(37.7749),
        longitude: Some(-122.4194),
        location_type: 1,
    }
}

/// Alice, Bob and the admin-capable test account, in seeding order.
pub fn users() -> Vec<UserFixture> {
    vec![
        UserFixture {
            email: "alice@example.com".into(),
            password: "alice123".into(),
            first_name: "Alice".into(),
            last_name: "Johnson".into(),
            display_name: Some("Alice J.".into()),
            primary_role: DanceRole::Leader,
            wsdc_level: WsdcLevel::Intermediate,
            competitiveness_level: 3,
            bio: Some(
                "Love West Coast Swing! Looking for practice partners to work on musicality and connection."
                    .into(),
            ),
            dance_goals: Some("Compete in intermediate division next year".into()),
            windows: vec![
                window(Weekday::Tuesday, "18:00:00", "21:00:00"),
                window(Weekday::Wednesday, "19:00:00", "22:00:00"),
                window(Weekday::Thursday, "18:00:00", "21:00:00"),
                window(Weekday::Saturday, "10:00:00", "14:00:00"),
            ],
            roles: vec![RoleLabel::Dancer],
        },
        UserFixture {
            email: "bob@example.com".into(),
            password: "bob123".into(),
            first_name: "Bob".into(),
            last_name: "Martinez".into(),
            display_name: Some("Bob M.".into()),
            primary_role: DanceRole::Follower,
            wsdc_level: WsdcLevel::Intermediate,
            competitiveness_level: 3,
            bio: Some("Intermediate follow looking to improve technique and styling.".into()),
            dance_goals: Some("Master all-skate competitions and improve frame".into()),
            windows: vec![
                window(Weekday::Monday, "19:00:00", "21:00:00"),
                window(Weekday::Tuesday, "18:00:00", "21:00:00"),
                window(Weekday::Thursday, "18:00:00", "21:00:00"),
                window(Weekday::Friday, "18:00:00", "20:00:00"),
                window(Weekday::Saturday, "10:00:00", "14:00:00"),
            ],
            roles: vec![RoleLabel::Dancer],
        },
        UserFixture {
            email: "test@ex.com".into(),
            password: "test123".into(),
            first_name: "Test".into(),
            last_name: "User".into(),
            display_name: Some("Test U.".into()),
            primary_role: DanceRole::Leader,
            wsdc_level: WsdcLevel::Novice,
            competitiveness_level: 3,
            bio: Some("Test account for local development.".into()),
            dance_goals: Some("Try seeding via API".into()),
            windows: overlapping_windows(),
            roles: vec![RoleLabel::Dancer, RoleLabel::Admin],
        },
    ]
}

/// Pool of evening and weekend slots that generated users draw from. Every
/// slot overlaps at least one fixture window.
pub fn extra_window_pool() -> Vec<AvailabilityWindow> {
    vec![
        window(Weekday::Monday, "19:00:00", "21:00:00"),
        window(Weekday::Tuesday, "18:00:00", "21:00:00"),
        window(Weekday::Wednesday, "19:00:00", "22:00:00"),
        window(Weekday::Thursday, "18:00:00", "21:00:00"),
        window(Weekday::Friday, "18:00:00", "20:00:00"),
        window(Weekday::Saturday, "10:00:00", "14:00:00"),
        window(Weekday::Saturday, "12:00:00", "15:00:00"),
    ]
}
