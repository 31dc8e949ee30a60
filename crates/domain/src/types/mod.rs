//! Domain types and row models

pub mod auth;
pub mod location;
pub mod profile;
pub mod rest;
pub mod schedule;
pub mod seeded;
pub mod session;

pub use auth::{AuthSession, Credentials};
pub use location::LocationFixture;
pub use profile::{DanceRole, ProfileInsert, RoleAssignment, RoleLabel, UserFixture, WsdcLevel};
pub use rest::{InsertOptions, RestQuery, RestResponse};
pub use schedule::{
    windows_overlap, AvailabilityWindow, FocusArea, FocusInsert, LevelInsert,
    PracticeRole, PreferenceLocationInsert, PreferenceRoleInsert, SchedulePreferenceInsert,
    Weekday, WindowInsert,
};
pub use seeded::SeededUser;
pub use session::{ParticipantInsert, SessionInsert, SessionStatus, SessionType, Visibility};
