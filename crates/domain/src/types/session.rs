//! Practice sessions and their participants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Proposed,
    Scheduled,
    Completed,
    Cancelled,
}

impl_label_conversions!(SessionStatus {
    Proposed => "PROPOSED",
    Scheduled => "SCHEDULED",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    PartnerPractice,
    GroupPractice,
    PrivateWithInstructor,
    Class,
}

impl_label_conversions!(SessionType {
    PartnerPractice => "PARTNER_PRACTICE",
    GroupPractice => "GROUP_PRACTICE",
    PrivateWithInstructor => "PRIVATE_WITH_INSTRUCTOR",
    Class => "CLASS",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Visibility {
    AuthorOnly,
    ParticipantsOnly,
    Public,
}

impl_label_conversions!(Visibility {
    AuthorOnly => "AUTHOR_ONLY",
    ParticipantsOnly => "PARTICIPANTS_ONLY",
    Public => "PUBLIC",
});

/// Row posted to `sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInsert {
    pub organizer_id: String,
    pub location_id: Option<String>,
    pub title: String,
    pub session_type: SessionType,
    pub status: SessionStatus,
    pub visibility: Visibility,
    pub scheduled_start: DateTime<Utc>,
    pub scheduled_end: DateTime<Utc>,
    pub capacity: Option<u32>,
}

/// Row posted to `session_participants`; unique on `(session_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInsert {
    pub session_id: String,
    pub user_id: String,
}
