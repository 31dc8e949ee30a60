//! Schedule preference rows and availability windows

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;
use crate::types::profile::WsdcLevel;

/// Day of week as stored in `schedule_preference_windows.day_of_week`.
///
/// Variant order is calendar order, so sorting windows sorts by day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl_label_conversions!(Weekday {
    Monday => "MONDAY",
    Tuesday => "TUESDAY",
    Wednesday => "WEDNESDAY",
    Thursday => "THURSDAY",
    Friday => "FRIDAY",
    Saturday => "SATURDAY",
    Sunday => "SUNDAY",
});

impl Weekday {
    /// Title-case name for progress output ("Tuesday").
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

/// A weekly availability slot. Times are `HH:MM:SS` strings, exactly as the
/// gateway stores and returns them.
///
/// Serialises as `{day, start, end}`, the shape the frontend scale suite
/// consumes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub day: Weekday,
    pub start: String,
    pub end: String,
}

impl AvailabilityWindow {
    pub fn new(day: Weekday, start: &str, end: &str) -> Self {
        Self { day, start: start.to_string(), end: end.to_string() }
    }

    fn bounds(&self) -> Option<(NaiveTime, NaiveTime)> {
        Some((parse_time(&self.start)?, parse_time(&self.end)?))
    }

    /// Same-day overlap test: `a.start < b.end && b.start < a.end`.
    ///
    /// Windows with unparsable times never overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.day != other.day {
            return false;
        }
        match (self.bounds(), other.bounds()) {
            (Some((a_start, a_end)), Some((b_start, b_end))) => a_start < b_end && b_start < a_end,
            _ => false,
        }
    }

    /// Row for `schedule_preference_windows`.
    pub fn to_insert(&self, preference_id: &str) -> WindowInsert {
        WindowInsert {
            preference_id: preference_id.to_string(),
            day_of_week: self.day,
            start_time: self.start.clone(),
            end_time: self.end.clone(),
        }
    }
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok()
}

/// True when any window of `a` overlaps any window of `b`.
pub fn windows_overlap(a: &[AvailabilityWindow], b: &[AvailabilityWindow]) -> bool {
    a.iter().any(|wa| b.iter().any(|wb| wa.overlaps(wb)))
}

/// Practice focus labels (`schedule_preference_focus.focus_area`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FocusArea {
    Connection,
    Technique,
    Musicality,
    CompetitionPrep,
    Styling,
    SocialDancing,
    Choreography,
    Mindset,
    Conditioning,
}

impl_label_conversions!(FocusArea {
    Connection => "CONNECTION",
    Technique => "TECHNIQUE",
    Musicality => "MUSICALITY",
    CompetitionPrep => "COMPETITION_PREP",
    Styling => "STYLING",
    SocialDancing => "SOCIAL_DANCING",
    Choreography => "CHOREOGRAPHY",
    Mindset => "MINDSET",
    Conditioning => "CONDITIONING",
});

/// Partner roles a preference is open to (`schedule_preference_roles.role`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PracticeRole {
    Lead,
    Follow,
}

impl_label_conversions!(PracticeRole {
    Lead => "LEAD",
    Follow => "FOLLOW",
});

/// Parent row of a user's schedule preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePreferenceInsert {
    pub user_id: String,
    pub max_travel_distance_km: u32,
    pub location_note: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceLocationInsert {
    pub preference_id: String,
    pub location_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInsert {
    pub preference_id: String,
    pub day_of_week: Weekday,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusInsert {
    pub preference_id: String,
    pub focus_area: FocusArea,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInsert {
    pub preference_id: String,
    pub level: WsdcLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRoleInsert {
    pub preference_id: String,
    pub role: PracticeRole,
}
