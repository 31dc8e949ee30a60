//! Historical practice sessions
//!
//! Plans a weekly series of completed two-person sessions going back from
//! today, rotating the organizer through the participants.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

/// Sessions start at 18:00 UTC.
const SESSION_START_HOUR: u32 = 18;
const SESSION_LENGTH_HOURS: i64 = 2;

/// One session to create, indexing into the participant list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedSession {
    pub organizer: usize,
    pub partner: usize,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Plan `count` sessions among `names`.
///
/// Session `i` is organized by `names[i % n]` with partner
/// `names[(i + 1) % n]`, starting at 18:00 UTC `7 * (i + 1)` days before
/// `now`'s date. Fewer than two participants yields nothing.
pub fn plan_history(count: usize, names: &[&str], now: DateTime<Utc>) -> Vec<PlannedSession> {
    let n = names.len();
    if n < 2 {
        return Vec::new();
    }

    let evening = NaiveTime::from_hms_opt(SESSION_START_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let anchor = Utc.from_utc_datetime(&now.date_naive().and_time(evening));

    (0..count)
        .map(|i| {
            let organizer = i % n;
            let partner = (i + 1) % n;
            let start = anchor - Duration::days(7 * (i as i64 + 1));
            PlannedSession {
                organizer,
                partner,
                title: format!("Practice #{}: {} & {}", i + 1, names[organizer], names[partner]),
                start,
                end: start + Duration::hours(SESSION_LENGTH_HOURS),
            }
        })
        .collect()
}
