//! Seeding service - core business logic
//!
//! Every step is check-then-insert, so running the seeder twice against the
//! same store leaves a single copy of each row.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dancefloor_domain::constants::{
    DEFAULT_HISTORY_SESSIONS, DEFAULT_LOCATION_NOTE, DEFAULT_MAX_TRAVEL_KM,
    DEFAULT_PREFERENCE_NOTES, DEFAULT_RNG_SEED, SESSION_PARTICIPANTS_CONFLICT,
    TABLE_LOCATIONS, TABLE_PREFERENCE_FOCUS, TABLE_PREFERENCE_LEVELS, TABLE_PREFERENCE_LOCATIONS,
    TABLE_PREFERENCE_ROLES, TABLE_PREFERENCE_WINDOWS, TABLE_SCHEDULE_PREFERENCES, TABLE_SESSIONS,
    TABLE_SESSION_PARTICIPANTS, TABLE_USER_PROFILES, TABLE_USER_ROLES, USER_ROLES_CONFLICT,
};
use dancefloor_domain::fixtures::{self, FLEXIBLE_ROLES, FOCUS_AREAS, SKILL_LEVELS};
use dancefloor_domain::types::rest::value_as_id;
use dancefloor_domain::{
    AuthSession, AvailabilityWindow, Credentials, DanceFloorError, FocusInsert, InsertOptions,
    LevelInsert, LocationFixture, ParticipantInsert, PreferenceLocationInsert,
    PreferenceRoleInsert, ProfileInsert, RestQuery, Result, RoleAssignment, RoleLabel,
    SchedulePreferenceInsert, SeededUser, SessionInsert, SessionStatus, SessionType, UserFixture,
    Visibility,
};
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use super::extra_users::generate_extra_users;
use super::history::plan_history;
use crate::platform::ports::{AuthGateway, RestGateway};
use crate::platform::to_rows;
use crate::reporting::ProgressReporter;

/// Knobs for a seeding run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOptions {
    /// Generated users appended after the fixtures.
    pub extra_users: usize,
    /// Windows per generated user. Fixture users keep their literal windows.
    pub windows_per_user: Option<usize>,
    /// Completed past sessions to create among the fixture users.
    pub history_sessions: usize,
    /// Seed for generated users' windows, so reruns pick the same ones.
    pub rng_seed: u64,
}

impl Default for SeedOptions {
    fn default() -> Self {
        Self {
            extra_users: 0,
            windows_per_user: None,
            history_sessions: DEFAULT_HISTORY_SESSIONS,
            rng_seed: DEFAULT_RNG_SEED,
        }
    }
}

/// A profile found during verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedProfile {
    pub id: String,
    pub email: String,
    /// `None` when the profile has no schedule preference.
    pub window_count: Option<usize>,
}

/// Read-back of what the run wrote. Empty when the reads failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verification {
    pub profiles: Vec<VerifiedProfile>,
}

/// Outcome of [`SeedService::run`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub location_id: String,
    pub users: Vec<SeededUser>,
    pub session_ids: Vec<String>,
    pub verification: Verification,
}

/// Seeds the shared location, users, preferences and session history.
pub struct SeedService {
    auth: Arc<dyn AuthGateway>,
    rest: Arc<dyn RestGateway>,
    creds: Credentials,
    reporter: Arc<dyn ProgressReporter>,
    now: Option<DateTime<Utc>>,
}

impl SeedService {
    /// Create a new seeding service. `service_key` authorises every REST call.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        rest: Arc<dyn RestGateway>,
        service_key: &str,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self { auth, rest, creds: Credentials::service(service_key), reporter, now: None }
    }

    /// Pin the clock used for profile timestamps and session history.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    fn say(&self, message: impl AsRef<str>) {
        self.reporter.line(message.as_ref());
    }

    /// Seed everything and read it back.
    #[instrument(skip(self))]
    pub async fn run(&self, options: &SeedOptions) -> Result<SeedReport> {
        self.say("\nCreating/verifying shared location...");
        let location_id = self.ensure_location(&fixtures::shared_location()).await?;
        self.say(format!("  ✓ Location ID: {location_id}"));

        let fixture_users = fixtures::users();
        let fixture_count = fixture_users.len();
        let mut all_users = fixture_users;
        all_users.extend(generate_extra_users(
            options.extra_users,
            options.windows_per_user,
            options.rng_seed,
        ));
        info!(users = all_users.len(), "seeding users");

        let mut seeded = Vec::with_capacity(all_users.len());
        for user in &all_users {
            seeded.push(self.seed_user(user, &location_id).await?);
        }

        let participants: Vec<(&str, &str)> = all_users
            .iter()
            .zip(&seeded)
            .take(fixture_count)
            .map(|(user, record)| (user.short_name(), record.profile_id.as_str()))
            .collect();
        let session_ids = if options.history_sessions > 0 {
            self.say("\nSeeding session history...");
            self.seed_history(&location_id, &participants, options.history_sessions).await?
        } else {
            Vec::new()
        };

        self.say("\nVerifying via REST...");
        let emails: Vec<&str> =
            all_users.iter().take(fixture_count).map(|u| u.email.as_str()).collect();
        let verification = self.verify(&emails).await;
        self.say(format!("  Profiles found: {}", verification.profiles.len()));
        for profile in &verification.profiles {
            self.say(format!("   - {} (profile_id={})", profile.email, profile.id));
        }
        for profile in &verification.profiles {
            if let Some(count) = profile.window_count {
                self.say(format!("   - {}: {count} windows", profile.email));
            }
        }

        self.say("\n✅ Done.");
        self.say("Overlapping availability times:");
        for window in fixtures::overlapping_windows() {
            self.say(format!(
                " - {} {}-{}",
                window.day.display_name(),
                short_time(&window.start),
                short_time(&window.end)
            ));
        }

        Ok(SeedReport { location_id, users: seeded, session_ids, verification })
    }

    async fn seed_user(&self, user: &UserFixture, location_id: &str) -> Result<SeededUser> {
        self.say(format!("\nUser: {}", user.email));
        let session = self.register(user).await?;

        let profile_id = self.ensure_profile(&session.user_id, user).await?;
        self.say(format!("  ✓ Profile ID: {profile_id}"));

        self.ensure_roles(&profile_id, &user.roles).await;
        let labels: Vec<&str> = user.roles.iter().map(RoleLabel::as_label).collect();
        self.say(format!("  ✓ Roles: {}", labels.join(", ")));

        self.set_home_location(&profile_id, location_id).await?;

        let preference_id =
            self.ensure_schedule_preference(&profile_id, location_id, &user.windows).await?;
        self.say(format!("  ✓ Schedule preference ID: {preference_id}"));

        Ok(SeededUser {
            email: user.email.clone(),
            user_id: session.user_id,
            profile_id,
            windows: user.windows.clone(),
        })
    }

    /// Find the location by name, creating it when absent.
    #[instrument(skip(self, location), fields(name = %location.name))]
    pub async fn ensure_location(&self, location: &LocationFixture) -> Result<String> {
        let query = RestQuery::new().select("id").eq("name", &location.name);
        let found = self.rest.select(&self.creds, TABLE_LOCATIONS, &query).await?;
        if let Some(id) = found.first_id() {
            debug!(%id, "location exists");
            return Ok(id);
        }

        let rows = to_rows(std::slice::from_ref(location))?;
        let created = self
            .rest
            .insert(&self.creds, TABLE_LOCATIONS, &rows, &InsertOptions::representation())
            .await?;
        created
            .first_id()
            .ok_or_else(|| DanceFloorError::rest(created.status, "Failed to create location", &created.body))
    }

    /// Sign up, falling back to sign-in for an existing identity.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn register(&self, user: &UserFixture) -> Result<AuthSession> {
        if let Some(session) = self.auth.sign_up(&user.email, &user.password).await? {
            self.say("  ✓ Signed up");
            return Ok(session);
        }
        let session = self.auth.sign_in(&user.email, &user.password).await?;
        self.say("  ✓ Signed in (existing user)");
        Ok(session)
    }

    async fn find_profile(&self, auth_user_id: &str) -> Result<Option<String>> {
        let query = RestQuery::new().select("id").eq("auth_user_id", auth_user_id);
        Ok(self.rest.select(&self.creds, TABLE_USER_PROFILES, &query).await?.first_id())
    }

    /// Profile id for `auth_user_id`, inserting the profile when absent.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub async fn ensure_profile(&self, auth_user_id: &str, user: &UserFixture) -> Result<String> {
        if let Some(id) = self.find_profile(auth_user_id).await? {
            return Ok(id);
        }

        let row = ProfileInsert::from_fixture(auth_user_id, user, self.now());
        let created = self
            .rest
            .insert(
                &self.creds,
                TABLE_USER_PROFILES,
                &to_rows(&[row])?,
                &InsertOptions::representation(),
            )
            .await?;
        if let Some(id) = created.first_id() {
            return Ok(id);
        }

        // Lost a race with another writer, or the email already exists
        if let Some(id) = self.find_profile(auth_user_id).await? {
            return Ok(id);
        }
        Err(DanceFloorError::rest(created.status, "Failed to upsert user profile", &created.body))
    }

    /// Upsert role rows. Failures are logged and ignored.
    #[instrument(skip(self))]
    pub async fn ensure_roles(&self, profile_id: &str, roles: &[RoleLabel]) {
        let rows: Vec<RoleAssignment> = roles
            .iter()
            .map(|role| RoleAssignment { user_id: profile_id.to_string(), role: *role })
            .collect();
        let rows = match to_rows(&rows) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(error = %err, "skipping role assignment");
                return;
            }
        };

        match self
            .rest
            .insert(&self.creds, TABLE_USER_ROLES, &rows, &InsertOptions::upsert(USER_ROLES_CONFLICT))
            .await
        {
            Ok(response) if response.is_ok_or_created() => {}
            Ok(response) => {
                warn!(status = response.status, body = %response.body, "role upsert rejected");
            }
            Err(err) => warn!(error = %err, "role upsert failed"),
        }
    }

    /// Point the profile's home location at the shared studio.
    #[instrument(skip(self))]
    pub async fn set_home_location(&self, profile_id: &str, location_id: &str) -> Result<()> {
        let query = RestQuery::new().eq("id", profile_id);
        let patch = json!({ "home_location_id": location_id });
        let response = self.rest.update(&self.creds, TABLE_USER_PROFILES, &query, &patch).await?;
        if !response.is_success() {
            return Err(DanceFloorError::rest(
                response.status,
                "Failed to set home location",
                &response.body,
            ));
        }
        Ok(())
    }

    /// Preference id for the profile. A new preference gets its location link,
    /// windows, focus areas, levels and roles; an existing one is left alone.
    #[instrument(skip(self, windows), fields(windows = windows.len()))]
    pub async fn ensure_schedule_preference(
        &self,
        profile_id: &str,
        location_id: &str,
        windows: &[AvailabilityWindow],
    ) -> Result<String> {
        let query = RestQuery::new().select("id").eq("user_id", profile_id);
        let existing = self.rest.select(&self.creds, TABLE_SCHEDULE_PREFERENCES, &query).await?;
        if let Some(id) = existing.first_id() {
            debug!(%id, "reusing schedule preference");
            return Ok(id);
        }

        let preference = SchedulePreferenceInsert {
            user_id: profile_id.to_string(),
            max_travel_distance_km: DEFAULT_MAX_TRAVEL_KM,
            location_note: DEFAULT_LOCATION_NOTE.to_string(),
            notes: DEFAULT_PREFERENCE_NOTES.to_string(),
        };
        let created = self
            .rest
            .insert(
                &self.creds,
                TABLE_SCHEDULE_PREFERENCES,
                &to_rows(&[preference])?,
                &InsertOptions::representation(),
            )
            .await?;
        let preference_id = created.first_id().ok_or_else(|| {
            DanceFloorError::rest(created.status, "Failed to create schedule_preferences", &created.body)
        })?;

        let link = PreferenceLocationInsert {
            preference_id: preference_id.clone(),
            location_id: location_id.to_string(),
        };
        self.insert_children(TABLE_PREFERENCE_LOCATIONS, &[link], "Failed to link preference location")
            .await?;

        let window_rows: Vec<_> = windows.iter().map(|w| w.to_insert(&preference_id)).collect();
        if !window_rows.is_empty() {
            self.insert_children(TABLE_PREFERENCE_WINDOWS, &window_rows, "Failed to add windows")
                .await?;
        }

        let focus: Vec<_> = FOCUS_AREAS
            .iter()
            .map(|area| FocusInsert { preference_id: preference_id.clone(), focus_area: *area })
            .collect();
        self.insert_children(TABLE_PREFERENCE_FOCUS, &focus, "Failed to add focus areas").await?;

        let levels: Vec<_> = SKILL_LEVELS
            .iter()
            .map(|level| LevelInsert { preference_id: preference_id.clone(), level: *level })
            .collect();
        self.insert_children(TABLE_PREFERENCE_LEVELS, &levels, "Failed to add levels").await?;

        let roles: Vec<_> = FLEXIBLE_ROLES
            .iter()
            .map(|role| PreferenceRoleInsert { preference_id: preference_id.clone(), role: *role })
            .collect();
        self.insert_children(TABLE_PREFERENCE_ROLES, &roles, "Failed to add roles").await?;

        Ok(preference_id)
    }

    async fn insert_children<T: serde::Serialize>(
        &self,
        table: &str,
        rows: &[T],
        context: &str,
    ) -> Result<()> {
        let response = self
            .rest
            .insert(&self.creds, table, &to_rows(rows)?, &InsertOptions::representation())
            .await?;
        if !response.is_ok_or_created() {
            return Err(DanceFloorError::rest(response.status, context, &response.body));
        }
        Ok(())
    }

    /// Create `count` completed sessions among `participants`
    /// (`(display name, profile id)` pairs). Returns the session ids.
    #[instrument(skip(self, participants), fields(participants = participants.len()))]
    pub async fn seed_history(
        &self,
        location_id: &str,
        participants: &[(&str, &str)],
        count: usize,
    ) -> Result<Vec<String>> {
        let names: Vec<&str> = participants.iter().map(|(name, _)| *name).collect();
        let plan = plan_history(count, &names, self.now());
        let mut ids = Vec::with_capacity(plan.len());

        for planned in plan {
            let organizer_id = participants[planned.organizer].1;
            let partner_id = participants[planned.partner].1;

            let query = RestQuery::new()
                .select("id")
                .eq("organizer_id", organizer_id)
                .eq("title", &planned.title)
                .limit(1);
            let existing = self.rest.select(&self.creds, TABLE_SESSIONS, &query).await?;
            let session_id = match existing.first_id() {
                Some(id) => id,
                None => {
                    let row = SessionInsert {
                        organizer_id: organizer_id.to_string(),
                        location_id: Some(location_id.to_string()),
                        title: planned.title.clone(),
                        session_type: SessionType::PartnerPractice,
                        status: SessionStatus::Completed,
                        visibility: Visibility::Public,
                        scheduled_start: planned.start,
                        scheduled_end: planned.end,
                        capacity: Some(2),
                    };
                    let created = self
                        .rest
                        .insert(
                            &self.creds,
                            TABLE_SESSIONS,
                            &to_rows(&[row])?,
                            &InsertOptions::representation(),
                        )
                        .await?;
                    created.first_id().ok_or_else(|| {
                        DanceFloorError::rest(created.status, "Failed to create session", &created.body)
                    })?
                }
            };

            let members: Vec<_> = [organizer_id, partner_id]
                .iter()
                .map(|user_id| ParticipantInsert {
                    session_id: session_id.clone(),
                    user_id: (*user_id).to_string(),
                })
                .collect();
            let response = self
                .rest
                .insert(
                    &self.creds,
                    TABLE_SESSION_PARTICIPANTS,
                    &to_rows(&members)?,
                    &InsertOptions::upsert(SESSION_PARTICIPANTS_CONFLICT),
                )
                .await?;
            if !response.is_ok_or_created() {
                return Err(DanceFloorError::rest(
                    response.status,
                    "Failed to add session participants",
                    &response.body,
                ));
            }

            self.say(format!("  ✓ {} ({session_id})", planned.title));
            ids.push(session_id);
        }

        Ok(ids)
    }

    /// Read profiles and their window counts back. Never fails.
    #[instrument(skip(self))]
    pub async fn verify(&self, emails: &[&str]) -> Verification {
        match self.try_verify(emails).await {
            Ok(verification) => verification,
            Err(err) => {
                warn!(error = %err, "verification read failed");
                Verification::default()
            }
        }
    }

    async fn try_verify(&self, emails: &[&str]) -> Result<Verification> {
        let query = RestQuery::new()
            .select("id,email,first_name,last_name,auth_user_id")
            .in_list("email", emails);
        let response = self.rest.select(&self.creds, TABLE_USER_PROFILES, &query).await?;
        if response.status != 200 {
            warn!(status = response.status, "profile verification rejected");
            return Ok(Verification::default());
        }

        let mut profiles = Vec::new();
        for row in response.rows() {
            let Some(id) = row.get("id").and_then(value_as_id) else {
                continue;
            };
            let email = row.get("email").and_then(|v| v.as_str()).unwrap_or_default().to_string();
            let window_count = self.count_windows(&id).await?;
            profiles.push(VerifiedProfile { id, email, window_count });
        }
        Ok(Verification { profiles })
    }

    async fn count_windows(&self, profile_id: &str) -> Result<Option<usize>> {
        let query = RestQuery::new().select("id").eq("user_id", profile_id);
        let preferences = self.rest.select(&self.creds, TABLE_SCHEDULE_PREFERENCES, &query).await?;
        let Some(preference_id) = preferences.first_id() else {
            return Ok(None);
        };

        let query = RestQuery::new()
            .select("day_of_week,start_time,end_time")
            .eq("preference_id", &preference_id);
        let windows = self.rest.select(&self.creds, TABLE_PREFERENCE_WINDOWS, &query).await?;
        Ok(Some(windows.rows().len()))
    }
}

/// `"18:00:00"` -> `"18:00"`
fn short_time(value: &str) -> &str {
    value.get(..5).unwrap_or(value)
}
