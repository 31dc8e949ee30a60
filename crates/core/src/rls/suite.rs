//! Row-level-security smoke checks
//!
//! Logs in as an admin and a regular user, then asserts which REST writes and
//! reads the platform's policies allow for each.

use std::sync::Arc;

use dancefloor_domain::constants::{
    TABLE_LOCATIONS, TABLE_PREFERENCE_WINDOWS, TABLE_SCHEDULE_PREFERENCES, TABLE_USER_PROFILES,
};
use dancefloor_domain::fixtures::{
    RLS_ADMIN_EMAIL, RLS_ADMIN_PASSWORD, RLS_USER_EMAIL, RLS_USER_PASSWORD,
};
use dancefloor_domain::{
    AuthSession, AvailabilityWindow, Credentials, DanceFloorError, InsertOptions,
    LocationFixture, RestQuery, Result, Weekday,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::platform::ports::{AuthGateway, RestGateway};
use crate::platform::to_rows;
use crate::reporting::ProgressReporter;

pub const MISSING_PROFILES: &str = "Failed to resolve profile IDs. Did you run the seed script?";
pub const MISSING_USER_PREFERENCE: &str =
    "User missing schedule preference. Create one via UI before running this script.";
pub const SKIPPED_ADMIN_PREFERENCE: &str = "Skipped admin preference test (no preference found)";

/// Email/password pair to log in with.
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub password: String,
}

impl Identity {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }

    pub fn default_admin() -> Self {
        Self::new(RLS_ADMIN_EMAIL, RLS_ADMIN_PASSWORD)
    }

    pub fn default_user() -> Self {
        Self::new(RLS_USER_EMAIL, RLS_USER_PASSWORD)
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity").field("email", &self.email).finish_non_exhaustive()
    }
}

/// One named assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
}

impl CheckResult {
    fn new(name: &str, passed: bool) -> Self {
        Self { name: name.to_string(), passed }
    }
}

/// Results of a full run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RlsOutcome {
    pub checks: Vec<CheckResult>,
}

impl RlsOutcome {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }
}

struct Actor {
    session: AuthSession,
    creds: Credentials,
    profile_id: Option<String>,
}

pub struct RlsSmokeSuite {
    auth: Arc<dyn AuthGateway>,
    rest: Arc<dyn RestGateway>,
    anon_key: String,
    admin: Identity,
    user: Identity,
    reporter: Arc<dyn ProgressReporter>,
}

impl RlsSmokeSuite {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        rest: Arc<dyn RestGateway>,
        anon_key: &str,
        reporter: Arc<dyn ProgressReporter>,
    ) -> Self {
        Self {
            auth,
            rest,
            anon_key: anon_key.to_string(),
            admin: Identity::default_admin(),
            user: Identity::default_user(),
            reporter,
        }
    }

    pub fn with_admin(mut self, admin: Identity) -> Self {
        self.admin = admin;
        self
    }

    pub fn with_user(mut self, user: Identity) -> Self {
        self.user = user;
        self
    }

    /// Run every check. Login failures and missing seed data are errors;
    /// failed checks are reported in the outcome.
    #[instrument(skip(self), fields(admin = %self.admin.email, user = %self.user.email))]
    pub async fn run(&self) -> Result<RlsOutcome> {
        self.reporter.line("Logging in as admin...");
        let admin = self.login(&self.admin).await?;

        self.reporter.line("Logging in as regular user...");
        let user = self.login(&self.user).await?;

        let (Some(admin_profile), Some(user_profile)) = (&admin.profile_id, &user.profile_id) else {
            return Err(DanceFloorError::NotFound(MISSING_PROFILES.to_string()));
        };

        let admin_preference = self.first_preference(&admin.creds, admin_profile).await?;
        let Some(user_preference) = self.first_preference(&user.creds, user_profile).await? else {
            return Err(DanceFloorError::NotFound(MISSING_USER_PREFERENCE.to_string()));
        };

        let mut checks = Vec::with_capacity(5);

        let passed = self.create_location(&admin.creds, "Test Studio", "Austin", "TX").await? == 201;
        checks.push(CheckResult::new("Admin can create location", passed));

        let status = self.create_location(&user.creds, "Unauthorized Location", "Nowhere", "NA").await?;
        checks.push(CheckResult::new("User cannot create location", status >= 400));

        let own = AvailabilityWindow::new(Weekday::Monday, "10:00", "11:00");
        let status = self.add_window(&user.creds, &user_preference, &own).await?;
        checks.push(CheckResult::new(
            "User can edit own schedule preference",
            status == 200 || status == 201,
        ));

        match admin_preference {
            Some(admin_preference) => {
                let foreign = AvailabilityWindow::new(Weekday::Tuesday, "12:00", "13:00");
                let status = self.add_window(&user.creds, &admin_preference, &foreign).await?;
                checks.push(CheckResult::new("User cannot edit admin preference", status >= 400));
            }
            None => checks.push(CheckResult::new(SKIPPED_ADMIN_PREFERENCE, true)),
        }

        let query = RestQuery::new()
            .select("id,email")
            .eq("auth_user_id", &admin.session.user_id);
        let response = self.rest.select(&user.creds, TABLE_USER_PROFILES, &query).await?;
        let restricted = match response.status {
            200 => response.rows().len() <= 1,
            401 | 403 => true,
            _ => false,
        };
        checks.push(CheckResult::new("User cannot read other profiles", restricted));

        let outcome = RlsOutcome { checks };
        info!(passed = outcome.all_passed(), "rls checks finished");
        Ok(outcome)
    }

    async fn login(&self, identity: &Identity) -> Result<Actor> {
        let session = self.auth.sign_in(&identity.email, &identity.password).await?;
        let creds = Credentials::user(&self.anon_key, &session);

        let query = RestQuery::new().select("id").eq("auth_user_id", &session.user_id);
        let response = self.rest.select(&creds, TABLE_USER_PROFILES, &query).await?;
        let profile_id = if response.status == 200 { response.first_id() } else { None };

        Ok(Actor { session, creds, profile_id })
    }

    async fn first_preference(&self, creds: &Credentials, profile_id: &str) -> Result<Option<String>> {
        let query = RestQuery::new().select("id").eq("user_id", profile_id).limit(1);
        let response = self.rest.select(creds, TABLE_SCHEDULE_PREFERENCES, &query).await?;
        Ok(if response.status == 200 { response.first_id() } else { None })
    }

    async fn create_location(
        &self,
        creds: &Credentials,
        prefix: &str,
        city: &str,
        state: &str,
    ) -> Result<u16> {
        let suffix = Uuid::new_v4().simple().to_string();
        let location = LocationFixture {
            name: format!("{prefix} {}", &suffix[..6]),
            description: Some("Created via RLS smoke test".into()),
            address_line1: None,
            city: city.into(),
            state: state.into(),
            postal_code: None,
            country: "USA".into(),
            latitude: None,
            longitude: None,
            location_type: 1,
        };
        let response = self
            .rest
            .insert(creds, TABLE_LOCATIONS, &to_rows(&location)?, &InsertOptions::representation())
            .await?;
        Ok(response.status)
    }

    async fn add_window(
        &self,
        creds: &Credentials,
        preference_id: &str,
        window: &AvailabilityWindow,
    ) -> Result<u16> {
        let row = to_rows(&window.to_insert(preference_id))?;
        let response = self
            .rest
            .insert(creds, TABLE_PREFERENCE_WINDOWS, &row, &InsertOptions::minimal())
            .await?;
        Ok(response.status)
    }
}
