//! Direct-database creation of a single confirmed test account
//!
//! Writes `auth.users`, `public.user_profiles` and `public.user_roles` in one
//! transaction. Inserts that hit an existing row fall back to looking the
//! row up.

use std::sync::Arc;

use dancefloor_core::ProgressReporter;
use dancefloor_domain::fixtures::TestAccount;
use dancefloor_domain::{DanceFloorError, DatabaseConfig, Result};
use tokio_postgres::{Client, NoTls, Transaction};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::errors::InfraError;

const INSERT_AUTH_USER: &str = "
    INSERT INTO auth.users (
        instance_id, id, aud, role, email, encrypted_password,
        email_confirmed_at, raw_app_meta_data, raw_user_meta_data,
        created_at, updated_at,
        confirmation_token, email_change, email_change_token_new, recovery_token
    ) VALUES (
        $1, $2, 'authenticated', 'authenticated', $3,
        crypt($4, gen_salt('bf')),
        now(),
        '{\"provider\":\"email\",\"providers\":[\"email\"]}'::jsonb,
        '{}'::jsonb,
        now(), now(),
        '', '', '', ''
    )
    ON CONFLICT (id) DO NOTHING
    RETURNING id";

const SELECT_AUTH_USER: &str = "SELECT id FROM auth.users WHERE email = $1";

const INSERT_PROFILE: &str = "
    INSERT INTO public.user_profiles (
        id, auth_user_id, first_name, last_name, email,
        primary_role, wsdc_level, competitiveness_level,
        profile_visible, account_status, created_at, updated_at, version
    ) VALUES (
        $1, $2, $3, $4, $5,
        0, 2, 3,
        true, 0, now(), now(), 0
    )
    ON CONFLICT (auth_user_id) DO NOTHING
    RETURNING id";

const SELECT_PROFILE: &str = "SELECT id FROM public.user_profiles WHERE auth_user_id = $1";

const INSERT_DANCER_ROLE: &str = "
    INSERT INTO public.user_roles (user_id, role)
    VALUES ($1, 'DANCER')
    ON CONFLICT (user_id, role) DO NOTHING";

/// Ids of the provisioned account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionedUser {
    pub auth_user_id: Uuid,
    pub profile_id: Uuid,
}

/// Creates test accounts over a direct Postgres connection.
pub struct TestUserProvisioner {
    config: DatabaseConfig,
    reporter: Arc<dyn ProgressReporter>,
}

impl TestUserProvisioner {
    pub fn new(config: DatabaseConfig, reporter: Arc<dyn ProgressReporter>) -> Self {
        Self { config, reporter }
    }

    /// Connect, then create (or find) the account, its profile and the
    /// DANCER role in one transaction.
    ///
    /// Connection failures surface as [`DanceFloorError::Network`]; anything
    /// after that is rolled back and returned.
    #[instrument(skip(self, account), fields(email = %account.email))]
    pub async fn provision(&self, account: &TestAccount) -> Result<ProvisionedUser> {
        self.reporter.line("Connecting to local Supabase database...");
        let mut client = self.connect().await?;

        let tx = client.transaction().await.map_err(InfraError::from)?;
        let outcome = self.provision_in(&tx, account).await;
        match outcome {
            Ok(user) => {
                tx.commit().await.map_err(InfraError::from)?;
                info!(auth_user_id = %user.auth_user_id, profile_id = %user.profile_id, "test user provisioned");
                Ok(user)
            }
            Err(err) => {
                if let Err(rollback) = tx.rollback().await {
                    warn!(error = %rollback, "rollback failed");
                }
                Err(err)
            }
        }
    }

    async fn connect(&self) -> Result<Client> {
        let (client, connection) = tokio_postgres::Config::new()
            .host(&self.config.host)
            .port(self.config.port)
            .dbname(&self.config.database)
            .user(&self.config.user)
            .password(&self.config.password)
            .connect(NoTls)
            .await
            .map_err(|err| {
                DanceFloorError::Network(format!("Database connection error: {err}"))
            })?;

        tokio::spawn(async move {
            if let Err(err) = connection.await {
                warn!(error = %err, "postgres connection ended with error");
            }
        });

        debug!(host = %self.config.host, port = self.config.port, "connected");
        Ok(client)
    }

    async fn provision_in(
        &self,
        tx: &Transaction<'_>,
        account: &TestAccount,
    ) -> Result<ProvisionedUser> {
        self.reporter.line("Creating auth user...");
        let auth_user_id = self.ensure_auth_user(tx, account).await?;

        self.reporter.line("Creating user profile...");
        let profile_id = self.ensure_profile(tx, auth_user_id, account).await?;

        self.reporter.line("Adding DANCER role...");
        tx.execute(INSERT_DANCER_ROLE, &[&profile_id]).await.map_err(InfraError::from)?;

        Ok(ProvisionedUser { auth_user_id, profile_id })
    }

    async fn ensure_auth_user(&self, tx: &Transaction<'_>, account: &TestAccount) -> Result<Uuid> {
        let inserted = tx
            .query_opt(
                INSERT_AUTH_USER,
                &[&Uuid::nil(), &Uuid::new_v4(), &account.email, &account.password],
            )
            .await
            .map_err(InfraError::from)?;

        if let Some(row) = inserted {
            let id: Uuid = row.get(0);
            self.reporter.line(&format!("✓ Auth user created: {id}"));
            return Ok(id);
        }

        let existing =
            tx.query_opt(SELECT_AUTH_USER, &[&account.email]).await.map_err(InfraError::from)?;
        match existing {
            Some(row) => {
                let id: Uuid = row.get(0);
                self.reporter.line(&format!("✓ Auth user already exists: {id}"));
                Ok(id)
            }
            None => Err(DanceFloorError::NotFound("failed to create or find auth user".into())),
        }
    }

    async fn ensure_profile(
        &self,
        tx: &Transaction<'_>,
        auth_user_id: Uuid,
        account: &TestAccount,
    ) -> Result<Uuid> {
        let inserted = tx
            .query_opt(
                INSERT_PROFILE,
                &[
                    &Uuid::new_v4(),
                    &auth_user_id,
                    &account.first_name,
                    &account.last_name,
                    &account.email,
                ],
            )
            .await
            .map_err(InfraError::from)?;

        if let Some(row) = inserted {
            let id: Uuid = row.get(0);
            self.reporter.line(&format!("✓ User profile created: {id}"));
            return Ok(id);
        }

        let existing =
            tx.query_opt(SELECT_PROFILE, &[&auth_user_id]).await.map_err(InfraError::from)?;
        match existing {
            Some(row) => {
                let id: Uuid = row.get(0);
                self.reporter.line(&format!("✓ User profile already exists: {id}"));
                Ok(id)
            }
            None => Err(DanceFloorError::NotFound("failed to create or find user profile".into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl ProgressReporter for Lines {
        fn line(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn statements_tolerate_existing_rows() {
        assert!(INSERT_AUTH_USER.contains("ON CONFLICT (id) DO NOTHING"));
        assert!(INSERT_AUTH_USER.contains("crypt($4, gen_salt('bf'))"));
        assert!(INSERT_PROFILE.contains("ON CONFLICT (auth_user_id) DO NOTHING"));
        assert!(INSERT_DANCER_ROLE.contains("ON CONFLICT (user_id, role) DO NOTHING"));
    }

    #[tokio::test]
    async fn unreachable_database_is_a_connection_error() {
        let config = DatabaseConfig { host: "127.0.0.1".into(), port: 1, ..DatabaseConfig::default() };
        let reporter = Arc::new(Lines::default());
        let provisioner = TestUserProvisioner::new(config, reporter.clone());

        let err = provisioner.provision(&TestAccount::default()).await.unwrap_err();

        assert!(matches!(err, DanceFloorError::Network(ref msg) if msg.starts_with("Database connection error")));
        assert_eq!(
            reporter.0.lock().unwrap().as_slice(),
            ["Connecting to local Supabase database...".to_string()]
        );
    }

    /// Needs the local stack: `DANCEFLOOR_LIVE_DB=1 cargo test -- --ignored`.
    #[tokio::test]
    #[ignore = "requires a local Postgres with the auth schema"]
    async fn provisions_fresh_account() {
        if std::env::var("DANCEFLOOR_LIVE_DB").as_deref() != Ok("1") {
            return;
        }
        let account = TestAccount {
            email: format!("live-{}@example.com", Uuid::new_v4().simple()),
            ..TestAccount::default()
        };
        let provisioner =
            TestUserProvisioner::new(DatabaseConfig::default(), Arc::new(Lines::default()));

        let user = provisioner.provision(&account).await.unwrap();

        assert_ne!(user.auth_user_id, Uuid::nil());
        assert_ne!(user.profile_id, user.auth_user_id);
    }
}
