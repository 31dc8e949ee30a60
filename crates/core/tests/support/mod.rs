//! Shared test helpers for `dancefloor-core` integration tests.
//!
//! [`InMemoryPlatform`] implements both platform ports over a table map so the
//! seeding and RLS flows can run end to end without a backend.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dancefloor_core::{AuthGateway, ProgressReporter, RestGateway};
use dancefloor_domain::{
    AuthSession, Credentials, DanceFloorError, InsertOptions, RestQuery, RestResponse,
    Result as DomainResult,
};
use serde_json::{json, Map, Value};

pub const SERVICE_KEY: &str = "service-key";
pub const ANON_KEY: &str = "anon-key";

/// One recorded REST call: `(method, table)`.
pub type Call = (&'static str, String);

#[derive(Debug, Clone)]
struct Account {
    id: String,
    email: String,
    password: String,
}

#[derive(Default)]
struct State {
    accounts: Vec<Account>,
    tables: HashMap<String, Vec<Value>>,
    next_id: u64,
    forced_status: HashMap<String, u16>,
    forced_update_status: HashMap<String, u16>,
    unacknowledged_inserts: HashSet<String>,
    foreign_profile_status: Option<u16>,
    open_policies: bool,
    calls: Vec<Call>,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn account_for_token(&self, token: &str) -> Option<&Account> {
        let id = token.strip_prefix("token-")?;
        self.accounts.iter().find(|account| account.id == id)
    }

    fn rows(&self, table: &str) -> &[Value] {
        self.tables.get(table).map_or(&[], Vec::as_slice)
    }

    fn profile_of(&self, auth_user_id: &str) -> Option<String> {
        self.rows("user_profiles")
            .iter()
            .find(|row| text(row, "auth_user_id").as_deref() == Some(auth_user_id))
            .and_then(|row| text(row, "id"))
    }

    fn is_admin(&self, profile_id: &str) -> bool {
        self.rows("user_roles").iter().any(|row| {
            text(row, "user_id").as_deref() == Some(profile_id)
                && text(row, "role").as_deref() == Some("ADMIN")
        })
    }
}

/// Caller identity derived from credentials
enum Caller {
    Service,
    User { auth_user_id: String },
    Anonymous,
}

/// In-memory auth and REST gateway with token-based RLS.
///
/// The service key bypasses every policy. User tokens (`token-<auth id>`)
/// may only read their own profile row, only admins may create locations,
/// and windows may only be added to the caller's own preference.
#[derive(Clone, Default)]
pub struct InMemoryPlatform {
    state: Arc<Mutex<State>>,
}

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force every insert into `table` to answer `status`.
    pub fn fail_inserts(&self, table: &str, status: u16) {
        self.state.lock().unwrap().forced_status.insert(table.to_string(), status);
    }

    /// Force every update of `table` to answer `status`.
    pub fn fail_updates(&self, table: &str, status: u16) {
        self.state.lock().unwrap().forced_update_status.insert(table.to_string(), status);
    }

    /// Store inserts into `table` but answer 409 with no rows, as when a
    /// concurrent writer got there first.
    pub fn conflict_after_insert(&self, table: &str) {
        self.state.lock().unwrap().unacknowledged_inserts.insert(table.to_string());
    }

    /// Answer a user's read of someone else's profile with `status`.
    pub fn answer_foreign_profile_reads(&self, status: u16) {
        self.state.lock().unwrap().foreign_profile_status = Some(status);
    }

    /// Let every authenticated user read and write everything.
    pub fn disable_policies(&self) {
        self.state.lock().unwrap().open_policies = true;
    }

    /// Pre-register an identity without going through sign-up.
    pub fn add_account(&self, email: &str, password: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id("auth");
        state.accounts.push(Account {
            id: id.clone(),
            email: email.to_string(),
            password: password.to_string(),
        });
        id
    }

    /// Insert raw rows, bypassing policies.
    pub fn put(&self, table: &str, row: Value) -> String {
        let mut state = self.state.lock().unwrap();
        let mut row = row;
        let id = match text(&row, "id") {
            Some(id) => id,
            None => {
                let id = state.next_id(table);
                row["id"] = json!(id);
                id
            }
        };
        state.tables.entry(table.to_string()).or_default().push(row);
        id
    }

    pub fn table(&self, table: &str) -> Vec<Value> {
        self.state.lock().unwrap().rows(table).to_vec()
    }

    pub fn count(&self, table: &str) -> usize {
        self.state.lock().unwrap().rows(table).len()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn account_count(&self) -> usize {
        self.state.lock().unwrap().accounts.len()
    }

    fn caller(state: &State, creds: &Credentials) -> Caller {
        match creds.bearer.as_deref() {
            Some(SERVICE_KEY) => Caller::Service,
            Some(token) => match state.account_for_token(token) {
                Some(_) if state.open_policies => Caller::Service,
                Some(account) => Caller::User { auth_user_id: account.id.clone() },
                None => Caller::Anonymous,
            },
            None => Caller::Anonymous,
        }
    }

    fn session(account: &Account) -> AuthSession {
        AuthSession { access_token: format!("token-{}", account.id), user_id: account.id.clone() }
    }
}

fn text(row: &Value, column: &str) -> Option<String> {
    scalar(row.get(column)?)
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches(row: &Value, query: &RestQuery) -> bool {
    query.params().iter().all(|(column, filter)| {
        if column == "select" || column == "limit" {
            return true;
        }
        let actual = text(row, column);
        if let Some(expected) = filter.strip_prefix("eq.") {
            actual.as_deref() == Some(expected)
        } else if let Some(list) = filter.strip_prefix("in.(").and_then(|f| f.strip_suffix(')')) {
            actual.is_some_and(|value| list.split(',').any(|item| item == value))
        } else {
            false
        }
    })
}

#[async_trait]
impl AuthGateway for InMemoryPlatform {
    async fn sign_up(&self, email: &str, password: &str) -> DomainResult<Option<AuthSession>> {
        let mut state = self.state.lock().unwrap();
        if state.accounts.iter().any(|account| account.email == email) {
            return Ok(None);
        }
        let id = state.next_id("auth");
        let account = Account { id, email: email.to_string(), password: password.to_string() };
        let session = Self::session(&account);
        state.accounts.push(account);
        Ok(Some(session))
    }

    async fn sign_in(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let state = self.state.lock().unwrap();
        state
            .accounts
            .iter()
            .find(|account| account.email == email && account.password == password)
            .map(Self::session)
            .ok_or_else(|| {
                DanceFloorError::Auth(format!(
                    "Sign-in failed for {email}: 400 {{\"error\":\"invalid_grant\"}}"
                ))
            })
    }
}

#[async_trait]
impl RestGateway for InMemoryPlatform {
    async fn select(
        &self,
        creds: &Credentials,
        table: &str,
        query: &RestQuery,
    ) -> DomainResult<RestResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(("GET", table.to_string()));
        let caller = Self::caller(&state, creds);

        if let (Caller::User { auth_user_id }, "user_profiles", Some(status)) =
            (&caller, table, state.foreign_profile_status)
        {
            let target = query.get("auth_user_id").and_then(|f| f.strip_prefix("eq."));
            if target.is_some_and(|target| target != auth_user_id.as_str()) {
                return Ok(RestResponse::new(status, json!({"message": "permission denied"})));
            }
        }

        let limit = query.get("limit").and_then(|l| l.parse::<usize>().ok()).unwrap_or(usize::MAX);
        let rows: Vec<Value> = state
            .rows(table)
            .iter()
            .filter(|row| matches(row, query))
            .filter(|row| match (&caller, table) {
                (Caller::User { auth_user_id }, "user_profiles") => {
                    text(row, "auth_user_id").as_deref() == Some(auth_user_id.as_str())
                }
                (Caller::Anonymous, _) => false,
                _ => true,
            })
            .take(limit)
            .cloned()
            .collect();
        Ok(RestResponse::new(200, Value::Array(rows)))
    }

    async fn insert(
        &self,
        creds: &Credentials,
        table: &str,
        rows: &Value,
        options: &InsertOptions,
    ) -> DomainResult<RestResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(("POST", table.to_string()));

        if let Some(status) = state.forced_status.get(table) {
            return Ok(RestResponse::new(*status, json!({"message": "forced failure"})));
        }

        let incoming: Vec<Value> = match rows {
            Value::Array(items) => items.clone(),
            other => vec![other.clone()],
        };

        match Self::caller(&state, creds) {
            Caller::Service => {}
            Caller::Anonymous => return Ok(RestResponse::new(401, json!({"message": "JWT required"}))),
            Caller::User { auth_user_id } => {
                let profile = state.profile_of(&auth_user_id).unwrap_or_default();
                let allowed = match table {
                    "locations" => state.is_admin(&profile),
                    "schedule_preference_windows" => incoming.iter().all(|row| {
                        let preference = text(row, "preference_id");
                        state.rows("schedule_preferences").iter().any(|pref| {
                            text(pref, "id") == preference
                                && text(pref, "user_id").as_deref() == Some(profile.as_str())
                        })
                    }),
                    _ => false,
                };
                if !allowed {
                    return Ok(RestResponse::new(
                        403,
                        json!({"code": "42501", "message": "new row violates row-level security policy"}),
                    ));
                }
            }
        }

        let conflict_columns: Vec<String> = options
            .on_conflict
            .as_deref()
            .map(|cols| cols.split(',').map(str::to_string).collect())
            .unwrap_or_default();

        let mut written = Vec::with_capacity(incoming.len());
        for row in incoming {
            let Value::Object(fields) = row else {
                return Ok(RestResponse::new(400, json!({"message": "expected object"})));
            };

            let existing = if conflict_columns.is_empty() {
                None
            } else {
                state.tables.get(table).and_then(|rows| {
                    rows.iter().position(|candidate| {
                        conflict_columns
                            .iter()
                            .all(|col| text(candidate, col) == fields.get(col).and_then(scalar))
                    })
                })
            };

            let stored = match existing {
                Some(index) => {
                    let rows = state.tables.entry(table.to_string()).or_default();
                    if let Value::Object(target) = &mut rows[index] {
                        merge(target, &fields);
                    }
                    rows[index].clone()
                }
                None => {
                    let mut fields = fields;
                    if !fields.contains_key("id") {
                        fields.insert("id".into(), json!(state.next_id(table)));
                    }
                    let row = Value::Object(fields);
                    state.tables.entry(table.to_string()).or_default().push(row.clone());
                    row
                }
            };
            written.push(stored);
        }

        if state.unacknowledged_inserts.contains(table) {
            return Ok(RestResponse::new(409, json!({"code": "23505"})));
        }

        let body = if options.return_representation { Value::Array(written) } else { Value::Null };
        Ok(RestResponse::new(201, body))
    }

    async fn update(
        &self,
        creds: &Credentials,
        table: &str,
        query: &RestQuery,
        patch: &Value,
    ) -> DomainResult<RestResponse> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(("PATCH", table.to_string()));
        if let Some(status) = state.forced_update_status.get(table) {
            return Ok(RestResponse::new(*status, json!({"message": "forced failure"})));
        }
        if !matches!(Self::caller(&state, creds), Caller::Service) {
            return Ok(RestResponse::new(403, Value::Null));
        }
        let Value::Object(fields) = patch else {
            return Ok(RestResponse::new(400, Value::Null));
        };

        let mut updated = Vec::new();
        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|row| matches(row, query)) {
                if let Value::Object(target) = row {
                    merge(target, fields);
                }
                updated.push(row.clone());
            }
        }
        Ok(RestResponse::new(200, Value::Array(updated)))
    }
}

fn merge(target: &mut Map<String, Value>, fields: &Map<String, Value>) {
    for (key, value) in fields {
        target.insert(key.clone(), value.clone());
    }
}

/// Reporter that keeps every line for assertions.
#[derive(Default)]
pub struct CollectingReporter {
    lines: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl ProgressReporter for CollectingReporter {
    fn line(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}
