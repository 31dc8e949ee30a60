//! Domain constants
//!
//! Endpoint defaults, table names and labels shared by every entry point.

// Platform defaults (local stack)
pub const DEFAULT_PLATFORM_URL: &str = "http://127.0.0.1:54321";
pub const DEFAULT_DB_HOST: &str = "127.0.0.1";
pub const DEFAULT_DB_PORT: u16 = 54322;
pub const DEFAULT_DB_NAME: &str = "postgres";
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_DB_PASSWORD: &str = "postgres";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// REST resources
pub const TABLE_LOCATIONS: &str = "locations";
pub const TABLE_USER_PROFILES: &str = "user_profiles";
pub const TABLE_USER_ROLES: &str = "user_roles";
pub const TABLE_SCHEDULE_PREFERENCES: &str = "schedule_preferences";
pub const TABLE_PREFERENCE_LOCATIONS: &str = "schedule_preference_locations";
pub const TABLE_PREFERENCE_WINDOWS: &str = "schedule_preference_windows";
pub const TABLE_PREFERENCE_FOCUS: &str = "schedule_preference_focus";
pub const TABLE_PREFERENCE_LEVELS: &str = "schedule_preference_levels";
pub const TABLE_PREFERENCE_ROLES: &str = "schedule_preference_roles";
pub const TABLE_SESSIONS: &str = "sessions";
pub const TABLE_SESSION_PARTICIPANTS: &str = "session_participants";

// Conflict targets for upserts
pub const USER_ROLES_CONFLICT: &str = "user_id,role";
pub const SESSION_PARTICIPANTS_CONFLICT: &str = "session_id,user_id";

// Scale test wiring
pub const ENV_SCALE_TEST: &str = "SCALE_TEST";
pub const ENV_SCALE_SEEDED_USERS_JSON: &str = "SCALE_SEEDED_USERS_JSON";
pub const ENV_SCALE_WINDOWS_PER_USER: &str = "SCALE_WINDOWS_PER_USER";
pub const DEFAULT_SCALE_PATTERN: &str = "src/__tests__/matches-.*integration.test.ts";
pub const DEFAULT_SCALE_EXTRA_USERS: usize = 200;
pub const DEFAULT_SCALE_WINDOWS_PER_USER: usize = 2;

// Extra user generation
pub const EXTRA_USER_PASSWORD: &str = "extra123";
pub const DEFAULT_EXTRA_WINDOWS: usize = 2;
pub const DEFAULT_RNG_SEED: u64 = 42;
pub const DEFAULT_HISTORY_SESSIONS: usize = 3;

// Schedule preference defaults
pub const DEFAULT_MAX_TRAVEL_KM: u32 = 25;
pub const DEFAULT_LOCATION_NOTE: &str = "Prefer downtown locations";
pub const DEFAULT_PREFERENCE_NOTES: &str = "Available for regular practice sessions";
