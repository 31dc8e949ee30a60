//! Generated users for scale runs
//!
//! Each extra user gets a deterministic identity (`extra{i}@example.com`)
//! and a random draw of availability slots from the shared evening/weekend
//! pool, so repeated runs with the same seed produce the same data.

use dancefloor_domain::constants::{DEFAULT_EXTRA_WINDOWS, EXTRA_USER_PASSWORD};
use dancefloor_domain::fixtures::extra_window_pool;
use dancefloor_domain::{DanceRole, RoleLabel, UserFixture, WsdcLevel};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const LEVEL_CYCLE: [WsdcLevel; 3] = [WsdcLevel::Novice, WsdcLevel::Intermediate, WsdcLevel::Advanced];

/// Build `count` extra users.
///
/// `windows_per_user` caps the slots per user (default two); it can never
/// exceed the size of the pool. `seed` fixes the draw.
pub fn generate_extra_users(
    count: usize,
    windows_per_user: Option<usize>,
    seed: u64,
) -> Vec<UserFixture> {
    let pool = extra_window_pool();
    let take = windows_per_user.unwrap_or(DEFAULT_EXTRA_WINDOWS).min(pool.len());

    (1..=count)
        .map(|index| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(index as u64));
            let mut windows: Vec<_> = pool.choose_multiple(&mut rng, take).cloned().collect();
            windows.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.start.cmp(&b.start)));

            UserFixture {
                email: format!("extra{index}@example.com"),
                password: EXTRA_USER_PASSWORD.to_string(),
                first_name: "Extra".to_string(),
                last_name: format!("User {index}"),
                display_name: Some(format!("Extra {index}")),
                primary_role: if index % 2 == 1 { DanceRole::Leader } else { DanceRole::Follower },
                wsdc_level: LEVEL_CYCLE[(index - 1) % LEVEL_CYCLE.len()],
                competitiveness_level: 3,
                bio: None,
                dance_goals: None,
                windows,
                roles: vec![RoleLabel::Dancer],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use dancefloor_domain::windows_overlap;

    use super::*;

    #[test]
    fn identities_are_numbered_from_one() {
        let users = generate_extra_users(3, None, 7);
        let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["extra1@example.com", "extra2@example.com", "extra3@example.com"]);
        assert_eq!(users[0].primary_role, DanceRole::Leader);
        assert_eq!(users[1].primary_role, DanceRole::Follower);
        assert_eq!(users[2].wsdc_level, WsdcLevel::Advanced);
        assert!(users.iter().all(|u| u.roles == vec![RoleLabel::Dancer]));
    }

    #[test]
    fn windows_per_user_caps_the_draw() {
        for user in generate_extra_users(10, Some(1), 1) {
            assert_eq!(user.windows.len(), 1);
        }
        for user in generate_extra_users(10, None, 1) {
            assert_eq!(user.windows.len(), DEFAULT_EXTRA_WINDOWS);
        }
        let pool_len = extra_window_pool().len();
        for user in generate_extra_users(2, Some(100), 1) {
            assert_eq!(user.windows.len(), pool_len);
        }
    }

    #[test]
    fn windows_are_distinct_and_sorted() {
        for user in generate_extra_users(20, Some(4), 99) {
            let unique: HashSet<_> = user.windows.iter().collect();
            assert_eq!(unique.len(), user.windows.len());
            assert!(user.windows.windows(2).all(|pair| pair[0].day <= pair[1].day));
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        assert_eq!(generate_extra_users(5, Some(3), 42), generate_extra_users(5, Some(3), 42));
    }

    #[test]
    fn zero_windows_is_allowed() {
        let users = generate_extra_users(2, Some(0), 42);
        assert!(users.iter().all(|u| u.windows.is_empty()));
    }

    #[test]
    fn generated_users_overlap_the_test_account() {
        let test_account = dancefloor_domain::fixtures::overlapping_windows();
        let overlapping = generate_extra_users(50, Some(2), 42)
            .iter()
            .filter(|u| windows_overlap(&u.windows, &test_account))
            .count();
        assert!(overlapping > 25, "only {overlapping} of 50 overlap");
    }
}
