//! User records

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::json;

use super::names;
use crate::models::{User, UserMetadata, UserRole};

pub const ADMIN_ID: u64 = 1;
pub const TEST_LAWYER_ID: u64 = 2;

pub fn generate_user<R: Rng + ?Sized>(rng: &mut R, id: u64, now: DateTime<Utc>) -> User {
    let role = UserRole::ALL.choose(rng).copied().unwrap_or(UserRole::Lawyer);
    generate_user_with_role(rng, id, role, now)
}

pub fn generate_user_with_role<R: Rng + ?Sized>(
    rng: &mut R,
    id: u64,
    role: UserRole,
    now: DateTime<Utc>,
) -> User {
    let (first, last) = names::person_name(rng);
    let username = names::slugify(&format!("{}.{}", first, last));
    let email = format!("{}@benicio.com.br", username);

    let created_at = names::past(rng, now, 2 * 365);
    let updated_at = names::between(rng, created_at, now);
    let email_verified = rng.random_bool(0.8);
    let email_verified_at = rng
        .random_bool(0.8)
        .then(|| names::past(rng, now, 365));

    let mut preferences = BTreeMap::new();
    preferences.insert(
        "theme".to_string(),
        json!(if rng.random_bool(0.5) { "light" } else { "dark" }),
    );
    preferences.insert(
        "notifications_enabled".to_string(),
        json!(rng.random_bool(0.5)),
    );
    preferences.insert("language".to_string(), json!("pt-BR"));

    User {
        id,
        full_name: format!("{} {}", first, last),
        email,
        username,
        avatar_url: Some(names::avatar_url(rng)),
        phone: Some(names::phone(rng)),
        oab_number: (role == UserRole::Lawyer).then(|| oab_number(rng)),
        metadata: UserMetadata {
            email_verified,
            email_verified_at,
            last_login_at: Some(names::past(rng, now, 7)),
            preferences,
        },
        roles: vec![role.role()],
        created_at,
        updated_at,
    }
}

fn oab_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("OAB/SP {}", rng.random_range(100_000..=999_999))
}

/// Built-in administrator account
pub fn admin<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> User {
    let mut user = generate_user_with_role(rng, ADMIN_ID, UserRole::Admin, now);
    user.full_name = "Admin Benício".to_string();
    user.email = "admin@benicio.com.br".to_string();
    user.username = "admin".to_string();
    user.oab_number = None;
    user
}

/// Lawyer returned by the login and `me` endpoints
pub fn test_lawyer<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> User {
    let mut user = generate_user_with_role(rng, TEST_LAWYER_ID, UserRole::Lawyer, now);
    user.full_name = "Dr. João Benício".to_string();
    user.email = "joao@benicio.com.br".to_string();
    user.username = "joao.benicio".to_string();
    user.oab_number = Some("OAB/SP 123456".to_string());
    user
}

/// Fixtures first, then generated users up to `count`
pub fn generate_users<R: Rng + ?Sized>(rng: &mut R, count: usize, now: DateTime<Utc>) -> Vec<User> {
    let mut users = vec![admin(rng, now), test_lawyer(rng, now)];
    let mut next_id = TEST_LAWYER_ID + 1;
    while users.len() < count {
        users.push(generate_user(rng, next_id, now));
        next_id += 1;
    }
    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fixtures_lead_the_list() {
        let mut rng = StdRng::seed_from_u64(11);
        let users = generate_users(&mut rng, 10, Utc::now());
        assert_eq!(users.len(), 10);
        assert_eq!(users[0].email, "admin@benicio.com.br");
        assert_eq!(users[1].full_name, "Dr. João Benício");
        assert_eq!(users[1].primary_role(), Some(UserRole::Lawyer));
        let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_only_lawyers_carry_oab() {
        let mut rng = StdRng::seed_from_u64(5);
        let now = Utc::now();
        for id in 0..50 {
            let user = generate_user(&mut rng, id, now);
            assert_eq!(user.oab_number.is_some(), user.has_role(UserRole::Lawyer));
            assert!(user.email.ends_with("@benicio.com.br"));
        }
    }
}
