//! Mock dataset configuration

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Controls the generated dataset and the mock credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MockConfig {
    /// Number of generated folders (default: 150)
    #[serde(default = "default_folders")]
    pub folders: usize,

    /// Number of generated tasks (default: 200)
    #[serde(default = "default_tasks")]
    pub tasks: usize,

    /// Number of generated users, fixtures included (default: 50)
    #[serde(default = "default_users")]
    pub users: usize,

    /// Number of generated clients, fixtures included (default: 80)
    #[serde(default = "default_clients")]
    pub clients: usize,

    /// Seed for a reproducible dataset. Unset means a fresh dataset per start.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Extra folder appended with a well-known id (default: 1830)
    #[serde(default = "default_fixture_folder_id")]
    pub fixture_folder_id: Option<u64>,

    /// The only e-mail accepted by the login endpoints
    #[serde(default = "default_auth_email")]
    pub auth_email: String,

    /// The only password accepted by the login endpoints
    #[serde(default = "default_auth_password")]
    pub auth_password: String,

    /// Token accepted by the reset-password endpoint
    #[serde(default = "default_reset_token")]
    pub reset_token: String,
}

fn default_folders() -> usize {
    150
}

fn default_tasks() -> usize {
    200
}

fn default_users() -> usize {
    50
}

fn default_clients() -> usize {
    80
}

fn default_fixture_folder_id() -> Option<u64> {
    Some(1830)
}

fn default_auth_email() -> String {
    "test@benicio.com.br".to_string()
}

fn default_auth_password() -> String {
    "benicio123".to_string()
}

fn default_reset_token() -> String {
    "valid-reset-token".to_string()
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            folders: default_folders(),
            tasks: default_tasks(),
            users: default_users(),
            clients: default_clients(),
            seed: None,
            fixture_folder_id: default_fixture_folder_id(),
            auth_email: default_auth_email(),
            auth_password: default_auth_password(),
            reset_token: default_reset_token(),
        }
    }
}

impl MockConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Random source for dataset generation, seeded when a seed is configured
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Whether the pair matches the configured credentials
    pub fn accepts(&self, email: &str, password: &str) -> bool {
        email == self.auth_email && password == self.auth_password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults_from_empty_document() {
        let config: MockConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.folders, 150);
        assert_eq!(config.tasks, 200);
        assert_eq!(config.fixture_folder_id, Some(1830));
        assert!(config.accepts("test@benicio.com.br", "benicio123"));
        assert!(!config.accepts("test@benicio.com.br", "wrong"));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = MockConfig {
            seed: Some(42),
            ..MockConfig::default()
        };
        let a: u64 = config.rng().random();
        let b: u64 = config.rng().random();
        assert_eq!(a, b);
    }
}
