//! Seeded mock record generators
//!
//! Every generator takes the random source explicitly, so a seeded
//! [`StdRng`](rand::rngs::StdRng) reproduces the same dataset. Records
//! reference each other through pools: folders pick their client and
//! lawyer from the generated clients and users, tasks pick their folder
//! and people the same way.

pub mod clients;
pub mod folders;
pub mod names;
pub mod tasks;
pub mod users;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::MockConfig;
use crate::models::{Client, Folder, Task, User, UserRole};

/// Complete generated dataset
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub clients: Vec<Client>,
    pub folders: Vec<Folder>,
    pub tasks: Vec<Task>,
}

impl Dataset {
    pub fn generate<R: Rng + ?Sized>(config: &MockConfig, rng: &mut R, now: DateTime<Utc>) -> Self {
        let users = users::generate_users(rng, config.users, now);
        let clients = clients::generate_clients(rng, config.clients, now);
        let lawyers: Vec<User> = users
            .iter()
            .filter(|user| user.has_role(UserRole::Lawyer))
            .cloned()
            .collect();

        let mut folders: Vec<Folder> = (1..=config.folders as u64)
            .filter_map(|id| folders::generate_folder(rng, id, &clients, &lawyers, &users, now))
            .collect();
        if let Some(fixture_id) = config.fixture_folder_id {
            if !folders.iter().any(|folder| folder.id == fixture_id) {
                folders.extend(folders::generate_folder(
                    rng, fixture_id, &clients, &lawyers, &users, now,
                ));
            }
        }

        let tasks = (1..=config.tasks as u64)
            .filter_map(|id| tasks::generate_task(rng, id, &folders, &users, now))
            .collect();

        tracing::debug!(
            users = users.len(),
            clients = clients.len(),
            folders = folders.len(),
            "Generated mock dataset"
        );

        Self {
            users,
            clients,
            folders,
            tasks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_config() -> MockConfig {
        MockConfig {
            folders: 20,
            tasks: 30,
            users: 8,
            clients: 6,
            seed: Some(99),
            ..MockConfig::default()
        }
    }

    #[test]
    fn test_dataset_sizes_and_fixture() {
        let config = small_config();
        let data = Dataset::generate(&config, &mut config.rng(), Utc::now());
        assert_eq!(data.users.len(), 8);
        assert_eq!(data.clients.len(), 6);
        assert_eq!(data.folders.len(), 21);
        assert_eq!(data.folders.last().map(|f| f.id), Some(1830));
        assert_eq!(data.tasks.len(), 30);
    }

    #[test]
    fn test_seed_reproduces_dataset() {
        let config = small_config();
        let now = Utc::now();
        let a = Dataset::generate(&config, &mut config.rng(), now);
        let b = Dataset::generate(&config, &mut config.rng(), now);
        assert_eq!(a.folders, b.folders);
        assert_eq!(a.tasks, b.tasks);
    }

    #[test]
    fn test_folders_reference_generated_records() {
        let config = small_config();
        let mut rng = StdRng::seed_from_u64(5);
        let data = Dataset::generate(&config, &mut rng, Utc::now());
        for folder in &data.folders {
            assert!(data.clients.iter().any(|c| c.id == folder.client.id));
            assert!(data.users.iter().any(|u| u.id == folder.responsible_lawyer.id));
        }
    }
}
