//! In-memory record store
//!
//! Each collection sits behind its own `tokio::sync::RwLock`, so a handler's
//! read-modify-write happens under a single write guard.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::config::MockConfig;
use crate::generators::Dataset;
use crate::models::{Client, Folder, Task, User};

/// Anything stored by numeric id
pub trait Record: Clone {
    fn id(&self) -> u64;
}

impl Record for Folder {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Task {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for User {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Record for Client {
    fn id(&self) -> u64 {
        self.id
    }
}

/// Ordered id → record collection; insertion order is list order
#[derive(Debug, Clone)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T: Record> Collection<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn find_mut(&mut self, id: u64) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.id() == id)
    }

    /// `max(id) + 1`, or 1 for an empty collection
    pub fn next_id(&self) -> u64 {
        self.items.iter().map(Record::id).max().map_or(1, |max| max + 1)
    }

    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Swap in `item` at the position of the record with the same id
    pub fn replace(&mut self, item: T) -> Option<T> {
        let slot = self.find_mut(item.id())?;
        Some(std::mem::replace(slot, item))
    }

    pub fn remove(&mut self, id: u64) -> Option<T> {
        let pos = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(pos))
    }
}

impl<T: Record> Default for Collection<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Generated dataset shared by every handler
#[derive(Debug)]
pub struct MockStore {
    pub folders: RwLock<Collection<Folder>>,
    pub tasks: RwLock<Collection<Task>>,
    pub users: RwLock<Collection<User>>,
    pub clients: RwLock<Collection<Client>>,
    /// Account answered by `login` and `me`
    pub session_user: User,
}

impl MockStore {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let session_user = dataset
            .users
            .iter()
            .find(|user| user.id == crate::generators::users::TEST_LAWYER_ID)
            .cloned()
            .unwrap_or_else(|| {
                let mut rng = rand::rng();
                crate::generators::users::test_lawyer(&mut rng, Utc::now())
            });

        Self {
            folders: RwLock::new(Collection::new(dataset.folders)),
            tasks: RwLock::new(Collection::new(dataset.tasks)),
            users: RwLock::new(Collection::new(dataset.users)),
            clients: RwLock::new(Collection::new(dataset.clients)),
            session_user,
        }
    }

    /// Generate a fresh dataset as of `now`
    pub fn generate_at(config: &MockConfig, now: DateTime<Utc>) -> Self {
        let mut rng = config.rng();
        Self::from_dataset(Dataset::generate(config, &mut rng, now))
    }

    pub fn generate(config: &MockConfig) -> Self {
        Self::generate_at(config, Utc::now())
    }

    /// Record counts, in `(folders, tasks, users, clients)` order
    pub async fn counts(&self) -> (usize, usize, usize, usize) {
        (
            self.folders.read().await.len(),
            self.tasks.read().await.len(),
            self.users.read().await.len(),
            self.clients.read().await.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Client, ClientMetadata};

    fn client(id: u64) -> Client {
        Client {
            id,
            name: format!("Cliente {}", id),
            document: String::new(),
            email: None,
            phone: None,
            address: None,
            folders_count: 0,
            active_folders_count: 0,
            metadata: ClientMetadata::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_next_id() {
        let mut collection: Collection<Client> = Collection::default();
        assert_eq!(collection.next_id(), 1);
        collection.insert(client(4));
        collection.insert(client(2));
        assert_eq!(collection.next_id(), 5);
    }

    #[test]
    fn test_replace_and_remove_keep_order() {
        let mut collection = Collection::new(vec![client(1), client(2), client(3)]);
        let mut updated = client(2);
        updated.name = "Atualizado".to_string();
        assert!(collection.replace(updated).is_some());
        assert_eq!(collection.all()[1].name, "Atualizado");
        assert!(collection.replace(client(9)).is_none());

        assert_eq!(collection.remove(1).map(|c| c.id), Some(1));
        assert!(collection.remove(1).is_none());
        let ids: Vec<u64> = collection.all().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_generate_store() {
        let config = MockConfig {
            folders: 10,
            tasks: 5,
            users: 4,
            clients: 3,
            seed: Some(1),
            ..MockConfig::default()
        };
        let store = MockStore::generate(&config);
        assert_eq!(store.counts().await, (11, 5, 4, 3));
        assert_eq!(store.session_user.email, "joao@benicio.com.br");
        assert!(store.folders.read().await.find(1830).is_some());
    }
}
