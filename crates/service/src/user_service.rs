use tracing::info;

use crate::storage::memory_map_store::{InsertOutcome, MemoryMapStore};

pub const USER_CREATED: &str = "User created";
pub const USER_ALREADY_EXISTS: &str = "User already exists";

/// Stored fields of a user; the id is the map key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub name: String,
    pub email: String,
}

/// Outcome of [`UserService::create_user`]. A duplicate id is an ordinary
/// answer, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

impl CreateOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, Self::Created)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Created => USER_CREATED,
            Self::AlreadyExists => USER_ALREADY_EXISTS,
        }
    }
}

/// Owner of the user table. Cloning shares the same table.
#[derive(Clone, Default)]
pub struct UserService {
    users: MemoryMapStore<String, UserRecord>,
}

impl UserService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a user unless `id` is taken. Inputs are stored as given.
    pub async fn create_user(&self, id: &str, name: &str, email: &str) -> CreateOutcome {
        let record = UserRecord { name: name.to_string(), email: email.to_string() };
        match self.users.insert_if_absent(id.to_string(), record).await {
            InsertOutcome::Inserted => {
                let total_users = self.user_count().await;
                info!(service = "server", event = "user_created", user_id = %id, name = %name, total_users, "created user");
                CreateOutcome::Created
            }
            InsertOutcome::AlreadyPresent => CreateOutcome::AlreadyExists,
        }
    }

    /// Get a user by id.
    pub async fn get_user(&self, id: &str) -> Option<UserRecord> {
        self.users.get(&id.to_string()).await
    }

    pub async fn user_count(&self) -> usize {
        self.users.count().await
    }
}
