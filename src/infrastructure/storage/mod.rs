//! JSON file-based storage
//!
//! A single JSON object with top-level `users` and `todos`, created empty on
//! first run. No command reads or writes it yet; it exists as the extension
//! point for the planned todo/notes commands.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::application::errors::StorageError;
use crate::domain::entities::User;

/// On-disk layout
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Db {
    pub users: HashMap<String, StoredUser>,
    pub todos: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: String,
    pub display_name: String,
}

impl From<&User> for StoredUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            display_name: user.display_name.clone(),
        }
    }
}

/// JSON file store
pub struct JsonStore {
    path: PathBuf,
    db: RwLock<Db>,
}

impl JsonStore {
    /// Open the store, creating the file with an empty database when it does
    /// not exist yet
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let db = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let db = Db::default();
                write_db(&path, &db).await?;
                tracing::info!(path = %path.display(), "created empty store");
                db
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            db: RwLock::new(db),
        })
    }

    pub async fn get_user(&self, id: &str) -> Option<StoredUser> {
        self.db.read().await.users.get(id).cloned()
    }

    pub async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        {
            let mut db = self.db.write().await;
            db.users.insert(user.id.clone(), user.into());
        }
        self.flush().await
    }

    pub async fn add_todo(&self, user_id: &str, item: impl Into<String>) -> Result<(), StorageError> {
        {
            let mut db = self.db.write().await;
            db.todos.entry(user_id.to_string()).or_default().push(item.into());
        }
        self.flush().await
    }

    pub async fn todos(&self, user_id: &str) -> Vec<String> {
        self.db
            .read()
            .await
            .todos
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    async fn flush(&self) -> Result<(), StorageError> {
        let db = self.db.read().await;
        write_db(&self.path, &db).await
    }
}

async fn write_db(path: &Path, db: &Db) -> Result<(), StorageError> {
    let content = serde_json::to_string_pretty(db)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}
