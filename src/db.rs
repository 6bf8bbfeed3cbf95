use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::models::{Task, User};

/// Handle over the task database. Owns the connection; handlers receive the
/// store through `web::Data` and never touch SQL themselves.
pub struct TaskStore {
    conn: Mutex<Connection>,
}

impl TaskStore {
    pub fn open(uri: &str) -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open(uri)?)
    }

    /// Private database for tests; same schema as `open`.
    pub fn open_in_memory() -> Result<Self, rusqlite::Error> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, rusqlite::Error> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            )",
            [],
        )?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                completed_at TEXT,
                created_at TEXT
            )",
            [],
        )?;
        Ok(TaskStore {
            conn: Mutex::new(conn),
        })
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT id, name, description, completed_at, created_at FROM tasks")?;
        let rows = stmt.query_map([], row_to_task)?;
        rows.collect()
    }

    pub fn insert_task(&self, task: &Task) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO tasks (id, name, description, completed_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                task.id.to_string(),
                task.name,
                task.description,
                task.completed_at,
                task.created_at
            ],
        )?;
        Ok(())
    }

    pub fn find_task(&self, id: Uuid) -> Result<Option<Task>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, name, description, completed_at, created_at FROM tasks WHERE id = ?1",
            params![id.to_string()],
            row_to_task,
        )
        .optional()
    }

    /// Full overwrite of the mutable fields. Succeeds whether or not a row
    /// matched; callers do not learn the difference.
    pub fn update_task(
        &self,
        id: Uuid,
        name: &str,
        description: &str,
        completed_at: Option<&str>,
    ) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE tasks SET name = ?1, description = ?2, completed_at = ?3 WHERE id = ?4",
            params![name, description, completed_at, id.to_string()],
        )?;
        Ok(())
    }

    pub fn delete_task(&self, id: Uuid) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM tasks WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }

    pub fn delete_all_tasks(&self) -> Result<(), rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM tasks", [])?;
        Ok(())
    }

    /// Plaintext credential lookup. A wrong password and an unknown email
    /// both come back as `None`.
    pub fn find_user(&self, email: &str, password: &str) -> Result<Option<User>, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT id, email, password FROM users WHERE email = ?1 AND password = ?2",
            params![email, password],
            |row| {
                Ok(User {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password: row.get(2)?,
                })
            },
        )
        .optional()
    }

    /// Seed helper for provisioning and tests; no HTTP endpoint writes
    /// users.
    pub fn insert_user(&self, email: &str, password: &str) -> Result<i64, rusqlite::Error> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO users (email, password) VALUES (?1, ?2)",
            params![email, password],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

fn row_to_task(row: &Row<'_>) -> Result<Task, rusqlite::Error> {
    let id: String = row.get(0)?;
    let id = Uuid::parse_str(&id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Task {
        id,
        name: row.get(1)?,
        description: row.get(2)?,
        completed_at: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            name: "write report".to_string(),
            description: "quarterly numbers".to_string(),
            completed_at: None,
            created_at: Some("2024-01-01T00:00:00.000Z".to_string()),
        }
    }

    #[test]
    fn insert_then_find_returns_the_row() {
        let store = TaskStore::open_in_memory().unwrap();
        let task = sample_task();
        store.insert_task(&task).unwrap();

        let found = store.find_task(task.id).unwrap().unwrap();
        assert_eq!(found.name, task.name);
        assert_eq!(found.description, task.description);
        assert_eq!(found.completed_at, None);
        assert_eq!(found.created_at, task.created_at);
    }

    #[test]
    fn find_unknown_id_returns_none() {
        let store = TaskStore::open_in_memory().unwrap();
        assert!(store.find_task(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn update_overwrites_all_mutable_fields() {
        let store = TaskStore::open_in_memory().unwrap();
        let task = sample_task();
        store.insert_task(&task).unwrap();

        store
            .update_task(task.id, "new name!", "new description", Some("2024-02-02T00:00:00.000Z"))
            .unwrap();

        let found = store.find_task(task.id).unwrap().unwrap();
        assert_eq!(found.name, "new name!");
        assert_eq!(found.description, "new description");
        assert_eq!(found.completed_at.as_deref(), Some("2024-02-02T00:00:00.000Z"));
        // created_at is not part of an update
        assert_eq!(found.created_at, task.created_at);
    }

    #[test]
    fn update_of_missing_row_is_a_no_op() {
        let store = TaskStore::open_in_memory().unwrap();
        store
            .update_task(Uuid::new_v4(), "name", "description", None)
            .unwrap();
        assert!(store.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = TaskStore::open_in_memory().unwrap();
        let task = sample_task();
        store.insert_task(&task).unwrap();

        store.delete_task(task.id).unwrap();
        assert!(store.find_task(task.id).unwrap().is_none());
        // second delete of the same id still succeeds
        store.delete_task(task.id).unwrap();
    }

    #[test]
    fn delete_all_clears_every_row() {
        let store = TaskStore::open_in_memory().unwrap();
        store.insert_task(&sample_task()).unwrap();
        store.insert_task(&sample_task()).unwrap();

        store.delete_all_tasks().unwrap();
        assert!(store.list_tasks().unwrap().is_empty());
    }

    #[test]
    fn find_user_matches_exact_credentials_only() {
        let store = TaskStore::open_in_memory().unwrap();
        let id = store.insert_user("alice@example.com", "hunter2").unwrap();

        let user = store.find_user("alice@example.com", "hunter2").unwrap().unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, "alice@example.com");

        assert!(store.find_user("alice@example.com", "wrong").unwrap().is_none());
        assert!(store.find_user("bob@example.com", "hunter2").unwrap().is_none());
    }
}
