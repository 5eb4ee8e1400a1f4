//! [`KeyValueStore`] over the `kv_entries` table.

use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;
use crate::kv::KeyValueStore;

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn()
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT INTO kv_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, nexus_shared::time::format(&nexus_shared::time::now())],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM kv_entries WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT key FROM kv_entries ORDER BY key ASC")?;
        let rows = stmt.query_map([], |row| row.get(0))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row?);
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{load_json, save_json};

    #[test]
    fn test_sqlite_set_get_remove() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("nexus_user").unwrap(), None);

        db.set("nexus_user", "{}").unwrap();
        db.set("nexus_user", "{\"a\":1}").unwrap();
        assert_eq!(db.get("nexus_user").unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(db.keys().unwrap(), vec!["nexus_user".to_string()]);

        assert!(db.remove("nexus_user").unwrap());
        assert!(!db.remove("nexus_user").unwrap());
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kv.db");

        {
            let db = Database::open_at(&path).unwrap();
            save_json(&db, "nexus_applications", &vec!["x", "y"]).unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        let back: Option<Vec<String>> = load_json(&db, "nexus_applications").unwrap();
        assert_eq!(back, Some(vec!["x".to_string(), "y".to_string()]));
    }
}
