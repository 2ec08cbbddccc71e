use crate::model::{initial_schedule, seed_classes, ClassGroup, ScheduleSlot, Settings, Task};
use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

pub const DARK_MODE_KEY: &str = "muallim-dark-mode";
pub const SETTINGS_KEY: &str = "muallim-settings";
pub const SCHEDULE_KEY: &str = "muallim-schedule";
pub const CLASSES_KEY: &str = "muallim-classes";
pub const TASKS_KEY: &str = "muallim-tasks";

/// Flat key-to-JSON store backing the five persisted slices. One row per
/// key; values are JSON text. There is deliberately no cross-key transaction:
/// each slice is written independently after the mutation that touched it.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(workspace: &Path) -> anyhow::Result<Store> {
        std::fs::create_dir_all(workspace).with_context(|| {
            format!("failed to create workspace {}", workspace.to_string_lossy())
        })?;
        let conn = Connection::open(db_path(workspace))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store(
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Store { conn })
    }

    /// Raw read of one key. A missing row and a corrupt value both come back
    /// as `None`; the caller substitutes the documented default either way.
    pub fn load(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let text: Option<String> = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?", [key], |r| {
                r.get(0)
            })
            .optional()?;
        let Some(text) = text else {
            return Ok(None);
        };
        match serde_json::from_str(&text) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                eprintln!("muallimd: discarding corrupt value for {key}: {e}");
                Ok(None)
            }
        }
    }

    pub fn save(&self, key: &str, value: &Value) -> anyhow::Result<()> {
        let text = serde_json::to_string(value).context("failed to serialize value")?;
        self.conn.execute(
            "INSERT INTO kv_store(key, value) VALUES(?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            (key, &text),
        )?;
        Ok(())
    }

    fn load_slice<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        let Some(value) = self.load(key)? else {
            return Ok(None);
        };
        match serde_json::from_value(value) {
            Ok(v) => Ok(Some(v)),
            Err(e) => {
                eprintln!("muallimd: stored {key} has an unreadable shape: {e}");
                Ok(None)
            }
        }
    }
}

pub fn db_path(workspace: &Path) -> std::path::PathBuf {
    workspace.join("muallim.sqlite3")
}

/// Best-effort persistence of one slice. A failed write degrades only
/// future-session durability; the in-memory snapshot stays authoritative,
/// so the error is logged and swallowed.
pub fn persist<T: Serialize>(store: &Store, key: &str, slice: &T) {
    let result = serde_json::to_value(slice)
        .context("failed to serialize slice")
        .and_then(|v| store.save(key, &v));
    if let Err(e) = result {
        eprintln!("muallimd: failed to persist {key}: {e:#}");
    }
}

pub fn persist_dark_mode(store: &Store, dark_mode: bool) {
    // Stored boolean-as-string, matching the legacy documents.
    let value = json!(if dark_mode { "true" } else { "false" });
    if let Err(e) = store.save(DARK_MODE_KEY, &value) {
        eprintln!("muallimd: failed to persist {DARK_MODE_KEY}: {e:#}");
    }
}

/// Expand a legacy scalar `maxGrade` into the four-category `maxGrades`
/// mapping and drop the legacy field. Pure and idempotent: a document
/// without `maxGrade` passes through untouched.
pub fn migrate_settings(mut value: Value) -> (Value, bool) {
    let Some(obj) = value.as_object_mut() else {
        return (value, false);
    };
    let Some(legacy) = obj.remove("maxGrade") else {
        return (value, false);
    };
    if !obj.contains_key("maxGrades") {
        let uniform = legacy.as_u64().unwrap_or(10);
        obj.insert(
            "maxGrades".to_string(),
            json!({
                "participation": uniform,
                "homework": uniform,
                "activity": uniform,
                "quiz": uniform,
            }),
        );
    }
    (value, true)
}

/// The five slices held in memory for the open workspace. The in-memory
/// snapshot is authoritative for the session; `persist` mirrors it out.
pub struct AppData {
    pub dark_mode: bool,
    pub settings: Settings,
    pub schedule: Vec<ScheduleSlot>,
    pub classes: Vec<ClassGroup>,
    pub tasks: Vec<Task>,
}

impl AppData {
    /// Load every slice, substituting the documented default where a key is
    /// absent or unreadable. The settings migration runs here; a migrated
    /// document is written straight back so it is only ever migrated once.
    pub fn load(store: &Store) -> anyhow::Result<AppData> {
        let dark_mode = store
            .load(DARK_MODE_KEY)?
            .and_then(|v| v.as_str().map(|s| s == "true"))
            .unwrap_or(false);

        let settings = match store.load(SETTINGS_KEY)? {
            Some(raw) => {
                let (migrated, changed) = migrate_settings(raw);
                if changed {
                    if let Err(e) = store.save(SETTINGS_KEY, &migrated) {
                        eprintln!("muallimd: failed to write back migrated settings: {e:#}");
                    }
                }
                match serde_json::from_value(migrated) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("muallimd: stored settings unreadable, using defaults: {e}");
                        Settings::default()
                    }
                }
            }
            None => Settings::default(),
        };

        let schedule = store
            .load_slice::<Vec<ScheduleSlot>>(SCHEDULE_KEY)?
            .unwrap_or_else(initial_schedule);
        let classes = store
            .load_slice::<Vec<ClassGroup>>(CLASSES_KEY)?
            .unwrap_or_else(seed_classes);
        let tasks = store
            .load_slice::<Vec<Task>>(TASKS_KEY)?
            .unwrap_or_default();

        Ok(AppData {
            dark_mode,
            settings,
            schedule,
            classes,
            tasks,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_max_grade_expands_to_all_four_categories() {
        let stored = json!({
            "themeColor": "blue",
            "teacherName": "t",
            "schoolName": "s",
            "voiceEnabled": false,
            "maxGrade": 8,
            "isMasterScheduleLocked": false
        });
        let (migrated, changed) = migrate_settings(stored);
        assert!(changed);
        assert!(migrated.get("maxGrade").is_none());
        assert_eq!(
            migrated.get("maxGrades"),
            Some(&json!({
                "participation": 8,
                "homework": 8,
                "activity": 8,
                "quiz": 8
            }))
        );

        let settings: Settings = serde_json::from_value(migrated).expect("parse migrated");
        assert_eq!(settings.max_grades.quiz, 8);
    }

    #[test]
    fn migration_is_a_no_op_on_already_migrated_documents() {
        let stored = json!({
            "themeColor": "emerald",
            "maxGrades": { "participation": 7, "homework": 7, "activity": 7, "quiz": 7 }
        });
        let (migrated, changed) = migrate_settings(stored.clone());
        assert!(!changed);
        assert_eq!(migrated, stored);
    }

    #[test]
    fn legacy_field_is_dropped_even_when_new_mapping_already_exists() {
        let stored = json!({
            "maxGrade": 5,
            "maxGrades": { "participation": 9, "homework": 9, "activity": 9, "quiz": 9 }
        });
        let (migrated, changed) = migrate_settings(stored);
        assert!(changed);
        assert!(migrated.get("maxGrade").is_none());
        // An existing mapping wins over the stale scalar.
        assert_eq!(
            migrated
                .get("maxGrades")
                .and_then(|m| m.get("quiz"))
                .and_then(|v| v.as_u64()),
            Some(9)
        );
    }

    #[test]
    fn store_round_trips_a_raw_value() {
        let dir = std::env::temp_dir().join(format!(
            "muallim-store-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("clock")
                .as_nanos()
        ));
        let store = Store::open(&dir).expect("open store");
        assert_eq!(store.load(TASKS_KEY).expect("load"), None);
        store
            .save(TASKS_KEY, &json!([{ "id": "t1" }]))
            .expect("save");
        assert_eq!(
            store.load(TASKS_KEY).expect("reload"),
            Some(json!([{ "id": "t1" }]))
        );
        let _ = std::fs::remove_dir_all(dir);
    }
}
