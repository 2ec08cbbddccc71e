use std::path::PathBuf;

use crate::store::{self, AppData, Store};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// An open workspace: the durable store plus the in-memory snapshot of the
/// five slices. The snapshot is authoritative; persistence mirrors it.
pub struct Session {
    pub store: Store,
    pub data: AppData,
}

impl Session {
    // Persist-on-change observers. One slice per write, fire-and-forget.
    pub fn persist_settings(&self) {
        store::persist(&self.store, store::SETTINGS_KEY, &self.data.settings);
    }

    pub fn persist_schedule(&self) {
        store::persist(&self.store, store::SCHEDULE_KEY, &self.data.schedule);
    }

    pub fn persist_classes(&self) {
        store::persist(&self.store, store::CLASSES_KEY, &self.data.classes);
    }

    pub fn persist_tasks(&self) {
        store::persist(&self.store, store::TASKS_KEY, &self.data.tasks);
    }

    pub fn persist_dark_mode(&self) {
        store::persist_dark_mode(&self.store, self.data.dark_mode);
    }
}

pub struct AppState {
    pub workspace: Option<PathBuf>,
    pub session: Option<Session>,
}
