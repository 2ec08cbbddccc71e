use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request, Session};
use crate::store::{AppData, Store};
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

/// Opens (or creates) the workspace store and loads all five slices into
/// memory, substituting documented defaults for anything absent. The legacy
/// settings migration runs as part of the load.
fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    let store = match Store::open(&path) {
        Ok(s) => s,
        Err(e) => return err(&req.id, "store_open_failed", format!("{e:#}"), None),
    };
    let data = match AppData::load(&store) {
        Ok(d) => d,
        Err(e) => return err(&req.id, "store_load_failed", format!("{e:#}"), None),
    };

    state.workspace = Some(path.clone());
    state.session = Some(Session { store, data });
    ok(&req.id, json!({ "workspacePath": path.to_string_lossy() }))
}

fn handle_state_snapshot(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match snapshot_json(&session.data) {
        Ok(v) => ok(&req.id, v),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

fn snapshot_json(data: &AppData) -> anyhow::Result<serde_json::Value> {
    Ok(json!({
        "darkMode": data.dark_mode,
        "settings": serde_json::to_value(&data.settings)?,
        "schedule": serde_json::to_value(&data.schedule)?,
        "classes": serde_json::to_value(&data.classes)?,
        "tasks": serde_json::to_value(&data.tasks)?,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "state.snapshot" => Some(handle_state_snapshot(state, req)),
        _ => None,
    }
}
