use crate::backup;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request, Session};
use crate::store::{AppData, Store};
use serde_json::json;
use std::path::{Path, PathBuf};

fn reopen_session(workspace: &Path) -> anyhow::Result<Session> {
    let store = Store::open(workspace)?;
    let data = AppData::load(&store)?;
    Ok(Session { store, data })
}

fn handle_backup_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(workspace) = state.workspace.clone() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let out_path = match required_str(&req.params, "outPath") {
        Ok(p) => PathBuf::from(p),
        Err(e) => return e.response(&req.id),
    };

    match backup::export_workspace_bundle(&workspace, &out_path) {
        Ok(summary) => ok(
            &req.id,
            json!({
                "bundleFormat": summary.bundle_format,
                "entryCount": summary.entry_count,
                "dbSha256": summary.db_sha256,
                "outPath": out_path.to_string_lossy(),
            }),
        ),
        Err(e) => err(&req.id, "export_failed", format!("{e:#}"), None),
    }
}

/// Replaces the current workspace store with the bundle's payload, then
/// reloads the five slices from it.
fn handle_backup_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(workspace) = state.workspace.clone() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let in_path = match required_str(&req.params, "inPath") {
        Ok(p) => PathBuf::from(p),
        Err(e) => return e.response(&req.id),
    };

    // The open connection must be released before the store file is swapped.
    state.session = None;

    let import = backup::import_workspace_bundle(&in_path, &workspace);
    let reopened = reopen_session(&workspace);
    match (import, reopened) {
        (Ok(summary), Ok(session)) => {
            state.session = Some(session);
            ok(
                &req.id,
                json!({ "bundleFormatDetected": summary.bundle_format_detected }),
            )
        }
        (Ok(_), Err(e)) => err(&req.id, "store_open_failed", format!("{e:#}"), None),
        (Err(e), reopen) => {
            // Import refused: keep the previous store usable if it survives.
            if let Ok(session) = reopen {
                state.session = Some(session);
            }
            err(&req.id, "import_failed", format!("{e:#}"), None)
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.export" => Some(handle_backup_export(state, req)),
        "backup.import" => Some(handle_backup_import(state, req)),
        _ => None,
    }
}
