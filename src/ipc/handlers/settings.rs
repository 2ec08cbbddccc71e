use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_enum, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::GradeCategory;
use crate::ops;
use serde_json::json;

fn handle_settings_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match serde_json::to_value(&session.data.settings) {
        Ok(settings) => ok(
            &req.id,
            json!({ "settings": settings, "darkMode": session.data.dark_mode }),
        ),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

/// Shallow merge of a partial settings document. `maxGrades` in a patch
/// replaces the whole mapping; use settings.setMaxGrade to change one
/// category without clobbering the others.
fn handle_settings_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(patch) = req.params.get("patch") else {
        return HandlerErr::bad_params("missing patch").response(&req.id);
    };

    let merged = match ops::merge_settings(&session.data.settings, patch) {
        Ok(s) => s,
        Err(e) => return err(&req.id, "bad_params", format!("invalid patch: {e}"), None),
    };
    session.data.settings = merged;
    session.persist_settings();
    match serde_json::to_value(&session.data.settings) {
        Ok(settings) => ok(&req.id, json!({ "changed": true, "settings": settings })),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

/// Keyed setter for one max-grade category. Raising or lowering a maximum
/// never rewrites stored scores; they reclamp on their next adjustment.
fn handle_settings_set_max_grade(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let category: GradeCategory =
        match required_enum(&req.params, "category", "participation|homework|activity|quiz") {
            Ok(c) => c,
            Err(e) => return e.response(&req.id),
        };
    let Some(value) = req.params.get("value").and_then(|v| v.as_u64()) else {
        return HandlerErr::bad_params("value must be a non-negative integer").response(&req.id);
    };
    let Ok(value) = u32::try_from(value) else {
        return HandlerErr::bad_params("value out of range").response(&req.id);
    };

    session.data.settings.max_grades.set(category, value);
    session.persist_settings();
    match serde_json::to_value(session.data.settings.max_grades) {
        Ok(max_grades) => ok(&req.id, json!({ "changed": true, "maxGrades": max_grades })),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

fn handle_settings_set_dark_mode(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(enabled) = req.params.get("enabled").and_then(|v| v.as_bool()) else {
        return HandlerErr::bad_params("missing enabled").response(&req.id);
    };

    session.data.dark_mode = enabled;
    session.persist_dark_mode();
    ok(&req.id, json!({ "changed": true, "darkMode": enabled }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "settings.get" => Some(handle_settings_get(state, req)),
        "settings.update" => Some(handle_settings_update(state, req)),
        "settings.setMaxGrade" => Some(handle_settings_set_max_grade(state, req)),
        "settings.setDarkMode" => Some(handle_settings_set_dark_mode(state, req)),
        _ => None,
    }
}
