use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{optional_str, required_date, required_enum, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::Priority;
use crate::ops;
use serde_json::json;

fn handle_tasks_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let text = match required_str(&req.params, "text") {
        Ok(t) => t,
        Err(e) => return e.response(&req.id),
    };
    let priority: Priority = match required_enum(&req.params, "priority", "high|medium|low") {
        Ok(p) => p,
        Err(e) => return e.response(&req.id),
    };
    let due_date = match optional_str(&req.params, "dueDate") {
        Some(_) => match required_date(&req.params, "dueDate") {
            Ok(d) => Some(d),
            Err(e) => return e.response(&req.id),
        },
        None => None,
    };

    match ops::add_task(&session.data.tasks, &text, priority, due_date) {
        Some((next, task_id)) => {
            session.data.tasks = next;
            session.persist_tasks();
            ok(&req.id, json!({ "changed": true, "taskId": task_id }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

fn handle_tasks_toggle(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let task_id = match required_str(&req.params, "taskId") {
        Ok(t) => t,
        Err(e) => return e.response(&req.id),
    };

    match ops::toggle_task(&session.data.tasks, &task_id) {
        Some(next) => {
            session.data.tasks = next;
            session.persist_tasks();
            ok(&req.id, json!({ "changed": true }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

fn handle_tasks_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let task_id = match required_str(&req.params, "taskId") {
        Ok(t) => t,
        Err(e) => return e.response(&req.id),
    };

    match ops::delete_task(&session.data.tasks, &task_id) {
        Some(next) => {
            session.data.tasks = next;
            session.persist_tasks();
            ok(&req.id, json!({ "changed": true }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

/// Returns tasks in display order (a derived view; the stored slice keeps
/// insertion order, most recent first).
fn handle_tasks_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match serde_json::to_value(ops::task_display_order(&session.data.tasks)) {
        Ok(tasks) => ok(&req.id, json!({ "tasks": tasks })),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "tasks.add" => Some(handle_tasks_add(state, req)),
        "tasks.toggle" => Some(handle_tasks_toggle(state, req)),
        "tasks.delete" => Some(handle_tasks_delete(state, req)),
        "tasks.list" => Some(handle_tasks_list(state, req)),
        _ => None,
    }
}
