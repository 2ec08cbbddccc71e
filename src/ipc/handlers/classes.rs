use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::ops;
use serde_json::json;

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return ok(&req.id, json!({ "classes": [] }));
    };
    let classes: Vec<serde_json::Value> = session
        .data
        .classes
        .iter()
        .map(|c| {
            json!({
                "id": c.id,
                "name": c.name,
                "studentCount": c.students.len()
            })
        })
        .collect();
    ok(&req.id, json!({ "classes": classes }))
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let name = match required_str(&req.params, "name") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    // An empty or whitespace-only name is accepted and ignored.
    match ops::add_class(&session.data.classes, &name) {
        Some((next, class_id)) => {
            session.data.classes = next;
            session.persist_classes();
            ok(
                &req.id,
                json!({ "changed": true, "classId": class_id, "name": name.trim() }),
            )
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

fn handle_classes_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let class_id = match required_str(&req.params, "classId") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    // Deleting removes the class and every student it owns; an unknown id
    // is a no-op.
    match ops::delete_class(&session.data.classes, &class_id) {
        Some(next) => {
            session.data.classes = next;
            session.persist_classes();
            ok(&req.id, json!({ "changed": true }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.create" => Some(handle_classes_create(state, req)),
        "classes.delete" => Some(handle_classes_delete(state, req)),
        _ => None,
    }
}
