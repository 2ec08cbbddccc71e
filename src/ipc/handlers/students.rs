use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::Student;
use crate::ops;
use serde_json::json;

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (class_id, name) = match (
        required_str(&req.params, "classId"),
        required_str(&req.params, "name"),
    ) {
        (Ok(c), Ok(n)) => (c, n),
        (Err(e), _) | (_, Err(e)) => return e.response(&req.id),
    };

    match ops::add_student(&session.data.classes, &class_id, &name) {
        Some((next, student_id)) => {
            session.data.classes = next;
            session.persist_classes();
            ok(&req.id, json!({ "changed": true, "studentId": student_id }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

/// Bulk import: each trimmed, non-empty line of `text` becomes one student,
/// in input order.
fn handle_students_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (class_id, text) = match (
        required_str(&req.params, "classId"),
        required_str(&req.params, "text"),
    ) {
        (Ok(c), Ok(t)) => (c, t),
        (Err(e), _) | (_, Err(e)) => return e.response(&req.id),
    };

    match ops::import_students(&session.data.classes, &class_id, &text) {
        Some((next, added)) => {
            session.data.classes = next;
            session.persist_classes();
            ok(&req.id, json!({ "changed": true, "added": added }))
        }
        None => ok(&req.id, json!({ "changed": false, "added": 0 })),
    }
}

/// Wholesale replacement of one student by id within the class.
fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let class_id = match required_str(&req.params, "classId") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    let updated: Student = match req
        .params
        .get("student")
        .ok_or_else(|| HandlerErr::bad_params("missing student"))
        .and_then(|v| {
            serde_json::from_value(v.clone())
                .map_err(|e| HandlerErr::bad_params(format!("malformed student: {}", e)))
        }) {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };

    match ops::update_student(&session.data.classes, &class_id, updated) {
        Some(next) => {
            session.data.classes = next;
            session.persist_classes();
            ok(&req.id, json!({ "changed": true }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (class_id, student_id) = match (
        required_str(&req.params, "classId"),
        required_str(&req.params, "studentId"),
    ) {
        (Ok(c), Ok(s)) => (c, s),
        (Err(e), _) | (_, Err(e)) => return e.response(&req.id),
    };

    match ops::delete_student(&session.data.classes, &class_id, &student_id) {
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
        "students.add" => Some(handle_students_add(state, req)),
        "students.import" => Some(handle_students_import(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
