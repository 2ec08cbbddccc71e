use crate::grading;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_date, required_enum, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::AttendanceStatus;
use serde_json::json;

fn handle_attendance_set(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    let date = match required_date(&req.params, "date") {
        Ok(d) => d,
        Err(e) => return e.response(&req.id),
    };
    let status: AttendanceStatus =
        match required_enum(&req.params, "status", "present|absent|late|excused") {
            Ok(s) => s,
            Err(e) => return e.response(&req.id),
        };

    match grading::set_attendance(&session.data.classes, &class_id, &student_id, &date, status) {
        Some(next) => {
            session.data.classes = next;
            session.persist_classes();
            ok(&req.id, json!({ "changed": true }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

/// Applies `present` to every student in the class for the date, one
/// independent write (and persist) per student. Best-effort by design: an
/// interruption mid-loop leaves the students marked so far, which is the
/// documented semantics, not a defect.
fn handle_attendance_mark_all_present(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let class_id = match required_str(&req.params, "classId") {
        Ok(c) => c,
        Err(e) => return e.response(&req.id),
    };
    let date = match required_date(&req.params, "date") {
        Ok(d) => d,
        Err(e) => return e.response(&req.id),
    };

    let Some(student_ids) = grading::class_student_ids(&session.data.classes, &class_id) else {
        return ok(&req.id, json!({ "changed": false, "marked": 0 }));
    };

    let mut marked = 0usize;
    for student_id in student_ids {
        if let Some(next) = grading::set_attendance(
            &session.data.classes,
            &class_id,
            &student_id,
            &date,
            AttendanceStatus::Present,
        ) {
            session.data.classes = next;
            session.persist_classes();
            marked += 1;
        }
    }

    ok(&req.id, json!({ "changed": marked > 0, "marked": marked }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.set" => Some(handle_attendance_set(state, req)),
        "attendance.markAllPresent" => Some(handle_attendance_mark_all_present(state, req)),
        _ => None,
    }
}
