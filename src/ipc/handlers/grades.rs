use crate::grading;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_enum, required_i64, required_str};
use crate::ipc::types::{AppState, Request};
use crate::model::GradeCategory;
use serde_json::json;

/// `clamp(current + delta, 0, maxGrades[category])`. The delta is an
/// arbitrary integer; a stored score above a since-lowered maximum is
/// clamped here, on its next adjustment.
fn handle_grades_adjust(state: &mut AppState, req: &Request) -> serde_json::Value {
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
    let category: GradeCategory =
        match required_enum(&req.params, "category", "participation|homework|activity|quiz") {
            Ok(c) => c,
            Err(e) => return e.response(&req.id),
        };
    let delta = match required_i64(&req.params, "delta") {
        Ok(d) => d,
        Err(e) => return e.response(&req.id),
    };

    match grading::adjust_score(
        &session.data.classes,
        &class_id,
        &student_id,
        category,
        delta,
        &session.data.settings.max_grades,
    ) {
        Some((next, score)) => {
            session.data.classes = next;
            session.persist_classes();
            ok(&req.id, json!({ "changed": true, "score": score }))
        }
        None => ok(&req.id, json!({ "changed": false })),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.adjust" => Some(handle_grades_adjust(state, req)),
        _ => None,
    }
}
