use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_date;
use crate::ipc::types::{AppState, Request};
use crate::model::TOTAL_SLOTS;
use crate::reports;
use serde_json::json;

fn handle_reports_overview(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let data = &session.data;
    ok(
        &req.id,
        json!({
            "classCount": data.classes.len(),
            "totalStudents": reports::total_students(&data.classes),
            "configuredSlots": reports::configured_slots(&data.schedule),
            "totalSlots": TOTAL_SLOTS,
            "scheduleFillPercent": reports::schedule_fill_percent(&data.schedule),
        }),
    )
}

fn counts_json(counts: &reports::AttendanceCounts) -> serde_json::Value {
    json!({
        "present": counts.present,
        "absent": counts.absent,
        "late": counts.late,
        "excused": counts.excused,
        "unmarked": counts.unmarked,
    })
}

/// Per-class attendance aggregates for one date, recomputed from the
/// current Classes snapshot.
fn handle_reports_attendance(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let date = match required_date(&req.params, "date") {
        Ok(d) => d,
        Err(e) => return e.response(&req.id),
    };

    let per_class = reports::attendance_by_class(&session.data.classes, &date);
    let totals = reports::attendance_totals(&per_class);
    let classes: Vec<serde_json::Value> = per_class
        .iter()
        .map(|c| {
            json!({
                "classId": c.class_id,
                "className": c.class_name,
                "studentCount": c.student_count,
                "counts": counts_json(&c.counts),
            })
        })
        .collect();

    ok(
        &req.id,
        json!({
            "date": date,
            "classes": classes,
            "totals": counts_json(&totals),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.overview" => Some(handle_reports_overview(state, req)),
        "reports.attendance" => Some(handle_reports_attendance(state, req)),
        _ => None,
    }
}
