use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{optional_bool, required_day, required_i64, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::schedule::{self, PlanDraft};
use serde::Deserialize;
use serde_json::json;

/// Editor-submitted plan fields. Everything defaults so a mostly-blank form
/// still saves a full LessonPlan.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlanParams {
    #[serde(default)]
    subject: String,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    objectives: Vec<String>,
    #[serde(default)]
    materials: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    homework: String,
    #[serde(default)]
    strategy: String,
}

fn parse_plan_params(params: &serde_json::Value) -> Result<PlanParams, HandlerErr> {
    let value = params
        .get("plan")
        .ok_or_else(|| HandlerErr::bad_params("missing plan"))?;
    serde_json::from_value(value.clone())
        .map_err(|e| HandlerErr::bad_params(format!("malformed plan: {}", e)))
}

fn handle_schedule_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    match serde_json::to_value(&session.data.schedule) {
        Ok(slots) => ok(&req.id, json!({ "slots": slots })),
        Err(e) => err(&req.id, "serialize_failed", e.to_string(), None),
    }
}

/// Editor pre-population for one (slot, week): the current week's plan when
/// present, otherwise `null` for a blank form.
fn handle_schedule_open_slot(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (day, period, week) = match (
        required_day(&req.params),
        required_i64(&req.params, "period"),
        required_i64(&req.params, "week"),
    ) {
        (Ok(d), Ok(p), Ok(w)) => (d, p, w),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return e.response(&req.id),
    };

    let week = schedule::clamp_week(week);
    let Some(slot) = schedule::find_slot(&session.data.schedule, day, period as u32) else {
        return err(&req.id, "bad_params", "unknown slot", None);
    };
    let plan = match schedule::week_plan(slot, week) {
        Some(p) => match serde_json::to_value(p) {
            Ok(v) => v,
            Err(e) => return err(&req.id, "serialize_failed", e.to_string(), None),
        },
        None => serde_json::Value::Null,
    };
    ok(
        &req.id,
        json!({
            "week": week,
            "className": slot.class_name,
            "configured": slot.is_configured(),
            "plan": plan,
        }),
    )
}

/// Master-mode save: writes only which class occupies the slot. Refused
/// outright while the master schedule is locked.
fn handle_schedule_assign_class(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    if session.data.settings.is_master_schedule_locked {
        return err(
            &req.id,
            "schedule_locked",
            "the master schedule is locked in settings",
            None,
        );
    }
    let (day, period) = match (required_day(&req.params), required_i64(&req.params, "period")) {
        (Ok(d), Ok(p)) => (d, p),
        (Err(e), _) | (_, Err(e)) => return e.response(&req.id),
    };
    let class_name = req
        .params
        .get("className")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    match schedule::assign_class(&session.data.schedule, day, period as u32, class_name) {
        Some(next) => {
            session.data.schedule = next;
            session.persist_schedule();
            ok(&req.id, json!({ "changed": true }))
        }
        None => err(&req.id, "bad_params", "unknown slot", None),
    }
}

/// Normal-mode save: a full LessonPlan for (slot, week). `assistantFilled`
/// is set by the caller only when the form was just filled by the Assistant.
fn handle_schedule_save_week_plan(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_mut() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (day, period, week) = match (
        required_day(&req.params),
        required_i64(&req.params, "period"),
        required_i64(&req.params, "week"),
    ) {
        (Ok(d), Ok(p), Ok(w)) => (d, p, w),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => return e.response(&req.id),
    };
    let plan = match parse_plan_params(&req.params) {
        Ok(p) => p,
        Err(e) => return e.response(&req.id),
    };
    let week = schedule::clamp_week(week);
    let draft = PlanDraft {
        subject: plan.subject,
        topic: plan.topic,
        objectives: plan.objectives,
        materials: plan.materials,
        content: plan.content,
        homework: plan.homework,
        strategy: plan.strategy,
        assistant_filled: optional_bool(&req.params, "assistantFilled"),
    };

    match schedule::save_week_plan(&session.data.schedule, day, period as u32, week, draft) {
        Some(next) => {
            session.data.schedule = next;
            session.persist_schedule();
            ok(&req.id, json!({ "changed": true, "week": week }))
        }
        None => err(&req.id, "bad_params", "unknown slot", None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "schedule.list" => Some(handle_schedule_list(state, req)),
        "schedule.openSlot" => Some(handle_schedule_open_slot(state, req)),
        "schedule.assignClass" => Some(handle_schedule_assign_class(state, req)),
        "schedule.saveWeekPlan" => Some(handle_schedule_save_week_plan(state, req)),
        _ => None,
    }
}
