use crate::assistant;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

/// Validates a suggestion payload the host received from the external
/// service and returns the filled editor form. Nothing is written here: the
/// editor saves the plan itself (with `assistantFilled`) once the user
/// confirms. A bad payload is a transient notice, never a crash, and the
/// user's subject/topic are always kept.
fn handle_assistant_apply_suggestion(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(_session) = state.session.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let (subject, topic) = match (
        required_str(&req.params, "subject"),
        required_str(&req.params, "topic"),
    ) {
        (Ok(s), Ok(t)) => (s, t),
        (Err(e), _) | (_, Err(e)) => return e.response(&req.id),
    };
    let Some(response) = req.params.get("response") else {
        return HandlerErr::bad_params("missing response").response(&req.id);
    };

    let suggestion = match assistant::parse_suggestion(response) {
        Ok(s) => s,
        Err(e) => return err(&req.id, "assistant_failed", format!("{e:#}"), None),
    };
    let draft = assistant::fill_draft(&subject, &topic, suggestion);

    ok(
        &req.id,
        json!({
            "plan": {
                "subject": draft.subject,
                "topic": draft.topic,
                "objectives": draft.objectives,
                "materials": draft.materials,
                "content": draft.content,
                "homework": draft.homework,
                "strategy": draft.strategy,
            },
            "assistantFilled": true,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "assistant.applySuggestion" => Some(handle_assistant_apply_suggestion(state, req)),
        _ => None,
    }
}
