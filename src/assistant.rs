//! Boundary for the external lesson-plan suggestion service. The host owns
//! the actual request; this module validates whatever comes back and turns
//! it into an editor draft. A bad payload is reported, never applied.

use crate::schedule::PlanDraft;
use anyhow::Context;
use serde::Deserialize;

/// The structured suggestion contract: every field is required. A response
/// missing any of them is a service failure.
#[derive(Debug, Clone, Deserialize)]
pub struct LessonPlanSuggestion {
    pub objectives: Vec<String>,
    pub materials: String,
    pub content: String,
    pub strategy: String,
    pub homework: String,
}

pub fn parse_suggestion(payload: &serde_json::Value) -> anyhow::Result<LessonPlanSuggestion> {
    serde_json::from_value(payload.clone())
        .context("suggestion payload does not match the assistant contract")
}

/// Builds the filled editor form. The subject and topic the user typed are
/// kept as-is; the resulting save carries the generated flag.
pub fn fill_draft(subject: &str, topic: &str, suggestion: LessonPlanSuggestion) -> PlanDraft {
    PlanDraft {
        subject: subject.to_string(),
        topic: topic.to_string(),
        objectives: suggestion.objectives,
        materials: suggestion.materials,
        content: suggestion.content,
        homework: suggestion.homework,
        strategy: suggestion.strategy,
        assistant_filled: true,
    }
}
