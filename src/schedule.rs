//! Weekly timetable grid. Slots are fixed at initialization; master mode
//! changes which class occupies a slot, normal mode edits that slot's
//! lesson content for one week.

use crate::model::{LessonPlan, ScheduleSlot, MAX_WEEK, MIN_WEEK};
use uuid::Uuid;

/// Week navigation is bounded: out-of-range requests clamp, they never fail.
pub fn clamp_week(requested: i64) -> u32 {
    requested.clamp(MIN_WEEK as i64, MAX_WEEK as i64) as u32
}

pub fn find_slot<'a>(
    schedule: &'a [ScheduleSlot],
    day: crate::model::DayOfWeek,
    period: u32,
) -> Option<&'a ScheduleSlot> {
    schedule.iter().find(|s| s.day == day && s.period == period)
}

/// Master-mode save: writes only the class-name field of the slot. Existing
/// week plans are untouched, and an empty name returns the slot to the
/// unconfigured state.
pub fn assign_class(
    schedule: &[ScheduleSlot],
    day: crate::model::DayOfWeek,
    period: u32,
    class_name: &str,
) -> Option<Vec<ScheduleSlot>> {
    let mut next = schedule.to_vec();
    let slot = next.iter_mut().find(|s| s.day == day && s.period == period)?;
    slot.class_name = class_name.trim().to_string();
    Some(next)
}

/// Everything the plan editor submits on save. `assistant_filled` marks a
/// save that immediately followed an Assistant fill of the form.
#[derive(Debug, Clone)]
pub struct PlanDraft {
    pub subject: String,
    pub topic: String,
    pub objectives: Vec<String>,
    pub materials: String,
    pub content: String,
    pub homework: String,
    pub strategy: String,
    pub assistant_filled: bool,
}

/// Normal-mode save: writes a full LessonPlan for (slot, week), creating it
/// on first save. Overwrites keep the existing plan id; the generated flag
/// reflects only whether this save came from an Assistant fill.
pub fn save_week_plan(
    schedule: &[ScheduleSlot],
    day: crate::model::DayOfWeek,
    period: u32,
    week: u32,
    draft: PlanDraft,
) -> Option<Vec<ScheduleSlot>> {
    let week = clamp_week(week as i64);
    let mut next = schedule.to_vec();
    let slot = next.iter_mut().find(|s| s.day == day && s.period == period)?;
    let id = slot
        .week_plans
        .get(&week)
        .map(|p| p.id.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    slot.week_plans.insert(
        week,
        LessonPlan {
            id,
            subject: draft.subject,
            topic: draft.topic,
            objectives: draft.objectives,
            materials: draft.materials,
            content: draft.content,
            homework: draft.homework,
            strategy: draft.strategy,
            is_generated: draft.assistant_filled,
        },
    );
    Some(next)
}

pub fn week_plan(slot: &ScheduleSlot, week: u32) -> Option<&LessonPlan> {
    slot.week_plans.get(&clamp_week(week as i64))
}
