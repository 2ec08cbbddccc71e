//! Per-student daily attendance and the four bounded grade categories.

use crate::model::{AttendanceStatus, ClassGroup, GradeCategory, MaxGrades};

/// `clamp(current + delta, 0, max)`. Deltas are arbitrary integers; a score
/// already past a lowered maximum is pulled back into range by the next
/// adjustment rather than rewritten when the setting changes.
pub fn clamp_score(current: i64, delta: i64, max: u32) -> i64 {
    current.saturating_add(delta).clamp(0, max as i64)
}

pub fn adjust_score(
    classes: &[ClassGroup],
    class_id: &str,
    student_id: &str,
    category: GradeCategory,
    delta: i64,
    max_grades: &MaxGrades,
) -> Option<(Vec<ClassGroup>, i64)> {
    let mut next = classes.to_vec();
    let class = next.iter_mut().find(|c| c.id == class_id)?;
    let student = class.students.iter_mut().find(|s| s.id == student_id)?;
    let score = clamp_score(student.score(category), delta, max_grades.get(category));
    student.set_score(category, score);
    Some((next, score))
}

/// Latest write wins: at most one status per date key.
pub fn set_attendance(
    classes: &[ClassGroup],
    class_id: &str,
    student_id: &str,
    date: &str,
    status: AttendanceStatus,
) -> Option<Vec<ClassGroup>> {
    let mut next = classes.to_vec();
    let class = next.iter_mut().find(|c| c.id == class_id)?;
    let student = class.students.iter_mut().find(|s| s.id == student_id)?;
    student
        .attendance
        .insert(date.to_string(), status);
    Some(next)
}

/// Roster for the bulk `markAllPresent` loop. The loop itself lives with the
/// caller, one independent write (and persist) per student: an interrupted
/// run leaves a legitimately partial result.
pub fn class_student_ids(classes: &[ClassGroup], class_id: &str) -> Option<Vec<String>> {
    classes
        .iter()
        .find(|c| c.id == class_id)
        .map(|c| c.students.iter().map(|s| s.id.clone()).collect())
}
