//! Pure update operations over the persisted slices. Every operation takes
//! the current snapshot plus arguments and returns a fresh snapshot, or
//! `None` when the operation is a no-op (rejected input or unknown id).
//! Callers persist the returned slice; a `None` writes nothing.

use crate::model::{ClassGroup, Priority, Settings, Student, Task};
use uuid::Uuid;

pub fn add_class(classes: &[ClassGroup], name: &str) -> Option<(Vec<ClassGroup>, String)> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let id = Uuid::new_v4().to_string();
    let mut next = classes.to_vec();
    next.push(ClassGroup {
        id: id.clone(),
        name: name.to_string(),
        students: Vec::new(),
    });
    Some((next, id))
}

/// Removes the class and, with it, every student it owns.
pub fn delete_class(classes: &[ClassGroup], class_id: &str) -> Option<Vec<ClassGroup>> {
    if !classes.iter().any(|c| c.id == class_id) {
        return None;
    }
    Some(classes.iter().filter(|c| c.id != class_id).cloned().collect())
}

pub fn add_student(
    classes: &[ClassGroup],
    class_id: &str,
    name: &str,
) -> Option<(Vec<ClassGroup>, String)> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let mut next = classes.to_vec();
    let class = next.iter_mut().find(|c| c.id == class_id)?;
    let student = Student::new(name);
    let id = student.id.clone();
    class.students.push(student);
    Some((next, id))
}

/// One trimmed, non-empty line per student, in input order. Handles both
/// `\n` and `\r\n` line endings.
pub fn split_import_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_string())
        .collect()
}

pub fn import_students(
    classes: &[ClassGroup],
    class_id: &str,
    raw: &str,
) -> Option<(Vec<ClassGroup>, usize)> {
    let names = split_import_lines(raw);
    if names.is_empty() {
        return None;
    }
    let mut next = classes.to_vec();
    let class = next.iter_mut().find(|c| c.id == class_id)?;
    let added = names.len();
    class
        .students
        .extend(names.into_iter().map(Student::new));
    Some((next, added))
}

pub fn delete_student(
    classes: &[ClassGroup],
    class_id: &str,
    student_id: &str,
) -> Option<Vec<ClassGroup>> {
    let mut next = classes.to_vec();
    let class = next.iter_mut().find(|c| c.id == class_id)?;
    let before = class.students.len();
    class.students.retain(|s| s.id != student_id);
    if class.students.len() == before {
        return None;
    }
    Some(next)
}

/// Replaces the student whose id matches `updated.id` within the class.
pub fn update_student(
    classes: &[ClassGroup],
    class_id: &str,
    updated: Student,
) -> Option<Vec<ClassGroup>> {
    let mut next = classes.to_vec();
    let class = next.iter_mut().find(|c| c.id == class_id)?;
    let slot = class.students.iter_mut().find(|s| s.id == updated.id)?;
    *slot = updated;
    Some(next)
}

pub fn add_task(
    tasks: &[Task],
    text: &str,
    priority: Priority,
    due_date: Option<String>,
) -> Option<(Vec<Task>, String)> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let id = Uuid::new_v4().to_string();
    // Stored order is insertion order, most recent first.
    let mut next = Vec::with_capacity(tasks.len() + 1);
    next.push(Task {
        id: id.clone(),
        text: text.to_string(),
        completed: false,
        priority,
        due_date,
    });
    next.extend(tasks.iter().cloned());
    Some((next, id))
}

pub fn toggle_task(tasks: &[Task], task_id: &str) -> Option<Vec<Task>> {
    let mut next = tasks.to_vec();
    let task = next.iter_mut().find(|t| t.id == task_id)?;
    task.completed = !task.completed;
    Some(next)
}

pub fn delete_task(tasks: &[Task], task_id: &str) -> Option<Vec<Task>> {
    if !tasks.iter().any(|t| t.id == task_id) {
        return None;
    }
    Some(tasks.iter().filter(|t| t.id != task_id).cloned().collect())
}

/// Derived display order, recomputed on every read: incomplete before
/// completed, higher priority first within each group, ties keep the
/// stored order (the sort is stable).
pub fn task_display_order(tasks: &[Task]) -> Vec<Task> {
    let mut view = tasks.to_vec();
    view.sort_by_key(|t| (t.completed, std::cmp::Reverse(t.priority.rank())));
    view
}

/// Shallow-merges a partial settings document over the current one.
/// Unknown keys are rejected by the final typed parse.
pub fn merge_settings(current: &Settings, patch: &serde_json::Value) -> anyhow::Result<Settings> {
    let patch_obj = patch
        .as_object()
        .ok_or_else(|| anyhow::anyhow!("settings patch must be an object"))?;
    let mut merged = serde_json::to_value(current)?;
    let obj = merged
        .as_object_mut()
        .expect("settings always serialize to an object");
    for (key, value) in patch_obj {
        obj.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(merged)?)
}
