//! Read-side projections over the current Classes/Schedule snapshot.
//! Recomputed on every read; nothing here owns state or caches.

use crate::model::{AttendanceStatus, ClassGroup, ScheduleSlot, TOTAL_SLOTS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendanceCounts {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub excused: usize,
    /// Students with no entry for the date.
    pub unmarked: usize,
}

impl AttendanceCounts {
    fn record(&mut self, status: Option<AttendanceStatus>) {
        match status {
            Some(AttendanceStatus::Present) => self.present += 1,
            Some(AttendanceStatus::Absent) => self.absent += 1,
            Some(AttendanceStatus::Late) => self.late += 1,
            Some(AttendanceStatus::Excused) => self.excused += 1,
            None => self.unmarked += 1,
        }
    }

    fn add(&mut self, other: &AttendanceCounts) {
        self.present += other.present;
        self.absent += other.absent;
        self.late += other.late;
        self.excused += other.excused;
        self.unmarked += other.unmarked;
    }
}

#[derive(Debug, Clone)]
pub struct ClassAttendance {
    pub class_id: String,
    pub class_name: String,
    pub student_count: usize,
    pub counts: AttendanceCounts,
}

pub fn total_students(classes: &[ClassGroup]) -> usize {
    classes.iter().map(|c| c.students.len()).sum()
}

pub fn configured_slots(schedule: &[ScheduleSlot]) -> usize {
    schedule.iter().filter(|s| s.is_configured()).count()
}

/// Configured slots over the fixed 35-slot grid, as a percentage.
pub fn schedule_fill_percent(schedule: &[ScheduleSlot]) -> f64 {
    if TOTAL_SLOTS == 0 {
        return 0.0;
    }
    configured_slots(schedule) as f64 * 100.0 / TOTAL_SLOTS as f64
}

/// Per-class attendance for one date, in roster order.
pub fn attendance_by_class(classes: &[ClassGroup], date: &str) -> Vec<ClassAttendance> {
    classes
        .iter()
        .map(|class| {
            let mut counts = AttendanceCounts::default();
            for student in &class.students {
                counts.record(student.attendance.get(date).copied());
            }
            ClassAttendance {
                class_id: class.id.clone(),
                class_name: class.name.clone(),
                student_count: class.students.len(),
                counts,
            }
        })
        .collect()
}

pub fn attendance_totals(per_class: &[ClassAttendance]) -> AttendanceCounts {
    let mut totals = AttendanceCounts::default();
    for class in per_class {
        totals.add(&class.counts);
    }
    totals
}
