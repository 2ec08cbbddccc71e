use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Teaching days, Sunday through Thursday. Serialized with the Arabic labels
/// the legacy store documents carry, so existing data round-trips unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(rename = "الأحد")]
    Sunday,
    #[serde(rename = "الاثنين")]
    Monday,
    #[serde(rename = "الثلاثاء")]
    Tuesday,
    #[serde(rename = "الأربعاء")]
    Wednesday,
    #[serde(rename = "الخميس")]
    Thursday,
}

pub const DAYS: [DayOfWeek; 5] = [
    DayOfWeek::Sunday,
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
];

pub const PERIODS_PER_DAY: u32 = 7;
pub const TOTAL_SLOTS: usize = DAYS.len() * PERIODS_PER_DAY as usize;

pub const MIN_WEEK: u32 = 1;
pub const MAX_WEEK: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
    Excused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Fixed display rank: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeCategory {
    Participation,
    Homework,
    Activity,
    Quiz,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    Emerald,
    Blue,
    Purple,
    Orange,
    Rose,
}

/// Per-category upper bounds for the four grade fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxGrades {
    pub participation: u32,
    pub homework: u32,
    pub activity: u32,
    pub quiz: u32,
}

impl Default for MaxGrades {
    fn default() -> Self {
        MaxGrades {
            participation: 10,
            homework: 10,
            activity: 10,
            quiz: 10,
        }
    }
}

impl MaxGrades {
    pub fn uniform(value: u32) -> Self {
        MaxGrades {
            participation: value,
            homework: value,
            activity: value,
            quiz: value,
        }
    }

    pub fn get(&self, category: GradeCategory) -> u32 {
        match category {
            GradeCategory::Participation => self.participation,
            GradeCategory::Homework => self.homework,
            GradeCategory::Activity => self.activity,
            GradeCategory::Quiz => self.quiz,
        }
    }

    pub fn set(&mut self, category: GradeCategory, value: u32) {
        match category {
            GradeCategory::Participation => self.participation = value,
            GradeCategory::Homework => self.homework = value,
            GradeCategory::Activity => self.activity = value,
            GradeCategory::Quiz => self.quiz = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme_color: ThemeColor,
    pub teacher_name: String,
    pub school_name: String,
    pub voice_enabled: bool,
    pub max_grades: MaxGrades,
    pub is_master_schedule_locked: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme_color: ThemeColor::Emerald,
            teacher_name: "المعلم الذكي".to_string(),
            school_name: "مدرستي المتميزة".to_string(),
            voice_enabled: true,
            max_grades: MaxGrades::default(),
            is_master_schedule_locked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: String,
    /// ISO date string -> latest recorded status. One entry per date.
    #[serde(default)]
    pub attendance: BTreeMap<String, AttendanceStatus>,
    #[serde(default)]
    pub participation_score: i64,
    #[serde(default)]
    pub homework_score: i64,
    #[serde(default)]
    pub activity_score: i64,
    #[serde(default)]
    pub quiz_score: i64,
}

impl Student {
    pub fn new(name: impl Into<String>) -> Self {
        Student {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            notes: String::new(),
            attendance: BTreeMap::new(),
            participation_score: 0,
            homework_score: 0,
            activity_score: 0,
            quiz_score: 0,
        }
    }

    pub fn score(&self, category: GradeCategory) -> i64 {
        match category {
            GradeCategory::Participation => self.participation_score,
            GradeCategory::Homework => self.homework_score,
            GradeCategory::Activity => self.activity_score,
            GradeCategory::Quiz => self.quiz_score,
        }
    }

    pub fn set_score(&mut self, category: GradeCategory, value: i64) {
        match category {
            GradeCategory::Participation => self.participation_score = value,
            GradeCategory::Homework => self.homework_score = value,
            GradeCategory::Activity => self.activity_score = value,
            GradeCategory::Quiz => self.quiz_score = value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub students: Vec<Student>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonPlan {
    pub id: String,
    pub subject: String,
    pub topic: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    #[serde(default)]
    pub materials: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub homework: String,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub is_generated: bool,
}

/// One (day, period) cell of the fixed weekly grid. The slot itself is
/// created once at initialization; only `class_name` and `week_plans` change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: String,
    pub day: DayOfWeek,
    pub period: u32,
    /// Empty string means the slot is unconfigured.
    #[serde(default)]
    pub class_name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub week_plans: BTreeMap<u32, LessonPlan>,
}

impl ScheduleSlot {
    pub fn is_configured(&self) -> bool {
        !self.class_name.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

/// The 35-slot grid: every (day, period) pair, all unconfigured.
pub fn initial_schedule() -> Vec<ScheduleSlot> {
    let mut slots = Vec::with_capacity(TOTAL_SLOTS);
    for day in DAYS {
        for period in 1..=PERIODS_PER_DAY {
            slots.push(ScheduleSlot {
                id: Uuid::new_v4().to_string(),
                day,
                period,
                class_name: String::new(),
                week_plans: BTreeMap::new(),
            });
        }
    }
    slots
}

/// First-run roster fixture carried over from the legacy application.
pub fn seed_classes() -> Vec<ClassGroup> {
    fn seeded(id: &str, name: &str, notes: &str, score: i64) -> Student {
        Student {
            id: id.to_string(),
            name: name.to_string(),
            notes: notes.to_string(),
            attendance: BTreeMap::new(),
            participation_score: score,
            homework_score: score,
            activity_score: score,
            quiz_score: score,
        }
    }

    vec![
        ClassGroup {
            id: "c1".to_string(),
            name: "الصف الأول - أ".to_string(),
            students: vec![
                seeded("s1", "أحمد محمد", "", 8),
                seeded("s2", "خالد علي", "يحتاج متابعة في القراءة", 6),
                seeded("s3", "سارة عبدالله", "ممتازة", 10),
            ],
        },
        ClassGroup {
            id: "c2".to_string(),
            name: "الصف الثاني - ب".to_string(),
            students: vec![
                seeded("s4", "فهد عمر", "", 7),
                seeded("s5", "نورة سعيد", "", 9),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_schedule_covers_every_day_period_pair() {
        let slots = initial_schedule();
        assert_eq!(slots.len(), TOTAL_SLOTS);
        let mut seen = std::collections::HashSet::new();
        for slot in &slots {
            assert!((1..=PERIODS_PER_DAY).contains(&slot.period));
            assert!(!slot.is_configured());
            assert!(seen.insert((slot.day, slot.period)), "duplicate slot");
        }
        assert_eq!(seen.len(), TOTAL_SLOTS);
    }

    #[test]
    fn classes_slice_round_trips_through_json() {
        let mut classes = seed_classes();
        classes[0].students[0]
            .attendance
            .insert("2026-02-01".to_string(), AttendanceStatus::Late);
        classes[0].students[0].quiz_score = 3;

        let text = serde_json::to_string(&classes).expect("serialize classes");
        let back: Vec<ClassGroup> = serde_json::from_str(&text).expect("deserialize classes");
        assert_eq!(back, classes);
    }

    #[test]
    fn day_labels_match_legacy_documents() {
        let json = serde_json::to_string(&DayOfWeek::Sunday).expect("serialize day");
        assert_eq!(json, "\"الأحد\"");
        let back: DayOfWeek = serde_json::from_str("\"الخميس\"").expect("parse day");
        assert_eq!(back, DayOfWeek::Thursday);
    }
}
