use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::color::SubjectColor;
use crate::time_slot::{TimeInterval, parse_time_slot};

pub type ClassId = i64;

/// A class as the REST layer returns it. Every field besides `id` and `name`
/// may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassRecord {
    pub id: ClassId,

    pub name: String,

    #[serde(default)]
    pub subject: Option<String>,

    #[serde(default)]
    pub day_of_week: Option<String>,

    #[serde(default)]
    pub time_slot: Option<String>,

    #[serde(default)]
    pub teacher_name: Option<String>,

    #[serde(default)]
    pub max_students: Option<u32>,

    #[serde(default)]
    pub current_students: Option<u32>,
}

impl ClassRecord {
    pub fn new(id: ClassId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            subject: None,
            day_of_week: None,
            time_slot: None,
            teacher_name: None,
            max_students: None,
            current_students: None,
        }
    }

    #[must_use]
    pub fn weekday(&self) -> Option<Weekday> {
        self.day_of_week.as_deref().and_then(parse_weekday)
    }

    #[must_use]
    pub fn interval(&self) -> Option<TimeInterval> {
        self.time_slot.as_deref().and_then(parse_time_slot)
    }

    /// `current/max`, `current` or `-/max` depending on what the record
    /// carries.
    #[must_use]
    pub fn enrollment(&self) -> Option<String> {
        match (self.current_students, self.max_students) {
            (Some(current), Some(max)) => Some(format!("{current}/{max}")),
            (Some(current), None) => Some(current.to_string()),
            (None, Some(max)) => Some(format!("-/{max}")),
            (None, None) => None,
        }
    }
}

/// A class with a valid interval placed on one day of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledClass {
    pub record: ClassRecord,
    pub day: Weekday,
    pub interval: TimeInterval,
    pub color: SubjectColor,
    pub column: usize,
    pub column_count: usize,
}

impl ScheduledClass {
    /// `None` when the record has no usable time slot.
    #[must_use]
    pub fn from_record(record: &ClassRecord, day: Weekday) -> Option<Self> {
        let interval = record.interval()?;
        Some(Self {
            record: record.clone(),
            day,
            interval,
            color: SubjectColor::for_subject(record.subject.as_deref()),
            column: 0,
            column_count: 1,
        })
    }

    #[must_use]
    pub fn id(&self) -> ClassId {
        self.record.id
    }
}

/// English weekday name, full or three-letter, any case.
#[must_use]
pub fn parse_weekday(raw: &str) -> Option<Weekday> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<Weekday>().ok()
}

#[must_use]
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_rest_payload_with_missing_fields() {
        let raw = r#"[
            {"id": 1, "name": "Algebra", "subject": "Math", "day_of_week": "Monday",
             "time_slot": "09:00-10:00", "teacher_name": "Ms. Lee", "max_students": 12},
            {"id": 2, "name": "Open Lab", "subject": null, "extra": true}
        ]"#;
        let records: Vec<ClassRecord> = serde_json::from_str(raw).expect("decode classes");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].weekday(), Some(Weekday::Mon));
        assert_eq!(records[0].interval(), Some(TimeInterval::new(540, 600)));
        assert_eq!(records[0].enrollment().as_deref(), Some("-/12"));
        assert_eq!(records[1].weekday(), None);
        assert_eq!(records[1].interval(), None);
        assert_eq!(records[1].enrollment(), None);
    }

    #[test]
    fn weekday_names_are_case_insensitive() {
        assert_eq!(parse_weekday("monday"), Some(Weekday::Mon));
        assert_eq!(parse_weekday(" FRIDAY "), Some(Weekday::Fri));
        assert_eq!(parse_weekday("Wed"), Some(Weekday::Wed));
        assert_eq!(parse_weekday(""), None);
        assert_eq!(parse_weekday("Funday"), None);
        assert_eq!(weekday_name(Weekday::Thu), "Thursday");
    }

    #[test]
    fn records_without_slot_are_not_scheduled() {
        let mut record = ClassRecord::new(7, "Chess");
        assert!(ScheduledClass::from_record(&record, Weekday::Tue).is_none());

        record.time_slot = Some("14:00-15:30".to_string());
        record.current_students = Some(3);
        record.max_students = Some(10);
        let scheduled =
            ScheduledClass::from_record(&record, Weekday::Tue).expect("valid slot schedules");
        assert_eq!(scheduled.id(), 7);
        assert_eq!(scheduled.color, SubjectColor::Neutral);
        assert_eq!(scheduled.column_count, 1);
        assert_eq!(record.enrollment().as_deref(), Some("3/10"));
    }
}
