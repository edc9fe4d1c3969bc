//! Class schedule model (dars jadvali)

use serde::{Deserialize, Serialize};

use super::Record;

/// One lesson in the weekly timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: i64,
    /// Grade
    pub sinf: i32,
    /// Day of week
    pub kun: String,
    /// Time range, "HH:MM-HH:MM"
    pub vaqt: String,
    /// Subject
    pub fan: String,
    pub teacher_id: i64,
    /// Room
    pub xona: String,
}

/// Body of create and update requests. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleInput {
    pub sinf: i32,
    pub kun: String,
    pub vaqt: String,
    pub fan: String,
    pub teacher_id: i64,
    pub xona: String,
}

/// Query parameters of the schedule list. Both filters combine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleFilter {
    pub sinf: Option<i32>,
    pub teacher_id: Option<i64>,
}

impl ScheduleFilter {
    pub fn matches(&self, lesson: &Schedule) -> bool {
        let sinf_ok = match self.sinf.filter(|sinf| *sinf != 0) {
            Some(sinf) => lesson.sinf == sinf,
            None => true,
        };
        let teacher_ok = match self.teacher_id.filter(|id| *id != 0) {
            Some(teacher_id) => lesson.teacher_id == teacher_id,
            None => true,
        };
        sinf_ok && teacher_ok
    }
}

impl Record for Schedule {
    type Input = ScheduleInput;

    fn from_input(id: i64, input: ScheduleInput) -> Self {
        Self {
            id,
            sinf: input.sinf,
            kun: input.kun,
            vaqt: input.vaqt,
            fan: input.fan,
            teacher_id: input.teacher_id,
            xona: input.xona,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(sinf: i32, teacher_id: i64) -> Schedule {
        Schedule {
            id: 1,
            sinf,
            kun: "Dushanba".to_string(),
            vaqt: "08:00-08:45".to_string(),
            fan: "Matematika".to_string(),
            teacher_id,
            xona: "201".to_string(),
        }
    }

    #[test]
    fn test_filters_combine() {
        let filter = ScheduleFilter { sinf: Some(5), teacher_id: Some(1) };
        assert!(filter.matches(&lesson(5, 1)));
        assert!(!filter.matches(&lesson(5, 3)));
        assert!(!filter.matches(&lesson(7, 1)));
    }

    #[test]
    fn test_single_filter() {
        let by_teacher = ScheduleFilter { sinf: None, teacher_id: Some(2) };
        assert!(by_teacher.matches(&lesson(7, 2)));
        assert!(by_teacher.matches(&lesson(9, 2)));
        assert!(!by_teacher.matches(&lesson(7, 4)));
    }
}
