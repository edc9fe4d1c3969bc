//! Statistics service

use std::sync::Arc;

use crate::models::{Schedule, SchoolStats, Student, Teacher};
use crate::services::records::{RecordError, RecordService};

/// Aggregates counts across the record collections
pub struct StatsService {
    teachers: Arc<RecordService<Teacher>>,
    students: Arc<RecordService<Student>>,
    schedule: Arc<RecordService<Schedule>>,
}

impl StatsService {
    pub fn new(
        teachers: Arc<RecordService<Teacher>>,
        students: Arc<RecordService<Student>>,
        schedule: Arc<RecordService<Schedule>>,
    ) -> Self {
        Self {
            teachers,
            students,
            schedule,
        }
    }

    pub async fn snapshot(&self) -> Result<SchoolStats, RecordError> {
        let students = self.students.list().await?;
        let teacher_count = self.teachers.count().await?;
        let lesson_count = self.schedule.count().await?;

        Ok(SchoolStats::from_records(&students, teacher_count, lesson_count))
    }
}
