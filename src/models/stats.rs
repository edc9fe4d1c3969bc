//! School statistics (statistika)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Student, GRADES};

/// Totals returned by `GET /api/stats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolStats {
    /// Total students
    pub jami_oquvchilar: usize,
    /// Total teachers
    pub jami_oqituvchilar: usize,
    /// Total lessons in the schedule
    pub jami_darslar: usize,
    /// Students per grade, keyed "1".."11"; every grade is present
    pub sinflar: BTreeMap<String, usize>,
}

impl SchoolStats {
    pub fn from_records(students: &[Student], teacher_count: usize, lesson_count: usize) -> Self {
        let sinflar = GRADES
            .map(|grade| {
                let count = students.iter().filter(|s| s.sinf == grade).count();
                (grade.to_string(), count)
            })
            .collect();

        Self {
            jami_oquvchilar: students.len(),
            jami_oqituvchilar: teacher_count,
            jami_darslar: lesson_count,
            sinflar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn student_in(sinf: i32) -> Student {
        Student {
            id: 0,
            ism: "Ism".to_string(),
            familiya: "Familiya".to_string(),
            sinf,
            yosh: 10,
            ota_onasi: "Ota".to_string(),
            telefon: "+998900000000".to_string(),
        }
    }

    #[test]
    fn test_grade_counts() {
        let students: Vec<Student> = [5, 5, 7, 9, 11].into_iter().map(student_in).collect();
        let stats = SchoolStats::from_records(&students, 4, 4);

        assert_eq!(stats.jami_oquvchilar, 5);
        assert_eq!(stats.sinflar["5"], 2);
        assert_eq!(stats.sinflar["7"], 1);
        assert_eq!(stats.sinflar["9"], 1);
        assert_eq!(stats.sinflar["11"], 1);
        for grade in ["1", "2", "3", "4", "6", "8", "10"] {
            assert_eq!(stats.sinflar[grade], 0);
        }
    }

    #[test]
    fn test_out_of_range_grade_counted_in_total_only() {
        let students = vec![student_in(12), student_in(0)];
        let stats = SchoolStats::from_records(&students, 0, 0);

        assert_eq!(stats.jami_oquvchilar, 2);
        assert_eq!(stats.sinflar.len(), 11);
        assert!(stats.sinflar.values().all(|count| *count == 0));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        #[test]
        fn property_grade_counts_sum_to_in_range_students(grades in prop::collection::vec(1i32..=11, 0..40)) {
            let students: Vec<Student> = grades.iter().copied().map(student_in).collect();
            let stats = SchoolStats::from_records(&students, 0, 0);

            prop_assert_eq!(stats.sinflar.len(), 11);
            prop_assert_eq!(stats.sinflar.values().sum::<usize>(), grades.len());
        }
    }
}
