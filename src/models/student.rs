//! Student model (o'quvchi)

use serde::{Deserialize, Serialize};

use super::Record;

/// Lowest and highest grade the school teaches
pub const GRADES: std::ops::RangeInclusive<i32> = 1..=11;

/// A student record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    /// First name
    pub ism: String,
    /// Surname
    pub familiya: String,
    /// Grade
    pub sinf: i32,
    /// Age
    pub yosh: i32,
    /// Parent's name
    pub ota_onasi: String,
    /// Phone number
    pub telefon: String,
}

/// Body of create and update requests. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentInput {
    pub ism: String,
    pub familiya: String,
    pub sinf: i32,
    pub yosh: i32,
    pub ota_onasi: String,
    pub telefon: String,
}

/// Query parameters of the student list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFilter {
    pub sinf: Option<i32>,
}

impl StudentFilter {
    /// A zero grade means "no filter", as in the old service
    pub fn matches(&self, student: &Student) -> bool {
        match self.sinf.filter(|sinf| *sinf != 0) {
            Some(sinf) => student.sinf == sinf,
            None => true,
        }
    }
}

impl Record for Student {
    type Input = StudentInput;

    fn from_input(id: i64, input: StudentInput) -> Self {
        Self {
            id,
            ism: input.ism,
            familiya: input.familiya,
            sinf: input.sinf,
            yosh: input.yosh,
            ota_onasi: input.ota_onasi,
            telefon: input.telefon,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(sinf: i32) -> Student {
        Student {
            id: 1,
            ism: "Akmal".to_string(),
            familiya: "Usmonov".to_string(),
            sinf,
            yosh: 11,
            ota_onasi: "Usmanov Abbos".to_string(),
            telefon: "+998901111111".to_string(),
        }
    }

    #[test]
    fn test_filter_by_grade() {
        let filter = StudentFilter { sinf: Some(5) };
        assert!(filter.matches(&student(5)));
        assert!(!filter.matches(&student(7)));
    }

    #[test]
    fn test_empty_and_zero_filter_match_everything() {
        assert!(StudentFilter::default().matches(&student(9)));
        assert!(StudentFilter { sinf: Some(0) }.matches(&student(9)));
    }
}
