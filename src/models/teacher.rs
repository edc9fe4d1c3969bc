//! Teacher model (o'qituvchi)

use serde::{Deserialize, Serialize};

use super::Record;

/// A teacher record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    /// First name
    pub ism: String,
    /// Surname
    pub familiya: String,
    /// Subject taught
    pub fan: String,
    /// Phone number
    pub telefon: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Body of create and update requests. Any `id` sent by the client is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherInput {
    pub ism: String,
    pub familiya: String,
    pub fan: String,
    pub telefon: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Record for Teacher {
    type Input = TeacherInput;

    fn from_input(id: i64, input: TeacherInput) -> Self {
        Self {
            id,
            ism: input.ism,
            familiya: input.familiya,
            fan: input.fan,
            telefon: input.telefon,
            email: input.email,
        }
    }

    fn id(&self) -> i64 {
        self.id
    }
}
