use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A lecturer teaching one or more course groups.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Lecturer {
    pub id: i32,
    pub academy_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub qualification_id: Option<i32>,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLecturer {
    pub academy_id: i32,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub qualification_id: Option<i32>,
}

impl NewLecturer {
    #[must_use]
    pub fn new(
        academy_id: i32,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        specialty: Option<String>,
        qualification_id: Option<i32>,
    ) -> Self {
        Self {
            academy_id,
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            specialty: specialty
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            qualification_id,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateLecturer {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub qualification_id: Option<i32>,
}

impl UpdateLecturer {
    #[must_use]
    pub fn new(
        name: String,
        email: Option<String>,
        phone: Option<String>,
        specialty: Option<String>,
        qualification_id: Option<i32>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            specialty: specialty
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            qualification_id,
        }
    }
}
