use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// An administrative employee of the academy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Employee {
    pub id: i32,
    pub academy_id: i32,
    pub branch_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewEmployee {
    pub academy_id: i32,
    pub branch_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
}

impl NewEmployee {
    #[must_use]
    pub fn new(
        academy_id: i32,
        branch_id: Option<i32>,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        job_title: Option<String>,
    ) -> Self {
        Self {
            academy_id,
            branch_id,
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            job_title: job_title
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateEmployee {
    pub branch_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
}

impl UpdateEmployee {
    #[must_use]
    pub fn new(
        branch_id: Option<i32>,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        job_title: Option<String>,
    ) -> Self {
        Self {
            branch_id,
            name: name.trim().to_string(),
            email: email
                .map(|s| s.to_lowercase().trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            job_title: job_title
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
