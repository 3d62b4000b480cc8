use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A student record mirrored from the backend REST resource.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Student {
    pub id: i32,
    pub academy_id: i32,
    pub branch_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub qualification_id: Option<i32>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewStudent {
    pub academy_id: i32,
    pub branch_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub qualification_id: Option<i32>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl NewStudent {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        academy_id: i32,
        branch_id: Option<i32>,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        birth_date: Option<NaiveDate>,
        city_id: Option<i32>,
        area_id: Option<i32>,
        qualification_id: Option<i32>,
        address: Option<String>,
        notes: Option<String>,
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
            birth_date,
            city_id,
            area_id,
            qualification_id,
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateStudent {
    pub branch_id: Option<i32>,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub qualification_id: Option<i32>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl UpdateStudent {
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        branch_id: Option<i32>,
        name: String,
        email: Option<String>,
        phone: Option<String>,
        birth_date: Option<NaiveDate>,
        city_id: Option<i32>,
        area_id: Option<i32>,
        qualification_id: Option<i32>,
        address: Option<String>,
        notes: Option<String>,
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
            birth_date,
            city_id,
            area_id,
            qualification_id,
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            notes: notes
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
