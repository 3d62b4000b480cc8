use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A physical branch of the academy.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Branch {
    pub id: i32,
    pub academy_id: i32,
    pub name: String,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewBranch {
    pub academy_id: i32,
    pub name: String,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl NewBranch {
    #[must_use]
    pub fn new(
        academy_id: i32,
        name: String,
        city_id: Option<i32>,
        area_id: Option<i32>,
        address: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            academy_id,
            name: name.trim().to_string(),
            city_id,
            area_id,
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateBranch {
    pub name: String,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl UpdateBranch {
    #[must_use]
    pub fn new(
        name: String,
        city_id: Option<i32>,
        area_id: Option<i32>,
        address: Option<String>,
        phone: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            city_id,
            area_id,
            address: address
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            phone: phone
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

/// A lab room inside a branch. Course groups book labs per weekly slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Lab {
    pub id: i32,
    pub academy_id: i32,
    pub branch_id: i32,
    pub name: String,
    pub capacity: u32,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLab {
    pub academy_id: i32,
    pub branch_id: i32,
    pub name: String,
    pub capacity: u32,
}

impl NewLab {
    #[must_use]
    pub fn new(academy_id: i32, branch_id: i32, name: String, capacity: u32) -> Self {
        Self {
            academy_id,
            branch_id,
            name: name.trim().to_string(),
            capacity,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateLab {
    pub branch_id: i32,
    pub name: String,
    pub capacity: u32,
}

impl UpdateLab {
    #[must_use]
    pub fn new(branch_id: i32, name: String, capacity: u32) -> Self {
        Self {
            branch_id,
            name: name.trim().to_string(),
            capacity,
        }
    }
}
