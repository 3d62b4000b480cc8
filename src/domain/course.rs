use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A course offered by the academy. `default_sessions` seeds the session
/// count of new groups; `price_minor` is the list price in minor currency
/// units.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Course {
    pub id: i32,
    pub academy_id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub level: Option<String>,
    pub default_sessions: u32,
    pub price_minor: i64,
    pub description: Option<String>,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewCourse {
    pub academy_id: i32,
    pub name: String,
    pub category_id: Option<i32>,
    pub level: Option<String>,
    pub default_sessions: u32,
    pub price_minor: i64,
    pub description: Option<String>,
}

impl NewCourse {
    #[must_use]
    pub fn new(
        academy_id: i32,
        name: String,
        category_id: Option<i32>,
        level: Option<String>,
        default_sessions: u32,
        price_minor: i64,
        description: Option<String>,
    ) -> Self {
        Self {
            academy_id,
            name: name.trim().to_string(),
            category_id,
            level: level
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            default_sessions,
            price_minor,
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateCourse {
    pub name: String,
    pub category_id: Option<i32>,
    pub level: Option<String>,
    pub default_sessions: u32,
    pub price_minor: i64,
    pub description: Option<String>,
}

impl UpdateCourse {
    #[must_use]
    pub fn new(
        name: String,
        category_id: Option<i32>,
        level: Option<String>,
        default_sessions: u32,
        price_minor: i64,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.trim().to_string(),
            category_id,
            level: level
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            default_sessions,
            price_minor,
            description: description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}
