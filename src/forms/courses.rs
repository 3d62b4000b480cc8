use serde::Deserialize;
use validator::Validate;

use crate::domain::course::{NewCourse, UpdateCourse};
use crate::forms::{none_if_blank, optional_id};

#[derive(Deserialize, Validate)]
pub struct AddCourseForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub category_id: Option<i32>,
    pub level: Option<String>,
    #[validate(range(min = 1, max = 500))]
    pub default_sessions: u32,
    #[validate(range(min = 0))]
    pub price_minor: i64,
    pub description: Option<String>,
}

impl AddCourseForm {
    pub fn to_new_course(&self, academy_id: i32) -> NewCourse {
        NewCourse::new(
            academy_id,
            self.name.clone(),
            optional_id(self.category_id),
            none_if_blank(self.level.clone()),
            self.default_sessions,
            self.price_minor,
            none_if_blank(self.description.clone()),
        )
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveCourseForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub category_id: Option<i32>,
    pub level: Option<String>,
    #[validate(range(min = 1, max = 500))]
    pub default_sessions: u32,
    #[validate(range(min = 0))]
    pub price_minor: i64,
    pub description: Option<String>,
}

impl SaveCourseForm {
    pub fn to_updates(&self) -> UpdateCourse {
        UpdateCourse::new(
            self.name.clone(),
            optional_id(self.category_id),
            none_if_blank(self.level.clone()),
            self.default_sessions,
            self.price_minor,
            none_if_blank(self.description.clone()),
        )
    }
}
