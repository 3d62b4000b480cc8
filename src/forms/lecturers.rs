use serde::Deserialize;
use validator::Validate;

use crate::domain::lecturer::{NewLecturer, UpdateLecturer};
use crate::domain::types::Phone;
use crate::forms::{FormError, none_if_blank, optional_id};

#[derive(Deserialize, Validate)]
pub struct AddLecturerForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub qualification_id: Option<i32>,
}

impl AddLecturerForm {
    pub fn to_new_lecturer(&self, academy_id: i32) -> Result<NewLecturer, FormError> {
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };

        Ok(NewLecturer::new(
            academy_id,
            self.name.clone(),
            none_if_blank(self.email.clone()),
            phone,
            none_if_blank(self.specialty.clone()),
            optional_id(self.qualification_id),
        ))
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveLecturerForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialty: Option<String>,
    pub qualification_id: Option<i32>,
}

impl SaveLecturerForm {
    pub fn to_updates(&self) -> Result<UpdateLecturer, FormError> {
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };

        Ok(UpdateLecturer::new(
            self.name.clone(),
            none_if_blank(self.email.clone()),
            phone,
            none_if_blank(self.specialty.clone()),
            optional_id(self.qualification_id),
        ))
    }
}
