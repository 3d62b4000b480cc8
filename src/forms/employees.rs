use serde::Deserialize;
use validator::Validate;

use crate::domain::employee::{NewEmployee, UpdateEmployee};
use crate::domain::types::Phone;
use crate::forms::{FormError, none_if_blank, optional_id};

#[derive(Deserialize, Validate)]
pub struct AddEmployeeForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub branch_id: Option<i32>,
}

impl AddEmployeeForm {
    pub fn to_new_employee(&self, academy_id: i32) -> Result<NewEmployee, FormError> {
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };

        Ok(NewEmployee::new(
            academy_id,
            optional_id(self.branch_id),
            self.name.clone(),
            none_if_blank(self.email.clone()),
            phone,
            none_if_blank(self.job_title.clone()),
        ))
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveEmployeeForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub branch_id: Option<i32>,
}

impl SaveEmployeeForm {
    pub fn to_updates(&self) -> Result<UpdateEmployee, FormError> {
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };

        Ok(UpdateEmployee::new(
            optional_id(self.branch_id),
            self.name.clone(),
            none_if_blank(self.email.clone()),
            phone,
            none_if_blank(self.job_title.clone()),
        ))
    }
}
