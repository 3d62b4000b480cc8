use serde::Deserialize;
use validator::Validate;

use crate::domain::branch::{NewBranch, NewLab, UpdateBranch, UpdateLab};
use crate::domain::types::Phone;
use crate::forms::{FormError, none_if_blank, optional_id};

#[derive(Deserialize, Validate)]
pub struct AddBranchForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl AddBranchForm {
    pub fn to_new_branch(&self, academy_id: i32) -> Result<NewBranch, FormError> {
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };

        Ok(NewBranch::new(
            academy_id,
            self.name.clone(),
            optional_id(self.city_id),
            optional_id(self.area_id),
            none_if_blank(self.address.clone()),
            phone,
        ))
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveBranchForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl SaveBranchForm {
    pub fn to_updates(&self) -> Result<UpdateBranch, FormError> {
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };

        Ok(UpdateBranch::new(
            self.name.clone(),
            optional_id(self.city_id),
            optional_id(self.area_id),
            none_if_blank(self.address.clone()),
            phone,
        ))
    }
}

#[derive(Deserialize, Validate)]
pub struct AddLabForm {
    pub branch_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: u32,
}

impl AddLabForm {
    pub fn to_new_lab(&self, academy_id: i32) -> NewLab {
        NewLab::new(academy_id, self.branch_id, self.name.clone(), self.capacity)
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveLabForm {
    pub id: i32,
    pub branch_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(min = 1, max = 1000))]
    pub capacity: u32,
}

impl SaveLabForm {
    pub fn to_updates(&self) -> UpdateLab {
        UpdateLab::new(self.branch_id, self.name.clone(), self.capacity)
    }
}
