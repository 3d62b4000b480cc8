use serde::Deserialize;
use validator::Validate;

use crate::domain::lookup::{LookupKind, NewLookup, UpdateLookup};
use crate::domain::types::EntityName;
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct AddLookupForm {
    pub kind: String,
    #[validate(length(min = 1))]
    pub name: String,
}

impl AddLookupForm {
    pub fn to_new_lookup(&self, academy_id: i32) -> Result<NewLookup, FormError> {
        let kind = LookupKind::try_from(self.kind.as_str()).map_err(FormError::InvalidChoice)?;
        let name = EntityName::new(self.name.clone()).map_err(|_| FormError::InvalidName)?;
        Ok(NewLookup::new(academy_id, kind, name.into_inner()))
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveLookupForm {
    pub id: i32,
    pub kind: String,
    #[validate(length(min = 1))]
    pub name: String,
}

impl SaveLookupForm {
    pub fn parsed_kind(&self) -> Result<LookupKind, FormError> {
        LookupKind::try_from(self.kind.as_str()).map_err(FormError::InvalidChoice)
    }

    pub fn to_updates(&self) -> Result<UpdateLookup, FormError> {
        let name = EntityName::new(self.name.clone()).map_err(|_| FormError::InvalidName)?;
        Ok(UpdateLookup::new(name.into_inner()))
    }
}
