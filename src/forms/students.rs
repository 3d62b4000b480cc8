use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::student::{NewStudent, UpdateStudent};
use crate::domain::types::{Email, Phone};
use crate::forms::{FormError, none_if_blank, optional_id, parse_date};

#[derive(Deserialize, Validate)]
/// Form data for registering a new student.
pub struct AddStudentForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub branch_id: Option<i32>,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub qualification_id: Option<i32>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl AddStudentForm {
    /// Converts the form into a domain payload scoped to the academy.
    pub fn to_new_student(&self, academy_id: i32) -> Result<NewStudent, FormError> {
        let email = match none_if_blank(self.email.clone()) {
            Some(raw) => Some(Email::new(raw)?.into_inner()),
            None => None,
        };
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };
        let birth_date = match none_if_blank(self.birth_date.clone()) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };

        Ok(NewStudent::new(
            academy_id,
            optional_id(self.branch_id),
            self.name.clone(),
            email,
            phone,
            birth_date,
            optional_id(self.city_id),
            optional_id(self.area_id),
            optional_id(self.qualification_id),
            none_if_blank(self.address.clone()),
            none_if_blank(self.notes.clone()),
        ))
    }
}

#[derive(Deserialize, Validate)]
/// Form data for updating an existing student.
pub struct SaveStudentForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub birth_date: Option<String>,
    pub branch_id: Option<i32>,
    pub city_id: Option<i32>,
    pub area_id: Option<i32>,
    pub qualification_id: Option<i32>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

impl SaveStudentForm {
    pub fn to_updates(&self) -> Result<UpdateStudent, FormError> {
        let email = match none_if_blank(self.email.clone()) {
            Some(raw) => Some(Email::new(raw)?.into_inner()),
            None => None,
        };
        let phone = match none_if_blank(self.phone.clone()) {
            Some(raw) => Some(Phone::new(&raw)?.into_inner()),
            None => None,
        };
        let birth_date = match none_if_blank(self.birth_date.clone()) {
            Some(raw) => Some(parse_date(&raw)?),
            None => None,
        };

        Ok(UpdateStudent::new(
            optional_id(self.branch_id),
            self.name.clone(),
            email,
            phone,
            birth_date,
            optional_id(self.city_id),
            optional_id(self.area_id),
            optional_id(self.qualification_id),
            none_if_blank(self.address.clone()),
            none_if_blank(self.notes.clone()),
        ))
    }
}

#[derive(MultipartForm)]
/// CSV upload with one student per row.
pub struct UploadStudentsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl UploadStudentsForm {
    /// Parses the uploaded CSV into student payloads.
    ///
    /// The header row maps columns to fields; unknown columns are ignored.
    /// Rows failing validation abort the import with their row number.
    pub fn parse(&mut self, academy_id: i32) -> Result<Vec<NewStudent>, FormError> {
        let mut reader = csv::Reader::from_path(self.csv.file.path())
            .map_err(|e| FormError::Csv(e.to_string()))?;

        let headers = reader
            .headers()
            .map_err(|e| FormError::Csv(e.to_string()))?
            .clone();

        let mut students = Vec::new();

        for (index, result) in reader.records().enumerate() {
            let row = index + 2; // header is row 1
            let record = result.map_err(|e| FormError::Csv(format!("row {row}: {e}")))?;

            let mut name = String::new();
            let mut email = None;
            let mut phone = None;
            let mut birth_date = None;
            let mut address = None;
            let mut notes = None;

            for (i, field) in record.iter().enumerate() {
                let field = field.trim();
                if field.is_empty() {
                    continue;
                }
                match headers.get(i) {
                    Some("name") => name = field.to_string(),
                    Some("email") => email = Some(field.to_string()),
                    Some("phone") => phone = Some(field.to_string()),
                    Some("birth_date") => birth_date = Some(field.to_string()),
                    Some("address") => address = Some(field.to_string()),
                    Some("notes") => notes = Some(field.to_string()),
                    _ => continue,
                }
            }

            if name.is_empty() {
                return Err(FormError::Csv(format!("row {row}: missing name")));
            }

            let email = match email {
                Some(raw) => Some(
                    Email::new(raw)
                        .map_err(|_| FormError::Csv(format!("row {row}: invalid email")))?
                        .into_inner(),
                ),
                None => None,
            };
            let phone = match phone {
                Some(raw) => Some(
                    Phone::new(&raw)
                        .map_err(|_| FormError::Csv(format!("row {row}: invalid phone")))?
                        .into_inner(),
                ),
                None => None,
            };
            let birth_date = match birth_date {
                Some(raw) => Some(
                    parse_date(&raw)
                        .map_err(|_| FormError::Csv(format!("row {row}: invalid birth date")))?,
                ),
                None => None,
            };

            students.push(NewStudent::new(
                academy_id, None, name, email, phone, birth_date, None, None, None, address, notes,
            ));
        }

        Ok(students)
    }
}
