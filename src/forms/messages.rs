use serde::Deserialize;
use validator::Validate;

use crate::domain::message::{MessageChannel, NewMessageTemplate, UpdateMessageTemplate};
use crate::forms::FormError;

#[derive(Deserialize, Validate)]
pub struct AddTemplateForm {
    #[validate(length(min = 1))]
    pub name: String,
    pub channel: String,
    #[validate(length(min = 1))]
    pub body: String,
}

impl AddTemplateForm {
    pub fn to_new_template(&self, academy_id: i32) -> Result<NewMessageTemplate, FormError> {
        let channel =
            MessageChannel::try_from(self.channel.as_str()).map_err(FormError::InvalidChoice)?;

        Ok(NewMessageTemplate::new(
            academy_id,
            self.name.clone(),
            channel,
            self.body.clone(),
        ))
    }
}

#[derive(Deserialize, Validate)]
pub struct SaveTemplateForm {
    pub id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    pub channel: String,
    #[validate(length(min = 1))]
    pub body: String,
}

impl SaveTemplateForm {
    pub fn to_updates(&self) -> Result<UpdateMessageTemplate, FormError> {
        let channel =
            MessageChannel::try_from(self.channel.as_str()).map_err(FormError::InvalidChoice)?;

        Ok(UpdateMessageTemplate::new(
            self.name.clone(),
            channel,
            self.body.clone(),
        ))
    }
}

/// Send a rendered template either to one student or a whole group.
#[derive(Deserialize, Validate)]
pub struct SendMessageForm {
    pub template_id: i32,
    pub student_id: Option<i32>,
    pub group_id: Option<i32>,
}

impl SendMessageForm {
    /// Exactly one recipient selector must be present.
    pub fn recipient(&self) -> Result<MessageRecipient, FormError> {
        match (self.student_id, self.group_id) {
            (Some(student_id), None) if student_id > 0 => {
                Ok(MessageRecipient::Student(student_id))
            }
            (None, Some(group_id)) if group_id > 0 => Ok(MessageRecipient::Group(group_id)),
            _ => Err(FormError::InvalidChoice(
                "pick either a student or a group".to_string(),
            )),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageRecipient {
    Student(i32),
    Group(i32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_requires_exactly_one_target() {
        let both = SendMessageForm {
            template_id: 1,
            student_id: Some(2),
            group_id: Some(3),
        };
        assert!(both.recipient().is_err());

        let neither = SendMessageForm {
            template_id: 1,
            student_id: None,
            group_id: None,
        };
        assert!(neither.recipient().is_err());

        let student = SendMessageForm {
            template_id: 1,
            student_id: Some(2),
            group_id: None,
        };
        assert_eq!(student.recipient().unwrap(), MessageRecipient::Student(2));
    }
}
