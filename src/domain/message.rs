use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::SanitizedText;

/// Delivery channel of an outbound message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    #[default]
    Sms,
    Email,
    Whatsapp,
}

impl Display for MessageChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageChannel::Sms => write!(f, "sms"),
            MessageChannel::Email => write!(f, "email"),
            MessageChannel::Whatsapp => write!(f, "whatsapp"),
        }
    }
}

impl TryFrom<&str> for MessageChannel {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "sms" => Ok(MessageChannel::Sms),
            "email" => Ok(MessageChannel::Email),
            "whatsapp" => Ok(MessageChannel::Whatsapp),
            other => Err(format!("unknown message channel: {other}")),
        }
    }
}

/// Delivery state owned by the backend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Queued,
    Sent,
    Failed,
}

impl Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageStatus::Queued => write!(f, "queued"),
            MessageStatus::Sent => write!(f, "sent"),
            MessageStatus::Failed => write!(f, "failed"),
        }
    }
}

/// A reusable outbound message body with `{{name}}`-style placeholders.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct MessageTemplate {
    pub id: i32,
    pub academy_id: i32,
    pub name: String,
    pub channel: MessageChannel,
    pub body: String,
    pub archived: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl MessageTemplate {
    /// Replaces `{{name}}` placeholders with the student's values.
    pub fn render(&self, name: &str) -> String {
        self.body.replace("{{name}}", name)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewMessageTemplate {
    pub academy_id: i32,
    pub name: String,
    pub channel: MessageChannel,
    pub body: String,
}

impl NewMessageTemplate {
    /// Builds a template with a sanitized body.
    #[must_use]
    pub fn new(academy_id: i32, name: String, channel: MessageChannel, body: String) -> Self {
        Self {
            academy_id,
            name: name.trim().to_string(),
            channel,
            body: SanitizedText::new(&body).into_inner(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateMessageTemplate {
    pub name: String,
    pub channel: MessageChannel,
    pub body: String,
}

impl UpdateMessageTemplate {
    #[must_use]
    pub fn new(name: String, channel: MessageChannel, body: String) -> Self {
        Self {
            name: name.trim().to_string(),
            channel,
            body: SanitizedText::new(&body).into_inner(),
        }
    }
}

/// One outbound message instance; delivery is the backend's concern.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Message {
    pub id: i32,
    pub academy_id: i32,
    pub student_id: i32,
    pub template_id: Option<i32>,
    pub channel: MessageChannel,
    pub body: String,
    pub status: MessageStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewMessage {
    pub academy_id: i32,
    pub student_id: i32,
    pub template_id: Option<i32>,
    pub channel: MessageChannel,
    pub body: String,
}

impl NewMessage {
    #[must_use]
    pub fn new(
        academy_id: i32,
        student_id: i32,
        template_id: Option<i32>,
        channel: MessageChannel,
        body: String,
    ) -> Self {
        Self {
            academy_id,
            student_id,
            template_id,
            channel,
            body: SanitizedText::new(&body).into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_renders_placeholder() {
        let template = MessageTemplate {
            body: "Dear {{name}}, your lecture starts at 5pm.".to_string(),
            ..MessageTemplate::default()
        };
        assert_eq!(
            template.render("Omar"),
            "Dear Omar, your lecture starts at 5pm."
        );
    }

    #[test]
    fn test_new_template_sanitizes_body() {
        let template = NewMessageTemplate::new(
            1,
            "welcome".to_string(),
            MessageChannel::Sms,
            "Hi <script>x()</script>{{name}}".to_string(),
        );
        assert!(!template.body.contains("script"));
        assert!(template.body.contains("{{name}}"));
    }
}
