use crate::utils::error::{Result, SiteError};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A row as exchanged with the data service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: HashMap<String, serde_json::Value>,
}

impl Record {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Testimonial {
    pub id: i64,
    pub name: String,
    pub quote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// Postgres `timestamp` columns come back without an offset; treat them as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

fn text_column(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Every row becomes a testimonial. Nullable text columns read as empty,
/// an unreadable `created_at` is dropped and a missing `id` reads as 0.
impl From<Record> for Testimonial {
    fn from(record: Record) -> Self {
        let data = &record.data;
        let id = data
            .get("id")
            .and_then(|v| v.as_i64().or_else(|| v.as_str().and_then(|s| s.parse().ok())))
            .unwrap_or_default();

        Self {
            id,
            name: text_column(data.get("name")),
            quote: text_column(data.get("quote")),
            created_at: data
                .get("created_at")
                .and_then(|v| v.as_str())
                .and_then(parse_timestamp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Message => "message",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "name" => Ok(FormField::Name),
            "email" => Ok(FormField::Email),
            "phone" => Ok(FormField::Phone),
            "message" => Ok(FormField::Message),
            other => Err(SiteError::DecodeError {
                message: format!("unknown form field: {}", other),
            }),
        }
    }
}

/// The consultation form as it is being filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ConsultationRequest {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl From<&ConsultationRequest> for Record {
    fn from(request: &ConsultationRequest) -> Self {
        let data = FormField::ALL
            .iter()
            .map(|field| {
                (
                    field.as_str().to_string(),
                    serde_json::Value::String(request.get(*field).to_string()),
                )
            })
            .collect();
        Record { data }
    }
}

/// Blocking notification shown to the visitor after a submission resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Submitted,
    SubmitFailed(String),
}

impl Alert {
    pub fn text(&self) -> String {
        match self {
            Alert::Submitted => "Form submitted successfully!".to_string(),
            Alert::SubmitFailed(message) => format!("Error submitting form: {}", message),
        }
    }
}
