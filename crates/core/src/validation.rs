//! Payload validation.
//!
//! Incoming JSON bodies are checked against a [`Schema`] before they are
//! deserialized, so a single response can list every offending field.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use survey_common::{AppError, AppResult};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::expiration::parse_expire_at;

/// Expected type of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any string.
    Text,
    /// A string that parses as an expiration timestamp.
    Timestamp,
}

/// Rule for one payload field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Reject `""` (and whitespace-only strings).
    pub non_empty: bool,
}

/// A set of field rules for one payload shape.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

/// `{ title, expireAt? }`
pub const POLL_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule {
            name: "title",
            kind: FieldKind::Text,
            required: true,
            non_empty: true,
        },
        FieldRule {
            name: "expireAt",
            kind: FieldKind::Timestamp,
            required: false,
            non_empty: true,
        },
    ],
};

/// `{ title, pollId }`. An empty title is a business rule checked after the
/// poll has been resolved, so it passes here.
pub const CHOICE_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule {
            name: "title",
            kind: FieldKind::Text,
            required: true,
            non_empty: false,
        },
        FieldRule {
            name: "pollId",
            kind: FieldKind::Text,
            required: true,
            non_empty: true,
        },
    ],
};

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

impl Schema {
    /// Check `payload`, collecting a violation for every field that fails.
    pub fn check(&self, payload: &Value) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let object = payload.as_object();

        for rule in self.fields {
            let value = object.and_then(|o| o.get(rule.name));
            let value = match value {
                None | Some(Value::Null) => {
                    if rule.required {
                        errors.add(rule.name, violation("required", "is required"));
                    }
                    continue;
                }
                Some(v) => v,
            };

            let Some(text) = value.as_str() else {
                errors.add(rule.name, violation("type", "must be a string"));
                continue;
            };

            if text.trim().is_empty() {
                if rule.non_empty {
                    errors.add(rule.name, violation("empty", "must not be empty"));
                }
                continue;
            }

            if rule.kind == FieldKind::Timestamp && parse_expire_at(text).is_none() {
                errors.add(
                    rule.name,
                    violation("timestamp", "must be a timestamp like 2099-01-01 00:00"),
                );
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Check `payload`, then deserialize and run the type's own validators.
    pub fn parse<T>(&self, payload: Value) -> AppResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        self.check(&payload)?;
        let input: T =
            serde_json::from_value(payload).map_err(|e| AppError::Validation(e.to_string()))?;
        input.validate()?;
        Ok(input)
    }
}

/// Input for creating a poll.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollInput {
    #[validate(length(min = 1, max = 256))]
    pub title: String,
    pub expire_at: Option<String>,
}

impl CreatePollInput {
    /// Validate and convert a raw poll payload.
    pub fn from_payload(payload: Value) -> AppResult<Self> {
        POLL_SCHEMA.parse(payload)
    }
}

/// Input for creating a choice.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChoiceInput {
    #[validate(length(max = 256))]
    pub title: String,
    pub poll_id: String,
}

impl CreateChoiceInput {
    /// Validate and convert a raw choice payload.
    pub fn from_payload(payload: Value) -> AppResult<Self> {
        CHOICE_SCHEMA.parse(payload)
    }
}
