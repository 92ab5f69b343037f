//! Request shape validation.
//!
//! Each payload is described by a [`Schema`]: an ordered list of
//! [`FieldRule`]s. [`validate`] walks the rules in order and reports the first
//! violation as a client-facing message. Unknown keys are rejected.

use serde_json::{Map, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Email,
}

/// Constraints on one string field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub required: bool,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
    pub format: Option<Format>,
}

impl FieldRule {
    pub const fn string(name: &'static str) -> Self {
        Self {
            name,
            required: false,
            min_len: None,
            max_len: None,
            format: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn length(mut self, min: usize, max: usize) -> Self {
        self.min_len = Some(min);
        self.max_len = Some(max);
        self
    }

    pub const fn email(mut self) -> Self {
        self.format = Some(Format::Email);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [FieldRule],
}

pub const REGISTER_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule::string("name").length(6, 255).required(),
        FieldRule::string("email").length(6, 255).required().email(),
        FieldRule::string("password").length(6, 255).required(),
    ],
};

pub const LOGIN_SCHEMA: Schema = Schema {
    fields: &[
        FieldRule::string("email").length(6, 255).required().email(),
        FieldRule::string("password").length(6, 255).required(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NotAnObject,
    Required(&'static str),
    NotAString(&'static str),
    Empty(&'static str),
    TooShort(&'static str, usize),
    TooLong(&'static str, usize),
    InvalidEmail(&'static str),
    UnknownField(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "\"value\" must be of type object"),
            Self::Required(k) => write!(f, "\"{k}\" is required"),
            Self::NotAString(k) => write!(f, "\"{k}\" must be a string"),
            Self::Empty(k) => write!(f, "\"{k}\" is not allowed to be empty"),
            Self::TooShort(k, n) => {
                write!(f, "\"{k}\" length must be at least {n} characters long")
            }
            Self::TooLong(k, n) => write!(
                f,
                "\"{k}\" length must be less than or equal to {n} characters long"
            ),
            Self::InvalidEmail(k) => write!(f, "\"{k}\" must be a valid email"),
            Self::UnknownField(k) => write!(f, "\"{k}\" is not allowed"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate(schema: &Schema, value: &Value) -> Result<(), ValidationError> {
    let obj = value.as_object().ok_or(ValidationError::NotAnObject)?;

    for rule in schema.fields {
        check_field(rule, obj)?;
    }

    if let Some(unknown) = obj
        .keys()
        .find(|k| !schema.fields.iter().any(|r| r.name == k.as_str()))
    {
        return Err(ValidationError::UnknownField(unknown.clone()));
    }

    Ok(())
}

pub fn validate_registration(value: &Value) -> Result<(), ValidationError> {
    validate(&REGISTER_SCHEMA, value)
}

pub fn validate_login(value: &Value) -> Result<(), ValidationError> {
    validate(&LOGIN_SCHEMA, value)
}

fn check_field(rule: &FieldRule, obj: &Map<String, Value>) -> Result<(), ValidationError> {
    let name = rule.name;
    let text = match obj.get(name) {
        None => {
            return if rule.required {
                Err(ValidationError::Required(name))
            } else {
                Ok(())
            }
        }
        Some(Value::String(s)) => s,
        Some(_) => return Err(ValidationError::NotAString(name)),
    };

    if text.is_empty() {
        return Err(ValidationError::Empty(name));
    }

    let len = text.chars().count();
    if let Some(min) = rule.min_len {
        if len < min {
            return Err(ValidationError::TooShort(name, min));
        }
    }
    if let Some(max) = rule.max_len {
        if len > max {
            return Err(ValidationError::TooLong(name, max));
        }
    }

    match rule.format {
        Some(Format::Email) if !is_email_shaped(text) => Err(ValidationError::InvalidEmail(name)),
        _ => Ok(()),
    }
}

/// `local@domain.tld` with no whitespace, one `@`, and a dotted domain whose
/// labels are non-empty and whose top-level label is at least two letters.
fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return false;
    }
    let valid_label = |l: &&str| {
        !l.starts_with('-')
            && !l.ends_with('-')
            && l.chars().all(|c| c.is_alphanumeric() || c == '-')
    };
    if !labels.iter().all(valid_label) {
        return false;
    }
    labels
        .last()
        .is_some_and(|tld| tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic))
}
