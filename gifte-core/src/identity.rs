//! Identity records and input validation
//!
//! An [`IdentityRequest`] is raw caller input. [`IdentityRequest::validate`]
//! turns it into a [`ValidatedIdentity`], the only form the lookup layer
//! accepts. Validation is the single fatal error path: nothing touches the
//! network until it has passed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

/// Minimum phone length after reduction to digits and a leading `+`
pub const MIN_PHONE_LEN: usize = 7;

static HANDLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._]{1,30}$").unwrap());

/// Field of an identity request that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestField {
    Email,
    Phone,
    Handle,
}

impl fmt::Display for RequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestField::Email => "email",
            RequestField::Phone => "phone",
            RequestField::Handle => "handle",
        };
        f.write_str(name)
    }
}

/// Rejection of an identity request, naming the violated field
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: RequestField,
    pub reason: String,
}

impl ValidationError {
    fn new(field: RequestField, reason: &str) -> Self {
        Self {
            field,
            reason: reason.to_string(),
        }
    }
}

/// Raw identity record as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRequest {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub handle: Option<String>,
}

impl IdentityRequest {
    pub fn new(email: &str, phone: &str) -> Self {
        Self {
            email: email.to_string(),
            phone: phone.to_string(),
            handle: None,
        }
    }

    pub fn with_handle(mut self, handle: &str) -> Self {
        self.handle = Some(handle.to_string());
        self
    }

    /// Normalize and check every field, consuming the raw request
    pub fn validate(self) -> Result<ValidatedIdentity, ValidationError> {
        let email = self.email.trim().to_string();
        let at = validate_email(&email)?;

        let phone = self.phone.trim().to_string();
        let normalized_phone = normalize_phone(&phone);
        if normalized_phone.len() < MIN_PHONE_LEN {
            return Err(ValidationError::new(
                RequestField::Phone,
                "must contain at least 7 digits",
            ));
        }

        // Blank handles count as absent
        let handle = match self.handle.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(h) if HANDLE_REGEX.is_match(h) => Some(h.to_string()),
            Some(_) => {
                return Err(ValidationError::new(
                    RequestField::Handle,
                    "must be 1-30 characters of letters, digits, '.' or '_'",
                ))
            }
        };

        Ok(ValidatedIdentity {
            email,
            at,
            phone,
            normalized_phone,
            handle,
        })
    }
}

/// Check the email shape, returning the byte offset of its `@`
fn validate_email(email: &str) -> Result<usize, ValidationError> {
    let positions: Vec<usize> = email.match_indices('@').map(|(i, _)| i).collect();
    let at = match positions.as_slice() {
        [at] => *at,
        [] => return Err(ValidationError::new(RequestField::Email, "missing '@'")),
        _ => {
            return Err(ValidationError::new(
                RequestField::Email,
                "must contain exactly one '@'",
            ))
        }
    };

    if at == 0 {
        return Err(ValidationError::new(RequestField::Email, "missing local part"));
    }

    let domain = &email[at + 1..];
    if domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::new(
            RequestField::Email,
            "domain must contain '.'",
        ));
    }

    Ok(at)
}

/// Keep only digits and a single leading `+`
pub fn normalize_phone(phone: &str) -> String {
    let trimmed = phone.trim();
    let mut normalized = String::with_capacity(trimmed.len());
    if trimmed.starts_with('+') {
        normalized.push('+');
    }
    normalized.extend(trimmed.chars().filter(char::is_ascii_digit));
    normalized
}

/// An identity record that passed validation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedIdentity {
    email: String,
    #[serde(skip)]
    at: usize,
    phone: String,
    normalized_phone: String,
    handle: Option<String>,
}

impl ValidatedIdentity {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn local_part(&self) -> &str {
        &self.email[..self.at]
    }

    pub fn domain(&self) -> &str {
        &self.email[self.at + 1..]
    }

    /// Phone exactly as supplied (trimmed)
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Phone reduced to digits and an optional leading `+`
    pub fn normalized_phone(&self) -> &str {
        &self.normalized_phone
    }

    /// Phone in `+<digits>` form
    pub fn e164(&self) -> String {
        if self.normalized_phone.starts_with('+') {
            self.normalized_phone.clone()
        } else {
            format!("+{}", self.normalized_phone)
        }
    }

    /// Phone digits without any `+`
    pub fn phone_digits(&self) -> &str {
        self.normalized_phone.trim_start_matches('+')
    }

    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref()
    }

    /// Username for the social-profile lookup: the handle if given, else the
    /// lowercased local part of the email
    pub fn social_target(&self) -> String {
        match &self.handle {
            Some(handle) => handle.clone(),
            None => self.local_part().to_lowercase(),
        }
    }
}
